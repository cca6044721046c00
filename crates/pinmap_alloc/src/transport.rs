//! The seam between allocation and the board.

use crate::records::{DriverState, GlobalConfig, GroupConfig};

/// Something that can write bring-up records to a driver board.
///
/// Implemented by the real device layer and by simulators. The allocator
/// never calls this itself; [`Allocation::apply`] does, in bring-up order.
///
/// [`Allocation::apply`]: crate::Allocation::apply
pub trait DriverTransport {
    /// The error a write can fail with.
    type Error;

    /// Writes one driver's initial state.
    ///
    /// # Errors
    ///
    /// Returns the transport's error if the write fails.
    fn update_driver_state(&mut self, state: &DriverState) -> Result<(), Self::Error>;

    /// Writes one driver group's configuration.
    ///
    /// # Errors
    ///
    /// Returns the transport's error if the write fails.
    fn update_group_config(&mut self, config: &GroupConfig) -> Result<(), Self::Error>;

    /// Writes the machine-wide driver configuration.
    ///
    /// # Errors
    ///
    /// Returns the transport's error if the write fails.
    fn update_global_config(&mut self, config: &GlobalConfig) -> Result<(), Self::Error>;

    /// Simulated devices skip per-driver state initialisation.
    fn is_simulated(&self) -> bool {
        false
    }
}

/// One call made against a [`RecordingTransport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportCall {
    /// `update_driver_state`
    DriverState(DriverState),
    /// `update_group_config`
    GroupConfig(GroupConfig),
    /// `update_global_config`
    GlobalConfig(GlobalConfig),
}

/// A transport that records every call, in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingTransport {
    /// Calls received so far.
    pub calls: Vec<TransportCall>,
    /// Whether to report itself as a simulated device.
    pub simulated: bool,
}

impl RecordingTransport {
    /// Creates a recorder that behaves like real hardware.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a recorder that behaves like a simulated device.
    #[must_use]
    pub fn simulated() -> Self {
        Self {
            calls: Vec::new(),
            simulated: true,
        }
    }

    /// The group records received, in order.
    pub fn group_configs(&self) -> impl Iterator<Item = &GroupConfig> {
        self.calls.iter().filter_map(|c| match c {
            TransportCall::GroupConfig(g) => Some(g),
            _ => None,
        })
    }

    /// The global records received, in order.
    pub fn global_configs(&self) -> impl Iterator<Item = &GlobalConfig> {
        self.calls.iter().filter_map(|c| match c {
            TransportCall::GlobalConfig(g) => Some(g),
            _ => None,
        })
    }
}

impl DriverTransport for RecordingTransport {
    type Error = std::convert::Infallible;

    fn update_driver_state(&mut self, state: &DriverState) -> Result<(), Self::Error> {
        self.calls.push(TransportCall::DriverState(*state));
        Ok(())
    }

    fn update_group_config(&mut self, config: &GroupConfig) -> Result<(), Self::Error> {
        self.calls.push(TransportCall::GroupConfig(*config));
        Ok(())
    }

    fn update_global_config(&mut self, config: &GlobalConfig) -> Result<(), Self::Error> {
        self.calls.push(TransportCall::GlobalConfig(*config));
        Ok(())
    }

    fn is_simulated(&self) -> bool {
        self.simulated
    }
}
