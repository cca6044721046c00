//! Bring-up records handed to the transport layer.
//!
//! Field meanings follow the controller's register layout; the allocator only
//! decides their values.

use std::fmt;

use crate::config::DriverGlobals;
use crate::slot::{LampBank, Slot};

/// Configuration of one hardware driver group.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GroupConfig {
    /// Driver group (slot) number.
    pub slot: u8,
    /// Strobe time; lamp matrix groups use the lamp strobe time.
    pub slow_time: u16,
    /// Bank whose outputs this group drives.
    pub enable_index: u8,
    /// Source output activated while this group strobes (matrix only).
    pub row_activate_index: u8,
    /// Which source bank index drives the row (matrix only).
    pub row_enable_select: u8,
    /// Whether this group strobes a lamp matrix.
    pub matrixed: bool,
    /// Output polarity.
    pub polarity: bool,
    /// Whether the group is active.
    pub active: bool,
    /// Disable outputs after the strobe.
    pub disable_strobe_after: bool,
}

impl GroupConfig {
    /// Record for a dedicated group.
    #[must_use]
    pub fn dedicated(slot: u8, enabled: bool) -> Self {
        Self {
            slot,
            slow_time: 0,
            enable_index: slot,
            row_activate_index: 0,
            row_enable_select: 0,
            matrixed: false,
            polarity: true,
            active: enabled,
            disable_strobe_after: true,
        }
    }

    /// Record for a lamp matrix group.
    #[must_use]
    pub fn lamp(slot: u8, lamp: LampBank, strobe_time: u16) -> Self {
        Self {
            slot,
            slow_time: strobe_time,
            enable_index: lamp.sink_bank,
            row_activate_index: lamp.source_output,
            row_enable_select: lamp.source_index,
            matrixed: true,
            polarity: true,
            active: true,
            disable_strobe_after: true,
        }
    }

    /// Record for a coil bank group.
    #[must_use]
    pub fn coil(slot: u8, bank: u8) -> Self {
        Self {
            slot,
            slow_time: 0,
            enable_index: bank,
            row_activate_index: 0,
            row_enable_select: 0,
            matrixed: false,
            polarity: true,
            active: true,
            disable_strobe_after: true,
        }
    }

    /// Record for an unused group.
    #[must_use]
    pub fn disabled(slot: u8, strobe_time: u16) -> Self {
        Self {
            slot,
            slow_time: strobe_time,
            enable_index: 0,
            row_activate_index: 0,
            row_enable_select: 0,
            matrixed: false,
            polarity: true,
            active: false,
            disable_strobe_after: true,
        }
    }

    /// The record for `slot` given its final content.
    #[must_use]
    pub fn for_slot(slot: u8, content: Slot, globals: &DriverGlobals) -> Self {
        match content {
            Slot::Dedicated { enabled } => Self::dedicated(slot, enabled),
            Slot::Lamp(lamp) => Self::lamp(slot, lamp, globals.lamp_matrix_strobe_time),
            Slot::Coil { bank } => Self::coil(slot, bank),
            Slot::Unassigned | Slot::Disabled => {
                Self::disabled(slot, globals.lamp_matrix_strobe_time)
            }
        }
    }
}

impl fmt::Display for GroupConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.active {
            return write!(f, "driver group {} disabled", self.slot);
        }
        write!(
            f,
            "driver group {}: slow_time={} enable_index={}",
            self.slot, self.slow_time, self.enable_index
        )?;
        if self.matrixed {
            write!(
                f,
                " row_activate_index={} row_enable_index={} matrix",
                self.row_activate_index, self.row_enable_select
            )?;
        }
        Ok(())
    }
}

/// Machine-wide driver configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GlobalConfig {
    /// Whether driver outputs are enabled.
    pub enable_outputs: bool,
    /// Global output polarity.
    pub global_polarity: bool,
    /// Unused by bus-driver machines.
    pub use_clear: bool,
    /// Unused by bus-driver machines.
    pub strobe_start_select: bool,
    /// Unused by bus-driver machines.
    pub start_strobe_time: u8,
    /// First lamp source bank.
    pub matrix_row_enable_index0: u8,
    /// Second lamp source bank.
    pub matrix_row_enable_index1: u8,
    /// Whether matrix rows are active low.
    pub active_low_matrix_rows: bool,
    /// Stern watchdog tickling.
    pub tickle_stern_watchdog: bool,
    /// Whether enables are encoded (Stern boards).
    pub encode_enables: bool,
    /// Reset the watchdog-expired flag.
    pub watchdog_expired: bool,
    /// Whether the watchdog is enabled.
    pub watchdog_enable: bool,
    /// Watchdog reset time.
    pub watchdog_reset_time: u16,
}

impl GlobalConfig {
    /// The global record for bus-driver machines.
    ///
    /// `source_banks` must hold exactly the two lamp source bank slots.
    #[must_use]
    pub fn bus_driver(enable_outputs: bool, source_banks: [u8; 2], globals: &DriverGlobals) -> Self {
        Self {
            enable_outputs,
            global_polarity: true,
            use_clear: false,
            strobe_start_select: false,
            start_strobe_time: 1,
            matrix_row_enable_index0: source_banks[0],
            matrix_row_enable_index1: source_banks[1],
            active_low_matrix_rows: false,
            tickle_stern_watchdog: false,
            encode_enables: false,
            watchdog_expired: false,
            watchdog_enable: globals.use_watchdog,
            watchdog_reset_time: globals.watchdog_time,
        }
    }
}

/// Initial state of one driver.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DriverState {
    /// Driver number.
    pub driver_num: u16,
    /// Pulse time.
    pub output_drive_time: u8,
    /// Output polarity.
    pub polarity: bool,
    /// Whether the driver is on.
    pub state: bool,
    /// Wait for the first timeslot before driving.
    pub wait_for_first_time_slot: bool,
    /// Schedule bitmask.
    pub timeslots: u32,
    /// Patter on time.
    pub patter_on_time: u8,
    /// Patter off time.
    pub patter_off_time: u8,
    /// Whether patter is enabled.
    pub patter_enable: bool,
    /// Future-enable flag.
    pub future_enable: bool,
}

impl DriverState {
    /// An idle, active-high driver.
    #[must_use]
    pub const fn idle(driver_num: u16) -> Self {
        Self {
            driver_num,
            output_drive_time: 0,
            polarity: true,
            state: false,
            wait_for_first_time_slot: false,
            timeslots: 0,
            patter_on_time: 0,
            patter_off_time: 0,
            patter_enable: false,
            future_enable: false,
        }
    }
}
