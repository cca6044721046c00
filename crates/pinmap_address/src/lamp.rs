//! Lamp address resolution.
//!
//! On bus-driver machines a lamp is either a dedicated pin (`L1`-`L99`) or a
//! matrix address with a source half and a sink half, each a bus address.

use log::debug;
use pinmap_foundation::MachineGeneration;

use crate::address::ResolvedAddress;
use crate::alias::AliasRule;
use crate::decoder::decode;
use crate::grammar::{BusAddress, decode_matrix_half, split_matrix};

/// A lamp position code resolved under one machine generation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LampAddress {
    generation: MachineGeneration,
    address: ResolvedAddress,
}

impl LampAddress {
    /// Resolves a lamp position code.
    ///
    /// Never fails: codes that fit no grammar resolve to
    /// [`ResolvedAddress::Unknown`].
    #[must_use]
    pub fn resolve(generation: MachineGeneration, code: &str, aliases: &[AliasRule]) -> Self {
        let address = if generation.uses_driver_banks() {
            if let Some(output) = dedicated_pin(code) {
                ResolvedAddress::Dedicated { output }
            } else if let Some((source, sink)) = matrix(code, aliases) {
                ResolvedAddress::BusLamp { source, sink }
            } else {
                ResolvedAddress::Unknown
            }
        } else {
            decode(generation, code).map_or(ResolvedAddress::Unknown, |output| {
                ResolvedAddress::Dedicated { output }
            })
        };
        debug!("lamp {code:?} resolved to {address}");
        Self {
            generation,
            address,
        }
    }

    /// The resolved address.
    #[must_use]
    pub const fn address(&self) -> ResolvedAddress {
        self.address
    }

    /// The pin or flat number of a directly wired lamp.
    #[must_use]
    pub const fn dedicated_output(&self) -> Option<u16> {
        match self.address {
            ResolvedAddress::Dedicated { output } => Some(output),
            _ => None,
        }
    }

    /// The source half of a matrixed lamp.
    #[must_use]
    pub const fn source(&self) -> Option<BusAddress> {
        match self.address {
            ResolvedAddress::BusLamp { source, .. } => Some(source),
            _ => None,
        }
    }

    /// The sink half of a matrixed lamp.
    #[must_use]
    pub const fn sink(&self) -> Option<BusAddress> {
        match self.address {
            ResolvedAddress::BusLamp { sink, .. } => Some(sink),
            _ => None,
        }
    }

    /// Flat source bank, `board * 2 + bank`.
    #[must_use]
    pub fn source_bank(&self) -> Option<u8> {
        self.source().map(BusAddress::bank_id)
    }

    /// Flat sink bank, `board * 2 + bank`.
    #[must_use]
    pub fn sink_bank(&self) -> Option<u8> {
        self.sink().map(BusAddress::bank_id)
    }

    /// Source output (the matrix column line).
    #[must_use]
    pub fn source_output(&self) -> Option<u8> {
        self.source().map(|s| s.output)
    }

    /// Sink output (the matrix row line).
    #[must_use]
    pub fn sink_output(&self) -> Option<u8> {
        self.sink().map(|s| s.output)
    }
}

/// `L` followed by one or two digits.
fn dedicated_pin(code: &str) -> Option<u16> {
    let code = code.trim();
    if !(2..=3).contains(&code.len()) {
        return None;
    }
    let digits = code.strip_prefix(['L', 'l'])?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn matrix(code: &str, aliases: &[AliasRule]) -> Option<(BusAddress, BusAddress)> {
    let (source, sink) = split_matrix(code).ok()?;
    let decode_half = |half: &str| match decode_matrix_half(half, aliases) {
        Ok(address) => Some(address),
        Err(err) => {
            debug!("lamp {code:?}: {err}");
            None
        }
    };
    Some((decode_half(&source)?, decode_half(&sink)?))
}
