//! Coil address resolution.
//!
//! On bus-driver machines a coil is either a dedicated pin (`C01`-`C99`) or a
//! bus address. The bus grammar is always tried first, so an alias that turns
//! `C01` into `A0-B0-1` wins over the dedicated reading. Other generations
//! decode the code to a flat driver number.

use log::debug;
use pinmap_foundation::MachineGeneration;
use pinmap_foundation::hardware::OUTPUTS_PER_BANK;

use crate::address::ResolvedAddress;
use crate::alias::AliasRule;
use crate::decoder::decode;
use crate::grammar::{BusAddress, decode_bus_address};

/// A coil position code resolved under one machine generation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CoilAddress {
    generation: MachineGeneration,
    address: ResolvedAddress,
}

impl CoilAddress {
    /// Resolves a coil position code.
    ///
    /// Never fails: codes that fit no grammar resolve to
    /// [`ResolvedAddress::Unknown`].
    #[must_use]
    pub fn resolve(generation: MachineGeneration, code: &str, aliases: &[AliasRule]) -> Self {
        let address = if generation.uses_driver_banks() {
            if let Ok(bus) = decode_bus_address(code, aliases) {
                ResolvedAddress::bus(bus)
            } else if let Some(output) = dedicated_pin(code) {
                ResolvedAddress::Dedicated { output }
            } else {
                ResolvedAddress::Unknown
            }
        } else {
            decode(generation, code).map_or(ResolvedAddress::Unknown, |output| {
                ResolvedAddress::Dedicated { output }
            })
        };
        debug!("coil {code:?} resolved to {address}");
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

    /// The generation the code was resolved under.
    #[must_use]
    pub const fn generation(&self) -> MachineGeneration {
        self.generation
    }

    /// The flat bank this coil belongs to on a bus-driver machine.
    ///
    /// Dedicated pin `n` sits in bank `(n - 1) / 8`; bus coils in
    /// `board * 2 + bank`. `None` for unknown coils and for generations
    /// without driver banks.
    #[must_use]
    pub fn bank(&self) -> Option<u8> {
        if !self.generation.uses_driver_banks() {
            return None;
        }
        match self.address {
            ResolvedAddress::Dedicated { output } => output
                .checked_sub(1)
                .and_then(|n| u8::try_from(n / OUTPUTS_PER_BANK).ok()),
            ResolvedAddress::Bus {
                board,
                bank,
                output,
            } => Some(BusAddress::new(board, bank, output).bank_id()),
            _ => None,
        }
    }

    /// The output number as written in the code.
    #[must_use]
    pub fn output(&self) -> Option<u16> {
        match self.address {
            ResolvedAddress::Dedicated { output } => Some(output),
            ResolvedAddress::Bus { output, .. } => Some(u16::from(output)),
            _ => None,
        }
    }

    /// The driver number of a directly wired coil.
    ///
    /// Dedicated pins are numbered from 1, drivers from 0. Decoded flat
    /// numbers from other generations are already driver numbers.
    #[must_use]
    pub fn dedicated_driver(&self) -> Option<u16> {
        match self.address {
            ResolvedAddress::Dedicated { output } if self.generation.uses_driver_banks() => {
                output.checked_sub(1)
            }
            ResolvedAddress::Dedicated { output } => Some(output),
            _ => None,
        }
    }
}

/// `C` followed by one or two digits, numbered from 1.
fn dedicated_pin(code: &str) -> Option<u16> {
    let code = code.trim();
    if !(2..=3).contains(&code.len()) {
        return None;
    }
    let digits = code.strip_prefix(['C', 'c'])?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u16>().ok().filter(|n| *n >= 1)
}
