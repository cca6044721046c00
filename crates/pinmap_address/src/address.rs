//! Resolved hardware addresses.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::grammar::BusAddress;

/// How a switch is wired.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SwitchKind {
    /// Directly wired switch input.
    Dedicated,
    /// Row/column switch matrix.
    Matrix,
    /// A raw switch number.
    Raw,
}

/// The hardware coordinates a position code resolved to.
///
/// Exactly one shape applies to any code. `Unknown` carries no coordinates:
/// the item stays nameable but receives no hardware.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResolvedAddress {
    /// A directly wired pin, or a flat number from a generation decoder.
    Dedicated {
        /// The pin or flat number.
        output: u16,
    },
    /// A coil on the driver bus.
    Bus {
        /// Driver board number.
        board: u8,
        /// Bank within the board.
        bank: u8,
        /// Output within the bank.
        output: u8,
    },
    /// A matrixed lamp, driven by a source (column) and a sink (row).
    BusLamp {
        /// Source side of the matrix.
        source: BusAddress,
        /// Sink side of the matrix.
        sink: BusAddress,
    },
    /// A switch input.
    Switch {
        /// Wiring kind.
        kind: SwitchKind,
        /// Flat switch number.
        index: u16,
    },
    /// The code did not fit any grammar.
    Unknown,
}

impl ResolvedAddress {
    /// Builds a `Bus` address from a parsed bus coordinate.
    #[must_use]
    pub const fn bus(address: BusAddress) -> Self {
        Self::Bus {
            board: address.board,
            bank: address.bank,
            output: address.output,
        }
    }

    /// Returns true if the code did not resolve.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl fmt::Display for ResolvedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dedicated { output } => write!(f, "dedicated {output}"),
            Self::Bus {
                board,
                bank,
                output,
            } => write!(f, "A{board}-B{bank}-{output}"),
            Self::BusLamp { source, sink } => write!(
                f,
                "A{}-B{}-{}:A{}-B{}-{}",
                source.board, source.bank, source.output, sink.board, sink.bank, sink.output
            ),
            Self::Switch { kind, index } => write!(f, "{kind:?} switch {index}"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}
