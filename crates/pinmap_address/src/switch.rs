//! Switch address resolution.
//!
//! Switches are read individually, so they resolve straight to a flat switch
//! number. Unlike coils and lamps there is no fallback: a switch code that
//! does not parse is an error.

use pinmap_foundation::hardware::{
    DEDICATED_SWITCH_BASE, MATRIX_SWITCH_BASE, MATRIX_SWITCH_ROW_WIDTH,
};
use pinmap_foundation::{DecodeError, MachineGeneration};

use crate::address::{ResolvedAddress, SwitchKind};
use crate::decoder::decode;

/// Separator between row and column of a matrix switch.
pub const SWITCH_MATRIX_SEPARATOR: char = '/';

/// A switch position code resolved to a flat switch number.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SwitchAddress {
    /// Wiring kind.
    pub kind: SwitchKind,
    /// Flat switch number.
    pub index: u16,
}

impl SwitchAddress {
    /// Resolves a switch position code.
    ///
    /// On bus-driver machines: `SD<n>` is dedicated switch `8 + (n - 1)`,
    /// `<row>/<col>` is matrix switch `32 + row * 16 + col`, anything else a
    /// raw number. Other generations use the generation decoder.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidCode`] if the code fits none of these.
    pub fn resolve(generation: MachineGeneration, code: &str) -> Result<Self, DecodeError> {
        let invalid = || DecodeError::InvalidCode {
            generation,
            code: code.to_string(),
        };
        let upper = code.trim().to_ascii_uppercase();

        if !generation.uses_driver_banks() {
            let index = decode(generation, code)?;
            let kind = if upper.starts_with("SD") || upper.starts_with("SF") {
                SwitchKind::Dedicated
            } else if upper.starts_with('S') {
                SwitchKind::Matrix
            } else {
                SwitchKind::Raw
            };
            return Ok(Self { kind, index });
        }

        if let Some(n) = upper.strip_prefix("SD") {
            let n: u16 = n.parse().map_err(|_| invalid())?;
            let index = n
                .checked_sub(1)
                .map(|n| DEDICATED_SWITCH_BASE + n)
                .ok_or_else(invalid)?;
            Ok(Self {
                kind: SwitchKind::Dedicated,
                index,
            })
        } else if upper.contains(SWITCH_MATRIX_SEPARATOR) {
            let parts: Vec<&str> = upper.split(SWITCH_MATRIX_SEPARATOR).collect();
            let [row, col] = parts.as_slice() else {
                return Err(invalid());
            };
            let row: u16 = row.trim().parse().map_err(|_| invalid())?;
            let col: u16 = col.trim().parse().map_err(|_| invalid())?;
            let index = row
                .checked_mul(MATRIX_SWITCH_ROW_WIDTH)
                .and_then(|r| r.checked_add(MATRIX_SWITCH_BASE))
                .and_then(|r| r.checked_add(col))
                .ok_or_else(invalid)?;
            Ok(Self {
                kind: SwitchKind::Matrix,
                index,
            })
        } else {
            let index = upper.parse().map_err(|_| invalid())?;
            Ok(Self {
                kind: SwitchKind::Raw,
                index,
            })
        }
    }

    /// The address as a [`ResolvedAddress::Switch`].
    #[must_use]
    pub const fn address(&self) -> ResolvedAddress {
        ResolvedAddress::Switch {
            kind: self.kind,
            index: self.index,
        }
    }
}
