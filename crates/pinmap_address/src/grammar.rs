//! Bus and matrix address grammar.
//!
//! Grammar v2 accepts these textual forms:
//!
//! | Form               | Example            | Meaning                         |
//! |--------------------|--------------------|---------------------------------|
//! | `A<b>-B<k>-<o>`    | `A1-B0-3`          | board 1, bank 0, output 3       |
//! | `<b>/<k>/<o>`      | `1/0/3`            | board 1, bank 0, output 3       |
//! | `<src>:<sink>`     | `C-A0-B0-2:R-A1-B1-5` | lamp matrix source and sink  |
//!
//! Boards run from 0 to 127 and banks are 0 or 1, so every address has its
//! own flat bank. Each lamp half is alias-rewritten first; a literal `C-` or
//! `R-` role prefix is then dropped from the result before decoding.

use pinmap_foundation::GrammarError;
use pinmap_foundation::hardware::{BANKS_PER_BOARD, MAX_BOARD};

use crate::alias::{AliasRule, resolve_alias};

/// Separator between the source and sink halves of a lamp matrix address.
pub const MATRIX_SEPARATOR: char = ':';

/// Role prefixes a lamp matrix half may carry (column, row).
const ROLE_PREFIXES: [&str; 2] = ["C-", "R-"];

/// A board/bank/output coordinate on the driver bus.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BusAddress {
    /// Driver board number.
    pub board: u8,
    /// Bank within the board (0 or 1).
    pub bank: u8,
    /// Output within the bank.
    pub output: u8,
}

impl BusAddress {
    /// Creates a bus address.
    #[must_use]
    pub const fn new(board: u8, bank: u8, output: u8) -> Self {
        Self {
            board,
            bank,
            output,
        }
    }

    /// The flat bank identifier, `board * 2 + bank`.
    ///
    /// Parsed addresses always fit. Hand-built ones past the grammar's
    /// bounds saturate at `u8::MAX`, which no driver group can reach.
    #[must_use]
    pub const fn bank_id(self) -> u8 {
        self.board
            .saturating_mul(BANKS_PER_BOARD)
            .saturating_add(self.bank)
    }
}

/// Parses a bus address without applying any alias rules.
///
/// # Errors
///
/// Returns [`GrammarError::NotBusAddress`] if the code has neither delimiter
/// or the wrong number of components, [`GrammarError::BadComponent`] if a
/// component is not a number, and [`GrammarError::OutOfRange`] for a board
/// above 127 or a bank other than 0 and 1.
pub fn parse_bus_address(code: &str) -> Result<BusAddress, GrammarError> {
    let code = code.trim();
    let not_bus = || GrammarError::NotBusAddress {
        code: code.to_string(),
    };

    let (board, bank, output) = if code.contains('-') {
        let parts: Vec<&str> = code.split('-').collect();
        let [board, bank, output] = parts.as_slice() else {
            return Err(not_bus());
        };
        (
            strip_tag(*board, 'A').ok_or_else(not_bus)?,
            strip_tag(*bank, 'B').ok_or_else(not_bus)?,
            *output,
        )
    } else if code.contains('/') {
        let parts: Vec<&str> = code.split('/').collect();
        let [board, bank, output] = parts.as_slice() else {
            return Err(not_bus());
        };
        (*board, *bank, *output)
    } else {
        return Err(not_bus());
    };

    Ok(BusAddress::new(
        bounded(code, "board", component(code, board)?, MAX_BOARD)?,
        bounded(code, "bank", component(code, bank)?, BANKS_PER_BOARD - 1)?,
        component(code, output)?,
    ))
}

/// Applies alias rules, then parses the result as a bus address.
///
/// # Errors
///
/// Same as [`parse_bus_address`], reported against the rewritten code.
pub fn decode_bus_address(code: &str, rules: &[AliasRule]) -> Result<BusAddress, GrammarError> {
    parse_bus_address(&resolve_alias(code, rules))
}

/// Returns true if `code`, after alias rewriting, is a bus address.
#[must_use]
pub fn is_bus_address(code: &str, rules: &[AliasRule]) -> bool {
    decode_bus_address(code, rules).is_ok()
}

/// Splits a lamp matrix address into its source and sink halves.
///
/// The halves are returned as written; see [`decode_matrix_half`].
///
/// # Errors
///
/// Returns [`GrammarError::NotMatrix`] unless the code has exactly two halves.
pub fn split_matrix(code: &str) -> Result<(String, String), GrammarError> {
    let parts: Vec<&str> = code.trim().split(MATRIX_SEPARATOR).collect();
    match parts.as_slice() {
        [source, sink] => Ok((source.trim().to_string(), sink.trim().to_string())),
        _ => Err(GrammarError::NotMatrix {
            code: code.to_string(),
            parts: parts.len(),
        }),
    }
}

/// Decodes one lamp matrix half: aliases, then role prefix, then bus grammar.
///
/// # Errors
///
/// Same as [`parse_bus_address`], reported against the rewritten half.
pub fn decode_matrix_half(half: &str, rules: &[AliasRule]) -> Result<BusAddress, GrammarError> {
    let rewritten = resolve_alias(half, rules);
    parse_bus_address(strip_role(rewritten.trim()))
}

fn strip_role(half: &str) -> &str {
    ROLE_PREFIXES
        .iter()
        .find_map(|role| {
            half.get(..role.len())
                .filter(|head| head.eq_ignore_ascii_case(role))
                .map(|_| &half[role.len()..])
        })
        .unwrap_or(half)
}

fn strip_tag(part: &str, tag: char) -> Option<&str> {
    let mut chars = part.chars();
    match chars.next() {
        Some(c) if c.eq_ignore_ascii_case(&tag) => Some(chars.as_str()),
        _ => None,
    }
}

fn component(code: &str, part: &str) -> Result<u8, GrammarError> {
    part.trim()
        .parse::<u8>()
        .map_err(|_| GrammarError::BadComponent {
            code: code.to_string(),
            component: part.to_string(),
        })
}

fn bounded(code: &str, component: &'static str, value: u8, max: u8) -> Result<u8, GrammarError> {
    if value > max {
        return Err(GrammarError::OutOfRange {
            code: code.to_string(),
            component,
            value,
            max,
        });
    }
    Ok(value)
}
