//! Per-generation position-code decoding.
//!
//! Short codes are a letter prefix followed by digits. A code of length 3
//! carries its two-digit number in characters 1-2 (`C23`), one of length 4
//! in characters 2-3 (`SD12`). Every other length, and every code whose
//! prefix or digits do not fit the generation's formula, is parsed as a plain
//! integer instead.
//!
//! | Prefix | Item                 | WPC family                     | Stern                          |
//! |--------|----------------------|--------------------------------|--------------------------------|
//! | `F`    | flipper coil         | 32-39 by side/position/winding | -                              |
//! | `L`    | lamp                 | row/column matrix from 80      | column-major matrix from 80    |
//! | `C`    | coil                 | split by driver board range    | `x + 31`                       |
//! | `G`    | general illumination | `x + 71`                       | -                              |
//! | `SD`   | dedicated switch     | 8-15                           | `n + 7`                        |
//! | `SF`   | flipper switch       | 0-7                            | -                              |
//! | `S`    | matrix switch        | from 32, 16 per row            | SAM and Whitestar differ       |

use pinmap_foundation::{DecodeError, MachineGeneration};

/// Decodes a position code into a flat driver or switch number.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidCode`] when no formula applies and the code
/// is not a plain `u16` either.
pub fn decode(generation: MachineGeneration, code: &str) -> Result<u16, DecodeError> {
    let upper = code.trim().to_ascii_uppercase();
    let bytes = upper.as_bytes();

    let formula = if generation.is_wpc() {
        wpc(generation, bytes)
    } else if generation.is_stern() {
        let matrix_switch = if generation == MachineGeneration::SternSam {
            sam_matrix_switch
        } else {
            whitestar_matrix_switch
        };
        stern(bytes, matrix_switch)
    } else {
        None
    };

    formula
        .or_else(|| upper.parse::<u16>().ok())
        .ok_or_else(|| DecodeError::InvalidCode {
            generation,
            code: code.to_string(),
        })
}

fn digit(byte: u8) -> Option<u16> {
    byte.is_ascii_digit().then(|| u16::from(byte - b'0'))
}

/// The two-digit number carried by a 3- or 4-character code.
fn number(code: &[u8]) -> Option<u16> {
    let (tens, ones) = match code.len() {
        3 => (code[1], code[2]),
        4 => (code[2], code[3]),
        _ => return None,
    };
    Some(digit(tens)? * 10 + digit(ones)?)
}

fn wpc(generation: MachineGeneration, code: &[u8]) -> Option<u16> {
    match *code.first()? {
        b'F' => wpc_flipper(code),
        b'L' => {
            let x = number(code)?;
            Some(80 + 8 * (x / 10).checked_sub(1)? + (x % 10).checked_sub(1)?)
        }
        b'C' => {
            let x = number(code)?;
            Some(match x {
                0..=28 => x + 39,
                29..=36 => x + 3,
                // 37-44 sit on the 8-driver board, wired differently on WPC-95
                37..=44 if generation == MachineGeneration::Wpc95 => x + 31,
                37..=44 => x + 107,
                _ => x + 108,
            })
        }
        b'G' => Some(number(code)? + 71),
        b'S' => match *code.get(1)? {
            b'D' => Some(8 + digit(*code.get(2)?)?.checked_sub(1)?),
            b'F' => digit(*code.get(2)?)?.checked_sub(1),
            _ => {
                let x = number(code)?;
                Some(32 + 16 * (x / 10).checked_sub(1)? + (x % 10).checked_sub(1)?)
            }
        },
        _ => None,
    }
}

/// `F` + lower/upper + right/left + main/hold.
///
/// Only `L`, `R` and `M` are tested; any other letter in a slot selects
/// upper, left or hold respectively.
fn wpc_flipper(code: &[u8]) -> Option<u16> {
    let [_, position, side, winding] = *code else {
        return None;
    };
    let position = if position == b'L' { 0 } else { 4 };
    let side = if side == b'R' { 0 } else { 2 };
    let winding = if winding == b'M' { 0 } else { 1 };
    Some(32 + position + side + winding)
}

fn stern(code: &[u8], matrix_switch: fn(u16) -> u16) -> Option<u16> {
    match *code.first()? {
        b'L' => {
            let x = number(code)?.checked_sub(1)?;
            Some(80 + 16 * (7 - x % 8) + x / 8)
        }
        b'C' => Some(number(code)? + 31),
        b'S' => {
            if *code.get(1)? == b'D' {
                if code.len() == 3 {
                    Some(digit(code[2])? + 7)
                } else {
                    Some(number(code)? + 7)
                }
            } else {
                Some(matrix_switch(number(code)?.checked_sub(1)?))
            }
        }
        _ => None,
    }
}

/// SAM matrix switches; `n` is the zero-based switch number.
fn sam_matrix_switch(n: u16) -> u16 {
    if n % 16 < 8 {
        32 + 8 * (n / 8) + (7 - n % 8)
    } else {
        32 + n
    }
}

/// Whitestar matrix switches; `n` is the zero-based switch number.
fn whitestar_matrix_switch(n: u16) -> u16 {
    32 + 16 * (n / 8) + (7 - n % 8)
}
