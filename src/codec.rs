//! Wire format of the challenge
//!
//! A grid travels as the base64 encoding of a big-endian unsigned integer
//! whose decimal representation, left padded with zeros to 81 digits, lists
//! the cells row by row. Leading blank cells therefore vanish from the
//! integer and must be restored by padding when decoding.
use crate::board::positions::{col, row, N_CELLS};
use crate::board::Grid;
use crate::errors::FormatError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use num_bigint::BigUint;

/// Decodes a received line into a grid. Surrounding whitespace is ignored.
pub fn decode(wire: &[u8]) -> Result<Grid, FormatError> {
    let bytes = STANDARD.decode(trim_ascii(wire))?;
    let digits = BigUint::from_bytes_be(&bytes).to_str_radix(10);
    if digits.len() > N_CELLS {
        return Err(FormatError::TooManyDigits(digits.len()));
    }

    let mut cells = [0; N_CELLS];
    let offset = N_CELLS - digits.len();
    for (cell, digit) in cells[offset..].iter_mut().zip(digits.bytes()) {
        *cell = digit - b'0';
    }
    Ok(Grid(cells))
}

/// Encodes a filled grid for sending.
pub fn encode(grid: &Grid) -> Result<String, FormatError> {
    if let Some(cell) = grid.0.iter().position(|&num| num == 0) {
        let cell = cell as u8;
        return Err(FormatError::BlankCell {
            row: row(cell),
            col: col(cell),
        });
    }

    let digits = grid.to_str_line();
    debug_assert_eq!(digits.len(), N_CELLS);
    let number = BigUint::parse_bytes(digits.as_bytes(), 10)
        .expect("a filled grid always renders as 81 decimal digits");
    Ok(STANDARD.encode(number.to_bytes_be()))
}

fn trim_ascii(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |pos| pos + 1);
    &bytes[start..end]
}
