//! Errors of the codec, solver and session
use std::io;

#[cfg(doc)]
use crate::{codec, Grid};

/// Error for [`Grid::from_bytes`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("byte array contains entries >9")]
pub struct FromBytesError(pub(crate) ());

/// Error for [`Grid::from_str_line`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineParseError {
    /// Accepted values are numbers 1...9 and '0', '.' or '_' for empty cells
    #[error("cell {cell} contains invalid character '{ch}'")]
    InvalidEntry {
        /// Cell number goes from 0..=80, 0..=8 for first line, 9..=17 for 2nd and so on
        cell: u8,
        /// The invalid char
        ch: char,
    },
    /// Returns number of cells supplied
    #[error("grid contains {0} cells instead of required 81")]
    NotEnoughCells(u8),
    /// Returned if >=82 cells are supplied
    #[error("grid contains more than 81 cells")]
    TooManyCells,
}

/// A wire value that does not describe a well-formed grid, see [`codec`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The wire value is not standard base64
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The decoded integer has more decimal digits than there are cells
    #[error("decoded integer has {0} digits, at most 81 fit into a grid")]
    TooManyDigits(usize),
    /// Only filled grids can be encoded
    #[error("cell at row {row}, col {col} is blank")]
    BlankCell {
        /// Row index from 0..=8
        row: u8,
        /// Column index from 0..=8
        col: u8,
    },
}

/// The solver found no way to complete the puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("puzzle has no solution")]
pub struct Unsolvable;

/// Everything that aborts a session
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Received puzzle could not be decoded or the response could not be encoded
    #[error("round {round}: {source}")]
    Format {
        /// Zero-based round number
        round: usize,
        /// Underlying codec error
        source: FormatError,
    },
    /// Received puzzle could not be solved
    #[error("round {round}: {source}")]
    Unsolvable {
        /// Zero-based round number
        round: usize,
        /// Underlying solver error
        source: Unsolvable,
    },
    /// The service rejected the previous answer
    #[error("round {round}: service rejected the answer: {}", String::from_utf8_lossy(.line).trim_end())]
    Rejected {
        /// Zero-based round number in which the rejection arrived
        round: usize,
        /// The line containing the rejection marker
        line: Vec<u8>,
    },
    /// Reading from or writing to the service failed
    #[error("transport error")]
    Io(#[from] io::Error),
}
