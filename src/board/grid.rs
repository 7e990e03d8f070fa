use crate::board::positions::{block, cell_at, col, row, N_CELLS};
use crate::board::Digit;
use crate::errors::{FromBytesError, LineParseError};
use std::fmt;

/// A 9x9 sudoku grid, stored in row-major order
///
/// Cells hold `0` for blanks and `1..=9` for digits. The inbound puzzle
/// contains blanks, the solved and perturbed response never does.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Grid(pub(crate) [u8; N_CELLS]);

impl Grid {
    /// Creates a grid from a byte array.
    /// All numbers must be below 10. Empty cells are denoted by 0.
    pub fn from_bytes(bytes: [u8; N_CELLS]) -> Result<Grid, FromBytesError> {
        if bytes.iter().all(|&byte| byte <= 9) {
            Ok(Grid(bytes))
        } else {
            Err(FromBytesError(()))
        }
    }

    /// Creates a grid from 9 rows of 9 cells each.
    pub fn from_rows(rows: [[u8; 9]; 9]) -> Result<Grid, FromBytesError> {
        let mut bytes = [0; N_CELLS];
        for (chunk, row) in bytes.chunks_mut(9).zip(rows.iter()) {
            chunk.copy_from_slice(row);
        }
        Grid::from_bytes(bytes)
    }

    /// Reads a grid from a single line of 81 characters.
    /// `1`-`9` are digits, `0`, `.` and `_` denote empty cells.
    pub fn from_str_line(s: &str) -> Result<Grid, LineParseError> {
        let mut bytes = [0; N_CELLS];
        let mut n_cells = 0;
        for (cell, ch) in s.trim_end().chars().enumerate() {
            if cell >= N_CELLS {
                return Err(LineParseError::TooManyCells);
            }
            bytes[cell] = match ch {
                '1'..='9' => ch as u8 - b'0',
                '0' | '.' | '_' => 0,
                _ => {
                    return Err(LineParseError::InvalidEntry {
                        cell: cell as u8,
                        ch,
                    })
                }
            };
            n_cells += 1;
        }
        if n_cells < N_CELLS {
            return Err(LineParseError::NotEnoughCells(n_cells as u8));
        }
        Ok(Grid(bytes))
    }

    /// The empty grid
    pub fn empty() -> Grid {
        Grid([0; N_CELLS])
    }

    /// Returns the cell at `row`, `col`. `0` means empty.
    ///
    /// # Panic
    /// Panics if `row` or `col` is not in `0..9`.
    pub fn get(&self, row: u8, col: u8) -> u8 {
        assert!(row < 9 && col < 9);
        self.0[cell_at(row, col) as usize]
    }

    /// Sets the cell at `row`, `col`.
    ///
    /// # Panic
    /// Panics if `row` or `col` is not in `0..9` or `value > 9`.
    pub fn set(&mut self, row: u8, col: u8, value: u8) {
        assert!(row < 9 && col < 9 && value <= 9);
        self.0[cell_at(row, col) as usize] = value;
    }

    /// Returns an iterator over the rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.0.chunks(9)
    }

    /// Returns the cells as a byte array, 0 for empty cells
    pub fn to_bytes(self) -> [u8; N_CELLS] {
        self.0
    }

    /// Returns an iterator over all cells, going from left to right, top to bottom
    pub fn iter(&self) -> impl Iterator<Item = Option<Digit>> + '_ {
        self.0.iter().map(|&num| Digit::new_checked(num))
    }

    /// Prints the grid as a string of 81 decimal digits with `0` for empty cells.
    pub fn to_str_line(&self) -> String {
        self.0.iter().map(|&num| char::from(b'0' + num)).collect()
    }

    /// Number of blank cells
    pub fn n_blanks(&self) -> usize {
        self.0.iter().filter(|&&num| num == 0).count()
    }

    /// Check whether every cell holds a digit
    pub fn is_filled(&self) -> bool {
        self.n_blanks() == 0
    }

    /// Check whether the grid is filled and no digit repeats in a row, column or block.
    pub fn is_solved(&self) -> bool {
        if !self.is_filled() {
            return false;
        }
        // one 9 bit mask per house
        let mut rows = [0u16; 9];
        let mut cols = [0u16; 9];
        let mut blocks = [0u16; 9];
        for (cell, &num) in (0..N_CELLS as u8).zip(self.0.iter()) {
            let mask: u16 = 1 << (num - 1);
            for seen in [
                &mut rows[row(cell) as usize],
                &mut cols[col(cell) as usize],
                &mut blocks[block(cell) as usize],
            ]
            .iter_mut()
            {
                if **seen & mask != 0 {
                    return false;
                }
                **seen |= mask;
            }
        }
        true
    }

    /// Returns a value that prints the grid in block format
    pub fn display_block(&self) -> impl fmt::Display + '_ {
        SudokuBlock(self)
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid({})", self.to_str_line())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.display_block(), f)
    }
}

struct SudokuBlock<'a>(&'a Grid);

impl fmt::Display for SudokuBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (cell, &num) in (0..N_CELLS as u8).zip((self.0).0.iter()) {
            match (row(cell), col(cell)) {
                (_, 3) | (_, 6) => write!(f, " ")?,    // seperate blocks in columns
                (3, 0) | (6, 0) => write!(f, "\n\n")?, // separate blocks in rows
                (0, 0) => {}
                (_, 0) => writeln!(f)?, // separate lines not between blocks
                _ => {}
            };
            match num {
                0 => write!(f, "_")?,
                _ => write!(f, "{}", num)?,
            };
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLVED: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    #[test]
    fn parse_line_formats() {
        let dots = "...2...633....54.1..1..398........9....538....3........263..5..5.37....847...1...";
        let zeros = dots.replace('.', "0");
        let underscores = dots.replace('.', "_");
        let grid = Grid::from_str_line(dots).unwrap();
        assert_eq!(grid, Grid::from_str_line(&zeros).unwrap());
        assert_eq!(grid, Grid::from_str_line(&underscores).unwrap());
        assert_eq!(grid.to_str_line(), zeros);
        assert_eq!(grid.get(0, 3), 2);
        assert_eq!(grid.get(8, 5), 1);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            Grid::from_str_line(&SOLVED[..80]),
            Err(LineParseError::NotEnoughCells(80))
        );
        assert_eq!(
            Grid::from_str_line(&format!("{}1", SOLVED)),
            Err(LineParseError::TooManyCells)
        );
        assert_eq!(
            Grid::from_str_line(&SOLVED.replacen('5', "x", 1)),
            Err(LineParseError::InvalidEntry { cell: 0, ch: 'x' })
        );
    }

    #[test]
    fn from_bytes_rejects_large_entries() {
        let mut bytes = [0; 81];
        assert!(Grid::from_bytes(bytes).is_ok());
        bytes[40] = 10;
        assert!(Grid::from_bytes(bytes).is_err());
    }

    #[test]
    fn rows_are_row_major() {
        let mut rows = [[0; 9]; 9];
        rows[2][7] = 5;
        let grid = Grid::from_rows(rows).unwrap();
        assert_eq!(grid.get(2, 7), 5);
        assert_eq!(grid.to_bytes()[2 * 9 + 7], 5);
        assert_eq!(grid.rows().nth(2).unwrap()[7], 5);
    }

    #[test]
    fn solved_check() {
        let mut grid = Grid::from_str_line(SOLVED).unwrap();
        assert!(grid.is_filled());
        assert!(grid.is_solved());

        let old = grid.get(4, 4);
        grid.set(4, 4, old % 9 + 1);
        assert!(grid.is_filled());
        assert!(!grid.is_solved());

        grid.set(4, 4, 0);
        assert!(!grid.is_filled());
        assert_eq!(grid.n_blanks(), 1);
        assert!(!grid.is_solved());
    }

    #[test]
    fn display_block() {
        let grid = Grid::from_str_line(SOLVED).unwrap();
        let printed = grid.to_string();
        let lines: Vec<_> = printed.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "534 678 912");
        assert_eq!(lines[3], "");
        assert_eq!(Grid::empty().to_string().lines().next(), Some("___ ___ ___"));
    }
}
