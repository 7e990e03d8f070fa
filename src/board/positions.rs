//! Index arithmetic for cells and houses
//!
//! Cells are numbered `0..81` in row-major order. Houses are numbered
//! `0..27`: rows first, then columns, then blocks.

pub(crate) const N_CELLS: usize = 81;
pub(crate) const N_HOUSES: usize = 27;

const COL_OFFSET: u8 = 9;
const BLOCK_OFFSET: u8 = 18;

#[inline(always)]
pub(crate) fn row(cell: u8) -> u8 {
    cell / 9
}

#[inline(always)]
pub(crate) fn col(cell: u8) -> u8 {
    cell % 9
}

#[inline(always)]
pub(crate) fn block(cell: u8) -> u8 {
    row(cell) / 3 * 3 + col(cell) / 3
}

#[inline(always)]
pub(crate) fn cell_at(row: u8, col: u8) -> u8 {
    row * 9 + col
}

/// The row, column and block house of a cell.
#[inline]
pub(crate) fn houses_of_cell(cell: u8) -> [u8; 3] {
    [row(cell), col(cell) + COL_OFFSET, block(cell) + BLOCK_OFFSET]
}

pub(crate) fn cells_of_house(house: u8) -> [u8; 9] {
    let mut cells = [0; 9];
    for (pos, cell) in (0..9).zip(cells.iter_mut()) {
        *cell = match house {
            0..=8 => cell_at(house, pos),
            9..=17 => cell_at(pos, house - COL_OFFSET),
            _ => {
                let block = house - BLOCK_OFFSET;
                cell_at(block / 3 * 3 + pos / 3, block % 3 * 3 + pos % 3)
            }
        };
    }
    cells
}

// list of cells that share a row, col or block with a given cell
// sorted low to high
pub(crate) fn neighbors(cell: u8) -> impl Iterator<Item = u8> {
    let [r, c, b] = houses_of_cell(cell);
    (0..N_CELLS as u8).filter(move |&other| {
        other != cell && {
            let [or, oc, ob] = houses_of_cell(other);
            or == r || oc == c || ob == b
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_cell_has_20_neighbors() {
        for cell in 0..81 {
            assert_eq!(neighbors(cell).count(), 20);
        }
    }

    #[test]
    fn houses_partition_the_grid() {
        for kind in 0..3 {
            let mut seen = [false; N_CELLS];
            for house in kind * 9..kind * 9 + 9 {
                for &cell in cells_of_house(house).iter() {
                    assert!(!seen[cell as usize]);
                    seen[cell as usize] = true;
                    assert!(houses_of_cell(cell).contains(&house));
                }
            }
            assert!(seen.iter().all(|&s| s));
        }
    }

    #[test]
    fn block_numbering() {
        assert_eq!(block(0), 0);
        assert_eq!(block(cell_at(1, 4)), 1);
        assert_eq!(block(cell_at(4, 4)), 4);
        assert_eq!(block(80), 8);
        assert_eq!(cells_of_house(BLOCK_OFFSET + 4), [30, 31, 32, 39, 40, 41, 48, 49, 50]);
    }
}
