//! Puzzle solving
//!
//! The session only needs *a* solution, so [`Solve`] is the seam where any
//! constraint solver can be plugged in. [`Solver`] is the built-in one.
use crate::bitset::DigitSet;
use crate::board::positions::{cells_of_house, houses_of_cell, neighbors, N_CELLS, N_HOUSES};
use crate::board::{Digit, Grid};
use crate::errors::Unsolvable;

/// Completes a puzzle
pub trait Solve {
    /// Returns a filled grid that agrees with every given of `puzzle`.
    fn solve(&self, puzzle: &Grid) -> Result<Grid, Unsolvable>;
}

impl<S: Solve + ?Sized> Solve for &S {
    fn solve(&self, puzzle: &Grid) -> Result<Grid, Unsolvable> {
        (**self).solve(puzzle)
    }
}

/// Depth first solver with naked and hidden single propagation
///
/// Guesses are made in the cell with the fewest candidates and digits are
/// tried in ascending order, so the same puzzle always yields the same
/// solution, even if it has several.
#[derive(Copy, Clone, Debug, Default)]
pub struct Solver;

impl Solve for Solver {
    fn solve(&self, puzzle: &Grid) -> Result<Grid, Unsolvable> {
        let mut stack = Vec::with_capacity(N_CELLS);
        stack.extend(
            (0..N_CELLS as u8)
                .zip(puzzle.iter())
                .filter_map(|(cell, digit)| digit.map(|digit| Entry { cell, digit })),
        );
        let solution = SolverState::new().solve_one(&mut stack)?;
        debug_assert!(solution.is_solved());
        Ok(solution)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Entry {
    cell: u8,
    digit: Digit,
}

// Helper struct for recursive solving
#[derive(Clone, Debug)]
struct SolverState {
    grid: Grid,
    n_solved_cells: u8,
    // empty for solved cells
    cell_poss_digits: [DigitSet; N_CELLS],
    house_solved_digits: [DigitSet; N_HOUSES],
}

impl SolverState {
    fn new() -> Self {
        SolverState {
            grid: Grid::empty(),
            n_solved_cells: 0,
            cell_poss_digits: [DigitSet::ALL; N_CELLS],
            house_solved_digits: [DigitSet::NONE; N_HOUSES],
        }
    }

    fn is_solved(&self) -> bool {
        self.n_solved_cells as usize == N_CELLS
    }

    // for each entry in the stack, insert it (if cell is unsolved)
    // and then remove the digit from each neighbouring cell.
    // naked singles found on the way are pushed onto the stack
    fn insert_entries(&mut self, stack: &mut Vec<Entry>) -> Result<(), Unsolvable> {
        while let Some(entry) = stack.pop() {
            let entry_mask = DigitSet::from(entry.digit);
            let cell_poss = self.cell_poss_digits[entry.cell as usize];
            // cell already solved from previous entry in stack
            // duplicates are fine, conflicting digits are not
            if cell_poss.is_empty() {
                if self.grid.0[entry.cell as usize] != entry.digit.get() {
                    return Err(Unsolvable);
                }
                continue;
            }

            // is entry still possible?
            if !cell_poss.contains(entry.digit) {
                return Err(Unsolvable);
            }

            self.grid.0[entry.cell as usize] = entry.digit.get();
            self.n_solved_cells += 1;
            self.cell_poss_digits[entry.cell as usize] = DigitSet::NONE;
            for &house in houses_of_cell(entry.cell).iter() {
                self.house_solved_digits[house as usize] |= entry_mask;
            }

            for cell in neighbors(entry.cell) {
                if entry_mask.overlaps(self.cell_poss_digits[cell as usize]) {
                    self.remove_impossibilities(cell, entry_mask, stack)?;
                }
            }
        }
        Ok(())
    }

    // remove impossible digits from masks for given cell
    // also check for naked singles and impossibility of sudoku
    fn remove_impossibilities(
        &mut self,
        cell: u8,
        impossible: DigitSet,
        stack: &mut Vec<Entry>,
    ) -> Result<(), Unsolvable> {
        let cell_mask = &mut self.cell_poss_digits[cell as usize];
        cell_mask.remove(impossible);
        if let Some(digit) = cell_mask.unique()? {
            stack.push(Entry { cell, digit });
        }
        Ok(())
    }

    // a digit that fits into only one cell of a house must go there
    fn find_hidden_singles(&mut self, stack: &mut Vec<Entry>) -> Result<(), Unsolvable> {
        for house in 0..N_HOUSES as u8 {
            let mut unsolved = DigitSet::NONE;
            let mut multiple_unsolved = DigitSet::NONE;

            let cells = cells_of_house(house);
            for &cell in cells.iter() {
                let poss_digits = self.cell_poss_digits[cell as usize];
                multiple_unsolved |= unsolved & poss_digits;
                unsolved |= poss_digits;
            }
            if unsolved | self.house_solved_digits[house as usize] != DigitSet::ALL {
                return Err(Unsolvable);
            }

            let mut singles = unsolved.without(multiple_unsolved);
            if singles.is_empty() {
                continue;
            }

            for &cell in cells.iter() {
                let mask = self.cell_poss_digits[cell as usize] & singles;
                if mask.is_empty() {
                    continue;
                }
                // two digits that can only go into the same cell
                let digit = mask.unique()?.ok_or(Unsolvable)?;
                stack.push(Entry { cell, digit });
                singles.remove(mask);
            }
            // insert before looking at the next house, candidates are stale now
            return Ok(());
        }
        Ok(())
    }

    fn find_cell_min_poss(&self) -> Option<u8> {
        (0..N_CELLS as u8)
            .map(|cell| (cell, self.cell_poss_digits[cell as usize].len()))
            .filter(|&(_, n_poss)| n_poss > 0)
            .min_by_key(|&(_, n_poss)| n_poss)
            .map(|(cell, _)| cell)
    }

    // insert and deduce in a loop
    // guess when no more deductions are found
    // backtrack on error (via recursion)
    fn solve_one(mut self, stack: &mut Vec<Entry>) -> Result<Grid, Unsolvable> {
        loop {
            self.insert_entries(stack)?;
            if self.is_solved() {
                return Ok(self.grid);
            }

            self.find_hidden_singles(stack)?;
            if !stack.is_empty() {
                continue;
            }

            let cell = self.find_cell_min_poss().ok_or(Unsolvable)?;
            let digit = self.cell_poss_digits[cell as usize]
                .iter()
                .next()
                .ok_or(Unsolvable)?;
            let guess = Entry { cell, digit };

            stack.push(guess);
            if let Ok(solution) = self.clone().solve_one(stack) {
                return Ok(solution);
            }
            stack.clear();

            // guess was wrong, the digit can't go there
            self.remove_impossibilities(cell, digit.into(), stack)?;
        }
    }
}
