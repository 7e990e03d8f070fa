//! Prediction of the cell overwrites the service applies to its solution
//!
//! After handing out a puzzle the service seeds `rand()` with the current
//! second and overwrites [`PERTURBATIONS`] random cells of its solution with
//! random digits. It then expects exactly that board back, so the solved
//! grid has to be perturbed identically.
use crate::board::Grid;
use crate::prng::GlibcRand;
use rand_core::RngCore;

/// Number of overwrites per round
pub const PERTURBATIONS: usize = 11;

/// A single overwrite of a cell
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Perturbation {
    /// Row index from 0..=8
    pub row: u8,
    /// Column index from 0..=8
    pub col: u8,
    /// Digit from 1..=9
    pub value: u8,
}

/// Predicts the overwrites for the given `srand` seed.
pub fn predict(seed: u32) -> Vec<Perturbation> {
    draw(&mut GlibcRand::new(seed), PERTURBATIONS)
}

/// Draws `count` overwrites. Each takes three consecutive outputs: row, column, value.
pub fn draw<R: RngCore + ?Sized>(rng: &mut R, count: usize) -> Vec<Perturbation> {
    (0..count)
        .map(|_| {
            let row = (rng.next_u32() % 9) as u8;
            let col = (rng.next_u32() % 9) as u8;
            let value = (rng.next_u32() % 9) as u8 + 1;
            Perturbation { row, col, value }
        })
        .collect()
}

/// Applies the overwrites in order. Later overwrites of the same cell win.
pub fn apply(grid: &mut Grid, perturbations: &[Perturbation]) {
    for p in perturbations {
        grid.set(p.row, p.col, p.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_1_prediction() {
        // rand() after srand(1): 1804289383 846930886 1681692777 | 1714636915 1957747793 424238335 | ...
        let predicted = predict(1);
        assert_eq!(predicted.len(), PERTURBATIONS);
        assert_eq!(
            predicted[0],
            Perturbation {
                row: (1804289383u32 % 9) as u8,
                col: (846930886u32 % 9) as u8,
                value: (1681692777u32 % 9) as u8 + 1,
            }
        );
        assert_eq!(
            predicted[1],
            Perturbation {
                row: (1714636915u32 % 9) as u8,
                col: (1957747793u32 % 9) as u8,
                value: (424238335u32 % 9) as u8 + 1,
            }
        );
    }

    #[test]
    fn full_prediction() {
        let expected: [(u8, u8, u8); PERTURBATIONS] = [
            (7, 4, 6),
            (6, 4, 3),
            (1, 4, 8),
            (6, 6, 5),
            (3, 4, 2),
            (1, 7, 1),
            (0, 7, 5),
            (3, 3, 3),
            (2, 2, 7),
            (5, 1, 2),
            (3, 6, 7),
        ];
        let predicted: Vec<_> = predict(1_726_000_000)
            .into_iter()
            .map(|p| (p.row, p.col, p.value))
            .collect();
        assert_eq!(predicted, expected);
    }

    #[test]
    fn deterministic() {
        for seed in [0, 1, 1_726_000_000, u32::MAX].iter() {
            assert_eq!(predict(*seed), predict(*seed));
        }
        assert_ne!(predict(1_726_000_000), predict(1_726_000_001));
    }

    #[test]
    fn values_in_range() {
        for seed in 1_700_000_000..1_700_000_200 {
            for p in predict(seed) {
                assert!(p.row < 9 && p.col < 9);
                assert!((1..=9).contains(&p.value));
            }
        }
    }

    #[test]
    fn later_overwrite_wins() {
        let mut grid = Grid::empty();
        let perturbations = [
            Perturbation { row: 4, col: 2, value: 3 },
            Perturbation { row: 0, col: 0, value: 1 },
            Perturbation { row: 4, col: 2, value: 8 },
        ];
        apply(&mut grid, &perturbations);
        assert_eq!(grid.get(4, 2), 8);
        assert_eq!(grid.get(0, 0), 1);
        assert_eq!(grid.n_blanks(), 79);
    }
}
