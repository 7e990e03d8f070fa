//! Types for cells, digits and grids
mod digit;
mod grid;
pub(crate) mod positions;

pub use self::{digit::Digit, grid::Grid};
