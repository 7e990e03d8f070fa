#![warn(missing_docs)]
//! Solver for the *magnum opus* sudoku challenge
//!
//! ## Overview
//!
//! The service sends ten puzzles, one per line, as base64 encoded big
//! integers. For each of them it expects the solution back, but only after
//! overwriting 11 cells with values drawn from glibc's `rand()`, seeded with
//! the second the puzzle went out. This crate decodes the puzzles, solves
//! them, replays the generator and answers in the same wire format.
//!
//! ## Example
//!
//! ```
//! use magnum_opus::{codec, perturbation, Grid, Solve, Solver};
//!
//! let puzzle = Grid::from_str_line(
//!     "...2...633....54.1..1..398........9....538....3........263..5..5.37....847...1...",
//! ).unwrap();
//! let wire = codec::encode(&Solver.solve(&puzzle).unwrap()).unwrap();
//!
//! let mut answer = codec::decode(wire.as_bytes()).unwrap();
//! perturbation::apply(&mut answer, &perturbation::predict(1_726_000_000));
//! let response = codec::encode(&answer).unwrap();
//! # assert!(codec::decode(response.as_bytes()).unwrap().is_filled());
//! ```
mod bitset;
mod board;
pub mod clock;
pub mod codec;
mod errors;
pub mod perturbation;
pub mod prng;
pub mod session;
pub mod solver;
pub mod transport;

pub use crate::board::{Digit, Grid};
pub use crate::clock::{Clock, SystemClock};
pub use crate::errors::{Error, FormatError, FromBytesError, LineParseError, Unsolvable};
pub use crate::perturbation::Perturbation;
pub use crate::prng::GlibcRand;
pub use crate::session::{Report, Session};
pub use crate::solver::{Solve, Solver};
pub use crate::transport::Transport;
