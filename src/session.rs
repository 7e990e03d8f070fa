//! The round loop
//!
//! Every round the service sends a puzzle, seeds `rand()` with the current
//! second and perturbs its own solution. We solve the puzzle, apply the same
//! perturbations and send the result back.
//!
//! ```text
//! AwaitPuzzle -> Solving -> Predicting -> Responding -> AwaitPuzzle
//!      |                                                    |
//!      +-> Rejected (line contains "no")      Done (after ROUNDS rounds)
//! ```
use crate::clock::Clock;
use crate::codec;
use crate::errors::Error;
use crate::perturbation::{self, Perturbation};
use crate::solver::Solve;
use crate::transport::Transport;
use log::{debug, info, warn};

/// Rounds the service asks for before handing out the flag
pub const ROUNDS: usize = 10;

/// Substring by which the service signals a wrong answer
pub const REJECTION_MARKER: &[u8] = b"no";

/// Where the session currently stands
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum State {
    /// Waiting for the next puzzle line
    AwaitPuzzle,
    /// Decoding and solving the received puzzle
    Solving,
    /// Replaying the service's perturbations onto the solution
    Predicting,
    /// Encoding and sending the answer
    Responding,
    /// All rounds answered
    Done,
    /// The service signalled a wrong answer
    Rejected,
}

/// What happened in one round
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Round {
    /// The `srand` seed the perturbations were predicted with
    pub seed: u32,
    /// The predicted overwrites, in application order
    pub perturbations: Vec<Perturbation>,
    /// The line that was sent back, without terminator
    pub response: String,
}

/// Summary of a finished session
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    /// One entry per answered round
    pub rounds: Vec<Round>,
}

/// Drives the rounds over a transport
pub struct Session<T, S, C> {
    transport: T,
    solver: S,
    clock: C,
    rounds: usize,
    state: State,
}

impl<T: Transport, S: Solve, C: Clock> Session<T, S, C> {
    /// Creates a session that plays [`ROUNDS`] rounds.
    pub fn new(transport: T, solver: S, clock: C) -> Self {
        Session {
            transport,
            solver,
            clock,
            rounds: ROUNDS,
            state: State::AwaitPuzzle,
        }
    }

    /// Changes the number of rounds to play.
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    /// Current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Gives back the transport, e.g. to go interactive.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Plays all rounds. Stops at the first error, nothing is retried.
    ///
    /// A rejection is reported as [`Error::Rejected`] and leaves the
    /// session in [`State::Rejected`].
    pub fn run(&mut self) -> Result<Report, Error> {
        let mut report = Report::default();
        for round in 0..self.rounds {
            report.rounds.push(self.play_round(round)?);
        }
        self.state = State::Done;
        info!("answered all {} rounds", self.rounds);
        Ok(report)
    }

    fn play_round(&mut self, round: usize) -> Result<Round, Error> {
        self.state = State::AwaitPuzzle;
        let line = self.transport.receive_line()?;
        if contains(&line, REJECTION_MARKER) {
            self.state = State::Rejected;
            warn!("wrong answer");
            return Err(Error::Rejected { round, line });
        }
        // the service seeded rand() when it sent the line, sample right away
        let seed = self.clock.seed();
        info!(
            "{} input: {}",
            round,
            String::from_utf8_lossy(&line).trim()
        );

        self.state = State::Solving;
        let puzzle = codec::decode(&line).map_err(|source| Error::Format { round, source })?;
        debug!("puzzle {}", puzzle.to_str_line());
        let mut grid = self
            .solver
            .solve(&puzzle)
            .map_err(|source| Error::Unsolvable { round, source })?;
        debug!("solution {}", grid.to_str_line());

        self.state = State::Predicting;
        let perturbations = perturbation::predict(seed);
        debug!("seed {} perturbations {:?}", seed, perturbations);
        perturbation::apply(&mut grid, &perturbations);

        self.state = State::Responding;
        let response = codec::encode(&grid).map_err(|source| Error::Format { round, source })?;
        info!("response: {}", response);
        self.transport.send_line(response.as_bytes())?;

        Ok(Round {
            seed,
            perturbations,
            response,
        })
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_search() {
        assert!(contains(b"no thanks\n", REJECTION_MARKER));
        assert!(contains(b"that is not it", REJECTION_MARKER));
        assert!(!contains(b"TWFnbnVtIG9wdXM=\n", REJECTION_MARKER));
        assert!(!contains(b"n", REJECTION_MARKER));
        assert!(!contains(b"", REJECTION_MARKER));
    }
}
