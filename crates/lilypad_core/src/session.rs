//! The session aggregate and its pure transitions.
//!
//! `SessionState` is a plain value. Transitions here never talk to an oracle;
//! the engine gathers oracle answers first and then applies one of these
//! methods to a copy of the state before committing it.

use crate::error::SessionError;
use crate::types::{Distance, GuessPath, PuzzleSpec, SessionStatus, Word};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Guesses granted at the start of every session.
pub const GUESS_BUDGET: u32 = 10;

/// Complete state of one play session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SessionState {
    /// Puzzle being played.
    pub(crate) spec: PuzzleSpec,
    /// Accepted ladder so far, starting at the start word.
    pub(crate) path: GuessPath,
    /// Guesses left in the budget.
    #[getter(skip)]
    pub(crate) guesses_remaining: u32,
    /// Lifecycle status.
    #[getter(skip)]
    pub(crate) status: SessionStatus,
    /// Shortest distance from the tip to the goal, when known.
    #[getter(skip)]
    pub(crate) last_distance: Distance,
    /// Distance recorded for each word of `path` when it became the tip.
    #[getter(skip)]
    #[serde(default)]
    pub(crate) distances: Vec<Distance>,
    /// Ladder revealed by `solve`, independent of `path`.
    pub(crate) revealed_solution: Option<GuessPath>,
}

impl SessionState {
    /// Starts a session on `spec` with a full budget.
    #[instrument(skip(spec, distance), fields(puzzle = %spec, distance = %distance))]
    pub fn begin(spec: PuzzleSpec, distance: Distance) -> Self {
        info!("Beginning session");
        let path = GuessPath::start(spec.start_word().clone());
        Self {
            spec,
            path,
            guesses_remaining: GUESS_BUDGET,
            status: SessionStatus::InProgress,
            last_distance: distance,
            distances: vec![distance],
            revealed_solution: None,
        }
    }

    /// Guesses left in the budget.
    pub fn guesses_remaining(&self) -> u32 {
        self.guesses_remaining
    }

    /// Lifecycle status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Distance from the tip to the goal as of the last query.
    pub fn last_distance(&self) -> Distance {
        self.last_distance
    }

    /// Distances recorded per path word, parallel to `path`.
    pub fn distances(&self) -> &[Distance] {
        &self.distances
    }

    /// The word the next guess must be one edit away from.
    pub fn current_word(&self) -> &Word {
        self.path.last()
    }

    /// Number of accepted moves.
    pub fn moves_made(&self) -> usize {
        self.path.steps()
    }

    /// True when the live path has reached the goal.
    pub fn at_goal(&self) -> bool {
        self.path.last() == self.spec.end_word()
    }

    /// True when a guess may be submitted.
    pub fn accepts_guesses(&self) -> bool {
        self.status == SessionStatus::InProgress && self.guesses_remaining > 0
    }

    /// Appends an oracle-approved guess.
    ///
    /// Reaching the goal wins even on the guess that empties the budget.
    #[instrument(skip(self, word, distance), fields(word = %word, distance = %distance))]
    pub(crate) fn record_guess(&mut self, word: Word, distance: Distance) -> GuessOutcome {
        let reached_goal = &word == self.spec.end_word();

        self.path.push(word);
        self.revealed_solution = None;
        self.guesses_remaining = self.guesses_remaining.saturating_sub(1);

        if reached_goal {
            self.status = SessionStatus::Won;
            self.last_distance = Distance::Known(0);
            info!(moves = self.moves_made(), "Goal reached");
        } else {
            self.last_distance = distance;
            if self.guesses_remaining == 0 {
                self.status = SessionStatus::Lost;
                info!(moves = self.moves_made(), "Guess budget exhausted");
            } else {
                debug!(remaining = self.guesses_remaining, "Guess recorded");
            }
        }
        self.distances.push(self.last_distance);

        GuessOutcome {
            accepted: true,
            status: self.status,
            distance: self.last_distance,
            guesses_remaining: self.guesses_remaining,
        }
    }

    /// Truncates the path to `path[0..=index]` and refunds the removed moves.
    ///
    /// The distance recorded when `path[index]` was the tip is restored.
    /// Returns the number of guesses refunded.
    #[instrument(skip(self), fields(path_len = self.path.len()))]
    pub(crate) fn undo_to(&mut self, index: usize) -> Result<u32, SessionError> {
        let tip = self.path.len() - 1;
        if index >= tip {
            warn!(index, tip, "Undo index does not precede the tip");
            return Err(SessionError::InvalidIndex { index, tip });
        }

        let removed = (tip - index) as u32;
        self.path.truncate_to(index);
        self.distances.truncate(index + 1);
        self.last_distance = self
            .distances
            .get(index)
            .copied()
            .unwrap_or(Distance::Unknown);
        self.guesses_remaining += removed;
        self.revealed_solution = None;
        self.status = SessionStatus::InProgress;

        info!(index, refunded = removed, distance = %self.last_distance, "Undo applied");
        Ok(removed)
    }

    /// Records a revealed solution and ends the session as won.
    #[instrument(skip(self, solution), fields(steps = solution.steps()))]
    pub(crate) fn reveal(&mut self, solution: GuessPath) {
        self.last_distance = Distance::Known(solution.steps());
        self.revealed_solution = Some(solution);
        self.status = SessionStatus::Won;
        info!("Solution revealed");
    }
}

/// Result of an accepted guess, for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GuessOutcome {
    /// Always true for a returned outcome; rejections are errors.
    accepted: bool,
    /// Status after the guess.
    status: SessionStatus,
    /// Distance from the new tip to the goal.
    distance: Distance,
    /// Budget left after the guess.
    guesses_remaining: u32,
}
