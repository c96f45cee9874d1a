//! Word-ladder session engine.
//!
//! A player turns a start word into an end word one edit at a time, and
//! every intermediate word must be in the dictionary. This crate owns the
//! session state machine around that game: the guess path, the guess
//! budget, undo, and the "solve" assist. Dictionary lookups, edit checks,
//! shortest paths and puzzle generation are answered by external oracles.
//!
//! # Architecture
//!
//! - **Types**: normalized words, puzzles, ladders, status and distance
//! - **Oracle**: traits for the four external capabilities
//! - **Session**: the `SessionState` value and its pure transitions
//! - **Contracts / Invariants**: pre- and postconditions for each transition
//! - **Engine**: serializes operations and drops superseded ones
//!
//! # State machine
//!
//! ```text
//! NotStarted --start_session--> InProgress
//! InProgress --submit_guess(reaches end)--> Won
//! InProgress --submit_guess(budget exhausted)--> Lost
//! InProgress --solve--> Won (solution revealed)
//! {Won, Lost} --undo_to--> InProgress
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod contracts;
mod engine;
mod error;
pub mod invariants;
mod oracle;
mod session;
mod types;

pub use contracts::{
    AcceptsGuesses, Contract, GuessContract, InProgressOnly, IndexPrecedesTip, NonEmptyGuess,
    SolveContract, UndoContract,
};
pub use engine::SessionEngine;
pub use error::{ErrorClass, SessionError};
pub use oracle::{
    EditDistanceOracle, Oracle, OracleError, OracleErrorKind, PathOracle, PuzzleGenerator,
    WordOracle,
};
pub use session::{GUESS_BUDGET, GuessOutcome, SessionState};
pub use types::{Distance, EmptyWord, GuessPath, PuzzleSpec, SessionStatus, Word};
