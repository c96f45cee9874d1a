//! Contracts for the external services the session engine consults.
//!
//! The engine never answers dictionary or search questions itself. Each
//! capability is its own trait so fakes can implement only what a test needs;
//! [`Oracle`] bundles all four for the engine.

use crate::types::{GuessPath, PuzzleSpec, Word};
use async_trait::async_trait;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{error, instrument};

/// Reports whether a word is in the dictionary.
#[async_trait]
pub trait WordOracle: Send + Sync {
    /// Returns true if `word` is a dictionary word.
    async fn is_valid_word(&self, word: &Word) -> Result<bool, OracleError>;
}

/// Reports whether two words are exactly one edit apart.
#[async_trait]
pub trait EditDistanceOracle: Send + Sync {
    /// Returns true if one substitution, insertion or deletion turns `from` into `to`.
    async fn is_one_edit_apart(&self, from: &Word, to: &Word) -> Result<bool, OracleError>;
}

/// Finds shortest word ladders.
#[async_trait]
pub trait PathOracle: Send + Sync {
    /// Returns a shortest ladder from `start` to `end`, or `None` when unreachable.
    async fn shortest_path(&self, start: &Word, end: &Word)
    -> Result<Option<GuessPath>, OracleError>;
}

/// Supplies fresh puzzles.
#[async_trait]
pub trait PuzzleGenerator: Send + Sync {
    /// Returns a mutually reachable pair of dictionary words.
    async fn new_puzzle(&self) -> Result<PuzzleSpec, OracleError>;
}

/// Every capability the session engine needs.
pub trait Oracle: WordOracle + EditDistanceOracle + PathOracle + PuzzleGenerator {}

impl<T> Oracle for T where T: WordOracle + EditDistanceOracle + PathOracle + PuzzleGenerator {}

/// Category of an oracle failure.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OracleErrorKind {
    /// The service could not be reached.
    Connectivity,
    /// The service did not answer in time.
    Timeout,
    /// The service answered with a non-success status.
    Status,
    /// The answer could not be understood.
    Malformed,
}

impl OracleErrorKind {
    /// True for failures worth retrying at the transport layer.
    pub fn is_transient(self) -> bool {
        matches!(self, Self::Connectivity | Self::Timeout)
    }
}

/// Oracle failure with location tracking.
///
/// Distinct from a "no path" answer: an oracle failure says nothing about
/// whether a path exists.
#[derive(Debug, Clone, Display, Error)]
#[display("Oracle {} error: {} at {}:{}", kind, message, file, line)]
pub struct OracleError {
    /// What went wrong.
    pub kind: OracleErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl OracleError {
    /// Creates a new oracle error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: OracleErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        let message = message.into();
        error!(kind = %kind, error_message = %message, "Oracle error created");
        Self {
            kind,
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for a connectivity failure.
    #[track_caller]
    pub fn connectivity(message: impl Into<String>) -> Self {
        Self::new(OracleErrorKind::Connectivity, message)
    }

    /// Shorthand for a timeout.
    #[track_caller]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(OracleErrorKind::Timeout, message)
    }

    /// Shorthand for a non-success status.
    #[track_caller]
    pub fn status(message: impl Into<String>) -> Self {
        Self::new(OracleErrorKind::Status, message)
    }

    /// Shorthand for an unreadable answer.
    #[track_caller]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(OracleErrorKind::Malformed, message)
    }
}
