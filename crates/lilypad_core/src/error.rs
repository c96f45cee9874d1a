//! Errors reported by session operations.

use crate::oracle::OracleError;
use crate::types::{SessionStatus, Word};
use serde::{Deserialize, Serialize};

/// Why a session operation was refused.
///
/// No variant ever accompanies a state change: a failed operation leaves the
/// session exactly as it was.
#[derive(Debug, Clone, derive_more::Display)]
pub enum SessionError {
    /// The guess was blank after normalization.
    #[display("Guess is empty")]
    EmptyGuess,

    /// The word is not in the dictionary.
    #[display("'{}' is not a valid word", _0)]
    InvalidWord(String),

    /// The guess is not one edit away from the current word.
    #[display("'{}' is not one edit away from '{}'", to, from)]
    NotOneEditAway {
        /// Current tip of the path.
        from: Word,
        /// Rejected guess.
        to: Word,
    },

    /// Undo target does not strictly precede the tip.
    #[display("Cannot undo to index {} (path tip is at {})", index, tip)]
    InvalidIndex {
        /// Requested index.
        index: usize,
        /// Index of the current tip.
        tip: usize,
    },

    /// The start and end words are the same.
    #[display("Start and end word are both '{}'", _0)]
    TrivialPuzzle(Word),

    /// The operation is not valid for the current status.
    #[display("Session is not in progress (status: {})", _0)]
    SessionNotInProgress(SessionStatus),

    /// The path oracle found no ladder to the goal.
    #[display("No path from '{}' to '{}'", from, to)]
    NoPathFound {
        /// Word the search started from.
        from: Word,
        /// Goal word.
        to: Word,
    },

    /// Another operation committed while this one awaited the oracle.
    #[display("Operation {} was superseded by a newer change", token)]
    Superseded {
        /// Token the dropped operation started with.
        token: u64,
    },

    /// The oracle failed to answer.
    #[display("{}", _0)]
    Oracle(OracleError),

    /// A postcondition failed after a transition.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Oracle(err) => Some(err),
            _ => None,
        }
    }
}

impl From<OracleError> for SessionError {
    fn from(err: OracleError) -> Self {
        Self::Oracle(err)
    }
}

/// Coarse grouping of [`SessionError`] for callers choosing how to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorClass {
    /// Bad user input; show a corrective message.
    Input,
    /// Wrong moment for the operation.
    Sequencing,
    /// A legitimate "no ladder" answer.
    NoPath,
    /// The oracle is unavailable; offer "try again".
    Oracle,
    /// Engine bug.
    Internal,
}

impl SessionError {
    /// Classifies the error.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::EmptyGuess
            | Self::InvalidWord(_)
            | Self::NotOneEditAway { .. }
            | Self::InvalidIndex { .. }
            | Self::TrivialPuzzle(_) => ErrorClass::Input,
            Self::SessionNotInProgress(_) | Self::Superseded { .. } => ErrorClass::Sequencing,
            Self::NoPathFound { .. } => ErrorClass::NoPath,
            Self::Oracle(_) => ErrorClass::Oracle,
            Self::InvariantViolation(_) => ErrorClass::Internal,
        }
    }

    /// Stable snake_case tag for the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyGuess => "empty_guess",
            Self::InvalidWord(_) => "invalid_word",
            Self::NotOneEditAway { .. } => "not_one_edit_away",
            Self::InvalidIndex { .. } => "invalid_index",
            Self::TrivialPuzzle(_) => "trivial_puzzle",
            Self::SessionNotInProgress(_) => "session_not_in_progress",
            Self::NoPathFound { .. } => "no_path_found",
            Self::Superseded { .. } => "superseded",
            Self::Oracle(_) => "oracle_failure",
            Self::InvariantViolation(_) => "invariant_violation",
        }
    }
}
