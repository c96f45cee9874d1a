//! Contract-based validation for session transitions.
//!
//! Each transition has a precondition `{P(state, action)}` checked before any
//! oracle is consulted and a postcondition `{Q(before, after)}` checked on the
//! candidate state before it is committed.

use crate::error::SessionError;
use crate::invariants;
use crate::session::SessionState;
use crate::types::{SessionStatus, Word};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A: ?Sized> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), SessionError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), SessionError>;
}

// ─────────────────────────────────────────────────────────────
//  Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the session is in progress with budget left.
pub struct AcceptsGuesses;

impl AcceptsGuesses {
    /// Fails with `SessionNotInProgress` otherwise.
    #[instrument(skip(state), fields(status = %state.status()))]
    pub fn check(state: &SessionState) -> Result<(), SessionError> {
        if state.accepts_guesses() {
            Ok(())
        } else {
            warn!(remaining = state.guesses_remaining(), "Session does not accept guesses");
            Err(SessionError::SessionNotInProgress(state.status()))
        }
    }
}

/// Precondition: the raw guess normalizes to a word.
pub struct NonEmptyGuess;

impl NonEmptyGuess {
    /// Returns the normalized word, or `EmptyGuess`.
    #[instrument]
    pub fn check(raw: &str) -> Result<Word, SessionError> {
        Word::parse(raw).ok_or_else(|| {
            warn!("Empty guess");
            SessionError::EmptyGuess
        })
    }
}

/// Precondition: an undo target strictly precedes the tip.
pub struct IndexPrecedesTip;

impl IndexPrecedesTip {
    /// Fails with `InvalidIndex` otherwise.
    #[instrument(skip(state))]
    pub fn check(state: &SessionState, index: usize) -> Result<(), SessionError> {
        let tip = state.path().len() - 1;
        if index < tip {
            Ok(())
        } else {
            warn!(tip, "Undo index does not precede the tip");
            Err(SessionError::InvalidIndex { index, tip })
        }
    }
}

/// Precondition: the session is in progress.
pub struct InProgressOnly;

impl InProgressOnly {
    /// Fails with `SessionNotInProgress` otherwise.
    #[instrument(skip(state), fields(status = %state.status()))]
    pub fn check(state: &SessionState) -> Result<(), SessionError> {
        if state.status() == SessionStatus::InProgress {
            Ok(())
        } else {
            Err(SessionError::SessionNotInProgress(state.status()))
        }
    }
}

fn invariants_hold(after: &SessionState) -> Result<(), SessionError> {
    invariants::verify(after).map_err(|descriptions| {
        SessionError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
    })
}

fn violation(message: &str) -> SessionError {
    SessionError::InvariantViolation(format!("Postcondition failed: {}", message))
}

// ─────────────────────────────────────────────────────────────
//  Guess Contract
// ─────────────────────────────────────────────────────────────

/// Contract for appending a guess, given the raw guess text.
///
/// Preconditions, in order:
/// - Session accepts guesses
/// - Guess is non-empty after normalization
///
/// Postconditions:
/// - Path grew by exactly one, keeping the old path as prefix
/// - Exactly one guess was spent
/// - Session invariants hold
pub struct GuessContract;

impl Contract<SessionState, str> for GuessContract {
    fn pre(state: &SessionState, raw: &str) -> Result<(), SessionError> {
        AcceptsGuesses::check(state)?;
        NonEmptyGuess::check(raw).map(drop)
    }

    fn post(before: &SessionState, after: &SessionState) -> Result<(), SessionError> {
        let old = before.path().words();
        let new = after.path().words();
        if new.len() != old.len() + 1 || !new.starts_with(old) {
            return Err(violation("guess must extend the path by one word"));
        }
        if after.guesses_remaining() + 1 != before.guesses_remaining() {
            return Err(violation("guess must spend exactly one from the budget"));
        }
        invariants_hold(after)
    }
}

// ─────────────────────────────────────────────────────────────
//  Undo Contract
// ─────────────────────────────────────────────────────────────

/// Contract for undoing to an earlier index.
///
/// Preconditions:
/// - Index strictly precedes the tip
///
/// Postconditions:
/// - New path is a prefix of the old one
/// - Refund equals the number of removed moves
/// - Session is back in progress with no revealed solution
/// - Session invariants hold
pub struct UndoContract;

impl Contract<SessionState, usize> for UndoContract {
    fn pre(state: &SessionState, index: &usize) -> Result<(), SessionError> {
        IndexPrecedesTip::check(state, *index)
    }

    fn post(before: &SessionState, after: &SessionState) -> Result<(), SessionError> {
        let old = before.path().words();
        let new = after.path().words();
        if new.len() >= old.len() || !old.starts_with(new) {
            return Err(violation("undo must truncate the path"));
        }
        let removed = (old.len() - new.len()) as u32;
        if after.guesses_remaining() != before.guesses_remaining() + removed {
            return Err(violation("undo must refund every removed move"));
        }
        if after.status() != SessionStatus::InProgress || after.revealed_solution().is_some() {
            return Err(violation("undo must reopen the session"));
        }
        invariants_hold(after)
    }
}

// ─────────────────────────────────────────────────────────────
//  Solve Contract
// ─────────────────────────────────────────────────────────────

/// Contract for revealing a solution.
///
/// Preconditions:
/// - Session is in progress
///
/// Postconditions:
/// - Path and budget untouched
/// - Revealed ladder starts at the tip and ends at the goal
/// - Session invariants hold
pub struct SolveContract;

impl Contract<SessionState, ()> for SolveContract {
    fn pre(state: &SessionState, _action: &()) -> Result<(), SessionError> {
        InProgressOnly::check(state)
    }

    fn post(before: &SessionState, after: &SessionState) -> Result<(), SessionError> {
        if before.path() != after.path() || before.guesses_remaining() != after.guesses_remaining()
        {
            return Err(violation("solve must not touch the path or budget"));
        }
        match after.revealed_solution() {
            Some(solution)
                if solution.first() == after.current_word()
                    && solution.last() == after.spec().end_word() => {}
            _ => return Err(violation("revealed ladder must run from the tip to the goal")),
        }
        invariants_hold(after)
    }
}
