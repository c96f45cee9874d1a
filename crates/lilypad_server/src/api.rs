//! Request and response bodies of the session service.

use crate::registry::SessionId;
use lilypad_core::{GuessOutcome, GuessPath, SessionState};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/sessions`. Omit both words to generate a puzzle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    /// Start word.
    #[serde(default)]
    pub start_word: Option<String>,
    /// End word.
    #[serde(default)]
    pub end_word: Option<String>,
}

/// Body of `POST /api/sessions/{id}/guess`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRequest {
    /// Raw guess text.
    pub word: String,
}

/// Body of `POST /api/sessions/{id}/undo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoRequest {
    /// Path index to keep as the new tip.
    pub index: i64,
}

/// A session as presented to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    /// Session id.
    pub id: SessionId,
    /// Full session state.
    #[serde(flatten)]
    pub state: SessionState,
}

/// Answer to an accepted guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResponse {
    /// What the guess did.
    pub outcome: GuessOutcome,
    /// Session after the guess.
    pub session: SessionView,
}

/// Answer to a successful solve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResponse {
    /// The revealed ladder, from the current word to the goal.
    pub solution: GuessPath,
    /// Session after the solve.
    pub session: SessionView,
}

/// Answer to `GET /api/sessions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionList {
    /// Live session ids.
    pub sessions: Vec<SessionId>,
}
