//! JSON bodies exchanged with the oracle service.

use serde::{Deserialize, Serialize};

/// Body of `POST /validate-word`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateWordRequest {
    /// Word to look up.
    pub word: String,
}

/// Body of `POST /check-edit-distance`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditDistanceRequest {
    /// Word moved from.
    pub word1: String,
    /// Word moved to.
    pub word2: String,
}

/// Answer of both yes/no endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityResponse {
    /// The answer.
    pub valid: bool,
}

/// Body of `POST /find-path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindPathRequest {
    /// Ladder start.
    pub start: String,
    /// Ladder end.
    pub end: String,
}

/// Answer of `POST /find-path`; `null` when no ladder exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindPathResponse {
    /// Shortest ladder, endpoints included.
    pub path: Option<Vec<String>>,
}

/// Answer of `GET /generate-words`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedWords {
    /// Puzzle start.
    pub start_word: String,
    /// Puzzle goal.
    pub end_word: String,
}
