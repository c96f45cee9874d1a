//! Core domain types for word-ladder sessions.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};

/// A normalized dictionary candidate.
///
/// Words are trimmed and case-folded to lowercase on construction, so two
/// words compare equal exactly when they match case-insensitively.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Word(String);

impl Word {
    /// Normalizes raw input into a word.
    ///
    /// Returns `None` when nothing remains after trimming.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    /// Returns the normalized text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of characters in the word.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// Always false; a word is never empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Word {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Word {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Raised when text normalizes to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("word is empty after normalization")]
pub struct EmptyWord;

impl TryFrom<String> for Word {
    type Error = EmptyWord;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw).ok_or(EmptyWord)
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.0
    }
}

/// The start and goal of a puzzle. Immutable once a session begins.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct PuzzleSpec {
    /// Word the ladder starts from.
    start_word: Word,
    /// Word the ladder must reach.
    end_word: Word,
}

impl PuzzleSpec {
    /// True when the start already equals the goal.
    pub fn is_trivial(&self) -> bool {
        self.start_word == self.end_word
    }
}

impl std::fmt::Display for PuzzleSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", self.start_word, self.end_word)
    }
}

/// An ordered ladder of words. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Word>", into = "Vec<Word>")]
pub struct GuessPath(Vec<Word>);

impl GuessPath {
    /// Creates a path holding only its first word.
    pub fn start(word: Word) -> Self {
        Self(vec![word])
    }

    /// Builds a path from a word sequence; `None` for an empty sequence.
    pub fn from_words(words: Vec<Word>) -> Option<Self> {
        if words.is_empty() {
            None
        } else {
            Some(Self(words))
        }
    }

    /// The first word of the ladder.
    pub fn first(&self) -> &Word {
        &self.0[0]
    }

    /// The tip of the ladder.
    pub fn last(&self) -> &Word {
        &self.0[self.0.len() - 1]
    }

    /// Number of words, including the first.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of moves the ladder takes (`len - 1`).
    pub fn steps(&self) -> usize {
        self.0.len() - 1
    }

    /// Words in order.
    pub fn words(&self) -> &[Word] {
        &self.0
    }

    /// Word at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Word> {
        self.0.get(index)
    }

    /// Iterates the words in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Word> {
        self.0.iter()
    }

    pub(crate) fn push(&mut self, word: Word) {
        self.0.push(word);
    }

    /// Keeps `path[0..=index]`. Callers guarantee `index < len`.
    pub(crate) fn truncate_to(&mut self, index: usize) {
        self.0.truncate(index + 1);
    }
}

impl TryFrom<Vec<Word>> for GuessPath {
    type Error = EmptyWord;

    fn try_from(words: Vec<Word>) -> Result<Self, Self::Error> {
        Self::from_words(words).ok_or(EmptyWord)
    }
}

impl From<GuessPath> for Vec<Word> {
    fn from(path: GuessPath) -> Self {
        path.0
    }
}

impl<'a> IntoIterator for &'a GuessPath {
    type Item = &'a Word;
    type IntoIter = std::slice::Iter<'a, Word>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::fmt::Display for GuessPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, word) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", word)?;
        }
        Ok(())
    }
}

/// Lifecycle status of a session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SessionStatus {
    /// No puzzle has been started.
    #[default]
    NotStarted,
    /// Guesses are being accepted.
    InProgress,
    /// The goal was reached or revealed.
    Won,
    /// The guess budget ran out short of the goal.
    Lost,
}

impl SessionStatus {
    /// Returns true for `Won` and `Lost`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Shortest remaining distance to the goal, as reported by the path oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Distance {
    /// Number of moves on a shortest path.
    Known(usize),
    /// The oracle found no path.
    #[default]
    Unknown,
}

impl Distance {
    /// Derives the distance from an optional shortest path.
    pub fn of_path(path: Option<&GuessPath>) -> Self {
        path.map_or(Self::Unknown, |p| Self::Known(p.steps()))
    }

    /// Returns the known distance, if any.
    pub fn known(self) -> Option<usize> {
        match self {
            Self::Known(n) => Some(n),
            Self::Unknown => None,
        }
    }
}

impl std::fmt::Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Known(n) => write!(f, "{}", n),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}
