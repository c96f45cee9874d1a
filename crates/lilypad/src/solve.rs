//! One-shot ladder lookup for `lilypad solve`.

use lilypad_core::{GuessPath, Oracle, OracleError, Word};
use tracing::{info, instrument, warn};

/// What a lookup found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveReport {
    /// One of the words is blank or not in the dictionary.
    InvalidWords,
    /// A shortest ladder.
    Found(GuessPath),
    /// The words are valid but no ladder joins them.
    NotFound,
}

impl std::fmt::Display for SolveReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidWords => {
                write!(f, "Both start and end words must be valid dictionary words.")
            }
            Self::Found(path) => write!(f, "Solution found in {} steps:\n{}", path.steps(), path),
            Self::NotFound => write!(f, "No solution found."),
        }
    }
}

/// Validates both words, then asks for a shortest ladder between them.
#[instrument(skip(oracle))]
pub async fn solve_words<O: Oracle>(
    oracle: &O,
    start: &str,
    end: &str,
) -> Result<SolveReport, OracleError> {
    let (Some(start), Some(end)) = (Word::parse(start), Word::parse(end)) else {
        warn!("Blank word given");
        return Ok(SolveReport::InvalidWords);
    };

    let (start_valid, end_valid) =
        tokio::try_join!(oracle.is_valid_word(&start), oracle.is_valid_word(&end))?;
    if !(start_valid && end_valid) {
        warn!(start_valid, end_valid, "Word rejected by dictionary");
        return Ok(SolveReport::InvalidWords);
    }

    let report = match oracle.shortest_path(&start, &end).await? {
        Some(path) => SolveReport::Found(path),
        None => SolveReport::NotFound,
    };
    info!(found = matches!(report, SolveReport::Found(_)), "Lookup finished");
    Ok(report)
}
