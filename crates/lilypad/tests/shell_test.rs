//! The play shell and solve lookup against an in-memory oracle.

use async_trait::async_trait;
use lilypad::{Shell, ShellCommand, SolveReport, solve_words};
use lilypad_core::{
    EditDistanceOracle, GuessPath, OracleError, PathOracle, PuzzleGenerator, PuzzleSpec,
    SessionStatus, Word, WordOracle,
};
use std::sync::Arc;

const LADDER: &[&str] = &["cat", "cot", "cog", "dog"];

/// Knows the ladder cat → cot → cog → dog and the isolated word "zoo".
struct LadderOracle;

fn w(s: &str) -> Word {
    Word::parse(s).unwrap()
}

#[async_trait]
impl WordOracle for LadderOracle {
    async fn is_valid_word(&self, word: &Word) -> Result<bool, OracleError> {
        Ok(LADDER.contains(&word.as_str()) || word == "zoo")
    }
}

#[async_trait]
impl EditDistanceOracle for LadderOracle {
    async fn is_one_edit_apart(&self, from: &Word, to: &Word) -> Result<bool, OracleError> {
        Ok(LADDER
            .windows(2)
            .any(|pair| (from == pair[0] && to == pair[1]) || (from == pair[1] && to == pair[0])))
    }
}

#[async_trait]
impl PathOracle for LadderOracle {
    async fn shortest_path(
        &self,
        start: &Word,
        end: &Word,
    ) -> Result<Option<GuessPath>, OracleError> {
        let from = LADDER.iter().position(|word| start == *word);
        let to = LADDER.iter().position(|word| end == *word);
        Ok(match (from, to) {
            (Some(i), Some(j)) if i <= j => {
                GuessPath::from_words(LADDER[i..=j].iter().map(|s| w(s)).collect())
            }
            _ => None,
        })
    }
}

#[async_trait]
impl PuzzleGenerator for LadderOracle {
    async fn new_puzzle(&self) -> Result<PuzzleSpec, OracleError> {
        Ok(PuzzleSpec::new(w("cot"), w("dog")))
    }
}

async fn run_script(shell: &Shell<LadderOracle>, script: &str) -> String {
    let mut output = Vec::new();
    shell.run(script.as_bytes(), &mut output).await.unwrap();
    String::from_utf8(output).unwrap()
}

// ─────────────────────────────────────────────────────────────
//  Shell
// ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_opening_shows_puzzle() {
    let shell = Shell::new(Arc::new(LadderOracle));
    let opening = shell.start_with_words("CAT", "dog").await;
    assert!(opening.contains("Puzzle: cat → dog"));
    assert!(opening.contains("Distance to goal: 3 | Guesses left: 10"));
}

#[tokio::test]
async fn test_opening_reports_bad_words() {
    let shell = Shell::new(Arc::new(LadderOracle));
    let opening = shell.start_with_words("cat", "qqq").await;
    assert!(opening.starts_with("Could not start:"));
}

#[tokio::test]
async fn test_play_to_win() {
    let shell = Shell::new(Arc::new(LadderOracle));
    shell.start_with_words("cat", "dog").await;

    let transcript = run_script(&shell, "cot\nguess cog\ndog\nquit\n").await;
    assert!(transcript.contains("Path:   cat -> cot -> cog -> dog"));
    assert!(transcript.contains("You reached 'dog' in 3 moves!"));
    assert!(transcript.trim_end().ends_with("Goodbye."));
    assert_eq!(shell.engine().status().await, SessionStatus::Won);
}

#[tokio::test]
async fn test_errors_are_printed_and_play_continues() {
    let shell = Shell::new(Arc::new(LadderOracle));
    shell.start_with_words("cat", "dog").await;

    let transcript = run_script(&shell, "dog\nundo x\n\ncot\n").await;
    assert!(transcript.contains("Error:"));
    assert!(transcript.contains("usage: undo <n>"));
    assert!(transcript.contains("Path:   cat -> cot"));
}

#[tokio::test]
async fn test_undo_and_solve() {
    let shell = Shell::new(Arc::new(LadderOracle));
    shell.start_with_words("cat", "dog").await;

    let transcript = run_script(&shell, "cot\ncog\nundo 1\nsolve\npath\n").await;
    assert!(transcript.contains("Distance to goal: 2 | Guesses left: 9"));
    assert!(transcript.contains("Solution in 2 steps: cot -> cog -> dog"));
    assert!(transcript.contains("Solution: cot -> cog -> dog"));

    let state = shell.engine().snapshot().await.unwrap();
    assert_eq!(state.path().len(), 2);
}

#[tokio::test]
async fn test_new_generates_puzzle() {
    let shell = Shell::new(Arc::new(LadderOracle));
    let reply = shell.execute(ShellCommand::New).await;
    assert!(reply.contains("Puzzle: cot → dog"));
}

#[tokio::test]
async fn test_path_before_start() {
    let shell = Shell::new(Arc::new(LadderOracle));
    let reply = shell.execute(ShellCommand::Path).await;
    assert!(reply.contains("No puzzle"));
}

// ─────────────────────────────────────────────────────────────
//  Solve
// ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_solve_found() {
    let report = solve_words(&LadderOracle, "cat", "dog").await.unwrap();
    assert_eq!(
        report.to_string(),
        "Solution found in 3 steps:\ncat -> cot -> cog -> dog"
    );
}

#[tokio::test]
async fn test_solve_not_found() {
    let report = solve_words(&LadderOracle, "cat", "zoo").await.unwrap();
    assert_eq!(report, SolveReport::NotFound);
    assert_eq!(report.to_string(), "No solution found.");
}

#[tokio::test]
async fn test_solve_invalid_words() {
    for (start, end) in [("cat", "qqq"), ("  ", "dog")] {
        let report = solve_words(&LadderOracle, start, end).await.unwrap();
        assert_eq!(report, SolveReport::InvalidWords);
    }
}
