//! Scripted oracle for engine tests.
//!
//! Answers come from fixed tables: a word list, a table of shortest paths,
//! and a single generated puzzle. Edit adjacency is computed directly.

#![allow(dead_code)]

use async_trait::async_trait;
use lilypad_core::{
    EditDistanceOracle, GuessPath, OracleError, OracleErrorKind, PathOracle, PuzzleGenerator,
    PuzzleSpec, Word, WordOracle,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Pauses path queries from one word until released.
#[derive(Clone)]
pub struct Gate {
    pub from: String,
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

#[derive(Default)]
pub struct ScriptedOracle {
    words: HashSet<String>,
    paths: HashMap<(String, String), Vec<String>>,
    puzzle: Option<(String, String)>,
    fail_paths: Mutex<Option<OracleErrorKind>>,
    fail_words: Mutex<Option<OracleErrorKind>>,
    gate: Mutex<Option<Gate>>,
    pub word_calls: AtomicUsize,
    pub edit_calls: AtomicUsize,
    pub path_calls: AtomicUsize,
}

impl ScriptedOracle {
    pub fn new(words: &[&str]) -> Self {
        Self {
            words: words.iter().map(|w| w.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Dictionary and paths for the cat → dog puzzle.
    pub fn cat_dog() -> Self {
        Self::new(&["cat", "cot", "cog", "dog", "dot", "cut", "hat", "bat", "at", "coat"])
            .with_path(&["cat", "cot", "cog", "dog"])
            .with_path(&["cot", "cog", "dog"])
            .with_path(&["cog", "dog"])
            .with_path(&["dot", "dog"])
            .with_path(&["cut", "cot", "cog", "dog"])
            .with_path(&["hat", "cat", "cot", "cog", "dog"])
            .with_path(&["bat", "cat", "cot", "cog", "dog"])
            .with_puzzle("hat", "dog")
    }

    pub fn with_path(mut self, path: &[&str]) -> Self {
        let key = (path[0].to_string(), path[path.len() - 1].to_string());
        self.paths
            .insert(key, path.iter().map(|w| w.to_string()).collect());
        self
    }

    /// Answers `start -> end` with `path` verbatim, even when it does not
    /// run between them.
    pub fn with_answer(mut self, start: &str, end: &str, path: &[&str]) -> Self {
        self.paths.insert(
            (start.to_string(), end.to_string()),
            path.iter().map(|w| w.to_string()).collect(),
        );
        self
    }

    pub fn with_puzzle(mut self, start: &str, end: &str) -> Self {
        self.puzzle = Some((start.to_string(), end.to_string()));
        self
    }

    pub fn fail_paths(&self, kind: Option<OracleErrorKind>) {
        *self.fail_paths.lock().unwrap() = kind;
    }

    pub fn fail_words(&self, kind: Option<OracleErrorKind>) {
        *self.fail_words.lock().unwrap() = kind;
    }

    /// Blocks path queries starting at `from` until `release` is notified.
    pub fn gate_paths_from(&self, from: &str) -> Gate {
        let gate = Gate {
            from: from.to_string(),
            entered: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        };
        *self.gate.lock().unwrap() = Some(gate.clone());
        gate
    }
}

pub fn w(s: &str) -> Word {
    Word::parse(s).unwrap()
}

pub fn spec(start: &str, end: &str) -> PuzzleSpec {
    PuzzleSpec::new(w(start), w(end))
}

/// True when exactly one substitution, insertion or deletion separates the words.
pub fn one_edit(a: &str, b: &str) -> bool {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    match a.len() as isize - b.len() as isize {
        0 => a.iter().zip(&b).filter(|(x, y)| x != y).count() == 1,
        1 => deletes_to(&a, &b),
        -1 => deletes_to(&b, &a),
        _ => false,
    }
}

fn deletes_to(longer: &[char], shorter: &[char]) -> bool {
    (0..longer.len()).any(|skip| {
        longer
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != skip)
            .map(|(_, c)| c)
            .eq(shorter.iter())
    })
}

#[async_trait]
impl WordOracle for ScriptedOracle {
    async fn is_valid_word(&self, word: &Word) -> Result<bool, OracleError> {
        self.word_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(kind) = *self.fail_words.lock().unwrap() {
            return Err(OracleError::new(kind, "scripted word failure"));
        }
        Ok(self.words.contains(word.as_str()))
    }
}

#[async_trait]
impl EditDistanceOracle for ScriptedOracle {
    async fn is_one_edit_apart(&self, from: &Word, to: &Word) -> Result<bool, OracleError> {
        self.edit_calls.fetch_add(1, Ordering::SeqCst);
        Ok(one_edit(from.as_str(), to.as_str()))
    }
}

#[async_trait]
impl PathOracle for ScriptedOracle {
    async fn shortest_path(
        &self,
        start: &Word,
        end: &Word,
    ) -> Result<Option<GuessPath>, OracleError> {
        self.path_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate.filter(|g| g.from == start.as_str()) {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        if let Some(kind) = *self.fail_paths.lock().unwrap() {
            return Err(OracleError::new(kind, "scripted path failure"));
        }

        let key = (start.to_string(), end.to_string());
        Ok(self.paths.get(&key).map(|words| {
            GuessPath::from_words(words.iter().map(|s| w(s)).collect()).unwrap()
        }))
    }
}

#[async_trait]
impl PuzzleGenerator for ScriptedOracle {
    async fn new_puzzle(&self) -> Result<PuzzleSpec, OracleError> {
        let (start, end) = self
            .puzzle
            .clone()
            .ok_or_else(|| OracleError::new(OracleErrorKind::Status, "no puzzle scripted"))?;
        Ok(spec(&start, &end))
    }
}

#[test]
fn test_one_edit_helper() {
    assert!(one_edit("cat", "cot"));
    assert!(one_edit("cat", "at"));
    assert!(one_edit("cot", "coat"));
    assert!(!one_edit("cat", "dog"));
    assert!(!one_edit("cat", "cat"));
}
