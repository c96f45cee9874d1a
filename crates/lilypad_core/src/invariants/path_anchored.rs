//! Path anchor invariant: the ladder always starts at the start word and
//! carries one recorded distance per word.

use super::Invariant;
use crate::session::SessionState;

/// Invariant: `path[0]` equals the puzzle's start word, and `distances`
/// runs parallel to `path`.
///
/// Undo may truncate the path, but never past index 0.
pub struct PathAnchoredInvariant;

impl Invariant<SessionState> for PathAnchoredInvariant {
    fn holds(state: &SessionState) -> bool {
        state.path().first() == state.spec().start_word()
            && state.distances().len() == state.path().len()
    }

    fn description() -> &'static str {
        "Path starts at the start word with one distance per word"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Distance, GuessPath, PuzzleSpec, Word};

    fn w(s: &str) -> Word {
        Word::parse(s).unwrap()
    }

    #[test]
    fn test_new_session_holds() {
        let state = SessionState::begin(PuzzleSpec::new(w("cat"), w("dog")), Distance::Unknown);
        assert!(PathAnchoredInvariant::holds(&state));
    }

    #[test]
    fn test_undo_to_zero_holds() {
        let mut state = SessionState::begin(PuzzleSpec::new(w("cat"), w("dog")), Distance::Unknown);
        state.record_guess(w("cot"), Distance::Unknown);
        state.undo_to(0).unwrap();
        assert!(PathAnchoredInvariant::holds(&state));
    }

    #[test]
    fn test_replaced_anchor_violates() {
        let mut state = SessionState::begin(PuzzleSpec::new(w("cat"), w("dog")), Distance::Unknown);
        state.path = GuessPath::start(w("bat"));
        assert!(!PathAnchoredInvariant::holds(&state));
    }

    #[test]
    fn test_missing_distance_violates() {
        let mut state = SessionState::begin(PuzzleSpec::new(w("cat"), w("dog")), Distance::Unknown);
        state.record_guess(w("cot"), Distance::Unknown);
        state.distances.pop();
        assert!(!PathAnchoredInvariant::holds(&state));
    }
}
