//! Budget conservation invariant: spent plus remaining equals the budget.

use super::Invariant;
use crate::session::{GUESS_BUDGET, SessionState};
use crate::types::SessionStatus;

/// Invariant: `guesses_remaining + moves == GUESS_BUDGET`, and a lost
/// session has nothing left to spend.
///
/// Each accepted guess costs one, each undone move refunds one, and
/// revealing a solution costs nothing.
pub struct BudgetConservedInvariant;

impl Invariant<SessionState> for BudgetConservedInvariant {
    fn holds(state: &SessionState) -> bool {
        let conserved =
            state.guesses_remaining() as usize + state.moves_made() == GUESS_BUDGET as usize;
        let lost_is_exhausted =
            state.status() != SessionStatus::Lost || state.guesses_remaining() == 0;
        conserved && lost_is_exhausted
    }

    fn description() -> &'static str {
        "Remaining guesses plus moves made equals the guess budget"
    }
}
