//! Goal/status invariant: a session is won exactly when the goal is reached
//! or a solution has been revealed.

use super::Invariant;
use crate::session::SessionState;
use crate::types::SessionStatus;

/// Invariant: `status == Won` iff the tip is the end word or a solution is revealed.
pub struct GoalStatusInvariant;

impl Invariant<SessionState> for GoalStatusInvariant {
    fn holds(state: &SessionState) -> bool {
        let won = state.status() == SessionStatus::Won;
        won == (state.at_goal() || state.revealed_solution().is_some())
    }

    fn description() -> &'static str {
        "Session is won exactly when the goal is reached or revealed"
    }
}
