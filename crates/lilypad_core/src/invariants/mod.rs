//! First-class invariants for word-ladder sessions.
//!
//! Invariants are logical properties of a [`SessionState`] that every
//! transition must preserve. The engine checks them as postconditions in
//! debug builds; tests check them directly.
//!
//! One-edit adjacency between consecutive path words is not checked here.
//! Only the edit-distance oracle can decide it, and the engine asks before
//! appending a guess.

use crate::session::SessionState;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of [`Invariant`]s.
pub trait InvariantSet<S> {
    /// Checks every invariant, collecting all violations.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn check_one<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check_one::<S, I1>(state, &mut violations);
        check_one::<S, I2>(state, &mut violations);
        check_one::<S, I3>(state, &mut violations);

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod budget_conserved;
pub mod goal_status;
pub mod path_anchored;

pub use budget_conserved::BudgetConservedInvariant;
pub use goal_status::GoalStatusInvariant;
pub use path_anchored::PathAnchoredInvariant;

/// All session invariants as a composable set.
pub type SessionInvariants = (
    PathAnchoredInvariant,
    BudgetConservedInvariant,
    GoalStatusInvariant,
);

/// Checks all session invariants, joining violations into one message.
pub fn verify(state: &SessionState) -> Result<(), String> {
    SessionInvariants::check_all(state).map_err(|violations| {
        violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    })
}
