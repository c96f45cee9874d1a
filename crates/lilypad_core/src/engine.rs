//! The session engine: validates moves against the oracles and commits
//! state changes.
//!
//! Every operation follows the same shape: take a snapshot and its
//! operation token, await whatever oracle answers are needed, build the next
//! state from the snapshot, then commit. A commit succeeds only if no other
//! commit happened since the snapshot was taken. Otherwise the operation is
//! dropped as [`SessionError::Superseded`], so a slow answer for an old guess
//! can never overwrite a state that undo has since rewritten.

use crate::contracts::{Contract, GuessContract, NonEmptyGuess, SolveContract, UndoContract};
use crate::error::SessionError;
use crate::oracle::{Oracle, OracleError};
use crate::session::{GuessOutcome, SessionState};
use crate::types::{Distance, GuessPath, PuzzleSpec, SessionStatus, Word};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// Live session slot with its commit counter.
#[derive(Debug, Default)]
struct Slot {
    state: Option<SessionState>,
    generation: u64,
}

/// Owns at most one live session and serializes its mutations.
pub struct SessionEngine<O> {
    oracle: Arc<O>,
    slot: Mutex<Slot>,
}

impl<O> std::fmt::Debug for SessionEngine<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionEngine").finish_non_exhaustive()
    }
}

impl<O: Oracle> SessionEngine<O> {
    /// Creates an engine with no session.
    #[instrument(skip(oracle))]
    pub fn new(oracle: Arc<O>) -> Self {
        info!("Creating session engine");
        Self {
            oracle,
            slot: Mutex::new(Slot::default()),
        }
    }

    /// The oracle this engine consults.
    pub fn oracle(&self) -> &Arc<O> {
        &self.oracle
    }

    /// Copy of the current session, if one has started.
    #[instrument(skip(self))]
    pub async fn snapshot(&self) -> Option<SessionState> {
        self.slot.lock().await.state.clone()
    }

    /// Current status; `NotStarted` before the first session.
    #[instrument(skip(self))]
    pub async fn status(&self) -> SessionStatus {
        self.slot
            .lock()
            .await
            .state
            .as_ref()
            .map_or(SessionStatus::NotStarted, SessionState::status)
    }

    /// Number of commits so far. Increases by one per committed operation.
    #[instrument(skip(self))]
    pub async fn generation(&self) -> u64 {
        self.slot.lock().await.generation
    }

    /// Starts a new session, replacing any current one.
    ///
    /// A supplied puzzle must pass the word oracle on both words; without
    /// one, the puzzle generator's pair is used as-is.
    #[instrument(skip(self), fields(supplied = spec.is_some()))]
    pub async fn start_session(
        &self,
        spec: Option<PuzzleSpec>,
    ) -> Result<SessionState, SessionError> {
        let token = self.generation().await;

        let spec = match spec {
            Some(spec) => {
                self.validate_puzzle(&spec).await?;
                spec
            }
            None => {
                let spec = self.oracle.new_puzzle().await?;
                debug!(puzzle = %spec, "Generator supplied puzzle");
                if spec.is_trivial() {
                    return Err(SessionError::TrivialPuzzle(spec.start_word().clone()));
                }
                spec
            }
        };

        let distance = self.distance_between(spec.start_word(), spec.end_word()).await?;
        let state = SessionState::begin(spec, distance);

        #[cfg(debug_assertions)]
        crate::invariants::verify(&state).map_err(SessionError::InvariantViolation)?;

        self.commit(token, state.clone()).await?;
        info!(puzzle = %state.spec(), distance = %distance, "Session started");
        Ok(state)
    }

    /// Starts a session from raw start and end text.
    ///
    /// Blank input fails as `InvalidWord` without consulting the oracle.
    #[instrument(skip(self))]
    pub async fn start_with_words(
        &self,
        start: &str,
        end: &str,
    ) -> Result<SessionState, SessionError> {
        let start_word =
            Word::parse(start).ok_or_else(|| SessionError::InvalidWord(start.to_string()))?;
        let end_word =
            Word::parse(end).ok_or_else(|| SessionError::InvalidWord(end.to_string()))?;
        self.start_session(Some(PuzzleSpec::new(start_word, end_word)))
            .await
    }

    /// Submits a guess.
    ///
    /// Checks, in order: session accepts guesses, guess is non-empty, guess is
    /// a word, guess is one edit from the tip. The first failure is returned
    /// and nothing changes. On success the committed state comes back with
    /// the outcome.
    #[instrument(skip(self))]
    pub async fn submit_guess(
        &self,
        raw: &str,
    ) -> Result<(GuessOutcome, SessionState), SessionError> {
        let (before, token) = self.begin_op().await?;

        GuessContract::pre(&before, raw)?;
        let word = NonEmptyGuess::check(raw)?;

        if !self.oracle.is_valid_word(&word).await? {
            warn!(word = %word, "Guess is not a dictionary word");
            return Err(SessionError::InvalidWord(word.to_string()));
        }

        let from = before.current_word();
        if !self.oracle.is_one_edit_apart(from, &word).await? {
            warn!(from = %from, to = %word, "Guess is not one edit away");
            return Err(SessionError::NotOneEditAway {
                from: from.clone(),
                to: word,
            });
        }

        let end = before.spec().end_word();
        let distance = if &word == end {
            Distance::Known(0)
        } else {
            self.distance_between(&word, end).await?
        };

        let mut after = before.clone();
        let outcome = after.record_guess(word, distance);

        #[cfg(debug_assertions)]
        GuessContract::post(&before, &after)?;

        self.commit(token, after.clone()).await?;
        info!(
            status = %outcome.status(),
            distance = %outcome.distance(),
            remaining = outcome.guesses_remaining(),
            "Guess accepted"
        );
        Ok((outcome, after))
    }

    /// Undoes every move after `index`, refunding their guesses.
    ///
    /// Always reopens the session, even from `Won` or `Lost`. Commits at once,
    /// which supersedes any operation still waiting on the oracle.
    #[instrument(skip(self))]
    pub async fn undo_to(&self, index: usize) -> Result<SessionState, SessionError> {
        let mut slot = self.slot.lock().await;
        let before = slot
            .state
            .as_ref()
            .ok_or(SessionError::SessionNotInProgress(SessionStatus::NotStarted))?;

        UndoContract::pre(before, &index)?;

        let mut after = before.clone();
        after.undo_to(index)?;

        #[cfg(debug_assertions)]
        UndoContract::post(before, &after)?;

        slot.state = Some(after.clone());
        slot.generation += 1;
        info!(
            generation = slot.generation,
            path_len = after.path().len(),
            "Undo committed"
        );
        Ok(after)
    }

    /// Reveals a shortest ladder from the current word to the goal.
    ///
    /// Ends the session as won without touching the path or budget. When no
    /// ladder exists the state is unchanged and `NoPathFound` is returned.
    /// On success the committed state comes back with the ladder.
    #[instrument(skip(self))]
    pub async fn solve(&self) -> Result<(GuessPath, SessionState), SessionError> {
        let (before, token) = self.begin_op().await?;
        SolveContract::pre(&before, &())?;

        let from = before.current_word();
        let to = before.spec().end_word();
        let solution = match self.oracle.shortest_path(from, to).await? {
            Some(path) => path,
            None => {
                info!(from = %from, to = %to, "No ladder to reveal");
                return Err(SessionError::NoPathFound {
                    from: from.clone(),
                    to: to.clone(),
                });
            }
        };

        if solution.first() != from || solution.last() != to {
            return Err(OracleError::malformed(format!(
                "path oracle returned '{}' for {} -> {}",
                solution, from, to
            ))
            .into());
        }

        let mut after = before.clone();
        after.reveal(solution.clone());

        #[cfg(debug_assertions)]
        SolveContract::post(&before, &after)?;

        self.commit(token, after.clone()).await?;
        info!(steps = solution.steps(), "Solution revealed");
        Ok((solution, after))
    }

    /// Snapshot plus the token it was taken at.
    async fn begin_op(&self) -> Result<(SessionState, u64), SessionError> {
        let slot = self.slot.lock().await;
        let state = slot
            .state
            .clone()
            .ok_or(SessionError::SessionNotInProgress(SessionStatus::NotStarted))?;
        Ok((state, slot.generation))
    }

    /// Stores `next` if nothing else committed since `token` was taken.
    async fn commit(&self, token: u64, next: SessionState) -> Result<(), SessionError> {
        let mut slot = self.slot.lock().await;
        if slot.generation != token {
            warn!(token, current = slot.generation, "Dropping superseded operation");
            return Err(SessionError::Superseded { token });
        }
        slot.state = Some(next);
        slot.generation += 1;
        debug!(generation = slot.generation, "State committed");
        Ok(())
    }

    /// Both words of a supplied puzzle must be in the dictionary.
    async fn validate_puzzle(&self, spec: &PuzzleSpec) -> Result<(), SessionError> {
        if spec.is_trivial() {
            warn!(word = %spec.start_word(), "Start and end words are identical");
            return Err(SessionError::TrivialPuzzle(spec.start_word().clone()));
        }

        let (start_valid, end_valid) = tokio::try_join!(
            self.oracle.is_valid_word(spec.start_word()),
            self.oracle.is_valid_word(spec.end_word()),
        )?;

        if !start_valid {
            warn!(word = %spec.start_word(), "Start word rejected");
            return Err(SessionError::InvalidWord(spec.start_word().to_string()));
        }
        if !end_valid {
            warn!(word = %spec.end_word(), "End word rejected");
            return Err(SessionError::InvalidWord(spec.end_word().to_string()));
        }
        Ok(())
    }

    async fn distance_between(&self, from: &Word, to: &Word) -> Result<Distance, SessionError> {
        let path = self.oracle.shortest_path(from, to).await?;
        let distance = Distance::of_path(path.as_ref());
        debug!(from = %from, to = %to, distance = %distance, "Distance queried");
        Ok(distance)
    }
}
