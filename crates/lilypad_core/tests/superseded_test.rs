//! Operations whose oracle answers arrive after an undo are dropped.

mod common;

use common::{ScriptedOracle, spec};
use lilypad_core::{ErrorClass, GUESS_BUDGET, SessionEngine, SessionError, SessionStatus};
use std::sync::Arc;

#[tokio::test]
async fn test_guess_superseded_by_undo() {
    let engine = Arc::new(SessionEngine::new(Arc::new(ScriptedOracle::cat_dog())));
    engine.start_session(Some(spec("cat", "dog"))).await.unwrap();
    engine.submit_guess("cot").await.unwrap();

    let gate = engine.oracle().gate_paths_from("cog");
    let pending = {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move { engine.submit_guess("cog").await })
    };

    gate.entered.notified().await;
    let state = engine.undo_to(0).await.unwrap();
    assert_eq!(state.path().len(), 1);
    gate.release.notify_one();

    let err = pending.await.unwrap().unwrap_err();
    assert!(matches!(err, SessionError::Superseded { .. }));
    assert_eq!(err.class(), ErrorClass::Sequencing);

    let state = engine.snapshot().await.unwrap();
    assert_eq!(state.path().len(), 1);
    assert_eq!(state.guesses_remaining(), GUESS_BUDGET);
    assert_eq!(state.status(), SessionStatus::InProgress);
}

#[tokio::test]
async fn test_solve_superseded_by_undo() {
    let engine = Arc::new(SessionEngine::new(Arc::new(ScriptedOracle::cat_dog())));
    engine.start_session(Some(spec("cat", "dog"))).await.unwrap();
    engine.submit_guess("cot").await.unwrap();

    let gate = engine.oracle().gate_paths_from("cot");
    let pending = {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move { engine.solve().await })
    };

    gate.entered.notified().await;
    engine.undo_to(0).await.unwrap();
    gate.release.notify_one();

    let err = pending.await.unwrap().unwrap_err();
    assert!(matches!(err, SessionError::Superseded { .. }));

    let state = engine.snapshot().await.unwrap();
    assert!(state.revealed_solution().is_none());
    assert_eq!(state.status(), SessionStatus::InProgress);
}

#[tokio::test]
async fn test_sequential_operations_are_not_superseded() {
    let engine = SessionEngine::new(Arc::new(ScriptedOracle::cat_dog()));
    engine.start_session(Some(spec("cat", "dog"))).await.unwrap();
    let before = engine.generation().await;
    engine.submit_guess("cot").await.unwrap();
    engine.undo_to(0).await.unwrap();
    engine.submit_guess("cot").await.unwrap();
    assert_eq!(engine.generation().await, before + 3);
}
