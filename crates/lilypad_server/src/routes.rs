//! HTTP routes of the session service.

use crate::api::{
    CreateSessionRequest, GuessRequest, GuessResponse, SessionList, SessionView, SolveResponse,
    UndoRequest,
};
use crate::error::ApiError;
use crate::registry::SessionManager;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use lilypad_core::{Oracle, PuzzleSpec, SessionEngine, SessionError, Word};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{info, instrument};

type AppState<O> = State<Arc<SessionManager<O>>>;

/// Builds the `/api/sessions` router.
pub fn router<O: Oracle + 'static>(manager: Arc<SessionManager<O>>) -> Router {
    Router::new()
        .route(
            "/api/sessions",
            post(create_session::<O>).get(list_sessions::<O>),
        )
        .route(
            "/api/sessions/{id}",
            get(get_session::<O>).delete(delete_session::<O>),
        )
        .route("/api/sessions/{id}/guess", post(submit_guess::<O>))
        .route("/api/sessions/{id}/undo", post(undo::<O>))
        .route("/api/sessions/{id}/solve", post(solve::<O>))
        .with_state(manager)
}

fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::InvalidRequest(e.to_string()))
}

fn required_word(raw: &str) -> Result<Word, ApiError> {
    Word::parse(raw).ok_or_else(|| SessionError::InvalidWord(raw.to_string()).into())
}

async fn lookup<O: Oracle>(
    manager: &SessionManager<O>,
    id: &str,
) -> Result<Arc<SessionEngine<O>>, ApiError> {
    manager
        .get(id)
        .await
        .ok_or_else(|| ApiError::SessionNotFound(id.to_string()))
}

async fn view<O: Oracle>(id: String, engine: &SessionEngine<O>) -> Result<SessionView, ApiError> {
    let state = engine.snapshot().await.ok_or_else(|| {
        SessionError::InvariantViolation(format!("registered session {} has no state", id))
    })?;
    Ok(SessionView { id, state })
}

#[instrument(skip(manager, body))]
async fn create_session<O: Oracle>(
    State(manager): AppState<O>,
    body: Bytes,
) -> Result<(StatusCode, Json<SessionView>), ApiError> {
    let request: CreateSessionRequest = if body.is_empty() {
        CreateSessionRequest::default()
    } else {
        parse_body(&body)?
    };

    let spec = match (request.start_word, request.end_word) {
        (Some(start), Some(end)) => Some(PuzzleSpec::new(
            required_word(&start)?,
            required_word(&end)?,
        )),
        (None, None) => None,
        _ => {
            return Err(ApiError::InvalidRequest(
                "start_word and end_word must be given together".to_string(),
            ));
        }
    };

    let engine = manager.engine();
    let state = engine.start_session(spec).await?;
    let id = manager.insert(engine).await;
    info!(session_id = %id, puzzle = %state.spec(), "Session created");
    Ok((StatusCode::CREATED, Json(SessionView { id, state })))
}

#[instrument(skip(manager))]
async fn list_sessions<O: Oracle>(State(manager): AppState<O>) -> Json<SessionList> {
    Json(SessionList {
        sessions: manager.list().await,
    })
}

#[instrument(skip(manager))]
async fn get_session<O: Oracle>(
    State(manager): AppState<O>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
    let engine = lookup(&manager, &id).await?;
    Ok(Json(view(id, &engine).await?))
}

#[instrument(skip(manager))]
async fn delete_session<O: Oracle>(
    State(manager): AppState<O>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if manager.remove(&id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::SessionNotFound(id))
    }
}

#[instrument(skip(manager, body))]
async fn submit_guess<O: Oracle>(
    State(manager): AppState<O>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<GuessResponse>, ApiError> {
    let request: GuessRequest = parse_body(&body)?;
    let engine = lookup(&manager, &id).await?;
    let (outcome, state) = engine.submit_guess(&request.word).await?;
    Ok(Json(GuessResponse {
        outcome,
        session: SessionView { id, state },
    }))
}

#[instrument(skip(manager, body))]
async fn undo<O: Oracle>(
    State(manager): AppState<O>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<SessionView>, ApiError> {
    let request: UndoRequest = parse_body(&body)?;
    let engine = lookup(&manager, &id).await?;
    let index =
        usize::try_from(request.index).map_err(|_| ApiError::NegativeIndex(request.index))?;
    let state = engine.undo_to(index).await?;
    Ok(Json(SessionView { id, state }))
}

#[instrument(skip(manager))]
async fn solve<O: Oracle>(
    State(manager): AppState<O>,
    Path(id): Path<String>,
) -> Result<Json<SolveResponse>, ApiError> {
    let engine = lookup(&manager, &id).await?;
    let (solution, state) = engine.solve().await?;
    Ok(Json(SolveResponse {
        solution,
        session: SessionView { id, state },
    }))
}
