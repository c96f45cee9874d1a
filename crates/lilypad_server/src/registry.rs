//! Session registry for the REST service.

use lilypad_core::{Oracle, SessionEngine};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

/// Unique identifier for a play session.
pub type SessionId = String;

/// Owns every live session engine, keyed by id.
///
/// The map lock is held only to look up, insert or remove a handle; the
/// engines serialize their own operations.
pub struct SessionManager<O> {
    oracle: Arc<O>,
    sessions: Mutex<HashMap<SessionId, Arc<SessionEngine<O>>>>,
    next_id: AtomicU64,
}

impl<O> std::fmt::Debug for SessionManager<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

impl<O: Oracle> SessionManager<O> {
    /// Creates an empty registry sharing one oracle.
    #[instrument(skip(oracle))]
    pub fn new(oracle: Arc<O>) -> Self {
        info!("Creating session manager");
        Self {
            oracle,
            sessions: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// A fresh, unregistered engine.
    pub fn engine(&self) -> Arc<SessionEngine<O>> {
        Arc::new(SessionEngine::new(Arc::clone(&self.oracle)))
    }

    /// Registers an engine under a new id.
    #[instrument(skip(self, engine))]
    pub async fn insert(&self, engine: Arc<SessionEngine<O>>) -> SessionId {
        let id = format!("s{}", self.next_id.fetch_add(1, Ordering::Relaxed));
        self.sessions.lock().await.insert(id.clone(), engine);
        info!(session_id = %id, "Registered session");
        id
    }

    /// Looks up a session.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Option<Arc<SessionEngine<O>>> {
        let engine = self.sessions.lock().await.get(id).cloned();
        if engine.is_none() {
            debug!(session_id = id, "Session not found");
        }
        engine
    }

    /// Removes a session. Returns false if it did not exist.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> bool {
        let removed = self.sessions.lock().await.remove(id).is_some();
        if removed {
            info!(session_id = id, "Removed session");
        }
        removed
    }

    /// Ids of all live sessions, sorted.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Vec<SessionId> {
        let mut ids: Vec<_> = self.sessions.lock().await.keys().cloned().collect();
        ids.sort();
        ids
    }
}
