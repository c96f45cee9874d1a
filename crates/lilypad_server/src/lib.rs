//! REST session service for LilyPad.
//!
//! Exposes many independent word-ladder sessions over HTTP. Each session is a
//! [`lilypad_core::SessionEngine`] registered in a [`SessionManager`]; all of
//! them share one oracle.
//!
//! | Call | Success |
//! |---|---|
//! | `POST /api/sessions` | `201` + session |
//! | `GET /api/sessions` | session ids |
//! | `GET /api/sessions/{id}` | session |
//! | `DELETE /api/sessions/{id}` | `204` |
//! | `POST /api/sessions/{id}/guess` | outcome + session |
//! | `POST /api/sessions/{id}/undo` | session |
//! | `POST /api/sessions/{id}/solve` | solution + session |

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod api;
mod error;
mod registry;
mod routes;

pub use error::{ApiError, ErrorBody};
pub use registry::{SessionId, SessionManager};
pub use routes::router;

use lilypad_core::Oracle;
use std::sync::Arc;
use tracing::{info, instrument};

/// Serves the session API on `addr` until the process ends.
#[instrument(skip(oracle))]
pub async fn serve<O: Oracle + 'static>(addr: &str, oracle: Arc<O>) -> std::io::Result<()> {
    let manager = Arc::new(SessionManager::new(oracle));
    let app = router(manager);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Session service listening");
    axum::serve(listener, app).await
}
