//! HTTP surface of the relay.
//!
//! Exposes `POST /api/chat/start`, `POST /api/chat` and `GET /health`. The
//! routes only know about `text_completion::RequestHandler`; the concrete
//! provider is injected by the binary.

mod cors;
mod error;
mod relay;
mod routes;
mod server;

pub use error::{ApiError, ServerError};
pub use relay::{Relay, START_MESSAGE};
pub use server::{init, router};

use std::sync::Arc;

pub const DEVELOPMENT: &str = "development";
pub const DEVELOPMENT_ORIGIN: &str = "http://localhost:3000";

/// Listening and CORS settings, read once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Runtime mode, reported by `/health`. `None` when not configured.
    pub environment: Option<String>,
    /// Origin allowed outside development mode.
    pub frontend_url: Option<String>,
}

impl ServerConfig {
    pub fn is_development(&self) -> bool {
        self.environment.as_deref() == Some(DEVELOPMENT)
    }

    /// The single origin cross-origin requests may come from.
    pub fn allowed_origin(&self) -> Option<&str> {
        if self.is_development() {
            Some(DEVELOPMENT_ORIGIN)
        } else {
            self.frontend_url.as_deref()
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    relay: Relay,
    environment: Option<Arc<str>>,
}

impl AppState {
    pub fn new(relay: Relay, environment: Option<&str>) -> Self {
        AppState {
            relay,
            environment: environment.map(Arc::from),
        }
    }
}
