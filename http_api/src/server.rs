use std::{any::Any, future::Future, net::SocketAddr};

use axum::{
    http::{HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::cors::{cors_layer, origin_guard, AllowedOrigin};
use crate::error::INTERNAL_ERROR;
use crate::{routes, AppState, ServerConfig, ServerError};

/// Builds the application router. `/health` skips the origin guard.
pub fn router(state: AppState, config: &ServerConfig) -> Result<Router, ServerError> {
    let allowed = AllowedOrigin(
        config
            .allowed_origin()
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .map_err(|_| ServerError::InvalidOrigin(origin.to_string()))
            })
            .transpose()?,
    );

    let api = Router::new()
        .route("/api/chat/start", post(routes::chat_start))
        .route("/api/chat", post(routes::chat))
        .route_layer(middleware::from_fn_with_state(allowed.clone(), origin_guard));

    Ok(Router::new()
        .merge(api)
        .route("/health", get(routes::health))
        .with_state(state)
        .layer(cors_layer(&allowed))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http()))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic"
    };
    error!("Unhandled failure in request handler: {}", details);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": INTERNAL_ERROR })),
    )
        .into_response()
}

/// Binds `0.0.0.0:<port>` and serves until Ctrl-C.
pub async fn init(config: ServerConfig, state: AppState) -> Result<(), ServerError> {
    let app = router(state, &config)?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(
        "Server running in {} mode on port {}",
        config.environment.as_deref().unwrap_or("(unset)"),
        config.port
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    wait_for_shutdown(tokio::signal::ctrl_c()).await
}

/// Resolves once `signal` fires. A signal that cannot be listened for never
/// resolves, so the server keeps running.
async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("Received Ctrl-C, shutting down."),
        Err(e) => {
            error!("Unable to listen for Ctrl-C, graceful shutdown disabled: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
