use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use text_completion::{ChatMessage, CompletionReply, VariableSet};
use tracing::info;

use crate::{ApiError, AppState};

#[derive(Deserialize, Debug)]
pub(crate) struct StartRequest {
    variables: Option<VariableSet>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct ChatRequest {
    messages: Option<Vec<ChatMessage>>,
    variables: Option<VariableSet>,
}

/// `POST /api/chat/start`
pub(crate) async fn chat_start(
    State(state): State<AppState>,
    body: Result<Json<StartRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = body?;
    let variables = request
        .variables
        .ok_or_else(|| ApiError::BadRequest("Variables are required".to_string()))?;

    info!("chat start for company={}", variables.company_name);
    let reply = state.relay.start(&variables).await?;
    Ok(pass_through(reply))
}

/// `POST /api/chat`
pub(crate) async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = body?;
    let (Some(variables), Some(messages)) = (request.variables, request.messages) else {
        return Err(ApiError::BadRequest(
            "Variables and messages are required".to_string(),
        ));
    };

    info!(
        "chat continue for company={} history={}",
        variables.company_name,
        messages.len()
    );
    let reply = state.relay.continue_conversation(&variables, messages).await?;
    Ok(pass_through(reply))
}

#[derive(Serialize, Debug)]
struct Health<'a> {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    environment: Option<&'a str>,
}

/// `GET /health`
pub(crate) async fn health(State(state): State<AppState>) -> Response {
    Json(Health {
        status: "ok",
        environment: state.environment.as_deref(),
    })
    .into_response()
}

fn pass_through(reply: CompletionReply) -> Response {
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::OK);
    (status, Json(reply.body)).into_response()
}
