use text_completion::{ChatMessage, CompletionError, CompletionReply};
use tracing::*;

use crate::models::ChatCompletionRequest;
use crate::OpenAIHandler;

/// Sends one chat completion request and returns the provider's answer untouched.
pub async fn run_completion(
    handler: &OpenAIHandler,
    messages: &[ChatMessage],
) -> Result<CompletionReply, CompletionError> {
    let config = &handler.config;
    trace!(
        "run_completion model={} messages={}",
        config.model,
        messages.len()
    );

    let response = handler
        .client
        .post(&config.endpoint)
        .bearer_auth(&handler.api_key)
        .json(&ChatCompletionRequest {
            model: &config.model,
            messages,
            temperature: config.temperature,
        })
        .send()
        .await
        .map_err(|e| CompletionError::Transport(e.to_string()))?;

    let status = response.status();
    trace!("POST {} {:?}", config.endpoint, status);

    let body_text = response
        .text()
        .await
        .map_err(|e| CompletionError::Transport(e.to_string()))?;

    if !status.is_success() {
        return Err(CompletionError::Upstream {
            status: status.as_u16(),
            message: extract_error_message(&body_text),
        });
    }

    let body: serde_json::Value = serde_json::from_str(&body_text)
        .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

    debug!("run_completion status={} body={}", status, body);
    Ok(CompletionReply {
        status: status.as_u16(),
        body,
    })
}

// OpenAI errors look like {"error": {"message": "...", "type": "...", "code": "..."}}
fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;
    parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
        .map(ToOwned::to_owned)
}
