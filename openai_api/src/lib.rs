//! A library for calling OpenAI's chat completion API.
//!
//! This crate provides an `OpenAIHandler` struct implementing
//! `text_completion::RequestHandler`: each request is sent to the chat
//! completion endpoint on its own task and the raw answer is handed back.

mod models;
pub use models::CompletionConfig;
mod run_completion;
pub use run_completion::run_completion;

use text_completion::{ChatMessage, CompletionError, CompletionReply, RequestHandler};
use tokio::sync::oneshot::Sender;
use tracing::warn;

#[derive(Clone)]
pub struct OpenAIHandler {
    api_key: String,
    config: CompletionConfig,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAIHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIHandler")
            .field("config", &self.config)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl OpenAIHandler {
    pub fn new(api_key: impl Into<String>, config: CompletionConfig) -> Self {
        OpenAIHandler {
            api_key: api_key.into(),
            config,
            client: reqwest::Client::new(),
        }
    }
}

impl RequestHandler for OpenAIHandler {
    fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
        result: Sender<Result<CompletionReply, CompletionError>>,
    ) {
        let handler = self.clone();
        tokio::spawn(async move {
            let r = run_completion(&handler, &messages).await;
            if result.send(r).is_err() {
                warn!("chat_completion caller went away before the answer");
            }
        });
    }
}
