//! An interface for handling chat completion requests
//!
//! This crate provides a `RequestHandler` trait that the HTTP surface talks to,
//! the message and variable types shared by both sides, and the prompt template
//! used to build the system message of every conversation.

mod error;
mod models;
mod prompt_template;

pub use error::CompletionError;
pub use models::{ChatMessage, CompletionReply, Role, VariableSet};
pub use prompt_template::{PromptTemplate, DEFAULT_TEMPLATE, PLACEHOLDERS};

use tokio::sync::oneshot::Sender;

pub trait RequestHandler {
    // The answer is sent through the channel instead of being returned, so the
    // trait stays object safe and the HTTP crate never depends on a provider.
    fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
        result: Sender<Result<CompletionReply, CompletionError>>,
    );
}
