use std::sync::Arc;

use text_completion::{
    ChatMessage, CompletionError, CompletionReply, PromptTemplate, RequestHandler, VariableSet,
};
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// Opening user turn of a new conversation.
pub const START_MESSAGE: &str = "Start conversation";

/// Prepends the templated system prompt and forwards the conversation.
#[derive(Clone)]
pub struct Relay {
    request_handler: Arc<dyn RequestHandler + Send + Sync>,
    template: Arc<PromptTemplate>,
}

impl Relay {
    pub fn new(
        request_handler: Arc<dyn RequestHandler + Send + Sync>,
        template: PromptTemplate,
    ) -> Self {
        Relay {
            request_handler,
            template: Arc::new(template),
        }
    }

    pub fn start_messages(&self, variables: &VariableSet) -> Vec<ChatMessage> {
        vec![
            self.template.system_message(variables),
            ChatMessage::user(START_MESSAGE),
        ]
    }

    /// System message first, then the caller's history in its original order.
    pub fn continue_messages(
        &self,
        variables: &VariableSet,
        history: Vec<ChatMessage>,
    ) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(self.template.system_message(variables));
        messages.extend(history);
        messages
    }

    pub async fn start(
        &self,
        variables: &VariableSet,
    ) -> Result<CompletionReply, CompletionError> {
        self.ask(self.start_messages(variables)).await
    }

    pub async fn continue_conversation(
        &self,
        variables: &VariableSet,
        history: Vec<ChatMessage>,
    ) -> Result<CompletionReply, CompletionError> {
        self.ask(self.continue_messages(variables, history)).await
    }

    async fn ask(&self, messages: Vec<ChatMessage>) -> Result<CompletionReply, CompletionError> {
        debug!("relaying {} messages", messages.len());
        let (tx, rx) = oneshot::channel();
        self.request_handler.chat_completion(messages, tx);

        match rx.await {
            Ok(result) => result,
            Err(_) => {
                warn!("Error receiving result from RequestHandler.");
                Err(CompletionError::Canceled)
            }
        }
    }
}
