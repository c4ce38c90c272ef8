use serde::Serialize;
use text_completion::ChatMessage;

pub const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const MODEL: &str = "gpt-3.5-turbo";
pub const TEMPERATURE: f64 = 0.7;

/// Fixed parameters of every completion call.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletionConfig {
    pub endpoint: String,
    pub model: String,
    pub temperature: f64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        CompletionConfig {
            endpoint: CHAT_COMPLETIONS_URL.to_string(),
            model: MODEL.to_string(),
            temperature: TEMPERATURE,
        }
    }
}

#[derive(Serialize, Debug)]
pub(crate) struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub temperature: f64,
}
