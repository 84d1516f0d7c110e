use async_trait::async_trait;
use tokio::sync::mpsc;

use super::CompletionError;
use super::Event;
use super::Message;
use super::ModelName;

/// The system instruction that opens every conversation.
pub const SYSTEM_INSTRUCTIONS: &str = r#"
You are AgriSmart — an AI agriculture expert.
Provide practical, scientific, easy-to-follow advice for farmers of all skill levels.
Respond in clear steps. Avoid overly technical language.
"#;

pub struct BackendPrompt {
    pub text: String,
    pub api_key: String,
    pub model: ModelName,
    pub max_tokens: u32,
    pub stream: bool,
    /// Earlier turns sent ahead of `text`. Only the most recent ones are used.
    pub history: Option<Vec<Message>>,
}

#[async_trait]
pub trait Backend {
    /// Requests a completion for the prompt and returns the full text.
    ///
    /// While a streamed response is being read, every received piece of text
    /// is sent through the channel together with everything accumulated so
    /// far. A buffered response is sent once, when complete.
    ///
    /// Backends never touch session state. Bookkeeping is up to the caller.
    async fn get_completion<'a>(
        &self,
        prompt: BackendPrompt,
        tx: &'a mpsc::UnboundedSender<Event>,
    ) -> Result<String, CompletionError>;
}

pub type BackendBox = Box<dyn Backend + Send + Sync>;
