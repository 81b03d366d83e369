use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("prompt is empty")]
    EmptyPrompt,

    #[error("chat upstream request failed: {0}")]
    Upstream(String),

    #[error("chat upstream returned status {0}")]
    Status(u16),

    #[error("chat upstream response could not be decoded: {0}")]
    Decode(String),
}

/// Send prompt text, receive reply text.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn reply(&self, prompt: &str) -> Result<String, ChatError>;
}
