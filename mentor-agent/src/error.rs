use crate::config::ConfigError;
use thiserror::Error;

/// Errors that can occur while the agent answers a request.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Request to the chat endpoint failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Chat endpoint returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Chat endpoint returned an unexpected response: {0}")]
    InvalidResponse(String),

    #[error("No messages to respond to")]
    EmptyConversation,

    #[error("Max iterations ({0}) reached without a reply")]
    MaxIterations(usize),
}
