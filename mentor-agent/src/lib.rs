//! # Math Mentor agent
//!
//! A Socratic math tutor built on an OpenAI-compatible chat endpoint. The model is given a fixed
//! system prompt and the math tools from `mentor-tools`, and decides on its own when to use them.
//!
//! The agent follows the "tools in a loop" pattern:
//! 1. Put the tutor prompt in front of the conversation
//! 2. Call the model with the available tools
//! 3. If the model requests tool calls, run them and feed the results back
//! 4. Repeat until the model replies, or the iteration limit is reached
//!
//! Nothing is remembered between requests; the caller owns the conversation.
//!
//! ```rust,ignore
//! use mentor_agent::{Agent, Config};
//!
//! let config = Config::from_env()?;
//! let agent = Agent::new(&config)?;
//! let reply = agent.reply("Help me solve 2x + 5 = 13").await?;
//! ```

pub mod agent;
pub mod config;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod tools;

pub use agent::{Agent, GRAPH_DIAGRAM};
pub use config::{Config, ConfigError};
pub use error::AgentError;
pub use llm::{ChatClient, ChatMessage, Role};
pub use tools::{run_blocking, ToolFailure, TOOL_TIMEOUT};
