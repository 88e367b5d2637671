//! Configuration for the tutor.
//!
//! Configuration is read from environment variables, after loading a `.env` file if there is one:
//! - `OPENAI_API_KEY` - Required to talk to the model. The key for the chat endpoint. Without it,
//!   only the math tools are available.
//! - `OPENAI_BASE_URL` - Optional. The OpenAI-compatible endpoint. Defaults to
//!   `https://api.openai.com/v1`.
//! - `MENTOR_MODEL` - Optional. The model to chat with. Defaults to `glm-4.5-air`.
//! - `MENTOR_TEMPERATURE` - Optional. The sampling temperature. Defaults to `0.7`.
//! - `MENTOR_MAX_ITERATIONS` - Optional. The maximum number of model calls per request. Defaults
//!   to `8`.
//! - `MENTOR_TOOL_TIMEOUT_MS` - Optional. How long one tool call may run, in milliseconds.
//!   Defaults to `5000`.
//! - `HOST` - Optional. Server host. Defaults to `0.0.0.0`.
//! - `PORT` - Optional. Server port. Defaults to `8200`.

use std::{str::FromStr, time::Duration};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "glm-4.5-air";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_ITERATIONS: usize = 8;
pub const DEFAULT_TOOL_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8200;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Tutor configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Key for the chat endpoint
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible chat endpoint
    pub base_url: String,

    /// Model identifier
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum number of model calls while answering one request
    pub max_iterations: usize,

    /// Longest time a single tool call may run
    pub tool_timeout: Duration,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,
}

impl Config {
    /// Loads `.env` if present, then reads the configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a number cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // a missing .env file is fine, the variables may be set directly
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through the given lookup function.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty());

        let base_url = lookup("OPENAI_BASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let model = lookup("MENTOR_MODEL")
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            temperature: parse_or(&lookup, "MENTOR_TEMPERATURE", DEFAULT_TEMPERATURE)?,
            max_iterations: parse_or(&lookup, "MENTOR_MAX_ITERATIONS", DEFAULT_MAX_ITERATIONS)?,
            tool_timeout: Duration::from_millis(
                parse_or(&lookup, "MENTOR_TOOL_TIMEOUT_MS", DEFAULT_TOOL_TIMEOUT_MS)?,
            ),
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
        })
    }

    /// The key for the chat endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `OPENAI_API_KEY` is not set.
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))
    }

    /// The address the server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parses the variable if it is set, or returns the default.
fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(name)
        .map(|value| value.trim().parse::<T>()
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), format!("{}", e))))
        .transpose()
        .map(|value| value.unwrap_or(default))
}
