//! HTTP interface to the tutor.
//!
//! - `GET /health` reports whether the agent is available.
//! - `POST /agent/invoke` answers a conversation: `{"input": {"messages": [...]}}` in,
//!   `{"output": {"messages": [...]}}` out.
//! - `POST /tools/:name` calls a toolkit method with JSON arguments, returning its result record.
//!
//! The toolkit routes work without an API key; the agent route answers `503 Service Unavailable`
//! until one is configured. Toolkit calls run on the blocking thread pool and answer
//! `504 Gateway Timeout` when they outlast the configured tool timeout.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json,
    Router,
};
use mentor_agent::{run_blocking, Agent, AgentError, ChatMessage, Config, ToolFailure};
use mentor_tools::{bridge, ToolResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::{sync::Arc, time::Duration};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

/// State shared by the handlers.
pub struct AppState {
    /// The tutor, if an API key is configured.
    pub agent: Option<Agent>,

    /// Longest time a toolkit call may run.
    pub tool_timeout: Duration,
}

impl AppState {
    /// Builds the state from the configuration. A missing API key disables the agent route.
    pub fn from_config(config: &Config) -> Self {
        let agent = match Agent::new(config) {
            Ok(agent) => {
                info!("Agent ready: model={}", config.model);
                Some(agent)
            },
            Err(err) => {
                warn!("{}; only the toolkit routes are available", err);
                None
            },
        };
        Self { agent, tool_timeout: config.tool_timeout }
    }
}

/// A conversation, as sent to and returned from the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvokeRequest {
    pub input: Conversation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvokeResponse {
    pub output: Conversation,
}

/// Builds the router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/agent/invoke", post(invoke))
        .route("/tools/:name", post(call_tool))
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds to the configured address and serves until the process exits.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let state = Arc::new(AppState::from_config(&config));
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// GET /health - Report that the server is up.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "agent": state.agent.is_some(),
        "tools": bridge::METHODS,
    }))
}

/// POST /agent/invoke - Answer a conversation.
pub async fn invoke(
    State(state): State<Arc<AppState>>,
    Json(req): Json<InvokeRequest>,
) -> Result<Json<InvokeResponse>, (StatusCode, String)> {
    let Some(agent) = &state.agent else {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "Agent unavailable: OPENAI_API_KEY is not set".to_string(),
        ));
    };

    let messages = agent.invoke(req.input.messages).await.map_err(|err| {
        warn!("Agent request failed: {}", err);
        (status_for(&err), err.to_string())
    })?;
    Ok(Json(InvokeResponse { output: Conversation { messages } }))
}

fn status_for(err: &AgentError) -> StatusCode {
    match err {
        AgentError::EmptyConversation => StatusCode::BAD_REQUEST,
        AgentError::Http(_) | AgentError::Api { .. } | AgentError::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
        AgentError::Config(_) | AgentError::MaxIterations(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// POST /tools/:name - Call a toolkit method.
///
/// Math errors are part of the result record, so they still answer `200 OK`.
pub async fn call_tool(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(args): Json<Value>,
) -> (StatusCode, Json<ToolResult>) {
    if !bridge::METHODS.contains(&name.as_str()) {
        return (StatusCode::NOT_FOUND, Json(bridge::dispatch(&name, args)));
    }

    let method = name.clone();
    match run_blocking(state.tool_timeout, move || bridge::dispatch(&method, args)).await {
        Ok(result) => (StatusCode::OK, Json(result)),
        Err(err) => {
            warn!("Tool `{}` failed: {}", name, err);
            failure_response(&name, err)
        },
    }
}

/// The response for a toolkit call that produced no result record.
fn failure_response(name: &str, err: ToolFailure) -> (StatusCode, Json<ToolResult>) {
    let status = match err {
        ToolFailure::TimedOut(_) => StatusCode::GATEWAY_TIMEOUT,
        ToolFailure::Aborted(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let result = ToolResult::failure(
        format!("`{}` {}", name, err),
        "The calculation took too long or stopped; try a simpler expression",
    );
    (status, Json(result))
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use mentor_agent::{ChatClient, Role, TOOL_TIMEOUT};
    use mentor_agent::llm::ToolSchema;
    use pretty_assertions::assert_eq;
    use super::*;

    struct Echo;

    #[async_trait]
    impl ChatClient for Echo {
        async fn chat(&self, messages: &[ChatMessage], _: &[ToolSchema]) -> Result<ChatMessage, AgentError> {
            let last = messages.last().and_then(|message| message.content.clone()).unwrap_or_default();
            Ok(ChatMessage::assistant(format!("What do you think about {}?", last)))
        }
    }

    fn state(agent: Option<Agent>) -> State<Arc<AppState>> {
        State(Arc::new(AppState { agent, tool_timeout: TOOL_TIMEOUT }))
    }

    #[tokio::test]
    async fn health_without_agent() {
        let Json(body) = health(state(None)).await;
        assert_eq!(body["status"], json!("ok"));
        assert_eq!(body["agent"], json!(false));
        assert_eq!(body["tools"].as_array().map(Vec::len), Some(7));
    }

    #[tokio::test]
    async fn invoke_agent() {
        let agent = Agent::with_client(Arc::new(Echo), 8);
        let req: InvokeRequest = serde_json::from_value(json!({
            "input": { "messages": [{ "role": "user", "content": "7 * 8" }] }
        })).unwrap();

        let Json(res) = invoke(state(Some(agent)), Json(req)).await.unwrap();
        let messages = res.output.messages;
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[2], ChatMessage::assistant("What do you think about 7 * 8?"));
    }

    #[tokio::test]
    async fn invoke_errors() {
        let req = InvokeRequest { input: Conversation { messages: Vec::new() } };
        let (status, _) = invoke(state(None), Json(req.clone())).await.unwrap_err();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let agent = Agent::with_client(Arc::new(Echo), 8);
        let (status, body) = invoke(state(Some(agent)), Json(req)).await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "No messages to respond to");
    }

    #[tokio::test]
    async fn tool_routes() {
        let (status, Json(result)) = call_tool(
            state(None),
            Path("solve_equation".to_string()),
            Json(json!({ "equation": "2*x + 5 = 13" })),
        ).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(result.result.as_deref(), Some("x = 4"));

        let (status, Json(result)) = call_tool(
            state(None),
            Path("calculate".to_string()),
            Json(json!({ "expr": "(1 + 2" })),
        ).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!result.success);

        let (status, Json(result)) = call_tool(state(None), Path("integrate".to_string()), Json(json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(!result.success);
    }

    #[tokio::test]
    async fn slow_tools_fail() {
        let limit = Duration::from_millis(20);
        let failure = run_blocking(limit, || std::thread::sleep(Duration::from_millis(300))).await.unwrap_err();
        let (status, Json(result)) = failure_response("solve_equation", failure);
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("`solve_equation` timed out after 20 ms"));

        let (status, Json(result)) = failure_response("simplify", ToolFailure::Aborted("panicked".to_string()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(result.error.as_deref(), Some("`simplify` stopped unexpectedly: panicked"));
    }
}
