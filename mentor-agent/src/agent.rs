//! The tool loop.

use std::{sync::Arc, time::Duration};
use crate::{
    config::{Config, ConfigError},
    error::AgentError,
    llm::{ChatClient, ChatMessage, OpenAiClient, Role},
    prompt::{build_system_prompt, PROMPT_MARKER},
    tools::{run_blocking, ToolRegistry, TOOL_TIMEOUT},
};

/// How the agent answers a request, as an ASCII diagram.
pub const GRAPH_DIAGRAM: &str = r#"        +-----------+
        | __start__ |
        +-----------+
              *
              *
              *
          +-------+
          | agent |
          +-------+
         .         .
       ..           ..
      .               .
+-------+         +---------+
| tools |         | __end__ |
+-------+         +---------+
    *
    * (results go back to the agent)
"#;

/// The Socratic tutor: a chat model with the math tools, answering one request at a time.
///
/// The agent keeps no state between requests; the caller sends the whole conversation each
/// time.
pub struct Agent {
    client: Arc<dyn ChatClient>,
    tools: Arc<ToolRegistry>,
    system_prompt: String,
    max_iterations: usize,
    tool_timeout: Duration,
}

impl Agent {
    /// Creates an agent that talks to the endpoint in the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if the configuration has no API key.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let client = OpenAiClient::new(config)?;
        Ok(Self::with_client(Arc::new(client), config.max_iterations)
            .with_tool_timeout(config.tool_timeout))
    }

    /// Creates an agent that talks to the given client.
    pub fn with_client(client: Arc<dyn ChatClient>, max_iterations: usize) -> Self {
        let tools = ToolRegistry::new();
        let system_prompt = build_system_prompt(&tools);
        Self {
            client,
            tools: Arc::new(tools),
            system_prompt,
            max_iterations,
            tool_timeout: TOOL_TIMEOUT,
        }
    }

    /// Sets how long a single tool call may run.
    pub fn with_tool_timeout(mut self, tool_timeout: Duration) -> Self {
        self.tool_timeout = tool_timeout;
        self
    }

    /// Puts the tutor prompt at the start of the conversation, unless it is already there.
    fn with_system_prompt(&self, messages: Vec<ChatMessage>) -> Vec<ChatMessage> {
        let has_prompt = messages.first().map_or(false, |first| {
            first.role == Role::System
                && first.content.as_deref().map_or(false, |content| content.contains(PROMPT_MARKER))
        });
        if has_prompt {
            return messages;
        }

        let mut with_prompt = Vec::with_capacity(messages.len() + 1);
        with_prompt.push(ChatMessage::system(self.system_prompt.clone()));
        with_prompt.extend(messages);
        with_prompt
    }

    /// Answers the conversation, returning it with the new messages appended: the model's tool
    /// calls, their results, and finally the model's reply.
    pub async fn invoke(&self, messages: Vec<ChatMessage>) -> Result<Vec<ChatMessage>, AgentError> {
        if messages.is_empty() {
            return Err(AgentError::EmptyConversation);
        }

        let mut messages = self.with_system_prompt(messages);
        let schemas = self.tools.schemas();

        for iteration in 0..self.max_iterations {
            tracing::debug!("Agent iteration {}", iteration + 1);
            let response = self.client.chat(&messages, &schemas).await?;
            let tool_calls = response.requested_tools().to_vec();
            messages.push(response);

            if tool_calls.is_empty() {
                return Ok(messages);
            }

            for tool_call in tool_calls {
                tracing::info!(
                    tool = %tool_call.function.name,
                    args = %tool_call.function.arguments,
                    "calling tool",
                );
                let tools = Arc::clone(&self.tools);
                let name = tool_call.function.name.clone();
                let arguments = tool_call.function.arguments.clone();
                let output = run_blocking(self.tool_timeout, move || tools.execute(&name, &arguments))
                    .await
                    .unwrap_or_else(|err| {
                        tracing::warn!(tool = %tool_call.function.name, "tool call failed: {}", err);
                        format!("Error: `{}` {}", tool_call.function.name, err)
                    });
                messages.push(ChatMessage::tool(tool_call.id, output));
            }
        }

        Err(AgentError::MaxIterations(self.max_iterations))
    }

    /// Answers a single message from the student, returning the tutor's reply.
    pub async fn reply(&self, input: &str) -> Result<String, AgentError> {
        let messages = self.invoke(vec![ChatMessage::user(input)]).await?;
        Ok(messages.last()
            .and_then(|message| message.content.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::{collections::VecDeque, sync::Mutex};
    use crate::llm::{FunctionCall, ToolCall, ToolSchema};
    use super::*;

    /// Replies with a fixed script of messages, recording each conversation it is sent.
    struct ScriptedClient {
        replies: Mutex<VecDeque<ChatMessage>>,
        requests: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl ScriptedClient {
        fn new(replies: Vec<ChatMessage>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(VecDeque::from(replies)),
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ChatClient for ScriptedClient {
        async fn chat(&self, messages: &[ChatMessage], tools: &[ToolSchema]) -> Result<ChatMessage, AgentError> {
            assert_eq!(tools.len(), 4);
            self.requests.lock().unwrap().push(messages.to_vec());
            self.replies.lock().unwrap()
                .pop_front()
                .ok_or_else(|| AgentError::InvalidResponse("script exhausted".to_string()))
        }
    }

    fn tool_call(id: &str, name: &str, arguments: &str) -> ChatMessage {
        ChatMessage {
            role: Role::Assistant,
            content: None,
            tool_calls: Some(vec![ToolCall {
                id: id.to_string(),
                call_type: "function".to_string(),
                function: FunctionCall { name: name.to_string(), arguments: arguments.to_string() },
            }]),
            tool_call_id: None,
        }
    }

    #[tokio::test]
    async fn direct_reply() {
        let client = ScriptedClient::new(vec![ChatMessage::assistant("What do you notice first?")]);
        let agent = Agent::with_client(client.clone(), 8);

        let reply = agent.reply("Help me solve 2x + 5 = 13").await.unwrap();
        assert_eq!(reply, "What do you notice first?");

        let requests = client.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0][0].role, Role::System);
        assert!(requests[0][0].content.as_deref().unwrap().contains(PROMPT_MARKER));
        assert_eq!(requests[0][1], ChatMessage::user("Help me solve 2x + 5 = 13"));
    }

    #[tokio::test]
    async fn tool_results_are_fed_back() {
        let client = ScriptedClient::new(vec![
            tool_call("call_1", "solve_equation", r#"{"equation": "2x + 5 = 13"}"#),
            ChatMessage::assistant("What happens if you subtract 5 from both sides?"),
        ]);
        let agent = Agent::with_client(client.clone(), 8);

        let messages = agent.invoke(vec![ChatMessage::user("is x = 4 right?")]).await.unwrap();
        assert_eq!(messages.len(), 5);
        assert_eq!(messages[3], ChatMessage::tool("call_1", "x = 4"));
        assert_eq!(
            messages[4].content.as_deref(),
            Some("What happens if you subtract 5 from both sides?"),
        );

        // the second request carries the tool result
        let requests = client.requests.lock().unwrap();
        assert_eq!(requests[1].last(), Some(&ChatMessage::tool("call_1", "x = 4")));
    }

    #[tokio::test]
    async fn prompt_is_not_injected_twice() {
        let client = ScriptedClient::new(vec![ChatMessage::assistant("Great thinking!")]);
        let agent = Agent::with_client(client.clone(), 8);

        let conversation = vec![
            ChatMessage::system(format!("You are a {}.", PROMPT_MARKER)),
            ChatMessage::user("I got 56"),
        ];
        let messages = agent.invoke(conversation.clone()).await.unwrap();
        assert_eq!(&messages[..2], &conversation[..]);
    }

    #[tokio::test]
    async fn iterations_are_bounded() {
        let client = ScriptedClient::new(vec![
            tool_call("call_1", "calculate", r#"{"expression": "1 + 1"}"#),
            tool_call("call_2", "calculate", r#"{"expression": "2 + 2"}"#),
            ChatMessage::assistant("unreachable"),
        ]);
        let agent = Agent::with_client(client, 2);

        let err = agent.reply("loop").await.unwrap_err();
        assert!(matches!(err, AgentError::MaxIterations(2)));
    }

    #[tokio::test]
    async fn empty_conversation() {
        let agent = Agent::with_client(ScriptedClient::new(Vec::new()), 8);
        assert!(matches!(agent.invoke(Vec::new()).await, Err(AgentError::EmptyConversation)));
    }
}
