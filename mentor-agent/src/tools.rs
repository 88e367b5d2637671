//! The math tools offered to the model.

use mentor_tools::agent;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use crate::llm::{FunctionSchema, ToolSchema};

/// How long a tool call may run before it is abandoned.
pub const TOOL_TIMEOUT: Duration = Duration::from_secs(5);

/// Why a tool call running off the async workers produced no output.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolFailure {
    #[error("timed out after {} ms", .0.as_millis())]
    TimedOut(Duration),

    #[error("stopped unexpectedly: {0}")]
    Aborted(String),
}

/// Runs a CPU-bound tool call on the blocking thread pool, giving up after `limit`.
///
/// The call keeps running in the background after a timeout, but the caller is free to move on.
pub async fn run_blocking<T, F>(limit: Duration, f: F) -> Result<T, ToolFailure>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    match tokio::time::timeout(limit, tokio::task::spawn_blocking(f)).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(ToolFailure::Aborted(err.to_string())),
        Err(_) => Err(ToolFailure::TimedOut(limit)),
    }
}

/// A tool the model can call.
pub trait Tool: Send + Sync {
    /// The name the model calls the tool by.
    fn name(&self) -> &str;

    /// Tells the model what the tool is for.
    fn description(&self) -> &str;

    /// The JSON schema of the arguments.
    fn parameters_schema(&self) -> Value;

    /// Runs the tool. Failures are reported in the returned text.
    fn execute(&self, args: &Value) -> String;
}

/// Reads a string argument, or an empty string if it is missing.
fn str_arg<'a>(args: &'a Value, key: &str) -> &'a str {
    args[key].as_str().unwrap_or_default()
}

/// Evaluates expressions.
pub struct Calculate;

impl Tool for Calculate {
    fn name(&self) -> &str {
        "calculate"
    }

    fn description(&self) -> &str {
        "Evaluate a mathematical expression. Use this to verify a student's calculation, check \
        intermediate steps, or confirm a pattern after the student discovers it. Supports + - * / ^, \
        parentheses, sqrt, sin, cos, tan, log, exp, pi, and e."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "expression": {
                    "type": "string",
                    "description": "The expression to evaluate, such as '7 * 8' or 'sqrt(16)'"
                }
            },
            "required": ["expression"]
        })
    }

    fn execute(&self, args: &Value) -> String {
        agent::calculate(str_arg(args, "expression"))
    }
}

/// Solves equations and systems.
pub struct SolveEquation;

impl Tool for SolveEquation {
    fn name(&self) -> &str {
        "solve_equation"
    }

    fn description(&self) -> &str {
        "Solve an algebraic equation for a variable. Use this PRIVATELY to check whether a student's \
        answer is correct; never reveal the solution. Write 'expression = expression', or just \
        'expression' to mean '= 0'. Separate the equations of a system with commas, such as \
        'x + 3*y = 7, x - y = 1'."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "equation": {
                    "type": "string",
                    "description": "The equation, or comma-separated equations of a system"
                },
                "variable": {
                    "type": "string",
                    "description": "The unknown to solve for, or the unknowns of a system separated by commas, such as 'x,y'. Defaults to 'x', so name the unknowns of a system or of an equation without x."
                }
            },
            "required": ["equation"]
        })
    }

    fn execute(&self, args: &Value) -> String {
        agent::solve_equation(str_arg(args, "equation"), args["variable"].as_str())
    }
}

/// Simplifies expressions.
pub struct SimplifyExpression;

impl Tool for SimplifyExpression {
    fn name(&self) -> &str {
        "simplify_expression"
    }

    fn description(&self) -> &str {
        "Simplify a mathematical expression. Use this to check whether a student's simplified form \
        is correct."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "expression": {
                    "type": "string",
                    "description": "The expression to simplify, such as '2x + 3x'"
                }
            },
            "required": ["expression"]
        })
    }

    fn execute(&self, args: &Value) -> String {
        agent::simplify_expression(str_arg(args, "expression"))
    }
}

/// Looks up teaching hints.
pub struct GetHint;

impl Tool for GetHint {
    fn name(&self) -> &str {
        "get_hint"
    }

    fn description(&self) -> &str {
        "Get a teaching hint for a math topic. Use this when you need ideas for guiding a student \
        without giving away the answer. Topics: algebra, geometry, fractions, word-problems, \
        equations."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "topic": {
                    "type": "string",
                    "description": "The topic, such as 'fractions'"
                }
            },
            "required": ["topic"]
        })
    }

    fn execute(&self, args: &Value) -> String {
        agent::get_hint(str_arg(args, "topic"))
    }
}

/// The tools available to the model.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    /// Creates a registry with every math tool.
    pub fn new() -> Self {
        Self {
            tools: vec![
                Box::new(Calculate),
                Box::new(SolveEquation),
                Box::new(SimplifyExpression),
                Box::new(GetHint),
            ],
        }
    }

    /// The names of the tools, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|tool| tool.name()).collect()
    }

    /// The name and description of each tool.
    pub fn describe(&self) -> Vec<(&str, &str)> {
        self.tools.iter().map(|tool| (tool.name(), tool.description())).collect()
    }

    /// The schemas of the tools, to send to the model.
    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.tools.iter()
            .map(|tool| ToolSchema {
                schema_type: "function".to_string(),
                function: FunctionSchema {
                    name: tool.name().to_string(),
                    description: tool.description().to_string(),
                    parameters: tool.parameters_schema(),
                },
            })
            .collect()
    }

    /// Runs the named tool with JSON-encoded arguments.
    pub fn execute(&self, name: &str, arguments: &str) -> String {
        let Some(tool) = self.tools.iter().find(|tool| tool.name() == name) else {
            tracing::warn!(tool = name, "model called an unknown tool");
            return format!("Error: unknown tool `{}`; available tools: {}", name, self.names().join(", "));
        };

        let args = match serde_json::from_str::<Value>(arguments) {
            Ok(args) => args,
            Err(err) => return format!("Error: invalid arguments for `{}`: {}", name, err),
        };
        let output = tool.execute(&args);
        tracing::debug!(tool = name, %output, "tool finished");
        output
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn registry() {
        let registry = ToolRegistry::new();
        assert_eq!(registry.names(), vec!["calculate", "solve_equation", "simplify_expression", "get_hint"]);
        for schema in registry.schemas() {
            assert_eq!(schema.schema_type, "function");
            assert_eq!(schema.function.parameters["type"], "object");
            assert!(schema.function.parameters["required"].is_array());
        }
    }

    #[test]
    fn execute_tools() {
        let registry = ToolRegistry::new();
        assert_eq!(registry.execute("calculate", r#"{"expression": "7 * 8"}"#), "7 * 8 = 56");
        assert_eq!(registry.execute("solve_equation", r#"{"equation": "2*x + 5 = 13"}"#), "x = 4");
        assert_eq!(
            registry.execute("solve_equation", r#"{"equation": "t^2 = 9", "variable": "t"}"#),
            "t = -3, t = 3",
        );
        assert!(registry
            .execute("solve_equation", r#"{"equation": "t^2 = 9"}"#)
            .contains("`x` does not appear in `t^2 = 9`"));
        assert_eq!(
            registry.execute("solve_equation", r#"{"equation": "x + y = 10, x - y = 2", "variable": "x,y"}"#),
            "x = 6, y = 4",
        );
        assert_eq!(
            registry.execute("simplify_expression", r#"{"expression": "2x + 3x"}"#),
            "2x + 3x simplifies to: 5*x",
        );
        assert!(registry.execute("get_hint", r#"{"topic": "geometry"}"#).contains("draw"));
    }

    #[tokio::test]
    async fn blocking_calls() {
        let output = run_blocking(TOOL_TIMEOUT, || ToolRegistry::new().execute("calculate", r#"{"expression": "7 * 8"}"#)).await;
        assert_eq!(output, Ok("7 * 8 = 56".to_string()));

        let limit = Duration::from_millis(20);
        let slow = run_blocking(limit, || std::thread::sleep(Duration::from_millis(300))).await;
        assert_eq!(slow, Err(ToolFailure::TimedOut(limit)));
        assert_eq!(ToolFailure::TimedOut(limit).to_string(), "timed out after 20 ms");

        let panicked = run_blocking(TOOL_TIMEOUT, || -> String { panic!("tool bug") }).await;
        assert!(matches!(panicked, Err(ToolFailure::Aborted(_))));
    }

    #[test]
    fn bad_calls() {
        let registry = ToolRegistry::new();
        assert!(registry.execute("integrate", "{}").starts_with("Error: unknown tool `integrate`"));
        assert!(registry.execute("calculate", "not json").starts_with("Error: invalid arguments"));
        assert!(registry.execute("calculate", "{}").starts_with("Could not calculate ''"));
    }
}
