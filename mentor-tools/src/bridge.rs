//! The toolkit as a host application sees it: named methods taking JSON arguments and returning
//! a [`ToolResult`] record.

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;
use crate::{
    evaluate::evaluate,
    hint::hint,
    result::ToolResult,
    solve::solve,
    transform::{expand_text, factor_text, simplify_text},
    verify::verify_worked_example,
};

/// The names of the methods that [`dispatch`] accepts.
pub const METHODS: [&str; 7] = [
    "calculate",
    "solve_equation",
    "simplify_expression",
    "expand_expression",
    "factor_expression",
    "get_hint",
    "verify_worked_example",
];

/// A call to one of the bridge methods, with its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "method", content = "args", rename_all = "snake_case")]
pub enum Request {
    Calculate {
        #[serde(alias = "expression")]
        expr: String,
    },
    SolveEquation {
        #[serde(alias = "equation_str")]
        equation: String,
        #[serde(default)]
        variable: Option<String>,
    },
    SimplifyExpression {
        #[serde(alias = "expression")]
        expr: String,
    },
    ExpandExpression {
        #[serde(alias = "expression")]
        expr: String,
    },
    FactorExpression {
        #[serde(alias = "expression")]
        expr: String,
    },
    GetHint {
        problem: String,
        #[serde(default)]
        last_attempt: Option<String>,
    },
    VerifyWorkedExample {
        problem: String,
        student_work: String,
    },
}

impl Request {
    /// Runs the request.
    pub fn run(&self) -> ToolResult {
        match self {
            Self::Calculate { expr } => calculate(expr),
            Self::SolveEquation { equation, variable } => solve_equation(equation, variable.as_deref()),
            Self::SimplifyExpression { expr } => simplify_expression(expr),
            Self::ExpandExpression { expr } => expand_expression(expr),
            Self::FactorExpression { expr } => factor_expression(expr),
            Self::GetHint { problem, last_attempt } => get_hint(problem, last_attempt.as_deref()),
            Self::VerifyWorkedExample { problem, student_work } => {
                verify_worked_example(problem, student_work)
            },
        }
    }
}

/// Evaluates a numeric expression.
pub fn calculate(expr: &str) -> ToolResult {
    evaluate(expr)
}

/// Solves an equation or a system of equations.
pub fn solve_equation(equation: &str, variable: Option<&str>) -> ToolResult {
    solve(equation, variable)
}

/// Simplifies an expression, listing the steps taken.
pub fn simplify_expression(expr: &str) -> ToolResult {
    simplify_text(expr)
}

/// Expands an expression.
pub fn expand_expression(expr: &str) -> ToolResult {
    expand_text(expr)
}

/// Factors an expression.
pub fn factor_expression(expr: &str) -> ToolResult {
    factor_text(expr)
}

/// Returns a Socratic hint for a problem.
pub fn get_hint(problem: &str, last_attempt: Option<&str>) -> ToolResult {
    hint(problem, last_attempt)
}

/// Calls a bridge method by name. Unknown methods and malformed arguments produce a failed
/// [`ToolResult`].
pub fn dispatch(method: &str, args: Value) -> ToolResult {
    debug!(method, "dispatching bridge call");
    if !METHODS.contains(&method) {
        return ToolResult::failure(
            format!("unknown method `{}`", method),
            format!("Unknown method `{}`; expected one of: {}", method, METHODS.join(", ")),
        );
    }

    match serde_json::from_value::<Request>(json!({ "method": method, "args": args })) {
        Ok(request) => request.run(),
        Err(err) => ToolResult::failure(
            err.to_string(),
            format!("Invalid arguments for `{}`: {}", method, err),
        ),
    }
}

/// Handles a JSON-encoded call of the form `{"method": "...", "args": {...}}`, returning the
/// JSON-encoded [`ToolResult`].
pub fn call_json(input: &str) -> String {
    #[derive(Deserialize)]
    struct Call {
        method: String,
        #[serde(default)]
        args: Value,
    }

    let result = match serde_json::from_str::<Call>(input) {
        Ok(call) => dispatch(&call.method, call.args),
        Err(err) => ToolResult::failure(err.to_string(), format!("Invalid bridge call: {}", err)),
    };
    serde_json::to_string(&result).unwrap_or_else(|err| {
        json!({ "success": false, "result": null, "explanation": "Error encoding result", "error": err.to_string() })
            .to_string()
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn dispatch_by_name() {
        let result = dispatch("calculate", json!({ "expr": "2 + 3 * 4" }));
        assert_eq!(result.result.as_deref(), Some("14"));

        let result = dispatch("solve_equation", json!({ "equation": "x + 3*y = 7, x - y = 1", "variable": "x,y" }));
        assert_eq!(result.result.as_deref(), Some("x = 5/2, y = 3/2"));

        let result = dispatch("factor_expression", json!({ "expression": "x^2 - 4" }));
        assert_eq!(result.result.as_deref(), Some("(x - 2)*(x + 2)"));

        let result = dispatch("get_hint", json!({ "problem": "what is 3 + 4" }));
        assert_eq!(result.result.as_deref(), Some("Try combining like terms first."));
    }

    #[test]
    fn optional_arguments() {
        let result = dispatch("solve_equation", json!({ "equation": "2*x + 5 = 13", "variable": null }));
        assert_eq!(result.result.as_deref(), Some("x = 4"));
    }

    #[test]
    fn unknown_method() {
        let result = dispatch("integrate", json!({ "expr": "x" }));
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("unknown method `integrate`"));
    }

    #[test]
    fn missing_argument() {
        let result = dispatch("verify_worked_example", json!({ "problem": "2x=10" }));
        assert!(!result.success);
        assert!(result.error.unwrap().contains("student_work"));
    }

    #[test]
    fn json_round_trip() {
        let output = call_json(r#"{"method": "expand_expression", "args": {"expr": "(x + 1)^2"}}"#);
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["result"], json!("x^2 + 2*x + 1"));
        assert_eq!(value["explanation"], json!("Expanded (x + 1)^2 to x^2 + 2*x + 1"));

        let output = call_json("not json");
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["success"], json!(false));
    }
}
