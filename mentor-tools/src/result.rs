//! The [`ToolResult`] record returned by every toolkit operation.

use mentor_error::{Error, ErrorCategory};
use serde::{Deserialize, Serialize};

/// Fields that only some operations fill in. Absent fields are left out of the serialized record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extras {
    /// Each solution of an equation, without the variable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solutions: Option<Vec<String>>,

    /// The unknowns that were solved for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Vec<String>>,

    /// The intermediate forms shown while simplifying. Empty if the input was already in simplest
    /// form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<String>>,

    /// The input, in canonical form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,

    /// The input, fully expanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded: Option<String>,

    /// Every hint that applies to the problem, most relevant first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_hints: Option<Vec<String>>,

    /// Comments on a student's worked example.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Vec<String>>,
}

/// The outcome of a toolkit operation.
///
/// A failed operation never carries a result, and the explanation is always filled in so the
/// tutor has something to say either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Whether the operation succeeded.
    pub success: bool,

    /// The primary result, such as `x = 4`.
    pub result: Option<String>,

    /// A sentence describing what was done.
    pub explanation: String,

    /// A one-line diagnostic, such as `ParseError: unclosed parenthesis`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Per-operation fields.
    #[serde(flatten)]
    pub extras: Extras,
}

impl ToolResult {
    /// Creates a successful result.
    pub fn success(result: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            success: true,
            result: Some(result.into()),
            explanation: explanation.into(),
            error: None,
            extras: Extras::default(),
        }
    }

    /// Creates a failed result with the given diagnostic.
    pub fn failure(error: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            explanation: explanation.into(),
            error: Some(error.into()),
            extras: Extras::default(),
        }
    }

    /// Creates a failed result from an error raised while working on `action`.
    ///
    /// Parse errors are explained as such, since they almost always mean the input has a typo;
    /// other errors are explained in terms of the action, such as `Error solving equation`.
    pub fn from_error(err: &Error, subject: &str, action: &str) -> Self {
        let explanation = match err.category() {
            ErrorCategory::Parse | ErrorCategory::Unsupported => {
                format!("Error parsing {}: {}", subject, err.message())
            },
            ErrorCategory::Solve | ErrorCategory::Eval => {
                format!("Error {}: {}", action, err.message())
            },
        };
        Self::failure(err.to_string(), explanation)
    }

    /// Sets the solutions and variables of an equation.
    pub fn with_solutions(mut self, solutions: Vec<String>, variables: Vec<String>) -> Self {
        self.extras.solutions = Some(solutions);
        self.extras.variables = Some(variables);
        self
    }

    /// Sets the simplification steps and the forms they were computed from.
    pub fn with_steps(mut self, steps: Vec<String>, original: String, expanded: String) -> Self {
        self.extras.steps = Some(steps);
        self.extras.original = Some(original);
        self.extras.expanded = Some(expanded);
        self
    }

    /// Sets every hint that applies.
    pub fn with_hints(mut self, hints: Vec<String>) -> Self {
        self.extras.all_hints = Some(hints);
        self
    }

    /// Sets the feedback on a worked example.
    pub fn with_feedback(mut self, feedback: Vec<String>) -> Self {
        self.extras.feedback = Some(feedback);
        self
    }

    /// Returns the result, or the error if the operation failed.
    pub fn text(&self) -> &str {
        self.result.as_deref()
            .or(self.error.as_deref())
            .unwrap_or(&self.explanation)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use super::*;

    #[test]
    fn absent_extras_are_not_serialized() {
        let result = ToolResult::success("14", "Calculated: 2 + 3 * 4 = 14");
        assert_eq!(serde_json::to_value(&result).unwrap(), json!({
            "success": true,
            "result": "14",
            "explanation": "Calculated: 2 + 3 * 4 = 14",
        }));
    }

    #[test]
    fn extras_are_flattened() {
        let result = ToolResult::success("x = 4", "Solved 2x + 5 = 13: x = 4")
            .with_solutions(vec!["4".to_string()], vec!["x".to_string()]);
        assert_eq!(serde_json::to_value(&result).unwrap(), json!({
            "success": true,
            "result": "x = 4",
            "explanation": "Solved 2x + 5 = 13: x = 4",
            "solutions": ["4"],
            "variables": ["x"],
        }));
    }

    #[test]
    fn failure_has_no_result() {
        let result = ToolResult::failure("ParseError: unexpected end of input", "Error parsing expression");
        assert!(!result.success);
        assert_eq!(result.result, None);
        assert_eq!(result.text(), "ParseError: unexpected end of input");
        assert_eq!(serde_json::to_value(&result).unwrap()["result"], json!(null));
    }
}
