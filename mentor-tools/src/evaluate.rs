//! Arithmetic evaluation.

use mentor_compute::{numerical::{eval, format_sig}, symbolic::{simplify, SymExpr}};
use mentor_error::Error;
use mentor_parser::parse_expr;
use crate::result::ToolResult;

/// The number of significant digits in a calculated value.
pub const SIGNIFICANT_DIGITS: usize = 15;

/// The value of an expression: a number, or the simplified expression if it contains variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluated {
    Number(String),
    Symbolic(String),
}

/// Parses and evaluates the expression.
pub fn evaluate_expr(text: &str) -> Result<Evaluated, Error> {
    let expr = SymExpr::try_from(&parse_expr(text)?)?;
    if expr.is_constant() {
        let value = eval(&expr, 0..text.len())?;
        Ok(Evaluated::Number(format_sig(&value, SIGNIFICANT_DIGITS)))
    } else {
        Ok(Evaluated::Symbolic(simplify(&expr).to_string()))
    }
}

/// Evaluates an expression, such as `2 + 3 * 4` or `sqrt(16)`.
///
/// Expressions without variables are reduced to a number with up to 15 significant digits.
/// Expressions with variables are simplified instead.
pub fn evaluate(text: &str) -> ToolResult {
    match evaluate_expr(text) {
        Ok(Evaluated::Number(value)) => {
            let explanation = format!("Calculated: {} = {}", text, value);
            ToolResult::success(value, explanation)
        },
        Ok(Evaluated::Symbolic(expr)) => {
            let explanation = format!("Expression: {} = {}", text, expr);
            ToolResult::success(expr, explanation)
        },
        Err(err) => ToolResult::from_error(&err, "expression", "calculating"),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn value(text: &str) -> String {
        evaluate(text).result.unwrap()
    }

    #[test]
    fn arithmetic() {
        assert_eq!(value("2 + 3 * 4"), "14");
        assert_eq!(value("(2 + 3) * 4"), "20");
        assert_eq!(value("2^10"), "1024");
        assert_eq!(value("1/2"), "0.5");
        assert_eq!(value("7 ÷ 2"), "3.5");
        assert_eq!(value("-3 + 1"), "-2");
    }

    #[test]
    fn functions_and_constants() {
        assert_eq!(value("sqrt(16)"), "4");
        assert_eq!(value("pi"), "3.14159265358979");
        assert_eq!(value("sin(0)"), "0");
        assert_eq!(value("log(e)"), "1");
        assert_eq!(value("sqrt(2)"), "1.4142135623731");
    }

    #[test]
    fn explanation() {
        let result = evaluate("2 + 3 * 4");
        assert!(result.success);
        assert_eq!(result.explanation, "Calculated: 2 + 3 * 4 = 14");
    }

    #[test]
    fn variables_are_simplified() {
        let result = evaluate("x + x");
        assert!(result.success);
        assert_eq!(result.result.as_deref(), Some("2*x"));
        assert_eq!(result.explanation, "Expression: x + x = 2*x");
    }

    #[test]
    fn malformed_input() {
        for input in ["", "(2 + 3", "2 +* 3", "foo + 1", "2 $ 3"] {
            let result = evaluate(input);
            assert!(!result.success, "{:?} should fail", input);
            assert_eq!(result.result, None);
            assert!(!result.error.unwrap().is_empty());
            assert!(result.explanation.starts_with("Error parsing expression"));
        }
    }

    #[test]
    fn undefined_values() {
        for input in ["1/0", "ln(-1)", "sqrt(-4)"] {
            let result = evaluate(input);
            assert!(!result.success, "{:?} should fail", input);
            assert!(result.error.unwrap().starts_with("EvalError"));
            assert!(result.explanation.starts_with("Error calculating"));
        }
    }
}
