//! Simplification, expansion, and factoring of expressions.

use mentor_compute::symbolic::{
    expand,
    expand_with,
    factor,
    simplify::step::Step,
    simplify_with,
    SymExpr,
};
use mentor_error::Error;
use mentor_parser::parse_expr;
use crate::result::ToolResult;

fn parse(text: &str) -> Result<SymExpr, Error> {
    SymExpr::try_from(&parse_expr(text)?)
}

/// The forms an expression passes through while being simplified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simplified {
    /// The input in canonical order, before any rule is applied.
    pub original: String,

    /// The input with every product and integer power of a sum distributed.
    pub expanded: String,

    /// The simplest form of the input.
    pub simplified: String,

    /// The rewrite rules applied while expanding and simplifying, in the order they were first
    /// used.
    pub rules: Vec<Step>,
}

impl Simplified {
    /// The steps shown to the student. Empty if the input was already in simplest form.
    pub fn steps(&self) -> Vec<String> {
        let mut steps = Vec::new();
        if self.expanded != self.original {
            steps.push(format!("Expanded: {}", self.expanded));
        }
        if self.simplified != self.expanded {
            steps.push(format!("Simplified: {}", self.simplified));
        }
        steps
    }
}

/// Parses and simplifies the expression, keeping the intermediate forms.
pub fn simplify_expr(text: &str) -> Result<Simplified, Error> {
    let expr = parse(text)?;
    let mut applied = Vec::new();
    let expanded = expand_with(&expr, &mut applied).to_string();
    let simplified = simplify_with(&expr, &mut applied).to_string();

    let mut rules = Vec::new();
    for step in applied {
        if !rules.contains(&step) {
            rules.push(step);
        }
    }

    Ok(Simplified {
        original: expr.canonical().to_string(),
        expanded,
        simplified,
        rules,
    })
}

/// Simplifies an expression, such as `2x + 3x` or `(x^2 - 1)/(x - 1)`.
pub fn simplify_text(text: &str) -> ToolResult {
    match simplify_expr(text) {
        Ok(forms) => {
            let explanation = format!("Simplified {} to {}", text, forms.simplified);
            let steps = forms.steps();
            ToolResult::success(forms.simplified, explanation)
                .with_steps(steps, forms.original, forms.expanded)
        },
        Err(err) => ToolResult::from_error(&err, "expression", "simplifying"),
    }
}

/// Parses and expands the expression.
pub fn expand_expr(text: &str) -> Result<String, Error> {
    Ok(expand(&parse(text)?).to_string())
}

/// Parses and factors the expression.
pub fn factor_expr(text: &str) -> Result<String, Error> {
    Ok(factor(&parse(text)?).to_string())
}

/// Expands an expression, such as `(x + 1)^2`.
pub fn expand_text(text: &str) -> ToolResult {
    match expand_expr(text) {
        Ok(expanded) => {
            let explanation = format!("Expanded {} to {}", text, expanded);
            ToolResult::success(expanded, explanation)
        },
        Err(err) => ToolResult::from_error(&err, "expression", "expanding"),
    }
}

/// Factors an expression, such as `x^2 - 4`.
pub fn factor_text(text: &str) -> ToolResult {
    match factor_expr(text) {
        Ok(factored) => {
            let explanation = format!("Factored {} to {}", text, factored);
            ToolResult::success(factored, explanation)
        },
        Err(err) => ToolResult::from_error(&err, "expression", "factoring"),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn like_terms() {
        let result = simplify_text("2x + 3x");
        assert_eq!(result.result.as_deref(), Some("5*x"));
        assert_eq!(result.explanation, "Simplified 2x + 3x to 5*x");
        assert_eq!(result.extras.original.as_deref(), Some("2*x + 3*x"));
        assert_eq!(result.extras.steps, Some(vec!["Expanded: 5*x".to_string()]));
    }

    #[test]
    fn already_simplest() {
        let result = simplify_text("x + 1");
        assert_eq!(result.result.as_deref(), Some("x + 1"));
        assert_eq!(result.extras.steps, Some(Vec::new()));
    }

    #[test]
    fn expanded_then_simplified() {
        let result = simplify_text("(x + 1)^2");
        assert_eq!(result.result.as_deref(), Some("(x + 1)^2"));
        assert_eq!(result.extras.expanded.as_deref(), Some("x^2 + 2*x + 1"));
        assert_eq!(result.extras.steps, Some(vec![
            "Expanded: x^2 + 2*x + 1".to_string(),
            "Simplified: (x + 1)^2".to_string(),
        ]));
    }

    #[test]
    fn applied_rules() {
        let forms = simplify_expr("(x + 1)^2").unwrap();
        assert!(forms.rules.contains(&Step::ExpandPower));

        let forms = simplify_expr("0 + x*1").unwrap();
        assert!(forms.rules.contains(&Step::AddZero));
        assert!(forms.rules.contains(&Step::MultiplyOne));

        let forms = simplify_expr("x + 1").unwrap();
        assert_eq!(forms.rules, Vec::new());
    }

    #[test]
    fn simplification_is_idempotent() {
        for input in ["2x + 3x - 4", "(x^2 - 1)/(x - 1)", "sqrt(8) + sqrt(2)", "3(x + 2) - x", "x*x*y/x"] {
            let once = simplify_text(input).result.unwrap();
            let twice = simplify_text(&once).result.unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn expand_and_factor() {
        assert_eq!(expand_text("(x + 1)^2").result.as_deref(), Some("x^2 + 2*x + 1"));
        assert_eq!(expand_text("(x - 3)(x + 2)").explanation, "Expanded (x - 3)(x + 2) to x^2 - x - 6");
        assert_eq!(factor_text("x^2 - 4").result.as_deref(), Some("(x - 2)*(x + 2)"));
        assert_eq!(factor_text("2x^2 + 4x + 2").result.as_deref(), Some("2*(x + 1)^2"));
    }

    #[test]
    fn parse_failure() {
        for result in [simplify_text("(x + 1"), expand_text("x +"), factor_text("xyz")] {
            assert!(!result.success);
            assert_eq!(result.result, None);
            assert!(result.explanation.starts_with("Error parsing expression"));
        }
    }
}
