//! The toolkit as the tutor's language model sees it: each tool takes text and returns one
//! sentence of text, with failures folded into the sentence.

use crate::{
    evaluate::evaluate,
    hint::topic_hint,
    solve::solve,
    transform::simplify_text,
};

/// Evaluates an expression, giving `2 + 3 = 5`.
pub fn calculate(expression: &str) -> String {
    let result = evaluate(expression);
    match (&result.result, &result.error) {
        (Some(value), _) => format!("{} = {}", expression, value),
        (None, error) => format!(
            "Could not calculate '{}': {}",
            expression,
            error.as_deref().unwrap_or(&result.explanation),
        ),
    }
}

/// The unknown the tutor's `solve_equation` solves for when it is not told one.
pub const DEFAULT_VARIABLE: &str = "x";

/// Solves an equation or a system of equations for the given unknowns, giving `x = 4`. If no
/// variable is given, the equation is solved for `x`.
pub fn solve_equation(equation: &str, variable: Option<&str>) -> String {
    let result = solve(equation, Some(variable.unwrap_or(DEFAULT_VARIABLE)));
    match (&result.result, &result.error) {
        (Some(solution), _) => solution.clone(),
        (None, error) => format!(
            "Could not solve equation: {}",
            error.as_deref().unwrap_or(&result.explanation),
        ),
    }
}

/// Simplifies an expression, giving `2x + 3x simplifies to: 5*x`.
pub fn simplify_expression(expression: &str) -> String {
    let result = simplify_text(expression);
    match (&result.result, &result.error) {
        (Some(simplified), _) => format!("{} simplifies to: {}", expression, simplified),
        (None, error) => format!(
            "Could not simplify: {}",
            error.as_deref().unwrap_or(&result.explanation),
        ),
    }
}

/// Returns a teaching hint for a topic, such as `fractions`.
pub fn get_hint(topic: &str) -> String {
    topic_hint(topic).to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn calculate_strings() {
        assert_eq!(calculate("2 + 3 * 4"), "2 + 3 * 4 = 14");
        let failed = calculate("2 +");
        assert!(failed.starts_with("Could not calculate '2 +': ParseError"), "{}", failed);
    }

    #[test]
    fn solve_strings() {
        assert_eq!(solve_equation("2*x + 5 = 13", Some("x")), "x = 4");
        assert_eq!(solve_equation("x + 3*y = 7, x - y = 1", Some("x, y")), "x = 5/2, y = 3/2");
        assert_eq!(solve_equation("t^2 = 9", Some("t")), "t = -3, t = 3");
        assert!(solve_equation("x^5 + x + 3", None).starts_with("Could not solve equation: SolveError"));
    }

    #[test]
    fn solves_for_x_by_default() {
        assert_eq!(solve_equation("x^2 - 4 = 0", None), "x = -2, x = 2");
        assert_eq!(solve_equation("a*x + b = 0", None), "x = -b/a");

        let failed = solve_equation("t^2 = 9", None);
        assert!(failed.starts_with("Could not solve equation: SolveError"), "{}", failed);
        assert!(failed.contains("`x` does not appear in `t^2 = 9`"), "{}", failed);
    }

    #[test]
    fn simplify_strings() {
        assert_eq!(simplify_expression("2x + 3x"), "2x + 3x simplifies to: 5*x");
        assert!(simplify_expression("(x").starts_with("Could not simplify: ParseError"));
    }

    #[test]
    fn topic_hints() {
        assert!(get_hint("equations").contains("isolate the variable"));
        assert!(get_hint("trigonometry").starts_with("Ask: 'What do you understand"));
    }
}
