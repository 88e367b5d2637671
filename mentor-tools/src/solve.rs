//! Equation solving.

use mentor_compute::solve::solve as solve_input;
use crate::result::ToolResult;

/// Solves an equation, or a comma-separated system of equations.
///
/// `variable_hint` names the unknown of a single equation, or the unknowns of a system separated
/// by commas or whitespace. Without a hint, the unknown is detected from the equation. A blank
/// hint counts as no hint.
pub fn solve(text: &str, variable_hint: Option<&str>) -> ToolResult {
    let hint = variable_hint.filter(|hint| !hint.trim().is_empty());
    match solve_input(text, hint) {
        Ok(solution) => {
            let result = solution.to_string();
            let explanation = format!("Solved {}: {}", text.trim(), result);
            ToolResult::success(result, explanation)
                .with_solutions(solution.solutions(), solution.variables())
        },
        Err(err) => {
            let text = text.trim();
            ToolResult::from_error(
                &err,
                &format!("equation `{}`", text),
                &format!("solving equation `{}`", text),
            )
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn single_equation() {
        let result = solve("2*x + 5 = 13", None);
        assert!(result.success);
        assert_eq!(result.result.as_deref(), Some("x = 4"));
        assert_eq!(result.explanation, "Solved 2*x + 5 = 13: x = 4");
        assert_eq!(result.extras.solutions, Some(vec!["4".to_string()]));
        assert_eq!(result.extras.variables, Some(vec!["x".to_string()]));
    }

    #[test]
    fn several_roots_in_ascending_order() {
        let result = solve("x^2 - 4 = 0", None);
        assert_eq!(result.result.as_deref(), Some("x = -2, x = 2"));
        assert_eq!(result.extras.solutions, Some(vec!["-2".to_string(), "2".to_string()]));
    }

    #[test]
    fn no_solution_is_a_success() {
        let result = solve("x^2 + 1 = 0", None);
        assert!(result.success);
        assert_eq!(result.result.as_deref(), Some("No solution found"));
        assert_eq!(result.extras.solutions, Some(Vec::new()));
    }

    #[test]
    fn blank_hint_is_ignored() {
        assert_eq!(solve("3y = 12", Some(" ")).result.as_deref(), Some("y = 4"));
    }

    #[test]
    fn system() {
        let result = solve("x + 3*y = 7, x - y = 1", Some("x,y"));
        assert_eq!(result.result.as_deref(), Some("x = 5/2, y = 3/2"));
        assert_eq!(result.extras.variables, Some(vec!["x".to_string(), "y".to_string()]));
    }

    #[test]
    fn failure_names_the_equation() {
        let result = solve("x^5 + x + 3 = 0", None);
        assert!(!result.success);
        assert_eq!(result.result, None);
        assert!(result.error.unwrap().starts_with("SolveError"));
        assert!(result.explanation.contains("x^5 + x + 3 = 0"));

        let result = solve("2x + = 4", None);
        assert!(!result.success);
        assert!(result.explanation.contains("2x + = 4"));
    }
}
