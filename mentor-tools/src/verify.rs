//! Review of a student's worked example.

use mentor_compute::{solve::satisfies, symbolic::SymExpr};
use mentor_parser::parse_expr;
use crate::{evaluate::evaluate, result::ToolResult};

/// Splits a line such as `x = 5` into the variable and the value assigned to it.
fn assignment(line: &str) -> Option<(&str, SymExpr)> {
    let (name, value) = line.split_once('=')?;
    let name = name.trim();
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() && c != 'e' => (),
        _ => return None,
    }

    let value = SymExpr::try_from(&parse_expr(value).ok()?).ok()?;
    Some((name, value))
}

/// Checks the final answer of a worked example against the problem, if both are in a form that
/// can be checked.
fn consistency(problem: &str, line: &str) -> Option<String> {
    if !problem.contains('=') {
        return None;
    }

    let (name, value) = assignment(line)?;
    match satisfies(problem, name, &value)? {
        true => Some(format!("✓ {} satisfies {}", line, problem.trim())),
        false => Some(format!("✗ {} does not satisfy {}; re-check your steps", line, problem.trim())),
    }
}

/// Returns the feedback on a worked example, one comment per entry.
pub fn review(problem: &str, student_work: &str) -> Vec<String> {
    let Some(last_line) = student_work.lines().map(str::trim).rev().find(|line| !line.is_empty()) else {
        return Vec::new();
    };

    let mut feedback = Vec::new();
    let answer = last_line.split('=').nth(1).map(str::trim);
    match answer.map(evaluate) {
        Some(result) if result.success => feedback.push(String::from("✓ Final answer found")),
        _ => feedback.push(String::from("Check your final calculation")),
    }
    feedback.extend(consistency(problem, last_line));
    feedback
}

/// Reviews a student's worked example, one step per line. The final line is checked: its answer
/// must evaluate, and if the problem is an equation, the answer must satisfy it.
pub fn verify_worked_example(problem: &str, student_work: &str) -> ToolResult {
    ToolResult::success("Verified", "Worked example reviewed")
        .with_feedback(review(problem, student_work))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn correct_answer() {
        let result = verify_worked_example("2x=10", "2x = 10\nx = 10/2\nx = 5");
        assert!(result.success);
        assert_eq!(result.result.as_deref(), Some("Verified"));
        assert_eq!(result.extras.feedback, Some(vec![
            "✓ Final answer found".to_string(),
            "✓ x = 5 satisfies 2x=10".to_string(),
        ]));
    }

    #[test]
    fn wrong_answer() {
        assert_eq!(review("2x + 5 = 13", "x = 9"), vec![
            "✓ Final answer found",
            "✗ x = 9 does not satisfy 2x + 5 = 13; re-check your steps",
        ]);
    }

    #[test]
    fn irrational_answer() {
        assert_eq!(review("x^2 = 2", "x = sqrt(2)"), vec![
            "✓ Final answer found",
            "✓ x = sqrt(2) satisfies x^2 = 2",
        ]);
    }

    #[test]
    fn unevaluable_answer() {
        assert_eq!(review("2x = 10", "x = 5 +"), vec!["Check your final calculation"]);
    }

    #[test]
    fn no_equals_sign() {
        assert_eq!(review("3 + 4", "7"), vec!["Check your final calculation"]);
    }

    #[test]
    fn trailing_blank_lines_are_skipped() {
        assert_eq!(review("3 + 4", "3 + 4 = 7\n\n   \n"), vec!["✓ Final answer found"]);
    }

    #[test]
    fn empty_work() {
        assert_eq!(review("3 + 4", ""), Vec::<String>::new());
    }
}
