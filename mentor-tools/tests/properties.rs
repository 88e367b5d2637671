use mentor_tools::{
    bridge::{dispatch, METHODS},
    evaluate::evaluate,
    hint::hint,
    solve::solve,
    transform::{expand_text, factor_text, simplify_text},
    verify::verify_worked_example,
    ToolResult,
};
use pretty_assertions::assert_eq;
use serde_json::json;

/// Checks the invariants every tool result must hold.
fn assert_well_formed(result: &ToolResult) {
    assert!(!result.explanation.is_empty(), "empty explanation: {:?}", result);
    if !result.success {
        assert_eq!(result.result, None);
        assert!(result.error.as_deref().map_or(false, |error| !error.is_empty()));
    }
}

#[test]
fn evaluation() {
    assert_eq!(evaluate("2 + 3 * 4").result.as_deref(), Some("14"));
    assert_eq!(evaluate("sqrt(16)").result.as_deref(), Some("4"));
}

#[test]
fn malformed_input_fails_cleanly() {
    for input in ["(2 + 3", "2 + 3)", "blah(4)", "sqr(4)", "", "   ", "2 = 3 = 4", "x y z +"] {
        let result = evaluate(input);
        assert!(!result.success, "{:?} should fail", input);
        assert_well_formed(&result);
    }
}

#[test]
fn malformed_equations_fail_cleanly() {
    let inputs = [
        "(x + 1 = 2",
        "x + 1) = 2",
        "foo(x) = 1",
        "blah + x = 2",
        "x + 3*y = 7, (x - y = 1",
        "2x + = 4",
        "",
    ];
    for input in inputs {
        let result = solve(input, None);
        assert!(!result.success, "{:?} should fail", input);
        assert_well_formed(&result);

        let result = solve(input, Some("x, y"));
        assert!(!result.success, "{:?} should fail with unknowns given", input);
        assert_well_formed(&result);
    }
}

#[test]
fn solving() {
    assert_eq!(solve("2*x + 5 = 13", None).result.as_deref(), Some("x = 4"));
    assert_eq!(solve("x^2 - 4 = 0", None).result.as_deref(), Some("x = -2, x = 2"));
    assert_eq!(
        solve("x + 3*y = 7, x - y = 1", Some("x,y")).result.as_deref(),
        Some("x = 5/2, y = 3/2"),
    );
}

#[test]
fn missing_equals_means_zero() {
    assert_eq!(solve("x^2 - 9", None).result, solve("x^2 - 9 = 0", None).result);
}

#[test]
fn simplification_is_idempotent() {
    let inputs = [
        "2x + 3x",
        "(x + 1)^2",
        "x^2 - 2x + 1 - (x - 1)^2",
        "(x^2 - 4)/(x + 2)",
        "sqrt(12)",
        "1/sqrt(2)",
        "4(x + 1) - 2(x - 3)",
        "x/2 + x/3",
        "a*b*a",
        "log(exp(2x))",
    ];
    for input in inputs {
        let once = simplify_text(input);
        assert!(once.success, "{:?} failed: {:?}", input, once);
        let once = once.result.unwrap();
        let twice = simplify_text(&once).result.unwrap();
        assert_eq!(once, twice, "simplifying {:?}", input);
    }
}

#[test]
fn expansion_is_idempotent() {
    for input in ["(x + 1)^3", "(x - 2)(x + 5)", "3(a + b)"] {
        let once = expand_text(input).result.unwrap();
        assert_eq!(expand_text(&once).result.unwrap(), once);
    }
}

#[test]
fn factoring() {
    assert_eq!(factor_text("x^2 - 4").result.as_deref(), Some("(x - 2)*(x + 2)"));
}

#[test]
fn hints() {
    assert_eq!(hint("2x + 5 = 13", None).result.as_deref(), Some("What's the goal when solving an equation?"));
    assert_eq!(hint("what is 3 + 4", None).result.as_deref(), Some("Try combining like terms first."));
}

#[test]
fn worked_example() {
    let result = verify_worked_example("2x=10", "x = 5");
    let feedback = result.extras.feedback.unwrap();
    assert!(feedback.iter().any(|line| line.contains("Final answer found")));
    assert!(feedback.iter().any(|line| line == "✓ x = 5 satisfies 2x=10"));
}

#[test]
fn every_bridge_method_is_dispatched() {
    let args = json!({
        "expr": "x + x",
        "equation": "x + x = 4",
        "problem": "x + x = 4",
        "student_work": "x = 2",
    });
    for method in METHODS {
        let result = dispatch(method, args.clone());
        assert!(result.success, "{} failed: {:?}", method, result);
        assert_well_formed(&result);
    }
}
