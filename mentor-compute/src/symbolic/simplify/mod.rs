//! Module to simplify expressions.
//!
//! This module provides the [`simplify`] function, which rewrites an expression into a simpler,
//! canonical form. It does this by repeatedly applying rewriting rules to every node of the
//! expression in multiple passes, until no more rules apply.
//!
//! Each pass simplifies the children of a node before the node itself, so rules can assume that
//! the terms or factors they look at are already simplified and in canonical order.

pub mod rules;
pub mod step;

use crate::symbolic::{expr::{Primary, SymExpr}, step_collector::StepCollector};
use step::Step;

/// The signature of a set of rules, such as [`rules::all`].
pub(crate) type Rules = fn(&SymExpr, &mut dyn StepCollector<Step>) -> Option<SymExpr>;

/// The maximum number of passes over the whole expression.
const MAX_PASSES: usize = 64;

/// The maximum number of rule applications at a single node in a single pass.
const MAX_RULES_PER_NODE: usize = 256;

/// Simplifies the children of the expression, then applies the rules to the expression itself.
///
/// Returns the new expression, and whether any rule was applied.
fn simplify_pass(
    expr: &SymExpr,
    rules: Rules,
    step_collector: &mut dyn StepCollector<Step>,
) -> (SymExpr, bool) {
    let mut changed = false;
    let mut pass = |expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>| {
        let (expr, changed_child) = simplify_pass(expr, rules, step_collector);
        // use |= instead of = to not reset this variable to false if already true
        changed |= changed_child;
        expr
    };

    let mut expr = match expr {
        SymExpr::Primary(Primary::Call(func, arg)) => {
            SymExpr::call(*func, pass(arg, step_collector))
        },
        SymExpr::Primary(primary) => SymExpr::Primary(primary.clone()),
        SymExpr::Add(terms) => SymExpr::Add(
            terms.iter().map(|term| pass(term, step_collector)).collect(),
        ),
        SymExpr::Mul(factors) => SymExpr::Mul(
            factors.iter().map(|factor| pass(factor, step_collector)).collect(),
        ),
        SymExpr::Exp(lhs, rhs) => {
            let lhs = pass(lhs, step_collector);
            let rhs = pass(rhs, step_collector);
            SymExpr::pow(lhs, rhs)
        },
    };
    if matches!(&expr, SymExpr::Add(exprs) | SymExpr::Mul(exprs) if exprs.len() < 2) {
        expr = expr.downgrade();
        changed = true;
    }
    expr = expr.sort_shallow();

    for _ in 0..MAX_RULES_PER_NODE {
        match rules(&expr, step_collector) {
            Some(new_expr) => {
                expr = new_expr.sort_shallow();
                changed = true;
            },
            None => break,
        }
    }

    (expr, changed)
}

/// Base implementation of the simplification algorithm, with the given set of rules.
pub(crate) fn inner_simplify_with(
    expr: &SymExpr,
    rules: Rules,
    step_collector: &mut dyn StepCollector<Step>,
) -> SymExpr {
    let mut expr = expr.clone().canonical();
    for _ in 0..MAX_PASSES {
        let (new_expr, changed) = simplify_pass(&expr, rules, step_collector);
        expr = new_expr;
        if !changed {
            break;
        }
    }
    expr
}

/// Simplifies the given expression.
pub fn simplify(expr: &SymExpr) -> SymExpr {
    inner_simplify_with(expr, rules::all, &mut ())
}

/// Simplifies the given expression, reporting every rule applied to the given step collector.
pub fn simplify_with(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> SymExpr {
    inner_simplify_with(expr, rules::all, step_collector)
}

#[cfg(test)]
mod tests {
    use mentor_parser::parse_expr;
    use pretty_assertions::assert_eq;
    use super::*;

    fn simplified(input: &str) -> String {
        let expr = SymExpr::try_from(&parse_expr(input).unwrap()).unwrap();
        simplify(&expr).to_string()
    }

    #[test]
    fn add_rules() {
        assert_eq!(simplified("0 + 0*(3x + 5b^2) + 0 + 3a"), "3*a");
        assert_eq!(simplified("x + x + x"), "3*x");
        assert_eq!(simplified("x/2 + x/2"), "x");
    }

    #[test]
    fn multiply_rules() {
        assert_eq!(simplified("0*(3x + 5b^2)*1*3a"), "0");
        assert_eq!(simplified("1*3*1*(1 + (x^2 + 5x + 6)*0)*1"), "3");
        assert_eq!(simplified("a * b * a^3 * b^4"), "a^4*b^5");
    }

    #[test]
    fn numbers_stay_exact() {
        assert_eq!(simplified("1/3 + 1/6"), "1/2");
        assert_eq!(simplified("0.1 + 0.2"), "3/10");
        assert_eq!(simplified("2^10"), "1024");
    }

    #[test]
    fn roots() {
        assert_eq!(simplified("sqrt(16)"), "4");
        assert_eq!(simplified("sqrt(8)"), "2*sqrt(2)");
        assert_eq!(simplified("sqrt(2)*sqrt(2)"), "2");
        assert_eq!(simplified("sqrt(2)*sqrt(3)"), "sqrt(6)");
        assert_eq!(simplified("1/sqrt(2)"), "sqrt(2)/2");
    }

    #[test]
    fn coefficient_distributes_over_sum() {
        assert_eq!(simplified("2*(x + 1) + x"), "3*x + 2");
    }

    #[test]
    fn products_of_sums_are_kept() {
        assert_eq!(simplified("(x + 1)^2"), "(x + 1)^2");
    }

    #[test]
    fn common_factor_cancels() {
        assert_eq!(simplified("(x^2 - 1)/(x - 1)"), "x + 1");
    }

    #[test]
    fn functions() {
        assert_eq!(simplified("cos(pi) + sin(0)"), "-1");
        assert_eq!(simplified("ln(exp(x))"), "x");
        assert_eq!(simplified("exp(ln(2))"), "2");
    }

    #[test]
    fn idempotent() {
        for input in ["(x + 1)^2 + 2*(x - 3)", "x/(2*y) + 3", "3*sqrt(2)/2 - x^3", "-(x - 2)"] {
            let once = simplified(input);
            assert_eq!(simplified(&once), once, "input: {}", input);
        }
    }

    #[test]
    fn steps_are_collected() {
        let expr = SymExpr::try_from(&parse_expr("0 + x*1").unwrap()).unwrap();
        let mut steps = Vec::new();
        let simplified = simplify_with(&expr, &mut steps);
        assert_eq!(simplified, SymExpr::symbol("x"));
        assert!(steps.contains(&Step::AddZero));
        assert!(steps.contains(&Step::MultiplyOne));
    }
}
