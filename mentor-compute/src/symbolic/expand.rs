//! Expansion of products and powers of sums.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{inner_simplify_with, rules, step::Step},
    step_collector::StepCollector,
};

/// Expands the given expression, distributing products over sums and expanding integer powers of
/// sums, then combining like terms.
///
/// `(x + 1)^2` expands to `x^2 + 2*x + 1`.
pub fn expand(expr: &SymExpr) -> SymExpr {
    inner_simplify_with(expr, rules::all_expand, &mut ())
}

/// Expands the given expression, reporting every rule applied to the given step collector.
pub fn expand_with(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> SymExpr {
    inner_simplify_with(expr, rules::all_expand, step_collector)
}

#[cfg(test)]
mod tests {
    use mentor_parser::parse_expr;
    use pretty_assertions::assert_eq;
    use super::*;

    fn expanded(input: &str) -> String {
        let expr = SymExpr::try_from(&parse_expr(input).unwrap()).unwrap();
        expand(&expr).to_string()
    }

    #[test]
    fn square_of_binomial() {
        assert_eq!(expanded("(x + 1)^2"), "x^2 + 2*x + 1");
    }

    #[test]
    fn product_of_binomials() {
        assert_eq!(expanded("(x + 2)(x - 3)"), "x^2 - x - 6");
        assert_eq!(expanded("(x - 2)*(x + 2)"), "x^2 - 4");
    }

    #[test]
    fn symbolic_factor() {
        assert_eq!(expanded("x(x + 1)"), "x^2 + x");
    }

    #[test]
    fn steps_name_the_distribution() {
        let expr = SymExpr::try_from(&parse_expr("(a + b)^2").unwrap()).unwrap();
        let mut steps = Vec::new();
        expand_with(&expr, &mut steps);
        assert!(steps.contains(&Step::ExpandPower));
    }
}
