//! Cancellation of common factors in rational functions of one variable.

use crate::symbolic::{
    expr::SymExpr,
    poly::Poly,
    simplify::{rules::do_multiply, step::Step},
    step_collector::StepCollector,
};
use std::collections::BTreeSet;

/// Splits the factors of a product into the numerator and the denominator. Factors with a negative
/// number as the exponent form the denominator, with the sign of the exponent flipped.
fn split_fraction(factors: &[SymExpr]) -> (Vec<SymExpr>, Vec<SymExpr>) {
    let mut numerator = Vec::new();
    let mut denominator = Vec::new();
    for factor in factors {
        match factor {
            SymExpr::Exp(base, exp) if exp.is_negative_number() => {
                denominator.push(SymExpr::pow((**base).clone(), -(**exp).clone()));
            },
            factor => numerator.push(factor.clone()),
        }
    }
    (numerator, denominator)
}

/// `(x^2 - 1)/(x - 1) = x + 1`
///
/// Only applies to products where the numerator and denominator are both polynomials in the same
/// single variable, with rational coefficients.
pub fn cancel_common_factors(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let symbols = factors.iter()
            .flat_map(SymExpr::symbols)
            .collect::<BTreeSet<_>>();
        if symbols.len() != 1 {
            return None;
        }
        let var = symbols.first()?;

        let (numerator, denominator) = split_fraction(factors);
        if denominator.is_empty() {
            return None;
        }

        let numerator = Poly::from_expr(&SymExpr::Mul(numerator), var)?;
        let denominator = Poly::from_expr(&SymExpr::Mul(denominator), var)?;
        let gcd = numerator.gcd(&denominator);
        if gcd.degree()? == 0 {
            return None;
        }

        let (numerator, _) = numerator.div_rem(&gcd)?;
        let (denominator, _) = denominator.div_rem(&gcd)?;
        match denominator.degree()? {
            0 => {
                let scale = denominator.leading()?.clone().recip();
                Some(numerator.scale(&scale).to_expr(var))
            },
            _ => Some(numerator.to_expr(var) * denominator.to_expr(var).recip()),
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::CancelCommonFactors);
    Some(opt)
}

/// Applies all cancellation rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    cancel_common_factors(expr, step_collector)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    #[test]
    fn difference_of_squares() {
        // (x^2 - 1) * (x - 1)^-1
        let expr = SymExpr::Mul(vec![
            SymExpr::Add(vec![SymExpr::pow(x(), SymExpr::number(2)), SymExpr::number(-1)]),
            SymExpr::Add(vec![x(), SymExpr::number(-1)]).recip(),
        ]);
        assert_eq!(
            cancel_common_factors(&expr, &mut ()),
            Some(SymExpr::Add(vec![x(), SymExpr::number(1)]).canonical()),
        );
    }

    #[test]
    fn nothing_in_common() {
        let expr = SymExpr::Mul(vec![x(), SymExpr::Add(vec![x(), SymExpr::number(1)]).recip()]);
        assert_eq!(cancel_common_factors(&expr, &mut ()), None);
    }

    #[test]
    fn two_variables_are_left_alone() {
        let y = SymExpr::symbol("y");
        let expr = SymExpr::Mul(vec![
            SymExpr::Add(vec![x(), y.clone()]),
            SymExpr::Add(vec![x(), y]).recip(),
        ]);
        assert_eq!(cancel_common_factors(&expr, &mut ()), None);
    }
}
