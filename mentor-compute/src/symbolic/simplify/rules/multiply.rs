//! Simplification rules for expressions involving multiplication, including combining like
//! factors.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::do_multiply, step::Step},
    step_collector::StepCollector,
};
use rug::Rational;

/// `a*(b*c) = a*b*c`
pub fn flatten(expr: &SymExpr, _: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    do_multiply(expr, |factors| {
        if !factors.iter().any(|factor| matches!(factor, SymExpr::Mul(_))) {
            return None;
        }

        let new_factors = factors.iter()
            .flat_map(|factor| match factor {
                SymExpr::Mul(inner) => inner.clone(),
                factor => vec![factor.clone()],
            })
            .collect::<Vec<_>>();
        Some(SymExpr::Mul(new_factors).downgrade())
    })
}

/// `0*a = 0`
/// `a*0 = 0`
pub fn multiply_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if factors.iter().any(SymExpr::is_zero) {
            Some(SymExpr::number(0))
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// `1*a = a`
/// `a*1 = a`
pub fn multiply_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let new_factors = factors.iter()
            .filter(|factor| !factor.is_one())
            .cloned()
            .collect::<Vec<_>>();

        if new_factors.len() == factors.len() {
            None
        } else {
            Some(SymExpr::Mul(new_factors).downgrade())
        }
    })?;

    step_collector.push(Step::MultiplyOne);
    Some(opt)
}

/// `2*3 = 6`
pub fn multiply_numbers(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let (numbers, mut new_factors): (Vec<_>, Vec<_>) = factors.iter()
            .cloned()
            .partition(SymExpr::is_number);
        if numbers.len() < 2 {
            return None;
        }

        let product = numbers.iter()
            .filter_map(SymExpr::as_number)
            .fold(Rational::from(1), |acc, n| acc * n);
        new_factors.insert(0, SymExpr::from(product));
        Some(SymExpr::Mul(new_factors).downgrade())
    })?;

    step_collector.push(Step::MultiplyNumbers);
    Some(opt)
}

/// Utility function to extract the base and exponent of an expression. If the expression is not
/// [`SymExpr::Exp`], the exponent is `1`.
///
/// - `a^b` -> `(a, b)`
/// - `a` -> `(a, 1)`
fn get_exp(expr: &SymExpr) -> (SymExpr, SymExpr) {
    match expr {
        SymExpr::Exp(lhs, rhs) => ((**lhs).clone(), (**rhs).clone()),
        expr => (expr.clone(), SymExpr::number(1)),
    }
}

/// Adds two exponents, folding the sum if both are numbers.
fn add_exponents(a: SymExpr, b: SymExpr) -> SymExpr {
    match (a.as_number(), b.as_number()) {
        (Some(a), Some(b)) => SymExpr::from(Rational::from(a + b)),
        _ => a + b,
    }
}

/// Combines like factors.
///
/// `a^b*a^c = a^(b+c)`
/// `2^c*3^c = 6^c`, for non-integer `c`
/// etc.
///
/// Plain numbers are left to [`multiply_numbers`], so `2*sqrt(2)` is not rewritten to `2^(3/2)`.
pub fn combine_like_factors(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let mut new_factors = factors.to_vec();
        let mut current_factor_idx = 0;

        // this is O(n^2) worst case, due to scanning the whole vec for each factor
        while current_factor_idx < new_factors.len() {
            if new_factors[current_factor_idx].is_number() {
                current_factor_idx += 1;
                continue;
            }

            let (mut current_base, mut current_exp) = get_exp(&new_factors[current_factor_idx]);

            // look at every factor after `current_factor`
            let mut next_factor_idx = current_factor_idx + 1;
            while next_factor_idx < new_factors.len() {
                if new_factors[next_factor_idx].is_number() {
                    next_factor_idx += 1;
                    continue;
                }

                let (next_base, next_exp) = get_exp(&new_factors[next_factor_idx]);

                if current_base == next_base {
                    // bases must be strictly equal
                    // if they are, apply a^b*a^c = a^(b+c)
                    current_exp = add_exponents(current_exp, next_exp);
                    new_factors.remove(next_factor_idx);
                } else if current_exp == next_exp
                    && current_base.as_number().map_or(false, |n| *n > 0)
                    && next_base.as_number().map_or(false, |n| *n > 0) {
                    // roots of positive numbers with the same degree
                    // apply a^c*b^c = (a*b)^c
                    current_base = match (current_base.as_number(), next_base.as_number()) {
                        (Some(a), Some(b)) => SymExpr::from(Rational::from(a * b)),
                        _ => current_base * next_base,
                    };
                    new_factors.remove(next_factor_idx);
                } else {
                    next_factor_idx += 1;
                }
            }

            // after all combining, update the current factor
            new_factors[current_factor_idx] = if current_exp.is_one() {
                current_base
            } else {
                SymExpr::pow(current_base, current_exp)
            };

            current_factor_idx += 1;
        }

        if new_factors.len() == factors.len() {
            None
        } else {
            Some(SymExpr::Mul(new_factors).downgrade())
        }
    })?;

    step_collector.push(Step::CombineLikeFactors);
    Some(opt)
}

/// Applies all multiplication rules.
///
/// All multiplication rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    flatten(expr, step_collector)
        .or_else(|| multiply_zero(expr, step_collector))
        .or_else(|| multiply_one(expr, step_collector))
        .or_else(|| multiply_numbers(expr, step_collector))
        .or_else(|| combine_like_factors(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use crate::primitive::rat;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn like_factors() {
        let x = SymExpr::symbol("x");
        let expr = SymExpr::Mul(vec![
            x.clone(),
            SymExpr::number(3),
            SymExpr::pow(x.clone(), SymExpr::number(2)),
        ]);
        let result = combine_like_factors(&expr, &mut ()).unwrap();
        assert_eq!(result, SymExpr::Mul(vec![
            SymExpr::pow(x, SymExpr::number(3)),
            SymExpr::number(3),
        ]));
    }

    #[test]
    fn roots_of_numbers() {
        let half = SymExpr::from(rat((1, 2)));
        let expr = SymExpr::Mul(vec![
            SymExpr::pow(SymExpr::number(2), half.clone()),
            SymExpr::pow(SymExpr::number(3), half.clone()),
        ]);
        let result = combine_like_factors(&expr, &mut ()).unwrap();
        assert_eq!(result, SymExpr::pow(SymExpr::number(6), half));
    }

    #[test]
    fn coefficient_is_not_a_like_factor() {
        let expr = SymExpr::Mul(vec![
            SymExpr::number(2),
            SymExpr::pow(SymExpr::number(2), SymExpr::from(rat((1, 2)))),
        ]);
        assert_eq!(combine_like_factors(&expr, &mut ()), None);
    }
}
