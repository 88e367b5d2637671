//! Simplification rules related to the distributive property.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::{do_multiply, do_power}, step::Step},
    step_collector::StepCollector,
};

/// Powers of sums are only expanded up to this exponent.
const MAX_EXPANDED_POWER: u32 = 16;

/// Powers of sums are only expanded if the expansion has at most this many terms before like terms
/// are combined.
const MAX_EXPANDED_TERMS: usize = 4096;

/// `2*(a+b) = 2*a + 2*b`
///
/// Unlike [`distributive_property`], this rule is also used when simplifying, so that numeric
/// multiples of sums can be combined with other terms.
pub fn distribute_coefficient(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let (coefficient, terms) = match factors {
            [SymExpr::Primary(_), SymExpr::Add(terms)]
            | [SymExpr::Add(terms), SymExpr::Primary(_)] => {
                (factors.iter().find_map(SymExpr::as_number)?, terms)
            },
            _ => return None,
        };

        Some(SymExpr::Add(
            terms.iter()
                .map(|term| SymExpr::from(coefficient.clone()) * term.clone())
                .collect(),
        ))
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::DistributeCoefficient);
    Some(opt)
}

/// `a*(b+c) = a*b + a*c`
pub fn distributive_property(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        // find the first `SymExpr::Add`, and distribute every other factor over it
        let mut factors_to_distribute = factors.to_vec();
        let idx = factors_to_distribute.iter()
            .position(|factor| matches!(factor, SymExpr::Add(_)))?;
        let SymExpr::Add(add_factor_terms) = factors_to_distribute.remove(idx) else {
            return None;
        };

        let new_terms = add_factor_terms.into_iter()
            .map(|term| SymExpr::Mul(factors_to_distribute.clone()) * term)
            .collect::<Vec<_>>();
        Some(SymExpr::Add(new_terms))
    })?;

    step_collector.push(Step::DistributiveProperty);
    Some(opt)
}

/// `(a+b)^2 = a*a + a*b + b*a + b*b`
pub fn expand_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let SymExpr::Add(terms) = lhs else {
            return None;
        };
        let exp = rhs.as_number()
            .filter(|n| n.is_integer())?
            .numer()
            .to_u32()
            .filter(|n| (2..=MAX_EXPANDED_POWER).contains(n))?;
        if terms.len().checked_pow(exp).map_or(true, |count| count > MAX_EXPANDED_TERMS) {
            return None;
        }

        let mut product = vec![SymExpr::number(1)];
        for _ in 0..exp {
            product = product.iter()
                .flat_map(|a| terms.iter().map(move |b| a.clone() * b.clone()))
                .collect();
        }
        Some(SymExpr::Add(product))
    })?;

    step_collector.push(Step::ExpandPower);
    Some(opt)
}

/// Applies all distribution rules.
///
/// The distributive property may or may not reduce the complexity of the expression, since it can
/// introduce additional operations. These rules are only used by
/// [`expand`](crate::symbolic::expand::expand), with the exception of [`distribute_coefficient`].
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    distribute_coefficient(expr, step_collector)
        .or_else(|| distributive_property(expr, step_collector))
        .or_else(|| expand_power(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    #[test]
    fn coefficient_over_sum() {
        let expr = SymExpr::Mul(vec![SymExpr::number(2), SymExpr::Add(vec![x(), SymExpr::number(1)])]);
        assert_eq!(
            distribute_coefficient(&expr, &mut ()),
            Some(SymExpr::Add(vec![
                SymExpr::Mul(vec![SymExpr::number(2), x()]),
                SymExpr::Mul(vec![SymExpr::number(2), SymExpr::number(1)]),
            ])),
        );
    }

    #[test]
    fn symbolic_factor_is_not_a_coefficient() {
        let expr = SymExpr::Mul(vec![x(), SymExpr::Add(vec![x(), SymExpr::number(1)])]);
        assert_eq!(distribute_coefficient(&expr, &mut ()), None);
        assert!(distributive_property(&expr, &mut ()).is_some());
    }

    #[test]
    fn square_of_binomial() {
        let expr = SymExpr::pow(SymExpr::Add(vec![x(), SymExpr::number(1)]), SymExpr::number(2));
        let mut steps = Vec::new();
        let SymExpr::Add(terms) = expand_power(&expr, &mut steps).unwrap() else {
            panic!("expected a sum");
        };
        assert_eq!(terms.len(), 4);
        assert_eq!(steps, vec![Step::ExpandPower]);
    }
}
