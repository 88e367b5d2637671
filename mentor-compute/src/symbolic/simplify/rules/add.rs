//! Simplification rules for expressions involving addition, including combining like terms.

use crate::primitive::rat;
use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::do_add, step::Step},
    step_collector::StepCollector,
};
use rug::Rational;

/// `a+(b+c) = a+b+c`
pub fn flatten(expr: &SymExpr, _: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    do_add(expr, |terms| {
        if !terms.iter().any(|term| matches!(term, SymExpr::Add(_))) {
            return None;
        }

        let new_terms = terms.iter()
            .flat_map(|term| match term {
                SymExpr::Add(inner) => inner.clone(),
                term => vec![term.clone()],
            })
            .collect::<Vec<_>>();
        Some(SymExpr::Add(new_terms).downgrade())
    })
}

/// `0+a = a`
/// `a+0 = a`
pub fn add_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let new_terms = terms.iter()
            .filter(|term| !term.is_zero())
            .cloned()
            .collect::<Vec<_>>();

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(SymExpr::Add(new_terms).downgrade())
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::AddZero);
    Some(opt)
}

/// `2+3 = 5`
pub fn add_numbers(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let (numbers, mut new_terms): (Vec<_>, Vec<_>) = terms.iter()
            .cloned()
            .partition(SymExpr::is_number);
        if numbers.len() < 2 {
            return None;
        }

        let sum = numbers.iter()
            .filter_map(SymExpr::as_number)
            .fold(Rational::new(), |acc, n| acc + n);
        new_terms.push(SymExpr::from(sum));
        Some(SymExpr::Add(new_terms).downgrade())
    })?;

    step_collector.push(Step::AddNumbers);
    Some(opt)
}

/// Utility function to extract the numeric coefficient and the remaining factors of a term.
///
/// - `3*a` -> `(3, a)`
/// - `1/4*a*b` -> `(1/4, a*b)`
/// - `sqrt(6)` -> `(1, sqrt(6))`
/// - `a` -> `(1, a)`
pub(crate) fn split_coefficient(term: &SymExpr) -> (Rational, SymExpr) {
    match term {
        SymExpr::Mul(factors) => {
            let mut coefficient = rat(1);
            let mut rest = Vec::new();
            for factor in factors {
                match factor.as_number() {
                    Some(n) => coefficient *= n,
                    None => rest.push(factor.clone()),
                }
            }
            (coefficient, SymExpr::Mul(rest).downgrade())
        },
        term => (rat(1), term.clone()),
    }
}

/// Combines like terms.
///
/// `a+a = 2a`
/// `a+a+a = 3a`
/// `2a+3a = 5a`
/// etc.
pub fn combine_like_terms(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let mut groups: Vec<(Rational, SymExpr)> = Vec::new();

        // numbers are combined by `add_numbers`
        let mut numbers = Vec::new();

        // this is O(n^2) worst case, due to scanning every group for each term
        for term in terms {
            if term.is_number() {
                numbers.push(term.clone());
                continue;
            }

            let (coefficient, rest) = split_coefficient(term);
            match groups.iter_mut().find(|(_, other)| *other == rest) {
                Some((sum, _)) => *sum += coefficient,
                None => groups.push((coefficient, rest)),
            }
        }

        if groups.len() + numbers.len() == terms.len() {
            return None;
        }

        let new_terms = groups.into_iter()
            .filter(|(coefficient, _)| *coefficient != 0)
            .map(|(coefficient, rest)| {
                if coefficient == 1 {
                    rest
                } else {
                    SymExpr::from(coefficient) * rest
                }
            })
            .chain(numbers)
            .collect::<Vec<_>>();
        Some(SymExpr::Add(new_terms).downgrade())
    })?;

    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// Applies all addition rules.
///
/// All addition rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    flatten(expr, step_collector)
        .or_else(|| add_zero(expr, step_collector))
        .or_else(|| add_numbers(expr, step_collector))
        .or_else(|| combine_like_terms(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn like_terms() {
        let x = SymExpr::symbol("x");
        let expr = SymExpr::Add(vec![
            SymExpr::number(2) * x.clone(),
            SymExpr::number(3) * x.clone(),
            SymExpr::number(1),
        ]);
        let mut steps = Vec::new();
        let result = combine_like_terms(&expr, &mut steps).unwrap();
        assert_eq!(result, SymExpr::Add(vec![
            SymExpr::Mul(vec![SymExpr::number(5), x]),
            SymExpr::number(1),
        ]));
        assert_eq!(steps, vec![Step::CombineLikeTerms]);
    }

    #[test]
    fn cancelling_terms() {
        let x = SymExpr::symbol("x");
        let expr = SymExpr::Add(vec![x.clone(), SymExpr::number(-1) * x]);
        assert_eq!(combine_like_terms(&expr, &mut ()), Some(SymExpr::number(0)));
    }
}
