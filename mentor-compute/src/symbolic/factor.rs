//! Factoring of expressions over the rationals.
//!
//! Factoring happens in three stages:
//!
//! 1. The rational content is taken out, with the sign of the leading coefficient, so that
//!    `-2*x^2 + 8` becomes `-2*(x^2 - 4)`.
//! 2. The common monomial is taken out, so that `x^3 + x^2` becomes `x^2*(x + 1)`.
//! 3. Univariate polynomials with rational coefficients are split into linear factors with the
//!    rational root theorem. Whatever has no rational roots is kept as a single factor.
//!
//! Expressions in more than one variable only go through the first two stages.

use crate::primitive::rat;
use rug::ops::Pow;
use rug::Rational;
use std::collections::BTreeMap;
use super::{
    expand::expand,
    expr::{Primary, SymExpr},
    poly::Poly,
    simplify::simplify,
};

/// Factors the given expression.
///
/// Expressions that are not polynomials, or that cannot be factored, are returned in expanded
/// form.
pub fn factor(expr: &SymExpr) -> SymExpr {
    let expanded = expand(&simplify(expr));
    let symbols = expanded.symbols();
    let factored = match symbols.iter().collect::<Vec<_>>().as_slice() {
        [] => None,
        [var] => factor_univariate(&expanded, var).or_else(|| factor_common_terms(&expanded)),
        _ => factor_common_terms(&expanded),
    };
    factored.unwrap_or(expanded)
}

/// Builds `base^exp`.
fn raise(base: SymExpr, exp: u32) -> SymExpr {
    if exp == 1 {
        base
    } else {
        SymExpr::pow(base, SymExpr::number(exp))
    }
}

/// Factors a polynomial in one variable with rational coefficients.
fn factor_univariate(expr: &SymExpr, var: &str) -> Option<SymExpr> {
    let poly = Poly::from_expr(expr, var)?;
    if poly.degree()? < 1 {
        return None;
    }

    let mut coefficient = poly.content();
    if *poly.leading()? < 0 {
        coefficient = -coefficient;
    }
    let primitive = poly.scale(&coefficient.clone().recip());

    let (roots, rest) = primitive.split_rational_roots();
    let mut factors = Vec::new();
    let mut scale = rat(1);
    for (root, multiplicity) in roots {
        // (x - p/q) = (q*x - p)/q
        let (p, q) = root.into_numer_denom();
        let linear = Poly::new(vec![Rational::from(-p), Rational::from(q.clone())]);
        scale *= Rational::from(q).pow(multiplicity as u32);
        factors.push(raise(linear.to_expr(var), multiplicity as u32));
    }

    let rest = rest.scale(&scale.recip());
    match rest.degree() {
        Some(0) => coefficient *= rest.coeff(0),
        Some(_) => factors.push(rest.to_expr(var)),
        None => return None,
    }

    if coefficient != 1 {
        factors.push(SymExpr::from(coefficient));
    }

    // `canonical` only orders the factors; simplifying would distribute the coefficient again
    Some(SymExpr::Mul(factors).downgrade().canonical())
}

/// The parts of a term of an expanded sum.
struct Monomial {
    coefficient: Rational,

    /// Variables raised to positive integer powers.
    powers: BTreeMap<String, u32>,

    /// Every other factor.
    others: Vec<SymExpr>,
}

impl Monomial {
    fn new(term: &SymExpr) -> Self {
        let factors = match term {
            SymExpr::Mul(factors) => factors.as_slice(),
            term => std::slice::from_ref(term),
        };

        let mut monomial = Self {
            coefficient: rat(1),
            powers: BTreeMap::new(),
            others: Vec::new(),
        };
        for factor in factors {
            match factor {
                SymExpr::Primary(Primary::Number(n)) => monomial.coefficient *= n,
                SymExpr::Primary(Primary::Symbol(name)) => *monomial.powers.entry(name.clone()).or_default() += 1,
                SymExpr::Exp(base, exp) => {
                    let power = exp.as_number()
                        .filter(|n| n.is_integer() && **n > 0)
                        .and_then(|n| n.numer().to_u32());
                    match (base.as_symbol(), power) {
                        (Some(name), Some(power)) => *monomial.powers.entry(name.to_string()).or_default() += power,
                        _ => monomial.others.push(factor.clone()),
                    }
                },
                factor => monomial.others.push(factor.clone()),
            }
        }
        monomial
    }

    /// Divides the monomial by the given coefficient and variable powers, and converts it back into
    /// an expression.
    fn divide(self, coefficient: &Rational, powers: &BTreeMap<String, u32>) -> SymExpr {
        let mut factors = vec![SymExpr::from(Rational::from(&self.coefficient / coefficient))];
        for (name, power) in self.powers {
            let power = power - powers.get(&name).copied().unwrap_or(0);
            if power > 0 {
                factors.push(raise(SymExpr::symbol(name), power));
            }
        }
        factors.extend(self.others);
        SymExpr::Mul(factors)
    }
}

/// Takes the rational content and the common variable powers out of a sum.
fn factor_common_terms(expr: &SymExpr) -> Option<SymExpr> {
    let SymExpr::Add(terms) = expr else {
        return None;
    };

    let monomials = terms.iter().map(Monomial::new).collect::<Vec<_>>();

    let coefficients = Poly::new(monomials.iter().map(|m| m.coefficient.clone()).collect());
    let mut content = coefficients.content();
    if monomials.iter().all(|m| m.coefficient < 0) {
        content = -content;
    }

    let mut common = monomials.first()?.powers.clone();
    for monomial in &monomials[1..] {
        common = common.into_iter()
            .filter_map(|(name, power)| {
                let other = monomial.powers.get(&name)?;
                Some((name, power.min(*other)))
            })
            .collect();
    }

    if content == 1 && common.is_empty() {
        return None;
    }

    let inner = SymExpr::Add(
        monomials.into_iter()
            .map(|monomial| monomial.divide(&content, &common))
            .collect(),
    );

    let mut factors = vec![simplify(&inner)];
    factors.extend(common.into_iter().map(|(name, power)| raise(SymExpr::symbol(name), power)));
    if content != 1 {
        factors.push(SymExpr::from(content));
    }
    Some(SymExpr::Mul(factors).downgrade().canonical())
}

#[cfg(test)]
mod tests {
    use mentor_parser::parse_expr;
    use pretty_assertions::assert_eq;
    use super::*;

    fn factored(input: &str) -> String {
        let expr = SymExpr::try_from(&parse_expr(input).unwrap()).unwrap();
        factor(&expr).to_string()
    }

    #[test]
    fn difference_of_squares() {
        assert_eq!(factored("x^2 - 4"), "(x - 2)*(x + 2)");
    }

    #[test]
    fn perfect_square() {
        assert_eq!(factored("x^2 + 2x + 1"), "(x + 1)^2");
        assert_eq!(factored("2x^2 + 4x + 2"), "2*(x + 1)^2");
    }

    #[test]
    fn negative_leading_coefficient() {
        assert_eq!(factored("4 - x^2"), "-(x - 2)*(x + 2)");
    }

    #[test]
    fn rational_roots() {
        assert_eq!(factored("2x^2 - x - 1"), "(x - 1)*(2*x + 1)");
    }

    #[test]
    fn common_monomial() {
        assert_eq!(factored("x^3 - x"), "x*(x - 1)*(x + 1)");
    }

    #[test]
    fn irreducible() {
        assert_eq!(factored("x^2 + 1"), "x^2 + 1");
    }

    #[test]
    fn several_variables() {
        assert_eq!(factored("2x*y + 4x"), "2*x*(y + 2)");
    }

    #[test]
    fn constant() {
        assert_eq!(factored("6"), "6");
    }
}
