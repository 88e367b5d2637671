//! Printing of [`SymExpr`]s.
//!
//! The output is meant to be read by students and re-parsed by the toolkit: terms are ordered by
//! descending degree with constants last (`x^2 + 2*x + 1`), subtraction is written as such
//! (`x - 2`), and products with negative powers are written as fractions (`x/2`, `1/x`,
//! `3*sqrt(2)/2`). Parsing the output and simplifying it again gives back the same text.

use rug::Rational;
use std::{cmp::Ordering, fmt};
use super::{Constant, Primary, SymExpr};

impl fmt::Display for Primary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(num) => write!(f, "{}", num),
            Self::Const(constant) => write!(f, "{}", constant.name()),
            Self::Symbol(name) => write!(f, "{}", name),
            Self::Call(func, arg) => write!(f, "{}({})", func.name(), arg),
        }
    }
}

impl fmt::Display for SymExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(terms) => fmt_sum(f, terms),
            Self::Mul(factors) => fmt_product(f, factors),
            Self::Exp(_, exp) if exp.is_negative_number() => fmt_product(f, std::slice::from_ref(self)),
            Self::Exp(base, exp) => fmt_power(f, base, exp),
        }
    }
}

/// The degree of a term, counting every variable. Terms without variables have degree zero.
fn degree(expr: &SymExpr) -> Rational {
    match expr {
        SymExpr::Primary(Primary::Symbol(_)) => Rational::from(1),
        SymExpr::Add(terms) => terms.iter().map(degree).max().unwrap_or_default(),
        SymExpr::Mul(factors) => factors.iter().fold(Rational::new(), |acc, factor| acc + degree(factor)),
        SymExpr::Exp(base, exp) => match exp.as_number() {
            Some(exp) => degree(base) * exp,
            None => Rational::new(),
        },
        _ => Rational::new(),
    }
}

/// Removes the numeric factors of a term, leaving the part that identifies it.
fn monomial(expr: &SymExpr) -> Vec<&SymExpr> {
    match expr {
        SymExpr::Mul(factors) => factors.iter().filter(|factor| !factor.is_number()).collect(),
        SymExpr::Primary(Primary::Number(_)) => Vec::new(),
        expr => vec![expr],
    }
}

/// The order in which the terms of a sum are printed.
fn cmp_terms(a: &SymExpr, b: &SymExpr) -> Ordering {
    degree(b).cmp(&degree(a))
        .then_with(|| a.is_constant().cmp(&b.is_constant()))
        .then_with(|| a.is_number().cmp(&b.is_number()))
        .then_with(|| monomial(a).cmp(&monomial(b)))
        .then_with(|| a.cmp(b))
}

/// Splits a term into its sign and magnitude, so that `x + -2*y` can be printed as `x - 2*y`.
fn split_sign(term: &SymExpr) -> (bool, SymExpr) {
    match term {
        SymExpr::Primary(Primary::Number(n)) if *n < 0 => (true, SymExpr::from(-n.clone())),
        SymExpr::Mul(factors) => {
            let Some(idx) = factors.iter().position(SymExpr::is_negative_number) else {
                return (false, term.clone());
            };

            let mut factors = factors.clone();
            let magnitude = -factors.remove(idx);
            if !magnitude.is_one() {
                factors.insert(idx, magnitude);
            }
            (true, SymExpr::Mul(factors).downgrade())
        },
        _ => (false, term.clone()),
    }
}

fn fmt_sum(f: &mut fmt::Formatter<'_>, terms: &[SymExpr]) -> fmt::Result {
    if terms.is_empty() {
        return write!(f, "0");
    }

    let mut ordered = terms.iter().collect::<Vec<_>>();
    ordered.sort_by(|a, b| cmp_terms(a, b));

    for (idx, term) in ordered.into_iter().enumerate() {
        let (negative, magnitude) = split_sign(term);
        match (idx, negative) {
            (0, false) => write!(f, "{}", magnitude)?,
            (0, true) => write!(f, "-{}", Factor(&magnitude))?,
            (_, false) => write!(f, " + {}", magnitude)?,
            (_, true) => write!(f, " - {}", Factor(&magnitude))?,
        }
    }

    Ok(())
}

/// Wraps a factor of a product, adding parentheses around sums.
struct Factor<'a>(&'a SymExpr);

impl fmt::Display for Factor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            SymExpr::Add(_) => write!(f, "({})", self.0),
            expr => write!(f, "{}", expr),
        }
    }
}

fn fmt_product(f: &mut fmt::Formatter<'_>, factors: &[SymExpr]) -> fmt::Result {
    let mut coefficient = Rational::from(1);
    let mut numerator = Vec::new();
    let mut denominator = Vec::new();

    for factor in factors {
        match factor {
            SymExpr::Primary(Primary::Number(n)) => coefficient *= n,
            SymExpr::Exp(base, exp) if exp.is_negative_number() => {
                let exp = -(**exp).clone();
                if exp.is_one() {
                    denominator.push((**base).clone());
                } else {
                    denominator.push(SymExpr::pow((**base).clone(), exp));
                }
            },
            factor => numerator.push(factor.clone()),
        }
    }

    let (numer, denom) = coefficient.into_numer_denom();
    if numer < 0 {
        write!(f, "-")?;
    }

    let mut numerator_parts = Vec::new();
    if numer.clone().abs() != 1 || numerator.is_empty() {
        numerator_parts.push(numer.abs().to_string());
    }
    numerator_parts.extend(numerator.iter().map(|factor| Factor(factor).to_string()));
    write!(f, "{}", numerator_parts.join("*"))?;

    let mut denominator_parts = Vec::new();
    if denom != 1 {
        denominator_parts.push(denom.to_string());
    }
    denominator_parts.extend(denominator.iter().map(|factor| Factor(factor).to_string()));

    match denominator_parts.len() {
        0 => Ok(()),
        1 => write!(f, "/{}", denominator_parts[0]),
        _ => write!(f, "/({})", denominator_parts.join("*")),
    }
}

/// Returns true if the base of a power needs parentheses.
fn base_needs_parens(base: &SymExpr) -> bool {
    match base {
        SymExpr::Primary(Primary::Number(n)) => *n < 0 || !n.is_integer(),
        SymExpr::Primary(_) => false,
        _ => true,
    }
}

/// Returns true if the exponent of a power needs parentheses.
fn exp_needs_parens(exp: &SymExpr) -> bool {
    match exp {
        SymExpr::Primary(Primary::Number(n)) => *n < 0 || !n.is_integer(),
        SymExpr::Primary(_) => false,
        _ => true,
    }
}

fn fmt_power(f: &mut fmt::Formatter<'_>, base: &SymExpr, exp: &SymExpr) -> fmt::Result {
    if matches!(base, SymExpr::Primary(Primary::Const(Constant::E))) {
        return write!(f, "exp({})", exp);
    }

    if exp.as_number().map_or(false, |n| *n.numer() == 1 && *n.denom() == 2) {
        return write!(f, "sqrt({})", base);
    }

    if base_needs_parens(base) {
        write!(f, "({})", base)?;
    } else {
        write!(f, "{}", base)?;
    }

    if exp_needs_parens(exp) {
        write!(f, "^({})", exp)
    } else {
        write!(f, "^{}", exp)
    }
}
