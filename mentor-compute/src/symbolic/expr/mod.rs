//! A representation of mathematical expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](mentor_parser::parser::ast::expr::Expr) type from `mentor_parser` is a recursive
//! `enum` that mirrors the input as written. It's convenient for parsing and for pointing at the
//! input in error messages, but not so much for algebraic manipulation.
//!
//! This module defines [`SymExpr`], which flattens the tree into a list of terms or factors,
//! depending on the operation. Subtraction is addition of a term multiplied by `-1`, and division
//! is multiplication by a factor raised to the power of `-1`. Numbers are exact [`Rational`]s.
//!
//! # Strict equality
//!
//! The [`PartialEq`] and [`Eq`] implementations for [`SymExpr`] implement **strict equality**:
//! two expressions are equal if they have the same shape and the same numbers, symbols, and
//! functions at the same places. `x^2 + 2x + 1` and `(x + 1)^2` are semantically equal, but not
//! strictly equal. Strict equality never reports false positives, so the simplifier uses it to
//! decide when terms and factors can be combined.
//!
//! Strict equality is sensitive to the order of terms and factors. Every expression returned by
//! the simplifier is in **canonical order** (see [`SymExpr::canonical`]), so two simplified
//! expressions that only differ by the order of their terms compare equal.

mod convert;
mod fmt;

use crate::primitive::rat;
use rug::Rational;
use std::{
    cmp::Ordering,
    collections::BTreeSet,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub},
};

pub use convert::FUNCTION_NAMES;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named mathematical constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Constant {
    /// The ratio of a circle's circumference to its diameter, written `pi` or `π`.
    Pi,

    /// Euler's number, written `e`.
    E,
}

impl Constant {
    /// Returns the name used to print the constant.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::E => "e",
        }
    }
}

/// A function of one argument.
///
/// `sqrt(x)` and `exp(x)` are not functions in this representation: they are stored as the powers
/// `x^(1/2)` and `e^x`, so the power rules apply to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Func {
    Sin,
    Cos,
    Tan,

    /// The natural logarithm. Both `log` and `ln` refer to it.
    Log,
}

impl Func {
    /// Returns the name used to print the function.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Log => "log",
        }
    }
}

/// A single term / factor, such as a number, variable, or function call.
///
/// The order of the variants is the order in which factors of a product are printed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Primary {
    /// An exact number, such as `2`, `-3`, or `5/2`.
    Number(Rational),

    /// A named constant, such as `pi`.
    Const(Constant),

    /// A variable, such as `x` or `y`.
    Symbol(String),

    /// A function call, such as `sin(x)`.
    Call(Func, Box<SymExpr>),
}

/// A mathematical expression with information about its terms and factors.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SymExpr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<SymExpr>),

    /// Multiple factors multiplied together.
    Mul(Vec<SymExpr>),

    /// An expression raised to a power.
    Exp(Box<SymExpr>, Box<SymExpr>),
}

impl SymExpr {
    /// Creates a number.
    pub fn number<T>(n: T) -> Self
    where
        Rational: From<T>,
    {
        Self::Primary(Primary::Number(rat(n)))
    }

    /// Creates a variable.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Primary(Primary::Symbol(name.into()))
    }

    /// Creates a constant.
    pub fn constant(constant: Constant) -> Self {
        Self::Primary(Primary::Const(constant))
    }

    /// Creates a function call.
    pub fn call(func: Func, arg: SymExpr) -> Self {
        Self::Primary(Primary::Call(func, Box::new(arg)))
    }

    /// Creates the power `base^exp`.
    pub fn pow(base: SymExpr, exp: SymExpr) -> Self {
        Self::Exp(Box::new(base), Box::new(exp))
    }

    /// Creates the reciprocal `expr^-1`.
    pub fn recip(self) -> Self {
        Self::pow(self, Self::number(-1))
    }

    /// Returns the number if this expression is a number.
    pub fn as_number(&self) -> Option<&Rational> {
        match self {
            Self::Primary(Primary::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// Returns true if this expression is a number.
    pub fn is_number(&self) -> bool {
        self.as_number().is_some()
    }

    /// Returns true if this expression is the given integer.
    pub fn is_int(&self, n: i32) -> bool {
        self.as_number().map_or(false, |value| *value == n)
    }

    /// Returns true if this expression is the number zero.
    pub fn is_zero(&self) -> bool {
        self.is_int(0)
    }

    /// Returns true if this expression is the number one.
    pub fn is_one(&self) -> bool {
        self.is_int(1)
    }

    /// Returns true if this expression is a negative number.
    pub fn is_negative_number(&self) -> bool {
        self.as_number().map_or(false, |n| *n < 0)
    }

    /// Returns the variable name if this expression is a variable.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(name)) => Some(name),
            _ => None,
        }
    }

    /// If the expression is an [`SymExpr::Add`] or [`SymExpr::Mul`] with zero or one
    /// terms / factors, returns the empty sum / product, or the single term / factor. Otherwise,
    /// returns the expression unchanged.
    pub fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => match terms.len() {
                0 => Self::number(0),
                1 => terms.swap_remove(0),
                _ => Self::Add(terms),
            },
            Self::Mul(mut factors) => match factors.len() {
                0 => Self::number(1),
                1 => factors.swap_remove(0),
                _ => Self::Mul(factors),
            },
            expr => expr,
        }
    }

    /// Returns the names of all variables in the expression, in alphabetical order.
    pub fn symbols(&self) -> BTreeSet<String> {
        let mut symbols = BTreeSet::new();
        self.collect_symbols(&mut symbols);
        symbols
    }

    fn collect_symbols(&self, symbols: &mut BTreeSet<String>) {
        match self {
            Self::Primary(Primary::Symbol(name)) => {
                symbols.insert(name.clone());
            },
            Self::Primary(Primary::Call(_, arg)) => arg.collect_symbols(symbols),
            Self::Primary(_) => (),
            Self::Add(exprs) | Self::Mul(exprs) => exprs.iter()
                .for_each(|expr| expr.collect_symbols(symbols)),
            Self::Exp(base, exp) => {
                base.collect_symbols(symbols);
                exp.collect_symbols(symbols);
            },
        }
    }

    /// Returns true if the expression contains the given variable anywhere.
    pub fn contains_symbol(&self, name: &str) -> bool {
        match self {
            Self::Primary(Primary::Symbol(symbol)) => symbol == name,
            Self::Primary(Primary::Call(_, arg)) => arg.contains_symbol(name),
            Self::Primary(_) => false,
            Self::Add(exprs) | Self::Mul(exprs) => exprs.iter().any(|expr| expr.contains_symbol(name)),
            Self::Exp(base, exp) => base.contains_symbol(name) || exp.contains_symbol(name),
        }
    }

    /// Returns true if the expression contains no variables.
    pub fn is_constant(&self) -> bool {
        match self {
            Self::Primary(Primary::Symbol(_)) => false,
            Self::Primary(Primary::Call(_, arg)) => arg.is_constant(),
            Self::Primary(_) => true,
            Self::Add(exprs) | Self::Mul(exprs) => exprs.iter().all(SymExpr::is_constant),
            Self::Exp(base, exp) => base.is_constant() && exp.is_constant(),
        }
    }

    /// Returns true if the expression contains a division by the literal number zero, such as
    /// `x/0`.
    pub fn divides_by_zero(&self) -> bool {
        match self {
            Self::Primary(Primary::Call(_, arg)) => arg.divides_by_zero(),
            Self::Primary(_) => false,
            Self::Add(exprs) | Self::Mul(exprs) => exprs.iter().any(SymExpr::divides_by_zero),
            Self::Exp(base, exp) => {
                base.is_zero() && exp.is_negative_number()
                    || base.divides_by_zero()
                    || exp.divides_by_zero()
            },
        }
    }

    /// Replaces every occurrence of the given variable with the given value. The result is not
    /// simplified.
    pub fn substitute(&self, name: &str, value: &SymExpr) -> SymExpr {
        match self {
            Self::Primary(Primary::Symbol(symbol)) if symbol == name => value.clone(),
            Self::Primary(Primary::Call(func, arg)) => Self::call(*func, arg.substitute(name, value)),
            Self::Primary(_) => self.clone(),
            Self::Add(terms) => Self::Add(terms.iter().map(|term| term.substitute(name, value)).collect()),
            Self::Mul(factors) => Self::Mul(factors.iter().map(|factor| factor.substitute(name, value)).collect()),
            Self::Exp(base, exp) => Self::pow(base.substitute(name, value), exp.substitute(name, value)),
        }
    }

    /// Sorts the terms and factors of this node (but not of its children) into canonical order.
    pub(crate) fn sort_shallow(mut self) -> Self {
        match &mut self {
            Self::Add(terms) => terms.sort(),
            Self::Mul(factors) => factors.sort_by(cmp_factors),
            _ => (),
        }
        self
    }

    /// Recursively sorts the terms and factors of the expression into canonical order.
    ///
    /// Terms of a sum are sorted by the derived [`Ord`]. Factors of a product are sorted with
    /// numbers first, then by base, then by exponent, so `2*x*y^2` keeps its printed order.
    pub fn canonical(self) -> Self {
        match self {
            Self::Primary(Primary::Call(func, arg)) => Self::call(func, arg.canonical()),
            Self::Primary(_) => self,
            Self::Add(terms) => Self::Add(terms.into_iter().map(SymExpr::canonical).collect()).sort_shallow(),
            Self::Mul(factors) => Self::Mul(factors.into_iter().map(SymExpr::canonical).collect()).sort_shallow(),
            Self::Exp(base, exp) => Self::pow(base.canonical(), exp.canonical()),
        }
    }
}

/// Splits a factor into its base and exponent. A factor that is not a power has exponent `1`.
pub(crate) fn base_and_exp(factor: &SymExpr) -> (&SymExpr, Option<&SymExpr>) {
    match factor {
        SymExpr::Exp(base, exp) => (base, Some(exp)),
        factor => (factor, None),
    }
}

/// The canonical order of two factors of a product.
pub(crate) fn cmp_factors(a: &SymExpr, b: &SymExpr) -> Ordering {
    b.is_number().cmp(&a.is_number())
        .then_with(|| {
            let (base_a, exp_a) = base_and_exp(a);
            let (base_b, exp_b) = base_and_exp(b);
            base_a.cmp(base_b).then_with(|| match (exp_a, exp_b) {
                (Some(exp_a), Some(exp_b)) => exp_a.cmp(exp_b),
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
        })
}

impl From<Rational> for SymExpr {
    fn from(n: Rational) -> Self {
        Self::Primary(Primary::Number(n))
    }
}

/// Adds two [`SymExpr`]s together. Sums are flattened: adding to an [`SymExpr::Add`] extends
/// its terms rather than nesting it.
impl Add for SymExpr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let mut terms = match self {
            Self::Add(terms) => terms,
            expr => vec![expr],
        };

        match rhs {
            Self::Add(rhs_terms) => terms.extend(rhs_terms),
            expr => terms.push(expr),
        }

        Self::Add(terms)
    }
}

impl AddAssign for SymExpr {
    fn add_assign(&mut self, rhs: Self) {
        *self = std::mem::replace(self, Self::number(0)) + rhs;
    }
}

/// Multiplies two [`SymExpr`]s together. Products are flattened like sums.
impl Mul for SymExpr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        let mut factors = match self {
            Self::Mul(factors) => factors,
            expr => vec![expr],
        };

        match rhs {
            Self::Mul(rhs_factors) => factors.extend(rhs_factors),
            expr => factors.push(expr),
        }

        Self::Mul(factors)
    }
}

impl MulAssign for SymExpr {
    fn mul_assign(&mut self, rhs: Self) {
        *self = std::mem::replace(self, Self::number(1)) * rhs;
    }
}

impl Neg for SymExpr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Number(n)) => Self::from(-n),
            expr => Self::number(-1) * expr,
        }
    }
}

impl Sub for SymExpr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + -rhs
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn operators_flatten() {
        let x = SymExpr::symbol("x");
        let y = SymExpr::symbol("y");
        let z = SymExpr::symbol("z");
        assert_eq!(x.clone() + (y.clone() + z.clone()), SymExpr::Add(vec![x.clone(), y.clone(), z.clone()]));
        assert_eq!((x.clone() * y.clone()) * z.clone(), SymExpr::Mul(vec![x, y, z]));
    }

    #[test]
    fn negating_a_number_folds() {
        assert_eq!(-SymExpr::number(3), SymExpr::number(-3));
    }

    #[test]
    fn canonical_factor_order() {
        let expr = SymExpr::Mul(vec![
            SymExpr::pow(SymExpr::symbol("y"), SymExpr::number(2)),
            SymExpr::symbol("x"),
            SymExpr::number(2),
        ]).canonical();
        assert_eq!(expr, SymExpr::Mul(vec![
            SymExpr::number(2),
            SymExpr::symbol("x"),
            SymExpr::pow(SymExpr::symbol("y"), SymExpr::number(2)),
        ]));
    }

    #[test]
    fn symbols_are_sorted() {
        let expr = SymExpr::symbol("y") * SymExpr::symbol("b") + SymExpr::call(Func::Sin, SymExpr::symbol("x"));
        assert_eq!(expr.symbols().into_iter().collect::<Vec<_>>(), vec!["b", "x", "y"]);
    }

    #[test]
    fn literal_division_by_zero() {
        let expr = SymExpr::symbol("x") * SymExpr::number(0).recip();
        assert!(expr.divides_by_zero());
        assert!(!SymExpr::symbol("x").recip().divides_by_zero());
    }
}
