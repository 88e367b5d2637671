//! Implementation of the simplification rules.
//!
//! Each rule in this module is a function that takes the expression to simplify as an argument,
//! and returns `Some(expr)` with the simplified expression if the rule applies, or `None` if the
//! rule does not apply. Rules only look at the root of the expression they are given; the driver
//! in [`super`] applies them to every node.

pub mod add;
pub mod cancel;
pub mod distribute;
pub mod function;
pub mod multiply;
pub mod power;

use crate::symbolic::step_collector::StepCollector;
use crate::symbolic::expr::{Func, Primary, SymExpr};
use super::step::Step;

/// If the expression is a call to the given function, calls the given transformation function
/// with the argument.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_call(
    expr: &SymExpr,
    func: Func,
    f: impl Fn(&SymExpr) -> Option<SymExpr>,
) -> Option<SymExpr> {
    match expr {
        SymExpr::Primary(Primary::Call(target, arg)) if *target == func => f(arg),
        _ => None,
    }
}

/// If the expression is an add expression, calls the given transformation function with the terms.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_add(expr: &SymExpr, f: impl Fn(&[SymExpr]) -> Option<SymExpr>) -> Option<SymExpr> {
    if let SymExpr::Add(terms) = expr {
        f(terms)
    } else {
        None
    }
}

/// If the expression is a multiplication expression, calls the given transformation function with
/// the factors.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_multiply(expr: &SymExpr, f: impl Fn(&[SymExpr]) -> Option<SymExpr>) -> Option<SymExpr> {
    if let SymExpr::Mul(factors) = expr {
        f(factors)
    } else {
        None
    }
}

/// If the expression is a power expression, calls the given transformation function with the left
/// and right-hand-side of the power.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_power(expr: &SymExpr, f: impl Fn(&SymExpr, &SymExpr) -> Option<SymExpr>) -> Option<SymExpr> {
    if let SymExpr::Exp(lhs, rhs) = expr {
        f(lhs, rhs)
    } else {
        None
    }
}

/// Applies all rules used by [`simplify`](super::simplify).
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    add::all(expr, step_collector)
        .or_else(|| multiply::all(expr, step_collector))
        .or_else(|| power::all(expr, step_collector))
        .or_else(|| function::all(expr, step_collector))
        .or_else(|| distribute::distribute_coefficient(expr, step_collector))
        .or_else(|| cancel::all(expr, step_collector))
}

/// Applies all rules used by [`expand`](crate::symbolic::expand::expand).
///
/// The rules that combine terms and factors come before the distribution rules, so that
/// `x*(x+1)^-1*(x+1)` cancels before anything is distributed.
pub fn all_expand(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    add::all(expr, step_collector)
        .or_else(|| multiply::all(expr, step_collector))
        .or_else(|| power::all(expr, step_collector))
        .or_else(|| function::all(expr, step_collector))
        .or_else(|| distribute::all(expr, step_collector))
}
