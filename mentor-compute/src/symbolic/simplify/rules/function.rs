//! Simplification rules for function calls with known values.

use crate::symbolic::{
    expr::{Constant, Func, Primary, SymExpr},
    simplify::{rules::do_call, step::Step},
    step_collector::StepCollector,
};

fn is_pi(expr: &SymExpr) -> bool {
    matches!(expr, SymExpr::Primary(Primary::Const(Constant::Pi)))
}

fn is_e(expr: &SymExpr) -> bool {
    matches!(expr, SymExpr::Primary(Primary::Const(Constant::E)))
}

/// `sin(0) = 0`
/// `sin(pi) = 0`
pub fn sin(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, Func::Sin, |arg| {
        if arg.is_zero() || is_pi(arg) {
            Some(SymExpr::number(0))
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::FunctionValue);
    Some(opt)
}

/// `cos(0) = 1`
/// `cos(pi) = -1`
pub fn cos(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, Func::Cos, |arg| {
        if arg.is_zero() {
            Some(SymExpr::number(1))
        } else if is_pi(arg) {
            Some(SymExpr::number(-1))
        } else {
            None
        }
    })?;

    step_collector.push(Step::FunctionValue);
    Some(opt)
}

/// `tan(0) = 0`
/// `tan(pi) = 0`
pub fn tan(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, Func::Tan, |arg| {
        if arg.is_zero() || is_pi(arg) {
            Some(SymExpr::number(0))
        } else {
            None
        }
    })?;

    step_collector.push(Step::FunctionValue);
    Some(opt)
}

/// `log(1) = 0`
/// `log(e) = 1`
pub fn log_value(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, Func::Log, |arg| {
        if arg.is_one() {
            Some(SymExpr::number(0))
        } else if is_e(arg) {
            Some(SymExpr::number(1))
        } else {
            None
        }
    })?;

    step_collector.push(Step::FunctionValue);
    Some(opt)
}

/// `log(e^a) = a`
pub fn log_of_exp(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, Func::Log, |arg| match arg {
        SymExpr::Exp(base, exp) if is_e(base) => Some((**exp).clone()),
        _ => None,
    })?;

    step_collector.push(Step::InverseFunctions);
    Some(opt)
}

/// Applies all function rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    sin(expr, step_collector)
        .or_else(|| cos(expr, step_collector))
        .or_else(|| tan(expr, step_collector))
        .or_else(|| log_value(expr, step_collector))
        .or_else(|| log_of_exp(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn known_values() {
        let pi = SymExpr::constant(Constant::Pi);
        assert_eq!(all(&SymExpr::call(Func::Cos, pi.clone()), &mut ()), Some(SymExpr::number(-1)));
        assert_eq!(all(&SymExpr::call(Func::Sin, SymExpr::number(0)), &mut ()), Some(SymExpr::number(0)));
        assert_eq!(all(&SymExpr::call(Func::Sin, SymExpr::number(1)), &mut ()), None);
    }

    #[test]
    fn log_undoes_exp() {
        let expr = SymExpr::call(
            Func::Log,
            SymExpr::pow(SymExpr::constant(Constant::E), SymExpr::symbol("x")),
        );
        let mut steps = Vec::new();
        assert_eq!(all(&expr, &mut steps), Some(SymExpr::symbol("x")));
        assert_eq!(steps, vec![Step::InverseFunctions]);
    }
}
