//! Numerical evaluation of [`SymExpr`]s with arbitrary precision floats.
//!
//! Evaluation works on the expression as given, without simplifying it first, so that
//! `1/(2 - 2)` reports a division by zero instead of being rewritten. Results that are not real
//! numbers, such as `sqrt(-4)` and `log(-1)`, are errors rather than `NaN`.

mod fmt;

use crate::consts::{E, EPSILON, PI};
use crate::error::{DivisionByZero, NotReal, UnboundVariable, Undefined};
use crate::primitive::{float, rat};
use crate::symbolic::expr::{Constant, Func, Primary, SymExpr};
use mentor_error::Error;
use rug::{ops::Pow, Float, Rational};
use std::ops::Range;

pub use fmt::format_sig;

/// Evaluates the expression to a real number.
///
/// Errors point at the given span, which should cover the input the expression was parsed from.
pub fn eval(expr: &SymExpr, span: Range<usize>) -> Result<Float, Error> {
    Evaluator { span }.eval(expr)
}

/// Computes the exact value of an expression built from numbers with addition, multiplication, and
/// integer powers, such as the exponent `1/3` in `(-8)^(1/3)`.
fn exact(expr: &SymExpr) -> Option<Rational> {
    match expr {
        SymExpr::Primary(Primary::Number(n)) => Some(n.clone()),
        SymExpr::Primary(_) => None,
        SymExpr::Add(terms) => terms.iter()
            .try_fold(rat(0), |acc, term| Some(acc + exact(term)?)),
        SymExpr::Mul(factors) => factors.iter()
            .try_fold(rat(1), |acc, factor| Some(acc * exact(factor)?)),
        SymExpr::Exp(base, exp) => {
            let base = exact(base)?;
            let exp = exact(exp)?;
            if !exp.is_integer() || (base == 0 && exp < 0) {
                return None;
            }
            let exp = exp.numer().to_i32().filter(|exp| exp.abs() <= 64)?;
            Some(base.pow(exp))
        },
    }
}

/// Returns true if the value is close enough to zero to be treated as zero.
fn is_zero(value: &Float) -> bool {
    value.is_zero() || Float::with_val(value.prec(), value.abs_ref()) < *EPSILON
}

struct Evaluator {
    span: Range<usize>,
}

impl Evaluator {
    fn error(&self, kind: impl mentor_error::ErrorKind + 'static) -> Error {
        Error::new(vec![self.span.clone()], kind)
    }

    fn not_real(&self, expr: &SymExpr) -> Error {
        self.error(NotReal { what: expr.to_string() })
    }

    fn undefined(&self, expr: &SymExpr) -> Error {
        self.error(Undefined { what: expr.to_string() })
    }

    /// Checks that the value computed for `expr` is a finite number.
    fn finite(&self, value: Float, expr: &SymExpr) -> Result<Float, Error> {
        if value.is_nan() {
            Err(self.not_real(expr))
        } else if value.is_infinite() {
            Err(self.undefined(expr))
        } else {
            Ok(value)
        }
    }

    fn eval(&self, expr: &SymExpr) -> Result<Float, Error> {
        match expr {
            SymExpr::Primary(primary) => self.eval_primary(primary, expr),
            SymExpr::Add(terms) => terms.iter()
                .try_fold(float(0), |acc, term| -> Result<Float, Error> { Ok(acc + self.eval(term)?) }),
            SymExpr::Mul(factors) => factors.iter()
                .try_fold(float(1), |acc, factor| -> Result<Float, Error> { Ok(acc * self.eval(factor)?) }),
            SymExpr::Exp(base, exp) => {
                let base_value = self.eval(base)?;
                let value = match exact(exp) {
                    Some(exp) => self.rational_power(base_value, &exp, expr)?,
                    None => self.real_power(base_value, self.eval(exp)?, expr)?,
                };
                self.finite(value, expr)
            },
        }
    }

    fn eval_primary(&self, primary: &Primary, expr: &SymExpr) -> Result<Float, Error> {
        match primary {
            Primary::Number(n) => Ok(float(n)),
            Primary::Const(Constant::Pi) => Ok((*PI).clone()),
            Primary::Const(Constant::E) => Ok((*E).clone()),
            Primary::Symbol(name) => Err(self.error(UnboundVariable { name: name.clone() })),
            Primary::Call(func, arg) => {
                let arg = self.eval(arg)?;
                let value = match func {
                    Func::Sin => arg.sin(),
                    Func::Cos => arg.cos(),
                    Func::Tan => {
                        if is_zero(&Float::with_val(arg.prec(), arg.cos_ref())) {
                            return Err(self.undefined(expr));
                        }
                        arg.tan()
                    },
                    Func::Log => {
                        if is_zero(&arg) {
                            return Err(self.undefined(expr));
                        } else if arg < 0 {
                            return Err(self.not_real(expr));
                        }
                        arg.ln()
                    },
                };
                self.finite(value, expr)
            },
        }
    }

    /// Computes `base^exp` for an exact exponent. Odd roots of negative numbers are real.
    fn rational_power(&self, base: Float, exp: &Rational, expr: &SymExpr) -> Result<Float, Error> {
        if is_zero(&base) {
            return if *exp < 0 {
                Err(self.error(DivisionByZero))
            } else if *exp == 0 {
                Ok(float(1))
            } else {
                Ok(float(0))
            };
        }

        if exp.is_integer() {
            if let Some(exp) = exp.numer().to_i32() {
                return Ok(base.pow(exp));
            }
        }

        if base < 0 {
            if exp.denom().is_even() {
                return Err(self.not_real(expr));
            }

            let magnitude = base.abs().pow(&float(exp));
            return Ok(if exp.numer().is_odd() { -magnitude } else { magnitude });
        }

        Ok(base.pow(&float(exp)))
    }

    /// Computes `base^exp` for an exponent that had to be evaluated.
    fn real_power(&self, base: Float, exp: Float, expr: &SymExpr) -> Result<Float, Error> {
        if is_zero(&base) {
            return if exp < 0 {
                Err(self.error(DivisionByZero))
            } else {
                Ok(float(if exp.is_zero() { 1 } else { 0 }))
            };
        }

        if base < 0 && !exp.is_integer() {
            return Err(self.not_real(expr));
        }

        Ok(base.pow(&exp))
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use mentor_error::ErrorCategory;
    use mentor_parser::parse_expr;
    use pretty_assertions::assert_eq;
    use super::*;

    fn evaluate(input: &str) -> Result<Float, Error> {
        let expr = SymExpr::try_from(&parse_expr(input).unwrap()).unwrap();
        eval(&expr, 0..input.len())
    }

    #[test]
    fn arithmetic() {
        assert_eq!(evaluate("2 + 3 * 4").unwrap(), 14);
        assert_eq!(evaluate("2^(-2)").unwrap(), 0.25);
        assert_eq!(evaluate("(1 + 2)(3 + 4)").unwrap(), 21);
    }

    #[test]
    fn functions_and_constants() {
        assert_float_absolute_eq!(evaluate("sqrt(2)").unwrap().to_f64(), 2f64.sqrt(), 1e-15);
        assert_float_absolute_eq!(evaluate("sin(pi/6)").unwrap().to_f64(), 0.5, 1e-15);
        assert_float_absolute_eq!(evaluate("ln(e^2)").unwrap().to_f64(), 2.0, 1e-15);
        assert_float_absolute_eq!(evaluate("exp(1)").unwrap().to_f64(), std::f64::consts::E, 1e-15);
    }

    #[test]
    fn odd_root_of_negative() {
        assert_float_absolute_eq!(evaluate("(-8)^(1/3)").unwrap().to_f64(), -2.0, 1e-15);
    }

    #[test]
    fn division_by_zero() {
        let err = evaluate("5/(2 - 2)").unwrap_err();
        assert_eq!(err.message(), "division by zero");
        assert_eq!(err.category(), ErrorCategory::Eval);
        assert_eq!(err.spans, vec![0..9]);
    }

    #[test]
    fn not_real() {
        assert_eq!(evaluate("sqrt(-4)").unwrap_err().message(), "`sqrt(-4)` is not a real number");
        assert_eq!(evaluate("ln(-1)").unwrap_err().message(), "`log(-1)` is not a real number");
    }

    #[test]
    fn undefined() {
        assert_eq!(evaluate("log(0)").unwrap_err().message(), "`log(0)` is undefined");
        assert_eq!(evaluate("tan(pi/2)").unwrap_err().category(), ErrorCategory::Eval);
    }

    #[test]
    fn unbound_variable() {
        assert_eq!(evaluate("x + 1").unwrap_err().message(), "`x` has no value");
    }
}
