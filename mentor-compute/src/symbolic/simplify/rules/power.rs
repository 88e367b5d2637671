//! Simplification rules for powers and roots.

use crate::primitive::{int, rat};
use crate::symbolic::{
    expr::{Constant, Func, Primary, SymExpr},
    simplify::{rules::do_power, step::Step},
    step_collector::StepCollector,
};
use rug::{ops::Pow, Integer, Rational};

/// Powers with larger integer exponents than this are left unevaluated.
const MAX_EXPONENT: i32 = 1024;

/// Numbers with more bits than this are not created by evaluating powers.
const MAX_BITS: u32 = 1 << 16;

/// Roots of higher degree than this are left unevaluated.
const MAX_ROOT_DEGREE: u32 = 64;

/// Perfect powers are searched for by trial division up to this divisor.
const TRIAL_DIVISION_LIMIT: u32 = 100_000;

/// `a^0 = 1`
pub fn power_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |_, rhs| {
        if rhs.is_zero() {
            Some(SymExpr::number(1))
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// `a^1 = a`
pub fn power_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if rhs.is_one() {
            Some(lhs.clone())
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerOne);
    Some(opt)
}

/// `0^a = 0`, for positive numbers `a`
/// `1^a = 1`
pub fn trivial_base(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if lhs.is_zero() && rhs.as_number().map_or(false, |n| *n > 0) {
            Some(SymExpr::number(0))
        } else if lhs.is_one() {
            Some(SymExpr::number(1))
        } else {
            None
        }
    })?;

    step_collector.push(Step::TrivialBase);
    Some(opt)
}

/// `2^3 = 8`
/// `2^-1 = 1/2`
pub fn evaluate_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let base = lhs.as_number()?;
        let exp = rhs.as_number()?;
        if !exp.is_integer() {
            return None;
        }

        let exp = exp.numer().to_i32().filter(|exp| exp.abs() <= MAX_EXPONENT)?;
        if *base == 0 && exp < 0 {
            // division by zero is reported by the evaluator
            return None;
        }

        let bits = base.numer().significant_bits() + base.denom().significant_bits();
        if bits.saturating_mul(exp.unsigned_abs()) > MAX_BITS {
            return None;
        }

        Some(SymExpr::from(base.clone().pow(exp)))
    })?;

    step_collector.push(Step::EvaluatePower);
    Some(opt)
}

/// Splits `n` into `(s, t)` such that `n = s^q * t`, taking as much out of `t` as trial division
/// finds.
fn split_perfect_power(n: &Integer, q: u32) -> (Integer, Integer) {
    let mut outside = int(1);
    let mut inside = int(1);
    let mut rest = n.clone();
    let mut completed = false;

    for divisor in 2..=TRIAL_DIVISION_LIMIT {
        let divisor = int(divisor);
        if Integer::from(&divisor * &divisor) > rest {
            completed = true;
            break;
        }

        let mut count = 0;
        while rest.is_divisible(&divisor) {
            rest /= &divisor;
            count += 1;
        }

        if count > 0 {
            outside *= divisor.clone().pow(count / q);
            inside *= divisor.pow(count % q);
        }
    }

    if rest > 1 {
        if completed {
            // `rest` is prime
            inside *= rest;
        } else {
            let root = rest.clone().root(q);
            if root.clone().pow(q) == rest {
                outside *= root;
            } else {
                inside *= rest;
            }
        }
    }

    (outside, inside)
}

/// Takes perfect powers out of roots of numbers, and rationalizes the denominator.
///
/// `sqrt(8) = 2*sqrt(2)`
/// `sqrt(1/2) = sqrt(2)/2`
/// `8^(2/3) = 4`
/// `(-8)^(1/3) = -2`
pub fn extract_root(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let base = lhs.as_number()?;
        let exp = rhs.as_number()?;
        if exp.is_integer() || *base == 0 {
            return None;
        }

        let q = exp.denom().to_u32().filter(|q| *q <= MAX_ROOT_DEGREE)?;
        let p = exp.numer().to_i32().filter(|p| p.abs() <= MAX_EXPONENT)?;
        let negative = if *base < 0 {
            // even roots of negative numbers are not real
            if q % 2 == 0 {
                return None;
            }
            p % 2 != 0
        } else {
            false
        };

        // a^(p/q) = a^k * a^(r/q), with 0 < r < q
        let k = p.div_euclid(q as i32);
        let r = p.rem_euclid(q as i32) as u32;

        // (n/d)^(1/q) = (n*d^(q-1))^(1/q) / d
        let magnitude = base.clone().abs();
        let (numer, denom) = magnitude.clone().into_numer_denom();
        let radicand = numer * denom.clone().pow(q - 1);
        if radicand.significant_bits().saturating_mul(r) > MAX_BITS {
            return None;
        }

        let (outside, inside) = split_perfect_power(&radicand.pow(r), q);
        let mut coefficient = magnitude.pow(k) * Rational::from((outside, denom.pow(r)));
        if negative {
            coefficient = -coefficient;
        }

        let result = if inside == 1 {
            SymExpr::from(coefficient)
        } else {
            let root = SymExpr::pow(SymExpr::from(rat(inside)), SymExpr::from(rat((1, q))));
            if coefficient == 1 {
                root
            } else {
                SymExpr::from(coefficient) * root
            }
        };

        if result == SymExpr::pow(lhs.clone(), rhs.clone()) {
            None
        } else {
            Some(result)
        }
    })?;

    step_collector.push(Step::ExtractRoot);
    Some(opt)
}

/// `(a^b)^c = a^(b*c)`, for integers `c`
/// `(2^b)^c = 2^(b*c)`, for numbers `c` and positive bases
pub fn power_of_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let SymExpr::Exp(base, inner_exp) = lhs else {
            return None;
        };
        let positive_base = base.as_number().map_or(false, |n| *n > 0);
        let outer = rhs.as_number().filter(|n| n.is_integer() || positive_base)?;

        let exp = match inner_exp.as_number() {
            Some(inner) => SymExpr::from(Rational::from(inner * outer)),
            None => (**inner_exp).clone() * rhs.clone(),
        };
        Some(SymExpr::pow((**base).clone(), exp))
    })?;

    step_collector.push(Step::PowerOfPower);
    Some(opt)
}

/// `(a*b)^c = a^c * b^c`, for integers `c`
/// `(4*a)^c = 4^c * a^c`, for numbers `c`
pub fn distribute_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let SymExpr::Mul(factors) = lhs else {
            return None;
        };
        let exp = rhs.as_number()?;

        if exp.is_integer() {
            return Some(SymExpr::Mul(
                factors.iter()
                    .map(|factor| SymExpr::pow(factor.clone(), rhs.clone()))
                    .collect(),
            ));
        }

        // only positive numbers can be taken out of a root
        let (positive, rest): (Vec<_>, Vec<_>) = factors.iter()
            .cloned()
            .partition(|factor| factor.as_number().map_or(false, |n| *n > 0));
        if positive.is_empty() || rest.is_empty() {
            return None;
        }

        Some(SymExpr::Mul(vec![
            SymExpr::pow(SymExpr::Mul(positive).downgrade(), rhs.clone()),
            SymExpr::pow(SymExpr::Mul(rest).downgrade(), rhs.clone()),
        ]))
    })?;

    step_collector.push(Step::DistributePower);
    Some(opt)
}

/// `e^log(a) = a`
pub fn exp_of_log(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| match (lhs, rhs) {
        (
            SymExpr::Primary(Primary::Const(Constant::E)),
            SymExpr::Primary(Primary::Call(Func::Log, arg)),
        ) => Some((**arg).clone()),
        _ => None,
    })?;

    step_collector.push(Step::InverseFunctions);
    Some(opt)
}

/// Applies all power rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    power_zero(expr, step_collector)
        .or_else(|| power_one(expr, step_collector))
        .or_else(|| trivial_base(expr, step_collector))
        .or_else(|| evaluate_power(expr, step_collector))
        .or_else(|| extract_root(expr, step_collector))
        .or_else(|| power_of_power(expr, step_collector))
        .or_else(|| distribute_power(expr, step_collector))
        .or_else(|| exp_of_log(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn root(n: i32, q: u32) -> SymExpr {
        SymExpr::pow(SymExpr::number(n), SymExpr::from(rat((1, q))))
    }

    #[test]
    fn perfect_square() {
        assert_eq!(extract_root(&root(16, 2), &mut ()), Some(SymExpr::number(4)));
    }

    #[test]
    fn partial_square() {
        assert_eq!(
            extract_root(&root(8, 2), &mut ()),
            Some(SymExpr::number(2) * root(2, 2)),
        );
    }

    #[test]
    fn square_free_is_unchanged() {
        assert_eq!(extract_root(&root(6, 2), &mut ()), None);
    }

    #[test]
    fn rationalized_denominator() {
        let expr = SymExpr::pow(SymExpr::from(rat((1, 2))), SymExpr::from(rat((1, 2))));
        assert_eq!(
            extract_root(&expr, &mut ()),
            Some(SymExpr::from(rat((1, 2))) * root(2, 2)),
        );
    }

    #[test]
    fn odd_root_of_negative() {
        assert_eq!(extract_root(&root(-8, 3), &mut ()), Some(SymExpr::number(-2)));
        assert_eq!(extract_root(&root(-4, 2), &mut ()), None);
    }

    #[test]
    fn negative_fractional_exponent() {
        let expr = SymExpr::pow(SymExpr::number(4), SymExpr::from(rat((-1, 2))));
        assert_eq!(extract_root(&expr, &mut ()), Some(SymExpr::from(rat((1, 2)))));
    }

    #[test]
    fn integer_powers() {
        let expr = SymExpr::pow(SymExpr::number(2), SymExpr::number(-3));
        assert_eq!(evaluate_power(&expr, &mut ()), Some(SymExpr::from(rat((1, 8)))));

        let expr = SymExpr::pow(SymExpr::number(0), SymExpr::number(-1));
        assert_eq!(evaluate_power(&expr, &mut ()), None);
    }

    #[test]
    fn large_prime_factor() {
        // 2 * 1000003^2, where 1000003 is prime and larger than the trial division limit
        let n = int(2) * int(1_000_003) * int(1_000_003);
        assert_eq!(split_perfect_power(&n, 2), (int(1_000_003), int(2)));
    }
}
