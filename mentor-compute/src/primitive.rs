//! Functions to construct [`Integer`]s, [`Rational`]s, and [`Float`]s from various types.

use rug::{Assign, Float, Integer, Rational};

/// The number of bits of precision to use when computing approximate values.
pub const PRECISION: u32 = 1 << 9;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates a [`Rational`] with the given value.
pub fn rat<T>(n: T) -> Rational
where
    Rational: From<T>,
{
    Rational::from(n)
}

/// Creates a [`Float`] with the given value.
pub fn float<T>(n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(PRECISION, n)
}

/// Parses a decimal literal such as `14`, `3.14`, `.5`, or `2.` into an exact [`Rational`].
///
/// Returns [`None`] if the string contains anything other than ASCII digits and at most one `.`.
pub fn rat_from_decimal(s: &str) -> Option<Rational> {
    let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }

    let digits = format!("{}{}", whole, fraction);
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let numerator = digits.parse::<Integer>().ok()?;
    let denominator = Integer::from(Integer::u_pow_u(10, fraction.len() as u32));
    Some(Rational::from((numerator, denominator)))
}
