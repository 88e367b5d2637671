//! Static constants that return [`Float`]s with the given value.

use once_cell::sync::Lazy;
use rug::{ops::Pow, Float};
use super::primitive::float;

/// Euler's number.
pub static E: Lazy<Float> = Lazy::new(|| float(1).exp());

pub static PI: Lazy<Float> = Lazy::new(|| float(-1).acos());

/// Values smaller than this in magnitude are treated as zero when checking computed roots.
pub static EPSILON: Lazy<Float> = Lazy::new(|| float(10).pow(-40));
