//! Decimal formatting of evaluated results.

use rug::Float;

/// Removes trailing zeros after the decimal point, and the point itself if nothing is left after
/// it.
fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Formats a value with at most the given number of significant digits, with trailing zeros
/// trimmed.
///
/// Values between `1e-6` and `1e21` in magnitude are written in positional notation (`14`, `0.5`,
/// `3.14159265358979`); other values are written in scientific notation (`1.5e25`).
pub fn format_sig(value: &Float, digits: usize) -> String {
    let value = value.to_f64();
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return String::from("0");
    }

    let digits = digits.max(1);
    let scientific = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    if (-6..21).contains(&exponent) {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        trim_zeros(&format!("{:.*}", decimals, value)).to_string()
    } else {
        format!("{}e{}", trim_zeros(mantissa), exponent)
    }
}
