//! Choosing the unknowns to solve for.

use mentor_error::Error;
use std::collections::BTreeSet;
use super::error::InvalidVariable;

/// The order in which unknowns are picked when none is given: the first one present in the
/// equation wins.
pub const VARIABLE_PREFERENCE: [&str; 7] = ["x", "y", "z", "a", "b", "c", "n"];

/// The unknown used when an equation has no variables at all.
pub const DEFAULT_VARIABLE: &str = "x";

/// The position of a variable in [`VARIABLE_PREFERENCE`], or [`None`] if it is not listed.
fn preference(name: &str) -> Option<usize> {
    VARIABLE_PREFERENCE.iter().position(|preferred| *preferred == name)
}

/// Picks the unknown to solve a single equation for, given the variables it contains.
///
/// The first variable of [`VARIABLE_PREFERENCE`] that is present wins. Otherwise, the
/// alphabetically first variable is used, and [`DEFAULT_VARIABLE`] if there are none.
pub fn detect_variable(symbols: &BTreeSet<String>) -> String {
    VARIABLE_PREFERENCE.iter()
        .find(|preferred| symbols.contains(**preferred))
        .map(|preferred| preferred.to_string())
        .or_else(|| symbols.first().cloned())
        .unwrap_or_else(|| DEFAULT_VARIABLE.to_string())
}

/// Orders the unknowns of a system: variables in [`VARIABLE_PREFERENCE`] first, in that order, then
/// the rest alphabetically.
pub fn order_unknowns(symbols: &BTreeSet<String>) -> Vec<String> {
    let mut unknowns = symbols.iter().cloned().collect::<Vec<_>>();
    unknowns.sort_by_key(|name| (preference(name).unwrap_or(VARIABLE_PREFERENCE.len()), name.clone()));
    unknowns
}

/// Parses a variable hint such as `x`, `x,y`, or `x y` into a list of unknowns.
///
/// Every name must be a single letter. Duplicates are removed, keeping the first occurrence.
pub fn parse_variable_hint(hint: &str) -> Result<Vec<String>, Error> {
    let mut unknowns = Vec::new();
    for name in hint.split(|c: char| c == ',' || c.is_whitespace()).filter(|name| !name.is_empty()) {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_alphabetic() => {
                if !unknowns.iter().any(|unknown| unknown == name) {
                    unknowns.push(name.to_string());
                }
            },
            _ => return Err(Error::new(
                vec![0..hint.len()],
                InvalidVariable { name: name.to_string() },
            )),
        }
    }
    Ok(unknowns)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn preference_order() {
        assert_eq!(detect_variable(&set(&["a", "y"])), "y");
        assert_eq!(detect_variable(&set(&["n", "c"])), "c");
    }

    #[test]
    fn unlisted_variables() {
        assert_eq!(detect_variable(&set(&["t", "m"])), "m");
        assert_eq!(detect_variable(&set(&[])), "x");
    }

    #[test]
    fn system_order() {
        assert_eq!(order_unknowns(&set(&["t", "y", "x", "b"])), vec!["x", "y", "b", "t"]);
    }

    #[test]
    fn hints() {
        assert_eq!(parse_variable_hint("x,y").unwrap(), vec!["x", "y"]);
        assert_eq!(parse_variable_hint(" x  y, x ").unwrap(), vec!["x", "y"]);
        assert_eq!(parse_variable_hint("").unwrap(), Vec::<String>::new());
        assert_eq!(parse_variable_hint("xy").unwrap_err().message(), "`xy` is not a valid variable name");
    }
}
