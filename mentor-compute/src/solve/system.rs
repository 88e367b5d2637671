//! Linear systems of equations, solved exactly with Gauss-Jordan elimination.

use crate::symbolic::{expand, expr::SymExpr, simplify, simplify::rules::add::split_coefficient};
use mentor_error::Error;
use mentor_parser::parser::ast::Equation;
use rug::Rational;
use std::collections::BTreeSet;
use super::{equation_expr, error::{NonlinearSystem, NotAnUnknown}, order_unknowns, Solution};

/// One equation of a system, written as `coefficients · unknowns = constant`.
#[derive(Debug, Clone, PartialEq)]
struct Row {
    coefficients: Vec<Rational>,
    constant: Rational,
}

impl Row {
    /// Splits an expression `expr = 0` into a row. Returns [`None`] if the expression is not a
    /// linear combination of the unknowns with numeric coefficients.
    fn from_expr(expr: &SymExpr, unknowns: &[String]) -> Option<Self> {
        let expanded = expand(&simplify(expr));
        let terms = match &expanded {
            SymExpr::Add(terms) => terms.as_slice(),
            expr => std::slice::from_ref(expr),
        };

        let mut row = Self {
            coefficients: vec![Rational::new(); unknowns.len()],
            constant: Rational::new(),
        };
        for term in terms {
            if let Some(n) = term.as_number() {
                row.constant -= n;
                continue;
            }

            let (coefficient, rest) = split_coefficient(term);
            let idx = unknowns.iter().position(|unknown| Some(unknown.as_str()) == rest.as_symbol())?;
            row.coefficients[idx] += coefficient;
        }
        Some(row)
    }

    fn is_zero(&self) -> bool {
        self.coefficients.iter().all(|c| *c == 0)
    }
}

/// Solves a system of linear equations for the given unknowns, or for every variable it contains.
pub(super) fn solve_system(
    equations: &[Equation],
    hint: Option<Vec<String>>,
    source: &str,
) -> Result<Solution, Error> {
    let exprs = equations.iter()
        .map(equation_expr)
        .collect::<Result<Vec<_>, _>>()?;
    let unknowns = hint.unwrap_or_else(|| {
        let symbols = exprs.iter()
            .flat_map(SymExpr::symbols)
            .collect::<BTreeSet<_>>();
        order_unknowns(&symbols)
    });

    let mut rows = Vec::with_capacity(equations.len());
    for (equation, expr) in equations.iter().zip(&exprs) {
        let span = equation.span();
        let text = source.get(span.clone()).unwrap_or(source).trim().to_string();

        let parameter = expr.symbols()
            .into_iter()
            .find(|symbol| !unknowns.contains(symbol));
        if let Some(name) = parameter {
            return Err(Error::new(
                vec![span],
                NotAnUnknown { name, equation: text, unknowns: unknowns.join(", ") },
            ));
        }

        match Row::from_expr(expr, &unknowns) {
            Some(row) => rows.push(row),
            None => return Err(Error::new(
                vec![span],
                NonlinearSystem { equation: text, unknowns: unknowns.join(", ") },
            )),
        }
    }

    let pivots = eliminate(&mut rows, unknowns.len());
    let assignments = if rows.iter().any(|row| row.is_zero() && row.constant != 0) {
        None
    } else {
        Some(back_substitute(&rows, &pivots, &unknowns))
    };
    Ok(Solution::System { unknowns, assignments })
}

/// Reduces the rows to reduced row echelon form, returning the column of the pivot of each of the
/// leading rows.
fn eliminate(rows: &mut [Row], columns: usize) -> Vec<usize> {
    let mut pivots = Vec::new();
    let mut pivot_row = 0;
    for col in 0..columns {
        let Some(found) = (pivot_row..rows.len()).find(|&idx| rows[idx].coefficients[col] != 0) else {
            continue;
        };
        rows.swap(pivot_row, found);

        // scale the pivot to one
        let pivot = rows[pivot_row].coefficients[col].clone();
        let row = &mut rows[pivot_row];
        row.coefficients.iter_mut().for_each(|c| *c /= &pivot);
        row.constant /= &pivot;

        // then clear the column in every other row
        let reference = rows[pivot_row].clone();
        for (idx, row) in rows.iter_mut().enumerate() {
            if idx == pivot_row || row.coefficients[col] == 0 {
                continue;
            }
            let factor = row.coefficients[col].clone();
            for (c, r) in row.coefficients.iter_mut().zip(&reference.coefficients) {
                *c -= Rational::from(&factor * r);
            }
            row.constant -= Rational::from(&factor * &reference.constant);
        }

        pivots.push(col);
        pivot_row += 1;
        if pivot_row == rows.len() {
            break;
        }
    }
    pivots
}

/// Expresses each pivot unknown in terms of the free unknowns, in the order the unknowns were
/// declared.
fn back_substitute(rows: &[Row], pivots: &[usize], unknowns: &[String]) -> Vec<(String, SymExpr)> {
    let mut assignments = pivots.iter()
        .zip(rows)
        .map(|(&col, row)| {
            let mut value = SymExpr::from(row.constant.clone());
            for (idx, c) in row.coefficients.iter().enumerate() {
                if idx != col && *c != 0 {
                    value += SymExpr::from(-c.clone()) * SymExpr::symbol(unknowns[idx].clone());
                }
            }
            (col, unknowns[col].clone(), simplify(&value))
        })
        .collect::<Vec<_>>();
    assignments.sort_by_key(|(col, _, _)| *col);
    assignments.into_iter()
        .map(|(_, name, value)| (name, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::solve::solve;
    use mentor_error::ErrorCategory;
    use pretty_assertions::assert_eq;

    fn solved(input: &str, hint: Option<&str>) -> String {
        solve(input, hint).unwrap().to_string()
    }

    #[test]
    fn unique_solution() {
        assert_eq!(solved("x + 3*y = 7, x - y = 1", Some("x,y")), "x = 5/2, y = 3/2");
        assert_eq!(solved("x + y = 10, x - y = 2", None), "x = 6, y = 4");
    }

    #[test]
    fn declared_order() {
        assert_eq!(solved("x + y = 10, x - y = 2", Some("y x")), "y = 4, x = 6");
    }

    #[test]
    fn three_unknowns() {
        assert_eq!(
            solved("x + y + z = 6, 2x - y + z = 3, x + 2y - z = 2", None),
            "x = 1, y = 2, z = 3",
        );
    }

    #[test]
    fn inconsistent() {
        assert_eq!(solved("x + y = 1, x + y = 2", None), "No solution found");
    }

    #[test]
    fn underdetermined() {
        assert_eq!(solved("x + y = 3, 2x + 2y = 6", None), "x = -y + 3");
    }

    #[test]
    fn parameter_is_not_an_unknown() {
        let err = solve("x + a = 1, x - a = 3", Some("x")).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Solve);
        assert_eq!(err.spans, vec![0..9]);
        assert!(err.message().contains("`a` in `x + a = 1` is not one of the unknowns"), "{}", err);
    }

    #[test]
    fn nonlinear() {
        let err = solve("x*y = 1, x + y = 2", None).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Solve);
        assert_eq!(err.spans, vec![0..7]);
    }
}
