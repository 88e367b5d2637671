//! Exact solving of equations and linear systems.
//!
//! [`solve`] accepts the text of one equation, or several separated by commas. A single equation
//! is solved for one unknown:
//!
//! - Denominators containing the unknown are cleared first. Roots that make one of them zero are
//!   discarded.
//! - Linear equations are solved directly, even if other variables appear in the coefficients.
//! - Quadratic equations are solved with the quadratic formula, keeping roots exact (`sqrt(2)`).
//!   Only real roots are returned.
//! - Higher degree equations with rational coefficients have their rational roots divided out,
//!   and the remaining factor is solved if its degree is at most two.
//!
//! Several equations form a linear system, solved with Gauss-Jordan elimination over the
//! rationals.

pub mod error;
mod system;
mod variable;

use crate::numerical::eval;
use crate::primitive::rat;
use crate::symbolic::{
    expand,
    expr::SymExpr,
    poly::{coefficients, Poly},
    simplify,
};
use error::{DegreeTooHigh, NotPolynomial, SymbolicCoefficients, VariableNotFound};
use mentor_error::Error;
use mentor_parser::{
    parse_equation,
    parse_equation_list,
    parser::ast::Equation,
};
use rug::Rational;
use std::{cmp::Ordering, collections::BTreeMap, fmt, ops::Range};

pub use variable::{
    detect_variable,
    order_unknowns,
    parse_variable_hint,
    DEFAULT_VARIABLE,
    VARIABLE_PREFERENCE,
};

/// The result of solving an equation or a system of equations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Solution {
    /// The values of the unknown that satisfy a single equation, in ascending order. Empty if the
    /// equation has no real solution.
    Roots {
        variable: String,
        roots: Vec<SymExpr>,
    },

    /// Every value of the unknown satisfies the equation, such as `x = x`.
    Identity {
        variable: String,
    },

    /// The solution of a system of equations.
    System {
        /// The unknowns of the system, in the order they were declared.
        unknowns: Vec<String>,

        /// The value of each unknown that is determined by the system, in terms of the unknowns
        /// that are free. [`None`] if the system is inconsistent.
        assignments: Option<Vec<(String, SymExpr)>>,
    },
}

impl Solution {
    /// The unknowns that were solved for.
    pub fn variables(&self) -> Vec<String> {
        match self {
            Self::Roots { variable, .. } | Self::Identity { variable } => vec![variable.clone()],
            Self::System { unknowns, .. } => unknowns.clone(),
        }
    }

    /// Each solution as text: the value of each root, or `name = value` for each unknown of a
    /// system.
    pub fn solutions(&self) -> Vec<String> {
        match self {
            Self::Roots { roots, .. } => roots.iter().map(ToString::to_string).collect(),
            Self::Identity { .. } => Vec::new(),
            Self::System { assignments, .. } => assignments.iter()
                .flatten()
                .map(|(name, value)| format!("{} = {}", name, value))
                .collect(),
        }
    }

    /// Returns true if there is at least one solution.
    pub fn has_solution(&self) -> bool {
        match self {
            Self::Roots { roots, .. } => !roots.is_empty(),
            Self::Identity { .. } => true,
            Self::System { assignments, .. } => assignments.is_some(),
        }
    }
}

/// Formats the solution the way the tools report it: `x = -2, x = 2`, `No solution found`, or
/// `Every value of x is a solution`.
impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Roots { roots, .. } if roots.is_empty() => write!(f, "No solution found"),
            Self::Roots { variable, roots } => {
                let parts = roots.iter()
                    .map(|root| format!("{} = {}", variable, root))
                    .collect::<Vec<_>>();
                write!(f, "{}", parts.join(", "))
            },
            Self::Identity { variable } => write!(f, "Every value of {} is a solution", variable),
            Self::System { assignments: None, .. } => write!(f, "No solution found"),
            Self::System { unknowns, assignments: Some(assignments) } if assignments.is_empty() => {
                write!(f, "Every value of {} is a solution", unknowns.join(", "))
            },
            Self::System { assignments: Some(_), .. } => write!(f, "{}", self.solutions().join(", ")),
        }
    }
}

/// Converts an equation `lhs = rhs` into the expression `lhs - rhs`.
pub(crate) fn equation_expr(equation: &Equation) -> Result<SymExpr, Error> {
    let lhs = SymExpr::try_from(&equation.lhs)?;
    match &equation.rhs {
        Some(rhs) => Ok(lhs - SymExpr::try_from(rhs)?),
        None => Ok(lhs),
    }
}

/// Solves one equation, or a system of comma-separated equations.
///
/// The hint names the unknowns to solve for, separated by commas or whitespace. Without a hint,
/// the unknown of a single equation is picked by [`detect_variable`], and the unknowns of a system
/// are every variable in it, ordered by [`order_unknowns`].
pub fn solve(input: &str, hint: Option<&str>) -> Result<Solution, Error> {
    let hint = hint.map(parse_variable_hint).transpose()?.filter(|unknowns| !unknowns.is_empty());
    let list = parse_equation_list(input)?;
    match list.equations.as_slice() {
        [equation] => {
            let variable = hint.and_then(|unknowns| unknowns.into_iter().next());
            solve_equation(equation, variable, input)
        },
        equations => system::solve_system(equations, hint, input),
    }
}

/// Collects the bases of every power with a negative exponent that contains the unknown, with the
/// largest integer exponent seen for each.
fn collect_denominators(expr: &SymExpr, variable: &str, denominators: &mut BTreeMap<SymExpr, u32>) {
    match expr {
        SymExpr::Primary(_) => (),
        SymExpr::Add(exprs) | SymExpr::Mul(exprs) => exprs.iter()
            .for_each(|expr| collect_denominators(expr, variable, denominators)),
        SymExpr::Exp(base, exp) => {
            collect_denominators(base, variable, denominators);
            let power = exp.as_number()
                .filter(|n| n.is_integer() && **n < 0)
                .and_then(|n| n.numer().clone().abs().to_u32());
            if let Some(power) = power {
                if base.contains_symbol(variable) {
                    let entry = denominators.entry((**base).clone()).or_insert(0);
                    *entry = (*entry).max(power);
                }
            }
        },
    }
}

/// Solves a single equation for the given unknown, or for the detected one.
fn solve_equation(equation: &Equation, variable: Option<String>, source: &str) -> Result<Solution, Error> {
    let span = equation.span();
    let text = source.get(span.clone()).unwrap_or(source).trim().to_string();
    let expr = equation_expr(equation)?;
    let variable = variable.unwrap_or_else(|| detect_variable(&expr.symbols()));

    let difference = simplify(&expr);
    if difference.is_zero() {
        return Ok(Solution::Identity { variable });
    }
    if !difference.contains_symbol(&variable) {
        if difference.is_constant() {
            return Ok(Solution::Roots { variable, roots: Vec::new() });
        }
        return Err(Error::new(vec![span], VariableNotFound { equation: text, variable }));
    }

    // multiply through by every denominator containing the unknown
    let mut denominators = BTreeMap::new();
    collect_denominators(&difference, &variable, &mut denominators);
    let multiplier = SymExpr::Mul(
        denominators.into_iter()
            .map(|(base, power)| SymExpr::pow(base, SymExpr::number(power)))
            .collect(),
    );
    let terms = match difference {
        SymExpr::Add(terms) => terms,
        term => vec![term],
    };

    // simplify each term on its own so the denominators cancel before anything is distributed
    let cleared = SymExpr::Add(
        terms.into_iter()
            .map(|term| simplify(&(term * multiplier.clone())))
            .collect(),
    );
    let numerator = expand(&cleared);

    let roots = match Poly::from_expr(&numerator, &variable) {
        Some(poly) if poly.is_zero() => return Ok(Solution::Identity { variable }),
        Some(poly) => poly_roots(&poly, &text, span.clone())?,
        None => symbolic_roots(&numerator, &variable, &text, span.clone())?,
    };

    // discard roots where the original equation is undefined, such as `x = 1` in `1/(x - 1) = 0`
    let mut roots = roots.into_iter()
        .map(|root| simplify(&root))
        .filter(|root| {
            !root.is_constant()
                || eval(&expr.substitute(&variable, root), span.clone()).is_ok()
        })
        .collect::<Vec<_>>();
    sort_roots(&mut roots, span);
    Ok(Solution::Roots { variable, roots })
}

/// Sorts constant roots in ascending numerical order, and removes duplicates.
fn sort_roots(roots: &mut Vec<SymExpr>, span: Range<usize>) {
    let mut keyed = roots.drain(..)
        .map(|root| (eval(&root, span.clone()).ok(), root))
        .collect::<Vec<_>>();
    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    for (_, root) in keyed {
        if !roots.contains(&root) {
            roots.push(root);
        }
    }
}

/// `a*x + b = 0`
fn linear_root(a: &Rational, b: &Rational) -> SymExpr {
    SymExpr::from(-b.clone() / a)
}

/// Solves `a*x^2 + b*x + c = 0` with the quadratic formula.
fn quadratic_roots(a: &Rational, b: &Rational, c: &Rational, span: Range<usize>) -> Vec<SymExpr> {
    let two_a = Rational::from(a * 2);
    let discriminant: Rational = Rational::from(b * b) - Rational::from(a * c) * 4;
    match discriminant.cmp0() {
        Ordering::Less => Vec::new(),
        Ordering::Equal => vec![SymExpr::from(-b.clone() / two_a)],
        Ordering::Greater => {
            let root = SymExpr::pow(SymExpr::from(discriminant), SymExpr::from(rat((1, 2))));
            let denominator = SymExpr::from(two_a.recip());
            let mut roots = [-1, 1].into_iter()
                .map(|sign| {
                    let numerator = SymExpr::from(-b.clone()) + SymExpr::number(sign) * root.clone();
                    simplify(&(denominator.clone() * numerator))
                })
                .collect::<Vec<_>>();
            sort_roots(&mut roots, span);
            roots
        },
    }
}

/// Finds the roots of a polynomial with rational coefficients.
fn poly_roots(poly: &Poly, equation: &str, span: Range<usize>) -> Result<Vec<SymExpr>, Error> {
    match poly.degree() {
        None | Some(0) => Ok(Vec::new()),
        Some(1) => Ok(vec![linear_root(&poly.coeff(1), &poly.coeff(0))]),
        Some(2) => Ok(quadratic_roots(&poly.coeff(2), &poly.coeff(1), &poly.coeff(0), span)),
        Some(_) => {
            let (rational, rest) = poly.split_rational_roots();
            let mut roots = rational.into_iter()
                .map(|(root, _)| SymExpr::from(root))
                .collect::<Vec<_>>();
            match rest.degree() {
                None | Some(0) => (),
                Some(degree) if degree <= 2 => roots.extend(poly_roots(&rest, equation, span)?),
                Some(degree) => return Err(Error::new(
                    vec![span],
                    DegreeTooHigh { equation: equation.to_string(), degree },
                )),
            }
            Ok(roots)
        },
    }
}

/// Solves an equation whose coefficients contain other variables. Only linear equations are
/// supported.
fn symbolic_roots(
    numerator: &SymExpr,
    variable: &str,
    equation: &str,
    span: Range<usize>,
) -> Result<Vec<SymExpr>, Error> {
    let Some(coeffs) = coefficients(numerator, variable) else {
        return Err(Error::new(
            vec![span],
            NotPolynomial { equation: equation.to_string(), variable: variable.to_string() },
        ));
    };

    match coeffs.as_slice() {
        [b, a] => {
            let a = simplify(a);
            if a.is_zero() {
                return Ok(Vec::new());
            }
            Ok(vec![simplify(&(-b.clone() * a.recip()))])
        },
        coeffs => Err(Error::new(
            vec![span],
            SymbolicCoefficients {
                equation: equation.to_string(),
                variable: variable.to_string(),
                degree: coeffs.len().saturating_sub(1),
            },
        )),
    }
}

/// Checks whether assigning `value` to `variable` satisfies the equation.
///
/// Returns [`None`] if the equation cannot be parsed or the check is inconclusive, such as when
/// the equation contains other variables.
pub fn satisfies(equation: &str, variable: &str, value: &SymExpr) -> Option<bool> {
    let expr = equation_expr(&parse_equation(equation).ok()?).ok()?;
    let substituted = simplify(&expr.substitute(variable, value));
    if substituted.is_zero() {
        return Some(true);
    }
    if !substituted.is_constant() {
        return None;
    }

    // compare numerically to accept rounded answers, such as `1.4142135623731` for `sqrt(2)`
    let value = eval(&substituted, 0..equation.len()).ok()?;
    Some(value.to_f64().abs() < 1e-9)
}
