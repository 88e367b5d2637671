//! Errors produced by the equation solver.

use ariadne::Fmt;
use mentor_attrs::ErrorKind;
use mentor_error::{ErrorCategory, EXPR};

/// The equation is not a polynomial in the unknown, even after clearing denominators.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot solve `{}` for `{}`: it is not a polynomial equation in `{}`", equation, variable, variable),
    labels = ["this equation"],
    help = "equations with roots, logarithms, or trigonometric functions of the unknown are not supported",
    category = ErrorCategory::Solve,
)]
pub struct NotPolynomial {
    /// The text of the equation.
    pub equation: String,

    /// The unknown being solved for.
    pub variable: String,
}

/// The equation is a polynomial of degree 3 or more that has no closed form the solver can find.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot solve `{}` exactly: it has degree {}", equation, degree),
    labels = ["this equation"],
    help = "equations of degree 3 or more are only solved when all but two of their roots are rational",
    category = ErrorCategory::Solve,
)]
pub struct DegreeTooHigh {
    /// The text of the equation.
    pub equation: String,

    /// The degree of the part of the polynomial that could not be solved.
    pub degree: usize,
}

/// The coefficients of the unknown contain other variables, and the equation is not linear.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot solve `{}` for `{}`: it has degree {} with symbolic coefficients", equation, variable, degree),
    labels = ["this equation"],
    help = "only linear equations can have other variables in their coefficients",
    category = ErrorCategory::Solve,
)]
pub struct SymbolicCoefficients {
    /// The text of the equation.
    pub equation: String,

    /// The unknown being solved for.
    pub variable: String,

    /// The degree of the equation in the unknown.
    pub degree: usize,
}

/// An equation of a system is not linear in the unknowns, or has coefficients that are not
/// numbers.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot solve the system: `{}` is not linear in {}", equation, unknowns),
    labels = ["this equation"],
    help = format!(
        "systems are solved when every equation looks like `{}`",
        "2*x + 3*y = 7".fg(EXPR),
    ),
    category = ErrorCategory::Solve,
)]
pub struct NonlinearSystem {
    /// The text of the equation.
    pub equation: String,

    /// The unknowns of the system, separated by commas.
    pub unknowns: String,
}

/// The unknown does not appear in an equation that contains other variables.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` does not appear in `{}`", variable, equation),
    labels = ["this equation"],
    help = "name the variable to solve for, or leave it out to detect it automatically",
    category = ErrorCategory::Solve,
)]
pub struct VariableNotFound {
    /// The text of the equation.
    pub equation: String,

    /// The unknown that was asked for.
    pub variable: String,
}

/// The variable hint names something that is not a variable.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not a valid variable name", name),
    labels = ["in this input"],
    help = "variables are single letters, such as `x` or `y`; separate several with commas",
    category = ErrorCategory::Solve,
)]
pub struct InvalidVariable {
    /// The name that was given.
    pub name: String,
}

/// An equation of a system contains a variable that is not one of the unknowns being solved for.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot solve the system for {}: `{}` in `{}` is not one of the unknowns", unknowns, name, equation),
    labels = ["this equation"],
    help = format!(
        "list every variable of the system as an unknown, such as `{}`, or leave the unknowns out to detect them",
        "x, y".fg(EXPR),
    ),
    category = ErrorCategory::Solve,
)]
pub struct NotAnUnknown {
    /// The variable that is not an unknown.
    pub name: String,

    /// The text of the equation.
    pub equation: String,

    /// The unknowns of the system, separated by commas.
    pub unknowns: String,
}
