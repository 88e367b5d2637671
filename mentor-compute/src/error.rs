//! Errors produced while converting parsed input into symbolic expressions, and while evaluating
//! expressions numerically.

use ariadne::Fmt;
use mentor_attrs::ErrorKind;
use mentor_error::{ErrorCategory, EXPR};

/// A multi-letter name that is neither a known function nor a constant.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown identifier `{}`", name),
    labels = ["this name"],
    help = match suggestion {
        Some(suggestion) => format!("did you mean `{}`?", suggestion.fg(EXPR)),
        None => format!(
            "variables are single letters; to multiply them, write `{}`",
            name.chars().map(String::from).collect::<Vec<_>>().join("*").fg(EXPR),
        ),
    },
    category = ErrorCategory::Unsupported,
)]
pub struct UnknownIdentifier {
    /// The name that was used.
    pub name: String,

    /// The closest supported name, if one is close enough.
    pub suggestion: Option<String>,
}

/// A function call to a function outside the supported set.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown function `{}`", name),
    labels = ["this function"],
    help = match suggestion {
        Some(suggestion) => format!("did you mean `{}`?", suggestion.fg(EXPR)),
        None => String::from("supported functions are sqrt, sin, cos, tan, log, ln, and exp"),
    },
    category = ErrorCategory::Unsupported,
)]
pub struct UnknownFunction {
    /// The name of the function.
    pub name: String,

    /// The closest supported function name, if one is close enough.
    pub suggestion: Option<String>,
}

/// A function was called with the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` takes {} argument(s), but {} were given", name, expected, given),
    labels = ["this call"],
    category = ErrorCategory::Unsupported,
)]
pub struct WrongArgumentCount {
    /// The name of the function.
    pub name: String,

    /// The number of arguments the function takes.
    pub expected: usize,

    /// The number of arguments that were given.
    pub given: usize,
}

/// A function name was used without calling it, such as `sqrt + 1`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is a function and must be called", name),
    labels = ["this function"],
    help = format!("add parentheses around its argument, like `{}`", format!("{}(x)", name).fg(EXPR)),
    category = ErrorCategory::Unsupported,
)]
pub struct FunctionNotCalled {
    /// The name of the function.
    pub name: String,
}

/// A division by zero, such as `1/0` or `5/(2 - 2)`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "division by zero",
    labels = ["this expression"],
    category = ErrorCategory::Eval,
)]
pub struct DivisionByZero;

/// The result is not a real number, such as `sqrt(-4)` or `ln(-1)`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not a real number", what),
    labels = ["this expression"],
    category = ErrorCategory::Eval,
)]
pub struct NotReal {
    /// The subexpression that has no real value.
    pub what: String,
}

/// The result is undefined, such as `log(0)` or `tan(pi/2)`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is undefined", what),
    labels = ["this expression"],
    category = ErrorCategory::Eval,
)]
pub struct Undefined {
    /// The subexpression that is undefined.
    pub what: String,
}

/// A variable has no value during numerical evaluation.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` has no value", name),
    labels = ["this expression"],
    category = ErrorCategory::Eval,
)]
pub struct UnboundVariable {
    /// The name of the variable.
    pub name: String,
}
