//! Error kinds produced while parsing.

use ariadne::Fmt;
use mentor_attrs::ErrorKind;
use mentor_error::EXPR;
use crate::tokenizer::TokenKind;

/// An intentionally useless error. This should only be used for non-fatal errors, as it contains
/// no useful information.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "an internal non-fatal error occurred while parsing",
    labels = ["here"],
    help = "you should never see this error; please report this as a bug"
)]
pub struct NonFatal;

/// The end of the input was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of input",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the input was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of input",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected {}", describe(*found)),
    labels = [format!("expected {}", expected.iter().map(|t| describe(*t)).collect::<Vec<_>>().join(" or "))],
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// A character that is not part of the notation.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unrecognized symbol `{}`", symbol),
    labels = ["this symbol"],
    help = "use `+`, `-`, `*`, `/`, `^`, parentheses, numbers, and letters",
)]
pub struct UnrecognizedSymbol {
    /// The symbol that was found.
    pub symbol: String,
}

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = if *opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

/// There was no expression inside a pair of parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;

/// An equation contained more than one `=`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "an equation can only contain one `=`",
    labels = ["the first `=` is here", "another `=` is here"],
    help = format!("split chained equations into a list: {}", "a = b, b = c".fg(EXPR)),
)]
pub struct ChainedEquals;

/// An `=` appeared where only an expression is allowed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected an expression, but found an equation",
    labels = ["remove this `=`"],
    help = "only the equation solver accepts `=`",
)]
pub struct UnexpectedEquals;

/// Returns a human-readable description of a token kind.
fn describe(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Whitespace => "whitespace",
        TokenKind::Eq => "`=`",
        TokenKind::Add => "`+`",
        TokenKind::Sub => "`-`",
        TokenKind::Mul => "`*`",
        TokenKind::Div => "`/`",
        TokenKind::Exp => "`^`",
        TokenKind::Name => "a name",
        TokenKind::Pi => "`π`",
        TokenKind::Comma => "`,`",
        TokenKind::OpenParen => "`(`",
        TokenKind::CloseParen => "`)`",
        TokenKind::Int | TokenKind::Float => "a number",
        TokenKind::Symbol => "a symbol",
    }
}
