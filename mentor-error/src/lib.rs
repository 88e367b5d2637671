//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the [`Error`] type that pairs an error kind with the regions of the input it
//! refers to.
//!
//! Errors can be shown two ways: as a full [`ariadne`] report highlighting the input (used by the
//! command-line loop), or as a one-line diagnostic (used in tool results, where the caller only
//! has room for a sentence).

// lets the derive macro's `mentor_error::` paths resolve in this crate's own tests
#[cfg(test)]
extern crate self as mentor_error;

use ariadne::{Color, Report, Source};
use std::{fmt::{self, Debug}, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// The broad category of an error. Tool results name the category in front of the message, so a
/// caller can tell a typo apart from an equation the solver cannot handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The input is not a well-formed expression or equation.
    Parse,

    /// The input is well-formed, but uses a name or function outside the supported set.
    Unsupported,

    /// The equation is well-formed, but cannot be solved exactly.
    Solve,

    /// The expression has no real value (division by zero, root of a negative number, ...).
    Eval,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse => write!(f, "ParseError"),
            Self::Unsupported => write!(f, "UnsupportedConstruct"),
            Self::Solve => write!(f, "SolveError"),
            Self::Eval => write!(f, "EvalError"),
        }
    }
}

/// Represents any kind of error that can occur during some operation.
///
/// This trait is usually derived with `mentor_attrs::ErrorKind`.
pub trait ErrorKind: Debug + Send + Sync {
    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;

    /// The one-line message of this error, without any highlighting.
    fn message(&self) -> String;

    /// The category of this error.
    fn category(&self) -> ErrorCategory {
        ErrorCategory::Parse
    }
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,

    /// Whether the error is fatal. Backtracking parsers stop trying alternatives when they see a
    /// fatal error.
    pub fatal: bool,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind), fatal: false }
    }

    /// Creates a new fatal error with the given spans and kind.
    pub fn new_fatal(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind), fatal: true }
    }

    /// Returns the category of the contained error kind.
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Returns the one-line message of the contained error kind.
    pub fn message(&self) -> String {
        self.kind.message()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Renders the report for this error into a string.
    pub fn render_report(&self, input: &str) -> String {
        let mut out = Vec::new();
        let report = self.build_report("input");
        match report.write(("input", Source::from(input)), &mut out) {
            Ok(()) => String::from_utf8_lossy(&out).into_owned(),
            Err(_) => self.to_string(),
        }
    }

    /// Report this error to stderr.
    ///
    /// The `ariadne` crate's [`Report`] type actually does not have a `Display` implementation, so
    /// we can only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, input: &str) {
        let report = self.build_report("input");
        if report.eprint(("input", Source::from(input))).is_err() {
            eprintln!("{}", self);
        }
    }
}

/// Formats the error as a one-line diagnostic, such as `ParseError: unclosed parenthesis`.
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category(), self.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use mentor_attrs::ErrorKind;
    use pretty_assertions::assert_eq;
    use super::*;

    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = format!("unknown function `{}`", name),
        labels = ["this function", "and this argument"],
        help = "try one of the supported functions",
        category = ErrorCategory::Unsupported,
    )]
    pub struct UnknownFunction {
        pub name: String,
    }

    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(message = "unexpected end of input", labels = ["here"])]
    pub struct UnexpectedEof;

    #[test]
    fn one_line_diagnostic() {
        let err = Error::new(vec![0..3, 4..5], UnknownFunction { name: "foo".to_string() });
        assert_eq!(err.to_string(), "UnsupportedConstruct: unknown function `foo`");
        assert!(!err.fatal);
    }

    #[test]
    fn default_category_is_parse() {
        let err = Error::new_fatal(vec![3..3], UnexpectedEof);
        assert_eq!(err.category(), ErrorCategory::Parse);
        assert_eq!(err.to_string(), "ParseError: unexpected end of input");
        assert!(err.fatal);
    }

    #[test]
    fn report_mentions_message_and_labels() {
        let input = "foo(x)";
        let err = Error::new(vec![0..3, 4..5], UnknownFunction { name: "foo".to_string() });
        let rendered = err.render_report(input);
        assert!(rendered.contains("unknown function `foo`"));
        assert!(rendered.contains("this function"));
        assert!(rendered.contains("try one of the supported functions"));
    }

    #[test]
    fn report_with_missing_spans_does_not_panic() {
        let err = Error::new(vec![], UnexpectedEof);
        let rendered = err.render_report("");
        assert!(rendered.contains("unexpected end of input"));
    }
}
