//! Parser for the notation students type into Math Mentor: numbers, single-letter variables,
//! `+ - * / ^` (plus `**`, `×`, and `÷`), parentheses, implicit multiplication such as `2x` or
//! `(x + 1)(x - 1)`, function calls such as `sqrt(16)`, equations with one `=`, and
//! comma-separated lists of equations.
//!
//! ```
//! use mentor_parser::parser::{ast::Equation, Parser};
//!
//! let mut parser = Parser::new("2x + 5 = 13");
//! let equation = parser.try_parse_full::<Equation>().unwrap();
//! assert!(equation.rhs.is_some());
//! ```
//!
//! Parsing is total: every input produces either a complete tree or an [`Error`] pointing at the
//! offending part of the input.

pub mod parser;
pub mod tokenizer;

use parser::{ast::{Equation, EquationList, Expr}, Parser};
pub use mentor_error::Error;

/// Parses a single expression. An `=` anywhere in the input is an error.
pub fn parse_expr(input: &str) -> Result<Expr, Error> {
    Parser::new(input).try_parse_full::<Expr>()
}

/// Parses a single equation. Input without an `=` is an equation whose right-hand side is
/// implicitly zero.
pub fn parse_equation(input: &str) -> Result<Equation, Error> {
    Parser::new(input).try_parse_full::<Equation>()
}

/// Parses one or more equations separated by top-level commas.
pub fn parse_equation_list(input: &str) -> Result<EquationList, Error> {
    Parser::new(input).try_parse_full::<EquationList>()
}
