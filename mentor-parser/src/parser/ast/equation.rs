use crate::{
    parser::{ast::expr::Expr, error, token::Eq as EqToken, Parse, Parser},
    tokenizer::TokenKind,
};
use mentor_error::Error;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An equation, such as `2x + 5 = 13`.
///
/// Input without an `=` is still an equation; its right-hand side is implicitly zero, so `x^2 - 4`
/// means `x^2 - 4 = 0`. At most one `=` is allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Equation {
    /// The left-hand side of the equation.
    pub lhs: Expr,

    /// The right-hand side of the equation, or [`None`] if the input had no `=`.
    pub rhs: Option<Expr>,

    /// The region of the source code that this equation was parsed from.
    pub span: Range<usize>,
}

impl Equation {
    /// Returns the span of the equation.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Equation {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let lhs = input.try_parse::<Expr>()?;

        let mut input_ahead = input.clone();
        let Ok(eq) = input_ahead.try_parse::<EqToken>() else {
            return Ok(Self { span: lhs.span(), lhs, rhs: None });
        };
        input.set_cursor(&input_ahead);

        let rhs = input.try_parse::<Expr>().map_err(|mut err| {
            err.fatal = true;
            err
        })?;

        if let Some(token) = input.peek_token() {
            if token.kind == TokenKind::Eq {
                return Err(Error::new_fatal(vec![eq.span, token.span.clone()], error::ChainedEquals));
            }
        }

        Ok(Self {
            span: lhs.span().start..rhs.span().end,
            lhs,
            rhs: Some(rhs),
        })
    }
}

/// One or more equations separated by top-level commas, such as `x + y = 3, x - y = 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EquationList {
    /// The equations, in the order they were written.
    pub equations: Vec<Equation>,
}

impl Parse for EquationList {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let equations = input.try_parse_delimited::<Equation>(TokenKind::Comma)?;
        Ok(Self { equations })
    }
}
