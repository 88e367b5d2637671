use crate::parser::{
    ast::{expr::{Expr, Primary}, unary::Unary},
    error,
    token::op::{BinOp, BinOpKind},
    Associativity,
    Parse,
    Parser,
    Precedence,
};
use mentor_error::Error;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary operator, including implicit multiplication.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BinOpExt {
    /// A binary operator, such as `+` or `*`.
    Op(BinOp),

    /// Implicit multiplication, such as `2x` or `x(x + 1)`.
    ///
    /// This is not a real operator, but it is treated as one for the purposes of parsing.
    ImplicitMultiplication,
}

impl BinOpExt {
    /// Returns the precedence of the binary operator.
    fn precedence(&self) -> Precedence {
        match self {
            BinOpExt::Op(op) => op.precedence(),
            BinOpExt::ImplicitMultiplication => Precedence::Factor,
        }
    }
}

impl From<BinOp> for BinOpExt {
    fn from(op: BinOp) -> Self {
        BinOpExt::Op(op)
    }
}

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// After parsing the left-hand-side, the operator, and the right-hand-side of a potential
    /// binary expression, parse ahead to see if the right-hand-side is incomplete.
    ///
    /// If we are parsing the expression `1 + 2 * 3`, we will first parse the left-hand-side `1`,
    /// then the operator `+`, then the right-hand-side `2`. Before building the node, we check if
    /// the operator after `2` has higher precedence than `+`. It does, so we parse the expression
    /// starting with `2` first, and `2 * 3` becomes the right-hand-side of the `1 +` node.
    ///
    /// When there is no operator after the right-hand-side, but there is another expression
    /// (such as in `1 + 2x`), we assume implicit multiplication, which has higher precedence than
    /// addition. [`Self::parse_expr`] reports whether it consumed anything, so that we stop as
    /// soon as there is nothing left to multiply by.
    fn complete_rhs(
        input: &mut Parser,
        lhs: Expr,
        op: BinOpExt,
        mut rhs: Expr,
    ) -> Result<Expr, Error> {
        let precedence = op.precedence();

        loop {
            // clone the input stream to emulate peeking
            let mut input_ahead = input.clone();
            if let Ok(next_op) = input_ahead.try_parse::<BinOp>() {
                if next_op.precedence() > precedence || next_op.associativity() == Associativity::Right {
                    // this operator has a higher precedence or it is right associative, so we
                    // should parse its expression starting with `rhs` first
                    rhs = Self::parse_expr(input, rhs, next_op.precedence())?.0;
                } else {
                    // lower precedence, or equal precedence and left-associativity, such as
                    // `1 * 2 + 3` or `1 * 2 * 3`; the outer loop picks this operator up
                    break;
                }
            } else {
                // there is no operator; if the previous operator has lower precedence than
                // multiplication, the next expression may be implicitly multiplied with `rhs`
                if precedence >= BinOpKind::Mul.precedence() {
                    break;
                }

                let (expr, changed) = Self::parse_expr(input, rhs, BinOpKind::Mul.precedence())?;
                rhs = expr;

                if !changed {
                    break;
                }
            }
        }

        // create the binary node representing `lhs op rhs`
        let span = lhs.span().start..rhs.span().end;
        let op = match op {
            BinOpExt::Op(op) => op,
            BinOpExt::ImplicitMultiplication => BinOp {
                kind: BinOpKind::Mul,
                implicit: true,
                span: lhs.span().end..rhs.span().start,
            },
        };

        Ok(Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            span,
        }))
    }

    /// After parsing the left-hand-side of a potential binary expression, parse ahead to see if
    /// there is a binary operator and a right-hand-side, with at least the given precedence.
    ///
    /// Returns the resulting expression, and whether any operator (explicit or implicit) was
    /// consumed.
    pub fn parse_expr(
        input: &mut Parser,
        mut lhs: Expr,
        precedence: Precedence,
    ) -> Result<(Expr, bool), Error> {
        let mut changed = false;

        loop {
            let mut input_ahead = input.clone();
            if let Ok(op) = input_ahead.try_parse_then::<BinOp, _>(|bin_op, input| {
                if bin_op.precedence() >= precedence {
                    Ok(())
                } else {
                    Err(input.error(error::NonFatal))
                }
            }) {
                input.set_cursor(&input_ahead);
                let rhs = Unary::parse_or_lower(input)?;
                lhs = Self::complete_rhs(input, lhs, op.into(), rhs)?;
            } else if BinOpKind::Mul.precedence() >= precedence {
                // implicit multiplication only applies when there is no operator at all; an
                // operator of lower precedence ends this expression
                if input_ahead.try_parse::<BinOp>().is_ok() {
                    break;
                }

                let rhs = match input.try_parse::<Primary>() {
                    Ok(primary) => Expr::from(primary),
                    Err(err) if err.fatal => return Err(err),
                    Err(_) => break,
                };
                lhs = Self::complete_rhs(input, lhs, BinOpExt::ImplicitMultiplication, rhs)?;
            } else {
                break;
            }

            changed = true;
        }

        Ok((lhs, changed))
    }
}

impl Parse for Binary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let start = input.span();
        match input.try_parse::<Expr>()? {
            Expr::Binary(binary) => Ok(binary),
            _ => Err(Error::new(vec![start], error::NonFatal)),
        }
    }
}
