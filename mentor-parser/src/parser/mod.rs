pub mod ast;
pub mod error;
pub mod token;

use mentor_error::{Error, ErrorKind};
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// Attempts to parse a value from the given stream of tokens, using multiple parsing functions
/// in order. The first function that succeeds is used to parse the value.
///
/// This macro also catches fatal errors and immediately short-circuits the parsing process.
///
/// If parsing is successful, the value is returned from the enclosing function. Otherwise, the
/// error of the last attempted parsing function is the value of the macro.
#[macro_export]
macro_rules! try_parse_catch_fatal {
    ($($expr:expr),+ $(,)?) => {{
        let mut last_err = None;
        $(
            match $expr {
                Ok(value) => return Ok(value),
                Err(err) if err.fatal => return Err(err),
                // ignore this error and try the next parser, or return it
                Err(err) => last_err = Some(err),
            }
        )+
        last_err
    }};
}

/// A high-level parser for the notation. This is the type to use to parse an arbitrary piece of
/// input into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Creates a fatal error that points at the current token, or the end of the source code if
    /// the cursor is at the end of the stream.
    pub fn error_fatal(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new_fatal(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current non-whitespace token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.peek_token()
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Sets the cursor of this parser to the cursor of the given parser. Both parsers must have
    /// been created from the same source.
    pub fn set_cursor(&mut self, other: &Self) {
        self.cursor = other.cursor;
    }

    /// Returns the previous token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the beginning of the stream.
    pub fn prev_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor.checked_sub(1)?)
    }

    /// Returns the next non-whitespace token without moving the cursor.
    pub fn peek_token(&self) -> Option<&Token<'source>> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())
    }

    /// Moves the cursor past any whitespace tokens.
    pub fn advance_past_whitespace(&mut self) {
        while let Some(token) = self.tokens.get(self.cursor) {
            if !token.is_whitespace() {
                break;
            }
            self.cursor += 1;
        }
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        self.advance_past_whitespace();
        match self.tokens.get(self.cursor) {
            Some(token) => {
                self.cursor += 1;
                // cloning is cheap: only Range<_> is cloned
                Ok(token.clone())
            },
            None => Err(self.error(error::UnexpectedEof)),
        }
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses multiple values (at least one) from the given stream of tokens, each
    /// delimited by a certain token.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// values are returned. Otherwise, the stream is left unchanged and an error is returned. A
    /// delimiter that is not followed by a value is an error.
    pub fn try_parse_delimited<T: Parse>(&mut self, delimiter: TokenKind) -> Result<Vec<T>, Error> {
        let start = self.cursor;
        let mut values = Vec::new();

        loop {
            match self.try_parse::<T>() {
                Ok(value) => values.push(value),
                Err(err) => {
                    self.cursor = start;
                    return Err(err);
                },
            }

            match self.peek_token() {
                Some(token) if token.kind == delimiter => {
                    self.advance_past_whitespace();
                    self.cursor += 1;
                },
                _ => return Ok(values),
            }
        }
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value. The cursor is restored if parsing fails.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Speculatively parses a value from the given stream of tokens, with a validation predicate.
    /// The value must parse successfully, **and** the predicate must return [`Ok`] for this
    /// function to return successfully.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_then<T: Parse, F>(&mut self, predicate: F) -> Result<T, Error>
    where
        F: FnOnce(&T, &Parser) -> Result<(), Error>,
    {
        let start = self.cursor;

        // closure workaround allows us to use `?` in the closure
        let compute = || {
            let value = T::parse(self)?;
            predicate(&value, self)?;
            Ok(value)
        };

        match compute() {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error pointing at the first leftover token is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        self.advance_past_whitespace();

        match self.tokens.get(self.cursor) {
            None => Ok(value),
            Some(token) => Err(match token.kind {
                TokenKind::CloseParen => self.error(error::UnclosedParenthesis { opening: false }),
                TokenKind::Eq => self.error(error::UnexpectedEquals),
                TokenKind::Symbol => self.error(error::UnrecognizedSymbol {
                    symbol: token.lexeme.to_owned(),
                }),
                _ => self.error(error::ExpectedEof),
            }),
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by consumers of the library.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The associativity of a binary or unary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// The binary / unary operation is left-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// The binary / unary operation is right-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `a op (b op c)`. For unary
    /// operations, this means `op op a` is evaluated as `op (op a)`.
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors.
    Factor,

    /// Precedence of unary negation (`-`) and unary plus (`+`).
    Neg,

    /// Precedence of exponentiation (`^`).
    Exp,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use ast::{
        binary::Binary,
        call::Call,
        equation::{Equation, EquationList},
        expr::Expr,
        literal::{Literal, LitNum, LitSym},
        paren::Paren,
        unary::Unary,
    };
    use mentor_error::ErrorCategory;
    use token::op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind};

    fn num(value: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Number(LitNum { value: value.to_string(), span }))
    }

    fn sym(name: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Symbol(LitSym { name: name.to_string(), span }))
    }

    fn bin(lhs: Expr, kind: BinOpKind, implicit: bool, op_span: Range<usize>, rhs: Expr) -> Expr {
        let span = lhs.span().start..rhs.span().end;
        Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op: BinOp { kind, implicit, span: op_span },
            rhs: Box::new(rhs),
            span,
        })
    }

    fn parse(input: &str) -> Result<Expr, Error> {
        Parser::new(input).try_parse_full::<Expr>()
    }

    #[test]
    fn literal_int() {
        assert_eq!(parse("16").unwrap(), num("16", 0..2));
    }

    #[test]
    fn literal_float() {
        assert_eq!(parse("3.14").unwrap(), num("3.14", 0..4));
    }

    #[test]
    fn literal_pi() {
        assert_eq!(parse("π").unwrap(), sym("π", 0..2));
    }

    #[test]
    fn order_of_operations() {
        let expr = parse("2 + 3 * 4").unwrap();
        assert_eq!(expr, bin(
            num("2", 0..1),
            BinOpKind::Add, false, 2..3,
            bin(num("3", 4..5), BinOpKind::Mul, false, 6..7, num("4", 8..9)),
        ));
    }

    #[test]
    fn subtraction_is_left_associative() {
        let expr = parse("8-3-2").unwrap();
        assert_eq!(expr, bin(
            bin(num("8", 0..1), BinOpKind::Sub, false, 1..2, num("3", 2..3)),
            BinOpKind::Sub, false, 3..4,
            num("2", 4..5),
        ));
    }

    #[test]
    fn power_is_right_associative() {
        let expr = parse("2^3^2").unwrap();
        assert_eq!(expr, bin(
            num("2", 0..1),
            BinOpKind::Exp, false, 1..2,
            bin(num("3", 2..3), BinOpKind::Exp, false, 3..4, num("2", 4..5)),
        ));
    }

    #[test]
    fn double_star_power() {
        let expr = parse("x**2").unwrap();
        assert_eq!(expr, bin(sym("x", 0..1), BinOpKind::Exp, false, 1..3, num("2", 3..4)));
    }

    #[test]
    fn implicit_multiplication() {
        let expr = parse("2x").unwrap();
        assert_eq!(expr, bin(num("2", 0..1), BinOpKind::Mul, true, 1..1, sym("x", 1..2)));
    }

    #[test]
    fn implicit_multiplication_binds_tighter_than_addition() {
        let expr = parse("2x + 5").unwrap();
        assert_eq!(expr, bin(
            bin(num("2", 0..1), BinOpKind::Mul, true, 1..1, sym("x", 1..2)),
            BinOpKind::Add, false, 3..4,
            num("5", 5..6),
        ));
    }

    #[test]
    fn implicit_multiplication_with_power() {
        let expr = parse("3x^2").unwrap();
        assert_eq!(expr, bin(
            num("3", 0..1),
            BinOpKind::Mul, true, 1..1,
            bin(sym("x", 1..2), BinOpKind::Exp, false, 2..3, num("2", 3..4)),
        ));
    }

    #[test]
    fn implicit_multiplication_of_parens() {
        let expr = parse("(x+1)(x-1)").unwrap();
        let left = Expr::Paren(Paren {
            expr: Box::new(bin(sym("x", 1..2), BinOpKind::Add, false, 2..3, num("1", 3..4))),
            span: 0..5,
        });
        let right = Expr::Paren(Paren {
            expr: Box::new(bin(sym("x", 6..7), BinOpKind::Sub, false, 7..8, num("1", 8..9))),
            span: 5..10,
        });
        assert_eq!(expr, bin(left, BinOpKind::Mul, true, 5..5, right));
    }

    #[test]
    fn negation_binds_looser_than_power() {
        let expr = parse("-x^2").unwrap();
        assert_eq!(expr, Expr::Unary(Unary {
            operand: Box::new(bin(sym("x", 1..2), BinOpKind::Exp, false, 2..3, num("2", 3..4))),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            span: 0..4,
        }));
    }

    #[test]
    fn negative_exponent() {
        let expr = parse("2^-1").unwrap();
        assert_eq!(expr, bin(
            num("2", 0..1),
            BinOpKind::Exp, false, 1..2,
            Expr::Unary(Unary {
                operand: Box::new(num("1", 3..4)),
                op: UnaryOp { kind: UnaryOpKind::Neg, span: 2..3 },
                span: 2..4,
            }),
        ));
    }

    #[test]
    fn function_call() {
        let expr = parse("sqrt(16)").unwrap();
        assert_eq!(expr, Expr::Call(Call {
            name: LitSym { name: "sqrt".to_string(), span: 0..4 },
            args: vec![num("16", 5..7)],
            span: 0..8,
            paren_span: 4..8,
        }));
    }

    #[test]
    fn single_letter_before_paren_is_multiplication() {
        let expr = parse("x(x+1)").unwrap();
        assert!(matches!(expr, Expr::Binary(Binary { op: BinOp { kind: BinOpKind::Mul, implicit: true, .. }, .. })));
    }

    #[test]
    fn equation_with_right_side() {
        let eq = Parser::new("2x + 5 = 13").try_parse_full::<Equation>().unwrap();
        assert_eq!(eq.rhs, Some(num("13", 9..11)));
        assert_eq!(eq.span, 0..11);
    }

    #[test]
    fn equation_without_right_side() {
        let eq = Parser::new("x^2 - 4").try_parse_full::<Equation>().unwrap();
        assert_eq!(eq.rhs, None);
    }

    #[test]
    fn equation_list() {
        let list = Parser::new("x + 3*y = 7, x - y = 1").try_parse_full::<EquationList>().unwrap();
        assert_eq!(list.equations.len(), 2);
        assert_eq!(list.equations[1].span, 13..22);
    }

    #[test]
    fn chained_equals() {
        let err = Parser::new("1 = x = 2").try_parse_full::<Equation>().unwrap_err();
        assert_eq!(err.message(), "an equation can only contain one `=`");
        assert_eq!(err.spans, vec![2..3, 6..7]);
    }

    #[test]
    fn equals_in_expression() {
        let err = parse("x = 2").unwrap_err();
        assert_eq!(err.message(), "expected an expression, but found an equation");
    }

    #[test]
    fn empty_input() {
        let err = parse("").unwrap_err();
        assert_eq!(err.message(), "unexpected end of input");
        assert_eq!(err.category(), ErrorCategory::Parse);
    }

    #[test]
    fn whitespace_only_input() {
        let err = parse("   ").unwrap_err();
        assert_eq!(err.message(), "unexpected end of input");
    }

    #[test]
    fn trailing_whitespace() {
        assert_eq!(parse("7  ").unwrap(), num("7", 0..1));
    }

    #[test]
    fn unclosed_open_paren() {
        let err = parse("(2 + 3").unwrap_err();
        assert_eq!(err.message(), "unclosed parenthesis");
        assert_eq!(err.spans, vec![0..1]);
    }

    #[test]
    fn unclosed_close_paren() {
        let err = parse("2 + 3)").unwrap_err();
        assert_eq!(err.message(), "unclosed parenthesis");
        assert_eq!(err.spans, vec![5..6]);
    }

    #[test]
    fn unclosed_paren_after_implicit_multiplication() {
        let err = parse("2(x + 1").unwrap_err();
        assert_eq!(err.message(), "unclosed parenthesis");
        assert_eq!(err.spans, vec![1..2]);
    }

    #[test]
    fn empty_paren() {
        let err = parse("3 + ()").unwrap_err();
        assert_eq!(err.message(), "missing expression inside parenthesis");
    }

    #[test]
    fn dangling_operator() {
        let err = parse("2 +").unwrap_err();
        assert_eq!(err.message(), "unexpected end of input");
    }

    #[test]
    fn stray_symbol() {
        let err = parse("2 $ 3").unwrap_err();
        assert_eq!(err.message(), "unrecognized symbol `$`");
        assert_eq!(err.spans, vec![2..3]);
    }
}
