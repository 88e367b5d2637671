//! Conversion from the parser's AST into [`SymExpr`], validating names along the way.

use crate::error::{FunctionNotCalled, UnknownFunction, UnknownIdentifier, WrongArgumentCount};
use crate::primitive::{rat, rat_from_decimal};
use levenshtein::levenshtein;
use mentor_error::Error;
use mentor_parser::parser::{
    ast::{Binary, Call, Expr, Literal, LitNum, LitSym, Unary},
    token::op::{BinOpKind, UnaryOpKind},
};
use super::{Constant, Func, SymExpr};

/// The names of the functions that can be called.
pub const FUNCTION_NAMES: [&str; 7] = ["sqrt", "sin", "cos", "tan", "log", "ln", "exp"];

/// The multi-letter names of constants.
const CONSTANT_NAMES: [&str; 1] = ["pi"];

/// Returns the closest name in the given list to `name`, if it is close enough to be a likely
/// typo.
fn suggest<'a>(name: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let max_distance = if name.chars().count() <= 3 { 1 } else { 2 };
    candidates.into_iter()
        .map(|candidate| (levenshtein(name, candidate), candidate))
        .filter(|(distance, _)| *distance <= max_distance)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate.to_string())
}

fn convert_number(num: &LitNum) -> SymExpr {
    // the tokenizer only produces digits and at most one `.`
    SymExpr::from(rat_from_decimal(&num.value).unwrap_or_else(|| rat(0)))
}

fn convert_symbol(sym: &LitSym) -> Result<SymExpr, Error> {
    match sym.name.as_str() {
        "pi" | "π" => Ok(SymExpr::constant(Constant::Pi)),
        "e" => Ok(SymExpr::constant(Constant::E)),
        name if name.chars().count() == 1 => Ok(SymExpr::symbol(name)),
        name if FUNCTION_NAMES.contains(&name) => Err(Error::new(
            vec![sym.span.clone()],
            FunctionNotCalled { name: name.to_string() },
        )),
        name => Err(Error::new(
            vec![sym.span.clone()],
            UnknownIdentifier {
                name: name.to_string(),
                suggestion: suggest(name, FUNCTION_NAMES.into_iter().chain(CONSTANT_NAMES)),
            },
        )),
    }
}

fn convert_call(call: &Call) -> Result<SymExpr, Error> {
    let name = call.name.name.as_str();
    if !FUNCTION_NAMES.contains(&name) {
        return Err(Error::new(
            vec![call.name.span.clone()],
            UnknownFunction {
                name: name.to_string(),
                suggestion: suggest(name, FUNCTION_NAMES),
            },
        ));
    }

    let [arg] = call.args.as_slice() else {
        return Err(Error::new(
            call.outer_span().to_vec(),
            WrongArgumentCount {
                name: name.to_string(),
                expected: 1,
                given: call.args.len(),
            },
        ));
    };
    let arg = SymExpr::try_from(arg)?;

    Ok(match name {
        "sqrt" => SymExpr::pow(arg, SymExpr::from(rat((1, 2)))),
        "exp" => SymExpr::pow(SymExpr::constant(Constant::E), arg),
        "sin" => SymExpr::call(Func::Sin, arg),
        "cos" => SymExpr::call(Func::Cos, arg),
        "tan" => SymExpr::call(Func::Tan, arg),
        _ => SymExpr::call(Func::Log, arg),
    })
}

fn convert_unary(unary: &Unary) -> Result<SymExpr, Error> {
    let operand = SymExpr::try_from(&*unary.operand)?;
    Ok(match unary.op.kind {
        UnaryOpKind::Neg => -operand,
        UnaryOpKind::Pos => operand,
    })
}

fn convert_binary(binary: &Binary) -> Result<SymExpr, Error> {
    let lhs = SymExpr::try_from(&*binary.lhs)?;
    let rhs = SymExpr::try_from(&*binary.rhs)?;
    Ok(match binary.op.kind {
        BinOpKind::Exp => SymExpr::pow(lhs, rhs),
        BinOpKind::Mul => lhs * rhs,
        BinOpKind::Div => lhs * rhs.recip(),
        BinOpKind::Add => lhs + rhs,
        BinOpKind::Sub => lhs - rhs,
    })
}

/// Converts a parsed expression into a [`SymExpr`].
///
/// The conversion checks every name: single letters are variables, `pi`, `π`, and `e` are
/// constants, and calls must name a supported function with one argument. Nothing is simplified;
/// `2 + 3` becomes a sum of two numbers.
impl TryFrom<&Expr> for SymExpr {
    type Error = Error;

    fn try_from(expr: &Expr) -> Result<Self, Self::Error> {
        match expr {
            Expr::Literal(Literal::Number(num)) => Ok(convert_number(num)),
            Expr::Literal(Literal::Symbol(sym)) => convert_symbol(sym),
            Expr::Paren(paren) => SymExpr::try_from(paren.expr.innermost()),
            Expr::Call(call) => convert_call(call),
            Expr::Unary(unary) => convert_unary(unary),
            Expr::Binary(binary) => convert_binary(binary),
        }
    }
}

#[cfg(test)]
mod tests {
    use mentor_error::ErrorCategory;
    use mentor_parser::parse_expr;
    use pretty_assertions::assert_eq;
    use super::*;

    fn convert(input: &str) -> Result<SymExpr, Error> {
        SymExpr::try_from(&parse_expr(input).unwrap())
    }

    #[test]
    fn subtraction_and_division() {
        let expr = convert("x - 1/2").unwrap();
        assert_eq!(expr, SymExpr::Add(vec![
            SymExpr::symbol("x"),
            SymExpr::Mul(vec![
                SymExpr::number(-1),
                SymExpr::number(1),
                SymExpr::pow(SymExpr::number(2), SymExpr::number(-1)),
            ]),
        ]));
    }

    #[test]
    fn sqrt_is_a_power() {
        let expr = convert("sqrt(16)").unwrap();
        assert_eq!(expr, SymExpr::pow(SymExpr::number(16), SymExpr::from(rat((1, 2)))));
    }

    #[test]
    fn ln_is_log() {
        assert_eq!(convert("ln(x)").unwrap(), convert("log(x)").unwrap());
    }

    #[test]
    fn constants() {
        assert_eq!(convert("π").unwrap(), SymExpr::constant(Constant::Pi));
        assert_eq!(convert("e").unwrap(), SymExpr::constant(Constant::E));
    }

    #[test]
    fn unknown_identifier_with_suggestion() {
        let err = convert("sqr + 1").unwrap_err();
        assert_eq!(err.message(), "unknown identifier `sqr`");
        assert_eq!(err.category(), ErrorCategory::Unsupported);
        assert_eq!(err.spans, vec![0..3]);
    }

    #[test]
    fn adjacent_letters_are_not_a_typo() {
        let err = convert("xy").unwrap_err();
        assert_eq!(err.message(), "unknown identifier `xy`");
        assert!(err.render_report("xy").contains("x*y"));
    }

    #[test]
    fn unknown_function() {
        let err = convert("foo(2)").unwrap_err();
        assert_eq!(err.message(), "unknown function `foo`");
    }

    #[test]
    fn wrong_argument_count() {
        let err = convert("sin(1, 2)").unwrap_err();
        assert_eq!(err.message(), "`sin` takes 1 argument(s), but 2 were given");
    }

    #[test]
    fn function_without_call() {
        let err = convert("2 sqrt").unwrap_err();
        assert_eq!(err.message(), "`sqrt` is a function and must be called");
    }
}
