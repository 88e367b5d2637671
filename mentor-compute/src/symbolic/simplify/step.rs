use std::fmt;

/// A rewrite applied by the simplifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// `0+a = a`
    AddZero,

    /// `2+3 = 5`
    AddNumbers,

    /// `2a+3a = 5a`
    CombineLikeTerms,

    /// `0*a = 0`
    MultiplyZero,

    /// `1*a = a`
    MultiplyOne,

    /// `2*3 = 6`
    MultiplyNumbers,

    /// `a^b*a^c = a^(b+c)`
    CombineLikeFactors,

    /// `2(a+b) = 2a+2b`
    DistributeCoefficient,

    /// `a(b+c) = ab+ac`
    DistributiveProperty,

    /// `(a+b)^2 = (a+b)(a+b)`
    ExpandPower,

    /// `a^0 = 1`
    PowerZero,

    /// `a^1 = a`
    PowerOne,

    /// `0^a = 0`, `1^a = 1`
    TrivialBase,

    /// `2^3 = 8`
    EvaluatePower,

    /// `sqrt(8) = 2*sqrt(2)`
    ExtractRoot,

    /// `(a^b)^c = a^(bc)`
    PowerOfPower,

    /// `(ab)^c = a^c*b^c`
    DistributePower,

    /// `e^log(a) = a`, `log(e^a) = a`
    InverseFunctions,

    /// `sin(0) = 0`, `log(1) = 0`, ...
    FunctionValue,

    /// `(x^2-1)/(x-1) = x+1`
    CancelCommonFactors,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            Self::AddZero => "remove zero terms",
            Self::AddNumbers => "add numbers",
            Self::CombineLikeTerms => "combine like terms",
            Self::MultiplyZero => "multiply by zero",
            Self::MultiplyOne => "remove factors of one",
            Self::MultiplyNumbers => "multiply numbers",
            Self::CombineLikeFactors => "combine like factors",
            Self::DistributeCoefficient => "distribute a coefficient",
            Self::DistributiveProperty => "apply the distributive property",
            Self::ExpandPower => "expand a power of a sum",
            Self::PowerZero => "a power of zero is one",
            Self::PowerOne => "a power of one is the base",
            Self::TrivialBase => "powers of zero and one",
            Self::EvaluatePower => "evaluate a power",
            Self::ExtractRoot => "take out perfect powers from a root",
            Self::PowerOfPower => "multiply exponents",
            Self::DistributePower => "distribute a power over a product",
            Self::InverseFunctions => "cancel inverse functions",
            Self::FunctionValue => "evaluate a known function value",
            Self::CancelCommonFactors => "cancel common factors",
        };
        write!(f, "{}", description)
    }
}
