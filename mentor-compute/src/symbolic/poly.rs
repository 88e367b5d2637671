//! Univariate polynomials with exact rational coefficients.
//!
//! [`Poly`] is the representation the solver and the factorizer use once an expression is known
//! to be a polynomial in one variable. Conversion from a [`SymExpr`] fails for anything that is not
//! a polynomial with rational coefficients, such as `x^(1/2)`, `1/x`, or `pi*x`.

use crate::primitive::{int, rat};
use rug::{Integer, Rational};
use std::collections::BTreeSet;
use std::ops::{Add, Mul, Neg, Sub};
use super::expr::{Primary, SymExpr};

/// Polynomials of a higher degree than this are not built from expressions.
const MAX_DEGREE: usize = 64;

/// Rational root candidates are only enumerated when the constant and leading coefficients are at
/// most this large.
const MAX_ROOT_SEARCH: i64 = 1_000_000_000_000;

/// A polynomial in one variable, stored as its coefficients from the constant term upwards.
///
/// The coefficient list never ends with a zero, so the zero polynomial has no coefficients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poly {
    coeffs: Vec<Rational>,
}

impl Poly {
    /// Creates a polynomial from its coefficients, starting with the constant term.
    pub fn new(mut coeffs: Vec<Rational>) -> Self {
        while coeffs.last().map_or(false, |c| *c == 0) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    /// The zero polynomial.
    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    /// A constant polynomial.
    pub fn constant(c: Rational) -> Self {
        Self::new(vec![c])
    }

    /// The polynomial `c*x^k`.
    pub fn monomial(c: Rational, k: usize) -> Self {
        let mut coeffs = vec![rat(0); k];
        coeffs.push(c);
        Self::new(coeffs)
    }

    /// The polynomial `x - root`.
    pub fn linear_factor(root: &Rational) -> Self {
        Self::new(vec![-root.clone(), rat(1)])
    }

    /// The coefficients, starting with the constant term.
    pub fn coeffs(&self) -> &[Rational] {
        &self.coeffs
    }

    /// The coefficient of `x^k`.
    pub fn coeff(&self, k: usize) -> Rational {
        self.coeffs.get(k).cloned().unwrap_or_default()
    }

    /// The degree of the polynomial, or [`None`] for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// The coefficient of the highest power.
    pub fn leading(&self) -> Option<&Rational> {
        self.coeffs.last()
    }

    /// Evaluates the polynomial at the given point.
    pub fn eval(&self, x: &Rational) -> Rational {
        self.coeffs.iter()
            .rev()
            .fold(rat(0), |acc, c| acc * x + c)
    }

    pub fn pow(&self, n: usize) -> Self {
        (0..n).fold(Self::constant(rat(1)), |acc, _| &acc * self)
    }

    /// Divides this polynomial by `divisor`, returning the quotient and remainder.
    ///
    /// Returns [`None`] if `divisor` is zero.
    pub fn div_rem(&self, divisor: &Self) -> Option<(Self, Self)> {
        let divisor_degree = divisor.degree()?;
        let divisor_leading = divisor.leading()?;

        let mut remainder = self.coeffs.clone();
        let mut quotient = vec![rat(0); self.coeffs.len().saturating_sub(divisor_degree)];
        while remainder.len() > divisor_degree && !remainder.is_empty() {
            let shift = remainder.len() - 1 - divisor_degree;
            let factor = Rational::from(&remainder[remainder.len() - 1] / divisor_leading);
            for (k, c) in divisor.coeffs.iter().enumerate() {
                remainder[shift + k] -= Rational::from(&factor * c);
            }
            quotient[shift] = factor;
            remainder.pop();
        }

        Some((Self::new(quotient), Self::new(remainder)))
    }

    /// Scales the polynomial so that its leading coefficient is one.
    pub fn monic(&self) -> Self {
        match self.leading() {
            Some(leading) => {
                let leading = leading.clone();
                Self::new(self.coeffs.iter().map(|c| Rational::from(c / &leading)).collect())
            },
            None => Self::zero(),
        }
    }

    /// The monic greatest common divisor of two polynomials.
    pub fn gcd(&self, other: &Self) -> Self {
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            let remainder = match a.div_rem(&b) {
                Some((_, remainder)) => remainder,
                None => break,
            };
            a = b;
            b = remainder;
        }
        a.monic()
    }

    /// The positive rational number that divides every coefficient, leaving integer coefficients
    /// with no common factor.
    pub fn content(&self) -> Rational {
        if self.is_zero() {
            return rat(1);
        }

        let (numer_gcd, denom_lcm) = self.coeffs.iter()
            .fold((int(0), int(1)), |(numer_gcd, denom_lcm), c| {
                (numer_gcd.gcd(c.numer()), denom_lcm.lcm(c.denom()))
            });
        Rational::from((numer_gcd, denom_lcm))
    }

    /// The polynomial divided by its content, with integer coefficients.
    pub fn primitive(&self) -> Self {
        let content = self.content();
        Self::new(self.coeffs.iter().map(|c| Rational::from(c / &content)).collect())
    }

    /// Multiplies every coefficient by the given number.
    pub fn scale(&self, factor: &Rational) -> Self {
        Self::new(self.coeffs.iter().map(|c| Rational::from(c * factor)).collect())
    }

    /// Converts an expression into a polynomial in the given variable.
    ///
    /// Returns [`None`] if the expression contains other variables, constants, function calls, or
    /// powers of the variable that are not non-negative integers.
    pub fn from_expr(expr: &SymExpr, var: &str) -> Option<Self> {
        match expr {
            SymExpr::Primary(Primary::Number(n)) => Some(Self::constant(n.clone())),
            SymExpr::Primary(Primary::Symbol(name)) if name == var => Some(Self::monomial(rat(1), 1)),
            SymExpr::Primary(_) => None,
            SymExpr::Add(terms) => terms.iter()
                .try_fold(Self::zero(), |acc, term| Some(&acc + &Self::from_expr(term, var)?)),
            SymExpr::Mul(factors) => {
                let product = factors.iter()
                    .try_fold(Self::constant(rat(1)), |acc, factor| Some(&acc * &Self::from_expr(factor, var)?))?;
                (product.degree().unwrap_or(0) <= MAX_DEGREE).then_some(product)
            },
            SymExpr::Exp(base, exp) => {
                let exp = exp.as_number()
                    .filter(|n| n.is_integer() && **n >= 0)?
                    .numer()
                    .to_usize()
                    .filter(|n| *n <= MAX_DEGREE)?;
                let base = Self::from_expr(base, var)?;
                if base.degree().unwrap_or(0) * exp > MAX_DEGREE {
                    return None;
                }
                Some(base.pow(exp))
            },
        }
    }

    /// Converts the polynomial back into an expression in canonical order.
    pub fn to_expr(&self, var: &str) -> SymExpr {
        let terms = self.coeffs.iter()
            .enumerate()
            .filter(|(_, c)| **c != 0)
            .map(|(k, c)| {
                let power = match k {
                    0 => return SymExpr::from(c.clone()),
                    1 => SymExpr::symbol(var),
                    k => SymExpr::pow(SymExpr::symbol(var), SymExpr::number(k as u32)),
                };
                if *c == 1 {
                    power
                } else {
                    SymExpr::Mul(vec![SymExpr::from(c.clone()), power])
                }
            })
            .collect::<Vec<_>>();
        SymExpr::Add(terms).downgrade().canonical()
    }

    /// Finds the rational roots of the polynomial by the rational root theorem.
    ///
    /// Returns each root with its multiplicity, in ascending order, along with the quotient left
    /// over after dividing out `(x - root)` for every root. The quotient has no rational roots
    /// unless its coefficients were too large to search.
    pub fn split_rational_roots(&self) -> (Vec<(Rational, usize)>, Self) {
        let mut roots = Vec::new();
        let mut rest = self.clone();
        if rest.degree().map_or(true, |degree| degree == 0) {
            return (roots, rest);
        }

        let zeros = rest.coeffs.iter().take_while(|c| **c == 0).count();
        if zeros > 0 {
            roots.push((rat(0), zeros));
            rest = Self::new(rest.coeffs[zeros..].to_vec());
        }

        for candidate in rest.root_candidates() {
            let mut multiplicity = 0;
            while rest.degree().map_or(false, |degree| degree > 0) && rest.eval(&candidate) == 0 {
                match rest.div_rem(&Self::linear_factor(&candidate)) {
                    Some((quotient, _)) => rest = quotient,
                    None => break,
                }
                multiplicity += 1;
            }
            if multiplicity > 0 {
                roots.push((candidate, multiplicity));
            }
        }

        roots.sort_by(|(a, _), (b, _)| a.cmp(b));
        (roots, rest)
    }

    /// The candidates `±p/q` given by the rational root theorem, where `p` divides the constant
    /// term and `q` divides the leading coefficient of the primitive polynomial.
    fn root_candidates(&self) -> BTreeSet<Rational> {
        let primitive = self.primitive();
        let (Some(constant), Some(leading)) = (primitive.coeffs.first(), primitive.leading()) else {
            return BTreeSet::new();
        };

        let (Some(constant), Some(leading)) = (divisors(constant.numer()), divisors(leading.numer())) else {
            return BTreeSet::new();
        };

        let mut candidates = BTreeSet::new();
        for p in &constant {
            for q in &leading {
                let candidate = rat((p.clone(), q.clone()));
                candidates.insert(-candidate.clone());
                candidates.insert(candidate);
            }
        }
        candidates
    }
}

/// The positive divisors of `n`, or [`None`] if `n` is zero or too large to factor by trial
/// division.
fn divisors(n: &Integer) -> Option<Vec<Integer>> {
    let n = n.clone().abs();
    if n == 0 || n > MAX_ROOT_SEARCH {
        return None;
    }

    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut d = int(1);
    while Integer::from(&d * &d) <= n {
        if n.is_divisible(&d) {
            let pair = Integer::from(&n / &d);
            if pair != d {
                large.push(pair);
            }
            small.push(d.clone());
        }
        d += 1;
    }
    small.extend(large.into_iter().rev());
    Some(small)
}

impl Add for &Poly {
    type Output = Poly;

    fn add(self, rhs: Self) -> Poly {
        let len = self.coeffs.len().max(rhs.coeffs.len());
        Poly::new((0..len).map(|k| self.coeff(k) + rhs.coeff(k)).collect())
    }
}

impl Neg for &Poly {
    type Output = Poly;

    fn neg(self) -> Poly {
        Poly::new(self.coeffs.iter().map(|c| -c.clone()).collect())
    }
}

impl Sub for &Poly {
    type Output = Poly;

    fn sub(self, rhs: Self) -> Poly {
        self + &-rhs
    }
}

impl Mul for &Poly {
    type Output = Poly;

    fn mul(self, rhs: Self) -> Poly {
        if self.is_zero() || rhs.is_zero() {
            return Poly::zero();
        }

        let mut coeffs = vec![rat(0); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in rhs.coeffs.iter().enumerate() {
                coeffs[i + j] += Rational::from(a * b);
            }
        }
        Poly::new(coeffs)
    }
}

/// Splits an expanded expression into its coefficients with respect to the given variable,
/// starting with the constant term.
///
/// Unlike [`Poly::from_expr`], the coefficients can be any expression that does not contain the
/// variable, such as `a` in `a*x + b`. Returns [`None`] if the variable appears anywhere other than
/// as a factor `x` or `x^n` of a term.
pub fn coefficients(expr: &SymExpr, var: &str) -> Option<Vec<SymExpr>> {
    let terms = match expr {
        SymExpr::Add(terms) => terms.as_slice(),
        expr => std::slice::from_ref(expr),
    };

    let mut coeffs: Vec<Vec<SymExpr>> = Vec::new();
    for term in terms {
        let factors = match term {
            SymExpr::Mul(factors) => factors.as_slice(),
            term => std::slice::from_ref(term),
        };

        let mut degree = 0;
        let mut rest = Vec::new();
        for factor in factors {
            match factor {
                SymExpr::Primary(Primary::Symbol(name)) if name == var => degree += 1,
                SymExpr::Exp(base, exp) if base.as_symbol() == Some(var) => {
                    degree += exp.as_number()
                        .filter(|n| n.is_integer() && **n >= 0)?
                        .numer()
                        .to_usize()
                        .filter(|n| *n <= MAX_DEGREE)?;
                },
                factor if factor.contains_symbol(var) => return None,
                factor => rest.push(factor.clone()),
            }
        }

        if coeffs.len() <= degree {
            coeffs.resize_with(degree + 1, Vec::new);
        }
        coeffs[degree].push(SymExpr::Mul(rest).downgrade());
    }

    Some(coeffs.into_iter().map(|terms| SymExpr::Add(terms).downgrade()).collect())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn poly(coeffs: &[i32]) -> Poly {
        Poly::new(coeffs.iter().map(|c| rat(*c)).collect())
    }

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    #[test]
    fn from_expanded_expr() {
        // 3x^2 - 2x + 1/2
        let expr = SymExpr::Add(vec![
            SymExpr::number(3) * SymExpr::pow(x(), SymExpr::number(2)),
            SymExpr::number(-2) * x(),
            SymExpr::from(rat((1, 2))),
        ]);
        assert_eq!(
            Poly::from_expr(&expr, "x"),
            Some(Poly::new(vec![rat((1, 2)), rat(-2), rat(3)])),
        );
    }

    #[test]
    fn not_a_polynomial() {
        assert_eq!(Poly::from_expr(&x().recip(), "x"), None);
        assert_eq!(Poly::from_expr(&(x() * SymExpr::symbol("y")), "x"), None);
    }

    #[test]
    fn division() {
        // (x^2 - 1) / (x - 1) = x + 1
        let (quotient, remainder) = poly(&[-1, 0, 1]).div_rem(&poly(&[-1, 1])).unwrap();
        assert_eq!(quotient, poly(&[1, 1]));
        assert!(remainder.is_zero());
    }

    #[test]
    fn gcd() {
        // gcd(x^2 - 1, x^2 + 2x + 1) = x + 1
        assert_eq!(poly(&[-1, 0, 1]).gcd(&poly(&[1, 2, 1])), poly(&[1, 1]));
        assert_eq!(poly(&[1, 0, 1]).gcd(&poly(&[-1, 1])), poly(&[1]));
    }

    #[test]
    fn content() {
        let p = Poly::new(vec![rat((1, 2)), rat((3, 4))]);
        assert_eq!(p.content(), rat((1, 4)));
        assert_eq!(p.primitive(), poly(&[2, 3]));
    }

    #[test]
    fn rational_roots() {
        // 2x^3 - 3x^2 - 3x + 2 = (2x - 1)(x + 1)(x - 2)
        let (roots, rest) = poly(&[2, -3, -3, 2]).split_rational_roots();
        assert_eq!(roots, vec![(rat(-1), 1), (rat((1, 2)), 1), (rat(2), 1)]);
        assert_eq!(rest, poly(&[2]));
    }

    #[test]
    fn repeated_and_zero_roots() {
        // x^4 - 2x^3 + x^2 = x^2 (x - 1)^2
        let (roots, rest) = poly(&[0, 0, 1, -2, 1]).split_rational_roots();
        assert_eq!(roots, vec![(rat(0), 2), (rat(1), 2)]);
        assert_eq!(rest, poly(&[1]));
    }

    #[test]
    fn irreducible_remainder() {
        let (roots, rest) = poly(&[-2, 0, 1]).split_rational_roots();
        assert!(roots.is_empty());
        assert_eq!(rest, poly(&[-2, 0, 1]));
    }

    #[test]
    fn symbolic_coefficients() {
        // a*x + b
        let expr = SymExpr::Add(vec![SymExpr::symbol("a") * x(), SymExpr::symbol("b")]);
        assert_eq!(
            coefficients(&expr, "x"),
            Some(vec![SymExpr::symbol("b"), SymExpr::symbol("a")]),
        );
    }
}
