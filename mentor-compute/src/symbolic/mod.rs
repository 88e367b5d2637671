//! Algebraic manipulation of expressions.
//!
//! # Expression representation
//!
//! Algebraic expressions in this module are represented as a tree of [`SymExpr`] nodes. It's
//! similar to the [`mentor_parser::parser::ast::Expr`] nodes produced by [`mentor_parser`], with
//! the main difference being that [`SymExpr`] nodes **flatten** out the tree structure, and that
//! numbers are exact rationals.
//!
//! For example, the expression `x + (y + z)` is represented as a single [`SymExpr::Add`] node
//! with _three_ children, `x`, `y`, and `z`, where as the [`mentor_parser::parser::ast::Expr`]
//! node would have two children, `x` and `(y + z)`. A common step in simplifying an expression is
//! to combine "like terms" (e.g. `x + x = 2x`), which is much easier to do when the terms in
//! question are all at the same level in the tree.
//!
//! If you have a [`mentor_parser::parser::ast::Expr`], you can convert it to a [`SymExpr`] using
//! the [`TryFrom`] trait. The conversion fails for names that are not supported, such as unknown
//! functions.
//!
//! ```
//! use mentor_compute::symbolic::{simplify, SymExpr};
//! use mentor_parser::parse_expr;
//!
//! let ast_expr = parse_expr("x + x + x").unwrap();
//! let expr = SymExpr::try_from(&ast_expr).unwrap();
//! assert_eq!(simplify(&expr).to_string(), "3*x");
//! ```
//!
//! # Transformations
//!
//! - [`simplify()`] applies rewriting rules until none apply, without expanding products of sums.
//! - [`expand()`] also distributes products over sums and expands integer powers of sums.
//! - [`factor()`] splits polynomials into factors over the rationals.
//!
//! Every transformation returns its result in canonical order, so printing the result, parsing
//! it, and transforming it again gives back the same text.

pub mod expand;
pub mod expr;
pub mod factor;
pub mod poly;
pub mod simplify;
pub mod step_collector;

pub use expand::{expand, expand_with};
pub use expr::SymExpr;
pub use factor::factor;
pub use simplify::{simplify, simplify_with};
pub use step_collector::StepCollector;
