//! The math engine behind Math Mentor: exact simplification, expansion, factoring, and equation
//! solving over rational numbers, plus numeric evaluation with [`rug`] floats.
//!
//! ```
//! use mentor_compute::solve::solve;
//!
//! let solution = solve("2x + 5 = 13", None).unwrap();
//! assert_eq!(solution.to_string(), "x = 4");
//! ```
//!
//! Every operation reports failures as a [`mentor_error::Error`], which carries the spans of the
//! offending input and an [`ErrorCategory`](mentor_error::ErrorCategory).

pub mod consts;
pub mod error;
pub mod numerical;
pub mod primitive;
pub mod solve;
pub mod symbolic;
