//! The Math Mentor verification toolkit.
//!
//! Seven operations check a student's math without ever being the one to hand out an answer:
//!
//! - [`evaluate`](evaluate::evaluate) arithmetic, such as `2 + 3 * 4`
//! - [`solve`](solve::solve) equations and linear systems
//! - [`simplify`](transform::simplify_text), [`expand`](transform::expand_text), and
//!   [`factor`](transform::factor_text) expressions
//! - [`hint`](hint::hint) at the next step of a problem
//! - [`verify`](verify::verify_worked_example) a worked example
//!
//! Every operation takes text and returns a [`ToolResult`]; none of them panic or keep state. The
//! operations are offered two ways: the [`agent`] module folds each result into one sentence for
//! the tutor's language model, and the [`bridge`] module exposes them by name with JSON
//! arguments for host applications (and over C, with the `ffi` feature).
//!
//! ```
//! use mentor_tools::solve::solve;
//!
//! let result = solve("x^2 - 4 = 0", None);
//! assert_eq!(result.result.as_deref(), Some("x = -2, x = 2"));
//! ```

pub mod agent;
pub mod bridge;
pub mod evaluate;
#[cfg(feature = "ffi")]
pub mod ffi;
pub mod hint;
pub mod result;
pub mod solve;
pub mod transform;
pub mod verify;

pub use result::{Extras, ToolResult};
