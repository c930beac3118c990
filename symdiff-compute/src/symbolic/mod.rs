//! Symbolic manipulation of expressions.
//!
//! # Expression representation
//!
//! Expressions in this module are represented as a tree of [`Expr`] nodes. Unlike a flattened
//! sum-of-products representation, every operator node here has a fixed number of children: the
//! expression `x + (x + x)` is an [`Expr::Add`] whose right child is another [`Expr::Add`], and
//! the order of the children is significant.
//!
//! Each node exclusively owns its children. There is no sharing between trees: cloning a tree
//! (see [`Expr::copy`]) produces a fully independent deep copy, and dropping a tree drops every
//! node in it.
//!
//! ```
//! use symdiff_compute::symbolic::expr::{build::*, Expr, NodeTag};
//!
//! let expr = sin(x()) * x();
//! assert_eq!(expr.tag(), NodeTag::Multiply);
//! assert_eq!(expr.to_string(), "sin(x) * x");
//! assert_eq!(expr.copy(), expr);
//! ```
//!
//! # Differentiation
//!
//! The [`derivative()`] function accepts an expression and returns a **new** tree representing
//! its derivative with respect to `x`. The input tree is never modified.
//!
//! Derivatives are computed by structural rewrite rules, one per node type. No simplification is
//! performed beyond skipping terms whose derivative is exactly zero, so the result is correct but
//! frequently verbose (`x * 1` is a perfectly legitimate output).
//!
//! ```
//! use symdiff_compute::symbolic::{derivative, expr::build::*};
//!
//! // product rule: (x * x)' = 1 * x + x * 1
//! let df = derivative(&(x() * x())).unwrap().into_expr();
//! assert_eq!(df, constant(1.0) * x() + x() * constant(1.0));
//! ```
//!
//! For more information, see the [`mod@derivative`] module.

pub mod derivative;
pub mod expr;
pub mod step_collector;

pub use derivative::{derivative, derivative_with_steps, Derivative};
pub use expr::{Expr, NodeTag};
pub use step_collector::StepCollector;
