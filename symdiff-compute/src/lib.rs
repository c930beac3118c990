//! Expression trees over a single variable `x`, and their exact symbolic derivatives.
//!
//! Everything lives in the [`symbolic`] module:
//!
//! - [`symbolic::expr`] defines the [`Expr`](symbolic::Expr) tree and the functions used to
//!   build it.
//! - [`symbolic::derivative`] rewrites a tree into a new tree representing its derivative with
//!   respect to `x`.
//!
//! ```
//! use symdiff_compute::symbolic::{derivative, expr::build::*};
//!
//! // d/dx x^3 = 3 * x^(3 - 1)
//! let f = pow(x(), constant(3.0));
//! let df = derivative(&f).unwrap().into_expr();
//! assert_eq!(df.to_string(), "3 * x^(3 - 1)");
//! ```

pub mod symbolic;
