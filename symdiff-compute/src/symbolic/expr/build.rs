//! Functions to construct [`Expr`] trees bottom-up.
//!
//! Every function takes ownership of the subtrees passed to it.

use super::Expr;

/// Creates a constant.
pub fn constant(value: f64) -> Expr {
    Expr::Constant(value)
}

/// Creates the variable `x`.
pub fn x() -> Expr {
    Expr::Variable
}

/// `-f`
pub fn neg(f: Expr) -> Expr {
    Expr::Negate(Box::new(f))
}

/// `f + g`
pub fn add(f: Expr, g: Expr) -> Expr {
    Expr::Add(Box::new(f), Box::new(g))
}

/// `f - g`
pub fn sub(f: Expr, g: Expr) -> Expr {
    Expr::Subtract(Box::new(f), Box::new(g))
}

/// `f * g`
pub fn mul(f: Expr, g: Expr) -> Expr {
    Expr::Multiply(Box::new(f), Box::new(g))
}

/// `f / g`
pub fn div(f: Expr, g: Expr) -> Expr {
    Expr::Divide(Box::new(f), Box::new(g))
}

/// `f^g`
pub fn pow(f: Expr, g: Expr) -> Expr {
    Expr::Power(Box::new(f), Box::new(g))
}

/// `sin(f)`
pub fn sin(f: Expr) -> Expr {
    Expr::Sin(Box::new(f))
}

/// `cos(f)`
pub fn cos(f: Expr) -> Expr {
    Expr::Cos(Box::new(f))
}

/// `tan(f)`
pub fn tan(f: Expr) -> Expr {
    Expr::Tan(Box::new(f))
}

/// `exp(f)`
pub fn exp(f: Expr) -> Expr {
    Expr::Exp(Box::new(f))
}

/// `ln(f)`, the natural logarithm
pub fn ln(f: Expr) -> Expr {
    Expr::Ln(Box::new(f))
}

/// `sqrt(f)`
pub fn sqrt(f: Expr) -> Expr {
    Expr::Sqrt(Box::new(f))
}
