//! The expression tree.
//!
//! An [`Expr`] is a closed set of node types over the single implicit variable `x`:
//!
//! - leaves: [`Expr::Constant`] and [`Expr::Variable`],
//! - unary nodes: [`Expr::Negate`] and the named functions [`Expr::Sin`], [`Expr::Cos`],
//! [`Expr::Tan`], [`Expr::Exp`], [`Expr::Ln`] and [`Expr::Sqrt`],
//! - binary nodes: [`Expr::Add`], [`Expr::Subtract`], [`Expr::Multiply`], [`Expr::Divide`] and
//! [`Expr::Power`].
//!
//! Every node exclusively owns its children through a [`Box`]. Constructors take their children
//! by value, so a subtree handed to a constructor cannot be reused anywhere else; to place the
//! same subtree in two spots, [`Expr::copy`] it first. Once built, a tree is never mutated.
//!
//! Trees are usually built with the functions in [`build`] or with the arithmetic operators:
//!
//! ```
//! use symdiff_compute::symbolic::expr::{build::*, Expr};
//!
//! let a = div(sin(x()), x());
//! let b = sin(x()) / x();
//! assert_eq!(a, b);
//! assert_eq!(a, Expr::Divide(
//!     Box::new(Expr::Sin(Box::new(Expr::Variable))),
//!     Box::new(Expr::Variable),
//! ));
//! ```
//!
//! # Structural equality
//!
//! The [`PartialEq`] implementation for [`Expr`] is **structural**: two trees are equal if they
//! have the same shape, the same node types in the same positions, and equal constants. No
//! algebraic reasoning is involved, so `x + 1` and `1 + x` are not equal, and neither are `x * 1`
//! and `x`.

pub mod build;
mod fmt;
mod iter;

use iter::ExprIter;
use std::ops::{Add, Div, Mul, Neg, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The name of the single implicit variable that [`Expr::Variable`] stands for.
pub const VARIABLE_NAME: &str = "x";

/// Identifies the type of a node, for callers that need to dispatch on it without matching the
/// whole [`Expr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeTag {
    /// The tag of a derivative that is exactly zero (see
    /// [`Derivative::Zero`](crate::symbolic::Derivative::Zero)). No [`Expr`] node has this tag.
    Null,
    Constant,
    Variable,
    Negate,
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Sin,
    Cos,
    Tan,
    Exp,
    Ln,
    Sqrt,
}

impl NodeTag {
    /// Returns the number of children a node with this tag owns.
    pub fn arity(self) -> usize {
        match self {
            Self::Null | Self::Constant | Self::Variable => 0,
            Self::Negate
                | Self::Sin
                | Self::Cos
                | Self::Tan
                | Self::Exp
                | Self::Ln
                | Self::Sqrt => 1,
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide | Self::Power => 2,
        }
    }

    /// Returns the name of the function, if this tag is one of the named unary functions.
    pub fn function_name(self) -> Option<&'static str> {
        match self {
            Self::Sin => Some("sin"),
            Self::Cos => Some("cos"),
            Self::Tan => Some("tan"),
            Self::Exp => Some("exp"),
            Self::Ln => Some("ln"),
            Self::Sqrt => Some("sqrt"),
            _ => None,
        }
    }
}

impl std::fmt::Display for NodeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.function_name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "{}", format!("{:?}", self).to_lowercase()),
        }
    }
}

/// A node in an expression tree, together with the subtree it owns.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A numeric constant, such as `2` or `0.5`.
    Constant(f64),

    /// The variable `x`.
    Variable,

    /// `-f`
    Negate(Box<Expr>),

    /// `f + g`
    Add(Box<Expr>, Box<Expr>),

    /// `f - g`
    Subtract(Box<Expr>, Box<Expr>),

    /// `f * g`
    Multiply(Box<Expr>, Box<Expr>),

    /// `f / g`
    Divide(Box<Expr>, Box<Expr>),

    /// `f^g`
    Power(Box<Expr>, Box<Expr>),

    /// `sin(f)`
    Sin(Box<Expr>),

    /// `cos(f)`
    Cos(Box<Expr>),

    /// `tan(f)`
    Tan(Box<Expr>),

    /// `exp(f)`
    Exp(Box<Expr>),

    /// `ln(f)`
    Ln(Box<Expr>),

    /// `sqrt(f)`
    Sqrt(Box<Expr>),
}

impl Expr {
    /// Returns the tag identifying the type of this node.
    pub fn tag(&self) -> NodeTag {
        match self {
            Self::Constant(_) => NodeTag::Constant,
            Self::Variable => NodeTag::Variable,
            Self::Negate(_) => NodeTag::Negate,
            Self::Add(..) => NodeTag::Add,
            Self::Subtract(..) => NodeTag::Subtract,
            Self::Multiply(..) => NodeTag::Multiply,
            Self::Divide(..) => NodeTag::Divide,
            Self::Power(..) => NodeTag::Power,
            Self::Sin(_) => NodeTag::Sin,
            Self::Cos(_) => NodeTag::Cos,
            Self::Tan(_) => NodeTag::Tan,
            Self::Exp(_) => NodeTag::Exp,
            Self::Ln(_) => NodeTag::Ln,
            Self::Sqrt(_) => NodeTag::Sqrt,
        }
    }

    /// Returns a deep copy of this tree. The copy shares no nodes with `self`.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Returns the number of children this node owns.
    pub fn arity(&self) -> usize {
        self.tag().arity()
    }

    /// Returns the child at the given index: `0` for the only child of a unary node, `0` / `1`
    /// for the left / right child of a binary node.
    pub fn child(&self, index: usize) -> Option<&Expr> {
        match (self, index) {
            (Self::Negate(f)
                | Self::Sin(f)
                | Self::Cos(f)
                | Self::Tan(f)
                | Self::Exp(f)
                | Self::Ln(f)
                | Self::Sqrt(f), 0) => Some(f.as_ref()),
            (Self::Add(lhs, _)
                | Self::Subtract(lhs, _)
                | Self::Multiply(lhs, _)
                | Self::Divide(lhs, _)
                | Self::Power(lhs, _), 0) => Some(lhs.as_ref()),
            (Self::Add(_, rhs)
                | Self::Subtract(_, rhs)
                | Self::Multiply(_, rhs)
                | Self::Divide(_, rhs)
                | Self::Power(_, rhs), 1) => Some(rhs.as_ref()),
            _ => None,
        }
    }

    /// Returns an iterator over the children of this node, left to right.
    pub fn children(&self) -> impl Iterator<Item = &Expr> + '_ {
        (0..self.arity()).filter_map(move |i| self.child(i))
    }

    /// Follows the given path of child indices from this node, returning the node at the end of
    /// it. The empty path refers to `self`.
    pub fn get(&self, path: &[usize]) -> Option<&Expr> {
        path.iter().try_fold(self, |node, &index| node.child(index))
    }

    /// If the expression is an [`Expr::Constant`], returns the contained value.
    pub fn as_constant(&self) -> Option<f64> {
        match self {
            Self::Constant(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns true if the expression is the bare variable `x`.
    pub fn is_variable(&self) -> bool {
        matches!(self, Self::Variable)
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns the number of nodes in the tree.
    pub fn complexity(&self) -> usize {
        self.post_order_iter().count()
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Self::Constant(value)
    }
}

impl Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        build::add(self, rhs)
    }
}

impl Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        build::sub(self, rhs)
    }
}

impl Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        build::mul(self, rhs)
    }
}

impl Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        build::div(self, rhs)
    }
}

impl Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        build::neg(self)
    }
}
