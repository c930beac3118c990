#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The rewrite rule applied to a single node while differentiating.
///
/// Here `c` stands for a subtree whose derivative is exactly zero, `n` for a constant exponent,
/// and `f`, `g` for subtrees whose derivatives are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Step {
    /// `c' = 0`
    Constant,

    /// `x' = 1`
    Variable,

    /// Every operand of the node has a zero derivative, so the node's derivative is zero too.
    ///
    /// `(-c)' = 0`
    /// `(c + c)' = 0`
    /// `sin(c)' = 0`
    /// etc.
    ZeroDerivative,

    /// `(-f)' = -f'`
    Negate,

    /// `(f + g)' = f' + g'`
    Sum,

    /// `(c + g)' = g'`
    SumConstantLeft,

    /// `(f + c)' = f'`
    SumConstantRight,

    /// `(f - g)' = f' - g'`
    Difference,

    /// `(c - g)' = -g'`
    DifferenceConstantLeft,

    /// `(f - c)' = f'`
    DifferenceConstantRight,

    /// `(f * g)' = f' * g + f * g'`
    Product,

    /// `(c * g)' = c * g'`
    ConstantFactorLeft,

    /// `(f * c)' = f' * c`
    ConstantFactorRight,

    /// `(f / g)' = (f' * g - f * g') / g^2`
    Quotient,

    /// `(c / g)' = c * (-g' / g^2)`
    Reciprocal,

    /// `(f / c)' = (1 / c) * f'`
    ConstantDivisor,

    /// `(f^n)' = n * f^(n - 1)`, without the factor `f'`
    PowerRule,

    /// `(f^g)' = f^g * (f' * ln(g) + f * (g' / g))`
    GeneralPower,

    /// `sin(x)' = cos(x)`
    Sin,

    /// `sin(f)' = f' * cos(f)`
    SinChain,

    /// `cos(x)' = -sin(x)`
    Cos,

    /// `cos(f)' = -(f' * sin(f))`
    CosChain,

    /// `tan(f)' = f' / cos(f)^2`
    Tan,

    /// `exp(x)' = exp(x)`
    Exp,

    /// `exp(f)' = f' * exp(f)`
    ExpChain,

    /// `sqrt(f)' = f' / (2 * sqrt(f))`
    Sqrt,
}
