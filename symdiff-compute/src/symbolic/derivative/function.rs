//! Symbolic derivatives of the named functions `sin`, `cos`, `tan`, `exp`, `ln` and `sqrt`.

use crate::symbolic::expr::{build::*, Expr, NodeTag};
use crate::symbolic::step_collector::StepCollector;
use super::{child_derivative, Derivative, Rule, Step, UnimplementedOperation};

/// Computes the derivative of a function node and performs the chain rule.
///
/// Where the argument is the bare variable `x`, the chain rule factor `x' = 1` is left out.
pub(super) fn function_derivative(
    expr: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Rule {
    let f = match expr {
        // TODO: `ln(f)' = f' / f`
        Expr::Ln(_) => return Err(UnimplementedOperation::new(NodeTag::Ln)),
        Expr::Sin(f) | Expr::Cos(f) | Expr::Tan(f) | Expr::Exp(f) | Expr::Sqrt(f) => f,
        _ => unreachable!("`function_derivative` called on a `{}` node", expr.tag()),
    };

    let df = match child_derivative(f, 0, step_collector)? {
        Derivative::Zero => return Ok((Step::ZeroDerivative, Derivative::Zero)),
        Derivative::Expr(df) => df,
    };
    let bare = f.is_variable();

    let (step, derivative) = match (expr.tag(), bare) {
        (NodeTag::Sin, true) => (Step::Sin, cos(f.copy())),
        (NodeTag::Sin, false) => (Step::SinChain, mul(df, cos(f.copy()))),
        (NodeTag::Cos, true) => (Step::Cos, neg(sin(f.copy()))),
        (NodeTag::Cos, false) => (Step::CosChain, neg(mul(df, sin(f.copy())))),
        (NodeTag::Tan, _) => (Step::Tan, div(df, pow(cos(f.copy()), constant(2.0)))),
        (NodeTag::Exp, true) => (Step::Exp, exp(f.copy())),
        (NodeTag::Exp, false) => (Step::ExpChain, mul(df, exp(f.copy()))),
        (NodeTag::Sqrt, _) => (Step::Sqrt, div(df, mul(constant(2.0), sqrt(f.copy())))),
        (tag, _) => unreachable!("`{}` is not a differentiable function", tag),
    };
    Ok((step, derivative.into()))
}
