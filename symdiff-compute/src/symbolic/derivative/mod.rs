//! Symbolic differentiation with respect to `x`.
//!
//! The derivative of an expression is computed by a structural rewrite rule per node type,
//! recursing into the children first. Each rule builds a **new** tree: subtrees of the input that
//! appear in the output are [copied](Expr::copy), never moved or shared.
//!
//! # Zero derivatives
//!
//! A subtree whose derivative is exactly zero (a constant, or an operation whose operands all
//! have zero derivatives) differentiates to [`Derivative::Zero`] rather than to a tree. Parent
//! rules use this to skip terms instead of emitting `+ 0` or `* 0`:
//!
//! ```
//! use symdiff_compute::symbolic::{derivative, expr::build::*, Derivative};
//!
//! assert_eq!(derivative(&(constant(2.0) + constant(3.0))).unwrap(), Derivative::Zero);
//!
//! // (x + 3)' = 1, not 1 + 0
//! let df = derivative(&(x() + constant(3.0))).unwrap();
//! assert_eq!(df, Derivative::Expr(constant(1.0)));
//! ```
//!
//! This is the only simplification performed. In particular, `x' = 1` is emitted as-is wherever
//! the chain rule calls for it, so `(x * x)'` is `1 * x + x * 1`.
//!
//! # Unsupported nodes
//!
//! Differentiating [`Expr::Ln`] is not implemented and fails with [`UnimplementedOperation`]. The
//! returned [`Error`] points at the offending node inside the rendered expression:
//!
//! ```
//! use symdiff_compute::symbolic::{derivative, expr::build::*};
//! use symdiff_compute::symbolic::derivative::UnimplementedOperation;
//!
//! let expr = x() * ln(x());
//! let err = derivative(&expr).unwrap_err();
//! let kind = err.downcast_ref::<UnimplementedOperation>().unwrap();
//! assert_eq!(kind.path, vec![1]);
//! assert_eq!(&expr.to_string()[err.spans[0].clone()], "ln(x)");
//! ```

mod error;
mod function;
pub mod step;

use crate::symbolic::expr::{build::*, Expr, NodeTag};
use crate::symbolic::step_collector::StepCollector;
use log::{debug, trace};
use symdiff_error::Error;

pub use error::UnimplementedOperation;
pub use step::Step;

/// The derivative of an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Derivative {
    /// The derivative is exactly zero.
    Zero,

    /// The derivative is the given expression.
    Expr(Expr),
}

impl Derivative {
    /// Returns the tag of the derivative's root node, or [`NodeTag::Null`] if the derivative is
    /// [`Derivative::Zero`].
    pub fn tag(&self) -> NodeTag {
        match self {
            Self::Zero => NodeTag::Null,
            Self::Expr(expr) => expr.tag(),
        }
    }

    /// Returns true if the derivative is [`Derivative::Zero`].
    pub fn is_zero(&self) -> bool {
        matches!(self, Self::Zero)
    }

    /// Returns the derivative as an expression, turning [`Derivative::Zero`] into the constant
    /// `0`.
    pub fn into_expr(self) -> Expr {
        match self {
            Self::Zero => constant(0.0),
            Self::Expr(expr) => expr,
        }
    }
}

impl From<Expr> for Derivative {
    fn from(expr: Expr) -> Self {
        Self::Expr(expr)
    }
}

impl Expr {
    /// Computes the derivative of this expression with respect to `x`. See [`derivative()`].
    pub fn derivative(&self) -> Result<Derivative, Error> {
        derivative(self)
    }
}

/// The outcome of applying one rewrite rule: the rule that fired and the derivative it produced.
type Rule = Result<(Step, Derivative), UnimplementedOperation>;

/// Computes the derivative of the given expression with respect to `x`. Returns [`Err`] if the
/// expression contains a node whose derivative cannot be computed symbolically.
///
/// The returned tree shares no nodes with `expr`.
pub fn derivative(expr: &Expr) -> Result<Derivative, Error> {
    derivative_with_steps(expr, &mut ())
}

/// Computes the derivative of the given expression with respect to `x`, reporting the rewrite
/// rule applied at every node to the given [`StepCollector`].
///
/// Steps are pushed as each node finishes. If differentiation fails, the collector keeps the steps
/// of every subtree that was differentiated before the failing node.
///
/// ```
/// use symdiff_compute::symbolic::{derivative::Step, derivative_with_steps, expr::build::*};
///
/// let mut steps = Vec::new();
/// derivative_with_steps(&sin(x()), &mut steps).unwrap();
/// assert_eq!(steps, vec![Step::Variable, Step::Sin]);
/// ```
pub fn derivative_with_steps(
    expr: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<Derivative, Error> {
    differentiate(expr, step_collector).map_err(|mut kind| {
        // indices were pushed from the failing node outward
        kind.path.reverse();

        let (rendered, span) = expr.render_with_span(&kind.path);
        debug!("cannot differentiate `{}` in `{}` (path {:?})", kind.tag, rendered, kind.path);

        Error::new(span.into_iter().collect(), kind)
    })
}

/// Differentiates any node, recording the rule that was applied.
fn differentiate(
    expr: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<Derivative, UnimplementedOperation> {
    let (step, derivative) = match expr {
        Expr::Constant(_) => (Step::Constant, Derivative::Zero),
        Expr::Variable => (Step::Variable, Derivative::Expr(constant(1.0))),
        Expr::Negate(f) => negate_rule(f, step_collector)?,
        Expr::Add(f, g) => sum_rule(f, g, step_collector)?,
        Expr::Subtract(f, g) => difference_rule(f, g, step_collector)?,
        Expr::Multiply(f, g) => product_rule(f, g, step_collector)?,
        Expr::Divide(f, g) => quotient_rule(f, g, step_collector)?,
        Expr::Power(f, g) => power_rule(f, g, step_collector)?,
        Expr::Sin(_)
            | Expr::Cos(_)
            | Expr::Tan(_)
            | Expr::Exp(_)
            | Expr::Ln(_)
            | Expr::Sqrt(_) => function::function_derivative(expr, step_collector)?,
    };

    trace!("{:?}: ({})' = {}", step, expr, DisplayDerivative(&derivative));
    step_collector.push(step);
    Ok(derivative)
}

/// Differentiates the child at `index` of the node being differentiated.
fn child_derivative(
    child: &Expr,
    index: usize,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<Derivative, UnimplementedOperation> {
    differentiate(child, step_collector).map_err(|err| err.within(index))
}

/// Differentiates both children of a binary node, left first.
fn binary_derivatives(
    f: &Expr,
    g: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<(Derivative, Derivative), UnimplementedOperation> {
    let df = child_derivative(f, 0, step_collector)?;
    let dg = child_derivative(g, 1, step_collector)?;
    Ok((df, dg))
}

/// `(-f)' = -f'`
fn negate_rule(f: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Rule {
    Ok(match child_derivative(f, 0, step_collector)? {
        Derivative::Zero => (Step::ZeroDerivative, Derivative::Zero),
        Derivative::Expr(df) => (Step::Negate, neg(df).into()),
    })
}

/// `(f + g)' = f' + g'`
fn sum_rule(f: &Expr, g: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Rule {
    use Derivative::{Expr as D, Zero};

    Ok(match binary_derivatives(f, g, step_collector)? {
        (Zero, Zero) => (Step::ZeroDerivative, Zero),
        (Zero, D(dg)) => (Step::SumConstantLeft, D(dg)),
        (D(df), Zero) => (Step::SumConstantRight, D(df)),
        (D(df), D(dg)) => (Step::Sum, D(add(df, dg))),
    })
}

/// `(f - g)' = f' - g'`
fn difference_rule(f: &Expr, g: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Rule {
    use Derivative::{Expr as D, Zero};

    Ok(match binary_derivatives(f, g, step_collector)? {
        (Zero, Zero) => (Step::ZeroDerivative, Zero),
        (Zero, D(dg)) => (Step::DifferenceConstantLeft, D(neg(dg))),
        (D(df), Zero) => (Step::DifferenceConstantRight, D(df)),
        (D(df), D(dg)) => (Step::Difference, D(sub(df, dg))),
    })
}

/// `(f * g)' = f' * g + f * g'`
fn product_rule(f: &Expr, g: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Rule {
    use Derivative::{Expr as D, Zero};

    Ok(match binary_derivatives(f, g, step_collector)? {
        (Zero, Zero) => (Step::ZeroDerivative, Zero),
        (Zero, D(dg)) => (Step::ConstantFactorLeft, D(mul(f.copy(), dg))),
        (D(df), Zero) => (Step::ConstantFactorRight, D(mul(df, g.copy()))),
        (D(df), D(dg)) => (
            Step::Product,
            D(add(mul(df, g.copy()), mul(f.copy(), dg))),
        ),
    })
}

/// `(f / g)' = (f' * g - f * g') / g^2`
fn quotient_rule(f: &Expr, g: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Rule {
    use Derivative::{Expr as D, Zero};

    Ok(match binary_derivatives(f, g, step_collector)? {
        (Zero, Zero) => (Step::ZeroDerivative, Zero),
        // c * (1/g)'
        (Zero, D(dg)) => (
            Step::Reciprocal,
            D(mul(f.copy(), div(neg(dg), pow(g.copy(), constant(2.0))))),
        ),
        (D(df), Zero) => (
            Step::ConstantDivisor,
            D(mul(div(constant(1.0), g.copy()), df)),
        ),
        (D(df), D(dg)) => (
            Step::Quotient,
            D(div(
                sub(mul(df, g.copy()), mul(f.copy(), dg)),
                pow(g.copy(), constant(2.0)),
            )),
        ),
    })
}

/// `(f^n)' = n * f^(n - 1)` for a constant exponent `n`, otherwise the general exponent rule.
///
/// Both rules reproduce the established output of this engine rather than the textbook ones:
///
/// - With a constant exponent, the base's derivative `f'` is computed but never multiplied in, so
///   the result is only exact when the base is `x` itself. `(sin(x)^2)'` is `2 * sin(x)^(2 - 1)`.
/// - The general rule is `f^g * (f' * ln(g) + f * (g' / g))`, which swaps the roles of base and
///   exponent compared to the textbook `f^g * (g' * ln(f) + g * (f' / f))`. It is only exact in
///   special cases, such as when `f = g`.
fn power_rule(f: &Expr, g: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Rule {
    use Derivative::{Expr as D, Zero};

    Ok(match binary_derivatives(f, g, step_collector)? {
        (Zero, Zero) => (Step::ZeroDerivative, Zero),
        // no chain factor, see above
        (D(_), Zero) => (
            Step::PowerRule,
            D(mul(g.copy(), pow(f.copy(), sub(g.copy(), constant(1.0))))),
        ),
        (df, D(dg)) => (
            Step::GeneralPower,
            D(mul(
                pow(f.copy(), g.copy()),
                add(
                    mul(df.into_expr(), ln(g.copy())),
                    mul(f.copy(), div(dg, g.copy())),
                ),
            )),
        ),
    })
}

/// Renders a [`Derivative`] for logging.
struct DisplayDerivative<'a>(&'a Derivative);

impl std::fmt::Display for DisplayDerivative<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Derivative::Zero => write!(f, "0"),
            Derivative::Expr(expr) => write!(f, "{}", expr),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_relative_error_msg,
        afe_is_relative_eq,
        assert_float_relative_eq,
    };
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use super::*;

    /// Differentiates the expression, expecting a non-zero derivative.
    fn d(expr: &Expr) -> Expr {
        match derivative(expr) {
            Ok(Derivative::Expr(expr)) => expr,
            Ok(Derivative::Zero) => panic!("derivative of `{expr}` was unexpectedly zero"),
            Err(err) => panic!("derivative of `{expr}` failed: {err}"),
        }
    }

    /// Differentiates the expression, returning the rules applied.
    fn steps(expr: &Expr) -> Vec<Step> {
        let mut steps = Vec::new();
        derivative_with_steps(expr, &mut steps).unwrap();
        steps
    }

    /// Evaluates an expression at the given value of `x`. Only used to check derivatives
    /// numerically.
    fn eval(expr: &Expr, at: f64) -> f64 {
        match expr {
            Expr::Constant(value) => *value,
            Expr::Variable => at,
            Expr::Negate(f) => -eval(f, at),
            Expr::Add(f, g) => eval(f, at) + eval(g, at),
            Expr::Subtract(f, g) => eval(f, at) - eval(g, at),
            Expr::Multiply(f, g) => eval(f, at) * eval(g, at),
            Expr::Divide(f, g) => eval(f, at) / eval(g, at),
            Expr::Power(f, g) => eval(f, at).powf(eval(g, at)),
            Expr::Sin(f) => eval(f, at).sin(),
            Expr::Cos(f) => eval(f, at).cos(),
            Expr::Tan(f) => eval(f, at).tan(),
            Expr::Exp(f) => eval(f, at).exp(),
            Expr::Ln(f) => eval(f, at).ln(),
            Expr::Sqrt(f) => eval(f, at).sqrt(),
        }
    }

    /// Compares the symbolic derivative of `expr` against a central finite difference at each
    /// of the given points.
    fn test_for_function(expr: Expr, points: impl IntoIterator<Item = f64>) {
        const DX: f64 = 1e-6;
        let symbolic = d(&expr);

        for point in points {
            let symbolically_computed = eval(&symbolic, point);
            let numerically_computed = (eval(&expr, point + DX) - eval(&expr, point - DX)) / (2.0 * DX);
            assert_float_relative_eq!(symbolically_computed, numerically_computed, 1e-5);
        }
    }

    #[test]
    fn constant_subtrees_are_zero() {
        let constants = [
            constant(4.0),
            -constant(4.0),
            constant(1.0) + constant(2.0),
            constant(1.0) - constant(2.0),
            constant(3.0) * constant(2.0),
            constant(3.0) / constant(2.0),
            pow(constant(2.0), constant(3.0)),
            sin(constant(1.0)),
            cos(constant(1.0) * constant(2.0)),
            tan(constant(1.0)),
            exp(-constant(1.0)),
            sqrt(constant(2.0) + constant(2.0)),
        ];
        for expr in &constants {
            let result = derivative(expr).unwrap();
            assert_eq!(result, Derivative::Zero, "{expr}");
            assert_eq!(result.tag(), NodeTag::Null);
        }
    }

    #[test]
    fn zero_into_expr() {
        assert_eq!(Derivative::Zero.into_expr(), constant(0.0));
        assert!(derivative(&constant(7.0)).unwrap().is_zero());
    }

    #[test]
    fn variable_is_one() {
        assert_eq!(d(&x()), constant(1.0));
        assert_eq!(x().derivative().unwrap().tag(), NodeTag::Constant);
    }

    #[test]
    fn sum_of_variables() {
        assert_eq!(d(&(x() + x())), constant(1.0) + constant(1.0));
    }

    #[test]
    fn linearity() {
        let f = sin(x());
        let g = x() * x();
        assert_eq!(d(&(f.copy() + g.copy())), d(&f) + d(&g));
        assert_eq!(d(&(f.copy() - g.copy())), d(&f) - d(&g));
    }

    #[test]
    fn sum_elision() {
        assert_eq!(d(&(constant(3.0) + x())), constant(1.0));
        assert_eq!(d(&(x() + constant(3.0))), constant(1.0));
        assert_eq!(steps(&(constant(3.0) + x())), vec![Step::Constant, Step::Variable, Step::SumConstantLeft]);
    }

    #[test]
    fn difference_elision() {
        assert_eq!(d(&(constant(3.0) - x())), -constant(1.0));
        assert_eq!(d(&(x() - constant(3.0))), constant(1.0));
        assert_eq!(d(&(x() - x())), constant(1.0) - constant(1.0));
    }

    #[test]
    fn negate() {
        assert_eq!(d(&-x()), -constant(1.0));
        assert_eq!(d(&-sin(x())), -cos(x()));
    }

    #[test]
    fn product_rule() {
        assert_eq!(
            d(&(x() * x())),
            constant(1.0) * x() + x() * constant(1.0),
        );
        assert_eq!(steps(&(x() * x())), vec![Step::Variable, Step::Variable, Step::Product]);
    }

    #[test]
    fn product_elision() {
        assert_eq!(d(&(constant(2.0) * x())), constant(2.0) * constant(1.0));
        assert_eq!(d(&(x() * constant(2.0))), constant(1.0) * constant(2.0));
    }

    #[test]
    fn quotient_rule() {
        assert_eq!(
            d(&(sin(x()) / x())),
            (cos(x()) * x() - sin(x()) * constant(1.0)) / pow(x(), constant(2.0)),
        );
    }

    #[test]
    fn quotient_elision() {
        // (2 / x)' = 2 * (-1 / x^2)
        assert_eq!(
            d(&(constant(2.0) / x())),
            constant(2.0) * (-constant(1.0) / pow(x(), constant(2.0))),
        );

        // (x / 2)' = (1 / 2) * 1
        assert_eq!(
            d(&(x() / constant(2.0))),
            (constant(1.0) / constant(2.0)) * constant(1.0),
        );
    }

    #[test]
    fn power_rule() {
        assert_eq!(
            d(&pow(x(), constant(3.0))),
            constant(3.0) * pow(x(), constant(3.0) - constant(1.0)),
        );
        assert_eq!(d(&pow(x(), constant(3.0))).to_string(), "3 * x^(3 - 1)");
    }

    #[test]
    fn power_rule_leaves_out_base_derivative() {
        // (sin(x)^2)' = 2 * sin(x)^(2 - 1), with no `cos(x)` factor
        assert_eq!(
            d(&pow(sin(x()), constant(2.0))),
            constant(2.0) * pow(sin(x()), constant(2.0) - constant(1.0)),
        );
        assert_eq!(
            d(&pow(x() * x(), constant(3.0))).to_string(),
            "3 * (x * x)^(3 - 1)",
        );

        // the base is still differentiated
        assert_eq!(
            steps(&pow(sin(x()), constant(2.0))),
            vec![Step::Variable, Step::Sin, Step::Constant, Step::PowerRule],
        );
        assert!(derivative(&pow(ln(x()), constant(2.0))).is_err());
    }

    #[test]
    fn general_power() {
        // x^x * (1 * ln(x) + x * (1 / x))
        assert_eq!(
            d(&pow(x(), x())),
            pow(x(), x()) * (constant(1.0) * ln(x()) + x() * (constant(1.0) / x())),
        );

        // the base's zero derivative still shows up as a literal `0`
        assert_eq!(
            d(&pow(constant(2.0), x())),
            pow(constant(2.0), x()) * (constant(0.0) * ln(x()) + constant(2.0) * (constant(1.0) / x())),
        );
    }

    #[test]
    fn functions_of_variable() {
        assert_eq!(d(&sin(x())), cos(x()));
        assert_eq!(d(&cos(x())), -sin(x()));
        assert_eq!(d(&tan(x())), constant(1.0) / pow(cos(x()), constant(2.0)));
        assert_eq!(d(&exp(x())), exp(x()));
        assert_eq!(d(&sqrt(x())), constant(1.0) / (constant(2.0) * sqrt(x())));
    }

    #[test]
    fn functions_with_chain() {
        let inner = x() * constant(2.0);
        let d_inner = constant(1.0) * constant(2.0);

        assert_eq!(d(&sin(inner.copy())), d_inner.copy() * cos(inner.copy()));
        assert_eq!(d(&cos(inner.copy())), -(d_inner.copy() * sin(inner.copy())));
        assert_eq!(d(&tan(inner.copy())), d_inner.copy() / pow(cos(inner.copy()), constant(2.0)));
        assert_eq!(d(&exp(inner.copy())), d_inner.copy() * exp(inner.copy()));
        assert_eq!(d(&sqrt(inner.copy())), d_inner / (constant(2.0) * sqrt(inner)));
    }

    #[test]
    fn ln_is_unimplemented() {
        let err = derivative(&ln(x())).unwrap_err();
        let kind = err.downcast_ref::<UnimplementedOperation>().unwrap();
        assert_eq!(kind.tag, NodeTag::Ln);
        assert_eq!(kind.path, Vec::<usize>::new());
        assert_eq!(err.spans, vec![0..5]);
        assert_eq!(err.to_string(), "cannot differentiate `ln` symbolically");

        // even when the argument is constant
        assert!(derivative(&ln(constant(2.0))).is_err());
    }

    #[test]
    fn nested_ln_points_at_node() {
        // (x + 1) * sin(ln(x))
        let expr = (x() + constant(1.0)) * sin(ln(x()));
        let err = derivative(&expr).unwrap_err();
        let kind = err.downcast_ref::<UnimplementedOperation>().unwrap();
        assert_eq!(kind.path, vec![1, 0]);
        assert_eq!(expr.get(&kind.path).map(Expr::tag), Some(NodeTag::Ln));
        assert_eq!(&expr.to_string()[err.spans[0].clone()], "ln(x)");
    }

    #[test]
    fn failure_keeps_earlier_steps() {
        let mut steps = Vec::new();
        assert!(derivative_with_steps(&(sin(x()) * ln(x())), &mut steps).is_err());
        assert_eq!(steps, vec![Step::Variable, Step::Sin]);
    }

    #[test]
    fn input_is_untouched() {
        let expr = sin(x() * x()) / sqrt(x());
        let before = expr.copy();
        let _ = d(&expr);
        assert_eq!(expr, before);
    }

    #[test]
    fn result_shares_no_nodes_with_input() {
        let expr = (sin(x()) * pow(x(), constant(2.0))) / sqrt(exp(x()) + constant(1.0));
        let result = d(&expr);

        let input_nodes = expr.post_order_iter()
            .map(|node| node as *const Expr)
            .collect::<HashSet<_>>();
        assert!(result.post_order_iter().all(|node| !input_nodes.contains(&(node as *const Expr))));

        // both trees can be dropped independently
        drop(expr);
        assert!(result.complexity() > 1);
    }

    #[test]
    fn steps_for_nested_expression() {
        // sin(x * 2)' = (1 * 2) * cos(x * 2)
        assert_eq!(steps(&sin(x() * constant(2.0))), vec![
            Step::Variable,
            Step::Constant,
            Step::ConstantFactorRight,
            Step::SinChain,
        ]);
    }

    #[test]
    fn numeric_agreement() {
        let points = [0.7, 1.3, 2.1];
        test_for_function(pow(x(), constant(3.0)) + x() * constant(2.0) - constant(5.0), points);
        test_for_function(sin(x()) * x(), points);
        test_for_function(sin(x()) / x(), points);
        test_for_function(cos(x() * x()), points);
        test_for_function(exp(sin(x())), points);
        test_for_function(tan(x() * constant(2.0)), points);
        test_for_function(sqrt(x() * x() + constant(1.0)), points);
        test_for_function(constant(3.0) / x(), points);
        test_for_function((x() + constant(1.0)) / constant(4.0), points);
        test_for_function(pow(x(), constant(4.0)) / constant(2.0), points);
        test_for_function(-cos(x()) - x(), points);

        // the general exponent rule is exact when base and exponent coincide
        test_for_function(pow(x(), x()), points);
    }
}
