//! Infix rendering of expressions.
//!
//! Parentheses are inserted only where the tree structure would otherwise be lost, so rendering
//! is unambiguous: `x - (x - 1)` and `(x - x) - 1` print differently, and `(x^2)^3` keeps its
//! parentheses while `x^2^3` does not need any.

use std::{fmt, ops::Range};
use super::{Expr, VARIABLE_NAME};

/// Binding strength of a node when printed, from loosest to tightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Term,
    Factor,
    Neg,
    Exp,
    Primary,
}

impl Expr {
    /// Returns the precedence of the expression.
    fn precedence(&self) -> Precedence {
        match self {
            // negative numbers print with a leading `-`, so they bind like negation
            Self::Constant(value) if value.is_sign_negative() => Precedence::Neg,
            Self::Constant(_) | Self::Variable => Precedence::Primary,
            Self::Sin(_)
                | Self::Cos(_)
                | Self::Tan(_)
                | Self::Exp(_)
                | Self::Ln(_)
                | Self::Sqrt(_) => Precedence::Primary,
            Self::Negate(_) => Precedence::Neg,
            Self::Add(..) | Self::Subtract(..) => Precedence::Term,
            Self::Multiply(..) | Self::Divide(..) => Precedence::Factor,
            Self::Power(..) => Precedence::Exp,
        }
    }

    /// Renders the expression, also returning the byte range that the node at `path` occupies in
    /// the rendered text. The range is [`None`] if `path` does not lead to a node.
    ///
    /// ```
    /// use symdiff_compute::symbolic::expr::build::*;
    ///
    /// let expr = x() * ln(x() + constant(1.0));
    /// let (text, span) = expr.render_with_span(&[1]);
    /// assert_eq!(text, "x * ln(x + 1)");
    /// assert_eq!(&text[span.unwrap()], "ln(x + 1)");
    /// ```
    pub fn render_with_span(&self, path: &[usize]) -> (String, Option<Range<usize>>) {
        let mut renderer = Renderer::default();
        renderer.write(self, Some(path));
        (renderer.out, renderer.span)
    }
}

/// Writes expressions into a string, recording the span of one target node on the way.
#[derive(Default)]
struct Renderer {
    out: String,
    span: Option<Range<usize>>,
}

impl Renderer {
    /// Writes `expr`. `target` is the path to the target node relative to `expr`, or [`None`] if
    /// the target is not inside `expr`.
    fn write(&mut self, expr: &Expr, target: Option<&[usize]>) {
        let start = self.out.len();
        let child_target = |index: usize| {
            target
                .and_then(|path| path.split_first())
                .filter(|(first, _)| **first == index)
                .map(|(_, rest)| rest)
        };

        match expr {
            Expr::Constant(value) => self.out.push_str(&value.to_string()),
            Expr::Variable => self.out.push_str(VARIABLE_NAME),
            Expr::Negate(f) => {
                self.out.push('-');
                self.write_operand(expr, f, true, child_target(0));
            },
            Expr::Add(lhs, rhs)
                | Expr::Subtract(lhs, rhs)
                | Expr::Multiply(lhs, rhs)
                | Expr::Divide(lhs, rhs)
                | Expr::Power(lhs, rhs) => {
                let op = match expr {
                    Expr::Add(..) => " + ",
                    Expr::Subtract(..) => " - ",
                    Expr::Multiply(..) => " * ",
                    Expr::Divide(..) => " / ",
                    _ => "^",
                };
                // `^` groups to the right, every other operator to the left
                let right_assoc = matches!(expr, Expr::Power(..));
                self.write_operand(expr, lhs, right_assoc, child_target(0));
                self.out.push_str(op);
                self.write_operand(expr, rhs, !right_assoc, child_target(1));
            },
            Expr::Sin(f)
                | Expr::Cos(f)
                | Expr::Tan(f)
                | Expr::Exp(f)
                | Expr::Ln(f)
                | Expr::Sqrt(f) => {
                // every unary node except `Negate` is a named function
                let name = expr.tag().function_name().unwrap_or_default();
                self.out.push_str(name);
                self.out.push('(');
                self.write(f, child_target(0));
                self.out.push(')');
            },
        }

        if target.is_some_and(|path| path.is_empty()) {
            self.span = Some(start..self.out.len());
        }
    }

    /// Writes an operand of `parent`, wrapping it in parentheses if it binds more loosely than
    /// the parent, or equally loosely when `paren_on_tie` is set.
    fn write_operand(
        &mut self,
        parent: &Expr,
        operand: &Expr,
        paren_on_tie: bool,
        target: Option<&[usize]>,
    ) {
        let needs_parens = match operand.precedence().cmp(&parent.precedence()) {
            std::cmp::Ordering::Less => true,
            std::cmp::Ordering::Equal => paren_on_tie,
            std::cmp::Ordering::Greater => false,
        };

        if needs_parens {
            self.out.push('(');
            self.write(operand, target);
            self.out.push(')');
        } else {
            self.write(operand, target);
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut renderer = Renderer::default();
        renderer.write(self, None);
        f.write_str(&renderer.out)
    }
}
