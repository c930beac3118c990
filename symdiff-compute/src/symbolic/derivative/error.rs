use ariadne::Fmt;
use crate::symbolic::expr::NodeTag;
use std::any::Any;
use symdiff_error::{ErrorKind, EXPR};

/// The derivative of this kind of node cannot be computed symbolically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnimplementedOperation {
    /// The type of the node that could not be differentiated.
    pub tag: NodeTag,

    /// The child indices leading from the root of the differentiated expression to the node.
    pub path: Vec<usize>,
}

impl UnimplementedOperation {
    /// Creates the error for a node at the root of the expression being differentiated.
    pub(super) fn new(tag: NodeTag) -> Self {
        Self { tag, path: Vec::new() }
    }

    /// Records that the failing node was found under the child at `index`. Indices are recorded
    /// from the failing node outward while the recursion unwinds.
    pub(super) fn within(mut self, index: usize) -> Self {
        self.path.push(index);
        self
    }
}

impl ErrorKind for UnimplementedOperation {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn message(&self) -> String {
        format!("cannot differentiate `{}` symbolically", self.tag)
    }

    fn labels(&self) -> Vec<String> {
        vec![format!("this `{}` node", self.tag)]
    }

    fn help(&self) -> Option<String> {
        Some(format!(
            "differentiation is not implemented for {}; remove it from the expression",
            format!("{}(...)", self.tag).fg(EXPR),
        ))
    }
}
