/// Receives the rewrite rules applied while differentiating an expression, in the order they were
/// applied (children before their parents).
///
/// Implemented for:
///
/// - `()`, which discards every step,
/// - [`Vec`], which keeps all of them,
/// - `&mut C` for any collector `C`, so a collector can be lent to a nested call and reused.
pub trait StepCollector<S> {
    /// Records one step.
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }
}

impl<S, C: StepCollector<S> + ?Sized> StepCollector<S> for &mut C {
    #[inline]
    fn push(&mut self, step: S) {
        (**self).push(step);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn push_all(collector: &mut dyn StepCollector<u8>, steps: &[u8]) {
        for &step in steps {
            collector.push(step);
        }
    }

    #[test]
    fn vec_keeps_order() {
        let mut steps = Vec::new();
        push_all(&mut steps, &[3, 1, 2]);
        assert_eq!(steps, vec![3, 1, 2]);
    }

    #[test]
    fn borrowed_collector_forwards() {
        let mut steps = Vec::new();
        {
            let mut borrowed = &mut steps;
            push_all(&mut borrowed, &[1]);
        }
        push_all(&mut steps, &[2]);
        assert_eq!(steps, vec![1, 2]);
    }

    #[test]
    fn unit_discards() {
        push_all(&mut (), &[1, 2, 3]);
    }
}
