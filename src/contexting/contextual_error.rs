// src/contexting/contextual_error.rs
//! Errors annotated with a flag context.

use super::contextual::{Context, Contextual};
use crate::flags::FlagSet;
use std::error::Error as StdError;
use std::fmt;

/// An error together with the context it was raised in.
///
/// Built and flattened exactly like [`Contextual`]; it is a regular error
/// type, so it can be returned with `?` and inspected through `source()`.
#[derive(Clone, PartialEq, Debug)]
pub struct ContextualError<E> {
    inner: Contextual<E>,
}

/// One entry of [`ContextualError::causes`].
#[derive(Clone, PartialEq, Debug)]
pub enum Cause<E> {
    /// The error wrapped in its innermost levels, up to some depth.
    Contextual(ContextualError<E>),
    /// The annotated error itself.
    Error(E),
}

impl<E> ContextualError<E> {
    pub fn new(error: E) -> Self {
        Self {
            inner: Contextual::new(error),
        }
    }

    pub fn with(error: E, context: impl Into<Context>) -> Self {
        Self {
            inner: Contextual::with(error, context),
        }
    }

    /// `error` in a layered context; see [`Context::layered`].
    pub fn nested(error: E, levels: impl IntoIterator<Item = FlagSet>) -> Self {
        Self {
            inner: Contextual::nested(error, levels),
        }
    }

    pub fn error(&self) -> &E {
        self.inner.value()
    }

    pub fn context(&self) -> &Context {
        self.inner.context()
    }

    pub fn flags(&self) -> FlagSet {
        self.inner.flags()
    }

    pub fn into_parts(self) -> (E, Context) {
        self.inner.into_parts()
    }

    pub fn into_error(self) -> E {
        self.inner.into_value()
    }

    pub fn is_metacontextual(&self) -> bool {
        self.inner.is_metacontextual()
    }

    pub fn with_reduced_metacontext(self) -> Self {
        Self {
            inner: self.inner.with_reduced_metacontext(),
        }
    }

    pub fn without_metacontext(self) -> Self {
        Self {
            inner: self.inner.without_metacontext(),
        }
    }

    /// Adds `flags` to the immediate context.
    pub fn add_context(self, flags: impl Into<FlagSet>) -> Self {
        Self {
            inner: self.inner.add_context(flags),
        }
    }

    /// The error re-wrapped in ever fewer levels, then the bare error.
    ///
    /// With `n` levels the first cause keeps all of them and each next one
    /// drops the outermost. Never empty: a context-free error yields
    /// `[Contextual(ContextualError::new(e)), Error(e)]`.
    pub fn causes(&self) -> Vec<Cause<E>>
    where
        E: Clone,
    {
        let levels: Vec<FlagSet> = self.context().levels().into_iter().cloned().collect();
        let mut causes: Vec<Cause<E>> = (1..=levels.len())
            .rev()
            .map(|depth| {
                let layer = Self::nested(self.error().clone(), levels[..depth].to_vec());
                Cause::Contextual(layer)
            })
            .collect();
        causes.push(Cause::Error(self.error().clone()));
        causes
    }
}

impl<E> From<Contextual<E>> for ContextualError<E> {
    fn from(inner: Contextual<E>) -> Self {
        Self { inner }
    }
}

impl<E> From<ContextualError<E>> for Contextual<E> {
    fn from(error: ContextualError<E>) -> Self {
        error.inner
    }
}

impl<E: fmt::Display> fmt::Display for ContextualError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContextualError({})", self.inner)
    }
}

impl<E> StdError for ContextualError<E>
where
    E: StdError + 'static,
{
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StageError;
    use crate::flags::{pointed, Flag};
    use pretty_assertions::assert_eq;

    fn flag(name: &str) -> FlagSet {
        FlagSet::from(Flag::new(name).unwrap())
    }

    #[test]
    fn test_causes_outermost_first() {
        let (a, b) = (flag("a"), flag("b"));
        let error = ContextualError::nested("boom", [a.clone(), b]);

        assert_eq!(
            error.causes(),
            vec![
                Cause::Contextual(error.clone()),
                Cause::Contextual(ContextualError::with("boom", a)),
                Cause::Error("boom"),
            ]
        );
    }

    #[test]
    fn test_causes_peel_one_level_at_a_time() {
        let error = ContextualError::nested('e', (1..=4).map(pointed));
        let depths: Vec<usize> = error
            .causes()
            .iter()
            .filter_map(|cause| match cause {
                Cause::Contextual(layer) => Some(layer.context().depth()),
                Cause::Error(_) => None,
            })
            .collect();
        assert_eq!(depths, vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_causes_never_empty() {
        let causes = ContextualError::new(1).causes();
        assert_eq!(
            causes,
            vec![Cause::Contextual(ContextualError::new(1)), Cause::Error(1)]
        );
    }

    #[test]
    fn test_reduction_mirrors_contextual() {
        let error = ContextualError::nested("e", (1..=3).map(pointed));
        assert!(error.is_metacontextual());

        let flat = error.clone().without_metacontext();
        assert_eq!(flat.flags().points_as::<i32>(), vec![&1, &2, &3]);
        assert_eq!(error.with_reduced_metacontext().context().depth(), 2);
    }

    #[test]
    fn test_source_is_the_error() {
        let error = ContextualError::with(StageError::msg("stage failed"), pointed(7));
        let source = error.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("stage failed"));
        assert_eq!(
            error.to_string(),
            "ContextualError(stage failed when pointed(7))"
        );
    }
}
