// src/chain.rs
//! Ordered, immutable sequences of unary stages.
//!
//! A [`Chain`] is a plain left-to-right fold over its stages. Chains share
//! their stage storage structurally (`im::Vector`), so composing, slicing and
//! cloning never copy the stages themselves.

use crate::contexting::Contextual;
use crate::error::{ChainError, StageError};
use std::error::Error as StdError;
use std::fmt;
use std::ops::{Bound, RangeBounds};
use std::sync::Arc;

type StageFn<T> = dyn Fn(T) -> Result<T, StageError> + Send + Sync;

const DEFAULT_STAGE_LABEL: &str = "stage";

/// A single unary transformation.
///
/// Stages compare by identity: a clone of a stage equals the original, two
/// separately built stages never do.
pub struct Stage<T> {
    label: Arc<str>,
    action: Arc<StageFn<T>>,
}

impl<T> Stage<T> {
    /// Wraps a fallible transformation.
    pub fn new<F>(action: F) -> Self
    where
        F: Fn(T) -> Result<T, StageError> + Send + Sync + 'static,
    {
        Self {
            label: Arc::from(DEFAULT_STAGE_LABEL),
            action: Arc::new(action),
        }
    }

    /// Wraps an infallible transformation.
    pub fn map<F>(action: F) -> Self
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        Self::new(move |input| Ok(action(input)))
    }

    /// Wraps a transformation failing with any standard error.
    pub fn try_map<F, E>(action: F) -> Self
    where
        F: Fn(T) -> Result<T, E> + Send + Sync + 'static,
        E: StdError + Send + Sync + 'static,
    {
        Self::new(move |input| action(input).map_err(StageError::new))
    }

    /// Renames the stage; labels only show up in `Debug` output and traces.
    pub fn labeled(mut self, label: &str) -> Self {
        self.label = Arc::from(label);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn apply(&self, input: T) -> Result<T, StageError> {
        (self.action)(input)
    }
}

impl<V> Stage<Contextual<V>> {
    /// Lifts a transformation of bare values into a contextual stage.
    ///
    /// The stage sees only the value. Its result replaces the whole
    /// contextual: a bare return value comes back with a `nothing` context,
    /// a returned `Contextual` keeps the context the function attached.
    pub fn lifted<F, R>(action: F) -> Self
    where
        F: Fn(V) -> R + Send + Sync + 'static,
        R: Into<Contextual<V>>,
    {
        Self::new(move |input: Contextual<V>| Ok(action(input.into_value()).into()))
    }

    /// Fallible version of [`Stage::lifted`].
    pub fn try_lifted<F, R, E>(action: F) -> Self
    where
        F: Fn(V) -> Result<R, E> + Send + Sync + 'static,
        R: Into<Contextual<V>>,
        E: StdError + Send + Sync + 'static,
    {
        Self::new(move |input: Contextual<V>| {
            action(input.into_value())
                .map(Into::into)
                .map_err(StageError::new)
        })
    }
}

impl<T> Clone for Stage<T> {
    fn clone(&self) -> Self {
        Self {
            label: Arc::clone(&self.label),
            action: Arc::clone(&self.action),
        }
    }
}

impl<T> PartialEq for Stage<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.action, &other.action)
    }
}

impl<T> fmt::Debug for Stage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stage({})", self.label)
    }
}

/// An immutable, ordered sequence of stages, callable as one function.
pub struct Chain<T> {
    stages: im::Vector<Stage<T>>,
}

impl<T> Chain<T> {
    /// The empty chain: the identity transformation.
    pub fn new() -> Self {
        Self {
            stages: im::Vector::new(),
        }
    }

    /// Concatenates `next` after this chain.
    pub fn then(mut self, next: impl Into<Chain<T>>) -> Self {
        self.stages.append(next.into().stages);
        self
    }

    /// Applies every stage left to right, stopping at the first error.
    pub fn call(&self, input: T) -> Result<T, StageError> {
        self.stages
            .iter()
            .try_fold(input, |value, stage| stage.apply(value))
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// The stage at `index`.
    pub fn at(&self, index: usize) -> Result<&Stage<T>, ChainError> {
        self.stages.get(index).ok_or(ChainError::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    /// A new chain over a contiguous range of stages.
    pub fn slice(&self, range: impl RangeBounds<usize>) -> Result<Self, ChainError> {
        let len = self.len();
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => len,
        };

        if start > end || end > len {
            return Err(ChainError::InvalidRange { start, end, len });
        }

        Ok(Self {
            stages: self.stages.skip(start).take(end - start),
        })
    }

    pub fn iter(&self) -> im::vector::Iter<'_, Stage<T>> {
        self.stages.iter()
    }

    /// Iterates the intermediate result of every stage for `input`.
    ///
    /// The iterator ends after the first failing stage.
    pub fn steps(&self, input: T) -> Steps<'_, T>
    where
        T: Clone,
    {
        Steps {
            stages: self.stages.iter(),
            current: Some(input),
            index: 0,
        }
    }
}

impl<T: 'static> Chain<T> {
    /// Collapses the chain into one opaque stage.
    ///
    /// Embedded in a runner, the whole segment counts as a single stage, so
    /// the runner's short-circuit checks never look inside it.
    pub fn atomically(self) -> Self {
        Self::from(self.into_stage())
    }

    /// The whole chain as a single stage.
    pub fn into_stage(self) -> Stage<T> {
        let label = format!("({})", self.labels().join(" -> "));
        Stage::new(move |input| self.call(input)).labeled(&label)
    }
}

impl<T> Chain<T> {
    fn labels(&self) -> Vec<&str> {
        self.stages.iter().map(Stage::label).collect()
    }
}

/// Composes two stages or chains into one chain.
pub fn compose<T>(first: impl Into<Chain<T>>, second: impl Into<Chain<T>>) -> Chain<T> {
    first.into().then(second)
}

/// Collapses `chain` into a single opaque stage; see [`Chain::atomically`].
pub fn atomically<T: 'static>(chain: impl Into<Chain<T>>) -> Chain<T> {
    chain.into().atomically()
}

impl<T> Default for Chain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Chain<T> {
    fn clone(&self) -> Self {
        Self {
            stages: self.stages.clone(),
        }
    }
}

impl<T> From<Stage<T>> for Chain<T> {
    fn from(stage: Stage<T>) -> Self {
        Self {
            stages: im::Vector::unit(stage),
        }
    }
}

impl<T> FromIterator<Stage<T>> for Chain<T> {
    fn from_iter<I: IntoIterator<Item = Stage<T>>>(iter: I) -> Self {
        Self {
            stages: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Chain<T> {
    type Item = &'a Stage<T>;
    type IntoIter = im::vector::Iter<'a, Stage<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.stages.iter()
    }
}

impl<T> PartialEq for Chain<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T> fmt::Debug for Chain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chain({})", self.labels().join(" -> "))
    }
}

/// One stage's result, as yielded by [`Chain::steps`].
#[derive(Debug)]
pub struct Step<'a, T> {
    pub index: usize,
    pub label: &'a str,
    pub result: Result<T, StageError>,
}

/// Iterator over the intermediate results of a chain.
pub struct Steps<'a, T> {
    stages: im::vector::Iter<'a, Stage<T>>,
    current: Option<T>,
    index: usize,
}

impl<'a, T: Clone> Iterator for Steps<'a, T> {
    type Item = Step<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let input = self.current.take()?;
        let stage = self.stages.next()?;
        let result = stage.apply(input);

        if let Ok(value) = &result {
            self.current = Some(value.clone());
        }

        let step = Step {
            index: self.index,
            label: stage.label(),
            result,
        };
        self.index += 1;
        Some(step)
    }
}
