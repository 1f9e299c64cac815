// src/monads/future.rs
//! Deferred actions carried in a context.

use crate::chain::Stage;
use crate::contexting::Contextual;
use crate::error::StageError;
use crate::flags::{future, pointed, FlagSet, PointValue};
use std::fmt;

/// A stage bound to the input it will be called with.
///
/// Deferred actions are pointed into contexts; two of them are the same atom
/// when they hold the same stage and equal inputs.
pub struct Deferred<V> {
    stage: Stage<V>,
    input: V,
}

impl<V> Deferred<V> {
    pub fn new(stage: Stage<V>, input: V) -> Self {
        Self { stage, input }
    }

    pub fn input(&self) -> &V {
        &self.input
    }

    /// Calls the stage on a copy of the bound input.
    pub fn run(&self) -> Result<V, StageError>
    where
        V: Clone,
    {
        self.stage.apply(self.input.clone())
    }
}

impl<V: Clone> Clone for Deferred<V> {
    fn clone(&self) -> Self {
        Self {
            stage: self.stage.clone(),
            input: self.input.clone(),
        }
    }
}

impl<V: PartialEq> PartialEq for Deferred<V> {
    fn eq(&self, other: &Self) -> bool {
        self.stage == other.stage && self.input == other.input
    }
}

impl<V: fmt::Debug> fmt::Debug for Deferred<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deferred({}({:?}))", self.stage.label(), self.input)
    }
}

/// A contextual stage that defers `stage` instead of running it.
///
/// The value passes through unchanged; its context gains the pointed
/// [`Deferred`] call and the [`future`] flag.
pub fn in_future<V>(stage: Stage<V>) -> Stage<Contextual<V>>
where
    V: PointValue + PartialEq + Clone,
{
    let label = format!("in_future({})", stage.label());
    Stage::map(move |input: Contextual<V>| {
        let deferred = Deferred::new(stage.clone(), input.value().clone());
        input.add_context(pointed(deferred).union(&FlagSet::from(future())))
    })
    .labeled(&label)
}

/// Runs every deferred action over `V` found in `flags`, in order.
pub fn future_from<V>(flags: &FlagSet) -> Result<Vec<V>, StageError>
where
    V: PointValue + PartialEq + Clone,
{
    flags
        .points_as::<Deferred<V>>()
        .into_iter()
        .map(Deferred::run)
        .collect()
}
