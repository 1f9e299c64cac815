//! The runner algebra: interpreters of chains over contextual values.

use crate::chain::Stage;
use crate::contexting::Contextual;
use crate::error::StageError;

/// Terminal state of a runner invocation.
///
/// A run starts in `Running(0)` and advances stage by stage until it either
/// exhausts the chain or short-circuits. Both states are terminal; runners
/// never retry.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<V> {
    /// Execution stopped at the stage with index `at`. That stage contributed
    /// nothing to the result and no later stage ran.
    ShortCircuited { at: usize, result: Contextual<V> },
    /// Every stage ran.
    Completed(Contextual<V>),
}

impl<V> Outcome<V> {
    pub fn is_short_circuited(&self) -> bool {
        matches!(self, Self::ShortCircuited { .. })
    }

    pub fn result(&self) -> &Contextual<V> {
        match self {
            Self::ShortCircuited { result, .. } | Self::Completed(result) => result,
        }
    }

    pub fn into_result(self) -> Contextual<V> {
        match self {
            Self::ShortCircuited { result, .. } | Self::Completed(result) => result,
        }
    }
}

/// Chain execution capability over contextual values.
///
/// # Laws
///
/// All implementations must satisfy these laws:
///
/// - **L1 (Call Consistency)**: `call` is `run` without the terminal state.
///   ```text
///   r.call(x) == r.run(x.into()).map(Outcome::into_result)
///   ```
///
/// - **L2 (Bare Lifting)**: A bare value runs as if it had no context.
///   ```text
///   r.call(v) == r.call(Contextual::new(v))
///   ```
///
/// - **L3 (Terminality)**: A short-circuited run invokes no stage after the
///   one it stopped at, and that stage contributes nothing to the result.
///
/// This trait is **object-safe** and can be used as `dyn Runner<V>`.
pub trait Runner<V>: Send + Sync {
    /// Runs the wrapped chain and reports how it terminated.
    fn run(&self, input: Contextual<V>) -> Result<Outcome<V>, StageError>;

    /// Runs the wrapped chain like an ordinary function.
    fn call(&self, input: impl Into<Contextual<V>>) -> Result<Contextual<V>, StageError>
    where
        Self: Sized,
    {
        self.run(input.into()).map(Outcome::into_result)
    }

    /// Turns the runner into a single stage so it can be embedded in an
    /// outer chain.
    fn into_stage(self) -> Stage<Contextual<V>>
    where
        Self: Sized + 'static,
        V: 'static,
    {
        Stage::new(move |input| self.run(input).map(Outcome::into_result))
    }
}
