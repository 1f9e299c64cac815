// src/monads/until_error.rs
//! Halt a chain at its first failing stage, keeping the last good value.

use crate::algebras::{Outcome, Runner};
use crate::chain::Chain;
use crate::contexting::{Contextual, ContextualError};
use crate::error::StageError;
use crate::flags::pointed;

/// Runs a chain of bare stages, turning the first stage error into context.
///
/// On failure the result holds the value the failing stage received, and the
/// error is added to the context as a pointed [`StageError`]. An input whose
/// context already carries a stage error is returned untouched. Running never
/// returns `Err`.
#[derive(Clone, Debug)]
pub struct UntilError<V> {
    chain: Chain<V>,
}

/// Wraps `chain` in an [`UntilError`] runner.
pub fn until_error<V>(chain: impl Into<Chain<V>>) -> UntilError<V> {
    UntilError {
        chain: chain.into(),
    }
}

impl<V> UntilError<V> {
    pub fn chain(&self) -> &Chain<V> {
        &self.chain
    }
}

impl<V: Clone> UntilError<V> {
    /// Like [`Runner::call`], but reports a halted run as an error.
    ///
    /// The returned error carries the context the value had before the
    /// failing stage.
    pub fn try_call(
        &self,
        input: impl Into<Contextual<V>>,
    ) -> Result<Contextual<V>, ContextualError<StageError>> {
        let result = match self.run(input.into()) {
            Ok(Outcome::Completed(result)) => return Ok(result),
            Ok(Outcome::ShortCircuited { result, .. }) => result,
            Err(error) => return Err(ContextualError::new(error)),
        };

        match result.stage_error() {
            Some(error) => {
                let (_, context) = result.into_parts();
                let context = context.apply(&pointed(error.clone()).removing());
                Err(ContextualError::with(error, context))
            }
            None => Ok(result),
        }
    }
}

impl<V: Clone> Runner<V> for UntilError<V> {
    fn run(&self, input: Contextual<V>) -> Result<Outcome<V>, StageError> {
        if let Some(error) = input.stage_error() {
            log::debug!("until_error: input already failed ({}), not running", error);
            return Ok(Outcome::ShortCircuited {
                at: 0,
                result: input,
            });
        }

        let (mut value, context) = input.into_parts();

        for (index, stage) in self.chain.iter().enumerate() {
            log::trace!("until_error: running stage {} ({})", index, stage.label());
            match stage.apply(value.clone()) {
                Ok(next) => value = next,
                Err(error) => {
                    log::debug!(
                        "until_error: stage {} ({}) failed: {}",
                        index,
                        stage.label(),
                        error
                    );
                    let result = Contextual::with(value, context).add_context(pointed(error));
                    return Ok(Outcome::ShortCircuited { at: index, result });
                }
            }
        }

        Ok(Outcome::Completed(Contextual::with(value, context)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::Stage;
    use crate::flags::{Flag, FlagSet};
    use pretty_assertions::assert_eq;
    use thiserror::Error;

    #[derive(Error, Debug)]
    #[error("division by zero")]
    struct DivisionByZero;

    fn arithmetic() -> UntilError<i64> {
        let chain = Chain::from(Stage::map(|n: i64| n + 10))
            .then(Stage::map(|n: i64| n * 2))
            .then(Stage::try_map(|n: i64| n.checked_div(n - 28).ok_or(DivisionByZero)))
            .then(Stage::map(|n: i64| n * n));
        until_error(chain)
    }

    #[test]
    fn test_halts_with_last_good_value() {
        let outcome = arithmetic().run(Contextual::new(4_i64)).unwrap();
        assert!(outcome.is_short_circuited());

        let result = outcome.into_result();
        assert_eq!(*result.value(), 28);
        let error = result.stage_error().unwrap();
        assert!(error.is::<DivisionByZero>());
    }

    #[test]
    fn test_completes_without_error() {
        let result = arithmetic().call(6_i64).unwrap();
        assert_eq!(result, Contextual::new(64_i64));
    }

    #[test]
    fn test_keeps_input_context() {
        let mark = FlagSet::from(Flag::new("mark").unwrap());
        let result = arithmetic().call(Contextual::with(4_i64, mark.clone())).unwrap();
        assert!(result.flags().intersects(&mark));
        assert_eq!(result.flags().len(), 2);
    }

    #[test]
    fn test_failed_input_is_untouched() {
        let failed = Contextual::with(1_i64, pointed(StageError::msg("earlier")));
        let outcome = arithmetic().run(failed.clone()).unwrap();
        assert_eq!(outcome, Outcome::ShortCircuited { at: 0, result: failed });
    }

    #[test]
    fn test_try_call() {
        let mark = FlagSet::from(Flag::new("mark").unwrap());
        let err = arithmetic()
            .try_call(Contextual::with(4_i64, mark.clone()))
            .unwrap_err();
        assert!(err.error().is::<DivisionByZero>());
        assert_eq!(err.flags(), mark);

        assert_eq!(*arithmetic().try_call(6_i64).unwrap().value(), 64);
    }
}
