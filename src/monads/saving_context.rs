// src/monads/saving_context.rs
//! Run a bare chain under an unchanged context.

use crate::algebras::{Outcome, Runner};
use crate::chain::Chain;
use crate::contexting::Contextual;
use crate::error::StageError;

/// Runs a chain of bare stages on the value and re-attaches the original
/// context.
#[derive(Clone, Debug)]
pub struct SavingContext<V> {
    chain: Chain<V>,
}

pub fn saving_context<V>(chain: impl Into<Chain<V>>) -> SavingContext<V> {
    SavingContext {
        chain: chain.into(),
    }
}

impl<V> SavingContext<V> {
    pub fn chain(&self) -> &Chain<V> {
        &self.chain
    }
}

impl<V> Runner<V> for SavingContext<V> {
    fn run(&self, input: Contextual<V>) -> Result<Outcome<V>, StageError> {
        log::trace!("saving_context: running {} stages", self.chain.len());
        let (value, context) = input.into_parts();
        let value = self.chain.call(value)?;
        Ok(Outcome::Completed(Contextual::with(value, context)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::Stage;
    use crate::flags::{bad, pointed, FlagSet};

    #[test]
    fn test_context_survives() {
        let runner = saving_context(Chain::from(Stage::map(|s: String| s + "!")));
        let input = Contextual::nested("hi".to_string(), [pointed(1), FlagSet::from(bad())]);
        let result = runner.call(input).unwrap();

        assert_eq!(result.value(), "hi!");
        assert!(result.is_metacontextual());
        assert_eq!(result.context().depth(), 2);
    }

    #[test]
    fn test_errors_propagate_unchanged() {
        let failure = StageError::msg("nope");
        let raised = failure.clone();
        let runner = saving_context(Chain::from(Stage::new(move |_: i64| Err(raised.clone()))));
        assert_eq!(runner.call(1_i64).unwrap_err(), failure);
    }
}
