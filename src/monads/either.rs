// src/monads/either.rs
//! Branch on the flags of the input context.

use crate::algebras::{Outcome, Runner};
use crate::chain::Chain;
use crate::contexting::Contextual;
use crate::error::{ChainError, StageError};
use crate::flags::FlagSet;

#[derive(Clone, Debug)]
struct Branch<V> {
    flags: FlagSet,
    chain: Chain<Contextual<V>>,
}

/// Picks the chain to run from the input's context.
///
/// Branches are tried in the order they were added; the first one whose
/// flags intersect the flattened input context runs. Without a match the
/// `otherwise` chain runs, and without one of those the run fails with
/// [`ChainError::NoBranchMatched`].
#[derive(Clone, Debug)]
pub struct Either<V> {
    branches: Vec<Branch<V>>,
    otherwise: Option<Chain<Contextual<V>>>,
}

/// An [`Either`] with no branches yet.
pub fn either<V>() -> Either<V> {
    Either {
        branches: Vec::new(),
        otherwise: None,
    }
}

impl<V> Either<V> {
    /// Adds a branch taken when the context shares an atom with `flags`.
    pub fn when(
        mut self,
        flags: impl Into<FlagSet>,
        chain: impl Into<Chain<Contextual<V>>>,
    ) -> Self {
        self.branches.push(Branch {
            flags: flags.into(),
            chain: chain.into(),
        });
        self
    }

    /// Sets the chain taken when no branch matches.
    pub fn otherwise(mut self, chain: impl Into<Chain<Contextual<V>>>) -> Self {
        self.otherwise = Some(chain.into());
        self
    }
}

impl<V> Runner<V> for Either<V> {
    fn run(&self, input: Contextual<V>) -> Result<Outcome<V>, StageError> {
        let flags = input.flags();
        let chosen = self
            .branches
            .iter()
            .enumerate()
            .find(|(_, branch)| branch.flags.intersects(&flags));

        let chain = match (chosen, &self.otherwise) {
            (Some((index, branch)), _) => {
                log::trace!("either: branch {} matched {}", index, branch.flags);
                &branch.chain
            }
            (None, Some(otherwise)) => {
                log::trace!("either: no branch matched {}, taking otherwise", flags);
                otherwise
            }
            (None, None) => {
                log::debug!("either: no branch matched {}", flags);
                return Err(ChainError::NoBranchMatched {
                    context: input.context().to_string(),
                }
                .into());
            }
        };

        Ok(Outcome::Completed(chain.call(input)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::Stage;
    use crate::flags::{left, right};

    fn branching() -> Either<i64> {
        either()
            .when(right(), Stage::lifted(|n: i64| n + 1))
            .when(left(), Stage::lifted(|n: i64| n - 1))
    }

    #[test]
    fn test_first_matching_branch_runs() {
        let runner = branching();
        assert_eq!(*runner.call(Contextual::with(10_i64, right())).unwrap().value(), 11);
        assert_eq!(*runner.call(Contextual::with(10_i64, left())).unwrap().value(), 9);

        let both = FlagSet::from_iter([left(), right()]);
        assert_eq!(*runner.call(Contextual::with(10_i64, both)).unwrap().value(), 11);
    }

    #[test]
    fn test_otherwise() {
        let runner = branching().otherwise(Stage::lifted(|n: i64| n * 100));
        assert_eq!(*runner.call(1_i64).unwrap().value(), 100);
    }

    #[test]
    fn test_no_branch_matched() {
        let err = branching().call(1_i64).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ChainError>(),
            Some(&ChainError::NoBranchMatched {
                context: "nothing".to_string()
            })
        );
    }
}
