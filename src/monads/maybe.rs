// src/monads/maybe.rs
//! Skip the rest of a chain once the context is flagged.

use crate::algebras::{Outcome, Runner};
use crate::chain::Chain;
use crate::contexting::Contextual;
use crate::error::StageError;
use crate::flags::{bad, Flag};
use std::fmt;
use std::sync::Arc;

type SkipWhen<V> = Arc<dyn Fn(&V) -> bool + Send + Sync>;

/// Runs a chain of contextual stages until the skip flag appears.
///
/// Before every stage the context is checked at all levels for the skip flag
/// ([`bad`] unless overridden with [`Maybe::skipping_on`]). Once it is there,
/// the current contextual is returned as-is and no further stage runs.
/// A value predicate set with [`Maybe::skipping_when`] or
/// [`Maybe::skipping_none`] stops the chain the same way.
/// Stage errors propagate unchanged.
pub struct Maybe<V> {
    chain: Chain<Contextual<V>>,
    skip: Flag,
    skip_when: Option<SkipWhen<V>>,
}

/// Wraps `chain` in a [`Maybe`] runner.
pub fn maybe<V>(chain: impl Into<Chain<Contextual<V>>>) -> Maybe<V> {
    Maybe {
        chain: chain.into(),
        skip: bad(),
        skip_when: None,
    }
}

impl<V> Maybe<V> {
    /// Uses `flag` instead of `bad` as the skip flag.
    pub fn skipping_on(mut self, flag: Flag) -> Self {
        self.skip = flag;
        self
    }

    /// Also stops before any stage whose input value satisfies `predicate`.
    pub fn skipping_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&V) -> bool + Send + Sync + 'static,
    {
        self.skip_when = Some(Arc::new(predicate));
        self
    }

    pub fn chain(&self) -> &Chain<Contextual<V>> {
        &self.chain
    }

    fn should_skip(&self, current: &Contextual<V>) -> Option<&'static str> {
        if current.is_flagged(&self.skip) {
            return Some("flag");
        }
        match &self.skip_when {
            Some(predicate) if predicate(current.value()) => Some("value"),
            _ => None,
        }
    }
}

impl<V: 'static> Maybe<Option<V>> {
    /// Stops the chain once a stage yields `None`.
    pub fn skipping_none(self) -> Self {
        self.skipping_when(|value: &Option<V>| value.is_none())
    }
}

impl<V> Clone for Maybe<V> {
    fn clone(&self) -> Self {
        Self {
            chain: self.chain.clone(),
            skip: self.skip.clone(),
            skip_when: self.skip_when.clone(),
        }
    }
}

impl<V> fmt::Debug for Maybe<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Maybe")
            .field("chain", &self.chain)
            .field("skip", &self.skip)
            .field("skip_when", &self.skip_when.is_some())
            .finish()
    }
}

impl<V> Runner<V> for Maybe<V> {
    fn run(&self, input: Contextual<V>) -> Result<Outcome<V>, StageError> {
        let mut current = input;

        for (index, stage) in self.chain.iter().enumerate() {
            if let Some(reason) = self.should_skip(&current) {
                log::debug!(
                    "maybe: skip {} ('{}') matched before stage {} ({}), skipping {} remaining",
                    reason,
                    self.skip,
                    index,
                    stage.label(),
                    self.chain.len() - index
                );
                return Ok(Outcome::ShortCircuited {
                    at: index,
                    result: current,
                });
            }

            log::trace!("maybe: running stage {} ({})", index, stage.label());
            current = stage.apply(current)?;
        }

        Ok(Outcome::Completed(current))
    }
}
