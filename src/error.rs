// src/error.rs
//! Error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the crate. Flag and
//! chain errors are raised by the crate itself; [`StageError`] is what a
//! user-supplied stage raises, and it travels through chains unchanged.

use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while constructing flags.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlagError {
    #[error("Invalid flag name {name:?}: {reason}")]
    InvalidFlagName { name: String, reason: String },
}

/// Errors raised by chain indexing, slicing and branching.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    #[error("Stage index {index} out of range for chain of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Stage range {start}..{end} out of range for chain of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },

    #[error("No branch matched the context {context}")]
    NoBranchMatched { context: String },
}

/// Errors raised while resolving the demo harness configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown scenario '{0}' (expected one of: maybe, until-error, saving-context)")]
    UnknownScenario(String),

    #[error("Invalid log file path {path}: {reason}")]
    InvalidLogPath { path: String, reason: String },
}

/// An error raised by a chain stage.
///
/// Wraps the original error behind an `Arc` so it can be cloned into
/// contexts and compared by identity. `Display` is the original error's
/// message, so callers see exactly what the stage reported.
#[derive(Clone)]
pub struct StageError {
    source: Arc<dyn StdError + Send + Sync + 'static>,
}

/// Plain-text stage failure created through [`StageError::msg`].
#[derive(Error, Debug)]
#[error("{0}")]
struct StageMessage(String);

impl StageError {
    /// Wraps an error raised by a stage.
    ///
    /// Wrapping a `StageError` again returns it unchanged.
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let any: &dyn Any = &error;
        if let Some(stage_error) = any.downcast_ref::<StageError>() {
            return stage_error.clone();
        }
        Self {
            source: Arc::new(error),
        }
    }

    /// Creates a stage failure from a message.
    pub fn msg(message: impl fmt::Display) -> Self {
        Self::new(StageMessage(message.to_string()))
    }

    /// Returns the original error if it is of type `E`.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        self.source.downcast_ref::<E>()
    }

    /// Returns `true` if the original error is of type `E`.
    pub fn is<E>(&self) -> bool
    where
        E: StdError + 'static,
    {
        self.source.is::<E>()
    }
}

impl fmt::Display for StageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl fmt::Debug for StageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StageError").field(&self.source).finish()
    }
}

impl StdError for StageError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.source()
    }
}

// Identity, not message equality: two failures with the same text are still
// distinct atoms once pointed into a context.
impl PartialEq for StageError {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.source, &other.source)
    }
}

impl From<anyhow::Error> for StageError {
    fn from(err: anyhow::Error) -> Self {
        let boxed: Box<dyn StdError + Send + Sync + 'static> = err.into();
        Self {
            source: Arc::from(boxed),
        }
    }
}

impl From<ChainError> for StageError {
    fn from(err: ChainError) -> Self {
        Self::new(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Error, Debug)]
    #[error("division by zero")]
    struct DivisionByZero;

    #[test]
    fn test_stage_error_keeps_message() {
        let err = StageError::new(DivisionByZero);
        assert_eq!(err.to_string(), "division by zero");
        assert!(err.is::<DivisionByZero>());
        assert!(err.downcast_ref::<DivisionByZero>().is_some());
    }

    #[test]
    fn test_stage_error_does_not_double_wrap() {
        let err = StageError::msg("boom");
        let rewrapped = StageError::new(err.clone());
        assert_eq!(err, rewrapped);
    }

    #[test]
    fn test_stage_error_equality_is_identity() {
        let a = StageError::msg("same");
        let b = StageError::msg("same");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_stage_error_from_anyhow() {
        let err: StageError = anyhow::anyhow!("stage exploded").into();
        assert_eq!(err.to_string(), "stage exploded");
    }

    #[test]
    fn test_chain_error_display() {
        let err = ChainError::IndexOutOfRange { index: 3, len: 2 };
        assert_eq!(
            err.to_string(),
            "Stage index 3 out of range for chain of length 2"
        );
    }
}
