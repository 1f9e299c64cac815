// src/lib.rs
//! contextual-flow library: flag algebra, contextual values and chain
//! runners.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `FlagError`, `ChainError`, `StageError`, `ConfigError`
//! - **Configuration**: `CommandLineInput`, `HarnessConfig`, `Scenario`
//! - **Flag algebra**: `Flag`, `FlagSet`, `FlagVector`, `pointed`, built-in flags
//! - **Contexts**: `Contextual`, `Context`, `ContextualError`
//! - **Chains**: `Chain`, `Stage`, `compose`, `atomically`
//! - **Runners**: `maybe`, `until_error`, `saving_context`, `either`, deferred actions

mod algebras;
mod chain;
mod config;
mod constants;
mod contexting;
mod error;
mod flags;
mod monads;

// --- Error Handling ---
pub use crate::error::{ChainError, ConfigError, FlagError, StageError};

// --- Configuration ---
pub use crate::config::{CommandLineInput, HarnessConfig, Scenario};
pub use crate::constants::{DEMO_DEFAULT_INPUT, LOG_FILE_ENV};

// --- Flag Algebra ---
pub use crate::flags::{
    bad, compose_vectors, future, left, pointed, right, to_vector, Flag, FlagSet, FlagVector,
    Point, PointValue, Sign, VectorOp, VectorSum,
};

// --- Contexts ---
pub use crate::contexting::{Cause, Context, Contextual, ContextualError};

// --- Chains ---
pub use crate::chain::{atomically, compose, Chain, Stage, Step, Steps};

// --- Runners ---
pub use crate::monads::{
    either, future_from, in_future, maybe, saving_context, until_error, Deferred, Either, Maybe,
    SavingContext, UntilError,
};

// --- Algebras (Capability Traits) ---
pub use crate::algebras::{Delta, Outcome, Runner};
