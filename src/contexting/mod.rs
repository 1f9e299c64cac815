//! Values and errors annotated with flag contexts.
//!
//! - [`Contextual`]: a value paired with a [`Context`]
//! - [`Context`]: a flat flag sum, or a sum nested in further contexts
//! - [`ContextualError`]: the same pairing for errors, with ordered
//!   [`Cause`]s

pub mod contextual;
pub mod contextual_error;

pub use contextual::{Context, Contextual};
pub use contextual_error::{Cause, ContextualError};
