//! Capability algebras for contextual-flow.
//!
//! This module defines algebraic traits that represent **capabilities**,
//! not implementations. Each trait is:
//!
//! - **Object-safe**: can be used as `dyn Trait`
//! - **Documented with laws**: properties that all implementations must satisfy
//!
//! # Capability Traits
//!
//! - [`Delta`]: transformations of flag sums (vectors and vector sums)
//! - [`Runner`]: interpreters that drive a chain over contextual values
//!
//! # Laws
//!
//! Each trait documents algebraic laws that all implementations must satisfy.
//! These are verified via law tests in each module's test suite.

pub mod delta;
pub mod runner;

pub use delta::Delta;
pub use runner::{Outcome, Runner};
