//! The flag algebra.
//!
//! - [`Flag`]: an atom: a named, signed identity or a pointed value
//! - [`FlagSet`]: an ordered, deduplicated sum of atoms; `nothing` is its
//!   identity element
//! - [`FlagVector`] / [`VectorSum`]: add/remove deltas over sums
//! - [`pointed`]: lifts arbitrary values into the algebra

pub mod flag;
pub mod point;
pub mod set;
pub mod vector;

pub use flag::{bad, future, left, right, Flag, Sign};
pub use point::{Point, PointValue};
pub use set::{pointed, FlagSet};
pub use vector::{compose_vectors, to_vector, FlagVector, VectorOp, VectorSum};
