// src/flags/vector.rs
//! Flag vectors: add/remove deltas over flag sums.

use super::set::FlagSet;
use crate::algebras::Delta;
use std::fmt;

/// Direction of a [`FlagVector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorOp {
    Add,
    Remove,
}

/// A delta that adds or removes every atom of a sum.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagVector {
    op: VectorOp,
    flags: FlagSet,
}

impl FlagVector {
    pub fn new(op: VectorOp, flags: impl Into<FlagSet>) -> Self {
        Self {
            op,
            flags: flags.into(),
        }
    }

    pub fn op(&self) -> VectorOp {
        self.op
    }

    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    /// Composes this vector with whatever comes next.
    pub fn then(self, next: impl Into<VectorSum>) -> VectorSum {
        VectorSum::from(self).then(next)
    }
}

/// Builds the add or remove vector of `flags` (unary plus/minus).
pub fn to_vector(op: VectorOp, flags: impl Into<FlagSet>) -> FlagVector {
    FlagVector::new(op, flags)
}

/// Composes two deltas into a sum applied left to right.
pub fn compose_vectors(first: impl Into<VectorSum>, second: impl Into<VectorSum>) -> VectorSum {
    first.into().then(second)
}

impl Delta for FlagVector {
    fn apply(&self, flags: &FlagSet) -> FlagSet {
        match self.op {
            VectorOp::Add => flags.union(&self.flags),
            VectorOp::Remove => flags.subtract(&self.flags),
        }
    }
}

impl fmt::Display for FlagVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.op {
            VectorOp::Add => '+',
            VectorOp::Remove => '-',
        };
        write!(f, "{}({})", sign, self.flags)
    }
}

/// An ordered composition of vectors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VectorSum {
    vectors: Vec<FlagVector>,
}

impl VectorSum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, next: impl Into<VectorSum>) -> Self {
        self.vectors.extend(next.into().vectors);
        self
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FlagVector> {
        self.vectors.iter()
    }
}

impl From<FlagVector> for VectorSum {
    fn from(vector: FlagVector) -> Self {
        Self {
            vectors: vec![vector],
        }
    }
}

impl FromIterator<FlagVector> for VectorSum {
    fn from_iter<I: IntoIterator<Item = FlagVector>>(iter: I) -> Self {
        Self {
            vectors: iter.into_iter().collect(),
        }
    }
}

impl Delta for VectorSum {
    fn apply(&self, flags: &FlagSet) -> FlagSet {
        self.vectors
            .iter()
            .fold(flags.clone(), |acc, vector| vector.apply(&acc))
    }
}

impl fmt::Display for VectorSum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.vectors.iter().map(ToString::to_string).collect();
        write!(f, "{}", rendered.join(" ^ "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::flag::Flag;

    fn atom(name: &str) -> FlagSet {
        FlagSet::from(Flag::new(name).unwrap())
    }

    #[test]
    fn test_add_then_remove() {
        let (x, y) = (atom("x"), atom("y"));
        let delta = x.adding().then(y.adding()).then(x.removing());
        assert_eq!(delta.len(), 3);
        assert_eq!(delta.resolve(), y);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let (x, y) = (atom("x"), atom("y"));
        assert_eq!(y.removing().apply(&x), x);
    }

    #[test]
    fn test_compose_vectors_is_associative() {
        let (x, y, z) = (atom("x"), atom("y"), atom("z"));
        let base = atom("base");

        let left = compose_vectors(compose_vectors(x.adding(), y.removing()), z.adding());
        let right = compose_vectors(x.adding(), compose_vectors(y.removing(), z.adding()));
        assert_eq!(left, right);
        assert_eq!(left.apply(&base), right.apply(&base));
    }

    #[test]
    fn test_display() {
        let x = atom("x");
        let delta = to_vector(VectorOp::Add, x.clone()).then(x.removing());
        assert_eq!(delta.to_string(), "+(x) ^ -(x)");
    }
}
