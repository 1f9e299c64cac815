// src/flags/set.rs
//! Flag sums: ordered, deduplicated unions of atoms.

use super::flag::Flag;
use super::point::{Point, PointValue};
use super::vector::{FlagVector, VectorOp};
use crate::constants::NOTHING_REPR;
use indexmap::IndexSet;
use std::any::Any;
use std::fmt;

/// An insertion-ordered, deduplicated sum of flags.
///
/// The empty sum is [`FlagSet::nothing`], the identity of [`FlagSet::union`].
///
/// `PartialEq` is structural: two sums are equal when they hold the same
/// atoms. The membership-style comparison ("do these sums share an atom?")
/// is [`FlagSet::intersects`].
#[derive(Clone, Default)]
pub struct FlagSet {
    atoms: IndexSet<Flag>,
}

impl FlagSet {
    /// The empty sum.
    pub fn nothing() -> Self {
        Self::default()
    }

    /// Unions any number of sums, left to right.
    pub fn sum(sums: impl IntoIterator<Item = FlagSet>) -> Self {
        sums.into_iter().fold(Self::nothing(), |mut acc, flags| {
            acc.atoms.extend(flags.atoms);
            acc
        })
    }

    /// Atoms of `self` followed by the atoms of `other` not already present.
    pub fn union(&self, other: &FlagSet) -> Self {
        let mut atoms = self.atoms.clone();
        atoms.extend(other.atoms.iter().cloned());
        Self { atoms }
    }

    /// Atoms of `self` that are absent from `other`.
    pub fn subtract(&self, other: &FlagSet) -> Self {
        self.atoms
            .iter()
            .filter(|atom| !other.atoms.contains(*atom))
            .cloned()
            .collect()
    }

    /// Membership-style comparison: `true` when the sums share an atom.
    ///
    /// This is not an equivalence relation (`nothing` intersects nothing,
    /// not even itself), which is why it is not `PartialEq`.
    pub fn intersects(&self, other: &FlagSet) -> bool {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.atoms.iter().any(|atom| large.atoms.contains(atom))
    }

    pub fn contains(&self, flag: &Flag) -> bool {
        self.atoms.contains(flag)
    }

    /// Logical OR of the atom signs; `nothing` is falsy.
    pub fn is_truthy(&self) -> bool {
        self.atoms.iter().any(Flag::is_truthy)
    }

    pub fn is_nothing(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn iter(&self) -> indexmap::set::Iter<'_, Flag> {
        self.atoms.iter()
    }

    /// Keeps the atoms whose point satisfies `predicate`.
    pub fn that(&self, predicate: impl Fn(&Point) -> bool) -> Self {
        self.atoms
            .iter()
            .filter(|atom| predicate(&atom.point()))
            .cloned()
            .collect()
    }

    /// Keeps the atoms pointing to a `T` that satisfies `predicate`.
    pub fn that_is<T: PointValue>(&self, predicate: impl Fn(&T) -> bool) -> Self {
        self.atoms
            .iter()
            .filter(|atom| atom.point_as::<T>().is_some_and(&predicate))
            .cloned()
            .collect()
    }

    /// Some atom of the sum (currently the first), or `None` for `nothing`.
    pub fn atomic(&self) -> Option<Flag> {
        self.atoms.first().cloned()
    }

    /// The point of [`FlagSet::atomic`].
    pub fn point(&self) -> Option<Point> {
        self.atoms.first().map(Flag::point)
    }

    pub fn points(&self) -> Vec<Point> {
        self.atoms.iter().map(Flag::point).collect()
    }

    /// Borrows the first atom's point as a `T`.
    pub fn point_as<T: PointValue>(&self) -> Option<&T> {
        self.atoms.first().and_then(Flag::point_as::<T>)
    }

    /// Borrows every point that is a `T`, in order.
    pub fn points_as<T: PointValue>(&self) -> Vec<&T> {
        self.atoms.iter().filter_map(Flag::point_as::<T>).collect()
    }

    /// The vector that adds this sum's atoms.
    pub fn adding(&self) -> FlagVector {
        FlagVector::new(VectorOp::Add, self.clone())
    }

    /// The vector that removes this sum's atoms.
    pub fn removing(&self) -> FlagVector {
        FlagVector::new(VectorOp::Remove, self.clone())
    }

    /// Points every value and unions the results.
    pub fn pointed_all<T: PointValue>(values: impl IntoIterator<Item = T>) -> Self {
        Self::sum(values.into_iter().map(pointed))
    }
}

/// Wraps `value` into a fresh pointed flag.
///
/// Flags, flag sums and points are not wrapped again: a `FlagSet` is returned
/// as-is and a `Flag` becomes a one-atom sum.
pub fn pointed<T: PointValue>(value: T) -> FlagSet {
    let any: &dyn Any = &value;

    if let Some(flags) = any.downcast_ref::<FlagSet>() {
        return flags.clone();
    }
    if let Some(flag) = any.downcast_ref::<Flag>() {
        return FlagSet::from(flag.clone());
    }
    if let Some(point) = any.downcast_ref::<Point>() {
        return FlagSet::from(Flag::pointing(point.clone()));
    }

    FlagSet::from(Flag::pointing(Point::new(value)))
}

/// Points each value and unions the results; `pointed![]` is `nothing`.
#[macro_export]
macro_rules! pointed {
    () => {
        $crate::FlagSet::nothing()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::FlagSet::sum([$($crate::pointed($value)),+])
    };
}

impl From<Flag> for FlagSet {
    fn from(flag: Flag) -> Self {
        let mut atoms = IndexSet::with_capacity(1);
        atoms.insert(flag);
        Self { atoms }
    }
}

impl FromIterator<Flag> for FlagSet {
    fn from_iter<I: IntoIterator<Item = Flag>>(iter: I) -> Self {
        Self {
            atoms: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FlagSet {
    type Item = &'a Flag;
    type IntoIter = indexmap::set::Iter<'a, Flag>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.iter()
    }
}

impl PartialEq for FlagSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.atoms.iter().all(|atom| other.contains(atom))
    }
}

impl fmt::Display for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nothing() {
            return write!(f, "{}", NOTHING_REPR);
        }

        for (index, atom) in self.atoms.iter().enumerate() {
            if index > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}", atom)?;
        }
        Ok(())
    }
}

impl fmt::Debug for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nothing() {
            return write!(f, "{}", NOTHING_REPR);
        }
        f.debug_set().entries(self.atoms.iter()).finish()
    }
}
