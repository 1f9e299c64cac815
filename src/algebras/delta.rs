//! The delta algebra over flag sums.

use crate::flags::FlagSet;

/// A transformation of one flag sum into another.
///
/// # Laws
///
/// All implementations must satisfy these laws:
///
/// - **L1 (Resolution)**: Resolving a delta is applying it to `nothing`.
///   ```text
///   d.resolve() == d.apply(&nothing)
///   ```
///
/// - **L2 (Idempotency)**: Applying a delta twice equals applying it once.
///   Removing is idempotent and adding never duplicates an atom.
///   ```text
///   d.apply(&d.apply(&s)) == d.apply(&s)
///   ```
///
/// - **L3 (Absent Removal)**: Removing an atom that is not present leaves the
///   sum unchanged.
///   ```text
///   (-x).apply(&s) == s          when s does not contain x
///   ```
///
/// This trait is **object-safe** and can be used as `dyn Delta`.
pub trait Delta {
    /// Applies this delta to `flags`, producing a new sum.
    fn apply(&self, flags: &FlagSet) -> FlagSet;

    /// The concrete sum this delta produces on its own.
    fn resolve(&self) -> FlagSet {
        self.apply(&FlagSet::nothing())
    }
}
