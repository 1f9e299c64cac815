// src/flags/flag.rs
//! Flag atoms: named identities and pointed values.

use super::point::{Point, PointValue};
use crate::constants::{BAD_FLAG_NAME, FUTURE_FLAG_NAME, LEFT_FLAG_NAME, RIGHT_FLAG_NAME};
use crate::error::FlagError;
use once_cell::sync::Lazy;
use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use uuid::Uuid;

/// Truth polarity of a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Sign {
    #[default]
    Positive,
    Negative,
}

impl Sign {
    pub fn is_positive(self) -> bool {
        matches!(self, Self::Positive)
    }
}

/// An immutable flag atom.
///
/// Named flags are identities: two flags built by separate calls are
/// distinct atoms even when they share a name. Pointed flags carry a value
/// and are the same atom as any other pointed flag holding an equal value of
/// the same type.
///
/// Points only require `PartialEq`, so a pointed flag hashes by its value's
/// type alone. Every pointed atom of one type lands in the same bucket of a
/// [`FlagSet`](super::FlagSet): inserting `n` of them costs `O(n²)`
/// comparisons. Keep large value collections out of a single sum.
#[derive(Clone)]
pub struct Flag {
    atom: Arc<Atom>,
}

enum Atom {
    Named { id: Uuid, name: String, sign: Sign },
    Pointed(Point),
}

impl Flag {
    /// Creates a new positive flag.
    pub fn new(name: impl Into<String>) -> Result<Self, FlagError> {
        Self::with_sign(name, Sign::Positive)
    }

    /// Creates a new negative (falsy) flag.
    pub fn negative(name: impl Into<String>) -> Result<Self, FlagError> {
        Self::with_sign(name, Sign::Negative)
    }

    /// Creates a new flag with an explicit sign.
    pub fn with_sign(name: impl Into<String>, sign: Sign) -> Result<Self, FlagError> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(FlagError::InvalidFlagName {
                name,
                reason: "Flag name cannot be empty".to_string(),
            });
        }

        Ok(Self::named_unchecked(name, sign))
    }

    /// Creates a flag from an already validated name (internal use).
    pub(crate) fn named_unchecked(name: impl Into<String>, sign: Sign) -> Self {
        Self {
            atom: Arc::new(Atom::Named {
                id: Uuid::new_v4(),
                name: name.into(),
                sign,
            }),
        }
    }

    /// Creates a flag carrying `point`.
    pub fn pointing(point: Point) -> Self {
        Self {
            atom: Arc::new(Atom::Pointed(point)),
        }
    }

    /// The flag's name. Pointed flags are named after their value.
    pub fn name(&self) -> Cow<'_, str> {
        match &*self.atom {
            Atom::Named { name, .. } => Cow::Borrowed(name.as_str()),
            Atom::Pointed(point) => Cow::Owned(format!("{:?}", point)),
        }
    }

    /// Pointed flags are always positive.
    pub fn sign(&self) -> Sign {
        match &*self.atom {
            Atom::Named { sign, .. } => *sign,
            Atom::Pointed(_) => Sign::Positive,
        }
    }

    pub fn is_truthy(&self) -> bool {
        self.sign().is_positive()
    }

    pub fn is_pointed(&self) -> bool {
        matches!(&*self.atom, Atom::Pointed(_))
    }

    /// The value this flag stands for; a named flag is its own point.
    pub fn point(&self) -> Point {
        match &*self.atom {
            Atom::Pointed(point) => point.clone(),
            Atom::Named { .. } => Point::new(self.clone()),
        }
    }

    /// Borrows the point as a `T`, if it is one.
    pub fn point_as<T: PointValue>(&self) -> Option<&T> {
        match &*self.atom {
            Atom::Pointed(point) => point.downcast_ref::<T>(),
            Atom::Named { .. } => (self as &dyn Any).downcast_ref::<T>(),
        }
    }
}

impl PartialEq for Flag {
    fn eq(&self, other: &Self) -> bool {
        match (&*self.atom, &*other.atom) {
            (Atom::Named { id: a, .. }, Atom::Named { id: b, .. }) => a == b,
            (Atom::Pointed(a), Atom::Pointed(b)) => a == b,
            _ => false,
        }
    }
}

// A point holding a value that is not equal to itself (`f64::NAN`) breaks
// reflexivity; such a flag never deduplicates.
impl Eq for Flag {}

impl Hash for Flag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &*self.atom {
            Atom::Named { id, .. } => {
                0u8.hash(state);
                id.hash(state);
            }
            // Equal points share a type, so hashing the type keeps Hash
            // consistent with the dynamic equality above. Same-typed points
            // all collide.
            Atom::Pointed(point) => {
                1u8.hash(state);
                point.value_type_id().hash(state);
            }
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.atom {
            Atom::Named { name, .. } => write!(f, "{}", name),
            Atom::Pointed(point) => write!(f, "pointed({:?})", point),
        }
    }
}

impl fmt::Debug for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.atom {
            Atom::Named { name, sign, .. } => f
                .debug_struct("Flag")
                .field("name", name)
                .field("sign", sign)
                .finish(),
            Atom::Pointed(point) => f.debug_tuple("Pointed").field(point).finish(),
        }
    }
}

// ==============================================================================
// Built-in flags
// ==============================================================================

static BAD: Lazy<Flag> = Lazy::new(|| Flag::named_unchecked(BAD_FLAG_NAME, Sign::Negative));
static RIGHT: Lazy<Flag> = Lazy::new(|| Flag::named_unchecked(RIGHT_FLAG_NAME, Sign::Positive));
static LEFT: Lazy<Flag> = Lazy::new(|| Flag::named_unchecked(LEFT_FLAG_NAME, Sign::Negative));
static FUTURE: Lazy<Flag> = Lazy::new(|| Flag::named_unchecked(FUTURE_FLAG_NAME, Sign::Positive));

/// The negative flag that makes `maybe` skip the remaining stages.
pub fn bad() -> Flag {
    BAD.clone()
}

/// Marks the preferred branch.
pub fn right() -> Flag {
    RIGHT.clone()
}

/// Marks the fallback branch.
pub fn left() -> Flag {
    LEFT.clone()
}

/// Attached alongside deferred actions.
pub fn future() -> Flag {
    FUTURE.clone()
}
