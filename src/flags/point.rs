// src/flags/point.rs
//! Type-erased values carried by pointed flags.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A value that can be carried by a pointed flag.
///
/// Implemented for every `'static` type that is `Debug + PartialEq + Send +
/// Sync`, so callers never implement it by hand. Equality is dynamic: two
/// points are equal only when they hold equal values of the same type.
pub trait PointValue: Any + fmt::Debug + Send + Sync {
    /// Upcasts to `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Compares against another point of unknown type.
    fn eq_point(&self, other: &dyn PointValue) -> bool;
}

impl<T> PointValue for T
where
    T: Any + fmt::Debug + PartialEq + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_point(&self, other: &dyn PointValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }
}

/// A shared, immutable, type-erased point.
#[derive(Clone)]
pub struct Point(Arc<dyn PointValue>);

impl Point {
    pub fn new<T: PointValue>(value: T) -> Self {
        Self(Arc::new(value))
    }

    fn inner(&self) -> &dyn PointValue {
        &*self.0
    }

    /// Returns the wrapped value if it is a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner().as_any().downcast_ref::<T>()
    }

    /// Returns `true` if the wrapped value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.inner().as_any().is::<T>()
    }

    pub(crate) fn value_type_id(&self) -> std::any::TypeId {
        self.inner().as_any().type_id()
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.inner().eq_point(other.inner())
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.inner(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_compare_by_value_and_type() {
        assert_eq!(Point::new(4), Point::new(4));
        assert_ne!(Point::new(4), Point::new(5));
        assert_ne!(Point::new(4_i32), Point::new(4_i64));
    }

    #[test]
    fn test_point_downcast() {
        let point = Point::new("hello".to_string());
        assert_eq!(point.downcast_ref::<String>().map(String::as_str), Some("hello"));
        assert!(point.downcast_ref::<i32>().is_none());
        assert!(point.is::<String>());
    }

    #[test]
    fn test_point_debug_is_transparent() {
        assert_eq!(format!("{:?}", Point::new(vec![1, 2])), "[1, 2]");
    }
}
