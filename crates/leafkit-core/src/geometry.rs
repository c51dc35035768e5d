#![forbid(unsafe_code)]

//! Geometric value types.
//!
//! Both types are plain `Copy` records. They carry positions produced by an
//! external layout or drag system; no arithmetic is defined here.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point or displacement in 2D space.
///
/// There is intentionally no `Default`: both coordinates must be supplied.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vector {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl Vector {
    /// Create a new vector.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Vector {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Vector> for (f64, f64) {
    #[inline]
    fn from(v: Vector) -> Self {
        (v.x, v.y)
    }
}

/// A positionable entity's record.
///
/// `transform` is the current (displayed) position and is expected to change
/// over the leaf's lifetime. `original` is the reference position and stays
/// fixed unless the owner replaces it. How the two relate is decided by
/// whoever mutates the leaf.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Leaf {
    /// Current position.
    pub transform: Vector,
    /// Reference position.
    pub original: Vector,
}

impl Leaf {
    /// Create a leaf from both positions.
    #[inline]
    #[must_use]
    pub const fn new(transform: Vector, original: Vector) -> Self {
        Self {
            transform,
            original,
        }
    }

    /// Create a freshly placed leaf whose transform equals its original.
    #[inline]
    #[must_use]
    pub const fn at(position: Vector) -> Self {
        Self::new(position, position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_reads_back_its_fields() {
        let v = Vector::new(3.0, -4.5);
        assert_eq!(v.x, 3.0);
        assert_eq!(v.y, -4.5);
    }

    #[test]
    fn vector_equality_is_field_wise() {
        assert_eq!(Vector::new(3.0, 4.0), Vector::new(3.0, 4.0));
        assert_ne!(Vector::new(3.0, 4.0), Vector::new(3.0, 5.0));
        assert_ne!(Vector::new(3.0, 4.0), Vector::new(2.0, 4.0));
    }

    #[test]
    fn vector_tuple_conversions() {
        let v: Vector = (1.5, 2.5).into();
        assert_eq!(v, Vector::new(1.5, 2.5));
        let (x, y): (f64, f64) = v.into();
        assert_eq!((x, y), (1.5, 2.5));
    }

    #[test]
    fn nan_vector_is_not_equal_to_itself() {
        // Field-wise float equality, nothing more.
        let v = Vector::new(f64::NAN, 0.0);
        let copy = v;
        assert_ne!(v, copy);
    }

    #[test]
    fn leaf_setting_transform_keeps_original() {
        let mut leaf = Leaf::new(Vector::new(0.0, 0.0), Vector::new(0.0, 0.0));
        leaf.transform = Vector::new(10.0, 0.0);
        assert_eq!(leaf.transform, Vector::new(10.0, 0.0));
        assert_eq!(leaf.original, Vector::new(0.0, 0.0));
    }

    #[test]
    fn leaf_setting_original_keeps_transform() {
        let mut leaf = Leaf::new(Vector::new(5.0, 6.0), Vector::new(1.0, 2.0));
        leaf.original = Vector::new(-1.0, -2.0);
        assert_eq!(leaf.transform, Vector::new(5.0, 6.0));
    }

    #[test]
    fn leaf_at_starts_untransformed() {
        let leaf = Leaf::at(Vector::new(7.0, 8.0));
        assert_eq!(leaf.transform, leaf.original);
    }

    #[test]
    fn leaf_copies_are_independent() {
        let a = Leaf::at(Vector::new(1.0, 1.0));
        let mut b = a;
        b.transform.x = 99.0;
        assert_eq!(a.transform.x, 1.0);
        assert_ne!(a, b);
    }

    #[test]
    fn leaf_equality_is_structural() {
        let t = Vector::new(1.0, 2.0);
        let o = Vector::new(3.0, 4.0);
        assert_eq!(Leaf::new(t, o), Leaf::new(t, o));
        assert_ne!(Leaf::new(t, o), Leaf::new(o, o));
        assert_ne!(Leaf::new(t, o), Leaf::new(t, t));
    }
}
