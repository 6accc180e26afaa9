//! Geometry primitive: [`Position`].
//!
//! Levels are authored on an integer lattice in world units. The lattice is
//! horizontal (the X/Z plane); Y is carried along but never used for
//! adjacency or distance.

use std::fmt;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A 3D integer world position. X and Z span the ground plane, Y points up.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    /// Origin (0, 0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// A position on the ground plane (`y = 0`).
    #[inline]
    pub const fn ground(x: i32, z: i32) -> Self {
        Self { x, y: 0, z }
    }

    /// Shift by (dx, dz) on the ground plane, or `None` if a coordinate
    /// leaves the `i32` range.
    #[inline]
    pub fn checked_shift(self, dx: i32, dz: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y,
            z: self.z.checked_add(dz)?,
        })
    }

    /// The horizontal cell key `(x, z)`.
    #[inline]
    pub const fn horizontal(self) -> (i32, i32) {
        (self.x, self.z)
    }

    /// Round X and Z to the nearest multiple of `spacing`. Ties round up.
    /// Y is left untouched. `None` if the nearest lattice point lies outside
    /// the `i32` range.
    pub fn snapped(self, spacing: i32) -> Option<Self> {
        debug_assert!(spacing > 0);
        let s = i64::from(spacing);
        let round = |v: i32| i32::try_from((i64::from(v) + s / 2).div_euclid(s) * s).ok();
        Some(Self {
            x: round(self.x)?,
            y: self.y,
            z: round(self.z)?,
        })
    }

    /// Whether X and Z are both multiples of `spacing`.
    #[inline]
    pub fn is_on_lattice(self, spacing: i32) -> bool {
        self.x.rem_euclid(spacing) == 0 && self.z.rem_euclid(spacing) == 0
    }
}

// --- trait impls for Position ---

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_keeps_height() {
        let p = Position::new(0, 7, 0).checked_shift(10, -10);
        assert_eq!(p, Some(Position::new(10, 7, -10)));
    }

    #[test]
    fn shift_past_the_range_is_none() {
        assert_eq!(Position::ground(i32::MAX, 0).checked_shift(1, 0), None);
        assert_eq!(Position::ground(0, i32::MIN).checked_shift(0, -1), None);
    }

    #[test]
    fn snapping_rounds_to_nearest_cell() {
        let snap = |x, y, z, s| Position::new(x, y, z).snapped(s);
        assert_eq!(snap(14, 3, 16, 10), Some(Position::new(10, 3, 20)));
        assert_eq!(snap(-4, 0, -6, 10), Some(Position::new(0, 0, -10)));
        // Ties round up.
        assert_eq!(snap(5, 0, -5, 10), Some(Position::new(10, 0, 0)));
        assert_eq!(snap(3, 9, 2, 1), Some(Position::new(3, 9, 2)));
    }

    #[test]
    fn snapping_near_the_range_limits() {
        // The nearest multiple of 10 above i32::MAX does not fit.
        assert_eq!(Position::ground(i32::MAX, 0).snapped(10), None);
        assert_eq!(Position::ground(0, i32::MIN).snapped(10), None);
        assert_eq!(
            Position::ground(i32::MIN + 1, 0).snapped(1),
            Some(Position::ground(i32::MIN + 1, 0))
        );
    }

    #[test]
    fn lattice_membership() {
        assert!(Position::new(20, 5, -30).is_on_lattice(10));
        assert!(!Position::new(21, 0, 0).is_on_lattice(10));
        assert!(Position::ZERO.is_on_lattice(3));
    }

    #[test]
    fn display() {
        assert_eq!(Position::new(1, -2, 3).to_string(), "(1, -2, 3)");
    }
}
