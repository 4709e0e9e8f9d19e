//! Capability traits shared by all primitives.
//!
//! Each trait stands for one operation a primitive may support:
//! overlap, containment, intersection, hull, minimum distance, nearest
//! point, enlargement, measure and corner extraction. Concrete types
//! implement the operations they support for every operand type that
//! makes sense (scalar against interval, interval against interval,
//! point against point, ...), and [`Point`](crate::Point) promotes all
//! of them pointwise.
//!
//! The impls on plain scalars are the base of the recursion and encode
//! the degenerate semantics: overlap and containment collapse to
//! equality, minimum distance to the absolute difference, nearest point
//! and corners to the identity, and the measure of a scalar is one.
//!
//! Containment is asymmetric: a scalar never contains a non-degenerate
//! interval, so `Contains<Interval<T>> for T` is constantly false.

use crate::interval::Interval;
use crate::Coord;

/// Closed overlap test.
pub trait Overlaps<Rhs = Self> {
    fn overlaps(&self, other: &Rhs) -> bool;
}

/// Closed containment test. Asymmetric: `a.contains(b)` does not imply
/// anything about `b.contains(a)`.
pub trait Contains<Rhs = Self> {
    fn contains(&self, other: &Rhs) -> bool;
}

/// Intersection. The output may be an invalid (empty) interval; callers
/// check with [`Interval::is_invalid`].
pub trait Intersects<Rhs = Self> {
    type Output;
    fn intersect_with(&self, other: &Rhs) -> Self::Output;
}

/// Smallest axis-aligned primitive covering both operands.
pub trait HullWith<Rhs = Self> {
    type Output;
    fn hull_with(&self, other: &Rhs) -> Self::Output;
}

/// Minimum L1 distance between two primitives.
pub trait MinDist<Rhs = Self> {
    type Scalar;
    fn min_dist_with(&self, other: &Rhs) -> Self::Scalar;
}

/// Minimum L1 distance that also consumes the geometric slack: both
/// operands collapse toward the realizing configuration.
pub trait MinDistChange<Rhs = Self> {
    type Scalar;
    fn min_dist_change_with(&mut self, other: &mut Rhs) -> Self::Scalar;
}

/// Nearest point on `self` to the operand (clamping per axis).
pub trait NearestTo<Rhs = Self> {
    type Output;
    fn nearest_to(&self, other: &Rhs) -> Self::Output;
}

/// Symmetric enlargement by a scalar margin. Enlarging a scalar yields
/// an interval, so enlarging a point yields a rectangle (a keep-out).
pub trait Enlarge<T> {
    type Output;
    fn enlarge_with(&self, alpha: T) -> Self::Output;
}

/// Length, area or volume. Degenerate axes measure one, so the measure
/// of a hull doubles as the tie-breaking "detour area" of two points.
pub trait Measure {
    type Scalar;
    fn measure(&self) -> Self::Scalar;
}

/// Center and extreme corners.
pub trait Corners {
    type Output;
    fn center(&self) -> Self::Output;
    fn lower_corner(&self) -> Self::Output;
    fn upper_corner(&self) -> Self::Output;
}

/// Strict-interior overlap, the test used against keep-out regions.
///
/// A route running exactly along a keep-out boundary is not blocked,
/// so this is the open-interval counterpart of [`Overlaps`].
pub trait Blocks<Rhs = Self> {
    fn blocks(&self, other: &Rhs) -> bool;
}

// Scalar impls: the base of the pointwise recursion.

impl<T: Coord> Overlaps<T> for T {
    #[inline]
    fn overlaps(&self, other: &T) -> bool {
        self == other
    }
}

impl<T: Coord> Contains<T> for T {
    #[inline]
    fn contains(&self, other: &T) -> bool {
        self == other
    }
}

impl<T: Coord> Contains<Interval<T>> for T {
    #[inline]
    fn contains(&self, _other: &Interval<T>) -> bool {
        false
    }
}

impl<T: Coord> Intersects<T> for T {
    type Output = T;
    #[inline]
    fn intersect_with(&self, other: &T) -> T {
        debug_assert_eq!(self, other);
        *self
    }
}

impl<T: Coord> HullWith<T> for T {
    type Output = Interval<T>;
    #[inline]
    fn hull_with(&self, other: &T) -> Interval<T> {
        if self < other {
            Interval::new(*self, *other)
        } else {
            Interval::new(*other, *self)
        }
    }
}

impl<T: Coord> MinDist<T> for T {
    type Scalar = T;
    #[inline]
    fn min_dist_with(&self, other: &T) -> T {
        (*self - *other).abs()
    }
}

impl<T: Coord> MinDistChange<T> for T {
    type Scalar = T;
    #[inline]
    fn min_dist_change_with(&mut self, other: &mut T) -> T {
        (*self - *other).abs()
    }
}

impl<T: Coord, Rhs> NearestTo<Rhs> for T {
    type Output = T;
    #[inline]
    fn nearest_to(&self, _other: &Rhs) -> T {
        *self
    }
}

impl<T: Coord> Enlarge<T> for T {
    type Output = Interval<T>;
    #[inline]
    fn enlarge_with(&self, alpha: T) -> Interval<T> {
        Interval::new(*self - alpha, *self + alpha)
    }
}

impl<T: Coord> Measure for T {
    type Scalar = T;
    #[inline]
    fn measure(&self) -> T {
        T::one()
    }
}

impl<T: Coord> Corners for T {
    type Output = T;
    #[inline]
    fn center(&self) -> T {
        *self
    }
    #[inline]
    fn lower_corner(&self) -> T {
        *self
    }
    #[inline]
    fn upper_corner(&self) -> T {
        *self
    }
}

impl<T: Coord> Blocks<T> for T {
    #[inline]
    fn blocks(&self, _other: &T) -> bool {
        false
    }
}

impl<T: Coord> Blocks<Interval<T>> for T {
    #[inline]
    fn blocks(&self, _other: &Interval<T>) -> bool {
        false
    }
}

// Free-function spelling of the operations, for call sites that read
// better with symmetric arguments.

/// Returns whether the two primitives overlap (closed boundaries).
#[inline]
pub fn overlap<U1: Overlaps<U2>, U2>(lhs: &U1, rhs: &U2) -> bool {
    lhs.overlaps(rhs)
}

/// Returns whether `lhs` contains `rhs`.
#[inline]
pub fn contain<U1: Contains<U2>, U2>(lhs: &U1, rhs: &U2) -> bool {
    lhs.contains(rhs)
}

/// Returns the intersection of the two primitives.
#[inline]
pub fn intersection<U1: Intersects<U2>, U2>(lhs: &U1, rhs: &U2) -> U1::Output {
    lhs.intersect_with(rhs)
}

/// Returns the hull of the two primitives.
#[inline]
pub fn hull<U1: HullWith<U2>, U2>(lhs: &U1, rhs: &U2) -> U1::Output {
    lhs.hull_with(rhs)
}

/// Returns the minimum Manhattan distance between the two primitives.
#[inline]
pub fn min_dist<U1: MinDist<U2>, U2>(lhs: &U1, rhs: &U2) -> U1::Scalar {
    lhs.min_dist_with(rhs)
}

/// Minimum distance variant that collapses both operands in place.
#[inline]
pub fn min_dist_change<U1: MinDistChange<U2>, U2>(lhs: &mut U1, rhs: &mut U2) -> U1::Scalar {
    lhs.min_dist_change_with(rhs)
}

/// Returns the point of `lhs` nearest to `rhs`.
#[inline]
pub fn nearest<U1: NearestTo<U2>, U2>(lhs: &U1, rhs: &U2) -> U1::Output {
    lhs.nearest_to(rhs)
}

/// Returns `lhs` enlarged by `alpha` on every side.
#[inline]
pub fn enlarge<U: Enlarge<T>, T>(lhs: &U, alpha: T) -> U::Output {
    lhs.enlarge_with(alpha)
}

/// Returns the measure (length, area, volume) of a primitive.
#[inline]
pub fn measure_of<U: Measure>(obj: &U) -> U::Scalar {
    obj.measure()
}

/// Returns the center of a primitive.
#[inline]
pub fn center_of<U: Corners>(obj: &U) -> U::Output {
    obj.center()
}

/// Returns the lower corner of a primitive.
#[inline]
pub fn lower_of<U: Corners>(obj: &U) -> U::Output {
    obj.lower_corner()
}

/// Returns the upper corner of a primitive.
#[inline]
pub fn upper_of<U: Corners>(obj: &U) -> U::Output {
    obj.upper_corner()
}
