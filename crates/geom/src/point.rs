use crate::ops::{
    Blocks, Contains, Corners, Enlarge, HullWith, Intersects, Measure, MinDist, MinDistChange,
    NearestTo, Overlaps,
};
use crate::Coord;

use core::fmt;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Alias for `euclid::default::Vector2D`.
pub use euclid::default::Vector2D as Vector2;

/// Shorthand for `Vector2::new(x, y)`.
pub use euclid::vec2 as vector2;

/// An ordered pair whose coordinates are independent primitives.
///
/// Each coordinate is a scalar, an [`Interval`](crate::Interval) or
/// another `Point`, and every operation is applied per coordinate, so
/// the one type covers plain points, rectangles, axis-aligned segments
/// and 3D points. See the aliases in [`rect`](crate::rect()).
///
/// The derived ordering is lexicographic: `x` first, then `y`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Point<X, Y = X> {
    pub x: X,
    pub y: Y,
}

/// Shorthand for `Point::new(x, y)`.
#[inline]
pub fn point<X, Y>(x: X, y: Y) -> Point<X, Y> {
    Point { x, y }
}

impl<X, Y> Point<X, Y> {
    #[inline]
    pub fn new(x: X, y: Y) -> Self {
        Point { x, y }
    }

    /// Mirror across the `x = y` diagonal.
    #[inline]
    pub fn flip_xy(&self) -> Point<Y, X>
    where
        X: Clone,
        Y: Clone,
    {
        Point { x: self.y.clone(), y: self.x.clone() }
    }

    /// Mirror across the y axis.
    #[inline]
    pub fn flip_y(&self) -> Point<X, Y>
    where
        X: Neg<Output = X> + Clone,
        Y: Clone,
    {
        Point { x: -self.x.clone(), y: self.y.clone() }
    }
}

impl<T: Coord> Point<T, T> {
    /// Change of basis `(x, y) -> (x - y, x + y)`.
    ///
    /// In the rotated frame an L1 ball is an L∞ ball, which is what
    /// makes Manhattan-arc arithmetic axis-aligned.
    #[inline]
    pub fn rotates(&self) -> Point<T, T> {
        Point { x: self.x - self.y, y: self.x + self.y }
    }

    /// Inverse of [`rotates`](Self::rotates), rounding each half toward
    /// zero the way integer division does.
    #[inline]
    pub fn inv_rotates(&self) -> Point<T, T> {
        Point {
            x: (self.x + self.y) / T::two(),
            y: (self.y - self.x) / T::two(),
        }
    }
}

// Translation by a vector applies per coordinate, so rectangles and
// segments translate with the same impl as plain points.

impl<X, Y, T: Copy> AddAssign<Vector2<T>> for Point<X, Y>
where
    X: AddAssign<T>,
    Y: AddAssign<T>,
{
    #[inline]
    fn add_assign(&mut self, v: Vector2<T>) {
        self.x += v.x;
        self.y += v.y;
    }
}

impl<X, Y, T: Copy> SubAssign<Vector2<T>> for Point<X, Y>
where
    X: SubAssign<T>,
    Y: SubAssign<T>,
{
    #[inline]
    fn sub_assign(&mut self, v: Vector2<T>) {
        self.x -= v.x;
        self.y -= v.y;
    }
}

impl<X, Y, T: Copy> Add<Vector2<T>> for Point<X, Y>
where
    X: AddAssign<T>,
    Y: AddAssign<T>,
{
    type Output = Point<X, Y>;
    #[inline]
    fn add(mut self, v: Vector2<T>) -> Point<X, Y> {
        self += v;
        self
    }
}

impl<X, Y, T: Copy> Sub<Vector2<T>> for Point<X, Y>
where
    X: SubAssign<T>,
    Y: SubAssign<T>,
{
    type Output = Point<X, Y>;
    #[inline]
    fn sub(mut self, v: Vector2<T>) -> Point<X, Y> {
        self -= v;
        self
    }
}

impl<T: Coord> Sub for Point<T, T> {
    type Output = Vector2<T>;
    #[inline]
    fn sub(self, other: Point<T, T>) -> Vector2<T> {
        vector2(self.x - other.x, self.y - other.y)
    }
}

impl<X1, Y1, X2, Y2> Overlaps<Point<X2, Y2>> for Point<X1, Y1>
where
    X1: Overlaps<X2>,
    Y1: Overlaps<Y2>,
{
    #[inline]
    fn overlaps(&self, other: &Point<X2, Y2>) -> bool {
        self.x.overlaps(&other.x) && self.y.overlaps(&other.y)
    }
}

impl<X1, Y1, X2, Y2> Contains<Point<X2, Y2>> for Point<X1, Y1>
where
    X1: Contains<X2>,
    Y1: Contains<Y2>,
{
    #[inline]
    fn contains(&self, other: &Point<X2, Y2>) -> bool {
        self.x.contains(&other.x) && self.y.contains(&other.y)
    }
}

impl<X1, Y1, X2, Y2> Intersects<Point<X2, Y2>> for Point<X1, Y1>
where
    X1: Intersects<X2>,
    Y1: Intersects<Y2>,
{
    type Output = Point<X1::Output, Y1::Output>;
    #[inline]
    fn intersect_with(&self, other: &Point<X2, Y2>) -> Self::Output {
        Point {
            x: self.x.intersect_with(&other.x),
            y: self.y.intersect_with(&other.y),
        }
    }
}

impl<X1, Y1, X2, Y2> HullWith<Point<X2, Y2>> for Point<X1, Y1>
where
    X1: HullWith<X2>,
    Y1: HullWith<Y2>,
{
    type Output = Point<X1::Output, Y1::Output>;
    #[inline]
    fn hull_with(&self, other: &Point<X2, Y2>) -> Self::Output {
        Point {
            x: self.x.hull_with(&other.x),
            y: self.y.hull_with(&other.y),
        }
    }
}

impl<X1, Y1, X2, Y2, D> MinDist<Point<X2, Y2>> for Point<X1, Y1>
where
    X1: MinDist<X2, Scalar = D>,
    Y1: MinDist<Y2, Scalar = D>,
    D: Coord,
{
    type Scalar = D;
    /// Per-axis distances add up, which is the Manhattan metric.
    #[inline]
    fn min_dist_with(&self, other: &Point<X2, Y2>) -> D {
        self.x.min_dist_with(&other.x) + self.y.min_dist_with(&other.y)
    }
}

impl<X1, Y1, X2, Y2, D> MinDistChange<Point<X2, Y2>> for Point<X1, Y1>
where
    X1: MinDistChange<X2, Scalar = D>,
    Y1: MinDistChange<Y2, Scalar = D>,
    D: Coord,
{
    type Scalar = D;
    #[inline]
    fn min_dist_change_with(&mut self, other: &mut Point<X2, Y2>) -> D {
        self.x.min_dist_change_with(&mut other.x) + self.y.min_dist_change_with(&mut other.y)
    }
}

impl<X1, Y1, X2, Y2> NearestTo<Point<X2, Y2>> for Point<X1, Y1>
where
    X1: NearestTo<X2>,
    Y1: NearestTo<Y2>,
{
    type Output = Point<X1::Output, Y1::Output>;
    #[inline]
    fn nearest_to(&self, other: &Point<X2, Y2>) -> Self::Output {
        Point {
            x: self.x.nearest_to(&other.x),
            y: self.y.nearest_to(&other.y),
        }
    }
}

impl<X, Y, T: Copy> Enlarge<T> for Point<X, Y>
where
    X: Enlarge<T>,
    Y: Enlarge<T>,
{
    type Output = Point<X::Output, Y::Output>;
    #[inline]
    fn enlarge_with(&self, alpha: T) -> Self::Output {
        Point {
            x: self.x.enlarge_with(alpha),
            y: self.y.enlarge_with(alpha),
        }
    }
}

impl<X, Y, D> Measure for Point<X, Y>
where
    X: Measure<Scalar = D>,
    Y: Measure<Scalar = D>,
    D: Coord,
{
    type Scalar = D;
    #[inline]
    fn measure(&self) -> D {
        self.x.measure() * self.y.measure()
    }
}

impl<X: Corners, Y: Corners> Corners for Point<X, Y> {
    type Output = Point<X::Output, Y::Output>;
    #[inline]
    fn center(&self) -> Self::Output {
        Point { x: self.x.center(), y: self.y.center() }
    }
    #[inline]
    fn lower_corner(&self) -> Self::Output {
        Point { x: self.x.lower_corner(), y: self.y.lower_corner() }
    }
    #[inline]
    fn upper_corner(&self) -> Self::Output {
        Point { x: self.x.upper_corner(), y: self.y.upper_corner() }
    }
}

impl<X1, Y1, X2, Y2> Blocks<Point<X2, Y2>> for Point<X1, Y1>
where
    X1: Blocks<X2>,
    Y1: Blocks<Y2>,
{
    #[inline]
    fn blocks(&self, other: &Point<X2, Y2>) -> bool {
        self.x.blocks(&other.x) && self.y.blocks(&other.y)
    }
}

impl<X: fmt::Display, Y: fmt::Display> fmt::Display for Point<X, Y> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
