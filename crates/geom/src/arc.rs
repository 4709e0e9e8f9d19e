use crate::interval::Interval;
use crate::ops::{Contains, Corners, Enlarge, Intersects, MinDist, Overlaps};
use crate::point::Point;
use crate::Coord;

use core::fmt;

/// The locus of points at a fixed Manhattan distance from a center,
/// stored in the rotated basis `u = x - y`, `v = x + y`.
///
/// In that basis an L1 ball is an axis-aligned box, so all arc
/// arithmetic reduces to interval arithmetic on the coordinates of the
/// wrapped [`Point`]. A degenerate arc (both coordinates scalar) is a
/// single point; arcs produced by merging carry intervals.
///
/// Reference: Chao, Hsu, Ho, Kahng, "Zero skew clock routing with
/// minimum wirelength", IEEE Trans. on Circuits and Systems II, 1992.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ManhattanArc<X, Y = X> {
    /// Rotated-frame representation.
    pub rep: Point<X, Y>,
}

/// An arc with interval coordinates: the merging-segment shape used by
/// clock-tree synthesis.
pub type MergingSegment<T> = ManhattanArc<Interval<T>, Interval<T>>;

impl<X, Y> ManhattanArc<X, Y> {
    /// Wraps coordinates that are already in the rotated frame.
    #[inline]
    pub fn new(u: X, v: Y) -> Self {
        ManhattanArc { rep: Point { x: u, y: v } }
    }
}

impl<T: Coord> ManhattanArc<T, T> {
    /// The degenerate arc sitting exactly on `pt`.
    #[inline]
    pub fn from_point(pt: &Point<T, T>) -> Self {
        let rotated = pt.rotates();
        ManhattanArc { rep: rotated }
    }

    /// Promote to interval coordinates without growing the locus.
    #[inline]
    pub fn to_region(&self) -> MergingSegment<T> {
        ManhattanArc::new(
            Interval::singleton(self.rep.x),
            Interval::singleton(self.rep.y),
        )
    }
}

impl<X, Y> ManhattanArc<X, Y> {
    pub fn overlaps<U1, U2>(&self, other: &ManhattanArc<U1, U2>) -> bool
    where
        X: Overlaps<U1>,
        Y: Overlaps<U2>,
    {
        self.rep.overlaps(&other.rep)
    }

    pub fn intersect_with<U1, U2>(
        &self,
        other: &ManhattanArc<U1, U2>,
    ) -> ManhattanArc<X::Output, Y::Output>
    where
        X: Intersects<U1>,
        Y: Intersects<U2>,
    {
        ManhattanArc { rep: self.rep.intersect_with(&other.rep) }
    }

    /// The L1 distance between the two loci: per rotated axis the gap is
    /// an L∞ component, and the largest one realizes the distance.
    pub fn min_dist_with<U1, U2, D>(&self, other: &ManhattanArc<U1, U2>) -> D
    where
        X: MinDist<U1, Scalar = D>,
        Y: MinDist<U2, Scalar = D>,
        D: Coord,
    {
        let du = self.rep.x.min_dist_with(&other.rep.x);
        let dv = self.rep.y.min_dist_with(&other.rep.y);
        if du > dv {
            du
        } else {
            dv
        }
    }

    /// Grow the locus by `alpha` in every Manhattan direction.
    pub fn enlarge_with<T>(&self, alpha: T) -> ManhattanArc<X::Output, Y::Output>
    where
        X: Enlarge<T>,
        Y: Enlarge<T>,
        T: Copy,
    {
        ManhattanArc { rep: self.rep.enlarge_with(alpha) }
    }
}

impl<T: Coord> MergingSegment<T> {
    /// Center of the locus, back in the original frame.
    #[inline]
    pub fn center(&self) -> Point<T, T> {
        self.rep.center().inv_rotates()
    }

    /// Lower corner of the locus, back in the original frame.
    #[inline]
    pub fn lower_corner(&self) -> Point<T, T> {
        self.rep.lower_corner().inv_rotates()
    }

    /// Upper corner of the locus, back in the original frame.
    #[inline]
    pub fn upper_corner(&self) -> Point<T, T> {
        self.rep.upper_corner().inv_rotates()
    }

    /// The merging-segment construction: a locus every point of which is
    /// at distance `alpha` from `self` and `d - alpha` from `other`,
    /// where `d` is the distance between the two arcs.
    ///
    /// Valid for `0 <= alpha <= d`; the result of two overlapping trust
    /// regions is never empty.
    pub fn merge_with(&self, other: &Self, alpha: T) -> Self {
        let distance = self.min_dist_with(other);
        let trr1 = self.enlarge_with(alpha);
        let trr2 = other.enlarge_with(distance - alpha);
        trr1.intersect_with(&trr2)
    }

    /// The point of this locus nearest to `pt` in the original frame.
    ///
    /// Builds the trust region of `pt` grown by the distance to this
    /// arc; whichever rotated corner it captures is the nearest point,
    /// the center otherwise.
    pub fn nearest_point_to(&self, pt: &Point<T, T>) -> Point<T, T> {
        let probe = ManhattanArc::from_point(pt);
        let distance = self.min_dist_with(&probe);
        let trust = probe.enlarge_with(distance);
        let lb = self.rep.lower_corner();
        let ub = self.rep.upper_corner();
        let mut m = self.rep.center();
        if trust.rep.contains(&lb) {
            m = lb;
        } else if trust.rep.contains(&ub) {
            m = ub;
        }
        m.inv_rotates()
    }
}

impl<X: fmt::Display, Y: fmt::Display> fmt::Display for ManhattanArc<X, Y> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}, {}/", self.rep.x, self.rep.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::interval;
    use crate::point::point;

    #[test]
    fn from_point_is_degenerate() {
        let a = ManhattanArc::from_point(&point(4, 5));
        assert_eq!(a.rep, point(-1, 9));
        let r = a.to_region();
        assert_eq!(r.rep.x.length(), 0);
        assert_eq!(r.center(), point(4, 5));
        assert_eq!(r.lower_corner(), point(4, 5));
    }

    #[test]
    fn min_dist_is_manhattan() {
        let a = ManhattanArc::from_point(&point(4, 5));
        let b = ManhattanArc::from_point(&point(7, 9));
        // L1 distance between the two centers.
        assert_eq!(a.min_dist_with(&b), 7);
        assert_eq!(b.min_dist_with(&a), 7);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn merge_balances_distances() {
        // Centers (200, 600) and (500, 900), distance 600.
        let s1 = ManhattanArc::from_point(&point(200, 600)).to_region();
        let s2 = ManhattanArc::from_point(&point(500, 900)).to_region();
        let d = s1.min_dist_with(&s2);
        assert_eq!(d, 600);

        let m = s1.merge_with(&s2, d / 2);
        assert_eq!(m.rep.x, interval(-700, -100));
        assert_eq!(m.rep.y, interval(1100, 1100));

        // Every point of the merge keeps the balanced distances.
        for alpha in [0, 150, 300, 450, 600] {
            let m = s1.merge_with(&s2, alpha);
            assert!(!m.rep.x.is_invalid());
            assert!(!m.rep.y.is_invalid());
            assert_eq!(s1.min_dist_with(&m), alpha);
            assert_eq!(s2.min_dist_with(&m), d - alpha);
        }
    }

    #[test]
    fn nearest_point_lies_on_locus() {
        let s1 = ManhattanArc::from_point(&point(0, 0)).to_region();
        let s2 = ManhattanArc::from_point(&point(10, 0)).to_region();
        let m = s1.merge_with(&s2, 5);

        let n = m.nearest_point_to(&point(0, 0));
        assert_eq!(s1.min_dist_with(&ManhattanArc::from_point(&n)), 5);

        // A point on the locus is its own nearest point's distance zero.
        let probe = ManhattanArc::from_point(&n);
        assert_eq!(m.min_dist_with(&probe), 0);
    }

    #[test]
    fn display() {
        let a = ManhattanArc::from_point(&point(3, 4));
        assert_eq!(format!("{}", a), "/-1, 7/");
    }
}
