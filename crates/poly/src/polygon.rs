use crate::util::{max_index_by_key, min_index_by_key, partition};
use ortho_geom::{Coord, Point, Vector2};

/// A general polygon stored as an origin plus the displacement of every
/// further vertex from that origin.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Polygon<T> {
    origin: Point<T, T>,
    vecs: Vec<Vector2<T>>,
}

impl<T: Coord> Polygon<T> {
    /// Builds a polygon from its vertex sequence. The first vertex
    /// becomes the origin.
    pub fn from_points(pointset: &[Point<T, T>]) -> Self {
        let origin = pointset[0];
        let vecs = pointset[1..].iter().map(|p| *p - origin).collect();
        Polygon { origin, vecs }
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vecs.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Translate the polygon.
    pub fn translate(&mut self, v: Vector2<T>) {
        self.origin += v;
    }

    /// Twice the signed area, by the shoelace formula over the
    /// displacement vectors. Positive for counter-clockwise vertex
    /// order under the y-up convention.
    pub fn signed_area_x2(&self) -> T {
        let vs = &self.vecs;
        let n = vs.len();
        debug_assert!(n >= 2);
        let mut res = vs[0].x * vs[1].y - vs[n - 1].x * vs[n - 2].y;
        for i in 1..n - 1 {
            res += vs[i].x * (vs[i + 1].y - vs[i - 1].y);
        }
        res
    }
}

/// Reorders `points` in place into a monotone polygon with respect to
/// the direction encoded by `key`.
///
/// The extreme points under `key` split the set in two by the side of
/// the connecting line each point falls on; both chains are sorted
/// along the direction and the far chain reversed, which closes the
/// polygon.
pub fn create_mono_polygon<T: Coord, K: Ord>(
    points: &mut [Point<T, T>],
    key: impl Fn(&Point<T, T>) -> K,
) {
    debug_assert!(!points.is_empty());

    let min_pt = points[min_index_by_key(points, &key)];
    let max_pt = points[max_index_by_key(points, &key)];
    let d = max_pt - min_pt;

    let middle = partition(points, |a| d.cross(*a - min_pt) <= T::zero());
    points[..middle].sort_by_key(|p| key(p));
    points[middle..].sort_by_key(|p| key(p));
    points[middle..].reverse();
}

/// Monotone polygon along the x direction.
pub fn create_xmono_polygon<T: Coord>(points: &mut [Point<T, T>]) {
    create_mono_polygon(points, |p| (p.x, p.y));
}

/// Monotone polygon along the y direction.
pub fn create_ymono_polygon<T: Coord>(points: &mut [Point<T, T>]) {
    create_mono_polygon(points, |p| (p.y, p.x));
}

/// Crossing-number point-in-polygon test with integer arithmetic.
///
/// Strictly interior points test true and strictly exterior points
/// false. Points exactly on an edge get a consistent but unspecified
/// answer, so a partition of the plane into polygons assigns each
/// boundary point to exactly one of them.
pub fn point_in_polygon<T: Coord>(pointset: &[Point<T, T>], q: &Point<T, T>) -> bool {
    let mut res = false;
    let mut p0 = *pointset.last().unwrap();
    for &p1 in pointset {
        if (p1.y <= q.y && q.y < p0.y) || (p0.y <= q.y && q.y < p1.y) {
            let det = (*q - p0).cross(p1 - p0);
            if p1.y > p0.y {
                if det < T::zero() {
                    res = !res;
                }
            } else if det > T::zero() {
                res = !res;
            }
        }
        p0 = p1;
    }
    res
}

/// Orientation test: the turn at the lexicographically smallest vertex
/// decides the winding of the whole polygon.
pub fn polygon_is_clockwise<T: Coord>(pointset: &[Point<T, T>]) -> bool {
    let n = pointset.len();
    let i1 = min_index_by_key(pointset, |p| (p.x, p.y));
    let i0 = (i1 + n - 1) % n;
    let i2 = (i1 + 1) % n;
    let turn = (pointset[i1] - pointset[i0]).cross(pointset[i2] - pointset[i1]);
    turn < T::zero()
}
