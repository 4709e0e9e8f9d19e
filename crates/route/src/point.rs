use ortho_geom::{Blocks, Contains, Enlarge, HullWith, Measure, MinDist, NearestTo};

/// The capabilities a point type needs to be routable.
///
/// Distances are Manhattan; the *region* between two points is their
/// axis-aligned hull, which is exactly the set of positions a shortest
/// wire between them may pass through. Keep-outs are the enlarged-point
/// shape of the same dimensionality (rectangles in 2D, boxes in 3D).
///
/// The blanket impl covers every point built from the `ortho_geom`
/// primitives, in particular `Point<i32, i32>` and the layered
/// `Point3<i32>`.
pub trait RoutePoint: Clone + PartialEq + MinDist<Self, Scalar = i32> + Sized {
    /// Axis-aligned hull of two points.
    type Region: NearestTo<Self, Output = Self> + MinDist<Self, Scalar = i32> + Measure<Scalar = i32>;
    /// Forbidden region shape.
    type Keepout: Contains<Self> + Blocks<Self::Region> + Clone;

    /// The region a shortest wire between `self` and `other` can use.
    fn hull_to(&self, other: &Self) -> Self::Region;

    /// Manhattan distance to `other`.
    fn dist(&self, other: &Self) -> i32;

    /// The keep-out obtained by growing this point by `margin`.
    fn keepout(&self, margin: i32) -> Self::Keepout;
}

impl<P> RoutePoint for P
where
    P: Clone + PartialEq + MinDist<P, Scalar = i32> + HullWith<P> + Enlarge<i32>,
    <P as HullWith<P>>::Output:
        NearestTo<P, Output = P> + MinDist<P, Scalar = i32> + Measure<Scalar = i32>,
    <P as Enlarge<i32>>::Output: Contains<P> + Blocks<<P as HullWith<P>>::Output> + Clone,
{
    type Region = <P as HullWith<P>>::Output;
    type Keepout = <P as Enlarge<i32>>::Output;

    #[inline]
    fn hull_to(&self, other: &Self) -> Self::Region {
        self.hull_with(other)
    }

    #[inline]
    fn dist(&self, other: &Self) -> i32 {
        self.min_dist_with(other)
    }

    #[inline]
    fn keepout(&self, margin: i32) -> Self::Keepout {
        self.enlarge_with(margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ortho_geom::{interval, point, point3, Point3, Rect};

    #[test]
    fn plain_points_route() {
        let a = point(0, 0);
        let b = point(10, 5);
        assert_eq!(a.dist(&b), 15);
        let region: Rect<i32> = a.hull_to(&b);
        assert_eq!(region.x, interval(0, 10));
        let k = a.keepout(2);
        assert!(k.contains(&point(1, 1)));
    }

    #[test]
    fn layered_points_route() {
        let a: Point3<i32> = point3(0, 0, 0);
        let b = point3(10, 5, 2);
        assert_eq!(a.dist(&b), 17);
        let region = a.hull_to(&b);
        assert_eq!(region.nearest_to(&a), a);
        let k = b.keepout(1);
        assert!(k.contains(&b));
    }
}
