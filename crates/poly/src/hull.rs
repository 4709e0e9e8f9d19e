//! Monotone and convex hulls of rectilinear polygons.
//!
//! A monotone hull keeps the vertices of one directed chain and drops
//! every vertex whose local turn re-enters the polygon; running the
//! x-monotone pass and then the y-monotone pass yields the rectilinear
//! convex hull. The passes walk the polygon as a [`Ring`] so removal is
//! a constant-time detach and the walk can step back to re-examine the
//! predecessor of a removed vertex.

use crate::ring::Ring;
use crate::util::{max_index_by_key, min_index_by_key};
use ortho_geom::{Coord, Point};

fn chain_pass<T: Coord>(
    pointset: &[Point<T, T>],
    ring: &mut Ring,
    start: usize,
    stop: usize,
    key: &impl Fn(&Point<T, T>) -> (T, T),
    cmp: impl Fn(T, T) -> bool,
    drop_turn: impl Fn(T) -> bool,
) {
    let mut vcurr = start;
    while vcurr != stop {
        let vnext = ring.next(vcurr);
        let vprev = ring.prev(vcurr);
        let p0 = pointset[ring.data(vprev)];
        let p1 = pointset[ring.data(vcurr)];
        let p2 = pointset[ring.data(vnext)];

        // A vertex is examined when the chain stalls or backtracks in
        // the major direction around it.
        let against_chain = cmp(key(&p1).0, key(&p2).0) || cmp(key(&p0).0, key(&p1).0);
        if against_chain {
            let turn = (p1.y - p0.y) * (p2.x - p1.x);
            if drop_turn(turn) {
                ring.detach(vcurr);
                vcurr = vprev;
            } else {
                vcurr = vnext;
            }
        } else {
            vcurr = vnext;
        }
    }
}

/// Monotone hull along the major direction extracted by `key`.
///
/// `is_anticlockwise` is the orientation of the input polygon (see
/// [`rpolygon_is_anticlockwise`](crate::rpolygon_is_anticlockwise));
/// it decides which turn sign counts as re-entrant.
pub fn rpolygon_make_monotone_hull<T: Coord>(
    pointset: &[Point<T, T>],
    is_anticlockwise: bool,
    key: impl Fn(&Point<T, T>) -> (T, T),
) -> Vec<Point<T, T>> {
    if pointset.len() <= 3 {
        return pointset.to_vec();
    }

    let min_index = min_index_by_key(pointset, &key);
    let max_index = max_index_by_key(pointset, &key);
    let min_point = pointset[min_index];

    let mut ring = Ring::new(pointset.len());
    if is_anticlockwise {
        chain_pass(pointset, &mut ring, min_index, max_index, &key, |a, b| a >= b, |t| {
            t >= T::zero()
        });
        chain_pass(pointset, &mut ring, max_index, min_index, &key, |a, b| a <= b, |t| {
            t >= T::zero()
        });
    } else {
        chain_pass(pointset, &mut ring, min_index, max_index, &key, |a, b| a >= b, |t| {
            t <= T::zero()
        });
        chain_pass(pointset, &mut ring, max_index, min_index, &key, |a, b| a <= b, |t| {
            t <= T::zero()
        });
    }

    let mut result = vec![min_point];
    for id in ring.iter_from(min_index) {
        result.push(pointset[ring.data(id)]);
    }
    result
}

/// x-monotone hull of a rectilinear polygon.
pub fn rpolygon_make_xmonotone_hull<T: Coord>(
    pointset: &[Point<T, T>],
    is_anticlockwise: bool,
) -> Vec<Point<T, T>> {
    rpolygon_make_monotone_hull(pointset, is_anticlockwise, |p| (p.x, p.y))
}

/// y-monotone hull of a rectilinear polygon.
pub fn rpolygon_make_ymonotone_hull<T: Coord>(
    pointset: &[Point<T, T>],
    is_anticlockwise: bool,
) -> Vec<Point<T, T>> {
    rpolygon_make_monotone_hull(pointset, is_anticlockwise, |p| (p.y, p.x))
}

/// Rectilinear convex hull: the y-monotone hull of the x-monotone hull.
pub fn rpolygon_make_convex_hull<T: Coord>(
    pointset: &[Point<T, T>],
    is_anticlockwise: bool,
) -> Vec<Point<T, T>> {
    let xmono = rpolygon_make_xmonotone_hull(pointset, is_anticlockwise);
    rpolygon_make_ymonotone_hull(&xmono, is_anticlockwise)
}
