//! Recursive decomposition of rectilinear polygons.
//!
//! All three variants share one skeleton: walk the vertex ring looking
//! for a *bad* vertex, project it onto the nearest opposing edge
//! (horizontally or vertically, whichever is closer), append the
//! projection as a brand-new vertex, split the ring into two sub-cycles
//! through it, and recurse on both. They differ only in what counts as
//! bad:
//!
//! - [`rpolygon_cut_convex`]: a re-entrant corner with an actual angle
//!   change;
//! - [`rpolygon_cut_explicit`]: any corner whose oriented turn has the
//!   wrong sign;
//! - [`rpolygon_cut_implicit`]: the criterion applies to the *implied*
//!   corner between two consecutive stored vertices.
//!
//! [`rpolygon_cut_rectangle`] runs the implicit cut and then the
//! explicit cut on each piece, which leaves axis-aligned rectangles.
//! Every cut preserves the total signed area.

use crate::ring::Ring;
use ortho_geom::{point, Coord, Point};

/// Nearest opposing edge to the vertex at ring node `vcurr`: scan the
/// rest of the cycle for edges whose span covers the vertex, tracking
/// the closest hit and whether it was a vertical or horizontal
/// projection.
fn find_min_dist_point<T: Coord>(
    lst: &[Point<T, T>],
    ring: &Ring,
    vcurr: usize,
) -> (usize, bool) {
    find_min_dist_point_from(lst, ring, vcurr, ring.next(vcurr), lst[ring.data(vcurr)])
}

fn find_min_dist_point_from<T: Coord>(
    lst: &[Point<T, T>],
    ring: &Ring,
    vstop: usize,
    vstart: usize,
    pcurr: Point<T, T>,
) -> (usize, bool) {
    let mut min_value = T::max_value();
    let mut vertical = true;
    let mut v_min = vstop;

    let mut vi = vstart;
    while vi != vstop {
        let p0 = lst[ring.data(ring.prev(vi))];
        let p1 = lst[ring.data(vi)];
        let p2 = lst[ring.data(ring.next(vi))];
        let vec_i = p1 - pcurr;

        // Vertical projection: the previous edge's y-span covers pcurr.
        if (p0.y < pcurr.y && pcurr.y <= p1.y) || (p1.y <= pcurr.y && pcurr.y < p0.y) {
            let dist = vec_i.x.abs();
            if min_value > dist {
                min_value = dist;
                v_min = vi;
                vertical = true;
            }
        }
        // Horizontal projection: the next edge's x-span covers pcurr.
        if (p2.x < pcurr.x && pcurr.x <= p1.x) || (p1.x <= pcurr.x && pcurr.x < p2.x) {
            let dist = vec_i.y.abs();
            if min_value > dist {
                min_value = dist;
                v_min = vi;
                vertical = false;
            }
        }
        vi = ring.next(vi);
    }
    (v_min, vertical)
}

/// Splice a new node (carrying a fresh vertex) so that the cycle of
/// `vcurr` splits in two, one keeping `vcurr`, the other starting at
/// the new node. Returns the new node.
fn split_at_projection<T: Coord>(
    lst: &mut Vec<Point<T, T>>,
    ring: &mut Ring,
    vcurr: usize,
    v_min: usize,
    vertical: bool,
    corner: Point<T, T>,
) -> usize {
    let n = lst.len();
    let new_node = ring.push(n);
    let p_min = lst[ring.data(v_min)];

    let p_new = if vertical {
        let vcn = ring.next(vcurr);
        let vmp = ring.prev(v_min);
        ring.link(vmp, new_node);
        ring.link(new_node, vcn);
        ring.link(vcurr, v_min);
        point(p_min.x, corner.y)
    } else {
        let vcp = ring.prev(vcurr);
        let vmn = ring.next(v_min);
        ring.link(vcp, new_node);
        ring.link(new_node, vmn);
        ring.link(v_min, vcurr);
        point(corner.x, p_min.y)
    };
    lst.push(p_new);
    new_node
}

fn collect_cycle(ring: &Ring, v1: usize) -> Vec<usize> {
    let mut indices = vec![ring.data(v1)];
    let mut current = ring.next(v1);
    while current != v1 {
        indices.push(ring.data(current));
        current = ring.next(current);
    }
    indices
}

fn cut_convex_recur<T: Coord>(
    v1: usize,
    lst: &mut Vec<Point<T, T>>,
    ring: &mut Ring,
    bad_turn: &impl Fn(T) -> bool,
) -> Vec<Vec<usize>> {
    let v2 = ring.next(v1);
    let v3 = ring.next(v2);

    if v3 == v1 {
        // Two stored vertices: a rectangle.
        return vec![vec![ring.data(v1), ring.data(v2)]];
    }
    if ring.next(v3) == v1 {
        // Three stored vertices: an L-shape, already convex.
        return vec![vec![ring.data(v1), ring.data(v2), ring.data(v3)]];
    }

    // A concave vertex has both an angle change and a turn of the wrong
    // sign for the polygon's orientation.
    let mut vcurr = v1;
    let concave = loop {
        let vnext = ring.next(vcurr);
        let vprev = ring.prev(vcurr);
        let p0 = lst[ring.data(vprev)];
        let p1 = lst[ring.data(vcurr)];
        let p2 = lst[ring.data(vnext)];

        let turn = (p1.y - p0.y) * (p2.x - p1.x);
        let e1 = p1 - p0;
        let e2 = p2 - p1;
        if (e1.x * e2.x < T::zero() || e1.y * e2.y < T::zero()) && bad_turn(turn) {
            break Some(vcurr);
        }
        vcurr = vnext;
        if vcurr == v1 {
            break None;
        }
    };

    let vcurr = match concave {
        Some(v) => v,
        None => return vec![collect_cycle(ring, v1)],
    };

    let (v_min, vertical) = find_min_dist_point(lst, ring, vcurr);
    let corner = lst[ring.data(vcurr)];
    let new_node = split_at_projection(lst, ring, vcurr, v_min, vertical, corner);

    let mut pieces = cut_convex_recur(vcurr, lst, ring, bad_turn);
    pieces.extend(cut_convex_recur(new_node, lst, ring, bad_turn));
    pieces
}

fn cut_explicit_recur<T: Coord>(
    v1: usize,
    lst: &mut Vec<Point<T, T>>,
    ring: &mut Ring,
    bad_turn: &impl Fn(T) -> bool,
) -> Vec<Vec<usize>> {
    let v2 = ring.next(v1);
    if ring.next(v2) == v1 {
        return vec![vec![ring.data(v1), ring.data(v2)]];
    }

    // Stricter than the convex criterion: any wrong-signed turn counts,
    // angle change or not.
    let mut vcurr = v1;
    let concave = loop {
        let vnext = ring.next(vcurr);
        let vprev = ring.prev(vcurr);
        let p0 = lst[ring.data(vprev)];
        let p1 = lst[ring.data(vcurr)];
        let p2 = lst[ring.data(vnext)];

        let turn = (p1.y - p0.y) * (p2.x - p1.x);
        if bad_turn(turn) {
            break Some(vcurr);
        }
        vcurr = vnext;
        if vcurr == v1 {
            break None;
        }
    };

    let vcurr = match concave {
        Some(v) => v,
        None => return vec![collect_cycle(ring, v1)],
    };

    let (v_min, vertical) = find_min_dist_point(lst, ring, vcurr);
    let corner = lst[ring.data(vcurr)];
    let new_node = split_at_projection(lst, ring, vcurr, v_min, vertical, corner);

    let mut pieces = cut_explicit_recur(vcurr, lst, ring, bad_turn);
    pieces.extend(cut_explicit_recur(new_node, lst, ring, bad_turn));
    pieces
}

fn cut_implicit_recur<T: Coord>(
    v1: usize,
    lst: &mut Vec<Point<T, T>>,
    ring: &mut Ring,
    bad_turn: &impl Fn(T) -> bool,
) -> Vec<Vec<usize>> {
    let v2 = ring.next(v1);
    if ring.next(v2) == v1 {
        return vec![vec![ring.data(v1), ring.data(v2)]];
    }

    // The test runs on the implied corner between each stored vertex
    // and its successor.
    let mut vcurr = v1;
    let concave = loop {
        let vnext = ring.next(vcurr);
        let p1 = lst[ring.data(vcurr)];
        let p2 = lst[ring.data(vnext)];

        let turn = -(p2.y - p1.y) * (p2.x - p1.x);
        if bad_turn(turn) {
            break Some(vcurr);
        }
        vcurr = vnext;
        if vcurr == v1 {
            break None;
        }
    };

    let vcurr = match concave {
        Some(v) => v,
        None => return vec![collect_cycle(ring, v1)],
    };

    let vnext = ring.next(vcurr);
    let pc1 = lst[ring.data(vcurr)];
    let pc2 = lst[ring.data(vnext)];
    let corner = point(pc2.x, pc1.y);

    let (v_min, vertical) =
        find_min_dist_point_from(lst, ring, vcurr, ring.next(vnext), corner);

    let n = lst.len();
    let new_node = ring.push(n);
    let p_min = lst[ring.data(v_min)];
    let p_new = if vertical {
        let vmp = ring.prev(v_min);
        ring.link(vmp, new_node);
        ring.link(new_node, vnext);
        ring.link(vcurr, v_min);
        point(p_min.x, corner.y)
    } else {
        let vmn = ring.next(v_min);
        ring.link(vcurr, new_node);
        ring.link(new_node, vmn);
        ring.link(v_min, vnext);
        point(corner.x, p_min.y)
    };
    lst.push(p_new);

    let mut pieces = cut_implicit_recur(v_min, lst, ring, bad_turn);
    pieces.extend(cut_implicit_recur(new_node, lst, ring, bad_turn));
    pieces
}

fn run_cut<T: Coord>(
    pointset: &[Point<T, T>],
    is_anticlockwise: bool,
    recur: impl Fn(usize, &mut Vec<Point<T, T>>, &mut Ring, &dyn Fn(T) -> bool) -> Vec<Vec<usize>>,
) -> Vec<Vec<Point<T, T>>> {
    let mut lst = pointset.to_vec();
    // Cuts append at most one vertex per removed bad corner; four times
    // the input size covers the rectangle pipeline.
    lst.reserve(3 * pointset.len());
    let mut ring = Ring::with_capacity(pointset.len(), 4 * pointset.len());

    let pieces = if is_anticlockwise {
        recur(0, &mut lst, &mut ring, &|t| t > T::zero())
    } else {
        recur(0, &mut lst, &mut ring, &|t| t < T::zero())
    };

    pieces
        .into_iter()
        .map(|indices| indices.into_iter().map(|i| lst[i]).collect())
        .collect()
}

/// Decompose into convex rectilinear pieces.
pub fn rpolygon_cut_convex<T: Coord>(
    pointset: &[Point<T, T>],
    is_anticlockwise: bool,
) -> Vec<Vec<Point<T, T>>> {
    run_cut(pointset, is_anticlockwise, |v, lst, ring, bad| {
        cut_convex_recur(v, lst, ring, &bad)
    })
}

/// Decompose into pieces whose every stored corner turns the right way.
pub fn rpolygon_cut_explicit<T: Coord>(
    pointset: &[Point<T, T>],
    is_anticlockwise: bool,
) -> Vec<Vec<Point<T, T>>> {
    run_cut(pointset, is_anticlockwise, |v, lst, ring, bad| {
        cut_explicit_recur(v, lst, ring, &bad)
    })
}

/// Decompose into pieces whose every *implied* corner turns the right
/// way.
pub fn rpolygon_cut_implicit<T: Coord>(
    pointset: &[Point<T, T>],
    is_anticlockwise: bool,
) -> Vec<Vec<Point<T, T>>> {
    run_cut(pointset, is_anticlockwise, |v, lst, ring, bad| {
        cut_implicit_recur(v, lst, ring, &bad)
    })
}

/// Decompose into axis-aligned rectangles: implicit pieces refined by
/// the explicit cut.
pub fn rpolygon_cut_rectangle<T: Coord>(
    pointset: &[Point<T, T>],
    is_anticlockwise: bool,
) -> Vec<Vec<Point<T, T>>> {
    let mut res = Vec::new();
    for piece in rpolygon_cut_implicit(pointset, is_anticlockwise) {
        res.extend(rpolygon_cut_explicit(&piece, is_anticlockwise));
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hull::rpolygon_make_convex_hull;
    use crate::rpolygon::{
        create_test_rpolygon, rpolygon_is_anticlockwise, rpolygon_is_convex, RPolygon,
    };
    use ortho_extra::VdCorput;
    use ortho_geom::Point;

    fn test_polygon(n: usize) -> Vec<Point<i32, i32>> {
        let mut hgen_x = VdCorput::new(3, 7);
        let mut hgen_y = VdCorput::new(2, 11);
        let mut s: Vec<Point<i32, i32>> = (0..n)
            .map(|_| Point::new(hgen_x.pop() as i32, hgen_y.pop() as i32))
            .collect();
        create_test_rpolygon(&mut s);
        s
    }

    fn total_area(pieces: &[Vec<Point<i32, i32>>]) -> i32 {
        pieces
            .iter()
            .map(|p| RPolygon::from_points(p).signed_area())
            .sum()
    }

    #[test]
    fn convex_cut_pieces_are_convex() {
        let p = test_polygon(40);
        let anticw = rpolygon_is_anticlockwise(&p);
        let pieces = rpolygon_cut_convex(&p, anticw);
        assert!(!pieces.is_empty());
        for piece in &pieces {
            assert!(rpolygon_is_convex(piece));
        }
        assert_eq!(total_area(&pieces), RPolygon::from_points(&p).signed_area());
    }

    #[test]
    fn convex_cut_preserves_signed_area() {
        let p = test_polygon(10);
        let anticw = rpolygon_is_anticlockwise(&p);
        assert!(!rpolygon_is_convex(&p));
        let pieces = rpolygon_cut_convex(&p, anticw);
        for piece in &pieces {
            assert!(rpolygon_is_convex(piece));
        }
        assert_eq!(total_area(&pieces), RPolygon::from_points(&p).signed_area());
    }

    #[test]
    fn explicit_cut_of_convex_hull() {
        let p = test_polygon(7);
        let anticw = rpolygon_is_anticlockwise(&p);
        let hull = rpolygon_make_convex_hull(&p, anticw);
        let pieces = rpolygon_cut_explicit(&hull, anticw);
        assert!(!pieces.is_empty());
        for piece in &pieces {
            assert!(rpolygon_is_convex(piece));
        }
        assert_eq!(
            total_area(&pieces),
            RPolygon::from_points(&hull).signed_area()
        );
    }

    #[test]
    fn implicit_cut_of_convex_hull() {
        let p = test_polygon(20);
        let anticw = rpolygon_is_anticlockwise(&p);
        let hull = rpolygon_make_convex_hull(&p, anticw);
        let pieces = rpolygon_cut_implicit(&hull, anticw);
        assert!(!pieces.is_empty());
        for piece in &pieces {
            assert!(rpolygon_is_convex(piece));
        }
        assert_eq!(
            total_area(&pieces),
            RPolygon::from_points(&hull).signed_area()
        );
    }

    #[test]
    fn rectangle_cut_of_convex_hull() {
        let p = test_polygon(7);
        let anticw = rpolygon_is_anticlockwise(&p);
        let hull = rpolygon_make_convex_hull(&p, anticw);
        let pieces = rpolygon_cut_rectangle(&hull, anticw);
        assert!(!pieces.is_empty());
        for piece in &pieces {
            assert!(rpolygon_is_convex(piece));
        }
        assert_eq!(
            total_area(&pieces),
            RPolygon::from_points(&hull).signed_area()
        );
    }

    #[test]
    fn rectangle_of_two_vertices_round_trips() {
        // A rectangle in the half-vertex form never needs cutting.
        let p = vec![Point::new(0, 0), Point::new(8, 5)];
        let pieces = rpolygon_cut_rectangle(&p, true);
        assert_eq!(pieces.len(), 1);
        assert_eq!(
            RPolygon::from_points(&pieces[0]).signed_area(),
            RPolygon::from_points(&p).signed_area()
        );
    }
}
