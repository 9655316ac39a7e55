//! Planar base case: Andrew's monotone chain on 2-D sub-points.

use std::rc::Rc;

use crate::geom::Tol;

use super::point::PointRef;

#[inline]
fn cross(a: &PointRef, b: &PointRef, c: &PointRef) -> f64 {
    let (ax, ay) = (a.coords[0], a.coords[1]);
    let ab = (b.coords[0] - ax, b.coords[1] - ay);
    let ac = (c.coords[0] - ax, c.coords[1] - ay);
    ab.0 * ac.1 - ab.1 * ac.0
}

/// Convex hull of 2-D points in counter-clockwise order.
///
/// Collinear boundary points are dropped (turns within `tol` do not count).
/// Returns fewer than three points only for degenerate input.
pub(crate) fn convex_hull_ccw(points: &[PointRef], tol: Tol) -> Vec<PointRef> {
    let mut pts: Vec<PointRef> = points.to_vec();
    pts.sort_by(|a, b| tol.cmp_lex(&a.coords, &b.coords));
    pts.dedup_by(|a, b| tol.vec_eq(&a.coords, &b.coords));
    if pts.len() < 3 {
        return pts;
    }
    let mut lower: Vec<PointRef> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2 && tol.is_non_pos(cross(&lower[lower.len() - 2], &lower[lower.len() - 1], p)) {
            lower.pop();
        }
        lower.push(Rc::clone(p));
    }
    let mut upper: Vec<PointRef> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2 && tol.is_non_pos(cross(&upper[upper.len() - 2], &upper[upper.len() - 1], p)) {
            upper.pop();
        }
        upper.push(Rc::clone(p));
    }
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}
