//! Special polytopes used in tests and benchmarks.
//!
//! Purpose
//! - Canonical families in any dimension: boxes, unit balls of the ℓ1 and
//!   ℓ∞ norms, random simplices, cyclic polytopes, and polyhedral spheres
//!   and ellipsoids.
//! - Each constructor states which representation it builds, so tests can
//!   exercise a specific conversion path.
//!
//! References
//! - Face counts: the d-cube has 2^d vertices and 2d facets; the cross
//!   polytope has 2d vertices and 2^d facets; the cyclic polytope C(n, d)
//!   has n vertices and, for d = 3, 2n − 4 facets.
//! - Ellipsoids use hyperspherical coordinates: one azimuth in [0, 2π) and
//!   d − 2 polar angles in [0, π].

use std::f64::consts::PI;

use rand::Rng;

use crate::error::{PolytopeError, Result};
use crate::geom::{unit_vector, AffineBasis, HyperPlane, Tol, Vector};

use super::ConvexPolytop;

/// Unit cube `[0,1]^d` as a V-rep.
pub fn cube01_vrep(d: usize, tol: Tol) -> Result<ConvexPolytop> {
    rect_axis_parallel(&Vector::zeros(d), &Vector::from_element(d, 1.0), tol)
}

/// Unit cube `[0,1]^d` as an H-rep.
pub fn cube01_hrep(d: usize, tol: Tol) -> Result<ConvexPolytop> {
    if d == 0 {
        return Err(PolytopeError::InvalidArgument("cube of dimension zero".into()));
    }
    let mut hps = Vec::with_capacity(2 * d);
    for i in 0..d {
        hps.push(HyperPlane::through(-unit_vector(d, i), &Vector::zeros(d)));
        hps.push(HyperPlane::through(unit_vector(d, i), &Vector::from_element(d, 1.0)));
    }
    ConvexPolytop::from_halfspaces(hps, tol)
}

/// Axis-parallel box with opposite corners `left` and `right` (V-rep).
pub fn rect_axis_parallel(left: &Vector, right: &Vector, tol: Tol) -> Result<ConvexPolytop> {
    let d = left.len();
    if right.len() != d {
        return Err(PolytopeError::DimensionMismatch {
            expected: d,
            found: right.len(),
        });
    }
    if d == 0 {
        return Err(PolytopeError::InvalidArgument("box of dimension zero".into()));
    }
    let corners = (0..1usize << d)
        .map(|mask| Vector::from_fn(d, |i, _| if (mask >> i) & 1 == 0 { left[i] } else { right[i] }))
        .collect();
    ConvexPolytop::from_points(corners, false, tol)
}

/// Random full-dimensional simplex with vertices in `[0,10)^d` (V-rep).
pub fn simplex_rnd<R: Rng>(d: usize, rng: &mut R, tol: Tol) -> Result<ConvexPolytop> {
    if d == 0 {
        return Err(PolytopeError::InvalidArgument("simplex of dimension zero".into()));
    }
    loop {
        let pts: Vec<Vector> = (0..=d)
            .map(|_| Vector::from_fn(d, |_, _| rng.gen_range(0.0..10.0)))
            .collect();
        let full = AffineBasis::from_points(pts.iter(), tol).map_or(false, |b| b.is_full());
        if full {
            return ConvexPolytop::from_points(pts, false, tol);
        }
    }
}

/// Cyclic polytope: the origin plus `n - 1` points `(t, t², …, t^d)` on the
/// moment curve at `t = 1 + k·step`, `k = 1..n`.
pub fn cyclic(d: usize, n: usize, step: f64, tol: Tol) -> Result<ConvexPolytop> {
    if d == 0 || n <= d {
        return Err(PolytopeError::InvalidArgument(format!(
            "cyclic polytope needs more points than dimensions, got n = {n}, d = {d}"
        )));
    }
    if !tol.is_pos(step) {
        return Err(PolytopeError::InvalidArgument(format!("step must be positive, got {step}")));
    }
    let mut pts = vec![Vector::zeros(d)];
    for k in 1..n {
        let t = 1.0 + k as f64 * step;
        pts.push(Vector::from_fn(d, |i, _| t.powi(i as i32 + 1)));
    }
    ConvexPolytop::from_points(pts, false, tol)
}

/// Polyhedral sphere (V-rep), see [`ellipsoid`].
pub fn sphere(center: &Vector, radius: f64, polar_div: usize, azimuth_div: usize, tol: Tol) -> Result<ConvexPolytop> {
    ellipsoid(center, &Vector::from_element(center.len(), radius), polar_div, azimuth_div, tol)
}

/// Points of an ellipsoid on an angular grid (V-rep).
///
/// The azimuth takes `azimuth_div` values in `[0, 2π)`, each of the `d - 2`
/// polar angles `polar_div + 1` values in `[0, π]`. Grid points that
/// coincide (at the poles) are merged.
pub fn ellipsoid(
    center: &Vector,
    semi_axes: &Vector,
    polar_div: usize,
    azimuth_div: usize,
    tol: Tol,
) -> Result<ConvexPolytop> {
    let d = center.len();
    if semi_axes.len() != d {
        return Err(PolytopeError::DimensionMismatch {
            expected: d,
            found: semi_axes.len(),
        });
    }
    if d == 0 || semi_axes.iter().any(|&a| !tol.is_pos(a)) {
        return Err(PolytopeError::InvalidArgument("semi-axes must be positive".into()));
    }
    if d == 1 {
        return ConvexPolytop::from_points(vec![center - semi_axes, center + semi_axes], false, tol);
    }
    if azimuth_div < 3 || (d > 2 && polar_div < 2) {
        return Err(PolytopeError::InvalidArgument(format!(
            "angular grid too coarse: polar_div = {polar_div}, azimuth_div = {azimuth_div}"
        )));
    }

    let n_polar = d - 2;
    let thetas: Vec<f64> = (0..=polar_div).map(|i| PI * i as f64 / polar_div as f64).collect();
    let mut pts = Vec::new();
    for j in 0..azimuth_div {
        let phi = 2.0 * PI * j as f64 / azimuth_div as f64;
        // odometer over the polar angles
        let mut idx = vec![0usize; n_polar];
        loop {
            // x_{d-1} = cos θ1, x_{d-2} = sin θ1 cos θ2, …, (x_0, x_1) = Π sin θ · (cos φ, sin φ)
            let mut unit = Vector::zeros(d);
            let mut sines = 1.0;
            for (k, &ti) in idx.iter().enumerate() {
                let theta = thetas[ti];
                unit[d - 1 - k] = sines * theta.cos();
                sines *= theta.sin();
            }
            unit[0] = sines * phi.cos();
            unit[1] = sines * phi.sin();
            pts.push(center + unit.component_mul(semi_axes));

            let Some(k) = (0..n_polar).rev().find(|&k| idx[k] < polar_div) else {
                break;
            };
            idx[k] += 1;
            for later in &mut idx[k + 1..] {
                *later = 0;
            }
        }
    }
    ConvexPolytop::from_points(pts, false, tol)
}

/// Ball of the ℓ1 norm (cross polytope): `center ± r·e_i` (V-rep).
pub fn ball_1(center: &Vector, r: f64, tol: Tol) -> Result<ConvexPolytop> {
    if !tol.is_pos(r) {
        return Err(PolytopeError::InvalidArgument(format!("radius must be positive, got {r}")));
    }
    let d = center.len();
    let mut pts = Vec::with_capacity(2 * d);
    for i in 0..d {
        let e = unit_vector(d, i) * r;
        pts.push(center + &e);
        pts.push(center - &e);
    }
    ConvexPolytop::from_points(pts, false, tol)
}

/// Ball of the ℓ∞ norm (cube of side `2r`) (V-rep).
pub fn ball_oo(center: &Vector, r: f64, tol: Tol) -> Result<ConvexPolytop> {
    if !tol.is_pos(r) {
        return Err(PolytopeError::InvalidArgument(format!("radius must be positive, got {r}")));
    }
    let one = Vector::from_element(center.len(), r);
    rect_axis_parallel(&(center - &one), &(center + &one), tol)
}
