//! H → V conversions.
//!
//! - `hrep_to_vrep_naive`: every `d`-subset of the half-spaces is intersected
//!   and the feasible intersection points kept. `C(m, d)` linear solves; the
//!   reference algorithm.
//! - `hrep_to_vrep_walk`: one vertex by the same search, then a breadth-first
//!   walk along edges. Each step costs `O(m)` per incident edge candidate.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::error::{PolytopeError, Result};
use crate::geom::{dedup_points, solve_square, Combinations, HyperPlane, LinearBasis, Tol, Vector};

fn space_dim_of(hps: &[HyperPlane]) -> Result<usize> {
    let d = hps
        .first()
        .ok_or_else(|| PolytopeError::InvalidArgument("no half-spaces given".into()))?
        .space_dim();
    if let Some(bad) = hps.iter().find(|h| h.space_dim() != d) {
        return Err(PolytopeError::DimensionMismatch {
            expected: d,
            found: bad.space_dim(),
        });
    }
    if hps.len() < d {
        // fewer than d constraints never pin down a point
        return Err(PolytopeError::Unbounded);
    }
    Ok(d)
}

/// Intersection point of the hyperplanes `idx`, if the system is regular.
fn intersect(hps: &[HyperPlane], idx: &[usize], tol: Tol) -> Option<Vector> {
    let rows: Vec<&Vector> = idx.iter().map(|&i| &hps[i].normal).collect();
    let rhs: Vec<f64> = idx.iter().map(|&i| hps[i].offset).collect();
    solve_square(&rows, &rhs, tol)
}

#[inline]
fn feasible(hps: &[HyperPlane], x: &Vector, tol: Tol) -> bool {
    !hps.iter().any(|h| h.contains_positive(x, tol))
}

/// Vertices of `{x : n_i·x <= c_i}` by exhaustive `d`-subset search.
///
/// Singular subsets (parallel or dependent normals) are skipped. Errors
/// with `Singular` if every subset is singular and with `Infeasible` if no
/// intersection point satisfies all half-spaces.
pub fn hrep_to_vrep_naive(hps: &[HyperPlane], tol: Tol) -> Result<Vec<Vector>> {
    let d = space_dim_of(hps)?;
    let mut out = Vec::new();
    let mut regular = 0usize;
    let mut singular = 0usize;
    for idx in Combinations::new(hps.len(), d) {
        let Some(x) = intersect(hps, &idx, tol) else {
            trace!(?idx, "singular combination skipped");
            singular += 1;
            continue;
        };
        regular += 1;
        if feasible(hps, &x, tol) {
            out.push(x);
        }
    }
    if regular == 0 {
        return Err(PolytopeError::Singular {
            context: "every d-subset of the half-spaces is singular",
        });
    }
    dedup_points(&mut out, tol);
    if out.is_empty() {
        return Err(PolytopeError::Infeasible);
    }
    debug!(halfspaces = hps.len(), singular, vertices = out.len(), "naive H to V");
    Ok(out)
}

/// First feasible intersection point in combination order.
fn first_vertex(hps: &[HyperPlane], d: usize, tol: Tol) -> Result<Vector> {
    let mut regular = false;
    for idx in Combinations::new(hps.len(), d) {
        if let Some(x) = intersect(hps, &idx, tol) {
            regular = true;
            if feasible(hps, &x, tol) {
                return Ok(x);
            }
        }
    }
    if regular {
        Err(PolytopeError::Infeasible)
    } else {
        Err(PolytopeError::Singular {
            context: "every d-subset of the half-spaces is singular",
        })
    }
}

/// Direction of the edge cut out by the hyperplanes `edge` (indices into
/// `hps`), pointing into the polytope from `active`'s common vertex. `None`
/// if the hyperplanes are dependent or the line is not an edge there.
fn edge_direction(hps: &[HyperPlane], edge: &[usize], active: &[usize], d: usize, tol: Tol) -> Option<Vector> {
    let co_edge = LinearBasis::from_vectors(d, edge.iter().map(|&i| &hps[i].normal), tol);
    if co_edge.sub_dim() + 1 != d {
        return None;
    }
    let mut v = co_edge.orthonormal_vector()?;
    let mut oriented = false;
    for &i in active {
        let dot = v.dot(&hps[i].normal);
        if tol.is_zero(dot) {
            continue;
        }
        if !oriented {
            if tol.is_pos(dot) {
                v = -v;
            }
            oriented = true;
        } else if tol.is_pos(dot) {
            return None;
        }
    }
    Some(v)
}

/// Vertices of `{x : n_i·x <= c_i}` by walking the edge graph.
///
/// Same contract as [`hrep_to_vrep_naive`]; additionally errors with
/// `Unbounded` when an edge leaves the body without being blocked.
pub fn hrep_to_vrep_walk(hps: &[HyperPlane], tol: Tol) -> Result<Vec<Vector>> {
    let d = space_dim_of(hps)?;
    if d == 1 {
        return hrep_to_vrep_naive(hps, tol);
    }
    let active = |z: &Vector| -> Vec<usize> { (0..hps.len()).filter(|&i| hps[i].contains(z, tol)).collect() };

    let start = first_vertex(hps, d, tol)?;
    let mut found = vec![start.clone()];
    let mut queue = VecDeque::new();
    queue.push_back((active(&start), start));

    while let Some((hz, z)) = queue.pop_front() {
        for pick in Combinations::new(hz.len(), d - 1) {
            let edge: Vec<usize> = pick.iter().map(|&j| hz[j]).collect();
            let Some(v) = edge_direction(hps, &edge, &hz, d, tol) else {
                continue;
            };
            let mut t_min: Option<f64> = None;
            for h in hps {
                let den = h.normal.dot(&v);
                if tol.is_zero(den) {
                    continue;
                }
                let t = (h.offset - h.normal.dot(&z)) / den;
                if tol.is_pos(t) && t_min.map_or(true, |m| t < m) {
                    t_min = Some(t);
                }
            }
            let t = t_min.ok_or(PolytopeError::Unbounded)?;
            let next = &z + &v * t;
            if found.iter().any(|p| tol.vec_eq(p, &next)) {
                continue;
            }
            trace!(step = t, "new vertex along edge");
            found.push(next.clone());
            queue.push_back((active(&next), next));
        }
    }
    dedup_points(&mut found, tol);
    debug!(halfspaces = hps.len(), vertices = found.len(), "walk H to V");
    Ok(found)
}
