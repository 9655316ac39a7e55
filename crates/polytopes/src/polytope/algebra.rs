//! Transformations and polytope algebra.
//!
//! Affine maps act on the authoritative representation only: a lattice is
//! remapped vertex by vertex, a V-rep point by point, an H-rep plane by plane.

use std::collections::HashSet;

use nalgebra::DMatrix;
use tracing::debug;

use crate::error::{PolytopeError, Result};
use crate::geom::{HyperPlane, Vector};
use crate::lattice::FaceLattice;

use super::{hrep_to_vrep_naive, ConvexPolytop, Containment, Rep};

fn check_dim(expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(PolytopeError::DimensionMismatch { expected, found })
    }
}

impl ConvexPolytop {
    /// Translate by `s`.
    pub fn shift(&self, s: &Vector) -> Result<ConvexPolytop> {
        check_dim(self.space_dim, s.len())?;
        match self.primary {
            Rep::FaceLattice => Ok(ConvexPolytop::from_face_lattice(
                self.face_lattice()?.vertex_transform(|v| v + s)?,
            )),
            Rep::Vrep => ConvexPolytop::from_points(self.vrep()?.iter().map(|v| v + s).collect(), false, self.tol),
            Rep::Hrep => ConvexPolytop::from_halfspaces(
                self.hrep()?
                    .iter()
                    .map(|hp| HyperPlane {
                        normal: hp.normal.clone(),
                        offset: hp.offset + hp.normal.dot(s),
                    })
                    .collect(),
                self.tol,
            ),
        }
        .map(|p| p.with_strategy(self.strategy))
    }

    /// Apply the orthogonal matrix `m` (`x ↦ m·x`).
    pub fn rotate(&self, m: &DMatrix<f64>) -> Result<ConvexPolytop> {
        check_dim(self.space_dim, m.nrows())?;
        check_dim(self.space_dim, m.ncols())?;
        match self.primary {
            Rep::FaceLattice => Ok(ConvexPolytop::from_face_lattice(
                self.face_lattice()?.vertex_transform(|v| m * v)?,
            )),
            Rep::Vrep => ConvexPolytop::from_points(self.vrep()?.iter().map(|v| m * v).collect(), false, self.tol),
            Rep::Hrep => ConvexPolytop::from_halfspaces(
                self.hrep()?
                    .iter()
                    .map(|hp| HyperPlane {
                        normal: m * &hp.normal,
                        offset: hp.offset,
                    })
                    .collect(),
                self.tol,
            ),
        }
        .map(|p| p.with_strategy(self.strategy))
    }

    /// Homothety with centre `origin` and positive factor `k`.
    pub fn scale(&self, k: f64, origin: &Vector) -> Result<ConvexPolytop> {
        check_dim(self.space_dim, origin.len())?;
        if !self.tol.is_pos(k) {
            return Err(PolytopeError::InvalidArgument(format!("scale factor must be positive, got {k}")));
        }
        let map = |v: &Vector| origin + (v - origin) * k;
        match self.primary {
            Rep::FaceLattice => Ok(ConvexPolytop::from_face_lattice(
                self.face_lattice()?.vertex_transform(map)?,
            )),
            Rep::Vrep => ConvexPolytop::from_points(self.vrep()?.iter().map(map).collect(), false, self.tol),
            Rep::Hrep => ConvexPolytop::from_halfspaces(
                self.hrep()?
                    .iter()
                    .map(|hp| HyperPlane {
                        normal: hp.normal.clone(),
                        offset: k * hp.offset + (1.0 - k) * hp.normal.dot(origin),
                    })
                    .collect(),
                self.tol,
            ),
        }
        .map(|p| p.with_strategy(self.strategy))
    }

    /// Embed into R^`dim` by appending coordinates equal to `value`.
    pub fn lift_up(&self, dim: usize, value: f64) -> Result<ConvexPolytop> {
        if dim <= self.space_dim {
            return Err(PolytopeError::InvalidArgument(format!(
                "cannot lift from {} to {dim} dimensions",
                self.space_dim
            )));
        }
        let n = self.space_dim;
        let lifted = self
            .vrep()?
            .iter()
            .map(|v| Vector::from_fn(dim, |i, _| if i < n { v[i] } else { value }))
            .collect();
        ConvexPolytop::from_points(lifted, false, self.tol)
    }

    /// Polar body `{y : x·y <= 1 for all x in P}`.
    ///
    /// The origin must lie strictly inside.
    pub fn polar(&self) -> Result<ConvexPolytop> {
        let origin = Vector::zeros(self.space_dim);
        if self.contains(&origin)? != Containment::Inside {
            return Err(PolytopeError::OriginNotInterior);
        }
        let polar = match self.primary {
            Rep::FaceLattice => ConvexPolytop::from_face_lattice(polar_lattice(self.face_lattice()?)?),
            Rep::Vrep => ConvexPolytop::from_halfspaces(
                self.vrep()?
                    .iter()
                    .map(|v| HyperPlane::new(v.clone(), 1.0))
                    .collect::<Result<Vec<_>>>()?,
                self.tol,
            )?,
            Rep::Hrep => ConvexPolytop::from_points(
                self.hrep()?.iter().map(|hp| &hp.normal / hp.offset).collect(),
                true,
                self.tol,
            )?,
        };
        Ok(polar.with_strategy(self.strategy))
    }

    /// Intersection with the hyperplane of `hp` (its boundary, not the
    /// half-space), as a polytope in the same space. `None` if they miss.
    pub fn section_by_hyperplane(&self, hp: &HyperPlane) -> Result<Option<ConvexPolytop>> {
        check_dim(self.space_dim, hp.space_dim())?;
        let mut hps = self.hrep()?.to_vec();
        hps.push(hp.clone());
        hps.push(hp.flipped());
        match hrep_to_vrep_naive(&hps, self.tol) {
            Ok(vs) => Ok(Some(ConvexPolytop::from_points(vs, false, self.tol)?)),
            Err(PolytopeError::Infeasible) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Face lattice of the polar body: facets become vertices and inclusion is
/// reversed.
fn polar_lattice(fl: &FaceLattice) -> Result<FaceLattice> {
    let d = fl.dim();
    let hps = super::hrep_of_lattice(fl)?;
    let facets = fl.level(d - 1);
    let points: Vec<Vector> = hps.iter().map(|hp| &hp.normal / hp.offset).collect();

    let facet_sets: Vec<HashSet<usize>> = facets
        .iter()
        .map(|&f| fl.node(f).vertices.iter().copied().collect())
        .collect();
    // a face of dimension j becomes the set of facets containing it (dimension d-1-j)
    let mut levels: Vec<Vec<Vec<usize>>> = vec![Vec::new(); d + 1];
    for j in 0..d - 1 {
        levels[d - 1 - j] = fl
            .level(j)
            .iter()
            .map(|&id| {
                let vs = &fl.node(id).vertices;
                (0..facets.len())
                    .filter(|&f| vs.iter().all(|v| facet_sets[f].contains(v)))
                    .collect()
            })
            .collect();
    }
    levels[d] = vec![(0..facets.len()).collect()];
    debug!(vertices = points.len(), "polar face lattice");
    FaceLattice::from_levels(points, &levels, fl.tol())
}

/// `P + Q`: hull of all pairwise vertex sums.
pub fn minkowski_sum(p: &ConvexPolytop, q: &ConvexPolytop) -> Result<ConvexPolytop> {
    check_dim(p.space_dim(), q.space_dim())?;
    let (a, b) = (p.vrep()?, q.vrep()?);
    let mut sums = Vec::with_capacity(a.len() * b.len());
    for x in a {
        for y in b {
            sums.push(x + y);
        }
    }
    ConvexPolytop::from_points(sums, true, p.tol())
}

/// Geometric difference `F ⊖ G = {x : x + G ⊆ F}`.
///
/// Every facet half-space of `F` is moved inwards by the support value of
/// `G` in its normal direction. `None` if the result is empty or not
/// full-dimensional.
pub fn minkowski_diff(f: &ConvexPolytop, g: &ConvexPolytop) -> Result<Option<ConvexPolytop>> {
    check_dim(f.space_dim(), g.space_dim())?;
    let gv = g.vrep()?;
    let hps: Vec<HyperPlane> = f
        .hrep()?
        .iter()
        .map(|hp| {
            let support = gv.iter().map(|v| hp.normal.dot(v)).fold(f64::NEG_INFINITY, f64::max);
            HyperPlane {
                normal: hp.normal.clone(),
                offset: hp.offset - support,
            }
        })
        .collect();
    let vs = match hrep_to_vrep_naive(&hps, f.tol()) {
        Ok(vs) => vs,
        Err(PolytopeError::Infeasible) => return Ok(None),
        Err(e) => return Err(e),
    };
    if vs.len() <= f.space_dim() {
        return Ok(None);
    }
    ConvexPolytop::from_halfspaces_and_vertices(hps, vs, f.tol()).map(Some)
}
