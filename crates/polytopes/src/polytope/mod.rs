//! Convex polytopes with three interchangeable representations.
//!
//! Purpose
//! - `ConvexPolytop` holds a vertex set (V-rep), a half-space set (H-rep) and
//!   a face lattice. Whichever was given at construction is authoritative;
//!   the others are derived on first access and cached.
//!
//! Why this design
//! - Each derived view sits in its own `OnceCell`: computed at most once,
//!   never invalidated (polytopes are immutable; transformations return new
//!   ones).
//! - V → lattice runs Gift-Wrapping; lattice → H takes the affine bases of
//!   the facet nodes; H → V is a pluggable [`HrepToVrep`] strategy.
//!
//! Conventions
//! - Half-spaces read `normal·x <= offset` with unit normals.
//! - Vertex lists are lexicographically sorted and free of duplicates.

mod algebra;
mod convert;
pub mod special;

use std::cell::OnceCell;

use tracing::debug;

use crate::error::{PolytopeError, Result};
use crate::geom::{centroid, dedup_points, HyperPlane, Tol, Vector};
use crate::gift_wrapping::{wrap_face_lattice, wrap_vrep};
use crate::lattice::FaceLattice;

pub use algebra::{minkowski_diff, minkowski_sum};
pub use convert::{hrep_to_vrep_naive, hrep_to_vrep_walk};

/// Which representation a polytope was constructed from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rep {
    Vrep,
    Hrep,
    FaceLattice,
}

/// H → V conversion strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HrepToVrep {
    /// Exhaustive `d`-subset intersection.
    #[default]
    Naive,
    /// Edge walk from one vertex.
    Walk,
}

impl HrepToVrep {
    pub fn convert(self, hps: &[HyperPlane], tol: Tol) -> Result<Vec<Vector>> {
        match self {
            HrepToVrep::Naive => hrep_to_vrep_naive(hps, tol),
            HrepToVrep::Walk => hrep_to_vrep_walk(hps, tol),
        }
    }
}

/// Position of a point relative to a polytope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Containment {
    Inside,
    Border,
    Outside,
}

#[derive(Clone, Debug)]
pub struct ConvexPolytop {
    space_dim: usize,
    primary: Rep,
    tol: Tol,
    strategy: HrepToVrep,
    vrep: OnceCell<Vec<Vector>>,
    hrep: OnceCell<Vec<HyperPlane>>,
    fl: OnceCell<FaceLattice>,
}

impl ConvexPolytop {
    fn empty(space_dim: usize, primary: Rep, tol: Tol) -> Self {
        Self {
            space_dim,
            primary,
            tol,
            strategy: HrepToVrep::default(),
            vrep: OnceCell::new(),
            hrep: OnceCell::new(),
            fl: OnceCell::new(),
        }
    }

    /// Polytope spanned by `points`.
    ///
    /// With `convexify` the hull is computed and only its vertices are kept;
    /// otherwise the points are trusted to be the vertices (duplicates are
    /// still merged).
    pub fn from_points(points: Vec<Vector>, convexify: bool, tol: Tol) -> Result<Self> {
        let d = points.first().ok_or(PolytopeError::EmptySwarm)?.len();
        if let Some(bad) = points.iter().find(|p| p.len() != d) {
            return Err(PolytopeError::DimensionMismatch {
                expected: d,
                found: bad.len(),
            });
        }
        let vrep = if convexify {
            wrap_vrep(&points, tol)?
        } else {
            let mut points = points;
            dedup_points(&mut points, tol);
            points
        };
        let p = Self::empty(d, Rep::Vrep, tol);
        let _ = p.vrep.set(vrep);
        Ok(p)
    }

    /// Intersection of the closed half-spaces `hps` (assumed bounded).
    pub fn from_halfspaces(hps: Vec<HyperPlane>, tol: Tol) -> Result<Self> {
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
        let p = Self::empty(d, Rep::Hrep, tol);
        let _ = p.hrep.set(hps);
        Ok(p)
    }

    /// Polytope given by its face lattice; tolerance is the lattice's.
    pub fn from_face_lattice(fl: FaceLattice) -> Self {
        let p = Self::empty(fl.space_dim(), Rep::FaceLattice, fl.tol());
        let _ = p.fl.set(fl);
        p
    }

    /// H-rep primary with a V-rep already known to match it.
    pub(crate) fn from_halfspaces_and_vertices(hps: Vec<HyperPlane>, vertices: Vec<Vector>, tol: Tol) -> Result<Self> {
        let p = Self::from_halfspaces(hps, tol)?;
        let _ = p.vrep.set(vertices);
        Ok(p)
    }

    /// Choose how vertices are derived from half-spaces.
    pub fn with_strategy(mut self, strategy: HrepToVrep) -> Self {
        self.strategy = strategy;
        self
    }

    #[inline]
    pub fn space_dim(&self) -> usize {
        self.space_dim
    }

    #[inline]
    pub fn tol(&self) -> Tol {
        self.tol
    }

    #[inline]
    pub fn primary(&self) -> Rep {
        self.primary
    }

    #[inline]
    pub fn is_vrep(&self) -> bool {
        self.vrep.get().is_some()
    }

    #[inline]
    pub fn is_hrep(&self) -> bool {
        self.hrep.get().is_some()
    }

    #[inline]
    pub fn is_flrep(&self) -> bool {
        self.fl.get().is_some()
    }

    /// Vertices, lexicographically sorted.
    pub fn vrep(&self) -> Result<&[Vector]> {
        if let Some(v) = self.vrep.get() {
            return Ok(v.as_slice());
        }
        let v = match self.primary {
            Rep::Hrep => self.strategy.convert(self.hrep()?, self.tol)?,
            _ => self.face_lattice()?.points().to_vec(),
        };
        debug!(vertices = v.len(), "derived V-rep");
        Ok(self.vrep.get_or_init(|| v).as_slice())
    }

    /// Facet half-spaces with outer unit normals.
    pub fn hrep(&self) -> Result<&[HyperPlane]> {
        if let Some(h) = self.hrep.get() {
            return Ok(h.as_slice());
        }
        let h = hrep_of_lattice(self.face_lattice()?)?;
        debug!(halfspaces = h.len(), "derived H-rep");
        Ok(self.hrep.get_or_init(|| h).as_slice())
    }

    pub fn face_lattice(&self) -> Result<&FaceLattice> {
        if let Some(fl) = self.fl.get() {
            return Ok(fl);
        }
        let fl = wrap_face_lattice(self.vrep()?, self.tol)?;
        debug!(f_vector = ?fl.f_vector(), "derived face lattice");
        Ok(self.fl.get_or_init(|| fl))
    }

    /// Dimension of the polytope itself (at most `space_dim`).
    pub fn polytop_dim(&self) -> Result<usize> {
        Ok(self.face_lattice()?.dim())
    }

    pub fn f_vector(&self) -> Result<Vec<usize>> {
        Ok(self.face_lattice()?.f_vector())
    }

    /// A point in the relative interior.
    pub fn inner_point(&self) -> Result<Vector> {
        if let Some(fl) = self.fl.get() {
            return Ok(fl.node(fl.top()).inner_point.clone());
        }
        centroid(self.vrep()?).ok_or(PolytopeError::EmptySwarm)
    }

    /// Where `x` lies with respect to the polytope (via the H-rep).
    pub fn contains(&self, x: &Vector) -> Result<Containment> {
        if x.len() != self.space_dim {
            return Err(PolytopeError::DimensionMismatch {
                expected: self.space_dim,
                found: x.len(),
            });
        }
        let mut border = false;
        for hp in self.hrep()? {
            let e = hp.eval(x);
            if self.tol.is_pos(e) {
                return Ok(Containment::Outside);
            }
            if !self.tol.is_neg(e) {
                border = true;
            }
        }
        Ok(if border { Containment::Border } else { Containment::Inside })
    }

    #[inline]
    pub fn contains_non_strict(&self, x: &Vector) -> Result<bool> {
        Ok(self.contains(x)? != Containment::Outside)
    }

    #[inline]
    pub fn contains_strict(&self, x: &Vector) -> Result<bool> {
        Ok(self.contains(x)? == Containment::Inside)
    }

    /// Smallest distance between two distinct vertices; `None` for a point.
    pub fn min_dist_between_vertices(&self) -> Result<Option<f64>> {
        let vs = self.vrep()?;
        let mut best: Option<f64> = None;
        for (i, a) in vs.iter().enumerate() {
            for b in &vs[i + 1..] {
                let dist = (a - b).norm();
                if best.map_or(true, |m| dist < m) {
                    best = Some(dist);
                }
            }
        }
        Ok(best)
    }
}

/// Facet half-spaces of a full-dimensional lattice, oriented away from the
/// top node's inner point.
pub fn hrep_of_lattice(fl: &FaceLattice) -> Result<Vec<HyperPlane>> {
    let (d, space) = (fl.dim(), fl.space_dim());
    if d != space || d == 0 {
        return Err(PolytopeError::NotFullDimensional { span: d, space });
    }
    let inner = &fl.node(fl.top()).inner_point;
    fl.level(d - 1)
        .iter()
        .map(|&id| HyperPlane::from_affine_basis(&fl.node(id).aff_basis, Some(inner), fl.tol()))
        .collect()
}

#[cfg(test)]
mod tests_special;
