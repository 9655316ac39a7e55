//! Dimension-generic convex hull by recursive Gift-Wrapping.
//!
//! Purpose
//! - Compute the hull of a point swarm in R^d as a [`SubCp`] tree: facets,
//!   their ridges, and so on down to vertices, plus the ridge incidence.
//!
//! Algorithm
//! - A supporting hyperplane through `d` swarm points is found by rotating
//!   `-e_1` around the lexicographically smallest point.
//! - The facet in that hyperplane is wrapped recursively in `d-1`
//!   dimensions, after projecting the in-plane points to the facet's own
//!   coordinates. Dimensions 2 and 1, and swarms of exactly `d+1` points,
//!   are base cases.
//! - Each ridge that has only one facet so far is rolled over: the facet's
//!   hyperplane turns around the ridge until it hits the swarm, giving the
//!   neighbouring facet. The walk ends when every ridge has two facets.
//! - Swarms that do not span R^d are wrapped inside their affine hull and
//!   lifted back.
//!
//! References
//! - Chand, Kapur: “An algorithm for convex polytopes”, JACM 17 (1970).
//! - Swart: “Finding the convex hull facet by facet”, J. Algorithms 6 (1985).

mod engine;

use std::collections::{BTreeSet, HashMap};
use std::hash::{Hash, Hasher};

use tracing::{debug, warn};

use crate::error::{PolytopeError, Result};
use crate::geom::{centroid, dedup_points, AffineBasis, Tol, Vector};
use crate::lattice::{FaceLattice, LatticeBuilder, NodeId};
use crate::subcp::{FaceKey, Incidence, PointRef, SubCp, SubPoint};

use engine::Wrapper;

/// Facet of a hull in ambient coordinates.
///
/// For a hull that does not fill its space the normal lies inside the
/// hull's affine span. Two facets are equal when their vertex sets and
/// normals agree within the coarser of their tolerances. The hash only
/// covers the vertex count and dimension, so it agrees with that equality.
#[derive(Clone, Debug)]
pub struct Facet {
    /// Lexicographically sorted.
    pub vertices: Vec<Vector>,
    /// Unit outer normal.
    pub normal: Vector,
    tol: Tol,
}

/// Edge of a hull, `a` lexicographically before `b`. Compared like [`Facet`].
#[derive(Clone, Debug)]
pub struct Edge {
    pub a: Vector,
    pub b: Vector,
    tol: Tol,
}

#[inline]
fn coarser(a: Tol, b: Tol) -> Tol {
    Tol::new(a.eps.max(b.eps))
}

impl PartialEq for Facet {
    fn eq(&self, other: &Self) -> bool {
        let tol = coarser(self.tol, other.tol);
        self.vertices.len() == other.vertices.len()
            && self.vertices.iter().zip(&other.vertices).all(|(u, v)| tol.vec_eq(u, v))
            && tol.vec_eq(&self.normal, &other.normal)
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        let tol = coarser(self.tol, other.tol);
        tol.vec_eq(&self.a, &other.a) && tol.vec_eq(&self.b, &other.b)
    }
}

impl Eq for Facet {}
impl Eq for Edge {}

impl Hash for Facet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.vertices.len().hash(state);
        self.normal.len().hash(state);
    }
}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.a.len().hash(state);
    }
}

/// Hull of a swarm.
#[derive(Clone, Debug)]
pub struct GiftWrapping {
    /// Deduplicated swarm in lexicographic order; point ids index it.
    points: Vec<Vector>,
    polytope: SubCp,
    space_dim: usize,
    tol: Tol,
}

impl GiftWrapping {
    /// Wrap `swarm`.
    ///
    /// Duplicates (within `tol`) are merged first. Errors on an empty swarm,
    /// on mixed dimensions, and when a numeric invariant of the wrapping
    /// breaks down.
    pub fn new(swarm: &[Vector], tol: Tol) -> Result<Self> {
        let space_dim = swarm.first().ok_or(PolytopeError::EmptySwarm)?.len();
        if let Some(bad) = swarm.iter().find(|p| p.len() != space_dim) {
            return Err(PolytopeError::DimensionMismatch {
                expected: space_dim,
                found: bad.len(),
            });
        }
        let mut points = swarm.to_vec();
        dedup_points(&mut points, tol);
        let roots: Vec<PointRef> = points
            .iter()
            .enumerate()
            .map(|(i, p)| SubPoint::root(i, p.clone()))
            .collect();

        let span = AffineBasis::from_points(points.iter(), tol).ok_or(PolytopeError::EmptySwarm)?;
        let polytope = if span.sub_dim() == 0 {
            SubCp::vertex(roots[0].clone())
        } else if span.sub_dim() < space_dim {
            warn!(span = span.sub_dim(), space = space_dim, "flat swarm, wrapping inside its affine hull");
            let projected = roots.iter().map(|p| SubPoint::project(p, &span)).collect();
            Wrapper::wrap(projected, tol)?
                .to_previous_space()
                .ok_or(PolytopeError::Degenerate {
                    context: "flat hull could not be lifted",
                })?
        } else {
            Wrapper::wrap(roots, tol)?
        };
        debug!(
            points = points.len(),
            vertices = polytope.vertices().len(),
            dim = polytope.dim(),
            "hull wrapped"
        );
        Ok(Self {
            points,
            polytope,
            space_dim,
            tol,
        })
    }

    /// Root of the face tree.
    #[inline]
    pub fn polytope(&self) -> &SubCp {
        &self.polytope
    }

    /// Deduplicated input swarm; `SubPoint::id`s index into it.
    #[inline]
    pub fn points(&self) -> &[Vector] {
        &self.points
    }

    #[inline]
    pub fn tol(&self) -> Tol {
        self.tol
    }

    /// Dimension of the ambient space.
    #[inline]
    pub fn space_dim(&self) -> usize {
        self.space_dim
    }

    /// Dimension of the hull.
    #[inline]
    pub fn polytop_dim(&self) -> usize {
        self.polytope.dim()
    }

    /// Hull vertices, lexicographically sorted.
    pub fn vertices(&self) -> Vec<Vector> {
        self.polytope.vertices().iter().map(|p| self.points[p.id].clone()).collect()
    }

    /// Ridge → pair of facet indices (into [`Self::facets`]); present for
    /// hulls that are not simplices and have dimension at least three.
    pub fn ridge_incidence(&self) -> Option<&Incidence> {
        self.polytope.incidence()
    }

    /// Facets with unit outer normals.
    pub fn facets(&self) -> Vec<Facet> {
        if self.polytope.dim() == 0 {
            return Vec::new();
        }
        let all = self.vertices();
        let Some(center) = centroid(all.iter()) else {
            return Vec::new();
        };
        self.polytope
            .faces()
            .iter()
            .map(|f| {
                let vertices: Vec<Vector> = f.vertices().iter().map(|p| self.points[p.id].clone()).collect();
                let normal = match f.normal() {
                    Some(n) => n.clone(),
                    None => self.relative_normal(&vertices, &center),
                };
                Facet {
                    vertices,
                    normal,
                    tol: self.tol,
                }
            })
            .collect()
    }

    /// Outer normal of a facet within the hull's own span.
    fn relative_normal(&self, vertices: &[Vector], center: &Vector) -> Vector {
        let w = &vertices[0] - center;
        let r = match AffineBasis::from_points(vertices.iter(), self.tol) {
            Some(b) => b.lin.residual(&w),
            None => w,
        };
        let len = r.norm();
        if len > 0.0 {
            r / len
        } else {
            r
        }
    }

    /// All edges of the hull.
    pub fn edges(&self) -> Vec<Edge> {
        let levels = self.face_levels();
        levels.get(1).map_or_else(Vec::new, |edges| {
            edges
                .iter()
                .map(|e| {
                    let vs = e.vertices();
                    Edge {
                        a: self.points[vs[0].id].clone(),
                        b: self.points[vs[1].id].clone(),
                        tol: self.tol,
                    }
                })
                .collect()
        })
    }

    /// Distinct faces of each dimension, `k`-faces at index `k`.
    pub fn face_levels(&self) -> Vec<Vec<SubCp>> {
        let d = self.polytope.dim();
        let mut levels: Vec<Vec<SubCp>> = vec![Vec::new(); d + 1];
        levels[d].push(self.polytope.clone());
        for k in (1..=d).rev() {
            let below: BTreeSet<SubCp> = levels[k].iter().flat_map(|f| f.faces().into_owned()).collect();
            levels[k - 1] = below.into_iter().collect();
        }
        levels
    }

    /// Face lattice of the hull; its points are the hull vertices.
    pub fn face_lattice(&self) -> Result<FaceLattice> {
        let verts = self.polytope.vertices();
        let index: HashMap<usize, usize> = verts.iter().enumerate().map(|(i, p)| (p.id, i)).collect();
        let points = verts.iter().map(|p| self.points[p.id].clone()).collect();
        let mut builder = LatticeBuilder::new(points, self.tol);
        let missing = || PolytopeError::Degenerate {
            context: "face tree references an unknown face",
        };

        let mut ids: HashMap<FaceKey, NodeId> = HashMap::new();
        for (k, level) in self.face_levels().iter().enumerate() {
            for face in level {
                let id = if k == 0 {
                    let v = index.get(&face.vertices()[0].id).copied().ok_or_else(missing)?;
                    builder.vertex(v)
                } else {
                    let children = face
                        .faces()
                        .iter()
                        .map(|c| ids.get(&c.key()).copied().ok_or_else(missing))
                        .collect::<Result<Vec<_>>>()?;
                    builder.face(&children)?
                };
                ids.insert(face.key(), id);
            }
        }
        let top = ids.get(&self.polytope.key()).copied().ok_or_else(missing)?;
        Ok(builder.finish(top))
    }
}

/// Hull vertices of `swarm`, lexicographically sorted.
pub fn wrap_vrep(swarm: &[Vector], tol: Tol) -> Result<Vec<Vector>> {
    Ok(GiftWrapping::new(swarm, tol)?.vertices())
}

/// Face lattice of the hull of `swarm`.
pub fn wrap_face_lattice(swarm: &[Vector], tol: Tol) -> Result<FaceLattice> {
    GiftWrapping::new(swarm, tol)?.face_lattice()
}

#[cfg(test)]
mod tests;
