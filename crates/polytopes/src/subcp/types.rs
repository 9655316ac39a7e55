use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::error::{PolytopeError, Result};
use crate::geom::{AffineBasis, Combinations, Tol, Vector};

use super::planar::convex_hull_ccw;
use super::point::{PointRef, SubPoint};

/// Order-independent identity of a face: its dimension and sorted vertex ids.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceKey {
    pub dim: usize,
    pub ids: Vec<usize>,
}

/// Ridge → the two facets (indices into the owner's face list) sharing it.
pub type Incidence = BTreeMap<FaceKey, (usize, usize)>;

/// `d+1` affinely independent vertices; faces are all `d`-subsets.
#[derive(Clone, Debug)]
pub struct SubSimplex {
    pub vertices: Vec<PointRef>,
    pub normal: Option<Vector>,
}

/// General polytope with an explicit facet list and ridge incidence.
#[derive(Clone, Debug)]
pub struct SubNonSimplex {
    pub dim: usize,
    pub vertices: Vec<PointRef>,
    pub faces: Vec<SubCp>,
    pub incidence: Incidence,
    pub normal: Option<Vector>,
}

/// Convex polygon. `cycle` is the boundary order, `faces` its edges in that order.
#[derive(Clone, Debug)]
pub struct SubTwoDimensional {
    pub cycle: Vec<PointRef>,
    pub vertices: Vec<PointRef>,
    pub faces: Vec<SubCp>,
    pub normal: Option<Vector>,
}

/// Segment between two vertices.
#[derive(Clone, Debug)]
pub struct SubEdge {
    pub vertices: Vec<PointRef>,
    pub faces: Vec<SubCp>,
    pub normal: Option<Vector>,
}

#[derive(Clone, Debug)]
pub struct SubVertex {
    pub vertex: PointRef,
    pub normal: Option<Vector>,
}

/// A face of the hull under construction, at any recursion level.
///
/// Equality, hashing and ordering look only at the dimension and the vertex
/// set; two faces with the same vertices but different internal structure
/// compare equal.
#[derive(Clone, Debug)]
pub enum SubCp {
    Simplex(SubSimplex),
    NonSimplex(SubNonSimplex),
    TwoDimensional(SubTwoDimensional),
    OneDimensional(SubEdge),
    ZeroDimensional(SubVertex),
}

fn sorted_by_id(mut vs: Vec<PointRef>) -> Vec<PointRef> {
    vs.sort_by_key(|p| p.id);
    vs.dedup_by_key(|p| p.id);
    vs
}

impl SubCp {
    #[inline]
    pub fn vertex(p: PointRef) -> Self {
        SubCp::ZeroDimensional(SubVertex {
            vertex: p,
            normal: None,
        })
    }

    pub fn edge(a: PointRef, b: PointRef) -> Self {
        let vertices = sorted_by_id(vec![a, b]);
        let faces = vertices.iter().map(|p| SubCp::vertex(Rc::clone(p))).collect();
        SubCp::OneDimensional(SubEdge {
            vertices,
            faces,
            normal: None,
        })
    }

    /// Simplex on the given (affinely independent) vertices.
    ///
    /// One vertex gives a `ZeroDimensional`, two give a `OneDimensional`.
    pub fn simplex(vs: Vec<PointRef>) -> Self {
        let vertices = sorted_by_id(vs);
        debug_assert!(!vertices.is_empty());
        match vertices.len() {
            1 => SubCp::vertex(Rc::clone(&vertices[0])),
            2 => SubCp::edge(Rc::clone(&vertices[0]), Rc::clone(&vertices[1])),
            _ => SubCp::Simplex(SubSimplex {
                vertices,
                normal: None,
            }),
        }
    }

    /// Convex polygon of 2-D points (planar hull).
    pub fn planar(points: &[PointRef], tol: Tol) -> Result<Self> {
        debug_assert!(points.iter().all(|p| p.space_dim() == 2));
        let cycle = convex_hull_ccw(points, tol);
        if cycle.len() < 3 {
            return Err(PolytopeError::Degenerate {
                context: "planar swarm is collinear",
            });
        }
        Ok(Self::polygon(cycle))
    }

    fn polygon(cycle: Vec<PointRef>) -> Self {
        let n = cycle.len();
        let faces = (0..n)
            .map(|i| SubCp::edge(Rc::clone(&cycle[i]), Rc::clone(&cycle[(i + 1) % n])))
            .collect();
        SubCp::TwoDimensional(SubTwoDimensional {
            vertices: sorted_by_id(cycle.clone()),
            cycle,
            faces,
            normal: None,
        })
    }

    /// Polytope assembled from its facets.
    pub fn non_simplex(faces: Vec<SubCp>, incidence: Incidence) -> Self {
        let dim = faces.first().map_or(0, |f| f.dim() + 1);
        let vertices = sorted_by_id(faces.iter().flat_map(|f| f.vertices().iter().cloned()).collect());
        SubCp::NonSimplex(SubNonSimplex {
            dim,
            vertices,
            faces,
            incidence,
            normal: None,
        })
    }

    pub fn dim(&self) -> usize {
        match self {
            SubCp::Simplex(s) => s.vertices.len() - 1,
            SubCp::NonSimplex(s) => s.dim,
            SubCp::TwoDimensional(_) => 2,
            SubCp::OneDimensional(_) => 1,
            SubCp::ZeroDimensional(_) => 0,
        }
    }

    #[inline]
    pub fn space_dim(&self) -> usize {
        self.vertices()[0].space_dim()
    }

    /// Vertices sorted by id.
    pub fn vertices(&self) -> &[PointRef] {
        match self {
            SubCp::Simplex(s) => &s.vertices,
            SubCp::NonSimplex(s) => &s.vertices,
            SubCp::TwoDimensional(s) => &s.vertices,
            SubCp::OneDimensional(s) => &s.vertices,
            SubCp::ZeroDimensional(s) => std::slice::from_ref(&s.vertex),
        }
    }

    pub fn contains_vertex(&self, id: usize) -> bool {
        self.vertices().binary_search_by_key(&id, |p| p.id).is_ok()
    }

    pub fn key(&self) -> FaceKey {
        FaceKey {
            dim: self.dim(),
            ids: self.vertices().iter().map(|p| p.id).collect(),
        }
    }

    /// Faces one dimension down. Computed on demand for simplices.
    pub fn faces(&self) -> Cow<'_, [SubCp]> {
        match self {
            SubCp::Simplex(s) => {
                let k = s.vertices.len() - 1;
                let faces = Combinations::new(s.vertices.len(), k)
                    .map(|idx| SubCp::simplex(idx.into_iter().map(|i| Rc::clone(&s.vertices[i])).collect()))
                    .collect::<Vec<_>>();
                Cow::Owned(faces)
            }
            SubCp::NonSimplex(s) => Cow::Borrowed(&s.faces),
            SubCp::TwoDimensional(s) => Cow::Borrowed(&s.faces),
            SubCp::OneDimensional(s) => Cow::Borrowed(&s.faces),
            SubCp::ZeroDimensional(_) => Cow::Borrowed(&[]),
        }
    }

    /// Ridge incidence, kept by polytopes assembled through wrapping.
    pub fn incidence(&self) -> Option<&Incidence> {
        match self {
            SubCp::NonSimplex(s) => Some(&s.incidence),
            _ => None,
        }
    }

    pub fn normal(&self) -> Option<&Vector> {
        match self {
            SubCp::Simplex(s) => s.normal.as_ref(),
            SubCp::NonSimplex(s) => s.normal.as_ref(),
            SubCp::TwoDimensional(s) => s.normal.as_ref(),
            SubCp::OneDimensional(s) => s.normal.as_ref(),
            SubCp::ZeroDimensional(s) => s.normal.as_ref(),
        }
    }

    pub fn set_normal(&mut self, n: Vector) {
        let slot = match self {
            SubCp::Simplex(s) => &mut s.normal,
            SubCp::NonSimplex(s) => &mut s.normal,
            SubCp::TwoDimensional(s) => &mut s.normal,
            SubCp::OneDimensional(s) => &mut s.normal,
            SubCp::ZeroDimensional(s) => &mut s.normal,
        };
        *slot = Some(n);
    }

    /// Exactly `dim + 1` vertices.
    #[inline]
    pub fn is_simplex(&self) -> bool {
        self.vertices().len() == self.dim() + 1
    }

    /// The same face one recursion level up (vertices replaced by their
    /// parents). `None` if some vertex is already at the ambient level.
    ///
    /// Normals do not survive the lift; the caller assigns one in the
    /// enclosing space.
    pub fn to_previous_space(&self) -> Option<SubCp> {
        fn up(p: &PointRef) -> Option<PointRef> {
            p.parent.clone()
        }
        fn up_all(vs: &[PointRef]) -> Option<Vec<PointRef>> {
            vs.iter().map(up).collect()
        }
        fn up_faces(fs: &[SubCp]) -> Option<Vec<SubCp>> {
            fs.iter().map(SubCp::to_previous_space).collect()
        }
        Some(match self {
            SubCp::Simplex(s) => SubCp::Simplex(SubSimplex {
                vertices: up_all(&s.vertices)?,
                normal: None,
            }),
            SubCp::NonSimplex(s) => SubCp::NonSimplex(SubNonSimplex {
                dim: s.dim,
                vertices: up_all(&s.vertices)?,
                faces: up_faces(&s.faces)?,
                incidence: s.incidence.clone(),
                normal: None,
            }),
            SubCp::TwoDimensional(s) => SubCp::TwoDimensional(SubTwoDimensional {
                cycle: up_all(&s.cycle)?,
                vertices: up_all(&s.vertices)?,
                faces: up_faces(&s.faces)?,
                normal: None,
            }),
            SubCp::OneDimensional(s) => SubCp::OneDimensional(SubEdge {
                vertices: up_all(&s.vertices)?,
                faces: up_faces(&s.faces)?,
                normal: None,
            }),
            SubCp::ZeroDimensional(s) => SubCp::ZeroDimensional(SubVertex {
                vertex: up(&s.vertex)?,
                normal: None,
            }),
        })
    }

    /// The same face expressed in the coordinates of `basis`.
    pub fn project_to(&self, basis: &AffineBasis) -> SubCp {
        let mut cache = HashMap::new();
        self.project_with(basis, &mut cache)
    }

    fn project_with(&self, basis: &AffineBasis, cache: &mut HashMap<usize, PointRef>) -> SubCp {
        let mut prj = |p: &PointRef| -> PointRef {
            Rc::clone(cache.entry(p.id).or_insert_with(|| SubPoint::project(p, basis)))
        };
        match self {
            SubCp::Simplex(s) => SubCp::Simplex(SubSimplex {
                vertices: s.vertices.iter().map(&mut prj).collect(),
                normal: None,
            }),
            SubCp::ZeroDimensional(s) => SubCp::ZeroDimensional(SubVertex {
                vertex: prj(&s.vertex),
                normal: None,
            }),
            SubCp::NonSimplex(s) => {
                let vertices = s.vertices.iter().map(&mut prj).collect();
                let faces = s.faces.iter().map(|f| f.project_with(basis, cache)).collect();
                SubCp::NonSimplex(SubNonSimplex {
                    dim: s.dim,
                    vertices,
                    faces,
                    incidence: s.incidence.clone(),
                    normal: None,
                })
            }
            SubCp::TwoDimensional(s) => {
                let cycle = s.cycle.iter().map(&mut prj).collect();
                let vertices = s.vertices.iter().map(&mut prj).collect();
                let faces = s.faces.iter().map(|f| f.project_with(basis, cache)).collect();
                SubCp::TwoDimensional(SubTwoDimensional {
                    cycle,
                    vertices,
                    faces,
                    normal: None,
                })
            }
            SubCp::OneDimensional(s) => {
                let vertices = s.vertices.iter().map(&mut prj).collect();
                let faces = s.faces.iter().map(|f| f.project_with(basis, cache)).collect();
                SubCp::OneDimensional(SubEdge {
                    vertices,
                    faces,
                    normal: None,
                })
            }
        }
    }
}

impl PartialEq for SubCp {
    fn eq(&self, other: &Self) -> bool {
        self.dim() == other.dim()
            && self.vertices().len() == other.vertices().len()
            && self.vertices().iter().zip(other.vertices()).all(|(a, b)| a.id == b.id)
    }
}

impl Eq for SubCp {}

impl Hash for SubCp {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dim().hash(state);
        for p in self.vertices() {
            p.id.hash(state);
        }
    }
}

impl PartialOrd for SubCp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Vertex count first, then vertex ids lexicographically.
impl Ord for SubCp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.vertices()
            .len()
            .cmp(&other.vertices().len())
            .then_with(|| {
                self.vertices()
                    .iter()
                    .map(|p| p.id)
                    .cmp(other.vertices().iter().map(|p| p.id))
            })
            .then_with(|| self.dim().cmp(&other.dim()))
    }
}
