//! Face lattice: every face of a polytope, linked to its neighbours one
//! dimension up and down.
//!
//! Purpose
//! - A combinatorial view that survives without the hull machinery: nodes
//!   know their vertex set (indices into the lattice's point list), an inner
//!   point, and an affine basis of their span.
//!
//! Why this design
//! - Nodes live in an arena (`Vec<FlNode>`) and refer to each other through
//!   `NodeId`. The graph is cyclic (sub ↔ super), and indices keep it plain
//!   data: cloning, comparing and transforming need no reference juggling.
//! - The arena is filled bottom-up, so a face always comes after its
//!   sub-faces. Rebuilding geometry in arena order is therefore safe.
//! - The per-dimension partition is derived from the links on first use and
//!   memoized per node.
//!
//! Notes
//! - The inner point of a face is the mean of its sub-faces' inner points,
//!   which lies strictly inside the face whenever the sub-faces are its
//!   facets.

mod builder;

use std::cell::OnceCell;
use std::collections::HashSet;

use crate::error::{PolytopeError, Result};
use crate::geom::{AffineBasis, Tol, Vector};

pub(crate) use builder::LatticeBuilder;

/// Index of a node in its lattice's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// One face of the lattice.
#[derive(Clone, Debug)]
pub struct FlNode {
    pub dim: usize,
    /// Sorted indices into [`FaceLattice::points`].
    pub vertices: Vec<usize>,
    pub inner_point: Vector,
    pub aff_basis: AffineBasis,
    /// Faces one dimension up containing this one.
    pub sup: Vec<NodeId>,
    /// Faces one dimension down.
    pub sub: Vec<NodeId>,
    levels: OnceCell<Vec<Vec<NodeId>>>,
}

impl FlNode {
    pub(crate) fn new(dim: usize, vertices: Vec<usize>, inner_point: Vector, aff_basis: AffineBasis) -> Self {
        Self {
            dim,
            vertices,
            inner_point,
            aff_basis,
            sup: Vec::new(),
            sub: Vec::new(),
            levels: OnceCell::new(),
        }
    }

    #[inline]
    pub fn is_vertex(&self) -> bool {
        self.dim == 0
    }
}

/// Face lattice of a convex polytope.
#[derive(Clone, Debug)]
pub struct FaceLattice {
    points: Vec<Vector>,
    nodes: Vec<FlNode>,
    top: NodeId,
    tol: Tol,
}

impl FaceLattice {
    /// Lattice of a single point.
    pub fn from_vertex(point: Vector, tol: Tol) -> Self {
        let mut b = LatticeBuilder::new(vec![point], tol);
        let top = b.vertex(0);
        b.finish(top)
    }

    /// Lattice from explicit vertex sets per dimension.
    ///
    /// `levels[k]` lists the `k`-faces as index sets into `points`
    /// (`levels[0]` may be empty; every point is a vertex). The last level
    /// must hold exactly one face. Sub/super links follow set inclusion.
    pub fn from_levels(points: Vec<Vector>, levels: &[Vec<Vec<usize>>], tol: Tol) -> Result<Self> {
        if points.is_empty() {
            return Err(PolytopeError::EmptySwarm);
        }
        let mut b = LatticeBuilder::new(points, tol);
        let mut prev: Vec<NodeId> = (0..b.point_count()).map(|i| b.vertex(i)).collect();
        for level in levels.iter().skip(1) {
            let mut cur = Vec::with_capacity(level.len());
            for set in level {
                let set: HashSet<usize> = set.iter().copied().collect();
                let children: Vec<NodeId> = prev
                    .iter()
                    .copied()
                    .filter(|&c| b.node(c).vertices.iter().all(|v| set.contains(v)))
                    .collect();
                cur.push(b.face(&children)?);
            }
            prev = cur;
        }
        match prev.as_slice() {
            [top] => Ok(b.finish(*top)),
            _ => Err(PolytopeError::InvalidArgument(format!(
                "face lattice needs exactly one top face, got {}",
                prev.len()
            ))),
        }
    }

    /// Vertices, lexicographically sorted.
    #[inline]
    pub fn points(&self) -> &[Vector] {
        &self.points
    }

    #[inline]
    pub fn tol(&self) -> Tol {
        self.tol
    }

    #[inline]
    pub fn top(&self) -> NodeId {
        self.top
    }

    /// Dimension of the polytope.
    #[inline]
    pub fn dim(&self) -> usize {
        self.nodes[self.top.0].dim
    }

    #[inline]
    pub fn space_dim(&self) -> usize {
        self.points[0].len()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &FlNode {
        &self.nodes[id.0]
    }

    /// All nodes in arena (bottom-up) order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &FlNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Per-dimension partition reachable from `from` through the links:
    /// entry `k` holds the `k`-faces sorted by id.
    pub fn levels_from(&self, from: NodeId) -> &[Vec<NodeId>] {
        self.nodes[from.0].levels.get_or_init(|| {
            let mut seen = vec![false; self.nodes.len()];
            let mut stack = vec![from];
            seen[from.0] = true;
            let mut levels = vec![Vec::new(); self.dim() + 1];
            while let Some(id) = stack.pop() {
                let node = &self.nodes[id.0];
                levels[node.dim].push(id);
                for &n in node.sup.iter().chain(&node.sub) {
                    if !seen[n.0] {
                        seen[n.0] = true;
                        stack.push(n);
                    }
                }
            }
            for level in &mut levels {
                level.sort_unstable();
            }
            levels
        })
    }

    /// Faces of every dimension, `levels()[k]` being the `k`-faces.
    #[inline]
    pub fn levels(&self) -> &[Vec<NodeId>] {
        self.levels_from(self.top)
    }

    /// The `k`-faces; empty above the polytope's dimension.
    pub fn level(&self, k: usize) -> &[NodeId] {
        self.levels().get(k).map_or(&[], Vec::as_slice)
    }

    /// Number of faces per dimension, vertices first.
    pub fn f_vector(&self) -> Vec<usize> {
        self.levels().iter().map(Vec::len).collect()
    }

    /// Apply `f` to every vertex, keeping the combinatorics.
    ///
    /// Inner points and bases are recomputed from the transformed vertices.
    /// Fails if `f` merges two vertices or makes a face flat.
    pub fn vertex_transform<F>(&self, f: F) -> Result<FaceLattice>
    where
        F: Fn(&Vector) -> Vector,
    {
        let mapped: Vec<Vector> = self.points.iter().map(&f).collect();
        let mut order: Vec<usize> = (0..mapped.len()).collect();
        order.sort_by(|&a, &b| self.tol.cmp_lex(&mapped[a], &mapped[b]));
        if order.windows(2).any(|w| self.tol.vec_eq(&mapped[w[0]], &mapped[w[1]])) {
            return Err(PolytopeError::Degenerate {
                context: "vertex transform merged two vertices",
            });
        }
        let mut remap = vec![0; mapped.len()];
        for (new, &old) in order.iter().enumerate() {
            remap[old] = new;
        }
        let points: Vec<Vector> = order.iter().map(|&i| mapped[i].clone()).collect();

        let mut nodes: Vec<FlNode> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let mut vertices: Vec<usize> = node.vertices.iter().map(|&v| remap[v]).collect();
            vertices.sort_unstable();
            let (inner, basis) = if node.is_vertex() {
                let p = points[vertices[0]].clone();
                (p.clone(), AffineBasis::new(p))
            } else {
                let children: Vec<&FlNode> = node.sub.iter().map(|c| &nodes[c.0]).collect();
                builder::face_geometry(&children, self.tol)?
            };
            let mut fresh = FlNode::new(node.dim, vertices, inner, basis);
            fresh.sup = node.sup.clone();
            fresh.sub = node.sub.clone();
            nodes.push(fresh);
        }
        Ok(FaceLattice {
            points,
            nodes,
            top: self.top,
            tol: self.tol,
        })
    }
}

/// Same vertices (within tolerance) and the same faces per dimension.
impl PartialEq for FaceLattice {
    fn eq(&self, other: &Self) -> bool {
        if self.dim() != other.dim() || self.points.len() != other.points.len() {
            return false;
        }
        if !self.points.iter().zip(&other.points).all(|(a, b)| self.tol.vec_eq(a, b)) {
            return false;
        }
        (0..=self.dim()).all(|k| {
            let mine: HashSet<&[usize]> = self.level(k).iter().map(|&id| self.node(id).vertices.as_slice()).collect();
            let theirs: HashSet<&[usize]> =
                other.level(k).iter().map(|&id| other.node(id).vertices.as_slice()).collect();
            mine == theirs
        })
    }
}

#[cfg(test)]
mod tests;
