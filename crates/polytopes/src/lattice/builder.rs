use std::collections::HashMap;

use crate::error::{PolytopeError, Result};
use crate::geom::{centroid, AffineBasis, Tol, Vector};

use super::{FaceLattice, FlNode, NodeId};

/// Inner point and affine basis of a face, derived from its sub-faces.
pub(super) fn face_geometry(children: &[&FlNode], tol: Tol) -> Result<(Vector, AffineBasis)> {
    let first = children
        .first()
        .ok_or_else(|| PolytopeError::InvalidArgument("a face needs at least one sub-face".into()))?;
    let inner = centroid(children.iter().map(|c| &c.inner_point)).ok_or(PolytopeError::EmptySwarm)?;
    let mut basis = first.aff_basis.clone();
    if !basis.add_point(&inner, tol) {
        return Err(PolytopeError::Degenerate {
            context: "face inner point lies in the span of a sub-face",
        });
    }
    Ok((inner, basis))
}

/// Bottom-up lattice construction with deduplication by vertex set.
pub(crate) struct LatticeBuilder {
    points: Vec<Vector>,
    nodes: Vec<FlNode>,
    by_key: HashMap<(usize, Vec<usize>), NodeId>,
    tol: Tol,
}

impl LatticeBuilder {
    pub(crate) fn new(points: Vec<Vector>, tol: Tol) -> Self {
        Self {
            points,
            nodes: Vec::new(),
            by_key: HashMap::new(),
            tol,
        }
    }

    #[inline]
    pub(crate) fn point_count(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &FlNode {
        &self.nodes[id.0]
    }

    fn push(&mut self, node: FlNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.by_key.insert((node.dim, node.vertices.clone()), id);
        self.nodes.push(node);
        id
    }

    /// Node of point `i`.
    pub(crate) fn vertex(&mut self, i: usize) -> NodeId {
        if let Some(&id) = self.by_key.get(&(0, vec![i])) {
            return id;
        }
        let p = self.points[i].clone();
        let node = FlNode::new(0, vec![i], p.clone(), AffineBasis::new(p));
        self.push(node)
    }

    /// Node whose facets are `children` (all of the same dimension).
    /// A face with the same vertex set is returned instead of duplicated.
    pub(crate) fn face(&mut self, children: &[NodeId]) -> Result<NodeId> {
        let dim = match children.first() {
            Some(&c) => self.nodes[c.0].dim + 1,
            None => {
                return Err(PolytopeError::InvalidArgument("a face needs at least one sub-face".into()));
            }
        };
        if children.iter().any(|c| self.nodes[c.0].dim + 1 != dim) {
            return Err(PolytopeError::InvalidArgument("sub-faces of mixed dimension".into()));
        }
        let mut vertices: Vec<usize> = children
            .iter()
            .flat_map(|c| self.nodes[c.0].vertices.iter().copied())
            .collect();
        vertices.sort_unstable();
        vertices.dedup();
        if let Some(&id) = self.by_key.get(&(dim, vertices.clone())) {
            return Ok(id);
        }

        let refs: Vec<&FlNode> = children.iter().map(|c| &self.nodes[c.0]).collect();
        let (inner, basis) = face_geometry(&refs, self.tol)?;
        let mut node = FlNode::new(dim, vertices, inner, basis);
        node.sub = children.to_vec();
        let id = self.push(node);
        for c in children {
            self.nodes[c.0].sup.push(id);
        }
        Ok(id)
    }

    /// Seal the lattice; points are re-indexed in lexicographic order.
    pub(crate) fn finish(self, top: NodeId) -> FaceLattice {
        let tol = self.tol;
        let mut order: Vec<usize> = (0..self.points.len()).collect();
        order.sort_by(|&a, &b| tol.cmp_lex(&self.points[a], &self.points[b]));
        let mut remap = vec![0; order.len()];
        for (new, &old) in order.iter().enumerate() {
            remap[old] = new;
        }
        let points = order.iter().map(|&i| self.points[i].clone()).collect();
        let mut nodes = self.nodes;
        for node in &mut nodes {
            for v in &mut node.vertices {
                *v = remap[*v];
            }
            node.vertices.sort_unstable();
        }
        FaceLattice {
            points,
            nodes,
            top,
            tol,
        }
    }
}
