use std::rc::Rc;

use crate::geom::{AffineBasis, Vector};

/// Shared handle to a point of some recursion level.
pub type PointRef = Rc<SubPoint>;

/// A swarm point expressed in a recursion-local sub-space.
///
/// `id` is the index of the ambient point it descends from; projection keeps
/// it, so vertex sets compare exactly at every level. `parent` is the point
/// one level up (`None` at the ambient level) and is never mutated.
#[derive(Debug)]
pub struct SubPoint {
    pub id: usize,
    pub coords: Vector,
    pub parent: Option<PointRef>,
}

impl SubPoint {
    /// Ambient-level point.
    #[inline]
    pub fn root(id: usize, coords: Vector) -> PointRef {
        Rc::new(Self {
            id,
            coords,
            parent: None,
        })
    }

    /// Express `p` in the coordinates of `basis`, remembering `p` as parent.
    #[inline]
    pub fn project(p: &PointRef, basis: &AffineBasis) -> PointRef {
        Rc::new(Self {
            id: p.id,
            coords: basis.project_point(&p.coords),
            parent: Some(Rc::clone(p)),
        })
    }

    #[inline]
    pub fn space_dim(&self) -> usize {
        self.coords.len()
    }

    /// Follow parent links to the ambient-level point.
    pub fn root_point(&self) -> &SubPoint {
        let mut p = self;
        while let Some(parent) = p.parent.as_deref() {
            p = parent;
        }
        p
    }
}
