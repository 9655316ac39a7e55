//! Orthonormal linear bases and affine bases of sub-spaces of R^d.
//!
//! Invariants
//! - `LinearBasis` keeps its vectors orthonormal (Gram–Schmidt with a second
//!   re-orthogonalization pass). A vector is accepted only if its residual
//!   against the current span is non-zero under the caller's `Tol`.
//! - `AffineBasis` is `origin + span(lin)`. Sub-space coordinates of a point
//!   are the dot products with the basis vectors after subtracting `origin`.

use super::{Tol, Vector};

/// Orthonormal basis of a linear sub-space of R^`space_dim`.
#[derive(Clone, Debug)]
pub struct LinearBasis {
    space_dim: usize,
    vecs: Vec<Vector>,
}

impl LinearBasis {
    /// The zero sub-space of R^`space_dim`.
    #[inline]
    pub fn empty(space_dim: usize) -> Self {
        Self {
            space_dim,
            vecs: Vec::new(),
        }
    }

    /// Span of `vs`; dependent vectors are skipped.
    pub fn from_vectors<'a, I>(space_dim: usize, vs: I, tol: Tol) -> Self
    where
        I: IntoIterator<Item = &'a Vector>,
    {
        let mut lb = Self::empty(space_dim);
        for v in vs {
            lb.add_vector(v, tol);
        }
        lb
    }

    #[inline]
    pub fn space_dim(&self) -> usize {
        self.space_dim
    }
    #[inline]
    pub fn sub_dim(&self) -> usize {
        self.vecs.len()
    }
    #[inline]
    pub fn is_full(&self) -> bool {
        self.vecs.len() == self.space_dim
    }
    #[inline]
    pub fn vectors(&self) -> &[Vector] {
        &self.vecs
    }

    /// Component of `v` orthogonal to the span.
    pub fn residual(&self, v: &Vector) -> Vector {
        let mut u = v.clone();
        for _pass in 0..2 {
            for b in &self.vecs {
                let c = b.dot(&u);
                u.axpy(-c, b, 1.0);
            }
        }
        u
    }

    /// Try to grow the span by `v`. Returns `false` if `v` is (numerically)
    /// inside the span already or the basis is full.
    pub fn add_vector(&mut self, v: &Vector, tol: Tol) -> bool {
        debug_assert_eq!(v.len(), self.space_dim);
        if self.is_full() {
            return false;
        }
        let u = self.residual(v);
        let n = u.norm();
        if tol.is_zero(n) {
            return false;
        }
        self.vecs.push(u / n);
        true
    }

    /// A unit vector orthogonal to the span, or `None` if the span is full.
    ///
    /// Picks the standard basis vector with the largest residual, so the
    /// result is deterministic for a given basis.
    pub fn orthonormal_vector(&self) -> Option<Vector> {
        if self.is_full() {
            return None;
        }
        let mut best: Option<(f64, Vector)> = None;
        for i in 0..self.space_dim {
            let r = self.residual(&Vector::from_fn(self.space_dim, |j, _| if i == j { 1.0 } else { 0.0 }));
            let n = r.norm();
            if best.as_ref().map_or(true, |(bn, _)| n > *bn) {
                best = Some((n, r));
            }
        }
        let (n, r) = best?;
        if n <= 0.0 || !n.is_finite() {
            return None;
        }
        Some(r / n)
    }

    #[inline]
    pub fn contains(&self, v: &Vector, tol: Tol) -> bool {
        tol.is_zero_vec(&self.residual(v))
    }

    /// Coordinates of `v` in this basis (orthogonal projection).
    pub fn project(&self, v: &Vector) -> Vector {
        Vector::from_iterator(self.vecs.len(), self.vecs.iter().map(|b| b.dot(v)))
    }

    /// Ambient vector with sub-space coordinates `coords`.
    pub fn to_orig(&self, coords: &Vector) -> Vector {
        debug_assert_eq!(coords.len(), self.vecs.len());
        let mut out = Vector::zeros(self.space_dim);
        for (c, b) in coords.iter().zip(&self.vecs) {
            out.axpy(*c, b, 1.0);
        }
        out
    }
}

/// Affine sub-space `origin + span(lin)`.
#[derive(Clone, Debug)]
pub struct AffineBasis {
    pub origin: Vector,
    pub lin: LinearBasis,
}

impl AffineBasis {
    /// The single point `origin`.
    #[inline]
    pub fn new(origin: Vector) -> Self {
        let d = origin.len();
        Self {
            origin,
            lin: LinearBasis::empty(d),
        }
    }

    /// Affine hull of `points`; the first point becomes the origin.
    /// Returns `None` for an empty iterator.
    pub fn from_points<'a, I>(points: I, tol: Tol) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Vector>,
    {
        let mut it = points.into_iter();
        let mut ab = Self::new(it.next()?.clone());
        for p in it {
            ab.add_point(p, tol);
        }
        Some(ab)
    }

    #[inline]
    pub fn space_dim(&self) -> usize {
        self.origin.len()
    }
    #[inline]
    pub fn sub_dim(&self) -> usize {
        self.lin.sub_dim()
    }
    #[inline]
    pub fn is_full(&self) -> bool {
        self.lin.is_full()
    }

    #[inline]
    pub fn add_point(&mut self, p: &Vector, tol: Tol) -> bool {
        self.lin.add_vector(&(p - &self.origin), tol)
    }
    #[inline]
    pub fn add_vector(&mut self, v: &Vector, tol: Tol) -> bool {
        self.lin.add_vector(v, tol)
    }

    #[inline]
    pub fn contains(&self, p: &Vector, tol: Tol) -> bool {
        self.lin.contains(&(p - &self.origin), tol)
    }

    /// Sub-space coordinates of `p`.
    #[inline]
    pub fn project_point(&self, p: &Vector) -> Vector {
        self.lin.project(&(p - &self.origin))
    }

    /// Ambient point with sub-space coordinates `coords`.
    #[inline]
    pub fn to_orig(&self, coords: &Vector) -> Vector {
        self.lin.to_orig(coords) + &self.origin
    }
}
