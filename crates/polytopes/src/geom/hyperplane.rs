use crate::error::{PolytopeError, Result};

use super::{AffineBasis, Tol, Vector};

/// Closed half-space `normal · x <= offset`, `normal` of unit length.
///
/// The bounding hyperplane is the set where `eval` vanishes.
#[derive(Clone, Debug)]
pub struct HyperPlane {
    pub normal: Vector,
    pub offset: f64,
}

impl HyperPlane {
    /// Normalizes `normal` (scaling `offset` along); a zero normal is rejected.
    pub fn new(normal: Vector, offset: f64) -> Result<Self> {
        let len = normal.norm();
        if !(len.is_finite()) || len <= 0.0 {
            return Err(PolytopeError::Singular {
                context: "hyperplane with zero normal",
            });
        }
        Ok(Self {
            normal: normal / len,
            offset: offset / len,
        })
    }

    /// Hyperplane with the given unit `normal` passing through `point`.
    #[inline]
    pub fn through(normal: Vector, point: &Vector) -> Self {
        let offset = normal.dot(point);
        Self { normal, offset }
    }

    /// Hyperplane spanned by an affine basis of co-dimension one.
    ///
    /// `inside` (if given) ends up on the non-positive side.
    pub fn from_affine_basis(basis: &AffineBasis, inside: Option<&Vector>, tol: Tol) -> Result<Self> {
        if basis.sub_dim() + 1 != basis.space_dim() {
            return Err(PolytopeError::Singular {
                context: "affine basis is not of co-dimension one",
            });
        }
        let n = basis.lin.orthonormal_vector().ok_or(PolytopeError::Singular {
            context: "no orthogonal complement",
        })?;
        let mut hp = Self::through(n, &basis.origin);
        if let Some(p) = inside {
            hp.orient_away_from(p, tol);
        }
        Ok(hp)
    }

    /// Signed value `normal · x - offset`.
    #[inline]
    pub fn eval(&self, x: &Vector) -> f64 {
        self.normal.dot(x) - self.offset
    }

    #[inline]
    pub fn contains(&self, x: &Vector, tol: Tol) -> bool {
        tol.is_zero(self.eval(x))
    }
    #[inline]
    pub fn contains_positive(&self, x: &Vector, tol: Tol) -> bool {
        tol.is_pos(self.eval(x))
    }

    /// Flip so that `p` lies on the non-positive side.
    pub fn orient_away_from(&mut self, p: &Vector, tol: Tol) {
        if tol.is_pos(self.eval(p)) {
            self.flip();
        }
    }

    #[inline]
    pub fn flip(&mut self) {
        self.normal = -&self.normal;
        self.offset = -self.offset;
    }

    /// The complementary closed half-space.
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -&self.normal,
            offset: -self.offset,
        }
    }

    #[inline]
    pub fn space_dim(&self) -> usize {
        self.normal.len()
    }
}
