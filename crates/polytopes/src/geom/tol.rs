//! Tolerance contract shared by every geometric predicate.
//!
//! - `Tol`: one epsilon, passed by value into predicates and captured by the
//!   objects that compare later (hulls, lattices, polytopes).
//! - Comparisons follow the usual “tolerant sign” convention:
//!   `a` is zero iff `|a| < eps`, positive iff `a > eps`, negative iff `a < -eps`.

use std::cmp::Ordering;

use super::Vector;

/// Comparison tolerance.
///
/// There is no global epsilon; every caller decides which `Tol` applies.
#[derive(Clone, Copy, Debug)]
pub struct Tol {
    pub eps: f64,
}

impl Default for Tol {
    fn default() -> Self {
        Self { eps: 1e-8 }
    }
}

impl Tol {
    #[inline]
    pub const fn new(eps: f64) -> Self {
        Self { eps }
    }

    /// `|a| < eps`.
    #[inline]
    pub fn is_zero(&self, a: f64) -> bool {
        a.abs() < self.eps
    }
    /// `a > eps`.
    #[inline]
    pub fn is_pos(&self, a: f64) -> bool {
        a > self.eps
    }
    /// `a < -eps`.
    #[inline]
    pub fn is_neg(&self, a: f64) -> bool {
        a < -self.eps
    }
    /// `a <= eps`.
    #[inline]
    pub fn is_non_pos(&self, a: f64) -> bool {
        a <= self.eps
    }

    /// Three-way comparison; values within `eps` compare `Equal`.
    #[inline]
    pub fn approx_cmp(&self, a: f64, b: f64) -> Ordering {
        let d = a - b;
        if self.is_zero(d) {
            Ordering::Equal
        } else if d < 0.0 {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    /// Lexicographic comparison of two points, coordinate-wise tolerant.
    ///
    /// Shorter vectors compare less when all shared coordinates agree.
    pub fn cmp_lex(&self, u: &Vector, v: &Vector) -> Ordering {
        for (a, b) in u.iter().zip(v.iter()) {
            match self.approx_cmp(*a, *b) {
                Ordering::Equal => continue,
                o => return o,
            }
        }
        u.len().cmp(&v.len())
    }

    /// Point equality under `cmp_lex`.
    #[inline]
    pub fn vec_eq(&self, u: &Vector, v: &Vector) -> bool {
        self.cmp_lex(u, v) == Ordering::Equal
    }

    /// A vector is zero when its Euclidean length is.
    #[inline]
    pub fn is_zero_vec(&self, v: &Vector) -> bool {
        self.is_zero(v.norm())
    }
}
