//! Small utilities: k-combinations, tolerant dedup, square linear solves.

use nalgebra::DMatrix;

use super::{Tol, Vector};

/// Lexicographic k-combinations of `0..n` as index vectors.
///
/// Yields nothing when `k == 0` or `k > n`.
#[derive(Clone, Debug)]
pub struct Combinations {
    n: usize,
    idxs: Vec<usize>,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            idxs: (0..k).collect(),
            done: k == 0 || k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let out = self.idxs.clone();
        // advance: rightmost index that can still move
        let k = self.idxs.len();
        let mut i = k;
        loop {
            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
            if self.idxs[i] != i + self.n - k {
                self.idxs[i] += 1;
                for j in i + 1..k {
                    self.idxs[j] = self.idxs[j - 1] + 1;
                }
                break;
            }
        }
        Some(out)
    }
}

/// Sort points lexicographically (tolerant) and drop near-duplicates.
pub fn dedup_points(points: &mut Vec<Vector>, tol: Tol) {
    if points.len() < 2 {
        return;
    }
    points.sort_by(|a, b| tol.cmp_lex(a, b));
    points.dedup_by(|a, b| tol.vec_eq(a, b));
}

/// Solve the square system with the given rows and right-hand side.
///
/// Full-pivot LU; a pivot below `tol.eps` in magnitude counts as singular.
pub fn solve_square(rows: &[&Vector], rhs: &[f64], tol: Tol) -> Option<Vector> {
    let d = rows.len();
    if d == 0 || rhs.len() != d || rows.iter().any(|r| r.len() != d) {
        return None;
    }
    let a = DMatrix::from_fn(d, d, |i, j| rows[i][j]);
    let lu = a.full_piv_lu();
    let u = lu.u();
    if (0..d).any(|i| u[(i, i)].abs() < tol.eps) {
        return None;
    }
    let b = Vector::from_column_slice(rhs);
    let x = lu.solve(&b)?;
    if x.iter().all(|c| c.is_finite()) {
        Some(x)
    } else {
        None
    }
}

/// Arithmetic mean of a non-empty point set.
pub fn centroid<'a, I>(points: I) -> Option<Vector>
where
    I: IntoIterator<Item = &'a Vector>,
{
    let mut it = points.into_iter();
    let mut acc = it.next()?.clone();
    let mut n = 1usize;
    for p in it {
        acc += p;
        n += 1;
    }
    Some(acc / n as f64)
}

/// Unit vector `e_i` of R^d.
#[inline]
pub fn unit_vector(d: usize, i: usize) -> Vector {
    let mut e = Vector::zeros(d);
    e[i] = 1.0;
    e
}
