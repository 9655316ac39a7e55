//! Numeric layer: points, tolerances, bases, hyperplanes.
//!
//! Purpose
//! - Provide the dimension-generic primitives the hull kernel is written
//!   against: `Vector` (a runtime-sized `nalgebra::DVector<f64>`), the
//!   tolerance contract `Tol`, orthonormal `LinearBasis`/`AffineBasis`, and
//!   oriented `HyperPlane`s.
//!
//! Why this design
//! - Every predicate takes a `Tol` explicitly. Objects that keep comparing
//!   after construction store the `Tol` they were built with, so changing a
//!   tolerance never corrupts a live ordered container.
//! - Bases are orthonormal so projections are dot products and lifting is a
//!   linear combination; no solves on the hot path.
//!
//! References
//! - Code cross-refs: `crate::gift_wrapping` (initial plane, roll-over),
//!   `crate::lattice` (node affine bases), `crate::polytope` (H↔V).

mod basis;
mod hyperplane;
mod tol;
mod util;

pub use basis::{AffineBasis, LinearBasis};
pub use hyperplane::HyperPlane;
pub use tol::Tol;
pub use util::{centroid, dedup_points, solve_square, unit_vector, Combinations};

/// Point or direction in R^d, d chosen at runtime.
pub type Vector = nalgebra::DVector<f64>;
