//! Sub-polytopes: faces of a hull under construction, at any recursion depth.
//!
//! Purpose
//! - `SubPoint` carries a swarm point through the recursion: each projection
//!   into a facet's sub-space records the point it came from, so a finished
//!   sub-hull can be lifted back level by level.
//! - `SubCp` is a closed sum over the five shapes the wrapping produces:
//!   `Simplex`, `NonSimplex`, `TwoDimensional`, `OneDimensional`,
//!   `ZeroDimensional`. Shared operations are `match`es, not virtual calls.
//!
//! Why this design
//! - Vertex identity is the id of the ambient point, which projection keeps.
//!   Face keys (`dim` + sorted ids) are exact, so ridge maps never depend on
//!   a floating-point comparator.
//! - Lifting only follows parent links and never touches ancestry.
//!
//! Known limitation
//! - Equality is “same dimension and same vertex set”, weaker than equality
//!   of the full face structure.

mod planar;
mod point;
mod types;

pub use point::{PointRef, SubPoint};
pub use types::{FaceKey, Incidence, SubCp, SubEdge, SubNonSimplex, SubSimplex, SubTwoDimensional, SubVertex};
