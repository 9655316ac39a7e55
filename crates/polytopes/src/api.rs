//! Curated internal API (UNSTABLE).
//!
//! Important
//! - Not a public API. A convenience surface for callers inside the
//!   workspace (the CLI, benches, integration tests). Breaking changes are
//!   allowed.

// numeric layer
pub use crate::geom::{centroid, dedup_points, AffineBasis, HyperPlane, LinearBasis, Tol, Vector};
// hull
pub use crate::gift_wrapping::{wrap_face_lattice, wrap_vrep, Edge, Facet, GiftWrapping};
pub use crate::subcp::{FaceKey, SubCp, SubPoint};
// lattice
pub use crate::lattice::{FaceLattice, FlNode, NodeId};
// polytopes
pub use crate::polytope::special::{
    ball_1, ball_oo, cube01_hrep, cube01_vrep, cyclic, ellipsoid, rect_axis_parallel, simplex_rnd, sphere,
};
pub use crate::polytope::{
    hrep_of_lattice, hrep_to_vrep_naive, hrep_to_vrep_walk, minkowski_diff, minkowski_sum, Containment,
    ConvexPolytop, HrepToVrep, Rep,
};
// text output
pub use crate::io::{write_lattice_txt, write_txt};
