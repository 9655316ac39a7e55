//! Dimension-generic convex hulls and convex polytopes.
//!
//! Modules
//! - `geom`: tolerance, bases, hyperplanes and small linear-algebra helpers.
//! - `subcp`: the sub-polytope tree produced by Gift-Wrapping.
//! - `gift_wrapping`: recursive Gift-Wrapping of a point swarm.
//! - `lattice`: the face lattice of a hull.
//! - `polytope`: `ConvexPolytop` with lazily derived V-, H- and lattice views.
//! - `io`: plain-text dump.
//!
//! API Policy
//! - Project-internal crate; no stable public API. `api` and `prelude` are
//!   the curated entry points and may change with the modules behind them.

pub mod api;
pub mod error;
pub mod geom;
pub mod gift_wrapping;
pub mod io;
pub mod lattice;
pub mod polytope;
pub mod subcp;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{PolytopeError, Result};
pub use geom::{Tol, Vector};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::{PolytopeError, Result};
    pub use crate::geom::{AffineBasis, HyperPlane, LinearBasis, Tol, Vector};
    pub use crate::gift_wrapping::GiftWrapping;
    pub use crate::lattice::FaceLattice;
    pub use crate::polytope::{Containment, ConvexPolytop, HrepToVrep, Rep};
}
