//! Crate error type.
//!
//! Precondition violations and numeric degeneracies are reported where they
//! are detected. Operations with an empty-but-defined answer (a Minkowski
//! difference that vanishes, a section that misses the body) return `None`
//! instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolytopeError {
    /// The swarm has no points.
    #[error("swarm is empty: at least one point is required")]
    EmptySwarm,
    /// Points or normals of different dimensions were mixed.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    /// The operation needs a body that fills its ambient space.
    #[error("polytope spans a {span}-dimensional flat in {space}-space; a full-dimensional body is required")]
    NotFullDimensional { span: usize, space: usize },
    /// Polar duality needs the origin strictly inside.
    #[error("origin is not an interior point")]
    OriginNotInterior,
    /// A required linear system is singular.
    #[error("singular system: {context}")]
    Singular { context: &'static str },
    /// The half-space system has a recession direction.
    #[error("half-space system is unbounded")]
    Unbounded,
    /// The half-space system has no vertex.
    #[error("half-space system is infeasible (no vertex found)")]
    Infeasible,
    /// A numeric invariant of an algorithm failed.
    #[error("degenerate configuration: {context}")]
    Degenerate { context: &'static str },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PolytopeError>;
