//! Error types for the physics core.
//!
//! Fallible operations return `PhysicsResult<T>`. Degenerate geometry
//! (zero-length vectors, coincident centres) is handled with fallbacks and
//! never surfaces here.

use thiserror::Error;

use crate::collision::AABB;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// A polygon needs at least three vertices.
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    /// All polygon vertices lie on one line.
    #[error("polygon vertices are collinear")]
    CollinearPolygon,

    /// A ray crossed more edges than a convex polygon allows.
    #[error("ray crossed {hits} edges of a polygon assumed to be convex")]
    NonConvexPolygon { hits: usize },

    /// Two rays were handed to the collision solver.
    #[error("ray colliders cannot be resolved against each other")]
    RayPair,

    /// A ray collider sits on a body that is allowed to move.
    #[error("ray collider on a dynamic body cannot be resolved")]
    DynamicRay,

    /// Item box does not fit inside the spatial index root.
    #[error("box {aabb:?} lies outside the index bounds {bounds:?}")]
    OutOfBounds { aabb: AABB, bounds: AABB },

    #[error("item is already present in the spatial index")]
    DuplicateItem,

    #[error("item is not present in the spatial index")]
    MissingItem,

    #[error("invalid mass {0}: dynamic bodies need a positive finite mass")]
    InvalidMass(f32),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no body is bound under this handle")]
    UnknownBody,
}

/// Convenience alias for `Result<T, PhysicsError>`.
pub type PhysicsResult<T> = Result<T, PhysicsError>;
