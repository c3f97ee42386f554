//! A 2D rigid-body physics core.
//!
//! Bodies are bound to a [`PhysicsWorld`] and addressed by [`BodyHandle`].
//! Every call to [`PhysicsWorld::update`] integrates motion, solves
//! restraints, finds candidate pairs through a quadtree (or hashed grid)
//! broad phase, resolves contacts with impulses, and finally updates dormancy
//! and triggers. Screen-space coordinates are used: y grows downward.

pub mod collision;
pub mod common;
pub mod config;
pub mod error;
pub mod integration;
pub mod math;
pub mod objects;
pub mod restraints;
pub mod shapes;
pub mod solver;
pub mod world;

// Re-export key types for easier use
pub use collision::{BroadPhase, CollisionInfo, QuadTree, SpatialGrid, AABB};
pub use common::{CombineMode, Material};
pub use config::{BroadPhaseKind, DormancyConfig, PhysicsConfig};
pub use error::{PhysicsError, PhysicsResult};
pub use math::{Transform, Vec2};
pub use objects::{BodyHandle, BodySet, LayerSet, RigidBody};
pub use restraints::{AnchorRestraint, DistanceRestraint, Restraint, RigidRestraint};
pub use shapes::{Circle, Collider, Polygon, Ray};
pub use solver::{AveragedImpulseSolver, ContactParams, SequentialImpulseSolver, Solver};
pub use world::{ParticleSystem, PhysicsWorld, RestraintHandle, Trigger, TriggerEvent, TriggerHandle};
