//! Simulation configuration.
//!
//! Tunables read by the world on every update: sub-step count, gravity,
//! material combination, broad-phase layout and dormancy thresholds.

use serde::{Deserialize, Serialize};

use crate::collision::AABB;
use crate::common::CombineMode;
use crate::error::{PhysicsError, PhysicsResult};
use crate::math::vec2::Vec2;

/// Which spatial index backs the broad phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BroadPhaseKind {
    #[default]
    QuadTree,
    HashedGrid,
}

/// When bodies are allowed to fall asleep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DormancyConfig {
    /// Speed (plus the speed change pending from accumulated forces) below
    /// which a body counts as immobile.
    pub linear_threshold: f32,

    /// Angular speed below which a body counts as immobile, in rad/s.
    pub angular_threshold: f32,

    /// Seconds a body must stay immobile before it turns dormant.
    pub min_dormant_time: f32,

    /// Factor applied to a moving body's box to find the neighbours it wakes.
    pub wake_margin: f32,
}

impl Default for DormancyConfig {
    fn default() -> Self {
        Self {
            linear_threshold: 5.0,
            angular_threshold: 0.1,
            min_dormant_time: 0.5,
            wake_margin: 2.0,
        }
    }
}

/// Configuration for the physics world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Sub-steps per call to `update`.
    pub steps: u32,

    /// Downward acceleration in units/s² (y grows downward).
    pub gravity: f32,

    /// How restitution and friction of two bodies are merged.
    pub combine_mode: CombineMode,

    /// Penetration left uncorrected between touching bodies. Zero pushes
    /// pairs fully apart every sub-step.
    #[serde(default)]
    pub contact_slop: f32,

    pub broad_phase: BroadPhaseKind,

    /// Cell size of the hashed grid.
    pub segment_size: f32,

    /// Extent of the simulated world. Bodies outside it are not indexed.
    pub world_bounds: AABB,

    /// Items a quadtree leaf holds before it splits.
    pub quadtree_threshold: usize,

    pub quadtree_max_depth: usize,

    pub dormancy: DormancyConfig,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            steps: 4,
            gravity: 981.0,
            combine_mode: CombineMode::Average,
            contact_slop: 0.0,
            broad_phase: BroadPhaseKind::QuadTree,
            segment_size: 100.0,
            world_bounds: AABB::new(Vec2::splat(-10_000.0), Vec2::splat(10_000.0)),
            quadtree_threshold: 8,
            quadtree_max_depth: 8,
            dormancy: DormancyConfig::default(),
        }
    }
}

impl PhysicsConfig {
    /// Fewer sub-steps and a coarser index, for large scenes.
    pub fn fast() -> Self {
        Self {
            steps: 1,
            quadtree_threshold: 16,
            quadtree_max_depth: 6,
            ..Default::default()
        }
    }

    /// More sub-steps and stricter dormancy, for small stacked scenes.
    pub fn precise() -> Self {
        Self {
            steps: 12,
            contact_slop: 0.05,
            quadtree_threshold: 4,
            quadtree_max_depth: 10,
            dormancy: DormancyConfig {
                linear_threshold: 2.0,
                angular_threshold: 0.05,
                min_dormant_time: 1.0,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Checks every value the world relies on being positive or non-empty.
    pub fn validate(&self) -> PhysicsResult<()> {
        let invalid = |message: &str| Err(PhysicsError::InvalidConfig(message.to_string()));

        if self.steps == 0 {
            return invalid("steps must be at least 1");
        }
        if !self.gravity.is_finite() {
            return invalid("gravity must be finite");
        }
        if !(self.contact_slop >= 0.0 && self.contact_slop.is_finite()) {
            return invalid("contact_slop must be finite and not negative");
        }
        if !(self.segment_size > 0.0) {
            return invalid("segment_size must be positive");
        }
        if self.world_bounds.is_empty() || !self.world_bounds.min.is_finite() || !self.world_bounds.max.is_finite() {
            return invalid("world_bounds must be a finite, non-empty box");
        }
        if self.quadtree_threshold == 0 {
            return invalid("quadtree_threshold must be at least 1");
        }

        let d = &self.dormancy;
        if !(d.linear_threshold > 0.0) || !(d.angular_threshold > 0.0) {
            return invalid("dormancy thresholds must be positive");
        }
        if !(d.min_dormant_time > 0.0) {
            return invalid("min_dormant_time must be positive");
        }
        if !(d.wake_margin >= 1.0) {
            return invalid("wake_margin must be at least 1");
        }
        Ok(())
    }
}
