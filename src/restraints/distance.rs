use super::{apply_pair_impulse, axis_impulse, body_pair, PointState, Restraint, DEFAULT_DAMPING};
use crate::math::vec2::Vec2;
use crate::objects::{BodyHandle, BodySet};

/// Keeps two anchor points, one on each body, at a fixed distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceRestraint {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    /// Anchor point on body A, in local coordinates.
    pub anchor_a: Vec2,
    /// Anchor point on body B, in local coordinates.
    pub anchor_b: Vec2,
    pub distance: f32,
    pub damping: f32,
}

impl DistanceRestraint {
    pub fn new(body_a: BodyHandle, body_b: BodyHandle, anchor_a: Vec2, anchor_b: Vec2, distance: f32) -> Self {
        assert!(distance >= 0.0, "Distance cannot be negative");
        Self {
            body_a,
            body_b,
            anchor_a,
            anchor_b,
            distance,
            damping: DEFAULT_DAMPING,
        }
    }

    /// Uses the current distance between the anchors as the rest length.
    pub fn between(
        bodies: &BodySet,
        body_a: BodyHandle,
        body_b: BodyHandle,
        anchor_a: Vec2,
        anchor_b: Vec2,
    ) -> Option<Self> {
        let a = PointState::on_body(bodies.get(body_a)?, anchor_a);
        let b = PointState::on_body(bodies.get(body_b)?, anchor_b);
        Some(Self::new(body_a, body_b, anchor_a, anchor_b, a.point.distance(b.point)))
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }
}

impl Restraint for DistanceRestraint {
    fn solve(&self, bodies: &mut BodySet, dt: f32) {
        let Some([body_a, body_b]) = body_pair(bodies, self.body_a, self.body_b) else {
            return;
        };
        let a = PointState::on_body(body_a, self.anchor_a);
        let b = PointState::on_body(body_b, self.anchor_b);

        let delta = a.point - b.point;
        let current = delta.length();
        if current < 1e-6 {
            // No direction to push along.
            return;
        }
        let axis = delta / current;
        let lambda = axis_impulse(&a, &b, axis, current - self.distance, self.damping, dt);
        apply_pair_impulse(Some(body_a), Some(body_b), axis * lambda, &a, &b);
    }

    fn bodies(&self) -> Vec<BodyHandle> {
        vec![self.body_a, self.body_b]
    }
}
