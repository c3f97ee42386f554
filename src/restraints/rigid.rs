use super::{apply_pair_impulse, axis_impulse, body_pair, PointState, Restraint, DEFAULT_DAMPING};
use crate::math::transform::wrap_angle;
use crate::math::vec2::Vec2;
use crate::objects::{BodyHandle, BodySet};

/// Welds two bodies together at a shared point and keeps their relative
/// rotation fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidRestraint {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    pub anchor_a: Vec2,
    pub anchor_b: Vec2,
    /// Rotation of A minus rotation of B to hold.
    pub rest_angle: f32,
    pub damping: f32,
}

impl RigidRestraint {
    pub fn new(body_a: BodyHandle, body_b: BodyHandle, anchor_a: Vec2, anchor_b: Vec2, rest_angle: f32) -> Self {
        Self {
            body_a,
            body_b,
            anchor_a,
            anchor_b,
            rest_angle,
            damping: DEFAULT_DAMPING,
        }
    }

    /// Welds the bodies where they currently are, joined at `world_point`.
    pub fn weld(bodies: &BodySet, body_a: BodyHandle, body_b: BodyHandle, world_point: Vec2) -> Option<Self> {
        let a = bodies.get(body_a)?;
        let b = bodies.get(body_b)?;
        let to_local = |position: Vec2, rotation: f32| (world_point - position).rotate(-rotation);
        Some(Self::new(
            body_a,
            body_b,
            to_local(a.position(), a.rotation()),
            to_local(b.position(), b.rotation()),
            wrap_angle(a.rotation() - b.rotation()),
        ))
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }
}

impl Restraint for RigidRestraint {
    fn solve(&self, bodies: &mut BodySet, dt: f32) {
        let Some([body_a, body_b]) = body_pair(bodies, self.body_a, self.body_b) else {
            return;
        };

        for axis in [Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)] {
            let a = PointState::on_body(body_a, self.anchor_a);
            let b = PointState::on_body(body_b, self.anchor_b);
            let error = (a.point - b.point).dot(axis);
            let lambda = axis_impulse(&a, &b, axis, error, self.damping, dt);
            apply_pair_impulse(Some(&mut *body_a), Some(&mut *body_b), axis * lambda, &a, &b);
        }

        let ii_a = if body_a.is_movable() { body_a.inv_inertia() } else { 0.0 };
        let ii_b = if body_b.is_movable() { body_b.inv_inertia() } else { 0.0 };
        let k = ii_a + ii_b;
        if k <= 0.0 || dt <= 0.0 {
            return;
        }
        let error = wrap_angle(body_a.rotation() - body_b.rotation() - self.rest_angle);
        let relative_spin = body_a.angular_velocity - body_b.angular_velocity;
        let relative_angular_acceleration = body_a.angular_force * ii_a - body_b.angular_force * ii_b;
        let lambda = -(relative_spin + relative_angular_acceleration * dt + self.damping / dt * error) / k;
        body_a.angular_velocity += lambda * ii_a;
        body_b.angular_velocity -= lambda * ii_b;
    }

    fn bodies(&self) -> Vec<BodyHandle> {
        vec![self.body_a, self.body_b]
    }
}
