//! Soft joints between bodies.
//!
//! Every restraint is solved once per sub-step at the velocity level: each
//! constrained axis gets an impulse
//! `lambda = -(Cdot + a_rel * dt + damping / dt * C) / K`, where `C` is the
//! position error, `Cdot` its rate of change, `a_rel` the relative
//! acceleration from the forces accumulated this frame and `K` the effective
//! mass along the axis. The error is removed over several steps rather than
//! exactly.

pub mod anchor;
pub mod distance;
pub mod rigid;

pub use anchor::AnchorRestraint;
pub use distance::DistanceRestraint;
pub use rigid::RigidRestraint;

use crate::math::vec2::Vec2;
use crate::objects::{BodyHandle, BodySet, RigidBody};

/// Damping used by the constructors. Fraction of the position error
/// corrected per step.
pub const DEFAULT_DAMPING: f32 = 0.2;

/// A joint between one or two bodies, solved once per sub-step.
///
/// Restraints only hold handles. A restraint whose body has been unbound
/// does nothing.
pub trait Restraint {
    fn solve(&self, bodies: &mut BodySet, dt: f32);

    /// Bodies this restraint acts on.
    fn bodies(&self) -> Vec<BodyHandle>;
}

/// Motion of one end of a restraint, sampled before any impulse is applied.
///
/// A fixed world point, a static body and a dormant body all have zero
/// inverse mass and inertia.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointState {
    pub point: Vec2,
    /// Offset of `point` from the body's center.
    pub radius: Vec2,
    pub velocity: Vec2,
    /// Acceleration of `point` from the accumulated forces.
    pub acceleration: Vec2,
    pub inv_mass: f32,
    pub inv_inertia: f32,
}

impl PointState {
    /// A body-attached point given in the body's local frame.
    pub fn on_body(body: &RigidBody, local_anchor: Vec2) -> Self {
        let radius = local_anchor.rotate(body.rotation());
        let point = body.position() + radius;
        if !body.is_movable() {
            return Self {
                velocity: body.velocity_at(point),
                ..Self::fixed(point)
            };
        }
        let inv_mass = body.inv_mass();
        let inv_inertia = body.inv_inertia();
        Self {
            point,
            radius,
            velocity: body.velocity_at(point),
            acceleration: body.force * inv_mass + radius.perpendicular() * (body.angular_force * inv_inertia),
            inv_mass,
            inv_inertia,
        }
    }

    /// A point pinned in world space.
    pub fn fixed(point: Vec2) -> Self {
        Self {
            point,
            radius: Vec2::ZERO,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            inv_mass: 0.0,
            inv_inertia: 0.0,
        }
    }

    fn axis_inv_mass(&self, axis: Vec2) -> f32 {
        let rn = self.radius.perpendicular().dot(axis);
        self.inv_mass + rn * rn * self.inv_inertia
    }
}

/// Impulse magnitude along `axis` that drives `error` toward zero.
///
/// `axis` points from `b` toward `a`; a positive result pushes `a` along it.
pub fn axis_impulse(a: &PointState, b: &PointState, axis: Vec2, error: f32, damping: f32, dt: f32) -> f32 {
    let k = a.axis_inv_mass(axis) + b.axis_inv_mass(axis);
    if k <= 0.0 || dt <= 0.0 {
        return 0.0;
    }
    let relative_velocity = (a.velocity - b.velocity).dot(axis);
    let relative_acceleration = (a.acceleration - b.acceleration).dot(axis);
    let bias = damping / dt * error;
    -(relative_velocity + relative_acceleration * dt + bias) / k
}

/// Applies `impulse` to `a` at its anchor and the opposite to `b`.
pub fn apply_pair_impulse(
    a: Option<&mut RigidBody>,
    b: Option<&mut RigidBody>,
    impulse: Vec2,
    a_state: &PointState,
    b_state: &PointState,
) {
    if let Some(body) = a.filter(|body| body.is_movable()) {
        body.apply_impulse(impulse, a_state.radius);
    }
    if let Some(body) = b.filter(|body| body.is_movable()) {
        body.apply_impulse(-impulse, b_state.radius);
    }
}

/// Both bodies of a two-body restraint, if both are bound and distinct.
pub(crate) fn body_pair(bodies: &mut BodySet, a: BodyHandle, b: BodyHandle) -> Option<[&mut RigidBody; 2]> {
    bodies.get_disjoint_mut([a, b])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Circle;
    const EPSILON: f32 = 1e-5;

    fn ball(x: f32, y: f32) -> RigidBody {
        RigidBody::new(Circle::new(Vec2::new(x, y), 1.0), 1.0).unwrap()
    }

    #[test]
    fn test_point_state_on_rotated_body() {
        let mut body = ball(2.0, 0.0);
        body.set_rotation(std::f32::consts::FRAC_PI_2);
        body.angular_velocity = 1.0;
        let state = PointState::on_body(&body, Vec2::new(1.0, 0.0));
        assert!((state.point.x - 2.0).abs() < EPSILON);
        assert!((state.point.y - 1.0).abs() < EPSILON);
        // omega * perp(0,1) = (-1, 0)
        assert!((state.velocity.x - -1.0).abs() < EPSILON);
    }

    #[test]
    fn test_dormant_end_acts_fixed() {
        let mut body = ball(0.0, 0.0);
        body.dormant = true;
        let state = PointState::on_body(&body, Vec2::ZERO);
        assert_eq!(state.inv_mass, 0.0);
        assert_eq!(state.inv_inertia, 0.0);
    }

    #[test]
    fn test_axis_impulse_cancels_approach_and_error() {
        let mut body = ball(0.0, 0.0);
        body.velocity = Vec2::new(-3.0, 0.0);
        let a = PointState::on_body(&body, Vec2::ZERO);
        let b = PointState::fixed(Vec2::new(-5.0, 0.0));
        // Axis from b to a; body closes in at 3 and sits 1 unit too far.
        let lambda = axis_impulse(&a, &b, Vec2::new(1.0, 0.0), 1.0, 0.5, 0.1);
        // -( -3 + 0 + 0.5 / 0.1 * 1 ) / 1
        assert!((lambda - -2.0).abs() < EPSILON);

        let both_fixed = axis_impulse(&b, &b, Vec2::new(1.0, 0.0), 1.0, 0.5, 0.1);
        assert_eq!(both_fixed, 0.0);
    }

    #[test]
    fn test_axis_impulse_counts_pending_force() {
        let mut body = ball(0.0, 0.0);
        body.apply_force(Vec2::new(20.0, 0.0));
        let a = PointState::on_body(&body, Vec2::ZERO);
        let b = PointState::fixed(Vec2::new(-5.0, 0.0));
        let lambda = axis_impulse(&a, &b, Vec2::new(1.0, 0.0), 0.0, 0.2, 0.1);
        assert!((lambda - -2.0).abs() < EPSILON);
    }
}
