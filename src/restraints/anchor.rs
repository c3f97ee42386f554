use super::{apply_pair_impulse, axis_impulse, PointState, Restraint, DEFAULT_DAMPING};
use crate::math::vec2::Vec2;
use crate::objects::{BodyHandle, BodySet};

/// Ties a point on a body to a fixed world position.
///
/// With a zero distance the point is pinned on both axes; otherwise it is
/// kept at `distance` from the anchor like a pendulum rod.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorRestraint {
    pub body: BodyHandle,
    /// Attachment point on the body, in local coordinates.
    pub local_anchor: Vec2,
    pub world_anchor: Vec2,
    pub distance: f32,
    pub damping: f32,
}

impl AnchorRestraint {
    pub fn new(body: BodyHandle, local_anchor: Vec2, world_anchor: Vec2, distance: f32) -> Self {
        assert!(distance >= 0.0, "Distance cannot be negative");
        Self {
            body,
            local_anchor,
            world_anchor,
            distance,
            damping: DEFAULT_DAMPING,
        }
    }

    /// Pins `local_anchor` onto `world_anchor`.
    pub fn pin(body: BodyHandle, local_anchor: Vec2, world_anchor: Vec2) -> Self {
        Self::new(body, local_anchor, world_anchor, 0.0)
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }
}

impl Restraint for AnchorRestraint {
    fn solve(&self, bodies: &mut BodySet, dt: f32) {
        let Some(body) = bodies.get_mut(self.body) else {
            return;
        };
        let fixed = PointState::fixed(self.world_anchor);

        if self.distance == 0.0 {
            for axis in [Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)] {
                let state = PointState::on_body(body, self.local_anchor);
                let error = (state.point - self.world_anchor).dot(axis);
                let lambda = axis_impulse(&state, &fixed, axis, error, self.damping, dt);
                apply_pair_impulse(Some(&mut *body), None, axis * lambda, &state, &fixed);
            }
            return;
        }

        let state = PointState::on_body(body, self.local_anchor);
        let delta = state.point - self.world_anchor;
        let current = delta.length();
        if current < 1e-6 {
            return;
        }
        let axis = delta / current;
        let lambda = axis_impulse(&state, &fixed, axis, current - self.distance, self.damping, dt);
        apply_pair_impulse(Some(body), None, axis * lambda, &state, &fixed);
    }

    fn bodies(&self) -> Vec<BodyHandle> {
        vec![self.body]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::RigidBody;
    use crate::shapes::{Circle, Polygon};
    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_pin_pulls_point_onto_anchor() {
        let mut bodies = BodySet::with_key();
        let body = bodies.insert(RigidBody::new(Circle::new(Vec2::new(2.0, -1.0), 1.0), 1.0).unwrap());
        let pin = AnchorRestraint::pin(body, Vec2::ZERO, Vec2::ZERO).with_damping(1.0);
        pin.solve(&mut bodies, 0.5);
        // Full correction over one step: v = -C / dt on each axis.
        assert!((bodies[body].velocity.x - -4.0).abs() < EPSILON);
        assert!((bodies[body].velocity.y - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_pendulum_keeps_length() {
        let mut bodies = BodySet::with_key();
        let bob = bodies.insert(RigidBody::new(Circle::new(Vec2::new(50.0, 0.0), 5.0), 1.0).unwrap());
        let rod = AnchorRestraint::new(bob, Vec2::ZERO, Vec2::ZERO, 50.0);
        let dt = 1.0 / 240.0;
        for _ in 0..100 {
            let body = &mut bodies[bob];
            body.velocity.y += 981.0 * dt;
            rod.solve(&mut bodies, dt);
            let body = &mut bodies[bob];
            let velocity = body.velocity;
            body.translate(velocity * dt);
        }
        let length = bodies[bob].position().length();
        assert!((length - 50.0).abs() < 1.0, "length {length}");
        // It swung down past the anchor's height.
        assert!(bodies[bob].position().y > 10.0);
    }

    #[test]
    fn test_off_center_pin_spins_body() {
        let mut bodies = BodySet::with_key();
        let plank =
            bodies.insert(RigidBody::new(Polygon::rectangle(Vec2::ZERO, Vec2::new(10.0, 2.0)).unwrap(), 1.0).unwrap());
        let pin = AnchorRestraint::pin(plank, Vec2::new(5.0, 0.0), Vec2::new(5.0, -1.0));
        pin.solve(&mut bodies, 0.1);
        assert!(bodies[plank].angular_velocity.abs() > EPSILON);
        assert_eq!(pin.bodies(), vec![plank]);
    }

    #[test]
    fn test_static_body_is_ignored() {
        let mut bodies = BodySet::with_key();
        let wall = bodies.insert(RigidBody::new_static(Circle::new(Vec2::new(3.0, 0.0), 1.0)));
        AnchorRestraint::pin(wall, Vec2::ZERO, Vec2::ZERO).solve(&mut bodies, 0.1);
        assert_eq!(bodies[wall].velocity, Vec2::ZERO);
    }
}
