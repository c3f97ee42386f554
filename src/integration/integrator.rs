use crate::math::transform::wrap_angle;
use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;

/// Integrates the rigid body's state forward in time using Semi-Implicit Euler.
///
/// Gravity (downward, in units/s²) goes straight into the velocity instead of
/// the force accumulator. Static and dormant bodies are left untouched.
/// Accumulators are not cleared here; the world does that once per frame.
pub fn integrate(body: &mut RigidBody, gravity: f32, dt: f32) {
    if body.is_static || body.is_dormant() {
        return;
    }

    // --- Linear Motion --- //
    let linear_acceleration = body.force * body.inv_mass() + Vec2::new(0.0, gravity);
    body.velocity += linear_acceleration * dt;
    apply_air_drag(body, dt);

    // --- Angular Motion --- //
    if !body.lock_rotation {
        body.angular_velocity += body.angular_force * body.inv_inertia() * dt;
    }

    body.translate(body.velocity * dt);
    if body.angular_velocity != 0.0 {
        let rotation = wrap_angle(body.rotation() + body.angular_velocity * dt);
        body.set_rotation(rotation);
    }
}

/// Quadratic drag opposing the velocity. Never reverses the direction of motion.
fn apply_air_drag(body: &mut RigidBody, dt: f32) {
    let drag = body.material.air_drag;
    if drag <= 0.0 {
        return;
    }
    let speed = body.velocity.length();
    if speed == 0.0 {
        return;
    }
    let slowdown = (drag * speed * speed * body.inv_mass() * dt).min(speed);
    body.velocity -= body.velocity / speed * slowdown;
}
