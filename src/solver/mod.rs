//! Collision response.
//!
//! [`resolve_contact`] runs the per-pair pipeline shared by every solver:
//! filtering, narrow-phase detection, positional correction, and finally the
//! impulse step supplied by a [`Solver`] implementation.

pub mod averaged;
pub mod sequential;

pub use averaged::AveragedImpulseSolver;
pub use sequential::SequentialImpulseSolver;

use crate::collision::{detect, CollisionInfo};
use crate::common::{CombineMode, PairMaterial};
use crate::error::{PhysicsError, PhysicsResult};
use crate::math::vec2::Vec2;
use crate::objects::RigidBody;

/// Tangential speeds below this get no friction impulse.
const FRICTION_SPEED_EPSILON: f32 = 0.1;

/// Per-pair settings taken from the world configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactParams {
    pub combine_mode: CombineMode,
    /// Overlap that positional correction leaves in place.
    pub slop: f32,
}

impl From<CombineMode> for ContactParams {
    fn from(combine_mode: CombineMode) -> Self {
        Self {
            combine_mode,
            slop: 0.0,
        }
    }
}

/// Velocity response for a detected contact.
///
/// `first` and `second` are ordered so that `info.normal` points from
/// `second` toward `first`.
pub trait Solver {
    fn apply_impulses(
        &self,
        first: &mut RigidBody,
        second: &mut RigidBody,
        info: &CollisionInfo,
        material: &PairMaterial,
    );

    fn name(&self) -> &str;
}

/// Runs detection and response for one candidate pair.
///
/// Returns the contact when the pair collided. Pairs where neither body can
/// move, or whose layers exclude each other, are skipped. Rays on static
/// bodies are detected but never resolved; rays on anything else are invalid.
pub fn resolve_contact(
    solver: &dyn Solver,
    a: &mut RigidBody,
    b: &mut RigidBody,
    params: impl Into<ContactParams>,
) -> PhysicsResult<Option<CollisionInfo>> {
    let params = params.into();
    if !a.is_movable() && !b.is_movable() {
        return Ok(None);
    }
    if !a.can_collide_with(b) {
        return Ok(None);
    }
    let (a_ray, b_ray) = (a.collider().is_ray(), b.collider().is_ray());
    if a_ray && b_ray {
        return Err(PhysicsError::RayPair);
    }
    if (a_ray && !a.is_static) || (b_ray && !b.is_static) {
        return Err(PhysicsError::DynamicRay);
    }

    let Some(info) = detect(a.collider(), b.collider())? else {
        return Ok(None);
    };
    if a_ray || b_ray {
        return Ok(Some(info));
    }

    let (first, second) = if info.swapped { (b, a) } else { (a, b) };
    correct_positions(first, second, &info, params.slop);
    let material = PairMaterial::combine(&first.material, &second.material, params.combine_mode);
    solver.apply_impulses(first, second, &info, &material);
    Ok(Some(info))
}

/// Pushes the pair apart along the normal by the overlap minus `slop`. A body
/// that cannot move leaves the whole push to the other one.
pub fn correct_positions(first: &mut RigidBody, second: &mut RigidBody, info: &CollisionInfo, slop: f32) {
    let depth = info.overlap - slop;
    if depth <= 0.0 {
        return;
    }
    let mtv = info.normal * depth;
    match (first.is_movable(), second.is_movable()) {
        (true, true) => {
            first.translate(mtv * 0.5);
            second.translate(-mtv * 0.5);
        }
        (true, false) => first.translate(mtv),
        (false, true) => second.translate(-mtv),
        (false, false) => {}
    }
}

/// Mass terms of one body as the solver sees them. Dormant bodies count as
/// immovable, exactly like static ones.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MassTerms {
    pub inv_mass: f32,
    pub inv_inertia: f32,
}

impl MassTerms {
    pub fn of(body: &RigidBody) -> Self {
        if body.is_movable() {
            Self {
                inv_mass: body.inv_mass(),
                inv_inertia: body.inv_inertia(),
            }
        } else {
            Self {
                inv_mass: 0.0,
                inv_inertia: 0.0,
            }
        }
    }
}

/// Impulse computed for one contact point, applied to `first` as is and to
/// `second` negated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ContactImpulse {
    pub impulse: Vec2,
    pub r1: Vec2,
    pub r2: Vec2,
}

/// Normal plus friction impulse at `contact`, from the bodies' current
/// velocities. `None` when the bodies already separate at that point.
pub(crate) fn contact_impulse(
    first: &RigidBody,
    second: &RigidBody,
    normal: Vec2,
    contact: Vec2,
    material: &PairMaterial,
) -> Option<ContactImpulse> {
    let (m1, m2) = (MassTerms::of(first), MassTerms::of(second));
    let r1 = contact - first.position();
    let r2 = contact - second.position();
    let r1_perp = r1.perpendicular();
    let r2_perp = r2.perpendicular();

    let v1 = first.velocity + r1_perp * first.angular_velocity;
    let v2 = second.velocity + r2_perp * second.angular_velocity;
    let relative_velocity = v1 - v2;
    let contact_velocity = relative_velocity.dot(normal);
    if contact_velocity >= 0.0 {
        return None;
    }

    let effective_mass = |axis: Vec2| {
        let r1n = r1_perp.dot(axis);
        let r2n = r2_perp.dot(axis);
        m1.inv_mass + m2.inv_mass + r1n * r1n * m1.inv_inertia + r2n * r2n * m2.inv_inertia
    };

    let denominator = effective_mass(normal);
    if denominator <= 0.0 {
        return None;
    }
    let j = -(1.0 + material.restitution) * contact_velocity / denominator;
    let mut impulse = normal * j;

    let tangential = relative_velocity - normal * contact_velocity;
    if tangential.length() >= FRICTION_SPEED_EPSILON {
        let tangent = tangential.normalize();
        let jt = -relative_velocity.dot(tangent) / effective_mass(tangent);
        // Coulomb cone
        let friction = if jt.abs() <= j * material.static_friction {
            jt
        } else {
            -j * material.dynamic_friction
        };
        impulse += tangent * friction;
    }

    Some(ContactImpulse { impulse, r1, r2 })
}

/// Applies an impulse pair, skipping bodies the solver must not move.
pub(crate) fn apply_contact_impulse(first: &mut RigidBody, second: &mut RigidBody, contact: &ContactImpulse) {
    if first.is_movable() {
        first.apply_impulse(contact.impulse, contact.r1);
    }
    if second.is_movable() {
        second.apply_impulse(-contact.impulse, contact.r2);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::common::Material;
    use crate::math::vec2::Vec2;
    use crate::objects::RigidBody;
    use crate::shapes::Circle;

    /// Frictionless circle of radius 10 and mass 1.
    pub fn ball(x: f32, velocity_x: f32, restitution: f32) -> RigidBody {
        RigidBody::new(Circle::new(Vec2::new(x, 0.0), 10.0), 1.0)
            .unwrap()
            .with_material(Material::frictionless(restitution))
            .with_velocity(Vec2::new(velocity_x, 0.0))
    }
}
