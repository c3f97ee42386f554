use super::{apply_contact_impulse, contact_impulse, Solver};
use crate::collision::CollisionInfo;
use crate::common::PairMaterial;
use crate::objects::RigidBody;

/// Computes every contact's impulse from the same pre-contact velocities and
/// applies each one divided by the number of contact points.
///
/// Two contacts on a flat face therefore act like one contact at their
/// midpoint, which keeps resting boxes from rocking.
#[derive(Debug, Clone, Copy, Default)]
pub struct AveragedImpulseSolver;

impl Solver for AveragedImpulseSolver {
    fn apply_impulses(
        &self,
        first: &mut RigidBody,
        second: &mut RigidBody,
        info: &CollisionInfo,
        material: &PairMaterial,
    ) {
        if info.contacts.is_empty() {
            return;
        }
        let share = 1.0 / info.contacts.len() as f32;
        let impulses: Vec<_> = info
            .contacts
            .iter()
            .filter_map(|&contact| contact_impulse(first, second, info.normal, contact, material))
            .collect();

        for mut contact in impulses {
            contact.impulse *= share;
            apply_contact_impulse(first, second, &contact);
        }
    }

    fn name(&self) -> &str {
        "averaged_impulse"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{CombineMode, Material};
    use crate::math::vec2::Vec2;
    use crate::shapes::Polygon;
    use crate::solver::resolve_contact;
    use crate::solver::test_support::ball;
    const EPSILON: f32 = 1e-3;

    #[test]
    fn test_elastic_head_on_exchanges_velocities() {
        let mut a = ball(0.0, 100.0, 1.0);
        let mut b = ball(19.0, -100.0, 1.0);
        resolve_contact(&AveragedImpulseSolver, &mut a, &mut b, CombineMode::Average).unwrap();
        assert!((a.velocity.x - -100.0).abs() < EPSILON);
        assert!((b.velocity.x - 100.0).abs() < EPSILON);
        assert!(a.velocity.y.abs() < EPSILON);
        assert!(a.angular_velocity.abs() < EPSILON);
    }

    #[test]
    fn test_inelastic_head_on_shares_velocity() {
        let mut a = ball(0.0, 60.0, 0.0);
        let mut b = ball(19.0, -20.0, 0.0);
        resolve_contact(&AveragedImpulseSolver, &mut a, &mut b, CombineMode::Average).unwrap();
        assert!((a.velocity.x - 20.0).abs() < EPSILON);
        assert!((b.velocity.x - 20.0).abs() < EPSILON);
    }

    #[test]
    fn test_box_landing_flat_does_not_spin() {
        let mut crate_box = RigidBody::new(Polygon::rectangle(Vec2::new(0.0, -9.5), Vec2::splat(20.0)).unwrap(), 1.0)
            .unwrap()
            .with_material(Material::frictionless(0.0))
            .with_velocity(Vec2::new(0.0, 50.0));
        let mut floor =
            RigidBody::new_static(Polygon::rectangle(Vec2::new(0.0, 10.0), Vec2::new(200.0, 20.0)).unwrap())
                .with_material(Material::frictionless(0.0));
        let info = resolve_contact(&AveragedImpulseSolver, &mut crate_box, &mut floor, CombineMode::Average)
            .unwrap()
            .unwrap();
        assert_eq!(info.contacts.len(), 2);
        // Each corner sees a lever arm, so j = 50 / 2.5 per corner and half of
        // it is applied twice. Both materials are inelastic.
        assert!((crate_box.velocity.y - 30.0).abs() < EPSILON);
        assert!(crate_box.angular_velocity.abs() < EPSILON);
    }

    #[test]
    fn test_static_body_is_not_moved() {
        let mut a = ball(0.0, 100.0, 0.5);
        let mut wall = RigidBody::new_static(Polygon::rectangle(Vec2::new(14.0, 0.0), Vec2::new(10.0, 100.0)).unwrap());
        resolve_contact(&AveragedImpulseSolver, &mut a, &mut wall, CombineMode::Average).unwrap();
        assert_eq!(wall.velocity, Vec2::ZERO);
        assert!(a.velocity.x < 0.0);
    }
}
