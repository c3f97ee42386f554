use super::{apply_contact_impulse, contact_impulse, Solver};
use crate::collision::CollisionInfo;
use crate::common::PairMaterial;
use crate::objects::RigidBody;

/// Resolves contact points one after another, each from the velocities left
/// by the previous one.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialImpulseSolver;

impl Solver for SequentialImpulseSolver {
    fn apply_impulses(
        &self,
        first: &mut RigidBody,
        second: &mut RigidBody,
        info: &CollisionInfo,
        material: &PairMaterial,
    ) {
        for &contact in &info.contacts {
            if let Some(impulse) = contact_impulse(first, second, info.normal, contact, material) {
                apply_contact_impulse(first, second, &impulse);
            }
        }
    }

    fn name(&self) -> &str {
        "sequential_impulse"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{CombineMode, Material};
    use crate::math::vec2::Vec2;
    use crate::shapes::Polygon;
    use crate::solver::test_support::ball;
    use crate::solver::{resolve_contact, AveragedImpulseSolver};
    const EPSILON: f32 = 1e-3;

    #[test]
    fn test_single_contact_matches_averaged() {
        let mut a = ball(0.0, 100.0, 1.0);
        let mut b = ball(19.0, -100.0, 1.0);
        resolve_contact(&SequentialImpulseSolver, &mut a, &mut b, CombineMode::Average).unwrap();
        assert!((a.velocity.x - -100.0).abs() < EPSILON);
        assert!((b.velocity.x - 100.0).abs() < EPSILON);
    }

    #[test]
    fn test_two_contacts_differ_from_averaged() {
        let make = || {
            let body = RigidBody::new(Polygon::rectangle(Vec2::new(0.0, -9.5), Vec2::splat(20.0)).unwrap(), 1.0)
                .unwrap()
                .with_material(Material::frictionless(0.0))
                .with_velocity(Vec2::new(0.0, 50.0));
            let floor =
                RigidBody::new_static(Polygon::rectangle(Vec2::new(0.0, 10.0), Vec2::new(200.0, 20.0)).unwrap())
                    .with_material(Material::frictionless(0.0));
            (body, floor)
        };

        let (mut seq_box, mut seq_floor) = make();
        resolve_contact(&SequentialImpulseSolver, &mut seq_box, &mut seq_floor, CombineMode::Average).unwrap();
        let (mut avg_box, mut avg_floor) = make();
        resolve_contact(&AveragedImpulseSolver, &mut avg_box, &mut avg_floor, CombineMode::Average).unwrap();

        // The first corner hit leaves the box spinning; averaging does not.
        assert!(seq_box.angular_velocity.abs() > EPSILON);
        assert!(avg_box.angular_velocity.abs() < EPSILON);
        assert!(seq_box.velocity.y < 50.0);
    }
}
