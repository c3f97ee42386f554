//! Picking queries against the bound bodies.
//!
//! Both queries go through the broad phase, so bodies that left the world
//! bounds are not found.

use crate::collision::{ray_vs_circle, ray_vs_polygon, ray_vs_ray, BroadPhase, Crossing, AABB};
use crate::error::PhysicsResult;
use crate::math::vec2::Vec2;
use crate::objects::{BodyHandle, BodySet};
use crate::shapes::{Collider, Ray};

/// A body crossed by a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub body: BodyHandle,
    /// Entry parameter along the ray, `0` when it starts inside the body.
    pub t: f32,
    pub point: Vec2,
    /// Unit surface normal facing back along the ray.
    pub normal: Vec2,
}

/// Bodies whose shape contains `point`, in handle order.
pub fn bodies_at_point(bodies: &BodySet, broad_phase: &dyn BroadPhase<BodyHandle>, point: Vec2) -> Vec<BodyHandle> {
    broad_phase
        .query(&AABB::new(point, point))
        .into_iter()
        .filter(|handle| bodies.get(*handle).is_some_and(|body| body.collider().contains_point(point)))
        .collect()
}

/// Bodies crossed by `ray` within its length, nearest first.
pub fn raycast(bodies: &BodySet, broad_phase: &dyn BroadPhase<BodyHandle>, ray: &Ray) -> PhysicsResult<Vec<RayHit>> {
    let mut hits = Vec::new();
    for handle in broad_phase.query(&ray.aabb()) {
        let Some(body) = bodies.get(handle) else {
            continue;
        };
        if let Some((t, point, normal)) = cast_against(ray, body.collider())? {
            if t <= 1.0 {
                hits.push(RayHit {
                    body: handle,
                    t,
                    point,
                    normal,
                });
            }
        }
    }
    hits.sort_by(|a, b| a.t.total_cmp(&b.t).then(a.body.cmp(&b.body)));
    Ok(hits)
}

fn cast_against(ray: &Ray, collider: &Collider) -> PhysicsResult<Option<(f32, Vec2, Vec2)>> {
    let backwards = -ray.direction().normalize();
    let hit = match collider {
        Collider::Circle(circle) => ray_vs_circle(ray, circle).map(|hit| {
            if hit.t_near >= 0.0 {
                (hit.t_near, hit.point, hit.normal)
            } else {
                (0.0, ray.origin, backwards)
            }
        }),
        Collider::Polygon(polygon) => ray_vs_polygon(ray, polygon)?.map(|hit| {
            if polygon.contains_point(ray.origin) {
                (0.0, ray.origin, backwards)
            } else {
                (hit.near.t, hit.near.point, hit.near.normal)
            }
        }),
        Collider::Ray(other) => match ray_vs_ray(ray, other) {
            Crossing::Hit { point, t, u } if u <= 1.0 => {
                let mut normal = other.direction().perpendicular().normalize();
                if normal.dot(backwards) < 0.0 {
                    normal = -normal;
                }
                Some((t, point, normal))
            }
            _ => None,
        },
    };
    Ok(hit)
}
