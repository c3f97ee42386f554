// Ray and segment intersection routines.

use super::manifold::{AabbHit, CircleHit, Crossing, EdgeHit, PolygonHit};
use crate::collision::AABB;
use crate::error::{PhysicsError, PhysicsResult};
use crate::math::vec2::Vec2;
use crate::shapes::{Circle, Polygon, Ray};

/// Hits closer than this along the ray are treated as the same crossing.
const SAME_HIT_EPSILON: f32 = 1e-5;

/// Slab test of a ray against a box.
///
/// Returns `None` when an entry or exit time is NaN (the origin sits on a slab
/// the ray runs parallel to), when the slabs do not overlap, or when the box
/// lies entirely behind the origin.
pub fn ray_vs_aabb(ray: &Ray, aabb: &AABB) -> Option<AabbHit> {
    let direction = ray.direction();
    let inv = Vec2::new(1.0 / direction.x, 1.0 / direction.y);

    let t_min = (aabb.min - ray.origin).mul_elem(inv);
    let t_max = (aabb.max - ray.origin).mul_elem(inv);
    if t_min.x.is_nan()
        || t_min.y.is_nan()
        || t_max.x.is_nan()
        || t_max.y.is_nan()
    {
        return None;
    }

    let near = t_min.min(t_max);
    let far = t_min.max(t_max);
    if near.x > far.y || near.y > far.x {
        return None;
    }

    let t_near = near.x.max(near.y);
    let t_far = far.x.min(far.y);
    if t_far < 0.0 {
        return None;
    }

    let normal = if near.x > near.y {
        if inv.x < 0.0 {
            Vec2::new(1.0, 0.0)
        } else {
            Vec2::new(-1.0, 0.0)
        }
    } else if inv.y < 0.0 {
        Vec2::new(0.0, 1.0)
    } else {
        Vec2::new(0.0, -1.0)
    };

    Some(AabbHit {
        t_near,
        t_far,
        point: ray.point_at(t_near),
        normal,
    })
}

/// Unbounded intersection of two parametric lines.
fn line_crossing(o1: Vec2, d1: Vec2, o2: Vec2, d2: Vec2) -> Crossing {
    if o1 == o2 {
        return Crossing::Hit {
            point: o1,
            t: 0.0,
            u: 0.0,
        };
    }

    let determinant = d1.cross(d2);
    if determinant.abs() < 1e-10 {
        return Crossing::Parallel;
    }

    let delta = o2 - o1;
    let t = delta.cross(d2) / determinant;
    let u = delta.cross(d1) / determinant;
    Crossing::Hit {
        point: o1 + d1 * t,
        t,
        u,
    }
}

/// Intersects two half-infinite rays (`t >= 0` and `u >= 0`).
pub fn ray_vs_ray(a: &Ray, b: &Ray) -> Crossing {
    match line_crossing(a.origin, a.direction(), b.origin, b.direction()) {
        Crossing::Hit { t, u, .. } if t < 0.0 || u < 0.0 => Crossing::Miss,
        other => other,
    }
}

/// Intersects segments `a1..a2` and `b1..b2`; both parameters must lie in `[0, 1]`.
pub fn segment_vs_segment(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> Crossing {
    match line_crossing(a1, a2 - a1, b1, b2 - b1) {
        Crossing::Hit { t, u, .. } if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) => {
            Crossing::Miss
        }
        other => other,
    }
}

/// Casts a half-infinite ray through a convex polygon.
///
/// Every edge is tested as a bounded segment. Crossings at a shared vertex
/// count once; more than two distinct crossings means the polygon is not
/// convex and is reported as an error.
pub fn ray_vs_polygon(ray: &Ray, polygon: &Polygon) -> PhysicsResult<Option<PolygonHit>> {
    let origin = ray.origin;
    let direction = ray.direction();
    let center = polygon.position();
    let mut hits: Vec<EdgeHit> = Vec::with_capacity(2);

    for (start, end) in polygon.edges() {
        let edge = end - start;
        let Crossing::Hit { point, t, u } = line_crossing(origin, direction, start, edge) else {
            continue;
        };
        if t < 0.0 || !(0.0..=1.0).contains(&u) {
            continue;
        }
        if hits.iter().any(|h| (h.t - t).abs() < SAME_HIT_EPSILON) {
            continue;
        }

        let mut normal = edge.perpendicular().normalize();
        if normal.dot(start - center) < 0.0 {
            normal = -normal;
        }
        hits.push(EdgeHit { t, point, normal });
    }

    if hits.len() > 2 {
        return Err(PhysicsError::NonConvexPolygon { hits: hits.len() });
    }

    hits.sort_by(|a, b| a.t.total_cmp(&b.t));
    let mut hits = hits.into_iter();
    Ok(hits.next().map(|near| PolygonHit {
        near,
        far: hits.next(),
    }))
}

/// Casts a half-infinite ray through a circle.
///
/// `t_near` is negative when the origin lies inside the circle.
pub fn ray_vs_circle(ray: &Ray, circle: &Circle) -> Option<CircleHit> {
    let direction = ray.direction();
    let a = direction.length_squared();
    if a == 0.0 {
        return None;
    }

    let offset = ray.origin - circle.center;
    let b = 2.0 * offset.dot(direction);
    let c = offset.length_squared() - circle.radius * circle.radius;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let t_near = (-b - root) / (2.0 * a);
    let t_far = (-b + root) / (2.0 * a);
    if t_far < 0.0 {
        return None;
    }

    let point = ray.point_at(t_near);
    Some(CircleHit {
        t_near,
        t_far,
        point,
        normal: (point - circle.center).normalize(),
    })
}
