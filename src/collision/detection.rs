use super::contact_points::polygon_contact_points;
use super::manifold::CollisionInfo;
use super::raycast::{ray_vs_circle, ray_vs_polygon};
use crate::error::{PhysicsError, PhysicsResult};
use crate::math::vec2::Vec2;
use crate::shapes::{Circle, Collider, Polygon, Ray};

/// Finds the point on a line segment closest to a given point.
/// Returns the closest point and the parameter `t` (0 <= t <= 1) along the segment.
pub fn closest_point_on_segment(segment_a: Vec2, segment_b: Vec2, point: Vec2) -> (Vec2, f32) {
    let segment_vec = segment_b - segment_a;
    let length_sq = segment_vec.length_squared();
    if length_sq < 1e-12 {
        // Zero-length segment: the only candidate is its start.
        return (segment_a, 0.0);
    }

    let t = ((point - segment_a).dot(segment_vec) / length_sq).clamp(0.0, 1.0);
    (segment_a + segment_vec * t, t)
}

/// Closest point on the polygon boundary to `point`, with the outward normal
/// of the edge it lies on.
fn closest_boundary_point(polygon: &Polygon, point: Vec2) -> (Vec2, Vec2) {
    let center = polygon.position();
    let mut best = (polygon.vertices()[0], Vec2::UP);
    let mut best_dist_sq = f32::INFINITY;

    for (start, end) in polygon.edges() {
        let (candidate, _) = closest_point_on_segment(start, end, point);
        let dist_sq = candidate.distance_squared(point);
        if dist_sq < best_dist_sq {
            let mut normal = (end - start).perpendicular().normalize();
            if normal.dot(start - center) < 0.0 {
                normal = -normal;
            }
            best_dist_sq = dist_sq;
            best = (candidate, normal);
        }
    }
    best
}

/// Projects vertices onto an axis and returns the (min, max) interval.
fn project_onto_axis(vertices: &[Vec2], axis: Vec2) -> (f32, f32) {
    vertices.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
        let projection = v.dot(axis);
        (lo.min(projection), hi.max(projection))
    })
}

/// Checks for collision between two circles.
///
/// The normal points from `b` toward `a` and the single contact point lies on
/// `b`'s boundary. Coincident centers fall back to an upward normal with the
/// full radius sum as overlap.
pub fn circle_vs_circle(a: &Circle, b: &Circle) -> Option<CollisionInfo> {
    let dist_vec = a.center - b.center;
    let radii_sum = a.radius + b.radius;
    let dist_sq = dist_vec.length_squared();
    if dist_sq >= radii_sum * radii_sum {
        return None;
    }

    let distance = dist_sq.sqrt();
    let normal = if distance > 0.0 {
        dist_vec / distance
    } else {
        Vec2::UP
    };
    let contact = b.center + normal * b.radius;
    Some(CollisionInfo::new(normal, vec![contact], radii_sum - distance))
}

/// Checks for collision between a circle and a convex polygon.
///
/// The normal points from the polygon toward the circle. When the circle's
/// center is outside, the overlap is the radius minus the distance to the
/// boundary. When the center is inside, the normal is flipped to run from the
/// center toward the nearest boundary point and the overlap becomes distance
/// plus radius, which pushes the circle completely clear.
pub fn circle_vs_polygon(circle: &Circle, polygon: &Polygon) -> Option<CollisionInfo> {
    let (closest, edge_normal) = closest_boundary_point(polygon, circle.center);
    let inside = polygon.contains_point(circle.center);
    let distance = closest.distance(circle.center);

    if !inside && distance > circle.radius {
        return None;
    }

    let (normal, overlap) = if inside {
        let to_boundary = closest - circle.center;
        let normal = if distance > 0.0 {
            to_boundary / distance
        } else {
            edge_normal
        };
        (normal, distance + circle.radius)
    } else {
        let from_boundary = circle.center - closest;
        let normal = if distance > 0.0 {
            from_boundary / distance
        } else {
            edge_normal
        };
        (normal, circle.radius - distance)
    };

    Some(CollisionInfo::new(normal, vec![closest], overlap))
}

/// Separating axis test between two convex polygons.
///
/// Every edge normal of both shapes is tried; the axis with the smallest
/// positive overlap becomes the normal, flipped if needed so it points from
/// `b`'s center toward `a`'s center. Touching polygons (zero overlap) are
/// reported as disjoint.
pub fn polygon_vs_polygon(a: &Polygon, b: &Polygon) -> Option<CollisionInfo> {
    let mut min_overlap = f32::INFINITY;
    let mut best_axis = Vec2::ZERO;

    for polygon in [a, b] {
        for (start, end) in polygon.edges() {
            let axis = (end - start).perpendicular().normalize();
            if axis.length_squared() < 1e-10 {
                continue;
            }

            let (min_a, max_a) = project_onto_axis(a.vertices(), axis);
            let (min_b, max_b) = project_onto_axis(b.vertices(), axis);
            let overlap = max_a.min(max_b) - min_a.max(min_b);
            if overlap <= 0.0 {
                return None;
            }
            if overlap < min_overlap {
                min_overlap = overlap;
                best_axis = axis;
            }
        }
    }

    let mut normal = best_axis;
    if (a.position() - b.position()).dot(normal) < 0.0 {
        normal = -normal;
    }

    Some(CollisionInfo::new(normal, polygon_contact_points(a, b), min_overlap))
}

/// Collision between a ray collider and a solid shape.
///
/// Only the part of the ray between its origin and end counts. The overlap is
/// the length of ray that lies inside the shape; the normal is the surface
/// normal where the ray enters (or leaves, if it starts inside).
fn ray_vs_collider(ray: &Ray, other: &Collider) -> PhysicsResult<Option<CollisionInfo>> {
    let length = ray.length();
    let backwards = -ray.direction().normalize();

    let (entry, exit, normal, contacts) = match other {
        Collider::Circle(circle) => {
            let Some(hit) = ray_vs_circle(ray, circle) else {
                return Ok(None);
            };
            if hit.t_near > 1.0 {
                return Ok(None);
            }
            let mut contacts = Vec::with_capacity(2);
            if hit.t_near >= 0.0 {
                contacts.push(hit.point);
            }
            if hit.t_far <= 1.0 {
                contacts.push(ray.point_at(hit.t_far));
            }
            let normal = if hit.t_near >= 0.0 {
                hit.normal
            } else {
                (circle.center - ray.point_at(hit.t_far)).normalize()
            };
            (hit.t_near.max(0.0), hit.t_far.min(1.0), normal, contacts)
        }
        Collider::Polygon(polygon) => {
            let Some(hit) = ray_vs_polygon(ray, polygon)? else {
                return Ok(None);
            };
            let origin_inside = polygon.contains_point(ray.origin);
            let mut crossings = std::iter::once(hit.near)
                .chain(hit.far)
                .filter(|h| h.t <= 1.0)
                .collect::<Vec<_>>();
            if crossings.is_empty() && !origin_inside {
                return Ok(None);
            }
            let (entry, exit) = if origin_inside {
                (0.0, crossings.first().map_or(1.0, |h| h.t))
            } else {
                (crossings[0].t, crossings.get(1).map_or(1.0, |h| h.t))
            };
            let normal = match crossings.first() {
                Some(h) if origin_inside => -h.normal,
                Some(h) => h.normal,
                None => backwards,
            };
            let contacts = crossings.drain(..).map(|h| h.point).collect();
            (entry, exit, normal, contacts)
        }
        Collider::Ray(_) => return Err(PhysicsError::RayPair),
    };

    Ok(Some(CollisionInfo::new(normal, contacts, (exit - entry).max(0.0) * length)))
}

/// Runs the narrow-phase test matching the two colliders' shapes.
///
/// Circle/polygon ordering and rays in second position are normalized by
/// swapping the operands; the returned `swapped` flag reports it. Two rays
/// cannot be tested against each other.
pub fn detect(a: &Collider, b: &Collider) -> PhysicsResult<Option<CollisionInfo>> {
    match (a, b) {
        (Collider::Circle(c1), Collider::Circle(c2)) => Ok(circle_vs_circle(c1, c2)),
        (Collider::Circle(c), Collider::Polygon(p)) => Ok(circle_vs_polygon(c, p)),
        (Collider::Polygon(p), Collider::Circle(c)) => Ok(circle_vs_polygon(c, p).map(CollisionInfo::swapped)),
        (Collider::Polygon(p1), Collider::Polygon(p2)) => Ok(polygon_vs_polygon(p1, p2)),
        (Collider::Ray(_), Collider::Ray(_)) => Err(PhysicsError::RayPair),
        (Collider::Ray(ray), other) => ray_vs_collider(ray, other),
        (other, Collider::Ray(ray)) => Ok(ray_vs_collider(ray, other)?.map(CollisionInfo::swapped)),
    }
}
