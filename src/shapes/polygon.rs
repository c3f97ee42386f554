use crate::collision::AABB;
use crate::error::{PhysicsError, PhysicsResult};
use crate::math::{Transform, Vec2};

/// A convex polygon.
///
/// Model vertices are sorted by angle around their mean point and shifted so
/// the area centroid sits at the origin. World vertices and the bounding box
/// are cached and recomputed whenever the transform changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    model: Vec<Vec2>,
    transform: Transform,
    world: Vec<Vec2>,
    aabb: AABB,
}

impl Polygon {
    /// Creates a polygon from vertices given in any order.
    ///
    /// Fails with fewer than 3 vertices or when all of them are collinear.
    pub fn new(vertices: Vec<Vec2>) -> PhysicsResult<Self> {
        if vertices.len() < 3 {
            return Err(PhysicsError::TooFewVertices(vertices.len()));
        }

        let mean = vertices.iter().fold(Vec2::ZERO, |acc, v| acc + *v) / vertices.len() as f32;
        let mut sorted = vertices;
        // Stable sort keeps input order for equal angles.
        sorted.sort_by(|a, b| (*a - mean).angle().total_cmp(&(*b - mean).angle()));

        if signed_area(&sorted).abs() < 1e-6 {
            return Err(PhysicsError::CollinearPolygon);
        }

        let centroid = area_centroid(&sorted);
        let model: Vec<Vec2> = sorted.into_iter().map(|v| v - centroid).collect();

        let mut polygon = Polygon {
            world: model.clone(),
            model,
            transform: Transform::identity(),
            aabb: AABB::new(Vec2::ZERO, Vec2::ZERO),
        };
        polygon.recompute();
        Ok(polygon)
    }

    /// Axis-aligned rectangle centered on `center`.
    pub fn rectangle(center: Vec2, size: Vec2) -> PhysicsResult<Self> {
        let half = size * 0.5;
        let mut polygon = Self::new(vec![
            Vec2::new(-half.x, -half.y),
            Vec2::new(half.x, -half.y),
            Vec2::new(half.x, half.y),
            Vec2::new(-half.x, half.y),
        ])?;
        polygon.set_position(center);
        Ok(polygon)
    }

    /// Vertices in model space (centroid at the origin).
    pub fn model(&self) -> &[Vec2] {
        &self.model
    }

    /// Cached world-space vertices.
    pub fn vertices(&self) -> &[Vec2] {
        &self.world
    }

    pub fn aabb(&self) -> AABB {
        self.aabb
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    pub fn rotation(&self) -> f32 {
        self.transform.rotation
    }

    pub fn scale(&self) -> Vec2 {
        self.transform.scale
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.transform.position = position;
        self.recompute();
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.transform.rotation = rotation;
        self.recompute();
    }

    pub fn set_scale(&mut self, scale: Vec2) {
        self.transform.scale = scale;
        self.recompute();
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.recompute();
    }

    /// World-space edges as `(start, end)` pairs, closing back to the first vertex.
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.world.len();
        (0..n).map(move |i| (self.world[i], self.world[(i + 1) % n]))
    }

    /// Area centroid of the model vertices; the origin up to rounding.
    pub fn centroid(&self) -> Vec2 {
        area_centroid(&self.model)
    }

    pub fn area(&self) -> f32 {
        signed_area(&self.world_offsets()).abs()
    }

    /// Moment of inertia about the centroid for a uniform body of `mass`.
    ///
    /// Measured on the current world shape. With a non-uniform scale the
    /// result depends on the rotation it was taken at.
    pub fn inertia(&self, mass: f32) -> f32 {
        let offsets = self.world_offsets();
        let n = offsets.len();
        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for i in 0..n {
            let a = offsets[i];
            let b = offsets[(i + 1) % n];
            let cross = a.cross(b);
            numerator += cross * (a.dot(a) + a.dot(b) + b.dot(b));
            denominator += cross;
        }
        if denominator.abs() < f32::EPSILON {
            return f32::INFINITY;
        }
        mass / 6.0 * (numerator / denominator)
    }

    // World vertices relative to the position, which stays the area centroid
    // under any transform.
    fn world_offsets(&self) -> Vec<Vec2> {
        let position = self.transform.position;
        self.world.iter().map(|v| *v - position).collect()
    }

    /// Even-odd rule point test against the world vertices.
    pub fn contains_point(&self, point: Vec2) -> bool {
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > point.y) != (b.y > point.y) {
                let x_cross = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if point.x < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }

    fn recompute(&mut self) {
        let transform = self.transform;
        self.world.clear();
        self.world.extend(self.model.iter().map(|v| transform.apply(*v)));
        if let Some(aabb) = AABB::from_points(&self.world) {
            self.aabb = aabb;
        }
    }
}

/// Shoelace area; positive when vertices run counter-clockwise (y up).
fn signed_area(vertices: &[Vec2]) -> f32 {
    let n = vertices.len();
    let mut area = 0.0;
    for i in 0..n {
        area += vertices[i].cross(vertices[(i + 1) % n]);
    }
    area / 2.0
}

/// Centroid for uniform density, computed from a triangle fan.
fn area_centroid(vertices: &[Vec2]) -> Vec2 {
    let n = vertices.len();
    let origin = vertices[0];
    let mut centroid = Vec2::ZERO;
    let mut area_sum = 0.0;

    for i in 1..(n - 1) {
        let v2 = vertices[i];
        let v3 = vertices[i + 1];
        let triangle_area = (v2 - origin).cross(v3 - origin) / 2.0;
        area_sum += triangle_area;
        centroid += (origin + v2 + v3) / 3.0 * triangle_area;
    }

    if area_sum.abs() < 1e-10 {
        vertices.iter().fold(Vec2::ZERO, |acc, v| acc + *v) / n as f32
    } else {
        centroid / area_sum
    }
}
