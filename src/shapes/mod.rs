pub mod circle;
pub mod polygon;
pub mod ray;

pub use circle::Circle;
pub use polygon::Polygon;
pub use ray::Ray;

use crate::collision::AABB;
use crate::math::vec2::Vec2;

/// Geometric shape carried by a rigid body.
#[derive(Debug, Clone, PartialEq)]
pub enum Collider {
    Circle(Circle),
    Polygon(Polygon),
    Ray(Ray),
}

impl Collider {
    /// World-space bounding box.
    pub fn aabb(&self) -> AABB {
        match self {
            Collider::Circle(c) => c.aabb(),
            Collider::Polygon(p) => p.aabb(),
            Collider::Ray(r) => r.aabb(),
        }
    }

    /// Reference point of the shape: circle center, polygon centroid, ray origin.
    pub fn position(&self) -> Vec2 {
        match self {
            Collider::Circle(c) => c.center,
            Collider::Polygon(p) => p.position(),
            Collider::Ray(r) => r.origin,
        }
    }

    pub fn set_position(&mut self, position: Vec2) {
        match self {
            Collider::Circle(c) => c.center = position,
            Collider::Polygon(p) => p.set_position(position),
            Collider::Ray(r) => r.origin = position,
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        let position = self.position();
        self.set_position(position + delta);
    }

    pub fn rotation(&self) -> f32 {
        match self {
            Collider::Circle(c) => c.rotation,
            Collider::Polygon(p) => p.rotation(),
            Collider::Ray(r) => r.rotation,
        }
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        match self {
            Collider::Circle(c) => c.rotation = rotation,
            Collider::Polygon(p) => p.set_rotation(rotation),
            Collider::Ray(r) => r.rotation = rotation,
        }
    }

    /// Moment of inertia for a uniform body of `mass` with this shape.
    pub fn inertia(&self, mass: f32) -> f32 {
        match self {
            Collider::Circle(c) => c.inertia(mass),
            Collider::Polygon(p) => p.inertia(mass),
            // Thin rod about its midpoint.
            Collider::Ray(r) => mass * r.length() * r.length() / 12.0,
        }
    }

    /// Rays contain no area and never report a point inside.
    pub fn contains_point(&self, point: Vec2) -> bool {
        match self {
            Collider::Circle(c) => c.contains_point(point),
            Collider::Polygon(p) => p.contains_point(point),
            Collider::Ray(_) => false,
        }
    }

    pub fn is_ray(&self) -> bool {
        matches!(self, Collider::Ray(_))
    }
}

impl From<Circle> for Collider {
    fn from(circle: Circle) -> Self {
        Collider::Circle(circle)
    }
}

impl From<Polygon> for Collider {
    fn from(polygon: Polygon) -> Self {
        Collider::Polygon(polygon)
    }
}

impl From<Ray> for Collider {
    fn from(ray: Ray) -> Self {
        Collider::Ray(ray)
    }
}
