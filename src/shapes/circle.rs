use crate::collision::AABB;
use crate::math::vec2::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
    /// Orientation of the body carrying the circle. Does not affect geometry.
    pub rotation: f32,
}

impl Circle {
    /// Panics if the radius is not strictly positive.
    pub fn new(center: Vec2, radius: f32) -> Self {
        assert!(radius > 0.0, "Circle radius must be positive");
        Self {
            center,
            radius,
            rotation: 0.0,
        }
    }

    pub fn aabb(&self) -> AABB {
        AABB::from_center_size(self.center, Vec2::splat(self.radius * 2.0))
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }

    /// Moment of inertia of a solid disc about its center.
    pub fn inertia(&self, mass: f32) -> f32 {
        0.5 * mass * self.radius * self.radius
    }
}
