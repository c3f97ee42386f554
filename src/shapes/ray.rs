use crate::collision::AABB;
use crate::math::vec2::Vec2;

/// A ray starting at `origin` and reaching `origin + direction()`.
///
/// The direction is not normalized: its length is the ray's reach, and hit
/// parameters are expressed in multiples of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec2,
    /// Direction before rotation.
    pub model_direction: Vec2,
    pub rotation: f32,
}

impl Ray {
    pub fn new(origin: Vec2, direction: Vec2) -> Self {
        Self {
            origin,
            model_direction: direction,
            rotation: 0.0,
        }
    }

    /// Creates a ray between two points.
    pub fn between(start: Vec2, end: Vec2) -> Self {
        Self::new(start, end - start)
    }

    /// World-space direction vector.
    pub fn direction(&self) -> Vec2 {
        self.model_direction.rotate(self.rotation)
    }

    pub fn length(&self) -> f32 {
        self.model_direction.length()
    }

    pub fn end(&self) -> Vec2 {
        self.origin + self.direction()
    }

    /// Point at parameter `t` along the ray.
    pub fn point_at(&self, t: f32) -> Vec2 {
        self.origin + self.direction() * t
    }

    pub fn aabb(&self) -> AABB {
        AABB::new(self.origin, self.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;
    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_ray_between() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(4.0, 6.0);
        let ray = Ray::between(a, b);
        assert_eq!(ray.origin, a);
        assert_eq!(ray.end(), b);
        assert!((ray.length() - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_ray_rotation_keeps_length() {
        let mut ray = Ray::new(Vec2::ZERO, Vec2::new(2.0, 0.0));
        ray.rotation = PI / 2.0;
        let end = ray.end();
        assert!(end.x.abs() < EPSILON);
        assert!((end.y - 2.0).abs() < EPSILON);
        assert!((ray.length() - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_ray_aabb_orders_corners() {
        let ray = Ray::new(Vec2::new(5.0, 5.0), Vec2::new(-3.0, 2.0));
        let b = ray.aabb();
        assert_eq!(b.min, Vec2::new(2.0, 5.0));
        assert_eq!(b.max, Vec2::new(5.0, 7.0));
        assert_eq!(ray.point_at(0.5), Vec2::new(3.5, 6.0));
    }
}
