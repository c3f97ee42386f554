use super::vec2::Vec2;

/// Placement of a shape in the world.
///
/// Local points are rotated, then scaled component-wise, then translated.
/// A non-uniform scale therefore stretches along the world axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub rotation: f32, // Angle in radians
    pub scale: Vec2,
}

impl Transform {
    /// Creates a new transform with unit scale.
    pub fn new(position: Vec2, rotation: f32) -> Self {
        Self {
            position,
            rotation,
            scale: Vec2::ONE,
        }
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Creates an identity transform (no translation, no rotation, unit scale).
    pub fn identity() -> Self {
        Self::new(Vec2::ZERO, 0.0)
    }

    /// Maps a local point into world space.
    pub fn apply(&self, point: Vec2) -> Vec2 {
        point.rotate(self.rotation).mul_elem(self.scale) + self.position
    }

    /// Maps a world point back into local space.
    pub fn apply_inverse(&self, point: Vec2) -> Vec2 {
        (point - self.position)
            .div_elem(self.scale)
            .rotate(-self.rotation)
    }

    /// Rotation composes by angle addition.
    pub fn rotated_by(mut self, angle: f32) -> Self {
        self.rotation = wrap_angle(self.rotation + angle);
        self
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Wraps an angle in radians to the range [-PI, PI].
pub fn wrap_angle(angle: f32) -> f32 {
    angle.sin().atan2(angle.cos())
}
