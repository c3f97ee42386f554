//! Defines physical material properties.

use serde::{Deserialize, Serialize};

/// Represents the physical properties of a rigid body affecting collisions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Coefficient of restitution (bounciness). Range [0, 1].
    /// 0 = perfectly inelastic (no bounce), 1 = perfectly elastic.
    pub restitution: f32,
    /// Friction coefficient bounding the impulse that still holds a contact in place.
    pub static_friction: f32,
    /// Friction coefficient used once a contact slides.
    pub dynamic_friction: f32,
    /// Quadratic drag applied to the body's velocity every step.
    pub air_drag: f32,
}

impl Material {
    /// Creates a new material, clamping every coefficient into its valid range.
    pub fn new(restitution: f32, static_friction: f32, dynamic_friction: f32, air_drag: f32) -> Self {
        Material {
            restitution: restitution.clamp(0.0, 1.0),
            static_friction: static_friction.max(0.0),
            dynamic_friction: dynamic_friction.max(0.0),
            air_drag: air_drag.max(0.0),
        }
    }

    /// No bounce, no friction, no drag.
    pub fn frictionless(restitution: f32) -> Self {
        Self::new(restitution, 0.0, 0.0, 0.0)
    }
}

impl Default for Material {
    /// Default material properties (low restitution, moderate friction, no drag).
    fn default() -> Self {
        Material {
            restitution: 0.2,
            static_friction: 0.6,
            dynamic_friction: 0.4,
            air_drag: 0.0,
        }
    }
}

/// How two bodies' coefficients are merged into the value used for their contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CombineMode {
    Min,
    Max,
    #[default]
    Average,
}

impl CombineMode {
    pub fn combine(self, a: f32, b: f32) -> f32 {
        match self {
            CombineMode::Min => a.min(b),
            CombineMode::Max => a.max(b),
            CombineMode::Average => (a + b) * 0.5,
        }
    }
}

/// Coefficients in effect for one contacting pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairMaterial {
    pub restitution: f32,
    pub static_friction: f32,
    pub dynamic_friction: f32,
}

impl PairMaterial {
    pub fn combine(a: &Material, b: &Material, mode: CombineMode) -> Self {
        Self {
            restitution: mode.combine(a.restitution, b.restitution),
            static_friction: mode.combine(a.static_friction, b.static_friction),
            dynamic_friction: mode.combine(a.dynamic_friction, b.dynamic_friction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_material_new_clamps() {
        let m = Material::new(1.5, -1.0, 0.3, -0.2);
        assert_eq!(m.restitution, 1.0);
        assert_eq!(m.static_friction, 0.0);
        assert_eq!(m.dynamic_friction, 0.3);
        assert_eq!(m.air_drag, 0.0);
    }

    #[test]
    fn test_combine_modes() {
        assert_eq!(CombineMode::Min.combine(0.2, 0.8), 0.2);
        assert_eq!(CombineMode::Max.combine(0.2, 0.8), 0.8);
        assert!((CombineMode::Average.combine(0.2, 0.8) - 0.5).abs() < EPSILON);
        assert_eq!(CombineMode::default(), CombineMode::Average);
    }

    #[test]
    fn test_pair_material() {
        let bouncy = Material::new(1.0, 0.1, 0.05, 0.0);
        let sticky = Material::new(0.0, 0.9, 0.7, 0.0);
        let pair = PairMaterial::combine(&bouncy, &sticky, CombineMode::Max);
        assert_eq!(pair.restitution, 1.0);
        assert_eq!(pair.static_friction, 0.9);
        assert_eq!(pair.dynamic_friction, 0.7);
    }
}
