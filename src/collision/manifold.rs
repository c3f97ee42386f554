use crate::math::vec2::Vec2;

/// Result of a narrow-phase test between two colliders.
///
/// `normal` points from the second shape toward the first, so moving the
/// first shape by `normal * overlap` separates the pair. When `swapped` is set
/// the detector reordered its operands and the caller has to exchange its body
/// references before applying the result.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionInfo {
    pub normal: Vec2,
    /// World-space contact points. Circle pairs carry exactly one.
    pub contacts: Vec<Vec2>,
    /// Penetration depth along `normal`.
    pub overlap: f32,
    pub swapped: bool,
}

impl CollisionInfo {
    pub fn new(normal: Vec2, contacts: Vec<Vec2>, overlap: f32) -> Self {
        Self {
            normal,
            contacts,
            overlap,
            swapped: false,
        }
    }

    /// Marks the result as produced with the operands in reverse order.
    pub fn swapped(mut self) -> Self {
        self.swapped = !self.swapped;
        self
    }

    /// Translation that moves the first shape out of the second.
    pub fn mtv(&self) -> Vec2 {
        self.normal * self.overlap
    }
}

/// Where a ray crossed an axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AabbHit {
    /// Entry parameter along the ray; negative when the origin is inside.
    pub t_near: f32,
    pub t_far: f32,
    pub point: Vec2,
    /// Normal of the slab the ray entered last.
    pub normal: Vec2,
}

/// Outcome of intersecting two parametric lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Crossing {
    /// The lines meet at `point = o1 + d1 * t = o2 + d2 * u`.
    Hit { point: Vec2, t: f32, u: f32 },
    /// Parallel or collinear; no contact is reported.
    Parallel,
    /// The lines meet outside the accepted parameter range.
    Miss,
}

impl Crossing {
    pub fn point(&self) -> Option<Vec2> {
        match self {
            Crossing::Hit { point, .. } => Some(*point),
            _ => None,
        }
    }

    pub fn is_parallel(&self) -> bool {
        matches!(self, Crossing::Parallel)
    }
}

/// A ray crossing one polygon edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeHit {
    pub t: f32,
    pub point: Vec2,
    /// Unit normal of the crossed edge, facing out of the polygon.
    pub normal: Vec2,
}

/// Entry and exit crossings of a ray through a convex polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonHit {
    pub near: EdgeHit,
    /// Missing when the ray only crosses the boundary once.
    pub far: Option<EdgeHit>,
}

/// Entry and exit parameters of a ray through a circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleHit {
    pub t_near: f32,
    pub t_far: f32,
    pub point: Vec2,
    pub normal: Vec2,
}
