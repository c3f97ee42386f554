// Defines an Axis-Aligned Bounding Box

use serde::{Deserialize, Serialize};

use crate::math::vec2::Vec2;

/// An Axis-Aligned Bounding Box defined by its minimum and maximum corner points.
///
/// `min` is component-wise less than or equal to `max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AABB {
    pub min: Vec2,
    pub max: Vec2,
}

impl AABB {
    /// Creates a new AABB, ordering the corners so that `min <= max`.
    pub fn new(min: Vec2, max: Vec2) -> Self {
        AABB {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = Vec2::new(size.x.abs(), size.y.abs()) * 0.5;
        AABB {
            min: center - half,
            max: center + half,
        }
    }

    /// Creates an AABB that encompasses a set of points.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut min_pt = *first;
        let mut max_pt = *first;
        for point in rest {
            min_pt = min_pt.min(*point);
            max_pt = max_pt.max(*point);
        }
        Some(AABB {
            min: min_pt,
            max: max_pt,
        })
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Corners in the order min, (max.x, min.y), max, (min.x, max.y).
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            self.max,
            Vec2::new(self.min.x, self.max.y),
        ]
    }

    /// Moves the box so its center lands on `center`, keeping its size.
    pub fn set_center(&mut self, center: Vec2) {
        *self = Self::from_center_size(center, self.size());
    }

    /// Resizes the box around its current center.
    pub fn set_size(&mut self, size: Vec2) {
        *self = Self::from_center_size(self.center(), size);
    }

    /// Box with the same center and its size multiplied by `factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        Self::from_center_size(self.center(), self.size() * factor)
    }

    pub fn is_empty(&self) -> bool {
        self.max.x <= self.min.x || self.max.y <= self.min.y
    }

    /// Checks if this AABB overlaps with another AABB. Touching edges count.
    pub fn overlaps(&self, other: &AABB) -> bool {
        let x_overlap = self.min.x <= other.max.x && self.max.x >= other.min.x;
        let y_overlap = self.min.y <= other.max.y && self.max.y >= other.min.y;
        x_overlap && y_overlap
    }

    /// Checks whether `other` lies entirely inside this box (edges inclusive).
    pub fn contains(&self, other: &AABB) -> bool {
        other.min.x >= self.min.x
            && other.max.x <= self.max.x
            && other.min.y >= self.min.y
            && other.max.y <= self.max.y
    }

    /// Half-open point test: the min edges are exclusive, the max edges inclusive,
    /// so tiled boxes never both claim a shared boundary point.
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x > self.min.x && point.x <= self.max.x && point.y > self.min.y && point.y <= self.max.y
    }

    /// Merges another AABB into this one, expanding this AABB to contain both.
    pub fn merge(&mut self, other: &AABB) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }
}
