//! Broad phase collision detection trait.
//!
//! Keeps the bounding box of every registered item and quickly finds the
//! candidate pairs whose boxes overlap. The narrow phase then runs the exact
//! shape tests on those candidates.

use std::hash::Hash;

use crate::collision::AABB;
use crate::error::PhysicsResult;

/// Spatial index over axis-aligned boxes keyed by an opaque item.
///
/// Results come back in a stable order (pairs as `(low, high)`, sorted), so
/// two runs over the same operations resolve collisions identically.
///
/// # Implementations
/// - `QuadTree` - adaptive quadrant tree over fixed world bounds
/// - `SpatialGrid` - uniform hashed grid keyed by segment size
pub trait BroadPhase<T>
where
    T: Copy + Eq + Hash + Ord,
{
    /// Registers `item` with its box. Fails if it is already present.
    fn insert(&mut self, item: T, aabb: AABB) -> PhysicsResult<()>;

    /// Unregisters `item` and returns the box it was stored with.
    fn remove(&mut self, item: T) -> PhysicsResult<AABB>;

    /// Moves `item` to a new box; equivalent to remove then insert.
    fn update(&mut self, item: T, aabb: AABB) -> PhysicsResult<()> {
        self.remove(item)?;
        self.insert(item, aabb)
    }

    fn contains(&self, item: T) -> bool;

    /// Items whose boxes overlap `region`.
    fn query(&self, region: &AABB) -> Vec<T>;

    /// Every unordered pair of distinct items with overlapping boxes, once.
    fn find_all_intersections(&self) -> Vec<(T, T)>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);

    /// Returns the strategy name, used in logs.
    fn name(&self) -> &str;
}

/// Orders a pair so the smaller item comes first.
pub(crate) fn ordered_pair<T: Ord>(a: T, b: T) -> (T, T) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
