// Implements a hashed uniform grid for broadphase collision detection.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::Hash;

use super::broad_phase::{ordered_pair, BroadPhase};
use crate::collision::AABB;
use crate::error::{PhysicsError, PhysicsResult};
use crate::math::vec2::Vec2;

/// A uniform grid keyed by cell coordinates.
///
/// Cells are `segment_size` wide and only exist while they hold something,
/// so the grid has no fixed extent. An item is listed in every cell its box
/// touches.
#[derive(Debug, Clone)]
pub struct SpatialGrid<T> {
    inv_cell_size: f32, // 1.0 / cell_size, cached for performance
    cells: BTreeMap<(i32, i32), Vec<T>>,
    boxes: HashMap<T, AABB>,
}

impl<T> SpatialGrid<T>
where
    T: Copy + Eq + Hash + Ord,
{
    /// Creates a new SpatialGrid.
    ///
    /// # Arguments
    /// * `cell_size` - The width and height of each grid cell.
    ///
    /// Panics if `cell_size` is not positive.
    pub fn new(cell_size: f32) -> Self {
        assert!(cell_size > 0.0, "Cell size must be positive");
        SpatialGrid {
            inv_cell_size: 1.0 / cell_size,
            cells: BTreeMap::new(),
            boxes: HashMap::new(),
        }
    }

    pub fn cell_size(&self) -> f32 {
        1.0 / self.inv_cell_size
    }

    /// Number of cells currently holding at least one item.
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Converts world coordinates to grid cell indices (col, row).
    #[inline]
    fn get_cell_indices(&self, point: Vec2) -> (i32, i32) {
        let col = (point.x * self.inv_cell_size).floor() as i32;
        let row = (point.y * self.inv_cell_size).floor() as i32;
        (col, row)
    }

    /// Every cell key touched by an AABB.
    fn get_cell_range(&self, aabb: &AABB) -> impl Iterator<Item = (i32, i32)> {
        let (min_col, min_row) = self.get_cell_indices(aabb.min);
        let (max_col, max_row) = self.get_cell_indices(aabb.max);
        (min_row..=max_row).flat_map(move |row| (min_col..=max_col).map(move |col| (col, row)))
    }
}

impl<T> BroadPhase<T> for SpatialGrid<T>
where
    T: Copy + Eq + Hash + Ord,
{
    fn insert(&mut self, item: T, aabb: AABB) -> PhysicsResult<()> {
        if self.boxes.contains_key(&item) {
            return Err(PhysicsError::DuplicateItem);
        }
        let keys: Vec<(i32, i32)> = self.get_cell_range(&aabb).collect();
        for key in keys {
            self.cells.entry(key).or_default().push(item);
        }
        self.boxes.insert(item, aabb);
        Ok(())
    }

    fn remove(&mut self, item: T) -> PhysicsResult<AABB> {
        let aabb = self.boxes.remove(&item).ok_or(PhysicsError::MissingItem)?;
        let keys: Vec<(i32, i32)> = self.get_cell_range(&aabb).collect();
        for key in keys {
            if let Some(cell) = self.cells.get_mut(&key) {
                cell.retain(|i| *i != item);
                if cell.is_empty() {
                    self.cells.remove(&key);
                }
            }
        }
        Ok(aabb)
    }

    fn contains(&self, item: T) -> bool {
        self.boxes.contains_key(&item)
    }

    fn query(&self, region: &AABB) -> Vec<T> {
        let mut found = BTreeSet::new();
        for key in self.get_cell_range(region) {
            let Some(cell) = self.cells.get(&key) else {
                continue;
            };
            for item in cell {
                if self.boxes.get(item).is_some_and(|b| b.overlaps(region)) {
                    found.insert(*item);
                }
            }
        }
        found.into_iter().collect()
    }

    fn find_all_intersections(&self) -> Vec<(T, T)> {
        // A pair sharing several cells is seen once per cell; the set keeps one.
        let mut pairs = BTreeSet::new();
        for indices in self.cells.values() {
            for (i, a) in indices.iter().enumerate() {
                for b in &indices[i + 1..] {
                    let (Some(a_box), Some(b_box)) = (self.boxes.get(a), self.boxes.get(b)) else {
                        continue;
                    };
                    if a_box.overlaps(b_box) {
                        pairs.insert(ordered_pair(*a, *b));
                    }
                }
            }
        }
        pairs.into_iter().collect()
    }

    fn len(&self) -> usize {
        self.boxes.len()
    }

    fn clear(&mut self) {
        self.cells.clear();
        self.boxes.clear();
    }

    fn name(&self) -> &str {
        "hashed_grid"
    }
}
