// Adaptive quadrant tree used as the default broad phase.

use std::collections::HashMap;
use std::hash::Hash;

use super::broad_phase::{ordered_pair, BroadPhase};
use crate::collision::AABB;
use crate::error::{PhysicsError, PhysicsResult};
use crate::math::vec2::Vec2;

const ROOT: usize = 0;

#[derive(Debug, Clone)]
struct Node<T> {
    bounds: AABB,
    depth: usize,
    parent: Option<usize>,
    /// Items stored at this level: everything in a leaf, and only the items
    /// straddling a quadrant boundary in an internal node.
    items: Vec<(T, AABB)>,
    children: Option<[usize; 4]>,
}

impl<T> Node<T> {
    fn new(bounds: AABB, depth: usize, parent: Option<usize>) -> Self {
        Self {
            bounds,
            depth,
            parent,
            items: Vec::new(),
            children: None,
        }
    }

    fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// A quadtree over a fixed root bound.
///
/// Nodes live in an arena and refer to each other by index; freed nodes are
/// recycled. A side table maps every item to the node holding it so removal
/// does not search the tree.
#[derive(Debug, Clone)]
pub struct QuadTree<T> {
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    locations: HashMap<T, usize>,
    threshold: usize,
    max_depth: usize,
}

impl<T> QuadTree<T>
where
    T: Copy + Eq + Hash + Ord,
{
    /// Creates an empty tree.
    ///
    /// A leaf splits once it already holds `threshold` items and lies above
    /// `max_depth`.
    pub fn new(bounds: AABB, threshold: usize, max_depth: usize) -> Self {
        Self {
            nodes: vec![Node::new(bounds, 0, None)],
            free: Vec::new(),
            locations: HashMap::new(),
            threshold: threshold.max(1),
            max_depth,
        }
    }

    pub fn bounds(&self) -> AABB {
        self.nodes[ROOT].bounds
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Depth of the deepest live node.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![ROOT];
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            deepest = deepest.max(node.depth);
            if let Some(children) = node.children {
                stack.extend(children);
            }
        }
        deepest
    }

    fn alloc(&mut self, node: Node<T>) -> usize {
        match self.free.pop() {
            Some(index) => {
                self.nodes[index] = node;
                index
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn quadrants(bounds: &AABB) -> [AABB; 4] {
        let c = bounds.center();
        [
            AABB::new(bounds.min, c),
            AABB::new(Vec2::new(c.x, bounds.min.y), Vec2::new(bounds.max.x, c.y)),
            AABB::new(Vec2::new(bounds.min.x, c.y), Vec2::new(c.x, bounds.max.y)),
            AABB::new(c, bounds.max),
        ]
    }

    /// The single child quadrant fully containing `aabb`, if any.
    fn child_for(&self, index: usize, aabb: &AABB) -> Option<usize> {
        let children = self.nodes[index].children?;
        children
            .into_iter()
            .find(|&child| self.nodes[child].bounds.contains(aabb))
    }

    /// Turns a leaf into an internal node, pushing down every item that fits
    /// inside one of the new quadrants.
    fn split(&mut self, index: usize) {
        debug_assert!(self.nodes[index].is_leaf(), "split called on an internal node");
        let depth = self.nodes[index].depth + 1;
        let quadrants = Self::quadrants(&self.nodes[index].bounds);
        let children = quadrants.map(|bounds| self.alloc(Node::new(bounds, depth, Some(index))));
        self.nodes[index].children = Some(children);

        let items = std::mem::take(&mut self.nodes[index].items);
        for (item, aabb) in items {
            let target = self.child_for(index, &aabb).unwrap_or(index);
            self.nodes[target].items.push((item, aabb));
            self.locations.insert(item, target);
        }
    }

    /// Collapses the children of `index` back into it when they are all
    /// leaves and hold no more than `threshold` items together with it.
    fn merge(&mut self, index: usize) -> bool {
        let Some(children) = self.nodes[index].children else {
            return false;
        };
        if children.iter().any(|&c| !self.nodes[c].is_leaf()) {
            return false;
        }
        let total: usize = self.nodes[index].items.len()
            + children.iter().map(|&c| self.nodes[c].items.len()).sum::<usize>();
        if total > self.threshold {
            return false;
        }

        for child in children {
            let items = std::mem::take(&mut self.nodes[child].items);
            for (item, aabb) in items {
                self.locations.insert(item, index);
                self.nodes[index].items.push((item, aabb));
            }
            self.free.push(child);
        }
        self.nodes[index].children = None;
        true
    }

    /// Merges upward from the node that just lost an item.
    fn try_merge(&mut self, index: usize) {
        let mut current = if self.nodes[index].is_leaf() {
            self.nodes[index].parent
        } else {
            Some(index)
        };
        while let Some(node) = current {
            if !self.merge(node) {
                break;
            }
            current = self.nodes[node].parent;
        }
    }

    fn collect_pairs(&self, index: usize, ancestors: &mut Vec<(T, AABB)>, pairs: &mut Vec<(T, T)>) {
        let node = &self.nodes[index];
        for (i, (a, a_box)) in node.items.iter().enumerate() {
            for (b, b_box) in &node.items[i + 1..] {
                if a_box.overlaps(b_box) {
                    pairs.push(ordered_pair(*a, *b));
                }
            }
            for (b, b_box) in ancestors.iter() {
                if a_box.overlaps(b_box) {
                    pairs.push(ordered_pair(*a, *b));
                }
            }
        }

        if let Some(children) = node.children {
            let mark = ancestors.len();
            ancestors.extend(node.items.iter().copied());
            for child in children {
                self.collect_pairs(child, ancestors, pairs);
            }
            ancestors.truncate(mark);
        }
    }
}

impl<T> BroadPhase<T> for QuadTree<T>
where
    T: Copy + Eq + Hash + Ord,
{
    fn insert(&mut self, item: T, aabb: AABB) -> PhysicsResult<()> {
        if self.locations.contains_key(&item) {
            return Err(PhysicsError::DuplicateItem);
        }
        let bounds = self.bounds();
        if !bounds.contains(&aabb) {
            return Err(PhysicsError::OutOfBounds { aabb, bounds });
        }

        let mut index = ROOT;
        loop {
            let node = &self.nodes[index];
            if node.is_leaf() {
                if node.depth >= self.max_depth || node.items.len() < self.threshold {
                    self.nodes[index].items.push((item, aabb));
                    self.locations.insert(item, index);
                    return Ok(());
                }
                self.split(index);
                continue;
            }

            match self.child_for(index, &aabb) {
                Some(child) => index = child,
                None => {
                    self.nodes[index].items.push((item, aabb));
                    self.locations.insert(item, index);
                    return Ok(());
                }
            }
        }
    }

    fn remove(&mut self, item: T) -> PhysicsResult<AABB> {
        let index = self.locations.remove(&item).ok_or(PhysicsError::MissingItem)?;
        let position = self.nodes[index].items.iter().position(|(i, _)| *i == item);
        debug_assert!(position.is_some(), "location table points at the wrong node");
        let (_, aabb) = self.nodes[index]
            .items
            .remove(position.ok_or(PhysicsError::MissingItem)?);
        self.try_merge(index);
        Ok(aabb)
    }

    fn contains(&self, item: T) -> bool {
        self.locations.contains_key(&item)
    }

    fn query(&self, region: &AABB) -> Vec<T> {
        let mut found = Vec::new();
        let mut stack = vec![ROOT];
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            if !node.bounds.overlaps(region) {
                continue;
            }
            found.extend(
                node.items
                    .iter()
                    .filter(|(_, aabb)| aabb.overlaps(region))
                    .map(|(item, _)| *item),
            );
            if let Some(children) = node.children {
                stack.extend(children);
            }
        }
        found.sort();
        found
    }

    fn find_all_intersections(&self) -> Vec<(T, T)> {
        let mut pairs = Vec::new();
        let mut ancestors = Vec::new();
        self.collect_pairs(ROOT, &mut ancestors, &mut pairs);
        pairs.sort();
        pairs
    }

    fn len(&self) -> usize {
        self.locations.len()
    }

    fn clear(&mut self) {
        let bounds = self.bounds();
        self.nodes.clear();
        self.nodes.push(Node::new(bounds, 0, None));
        self.free.clear();
        self.locations.clear();
    }

    fn name(&self) -> &str {
        "quadtree"
    }
}
