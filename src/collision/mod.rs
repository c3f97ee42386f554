pub mod aabb;
pub mod broad_phase;
pub mod contact_points;
pub mod detection;
pub mod manifold;
pub mod quadtree;
pub mod raycast;
pub mod spatial_grid;

// Re-export key types
pub use aabb::AABB;
pub use broad_phase::BroadPhase;
pub use contact_points::polygon_contact_points;
pub use detection::{circle_vs_circle, circle_vs_polygon, closest_point_on_segment, detect, polygon_vs_polygon};
pub use manifold::*;
pub use quadtree::QuadTree;
pub use raycast::{ray_vs_aabb, ray_vs_circle, ray_vs_polygon, ray_vs_ray, segment_vs_segment};
pub use spatial_grid::SpatialGrid;
