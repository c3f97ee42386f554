pub mod material;

pub use material::{CombineMode, Material, PairMaterial};
