pub mod rigid_body;

pub use rigid_body::{LayerSet, RigidBody};

slotmap::new_key_type! {
    /// Stable handle of a body bound to a world.
    pub struct BodyHandle;
}

/// Arena owning every bound body.
pub type BodySet = slotmap::SlotMap<BodyHandle, RigidBody>;
