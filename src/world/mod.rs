pub mod particles;
pub mod physics_world;
pub mod query;
pub mod trigger;

pub use particles::{EmitterSettings, Particle, ParticleSystem};
pub use physics_world::{FrameStats, PhysicsWorld, RestraintHandle};
pub use query::RayHit;
pub use trigger::{Trigger, TriggerEvent, TriggerHandle};
