pub mod dormancy;
pub mod integrator;

pub use dormancy::{update_dormancy, DormancyReport};
pub use integrator::integrate;
