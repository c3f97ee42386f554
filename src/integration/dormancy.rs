//! Dormancy (sleeping) bookkeeping.
//!
//! Runs once per frame in three passes: every body updates its immobile
//! timer, every body that is moving resets the timers of the bodies around
//! it, and finally bodies whose timer passed the minimum fall asleep.

use tracing::trace;

use crate::collision::{BroadPhase, AABB};
use crate::config::DormancyConfig;
use crate::math::vec2::Vec2;
use crate::objects::{BodyHandle, BodySet, RigidBody};

/// Outcome of one dormancy pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DormancyReport {
    pub dormant: usize,
    pub fell_asleep: usize,
    pub woke_up: usize,
}

/// Speed of the body plus the speed change still pending from its forces.
pub fn motion(body: &RigidBody, dt: f32) -> f32 {
    body.velocity.length() + (body.force * body.inv_mass() * dt).length()
}

/// Advances the immobile timer. Returns `true` when the body is moving.
pub fn tick_immobile_time(body: &mut RigidBody, config: &DormancyConfig, dt: f32) -> bool {
    if body.is_static {
        return false;
    }
    let still =
        motion(body, dt) < config.linear_threshold && body.angular_velocity.abs() < config.angular_threshold;
    if still {
        body.immobile_time += dt;
        false
    } else {
        body.immobile_time = 0.0;
        true
    }
}

/// Region in which a moving body keeps its neighbours awake.
pub fn wake_region(body: &RigidBody, config: &DormancyConfig) -> AABB {
    body.aabb().scaled(config.wake_margin)
}

/// Resets the immobile timer of every non-static body inside `region`.
pub fn wake_neighbours(
    bodies: &mut BodySet,
    broad_phase: &dyn BroadPhase<BodyHandle>,
    region: &AABB,
    skip: Option<BodyHandle>,
) {
    for handle in broad_phase.query(region) {
        if Some(handle) == skip {
            continue;
        }
        if let Some(body) = bodies.get_mut(handle) {
            if !body.is_static {
                body.immobile_time = 0.0;
            }
        }
    }
}

/// Runs the three dormancy passes over every body.
pub fn update_dormancy(
    bodies: &mut BodySet,
    broad_phase: &dyn BroadPhase<BodyHandle>,
    config: &DormancyConfig,
    dt: f32,
) -> DormancyReport {
    let mut wakers = Vec::new();
    for (handle, body) in bodies.iter_mut() {
        if tick_immobile_time(body, config, dt) {
            wakers.push((handle, wake_region(body, config)));
        }
    }

    for (handle, region) in &wakers {
        wake_neighbours(bodies, broad_phase, region, Some(*handle));
    }

    let mut report = DormancyReport::default();
    for (handle, body) in bodies.iter_mut() {
        if body.is_static {
            continue;
        }
        let was_dormant = body.dormant;
        body.dormant = body.immobile_time > config.min_dormant_time;
        if body.dormant {
            body.velocity = Vec2::ZERO;
            body.angular_velocity = 0.0;
            report.dormant += 1;
        }
        match (was_dormant, body.dormant) {
            (false, true) => {
                report.fell_asleep += 1;
                trace!(body = ?handle, "body fell dormant");
            }
            (true, false) => {
                report.woke_up += 1;
                trace!(body = ?handle, "body woke up");
            }
            _ => {}
        }
    }
    report
}
