//! Short-lived point particles (sparks, debris).
//!
//! Particles fall under gravity and die when their lifetime runs out or, when
//! the system is handed to [`PhysicsWorld::update`](super::PhysicsWorld::update),
//! when they touch a bound body. All randomness comes from a generator the
//! caller passes in, so a seeded generator replays the same emission.

use std::ops::Range;

use rand::Rng;

use crate::math::vec2::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Seconds left before the particle expires.
    pub lifetime: f32,
    pub active: bool,
}

/// How a burst of particles is spread.
#[derive(Debug, Clone, PartialEq)]
pub struct EmitterSettings {
    pub speed: Range<f32>,
    /// Direction range in radians, measured from +x toward +y.
    pub angle: Range<f32>,
    pub lifetime: Range<f32>,
}

impl Default for EmitterSettings {
    fn default() -> Self {
        Self {
            speed: 50.0..200.0,
            angle: -std::f32::consts::PI..std::f32::consts::PI,
            lifetime: 0.5..1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    max_particles: usize,
    /// Multiplies the world gravity for particles.
    pub gravity_scale: f32,
}

impl ParticleSystem {
    pub fn new(max_particles: usize) -> Self {
        Self {
            particles: Vec::with_capacity(max_particles),
            max_particles,
            gravity_scale: 1.0,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn active_count(&self) -> usize {
        self.particles.iter().filter(|p| p.active).count()
    }

    /// Spawns up to `count` particles at `origin`. Inactive slots are reused
    /// first; nothing is spawned past the capacity. Returns how many spawned.
    pub fn emit<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        origin: Vec2,
        count: usize,
        settings: &EmitterSettings,
    ) -> usize {
        let mut spawned = 0;
        for _ in 0..count {
            let particle = Particle {
                position: origin,
                velocity: Vec2::new(1.0, 0.0).rotate(sample(rng, &settings.angle)) * sample(rng, &settings.speed),
                lifetime: sample(rng, &settings.lifetime),
                active: true,
            };
            if let Some(slot) = self.particles.iter_mut().find(|p| !p.active) {
                *slot = particle;
            } else if self.particles.len() < self.max_particles {
                self.particles.push(particle);
            } else {
                break;
            }
            spawned += 1;
        }
        spawned
    }

    /// Ages and moves every active particle.
    pub fn update(&mut self, gravity: f32, dt: f32) {
        let acceleration = Vec2::new(0.0, gravity * self.gravity_scale);
        for particle in self.particles.iter_mut().filter(|p| p.active) {
            particle.lifetime -= dt;
            if particle.lifetime <= 0.0 {
                particle.active = false;
                continue;
            }
            particle.velocity += acceleration * dt;
            particle.position += particle.velocity * dt;
        }
    }

    /// Drops inactive particles from storage.
    pub fn clear_inactive(&mut self) {
        self.particles.retain(|p| p.active);
    }
}

/// Uniform sample that tolerates an empty range.
fn sample<R: Rng + ?Sized>(rng: &mut R, range: &Range<f32>) -> f32 {
    if range.start < range.end {
        rng.gen_range(range.clone())
    } else {
        range.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_emit_respects_capacity() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut system = ParticleSystem::new(10);
        assert_eq!(system.emit(&mut rng, Vec2::ZERO, 25, &EmitterSettings::default()), 10);
        assert_eq!(system.active_count(), 10);

        system.particles_mut()[3].active = false;
        assert_eq!(system.emit(&mut rng, Vec2::ZERO, 5, &EmitterSettings::default()), 1);
        assert_eq!(system.particles().len(), 10);
    }

    #[test]
    fn test_seeded_emission_is_reproducible() {
        let settings = EmitterSettings::default();
        let mut first = ParticleSystem::new(32);
        let mut second = ParticleSystem::new(32);
        first.emit(&mut StdRng::seed_from_u64(42), Vec2::new(5.0, 5.0), 20, &settings);
        second.emit(&mut StdRng::seed_from_u64(42), Vec2::new(5.0, 5.0), 20, &settings);
        assert_eq!(first, second);

        for p in first.particles() {
            let speed = p.velocity.length();
            assert!(speed >= 50.0 - 1e-3 && speed < 200.0 + 1e-3);
        }
    }

    #[test]
    fn test_update_moves_and_expires() {
        let settings = EmitterSettings {
            speed: 10.0..10.0,
            angle: 0.0..0.0,
            lifetime: 1.0..1.0,
        };
        let mut system = ParticleSystem::new(4);
        system.emit(&mut StdRng::seed_from_u64(1), Vec2::ZERO, 1, &settings);

        system.update(100.0, 0.5);
        let p = system.particles()[0];
        assert!(p.active);
        assert!((p.velocity.y - 50.0).abs() < 1e-4);
        assert!((p.position.x - 5.0).abs() < 1e-4);

        system.update(100.0, 0.6);
        assert_eq!(system.active_count(), 0);
        system.clear_inactive();
        assert!(system.particles().is_empty());
    }
}
