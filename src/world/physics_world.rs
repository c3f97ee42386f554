use slotmap::{SecondaryMap, SlotMap};
use tracing::{debug, trace, warn};

use super::particles::ParticleSystem;
use super::query::{self, RayHit};
use super::trigger::{Trigger, TriggerEvent, TriggerHandle};
use crate::collision::{detect, BroadPhase, QuadTree, SpatialGrid, AABB};
use crate::config::{BroadPhaseKind, PhysicsConfig};
use crate::error::{PhysicsError, PhysicsResult};
use crate::integration::{dormancy, integrate, update_dormancy, DormancyReport};
use crate::math::vec2::Vec2;
use crate::objects::{BodyHandle, BodySet, RigidBody};
use crate::restraints::Restraint;
use crate::shapes::Ray;
use crate::solver::{resolve_contact, AveragedImpulseSolver, ContactParams, Solver};

slotmap::new_key_type! {
    /// Handle to a restraint bound to a [`PhysicsWorld`].
    pub struct RestraintHandle;
}

/// Counters from the last call to [`PhysicsWorld::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Broad-phase candidate pairs, summed over sub-steps.
    pub candidate_pairs: usize,
    /// Pairs that actually collided, summed over sub-steps.
    pub contacts: usize,
    pub trigger_events: usize,
    pub dormancy: DormancyReport,
}

/// Owns every simulated body and drives the per-frame pipeline.
///
/// Each sub-step integrates, solves restraints, refreshes the broad phase and
/// resolves the candidate pairs in index order. Dormancy, triggers and
/// particles run once per frame afterwards.
pub struct PhysicsWorld {
    config: PhysicsConfig,
    bodies: BodySet,
    restraints: SlotMap<RestraintHandle, Box<dyn Restraint>>,
    triggers: SlotMap<TriggerHandle, Trigger>,
    broad_phase: Box<dyn BroadPhase<BodyHandle>>,
    solver: Box<dyn Solver>,
    // Box each body had when the index was last synced, indexed or not.
    last_boxes: SecondaryMap<BodyHandle, AABB>,
    stats: FrameStats,
}

impl PhysicsWorld {
    /// Creates an empty world. Fails if the configuration does not validate.
    pub fn new(config: PhysicsConfig) -> PhysicsResult<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: PhysicsConfig) -> Self {
        Self {
            broad_phase: make_broad_phase(&config),
            config,
            bodies: BodySet::with_key(),
            restraints: SlotMap::with_key(),
            triggers: SlotMap::with_key(),
            solver: Box::new(AveragedImpulseSolver),
            last_boxes: SecondaryMap::new(),
            stats: FrameStats::default(),
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Tunables read on every update. Changes to the broad-phase layout apply
    /// after [`rebuild_broad_phase`](Self::rebuild_broad_phase).
    pub fn config_mut(&mut self) -> &mut PhysicsConfig {
        &mut self.config
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    // --- Bodies --- //

    /// Registers a body. Ray colliders must sit on static bodies.
    pub fn bind(&mut self, body: RigidBody) -> PhysicsResult<BodyHandle> {
        if body.collider().is_ray() && !body.is_static {
            return Err(PhysicsError::DynamicRay);
        }
        let aabb = body.aabb();
        let handle = self.bodies.insert(body);
        self.sync_body(handle, aabb)?;
        debug!(body = ?handle, ?aabb, "bound body");
        Ok(handle)
    }

    /// Removes a body and wakes everything resting near it.
    pub fn unbind(&mut self, handle: BodyHandle) -> PhysicsResult<RigidBody> {
        let body = self.bodies.remove(handle).ok_or(PhysicsError::UnknownBody)?;
        if self.broad_phase.contains(handle) {
            self.broad_phase.remove(handle)?;
        }
        self.last_boxes.remove(handle);

        let region = dormancy::wake_region(&body, &self.config.dormancy);
        for neighbour in self.broad_phase.query(&region) {
            if let Some(other) = self.bodies.get_mut(neighbour) {
                other.wake();
            }
        }
        debug!(body = ?handle, "unbound body");
        Ok(body)
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    /// Moving a body through this reference is picked up by the broad phase
    /// on the next update.
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle)
    }

    pub fn bodies(&self) -> &BodySet {
        &self.bodies
    }

    // --- Restraints and triggers --- //

    pub fn bind_restraint(&mut self, restraint: impl Restraint + 'static) -> RestraintHandle {
        let handle = self.restraints.insert(Box::new(restraint));
        debug!(restraint = ?handle, "bound restraint");
        handle
    }

    pub fn unbind_restraint(&mut self, handle: RestraintHandle) -> Option<Box<dyn Restraint>> {
        let restraint = self.restraints.remove(handle);
        if restraint.is_some() {
            debug!(restraint = ?handle, "unbound restraint");
        }
        restraint
    }

    pub fn restraint_count(&self) -> usize {
        self.restraints.len()
    }

    pub fn bind_trigger(&mut self, trigger: Trigger) -> TriggerHandle {
        let handle = self.triggers.insert(trigger);
        debug!(trigger = ?handle, "bound trigger");
        handle
    }

    pub fn unbind_trigger(&mut self, handle: TriggerHandle) -> Option<Trigger> {
        let trigger = self.triggers.remove(handle);
        if trigger.is_some() {
            debug!(trigger = ?handle, "unbound trigger");
        }
        trigger
    }

    pub fn trigger_mut(&mut self, handle: TriggerHandle) -> Option<&mut Trigger> {
        self.triggers.get_mut(handle)
    }

    // --- Strategies --- //

    pub fn set_solver(&mut self, solver: Box<dyn Solver>) {
        debug!(from = self.solver.name(), to = solver.name(), "switched solver");
        self.solver = solver;
    }

    pub fn solver_name(&self) -> &str {
        self.solver.name()
    }

    pub fn broad_phase(&self) -> &dyn BroadPhase<BodyHandle> {
        self.broad_phase.as_ref()
    }

    /// Rebuilds the spatial index from the current configuration.
    pub fn rebuild_broad_phase(&mut self) -> PhysicsResult<()> {
        self.config.validate()?;
        self.broad_phase = make_broad_phase(&self.config);
        self.last_boxes.clear();
        self.sync_broad_phase()?;
        debug!(
            strategy = self.broad_phase.name(),
            indexed = self.broad_phase.len(),
            "rebuilt broad phase"
        );
        Ok(())
    }

    // --- Queries --- //

    /// Bodies whose shape contains `point`.
    pub fn bodies_at_point(&self, point: Vec2) -> Vec<BodyHandle> {
        query::bodies_at_point(&self.bodies, self.broad_phase.as_ref(), point)
    }

    /// Bodies crossed by `ray` within its length, nearest first.
    pub fn raycast(&self, ray: &Ray) -> PhysicsResult<Vec<RayHit>> {
        query::raycast(&self.bodies, self.broad_phase.as_ref(), ray)
    }

    // --- Simulation --- //

    /// Advances the simulation by `dt` seconds split into `config.steps`
    /// sub-steps, then runs dormancy, triggers and the optional particles.
    pub fn update(&mut self, dt: f32, particles: Option<&mut ParticleSystem>) -> PhysicsResult<()> {
        if !(dt > 0.0) {
            return Ok(());
        }
        self.stats = FrameStats::default();

        let steps = self.config.steps.max(1);
        let step_dt = dt / steps as f32;
        for _ in 0..steps {
            self.step(step_dt)?;
        }
        self.sync_broad_phase()?;

        self.stats.dormancy = update_dormancy(&mut self.bodies, self.broad_phase.as_ref(), &self.config.dormancy, dt);
        self.stats.trigger_events = self.process_triggers()?;
        if let Some(particles) = particles {
            self.collide_particles(particles, dt);
        }

        for body in self.bodies.values_mut() {
            body.clear_accumulators();
        }
        trace!(
            pairs = self.stats.candidate_pairs,
            contacts = self.stats.contacts,
            dormant = self.stats.dormancy.dormant,
            triggers = self.stats.trigger_events,
            "frame done"
        );
        Ok(())
    }

    fn step(&mut self, dt: f32) -> PhysicsResult<()> {
        for body in self.bodies.values_mut() {
            integrate(body, self.config.gravity, dt);
        }
        for restraint in self.restraints.values() {
            restraint.solve(&mut self.bodies, dt);
        }

        self.sync_broad_phase()?;
        let pairs = self.broad_phase.find_all_intersections();
        self.stats.candidate_pairs += pairs.len();

        let params = ContactParams {
            combine_mode: self.config.combine_mode,
            slop: self.config.contact_slop,
        };
        for (a, b) in pairs {
            let Some([body_a, body_b]) = self.bodies.get_disjoint_mut([a, b]) else {
                continue;
            };
            if resolve_contact(self.solver.as_ref(), body_a, body_b, params)?.is_some() {
                self.stats.contacts += 1;
            }
        }
        Ok(())
    }

    /// Brings every moved body's box up to date in the index.
    fn sync_broad_phase(&mut self) -> PhysicsResult<()> {
        let boxes: Vec<(BodyHandle, AABB)> = self
            .bodies
            .iter()
            .map(|(handle, body)| (handle, body.aabb()))
            .filter(|(handle, aabb)| self.last_boxes.get(*handle) != Some(aabb))
            .collect();
        for (handle, aabb) in boxes {
            self.sync_body(handle, aabb)?;
        }
        Ok(())
    }

    /// Indexes a body at `aabb`. Bodies outside the world bounds are kept out
    /// of the index until they come back.
    fn sync_body(&mut self, handle: BodyHandle, aabb: AABB) -> PhysicsResult<()> {
        let inside = self.config.world_bounds.contains(&aabb);
        match (self.broad_phase.contains(handle), inside) {
            (true, true) => self.broad_phase.update(handle, aabb)?,
            (true, false) => {
                self.broad_phase.remove(handle)?;
                warn!(body = ?handle, ?aabb, "body left the world bounds");
            }
            (false, true) => {
                self.broad_phase.insert(handle, aabb)?;
                if self.last_boxes.contains_key(handle) {
                    debug!(body = ?handle, "body re-entered the world bounds");
                }
            }
            (false, false) => {
                if !self.last_boxes.contains_key(handle) {
                    warn!(body = ?handle, ?aabb, "body bound outside the world bounds");
                }
            }
        }
        self.last_boxes.insert(handle, aabb);
        Ok(())
    }

    /// Fires every enabled trigger once per overlapping non-static body.
    fn process_triggers(&mut self) -> PhysicsResult<usize> {
        let mut fired = 0;
        for (trigger_handle, trigger) in self.triggers.iter_mut() {
            if !trigger.enabled {
                continue;
            }
            for body_handle in self.broad_phase.query(&trigger.aabb()) {
                let Some(body) = self.bodies.get(body_handle) else {
                    continue;
                };
                if body.is_static || !trigger.accepts(body.layer) {
                    continue;
                }
                let Some(info) = detect(trigger.collider(), body.collider())? else {
                    continue;
                };
                // Unswapped normals point from the body toward the trigger.
                let normal = if info.swapped { info.normal } else { -info.normal };
                trigger.fire(&TriggerEvent {
                    trigger: trigger_handle,
                    body: body_handle,
                    normal,
                    overlap: info.overlap,
                });
                fired += 1;
            }
        }
        Ok(fired)
    }

    /// Moves the particles and kills the ones that ended up inside a body.
    fn collide_particles(&self, particles: &mut ParticleSystem, dt: f32) {
        particles.update(self.config.gravity, dt);
        for particle in particles.particles_mut().iter_mut().filter(|p| p.active) {
            if !self.bodies_at_point(particle.position).is_empty() {
                particle.active = false;
            }
        }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::with_valid_config(PhysicsConfig::default())
    }
}

fn make_broad_phase(config: &PhysicsConfig) -> Box<dyn BroadPhase<BodyHandle>> {
    match config.broad_phase {
        BroadPhaseKind::QuadTree => Box::new(QuadTree::new(
            config.world_bounds,
            config.quadtree_threshold,
            config.quadtree_max_depth,
        )),
        BroadPhaseKind::HashedGrid => Box::new(SpatialGrid::new(config.segment_size)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Material;
    use crate::restraints::{AnchorRestraint, DistanceRestraint};
    use crate::shapes::{Circle, Polygon};
    use crate::solver::SequentialImpulseSolver;
    use crate::world::particles::EmitterSettings;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::RefCell;
    use std::rc::Rc;
    const EPSILON: f32 = 1e-4;

    fn ball(x: f32, y: f32) -> RigidBody {
        RigidBody::new(Circle::new(Vec2::new(x, y), 10.0), 1.0).unwrap()
    }

    fn ground() -> RigidBody {
        RigidBody::new_static(Polygon::rectangle(Vec2::new(0.0, 610.0), Vec2::new(1000.0, 20.0)).unwrap())
    }

    #[test]
    fn test_world_new() {
        let world = PhysicsWorld::default();
        assert!(world.bodies().is_empty());
        assert_eq!(world.restraint_count(), 0);
        assert_eq!(world.solver_name(), "averaged_impulse");
        assert_eq!(world.broad_phase().name(), "quadtree");
        assert_eq!(world.config().gravity, 981.0);

        let bad = PhysicsConfig {
            steps: 0,
            ..Default::default()
        };
        assert!(matches!(PhysicsWorld::new(bad), Err(PhysicsError::InvalidConfig(_))));
    }

    #[test]
    fn test_bind_and_unbind() {
        let mut world = PhysicsWorld::default();
        let a = world.bind(ball(0.0, 0.0)).unwrap();
        let b = world.bind(ball(100.0, 0.0)).unwrap();
        assert_eq!(world.bodies().len(), 2);
        assert!(world.broad_phase().contains(a));

        let removed = world.unbind(a).unwrap();
        assert_eq!(removed.position(), Vec2::ZERO);
        assert!(!world.broad_phase().contains(a));
        assert!(world.body(a).is_none());
        assert!(world.body(b).is_some());
        assert_eq!(world.unbind(a).err(), Some(PhysicsError::UnknownBody));
    }

    #[test]
    fn test_bind_rejects_dynamic_ray() {
        let mut world = PhysicsWorld::default();
        let ray = RigidBody::new(Ray::new(Vec2::ZERO, Vec2::new(10.0, 0.0)), 1.0).unwrap();
        assert_eq!(world.bind(ray).err(), Some(PhysicsError::DynamicRay));
        assert!(world.bind(RigidBody::new_static(Ray::new(Vec2::ZERO, Vec2::new(10.0, 0.0)))).is_ok());
    }

    #[test]
    fn test_update_applies_gravity_over_sub_steps() {
        let mut world = PhysicsWorld::default();
        world.config_mut().steps = 4;
        let handle = world.bind(ball(0.0, 0.0)).unwrap();
        world.update(0.1, None).unwrap();

        let body = world.body(handle).unwrap();
        assert!((body.velocity.y - 98.1).abs() < 1e-3);
        // Semi-implicit Euler over four sub-steps of 0.025
        let expected = 981.0 * 0.025 * 0.025 * (1.0 + 2.0 + 3.0 + 4.0);
        assert!((body.position().y - expected).abs() < 1e-3);
    }

    #[test]
    fn test_zero_dt_is_ignored() {
        let mut world = PhysicsWorld::default();
        let handle = world.bind(ball(0.0, 0.0)).unwrap();
        world.update(0.0, None).unwrap();
        assert_eq!(world.body(handle).unwrap().velocity, Vec2::ZERO);
    }

    #[test]
    fn test_forces_last_one_frame() {
        let mut world = PhysicsWorld::default();
        world.config_mut().gravity = 0.0;
        let handle = world.bind(ball(0.0, 0.0)).unwrap();
        world.body_mut(handle).unwrap().apply_force(Vec2::new(10.0, 0.0));
        world.update(0.1, None).unwrap();
        let velocity = world.body(handle).unwrap().velocity.x;
        assert!((velocity - 1.0).abs() < EPSILON);
        assert_eq!(world.body(handle).unwrap().force, Vec2::ZERO);

        world.update(0.1, None).unwrap();
        assert!((world.body(handle).unwrap().velocity.x - velocity).abs() < EPSILON);
    }

    #[test]
    fn test_ball_rests_on_ground() {
        let mut world = PhysicsWorld::default();
        world.bind(ground()).unwrap();
        let handle = world.bind(ball(0.0, 580.0).with_material(Material::new(0.0, 0.6, 0.4, 0.0))).unwrap();
        for _ in 0..120 {
            world.update(1.0 / 60.0, None).unwrap();
        }
        let body = world.body(handle).unwrap();
        assert!((body.aabb().max.y - 600.0).abs() < 0.5, "bottom at {}", body.aabb().max.y);
        assert!(world.stats().contacts > 0 || body.is_dormant());
    }

    #[test]
    fn test_contact_slop_keeps_shallow_rest_and_sleeps() {
        let mut world = PhysicsWorld::default();
        world.config_mut().contact_slop = 0.05;
        world.bind(ground()).unwrap();
        let handle = world.bind(ball(0.0, 560.0)).unwrap();
        for _ in 0..300 {
            world.update(1.0 / 60.0, None).unwrap();
        }
        let body = world.body(handle).unwrap();
        let bottom = body.aabb().max.y;
        // Sinks no further than the slop plus one sub-step of fall.
        assert!(bottom > 600.0 - EPSILON && bottom < 600.1, "bottom at {bottom}");
        assert!(body.is_dormant());
    }

    #[test]
    fn test_unbind_wakes_resting_neighbours() {
        let mut world = PhysicsWorld::default();
        let support = world.bind(ball(0.0, 0.0)).unwrap();
        let resting = world.bind(ball(0.0, -20.0)).unwrap();
        let far = world.bind(ball(500.0, 0.0)).unwrap();
        for handle in [resting, far] {
            let body = world.body_mut(handle).unwrap();
            body.immobile_time = 3.0;
            body.dormant = true;
        }

        world.unbind(support).unwrap();
        assert!(!world.body(resting).unwrap().is_dormant());
        assert_eq!(world.body(resting).unwrap().immobile_time(), 0.0);
        assert!(world.body(far).unwrap().is_dormant());
    }

    #[test]
    fn test_body_leaving_bounds_is_unindexed_then_returns() {
        let mut world = PhysicsWorld::default();
        world.config_mut().gravity = 0.0;
        world.config_mut().world_bounds = AABB::new(Vec2::splat(-100.0), Vec2::splat(100.0));
        world.rebuild_broad_phase().unwrap();

        let handle = world.bind(ball(0.0, 0.0).with_velocity(Vec2::new(1000.0, 0.0))).unwrap();
        world.update(0.2, None).unwrap();
        assert!(!world.broad_phase().contains(handle));

        world.body_mut(handle).unwrap().velocity = Vec2::new(-1000.0, 0.0);
        world.update(0.2, None).unwrap();
        assert!(world.broad_phase().contains(handle));
    }

    #[test]
    fn test_rebuild_switches_to_hashed_grid() {
        let mut world = PhysicsWorld::default();
        let a = world.bind(ball(0.0, 0.0)).unwrap();
        let b = world.bind(ball(15.0, 0.0)).unwrap();
        world.config_mut().broad_phase = BroadPhaseKind::HashedGrid;
        world.config_mut().segment_size = 25.0;
        world.rebuild_broad_phase().unwrap();

        assert_eq!(world.broad_phase().name(), "hashed_grid");
        assert_eq!(world.broad_phase().len(), 2);
        assert_eq!(world.broad_phase().find_all_intersections(), vec![(a.min(b), a.max(b))]);

        world.config_mut().segment_size = 0.0;
        assert!(world.rebuild_broad_phase().is_err());
    }

    #[test]
    fn test_set_solver() {
        let mut world = PhysicsWorld::default();
        world.set_solver(Box::new(SequentialImpulseSolver));
        assert_eq!(world.solver_name(), "sequential_impulse");
    }

    #[test]
    fn test_pair_resolution_separates_bodies() {
        let mut world = PhysicsWorld::default();
        world.config_mut().gravity = 0.0;
        let a = world.bind(ball(0.0, 0.0)).unwrap();
        let b = world.bind(ball(15.0, 0.0)).unwrap();
        world.update(1.0 / 60.0, None).unwrap();

        let gap = world.body(a).unwrap().position().distance(world.body(b).unwrap().position());
        assert!(gap >= 20.0 - EPSILON);
        assert!(world.stats().contacts >= 1);
    }

    #[test]
    fn test_triggers_report_without_pushing() {
        let mut world = PhysicsWorld::default();
        world.config_mut().gravity = 0.0;
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let zone = world.bind_trigger(Trigger::new(
            Polygon::rectangle(Vec2::ZERO, Vec2::splat(40.0)).unwrap(),
            move |event: &TriggerEvent| sink.borrow_mut().push(*event),
        ));
        let inside = world.bind(ball(25.0, 0.0)).unwrap();
        world.bind(ball(200.0, 0.0)).unwrap();
        world.bind(RigidBody::new_static(Circle::new(Vec2::ZERO, 5.0))).unwrap();

        world.update(1.0 / 60.0, None).unwrap();
        assert_eq!(world.stats().trigger_events, 1);
        let event = events.borrow()[0];
        assert_eq!((event.trigger, event.body), (zone, inside));
        assert!((event.normal.x - 1.0).abs() < EPSILON);
        assert_eq!(world.body(inside).unwrap().position(), Vec2::new(25.0, 0.0));

        world.trigger_mut(zone).unwrap().enabled = false;
        world.update(1.0 / 60.0, None).unwrap();
        assert_eq!(events.borrow().len(), 1);
        assert!(world.unbind_trigger(zone).is_some());
    }

    #[test]
    fn test_restraints_are_solved_and_weak() {
        let mut world = PhysicsWorld::default();
        world.config_mut().gravity = 0.0;
        let a = world.bind(ball(0.0, 0.0)).unwrap();
        let b = world.bind(ball(100.0, 0.0)).unwrap();
        let rope = world.bind_restraint(DistanceRestraint::new(a, b, Vec2::ZERO, Vec2::ZERO, 50.0));
        world.bind_restraint(AnchorRestraint::pin(a, Vec2::ZERO, Vec2::ZERO));
        for _ in 0..120 {
            world.update(1.0 / 60.0, None).unwrap();
        }
        let gap = world.body(a).unwrap().position().distance(world.body(b).unwrap().position());
        assert!((gap - 50.0).abs() < 1.0, "gap {gap}");

        world.unbind(b).unwrap();
        world.update(1.0 / 60.0, None).unwrap();
        assert_eq!(world.restraint_count(), 2);
        assert!(world.unbind_restraint(rope).is_some());
        assert_eq!(world.restraint_count(), 1);
    }

    #[test]
    fn test_particles_die_inside_bodies() {
        let mut world = PhysicsWorld::default();
        world.bind(ground()).unwrap();
        let mut particles = ParticleSystem::new(64);
        let settings = EmitterSettings {
            speed: 0.0..1.0,
            lifetime: 10.0..10.0,
            ..Default::default()
        };
        particles.emit(&mut StdRng::seed_from_u64(3), Vec2::new(0.0, 590.0), 16, &settings);

        for _ in 0..30 {
            world.update(1.0 / 60.0, Some(&mut particles)).unwrap();
        }
        assert_eq!(particles.active_count(), 0);
    }

    #[test]
    fn test_raycast_through_world() {
        let mut world = PhysicsWorld::default();
        let target = world.bind(ball(50.0, 0.0)).unwrap();
        let hits = world.raycast(&Ray::new(Vec2::ZERO, Vec2::new(100.0, 0.0))).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].body, target);
        assert_eq!(world.bodies_at_point(Vec2::new(55.0, 0.0)), vec![target]);
    }

    #[test]
    fn test_raycast_through_concave_body_fails() {
        let mut world = PhysicsWorld::default();
        let notched = Polygon::new(vec![
            Vec2::new(-10.0, -10.0),
            Vec2::new(0.0, -2.0),
            Vec2::new(10.0, -10.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(-10.0, 10.0),
        ])
        .unwrap();
        world.bind(RigidBody::new_static(notched)).unwrap();

        let result = world.raycast(&Ray::new(Vec2::new(-20.0, -6.0), Vec2::new(40.0, 0.0)));
        assert_eq!(result, Err(PhysicsError::NonConvexPolygon { hits: 4 }));
        // Below the notch the shape behaves like a convex one.
        assert_eq!(world.raycast(&Ray::new(Vec2::new(-20.0, 5.0), Vec2::new(40.0, 0.0))).unwrap().len(), 1);
    }
}
