use std::cell::OnceCell;

use crate::collision::AABB;
use crate::common::Material;
use crate::error::{PhysicsError, PhysicsResult};
use crate::math::vec2::Vec2;
use crate::shapes::Collider;

/// A set of collision layers, numbered 0 to 31.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LayerSet(u32);

impl LayerSet {
    pub const EMPTY: LayerSet = LayerSet(0);
    pub const ALL: LayerSet = LayerSet(u32::MAX);

    /// Set holding a single layer. Layers above 31 are ignored.
    pub fn single(layer: u8) -> Self {
        Self::EMPTY.with(layer)
    }

    pub fn from_bits(bits: u32) -> Self {
        LayerSet(bits)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn with(self, layer: u8) -> Self {
        match 1u32.checked_shl(u32::from(layer)) {
            Some(bit) => LayerSet(self.0 | bit),
            None => self,
        }
    }

    pub fn without(self, layer: u8) -> Self {
        match 1u32.checked_shl(u32::from(layer)) {
            Some(bit) => LayerSet(self.0 & !bit),
            None => self,
        }
    }

    pub fn contains(self, layer: u8) -> bool {
        1u32.checked_shl(u32::from(layer)).is_some_and(|bit| self.0 & bit != 0)
    }

    pub fn intersects(self, other: LayerSet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<u8> for LayerSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        iter.into_iter().fold(LayerSet::EMPTY, LayerSet::with)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    // Geometry
    collider: Collider,
    pub material: Material, // Physical material properties

    // Primary state
    pub velocity: Vec2,
    pub angular_velocity: f32, // Radians per second

    // Accumulators, cleared once per frame
    pub force: Vec2,
    pub angular_force: f32,

    // Physical properties
    mass: f32,
    inertia: OnceCell<f32>, // Derived from the collider on first use
    pub is_static: bool,
    pub lock_rotation: bool,

    // Collision filtering
    pub layer: LayerSet,
    pub mask: LayerSet,

    // Dormancy bookkeeping
    pub(crate) immobile_time: f32,
    pub(crate) dormant: bool,
}

impl RigidBody {
    /// Creates a dynamic body. The mass must be positive and finite.
    pub fn new(collider: impl Into<Collider>, mass: f32) -> PhysicsResult<Self> {
        if !(mass > 0.0 && mass.is_finite()) {
            return Err(PhysicsError::InvalidMass(mass));
        }
        Ok(Self::with_mass(collider.into(), mass, false))
    }

    /// Creates an immovable body with infinite mass and inertia.
    pub fn new_static(collider: impl Into<Collider>) -> Self {
        Self::with_mass(collider.into(), f32::INFINITY, true)
    }

    fn with_mass(collider: Collider, mass: f32, is_static: bool) -> Self {
        Self {
            collider,
            material: Material::default(),
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            force: Vec2::ZERO,
            angular_force: 0.0,
            mass,
            inertia: OnceCell::new(),
            is_static,
            lock_rotation: false,
            layer: LayerSet::single(0),
            mask: LayerSet::EMPTY,
            immobile_time: 0.0,
            dormant: false,
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_lock_rotation(mut self, lock_rotation: bool) -> Self {
        self.lock_rotation = lock_rotation;
        self
    }

    pub fn with_layer(mut self, layer: LayerSet) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_mask(mut self, mask: LayerSet) -> Self {
        self.mask = mask;
        self
    }

    pub fn collider(&self) -> &Collider {
        &self.collider
    }

    /// Mutable access to the shape. Drops the cached inertia, since the shape
    /// may be rescaled or replaced.
    pub fn collider_mut(&mut self) -> &mut Collider {
        self.inertia.take();
        &mut self.collider
    }

    pub fn position(&self) -> Vec2 {
        self.collider.position()
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.collider.set_position(position);
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.collider.translate(delta);
    }

    pub fn rotation(&self) -> f32 {
        self.collider.rotation()
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.collider.set_rotation(rotation);
    }

    /// Calculates the world-space Axis-Aligned Bounding Box (AABB) for this body.
    pub fn aabb(&self) -> AABB {
        self.collider.aabb()
    }

    /// Mass in kilograms; infinite for static bodies.
    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn set_mass(&mut self, mass: f32) -> PhysicsResult<()> {
        if self.is_static {
            return Ok(());
        }
        if !(mass > 0.0 && mass.is_finite()) {
            return Err(PhysicsError::InvalidMass(mass));
        }
        self.mass = mass;
        self.inertia.take();
        Ok(())
    }

    pub fn inv_mass(&self) -> f32 {
        if self.is_static {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    /// Moment of inertia about the center, computed from the collider once.
    pub fn inertia(&self) -> f32 {
        if self.is_static {
            return f32::INFINITY;
        }
        *self.inertia.get_or_init(|| self.collider.inertia(self.mass))
    }

    /// Zero for static bodies and bodies whose rotation is locked.
    pub fn inv_inertia(&self) -> f32 {
        if self.is_static || self.lock_rotation {
            return 0.0;
        }
        let inertia = self.inertia();
        if inertia > 0.0 && inertia.is_finite() {
            1.0 / inertia
        } else {
            0.0
        }
    }

    pub fn is_dormant(&self) -> bool {
        self.dormant
    }

    /// Seconds spent below the dormancy thresholds.
    pub fn immobile_time(&self) -> f32 {
        self.immobile_time
    }

    /// Resets the immobile timer so the body stays awake for at least the
    /// minimum dormant time.
    pub fn wake(&mut self) {
        self.immobile_time = 0.0;
        self.dormant = false;
    }

    /// Puts the body to sleep until something moving comes near it or
    /// [`wake`](Self::wake) is called. Used to start scenes already settled.
    pub fn sleep(&mut self) {
        if self.is_static {
            return;
        }
        self.immobile_time = f32::INFINITY;
        self.dormant = true;
        self.velocity = Vec2::ZERO;
        self.angular_velocity = 0.0;
    }

    /// Static and dormant bodies are never moved by the solver.
    pub fn is_movable(&self) -> bool {
        !self.is_static && !self.dormant
    }

    /// Each side's mask must be empty or share a layer with the other side.
    pub fn can_collide_with(&self, other: &RigidBody) -> bool {
        let accepts = |mask: LayerSet, layer: LayerSet| mask.is_empty() || mask.intersects(layer);
        accepts(self.mask, other.layer) && accepts(other.mask, self.layer)
    }

    /// Applies a force at the center of mass.
    pub fn apply_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// Applies a force at a specific point (in world coordinates).
    /// This generates both linear force and angular force.
    pub fn apply_force_at_point(&mut self, force: Vec2, point_world: Vec2) {
        self.force += force;
        let radius_vector = point_world - self.position();
        self.angular_force += radius_vector.cross(force);
    }

    /// Changes velocity immediately. `radius` is the contact offset from the center.
    pub fn apply_impulse(&mut self, impulse: Vec2, radius: Vec2) {
        self.velocity += impulse * self.inv_mass();
        self.angular_velocity += radius.cross(impulse) * self.inv_inertia();
    }

    /// Velocity of a world point moving with the body.
    pub fn velocity_at(&self, point_world: Vec2) -> Vec2 {
        let radius = point_world - self.position();
        self.velocity + radius.perpendicular() * self.angular_velocity
    }

    /// Called once per frame, after all sub-steps.
    pub fn clear_accumulators(&mut self) {
        self.force = Vec2::ZERO;
        self.angular_force = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Polygon, Ray};
    const EPSILON: f32 = 1e-5;

    fn default_test_circle() -> RigidBody {
        RigidBody::new(Circle::new(Vec2::ZERO, 1.0), 1.0).unwrap()
    }

    #[test]
    fn test_rigidbody_new_circle() {
        let mass = 10.0;
        let radius = 2.0;
        let rb = RigidBody::new(Circle::new(Vec2::new(3.0, 4.0), radius), mass).unwrap();
        let expected_inertia = 0.5 * mass * radius * radius; // 20

        assert_eq!(rb.mass(), mass);
        assert!((rb.inv_mass() - (1.0 / mass)).abs() < EPSILON);
        assert!((rb.inertia() - expected_inertia).abs() < EPSILON);
        assert!((rb.inv_inertia() - (1.0 / expected_inertia)).abs() < EPSILON);
        assert_eq!(rb.position(), Vec2::new(3.0, 4.0));
        assert_eq!(rb.velocity, Vec2::ZERO);
        assert_eq!(rb.angular_velocity, 0.0);
        assert!(!rb.is_dormant());
    }

    #[test]
    fn test_rigidbody_new_invalid_mass() {
        let circle = Circle::new(Vec2::ZERO, 1.0);
        assert_eq!(RigidBody::new(circle, 0.0), Err(PhysicsError::InvalidMass(0.0)));
        assert!(RigidBody::new(circle, f32::NAN).is_err());
        assert!(RigidBody::new(circle, f32::INFINITY).is_err());
    }

    #[test]
    fn test_rigidbody_new_static() {
        let rb = RigidBody::new_static(Polygon::rectangle(Vec2::new(1.0, 2.0), Vec2::new(4.0, 2.0)).unwrap());
        assert!(rb.mass().is_infinite());
        assert_eq!(rb.inv_mass(), 0.0);
        assert!(rb.inertia().is_infinite());
        assert_eq!(rb.inv_inertia(), 0.0);
        assert!(!rb.is_movable());
    }

    #[test]
    fn test_rigidbody_polygon_inertia() {
        let square = Polygon::rectangle(Vec2::ZERO, Vec2::new(1.0, 1.0)).unwrap();
        let rb = RigidBody::new(square, 2.0).unwrap();
        // m * (w^2 + h^2) / 12
        assert!((rb.inertia() - 1.0 / 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_inertia_cache_resets_with_mass() {
        let mut rb = default_test_circle();
        assert!((rb.inertia() - 0.5).abs() < EPSILON);
        rb.set_mass(4.0).unwrap();
        assert!((rb.inertia() - 2.0).abs() < EPSILON);
        assert!(rb.set_mass(-1.0).is_err());
    }

    #[test]
    fn test_inertia_cache_resets_with_collider() {
        let square = Polygon::rectangle(Vec2::ZERO, Vec2::new(1.0, 1.0)).unwrap();
        let mut rb = RigidBody::new(square, 1.0).unwrap();
        let before = rb.inertia();
        if let Collider::Polygon(p) = rb.collider_mut() {
            p.set_scale(Vec2::new(2.0, 2.0));
        }
        assert!((rb.inertia() - before * 4.0).abs() < EPSILON);
    }

    #[test]
    fn test_lock_rotation_zeroes_inv_inertia() {
        let rb = default_test_circle().with_lock_rotation(true);
        assert_eq!(rb.inv_inertia(), 0.0);
        assert!(rb.inertia() > 0.0);
    }

    #[test]
    fn test_layer_set() {
        let set: LayerSet = [1u8, 3].into_iter().collect();
        assert!(set.contains(1));
        assert!(set.contains(3));
        assert!(!set.contains(2));
        assert!(!set.contains(40));
        assert!(set.intersects(LayerSet::single(3)));
        assert!(!set.without(3).intersects(LayerSet::single(3)));
        assert_eq!(LayerSet::single(40), LayerSet::EMPTY);
    }

    #[test]
    fn test_can_collide_with() {
        let a = default_test_circle();
        let b = default_test_circle();
        // Empty masks accept everything.
        assert!(a.can_collide_with(&b));

        let player = default_test_circle().with_layer(LayerSet::single(1)).with_mask(LayerSet::single(2));
        let wall = default_test_circle().with_layer(LayerSet::single(2));
        let ghost = default_test_circle().with_layer(LayerSet::single(5));
        assert!(player.can_collide_with(&wall));
        assert!(wall.can_collide_with(&player));
        assert!(!player.can_collide_with(&ghost));
        assert!(!ghost.can_collide_with(&player));

        // Both masks must agree.
        let picky_wall = wall.clone().with_mask(LayerSet::single(7));
        assert!(!player.can_collide_with(&picky_wall));
    }

    #[test]
    fn test_apply_force() {
        let mut rb = default_test_circle();
        rb.apply_force(Vec2::new(10.0, 0.0));
        rb.apply_force(Vec2::new(0.0, 5.0));
        assert!((rb.force.x - 10.0).abs() < EPSILON);
        assert!((rb.force.y - 5.0).abs() < EPSILON);
        assert!((rb.angular_force - 0.0).abs() < EPSILON); // No torque from force at the center
    }

    #[test]
    fn test_apply_force_at_point_offset_body() {
        let mut rb = default_test_circle();
        rb.set_position(Vec2::new(5.0, 5.0));

        let force = Vec2::new(0.0, 10.0);
        let point_world = Vec2::new(6.0, 5.0); // Apply 1 unit right of the center
        rb.apply_force_at_point(force, point_world);

        assert!((rb.force.y - 10.0).abs() < EPSILON);
        // r = (1,0), r x F = 1*10 - 0*0 = 10
        assert!((rb.angular_force - 10.0).abs() < EPSILON);

        rb.clear_accumulators();
        assert_eq!(rb.force, Vec2::ZERO);
        assert_eq!(rb.angular_force, 0.0);
    }

    #[test]
    fn test_apply_impulse_and_point_velocity() {
        let mut rb = default_test_circle();
        rb.apply_impulse(Vec2::new(0.0, 1.0), Vec2::new(1.0, 0.0));
        assert!((rb.velocity.y - 1.0).abs() < EPSILON);
        // I = 0.5, r x J = 1
        assert!((rb.angular_velocity - 2.0).abs() < EPSILON);

        let v = rb.velocity_at(Vec2::new(1.0, 0.0));
        // omega * perp(1,0) = 2 * (0,1)
        assert!((v.y - 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_static_body_ignores_impulses() {
        let mut rb = RigidBody::new_static(Ray::new(Vec2::ZERO, Vec2::new(1.0, 0.0)));
        rb.apply_impulse(Vec2::new(5.0, 5.0), Vec2::new(1.0, 0.0));
        assert_eq!(rb.velocity, Vec2::ZERO);
        assert_eq!(rb.angular_velocity, 0.0);
    }

    #[test]
    fn test_wake_resets_timer() {
        let mut rb = default_test_circle();
        rb.immobile_time = 3.0;
        rb.dormant = true;
        assert!(!rb.is_movable());
        rb.wake();
        assert_eq!(rb.immobile_time(), 0.0);
        assert!(rb.is_movable());
    }

    #[test]
    fn test_sleep() {
        let mut rb = default_test_circle().with_velocity(Vec2::new(3.0, 0.0));
        rb.sleep();
        assert!(rb.is_dormant());
        assert_eq!(rb.velocity, Vec2::ZERO);

        let mut ground = RigidBody::new_static(Circle::new(Vec2::ZERO, 1.0));
        ground.sleep();
        assert!(!ground.is_dormant());
    }
}
