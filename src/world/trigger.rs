use std::fmt;

use crate::collision::AABB;
use crate::math::vec2::Vec2;
use crate::objects::{BodyHandle, LayerSet};
use crate::shapes::Collider;

slotmap::new_key_type! {
    /// Handle to a trigger bound to a [`PhysicsWorld`](super::PhysicsWorld).
    pub struct TriggerHandle;
}

/// A body overlapping a trigger during one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerEvent {
    pub trigger: TriggerHandle,
    pub body: BodyHandle,
    /// Unit vector pointing from the trigger toward the body.
    pub normal: Vec2,
    pub overlap: f32,
}

/// A zone that reports the bodies entering it and never pushes them.
///
/// The callback runs once per overlapping non-static body and frame.
pub struct Trigger {
    collider: Collider,
    /// Only bodies on one of these layers fire the trigger. Empty accepts all.
    pub mask: LayerSet,
    pub enabled: bool,
    callback: Box<dyn FnMut(&TriggerEvent)>,
}

impl Trigger {
    pub fn new(collider: impl Into<Collider>, callback: impl FnMut(&TriggerEvent) + 'static) -> Self {
        Self {
            collider: collider.into(),
            mask: LayerSet::EMPTY,
            enabled: true,
            callback: Box::new(callback),
        }
    }

    pub fn with_mask(mut self, mask: LayerSet) -> Self {
        self.mask = mask;
        self
    }

    pub fn collider(&self) -> &Collider {
        &self.collider
    }

    pub fn collider_mut(&mut self) -> &mut Collider {
        &mut self.collider
    }

    pub fn aabb(&self) -> AABB {
        self.collider.aabb()
    }

    pub fn accepts(&self, layer: LayerSet) -> bool {
        self.mask.is_empty() || self.mask.intersects(layer)
    }

    pub(crate) fn fire(&mut self, event: &TriggerEvent) {
        (self.callback)(event);
    }
}

impl fmt::Debug for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trigger")
            .field("collider", &self.collider)
            .field("mask", &self.mask)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}
