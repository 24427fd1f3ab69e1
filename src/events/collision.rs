//! Overlap notifications from the collision detector.
//!
//! The detector writes one [`CollisionEvent`] per overlapping collider pair
//! each physics step. Consumers such as the projectile contact system read
//! them with a `MessageReader` in the same step.

use bevy_ecs::prelude::*;

/// Two entities with a `BoxCollider` overlap.
///
/// No ordering guarantees are provided between `a` and `b`.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    pub a: Entity,
    pub b: Entity,
}

impl CollisionEvent {
    /// The partner of `entity` in this pair, if `entity` takes part in it.
    pub fn other(&self, entity: Entity) -> Option<Entity> {
        if self.a == entity {
            Some(self.b)
        } else if self.b == entity {
            Some(self.a)
        } else {
            None
        }
    }
}
