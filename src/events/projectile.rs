//! Projectile lifecycle notifications.

use bevy_ecs::prelude::*;

/// Why a projectile left play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecallReason {
    /// Flight time exceeded the weapon's projectile duration.
    Timeout,
    /// Consumed by hitting a target.
    HitTarget,
    /// The owner asked for it back.
    Command,
    /// A newer projectile from the same owner took its place.
    Replaced,
    /// The owner was despawned.
    OwnerDespawned,
}

/// Triggered exactly once per projectile, when it reaches the terminal state.
#[derive(Event, Debug, Clone, Copy)]
pub struct ProjectileRecalled {
    pub projectile: Entity,
    pub owner: Entity,
    pub reason: RecallReason,
}
