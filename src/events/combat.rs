//! Combat cues triggered for external collaborators.
//!
//! These are observer events: the attack and projectile systems trigger
//! them through `Commands::trigger`, and presentation code (animation,
//! sound, score) subscribes with `On<...>`. Nothing inside the crate depends
//! on anyone observing them.

use bevy_ecs::prelude::*;
use bevy_math::Vec2;

use crate::components::weapon::WeaponKind;

/// A weapon fired. Triggered once per scheduler fire, hit or miss.
#[derive(Event, Debug, Clone, Copy)]
pub struct AttackEvent {
    pub attacker: Entity,
    /// Unit aim direction used for the attack.
    pub direction: Vec2,
    pub kind: WeaponKind,
}

/// A melee swing or a projectile connected with a target.
#[derive(Event, Debug, Clone, Copy)]
pub struct HitEvent {
    pub attacker: Entity,
    pub target: Entity,
    pub power: f32,
}

/// The interact button was pressed. Dialogue and prompts react to this.
#[derive(Event, Debug, Clone, Copy)]
pub struct InteractEvent {
    pub actor: Entity,
}
