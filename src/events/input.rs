//! Abstract input surface for actors.
//!
//! Device bindings live outside the crate. Whatever samples the devices
//! writes [`ActorInput`] messages; the intent system drains them at the start
//! of every frame and hands each action to the addressed actor's
//! [`Controller`](crate::components::controller::Controller).

use bevy_ecs::prelude::*;
use bevy_math::Vec2;

/// One discrete input action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    /// Movement axis. Only the horizontal component is used.
    Move(Vec2),
    /// Aim at a world-space point.
    LookAt(Vec2),
    /// Aim along a raw vector (gamepad stick).
    LookToward(Vec2),
    Jump,
    /// Fire button edge. `pressed: false` is the release.
    Fire { pressed: bool },
    Recall,
    /// Rope reel axis. Positive shortens the rope.
    Reel(f32),
    Interact,
}

/// Input addressed to a single actor.
#[derive(Message, Debug, Clone, Copy)]
pub struct ActorInput {
    pub actor: Entity,
    pub action: InputAction,
}

impl ActorInput {
    pub fn new(actor: Entity, action: InputAction) -> Self {
        Self { actor, action }
    }
}
