//! Numeric character stats consumed by motion.
//!
//! An actor without [`Stats`] is treated as having zero move speed and zero
//! jump power rather than being an error.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MOVE_SPEED: f32 = 5.0;
pub const DEFAULT_JUMP_POWER: f32 = 7.0;

#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    /// Horizontal speed in world units per second.
    pub move_speed: f32,
    /// Upward impulse applied on jump.
    pub jump_power: f32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            move_speed: DEFAULT_MOVE_SPEED,
            jump_power: DEFAULT_JUMP_POWER,
        }
    }
}

impl Stats {
    pub fn new(move_speed: f32, jump_power: f32) -> Self {
        Self {
            move_speed,
            jump_power,
        }
    }
}
