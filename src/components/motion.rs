//! Locomotion state of an actor: horizontal intent, jump request and knockback.
//!
//! [`Motion`] holds everything the physics step needs to resolve an actor's
//! velocity. The frame step writes intent into it (movement direction, jump
//! request); the physics step reads it back:
//!
//! 1. [`Motion::horizontal_velocity`] sets the x velocity from intent and
//!    the active knockback.
//! 2. [`Motion::decay_knockback`] counts the knockback timer down and hands
//!    back the knockback vector, which is added to velocity once more.
//!
//! Knockback is an override, not a stack: [`Motion::apply_knockback`]
//! replaces whatever knockback was running.

use bevy_ecs::prelude::Component;
use bevy_math::Vec2;

use crate::components::layer::LayerMask;

/// Length of the downward ground probe in world units.
pub const DEFAULT_GROUND_PROBE_LENGTH: f32 = 1.1;
/// Share of direct control kept while knockback is active.
pub const DEFAULT_KNOCKBACK_CONTROL_SCALE: f32 = 0.2;

#[derive(Component, Clone, Debug)]
pub struct Motion {
    /// Horizontal unit vector or zero. `y` is always zero.
    pub movement_direction: Vec2,
    /// Pending jump. Cleared only when a jump actually happens.
    pub jump_requested: bool,
    pub knockback: Vec2,
    /// Seconds of knockback left. Knockback is active while this is positive.
    pub knockback_remaining: f32,
    pub control_scale: f32,
    pub probe_length: f32,
    /// Collision classes the ground probe accepts.
    pub ground_mask: LayerMask,
}

impl Default for Motion {
    fn default() -> Self {
        Self::new()
    }
}

impl Motion {
    pub fn new() -> Self {
        Self {
            movement_direction: Vec2::ZERO,
            jump_requested: false,
            knockback: Vec2::ZERO,
            knockback_remaining: 0.0,
            control_scale: DEFAULT_KNOCKBACK_CONTROL_SCALE,
            probe_length: DEFAULT_GROUND_PROBE_LENGTH,
            ground_mask: LayerMask::GROUND,
        }
    }

    pub fn with_probe_length(mut self, length: f32) -> Self {
        self.probe_length = length;
        self
    }

    pub fn with_control_scale(mut self, scale: f32) -> Self {
        self.control_scale = scale;
        self
    }

    pub fn with_ground_mask(mut self, mask: LayerMask) -> Self {
        self.ground_mask = mask;
        self
    }

    /// Set horizontal intent from a raw 2D axis. Only the sign of `x` survives.
    pub fn set_movement_axis(&mut self, axis: Vec2) {
        self.movement_direction = Vec2::new(axis.x, 0.0).normalize_or_zero();
    }

    pub fn request_jump(&mut self) {
        self.jump_requested = true;
    }

    /// Consume the jump request if the actor is grounded.
    pub fn take_jump(&mut self, grounded: bool) -> bool {
        if self.jump_requested && grounded {
            self.jump_requested = false;
            true
        } else {
            false
        }
    }

    pub fn is_knockback_active(&self) -> bool {
        self.knockback_remaining > 0.0
    }

    /// Horizontal velocity for this physics tick.
    ///
    /// While knockback is active direct control is damped to `control_scale`
    /// and the knockback's x component is added on top.
    pub fn horizontal_velocity(&self, move_speed: f32) -> f32 {
        let direct = self.movement_direction.x * move_speed;
        if self.is_knockback_active() {
            direct * self.control_scale + self.knockback.x
        } else {
            direct
        }
    }

    /// Count knockback down by one physics tick.
    ///
    /// Returns the knockback vector to add to this tick's velocity, or
    /// `None` once knockback is over. The x part stacks with the one already
    /// in [`Motion::horizontal_velocity`].
    pub fn decay_knockback(&mut self, dt: f32) -> Option<Vec2> {
        if !self.is_knockback_active() {
            return None;
        }
        self.knockback_remaining -= dt;
        Some(self.knockback)
    }

    /// Push the actor away from `source`. Replaces any running knockback.
    pub fn apply_knockback(&mut self, own_position: Vec2, source: Vec2, power: f32, duration: f32) {
        self.knockback = (own_position - source).normalize_or_zero() * power;
        self.knockback_remaining = duration;
    }
}
