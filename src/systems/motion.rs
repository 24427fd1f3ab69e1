//! Velocity resolution for actors.
//!
//! Runs at the top of every physics step, before integration:
//! 1. [`motion_system`] overwrites horizontal velocity from movement intent
//!    and the horizontal part of any active knockback.
//! 2. [`knockback_decay_system`] counts knockback down and adds the whole
//!    knockback vector once more for this step.
//!
//! Vertical velocity is otherwise left to gravity and jump impulses.

use bevy_ecs::prelude::*;

use crate::components::motion::Motion;
use crate::components::rigidbody::RigidBody;
use crate::components::stats::Stats;
use crate::resources::worldtime::WorldTime;

pub fn motion_system(mut query: Query<(&Motion, Option<&Stats>, &mut RigidBody)>) {
    for (motion, stats, mut body) in query.iter_mut() {
        if !body.is_simulated() {
            continue;
        }
        let move_speed = stats.map(|s| s.move_speed).unwrap_or(0.0);
        body.velocity.x = motion.horizontal_velocity(move_speed);
    }
}

pub fn knockback_decay_system(
    mut query: Query<(&mut Motion, &mut RigidBody)>,
    time: Res<WorldTime>,
) {
    for (mut motion, mut body) in query.iter_mut() {
        if let Some(contribution) = motion.decay_knockback(time.fixed_delta) {
            if body.is_simulated() {
                body.velocity += contribution;
            }
        }
    }
}
