//! Rope constraint solving.
//!
//! Each physics step, after integration and terrain response, every live
//! rope keeps its two ends within the rope distance. The body that is free
//! to move is corrected: the projectile while it flies, the owner once the
//! projectile is stuck. The rope only ever stops separation; it never pulls.

use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::projectile::{Projectile, ProjectileState, RopeConstraint};
use crate::components::rigidbody::RigidBody;

pub fn rope_constraint_system(
    ropes: Query<(Entity, &Projectile, &RopeConstraint)>,
    mut bodies: Query<(&mut MapPosition, &mut RigidBody)>,
) {
    for (entity, projectile, rope) in ropes.iter() {
        let (free, anchor) = match projectile.state {
            ProjectileState::Flying => (entity, projectile.owner),
            ProjectileState::Stuck => (projectile.owner, entity),
            ProjectileState::Recalled => continue,
        };
        let Ok([(anchor_pos, _), (mut free_pos, mut free_body)]) =
            bodies.get_many_mut([anchor, free])
        else {
            log::debug!("Rope on {:?} has a missing end, skipping", entity);
            continue;
        };
        if !free_body.is_simulated() {
            continue;
        }
        if let Some((position, velocity)) =
            rope.solve(anchor_pos.pos, free_pos.pos, free_body.velocity)
        {
            free_pos.pos = position;
            free_body.velocity = velocity;
        }
    }
}

/// Refresh the rope line endpoints for renderers.
pub fn rope_line_system(
    mut ropes: Query<(&Projectile, &MapPosition, &mut RopeConstraint)>,
    positions: Query<&MapPosition, Without<RopeConstraint>>,
) {
    for (projectile, position, mut rope) in ropes.iter_mut() {
        let owner = positions
            .get(projectile.owner)
            .map(|p| p.pos)
            .unwrap_or(position.pos);
        rope.line = [position.pos, owner];
    }
}
