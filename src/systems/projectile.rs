//! Projectile flight, contact resolution and recall.
//!
//! # Frame systems
//!
//! - [`projectile_update_system`] – flight timeout, heading and reel
//! - [`rope_line_system`](crate::systems::rope::rope_line_system) – rope endpoints
//!
//! # Physics systems
//!
//! - [`projectile_contact_system`] – terrain sticks, targets consume
//!
//! Every path into the terminal state goes through [`begin_recall`], which
//! removes the rope before the projectile entity is despawned and triggers
//! [`ProjectileRecalled`] exactly once. The owner's registration is cleared
//! by the [`clear_owner_registration`] observer, and only if it still points
//! at the recalled projectile.

use bevy_ecs::prelude::*;
use log::debug;
use rustc_hash::FxHashMap;

use crate::components::layer::Layer;
use crate::components::projectile::{ContactKind, CurrentProjectile, Projectile, RopeConstraint};
use crate::components::rigidbody::RigidBody;
use crate::components::rotation::Rotation;
use crate::events::collision::CollisionEvent;
use crate::events::combat::HitEvent;
use crate::events::projectile::{ProjectileRecalled, RecallReason};
use crate::resources::simconfig::SimConfig;
use crate::resources::worldtime::WorldTime;

/// Move a projectile into the terminal state.
///
/// Returns false if it was already recalled.
pub fn begin_recall(
    commands: &mut Commands,
    entity: Entity,
    projectile: &mut Projectile,
    reason: RecallReason,
) -> bool {
    if !projectile.mark_recalled() {
        return false;
    }
    commands.entity(entity).try_remove::<RopeConstraint>();
    commands.trigger(ProjectileRecalled {
        projectile: entity,
        owner: projectile.owner,
        reason,
    });
    commands.entity(entity).try_despawn();
    debug!("Projectile {:?} recalled: {:?}", entity, reason);
    true
}

/// Recall whatever projectile `current` has registered.
pub fn recall_current(
    commands: &mut Commands,
    current: Option<&CurrentProjectile>,
    projectiles: &mut Query<&mut Projectile>,
    reason: RecallReason,
) -> bool {
    let Some(entity) = current.and_then(|c| c.get()) else {
        return false;
    };
    match projectiles.get_mut(entity) {
        Ok(mut projectile) => begin_recall(commands, entity, &mut projectile, reason),
        Err(_) => {
            debug!("Registered projectile {:?} no longer exists", entity);
            false
        }
    }
}

/// One-shot recall of an actor's current projectile.
pub fn recall_actor_projectile(
    In((actor, reason)): In<(Entity, RecallReason)>,
    mut commands: Commands,
    owners: Query<&CurrentProjectile>,
    mut projectiles: Query<&mut Projectile>,
) -> bool {
    recall_current(&mut commands, owners.get(actor).ok(), &mut projectiles, reason)
}

/// Observer: drop the owner's registration for a recalled projectile.
pub fn clear_owner_registration(
    trigger: On<ProjectileRecalled>,
    mut owners: Query<&mut CurrentProjectile>,
) {
    let event = trigger.event();
    match owners.get_mut(event.owner) {
        Ok(mut current) => {
            current.clear_if(event.projectile);
        }
        Err(_) => debug!(
            "Owner {:?} of projectile {:?} is gone",
            event.owner, event.projectile
        ),
    }
}

pub fn projectile_update_system(
    mut commands: Commands,
    time: Res<WorldTime>,
    config: Res<SimConfig>,
    mut projectiles: Query<(
        Entity,
        &mut Projectile,
        &RigidBody,
        &mut Rotation,
        Option<&mut RopeConstraint>,
    )>,
) {
    let dt = time.delta;
    for (entity, mut projectile, body, mut rotation, rope) in projectiles.iter_mut() {
        if !projectile.is_active() {
            continue;
        }
        if projectile.advance(dt) {
            begin_recall(&mut commands, entity, &mut projectile, RecallReason::Timeout);
            continue;
        }
        if projectile.is_flying() && body.velocity.length_squared() > config.heading_threshold {
            rotation.degrees = body.velocity.y.atan2(body.velocity.x).to_degrees();
        }
        if let Some(mut rope) = rope {
            if projectile.reel_input.abs() > config.reel_deadzone {
                rope.reel(projectile.reel_input, dt);
            }
        }
    }
}

#[derive(Default)]
struct Contacts {
    terrain: bool,
    target: Option<Entity>,
}

/// Resolve this step's overlaps for flying projectiles.
///
/// Contacts are aggregated per projectile first, so terrain wins over a
/// target touched in the same step regardless of message order.
pub fn projectile_contact_system(
    mut commands: Commands,
    mut reader: MessageReader<CollisionEvent>,
    mut projectiles: Query<(&mut Projectile, &mut RigidBody)>,
    layers: Query<&Layer>,
) {
    let mut contacts: FxHashMap<Entity, Contacts> = FxHashMap::default();
    for event in reader.read() {
        for (entity, other) in [(event.a, event.b), (event.b, event.a)] {
            let Ok((projectile, _)) = projectiles.get(entity) else {
                continue;
            };
            if !projectile.is_flying() || other == projectile.owner {
                continue;
            }
            let Ok(layer) = layers.get(other) else {
                continue;
            };
            match projectile.classify_contact(*layer) {
                Some(ContactKind::Terrain) => contacts.entry(entity).or_default().terrain = true,
                Some(ContactKind::Target) => {
                    contacts.entry(entity).or_default().target.get_or_insert(other);
                }
                None => {}
            }
        }
    }

    for (entity, contact) in contacts {
        let Ok((mut projectile, mut body)) = projectiles.get_mut(entity) else {
            continue;
        };
        if contact.terrain {
            if projectile.stick() {
                body.make_static();
                debug!("Projectile {:?} stuck", entity);
            }
        } else if let Some(target) = contact.target {
            commands.trigger(HitEvent {
                attacker: projectile.owner,
                target,
                power: projectile.power,
            });
            begin_recall(&mut commands, entity, &mut projectile, RecallReason::HitTarget);
        }
    }
}
