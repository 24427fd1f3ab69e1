//! Attack scheduling and weapon effects.
//!
//! Each frame the [`AttackScheduler`] of every armed actor is ticked. When it
//! fires, an [`AttackEvent`] is triggered and the weapon effect runs:
//! - melee: immediate capsule hit test along the aim, knockback on hits
//! - ranged: spawn a projectile, replacing the actor's previous one
//!
//! An actor without a [`Weapon`] is skipped entirely.

use bevy_ecs::prelude::*;
use bevy_math::Vec2;
use log::debug;
use smallvec::SmallVec;

use crate::components::attack::AttackScheduler;
use crate::components::boxcollider::BoxCollider;
use crate::components::layer::Layer;
use crate::components::mapposition::MapPosition;
use crate::components::motion::Motion;
use crate::components::orientation::Orientation;
use crate::components::projectile::{CurrentProjectile, Projectile, RopeConstraint};
use crate::components::rigidbody::RigidBody;
use crate::components::rotation::Rotation;
use crate::components::weapon::{RangedProfile, Weapon, WeaponKind};
use crate::events::combat::{AttackEvent, HitEvent};
use crate::events::projectile::RecallReason;
use crate::resources::worldtime::WorldTime;
use crate::systems::projectile::recall_current;

/// Projectile collider edge length relative to the weapon size.
const PROJECTILE_SIZE_SCALE: f32 = 0.3;

type MeleeTargets<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static MapPosition,
        &'static BoxCollider,
        &'static Layer,
        Option<&'static mut Motion>,
    ),
>;

/// Aim used for an attack: the look direction, or the facing when there is
/// no aim.
pub fn attack_direction(orientation: &Orientation) -> Vec2 {
    if orientation.look_direction == Vec2::ZERO {
        orientation.facing_vector()
    } else {
        orientation.look_direction
    }
}

pub fn attack_system(
    mut commands: Commands,
    time: Res<WorldTime>,
    mut attackers: Query<(
        Entity,
        &MapPosition,
        &Orientation,
        &mut AttackScheduler,
        Option<&Weapon>,
        Option<&mut CurrentProjectile>,
    )>,
    mut targets: MeleeTargets,
    mut projectiles: Query<&mut Projectile>,
) {
    for (entity, position, orientation, mut scheduler, weapon, current) in attackers.iter_mut() {
        let Some(weapon) = weapon else {
            continue;
        };
        if !scheduler.tick(time.delta, weapon.delay()) {
            continue;
        }
        let direction = attack_direction(orientation);
        commands.trigger(AttackEvent {
            attacker: entity,
            direction,
            kind: weapon.kind,
        });

        match weapon.kind {
            WeaponKind::Melee => {
                melee_attack(&mut commands, entity, position.pos, direction, weapon, &mut targets);
            }
            WeaponKind::Ranged(ranged) => {
                let previous = current.as_deref().copied();
                recall_current(
                    &mut commands,
                    previous.as_ref(),
                    &mut projectiles,
                    RecallReason::Replaced,
                );
                let spawned =
                    fire_projectile(&mut commands, entity, position.pos, direction, weapon, &ranged);
                match current {
                    Some(mut current) => {
                        current.register(spawned);
                    }
                    None => {
                        commands
                            .entity(entity)
                            .insert(CurrentProjectile(Some(spawned)));
                    }
                }
            }
        }
    }
}

fn melee_attack(
    commands: &mut Commands,
    attacker: Entity,
    origin: Vec2,
    direction: Vec2,
    weapon: &Weapon,
    targets: &mut MeleeTargets,
) {
    let profile = &weapon.profile;
    let mut hits: SmallVec<[Entity; 8]> = SmallVec::new();
    for (entity, position, collider, layer, motion) in targets.iter_mut() {
        if entity == attacker || !profile.target.contains(*layer) {
            continue;
        }
        let center = collider.center(position.pos);
        if !weapon.melee_reaches(origin, direction, center, collider.half_extents()) {
            continue;
        }
        if let (Some(knockback), Some(mut motion)) = (profile.knockback, motion) {
            motion.apply_knockback(position.pos, origin, knockback.power, knockback.duration);
        }
        hits.push(entity);
    }
    debug!("{:?} melee swing hit {} target(s)", attacker, hits.len());
    for target in hits {
        commands.trigger(HitEvent {
            attacker,
            target,
            power: profile.power,
        });
    }
}

fn fire_projectile(
    commands: &mut Commands,
    owner: Entity,
    origin: Vec2,
    direction: Vec2,
    weapon: &Weapon,
    ranged: &RangedProfile,
) -> Entity {
    let profile = &weapon.profile;
    let direction = direction.normalize_or_zero();
    let edge = profile.weapon_size * PROJECTILE_SIZE_SCALE;
    let projectile = Projectile::launch(
        owner,
        direction,
        profile.projectile_duration,
        profile.target,
        ranged.terrain,
    )
    .with_power(profile.power);

    let mut spawned = commands.spawn((
        MapPosition::from_vec(origin),
        RigidBody::kinematic(direction * profile.speed),
        BoxCollider::centered(edge, edge),
        Layer::PROJECTILE,
        Rotation {
            degrees: direction.y.atan2(direction.x).to_degrees(),
        },
        projectile,
    ));
    if let Some(rope) = &ranged.rope {
        spawned.insert(RopeConstraint::from_profile(rope));
    }
    let id = spawned.id();
    debug!("{:?} fired projectile {:?} toward {:?}", owner, id, direction);
    id
}
