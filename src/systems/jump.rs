//! Ground probe and jump resolution.
//!
//! A jump request stays pending on [`Motion`] until the actor is grounded,
//! then turns into exactly one upward impulse of the actor's jump power.

use bevy_ecs::prelude::*;
use bevy_math::Vec2;

use crate::components::boxcollider::BoxCollider;
use crate::components::layer::{Layer, LayerMask};
use crate::components::mapposition::MapPosition;
use crate::components::motion::Motion;
use crate::components::rigidbody::RigidBody;
use crate::components::stats::Stats;

/// Colliders the ground probe can hit.
pub type ProbeTargets<'w, 's> =
    Query<'w, 's, (Entity, &'static MapPosition, &'static BoxCollider, &'static Layer)>;

/// Cast a ray of `length` straight down from `origin`.
///
/// Returns true iff it hits a collider whose layer is in `mask`. The
/// `exclude` entity (the prober itself) is never considered.
pub fn probe_ground(
    origin: Vec2,
    length: f32,
    mask: LayerMask,
    exclude: Entity,
    targets: &ProbeTargets,
) -> bool {
    targets.iter().any(|(entity, position, collider, layer)| {
        entity != exclude
            && mask.contains(*layer)
            && collider
                .raycast(position.pos, origin, Vec2::NEG_Y, length)
                .is_some()
    })
}

pub fn jump_system(
    mut actors: Query<(Entity, &MapPosition, &mut Motion, &mut RigidBody, Option<&Stats>)>,
    targets: ProbeTargets,
) {
    for (entity, position, mut motion, mut body, stats) in actors.iter_mut() {
        if !motion.jump_requested {
            continue;
        }
        let grounded = probe_ground(
            position.pos,
            motion.probe_length,
            motion.ground_mask,
            entity,
            &targets,
        );
        if motion.take_jump(grounded) {
            let jump_power = stats.map(|s| s.jump_power).unwrap_or(0.0);
            body.apply_impulse(Vec2::new(0.0, jump_power));
            log::debug!("{:?} jumped with power {}", entity, jump_power);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ground(world: &mut World, x: f32, width: f32) -> Entity {
        // top surface at y = 0
        world
            .spawn((
                MapPosition::new(x, -0.5),
                BoxCollider::centered(width, 1.0),
                Layer::GROUND,
            ))
            .id()
    }

    fn probe(world: &mut World, origin: Vec2, exclude: Entity) -> bool {
        let mut state = bevy_ecs::system::SystemState::<ProbeTargets>::new(world);
        let targets = state.get(world);
        probe_ground(origin, 1.1, LayerMask::GROUND, exclude, &targets)
    }

    // ==================== PROBE TESTS ====================

    #[test]
    fn test_probe_hits_ground_below() {
        let mut world = World::new();
        ground(&mut world, 0.0, 10.0);
        let me = world.spawn_empty().id();
        assert!(probe(&mut world, Vec2::new(0.0, 1.0), me));
    }

    #[test]
    fn test_probe_misses_when_too_high() {
        let mut world = World::new();
        ground(&mut world, 0.0, 10.0);
        let me = world.spawn_empty().id();
        assert!(!probe(&mut world, Vec2::new(0.0, 1.5), me));
    }

    #[test]
    fn test_probe_over_gap() {
        let mut world = World::new();
        ground(&mut world, -6.0, 4.0);
        ground(&mut world, 6.0, 4.0);
        let me = world.spawn_empty().id();
        assert!(!probe(&mut world, Vec2::new(0.0, 1.0), me));
        assert!(probe(&mut world, Vec2::new(5.0, 1.0), me));
    }

    #[test]
    fn test_probe_ignores_other_layers_and_self() {
        let mut world = World::new();
        world.spawn((
            MapPosition::new(0.0, -0.5),
            BoxCollider::centered(10.0, 1.0),
            Layer::ENEMY,
        ));
        let me = world
            .spawn((
                MapPosition::new(0.0, 1.0),
                BoxCollider::centered(1.0, 2.0),
                Layer::GROUND,
            ))
            .id();
        assert!(!probe(&mut world, Vec2::new(0.0, 1.0), me));
    }

    // ==================== JUMP TESTS ====================

    fn jumper(world: &mut World, y: f32) -> Entity {
        world
            .spawn((
                MapPosition::new(0.0, y),
                Motion::new(),
                RigidBody::new(),
                Stats::new(5.0, 7.0),
            ))
            .id()
    }

    fn run_jump(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(jump_system);
        schedule.run(world);
    }

    #[test]
    fn test_single_request_single_jump() {
        let mut world = World::new();
        ground(&mut world, 0.0, 10.0);
        let e = jumper(&mut world, 1.0);
        world.get_mut::<Motion>(e).unwrap().request_jump();
        run_jump(&mut world);
        assert_eq!(world.get::<RigidBody>(e).unwrap().velocity.y, 7.0);
        run_jump(&mut world);
        run_jump(&mut world);
        assert_eq!(world.get::<RigidBody>(e).unwrap().velocity.y, 7.0);
    }

    #[test]
    fn test_airborne_request_waits_for_ground() {
        let mut world = World::new();
        ground(&mut world, 0.0, 10.0);
        let e = jumper(&mut world, 5.0);
        world.get_mut::<Motion>(e).unwrap().request_jump();
        run_jump(&mut world);
        assert_eq!(world.get::<RigidBody>(e).unwrap().velocity.y, 0.0);
        assert!(world.get::<Motion>(e).unwrap().jump_requested);

        world.get_mut::<MapPosition>(e).unwrap().pos.y = 1.0;
        run_jump(&mut world);
        assert_eq!(world.get::<RigidBody>(e).unwrap().velocity.y, 7.0);
        assert!(!world.get::<Motion>(e).unwrap().jump_requested);
    }

    #[test]
    fn test_statless_actor_jumps_with_zero_power() {
        let mut world = World::new();
        ground(&mut world, 0.0, 10.0);
        let e = world
            .spawn((MapPosition::new(0.0, 1.0), Motion::new(), RigidBody::new()))
            .id();
        world.get_mut::<Motion>(e).unwrap().request_jump();
        run_jump(&mut world);
        assert_eq!(world.get::<RigidBody>(e).unwrap().velocity.y, 0.0);
    }
}
