//! Terrain response for actors.
//!
//! Dynamic actors that end a step overlapping a solid static collider are
//! pushed out along the axis of least penetration. Velocity into the surface
//! is dropped so an actor resting on the ground stays at rest and the ground
//! probe keeps seeing it.

use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::layer::{Layer, LayerMask};
use crate::components::mapposition::MapPosition;
use crate::components::motion::Motion;
use crate::components::rigidbody::{BodyType, RigidBody};

/// Layers actors cannot walk through.
pub const SOLID_LAYERS: LayerMask = LayerMask::TERRAIN;

pub fn terrain_collision_system(
    mut actors: Query<(&mut MapPosition, &BoxCollider, &mut RigidBody), With<Motion>>,
    solids: Query<(&MapPosition, &BoxCollider, &Layer, &RigidBody), Without<Motion>>,
) {
    for (mut position, collider, mut body) in actors.iter_mut() {
        if !body.is_simulated() {
            continue;
        }
        for (solid_pos, solid_collider, layer, solid_body) in solids.iter() {
            if solid_body.body_type != BodyType::Static || !SOLID_LAYERS.contains(*layer) {
                continue;
            }
            let Some(push) = collider.penetration(position.pos, solid_collider, solid_pos.pos)
            else {
                continue;
            };
            position.pos += push;
            if push.x != 0.0 && body.velocity.x * push.x < 0.0 {
                body.velocity.x = 0.0;
            }
            if push.y != 0.0 && body.velocity.y * push.y < 0.0 {
                body.velocity.y = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::worldtime::WorldTime;
    use crate::systems::movement::movement_system;
    use bevy_math::Vec2;

    fn floor(world: &mut World) {
        world.spawn((
            MapPosition::new(0.0, -0.5),
            BoxCollider::centered(20.0, 1.0),
            Layer::GROUND,
            RigidBody::fixed(),
        ));
    }

    fn actor(world: &mut World, y: f32) -> Entity {
        world
            .spawn((
                MapPosition::new(0.0, y),
                BoxCollider::centered(1.0, 2.0),
                RigidBody::new().with_force("gravity", Vec2::new(0.0, -9.81)),
                Motion::new(),
            ))
            .id()
    }

    #[test]
    fn test_actor_lands_and_rests_on_floor() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        floor(&mut world);
        let e = actor(&mut world, 3.0);
        let mut schedule = Schedule::default();
        schedule.add_systems((movement_system, terrain_collision_system).chain());
        for _ in 0..200 {
            schedule.run(&mut world);
        }
        let pos = world.get::<MapPosition>(e).unwrap().pos;
        assert!((pos.y - 1.0).abs() < 0.05, "resting height was {}", pos.y);
        assert!(world.get::<RigidBody>(e).unwrap().velocity.y.abs() < 0.5);
    }

    #[test]
    fn test_non_solid_layers_are_ignored() {
        let mut world = World::new();
        world.spawn((
            MapPosition::new(0.0, 0.0),
            BoxCollider::centered(4.0, 4.0),
            Layer::ENEMY,
            RigidBody::fixed(),
        ));
        let e = actor(&mut world, 0.0);
        let mut schedule = Schedule::default();
        schedule.add_systems(terrain_collision_system);
        schedule.run(&mut world);
        assert_eq!(world.get::<MapPosition>(e).unwrap().pos, Vec2::ZERO);
    }
}
