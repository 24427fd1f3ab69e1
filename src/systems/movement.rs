//! Fixed-step integration of rigid body velocity into position.

use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::resources::worldtime::WorldTime;

/// Semi-implicit Euler step: accelerations into velocity, then velocity
/// into position. Static and frozen bodies are skipped.
pub fn movement_system(mut query: Query<(&mut MapPosition, &mut RigidBody)>, time: Res<WorldTime>) {
    let dt = time.fixed_delta;
    for (mut position, mut rigidbody) in query.iter_mut() {
        if !rigidbody.is_simulated() {
            continue;
        }
        let acceleration = rigidbody.total_acceleration();
        rigidbody.velocity += acceleration * dt;
        position.pos += rigidbody.velocity * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_math::Vec2;

    fn world_with(body: RigidBody) -> (World, Entity) {
        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_fixed_delta(0.5));
        let e = world.spawn((MapPosition::new(0.0, 0.0), body)).id();
        (world, e)
    }

    #[test]
    fn test_gravity_integrates_into_position() {
        let (mut world, e) = world_with(RigidBody::new().with_force("gravity", Vec2::new(0.0, -10.0)));
        let mut schedule = Schedule::default();
        schedule.add_systems(movement_system);
        schedule.run(&mut world);
        let body = world.get::<RigidBody>(e).unwrap();
        let pos = world.get::<MapPosition>(e).unwrap();
        assert_eq!(body.velocity, Vec2::new(0.0, -5.0));
        assert_eq!(pos.pos, Vec2::new(0.0, -2.5));
    }

    #[test]
    fn test_static_body_does_not_move() {
        let mut body = RigidBody::new().with_force("gravity", Vec2::new(0.0, -10.0));
        body.velocity = Vec2::new(3.0, 0.0);
        body.make_static();
        let (mut world, e) = world_with(body);
        let mut schedule = Schedule::default();
        schedule.add_systems(movement_system);
        schedule.run(&mut world);
        assert_eq!(world.get::<MapPosition>(e).unwrap().pos, Vec2::ZERO);
    }
}
