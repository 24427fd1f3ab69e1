//! Overlap detection.
//!
//! Every physics step, all collider pairs are tested and one
//! [`CollisionEvent`] message is written per overlapping pair. Pairs where
//! both sides are static terrain are skipped; nothing reacts to those.

use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::{BodyType, RigidBody};
use crate::events::collision::CollisionEvent;

pub fn collision_detector(
    query: Query<(Entity, &MapPosition, &BoxCollider, Option<&RigidBody>)>,
    mut writer: MessageWriter<CollisionEvent>,
) {
    let is_static = |body: Option<&RigidBody>| {
        body.map(|b| b.body_type == BodyType::Static).unwrap_or(true)
    };

    let mut combos = query.iter_combinations();
    while let Some(
        [
            (entity_a, position_a, collider_a, body_a),
            (entity_b, position_b, collider_b, body_b),
        ],
    ) = combos.fetch_next()
    {
        if is_static(body_a) && is_static(body_b) {
            continue;
        }
        if collider_a.overlaps(position_a.pos, collider_b, position_b.pos) {
            writer.write(CollisionEvent {
                a: entity_a,
                b: entity_b,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_math::Vec2;

    fn collisions(world: &mut World) -> Vec<CollisionEvent> {
        let mut schedule = Schedule::default();
        schedule.add_systems(collision_detector);
        schedule.run(world);
        let messages = world.resource::<Messages<CollisionEvent>>();
        messages.iter_current_update_messages().copied().collect()
    }

    #[test]
    fn test_overlapping_pair_is_reported_once() {
        let mut world = World::new();
        world.init_resource::<Messages<CollisionEvent>>();
        let a = world
            .spawn((MapPosition::new(0.0, 0.0), BoxCollider::centered(2.0, 2.0), RigidBody::new()))
            .id();
        let b = world
            .spawn((MapPosition::new(1.0, 0.0), BoxCollider::centered(2.0, 2.0), RigidBody::fixed()))
            .id();
        world.spawn((MapPosition::new(10.0, 0.0), BoxCollider::centered(2.0, 2.0), RigidBody::new()));

        let events = collisions(&mut world);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].other(a), Some(b));
    }

    #[test]
    fn test_static_pairs_are_skipped() {
        let mut world = World::new();
        world.init_resource::<Messages<CollisionEvent>>();
        world.spawn((MapPosition::from_vec(Vec2::ZERO), BoxCollider::centered(2.0, 2.0), RigidBody::fixed()));
        world.spawn((MapPosition::from_vec(Vec2::ZERO), BoxCollider::centered(2.0, 2.0)));
        assert!(collisions(&mut world).is_empty());
    }
}
