//! Facing and weapon pivot, recomputed from the look direction every frame.

use bevy_ecs::prelude::*;

use crate::components::orientation::Orientation;

/// Refresh facing and weapon pivot from the latest look direction.
///
/// A zero look direction resolves to an angle of 0: facing right.
pub fn orientation_system(mut query: Query<&mut Orientation>) {
    for mut orientation in query.iter_mut() {
        let direction = orientation.look_direction;
        orientation.face(direction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_math::Vec2;

    #[test]
    fn test_zero_look_faces_right() {
        let mut world = World::new();
        let e = world.spawn(Orientation::default()).id();
        let mut schedule = Schedule::default();
        schedule.add_systems(orientation_system);

        world.get_mut::<Orientation>(e).unwrap().look_direction = Vec2::NEG_X;
        schedule.run(&mut world);
        assert!(world.get::<Orientation>(e).unwrap().facing_left);

        world.get_mut::<Orientation>(e).unwrap().look_direction = Vec2::ZERO;
        schedule.run(&mut world);
        let o = world.get::<Orientation>(e).unwrap();
        assert!(!o.facing_left);
        assert!(!o.weapon_flip_y);
        assert_eq!(o.pivot_degrees, 0.0);
    }
}
