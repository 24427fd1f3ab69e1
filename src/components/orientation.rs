//! Facing and aim of an actor.
//!
//! [`Orientation`] is a pure function of the look direction: the actor faces
//! left iff the aim angle is beyond ±90°, and the weapon pivot is rotated to
//! the aim angle. Visual collaborators read the flags; nothing here renders.

use bevy_ecs::prelude::Component;
use bevy_math::Vec2;

/// Aim vectors shorter than this are treated as "no direction".
pub const DEFAULT_LOOK_DEADZONE: f32 = 0.9;

/// Convert a raw aim vector into a look direction: zero inside the
/// deadzone, unit length otherwise.
pub fn look_direction(raw: Vec2, deadzone: f32) -> Vec2 {
    if raw.length() < deadzone {
        Vec2::ZERO
    } else {
        raw.normalize_or_zero()
    }
}

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Orientation {
    /// Unit vector or zero.
    pub look_direction: Vec2,
    /// Mirror flag for the character visual.
    pub facing_left: bool,
    /// Weapon pivot rotation in degrees.
    pub pivot_degrees: f32,
    /// Vertical mirror flag for the weapon visual.
    pub weapon_flip_y: bool,
}

impl Orientation {
    /// Recompute facing and pivot from `direction`.
    pub fn face(&mut self, direction: Vec2) {
        let degrees = direction.y.atan2(direction.x).to_degrees();
        self.facing_left = degrees.abs() > 90.0;
        self.pivot_degrees = degrees;
        self.weapon_flip_y = self.facing_left;
    }

    /// Horizontal unit vector the actor currently faces.
    pub fn facing_vector(&self) -> Vec2 {
        if self.facing_left { Vec2::NEG_X } else { Vec2::X }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_look_direction_inside_deadzone_is_zero() {
        assert_eq!(look_direction(Vec2::new(0.5, 0.5), 0.9), Vec2::ZERO);
        assert_eq!(look_direction(Vec2::ZERO, 0.9), Vec2::ZERO);
    }

    #[test]
    fn test_look_direction_outside_deadzone_is_normalized() {
        let dir = look_direction(Vec2::new(3.0, 4.0), 0.9);
        assert!(approx_eq(dir.x, 0.6));
        assert!(approx_eq(dir.y, 0.8));
        // Exactly on the threshold counts as outside.
        let dir = look_direction(Vec2::new(0.9, 0.0), 0.9);
        assert!(approx_eq(dir.length(), 1.0));
    }

    #[test]
    fn test_zero_deadzone_keeps_zero_vector() {
        assert_eq!(look_direction(Vec2::ZERO, 0.0), Vec2::ZERO);
    }

    #[test]
    fn test_face_left_beyond_ninety_degrees() {
        let mut o = Orientation::default();
        o.face(Vec2::new(-1.0, 0.1));
        assert!(o.facing_left);
        assert!(o.weapon_flip_y);
        assert_eq!(o.facing_vector(), Vec2::NEG_X);

        o.face(Vec2::new(0.0, 1.0));
        // Straight up is exactly 90 degrees: not left.
        assert!(!o.facing_left);
        assert!(approx_eq(o.pivot_degrees, 90.0));
    }

    #[test]
    fn test_face_zero_direction_faces_right() {
        let mut o = Orientation::default();
        o.face(Vec2::ZERO);
        assert!(!o.facing_left);
        assert!(approx_eq(o.pivot_degrees, 0.0));
    }

    #[test]
    fn test_face_down_left_angle() {
        let mut o = Orientation::default();
        o.face(Vec2::new(-1.0, -1.0));
        assert!(o.facing_left);
        assert!(approx_eq(o.pivot_degrees, -135.0));
    }
}
