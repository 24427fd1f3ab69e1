//! Equipped weapon: profile plus melee/ranged behavior.
//!
//! A [`Weapon`] is immutable while equipped; re-equipping replaces the whole
//! component. The profile is read by the attack scheduler (delay) and by the
//! attack system (everything else).

use bevy_ecs::prelude::Component;
use bevy_math::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::layer::LayerMask;

/// Knockback applied to whatever the weapon hits.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnockbackProfile {
    pub power: f32,
    /// Seconds.
    pub duration: f32,
}

impl Default for KnockbackProfile {
    fn default() -> Self {
        Self {
            power: 0.1,
            duration: 0.5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponProfile {
    /// Attack period in seconds.
    pub delay: f32,
    pub weapon_size: f32,
    pub power: f32,
    /// Projectile speed for ranged weapons.
    pub speed: f32,
    pub attack_range: f32,
    pub knockback: Option<KnockbackProfile>,
    /// Layers this weapon can hit.
    pub target: LayerMask,
    /// Projectile lifetime in seconds for ranged weapons.
    pub projectile_duration: f32,
}

impl Default for WeaponProfile {
    fn default() -> Self {
        Self {
            delay: 1.0,
            weapon_size: 1.0,
            power: 1.0,
            speed: 1.0,
            attack_range: 10.0,
            knockback: None,
            target: LayerMask::ENEMY,
            projectile_duration: 5.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RopeProfile {
    pub min_length: f32,
    pub max_length: f32,
    /// Rope length change per second per unit of reel input.
    pub reel_speed: f32,
}

impl Default for RopeProfile {
    fn default() -> Self {
        Self {
            min_length: 1.0,
            max_length: 10.0,
            reel_speed: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangedProfile {
    /// Layers the projectile sticks to.
    pub terrain: LayerMask,
    pub rope: Option<RopeProfile>,
}

impl Default for RangedProfile {
    fn default() -> Self {
        Self {
            terrain: LayerMask::TERRAIN,
            rope: Some(RopeProfile::default()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum WeaponKind {
    Melee,
    Ranged(RangedProfile),
}

impl WeaponKind {
    pub fn name(&self) -> &'static str {
        match self {
            WeaponKind::Melee => "melee",
            WeaponKind::Ranged(_) => "ranged",
        }
    }
}

#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub profile: WeaponProfile,
    pub kind: WeaponKind,
}

impl Weapon {
    pub fn melee(profile: WeaponProfile) -> Self {
        Self {
            profile,
            kind: WeaponKind::Melee,
        }
    }

    pub fn ranged(profile: WeaponProfile, ranged: RangedProfile) -> Self {
        Self {
            profile,
            kind: WeaponKind::Ranged(ranged),
        }
    }

    pub fn delay(&self) -> f32 {
        self.profile.delay
    }

    /// Melee reach test.
    ///
    /// The swing covers the segment from `origin` along `direction` for
    /// `attack_range`, thickened by half the weapon size. A target is hit when
    /// its center is within that band plus its own half extent.
    pub fn melee_reaches(
        &self,
        origin: Vec2,
        direction: Vec2,
        target_center: Vec2,
        target_half_extents: Vec2,
    ) -> bool {
        let end = origin + direction.normalize_or_zero() * self.profile.attack_range;
        let distance = distance_to_segment(target_center, origin, end);
        distance <= self.profile.weapon_size * 0.5 + target_half_extents.max_element()
    }
}

fn distance_to_segment(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn sword() -> Weapon {
        Weapon::melee(WeaponProfile {
            attack_range: 2.0,
            weapon_size: 1.0,
            ..WeaponProfile::default()
        })
    }

    #[test]
    fn test_defaults_match_handler_defaults() {
        let p = WeaponProfile::default();
        assert!(approx_eq(p.delay, 1.0));
        assert!(approx_eq(p.attack_range, 10.0));
        assert!(p.knockback.is_none());
        let k = KnockbackProfile::default();
        assert!(approx_eq(k.power, 0.1));
        assert!(approx_eq(k.duration, 0.5));
    }

    #[test]
    fn test_distance_to_segment() {
        let d = distance_to_segment(Vec2::new(1.0, 1.0), Vec2::ZERO, Vec2::new(2.0, 0.0));
        assert!(approx_eq(d, 1.0));
        let d = distance_to_segment(Vec2::new(4.0, 0.0), Vec2::ZERO, Vec2::new(2.0, 0.0));
        assert!(approx_eq(d, 2.0));
        let d = distance_to_segment(Vec2::new(0.0, 3.0), Vec2::ZERO, Vec2::ZERO);
        assert!(approx_eq(d, 3.0));
    }

    #[test]
    fn test_melee_reaches_in_front() {
        let w = sword();
        let half = Vec2::splat(0.5);
        assert!(w.melee_reaches(Vec2::ZERO, Vec2::X, Vec2::new(2.5, 0.0), half));
        assert!(!w.melee_reaches(Vec2::ZERO, Vec2::X, Vec2::new(3.5, 0.0), half));
    }

    #[test]
    fn test_melee_misses_behind() {
        let w = sword();
        let half = Vec2::splat(0.25);
        assert!(!w.melee_reaches(Vec2::ZERO, Vec2::X, Vec2::new(-1.5, 0.0), half));
    }

    #[test]
    fn test_melee_zero_direction_hits_only_adjacent() {
        let w = sword();
        let half = Vec2::splat(0.5);
        assert!(w.melee_reaches(Vec2::ZERO, Vec2::ZERO, Vec2::new(0.8, 0.0), half));
        assert!(!w.melee_reaches(Vec2::ZERO, Vec2::ZERO, Vec2::new(2.0, 0.0), half));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(sword().kind.name(), "melee");
        let bow = Weapon::ranged(WeaponProfile::default(), RangedProfile::default());
        assert_eq!(bow.kind.name(), "ranged");
    }
}
