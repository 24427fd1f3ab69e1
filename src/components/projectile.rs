//! Projectile lifecycle and rope tether components.
//!
//! A fired projectile is an independent entity. It remembers its owner only
//! through an [`Entity`] handle, which may go stale; every lookup through it
//! is an existence check.
//!
//! # State machine
//!
//! ```text
//! Flying ──terrain──▶ Stuck
//!   │                  │
//!   ├─target/timeout─┐ │ recall
//!   │                ▼ ▼
//!   └────recall────▶ Recalled (terminal)
//! ```
//!
//! Every transition method returns whether it actually changed state, so
//! repeated recalls and late contacts are silent no-ops.
//!
//! # Related
//!
//! - [`RopeConstraint`] – the max-distance tether stored on the projectile entity
//! - [`CurrentProjectile`] – the owner's record of its active projectile
//! - [`crate::systems::projectile`] – systems that drive these components

use bevy_ecs::prelude::{Component, Entity};
use bevy_math::Vec2;

use crate::components::layer::{Layer, LayerMask};
use crate::components::weapon::RopeProfile;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileState {
    Flying,
    Stuck,
    Recalled,
}

/// What a contact means for a flying projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactKind {
    Terrain,
    Target,
}

#[derive(Component, Clone, Debug)]
pub struct Projectile {
    /// Firing actor. Weak: the owner may have been despawned.
    pub owner: Entity,
    /// Unit launch heading.
    pub direction: Vec2,
    pub elapsed: f32,
    /// Lifetime in seconds while flying.
    pub duration: f32,
    pub ready: bool,
    pub state: ProjectileState,
    pub power: f32,
    pub target: LayerMask,
    pub terrain: LayerMask,
    /// Last reel axis value received. Persists until the next reel input.
    pub reel_input: f32,
}

impl Projectile {
    pub fn launch(
        owner: Entity,
        direction: Vec2,
        duration: f32,
        target: LayerMask,
        terrain: LayerMask,
    ) -> Self {
        Self {
            owner,
            direction: direction.normalize_or_zero(),
            elapsed: 0.0,
            duration,
            ready: true,
            state: ProjectileState::Flying,
            power: 0.0,
            target,
            terrain,
            reel_input: 0.0,
        }
    }

    pub fn with_power(mut self, power: f32) -> Self {
        self.power = power;
        self
    }

    pub fn is_active(&self) -> bool {
        self.state != ProjectileState::Recalled
    }

    pub fn is_flying(&self) -> bool {
        self.state == ProjectileState::Flying
    }

    /// Accumulate flight time. Returns true when the flight has timed out.
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.ready || !self.is_flying() {
            return false;
        }
        self.elapsed += dt;
        self.elapsed > self.duration
    }

    /// Terrain wins over target when a layer is in both masks.
    pub fn classify_contact(&self, layer: Layer) -> Option<ContactKind> {
        if self.terrain.contains(layer) {
            Some(ContactKind::Terrain)
        } else if self.target.contains(layer) {
            Some(ContactKind::Target)
        } else {
            None
        }
    }

    /// Flying → Stuck.
    pub fn stick(&mut self) -> bool {
        if !self.is_flying() {
            return false;
        }
        self.state = ProjectileState::Stuck;
        true
    }

    /// Any non-terminal state → Recalled.
    pub fn mark_recalled(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.state = ProjectileState::Recalled;
        self.ready = false;
        true
    }
}

/// Maximum-distance tether between a projectile and its owner.
///
/// It never pulls: it only stops the free body from moving beyond
/// `distance`. Reeling is the only way `distance` changes and it is always
/// clamped to `[min_distance, max_distance]`.
#[derive(Component, Clone, Debug)]
pub struct RopeConstraint {
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub reel_speed: f32,
    /// Endpoints for an external line renderer: projectile, owner.
    pub line: [Vec2; 2],
}

impl RopeConstraint {
    /// New rope, fully paid out.
    pub fn from_profile(profile: &RopeProfile) -> Self {
        let min_distance = profile.min_length.min(profile.max_length);
        let max_distance = profile.max_length.max(profile.min_length);
        Self {
            distance: max_distance,
            min_distance,
            max_distance,
            reel_speed: profile.reel_speed,
            line: [Vec2::ZERO; 2],
        }
    }

    /// Shorten (positive input) or lengthen (negative input) the rope.
    pub fn reel(&mut self, input: f32, dt: f32) -> f32 {
        self.set_distance(self.distance - input * self.reel_speed * dt)
    }

    pub fn set_distance(&mut self, distance: f32) -> f32 {
        self.distance = distance.clamp(self.min_distance, self.max_distance);
        self.distance
    }

    /// Keep `free` within `distance` of `anchor`.
    ///
    /// Returns the corrected position and velocity of the free body when the
    /// rope is overstretched; the outward radial velocity is removed.
    pub fn solve(&self, anchor: Vec2, free: Vec2, free_velocity: Vec2) -> Option<(Vec2, Vec2)> {
        let offset = free - anchor;
        let separation = offset.length();
        if separation <= self.distance || separation <= f32::EPSILON {
            return None;
        }
        let dir = offset / separation;
        let position = anchor + dir * self.distance;
        let radial = free_velocity.dot(dir);
        let velocity = if radial > 0.0 {
            free_velocity - dir * radial
        } else {
            free_velocity
        };
        Some((position, velocity))
    }
}

/// An actor's registration of its single active projectile.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CurrentProjectile(pub Option<Entity>);

impl CurrentProjectile {
    pub fn get(&self) -> Option<Entity> {
        self.0
    }

    /// Register `projectile`, returning the one it replaces.
    pub fn register(&mut self, projectile: Entity) -> Option<Entity> {
        self.0.replace(projectile)
    }

    /// Clear the registration only if it still points at `projectile`.
    pub fn clear_if(&mut self, projectile: Entity) -> bool {
        if self.0 == Some(projectile) {
            self.0 = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::world::World;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn entities(n: usize) -> Vec<Entity> {
        let mut world = World::new();
        (0..n).map(|_| world.spawn_empty().id()).collect()
    }

    fn hook(owner: Entity) -> Projectile {
        Projectile::launch(owner, Vec2::new(3.0, 4.0), 1.0, LayerMask::ENEMY, LayerMask::TERRAIN)
    }

    // ==================== STATE MACHINE TESTS ====================

    #[test]
    fn test_launch_normalizes_direction() {
        let p = hook(entities(1)[0]);
        assert!(approx_eq(p.direction.x, 0.6));
        assert!(approx_eq(p.direction.y, 0.8));
        assert!(p.ready);
        assert_eq!(p.state, ProjectileState::Flying);
    }

    #[test]
    fn test_advance_times_out_after_duration() {
        let mut p = hook(entities(1)[0]);
        assert!(!p.advance(0.5));
        assert!(!p.advance(0.5)); // exactly at duration is not past it
        assert!(p.advance(0.25));
    }

    #[test]
    fn test_stuck_projectile_does_not_time_out() {
        let mut p = hook(entities(1)[0]);
        assert!(p.stick());
        assert!(!p.advance(10.0));
        assert!(!p.stick());
    }

    #[test]
    fn test_recalled_is_terminal() {
        let mut p = hook(entities(1)[0]);
        assert!(p.mark_recalled());
        assert!(!p.mark_recalled());
        assert!(!p.stick());
        assert!(!p.advance(100.0));
        assert_eq!(p.state, ProjectileState::Recalled);
    }

    #[test]
    fn test_stuck_can_be_recalled() {
        let mut p = hook(entities(1)[0]);
        p.stick();
        assert!(p.mark_recalled());
    }

    #[test]
    fn test_terrain_has_priority_over_target() {
        let mut p = hook(entities(1)[0]);
        p.target = LayerMask::TERRAIN.with(Layer::ENEMY);
        assert_eq!(p.classify_contact(Layer::GROUND), Some(ContactKind::Terrain));
        assert_eq!(p.classify_contact(Layer::ENEMY), Some(ContactKind::Target));
        assert_eq!(p.classify_contact(Layer::PLAYER), None);
    }

    // ==================== ROPE TESTS ====================

    fn rope() -> RopeConstraint {
        RopeConstraint::from_profile(&RopeProfile {
            min_length: 1.0,
            max_length: 10.0,
            reel_speed: 4.0,
        })
    }

    #[test]
    fn test_rope_starts_paid_out() {
        assert!(approx_eq(rope().distance, 10.0));
    }

    #[test]
    fn test_rope_profile_with_swapped_bounds() {
        let r = RopeConstraint::from_profile(&RopeProfile {
            min_length: 8.0,
            max_length: 2.0,
            reel_speed: 1.0,
        });
        assert!(approx_eq(r.min_distance, 2.0));
        assert!(approx_eq(r.max_distance, 8.0));
    }

    #[test]
    fn test_reel_in_and_out() {
        let mut r = rope();
        assert!(approx_eq(r.reel(1.0, 0.5), 8.0));
        assert!(approx_eq(r.reel(-0.5, 0.5), 9.0));
    }

    #[test]
    fn test_reel_clamps_exactly_to_bounds() {
        let mut r = rope();
        assert_eq!(r.reel(100.0, 1.0), 1.0);
        assert_eq!(r.reel(-100.0, 1.0), 10.0);
    }

    #[test]
    fn test_any_reel_sequence_stays_in_bounds() {
        let mut r = rope();
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..500 {
            let input = rng.f32() * 20.0 - 10.0;
            let d = r.reel(input, rng.f32() * 0.1);
            assert!((1.0..=10.0).contains(&d));
        }
    }

    #[test]
    fn test_solve_slack_rope_does_nothing() {
        let r = rope();
        assert!(r.solve(Vec2::ZERO, Vec2::new(5.0, 0.0), Vec2::X).is_none());
    }

    #[test]
    fn test_solve_taut_rope_projects_and_kills_outward_velocity() {
        let r = rope();
        let (pos, vel) = r
            .solve(Vec2::ZERO, Vec2::new(0.0, -12.0), Vec2::new(2.0, -3.0))
            .unwrap();
        assert!(approx_eq(pos.y, -10.0));
        assert!(approx_eq(pos.x, 0.0));
        assert!(approx_eq(vel.x, 2.0));
        assert!(approx_eq(vel.y, 0.0));
    }

    #[test]
    fn test_solve_keeps_inward_velocity() {
        let r = rope();
        let (_, vel) = r
            .solve(Vec2::ZERO, Vec2::new(12.0, 0.0), Vec2::new(-1.0, 0.0))
            .unwrap();
        assert!(approx_eq(vel.x, -1.0));
    }

    // ==================== REGISTRATION TESTS ====================

    #[test]
    fn test_register_replaces_previous() {
        let e = entities(2);
        let mut current = CurrentProjectile::default();
        assert_eq!(current.register(e[0]), None);
        assert_eq!(current.register(e[1]), Some(e[0]));
        assert_eq!(current.get(), Some(e[1]));
    }

    #[test]
    fn test_clear_if_ignores_stale_projectile() {
        let e = entities(2);
        let mut current = CurrentProjectile(Some(e[1]));
        assert!(!current.clear_if(e[0]));
        assert_eq!(current.get(), Some(e[1]));
        assert!(current.clear_if(e[1]));
        assert_eq!(current.get(), None);
    }
}
