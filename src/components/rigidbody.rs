//! Kinematic body component with multiple named acceleration forces.
//!
//! The [`RigidBody`] component stores velocity, mass and a set of named
//! acceleration forces for an entity. Each force can be individually
//! enabled/disabled, so gravity can be attached to actors and left off
//! projectiles.
//!
//! The [`BodyType`] decides how the integration step treats the body:
//! dynamic and kinematic bodies move, static bodies never do (terrain, or a
//! projectile stuck in a wall). The `frozen` flag temporarily disables all
//! movement calculations without changing the body type.

use bevy_ecs::prelude::Component;
use bevy_math::Vec2;
use rustc_hash::FxHashMap;

/// A named acceleration force that can be toggled on/off.
#[derive(Clone, Copy, Debug)]
pub struct AccelerationForce {
    /// The acceleration vector in world units per second squared.
    pub value: Vec2,
    /// Whether this force is currently active.
    pub enabled: bool,
}

impl AccelerationForce {
    /// Create a new enabled acceleration force.
    pub fn new(value: Vec2) -> Self {
        Self {
            value,
            enabled: true,
        }
    }
}

/// How the physics step treats a body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BodyType {
    /// Moved by velocity and forces, pushed out of solid terrain.
    #[default]
    Dynamic,
    /// Moved by velocity and forces, never pushed by terrain.
    Kinematic,
    /// Immovable.
    Static,
}

/// Body storing velocity, mass and named acceleration forces.
///
/// # Fields
/// - `velocity` - Current velocity in world units per second
/// - `mass` - Mass used to convert impulses into velocity changes
/// - `forces` - Named acceleration forces that can be individually toggled
/// - `body_type` - Dynamic, kinematic or static
/// - `frozen` - When true, the integration step skips this entity
///
/// # Example
/// ```ignore
/// let mut rb = RigidBody::new();
/// rb.add_force("gravity", Vec2::new(0.0, -9.81));
/// rb.apply_impulse(Vec2::new(0.0, 7.0)); // jump
/// ```
#[derive(Component, Clone, Debug)]
pub struct RigidBody {
    /// Current velocity in world units per second.
    pub velocity: Vec2,
    /// Mass in arbitrary units. Always positive.
    pub mass: f32,
    /// Named acceleration forces. The total acceleration is the sum of all enabled forces.
    pub forces: FxHashMap<String, AccelerationForce>,
    pub body_type: BodyType,
    /// When true, the integration step skips all calculations for this entity.
    pub frozen: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a dynamic RigidBody with unit mass, zero velocity and no forces.
    pub fn new() -> Self {
        Self {
            velocity: Vec2::ZERO,
            mass: 1.0,
            forces: FxHashMap::default(),
            body_type: BodyType::Dynamic,
            frozen: false,
        }
    }

    /// Create a kinematic body travelling at `velocity`.
    pub fn kinematic(velocity: Vec2) -> Self {
        Self {
            velocity,
            body_type: BodyType::Kinematic,
            ..Self::new()
        }
    }

    /// Create an immovable body.
    pub fn fixed() -> Self {
        Self {
            body_type: BodyType::Static,
            ..Self::new()
        }
    }

    /// Add or update a named acceleration force (enabled by default).
    pub fn add_force(&mut self, name: &str, value: Vec2) {
        self.forces
            .insert(name.to_string(), AccelerationForce::new(value));
    }

    /// Builder form of [`RigidBody::add_force`].
    pub fn with_force(mut self, name: &str, value: Vec2) -> Self {
        self.add_force(name, value);
        self
    }

    /// Remove a named force entirely.
    pub fn remove_force(&mut self, name: &str) {
        self.forces.remove(name);
    }

    /// Enable or disable a specific force by name.
    /// Returns false if the force doesn't exist.
    pub fn set_force_enabled(&mut self, name: &str, enabled: bool) -> bool {
        if let Some(force) = self.forces.get_mut(name) {
            force.enabled = enabled;
            true
        } else {
            false
        }
    }

    /// Check if a force exists and is enabled.
    pub fn is_force_enabled(&self, name: &str) -> bool {
        self.forces.get(name).map(|f| f.enabled).unwrap_or(false)
    }

    /// Calculate the total acceleration from all enabled forces.
    pub fn total_acceleration(&self) -> Vec2 {
        self.forces
            .values()
            .filter(|force| force.enabled)
            .fold(Vec2::ZERO, |total, force| total + force.value)
    }

    /// Apply an instantaneous impulse. Static bodies ignore impulses.
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        if self.body_type == BodyType::Static {
            return;
        }
        self.velocity += impulse / self.mass.max(f32::EPSILON);
    }

    /// Stop the body and make it immovable.
    pub fn make_static(&mut self) {
        self.velocity = Vec2::ZERO;
        self.body_type = BodyType::Static;
    }

    /// Whether the integration step should move this body.
    pub fn is_simulated(&self) -> bool {
        !self.frozen && self.body_type != BodyType::Static
    }

    /// Freeze the rigid body, preventing the integration step from updating it.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Unfreeze the rigid body.
    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }
}
