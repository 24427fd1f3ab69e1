//! hookline library.
//!
//! A 2D action-game actor controller on `bevy_ecs`: physics-driven movement
//! with knockback, aim and facing, cooldown-gated melee and ranged attacks,
//! and a grappling projectile tethered to its owner by a reelable rope.
//!
//! The crate is headless. Rendering, audio, cameras and device bindings are
//! left to the embedding game; it feeds [`events::input::ActorInput`]
//! messages in and observes the combat and projectile events that come out.
//!
//! - [`components`] – ECS components (motion, weapons, projectiles, physics)
//! - [`events`] – input and collision messages, combat and recall events
//! - [`resources`] – simulation clock and configuration
//! - [`scenario`] – scripted input replay
//! - [`simulation`] – world, schedules and the fixed-step driver
//! - [`systems`] – ECS systems for the frame and physics schedules

pub mod components;
pub mod events;
pub mod resources;
pub mod scenario;
pub mod simulation;
pub mod systems;
