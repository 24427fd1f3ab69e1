//! ECS components for actors, projectiles and terrain.
//!
//! Components hold data and small pure helpers; the systems in
//! [`crate::systems`] do the per-tick work.
//!
//! Submodules overview:
//! - [`attack`] – cooldown gate between "attack requested" and "attack fires"
//! - [`boxcollider`] – axis-aligned rectangular collider with overlap and ray tests
//! - [`controller`] – pluggable intent strategies (player input, idle)
//! - [`layer`] – collision classes and masks
//! - [`mapposition`] – world-space position (y-up)
//! - [`motion`] – horizontal locomotion, jump request and knockback
//! - [`orientation`] – aim deadzone, left/right facing and weapon pivot
//! - [`projectile`] – projectile state machine, rope tether and owner registration
//! - [`rigidbody`] – velocity, mass, named forces and body type
//! - [`rotation`] – rotation angle in degrees
//! - [`stats`] – move speed and jump power
//! - [`weapon`] – equipped weapon profile and melee reach test

pub mod attack;
pub mod boxcollider;
pub mod controller;
pub mod layer;
pub mod mapposition;
pub mod motion;
pub mod orientation;
pub mod projectile;
pub mod rigidbody;
pub mod rotation;
pub mod stats;
pub mod weapon;
