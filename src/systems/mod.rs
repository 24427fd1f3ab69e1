//! Simulation systems.
//!
//! Systems are grouped into two schedules, built by
//! [`crate::simulation::Simulation`]:
//!
//! Frame (variable rate, chained):
//! [`intent`] → [`orientation`] → [`jump`] → [`attack`] →
//! [`projectile::projectile_update_system`] → [`rope::rope_line_system`]
//!
//! Physics (fixed rate, chained):
//! [`motion::motion_system`] → [`motion::knockback_decay_system`] →
//! [`movement`] → [`terrain`] → [`rope::rope_constraint_system`] →
//! [`collision`] → [`projectile::projectile_contact_system`]
//!
//! Submodules overview
//! - [`attack`] – attack cooldown ticking, melee hits and projectile spawning
//! - [`collision`] – pairwise overlap checks and message emission
//! - [`intent`] – route input to controllers and apply their intent
//! - [`jump`] – ground probe and edge-triggered jump impulse
//! - [`motion`] – horizontal velocity and knockback decay
//! - [`movement`] – integrate forces and velocities into positions
//! - [`orientation`] – facing and weapon pivot from the look direction
//! - [`projectile`] – flight timeout, contacts and the recall path
//! - [`rope`] – rope constraint solving and line endpoints
//! - [`terrain`] – push actors out of solid static colliders
//! - [`time`] – update simulation time and delta

pub mod attack;
pub mod collision;
pub mod intent;
pub mod jump;
pub mod motion;
pub mod movement;
pub mod orientation;
pub mod projectile;
pub mod rope;
pub mod terrain;
pub mod time;
