//! Event and message types exchanged between systems.
//!
//! Two flavours are used. Buffered messages (`#[derive(Message)]`) carry
//! high-volume, per-tick data that a system drains with a `MessageReader`.
//! Observer events (`#[derive(Event)]`) are triggered immediately through
//! `Commands::trigger` and are meant for collaborators outside the core.
//!
//! Submodules:
//! - [`collision`] – overlap pairs emitted by the collision detector (message)
//! - [`combat`] – attack, hit and interact cues (observer events)
//! - [`input`] – the abstract per-actor input surface (message)
//! - [`projectile`] – terminal projectile notifications (observer event)
pub mod collision;
pub mod combat;
pub mod input;
pub mod projectile;
