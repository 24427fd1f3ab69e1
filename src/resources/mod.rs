//! ECS resources shared by systems.
//!
//! Overview
//! - `simconfig` – tunables loaded from an INI file
//! - `worldtime` – simulation clock, frame delta and physics step
pub mod simconfig;
pub mod worldtime;
