//! Simulation configuration resource.
//!
//! Tunables for the physics step, the controller and the default player
//! loadout, loaded from an INI file. Defaults are always valid, so a missing
//! file or a missing key never stops the simulation from starting.
//!
//! # Configuration File Format
//!
//! ```ini
//! [physics]
//! fixed_delta = 0.02
//! gravity = -9.81
//! max_substeps = 8
//!
//! [controller]
//! look_deadzone = 0.9
//! ground_probe_length = 1.1
//! knockback_control_scale = 0.2
//! tap_fire_release = 0.05
//! reel_deadzone = 0.01
//! heading_threshold = 0.1
//!
//! [player]
//! move_speed = 5
//! jump_power = 7
//!
//! [weapon]
//! kind = ranged
//! delay = 0.5
//! power = 1
//! speed = 20
//! range = 10
//! size = 1
//! knockback_power = 3
//! knockback_duration = 0.5
//! duration = 5
//! targets = enemy
//! terrain = ground,level
//!
//! [rope]
//! enabled = true
//! min_length = 1
//! max_length = 10
//! reel_speed = 4
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::components::controller::DEFAULT_TAP_RELEASE;
use crate::components::layer::LayerMask;
use crate::components::motion::{DEFAULT_GROUND_PROBE_LENGTH, DEFAULT_KNOCKBACK_CONTROL_SCALE};
use crate::components::orientation::DEFAULT_LOOK_DEADZONE;
use crate::components::stats::{DEFAULT_JUMP_POWER, DEFAULT_MOVE_SPEED, Stats};
use crate::components::weapon::{
    KnockbackProfile, RangedProfile, RopeProfile, Weapon, WeaponProfile,
};

pub const DEFAULT_FIXED_DELTA: f32 = 0.02;
pub const DEFAULT_GRAVITY: f32 = -9.81;
const DEFAULT_MAX_SUBSTEPS: u32 = 8;
const DEFAULT_REEL_DEADZONE: f32 = 0.01;
const DEFAULT_HEADING_THRESHOLD: f32 = 0.1;
const DEFAULT_CONFIG_PATH: &str = "./hookline.ini";

/// Which weapon the default loadout carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadoutKind {
    Melee,
    Ranged,
}

#[derive(Resource, Debug, Clone)]
pub struct SimConfig {
    /// Physics step in seconds.
    pub fixed_delta: f32,
    /// Vertical gravity acceleration applied to dynamic actors.
    pub gravity: f32,
    /// Cap on physics steps per frame.
    pub max_substeps: u32,
    pub look_deadzone: f32,
    pub ground_probe_length: f32,
    pub knockback_control_scale: f32,
    pub tap_fire_release: f32,
    /// Reel inputs at or below this magnitude are ignored.
    pub reel_deadzone: f32,
    /// Squared speed above which a projectile's heading follows its velocity.
    pub heading_threshold: f32,
    pub stats: Stats,
    pub loadout: LoadoutKind,
    pub weapon: WeaponProfile,
    pub ranged: RangedProfile,
    pub config_path: PathBuf,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SimConfig {
    pub fn new() -> Self {
        Self {
            fixed_delta: DEFAULT_FIXED_DELTA,
            gravity: DEFAULT_GRAVITY,
            max_substeps: DEFAULT_MAX_SUBSTEPS,
            look_deadzone: DEFAULT_LOOK_DEADZONE,
            ground_probe_length: DEFAULT_GROUND_PROBE_LENGTH,
            knockback_control_scale: DEFAULT_KNOCKBACK_CONTROL_SCALE,
            tap_fire_release: DEFAULT_TAP_RELEASE,
            reel_deadzone: DEFAULT_REEL_DEADZONE,
            heading_threshold: DEFAULT_HEADING_THRESHOLD,
            stats: Stats::new(DEFAULT_MOVE_SPEED, DEFAULT_JUMP_POWER),
            loadout: LoadoutKind::Ranged,
            weapon: WeaponProfile::default(),
            ranged: RangedProfile::default(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// The weapon the default loadout equips.
    pub fn loadout_weapon(&self) -> Weapon {
        match self.loadout {
            LoadoutKind::Melee => Weapon::melee(self.weapon),
            LoadoutKind::Ranged => Weapon::ranged(self.weapon, self.ranged),
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values. Returns an error if the
    /// file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);
        info!(
            "Loaded config from {:?}: fixed_delta={}, gravity={}, weapon={:?}, rope={}",
            self.config_path,
            self.fixed_delta,
            self.gravity,
            self.loadout,
            self.ranged.rope.is_some()
        );
        Ok(())
    }

    /// Same as [`SimConfig::load_from_file`] but from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [physics]
        if let Some(v) = positive(config, "physics", "fixed_delta") {
            self.fixed_delta = v;
        }
        if let Some(v) = float(config, "physics", "gravity") {
            self.gravity = v;
        }
        if let Some(v) = config.getuint("physics", "max_substeps").ok().flatten() {
            self.max_substeps = u32::try_from(v).unwrap_or(u32::MAX).max(1);
        }

        // [controller]
        if let Some(v) = non_negative(config, "controller", "look_deadzone") {
            self.look_deadzone = v;
        }
        if let Some(v) = positive(config, "controller", "ground_probe_length") {
            self.ground_probe_length = v;
        }
        if let Some(v) = float(config, "controller", "knockback_control_scale") {
            self.knockback_control_scale = v.clamp(0.0, 1.0);
        }
        if let Some(v) = non_negative(config, "controller", "tap_fire_release") {
            self.tap_fire_release = v;
        }
        if let Some(v) = non_negative(config, "controller", "reel_deadzone") {
            self.reel_deadzone = v;
        }
        if let Some(v) = non_negative(config, "controller", "heading_threshold") {
            self.heading_threshold = v;
        }

        // [player]
        if let Some(v) = non_negative(config, "player", "move_speed") {
            self.stats.move_speed = v;
        }
        if let Some(v) = non_negative(config, "player", "jump_power") {
            self.stats.jump_power = v;
        }

        // [weapon]
        if let Some(kind) = config.get("weapon", "kind") {
            match kind.trim().to_ascii_lowercase().as_str() {
                "melee" => self.loadout = LoadoutKind::Melee,
                "ranged" => self.loadout = LoadoutKind::Ranged,
                other => warn!("Unknown weapon kind '{}', keeping {:?}", other, self.loadout),
            }
        }
        if let Some(v) = non_negative(config, "weapon", "delay") {
            self.weapon.delay = v;
        }
        if let Some(v) = float(config, "weapon", "power") {
            self.weapon.power = v;
        }
        if let Some(v) = non_negative(config, "weapon", "speed") {
            self.weapon.speed = v;
        }
        if let Some(v) = non_negative(config, "weapon", "range") {
            self.weapon.attack_range = v;
        }
        if let Some(v) = non_negative(config, "weapon", "size") {
            self.weapon.weapon_size = v;
        }
        if let Some(v) = positive(config, "weapon", "duration") {
            self.weapon.projectile_duration = v;
        }
        let kb_power = float(config, "weapon", "knockback_power");
        let kb_duration = non_negative(config, "weapon", "knockback_duration");
        if kb_power.is_some() || kb_duration.is_some() {
            let mut knockback = self.weapon.knockback.unwrap_or_default();
            if let Some(p) = kb_power {
                knockback.power = p;
            }
            if let Some(d) = kb_duration {
                knockback.duration = d;
            }
            self.weapon.knockback = (knockback.duration > 0.0).then_some(knockback);
        }
        if let Some(mask) = mask(config, "weapon", "targets") {
            self.weapon.target = mask;
        }
        if let Some(mask) = mask(config, "weapon", "terrain") {
            self.ranged.terrain = mask;
        }

        // [rope]
        let mut rope = self.ranged.rope.unwrap_or_default();
        if let Some(v) = non_negative(config, "rope", "min_length") {
            rope.min_length = v;
        }
        if let Some(v) = non_negative(config, "rope", "max_length") {
            rope.max_length = v;
        }
        if let Some(v) = non_negative(config, "rope", "reel_speed") {
            rope.reel_speed = v;
        }
        if rope.min_length > rope.max_length {
            warn!(
                "Rope min_length {} exceeds max_length {}, swapping",
                rope.min_length, rope.max_length
            );
            std::mem::swap(&mut rope.min_length, &mut rope.max_length);
        }
        let enabled = config
            .getbool("rope", "enabled")
            .ok()
            .flatten()
            .unwrap_or(self.ranged.rope.is_some());
        self.ranged.rope = enabled.then_some(rope);
    }

    /// Save configuration to the INI file.
    pub fn save_to_file(&self) -> Result<(), String> {
        let config = self.to_ini();
        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;
        info!("Saved config to {:?}", self.config_path);
        Ok(())
    }

    fn to_ini(&self) -> Ini {
        let mut config = Ini::new();
        let mut set = |section: &str, key: &str, value: String| {
            config.set(section, key, Some(value));
        };

        set("physics", "fixed_delta", self.fixed_delta.to_string());
        set("physics", "gravity", self.gravity.to_string());
        set("physics", "max_substeps", self.max_substeps.to_string());

        set("controller", "look_deadzone", self.look_deadzone.to_string());
        set("controller", "ground_probe_length", self.ground_probe_length.to_string());
        set("controller", "knockback_control_scale", self.knockback_control_scale.to_string());
        set("controller", "tap_fire_release", self.tap_fire_release.to_string());
        set("controller", "reel_deadzone", self.reel_deadzone.to_string());
        set("controller", "heading_threshold", self.heading_threshold.to_string());

        set("player", "move_speed", self.stats.move_speed.to_string());
        set("player", "jump_power", self.stats.jump_power.to_string());

        let kind = match self.loadout {
            LoadoutKind::Melee => "melee",
            LoadoutKind::Ranged => "ranged",
        };
        set("weapon", "kind", kind.to_string());
        set("weapon", "delay", self.weapon.delay.to_string());
        set("weapon", "power", self.weapon.power.to_string());
        set("weapon", "speed", self.weapon.speed.to_string());
        set("weapon", "range", self.weapon.attack_range.to_string());
        set("weapon", "size", self.weapon.weapon_size.to_string());
        let knockback = self.weapon.knockback.unwrap_or(KnockbackProfile {
            power: 0.0,
            duration: 0.0,
        });
        set("weapon", "knockback_power", knockback.power.to_string());
        set("weapon", "knockback_duration", knockback.duration.to_string());
        set("weapon", "duration", self.weapon.projectile_duration.to_string());
        set("weapon", "targets", self.weapon.target.names());
        set("weapon", "terrain", self.ranged.terrain.names());

        let rope = self.ranged.rope.unwrap_or_else(RopeProfile::default);
        set("rope", "enabled", self.ranged.rope.is_some().to_string());
        set("rope", "min_length", rope.min_length.to_string());
        set("rope", "max_length", rope.max_length.to_string());
        set("rope", "reel_speed", rope.reel_speed.to_string());

        config
    }
}

fn float(config: &Ini, section: &str, key: &str) -> Option<f32> {
    match config.getfloat(section, key) {
        Ok(v) => v.map(|v| v as f32),
        Err(e) => {
            warn!("Ignoring [{}] {}: {}", section, key, e);
            None
        }
    }
}

fn non_negative(config: &Ini, section: &str, key: &str) -> Option<f32> {
    let v = float(config, section, key)?;
    if v < 0.0 {
        warn!("Ignoring negative [{}] {} = {}", section, key, v);
        return None;
    }
    Some(v)
}

fn positive(config: &Ini, section: &str, key: &str) -> Option<f32> {
    let v = float(config, section, key)?;
    if v <= 0.0 {
        warn!("Ignoring non-positive [{}] {} = {}", section, key, v);
        return None;
    }
    Some(v)
}

fn mask(config: &Ini, section: &str, key: &str) -> Option<LayerMask> {
    let names = config.get(section, key)?;
    match LayerMask::parse(&names) {
        Ok(mask) => Some(mask),
        Err(e) => {
            warn!("Ignoring [{}] {}: {}", section, key, e);
            None
        }
    }
}
