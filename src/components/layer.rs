//! Collision classes.
//!
//! Every collider belongs to exactly one [`Layer`]. Systems that only care
//! about some classes (the ground probe, projectile contact handling, melee
//! hit tests) filter with a [`LayerMask`].
//!
//! Masks are written in config files as comma separated layer names, e.g.
//! `ground, level`.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Collision class of an entity.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Layer(pub u8);

impl Layer {
    pub const DEFAULT: Layer = Layer(0);
    pub const PLAYER: Layer = Layer(1);
    pub const ENEMY: Layer = Layer(2);
    pub const GROUND: Layer = Layer(3);
    pub const LEVEL: Layer = Layer(4);
    pub const PROJECTILE: Layer = Layer(5);

    const NAMES: [(&'static str, Layer); 6] = [
        ("default", Layer::DEFAULT),
        ("player", Layer::PLAYER),
        ("enemy", Layer::ENEMY),
        ("ground", Layer::GROUND),
        ("level", Layer::LEVEL),
        ("projectile", Layer::PROJECTILE),
    ];

    pub fn from_name(name: &str) -> Option<Layer> {
        let name = name.trim().to_ascii_lowercase();
        Self::NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, layer)| *layer)
    }

    /// Mask bit for this layer, or no bit for layers past the mask width.
    pub const fn bit(self) -> u32 {
        if self.0 < 32 { 1 << self.0 } else { 0 }
    }

    pub fn name(&self) -> Option<&'static str> {
        Self::NAMES
            .iter()
            .find(|(_, layer)| layer == self)
            .map(|(n, _)| *n)
    }
}

/// Bit set of [`Layer`]s.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const GROUND: LayerMask = LayerMask::of(Layer::GROUND);
    pub const TERRAIN: LayerMask = LayerMask::of(Layer::GROUND).with(Layer::LEVEL);
    pub const ENEMY: LayerMask = LayerMask::of(Layer::ENEMY);
    pub const PLAYER: LayerMask = LayerMask::of(Layer::PLAYER);

    pub const fn of(layer: Layer) -> Self {
        LayerMask(layer.bit())
    }

    pub const fn with(self, layer: Layer) -> Self {
        LayerMask(self.0 | layer.bit())
    }

    pub fn contains(&self, layer: Layer) -> bool {
        (self.0 & layer.bit()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Parse a comma separated list of layer names.
    pub fn parse(names: &str) -> Result<Self, String> {
        names
            .split(',')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .try_fold(LayerMask::NONE, |mask, name| {
                Layer::from_name(name)
                    .map(|layer| mask.with(layer))
                    .ok_or_else(|| format!("Unknown layer name '{}'", name))
            })
    }

    /// Format as a comma separated list of layer names.
    pub fn names(&self) -> String {
        Layer::NAMES
            .iter()
            .filter(|(_, layer)| self.contains(*layer))
            .map(|(n, _)| *n)
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_contains() {
        assert!(LayerMask::TERRAIN.contains(Layer::GROUND));
        assert!(LayerMask::TERRAIN.contains(Layer::LEVEL));
        assert!(!LayerMask::TERRAIN.contains(Layer::ENEMY));
        assert!(!LayerMask::NONE.contains(Layer::DEFAULT));
    }

    #[test]
    fn test_out_of_range_layer_never_matches() {
        assert!(!LayerMask(u32::MAX).contains(Layer(40)));
    }

    #[test]
    fn test_out_of_range_layer_adds_no_bit() {
        assert_eq!(LayerMask::of(Layer(32)), LayerMask::NONE);
        assert_eq!(LayerMask::GROUND.with(Layer(200)), LayerMask::GROUND);
        assert_eq!(LayerMask::of(Layer(31)).0, 1 << 31);
    }

    #[test]
    fn test_parse_names() {
        let mask = LayerMask::parse("Ground, level").unwrap();
        assert_eq!(mask, LayerMask::TERRAIN);
        assert_eq!(LayerMask::parse("").unwrap(), LayerMask::NONE);
    }

    #[test]
    fn test_parse_unknown_name() {
        let err = LayerMask::parse("ground,lava").unwrap_err();
        assert!(err.contains("lava"));
    }

    #[test]
    fn test_names_roundtrip_text() {
        assert_eq!(LayerMask::TERRAIN.names(), "ground,level");
        assert_eq!(Layer::ENEMY.name(), Some("enemy"));
    }
}
