use bevy_ecs::prelude::Component;

/// Visual heading in degrees, counter-clockwise from +X.
#[derive(Component, Clone, Debug, Copy, Default)]
pub struct Rotation {
    pub degrees: f32,
}
