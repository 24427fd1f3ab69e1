use bevy_ecs::prelude::Resource;

use crate::resources::simconfig::DEFAULT_FIXED_DELTA;

/// Simulation clock.
///
/// `delta` is the scaled duration of the current frame pass; `fixed_delta`
/// is the scaled duration of one physics step. Physics systems only ever
/// read `fixed_delta`.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub fixed_delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            fixed_delta: DEFAULT_FIXED_DELTA,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_fixed_delta(mut self, fixed_delta: f32) -> Self {
        self.fixed_delta = fixed_delta;
        self
    }

    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }
}
