//! Attack cooldown gating.
//!
//! [`AttackScheduler`] separates "the attack is requested" (the latch) from
//! "the attack fires". It is a metronome: while the latch is held attacks
//! fire exactly every `delay` seconds, and missed attacks are never queued.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug)]
pub struct AttackScheduler {
    /// Seconds since the last fire, saturating at the weapon delay.
    /// Starts saturated so the first attack is immediate.
    pub time_since_last_attack: f32,
    /// Attack intent, written by the intent source every frame.
    pub is_attacking: bool,
}

impl Default for AttackScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl AttackScheduler {
    pub fn new() -> Self {
        Self {
            time_since_last_attack: f32::INFINITY,
            is_attacking: false,
        }
    }

    pub fn is_ready(&self, delay: f32) -> bool {
        self.time_since_last_attack >= delay
    }

    /// Advance the cooldown by `dt` and report whether an attack fires now.
    pub fn tick(&mut self, dt: f32, delay: f32) -> bool {
        if self.time_since_last_attack < delay {
            self.time_since_last_attack = (self.time_since_last_attack + dt).min(delay);
        }
        if self.is_attacking && self.is_ready(delay) {
            self.time_since_last_attack = 0.0;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fires_over(scheduler: &mut AttackScheduler, ticks: usize, dt: f32, delay: f32) -> usize {
        (0..ticks).filter(|_| scheduler.tick(dt, delay)).count()
    }

    #[test]
    fn test_first_attack_is_immediate() {
        let mut s = AttackScheduler::new();
        s.is_attacking = true;
        assert!(s.tick(0.016, 1.0));
        assert_eq!(s.time_since_last_attack, 0.0);
    }

    #[test]
    fn test_no_fire_without_latch() {
        let mut s = AttackScheduler::new();
        assert_eq!(fires_over(&mut s, 100, 0.1, 0.5), 0);
        assert!(s.is_ready(0.5));
    }

    #[test]
    fn test_held_latch_is_a_metronome() {
        let mut s = AttackScheduler::new();
        s.is_attacking = true;
        // Ticks at t = 0, 0.125, ..., 2.0 (17 ticks) with delay 0.5:
        // fires at 0, 0.5, 1.0, 1.5, 2.0 = floor(2.0 / 0.5) + 1.
        assert_eq!(fires_over(&mut s, 17, 0.125, 0.5), 5);
    }

    #[test]
    fn test_timer_saturates_at_delay() {
        let mut s = AttackScheduler::new();
        s.is_attacking = true;
        s.tick(0.1, 0.3);
        s.is_attacking = false;
        for _ in 0..1000 {
            s.tick(0.1, 0.3);
        }
        assert_eq!(s.time_since_last_attack, 0.3);
    }

    #[test]
    fn test_zero_delay_fires_every_tick() {
        let mut s = AttackScheduler::new();
        s.is_attacking = true;
        assert_eq!(fires_over(&mut s, 10, 0.016, 0.0), 10);
    }

    #[test]
    fn test_tapping_faster_than_delay_is_gated() {
        let mut s = AttackScheduler::new();
        let mut fired = 0;
        for tick in 0..40 {
            // Latch toggles every tick, the delay still bounds the rate.
            s.is_attacking = tick % 2 == 0;
            if s.tick(0.0625, 0.5) {
                fired += 1;
            }
        }
        // Ready every 8 ticks, always on a latched tick: 0, 8, 16, 24, 32.
        assert_eq!(fired, 5);
    }
}
