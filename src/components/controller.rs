//! Intent strategies that drive actors.
//!
//! An actor does not know where its decisions come from. Its [`Controller`]
//! holds a boxed [`IntentSource`] which receives raw [`InputAction`]s as they
//! arrive and, once per frame, condenses them into a [`FrameIntent`]. The
//! intent system then applies that intent to the actor's `Motion`,
//! `Orientation` and `AttackScheduler`.
//!
//! Two strategies ship with the crate:
//! - [`PlayerInput`] – event-driven mapping of the abstract input surface
//! - [`IdleIntent`] – never does anything; used for training dummies

use bevy_ecs::prelude::Component;
use bevy_math::Vec2;

use crate::events::input::InputAction;

/// Seconds a tapped fire button stays latched.
pub const DEFAULT_TAP_RELEASE: f32 = 0.05;

/// Where the actor is aiming.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Aim {
    #[default]
    None,
    /// World-space point.
    Point(Vec2),
    /// Raw direction vector, not yet deadzoned.
    Vector(Vec2),
}

impl Aim {
    /// Raw aim vector as seen from `position`.
    pub fn raw(&self, position: Vec2) -> Vec2 {
        match *self {
            Aim::None => Vec2::ZERO,
            Aim::Point(point) => point - position,
            Aim::Vector(v) => v,
        }
    }
}

/// What a strategy may know about its actor when producing intent.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntentContext {
    pub position: Vec2,
}

/// One frame's worth of decisions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameIntent {
    pub move_axis: Vec2,
    pub aim: Aim,
    pub jump: bool,
    /// Attack latch value for this frame.
    pub attack: bool,
    pub recall: bool,
    pub reel: Option<f32>,
    pub interact: bool,
}

/// Source of per-frame intent for one actor.
pub trait IntentSource: Send + Sync + 'static {
    fn handle_input(&mut self, _action: &InputAction) {}

    fn produce(&mut self, ctx: &IntentContext, dt: f32) -> FrameIntent;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FireMode {
    /// Each press latches the attack briefly, yielding one shot.
    #[default]
    Tap,
    /// The latch follows the button; holding gives sustained fire.
    Hold,
}

/// Player mapping of the input surface.
///
/// Movement axis and aim persist until replaced. Jump, recall, reel and
/// interact are edges: they show up in exactly one produced intent.
#[derive(Clone, Debug)]
pub struct PlayerInput {
    pub fire_mode: FireMode,
    pub tap_release: f32,
    move_axis: Vec2,
    aim: Aim,
    attack: bool,
    tap_remaining: f32,
    jump: bool,
    recall: bool,
    reel: Option<f32>,
    interact: bool,
}

impl Default for PlayerInput {
    fn default() -> Self {
        Self::new(FireMode::Tap)
    }
}

impl PlayerInput {
    pub fn new(fire_mode: FireMode) -> Self {
        Self {
            fire_mode,
            tap_release: DEFAULT_TAP_RELEASE,
            move_axis: Vec2::ZERO,
            aim: Aim::None,
            attack: false,
            tap_remaining: 0.0,
            jump: false,
            recall: false,
            reel: None,
            interact: false,
        }
    }

    pub fn with_tap_release(mut self, seconds: f32) -> Self {
        self.tap_release = seconds.max(0.0);
        self
    }

    pub fn is_attacking(&self) -> bool {
        self.attack
    }
}

impl IntentSource for PlayerInput {
    fn handle_input(&mut self, action: &InputAction) {
        match *action {
            InputAction::Move(axis) => self.move_axis = axis,
            InputAction::LookAt(point) => self.aim = Aim::Point(point),
            InputAction::LookToward(v) => self.aim = Aim::Vector(v),
            InputAction::Jump => self.jump = true,
            InputAction::Fire { pressed } => match self.fire_mode {
                FireMode::Hold => self.attack = pressed,
                FireMode::Tap => {
                    if pressed {
                        self.attack = true;
                        self.tap_remaining = self.tap_release;
                    }
                }
            },
            InputAction::Recall => {
                self.recall = true;
                self.attack = false;
                self.tap_remaining = 0.0;
            }
            InputAction::Reel(axis) => self.reel = Some(axis),
            InputAction::Interact => self.interact = true,
        }
    }

    fn produce(&mut self, _ctx: &IntentContext, dt: f32) -> FrameIntent {
        let intent = FrameIntent {
            move_axis: self.move_axis,
            aim: self.aim,
            jump: std::mem::take(&mut self.jump),
            attack: self.attack,
            recall: std::mem::take(&mut self.recall),
            reel: self.reel.take(),
            interact: std::mem::take(&mut self.interact),
        };
        if self.fire_mode == FireMode::Tap && self.attack {
            self.tap_remaining -= dt;
            if self.tap_remaining <= 0.0 {
                self.attack = false;
            }
        }
        intent
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct IdleIntent;

impl IntentSource for IdleIntent {
    fn produce(&mut self, _ctx: &IntentContext, _dt: f32) -> FrameIntent {
        FrameIntent::default()
    }
}

/// Component wrapping an actor's intent strategy.
#[derive(Component)]
pub struct Controller(pub Box<dyn IntentSource>);

impl Controller {
    pub fn new(source: impl IntentSource) -> Self {
        Self(Box::new(source))
    }

    pub fn player(fire_mode: FireMode) -> Self {
        Self::new(PlayerInput::new(fire_mode))
    }

    pub fn idle() -> Self {
        Self::new(IdleIntent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn ctx() -> IntentContext {
        IntentContext::default()
    }

    #[test]
    fn test_aim_raw_point_is_relative_to_position() {
        let aim = Aim::Point(Vec2::new(5.0, 3.0));
        assert_eq!(aim.raw(Vec2::new(1.0, 1.0)), Vec2::new(4.0, 2.0));
        assert_eq!(Aim::None.raw(Vec2::ONE), Vec2::ZERO);
    }

    #[test]
    fn test_move_and_aim_persist() {
        let mut p = PlayerInput::default();
        p.handle_input(&InputAction::Move(Vec2::new(1.0, 0.0)));
        p.handle_input(&InputAction::LookToward(Vec2::Y));
        let first = p.produce(&ctx(), DT);
        let second = p.produce(&ctx(), DT);
        assert_eq!(first.move_axis, Vec2::X);
        assert_eq!(second.move_axis, Vec2::X);
        assert_eq!(second.aim, Aim::Vector(Vec2::Y));
    }

    #[test]
    fn test_edges_fire_once() {
        let mut p = PlayerInput::default();
        p.handle_input(&InputAction::Jump);
        p.handle_input(&InputAction::Interact);
        p.handle_input(&InputAction::Reel(0.5));
        let first = p.produce(&ctx(), DT);
        assert!(first.jump);
        assert!(first.interact);
        assert_eq!(first.reel, Some(0.5));
        let second = p.produce(&ctx(), DT);
        assert!(!second.jump);
        assert!(!second.interact);
        assert_eq!(second.reel, None);
    }

    #[test]
    fn test_tap_fire_releases_after_tap_window() {
        let mut p = PlayerInput::new(FireMode::Tap).with_tap_release(0.05);
        p.handle_input(&InputAction::Fire { pressed: true });
        // 0.05 s at 50 fps covers three frames
        assert!(p.produce(&ctx(), 0.02).attack);
        assert!(p.produce(&ctx(), 0.02).attack);
        assert!(p.produce(&ctx(), 0.02).attack);
        assert!(!p.produce(&ctx(), 0.02).attack);
    }

    #[test]
    fn test_tap_fire_ignores_release() {
        let mut p = PlayerInput::new(FireMode::Tap);
        p.handle_input(&InputAction::Fire { pressed: true });
        p.handle_input(&InputAction::Fire { pressed: false });
        assert!(p.produce(&ctx(), DT).attack);
    }

    #[test]
    fn test_hold_fire_follows_button() {
        let mut p = PlayerInput::new(FireMode::Hold);
        p.handle_input(&InputAction::Fire { pressed: true });
        for _ in 0..100 {
            assert!(p.produce(&ctx(), DT).attack);
        }
        p.handle_input(&InputAction::Fire { pressed: false });
        assert!(!p.produce(&ctx(), DT).attack);
    }

    #[test]
    fn test_recall_clears_attack_latch() {
        let mut p = PlayerInput::new(FireMode::Hold);
        p.handle_input(&InputAction::Fire { pressed: true });
        p.handle_input(&InputAction::Recall);
        let intent = p.produce(&ctx(), DT);
        assert!(intent.recall);
        assert!(!intent.attack);
    }

    #[test]
    fn test_idle_produces_nothing() {
        let mut idle = IdleIntent;
        idle.handle_input(&InputAction::Jump);
        assert_eq!(idle.produce(&ctx(), DT), FrameIntent::default());
    }
}
