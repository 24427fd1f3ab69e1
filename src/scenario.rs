//! Scripted input scenarios.
//!
//! A scenario is a JSON list of timed input actions replayed against one
//! actor:
//!
//! ```json
//! {
//!   "steps": [
//!     { "at": 0.0, "input": { "type": "move", "x": 1.0 } },
//!     { "at": 0.5, "input": { "type": "look_at", "x": 8.0, "y": 6.0 } },
//!     { "at": 0.6, "input": { "type": "fire", "pressed": true } },
//!     { "at": 2.0, "input": { "type": "reel", "axis": 1.0 } },
//!     { "at": 4.0, "input": { "type": "recall" } }
//!   ]
//! }
//! ```
//!
//! Steps are replayed in time order; steps sharing a time keep file order.

use bevy_math::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::events::input::InputAction;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioInput {
    Move {
        x: f32,
        #[serde(default)]
        y: f32,
    },
    LookAt {
        x: f32,
        y: f32,
    },
    LookToward {
        x: f32,
        y: f32,
    },
    Jump,
    Fire {
        #[serde(default = "pressed_default")]
        pressed: bool,
    },
    Recall,
    Reel {
        axis: f32,
    },
    Interact,
}

fn pressed_default() -> bool {
    true
}

impl From<ScenarioInput> for InputAction {
    fn from(input: ScenarioInput) -> Self {
        match input {
            ScenarioInput::Move { x, y } => InputAction::Move(Vec2::new(x, y)),
            ScenarioInput::LookAt { x, y } => InputAction::LookAt(Vec2::new(x, y)),
            ScenarioInput::LookToward { x, y } => InputAction::LookToward(Vec2::new(x, y)),
            ScenarioInput::Jump => InputAction::Jump,
            ScenarioInput::Fire { pressed } => InputAction::Fire { pressed },
            ScenarioInput::Recall => InputAction::Recall,
            ScenarioInput::Reel { axis } => InputAction::Reel(axis),
            ScenarioInput::Interact => InputAction::Interact,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ScenarioStep {
    /// Seconds since the start of the run.
    pub at: f32,
    pub input: ScenarioInput,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Scenario {
    pub steps: Vec<ScenarioStep>,
    #[serde(skip)]
    cursor: usize,
}

impl Scenario {
    pub fn new(mut steps: Vec<ScenarioStep>) -> Self {
        steps.sort_by(|a, b| a.at.total_cmp(&b.at));
        Self { steps, cursor: 0 }
    }

    pub fn from_json(text: &str) -> Result<Self, String> {
        let parsed: Scenario =
            serde_json::from_str(text).map_err(|e| format!("Invalid scenario: {}", e))?;
        Ok(Self::new(parsed.steps))
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read scenario {:?}: {}", path, e))?;
        Self::from_json(&text)
    }

    /// Built-in run: walk right, jump, grapple the ledge, reel in, recall.
    pub fn demo() -> Self {
        use ScenarioInput::*;
        let step = |at: f32, input: ScenarioInput| ScenarioStep { at, input };
        Self::new(vec![
            step(0.0, Move { x: 1.0, y: 0.0 }),
            step(0.6, Jump),
            step(1.2, Move { x: 0.0, y: 0.0 }),
            step(1.3, LookToward { x: 1.0, y: 1.0 }),
            step(1.4, Fire { pressed: true }),
            step(2.4, Reel { axis: 1.0 }),
            step(3.4, Reel { axis: 0.0 }),
            step(3.6, Recall),
            step(4.0, LookToward { x: 1.0, y: 0.0 }),
            step(4.1, Fire { pressed: true }),
            step(4.8, Interact),
        ])
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.steps.len()
    }

    /// Inputs due at or before `time` that have not been handed out yet.
    pub fn due(&mut self, time: f32) -> Vec<InputAction> {
        let start = self.cursor;
        while self.cursor < self.steps.len() && self.steps[self.cursor].at <= time {
            self.cursor += 1;
        }
        self.steps[start..self.cursor]
            .iter()
            .map(|s| s.input.into())
            .collect()
    }
}
