use crate::game_logic::error::read_json;
use crate::game_logic::{DriverInput, LoadError, RaceSimulation};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

// keyboard (and mouse buttons for drifting) -> DriverInput
pub fn read_driver_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut input: ResMut<DriverInput>,
) {
    *input = DriverInput {
        throttle: keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp),
        reverse: keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown),
        turn_left: keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft),
        turn_right: keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight),
        drift_left: keys.pressed(KeyCode::KeyQ) || mouse.pressed(MouseButton::Left),
        drift_right: keys.pressed(KeyCode::KeyE) || mouse.pressed(MouseButton::Right),
        boost: keys.pressed(KeyCode::Space),
        start: keys.just_pressed(KeyCode::Enter),
    };
}

/// Tab / Shift+Tab change the AI difficulty between races
pub fn cycle_difficulty(keys: Res<ButtonInput<KeyCode>>, mut sim: ResMut<RaceSimulation>) {
    if sim.progress.phase.is_racing() || !keys.just_pressed(KeyCode::Tab) {
        return;
    }

    let shift = keys.pressed(KeyCode::ShiftLeft) || keys.pressed(KeyCode::ShiftRight);
    let current = sim.config.difficulty;
    sim.config.difficulty = if shift { current.prev() } else { current.next() };
    info!("CPU difficulty set to {}", sim.config.difficulty.as_str());
}

/// Controls held over a window of time `[from, until)`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputSpan {
    pub from: f32,
    pub until: f32,
    pub input: DriverInput,
}

/// Recorded driving for replays without a keyboard
#[derive(Resource, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputScript {
    pub spans: Vec<InputSpan>,
}

impl InputScript {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        read_json(path.as_ref())
    }

    /// Every control held by a span covering `time`
    pub fn input_at(&self, time: f32) -> DriverInput {
        self.spans
            .iter()
            .filter(|span| span.from <= time && time < span.until)
            .fold(DriverInput::default(), |held, span| held.union(span.input))
    }

    /// Time after which no span holds anything
    pub fn end(&self) -> f32 {
        self.spans.iter().map(|span| span.until).fold(0.0, f32::max)
    }
}
