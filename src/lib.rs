pub mod camera;
pub mod game_logic;
pub mod hud;
pub mod input;
pub mod race_plugin;

pub use race_plugin::{FrameStep, LatestFrame, RacePlugin};
