use crate::game_logic::constants::*;
use crate::game_logic::difficulty::CpuDifficulty;
use crate::game_logic::error::{LoadError, read_json};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable race rules. Any field missing from a config file keeps its default.
#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    pub max_velocity: f32,
    pub friction: f32,
    pub time_limit: f32,
    pub car_hitbox_radius: f32,
    pub car_half_extent: f32,
    pub start_boost_power: f32,
    pub boost_cost: f32,
    pub boost_cooldown: f32,
    pub collision_penalty: f32,
    pub stun_duration: f32,
    pub curve_stun_duration: f32,
    pub curve_sample_step: f32,
    pub difficulty: CpuDifficulty,
    /// Restart opponent paths instead of parking them at the end
    pub opponents_loop: bool,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            max_velocity: MAX_VELOCITY,
            friction: FRICTION,
            time_limit: RACE_TIME_LIMIT,
            car_hitbox_radius: CAR_HITBOX_RADIUS,
            car_half_extent: CAR_HALF_EXTENT,
            start_boost_power: START_BOOST_POWER,
            boost_cost: BOOST_COST,
            boost_cooldown: BOOST_COOLDOWN,
            collision_penalty: COLLISION_PENALTY,
            stun_duration: STUN_DURATION,
            curve_stun_duration: CURVE_STUN_DURATION,
            curve_sample_step: CURVE_SAMPLE_STEP,
            difficulty: CpuDifficulty::default(),
            opponents_loop: false,
        }
    }
}

impl RaceConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let config: RaceConfig = read_json(path.as_ref())?;
        info!(
            "Loaded race config from {} (difficulty {})",
            path.as_ref().display(),
            config.difficulty.as_str()
        );
        Ok(config)
    }

    /// Settings override shared by every binary. A missing file means the
    /// defaults; a broken one is reported and ignored.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(LoadError::Io { .. }) => Self::default(),
            Err(e) => {
                warn!("{e}; using default race settings");
                Self::default()
            }
        }
    }
}
