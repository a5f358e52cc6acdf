// src/game_logic/difficulty.rs
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// How fast the AI cars lap the course
#[derive(
    Resource, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CpuDifficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl CpuDifficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            CpuDifficulty::Easy => "Easy",
            CpuDifficulty::Medium => "Medium",
            CpuDifficulty::Hard => "Hard",
        }
    }

    pub fn next(self) -> Self {
        match self {
            CpuDifficulty::Easy => CpuDifficulty::Medium,
            CpuDifficulty::Medium => CpuDifficulty::Hard,
            CpuDifficulty::Hard => CpuDifficulty::Easy,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            CpuDifficulty::Easy => CpuDifficulty::Hard,
            CpuDifficulty::Medium => CpuDifficulty::Easy,
            CpuDifficulty::Hard => CpuDifficulty::Medium,
        }
    }

    /// Multiplier on every opponent's speed divisor; larger means slower laps
    pub fn divisor_scale(&self) -> f32 {
        match self {
            CpuDifficulty::Easy => 1.25,
            CpuDifficulty::Medium => 1.0,
            CpuDifficulty::Hard => 0.8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_round_trips() {
        for difficulty in [CpuDifficulty::Easy, CpuDifficulty::Medium, CpuDifficulty::Hard] {
            assert_eq!(difficulty.next().prev(), difficulty);
            assert_eq!(difficulty.next().next().next(), difficulty);
        }
    }

    #[test]
    fn test_harder_means_faster_opponents() {
        assert!(CpuDifficulty::Hard.divisor_scale() < CpuDifficulty::Medium.divisor_scale());
        assert!(CpuDifficulty::Medium.divisor_scale() < CpuDifficulty::Easy.divisor_scale());
    }
}
