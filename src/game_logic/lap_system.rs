use crate::game_logic::collisions::{Aabb, RegionKind, TrackRegion, first_overlap};
use crate::game_logic::constants::BOOST_FLOOR;
use bevy::prelude::*;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LossReason {
    Timeout,
    /// Boost power drained to zero by collisions
    Depleted,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RacePhase {
    #[default]
    NotStarted,
    Racing,
    Won,
    Lost(LossReason),
}

impl RacePhase {
    pub fn is_racing(&self) -> bool {
        matches!(self, RacePhase::Racing)
    }

    /// HUD line for the phase; empty while racing
    pub fn status_text(&self) -> &'static str {
        match self {
            RacePhase::NotStarted => "Press Enter to Start",
            RacePhase::Racing => "",
            RacePhase::Won => "You Win, Press Enter to Restart",
            RacePhase::Lost(_) => "You Lost, Press Enter to Restart",
        }
    }
}

/// A step forward in the lap
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LapMilestone {
    CheckpointPassed,
    Finished,
}

/// Race progress and the timers gating boost and collision penalties.
/// All times are on the race clock, which restarts at zero with each race.
#[derive(Clone, Debug, PartialEq)]
pub struct RaceProgress {
    pub phase: RacePhase,
    pub checkpoint_passed: bool,
    pub boost_power: f32,
    pub boost_ready_at: f32,
    pub stun_until: f32,
}

impl RaceProgress {
    pub fn new(boost_power: f32) -> Self {
        Self {
            phase: RacePhase::NotStarted,
            checkpoint_passed: false,
            boost_power,
            boost_ready_at: 0.0,
            stun_until: 0.0,
        }
    }

    pub fn begin(&mut self) {
        self.phase = RacePhase::Racing;
    }

    pub fn is_stunned(&self, now: f32) -> bool {
        now < self.stun_until
    }

    pub fn boost_ready(&self, now: f32) -> bool {
        now >= self.boost_ready_at
    }

    pub fn stun(&mut self, now: f32, duration: f32) {
        self.stun_until = now + duration;
    }

    /// Collision penalty; may drive the power to or below zero
    pub fn penalize(&mut self, amount: f32) {
        self.boost_power -= amount;
    }

    /// Boost spending never empties the tank on its own
    pub fn spend_boost(&mut self, cost: f32) {
        self.boost_power = (self.boost_power - cost).max(BOOST_FLOOR);
    }

    fn lose(&mut self, reason: LossReason) {
        self.phase = RacePhase::Lost(reason);
        info!("Race lost: {:?}", reason);
    }

    pub fn check_depletion(&mut self) -> bool {
        if self.phase.is_racing() && self.boost_power <= 0.0 {
            self.lose(LossReason::Depleted);
            return true;
        }
        false
    }

    pub fn check_timeout(&mut self, clock: f32, time_limit: f32) -> bool {
        if self.phase.is_racing() && clock >= time_limit {
            self.lose(LossReason::Timeout);
            return true;
        }
        false
    }

    /// Tests the car's box against the checkpoint and finish regions; the
    /// first region it overlaps decides. The finish line only counts once the
    /// checkpoint has been passed.
    pub fn update_laps(&mut self, probe: &Aabb, regions: &[TrackRegion]) -> Option<LapMilestone> {
        if !self.phase.is_racing() {
            return None;
        }

        match first_overlap(probe, regions)?.kind {
            RegionKind::Checkpoint if !self.checkpoint_passed => {
                self.checkpoint_passed = true;
                info!("Reached checkpoint");
                Some(LapMilestone::CheckpointPassed)
            }
            RegionKind::Finish if self.checkpoint_passed => {
                self.phase = RacePhase::Won;
                info!("Car finished the lap!");
                Some(LapMilestone::Finished)
            }
            _ => None,
        }
    }
}

/// Ten-slot text gauge of the remaining boost power
pub fn boost_bar(power: f32) -> String {
    let filled = (power / 10.0).ceil().clamp(0.0, 10.0) as usize;
    format!("Boost Power[{}{}]", "*".repeat(filled), "-".repeat(10 - filled))
}
