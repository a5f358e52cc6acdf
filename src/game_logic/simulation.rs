use crate::game_logic::config::RaceConfig;
use crate::game_logic::impacts::{Impact, check_impacts};
use crate::game_logic::lap_system::{LapMilestone, LossReason, RacePhase, RaceProgress, boost_bar};
use crate::game_logic::opponent::Opponent;
use crate::game_logic::physics::{
    DriverInput, Vehicle, apply_driver_input, apply_friction, integrate, settle_velocity,
};
use crate::game_logic::track::TrackData;
use bevy::prelude::*;
use serde::Serialize;

/// Everything that changes while a race runs
#[derive(Resource, Clone, Debug)]
pub struct RaceSimulation {
    pub config: RaceConfig,
    /// Race clock, zero at the start trigger
    pub clock: f32,
    pub vehicle: Vehicle,
    pub opponents: Vec<Opponent>,
    pub progress: RaceProgress,
}

impl RaceSimulation {
    /// Cars on the grid, waiting for the start trigger
    pub fn new(config: RaceConfig, track: &TrackData) -> Self {
        Self {
            clock: 0.0,
            vehicle: Vehicle::spawn(track.player_start, track.player_forward, config.car_hitbox_radius),
            opponents: track.opponents.iter().map(Opponent::spawn).collect(),
            progress: RaceProgress::new(config.start_boost_power),
            config,
        }
    }
}

/// Fresh race state for `config`, already racing
pub fn reset_race(config: RaceConfig, track: &TrackData) -> RaceSimulation {
    let mut fresh = RaceSimulation::new(config, track);
    fresh.progress.begin();
    fresh
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RaceEvent {
    Started,
    OpponentContact(usize),
    WallContact,
    CurveContact,
    BoostFired,
    CheckpointPassed,
    Won,
    Lost(LossReason),
}

impl From<Impact> for RaceEvent {
    fn from(impact: Impact) -> Self {
        match impact {
            Impact::Opponent(index) => RaceEvent::OpponentContact(index),
            Impact::Wall => RaceEvent::WallContact,
            Impact::Curve => RaceEvent::CurveContact,
        }
    }
}

/// What the renderer and HUD need after a frame
#[derive(Clone, Debug, PartialEq)]
pub struct FrameOutput {
    pub player_transform: Mat4,
    pub opponent_transforms: Vec<Mat4>,
    pub clock: f32,
    pub boost_power: f32,
    pub boost_bar: String,
    pub status: &'static str,
    pub phase: RacePhase,
    pub events: Vec<RaceEvent>,
}

impl FrameOutput {
    pub fn capture(sim: &RaceSimulation, events: Vec<RaceEvent>) -> Self {
        Self {
            player_transform: sim.vehicle.transform,
            opponent_transforms: sim.opponents.iter().map(|o| o.transform).collect(),
            clock: sim.clock,
            boost_power: sim.progress.boost_power.clamp(0.0, 100.0),
            boost_bar: boost_bar(sim.progress.boost_power),
            status: sim.progress.phase.status_text(),
            phase: sim.progress.phase,
            events,
        }
    }
}

/// Advances the race by one frame of `dt` seconds.
///
/// Outside a race only the start trigger is read; accepting it resets the
/// whole state and the first physics step happens on the following frame.
pub fn simulate_frame(
    sim: &mut RaceSimulation,
    input: &DriverInput,
    track: &TrackData,
    dt: f32,
) -> FrameOutput {
    let mut events = Vec::new();

    if !sim.progress.phase.is_racing() {
        if input.start {
            *sim = reset_race(sim.config.clone(), track);
            info!("Race started");
            events.push(RaceEvent::Started);
        }
        return FrameOutput::capture(sim, events);
    }

    sim.clock += dt;
    let now = sim.clock;
    let config = &sim.config;

    apply_friction(&mut sim.vehicle, config.friction, dt);
    if apply_driver_input(&mut sim.vehicle, &mut sim.progress, input, config, now, dt) {
        events.push(RaceEvent::BoostFired);
    }
    settle_velocity(&mut sim.vehicle);

    let impacts = check_impacts(
        &mut sim.vehicle,
        &mut sim.progress,
        &sim.opponents,
        track,
        config,
        now,
    );
    events.extend(impacts.into_iter().map(RaceEvent::from));

    integrate(&mut sim.vehicle, dt);

    let scale = config.difficulty.divisor_scale();
    for (opponent, route) in sim.opponents.iter_mut().zip(&track.opponents) {
        opponent.follow_path(route, route.path_time(now, scale), config.opponents_loop);
    }

    if sim.progress.check_depletion() {
        events.push(RaceEvent::Lost(LossReason::Depleted));
    } else if sim.progress.check_timeout(now, config.time_limit) {
        events.push(RaceEvent::Lost(LossReason::Timeout));
    } else {
        let probe = sim.vehicle.bounding_box(config.car_half_extent);
        if let Some(milestone) = sim.progress.update_laps(&probe, &track.progress_regions) {
            events.push(match milestone {
                LapMilestone::CheckpointPassed => RaceEvent::CheckpointPassed,
                LapMilestone::Finished => RaceEvent::Won,
            });
        }
    }

    FrameOutput::capture(sim, events)
}
