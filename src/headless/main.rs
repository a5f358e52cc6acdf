// Headless replay: drives a race from a recorded input script at a fixed
// timestep and prints a JSON summary when the race is decided.

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bezier_racers::game_logic::{
    DriverInput, FIXED_TIMESTEP, RaceConfig, RaceEvent, RacePhase, RaceSimulation, TrackData,
    load_track_from_file,
};
use bezier_racers::input::InputScript;
use bezier_racers::race_plugin::{FrameStep, LatestFrame, RacePlugin, advance_race_system};
use serde::Serialize;
use std::time::Duration;

const DEFAULT_SCRIPT: &str = "assets/demo_inputs.json";
const TRACK_PATH: &str = "assets/track.json";
const CONFIG_PATH: &str = "assets/race_config.json";
// give up on scripts that never start a race
const IDLE_LIMIT: f32 = 5.0;

/// Time since launch on the replay's own clock
#[derive(Resource, Default)]
struct ReplayClock {
    elapsed: f32,
    frames: u64,
}

#[derive(Serialize, Clone, Copy)]
struct TimedEvent {
    time: f32,
    event: RaceEvent,
}

#[derive(Resource, Default)]
struct ReplayLog {
    events: Vec<TimedEvent>,
    started: bool,
    reported: bool,
}

#[derive(Serialize)]
struct RaceSummary {
    phase: RacePhase,
    status: &'static str,
    race_time: f32,
    frames: u64,
    boost_power: f32,
    final_position: [f32; 3],
    events: Vec<TimedEvent>,
}

fn main() {
    let script_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SCRIPT.to_string());
    let script = match InputScript::load_from_file(&script_path) {
        Ok(script) => script,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let track = load_track_from_file(TRACK_PATH).unwrap_or_else(|e| {
        eprintln!("{e}; using the built-in circuit");
        TrackData::default()
    });
    let config = RaceConfig::load_or_default(CONFIG_PATH);

    println!(
        "Replaying {} ({} spans, {:.1}s of input)",
        script_path,
        script.spans.len(),
        script.end()
    );

    // replay as fast as possible, the race clock is fixed-step anyway
    App::new()
        .add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::ZERO)))
        .add_plugins(LogPlugin::default())
        .add_plugins(RacePlugin {
            track,
            config,
            step: FrameStep::Fixed(FIXED_TIMESTEP),
        })
        .insert_resource(script)
        .init_resource::<ReplayClock>()
        .init_resource::<ReplayLog>()
        .add_systems(Update, feed_script_input.before(advance_race_system))
        .add_systems(Update, record_and_finish.after(advance_race_system))
        .run();
}

fn feed_script_input(
    script: Res<InputScript>,
    mut clock: ResMut<ReplayClock>,
    mut input: ResMut<DriverInput>,
) {
    *input = script.input_at(clock.elapsed);
    clock.elapsed += FIXED_TIMESTEP;
    clock.frames += 1;
}

fn record_and_finish(
    latest: Res<LatestFrame>,
    sim: Res<RaceSimulation>,
    clock: Res<ReplayClock>,
    mut log: ResMut<ReplayLog>,
    mut exit: EventWriter<AppExit>,
) {
    if log.reported {
        return;
    }

    let frame = &latest.0;
    for event in &frame.events {
        if *event == RaceEvent::Started {
            log.started = true;
        }
        log.events.push(TimedEvent {
            time: frame.clock,
            event: *event,
        });
    }

    let decided = log.started && !frame.phase.is_racing();
    let never_started = !log.started && clock.elapsed > IDLE_LIMIT;
    if !decided && !never_started {
        return;
    }

    let position = sim.vehicle.position;
    let summary = RaceSummary {
        phase: frame.phase,
        status: frame.status,
        race_time: frame.clock,
        frames: clock.frames,
        boost_power: frame.boost_power,
        final_position: [position.x, position.y, position.z],
        events: std::mem::take(&mut log.events),
    };
    log.reported = true;

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => error!("Failed to encode race summary: {e}"),
    }
    exit.write(AppExit::Success);
}
