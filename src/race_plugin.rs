use crate::game_logic::{
    DriverInput, FrameOutput, OpponentCar, PlayerCar, RaceConfig, RaceSimulation, TrackData,
    simulate_frame,
};
use bevy::prelude::*;

/// How much race time one `Update` tick covers
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub enum FrameStep {
    /// Use the frame's real elapsed time
    RealTime,
    Fixed(f32),
}

/// Output of the most recent simulation frame
#[derive(Resource, Clone, Debug)]
pub struct LatestFrame(pub FrameOutput);

/// Runs the race simulation once per `Update`, fed by the `DriverInput` resource
pub struct RacePlugin {
    pub track: TrackData,
    pub config: RaceConfig,
    pub step: FrameStep,
}

impl Plugin for RacePlugin {
    fn build(&self, app: &mut App) {
        let sim = RaceSimulation::new(self.config.clone(), &self.track);
        let idle = FrameOutput::capture(&sim, Vec::new());

        app.insert_resource(self.track.clone())
            .insert_resource(sim)
            .insert_resource(self.step)
            .insert_resource(LatestFrame(idle))
            .init_resource::<DriverInput>()
            .add_systems(Update, (advance_race_system, sync_car_transforms).chain());
    }
}

pub fn advance_race_system(
    time: Res<Time>,
    step: Res<FrameStep>,
    input: Res<DriverInput>,
    track: Res<TrackData>,
    mut sim: ResMut<RaceSimulation>,
    mut latest: ResMut<LatestFrame>,
) {
    let dt = match *step {
        FrameStep::RealTime => time.delta_secs(),
        FrameStep::Fixed(dt) => dt,
    };
    latest.0 = simulate_frame(&mut sim, &input, &track, dt);
}

// push the simulated model matrices onto the rendered entities
pub fn sync_car_transforms(
    latest: Res<LatestFrame>,
    player: Option<Single<&mut Transform, With<PlayerCar>>>,
    mut opponents: Query<(&OpponentCar, &mut Transform), Without<PlayerCar>>,
) {
    if let Some(mut player) = player {
        **player = Transform::from_matrix(latest.0.player_transform);
    }

    for (car, mut transform) in opponents.iter_mut() {
        if let Some(matrix) = latest.0.opponent_transforms.get(car.index) {
            *transform = Transform::from_matrix(*matrix);
        }
    }
}
