use bevy::prelude::*;

#[derive(Component)]
pub struct PlayerCar;

/// AI car, `index` into the track's opponent routes
#[derive(Component, Clone, Copy)]
pub struct OpponentCar {
    pub index: usize,
}

#[derive(Component)]
pub struct TrackModel;

#[derive(Component)]
pub struct StartMarker;

#[derive(Component)]
pub struct RaceCamera;

// HUD lines
#[derive(Component)]
pub struct StatusText;

#[derive(Component)]
pub struct BoostText;

#[derive(Component)]
pub struct ClockText;
