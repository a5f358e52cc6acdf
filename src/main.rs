use bevy::{prelude::*, window::PresentMode};
use bezier_racers::camera::{
    CameraMode, WIN_H, WIN_W, adjust_orbit, move_camera, spawn_camera, toggle_camera_mode,
};
use bezier_racers::game_logic::{
    OpponentCar, PlayerCar, RaceConfig, StartMarker, TrackData, TrackModel, load_track_from_file,
};
use bezier_racers::hud::{spawn_hud, update_hud};
use bezier_racers::input::{cycle_difficulty, read_driver_input};
use bezier_racers::race_plugin::{FrameStep, RacePlugin, advance_race_system, sync_car_transforms};

const TRACK_PATH: &str = "assets/track.json";
const CONFIG_PATH: &str = "assets/race_config.json";

const OPPONENT_COLORS: [Color; 2] = [Color::srgb(0.1, 0.3, 0.9), Color::srgb(0.1, 0.7, 0.2)];

fn load_track() -> TrackData {
    match load_track_from_file(TRACK_PATH) {
        Ok(track) => track,
        Err(e) => {
            warn!("{e}; using the built-in circuit");
            TrackData::default()
        }
    }
}

fn main() {
    let track = load_track();
    let config = RaceConfig::load_or_default(CONFIG_PATH);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Bezier Racers".into(),
                resolution: (WIN_W, WIN_H).into(),
                present_mode: PresentMode::AutoVsync,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(RacePlugin {
            track,
            config,
            step: FrameStep::RealTime,
        })
        .insert_resource(ClearColor(Color::WHITE))
        .init_resource::<CameraMode>()
        .add_systems(Startup, (spawn_camera, spawn_scene, spawn_hud))
        .add_systems(
            Update,
            (read_driver_input, cycle_difficulty).before(advance_race_system),
        )
        .add_systems(
            Update,
            (toggle_camera_mode, adjust_orbit, move_camera)
                .chain()
                .after(sync_car_transforms),
        )
        .add_systems(Update, update_hud.after(advance_race_system))
        .run();
}

// primitive stand-ins for the track, the start arch and the cars
fn spawn_scene(
    mut commands: Commands,
    track: Res<TrackData>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(30.0, 60.0, 20.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(50.0, 50.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.35, 0.35, 0.38))),
        Transform::from_matrix(track.track_model),
        TrackModel,
    ));

    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(0.3, 2.0, 10.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.9, 0.9, 0.9))),
        Transform::from_matrix(track.start_marker_model),
        StartMarker,
    ));

    let wall_material = materials.add(Color::srgb(0.8, 0.2, 0.2));
    for wall in &track.walls {
        let size = (wall.bounds.max - wall.bounds.min).truncate();
        let center = ((wall.bounds.max + wall.bounds.min) * 0.5).truncate();
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::from_size(size))),
            MeshMaterial3d(wall_material.clone()),
            Transform::from_translation(center),
        ));
    }

    // curved walls drawn as posts along each segment
    let post = meshes.add(Cuboid::new(0.3, 1.0, 0.3));
    for curve in &track.curves {
        for i in 0..=20 {
            let p = curve.evaluate(i as f32 / 20.0).truncate();
            commands.spawn((
                Mesh3d(post.clone()),
                MeshMaterial3d(wall_material.clone()),
                Transform::from_translation(p + Vec3::Y * 0.5),
            ));
        }
    }

    // car meshes are authored along +z
    let body = meshes.add(Cuboid::new(0.9, 0.5, 1.6));
    commands.spawn((
        Mesh3d(body.clone()),
        MeshMaterial3d(materials.add(Color::srgb(0.9, 0.1, 0.1))),
        Transform::default(),
        PlayerCar,
    ));
    for index in 0..track.opponents.len() {
        let color = OPPONENT_COLORS[index % OPPONENT_COLORS.len()];
        commands.spawn((
            Mesh3d(body.clone()),
            MeshMaterial3d(materials.add(color)),
            Transform::default(),
            OpponentCar { index },
        ));
    }
}
