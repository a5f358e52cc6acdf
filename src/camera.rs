use crate::game_logic::{PlayerCar, RaceCamera, RaceSimulation};
use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;
use bevy::render::camera::Projection;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

// Camera-related constants
pub const WIN_W: f32 = 1280.;
pub const WIN_H: f32 = 720.;

const CHASE_DISTANCE: f32 = 6.0;
const CHASE_HEIGHT: f32 = 2.0;
const FOV_PER_SPEED: f32 = 0.002;
const ORBIT_DRAG_RATE: f32 = 0.01;
const ORBIT_ZOOM_RATE: f32 = 0.1;

#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub enum CameraMode {
    /// Trails the car, pulling in as it speeds up
    #[default]
    Chase,
    /// Looks at the car from a point on a sphere around it
    Orbit {
        distance: f32,
        theta: f32,
        phi: f32,
    },
}

impl CameraMode {
    pub fn orbit() -> Self {
        CameraMode::Orbit {
            distance: 3.5,
            theta: -FRAC_PI_2,
            phi: 0.0,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            CameraMode::Chase => CameraMode::orbit(),
            CameraMode::Orbit { .. } => CameraMode::Chase,
        }
    }
}

/// Offset from the car to the chase eye. Boosting stretches the follow distance.
pub fn chase_offset(forward: Vec3, speed: f32, boosting: bool) -> Vec3 {
    let (pull, lift) = if boosting { (0.0001, 0.02) } else { (0.0004, 0.05) };
    let back = CHASE_DISTANCE / (1.0 + speed * speed * pull);
    Vec3::new(
        -forward.x * back,
        CHASE_HEIGHT / (1.0 + speed * lift),
        -forward.z * back,
    )
}

/// Vertical field of view, narrowing with speed
pub fn chase_fov(speed: f32) -> f32 {
    FRAC_PI_3 - FOV_PER_SPEED * speed
}

pub fn orbit_offset(distance: f32, theta: f32, phi: f32) -> Vec3 {
    Vec3::new(
        distance * phi.cos() * theta.sin(),
        distance * phi.sin(),
        distance * phi.cos() * theta.cos(),
    )
}

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: FRAC_PI_3,
            near: 0.1,
            far: 500.0,
            ..default()
        }),
        Transform::from_xyz(-6.0, 2.0, 0.0).looking_at(Vec3::ZERO, Vec3::Y),
        RaceCamera,
    ));
}

pub fn toggle_camera_mode(keys: Res<ButtonInput<KeyCode>>, mut mode: ResMut<CameraMode>) {
    if keys.just_pressed(KeyCode::KeyC) {
        *mode = mode.toggled();
    }
}

// middle mouse drag orbits, scroll zooms
pub fn adjust_orbit(
    buttons: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
    mut mode: ResMut<CameraMode>,
) {
    let CameraMode::Orbit {
        distance,
        theta,
        phi,
    } = mode.as_mut()
    else {
        return;
    };

    if buttons.pressed(MouseButton::Middle) {
        *theta -= ORBIT_DRAG_RATE * motion.delta.x;
        *phi = (*phi - ORBIT_DRAG_RATE * motion.delta.y).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    // never sit exactly on the car
    *distance = (*distance - ORBIT_ZOOM_RATE * scroll.delta.y).max(f32::EPSILON);
}

// Camera movement system that follows the player
pub fn move_camera(
    sim: Res<RaceSimulation>,
    mode: Res<CameraMode>,
    player: Single<&Transform, With<PlayerCar>>,
    camera: Single<(&mut Transform, &mut Projection), (With<RaceCamera>, Without<PlayerCar>)>,
) {
    let (mut transform, mut projection) = camera.into_inner();
    let target = player.translation;
    let speed = sim.vehicle.speed();

    let eye = match *mode {
        CameraMode::Chase => {
            let boosting = sim.clock < sim.progress.boost_ready_at;
            if let Projection::Perspective(perspective) = projection.as_mut() {
                perspective.fov = chase_fov(speed);
            }
            target + chase_offset(sim.vehicle.forward.truncate(), speed, boosting)
        }
        CameraMode::Orbit {
            distance,
            theta,
            phi,
        } => target + orbit_offset(distance, theta, phi),
    };

    *transform = Transform::from_translation(eye).looking_at(target, Vec3::Y);
}
