use crate::game_logic::collisions::Aabb;
use crate::game_logic::config::RaceConfig;
use crate::game_logic::constants::*;
use crate::game_logic::lap_system::RaceProgress;
use crate::game_logic::vector::{UP, cross, roll_about, translation, yaw_about};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Input state for one simulation frame
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverInput {
    pub throttle: bool,
    pub reverse: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub drift_left: bool,
    pub drift_right: bool,
    pub boost: bool,
    pub start: bool,
}

impl DriverInput {
    /// Holds every control held in either input
    pub fn union(self, other: DriverInput) -> DriverInput {
        DriverInput {
            throttle: self.throttle || other.throttle,
            reverse: self.reverse || other.reverse,
            turn_left: self.turn_left || other.turn_left,
            turn_right: self.turn_right || other.turn_right,
            drift_left: self.drift_left || other.drift_left,
            drift_right: self.drift_right || other.drift_right,
            boost: self.boost || other.boost,
            start: self.start || other.start,
        }
    }
}

/// Which way the body is rolled while drifting
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DriftLean {
    #[default]
    Upright,
    Left,
    Right,
}

impl DriftLean {
    fn angle(&self) -> f32 {
        match self {
            DriftLean::Upright => 0.0,
            DriftLean::Left => DRIFT_LEAN_ANGLE,
            DriftLean::Right => -DRIFT_LEAN_ANGLE,
        }
    }
}

/// The player's car
#[derive(Clone, Debug, PartialEq)]
pub struct Vehicle {
    pub position: Vec4,
    /// Unit heading in the ground plane
    pub forward: Vec4,
    pub velocity: Vec4,
    /// Acceleration gathered this frame, cleared by `integrate`
    pub acceleration: Vec4,
    pub lateral_velocity: Vec4,
    pub transform: Mat4,
    pub lean: DriftLean,
    pub hitbox_radius: f32,
}

impl Vehicle {
    pub fn spawn(start: Vec4, forward: Vec4, hitbox_radius: f32) -> Self {
        let forward = Vec4::new(forward.x, 0.0, forward.z, 0.0).normalize_or(Vec4::X);
        let heading = (-forward.z).atan2(forward.x);
        let transform = translation(start)
            * Mat4::from_rotation_y(heading)
            * Mat4::from_rotation_y(MODEL_YAW_OFFSET);

        Self {
            position: start,
            forward,
            velocity: Vec4::ZERO,
            acceleration: Vec4::ZERO,
            lateral_velocity: Vec4::ZERO,
            transform,
            lean: DriftLean::Upright,
            hitbox_radius,
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn bounding_box(&self, half_extent: f32) -> Aabb {
        Aabb::around(self.position, half_extent)
    }

    /// Points left of the heading
    pub fn left(&self) -> Vec4 {
        cross(UP, self.forward)
    }

    /// Yaws heading and body around the car's own position. Positive turns left.
    pub fn turn(&mut self, angle: f32) {
        let rotation = Mat4::from_rotation_y(angle);
        self.forward = (rotation * self.forward).normalize_or(self.forward);
        self.transform = yaw_about(self.position, angle) * self.transform;
    }

    fn roll(&mut self, angle: f32) {
        if angle != 0.0 {
            self.transform = roll_about(self.position, self.forward, angle) * self.transform;
        }
    }
}

/// Turn rate for the current speed: sharp when slow, gentle when fast
pub fn turn_rate(speed: f32, max_velocity: f32) -> f32 {
    if speed <= 0.0 {
        return MAX_TURN_RATE;
    }
    (max_velocity / speed).clamp(MIN_TURN_RATE, MAX_TURN_RATE)
}

pub fn apply_friction(vehicle: &mut Vehicle, friction: f32, dt: f32) {
    vehicle.velocity -= friction * dt * vehicle.velocity;
}

/// Reads the driver's controls into acceleration, heading, drift and boost.
/// Returns true when a boost fired this frame.
pub fn apply_driver_input(
    vehicle: &mut Vehicle,
    progress: &mut RaceProgress,
    input: &DriverInput,
    config: &RaceConfig,
    now: f32,
    dt: f32,
) -> bool {
    let max_velocity = config.max_velocity;

    // take the lean off so turning works on the upright body
    vehicle.roll(-vehicle.lean.angle());
    vehicle.lean = DriftLean::Upright;

    if input.throttle {
        vehicle.acceleration += max_velocity * vehicle.forward * dt;
    }
    if input.reverse {
        vehicle.acceleration -= max_velocity * vehicle.forward * dt;
    }

    let rate = turn_rate(vehicle.speed(), max_velocity);
    if input.turn_left {
        vehicle.turn(rate * dt);
    }
    if input.turn_right {
        vehicle.turn(-rate * dt);
    }

    // lateral speed only lives as long as the drift key is held
    vehicle.lateral_velocity = Vec4::ZERO;
    if !progress.is_stunned(now) {
        let slide = max_velocity * DRIFT_STRENGTH * dt * vehicle.left();
        if input.drift_left {
            vehicle.lateral_velocity += slide;
            vehicle.lean = DriftLean::Left;
        }
        if input.drift_right {
            vehicle.lateral_velocity -= slide;
            vehicle.lean = if input.drift_left {
                DriftLean::Upright
            } else {
                DriftLean::Right
            };
        }
    }
    vehicle.roll(vehicle.lean.angle());

    if input.boost && progress.boost_ready(now) && progress.boost_power > BOOST_FLOOR {
        progress.spend_boost(config.boost_cost);
        progress.boost_ready_at = now + config.boost_cooldown;
        vehicle.acceleration += BOOST_ACCEL_FACTOR * max_velocity * vehicle.forward * dt;
        vehicle.velocity += BOOST_IMPULSE_FACTOR * max_velocity * vehicle.forward;
        debug!("Boost fired, {:.0} power left", progress.boost_power);
        return true;
    }
    false
}

/// Snaps a crawling car to rest, then points the momentum along the heading
/// and adds this frame's acceleration
pub fn settle_velocity(vehicle: &mut Vehicle) {
    let speed = vehicle.speed();
    if vehicle.acceleration == Vec4::ZERO && speed < IDLE_SNAP_SPEED {
        vehicle.velocity = Vec4::ZERO;
        return;
    }

    let sign = if vehicle.velocity.dot(vehicle.forward) < 0.0 {
        -1.0
    } else {
        1.0
    };
    vehicle.velocity = sign * speed * vehicle.forward + vehicle.acceleration;
}

/// Moves the car by this frame's velocity and drift, then clears acceleration
pub fn integrate(vehicle: &mut Vehicle, dt: f32) {
    let movement = (vehicle.velocity + vehicle.lateral_velocity) * dt;
    vehicle.position += movement;
    vehicle.transform = translation(movement) * vehicle.transform;
    vehicle.acceleration = Vec4::ZERO;
}
