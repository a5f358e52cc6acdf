use crate::game_logic::collisions::{check_all_curves, first_wall_normal, spheres_collide};
use crate::game_logic::config::RaceConfig;
use crate::game_logic::constants::CURVE_SPEED_FACTOR;
use crate::game_logic::lap_system::RaceProgress;
use crate::game_logic::opponent::{Opponent, OpponentRoute};
use crate::game_logic::physics::Vehicle;
use crate::game_logic::track::TrackData;
use crate::game_logic::vector::{clamped_acos, cross, horizontal, reflect};
use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

/// Something the player ran into this frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Impact {
    Opponent(usize),
    Wall,
    Curve,
}

/// Bounce off an AI car: mirror the velocity across the line between the two cars
pub fn resolve_opponent_contact(
    vehicle: &mut Vehicle,
    progress: &mut RaceProgress,
    opponent_position: Vec4,
    config: &RaceConfig,
    now: f32,
) {
    if !progress.is_stunned(now) {
        progress.penalize(config.collision_penalty);
    }

    let separation = horizontal(vehicle.position - opponent_position);
    if separation.length_squared() > 0.0 {
        vehicle.velocity = reflect(vehicle.velocity, separation.normalize());
    }
    vehicle.lateral_velocity = -vehicle.lateral_velocity;
    progress.stun(now, config.stun_duration);
}

/// Bounce off a straight wall and swing the body round to the new direction of travel
pub fn resolve_wall_contact(
    vehicle: &mut Vehicle,
    progress: &mut RaceProgress,
    normal: Vec4,
    config: &RaceConfig,
    now: f32,
) {
    if !progress.is_stunned(now) {
        progress.penalize(config.collision_penalty);
    }

    vehicle.velocity = reflect(vehicle.velocity, normal);

    let heading = horizontal(vehicle.velocity);
    if heading.length_squared() > 0.0 {
        let mut angle = clamped_acos(heading.normalize().dot(vehicle.forward));
        if cross(heading, vehicle.forward).y > 0.0 {
            angle = -angle;
        }
        vehicle.turn(angle);
    }

    vehicle.lateral_velocity = -vehicle.lateral_velocity;
    progress.stun(now, config.stun_duration);
}

/// Glancing blow off a curved wall: a quarter turn away from the wall at half speed.
/// Ignored while stunned.
pub fn resolve_curve_contact(
    vehicle: &mut Vehicle,
    progress: &mut RaceProgress,
    hit_point: Vec4,
    config: &RaceConfig,
    now: f32,
) -> bool {
    if progress.is_stunned(now) {
        return false;
    }
    progress.penalize(config.collision_penalty);

    let away = horizontal(vehicle.position - hit_point);
    if away.length_squared() > 0.0 {
        let mut angle = clamped_acos(away.normalize().dot(vehicle.forward));
        if cross(away, vehicle.forward).y < 0.0 {
            angle = -angle;
        }

        if angle > 0.0 {
            vehicle.turn(-FRAC_PI_2);
        } else if angle < 0.0 {
            vehicle.turn(FRAC_PI_2);
        }
    }

    let speed = vehicle.speed() * CURVE_SPEED_FACTOR;
    vehicle.velocity = speed * vehicle.forward;
    vehicle.lateral_velocity = -vehicle.lateral_velocity;
    progress.stun(now, config.curve_stun_duration);
    true
}

/// Runs every collision test in order: AI cars, walls, then curves. Each
/// response sees the effects of the ones before it.
pub fn check_impacts(
    vehicle: &mut Vehicle,
    progress: &mut RaceProgress,
    opponents: &[Opponent],
    track: &TrackData,
    config: &RaceConfig,
    now: f32,
) -> Vec<Impact> {
    let mut impacts = Vec::new();

    let routes: &[OpponentRoute] = &track.opponents;
    for (index, (opponent, route)) in opponents.iter().zip(routes).enumerate() {
        if spheres_collide(
            vehicle.position,
            vehicle.hitbox_radius,
            opponent.position,
            route.hitbox_radius,
        ) {
            resolve_opponent_contact(vehicle, progress, opponent.position, config, now);
            debug!("Hit opponent {}, {:.0} power left", index, progress.boost_power);
            impacts.push(Impact::Opponent(index));
        }
    }

    let probe = vehicle.bounding_box(config.car_half_extent);
    if let Some(normal) = first_wall_normal(&probe, &track.walls) {
        resolve_wall_contact(vehicle, progress, normal, config, now);
        debug!("Hit wall, {:.0} power left", progress.boost_power);
        impacts.push(Impact::Wall);
    }

    if let Some(hit) = check_all_curves(
        vehicle.position,
        vehicle.hitbox_radius,
        &track.curves,
        config.curve_sample_step,
    ) {
        if resolve_curve_contact(vehicle, progress, hit, config, now) {
            debug!("Hit curve at {:?}, {:.0} power left", hit.truncate(), progress.boost_power);
            impacts.push(Impact::Curve);
        }
    }

    impacts
}
