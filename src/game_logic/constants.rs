use std::f32::consts::{FRAC_PI_2, PI};

// Simulation timing
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0; // used by the headless runner
pub const RACE_TIME_LIMIT: f32 = 30.0;

// Car physics constants
pub const MAX_VELOCITY: f32 = 20.0;
pub const FRICTION: f32 = 0.7;
pub const MIN_TURN_RATE: f32 = 0.5; // radians per second at high speed
pub const MAX_TURN_RATE: f32 = 2.0; // radians per second when slow or stopped
pub const IDLE_SNAP_SPEED: f32 = 0.5;
pub const DRIFT_STRENGTH: f32 = 30.0;
pub const DRIFT_LEAN_ANGLE: f32 = PI / 20.0;

// Boost
pub const START_BOOST_POWER: f32 = 100.0;
pub const BOOST_COST: f32 = 22.0;
pub const BOOST_FLOOR: f32 = 1.0;
pub const BOOST_COOLDOWN: f32 = 5.0;
pub const BOOST_ACCEL_FACTOR: f32 = 10.0;
pub const BOOST_IMPULSE_FACTOR: f32 = 1.0;

// Collisions
pub const CAR_HITBOX_RADIUS: f32 = 0.8;
pub const CAR_HALF_EXTENT: f32 = 0.46;
pub const COLLISION_PENALTY: f32 = 10.0;
pub const STUN_DURATION: f32 = 0.5;
pub const CURVE_STUN_DURATION: f32 = 0.1;
pub const CURVE_SAMPLE_STEP: f32 = 0.01;
pub const CURVE_SPEED_FACTOR: f32 = 0.5;

// Rendering helpers
pub const MODEL_YAW_OFFSET: f32 = FRAC_PI_2; // car meshes are authored facing +z
