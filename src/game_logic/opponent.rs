use crate::game_logic::bezier::BezierPath;
use crate::game_logic::constants::{CAR_HITBOX_RADIUS, MODEL_YAW_OFFSET};
use crate::game_logic::vector::{clamped_acos, cross, direction, translation, yaw_about};
use bevy::prelude::*;

/// Read-only description of how an AI car drives its lap
#[derive(Clone, Debug, PartialEq)]
pub struct OpponentRoute {
    pub path: BezierPath,
    /// Wall clock seconds per path segment
    pub speed_divisor: f32,
    pub hitbox_radius: f32,
    pub model_scale: f32,
}

impl OpponentRoute {
    pub fn new(path: BezierPath, speed_divisor: f32) -> Self {
        Self {
            path,
            speed_divisor,
            hitbox_radius: CAR_HITBOX_RADIUS,
            model_scale: 1.0,
        }
    }

    /// Path time for a given race clock. `scale` stretches the divisor (difficulty).
    pub fn path_time(&self, clock: f32, scale: f32) -> f32 {
        clock / (self.speed_divisor * scale)
    }
}

/// Mutable per-race state of an AI car
#[derive(Clone, Debug, PartialEq)]
pub struct Opponent {
    pub position: Vec4,
    pub forward: Vec4,
    pub transform: Mat4,
    /// Last point sampled from the path, the reference for the next step
    pub last_path_point: Vec4,
    /// Segment the last point was sampled from
    pub segment: usize,
}

impl Opponent {
    pub fn spawn(route: &OpponentRoute) -> Self {
        let start = route.path.start().unwrap_or(Vec4::W);
        let transform = translation(start)
            * Mat4::from_rotation_y(MODEL_YAW_OFFSET)
            * Mat4::from_scale(Vec3::splat(route.model_scale));

        Self {
            position: start,
            forward: direction(1.0, 0.0, 0.0),
            transform,
            last_path_point: start,
            segment: 0,
        }
    }

    /// Moves the car to the path point for `tau`, turning it to face the
    /// direction of travel. Returns false once the path is exhausted, in
    /// which case the car keeps its last transform.
    ///
    /// A looping path that wraps back to its first segment puts the car on
    /// that segment's start without turning.
    pub fn follow_path(&mut self, route: &OpponentRoute, tau: f32, looping: bool) -> bool {
        let Some((index, local)) = route.path.locate(tau, looping) else {
            return false;
        };
        let segment = &route.path.segments[index];

        if index < self.segment {
            let start = segment.start();
            self.transform = translation(start - self.position) * self.transform;
            self.position = start;
            self.last_path_point = start;
        }
        self.segment = index;

        let target = segment.evaluate(local);
        let delta = target - self.last_path_point;

        // a zero step has no heading, keep the current one
        if delta.length_squared() > 0.0 {
            let heading = delta.normalize();
            let mut angle = clamped_acos(heading.dot(self.forward));
            if cross(delta, self.forward).y < 0.0 {
                angle = -angle;
            }

            self.transform = yaw_about(self.position, -angle) * self.transform;
            self.forward = heading;
        }

        self.transform = translation(delta) * self.transform;
        self.position = target;
        self.last_path_point = target;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_logic::bezier::BezierSegment;
    use crate::game_logic::track::builtin_circuit;
    use crate::game_logic::vector::point;

    fn straight_route() -> OpponentRoute {
        let segment = BezierSegment::new([
            point(0.0, 0.16, 2.0),
            point(10.0, 0.16, 2.0),
            point(20.0, 0.16, 2.0),
            point(30.0, 0.16, 2.0),
        ]);
        OpponentRoute::new(BezierPath::new(vec![segment]), 5.0)
    }

    #[test]
    fn test_straight_path_moves_monotonically() {
        let route = straight_route();
        let mut opponent = Opponent::spawn(&route);
        let mut previous_x = opponent.position.x;

        for step in 1..=100 {
            let tau = step as f32 / 100.0;
            assert!(opponent.follow_path(&route, tau, false));

            assert!(!opponent.position.is_nan());
            assert!(!opponent.forward.is_nan());
            assert!(!opponent.transform.is_nan());
            assert!(opponent.position.x > previous_x);
            previous_x = opponent.position.x;
        }

        assert!((opponent.position - point(30.0, 0.16, 2.0)).length() < 1e-3);
        assert!((opponent.forward - direction(1.0, 0.0, 0.0)).length() < 1e-5);
        assert_eq!(opponent.position.w, 1.0);
    }

    #[test]
    fn test_transform_tracks_position() {
        let route = straight_route();
        let mut opponent = Opponent::spawn(&route);
        opponent.follow_path(&route, 0.5, false);

        let origin = opponent.transform * Vec4::W;
        assert!((origin - opponent.position).length() < 1e-4);
    }

    #[test]
    fn test_turning_path_rotates_forward() {
        let segment = BezierSegment::new([
            point(0.0, 0.0, 0.0),
            point(0.0, 0.0, 1.0),
            point(0.0, 0.0, 2.0),
            point(0.0, 0.0, 3.0),
        ]);
        let route = OpponentRoute::new(BezierPath::new(vec![segment]), 1.0);
        let mut opponent = Opponent::spawn(&route);
        let model_forward_before = opponent.transform * direction(0.0, 0.0, 1.0);

        opponent.follow_path(&route, 0.5, false);

        assert!((opponent.forward - direction(0.0, 0.0, 1.0)).length() < 1e-5);
        // the model turned by the same quarter turn as the heading
        let model_forward_after = opponent.transform * direction(0.0, 0.0, 1.0);
        let turn = clamped_acos(
            model_forward_before.normalize().dot(model_forward_after.normalize()),
        );
        assert!((turn - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
    }

    #[test]
    fn test_holds_after_path_end() {
        let route = straight_route();
        let mut opponent = Opponent::spawn(&route);
        opponent.follow_path(&route, 1.0, false);
        let finished = opponent.clone();

        assert!(!opponent.follow_path(&route, 1.5, false));
        assert_eq!(opponent, finished);
    }

    #[test]
    fn test_repeated_time_is_a_no_op() {
        let route = straight_route();
        let mut opponent = Opponent::spawn(&route);
        opponent.follow_path(&route, 0.3, false);
        let snapshot = opponent.clone();

        opponent.follow_path(&route, 0.3, false);
        assert_eq!(opponent, snapshot);
    }

    #[test]
    fn test_path_time_uses_divisor() {
        let route = straight_route();
        assert!((route.path_time(10.0, 1.0) - 2.0).abs() < 1e-6);
        assert!((route.path_time(10.0, 2.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_looping_route_wraps_without_spinning() {
        let track = builtin_circuit();
        let route = &track.opponents[0];
        let mut opponent = Opponent::spawn(route);
        let mut wraps = 0;

        // a bit over one lap at 60 fps
        for frame in 1..=2200 {
            let tau = route.path_time(frame as f32 / 60.0, 1.0);
            let heading = opponent.forward;
            let segment = opponent.segment;

            assert!(opponent.follow_path(route, tau, true));

            let (index, local) = route.path.locate(tau, true).unwrap();
            let expected = route.path.segments[index].evaluate(local);
            assert!((opponent.position - expected).length() < 1e-4);

            if opponent.segment < segment {
                wraps += 1;
                let turn = clamped_acos(heading.dot(opponent.forward));
                assert!(turn < 0.5, "turned {turn} rad across the lap wrap");
                assert_eq!(opponent.segment, 0);
            }
        }
        assert_eq!(wraps, 1);
    }
}
