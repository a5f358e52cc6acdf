use bevy::prelude::*;

/// Evaluates a Bézier curve of the given degree at `t` by repeated linear
/// interpolation (de Casteljau). `t` is not clamped.
///
/// Expects `degree + 1` control points; extra points are ignored and a short
/// slice lowers the degree to what it can support.
pub fn evaluate(control_points: &[Vec4], degree: usize, t: f32) -> Vec4 {
    let degree = degree.min(control_points.len().saturating_sub(1));
    let mut points: Vec<Vec4> = control_points.iter().take(degree + 1).copied().collect();

    for round in 0..degree {
        for i in 0..degree - round {
            points[i] = points[i] + t * (points[i + 1] - points[i]);
        }
    }

    points.first().copied().unwrap_or(Vec4::ZERO)
}

/// A single cubic segment
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BezierSegment {
    pub points: [Vec4; 4],
}

impl BezierSegment {
    pub fn new(points: [Vec4; 4]) -> Self {
        Self { points }
    }

    pub fn evaluate(&self, t: f32) -> Vec4 {
        evaluate(&self.points, 3, t)
    }

    pub fn start(&self) -> Vec4 {
        self.points[0]
    }
}

/// Piecewise cubic path where segment `k` covers path time (k, k + 1]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BezierPath {
    pub segments: Vec<BezierSegment>,
}

impl BezierPath {
    pub fn new(segments: Vec<BezierSegment>) -> Self {
        Self { segments }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn start(&self) -> Option<Vec4> {
        self.segments.first().map(BezierSegment::start)
    }

    /// Maps path time to (segment index, local parameter).
    ///
    /// Past the last segment this returns None unless `looping` is set, in
    /// which case path time wraps around the segment count.
    pub fn locate(&self, tau: f32, looping: bool) -> Option<(usize, f32)> {
        let count = self.segments.len();
        if count == 0 || tau.is_nan() {
            return None;
        }

        let total = count as f32;
        let mut tau = tau.max(0.0);
        if looping && tau > total {
            tau = tau.rem_euclid(total);
            // exact multiples land on the end of the last segment
            if tau == 0.0 {
                tau = total;
            }
        }

        let index = (tau.ceil() as usize).saturating_sub(1);
        if index >= count {
            return None;
        }
        Some((index, tau - index as f32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_logic::vector::point;

    fn sample_points() -> Vec<Vec4> {
        vec![
            point(0.0, 0.0, 0.0),
            point(2.0, 5.0, 1.0),
            point(-3.0, 2.0, 4.0),
            point(6.0, 0.5, -2.0),
            point(1.0, 1.0, 1.0),
        ]
    }

    #[test]
    fn test_endpoints_match_control_points() {
        let points = sample_points();
        for degree in 1..points.len() {
            let slice = &points[..=degree];
            let start = evaluate(slice, degree, 0.0);
            let end = evaluate(slice, degree, 1.0);
            assert!((start - slice[0]).length() < 1e-5);
            assert!((end - slice[degree]).length() < 1e-5);
        }
    }

    #[test]
    fn test_degree_zero_returns_point() {
        let p = point(7.0, -1.0, 3.0);
        assert_eq!(evaluate(&[p], 0, 0.37), p);
        assert_eq!(evaluate(&[p], 0, 12.0), p);
    }

    #[test]
    fn test_cubic_midpoint_of_straight_line() {
        let segment = BezierSegment::new([
            point(0.0, 0.0, 0.0),
            point(1.0, 0.0, 0.0),
            point(2.0, 0.0, 0.0),
            point(3.0, 0.0, 0.0),
        ]);
        let mid = segment.evaluate(0.5);
        assert!((mid - point(1.5, 0.0, 0.0)).length() < 1e-5);
        assert_eq!(mid.w, 1.0);
    }

    #[test]
    fn test_locate_segments() {
        let segment = BezierSegment::new([point(0.0, 0.0, 0.0); 4]);
        let path = BezierPath::new(vec![segment; 3]);

        assert_eq!(path.locate(0.0, false), Some((0, 0.0)));
        assert_eq!(path.locate(1.0, false), Some((0, 1.0)));
        let (index, local) = path.locate(1.25, false).unwrap();
        assert_eq!(index, 1);
        assert!((local - 0.25).abs() < 1e-6);
        assert_eq!(path.locate(3.0, false), Some((2, 1.0)));
        assert_eq!(path.locate(3.01, false), None);
    }

    #[test]
    fn test_locate_wraps_when_looping() {
        let segment = BezierSegment::new([point(0.0, 0.0, 0.0); 4]);
        let path = BezierPath::new(vec![segment; 2]);

        let (index, local) = path.locate(2.5, true).unwrap();
        assert_eq!(index, 0);
        assert!((local - 0.5).abs() < 1e-6);
        assert_eq!(path.locate(4.0, true), Some((1, 1.0)));
    }

    #[test]
    fn test_empty_path_has_no_segment() {
        assert!(BezierPath::default().locate(0.5, true).is_none());
        assert!(BezierPath::default().start().is_none());
    }
}
