use crate::game_logic::bezier::BezierSegment;
use bevy::prelude::*;

/// True when two spheres overlap. Touching spheres do not collide.
pub fn spheres_collide(center_a: Vec4, radius_a: f32, center_b: Vec4, radius_b: f32) -> bool {
    (center_a - center_b).length() < radius_a + radius_b
}

pub fn sphere_contains(center: Vec4, radius: f32, point: Vec4) -> bool {
    (center - point).length() < radius
}

/// Axis-aligned box, min <= max on every axis
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec4,
    pub max: Vec4,
}

impl Aabb {
    /// Builds a box from any two opposite corners
    pub fn from_corners(a: Vec4, b: Vec4) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Cube of the given half extent centered on `center`
    pub fn around(center: Vec4, half_extent: f32) -> Self {
        let offset = Vec4::new(half_extent, half_extent, half_extent, 0.0);
        Self::from_corners(center - offset, center + offset)
    }

    /// Inclusive overlap test on x, y and z
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}

/// What touching a region means for the race
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RegionKind {
    /// Solid wall; `normal` is the precomputed reflection axis
    Wall { normal: Vec4 },
    Checkpoint,
    Finish,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackRegion {
    pub bounds: Aabb,
    pub kind: RegionKind,
}

impl TrackRegion {
    pub fn wall(bounds: Aabb, normal: Vec4) -> Self {
        Self {
            bounds,
            kind: RegionKind::Wall { normal },
        }
    }

    pub fn checkpoint(bounds: Aabb) -> Self {
        Self {
            bounds,
            kind: RegionKind::Checkpoint,
        }
    }

    pub fn finish(bounds: Aabb) -> Self {
        Self {
            bounds,
            kind: RegionKind::Finish,
        }
    }
}

/// First region in list order overlapping `probe`
pub fn first_overlap<'a>(probe: &Aabb, regions: &'a [TrackRegion]) -> Option<&'a TrackRegion> {
    regions.iter().find(|region| probe.overlaps(&region.bounds))
}

/// Response normal of the first wall overlapping `probe`
pub fn first_wall_normal(probe: &Aabb, regions: &[TrackRegion]) -> Option<Vec4> {
    regions
        .iter()
        .filter(|region| probe.overlaps(&region.bounds))
        .find_map(|region| match region.kind {
            RegionKind::Wall { normal } => Some(normal),
            _ => None,
        })
}

/// Parameter values 0, step, 2*step, ... plus a final sample at exactly 1
fn sample_parameters(step: f32) -> impl Iterator<Item = f32> {
    let count = if step > 0.0 && step.is_finite() {
        (1.0 / step).floor() as usize
    } else {
        0
    };
    let needs_end = count == 0 || (count as f32 * step) < 1.0;

    (0..=count)
        .map(move |i| i as f32 * step)
        .filter(|t| *t <= 1.0)
        .chain(needs_end.then_some(1.0))
}

/// Samples a cubic segment densely and returns the first sample inside the sphere
pub fn check_curve(center: Vec4, radius: f32, segment: &BezierSegment, step: f32) -> Option<Vec4> {
    sample_parameters(step)
        .map(|t| segment.evaluate(t))
        .find(|sample| sphere_contains(center, radius, *sample))
}

/// Runs `check_curve` over every segment, first hit wins
pub fn check_all_curves(
    center: Vec4,
    radius: f32,
    curves: &[BezierSegment],
    step: f32,
) -> Option<Vec4> {
    curves
        .iter()
        .find_map(|segment| check_curve(center, radius, segment, step))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_logic::vector::{direction, point};

    fn unit_box(x: f32) -> Aabb {
        Aabb::from_corners(point(x, 0.0, 0.0), point(x + 1.0, 1.0, 1.0))
    }

    #[test]
    fn test_sphere_boundary_excluded() {
        let a = point(0.0, 0.0, 0.0);
        let b = point(1.6, 0.0, 0.0);
        assert!(!spheres_collide(a, 0.8, b, 0.8));
        assert!(!spheres_collide(b, 0.8, a, 0.8));

        let closer = point(1.6 - 1e-3, 0.0, 0.0);
        assert!(spheres_collide(a, 0.8, closer, 0.8));
        assert!(spheres_collide(closer, 0.8, a, 0.8));
    }

    #[test]
    fn test_from_corners_orders_axes() {
        let aabb = Aabb::from_corners(point(3.0, -1.0, 5.0), point(1.0, 2.0, -4.0));
        assert_eq!(aabb.min.truncate(), Vec3::new(1.0, -1.0, -4.0));
        assert_eq!(aabb.max.truncate(), Vec3::new(3.0, 2.0, 5.0));
    }

    #[test]
    fn test_overlap_is_symmetric_and_inclusive() {
        let boxes = [unit_box(0.0), unit_box(1.0), unit_box(0.5), unit_box(2.5)];
        for a in &boxes {
            for b in &boxes {
                assert_eq!(a.overlaps(b), b.overlaps(a));
            }
        }
        // shared face counts as contact
        assert!(unit_box(0.0).overlaps(&unit_box(1.0)));
        assert!(!unit_box(0.0).overlaps(&unit_box(2.5)));
    }

    #[test]
    fn test_first_wall_normal_uses_list_order() {
        let walls = vec![
            TrackRegion::wall(unit_box(5.0), direction(0.0, 0.0, 1.0)),
            TrackRegion::wall(unit_box(0.0), direction(1.0, 0.0, 0.0)),
            TrackRegion::wall(unit_box(0.5), direction(-1.0, 0.0, 0.0)),
        ];
        let probe = Aabb::around(point(0.9, 0.5, 0.5), 0.1);
        assert_eq!(first_wall_normal(&probe, &walls), Some(direction(1.0, 0.0, 0.0)));

        let far = Aabb::around(point(-10.0, 0.5, 0.5), 0.1);
        assert_eq!(first_wall_normal(&far, &walls), None);
    }

    #[test]
    fn test_first_overlap_reports_region_kind() {
        let regions = vec![
            TrackRegion::checkpoint(unit_box(0.0)),
            TrackRegion::finish(unit_box(3.0)),
        ];
        let probe = Aabb::around(point(3.5, 0.5, 0.5), 0.1);
        let hit = first_overlap(&probe, &regions).unwrap();
        assert_eq!(hit.kind, RegionKind::Finish);
    }

    #[test]
    fn test_sampling_includes_endpoint() {
        let samples: Vec<f32> = sample_parameters(0.3).collect();
        assert_eq!(samples.len(), 5);
        assert_eq!(*samples.last().unwrap(), 1.0);

        let samples: Vec<f32> = sample_parameters(0.25).collect();
        assert_eq!(samples, vec![0.0, 0.25, 0.5, 0.75, 1.0]);

        let samples: Vec<f32> = sample_parameters(0.0).collect();
        assert_eq!(samples, vec![0.0, 1.0]);
    }

    #[test]
    fn test_check_curve_hits_endpoint_with_coarse_step() {
        let segment = BezierSegment::new([
            point(0.0, 0.0, 0.0),
            point(1.0, 0.0, 0.0),
            point(2.0, 0.0, 0.0),
            point(3.0, 0.0, 0.0),
        ]);
        // only the t = 1 sample is within reach
        let hit = check_curve(point(3.2, 0.0, 0.0), 0.3, &segment, 0.3);
        assert_eq!(hit, Some(point(3.0, 0.0, 0.0)));

        assert!(check_curve(point(1.5, 5.0, 0.0), 0.8, &segment, 0.01).is_none());
    }

    #[test]
    fn test_check_all_curves_first_segment_wins() {
        let first = BezierSegment::new([point(0.0, 0.0, 0.0); 4]);
        let second = BezierSegment::new([point(0.1, 0.0, 0.0); 4]);
        let hit = check_all_curves(point(0.05, 0.0, 0.0), 0.5, &[first, second], 0.01);
        assert_eq!(hit, Some(point(0.0, 0.0, 0.0)));
        assert!(check_all_curves(point(9.0, 0.0, 0.0), 0.5, &[first, second], 0.01).is_none());
    }
}
