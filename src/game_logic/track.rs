use crate::game_logic::bezier::{BezierPath, BezierSegment};
use crate::game_logic::collisions::{Aabb, TrackRegion};
use crate::game_logic::error::{LoadError, read_json};
use crate::game_logic::opponent::OpponentRoute;
use crate::game_logic::vector::{direction, point};
use bevy::prelude::*;
use serde::Deserialize;
use std::f32::consts::FRAC_PI_2;
use std::path::Path;

/// Static geometry of one circuit. Read-only while a race runs.
#[derive(Resource, Clone, Debug)]
pub struct TrackData {
    pub walls: Vec<TrackRegion>,
    /// Checkpoint and finish regions
    pub progress_regions: Vec<TrackRegion>,
    pub curves: Vec<BezierSegment>,
    pub opponents: Vec<OpponentRoute>,
    pub player_start: Vec4,
    pub player_forward: Vec4,

    // scenery placement for the renderer
    pub track_model: Mat4,
    pub start_marker_model: Mat4,
}

impl Default for TrackData {
    fn default() -> Self {
        builtin_circuit()
    }
}

// built-in circuit: a six-turn loop with two chicanes
const WALLS: [([f32; 3], [f32; 3], [f32; 3]); 14] = [
    ([-40.7087, 0.167617, -4.80944], [119.674, 1.14384, -4.02039], [0.0, 0.0, 1.0]),
    ([-40.7658, 0.167617, 3.9902], [119.617, 1.14384, 4.77924], [0.0, 0.0, -1.0]),
    ([127.899, 0.167617, 10.6331], [128.936, 1.14384, 53.4338], [1.0, 0.0, 0.0]),
    ([136.551, 0.167617, 9.02853], [137.735, 1.14384, 53.4909], [-1.0, 0.0, 0.0]),
    ([39.8501, 0.167617, 36.1797], [96.9923, 1.14384, 36.9671], [0.0, 0.0, 1.0]),
    ([39.793, 0.167617, 44.9793], [96.92, 1.14384, 45.7667], [0.0, 0.0, -1.0]),
    ([22.7769, 0.167617, 52.8528], [23.588, 1.14384, 101.884], [1.0, 0.0, 0.0]),
    ([31.5765, 0.167617, 52.91], [32.3877, 1.14384, 101.941], [-1.0, 0.0, 0.0]),
    ([7.47314, 0.167617, 68.8696], [8.28739, 1.14384, 101.592], [1.0, 0.0, 0.0]),
    ([-1.32648, 0.167617, 68.8124], [-0.512249, 1.14384, 101.535], [-1.0, 0.0, 0.0]),
    ([-41.0521, 0.167617, 51.8798], [-8.40433, 1.14384, 52.6341], [0.0, 0.0, 1.0]),
    ([-41.1093, 0.167617, 60.6794], [-8.46143, 1.14384, 61.4337], [0.0, 0.0, -1.0]),
    ([-57.7365, 0.167617, 11.8487], [-56.9515, 1.14384, 44.5001], [1.0, 0.0, 0.0]),
    ([-48.9368, 0.167617, 11.9059], [-48.3918, 1.14384, 44.5557], [-1.0, 0.0, 0.0]),
];

const CHECKPOINT: ([f32; 3], [f32; 3]) = ([23.573, 0.167617, 61.0342], [31.8161, 1.14384, 69.2047]);
const FINISH_LINE: ([f32; 3], [f32; 3]) = ([1.77523, 0.167617, -4.71291], [2.275, 1.14384, 4.71291]);

const CURVE_WALLS: [[[f32; 3]; 4]; 16] = [
    [[120.512, 0.0, -4.36174], [123.302, 0.0, -4.86174], [135.011, 0.0, -1.97653], [136.284, 0.0, 7.22413]],
    [[119.626, 0.0, 4.15303], [122.416, 0.0, 4.19443], [128.515, 0.0, 4.42184], [128.311, 0.0, 13.6225]],
    [[128.478, 0.0, 51.9777], [127.48, 0.0, 63.1046], [114.013, 0.0, 63.1661], [113.237, 0.0, 52.1931]],
    [[113.237, 0.0, 52.1931], [113.395, 0.0, 38.6298], [99.3735, 0.0, 35.9511], [96.5414, 0.0, 36.5426]],
    [[137.254, 0.0, 52.1931], [137.412, 0.0, 72.4043], [109.267, 0.0, 76.808], [105.092, 0.0, 55.4622]],
    [[105.092, 0.0, 55.4622], [104.126, 0.0, 48.4478], [103.997, 0.0, 44.8816], [94.0448, 0.0, 45.1446]],
    [[39.7007, 0.0, 36.3488], [26.3065, 0.0, 36.4643], [21.8087, 0.0, 49.8102], [23.0853, 0.0, 56.8246]],
    [[39.7007, 0.0, 45.337], [34.6639, 0.0, 45.4525], [30.8758, 0.0, 49.8102], [31.7581, 0.0, 56.8246]],
    [[23.3203, 0.0, 99.3802], [23.0891, 0.0, 114.942], [6.20176, 0.0, 110.899], [7.853, 0.0, 98.6958]],
    [[31.9701, 0.0, 99.3802], [33.9709, 0.0, 121.277], [-1.25309, 0.0, 127.641], [-1.16885, 0.0, 98.6958]],
    [[7.47649, 0.0, 66.7042], [6.74377, 0.0, 54.6708], [-4.02467, 0.0, 51.278], [-15.0344, 0.0, 52.0941]],
    [[-0.967499, 0.0, 73.5248], [-0.731407, 0.0, 61.4914], [-4.02469, 0.0, 60.2515], [-15.0344, 0.0, 61.0676]],
    [[-42.6206, 0.0, 60.6673], [-50.2865, 0.0, 59.8842], [-57.062, 0.0, 55.8317], [-57.3571, 0.0, 43.3885]],
    [[-38.0477, 0.0, 52.1415], [-45.7135, 0.0, 52.9085], [-48.4587, 0.0, 49.5536], [-48.7538, 0.0, 43.3885]],
    [[-48.502, 0.0, 12.3608], [-48.2069, 0.0, 8.3172], [-46.0213, 0.0, 4.44382], [-38.0477, 0.0, 4.84188]],
    [[-57.227, 0.0, 12.3608], [-56.9319, 0.0, 8.3172], [-54.5646, 0.0, -4.60828], [-38.0477, 0.0, -4.21022]],
];

const ROUTE_1: [[[f32; 3]; 4]; 6] = [
    [[0.0, 0.16, 2.0], [156.483, 0.16, -3.52993], [134.85, 0.16, -6.45085], [129.0, 0.16, 60.9768]],
    [[129.0, 0.16, 60.9768], [99.3377, 0.16, 71.0411], [121.338, 0.16, 30.559], [69.6432, 0.16, 41.1186]],
    [[69.6432, 0.16, 41.1186], [23.2552, 0.16, 32.2232], [24.7635, 0.16, 47.7012], [26.857, 0.16, 105.02]],
    [[26.857, 0.16, 105.02], [10.3733, 0.16, 123.0], [5.2825, 0.16, 124.649], [2.76479, 0.16, 65.1178]],
    [[2.76479, 0.16, 65.1178], [5.32203, 0.16, 51.0035], [-53.3087, 0.16, 59.3961], [-49.7859, 0.16, 50.4402]],
    [[-49.7859, 0.16, 50.4402], [-54.4495, 0.16, 20.2291], [-66.0504, 0.16, -13.1143], [3.0, 0.16, 2.0]],
];

const ROUTE_2: [[[f32; 3]; 4]; 6] = [
    [[0.0, 0.16, -2.0], [156.483, 0.16, -3.52993], [134.85, 0.16, -6.45085], [132.0, 0.16, 60.9768]],
    [[132.0, 0.16, 60.9768], [99.3377, 0.16, 71.0411], [121.338, 0.16, 30.559], [69.6432, 0.16, 43.1186]],
    [[69.6432, 0.16, 43.1186], [23.2552, 0.16, 32.2232], [24.7635, 0.16, 47.7012], [28.857, 0.16, 105.02]],
    [[28.857, 0.16, 105.02], [10.3733, 0.16, 123.0], [5.2825, 0.16, 124.649], [2.76479, 0.16, 69.1178]],
    [[2.76479, 0.16, 69.1178], [5.32203, 0.16, 51.0035], [-53.3087, 0.16, 59.3961], [-52.7859, 0.16, 50.4402]],
    [[-52.7859, 0.16, 50.4402], [-54.4495, 0.16, 20.2291], [-66.0504, 0.16, -6.89044], [3.0, 0.16, -2.0]],
];

const PLAYER_START: [f32; 3] = [0.0, 0.0, 0.0];
const PLAYER_FORWARD: [f32; 3] = [1.0, 0.0, 0.0];
const OPPONENT_DIVISORS: [f32; 2] = [5.0, 8.0];
const TRACK_OFFSET: [f32; 3] = [0.0, -0.8, 0.0];
const TRACK_SCALE: f32 = 8.0;
const START_MARKER: [f32; 3] = [2.0, 1.0, 0.0];

fn to_point(p: [f32; 3]) -> Vec4 {
    point(p[0], p[1], p[2])
}

fn to_direction(d: [f32; 3]) -> Vec4 {
    direction(d[0], d[1], d[2])
}

fn to_segment(points: &[[f32; 3]; 4]) -> BezierSegment {
    BezierSegment::new(points.map(to_point))
}

fn to_path(segments: &[[[f32; 3]; 4]]) -> BezierPath {
    BezierPath::new(segments.iter().map(to_segment).collect())
}

fn track_model(offset: [f32; 3], scale: f32) -> Mat4 {
    Mat4::from_translation(Vec3::from(offset))
        * Mat4::from_scale(Vec3::splat(scale))
        * Mat4::from_rotation_y(-FRAC_PI_2)
}

fn start_marker_model(position: [f32; 3]) -> Mat4 {
    Mat4::from_translation(Vec3::from(position)) * Mat4::from_rotation_y(-FRAC_PI_2)
}

pub fn builtin_circuit() -> TrackData {
    let walls = WALLS
        .iter()
        .map(|(min, max, normal)| {
            TrackRegion::wall(
                Aabb::from_corners(to_point(*min), to_point(*max)),
                to_direction(*normal),
            )
        })
        .collect();

    let progress_regions = vec![
        TrackRegion::checkpoint(Aabb::from_corners(
            to_point(CHECKPOINT.0),
            to_point(CHECKPOINT.1),
        )),
        TrackRegion::finish(Aabb::from_corners(
            to_point(FINISH_LINE.0),
            to_point(FINISH_LINE.1),
        )),
    ];

    let opponents = [&ROUTE_1[..], &ROUTE_2[..]]
        .into_iter()
        .zip(OPPONENT_DIVISORS)
        .map(|(route, divisor)| OpponentRoute::new(to_path(route), divisor))
        .collect();

    TrackData {
        walls,
        progress_regions,
        curves: CURVE_WALLS.iter().map(to_segment).collect(),
        opponents,
        player_start: to_point(PLAYER_START),
        player_forward: to_direction(PLAYER_FORWARD),
        track_model: track_model(TRACK_OFFSET, TRACK_SCALE),
        start_marker_model: start_marker_model(START_MARKER),
    }
}

/*
    on-disk circuit format (see assets/track.json)
*/

#[derive(Deserialize, Debug)]
struct TrackFile {
    player_start: [f32; 3],
    player_forward: [f32; 3],
    walls: Vec<WallEntry>,
    regions: Vec<RegionEntry>,
    curves: Vec<[[f32; 3]; 4]>,
    opponents: Vec<RouteEntry>,
    #[serde(default)]
    scenery: Option<SceneryEntry>,
}

#[derive(Deserialize, Debug)]
struct WallEntry {
    min: [f32; 3],
    max: [f32; 3],
    normal: [f32; 3],
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
enum RegionEntryKind {
    Checkpoint,
    Finish,
}

#[derive(Deserialize, Debug)]
struct RegionEntry {
    min: [f32; 3],
    max: [f32; 3],
    kind: RegionEntryKind,
}

fn default_hitbox_radius() -> f32 {
    crate::game_logic::constants::CAR_HITBOX_RADIUS
}

fn default_model_scale() -> f32 {
    1.0
}

#[derive(Deserialize, Debug)]
struct RouteEntry {
    speed_divisor: f32,
    #[serde(default = "default_hitbox_radius")]
    hitbox_radius: f32,
    #[serde(default = "default_model_scale")]
    model_scale: f32,
    segments: Vec<[[f32; 3]; 4]>,
}

#[derive(Deserialize, Debug)]
struct SceneryEntry {
    track_offset: [f32; 3],
    track_scale: f32,
    start_marker: [f32; 3],
}

impl TryFrom<TrackFile> for TrackData {
    type Error = LoadError;

    fn try_from(file: TrackFile) -> Result<Self, Self::Error> {
        let forward = to_direction(file.player_forward);
        if forward.length_squared() == 0.0 || forward.is_nan() {
            return Err(LoadError::InvalidTrack(
                "player_forward must be a non-zero vector".to_string(),
            ));
        }

        let mut walls = Vec::with_capacity(file.walls.len());
        for (index, wall) in file.walls.iter().enumerate() {
            let normal = to_direction(wall.normal);
            if normal.length_squared() == 0.0 || normal.is_nan() {
                return Err(LoadError::InvalidTrack(format!(
                    "wall {index} has a zero-length normal"
                )));
            }
            walls.push(TrackRegion::wall(
                Aabb::from_corners(to_point(wall.min), to_point(wall.max)),
                normal.normalize(),
            ));
        }

        let progress_regions = file
            .regions
            .iter()
            .map(|region| {
                let bounds = Aabb::from_corners(to_point(region.min), to_point(region.max));
                match region.kind {
                    RegionEntryKind::Checkpoint => TrackRegion::checkpoint(bounds),
                    RegionEntryKind::Finish => TrackRegion::finish(bounds),
                }
            })
            .collect();

        let mut opponents = Vec::with_capacity(file.opponents.len());
        for (index, route) in file.opponents.iter().enumerate() {
            if route.segments.is_empty() {
                return Err(LoadError::InvalidTrack(format!(
                    "opponent {index} has no path segments"
                )));
            }
            if route.speed_divisor.is_nan() || route.speed_divisor <= 0.0 {
                return Err(LoadError::InvalidTrack(format!(
                    "opponent {index} speed_divisor must be positive, got {}",
                    route.speed_divisor
                )));
            }
            opponents.push(OpponentRoute {
                path: to_path(&route.segments),
                speed_divisor: route.speed_divisor,
                hitbox_radius: route.hitbox_radius,
                model_scale: route.model_scale,
            });
        }

        let (track, marker) = match &file.scenery {
            Some(scenery) => (
                track_model(scenery.track_offset, scenery.track_scale),
                start_marker_model(scenery.start_marker),
            ),
            None => (
                track_model(TRACK_OFFSET, TRACK_SCALE),
                start_marker_model(START_MARKER),
            ),
        };

        Ok(TrackData {
            walls,
            progress_regions,
            curves: file.curves.iter().map(to_segment).collect(),
            opponents,
            player_start: to_point(file.player_start),
            player_forward: forward.normalize(),
            track_model: track,
            start_marker_model: marker,
        })
    }
}

pub fn load_track_from_file(path: impl AsRef<Path>) -> Result<TrackData, LoadError> {
    let path = path.as_ref();
    let file: TrackFile = read_json(path)?;
    let track = TrackData::try_from(file)?;
    info!(
        "Loaded track {}: {} walls, {} curves, {} opponents",
        path.display(),
        track.walls.len(),
        track.curves.len(),
        track.opponents.len()
    );
    Ok(track)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_logic::collisions::RegionKind;

    fn parse(json: &str) -> Result<TrackData, LoadError> {
        let file: TrackFile = serde_json::from_str(json).map_err(|source| LoadError::Json {
            path: "inline".into(),
            source,
        })?;
        TrackData::try_from(file)
    }

    #[test]
    fn test_builtin_circuit_layout() {
        let track = builtin_circuit();
        assert_eq!(track.walls.len(), 14);
        assert_eq!(track.curves.len(), 16);
        assert_eq!(track.opponents.len(), 2);
        assert_eq!(track.opponents[0].speed_divisor, 5.0);
        assert_eq!(track.opponents[1].speed_divisor, 8.0);
        assert!(track.opponents.iter().all(|route| route.path.len() == 6));

        let kinds: Vec<RegionKind> = track.progress_regions.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![RegionKind::Checkpoint, RegionKind::Finish]);

        for wall in &track.walls {
            assert!(wall.bounds.min.cmple(wall.bounds.max).all());
            let RegionKind::Wall { normal } = wall.kind else {
                panic!("wall list holds a non-wall region");
            };
            assert!((normal.length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_shipped_asset_matches_builtin() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/track.json");
        let loaded = load_track_from_file(path).unwrap();
        let builtin = builtin_circuit();

        assert_eq!(loaded.walls, builtin.walls);
        assert_eq!(loaded.progress_regions, builtin.progress_regions);
        assert_eq!(loaded.curves, builtin.curves);
        assert_eq!(loaded.opponents, builtin.opponents);
        assert_eq!(loaded.player_start, builtin.player_start);
    }

    #[test]
    fn test_start_marker_placement() {
        let track = builtin_circuit();
        let origin = track.start_marker_model * Vec4::W;
        assert!((origin - point(2.0, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_rejects_bad_routes() {
        let zero_divisor = r#"{
            "player_start": [0, 0, 0], "player_forward": [1, 0, 0],
            "walls": [], "regions": [], "curves": [],
            "opponents": [{ "speed_divisor": 0.0, "segments": [[[0,0,0],[1,0,0],[2,0,0],[3,0,0]]] }]
        }"#;
        assert!(matches!(parse(zero_divisor), Err(LoadError::InvalidTrack(_))));

        let no_segments = r#"{
            "player_start": [0, 0, 0], "player_forward": [1, 0, 0],
            "walls": [], "regions": [], "curves": [],
            "opponents": [{ "speed_divisor": 5.0, "segments": [] }]
        }"#;
        assert!(matches!(parse(no_segments), Err(LoadError::InvalidTrack(_))));
    }

    #[test]
    fn test_rejects_zero_wall_normal() {
        let json = r#"{
            "player_start": [0, 0, 0], "player_forward": [1, 0, 0],
            "walls": [{ "min": [0, 0, 0], "max": [1, 1, 1], "normal": [0, 0, 0] }],
            "regions": [], "curves": [], "opponents": []
        }"#;
        assert!(matches!(parse(json), Err(LoadError::InvalidTrack(_))));
    }

    #[test]
    fn test_swapped_corners_are_reordered() {
        let json = r#"{
            "player_start": [0, 0, 0], "player_forward": [0, 0, 2],
            "walls": [{ "min": [5, 1, 5], "max": [0, 0, 0], "normal": [2, 0, 0] }],
            "regions": [{ "min": [3, 3, 3], "max": [1, 1, 1], "kind": "finish" }],
            "curves": [], "opponents": []
        }"#;
        let track = parse(json).unwrap();
        assert_eq!(track.walls[0].bounds.min, point(0.0, 0.0, 0.0));
        assert_eq!(track.walls[0].kind, RegionKind::Wall { normal: direction(1.0, 0.0, 0.0) });
        assert_eq!(track.progress_regions[0].bounds.max, point(3.0, 3.0, 3.0));
        assert_eq!(track.player_forward, direction(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_malformed_json_is_reported() {
        let result = parse("{ \"walls\": ");
        assert!(matches!(result, Err(LoadError::Json { .. })));
    }
}
