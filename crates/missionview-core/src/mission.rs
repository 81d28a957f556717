//! Mission, obstacle, and telemetry inputs.
//!
//! These mirror the JSON the judging application's data services return.
//! They are read-only to the scene builder and are not validated here.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{self, SceneError};
use crate::geo::{AerialPosition, GpsPosition};

/// A named ground position of interest to the judges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub name: String,
    #[serde(flatten)]
    pub position: GpsPosition,
}

/// Mission configuration as served to the judging UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionConfig {
    /// Origin of the local frame. Nothing mission-relative renders without it.
    pub home_pos: Option<GpsPosition>,
    /// Explicitly named points of interest.
    pub points_of_interest: Vec<PointOfInterest>,
    /// Payload drop target.
    pub air_drop_pos: Option<GpsPosition>,
    /// Off-axis object location.
    pub off_axis_odlc_pos: Option<GpsPosition>,
    /// Last known position of the emergent target.
    pub emergent_last_known_pos: Option<GpsPosition>,
    /// Search grid boundary, in order. Treated as a closed polygon.
    pub search_grid_points: Vec<AerialPosition>,
    /// Flight path waypoints, in order. Treated as an open path.
    pub mission_waypoints: Vec<AerialPosition>,
    /// Acceptance radius around each waypoint, in feet.
    pub mission_waypoints_dist_max: f64,
}

impl MissionConfig {
    pub fn from_json_str(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    /// All named points: the explicit list first, then the well-known judge
    /// positions that are present.
    pub fn named_points(&self) -> Vec<PointOfInterest> {
        let well_known = [
            ("air_drop", self.air_drop_pos),
            ("off_axis_odlc", self.off_axis_odlc_pos),
            ("emergent_last_known", self.emergent_last_known_pos),
        ];

        let mut points = self.points_of_interest.clone();
        points.extend(well_known.into_iter().filter_map(|(name, pos)| {
            pos.map(|position| PointOfInterest {
                name: name.to_string(),
                position,
            })
        }));
        points
    }
}

/// A static cylinder obstacle standing on the ground.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StationaryObstacle {
    pub latitude: f64,
    pub longitude: f64,
    /// Feet.
    pub cylinder_radius: f64,
    /// Feet above ground.
    pub cylinder_height: f64,
}

impl StationaryObstacle {
    pub const fn gps(&self) -> GpsPosition {
        GpsPosition::new(self.latitude, self.longitude)
    }
}

/// A spherical obstacle at its last reported position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovingObstacle {
    pub latitude: f64,
    pub longitude: f64,
    /// Feet MSL.
    pub altitude_msl: f64,
    /// Feet.
    pub sphere_radius: f64,
}

impl MovingObstacle {
    pub const fn gps(&self) -> GpsPosition {
        GpsPosition::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleSet {
    pub stationary_obstacles: Vec<StationaryObstacle>,
    pub moving_obstacles: Vec<MovingObstacle>,
}

impl ObstacleSet {
    pub fn from_json_str(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_empty(&self) -> bool {
        self.stationary_obstacles.is_empty() && self.moving_obstacles.is_empty()
    }
}

/// Reported aircraft positions, oldest first. Serialized as a bare array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Telemetry {
    pub positions: Vec<AerialPosition>,
}

impl Telemetry {
    pub fn from_json_str(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<Vec<AerialPosition>> for Telemetry {
    fn from(positions: Vec<AerialPosition>) -> Self {
        Self { positions }
    }
}

/// Everything a rebuild consumes, bundled for hosts that load it in one go.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneInputs {
    pub mission: Option<MissionConfig>,
    pub obstacles: Option<ObstacleSet>,
    pub telemetry: Option<Telemetry>,
}

impl SceneInputs {
    pub fn from_json_str(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, SceneError> {
        Self::from_json_str(&error::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mission_without_home_parses() {
        let mission = MissionConfig::from_json_str("{}").unwrap();
        assert!(mission.home_pos.is_none());
        assert!(mission.mission_waypoints.is_empty());
        assert_eq!(mission.mission_waypoints_dist_max, 0.0);
    }

    #[test]
    fn test_mission_fields_parse() {
        let json = r#"{
            "home_pos": {"latitude": 38.0, "longitude": -76.0},
            "air_drop_pos": {"latitude": 38.001, "longitude": -76.001},
            "points_of_interest": [{"name": "tower", "latitude": 38.002, "longitude": -76.0}],
            "search_grid_points": [
                {"latitude": 38.0, "longitude": -76.0, "altitude_msl": 0.0}
            ],
            "mission_waypoints": [
                {"latitude": 38.0, "longitude": -76.0, "altitude_msl": 100.0},
                {"latitude": 38.01, "longitude": -76.0, "altitude_msl": 200.0}
            ],
            "mission_waypoints_dist_max": 50.0
        }"#;
        let mission = MissionConfig::from_json_str(json).unwrap();
        assert_eq!(mission.home_pos, Some(GpsPosition::new(38.0, -76.0)));
        assert_eq!(mission.mission_waypoints.len(), 2);
        assert_eq!(mission.mission_waypoints[1].altitude_msl, 200.0);
        assert_eq!(mission.points_of_interest[0].name, "tower");
        assert_eq!(mission.mission_waypoints_dist_max, 50.0);
    }

    #[test]
    fn test_named_points_order() {
        let mission = MissionConfig {
            points_of_interest: vec![PointOfInterest {
                name: "tower".into(),
                position: GpsPosition::new(1.0, 1.0),
            }],
            emergent_last_known_pos: Some(GpsPosition::new(3.0, 3.0)),
            air_drop_pos: Some(GpsPosition::new(2.0, 2.0)),
            ..Default::default()
        };
        let names: Vec<_> = mission
            .named_points()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["tower", "air_drop", "emergent_last_known"]);
    }

    #[test]
    fn test_telemetry_is_bare_array() {
        let json = r#"[{"latitude": 1.0, "longitude": 2.0, "altitude_msl": 3.0}]"#;
        let telemetry = Telemetry::from_json_str(json).unwrap();
        assert_eq!(telemetry.positions, vec![AerialPosition::new(1.0, 2.0, 3.0)]);
    }

    #[test]
    fn test_obstacle_missing_field_is_an_error() {
        let json = r#"{"stationary_obstacles": [{"latitude": 1.0, "longitude": 2.0}]}"#;
        let err = ObstacleSet::from_json_str(json).unwrap_err();
        assert!(matches!(err, SceneError::Json(_)));
    }

    #[test]
    fn test_inputs_from_missing_file() {
        let err = SceneInputs::from_path(Path::new("/nonexistent/inputs.json")).unwrap_err();
        assert!(matches!(err, SceneError::Io { .. }));
    }
}
