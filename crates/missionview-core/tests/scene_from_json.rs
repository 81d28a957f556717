use std::sync::Arc;

use missionview_core::{
    ChannelObserver, LineKind, MarkerKind, MissionSceneBuilder, SceneConfig, SceneInputs,
    SharedScene,
};

const INPUTS: &str = r#"{
    "mission": {
        "home_pos": {"latitude": 38.14792, "longitude": -76.427995},
        "air_drop_pos": {"latitude": 38.145823, "longitude": -76.422396},
        "off_axis_odlc_pos": {"latitude": 38.142544, "longitude": -76.434088},
        "emergent_last_known_pos": {"latitude": 38.145823, "longitude": -76.422396},
        "search_grid_points": [
            {"latitude": 38.142544, "longitude": -76.434088, "altitude_msl": 0.0},
            {"latitude": 38.141833, "longitude": -76.425263, "altitude_msl": 0.0},
            {"latitude": 38.144678, "longitude": -76.427995, "altitude_msl": 0.0},
            {"latitude": 38.147, "longitude": -76.43, "altitude_msl": 0.0},
            {"latitude": 38.146, "longitude": -76.433, "altitude_msl": 0.0}
        ],
        "mission_waypoints": [
            {"latitude": 38.146269, "longitude": -76.428164, "altitude_msl": 200.0},
            {"latitude": 38.143701, "longitude": -76.43067, "altitude_msl": 300.0},
            {"latitude": 38.14, "longitude": -76.429, "altitude_msl": 250.0}
        ],
        "mission_waypoints_dist_max": 100.0
    },
    "obstacles": {
        "stationary_obstacles": [
            {"latitude": 38.14792, "longitude": -76.427995, "cylinder_radius": 150.0, "cylinder_height": 200.0},
            {"latitude": 38.14, "longitude": -76.43, "cylinder_radius": 50.0, "cylinder_height": 400.0}
        ],
        "moving_obstacles": [
            {"latitude": 38.141826, "longitude": -76.425245, "altitude_msl": 185.0, "sphere_radius": 50.0}
        ]
    },
    "telemetry": [
        {"latitude": 38.1479, "longitude": -76.4279, "altitude_msl": 50.0},
        {"latitude": 38.1475, "longitude": -76.4282, "altitude_msl": 80.0},
        {"latitude": 38.147, "longitude": -76.4285, "altitude_msl": 120.0}
    ]
}"#;

fn load_inputs() -> SceneInputs {
    SceneInputs::from_json_str(INPUTS).expect("fixture should parse")
}

#[test]
fn full_mission_renders_every_element() {
    let mut builder = MissionSceneBuilder::default();
    builder.rebuild_from(&load_inputs());

    let stats = builder.scene().stats();
    assert_eq!(stats.home, 1);
    assert_eq!(stats.points_of_interest, 3);
    assert_eq!(stats.search_grid_points, 5);
    assert_eq!(stats.search_grid_segments, 5);
    assert_eq!(stats.waypoints, 3);
    assert_eq!(stats.waypoint_segments, 2);
    assert_eq!(stats.stationary_obstacles, 2);
    assert_eq!(stats.moving_obstacles, 1);
    assert_eq!(stats.telemetry, 3);
    assert_eq!(stats.markers(), 18);
}

#[test]
fn obstacle_on_home_sits_at_origin() {
    let mut builder = MissionSceneBuilder::default();
    builder.rebuild_from(&load_inputs());

    let on_home = builder
        .scene()
        .markers()
        .iter()
        .find(|m| m.kind == MarkerKind::StationaryObstacle)
        .expect("stationary obstacle");
    let t = on_home.transform.translation;
    assert!(t.x.abs() < 1e-3 && t.z.abs() < 1e-3, "got {t}");
    assert!((t.y - 100.0).abs() < 1e-3);
}

#[test]
fn southwest_points_have_negative_east_and_positive_z() {
    let mut builder = MissionSceneBuilder::default();
    builder.rebuild_from(&load_inputs());

    let off_axis = builder
        .scene()
        .markers()
        .iter()
        .find(|m| m.kind == MarkerKind::PointOfInterest("off_axis_odlc".into()))
        .expect("off-axis marker");
    // South-west of home: west is -X, south is +Z.
    assert!(off_axis.transform.translation.x < 0.0);
    assert!(off_axis.transform.translation.z > 0.0);
}

#[test]
fn bounds_cover_all_markers() {
    let mut builder = MissionSceneBuilder::default();
    builder.rebuild_from(&load_inputs());

    let scene = builder.scene();
    let bounds = scene.bounds().expect("non-empty scene has bounds");
    for marker in scene.markers() {
        let p = marker.transform.translation;
        assert!(p.cmpge(bounds.min).all() && p.cmple(bounds.max).all());
    }
    assert!((bounds.max.y - 300.0).abs() < 1e-3);
    assert_eq!(bounds.min.y, 0.0);
}

#[test]
fn home_removed_degrades_to_ground_and_lights() {
    let mut inputs = load_inputs();
    if let Some(mission) = inputs.mission.as_mut() {
        mission.home_pos = None;
    }
    let mut builder = MissionSceneBuilder::default();
    builder.rebuild_from(&inputs);

    let scene = builder.scene();
    assert!(scene.markers().is_empty());
    assert!(scene.lines().is_empty());
    assert_eq!(scene.lights().len(), 2);
}

#[test]
fn observers_and_shared_handle_see_each_rebuild() {
    let mut builder = MissionSceneBuilder::new(SceneConfig::default());
    let shared = SharedScene::new();
    let (channel, rx) = ChannelObserver::new();
    builder.subscribe(shared.clone());
    let id = builder.subscribe(channel);
    assert_eq!(builder.observer_count(), 2);

    let inputs = load_inputs();
    builder.rebuild_from(&inputs);
    builder.rebuild_from(&inputs);

    assert_eq!(rx.try_iter().count(), 2);
    let latest = shared.latest().expect("scene published");
    assert!(Arc::ptr_eq(&latest, &builder.scene_handle()));

    assert!(builder.unsubscribe(id));
    builder.rebuild_from(&inputs);
    assert_eq!(rx.try_iter().count(), 0);
    assert_eq!(shared.generation(), Some(3));
}

#[test]
fn line_bytes_match_segment_count() {
    let mut builder = MissionSceneBuilder::default();
    builder.rebuild_from(&load_inputs());

    let grid = builder
        .scene()
        .line_set(LineKind::SearchGrid)
        .expect("search grid lines");
    assert_eq!(grid.vertex_bytes().len(), grid.segment_count() * 2 * 12);
}

#[test]
fn config_round_trips_through_file() {
    let path = std::env::temp_dir().join(format!("missionview-config-{}.json", std::process::id()));
    let config = SceneConfig {
        marker_scale: 6.0,
        ..Default::default()
    };
    std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();

    let loaded = SceneConfig::from_path(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(loaded, config);
}
