use bevy::ecs::message::Messages;
use bevy::prelude::*;

use missionview_bevy::MissionViewPlugin;
use missionview_bevy::events::{RebuildSceneCommand, SceneUpdatedEvent};
use missionview_bevy::resources::{MissionInputs, MissionSceneState};
use missionview_bevy::systems::{SceneEntity, SceneGround, SceneLine, SceneMarker};
use missionview_core::{
    AerialPosition, GpsPosition, MarkerKind, MissionConfig, ObstacleSet, StationaryObstacle,
    Telemetry,
};

const HOME: GpsPosition = GpsPosition::new(38.145_103, -76.427_856);

fn mission() -> MissionConfig {
    MissionConfig {
        home_pos: Some(HOME),
        search_grid_points: vec![
            AerialPosition::new(38.146, -76.428, 0.0),
            AerialPosition::new(38.146, -76.426, 0.0),
            AerialPosition::new(38.144, -76.427, 0.0),
        ],
        mission_waypoints: vec![
            AerialPosition::new(38.1455, -76.4275, 200.0),
            AerialPosition::new(38.1460, -76.4270, 250.0),
        ],
        ..Default::default()
    }
}

fn app() -> App {
    let mut app = App::new();
    app.add_plugins(MissionViewPlugin);
    app
}

fn count<C: Component>(app: &mut App) -> usize {
    let mut query = app.world_mut().query_filtered::<Entity, With<C>>();
    query.iter(app.world()).count()
}

fn generation(app: &App) -> u64 {
    app.world().resource::<MissionSceneState>().builder.generation()
}

#[test]
fn first_update_builds_ground_only_scene() {
    let mut app = app();
    app.update();

    assert_eq!(generation(&app), 1);
    assert_eq!(count::<SceneGround>(&mut app), 1);
    assert_eq!(count::<SceneMarker>(&mut app), 0);
    assert_eq!(count::<SceneLine>(&mut app), 0);
}

#[test]
fn setting_inputs_rebuilds_and_spawns_markers() {
    let mut app = app();
    app.update();

    app.insert_resource(MissionInputs {
        mission: Some(mission()),
        obstacles: Some(ObstacleSet {
            stationary_obstacles: vec![StationaryObstacle {
                latitude: 38.1457,
                longitude: -76.4273,
                cylinder_radius: 50.0,
                cylinder_height: 300.0,
            }],
            moving_obstacles: Vec::new(),
        }),
        telemetry: Some(Telemetry::from(vec![AerialPosition::new(
            38.1451, -76.4278, 100.0,
        )])),
    });
    app.update();

    assert_eq!(generation(&app), 2);
    // home + 3 grid + 2 waypoints + 1 obstacle + 1 telemetry
    assert_eq!(count::<SceneMarker>(&mut app), 8);
    assert_eq!(count::<SceneLine>(&mut app), 2);
    assert_eq!(count::<SceneGround>(&mut app), 1);

    let mut query = app.world_mut().query::<(&SceneMarker, &Transform)>();
    let (_, cylinder) = query
        .iter(app.world())
        .find(|(m, _)| m.kind == MarkerKind::StationaryObstacle)
        .expect("obstacle entity");
    assert!((cylinder.translation.y - 150.0).abs() < 1e-3);
}

#[test]
fn rebuild_replaces_previous_entities() {
    let mut app = app();
    app.insert_resource(MissionInputs {
        mission: Some(mission()),
        ..Default::default()
    });
    app.update();
    let before = count::<SceneEntity>(&mut app);

    app.world_mut().write_message(RebuildSceneCommand);
    app.update();

    assert_eq!(generation(&app), 2);
    assert_eq!(count::<SceneEntity>(&mut app), before);
    let mut query = app.world_mut().query::<&SceneEntity>();
    assert!(query.iter(app.world()).all(|tag| tag.generation == 2));
}

#[test]
fn unchanged_inputs_do_not_rebuild() {
    let mut app = app();
    app.update();
    app.update();
    app.update();
    assert_eq!(generation(&app), 1);
}

#[test]
fn one_update_event_per_rebuild() {
    let mut app = app();
    app.world_mut().write_message(RebuildSceneCommand);
    app.world_mut().write_message(RebuildSceneCommand);
    app.update();

    let messages = app.world().resource::<Messages<SceneUpdatedEvent>>();
    let events: Vec<_> = messages.iter_current_update_messages().copied().collect();
    assert_eq!(
        events,
        [SceneUpdatedEvent {
            generation: 1,
            markers: 0
        }]
    );
}
