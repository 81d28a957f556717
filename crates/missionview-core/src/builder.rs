//! The mission scene builder.
//!
//! Holds the shared rendering resources and the current scene. Each call to
//! [`MissionSceneBuilder::rebuild_scene`] composes a fresh scene from the
//! mission, obstacles, and telemetry, installs it, and then notifies
//! observers. Without a mission home position the scene degrades to ground
//! and lights only.

use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;

use glam::{Quat, Vec3};

use crate::config::SceneConfig;
use crate::geo::LocalFrame;
use crate::mission::{MissionConfig, ObstacleSet, SceneInputs, Telemetry};
use crate::observer::{ObserverRegistry, SceneObserver, SceneUpdated, SubscriptionId};
use crate::resources::{Geometry, SceneResources};
use crate::scene::{LineKind, LineSet, Marker, MarkerKind, NodeTransform, Scene};

#[derive(Debug)]
pub struct MissionSceneBuilder {
    config: SceneConfig,
    resources: SceneResources,
    scene: Arc<Scene>,
    generation: u64,
    observers: ObserverRegistry,
}

impl Default for MissionSceneBuilder {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

impl MissionSceneBuilder {
    /// Allocate shared resources and start from a ground-and-lights scene.
    pub fn new(config: SceneConfig) -> Self {
        let resources = SceneResources::new(&config);
        let scene = Arc::new(Scene::minimal(0, &resources));
        Self {
            config,
            resources,
            scene,
            generation: 0,
            observers: ObserverRegistry::default(),
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn resources(&self) -> &SceneResources {
        &self.resources
    }

    /// The most recently built scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Shared handle to the most recently built scene.
    pub fn scene_handle(&self) -> Arc<Scene> {
        Arc::clone(&self.scene)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn subscribe(&mut self, observer: impl SceneObserver + 'static) -> SubscriptionId {
        self.observers.subscribe(Box::new(observer))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Rebuild from a bundled input set.
    pub fn rebuild_from(&mut self, inputs: &SceneInputs) {
        self.rebuild_scene(
            inputs.mission.as_ref(),
            inputs.obstacles.as_ref(),
            inputs.telemetry.as_ref(),
        );
    }

    /// Replace the scene with one built from the given inputs and notify
    /// observers exactly once.
    pub fn rebuild_scene(
        &mut self,
        mission: Option<&MissionConfig>,
        obstacles: Option<&ObstacleSet>,
        telemetry: Option<&Telemetry>,
    ) {
        self.generation += 1;
        let mut scene = Scene::minimal(self.generation, &self.resources);

        match mission {
            Some(mission) => match mission.home_pos {
                Some(home) => {
                    let frame = LocalFrame::new(home);
                    self.add_mission(&mut scene, &frame, mission);
                    if let Some(obstacles) = obstacles {
                        self.add_obstacles(&mut scene, &frame, obstacles);
                    }
                    if let Some(telemetry) = telemetry {
                        self.add_telemetry(&mut scene, &frame, telemetry);
                    }
                }
                None => tracing::warn!("mission has no home position, rendering ground only"),
            },
            None => tracing::debug!("no mission loaded, rendering ground only"),
        }

        let stats = scene.stats();
        tracing::debug!(
            generation = self.generation,
            markers = stats.markers(),
            search_grid_segments = stats.search_grid_segments,
            waypoint_segments = stats.waypoint_segments,
            "scene rebuilt"
        );

        self.scene = Arc::new(scene);
        let event = SceneUpdated {
            generation: self.generation,
        };
        self.observers.notify(&event, &self.scene);
    }

    fn add_mission(&self, scene: &mut Scene, frame: &LocalFrame, mission: &MissionConfig) {
        let marker_scale = Vec3::splat(self.config.marker_scale);

        scene.push_marker(self.marker(
            MarkerKind::Home,
            &self.resources.sphere,
            NodeTransform::from_translation_scale(frame.ground(frame.origin()), marker_scale),
        ));

        for point in mission.named_points() {
            let translation = frame.ground(point.position);
            scene.push_marker(self.marker(
                MarkerKind::PointOfInterest(point.name),
                &self.resources.sphere,
                NodeTransform::from_translation_scale(translation, marker_scale),
            ));
        }

        let grid: Vec<Vec3> = mission
            .search_grid_points
            .iter()
            .map(|p| frame.ground(p.gps()))
            .collect();
        for &translation in &grid {
            scene.push_marker(self.marker(
                MarkerKind::SearchGridPoint,
                &self.resources.sphere,
                NodeTransform::from_translation_scale(translation, marker_scale),
            ));
        }
        if !grid.is_empty() {
            let mut lines = LineSet::new(LineKind::SearchGrid, &self.resources);
            lines.connect(&grid, true);
            scene.push_lines(lines);
        }

        // Waypoints show their acceptance sphere when one is configured.
        let waypoint_scale = if mission.mission_waypoints_dist_max > 0.0 {
            Vec3::splat(mission.mission_waypoints_dist_max as f32)
        } else {
            marker_scale
        };
        let path: Vec<Vec3> = mission
            .mission_waypoints
            .iter()
            .map(|p| frame.aerial(p))
            .collect();
        for &translation in &path {
            scene.push_marker(self.marker(
                MarkerKind::Waypoint,
                &self.resources.sphere,
                NodeTransform::from_translation_scale(translation, waypoint_scale),
            ));
        }
        if !path.is_empty() {
            let mut lines = LineSet::new(LineKind::WaypointPath, &self.resources);
            lines.connect(&path, false);
            scene.push_lines(lines);
        }
    }

    fn add_obstacles(&self, scene: &mut Scene, frame: &LocalFrame, obstacles: &ObstacleSet) {
        // The unit cylinder's axis is local Z; tip it onto +Y.
        let upright = Quat::from_rotation_x(-FRAC_PI_2);
        for obstacle in &obstacles.stationary_obstacles {
            let height = obstacle.cylinder_height;
            let radius = obstacle.cylinder_radius as f32;
            // Centered geometry: lift by half the height so the base sits on the ground.
            let translation = frame.to_render(obstacle.gps(), height / 2.0);
            let transform = NodeTransform::from_translation_scale(
                translation,
                Vec3::new(radius, radius, height as f32),
            )
            .with_rotation(upright);
            scene.push_marker(self.marker(
                MarkerKind::StationaryObstacle,
                &self.resources.cylinder,
                transform,
            ));
        }

        for obstacle in &obstacles.moving_obstacles {
            let translation = frame.to_render(obstacle.gps(), obstacle.altitude_msl);
            scene.push_marker(self.marker(
                MarkerKind::MovingObstacle,
                &self.resources.sphere,
                NodeTransform::from_translation_scale(
                    translation,
                    Vec3::splat(obstacle.sphere_radius as f32),
                ),
            ));
        }
    }

    fn add_telemetry(&self, scene: &mut Scene, frame: &LocalFrame, telemetry: &Telemetry) {
        let scale = Vec3::splat(self.config.marker_scale);
        for position in &telemetry.positions {
            scene.push_marker(self.marker(
                MarkerKind::Telemetry,
                &self.resources.sphere,
                NodeTransform::from_translation_scale(frame.aerial(position), scale),
            ));
        }
    }

    fn marker(
        &self,
        kind: MarkerKind,
        geometry: &Arc<Geometry>,
        transform: NodeTransform,
    ) -> Marker {
        tracing::trace!(kind = kind.label(), position = %transform.translation, "placing marker");
        let material = Arc::clone(self.resources.materials.for_marker(&kind));
        Marker {
            kind,
            geometry: Arc::clone(geometry),
            material,
            transform,
            cast_shadow: self.config.shadows,
            receive_shadow: self.config.shadows,
        }
    }
}
