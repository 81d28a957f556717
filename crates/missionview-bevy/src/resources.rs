//! Bevy resources for the scene pipeline.

use bevy::prelude::*;
use missionview_core::{
    MissionConfig, MissionSceneBuilder, ObstacleSet, SceneConfig, SceneInputs, Telemetry,
};

/// Appearance settings used when the scene builder is created.
#[derive(Resource, Clone, Debug)]
pub struct SceneSettings {
    pub config: SceneConfig,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            config: SceneConfig::default().with_env_overrides(),
        }
    }
}

/// Mission, obstacle, and telemetry inputs for the next rebuild.
///
/// Any mutable access marks the resource changed and triggers a rebuild.
#[derive(Resource, Clone, Debug, Default)]
pub struct MissionInputs {
    pub mission: Option<MissionConfig>,
    pub obstacles: Option<ObstacleSet>,
    pub telemetry: Option<Telemetry>,
}

impl From<SceneInputs> for MissionInputs {
    fn from(inputs: SceneInputs) -> Self {
        Self {
            mission: inputs.mission,
            obstacles: inputs.obstacles,
            telemetry: inputs.telemetry,
        }
    }
}

/// Owns the scene builder and, through it, the current scene.
#[derive(Resource, Debug)]
pub struct MissionSceneState {
    pub builder: MissionSceneBuilder,
}

impl FromWorld for MissionSceneState {
    fn from_world(world: &mut World) -> Self {
        let config = world
            .get_resource::<SceneSettings>()
            .map(|settings| settings.config.clone())
            .unwrap_or_default();
        if let Err(e) = config.validate() {
            tracing::warn!("Invalid scene settings, using defaults: {e}");
            return Self {
                builder: MissionSceneBuilder::default(),
            };
        }
        Self {
            builder: MissionSceneBuilder::new(config),
        }
    }
}
