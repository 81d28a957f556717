//! Missionview Bevy Plugin: drives the mission scene builder from Bevy's ECS.
//!
//! Provides `MissionViewPlugin` which registers the resources, messages, and
//! systems that rebuild the scene when inputs change and mirror the result
//! into ECS entities for a renderer to draw.

pub mod events;
pub mod resources;
pub mod systems;

use bevy::prelude::*;

// Re-export for downstream crates.
pub use missionview_core::{MarkerKind, Scene, SceneConfig, SceneInputs};

use events::{RebuildSceneCommand, SceneUpdatedEvent};
use resources::{MissionInputs, MissionSceneState, SceneSettings};
use systems::{
    detect_scene_changes, handle_rebuild_commands, request_rebuild_on_input_change,
    sync_scene_entities,
};

/// Main Bevy plugin for mission scene building.
///
/// Registers resources, messages, and systems for:
/// - Holding mission, obstacle, and telemetry inputs as a Bevy resource
/// - Rebuilding the scene when inputs change or a rebuild is requested
/// - Spawning one entity per scene node after each rebuild
pub struct MissionViewPlugin;

impl Plugin for MissionViewPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<RebuildSceneCommand>()
            .add_message::<SceneUpdatedEvent>()
            .init_resource::<SceneSettings>()
            .init_resource::<MissionInputs>()
            .init_resource::<MissionSceneState>()
            .add_systems(
                Update,
                (
                    request_rebuild_on_input_change,
                    handle_rebuild_commands.after(request_rebuild_on_input_change),
                    sync_scene_entities.after(handle_rebuild_commands),
                    detect_scene_changes,
                ),
            );
        tracing::info!("mission view plugin registered");
    }
}
