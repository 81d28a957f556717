//! Bevy systems for the scene pipeline.
//!
//! `MissionInputs` changes turn into `RebuildSceneCommand`s, the builder runs
//! once per frame at most, and the resulting scene is mirrored into entities
//! tagged with `SceneEntity` so the previous scene can be despawned wholesale.

use bevy::prelude::*;

use missionview_core::scene::{LineKind, NodeTransform};
use missionview_core::{MarkerKind, Scene};

use crate::events::{RebuildSceneCommand, SceneUpdatedEvent};
use crate::resources::{MissionInputs, MissionSceneState};

/// Tags every entity spawned from the current scene.
#[derive(Component, Debug, Clone, Copy)]
pub struct SceneEntity {
    /// Generation of the scene this entity was spawned from.
    pub generation: u64,
}

/// A marker mesh: shared geometry and material are referenced by name.
#[derive(Component, Debug, Clone)]
pub struct SceneMarker {
    pub kind: MarkerKind,
    pub geometry: &'static str,
    pub material: &'static str,
    /// Linear RGBA.
    pub color: [f32; 4],
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

/// A connecting line set, as a line-list vertex buffer.
#[derive(Component, Debug, Clone)]
pub struct SceneLine {
    pub kind: LineKind,
    pub vertices: Vec<[f32; 3]>,
    /// Linear RGBA.
    pub color: [f32; 4],
}

/// The ground plane.
#[derive(Component, Debug, Clone, Copy)]
pub struct SceneGround;

/// Mark a rebuild whenever the inputs change, including on first insert.
pub fn request_rebuild_on_input_change(
    inputs: Res<MissionInputs>,
    mut rebuild: MessageWriter<RebuildSceneCommand>,
) {
    if inputs.is_changed() {
        rebuild.write(RebuildSceneCommand);
    }
}

/// Rebuild the scene once if any rebuild was requested this frame.
pub fn handle_rebuild_commands(
    mut commands: MessageReader<RebuildSceneCommand>,
    inputs: Res<MissionInputs>,
    mut state: ResMut<MissionSceneState>,
    mut updated: MessageWriter<SceneUpdatedEvent>,
) {
    // Drain everything; several requests in a frame collapse into one rebuild.
    if commands.read().count() == 0 {
        return;
    }

    state.builder.rebuild_scene(
        inputs.mission.as_ref(),
        inputs.obstacles.as_ref(),
        inputs.telemetry.as_ref(),
    );

    let scene = state.builder.scene();
    updated.write(SceneUpdatedEvent {
        generation: scene.generation(),
        markers: scene.markers().len(),
    });
}

/// Replace the spawned scene entities after a rebuild.
pub fn sync_scene_entities(
    mut commands: Commands,
    mut updated: MessageReader<SceneUpdatedEvent>,
    state: Res<MissionSceneState>,
    existing: Query<Entity, With<SceneEntity>>,
) {
    if updated.read().last().is_none() {
        return;
    }

    for entity in &existing {
        commands.entity(entity).despawn();
    }
    spawn_scene(&mut commands, state.builder.scene());
}

/// Diagnostic system that logs when the scene state is changed.
pub fn detect_scene_changes(state: Res<MissionSceneState>) {
    if state.is_changed() && !state.is_added() {
        tracing::debug!(
            "MissionSceneState changed, generation={}",
            state.builder.generation()
        );
    }
}

fn spawn_scene(commands: &mut Commands, scene: &Scene) {
    let tag = SceneEntity {
        generation: scene.generation(),
    };

    let ground = scene.ground();
    commands.spawn((tag, SceneGround, to_transform(&ground.transform)));

    for marker in scene.markers() {
        commands.spawn((
            tag,
            SceneMarker {
                kind: marker.kind.clone(),
                geometry: marker.geometry.name,
                material: marker.material.name,
                color: marker.material.linear_rgba(),
                cast_shadow: marker.cast_shadow,
                receive_shadow: marker.receive_shadow,
            },
            to_transform(&marker.transform),
        ));
    }

    for lines in scene.lines() {
        commands.spawn((
            tag,
            SceneLine {
                kind: lines.kind,
                vertices: lines.vertices().to_vec(),
                color: lines.material.linear_rgba(),
            },
            Transform::IDENTITY,
        ));
    }

    tracing::debug!(
        generation = scene.generation(),
        markers = scene.markers().len(),
        lines = scene.lines().len(),
        "spawned scene entities"
    );
}

/// Convert through arrays so the core crate's glam version need not match Bevy's.
fn to_transform(node: &NodeTransform) -> Transform {
    Transform {
        translation: Vec3::from_array(node.translation.to_array()),
        rotation: Quat::from_array(node.rotation.to_array()),
        scale: Vec3::from_array(node.scale.to_array()),
    }
}
