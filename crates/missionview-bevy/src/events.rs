//! Bevy messages for cross-system communication in the scene pipeline.

use bevy::prelude::*;

/// Asks for a rebuild from the current `MissionInputs`.
///
/// Written automatically when `MissionInputs` changes; hosts may also write it
/// to force a rebuild. Several commands in one frame collapse into one rebuild.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct RebuildSceneCommand;

/// Fired once per rebuild, after `MissionSceneState` holds the new scene.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneUpdatedEvent {
    /// Generation of the newly installed scene.
    pub generation: u64,
    /// Number of markers in the new scene.
    pub markers: usize,
}
