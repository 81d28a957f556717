//! Missionview Core: domain layer for mission scene building.
//!
//! Converts GPS-referenced mission, obstacle, and telemetry data into a
//! renderer-agnostic scene graph measured in feet from the mission home
//! position. No GPU or framework dependencies.

pub mod builder;
pub mod config;
pub mod error;
pub mod geo;
pub mod mission;
pub mod observer;
pub mod resources;
pub mod scene;
pub mod units;

// Re-exports for convenience.
pub use builder::MissionSceneBuilder;
pub use config::{SceneColors, SceneConfig};
pub use error::SceneError;
pub use geo::{AerialPosition, GpsPosition, LocalFrame};
pub use mission::{
    MissionConfig, MovingObstacle, ObstacleSet, PointOfInterest, SceneInputs, StationaryObstacle,
    Telemetry,
};
pub use observer::{ChannelObserver, SceneObserver, SceneUpdated, SharedScene, SubscriptionId};
pub use resources::SceneResources;
pub use scene::{Aabb, LineKind, LineSet, Marker, MarkerKind, NodeTransform, Scene, SceneStats};
