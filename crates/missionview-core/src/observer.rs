//! "Scene updated" notification.
//!
//! Observers register with the builder and are called synchronously, once per
//! rebuild, after the builder's scene has been replaced.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use parking_lot::RwLock;

use crate::scene::Scene;

/// Fired after every rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneUpdated {
    /// Generation of the scene that was just installed.
    pub generation: u64,
}

/// Receives scene-updated notifications.
pub trait SceneObserver: Send + Sync {
    fn scene_updated(&mut self, event: &SceneUpdated, scene: &Arc<Scene>);
}

impl<F> SceneObserver for F
where
    F: FnMut(&SceneUpdated, &Arc<Scene>) + Send + Sync,
{
    fn scene_updated(&mut self, event: &SceneUpdated, scene: &Arc<Scene>) {
        self(event, scene)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub(crate) struct ObserverRegistry {
    next_id: u64,
    observers: Vec<(SubscriptionId, Box<dyn SceneObserver>)>,
}

impl ObserverRegistry {
    pub(crate) fn subscribe(&mut self, observer: Box<dyn SceneObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }

    pub(crate) fn notify(&mut self, event: &SceneUpdated, scene: &Arc<Scene>) {
        for (_, observer) in &mut self.observers {
            observer.scene_updated(event, scene);
        }
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Forwards events over an mpsc channel for hosts that poll.
#[derive(Debug)]
pub struct ChannelObserver {
    sender: Sender<SceneUpdated>,
}

impl ChannelObserver {
    pub fn new() -> (Self, Receiver<SceneUpdated>) {
        let (sender, receiver) = mpsc::channel();
        (Self { sender }, receiver)
    }
}

impl SceneObserver for ChannelObserver {
    fn scene_updated(&mut self, event: &SceneUpdated, _scene: &Arc<Scene>) {
        if self.sender.send(*event).is_err() {
            tracing::debug!(generation = event.generation, "scene update receiver dropped");
        }
    }
}

/// Latest scene, readable from another thread (e.g. a render loop).
///
/// Clones share the same slot. Subscribe one clone to the builder and hand
/// the others to readers.
#[derive(Debug, Clone, Default)]
pub struct SharedScene {
    slot: Arc<RwLock<Option<Arc<Scene>>>>,
}

impl SharedScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<Arc<Scene>> {
        self.slot.read().clone()
    }

    pub fn generation(&self) -> Option<u64> {
        self.slot.read().as_ref().map(|scene| scene.generation())
    }
}

impl SceneObserver for SharedScene {
    fn scene_updated(&mut self, _event: &SceneUpdated, scene: &Arc<Scene>) {
        *self.slot.write() = Some(Arc::clone(scene));
    }
}
