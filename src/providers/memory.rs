use std::collections::HashMap;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::domains::inventory::InventoryNode;
use crate::domains::notification::Notification;
use crate::domains::world::{PresenceState, Vector3};
use crate::interfaces::session::SessionView;

/// Session state mirrored in memory from whatever drives the real session.
#[derive(Default)]
pub struct InMemorySession {
    presence: RwLock<PresenceState>,
    folders: RwLock<HashMap<Uuid, Vec<InventoryNode>>>,
}

impl InMemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_presence(presence: PresenceState) -> Self {
        Self {
            presence: RwLock::new(presence),
            folders: RwLock::new(HashMap::new()),
        }
    }

    pub fn set_presence(&self, presence: PresenceState) {
        *self.presence.write() = presence;
    }

    pub fn move_to(&self, region: &str, position: Vector3) {
        let mut guard = self.presence.write();
        if guard.region != region {
            guard.nearby.clear();
            guard.region = region.to_string();
        }
        guard.position = position;
    }

    pub fn track(&self, id: Uuid, position: Vector3) {
        self.presence.write().nearby.insert(id, position);
    }

    pub fn forget(&self, id: Uuid) {
        self.presence.write().nearby.remove(&id);
    }

    pub fn cache_folder(&self, folder_id: Uuid, contents: Vec<InventoryNode>) {
        self.folders.write().insert(folder_id, contents);
    }

    /// Keeps nearby positions current from avatar notifications.
    pub fn observe(&self, notification: &Notification) {
        match notification {
            Notification::AvatarAdded(avatar) | Notification::AvatarUpdated(avatar) => {
                self.track(avatar.id, avatar.position)
            }
            Notification::AvatarRemoved(avatar) => self.forget(avatar.id),
            _ => {}
        }
    }
}

impl SessionView for InMemorySession {
    fn presence(&self) -> PresenceState {
        self.presence.read().clone()
    }

    fn folder_contents(&self, folder_id: Uuid) -> Vec<InventoryNode> {
        self.folders
            .read()
            .get(&folder_id)
            .cloned()
            .unwrap_or_default()
    }
}
