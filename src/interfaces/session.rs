use uuid::Uuid;

use crate::domains::inventory::InventoryNode;
use crate::domains::world::PresenceState;

/// Read side of the remote session that producers consult while building
/// envelopes.
///
/// Both calls happen on the notification and poll paths, so implementations
/// must answer from local state without blocking on the network.
pub trait SessionView: Send + Sync {
    /// Current region, own position and last-known nearby positions.
    fn presence(&self) -> PresenceState;

    /// Children of `folder_id` from the local inventory cache. Unknown
    /// folders yield an empty list.
    fn folder_contents(&self, folder_id: Uuid) -> Vec<InventoryNode>;
}
