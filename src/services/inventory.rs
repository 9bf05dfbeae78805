use std::collections::HashSet;

use parking_lot::Mutex;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::domains::envelope::{Envelope, EnvelopeBuilder};
use crate::domains::inventory::{InventoryFolder, InventoryItem, InventoryNode};

pub const FOLDER_UPDATED: &str = "FolderUpdated";

/// Identifiers of inventory entries a subscriber has already been sent.
#[derive(Default)]
pub struct InventoryMemo {
    seen: Mutex<HashSet<Uuid>>,
}

impl InventoryMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `id` and reports whether it was unseen until now.
    pub fn claim(&self, id: Uuid) -> bool {
        self.seen.lock().insert(id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.seen.lock().contains(&id)
    }

    pub fn len(&self) -> usize {
        self.seen.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn reset(&self) {
        self.seen.lock().clear();
    }
}

/// Builds the `FolderUpdated` envelope for a folder, listing only children the
/// memo has not seen before.
pub fn folder_snapshot(folder_id: Uuid, contents: &[InventoryNode], memo: &InventoryMemo) -> Envelope {
    let fresh: Vec<Value> = contents
        .iter()
        .filter(|node| memo.claim(node.uuid()))
        .map(describe_node)
        .collect();
    tracing::debug!(
        %folder_id,
        total = contents.len(),
        fresh = fresh.len(),
        "folder snapshot"
    );
    Envelope::builder(FOLDER_UPDATED)
        .field("FolderID", folder_id)
        .field("Contents", fresh)
        .build()
}

fn describe_node(node: &InventoryNode) -> Value {
    match node {
        InventoryNode::Folder(folder) => describe_folder(folder),
        InventoryNode::Item(item) => {
            let mut record = json!({ "Type": "InventoryItem" });
            if let Value::Object(map) = &mut record {
                map.extend(item_fields(item, false));
            }
            record
        }
    }
}

fn describe_folder(folder: &InventoryFolder) -> Value {
    json!({
        "Type": "InventoryFolder",
        "Name": folder.name,
        "PreferredType": folder.preferred_type,
        "OwnerID": folder.owner_id,
        "UUID": folder.uuid,
    })
}

/// Descriptive fields shared by every envelope that reports an inventory
/// item. `FolderID` is only included when `with_folder` is set.
pub fn item_fields(item: &InventoryItem, with_folder: bool) -> serde_json::Map<String, Value> {
    let mut map = serde_json::Map::new();
    map.insert("Name".to_string(), json!(item.name));
    if with_folder {
        map.insert("FolderID".to_string(), json!(item.parent_uuid));
    }
    map.insert("UUID".to_string(), json!(item.uuid));
    map.insert("AssetType".to_string(), json!(item.asset_type));
    map.insert("AssetUUID".to_string(), json!(item.asset_uuid));
    map.insert("CreatorID".to_string(), json!(item.creator_id));
    map.insert("OwnerID".to_string(), json!(item.owner_id));
    map.insert("CreationDate".to_string(), json!(item.creation_date));
    map.insert("Description".to_string(), json!(item.description));
    map.insert("Flags".to_string(), json!(item.flags));
    map.insert("InventoryType".to_string(), json!(item.inventory_type));
    map.insert("Permissions".to_string(), json!(item.permissions));
    map
}

/// Appends [`item_fields`] to an envelope under construction.
pub fn with_item_fields(builder: EnvelopeBuilder, item: &InventoryItem) -> EnvelopeBuilder {
    item_fields(item, true)
        .into_iter()
        .fold(builder, |builder, (name, value)| builder.field(&name, value))
}
