use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Permissions {
    pub base_mask: u32,
    pub everyone_mask: u32,
    pub group_mask: u32,
    pub next_owner_mask: u32,
    pub owner_mask: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryFolder {
    pub uuid: Uuid,
    pub parent_uuid: Uuid,
    pub name: String,
    pub preferred_type: i8,
    pub owner_id: Uuid,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub uuid: Uuid,
    pub parent_uuid: Uuid,
    pub name: String,
    pub asset_type: i8,
    pub asset_uuid: Uuid,
    pub creator_id: Uuid,
    pub owner_id: Uuid,
    /// Unix seconds.
    pub creation_date: i64,
    #[serde(default)]
    pub description: String,
    pub flags: u32,
    pub inventory_type: i8,
    #[serde(default)]
    pub permissions: Permissions,
}

/// One child of a cached inventory folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InventoryNode {
    Folder(InventoryFolder),
    Item(InventoryItem),
}

impl InventoryNode {
    pub fn uuid(&self) -> Uuid {
        match self {
            InventoryNode::Folder(folder) => folder.uuid,
            InventoryNode::Item(item) => item.uuid,
        }
    }
}

/// Asset type codes the asset-received normalizer distinguishes.
pub mod asset_type {
    pub const NOTECARD: i8 = 7;
    pub const LSL_TEXT: i8 = 10;
    pub const BODYPART: i8 = 13;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetTransfer {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub asset_type: i8,
    pub success: bool,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssetPayload {
    /// Notecard or script source.
    Text { text: String },
    Bodypart(Bodypart),
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bodypart {
    pub creator: Uuid,
    pub owner: Uuid,
    pub description: String,
    /// Texture slot index (decimal) to texture id.
    #[serde(default)]
    pub textures: BTreeMap<String, Uuid>,
    /// Visual parameter id (decimal) to weight.
    #[serde(default)]
    pub params: BTreeMap<String, f32>,
    #[serde(default)]
    pub permissions: Permissions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetReceipt {
    pub inventory_id: Uuid,
    pub transfer: Option<AssetTransfer>,
    pub asset: Option<AssetPayload>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetUpload {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub transfer_id: u64,
    pub success: bool,
}
