use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Region-local position, rendered as `{"X", "Y", "Z"}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Live view of where the agent is and who is around it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresenceState {
    pub region: String,
    pub position: Vector3,
    #[serde(default)]
    pub nearby: BTreeMap<Uuid, Vector3>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    pub id: Uuid,
    pub local_id: u32,
    pub name: String,
    #[serde(default)]
    pub group_name: String,
    pub position: Vector3,
    #[serde(default)]
    pub scale: Vector3,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapBlock {
    pub name: String,
    pub access: u8,
    pub x: u16,
    pub y: u16,
    pub region_flags: u32,
}

impl MapBlock {
    /// Handle of the region whose south-west corner sits at this block's
    /// grid coordinates, in global metres.
    pub fn region_handle(&self) -> u64 {
        let global_x = u64::from(self.x) * 256;
        let global_y = u64::from(self.y) * 256;
        (global_x << 32) | global_y
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapItem {
    pub id: Uuid,
    pub name: String,
    pub x: u32,
    pub y: u32,
    pub extra: i32,
    pub extra2: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TerrainPatch {
    pub region: String,
    pub water_level: f32,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    /// Height samples, row-major, `width * width` entries.
    pub data: Vec<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeleportStatus {
    None,
    Start,
    Progress,
    Failed,
    Finished,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisconnectReason {
    ClientInitiated,
    ServerInitiated,
    SimShutdown,
    NetworkTimeout,
}
