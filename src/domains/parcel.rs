use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domains::world::Vector3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParcelResult {
    NoData,
    Single,
    Multiple,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParcelStatus {
    #[default]
    None,
    Leased,
    LeasePending,
    Abandoned,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParcelAccessEntry {
    #[serde(rename = "AgentID")]
    pub agent_id: Uuid,
    pub time: i64,
    pub flags: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParcelMedia {
    pub auto_scale: bool,
    pub desc: String,
    pub height: i32,
    pub media_id: Uuid,
    pub looped: bool,
    pub media_type: String,
    pub url: String,
    pub width: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
    pub local_id: i32,
    pub aabb_max: Vector3,
    pub aabb_min: Vector3,
    #[serde(default)]
    pub access_list: Vec<ParcelAccessEntry>,
    #[serde(default)]
    pub ban_list: Vec<ParcelAccessEntry>,
    pub area: i32,
    pub auction_id: u32,
    pub auth_buyer_id: Uuid,
    pub category: u8,
    pub claim_date: i64,
    pub claim_price: i32,
    pub desc: String,
    pub dwell: f32,
    pub flags: u32,
    pub group_id: Uuid,
    pub group_prims: i32,
    pub is_group_owned: bool,
    pub landing_type: u8,
    pub max_prims: i32,
    #[serde(default)]
    pub media: ParcelMedia,
    pub music_url: String,
    pub name: String,
    pub obscure_media: bool,
    pub obscure_music: bool,
    pub other_clean_time: i32,
    pub other_prims: i32,
    pub owner_prims: i32,
    pub owner_id: Uuid,
    pub prim_bonus: f32,
    pub pass_hours: f32,
    pub pass_price: i32,
    pub public_count: i32,
    pub region_deny_age_unverified: bool,
    pub region_deny_anonymous: bool,
    pub region_push_override: bool,
    pub rent_price: i32,
    pub sale_price: i32,
    pub self_count: i32,
    pub sim_wide_max_prims: i32,
    pub sim_wide_total_prims: i32,
    pub snapshot_id: Uuid,
    #[serde(default)]
    pub status: ParcelStatus,
    pub total_prims: i32,
    pub user_location: Vector3,
    pub user_look_at: Vector3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParcelReply {
    pub result: ParcelResult,
    pub sequence_id: i32,
    pub selected_prims: i32,
    #[serde(default)]
    pub snap_selection: bool,
    pub parcel: Parcel,
}
