use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domains::world::Vector3;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub message: String,
    pub audible: i8,
    pub chat_type: u8,
    pub source_type: u8,
    pub from_name: String,
    pub id: Uuid,
    pub owner_id: Uuid,
    pub position: Vector3,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstantMessage {
    pub from_agent_id: Uuid,
    pub from_agent_name: String,
    pub region_id: Uuid,
    pub position: Vector3,
    pub dialog: u8,
    pub group_im: bool,
    pub im_session_id: Uuid,
    /// Unix seconds.
    pub timestamp: i64,
    pub message: String,
    pub offline: u8,
    #[serde(default, with = "crate::domains::base64_bytes")]
    pub binary_bucket: Vec<u8>,
    pub parent_estate_id: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectOffer {
    pub from_agent_id: Uuid,
    pub from_agent_name: String,
    pub region_id: Uuid,
    pub position: Vector3,
    pub timestamp: i64,
    pub asset_type: i8,
    pub object_id: Uuid,
    pub from_task: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FriendInfo {
    pub id: Uuid,
    pub name: String,
    pub their_rights: u32,
    pub my_rights: u32,
    pub online: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvatarGroup {
    pub group_id: Uuid,
    pub group_name: String,
    pub group_title: String,
    pub group_powers: u64,
    pub accept_notices: bool,
    pub group_insignia_id: Uuid,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvatarInterests {
    pub want_to_mask: u32,
    pub want_to_text: String,
    pub skills_mask: u32,
    pub skills_text: String,
    pub languages_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvatarProfile {
    pub avatar_id: Uuid,
    pub partner_id: Uuid,
    pub about_text: String,
    pub first_life_text: String,
    pub first_life_image: Uuid,
    pub profile_image: Uuid,
    pub profile_url: String,
    pub born_on: String,
    pub charter_member: String,
    /// Packed profile flags as sent on the wire.
    pub flags: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentSearchResult {
    pub agent_id: Uuid,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupSearchResult {
    pub group_id: Uuid,
    pub name: String,
    pub members: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub charter: String,
    pub founder_id: Uuid,
    pub insignia_id: Uuid,
    pub member_count: i32,
    pub owner_role: Uuid,
    pub member_title: String,
    pub money: i32,
    pub membership_fee: i32,
    pub open_enrollment: bool,
    pub show_in_list: bool,
    pub accept_notices: bool,
    pub contribution: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupMember {
    pub id: Uuid,
    pub contribution: i32,
    pub is_owner: bool,
    pub online_status: String,
    pub powers: u64,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptDialog {
    pub message: String,
    pub object_name: String,
    pub image_id: Uuid,
    pub object_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub chat_channel: i32,
    #[serde(default)]
    pub buttons: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptQuestion {
    pub task_id: Uuid,
    pub item_id: Uuid,
    pub object_name: String,
    pub object_owner: String,
    /// Packed permission request bits.
    pub permissions: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoneyBalanceReply {
    pub transaction_id: Uuid,
    pub transaction_success: bool,
    pub balance: i32,
    pub meters_credit: i32,
    pub meters_committed: i32,
    pub description: String,
}
