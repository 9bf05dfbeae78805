use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domains::inventory::{AssetReceipt, AssetUpload, InventoryItem};
use crate::domains::parcel::ParcelReply;
use crate::domains::social::{
    AgentSearchResult, AvatarGroup, AvatarInterests, AvatarProfile, ChatMessage, FriendInfo,
    Group, GroupMember, GroupSearchResult, InstantMessage, MoneyBalanceReply, ObjectOffer,
    ScriptDialog, ScriptQuestion,
};
use crate::domains::texture::TextureJob;
use crate::domains::world::{
    Avatar, DisconnectReason, MapBlock, MapItem, TeleportStatus, TerrainPatch, Vector3,
};

/// A typed notification raised by the remote session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    AvatarGroups {
        avatar_id: Uuid,
        groups: Vec<AvatarGroup>,
    },
    AvatarInterests {
        avatar_id: Uuid,
        interests: AvatarInterests,
    },
    AvatarNames {
        names: BTreeMap<Uuid, String>,
    },
    AvatarProperties(AvatarProfile),
    FriendNotification {
        agent_id: Uuid,
        online: bool,
    },
    FriendFound {
        agent_id: Uuid,
        region_handle: u64,
        location: Vector3,
    },
    DirPeopleReply {
        query_id: Uuid,
        results: Vec<AgentSearchResult>,
    },
    DirGroupsReply {
        query_id: Uuid,
        results: Vec<GroupSearchResult>,
    },
    ObjectOffered(ObjectOffer),
    Disconnected {
        reason: DisconnectReason,
        message: String,
    },
    BalanceUpdated {
        balance: i32,
    },
    MoneyBalanceReply(MoneyBalanceReply),
    Chat(ChatMessage),
    InstantMessage(InstantMessage),
    ScriptDialog(ScriptDialog),
    ScriptQuestion(ScriptQuestion),
    Teleport {
        message: String,
        status: TeleportStatus,
        flags: u32,
    },
    MapBlocks {
        blocks: Vec<MapBlock>,
    },
    MapItems {
        item_type: u32,
        items: Vec<MapItem>,
    },
    TextureDownloaded(TextureJob),
    FriendshipOffered {
        agent_id: Uuid,
        agent_name: String,
        im_session_id: Uuid,
    },
    FriendRights(FriendInfo),
    FriendOnOffline(FriendInfo),
    AvatarAdded(Avatar),
    AvatarRemoved(Avatar),
    AvatarUpdated(Avatar),
    AssetReceived(AssetReceipt),
    FolderUpdated {
        folder_id: Uuid,
    },
    LandPatch(TerrainPatch),
    AssetUploaded(AssetUpload),
    GroupProfile(Group),
    GroupMembers {
        request_id: Uuid,
        group_id: Uuid,
        members: BTreeMap<Uuid, GroupMember>,
    },
    GroupNames {
        names: BTreeMap<Uuid, String>,
    },
    CurrentGroups {
        groups: Vec<Group>,
    },
    GroupChatJoin {
        session_id: Uuid,
        session_name: String,
        tmp_session_id: Uuid,
        success: bool,
    },
    NoteUploaded {
        success: bool,
        status: String,
        item_id: Uuid,
        asset_id: Uuid,
    },
    ItemCreated {
        success: bool,
        item: InventoryItem,
    },
    ItemReceived(InventoryItem),
    TaskItemReceived {
        item_id: Uuid,
        folder_id: Uuid,
        creator_id: Uuid,
        asset_id: Uuid,
        inventory_type: u8,
    },
    ParcelProperties(ParcelReply),
}

impl Notification {
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::AvatarGroups { .. } => "avatar_groups",
            Notification::AvatarInterests { .. } => "avatar_interests",
            Notification::AvatarNames { .. } => "avatar_names",
            Notification::AvatarProperties(_) => "avatar_properties",
            Notification::FriendNotification { .. } => "friend_notification",
            Notification::FriendFound { .. } => "friend_found",
            Notification::DirPeopleReply { .. } => "dir_people_reply",
            Notification::DirGroupsReply { .. } => "dir_groups_reply",
            Notification::ObjectOffered(_) => "object_offered",
            Notification::Disconnected { .. } => "disconnected",
            Notification::BalanceUpdated { .. } => "balance_updated",
            Notification::MoneyBalanceReply(_) => "money_balance_reply",
            Notification::Chat(_) => "chat",
            Notification::InstantMessage(_) => "instant_message",
            Notification::ScriptDialog(_) => "script_dialog",
            Notification::ScriptQuestion(_) => "script_question",
            Notification::Teleport { .. } => "teleport",
            Notification::MapBlocks { .. } => "map_blocks",
            Notification::MapItems { .. } => "map_items",
            Notification::TextureDownloaded(_) => "texture_downloaded",
            Notification::FriendshipOffered { .. } => "friendship_offered",
            Notification::FriendRights(_) => "friend_rights",
            Notification::FriendOnOffline(_) => "friend_on_offline",
            Notification::AvatarAdded(_) => "avatar_added",
            Notification::AvatarRemoved(_) => "avatar_removed",
            Notification::AvatarUpdated(_) => "avatar_updated",
            Notification::AssetReceived(_) => "asset_received",
            Notification::FolderUpdated { .. } => "folder_updated",
            Notification::LandPatch(_) => "land_patch",
            Notification::AssetUploaded(_) => "asset_uploaded",
            Notification::GroupProfile(_) => "group_profile",
            Notification::GroupMembers { .. } => "group_members",
            Notification::GroupNames { .. } => "group_names",
            Notification::CurrentGroups { .. } => "current_groups",
            Notification::GroupChatJoin { .. } => "group_chat_join",
            Notification::NoteUploaded { .. } => "note_uploaded",
            Notification::ItemCreated { .. } => "item_created",
            Notification::ItemReceived(_) => "item_received",
            Notification::TaskItemReceived { .. } => "task_item_received",
            Notification::ParcelProperties(_) => "parcel_properties",
        }
    }
}
