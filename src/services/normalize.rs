//! Pure conversions from typed session notifications into envelopes.
//!
//! Each function fixes the discriminator and field set for one notification
//! kind. Integers that may exceed 2^53 (region handles, estate ids, group
//! powers, transfer ids) are written as decimal strings, and packed flag words
//! are expanded into one named boolean per documented bit.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::domains::envelope::Envelope;
use crate::domains::inventory::{asset_type, AssetPayload, AssetReceipt, AssetUpload, InventoryItem};
use crate::domains::notification::Notification;
use crate::domains::parcel::{ParcelReply, ParcelResult};
use crate::domains::social::{
    AgentSearchResult, AvatarGroup, AvatarInterests, AvatarProfile, ChatMessage, FriendInfo,
    Group, GroupMember, GroupSearchResult, InstantMessage, MoneyBalanceReply, ObjectOffer,
    ScriptDialog, ScriptQuestion,
};
use crate::domains::texture::TextureStatus;
use crate::domains::world::{
    Avatar, DisconnectReason, MapBlock, MapItem, TeleportStatus, TerrainPatch, Vector3,
};
use crate::error::{RelayError, Result};
use crate::services::inventory::with_item_fields;

/// Edge length of a terrain patch, in samples.
pub const PATCH_SIZE: i32 = 16;

const PROFILE_FLAGS: [(&str, u32); 5] = [
    ("AllowPublish", 1 << 0),
    ("MaturePublish", 1 << 1),
    ("Identified", 1 << 2),
    ("Transacted", 1 << 3),
    ("Online", 1 << 4),
];

const SCRIPT_PERMISSIONS: [(&str, u32); 11] = [
    ("Debit", 1 << 1),
    ("TakeControls", 1 << 2),
    ("RemapControls", 1 << 3),
    ("TriggerAnimation", 1 << 4),
    ("Attach", 1 << 5),
    ("ReleaseOwnership", 1 << 6),
    ("ChangeLinks", 1 << 7),
    ("ChangeJoints", 1 << 8),
    ("ChangePermissions", 1 << 9),
    ("TrackCamera", 1 << 10),
    ("ControlCamera", 1 << 11),
];

/// Normalizes every notification that needs no session context.
///
/// Folder and texture notifications depend on subscriber state and yield
/// `Ok(None)`; malformed terrain patches yield an error.
pub fn normalize(notification: &Notification) -> Result<Option<Envelope>> {
    let envelope = match notification {
        Notification::AvatarGroups { avatar_id, groups } => avatar_groups(*avatar_id, groups),
        Notification::AvatarInterests {
            avatar_id,
            interests,
        } => avatar_interests(*avatar_id, interests),
        Notification::AvatarNames { names } => avatar_names(names),
        Notification::AvatarProperties(profile) => avatar_properties(profile),
        Notification::FriendNotification { agent_id, online } => {
            friend_notification(*agent_id, *online)
        }
        Notification::FriendFound {
            agent_id,
            region_handle,
            location,
        } => friend_found(*agent_id, *region_handle, *location),
        Notification::DirPeopleReply { query_id, results } => dir_people_reply(*query_id, results),
        Notification::DirGroupsReply { query_id, results } => dir_groups_reply(*query_id, results),
        Notification::ObjectOffered(offer) => object_offered(offer),
        Notification::Disconnected { reason, message } => disconnected(*reason, message),
        Notification::BalanceUpdated { balance } => balance_updated(*balance),
        Notification::MoneyBalanceReply(reply) => money_balance_reply(reply),
        Notification::Chat(chat) => spatial_chat(chat),
        Notification::InstantMessage(im) => instant_message(im),
        Notification::ScriptDialog(dialog) => script_dialog(dialog),
        Notification::ScriptQuestion(question) => script_permission_request(question),
        Notification::Teleport {
            message,
            status,
            flags,
        } => teleport(message, *status, *flags),
        Notification::MapBlocks { blocks } => map_blocks(blocks),
        Notification::MapItems { item_type, items } => map_items(*item_type, items),
        Notification::FriendshipOffered {
            agent_id,
            agent_name,
            im_session_id,
        } => friendship_offered(*agent_id, agent_name, *im_session_id),
        Notification::FriendRights(friend) => friend_rights_changed(friend),
        Notification::FriendOnOffline(friend) => friend_on_offline(friend),
        Notification::AvatarAdded(avatar) => avatar_added(avatar),
        Notification::AvatarRemoved(avatar) => avatar_removed(avatar),
        Notification::AvatarUpdated(avatar) => avatar_updated(avatar),
        Notification::AssetReceived(receipt) => asset_received(receipt),
        Notification::LandPatch(patch) => land_patch(patch)?,
        Notification::AssetUploaded(upload) => asset_uploaded(upload),
        Notification::GroupProfile(group) => group_profile(group),
        Notification::GroupMembers {
            group_id, members, ..
        } => group_members(*group_id, members),
        Notification::GroupNames { names } => group_names(names),
        Notification::CurrentGroups { groups } => current_groups(groups),
        Notification::GroupChatJoin {
            session_id,
            session_name,
            tmp_session_id,
            success,
        } => group_chat_join(*session_id, session_name, *tmp_session_id, *success),
        Notification::NoteUploaded {
            success,
            status,
            item_id,
            asset_id,
        } => note_uploaded(*success, status, *item_id, *asset_id),
        Notification::ItemCreated { success, item } => item_created(*success, item),
        Notification::ItemReceived(item) => item_received(item),
        Notification::TaskItemReceived {
            item_id,
            folder_id,
            creator_id,
            asset_id,
            inventory_type,
        } => task_item_received(*item_id, *folder_id, *creator_id, *asset_id, *inventory_type),
        Notification::ParcelProperties(reply) => parcel_properties(reply),
        Notification::FolderUpdated { .. } | Notification::TextureDownloaded(_) => return Ok(None),
    };
    Ok(Some(envelope))
}

pub fn avatar_groups(avatar_id: Uuid, groups: &[AvatarGroup]) -> Envelope {
    let groups: Vec<Value> = groups
        .iter()
        .map(|group| {
            json!({
                "GroupID": group.group_id,
                "GroupName": group.group_name,
                "GroupTitle": group.group_title,
                "GroupPowers": group.group_powers.to_string(),
                "AcceptNotices": group.accept_notices,
                "GroupInsigniaID": group.group_insignia_id,
            })
        })
        .collect();
    Envelope::builder("AvatarGroups")
        .field("AvatarID", avatar_id)
        .field("Groups", groups)
        .build()
}

pub fn avatar_interests(avatar_id: Uuid, interests: &AvatarInterests) -> Envelope {
    Envelope::builder("AvatarInterests")
        .field("AvatarID", avatar_id)
        .field("WantToMask", interests.want_to_mask)
        .field("WantToText", &interests.want_to_text)
        .field("SkillsMask", interests.skills_mask)
        .field("SkillsText", &interests.skills_text)
        .field("LanguagesText", &interests.languages_text)
        .build()
}

pub fn avatar_names(names: &BTreeMap<Uuid, String>) -> Envelope {
    Envelope::builder("AvatarNames").field("Names", names).build()
}

pub fn avatar_properties(profile: &AvatarProfile) -> Envelope {
    let builder = Envelope::builder("AvatarProperties")
        .field("AvatarID", profile.avatar_id)
        .field("PartnerID", profile.partner_id)
        .field("AboutText", &profile.about_text)
        .field("FirstLifeText", &profile.first_life_text)
        .field("FirstLifeImage", profile.first_life_image)
        .field("ProfileImage", profile.profile_image)
        .field("ProfileURL", &profile.profile_url)
        .field("BornOn", &profile.born_on)
        .field("CharterMember", &profile.charter_member);
    PROFILE_FLAGS
        .iter()
        .fold(builder, |builder, (name, bit)| {
            builder.field(name, profile.flags & bit != 0)
        })
        .build()
}

pub fn friend_notification(agent_id: Uuid, online: bool) -> Envelope {
    Envelope::builder("FriendNotification")
        .field("AgentID", agent_id)
        .field("Online", online)
        .build()
}

pub fn friend_found(agent_id: Uuid, region_handle: u64, location: Vector3) -> Envelope {
    Envelope::builder("FriendFound")
        .field("AgentID", agent_id)
        .field("Location", location)
        .field("RegionHandle", region_handle.to_string())
        .build()
}

pub fn dir_people_reply(query_id: Uuid, results: &[AgentSearchResult]) -> Envelope {
    let results: Vec<Value> = results
        .iter()
        .map(|person| {
            json!({
                "AgentID": person.agent_id,
                "FirstName": person.first_name,
                "LastName": person.last_name,
            })
        })
        .collect();
    Envelope::builder("DirPeopleReply")
        .field("QueryID", query_id)
        .field("Results", results)
        .build()
}

pub fn dir_groups_reply(query_id: Uuid, results: &[GroupSearchResult]) -> Envelope {
    let results: Vec<Value> = results
        .iter()
        .map(|group| {
            json!({
                "GroupID": group.group_id,
                "Name": group.name,
                "MemberCount": group.members,
            })
        })
        .collect();
    Envelope::builder("DirGroupsReply")
        .field("QueryID", query_id)
        .field("Results", results)
        .build()
}

pub fn object_offered(offer: &ObjectOffer) -> Envelope {
    Envelope::builder("ObjectOffered")
        .field("FromAgentID", offer.from_agent_id)
        .field("FromAgentName", &offer.from_agent_name)
        .field("RegionID", offer.region_id)
        .field("Position", offer.position)
        .field("Timestamp", offer.timestamp)
        .field("Type", offer.asset_type)
        .field("ObjectID", offer.object_id)
        .field("FromTask", offer.from_task)
        .build()
}

pub fn disconnected(reason: DisconnectReason, message: &str) -> Envelope {
    Envelope::builder("Disconnected")
        .field("Reason", reason)
        .field("Message", message)
        .build()
}

pub fn balance_updated(balance: i32) -> Envelope {
    Envelope::builder("BalanceUpdated")
        .field("Balance", balance)
        .build()
}

pub fn money_balance_reply(reply: &MoneyBalanceReply) -> Envelope {
    Envelope::builder("MoneyBalanceReplyReceived")
        .field("TransactionID", reply.transaction_id)
        .field("TransactionSuccess", reply.transaction_success)
        .field("Balance", reply.balance)
        .field("MetersCredit", reply.meters_credit)
        .field("MetersCommitted", reply.meters_committed)
        .field("Description", &reply.description)
        .build()
}

pub fn spatial_chat(chat: &ChatMessage) -> Envelope {
    Envelope::builder("SpatialChat")
        .field("Message", &chat.message)
        .field("Audible", chat.audible)
        .field("Type", chat.chat_type)
        .field("SourceType", chat.source_type)
        .field("FromName", &chat.from_name)
        .field("ID", chat.id)
        .field("OwnerID", chat.owner_id)
        .field("Position", chat.position)
        .build()
}

pub fn instant_message(im: &InstantMessage) -> Envelope {
    Envelope::builder("InstantMessage")
        .field("FromAgentID", im.from_agent_id)
        .field("FromAgentName", &im.from_agent_name)
        .field("ParentEstateID", im.parent_estate_id.to_string())
        .field("RegionID", im.region_id)
        .field("Position", im.position)
        .field("Dialog", im.dialog)
        .field("GroupIM", im.group_im)
        .field("IMSessionID", im.im_session_id)
        .field("Timestamp", im.timestamp)
        .field("Message", &im.message)
        .field("Offline", im.offline)
        .field("BinaryBucket", STANDARD.encode(&im.binary_bucket))
        .build()
}

pub fn script_dialog(dialog: &ScriptDialog) -> Envelope {
    Envelope::builder("ScriptDialog")
        .field("Message", &dialog.message)
        .field("ObjectName", &dialog.object_name)
        .field("ImageID", dialog.image_id)
        .field("ObjectID", dialog.object_id)
        .field("FirstName", &dialog.first_name)
        .field("LastName", &dialog.last_name)
        .field("ChatChannel", dialog.chat_channel)
        .field("Buttons", &dialog.buttons)
        .build()
}

pub fn script_permission_request(question: &ScriptQuestion) -> Envelope {
    let builder = Envelope::builder("ScriptPermissionRequest")
        .field("TaskID", question.task_id)
        .field("ItemID", question.item_id)
        .field("ObjectName", &question.object_name)
        .field("ObjectOwner", &question.object_owner)
        .field("Permissions", question.permissions);
    SCRIPT_PERMISSIONS
        .iter()
        .fold(builder, |builder, (name, bit)| {
            builder.field(name, question.permissions & bit != 0)
        })
        .build()
}

pub fn teleport(message: &str, status: TeleportStatus, flags: u32) -> Envelope {
    Envelope::builder("Teleport")
        .field("Status", status)
        .field("Flags", flags)
        .field("Message", message)
        .build()
}

/// Blocks are keyed by lower-cased region name; the first block seen for a
/// name wins.
pub fn map_blocks(blocks: &[MapBlock]) -> Envelope {
    let mut by_name = Map::new();
    for block in blocks {
        let key = block.name.to_lowercase();
        if by_name.contains_key(&key) {
            continue;
        }
        by_name.insert(
            key,
            json!({
                "Name": block.name,
                "Access": block.access,
                "X": block.x,
                "Y": block.y,
                "Flags": block.region_flags,
                "RegionHandle": block.region_handle().to_string(),
            }),
        );
    }
    Envelope::builder("MapBlocks")
        .field("Blocks", Value::Object(by_name))
        .build()
}

pub fn map_items(item_type: u32, items: &[MapItem]) -> Envelope {
    let items: Vec<Value> = items
        .iter()
        .map(|item| {
            json!({
                "Name": item.name,
                "X": item.x,
                "Y": item.y,
                "Extra": item.extra,
                "Extra2": item.extra2,
                "ID": item.id,
            })
        })
        .collect();
    Envelope::builder("MapItems")
        .field("ItemType", item_type)
        .field("Items", items)
        .build()
}

pub fn image_download_failed(asset_id: Uuid, status: TextureStatus) -> Envelope {
    Envelope::builder("ImageDownloaded")
        .field("UUID", asset_id)
        .field("Success", false)
        .field("Error", format!("Image could not be downloaded: {status}"))
        .build()
}

pub fn image_downloaded(
    asset_id: Uuid,
    success: bool,
    url: Option<&str>,
    error: Option<&str>,
) -> Envelope {
    let mut builder = Envelope::builder("ImageDownloaded")
        .field("UUID", asset_id)
        .field("Success", success);
    if let Some(url) = url {
        builder = builder.field("URL", url);
    }
    if let Some(error) = error {
        builder = builder.field("Error", error);
    }
    builder.build()
}

pub fn friendship_offered(agent_id: Uuid, agent_name: &str, im_session_id: Uuid) -> Envelope {
    Envelope::builder("FriendshipOffered")
        .field("AgentID", agent_id)
        .field("AgentName", agent_name)
        .field("IMSessionID", im_session_id)
        .build()
}

fn friend_envelope(message_type: &str, friend: &FriendInfo) -> Envelope {
    Envelope::builder(message_type)
        .field("Name", &friend.name)
        .field("ID", friend.id)
        .field("TheirRights", friend.their_rights)
        .field("MyRights", friend.my_rights)
        .field("Online", friend.online)
        .build()
}

pub fn friend_rights_changed(friend: &FriendInfo) -> Envelope {
    friend_envelope("FriendRightsChanged", friend)
}

pub fn friend_on_offline(friend: &FriendInfo) -> Envelope {
    friend_envelope("FriendOnOffline", friend)
}

pub fn avatar_added(avatar: &Avatar) -> Envelope {
    Envelope::builder("AvatarAdded")
        .field("Name", &avatar.name)
        .field("ID", avatar.id)
        .field("LocalID", avatar.local_id)
        .field("Position", avatar.position)
        .field("Scale", avatar.scale)
        .field("GroupName", &avatar.group_name)
        .build()
}

pub fn avatar_removed(avatar: &Avatar) -> Envelope {
    Envelope::builder("AvatarRemoved")
        .field("Name", &avatar.name)
        .field("ID", avatar.id)
        .field("LocalID", avatar.local_id)
        .build()
}

pub fn avatar_updated(avatar: &Avatar) -> Envelope {
    Envelope::builder("AvatarUpdated")
        .field("ID", avatar.id)
        .field("Position", avatar.position)
        .build()
}

pub fn asset_received(receipt: &AssetReceipt) -> Envelope {
    let Some(transfer) = &receipt.transfer else {
        return Envelope::builder("NullTransfer")
            .field("InventoryID", receipt.inventory_id)
            .build();
    };
    let Some(asset) = &receipt.asset else {
        return Envelope::builder("AssetReceived")
            .field("Success", false)
            .field("InventoryID", receipt.inventory_id)
            .field("TransferID", transfer.id)
            .field("AssetID", transfer.asset_id)
            .field("Error", &transfer.status)
            .field("AssetType", transfer.asset_type)
            .build();
    };

    let mut builder = Envelope::builder("AssetReceived")
        .field("InventoryID", receipt.inventory_id)
        .field("Success", transfer.success);
    if !transfer.success {
        builder = builder.field(
            "AssetData",
            format!("Could not download asset: {}", transfer.status),
        );
    } else {
        match asset {
            AssetPayload::Text { text }
                if matches!(transfer.asset_type, asset_type::NOTECARD | asset_type::LSL_TEXT) =>
            {
                builder = builder.field("AssetData", text);
            }
            AssetPayload::Bodypart(part) => {
                builder = builder
                    .field("Creator", part.creator)
                    .field("Description", &part.description)
                    .field("Textures", &part.textures)
                    .field("Params", &part.params)
                    .field("Permissions", part.permissions)
                    .field("Owner", part.owner);
            }
            _ => {}
        }
    }
    builder
        .field("AssetType", transfer.asset_type)
        .field("AssetID", transfer.asset_id)
        .field("TransferID", transfer.id)
        .build()
}

/// Validates patch geometry and lays the samples out as 16 rows of 16.
pub fn land_patch(patch: &TerrainPatch) -> Result<Envelope> {
    let in_range = |coordinate: i32| (0..PATCH_SIZE).contains(&coordinate);
    if !in_range(patch.x) || !in_range(patch.y) {
        return Err(RelayError::InvalidPatch(format!(
            "bad patch coordinates ({}, {})",
            patch.x, patch.y
        )));
    }
    if patch.width != PATCH_SIZE {
        return Err(RelayError::InvalidPatch(format!(
            "unhandled patch size {}x{}",
            patch.width, patch.width
        )));
    }
    let side = PATCH_SIZE as usize;
    if patch.data.len() < side * side {
        return Err(RelayError::InvalidPatch(format!(
            "expected {} samples, got {}",
            side * side,
            patch.data.len()
        )));
    }
    let rows: Vec<Vec<f32>> = patch
        .data
        .chunks_exact(side)
        .take(side)
        .map(<[f32]>::to_vec)
        .collect();
    Ok(Envelope::builder("LandPatch")
        .field("OffsetX", patch.x * PATCH_SIZE)
        .field("OffsetY", patch.y * PATCH_SIZE)
        .field("Region", &patch.region)
        .field("WaterLevel", patch.water_level)
        .field("Patch", rows)
        .build())
}

pub fn asset_uploaded(upload: &AssetUpload) -> Envelope {
    Envelope::builder("AssetUploaded")
        .field("AssetID", upload.asset_id)
        .field("TransferID", upload.transfer_id.to_string())
        .field("ID", upload.id)
        .field("Success", upload.success)
        .build()
}

fn group_record(group: &Group) -> Map<String, Value> {
    let record = json!({
        "ID": group.id,
        "Name": group.name,
        "Charter": group.charter,
        "Founder": group.founder_id,
        "Insignia": group.insignia_id,
        "MemberCount": group.member_count,
        "OwnerRole": group.owner_role,
        "MemberTitle": group.member_title,
        "Money": group.money,
        "MembershipFee": group.membership_fee,
        "OpenEnrollment": group.open_enrollment,
        "ShowInList": group.show_in_list,
        "AcceptNotices": group.accept_notices,
        "Contribution": group.contribution,
    });
    match record {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

pub fn group_profile(group: &Group) -> Envelope {
    group_record(group)
        .into_iter()
        .fold(Envelope::builder("GroupProfile"), |builder, (name, value)| {
            builder.field(&name, value)
        })
        .build()
}

/// `UUID` is the key the member was listed under; `ID` is the id carried on
/// the member record itself.
pub fn group_members(group_id: Uuid, members: &BTreeMap<Uuid, GroupMember>) -> Envelope {
    let list: Vec<Value> = members
        .iter()
        .map(|(key, member)| {
            json!({
                "UUID": key,
                "Contribution": member.contribution,
                "IsOwner": member.is_owner,
                "ID": member.id,
                "OnlineStatus": member.online_status,
                "Powers": member.powers.to_string(),
                "Title": member.title,
            })
        })
        .collect();
    Envelope::builder("GroupMembers")
        .field("MemberList", list)
        .field("GroupID", group_id)
        .build()
}

pub fn group_names(names: &BTreeMap<Uuid, String>) -> Envelope {
    Envelope::builder("GroupNames").field("Names", names).build()
}

pub fn current_groups(groups: &[Group]) -> Envelope {
    let by_id: Map<String, Value> = groups
        .iter()
        .map(|group| (group.id.to_string(), Value::Object(group_record(group))))
        .collect();
    Envelope::builder("CurrentGroups")
        .field("Groups", Value::Object(by_id))
        .build()
}

pub fn group_chat_join(
    session_id: Uuid,
    session_name: &str,
    tmp_session_id: Uuid,
    success: bool,
) -> Envelope {
    Envelope::builder("GroupChatJoin")
        .field("GroupChatSessionID", session_id)
        .field("TmpSessionID", tmp_session_id)
        .field("SessionName", session_name)
        .field("Success", success)
        .build()
}

pub fn note_uploaded(success: bool, status: &str, item_id: Uuid, asset_id: Uuid) -> Envelope {
    Envelope::builder("InventoryNoteUploaded")
        .field("Success", success)
        .field("Status", status)
        .field("ItemID", item_id)
        .field("AssetID", asset_id)
        .build()
}

pub fn item_created(success: bool, item: &InventoryItem) -> Envelope {
    let builder = Envelope::builder("InventoryCreated").field("Success", success);
    with_item_fields(builder, item).build()
}

pub fn item_received(item: &InventoryItem) -> Envelope {
    with_item_fields(Envelope::builder("ItemReceived"), item).build()
}

pub fn task_item_received(
    item_id: Uuid,
    folder_id: Uuid,
    creator_id: Uuid,
    asset_id: Uuid,
    inventory_type: u8,
) -> Envelope {
    Envelope::builder("TaskItemReceived")
        .field("ItemID", item_id)
        .field("FolderID", folder_id)
        .field("CreatorID", creator_id)
        .field("AssetID", asset_id)
        .field("Type", inventory_type)
        .build()
}

pub fn parcel_properties(reply: &ParcelReply) -> Envelope {
    let parcel = &reply.parcel;
    if reply.result == ParcelResult::NoData {
        return Envelope::builder("ParcelPropertiesFailed")
            .field("LocalID", parcel.local_id)
            .field("SequenceID", reply.sequence_id)
            .build();
    }
    Envelope::builder("ParcelProperties")
        .field("SequenceID", reply.sequence_id)
        .field("LocalID", parcel.local_id)
        .field("AABBMax", parcel.aabb_max)
        .field("AABBMin", parcel.aabb_min)
        .field("AccessList", &parcel.access_list)
        .field("BanList", &parcel.ban_list)
        .field("Area", parcel.area)
        .field("AuctionID", parcel.auction_id)
        .field("AuthBuyerID", parcel.auth_buyer_id)
        .field("Category", parcel.category)
        .field("ClaimDate", parcel.claim_date)
        .field("ClaimPrice", parcel.claim_price)
        .field("Desc", &parcel.desc)
        .field("Dwell", parcel.dwell)
        .field("Flags", parcel.flags)
        .field("GroupID", parcel.group_id)
        .field("GroupPrims", parcel.group_prims)
        .field("IsGroupOwned", parcel.is_group_owned)
        .field("LandingType", parcel.landing_type)
        .field("MaxPrims", parcel.max_prims)
        .field("MediaAutoScale", parcel.media.auto_scale)
        .field("MediaDesc", &parcel.media.desc)
        .field("MediaHeight", parcel.media.height)
        .field("MediaID", parcel.media.media_id)
        .field("MediaLoop", parcel.media.looped)
        .field("MediaType", &parcel.media.media_type)
        .field("MediaURL", &parcel.media.url)
        .field("MediaWidth", parcel.media.width)
        .field("MusicURL", &parcel.music_url)
        .field("Name", &parcel.name)
        .field("ObscureMedia", parcel.obscure_media)
        .field("ObscureMusic", parcel.obscure_music)
        .field("OtherCleanTime", parcel.other_clean_time)
        .field("OtherPrims", parcel.other_prims)
        .field("OwnerPrims", parcel.owner_prims)
        .field("OwnerID", parcel.owner_id)
        .field("PrimBonus", parcel.prim_bonus)
        .field("PassHours", parcel.pass_hours)
        .field("PassPrice", parcel.pass_price)
        .field("PublicCount", parcel.public_count)
        .field("RegionDenyAgeUnverified", parcel.region_deny_age_unverified)
        .field("RegionDenyAnonymous", parcel.region_deny_anonymous)
        .field("RegionPushOverride", parcel.region_push_override)
        .field("RentPrice", parcel.rent_price)
        .field("SalePrice", parcel.sale_price)
        .field("SelectedPrims", reply.selected_prims)
        .field("SelfCount", parcel.self_count)
        .field("SimWideMaxPrims", parcel.sim_wide_max_prims)
        .field("SimWideTotalPrims", parcel.sim_wide_total_prims)
        .field("SnapshotID", parcel.snapshot_id)
        .field("Status", parcel.status)
        .field("TotalPrims", parcel.total_prims)
        .field("UserLocation", parcel.user_location)
        .field("UserLookAt", parcel.user_look_at)
        .build()
}
