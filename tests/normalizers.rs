use std::collections::BTreeMap;

use serde_json::json;
use uuid::Uuid;

use grid_relay::domains::inventory::{
    asset_type, AssetPayload, AssetReceipt, AssetTransfer, AssetUpload, Bodypart, InventoryItem,
};
use grid_relay::domains::parcel::{Parcel, ParcelReply, ParcelResult};
use grid_relay::domains::social::{
    AvatarProfile, Group, GroupMember, InstantMessage, ScriptQuestion,
};
use grid_relay::domains::texture::TextureStatus;
use grid_relay::domains::world::{
    DisconnectReason, MapBlock, TeleportStatus, TerrainPatch, Vector3,
};
use grid_relay::error::RelayError;
use grid_relay::services::normalize::{
    image_download_failed, land_patch, map_blocks, normalize, PATCH_SIZE,
};
use grid_relay::Notification;

fn normalized(notification: Notification) -> grid_relay::Envelope {
    normalize(&notification).unwrap().unwrap()
}

fn patch(x: i32, y: i32) -> TerrainPatch {
    TerrainPatch {
        region: "Ahern".to_string(),
        water_level: 20.0,
        x,
        y,
        width: PATCH_SIZE,
        data: (0..256).map(|sample| sample as f32).collect(),
    }
}

#[test]
fn spatial_chat_fields() {
    let envelope = normalized(Notification::Chat(grid_relay::domains::social::ChatMessage {
        message: "hello".to_string(),
        audible: 1,
        chat_type: 1,
        source_type: 2,
        from_name: "Object".to_string(),
        id: Uuid::from_u128(1),
        owner_id: Uuid::from_u128(2),
        position: Vector3::new(1.0, 2.0, 3.0),
    }));
    assert_eq!(
        envelope.to_value(),
        json!({
            "MessageType": "SpatialChat",
            "Message": "hello",
            "Audible": 1,
            "Type": 1,
            "SourceType": 2,
            "FromName": "Object",
            "ID": Uuid::from_u128(1),
            "OwnerID": Uuid::from_u128(2),
            "Position": {"X": 1.0, "Y": 2.0, "Z": 3.0},
        })
    );
    let keys: Vec<_> = envelope.to_value().as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys[0], "MessageType");
}

#[test]
fn instant_message_stringifies_estate_and_encodes_bucket() {
    let envelope = normalized(Notification::InstantMessage(InstantMessage {
        from_agent_name: "Friend".to_string(),
        message: "hey".to_string(),
        timestamp: 1_700_000_000,
        binary_bucket: vec![0, 1, 2, 255],
        parent_estate_id: 4_000_000_000,
        ..InstantMessage::default()
    }));
    assert_eq!(envelope.message_type(), "InstantMessage");
    assert_eq!(envelope.get("ParentEstateID"), Some(&json!("4000000000")));
    assert_eq!(envelope.get("BinaryBucket"), Some(&json!("AAEC/w==")));
    assert_eq!(envelope.get("Timestamp"), Some(&json!(1_700_000_000)));
}

#[test]
fn packed_flags_expand_to_named_booleans() {
    let profile = normalized(Notification::AvatarProperties(AvatarProfile {
        flags: (1 << 2) | (1 << 4),
        ..AvatarProfile::default()
    }));
    assert_eq!(profile.get("AllowPublish"), Some(&json!(false)));
    assert_eq!(profile.get("Identified"), Some(&json!(true)));
    assert_eq!(profile.get("Online"), Some(&json!(true)));

    let question = normalized(Notification::ScriptQuestion(ScriptQuestion {
        object_name: "Door".to_string(),
        permissions: (1 << 1) | (1 << 4),
        ..ScriptQuestion::default()
    }));
    assert_eq!(question.message_type(), "ScriptPermissionRequest");
    assert_eq!(question.get("Permissions"), Some(&json!(18)));
    assert_eq!(question.get("Debit"), Some(&json!(true)));
    assert_eq!(question.get("TakeControls"), Some(&json!(false)));
    assert_eq!(question.get("TriggerAnimation"), Some(&json!(true)));
    assert_eq!(question.get("ControlCamera"), Some(&json!(false)));
}

#[test]
fn large_integers_are_strings() {
    let found = normalized(Notification::FriendFound {
        agent_id: Uuid::from_u128(3),
        region_handle: u64::MAX,
        location: Vector3::default(),
    });
    assert_eq!(found.get("RegionHandle"), Some(&json!(u64::MAX.to_string())));

    let members = normalized(Notification::GroupMembers {
        request_id: Uuid::from_u128(1),
        group_id: Uuid::from_u128(2),
        members: BTreeMap::from([(
            Uuid::from_u128(3),
            GroupMember {
                powers: 1 << 60,
                ..GroupMember::default()
            },
        )]),
    });
    assert_eq!(
        members.get("MemberList").unwrap()[0]["Powers"],
        json!((1u64 << 60).to_string())
    );

    let upload = normalized(Notification::AssetUploaded(AssetUpload {
        transfer_id: 9_007_199_254_740_993,
        success: true,
        ..AssetUpload::default()
    }));
    assert_eq!(upload.get("TransferID"), Some(&json!("9007199254740993")));
}

#[test]
fn map_blocks_keep_first_block_per_lowercase_name() {
    let envelope = map_blocks(&[
        MapBlock {
            name: "Ahern".to_string(),
            x: 1000,
            y: 1001,
            ..MapBlock::default()
        },
        MapBlock {
            name: "AHERN".to_string(),
            x: 5,
            y: 5,
            ..MapBlock::default()
        },
    ]);
    let blocks = envelope.get("Blocks").unwrap().as_object().unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks["ahern"]["Name"], json!("Ahern"));
    assert_eq!(blocks["ahern"]["RegionHandle"], json!("1099511628032256"));
}

#[test]
fn simple_lifecycle_envelopes() {
    let disconnected = normalized(Notification::Disconnected {
        reason: DisconnectReason::NetworkTimeout,
        message: "timed out".to_string(),
    });
    assert_eq!(disconnected.get("Reason"), Some(&json!("NetworkTimeout")));

    let teleport = normalized(Notification::Teleport {
        message: "done".to_string(),
        status: TeleportStatus::Finished,
        flags: 16,
    });
    assert_eq!(teleport.get("Status"), Some(&json!("Finished")));
    assert_eq!(teleport.get("Flags"), Some(&json!(16)));

    let names = normalized(Notification::AvatarNames {
        names: BTreeMap::from([(Uuid::from_u128(5), "Someone".to_string())]),
    });
    assert_eq!(
        names.get("Names").unwrap()[Uuid::from_u128(5).to_string()],
        json!("Someone")
    );
}

#[test]
fn texture_and_folder_notifications_need_subscriber_context() {
    let folder = Notification::FolderUpdated {
        folder_id: Uuid::from_u128(1),
    };
    assert!(normalize(&folder).unwrap().is_none());
}

#[test]
fn land_patch_offsets_and_rows() {
    let envelope = land_patch(&patch(3, 15)).unwrap();
    assert_eq!(envelope.get("OffsetX"), Some(&json!(48)));
    assert_eq!(envelope.get("OffsetY"), Some(&json!(240)));
    assert_eq!(envelope.get("WaterLevel"), Some(&json!(20.0)));
    let rows = envelope.get("Patch").unwrap().as_array().unwrap();
    assert_eq!(rows.len(), 16);
    assert!(rows.iter().all(|row| row.as_array().unwrap().len() == 16));
    assert_eq!(rows[1][0], json!(16.0));
}

#[test]
fn malformed_land_patches_are_rejected() {
    assert!(matches!(
        land_patch(&patch(20, 0)),
        Err(RelayError::InvalidPatch(_))
    ));
    assert!(land_patch(&patch(0, -1)).is_err());

    let mut wide = patch(0, 0);
    wide.width = 32;
    assert!(land_patch(&wide).is_err());

    let mut short = patch(0, 0);
    short.data.truncate(100);
    assert!(normalize(&Notification::LandPatch(short)).is_err());
}

#[test]
fn asset_received_branches() {
    let inventory_id = Uuid::from_u128(1);
    let transfer = AssetTransfer {
        id: Uuid::from_u128(2),
        asset_id: Uuid::from_u128(3),
        asset_type: asset_type::NOTECARD,
        success: true,
        status: "Done".to_string(),
    };

    let null = normalized(Notification::AssetReceived(AssetReceipt {
        inventory_id,
        transfer: None,
        asset: None,
    }));
    assert_eq!(null.message_type(), "NullTransfer");
    assert_eq!(null.get("InventoryID"), Some(&json!(inventory_id)));

    let missing = normalized(Notification::AssetReceived(AssetReceipt {
        inventory_id,
        transfer: Some(AssetTransfer {
            status: "NotFound".to_string(),
            ..transfer.clone()
        }),
        asset: None,
    }));
    assert_eq!(missing.get("Success"), Some(&json!(false)));
    assert_eq!(missing.get("Error"), Some(&json!("NotFound")));

    let notecard = normalized(Notification::AssetReceived(AssetReceipt {
        inventory_id,
        transfer: Some(transfer.clone()),
        asset: Some(AssetPayload::Text {
            text: "line one".to_string(),
        }),
    }));
    assert_eq!(notecard.get("AssetData"), Some(&json!("line one")));
    assert_eq!(notecard.get("AssetType"), Some(&json!(7)));

    let failed = normalized(Notification::AssetReceived(AssetReceipt {
        inventory_id,
        transfer: Some(AssetTransfer {
            success: false,
            status: "Denied".to_string(),
            ..transfer.clone()
        }),
        asset: Some(AssetPayload::Other),
    }));
    assert_eq!(
        failed.get("AssetData"),
        Some(&json!("Could not download asset: Denied"))
    );

    let bodypart = normalized(Notification::AssetReceived(AssetReceipt {
        inventory_id,
        transfer: Some(AssetTransfer {
            asset_type: asset_type::BODYPART,
            ..transfer
        }),
        asset: Some(AssetPayload::Bodypart(Bodypart {
            description: "Shape".to_string(),
            params: BTreeMap::from([("33".to_string(), 0.5)]),
            ..Bodypart::default()
        })),
    }));
    assert_eq!(bodypart.get("Description"), Some(&json!("Shape")));
    assert_eq!(bodypart.get("Params").unwrap()["33"], json!(0.5));
    assert!(bodypart.get("AssetData").is_none());
}

#[test]
fn parcel_without_data_reports_failure() {
    let reply = |result| ParcelReply {
        result,
        sequence_id: 4,
        selected_prims: 0,
        snap_selection: false,
        parcel: Parcel {
            local_id: 12,
            name: "Plot".to_string(),
            ..Parcel::default()
        },
    };

    let failed = normalized(Notification::ParcelProperties(reply(ParcelResult::NoData)));
    assert_eq!(
        failed.to_value(),
        json!({"MessageType": "ParcelPropertiesFailed", "LocalID": 12, "SequenceID": 4})
    );

    let single = normalized(Notification::ParcelProperties(reply(ParcelResult::Single)));
    assert_eq!(single.message_type(), "ParcelProperties");
    assert_eq!(single.get("Name"), Some(&json!("Plot")));
    assert_eq!(single.get("Status"), Some(&json!("None")));
}

#[test]
fn inventory_item_envelopes_include_folder() {
    let item = InventoryItem {
        uuid: Uuid::from_u128(1),
        parent_uuid: Uuid::from_u128(2),
        name: "Hat".to_string(),
        ..InventoryItem::default()
    };
    let created = normalized(Notification::ItemCreated {
        success: true,
        item: item.clone(),
    });
    assert_eq!(created.message_type(), "InventoryCreated");
    assert_eq!(created.get("Success"), Some(&json!(true)));
    assert_eq!(created.get("FolderID"), Some(&json!(Uuid::from_u128(2))));

    let received = normalized(Notification::ItemReceived(item));
    assert_eq!(received.get("Name"), Some(&json!("Hat")));
}

#[test]
fn current_groups_are_keyed_by_id() {
    let group = Group {
        id: Uuid::from_u128(8),
        name: "Builders".to_string(),
        ..Group::default()
    };
    let envelope = normalized(Notification::CurrentGroups {
        groups: vec![group],
    });
    let groups = envelope.get("Groups").unwrap();
    assert_eq!(groups[Uuid::from_u128(8).to_string()]["Name"], json!("Builders"));
}

#[test]
fn failed_download_message() {
    let envelope = image_download_failed(Uuid::from_u128(1), TextureStatus::NotFound);
    assert_eq!(envelope.get("Success"), Some(&json!(false)));
    assert_eq!(
        envelope.get("Error"),
        Some(&json!("Image could not be downloaded: NotFound"))
    );
}

#[test]
fn group_member_uuid_comes_from_listing_key() {
    let key = Uuid::from_u128(20);
    let envelope = normalized(Notification::GroupMembers {
        request_id: Uuid::from_u128(1),
        group_id: Uuid::from_u128(2),
        members: BTreeMap::from([(
            key,
            GroupMember {
                id: Uuid::from_u128(21),
                title: "Officer".to_string(),
                ..GroupMember::default()
            },
        )]),
    });
    let member = &envelope.get("MemberList").unwrap()[0];
    assert_eq!(member["UUID"], json!(key));
    assert_eq!(member["ID"], json!(Uuid::from_u128(21)));
    assert_eq!(member["Title"], json!("Officer"));
    assert_eq!(envelope.get("GroupID"), Some(&json!(Uuid::from_u128(2))));
}
