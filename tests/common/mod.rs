#![allow(dead_code)]

use std::sync::Arc;

use uuid::Uuid;

use grid_relay::domains::social::ChatMessage;
use grid_relay::domains::texture::{RawImage, TextureJob, TextureStatus};
use grid_relay::domains::world::{PresenceState, Vector3};
use grid_relay::providers::memory::InMemorySession;
use grid_relay::services::presence::FooterPolicy;
use grid_relay::services::queue::{Subscriber, SubscriptionFilter};
use grid_relay::Notification;

pub fn session_in(region: &str) -> Arc<InMemorySession> {
    Arc::new(InMemorySession::with_presence(PresenceState {
        region: region.to_string(),
        position: Vector3::new(128.0, 128.0, 22.0),
        ..PresenceState::default()
    }))
}

pub fn subscriber(filter: SubscriptionFilter) -> Arc<Subscriber> {
    Arc::new(Subscriber::new(session_in("Ahern"), filter))
}

pub fn subscriber_with_footer(filter: SubscriptionFilter, footer: FooterPolicy) -> Arc<Subscriber> {
    Arc::new(Subscriber::new(session_in("Ahern"), filter).with_footer_policy(footer))
}

pub fn chat(message: &str) -> Notification {
    Notification::Chat(ChatMessage {
        message: message.to_string(),
        audible: 1,
        chat_type: 1,
        source_type: 1,
        from_name: "Resident".to_string(),
        id: Uuid::from_u128(10),
        owner_id: Uuid::from_u128(11),
        position: Vector3::new(1.0, 2.0, 3.0),
    })
}

pub fn balance(amount: i32) -> Notification {
    Notification::BalanceUpdated { balance: amount }
}

/// Bottom-up BGRA buffer whose pixels encode their own row index.
pub fn raw_image(width: u32, height: u32) -> RawImage {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for row in 0..height {
        for column in 0..width {
            data.extend_from_slice(&[row as u8, column as u8, 200, 255]);
        }
    }
    RawImage {
        width,
        height,
        data,
    }
}

pub fn finished_job(asset_id: Uuid, width: u32, height: u32) -> TextureJob {
    TextureJob {
        asset_id,
        status: TextureStatus::Finished,
        image: Some(raw_image(width, height)),
    }
}

pub fn message_types(envelopes: &[grid_relay::Envelope]) -> Vec<String> {
    envelopes
        .iter()
        .map(|envelope| envelope.message_type().to_string())
        .collect()
}
