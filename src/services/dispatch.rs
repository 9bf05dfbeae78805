use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domains::notification::Notification;
use crate::domains::social::ObjectOffer;
use crate::services::inventory::folder_snapshot;
use crate::services::normalize::{normalize, object_offered};
use crate::services::queue::Subscriber;
use crate::services::texture::TextureQueue;

/// Acknowledgement returned to the session for an inventory offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferReply {
    Accept,
    Decline,
}

impl OfferReply {
    pub fn accepted(self) -> bool {
        self == OfferReply::Accept
    }
}

/// Sending half handed to the session transport.
pub type NotificationSender = mpsc::UnboundedSender<Notification>;
pub type NotificationReceiver = mpsc::UnboundedReceiver<Notification>;

pub fn channel() -> (NotificationSender, NotificationReceiver) {
    mpsc::unbounded_channel()
}

/// Routes session notifications for one subscriber.
#[derive(Clone)]
pub struct Dispatcher {
    subscriber: Arc<Subscriber>,
    textures: TextureQueue,
}

impl Dispatcher {
    pub fn new(subscriber: Arc<Subscriber>, textures: TextureQueue) -> Self {
        Self {
            subscriber,
            textures,
        }
    }

    pub fn subscriber(&self) -> &Arc<Subscriber> {
        &self.subscriber
    }

    /// Normalizes and records one notification. Texture completions are
    /// handed to the texture worker instead.
    pub fn handle(&self, notification: Notification) {
        match notification {
            Notification::ObjectOffered(offer) => {
                self.object_offered(&offer);
            }
            Notification::TextureDownloaded(job) => {
                if self.subscriber.is_active() {
                    self.textures.submit(job);
                }
            }
            Notification::FolderUpdated { folder_id } => {
                if !self.subscriber.is_active() {
                    return;
                }
                let contents = self.subscriber.session().folder_contents(folder_id);
                let envelope = folder_snapshot(folder_id, &contents, self.subscriber.inventory());
                self.subscriber.record(envelope);
            }
            other => match normalize(&other) {
                Ok(Some(envelope)) => self.subscriber.record(envelope),
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(kind = other.kind(), error = %err, "dropping notification")
                }
            },
        }
    }

    /// Records an object offer and tells the session whether to accept it.
    /// Inactive subscribers decline without recording anything.
    pub fn object_offered(&self, offer: &ObjectOffer) -> OfferReply {
        if !self.subscriber.is_active() {
            return OfferReply::Decline;
        }
        self.subscriber.record(object_offered(offer));
        OfferReply::Accept
    }

    /// Consumes notifications until every sender has been dropped.
    pub async fn run(self, mut receiver: NotificationReceiver) {
        while let Some(notification) = receiver.recv().await {
            self.handle(notification);
        }
        tracing::debug!("notification channel closed");
    }
}
