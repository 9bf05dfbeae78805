use std::path::Path;
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::config::Config;
use crate::domains::envelope::Envelope;
use crate::domains::notification::Notification;
use crate::domains::social::ObjectOffer;
use crate::error::Result;
use crate::interfaces::session::SessionView;
use crate::interfaces::storage::ObjectStore;
use crate::providers::object_store::HttpObjectStore;
use crate::services::dispatch::{channel, Dispatcher, NotificationSender, OfferReply};
use crate::services::presence::FooterPolicy;
use crate::services::queue::{Subscriber, SubscriptionFilter};
use crate::services::texture::{TexturePipeline, TextureQueue};

/// Entry point wiring subscribers to the shared texture pipeline.
pub struct Relay {
    pipeline: Arc<TexturePipeline>,
    footer: FooterPolicy,
    default_filter: Option<Vec<String>>,
}

impl Relay {
    pub fn from_config(config: Config) -> Result<Self> {
        let textures = config.textures();
        let store = match &textures.archive {
            Some(archive) => Some(Arc::new(HttpObjectStore::new(archive)?) as Arc<dyn ObjectStore>),
            None => None,
        };
        Ok(Self::with_pipeline(
            Arc::new(TexturePipeline::new(&textures, store)),
            &config,
        ))
    }

    pub fn from_config_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::from_file(path)?;
        Self::from_config(config)
    }

    pub fn with_pipeline(pipeline: Arc<TexturePipeline>, config: &Config) -> Self {
        Self {
            pipeline,
            footer: FooterPolicy::from_flag(config.always_include_presence()),
            default_filter: config.events().default_filter,
        }
    }

    pub fn pipeline(&self) -> &Arc<TexturePipeline> {
        &self.pipeline
    }

    /// Creates a subscriber for `session`. `requested` restricts delivery to
    /// the listed discriminators; `None` falls back to the configured default
    /// filter. Must be called inside a Tokio runtime.
    pub fn open_session(
        &self,
        session: Arc<dyn SessionView>,
        requested: Option<Vec<String>>,
    ) -> RelaySession {
        let filter = SubscriptionFilter::from_requested(requested.or_else(|| self.default_filter.clone()));
        let subscriber = Arc::new(Subscriber::new(session, filter).with_footer_policy(self.footer));
        let (textures, worker) = TextureQueue::spawn(self.pipeline.clone(), subscriber.clone());
        RelaySession {
            dispatcher: Dispatcher::new(subscriber.clone(), textures),
            subscriber,
            worker,
        }
    }
}

/// A live subscriber together with its dispatcher and texture worker.
pub struct RelaySession {
    subscriber: Arc<Subscriber>,
    dispatcher: Dispatcher,
    worker: JoinHandle<()>,
}

impl RelaySession {
    pub fn subscriber(&self) -> &Arc<Subscriber> {
        &self.subscriber
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn notify(&self, notification: Notification) {
        self.dispatcher.handle(notification);
    }

    pub fn object_offered(&self, offer: &ObjectOffer) -> OfferReply {
        self.dispatcher.object_offered(offer)
    }

    /// Returns a sender the session transport can push notifications into.
    /// They are handled on a background task in send order.
    pub fn listen(&self) -> NotificationSender {
        let (sender, receiver) = channel();
        tokio::spawn(self.dispatcher.clone().run(receiver));
        sender
    }

    pub fn drain(&self) -> Vec<Envelope> {
        self.subscriber.drain()
    }

    pub fn count(&self) -> usize {
        self.subscriber.count()
    }

    pub fn reset_inventory_cache(&self) {
        self.subscriber.reset_inventory_cache();
    }

    pub fn deactivate(&self) {
        self.subscriber.deactivate();
    }

    /// Deactivates the subscriber and releases this session's hold on the
    /// texture worker. The returned handle completes once queued jobs are
    /// done and every listener sender has been dropped.
    pub fn close(self) -> JoinHandle<()> {
        self.subscriber.deactivate();
        self.worker
    }
}
