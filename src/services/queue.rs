//! Per-subscriber delivery queue.
//!
//! Producers call [`Subscriber::record`] from any thread; the poll path calls
//! [`Subscriber::drain`]. Both go through a single mutex around the pending
//! buffer, so drain output order is the order in which records completed and
//! nothing recorded concurrently with a drain is lost or returned twice.

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use crate::domains::envelope::Envelope;
use crate::interfaces::session::SessionView;
use crate::services::inventory::InventoryMemo;
use crate::services::presence::{presence_footer, FooterPolicy};

/// Allow-list of discriminators a subscriber wants delivered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubscriptionFilter {
    #[default]
    All,
    Only(HashSet<String>),
}

impl SubscriptionFilter {
    pub fn only<I, S>(message_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SubscriptionFilter::Only(message_types.into_iter().map(Into::into).collect())
    }

    /// `None` means the subscriber did not ask for a restriction.
    pub fn from_requested(requested: Option<Vec<String>>) -> Self {
        match requested {
            Some(list) => Self::only(list),
            None => SubscriptionFilter::All,
        }
    }

    pub fn accepts(&self, message_type: &str) -> bool {
        match self {
            SubscriptionFilter::All => true,
            SubscriptionFilter::Only(allowed) => allowed.contains(message_type),
        }
    }
}

#[derive(Default)]
pub struct DeliveryQueue {
    pending: Mutex<VecDeque<Envelope>>,
}

impl DeliveryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, envelope: Envelope) {
        self.pending.lock().push_back(envelope);
    }

    fn take_all(&self, last: Option<Envelope>) -> Vec<Envelope> {
        let mut pending = self.pending.lock();
        if let Some(envelope) = last {
            pending.push_back(envelope);
        }
        std::mem::take(&mut *pending).into()
    }

    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One polling client's view of a session: its queue, filter, inventory memo
/// and the session it reads presence from.
pub struct Subscriber {
    filter: SubscriptionFilter,
    footer: FooterPolicy,
    queue: DeliveryQueue,
    active: AtomicBool,
    inventory: InventoryMemo,
    session: Arc<dyn SessionView>,
}

impl Subscriber {
    pub fn new(session: Arc<dyn SessionView>, filter: SubscriptionFilter) -> Self {
        Self {
            filter,
            footer: FooterPolicy::default(),
            queue: DeliveryQueue::new(),
            active: AtomicBool::new(true),
            inventory: InventoryMemo::new(),
            session,
        }
    }

    pub fn with_footer_policy(mut self, footer: FooterPolicy) -> Self {
        self.footer = footer;
        self
    }

    pub fn filter(&self) -> &SubscriptionFilter {
        &self.filter
    }

    pub fn session(&self) -> &Arc<dyn SessionView> {
        &self.session
    }

    pub fn inventory(&self) -> &InventoryMemo {
        &self.inventory
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Queues `envelope` if the subscriber is active and its filter accepts
    /// the discriminator. Anything else is dropped without error.
    pub fn record(&self, envelope: Envelope) {
        if !self.is_active() {
            tracing::debug!(
                message_type = envelope.message_type(),
                "dropping envelope for inactive subscriber"
            );
            return;
        }
        if !self.filter.accepts(envelope.message_type()) {
            return;
        }
        self.queue.push(envelope);
    }

    /// Queues a loosely-typed message. Values without a string `MessageType`
    /// are dropped.
    pub fn record_value(&self, value: Value) {
        match Envelope::try_from(value) {
            Ok(envelope) => self.record(envelope),
            Err(err) => tracing::debug!(error = %err, "dropping malformed message"),
        }
    }

    /// Appends the presence footer and hands back everything pending, oldest
    /// first. The queue is empty afterwards.
    pub fn drain(&self) -> Vec<Envelope> {
        let footer = presence_footer(&self.session.presence());
        let include = self.is_active()
            && (self.footer == FooterPolicy::Always || self.filter.accepts(footer.message_type()));
        self.queue.take_all(include.then_some(footer))
    }

    pub fn count(&self) -> usize {
        self.queue.len()
    }

    pub fn deactivate(&self) {
        if self.active.swap(false, Ordering::AcqRel) {
            tracing::debug!(pending = self.count(), "subscriber deactivated");
        }
    }

    pub fn reset_inventory_cache(&self) {
        self.inventory.reset();
    }
}
