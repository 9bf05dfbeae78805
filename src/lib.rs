pub mod client;
pub mod config;
pub mod daemon;
pub mod domains;
pub mod error;
pub mod interfaces;
pub mod providers;
pub mod services;

pub use crate::client::{Relay, RelaySession};
pub use crate::config::Config;
pub use crate::domains::envelope::Envelope;
pub use crate::domains::notification::Notification;
pub use crate::error::{RelayError, Result};
pub use crate::services::dispatch::OfferReply;
pub use crate::services::queue::{Subscriber, SubscriptionFilter};
