use std::collections::BTreeMap;

use crate::domains::envelope::Envelope;
use crate::domains::world::PresenceState;

pub const PRESENCE_SNAPSHOT: &str = "PresenceSnapshot";

/// Whether the drain-time presence footer obeys the subscriber's filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FooterPolicy {
    #[default]
    Filtered,
    Always,
}

impl FooterPolicy {
    pub fn from_flag(always: bool) -> Self {
        if always {
            FooterPolicy::Always
        } else {
            FooterPolicy::Filtered
        }
    }
}

pub fn presence_footer(state: &PresenceState) -> Envelope {
    let positions: BTreeMap<String, _> = state
        .nearby
        .iter()
        .map(|(id, position)| (id.to_string(), *position))
        .collect();
    Envelope::builder(PRESENCE_SNAPSHOT)
        .field("Positions", positions)
        .field("YourPosition", state.position)
        .field("YourRegion", &state.region)
        .build()
}
