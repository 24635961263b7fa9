//! Events delivered by the runtime

use super::timer::TimerPurpose;
use crate::traits::TimerHandle;

/// Events the runtime delivers to the coordinator, one at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event<'a> {
    /// Periodic time tick
    Tick,
    /// Phone connection came up (`true`) or dropped (`false`)
    Connectivity(bool),
    /// Dictionary received from the phone
    Inbox(&'a [u8]),
    /// A one-shot timer elapsed
    TimerFired {
        purpose: TimerPurpose,
        handle: TimerHandle,
    },
}

impl Event<'_> {
    /// Check if this event comes from a subscribed push service
    pub fn is_service_event(&self) -> bool {
        matches!(self, Event::Tick | Event::Connectivity(_))
    }

    /// Check if this event is a timer expiry
    pub fn is_timer_event(&self) -> bool {
        matches!(self, Event::TimerFired { .. })
    }
}
