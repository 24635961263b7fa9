//! Push notification services and wall clock

use super::HostError;

/// Granularity of the periodic tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickUnit {
    Second,
    Minute,
}

/// Periodic time tick source
pub trait TickService {
    /// Start delivering [`crate::state::Event::Tick`] every `unit`
    fn subscribe_tick(&mut self, unit: TickUnit) -> Result<(), HostError>;

    /// Stop delivering ticks
    fn unsubscribe_tick(&mut self);
}

/// Phone connection state notifications
pub trait ConnectivityService {
    /// Start delivering [`crate::state::Event::Connectivity`] on changes
    fn subscribe_connection(&mut self) -> Result<(), HostError>;

    /// Stop delivering connection changes
    fn unsubscribe_connection(&mut self);
}

/// Wall clock
pub trait Clock {
    /// Current time in seconds since the Unix epoch
    fn now(&self) -> u32;
}
