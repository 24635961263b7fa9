//! Host service traits
//!
//! These traits define the interface between the watchface logic and the
//! vendor runtime it runs in. Every call is synchronous: the runtime
//! delivers one event at a time and each handler runs to completion.

pub mod display;
pub mod feedback;
pub mod message;
pub mod service;
pub mod timer;

pub use display::DisplaySurface;
pub use feedback::{Backlight, Vibes};
pub use message::MessageChannel;
pub use service::{Clock, ConnectivityService, TickService, TickUnit};
pub use timer::{TimerHandle, TimerService};

/// Errors reported by host services
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostError {
    /// Host could not allocate the resource
    OutOfMemory,
    /// Handle does not refer to a live resource
    InvalidHandle,
    /// Service is busy with a previous request
    Busy,
    /// Phone is not connected
    NotConnected,
    /// Service is not available on this watch
    Unavailable,
}

/// Everything the coordinator needs from the runtime
pub trait Host:
    DisplaySurface
    + TimerService
    + Vibes
    + Backlight
    + MessageChannel
    + TickService
    + ConnectivityService
    + Clock
{
}

// Blanket implementation for any type providing every service
impl<T> Host for T where
    T: DisplaySurface
        + TimerService
        + Vibes
        + Backlight
        + MessageChannel
        + TickService
        + ConnectivityService
        + Clock
{
}
