//! Host events and timer bookkeeping
//!
//! Events are what the runtime delivers; timer slots track the one
//! pending timer each purpose may own.

pub mod events;
pub mod timer;

pub use events::Event;
pub use timer::{TimerPurpose, TimerSlot, TimerState};
