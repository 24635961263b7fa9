//! Phone message channel

use super::HostError;

/// Message channel to the companion phone script
///
/// Inbound dictionaries arrive as [`crate::state::Event::Inbox`] events.
pub trait MessageChannel {
    /// Open the channel with the given inbox and outbox buffer sizes
    fn open(&mut self, inbox_size: usize, outbox_size: usize) -> Result<(), HostError>;

    /// Close the channel and drop any registered callbacks
    fn close(&mut self);

    /// Send an encoded dictionary to the phone
    fn send(&mut self, payload: &[u8]) -> Result<(), HostError>;
}
