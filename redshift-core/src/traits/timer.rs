//! One-shot timer service

use super::HostError;
use crate::state::TimerPurpose;

/// Opaque handle of a scheduled host timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerHandle(pub u32);

/// Host one-shot timers
///
/// A timer fires once, delivering [`crate::state::Event::TimerFired`] with
/// the purpose and handle it was scheduled with. There is no cancel: a
/// timer is either rescheduled or left to fire.
pub trait TimerService {
    /// Schedule a new timer firing after `delay_ms`
    fn schedule(&mut self, delay_ms: u32, purpose: TimerPurpose) -> Result<TimerHandle, HostError>;

    /// Move the deadline of a pending timer to `delay_ms` from now
    ///
    /// Fails with [`HostError::InvalidHandle`] if the timer already fired.
    fn reschedule(&mut self, handle: TimerHandle, delay_ms: u32) -> Result<(), HostError>;
}
