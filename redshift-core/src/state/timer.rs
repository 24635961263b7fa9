//! Per-purpose timer slots
//!
//! Each purpose owns at most one pending host timer. Arming a slot that is
//! already scheduled moves the existing deadline instead of creating a
//! second timer, so repeated triggers never stack.

use crate::fmt::{debug, warn};
use crate::traits::{HostError, TimerHandle, TimerService};

/// Why a timer exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerPurpose {
    /// Hide the connection popup
    BluetoothPopup,
    /// Ask the phone for fresh weather
    WeatherRefresh,
}

/// Slot states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerState {
    /// No timer pending
    Idle,
    /// A timer is pending with this handle
    Scheduled(TimerHandle),
}

/// The single timer slot of one purpose
#[derive(Debug, Clone)]
pub struct TimerSlot {
    purpose: TimerPurpose,
    state: TimerState,
}

impl TimerSlot {
    /// Create an idle slot
    pub const fn new(purpose: TimerPurpose) -> Self {
        Self {
            purpose,
            state: TimerState::Idle,
        }
    }

    /// Purpose this slot serves
    pub fn purpose(&self) -> TimerPurpose {
        self.purpose
    }

    /// Current state
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Check if a timer is pending
    pub fn is_scheduled(&self) -> bool {
        matches!(self.state, TimerState::Scheduled(_))
    }

    /// Make sure a timer fires `delay_ms` from now
    ///
    /// `Idle -> Scheduled` with a new timer, or `Scheduled -> Scheduled`
    /// with the existing timer's deadline moved. If the host no longer
    /// knows the pending handle, a fresh timer is scheduled in its place.
    /// Any other reschedule error keeps the pending timer and is returned.
    /// If scheduling a fresh timer fails the slot is left `Idle`.
    pub fn arm<T: TimerService + ?Sized>(
        &mut self,
        timers: &mut T,
        delay_ms: u32,
    ) -> Result<(), HostError> {
        if let TimerState::Scheduled(handle) = self.state {
            match timers.reschedule(handle, delay_ms) {
                Ok(()) => {
                    debug!("Rescheduled {:?} timer: {} ms", self.purpose, delay_ms);
                    return Ok(());
                }
                Err(HostError::InvalidHandle) => {
                    debug!("{:?} timer {} is gone, scheduling anew", self.purpose, handle.0);
                    self.state = TimerState::Idle;
                }
                Err(e) => {
                    // Still pending with its old deadline
                    warn!("Reschedule of {:?} timer failed: {:?}", self.purpose, e);
                    return Err(e);
                }
            }
        }

        let handle = timers.schedule(delay_ms, self.purpose)?;
        debug!("Scheduled {:?} timer: {} ms", self.purpose, delay_ms);
        self.state = TimerState::Scheduled(handle);
        Ok(())
    }

    /// Record that a timer of this purpose fired
    ///
    /// Returns `true` and goes `Idle` if `handle` is the pending timer.
    /// A stale handle (from a timer that was replaced) is ignored.
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        match self.state {
            TimerState::Scheduled(pending) if pending == handle => {
                self.state = TimerState::Idle;
                true
            }
            _ => {
                debug!("Ignoring stale {:?} timer {}", self.purpose, handle.0);
                false
            }
        }
    }
}
