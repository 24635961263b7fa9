//! Recording host used by the integration tests
//!
//! Keeps a simulated millisecond clock; timers fire when the clock is
//! advanced past their deadline.

#![allow(dead_code)]

use redshift_core::config::{encode_setting, SettingValue};
use redshift_core::state::{Event, TimerPurpose};
use redshift_core::traits::{
    Backlight, Clock, ConnectivityService, DisplaySurface, HostError, MessageChannel,
    TickService, TickUnit, TimerHandle, TimerService, Vibes,
};
use redshift_protocol::{ConfigKey, DictionaryWriter, INBOX_SIZE};

/// Epoch seconds the simulated clock starts at
pub const EPOCH: u32 = 1_700_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveTimer {
    pub handle: TimerHandle,
    pub purpose: TimerPurpose,
    pub deadline_ms: u64,
}

#[derive(Debug, Default)]
pub struct MockHost {
    pub dirty: u32,
    pub pulses: u32,
    pub backlight: u32,
    pub sent: Vec<Vec<u8>>,
    pub timers: Vec<LiveTimer>,
    pub schedule_calls: u32,
    pub tick: Option<TickUnit>,
    pub tick_subscriptions: u32,
    pub connection: bool,
    pub channel: Option<(usize, usize)>,
    pub elapsed_ms: u64,
    next_handle: u32,

    pub fail_schedule: bool,
    pub fail_reschedule: Option<HostError>,
    pub fail_vibes: bool,
    pub fail_backlight: bool,
    pub fail_send: bool,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pending timers of one purpose
    pub fn timers_for(&self, purpose: TimerPurpose) -> Vec<LiveTimer> {
        self.timers
            .iter()
            .copied()
            .filter(|t| t.purpose == purpose)
            .collect()
    }

    /// Move the clock forward and return the timer events that became due
    pub fn advance(&mut self, ms: u64) -> Vec<Event<'static>> {
        self.elapsed_ms += ms;
        let now = self.elapsed_ms;

        let mut due: Vec<LiveTimer> = self
            .timers
            .iter()
            .copied()
            .filter(|t| t.deadline_ms <= now)
            .collect();
        due.sort_by_key(|t| t.deadline_ms);
        self.timers.retain(|t| t.deadline_ms > now);

        due.into_iter()
            .map(|t| Event::TimerFired {
                purpose: t.purpose,
                handle: t.handle,
            })
            .collect()
    }
}

impl DisplaySurface for MockHost {
    fn mark_dirty(&mut self) {
        self.dirty += 1;
    }
}

impl TimerService for MockHost {
    fn schedule(&mut self, delay_ms: u32, purpose: TimerPurpose) -> Result<TimerHandle, HostError> {
        self.schedule_calls += 1;
        if self.fail_schedule {
            return Err(HostError::OutOfMemory);
        }
        self.next_handle += 1;
        let handle = TimerHandle(self.next_handle);
        self.timers.push(LiveTimer {
            handle,
            purpose,
            deadline_ms: self.elapsed_ms + u64::from(delay_ms),
        });
        Ok(handle)
    }

    fn reschedule(&mut self, handle: TimerHandle, delay_ms: u32) -> Result<(), HostError> {
        if let Some(e) = self.fail_reschedule {
            return Err(e);
        }
        let now = self.elapsed_ms;
        let timer = self
            .timers
            .iter_mut()
            .find(|t| t.handle == handle)
            .ok_or(HostError::InvalidHandle)?;
        timer.deadline_ms = now + u64::from(delay_ms);
        Ok(())
    }
}

impl Vibes for MockHost {
    fn double_pulse(&mut self) -> Result<(), HostError> {
        if self.fail_vibes {
            return Err(HostError::Unavailable);
        }
        self.pulses += 1;
        Ok(())
    }
}

impl Backlight for MockHost {
    fn enable_interaction(&mut self) -> Result<(), HostError> {
        if self.fail_backlight {
            return Err(HostError::Unavailable);
        }
        self.backlight += 1;
        Ok(())
    }
}

impl MessageChannel for MockHost {
    fn open(&mut self, inbox_size: usize, outbox_size: usize) -> Result<(), HostError> {
        self.channel = Some((inbox_size, outbox_size));
        Ok(())
    }

    fn close(&mut self) {
        self.channel = None;
    }

    fn send(&mut self, payload: &[u8]) -> Result<(), HostError> {
        if self.fail_send {
            return Err(HostError::NotConnected);
        }
        self.sent.push(payload.to_vec());
        Ok(())
    }
}

impl TickService for MockHost {
    fn subscribe_tick(&mut self, unit: TickUnit) -> Result<(), HostError> {
        self.tick = Some(unit);
        self.tick_subscriptions += 1;
        Ok(())
    }

    fn unsubscribe_tick(&mut self) {
        self.tick = None;
    }
}

impl ConnectivityService for MockHost {
    fn subscribe_connection(&mut self) -> Result<(), HostError> {
        self.connection = true;
        Ok(())
    }

    fn unsubscribe_connection(&mut self) {
        self.connection = false;
    }
}

impl Clock for MockHost {
    fn now(&self) -> u32 {
        EPOCH + (self.elapsed_ms / 1000) as u32
    }
}

/// Encode a configuration message
pub fn config_message(settings: &[(ConfigKey, SettingValue)]) -> Vec<u8> {
    let mut writer = DictionaryWriter::<INBOX_SIZE>::new().expect("writer");
    for &(key, value) in settings {
        assert!(encode_setting(&mut writer, key, value).expect("encode"));
    }
    writer.finish().to_vec()
}

/// Encode a message built directly on a writer
pub fn message(build: impl FnOnce(&mut DictionaryWriter<INBOX_SIZE>)) -> Vec<u8> {
    let mut writer = DictionaryWriter::<INBOX_SIZE>::new().expect("writer");
    build(&mut writer);
    writer.finish().to_vec()
}
