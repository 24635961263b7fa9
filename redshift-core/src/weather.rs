//! Weather report cache
//!
//! The phone script fetches weather and pushes it as a dictionary of
//! weather tuples. The watch keeps the latest report together with the
//! time it arrived, which drives both the refresh decision and whether the
//! report is still shown.

use heapless::Vec;
use redshift_protocol::{Dictionary, DictionaryError, Inbound, MessageKey, Tuple, PERC_MAX_LEN};

use crate::config::DecodeError;
use crate::fmt::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One weather report as sent by the phone
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WeatherReport {
    /// Forecast low, in the unit chosen on the phone
    pub temp_low: i16,
    /// Forecast high
    pub temp_high: i16,
    /// Current temperature
    pub temp_cur: i16,
    /// Condition icon index
    pub icon: u8,
    /// Precipitation samples
    pub precipitation: Vec<u8, PERC_MAX_LEN>,
    /// Timestamp of the first precipitation sample (epoch seconds)
    pub precipitation_ts: u32,
    /// When the report arrived (epoch seconds)
    pub received_at: u32,
}

impl WeatherReport {
    /// Seconds since the report arrived
    ///
    /// A clock that moved backwards counts as age zero.
    pub fn age(&self, now: u32) -> u32 {
        now.saturating_sub(self.received_at)
    }
}

/// What a message changed in the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WeatherUpdate {
    /// A report field arrived and the report was replaced
    pub received: bool,
    /// The phone reported a failed fetch
    pub failed: bool,
    /// Weather tuples that could not be decoded
    pub rejected: u16,
}

/// Latest weather report and fetch status
#[derive(Debug, Clone, Default)]
pub struct Weather {
    report: Option<WeatherReport>,
    failed: bool,
}

impl Weather {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest report, regardless of age
    pub fn report(&self) -> Option<&WeatherReport> {
        self.report.as_ref()
    }

    /// Did the last fetch fail
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// Merge the weather tuples of an inbound message
    ///
    /// Fields present in the message overwrite those of the previous
    /// report; the result is stamped with `now`. A malformed field is
    /// skipped and the previous value kept.
    pub fn apply_message(&mut self, payload: &Dictionary<'_>, now: u32) -> WeatherUpdate {
        let mut update = WeatherUpdate::default();
        let mut next = self.report.clone().unwrap_or_default();
        let mut perc_len: Option<u8> = None;

        for tuple in payload.iter().filter_map(Result::ok) {
            let (key, tuple) = match Inbound::classify(tuple) {
                Inbound::Message(key, tuple) => (key, tuple),
                _ => continue,
            };

            let result = match key {
                MessageKey::WeatherTempLow => read(&tuple).map(|v| next.temp_low = v),
                MessageKey::WeatherTempHigh => read(&tuple).map(|v| next.temp_high = v),
                MessageKey::WeatherTempCur => read(&tuple).map(|v| next.temp_cur = v),
                MessageKey::WeatherIconCur => read(&tuple).map(|v| next.icon = v),
                MessageKey::WeatherPercDataTs => read(&tuple).map(|v| next.precipitation_ts = v),
                MessageKey::WeatherPercDataLen => read(&tuple).map(|v| perc_len = Some(v)),
                MessageKey::WeatherPercData => match tuple.bytes() {
                    Some(bytes) => {
                        let len = bytes.len().min(PERC_MAX_LEN);
                        next.precipitation.clear();
                        // Cannot fail: len is capped at capacity
                        let _ = next.precipitation.extend_from_slice(&bytes[..len]);
                        Ok(())
                    }
                    None => Err(DecodeError::Wire(DictionaryError::NotByteArray)),
                },
                MessageKey::WeatherFailed => {
                    update.failed = true;
                    continue;
                }
                MessageKey::FetchWeather | MessageKey::JsReady => continue,
            };

            match result {
                Ok(()) => update.received = true,
                Err(e) => {
                    warn!("Rejected weather field {}: {:?}", key.id(), e);
                    update.rejected += 1;
                }
            }
        }

        if let Some(len) = perc_len {
            next.precipitation.truncate(len as usize);
        }

        if update.received {
            next.received_at = now;
            self.report = Some(next);
            self.failed = false;
        } else if update.failed {
            self.failed = true;
        }

        update
    }

    /// Is a new fetch due for the given refresh interval in minutes
    ///
    /// True when no report has arrived yet. An interval of 0 turns periodic
    /// refresh off, so a stored report never goes stale.
    pub fn is_stale(&self, now: u32, refresh_minutes: u16) -> bool {
        match &self.report {
            Some(_) if refresh_minutes == 0 => false,
            Some(report) => report.age(now) >= u32::from(refresh_minutes) * 60,
            None => true,
        }
    }

    /// The report to draw, hiding one older than `expiration_minutes`
    ///
    /// An expiration of 0 keeps reports forever.
    pub fn visible(&self, now: u32, expiration_minutes: u16) -> Option<&WeatherReport> {
        let report = self.report.as_ref()?;
        if expiration_minutes != 0 && report.age(now) >= u32::from(expiration_minutes) * 60 {
            return None;
        }
        Some(report)
    }
}

fn read<T: TryFrom<i64>>(tuple: &Tuple<'_>) -> Result<T, DecodeError> {
    let raw = tuple.integer()?;
    T::try_from(raw).map_err(|_| DecodeError::OutOfRange(raw))
}
