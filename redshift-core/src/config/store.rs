//! Settings store
//!
//! Holds the authoritative current settings and applies configuration
//! messages to them. A message may carry any subset of the known keys;
//! each tuple is applied or rejected on its own.

use redshift_protocol::{Dictionary, Inbound};

use super::decode::decode_setting;
use super::types::{Platform, Settings};
use crate::fmt::{debug, warn};
use crate::traits::{DisplaySurface, TickUnit};

/// Outcome of applying one configuration message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UpdateReport {
    /// Tuples that overwrote a setting
    pub applied: u16,
    /// Tuples whose key is not a setting
    pub ignored: u16,
    /// Tuples for a known setting that could not be decoded, plus
    /// unreadable tuples
    pub rejected: u16,
    /// The weather refresh interval changed
    pub weather_refresh_changed: bool,
    /// The tick granularity needed by the face changed
    pub tick_unit_changed: bool,
}

/// Owner of the current settings
#[derive(Debug, Clone)]
pub struct ConfigStore {
    platform: Platform,
    settings: Settings,
}

impl ConfigStore {
    /// Create a store holding the defaults for `platform`
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            settings: Settings::defaults(platform),
        }
    }

    /// Reset every setting to its default
    pub fn initialize_defaults(&mut self) {
        self.settings = Settings::defaults(self.platform);
    }

    /// Current settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Apply a configuration message
    ///
    /// Recognized keys are decoded and overwrite their setting. Unknown
    /// keys are skipped. A malformed tuple for a known key leaves that
    /// setting unchanged while the rest of the message still applies.
    /// The display is marked dirty once the message has been processed.
    pub fn apply_update<D: DisplaySurface + ?Sized>(
        &mut self,
        payload: &Dictionary<'_>,
        display: &mut D,
    ) -> UpdateReport {
        let mut report = UpdateReport::default();
        let refresh_before = self.settings.weather_refresh;
        let tick_before = self.settings.tick_unit();

        for entry in payload.iter() {
            let tuple = match entry {
                Ok(tuple) => tuple,
                Err(e) => {
                    warn!("Unreadable tuple in config message: {:?}", e);
                    report.rejected += 1;
                    continue;
                }
            };

            let key = match Inbound::classify(tuple) {
                Inbound::Config(key, _) => key,
                _ => {
                    report.ignored += 1;
                    continue;
                }
            };

            match decode_setting(key, &tuple) {
                Ok(value) => {
                    if self.settings.set(key, value) {
                        report.applied += 1;
                    } else {
                        report.rejected += 1;
                    }
                }
                Err(e) => {
                    warn!("Rejected setting {}: {:?}", key.id(), e);
                    report.rejected += 1;
                }
            }
        }

        report.weather_refresh_changed = self.settings.weather_refresh != refresh_before;
        report.tick_unit_changed = self.settings.tick_unit() != tick_before;

        debug!(
            "Config update: {} applied, {} ignored, {} rejected",
            report.applied, report.ignored, report.rejected
        );

        display.mark_dirty();
        report
    }

    /// Tick granularity for the current settings
    pub fn tick_unit(&self) -> TickUnit {
        self.settings.tick_unit()
    }
}
