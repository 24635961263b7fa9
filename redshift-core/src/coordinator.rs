//! Event coordinator
//!
//! The coordinator owns everything with state and reacts to host events:
//! - Ticks and connectivity changes redraw the face
//! - Connectivity changes vibrate and show the Bluetooth popup
//! - Inbox messages update settings and the weather report
//! - Timers hide the popup and keep weather fresh
//!
//! Every handler is best-effort. Host failures are logged and the effect
//! they would have had is simply absent.

use redshift_protocol::keys::MSG_KEY_JS_READY;
use redshift_protocol::{fetch_weather_request, Dictionary, INBOX_SIZE, OUTBOX_SIZE};

use crate::config::{ConfigStore, Platform, Settings};
use crate::fmt::{debug, info, warn};
use crate::state::{Event, TimerPurpose, TimerSlot, TimerState};
use crate::traits::{Host, TimerHandle, TickUnit};
use crate::weather::{Weather, WeatherReport};

/// How long the Bluetooth popup stays up
pub const BLUETOOTH_POPUP_MS: u32 = 5_000;

/// Watchface state driven by host events
pub struct Coordinator {
    /// Current settings
    config: ConfigStore,
    /// Popup dismissal timer
    popup: TimerSlot,
    /// Weather refresh timer
    weather_timer: TimerSlot,
    /// Latest weather report
    weather: Weather,
    /// Popup is currently shown
    show_bluetooth_popup: bool,
    /// Phone script reported ready
    js_ready: bool,
    /// Tick granularity currently subscribed
    tick_unit: TickUnit,
}

impl Coordinator {
    /// Create a coordinator with default settings, without touching the host
    pub fn new(platform: Platform) -> Self {
        let config = ConfigStore::new(platform);
        let tick_unit = config.tick_unit();
        Self {
            config,
            popup: TimerSlot::new(TimerPurpose::BluetoothPopup),
            weather_timer: TimerSlot::new(TimerPurpose::WeatherRefresh),
            weather: Weather::new(),
            show_bluetooth_popup: false,
            js_ready: false,
            tick_unit,
        }
    }

    /// Create the coordinator with default settings and subscribe to the
    /// host services
    pub fn start<H: Host + ?Sized>(platform: Platform, host: &mut H) -> Self {
        let coordinator = Self::new(platform);

        if let Err(e) = host.subscribe_tick(coordinator.tick_unit) {
            warn!("Tick subscription failed: {:?}", e);
        }
        if let Err(e) = host.subscribe_connection() {
            warn!("Connection subscription failed: {:?}", e);
        }
        if let Err(e) = host.open(INBOX_SIZE, OUTBOX_SIZE) {
            warn!("Message channel open failed: {:?}", e);
        }

        info!("Watchface started");
        coordinator
    }

    /// Unsubscribe from the host services
    ///
    /// Pending timers are left to fire; the runtime discards them with
    /// the app.
    pub fn stop<H: Host + ?Sized>(self, host: &mut H) {
        host.unsubscribe_tick();
        host.unsubscribe_connection();
        host.close();
        info!("Watchface stopped");
    }

    /// Handle one host event
    pub fn dispatch<H: Host + ?Sized>(&mut self, host: &mut H, event: Event<'_>) {
        match event {
            Event::Tick => self.handle_tick(host),
            Event::Connectivity(connected) => self.handle_connectivity(host, connected),
            Event::Inbox(payload) => self.handle_inbox(host, payload),
            Event::TimerFired { purpose, handle } => self.handle_timer(host, purpose, handle),
        }
    }

    fn handle_tick<H: Host + ?Sized>(&mut self, host: &mut H) {
        host.mark_dirty();
    }

    fn handle_connectivity<H: Host + ?Sized>(&mut self, host: &mut H, connected: bool) {
        // Redraw to switch the connection logo
        host.mark_dirty();
        debug!("Connection changed: {}", connected);

        let settings = self.config.settings();
        let show_popup = settings.announces(connected);
        let vibrate = settings.vibrates(connected);

        if vibrate {
            if let Err(e) = host.double_pulse() {
                warn!("Vibration failed: {:?}", e);
            }
        }

        if !show_popup {
            return;
        }

        if let Err(e) = host.enable_interaction() {
            warn!("Backlight failed: {:?}", e);
        }

        match self.popup.arm(host, BLUETOOTH_POPUP_MS) {
            Ok(()) => self.show_bluetooth_popup = true,
            Err(e) => {
                warn!("Popup timer failed: {:?}", e);
                // Only show the popup if a timer will dismiss it
                self.show_bluetooth_popup = self.popup.is_scheduled();
            }
        }
    }

    fn handle_timer<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        purpose: TimerPurpose,
        handle: TimerHandle,
    ) {
        match purpose {
            TimerPurpose::BluetoothPopup => {
                if self.popup.fire(handle) {
                    self.show_bluetooth_popup = false;
                    host.mark_dirty();
                    debug!("Popup dismissed");
                }
            }
            TimerPurpose::WeatherRefresh => {
                // Skip a timer armed before refresh was turned off
                if self.weather_timer.fire(handle) && self.settings().weather_refresh != 0 {
                    self.update_weather(host, true);
                }
            }
        }
    }

    fn handle_inbox<H: Host + ?Sized>(&mut self, host: &mut H, payload: &[u8]) {
        let dict = match Dictionary::parse(payload) {
            Ok(dict) => dict,
            Err(e) => {
                warn!("Dropping unreadable message: {:?}", e);
                return;
            }
        };

        let report = self.config.apply_update(&dict, host);

        if report.tick_unit_changed {
            self.resubscribe_tick(host);
        }

        let now = host.now();
        let weather = self.weather.apply_message(&dict, now);
        if weather.received {
            debug!("Weather received at {}", now);
        } else if weather.failed {
            info!("Phone failed to fetch weather");
        }

        let ready = dict.find(MSG_KEY_JS_READY).is_some();
        if ready {
            info!("Phone script ready");
            self.js_ready = true;
        }

        if ready || report.weather_refresh_changed {
            self.update_weather(host, false);
        }
    }

    fn resubscribe_tick<H: Host + ?Sized>(&mut self, host: &mut H) {
        let unit = self.config.tick_unit();
        host.unsubscribe_tick();
        match host.subscribe_tick(unit) {
            Ok(()) => {
                debug!("Tick unit now {:?}", unit);
                self.tick_unit = unit;
            }
            Err(e) => warn!("Tick resubscription failed: {:?}", e),
        }
    }

    /// Request weather if due and keep the refresh timer armed
    ///
    /// `force` sends a request regardless of the report's age. Nothing
    /// happens until the phone script is ready.
    pub fn update_weather<H: Host + ?Sized>(&mut self, host: &mut H, force: bool) {
        if !self.js_ready {
            debug!("Weather update deferred until script is ready");
            return;
        }

        let refresh = self.config.settings().weather_refresh;
        if force || self.weather.is_stale(host.now(), refresh) {
            match fetch_weather_request() {
                Ok(request) => {
                    if let Err(e) = host.send(&request) {
                        warn!("Weather request failed: {:?}", e);
                    }
                }
                Err(e) => warn!("Weather request encoding failed: {:?}", e),
            }
        }

        if let Some(delay_ms) = self.config.settings().weather_refresh_ms() {
            if let Err(e) = self.weather_timer.arm(host, delay_ms) {
                warn!("Weather timer failed: {:?}", e);
            }
        }
    }

    /// Current settings
    pub fn settings(&self) -> &Settings {
        self.config.settings()
    }

    /// Is the Bluetooth popup shown
    pub fn show_bluetooth_popup(&self) -> bool {
        self.show_bluetooth_popup
    }

    /// Popup timer state
    pub fn popup_state(&self) -> TimerState {
        self.popup.state()
    }

    /// Weather timer state
    pub fn weather_timer_state(&self) -> TimerState {
        self.weather_timer.state()
    }

    /// Has the phone script reported ready
    pub fn js_ready(&self) -> bool {
        self.js_ready
    }

    /// Tick granularity currently subscribed
    pub fn tick_unit(&self) -> TickUnit {
        self.tick_unit
    }

    /// Weather cache, including expired reports and the failure flag
    pub fn weather(&self) -> &Weather {
        &self.weather
    }

    /// Weather report to draw at `now`, if one is fresh enough
    pub fn visible_weather(&self, now: u32) -> Option<&WeatherReport> {
        self.weather
            .visible(now, self.config.settings().weather_expiration)
    }
}
