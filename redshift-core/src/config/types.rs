//! Setting type definitions
//!
//! These types hold the watchface settings. Every setting is always
//! present: the store starts from [`Settings::defaults`] for the running
//! platform and only ever overwrites single values afterwards.

use redshift_protocol::{ConfigKey, ValueKind};

use crate::traits::TickUnit;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 8-bit ARGB palette color (`0bAARRGGBB`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color(pub u8);

impl Color {
    pub const BLACK: Color = Color(0b1100_0000);
    pub const WHITE: Color = Color(0b1111_1111);
    pub const DARK_GRAY: Color = Color(0b1101_0101);
    pub const LIGHT_GRAY: Color = Color(0b1110_1010);
    pub const JAEGER_GREEN: Color = Color(0b1100_1001);
    pub const YELLOW: Color = Color(0b1111_1100);
    pub const ORANGE: Color = Color(0b1111_0100);
    pub const RED: Color = Color(0b1111_0000);
    pub const VIVID_CERULEAN: Color = Color(0b1100_1011);

    /// Raw ARGB8 value
    pub const fn argb8(self) -> u8 {
        self.0
    }

    /// Check if the alpha bits mark this color fully opaque
    pub const fn is_opaque(self) -> bool {
        self.0 & 0b1100_0000 == 0b1100_0000
    }
}

/// Display capabilities of the watch running the face
///
/// Several defaults differ between color and black-and-white screens and
/// between round and rectangular ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Platform {
    /// Screen supports the 64-color palette
    pub color: bool,
    /// Screen is round
    pub round: bool,
}

impl Platform {
    /// Rectangular black-and-white screen
    pub const BLACK_WHITE: Platform = Platform::new(false, false);
    /// Rectangular color screen
    pub const COLOR_RECT: Platform = Platform::new(true, false);
    /// Round color screen
    pub const COLOR_ROUND: Platform = Platform::new(true, true);

    pub const fn new(color: bool, round: bool) -> Self {
        Self { color, round }
    }

    /// Pick `color` on color screens, `fallback` otherwise
    pub const fn color_or(self, color: Color, fallback: Color) -> Color {
        if self.color {
            color
        } else {
            fallback
        }
    }

    /// Pick `round` on round screens, `rect` otherwise
    pub const fn round_or(self, round: Color, rect: Color) -> Color {
        if self.round {
            round
        } else {
            rect
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Platform::COLOR_RECT
    }
}

/// A decoded setting value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingValue {
    Color(Color),
    Flag(bool),
    Byte(u8),
    Word(u16),
}

impl SettingValue {
    /// Kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            SettingValue::Color(_) => ValueKind::Color,
            SettingValue::Flag(_) => ValueKind::Flag,
            SettingValue::Byte(_) => ValueKind::Byte,
            SettingValue::Word(_) => ValueKind::Word,
        }
    }
}

/// All user-configurable settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Settings {
    // Dial
    pub color_outer_background: Color,
    pub color_inner_background: Color,
    pub color_minute_hand: Color,
    pub color_inner_minute_hand: Color,
    pub color_hour_hand: Color,
    pub color_inner_hour_hand: Color,
    pub color_circle: Color,
    pub color_ticks: Color,
    pub color_day_of_week: Color,
    pub color_date: Color,
    /// Minute tick style (0 = none)
    pub minute_ticks: u8,
    /// Hour tick style (0 = none)
    pub hour_ticks: u8,
    /// Draw a square face instead of a circle
    pub square: bool,
    /// Seconds hand mode (0 = off)
    pub seconds: u8,
    pub color_seconds: Color,
    /// Date layout variant
    pub date_format: u8,

    // Battery
    /// Battery indicator mode (0 = hidden)
    pub battery_logo: u8,
    pub color_battery_logo: Color,
    pub color_battery_30: Color,
    pub color_battery_20: Color,
    pub color_battery_10: Color,
    pub color_battery_bg_30: Color,
    pub color_battery_bg_20: Color,
    pub color_battery_bg_10: Color,

    // Bluetooth
    pub color_bluetooth_logo: Color,
    pub color_bluetooth_logo_2: Color,
    /// Show the connection logo
    pub bluetooth_logo: bool,
    pub vibrate_disconnect: bool,
    pub vibrate_reconnect: bool,
    /// Show the popup when the connection drops
    pub message_disconnect: bool,
    /// Show the popup when the connection comes back
    pub message_reconnect: bool,

    // Weather
    pub color_weather: Color,
    /// Minutes between weather fetches (0 = no periodic refresh)
    pub weather_refresh: u16,
    /// Minutes after which a weather report is no longer shown (0 = never)
    pub weather_expiration: u16,
}

impl Settings {
    /// Default settings for the given platform
    pub const fn defaults(platform: Platform) -> Self {
        let p = platform;
        Self {
            color_outer_background: p.color_or(Color::DARK_GRAY, Color::BLACK),
            color_inner_background: p.color_or(Color::WHITE, Color::WHITE),
            color_minute_hand: p.color_or(Color::BLACK, Color::BLACK),
            color_inner_minute_hand: p.color_or(Color::LIGHT_GRAY, Color::BLACK),
            color_hour_hand: p.color_or(Color::JAEGER_GREEN, Color::BLACK),
            color_inner_hour_hand: p.color_or(Color::LIGHT_GRAY, Color::BLACK),
            color_circle: p.color_or(Color::BLACK, Color::BLACK),
            color_ticks: p.color_or(Color::BLACK, Color::BLACK),
            color_day_of_week: p.color_or(Color::JAEGER_GREEN, Color::BLACK),
            color_date: p.color_or(Color::BLACK, Color::BLACK),
            minute_ticks: 1,
            hour_ticks: 1,
            square: false,
            seconds: 0,
            color_seconds: p.color_or(Color::JAEGER_GREEN, Color::BLACK),
            date_format: 0,

            battery_logo: 1,
            color_battery_logo: p.color_or(p.round_or(Color::DARK_GRAY, Color::BLACK), Color::WHITE),
            color_battery_30: p.color_or(p.round_or(Color::YELLOW, Color::BLACK), Color::WHITE),
            color_battery_20: p.color_or(p.round_or(Color::ORANGE, Color::BLACK), Color::WHITE),
            color_battery_10: p.color_or(p.round_or(Color::RED, Color::BLACK), Color::WHITE),
            color_battery_bg_30: p.color_or(p.round_or(Color::WHITE, Color::YELLOW), Color::BLACK),
            color_battery_bg_20: p.color_or(p.round_or(Color::WHITE, Color::ORANGE), Color::BLACK),
            color_battery_bg_10: p.color_or(p.round_or(Color::WHITE, Color::RED), Color::BLACK),

            color_bluetooth_logo: p.color_or(Color::WHITE, Color::BLACK),
            color_bluetooth_logo_2: p.color_or(Color::BLACK, Color::WHITE),
            bluetooth_logo: true,
            vibrate_disconnect: true,
            vibrate_reconnect: true,
            message_disconnect: true,
            message_reconnect: true,

            color_weather: p.color_or(Color::BLACK, Color::BLACK),
            weather_refresh: 30,
            weather_expiration: 3 * 60,
        }
    }

    /// Read a setting by key
    pub fn get(&self, key: ConfigKey) -> SettingValue {
        use ConfigKey::*;
        use SettingValue::{Byte, Flag, Word};

        match key {
            ColorOuterBackground => SettingValue::Color(self.color_outer_background),
            ColorInnerBackground => SettingValue::Color(self.color_inner_background),
            ColorMinuteHand => SettingValue::Color(self.color_minute_hand),
            ColorInnerMinuteHand => SettingValue::Color(self.color_inner_minute_hand),
            ColorHourHand => SettingValue::Color(self.color_hour_hand),
            ColorInnerHourHand => SettingValue::Color(self.color_inner_hour_hand),
            ColorCircle => SettingValue::Color(self.color_circle),
            ColorTicks => SettingValue::Color(self.color_ticks),
            ColorDayOfWeek => SettingValue::Color(self.color_day_of_week),
            ColorDate => SettingValue::Color(self.color_date),
            BatteryLogo => Byte(self.battery_logo),
            ColorBatteryLogo => SettingValue::Color(self.color_battery_logo),
            ColorBattery30 => SettingValue::Color(self.color_battery_30),
            ColorBattery20 => SettingValue::Color(self.color_battery_20),
            ColorBattery10 => SettingValue::Color(self.color_battery_10),
            ColorBatteryBg30 => SettingValue::Color(self.color_battery_bg_30),
            ColorBatteryBg20 => SettingValue::Color(self.color_battery_bg_20),
            ColorBatteryBg10 => SettingValue::Color(self.color_battery_bg_10),
            ColorBluetoothLogo => SettingValue::Color(self.color_bluetooth_logo),
            ColorBluetoothLogo2 => SettingValue::Color(self.color_bluetooth_logo_2),
            BluetoothLogo => Flag(self.bluetooth_logo),
            VibrateDisconnect => Flag(self.vibrate_disconnect),
            VibrateReconnect => Flag(self.vibrate_reconnect),
            MessageDisconnect => Flag(self.message_disconnect),
            MessageReconnect => Flag(self.message_reconnect),
            MinuteTicks => Byte(self.minute_ticks),
            HourTicks => Byte(self.hour_ticks),
            ColorWeather => SettingValue::Color(self.color_weather),
            WeatherRefresh => Word(self.weather_refresh),
            WeatherExpiration => Word(self.weather_expiration),
            Square => Flag(self.square),
            Seconds => Byte(self.seconds),
            ColorSeconds => SettingValue::Color(self.color_seconds),
            DateFormat => Byte(self.date_format),
        }
    }

    /// Overwrite a setting by key
    ///
    /// Returns `false` and leaves the setting untouched if the value kind
    /// does not match the key.
    pub fn set(&mut self, key: ConfigKey, value: SettingValue) -> bool {
        use ConfigKey::*;
        use SettingValue::{Byte, Flag, Word};

        match (key, value) {
            (ColorOuterBackground, SettingValue::Color(c)) => self.color_outer_background = c,
            (ColorInnerBackground, SettingValue::Color(c)) => self.color_inner_background = c,
            (ColorMinuteHand, SettingValue::Color(c)) => self.color_minute_hand = c,
            (ColorInnerMinuteHand, SettingValue::Color(c)) => self.color_inner_minute_hand = c,
            (ColorHourHand, SettingValue::Color(c)) => self.color_hour_hand = c,
            (ColorInnerHourHand, SettingValue::Color(c)) => self.color_inner_hour_hand = c,
            (ColorCircle, SettingValue::Color(c)) => self.color_circle = c,
            (ColorTicks, SettingValue::Color(c)) => self.color_ticks = c,
            (ColorDayOfWeek, SettingValue::Color(c)) => self.color_day_of_week = c,
            (ColorDate, SettingValue::Color(c)) => self.color_date = c,
            (BatteryLogo, Byte(v)) => self.battery_logo = v,
            (ColorBatteryLogo, SettingValue::Color(c)) => self.color_battery_logo = c,
            (ColorBattery30, SettingValue::Color(c)) => self.color_battery_30 = c,
            (ColorBattery20, SettingValue::Color(c)) => self.color_battery_20 = c,
            (ColorBattery10, SettingValue::Color(c)) => self.color_battery_10 = c,
            (ColorBatteryBg30, SettingValue::Color(c)) => self.color_battery_bg_30 = c,
            (ColorBatteryBg20, SettingValue::Color(c)) => self.color_battery_bg_20 = c,
            (ColorBatteryBg10, SettingValue::Color(c)) => self.color_battery_bg_10 = c,
            (ColorBluetoothLogo, SettingValue::Color(c)) => self.color_bluetooth_logo = c,
            (ColorBluetoothLogo2, SettingValue::Color(c)) => self.color_bluetooth_logo_2 = c,
            (BluetoothLogo, Flag(v)) => self.bluetooth_logo = v,
            (VibrateDisconnect, Flag(v)) => self.vibrate_disconnect = v,
            (VibrateReconnect, Flag(v)) => self.vibrate_reconnect = v,
            (MessageDisconnect, Flag(v)) => self.message_disconnect = v,
            (MessageReconnect, Flag(v)) => self.message_reconnect = v,
            (MinuteTicks, Byte(v)) => self.minute_ticks = v,
            (HourTicks, Byte(v)) => self.hour_ticks = v,
            (ColorWeather, SettingValue::Color(c)) => self.color_weather = c,
            (WeatherRefresh, Word(v)) => self.weather_refresh = v,
            (WeatherExpiration, Word(v)) => self.weather_expiration = v,
            (Square, Flag(v)) => self.square = v,
            (Seconds, Byte(v)) => self.seconds = v,
            (ColorSeconds, SettingValue::Color(c)) => self.color_seconds = c,
            (DateFormat, Byte(v)) => self.date_format = v,
            _ => return false,
        }
        true
    }

    /// Should a connection change of this direction show the popup
    pub fn announces(&self, connected: bool) -> bool {
        if connected {
            self.message_reconnect
        } else {
            self.message_disconnect
        }
    }

    /// Should a connection change of this direction vibrate
    pub fn vibrates(&self, connected: bool) -> bool {
        if connected {
            self.vibrate_reconnect
        } else {
            self.vibrate_disconnect
        }
    }

    /// Tick granularity needed to draw the face
    pub fn tick_unit(&self) -> TickUnit {
        if self.seconds != 0 {
            TickUnit::Second
        } else {
            TickUnit::Minute
        }
    }

    /// Weather refresh interval in milliseconds, if periodic refresh is on
    pub fn weather_refresh_ms(&self) -> Option<u32> {
        match self.weather_refresh {
            0 => None,
            minutes => Some(u32::from(minutes) * 60 * 1000),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::defaults(Platform::default())
    }
}
