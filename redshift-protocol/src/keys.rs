//! Message key catalogue
//!
//! Keys 1..=34 carry user settings from the phone configuration page.
//! Keys from 100 upward carry weather data and control messages exchanged
//! with the phone script.

/// Semantic kind of a setting value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValueKind {
    /// 8-bit ARGB palette color
    Color,
    /// Boolean flag (0 or 1 on the wire)
    Flag,
    /// Small integer stored in one byte
    Byte,
    /// Integer stored in two bytes
    Word,
}

macro_rules! config_keys {
    ($($variant:ident = $id:literal, $kind:ident, $name:literal;)+) => {
        /// Keys of all user-configurable settings
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub enum ConfigKey {
            $($variant,)+
        }

        /// Number of config keys
        pub const CONFIG_KEY_COUNT: usize = [$($id),+].len();

        impl ConfigKey {
            /// Every config key, in wire-id order
            pub const ALL: [ConfigKey; CONFIG_KEY_COUNT] = [$(ConfigKey::$variant,)+];

            /// Look up a config key by its wire id
            pub fn from_id(id: u32) -> Option<Self> {
                match id {
                    $($id => Some(ConfigKey::$variant),)+
                    _ => None,
                }
            }

            /// Wire id of this key
            pub fn id(self) -> u32 {
                match self {
                    $(ConfigKey::$variant => $id,)+
                }
            }

            /// Value kind expected for this key
            pub fn kind(self) -> ValueKind {
                match self {
                    $(ConfigKey::$variant => ValueKind::$kind,)+
                }
            }

            /// Setting name as used by the configuration page
            pub fn name(self) -> &'static str {
                match self {
                    $(ConfigKey::$variant => $name,)+
                }
            }
        }
    };
}

config_keys! {
    ColorOuterBackground = 1, Color, "color_outer_background";
    ColorInnerBackground = 2, Color, "color_inner_background";
    ColorMinuteHand = 3, Color, "color_minute_hand";
    ColorInnerMinuteHand = 4, Color, "color_inner_minute_hand";
    ColorHourHand = 5, Color, "color_hour_hand";
    ColorInnerHourHand = 6, Color, "color_inner_hour_hand";
    ColorCircle = 7, Color, "color_circle";
    ColorTicks = 8, Color, "color_ticks";
    ColorDayOfWeek = 9, Color, "color_day_of_week";
    ColorDate = 10, Color, "color_date";
    BatteryLogo = 11, Byte, "battery_logo";
    ColorBatteryLogo = 12, Color, "color_battery_logo";
    ColorBattery30 = 13, Color, "color_battery_30";
    ColorBattery20 = 14, Color, "color_battery_20";
    ColorBattery10 = 15, Color, "color_battery_10";
    ColorBatteryBg30 = 16, Color, "color_battery_bg_30";
    ColorBatteryBg20 = 17, Color, "color_battery_bg_20";
    ColorBatteryBg10 = 18, Color, "color_battery_bg_10";
    ColorBluetoothLogo = 19, Color, "color_bluetooth_logo";
    ColorBluetoothLogo2 = 20, Color, "color_bluetooth_logo_2";
    BluetoothLogo = 21, Flag, "bluetooth_logo";
    VibrateDisconnect = 22, Flag, "vibrate_disconnect";
    VibrateReconnect = 23, Flag, "vibrate_reconnect";
    MessageDisconnect = 24, Flag, "message_disconnect";
    MessageReconnect = 25, Flag, "message_reconnect";
    MinuteTicks = 26, Byte, "minute_ticks";
    HourTicks = 27, Byte, "hour_ticks";
    ColorWeather = 28, Color, "color_weather";
    WeatherRefresh = 29, Word, "weather_refresh";
    WeatherExpiration = 30, Word, "weather_expiration";
    Square = 31, Flag, "square";
    Seconds = 32, Byte, "seconds";
    ColorSeconds = 33, Color, "color_seconds";
    DateFormat = 34, Byte, "date_format";
}

// Message key ids
pub const MSG_KEY_WEATHER_TEMP_LOW: u32 = 100;
pub const MSG_KEY_WEATHER_TEMP_HIGH: u32 = 101;
pub const MSG_KEY_WEATHER_TEMP_CUR: u32 = 102;
pub const MSG_KEY_WEATHER_ICON_CUR: u32 = 103;
pub const MSG_KEY_WEATHER_PERC_DATA: u32 = 104;
pub const MSG_KEY_WEATHER_PERC_DATA_LEN: u32 = 105;
pub const MSG_KEY_WEATHER_PERC_DATA_TS: u32 = 106;
pub const MSG_KEY_FETCH_WEATHER: u32 = 107;
pub const MSG_KEY_WEATHER_FAILED: u32 = 108;
pub const MSG_KEY_JS_READY: u32 = 109;

/// Maximum number of precipitation samples in a weather report
pub const PERC_MAX_LEN: usize = 30;

/// Keys of weather and control messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessageKey {
    /// Forecast low temperature
    WeatherTempLow,
    /// Forecast high temperature
    WeatherTempHigh,
    /// Current temperature
    WeatherTempCur,
    /// Current condition icon
    WeatherIconCur,
    /// Precipitation samples (byte array)
    WeatherPercData,
    /// Number of valid precipitation samples
    WeatherPercDataLen,
    /// Timestamp of the first precipitation sample
    WeatherPercDataTs,
    /// Watch asks the phone to fetch weather
    FetchWeather,
    /// Phone failed to fetch weather
    WeatherFailed,
    /// Phone script finished loading
    JsReady,
}

impl MessageKey {
    /// Look up a message key by its wire id
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            MSG_KEY_WEATHER_TEMP_LOW => Some(MessageKey::WeatherTempLow),
            MSG_KEY_WEATHER_TEMP_HIGH => Some(MessageKey::WeatherTempHigh),
            MSG_KEY_WEATHER_TEMP_CUR => Some(MessageKey::WeatherTempCur),
            MSG_KEY_WEATHER_ICON_CUR => Some(MessageKey::WeatherIconCur),
            MSG_KEY_WEATHER_PERC_DATA => Some(MessageKey::WeatherPercData),
            MSG_KEY_WEATHER_PERC_DATA_LEN => Some(MessageKey::WeatherPercDataLen),
            MSG_KEY_WEATHER_PERC_DATA_TS => Some(MessageKey::WeatherPercDataTs),
            MSG_KEY_FETCH_WEATHER => Some(MessageKey::FetchWeather),
            MSG_KEY_WEATHER_FAILED => Some(MessageKey::WeatherFailed),
            MSG_KEY_JS_READY => Some(MessageKey::JsReady),
            _ => None,
        }
    }

    /// Wire id of this key
    pub fn id(self) -> u32 {
        match self {
            MessageKey::WeatherTempLow => MSG_KEY_WEATHER_TEMP_LOW,
            MessageKey::WeatherTempHigh => MSG_KEY_WEATHER_TEMP_HIGH,
            MessageKey::WeatherTempCur => MSG_KEY_WEATHER_TEMP_CUR,
            MessageKey::WeatherIconCur => MSG_KEY_WEATHER_ICON_CUR,
            MessageKey::WeatherPercData => MSG_KEY_WEATHER_PERC_DATA,
            MessageKey::WeatherPercDataLen => MSG_KEY_WEATHER_PERC_DATA_LEN,
            MessageKey::WeatherPercDataTs => MSG_KEY_WEATHER_PERC_DATA_TS,
            MessageKey::FetchWeather => MSG_KEY_FETCH_WEATHER,
            MessageKey::WeatherFailed => MSG_KEY_WEATHER_FAILED,
            MessageKey::JsReady => MSG_KEY_JS_READY,
        }
    }

    /// Returns true if this key carries part of a weather report
    pub fn is_weather_data(&self) -> bool {
        matches!(
            self,
            MessageKey::WeatherTempLow
                | MessageKey::WeatherTempHigh
                | MessageKey::WeatherTempCur
                | MessageKey::WeatherIconCur
                | MessageKey::WeatherPercData
                | MessageKey::WeatherPercDataLen
                | MessageKey::WeatherPercDataTs
        )
    }
}
