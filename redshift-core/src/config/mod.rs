//! Watchface settings
//!
//! Typed settings with platform-dependent defaults, the decoder that turns
//! configuration tuples into setting values, and the store that applies
//! whole configuration messages.

pub mod decode;
pub mod store;
pub mod types;

pub use decode::{decode_setting, encode_setting, DecodeError};
pub use store::{ConfigStore, UpdateReport};
pub use types::{Color, Platform, SettingValue, Settings};
