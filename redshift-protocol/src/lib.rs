//! Phone/watch message protocol
//!
//! This crate defines the key/value dictionary exchanged between the
//! watchface and its companion phone script over the host's message
//! channel. Both directions use the same tuple encoding:
//!
//! ```text
//! ┌───────┬──────────────────────────────────────────┬─────┐
//! │ COUNT │ TUPLE 0                                  │ ... │
//! │ 1B    │ KEY 4B │ TYPE 1B │ LENGTH 2B │ VALUE     │     │
//! └───────┴──────────────────────────────────────────┴─────┘
//! ```
//!
//! Keys 1..=34 are settings, keys from 100 are weather and control
//! messages.

#![no_std]
#![deny(unsafe_code)]

pub mod dictionary;
pub mod keys;
pub mod messages;

pub use dictionary::{Dictionary, DictionaryError, DictionaryWriter, Tuple, TupleType, Tuples};
pub use keys::{ConfigKey, MessageKey, ValueKind, CONFIG_KEY_COUNT, PERC_MAX_LEN};
pub use messages::{fetch_weather_request, Inbound};

/// Inbox buffer size requested from the host message channel
pub const INBOX_SIZE: usize = 256;

/// Outbox buffer size requested from the host message channel
pub const OUTBOX_SIZE: usize = 64;
