//! Host-agnostic core logic for the Redshift watchface
//!
//! This crate contains the parts of the watchface with real state, kept
//! apart from drawing and the vendor runtime:
//!
//! - Host service traits (display, timers, haptics, message channel)
//! - Settings with platform defaults and the configuration decoder
//! - Per-purpose timer slots
//! - Weather report cache
//! - The coordinator that reacts to host events

#![no_std]
#![deny(unsafe_code)]

mod fmt;

pub mod config;
pub mod coordinator;
pub mod state;
pub mod traits;
pub mod weather;

pub use coordinator::{Coordinator, BLUETOOTH_POPUP_MS};
