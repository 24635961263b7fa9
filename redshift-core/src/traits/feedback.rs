//! Haptic and backlight feedback

use super::HostError;

/// Vibration motor
pub trait Vibes {
    /// Play the short double pulse used for connection changes
    fn double_pulse(&mut self) -> Result<(), HostError>;
}

/// Screen backlight
pub trait Backlight {
    /// Turn the light on as if the user had interacted with the watch
    ///
    /// The runtime turns it off again after its usual timeout.
    fn enable_interaction(&mut self) -> Result<(), HostError>;
}
