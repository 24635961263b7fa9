//! Message classification
//!
//! Inbound dictionaries mix three groups of tuples:
//! - Phone → Watch settings: config keys from the configuration page
//! - Phone → Watch weather: report fields and fetch failures
//! - Phone → Watch control: script readiness
//!
//! The only outbound message is the weather fetch request.

use heapless::Vec;

use crate::dictionary::{DictionaryError, DictionaryWriter, Tuple};
use crate::keys::{ConfigKey, MessageKey, MSG_KEY_FETCH_WEATHER};
use crate::OUTBOX_SIZE;

/// An inbound tuple sorted by the group its key belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Inbound<'a> {
    /// A setting value
    Config(ConfigKey, Tuple<'a>),
    /// A weather or control message
    Message(MessageKey, Tuple<'a>),
    /// Key not known to this firmware
    Unknown(Tuple<'a>),
}

impl<'a> Inbound<'a> {
    /// Classify a tuple by its key
    pub fn classify(tuple: Tuple<'a>) -> Self {
        if let Some(key) = ConfigKey::from_id(tuple.key) {
            Inbound::Config(key, tuple)
        } else if let Some(key) = MessageKey::from_id(tuple.key) {
            Inbound::Message(key, tuple)
        } else {
            Inbound::Unknown(tuple)
        }
    }
}

/// Encode the request asking the phone script to fetch weather
pub fn fetch_weather_request() -> Result<Vec<u8, OUTBOX_SIZE>, DictionaryError> {
    let mut writer = DictionaryWriter::<OUTBOX_SIZE>::new()?;
    writer.push_u8(MSG_KEY_FETCH_WEATHER, 1)?;
    Ok(writer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{Dictionary, TupleType};
    use crate::keys::MSG_KEY_JS_READY;

    fn tuple(key: u32) -> Tuple<'static> {
        Tuple {
            key,
            tuple_type: TupleType::Uint,
            value: &[1],
        }
    }

    #[test]
    fn test_classify_config() {
        let t = tuple(ConfigKey::ColorDate.id());
        assert_eq!(Inbound::classify(t), Inbound::Config(ConfigKey::ColorDate, t));
    }

    #[test]
    fn test_classify_message() {
        let t = tuple(MSG_KEY_JS_READY);
        assert_eq!(Inbound::classify(t), Inbound::Message(MessageKey::JsReady, t));
    }

    #[test]
    fn test_classify_unknown() {
        let t = tuple(5000);
        assert_eq!(Inbound::classify(t), Inbound::Unknown(t));
    }

    #[test]
    fn test_fetch_weather_request() {
        let encoded = fetch_weather_request().unwrap();
        let dict = Dictionary::parse(&encoded).unwrap();
        assert_eq!(dict.len(), 1);

        let t = dict.find(MSG_KEY_FETCH_WEATHER).unwrap();
        assert_eq!(t.integer(), Ok(1));
    }
}
