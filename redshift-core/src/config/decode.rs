//! Setting decoding from dictionary tuples

use redshift_protocol::{ConfigKey, DictionaryError, DictionaryWriter, Tuple, ValueKind};

use super::types::{Color, SettingValue};

/// Reasons a tuple for a known setting is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Tuple is not a readable integer (wrong wire type or width)
    Wire(DictionaryError),
    /// Integer does not fit the setting
    OutOfRange(i64),
}

impl From<DictionaryError> for DecodeError {
    fn from(e: DictionaryError) -> Self {
        DecodeError::Wire(e)
    }
}

impl SettingValue {
    /// Decode a tuple into a value of the given kind
    ///
    /// Any integer wire type of width 1, 2 or 4 is accepted as long as the
    /// value fits: colors and bytes need `0..=255`, flags need 0 or 1, words
    /// need `0..=65535`.
    pub fn decode(kind: ValueKind, tuple: &Tuple<'_>) -> Result<Self, DecodeError> {
        let raw = tuple.integer()?;
        let out_of_range = |_| DecodeError::OutOfRange(raw);

        match kind {
            ValueKind::Color => u8::try_from(raw)
                .map(|v| SettingValue::Color(Color(v)))
                .map_err(out_of_range),
            ValueKind::Flag => match raw {
                0 => Ok(SettingValue::Flag(false)),
                1 => Ok(SettingValue::Flag(true)),
                _ => Err(DecodeError::OutOfRange(raw)),
            },
            ValueKind::Byte => u8::try_from(raw)
                .map(SettingValue::Byte)
                .map_err(out_of_range),
            ValueKind::Word => u16::try_from(raw)
                .map(SettingValue::Word)
                .map_err(out_of_range),
        }
    }
}

/// Decode a tuple for a specific setting key
pub fn decode_setting(key: ConfigKey, tuple: &Tuple<'_>) -> Result<SettingValue, DecodeError> {
    SettingValue::decode(key.kind(), tuple)
}

/// Append a setting with the wire type its key expects
///
/// Colors, flags and bytes go out as 1-byte unsigned integers, words as
/// 2-byte unsigned integers. Returns `Ok(false)` without writing if the
/// value kind does not match the key.
pub fn encode_setting<const N: usize>(
    writer: &mut DictionaryWriter<N>,
    key: ConfigKey,
    value: SettingValue,
) -> Result<bool, DictionaryError> {
    if value.kind() != key.kind() {
        return Ok(false);
    }
    match value {
        SettingValue::Color(c) => writer.push_u8(key.id(), c.argb8())?,
        SettingValue::Flag(f) => writer.push_u8(key.id(), u8::from(f))?,
        SettingValue::Byte(v) => writer.push_u8(key.id(), v)?,
        SettingValue::Word(v) => writer.push_u16(key.id(), v)?,
    };
    Ok(true)
}
