//! Property tests for configuration messages.

use proptest::prelude::*;
use redshift_core::config::{encode_setting, Color, ConfigStore, Platform, SettingValue, Settings};
use redshift_core::traits::DisplaySurface;
use redshift_protocol::{
    ConfigKey, Dictionary, DictionaryWriter, TupleType, ValueKind, CONFIG_KEY_COUNT, INBOX_SIZE,
};

#[derive(Default)]
struct CountingDisplay {
    dirty: u32,
}

impl DisplaySurface for CountingDisplay {
    fn mark_dirty(&mut self) {
        self.dirty += 1;
    }
}

fn platform() -> impl Strategy<Value = Platform> {
    (any::<bool>(), any::<bool>()).prop_map(|(color, round)| Platform::new(color, round))
}

fn key() -> impl Strategy<Value = ConfigKey> {
    (0..CONFIG_KEY_COUNT).prop_map(|i| ConfigKey::ALL[i])
}

fn value_for(kind: ValueKind) -> BoxedStrategy<SettingValue> {
    match kind {
        ValueKind::Color => any::<u8>().prop_map(|v| SettingValue::Color(Color(v))).boxed(),
        ValueKind::Flag => any::<bool>().prop_map(SettingValue::Flag).boxed(),
        ValueKind::Byte => any::<u8>().prop_map(SettingValue::Byte).boxed(),
        ValueKind::Word => any::<u16>().prop_map(SettingValue::Word).boxed(),
    }
}

fn setting() -> impl Strategy<Value = (ConfigKey, SettingValue)> {
    key().prop_flat_map(|key| value_for(key.kind()).prop_map(move |value| (key, value)))
}

fn raw(value: SettingValue) -> u32 {
    match value {
        SettingValue::Color(c) => u32::from(c.argb8()),
        SettingValue::Flag(f) => u32::from(f),
        SettingValue::Byte(v) => u32::from(v),
        SettingValue::Word(v) => u32::from(v),
    }
}

fn apply(store: &mut ConfigStore, payload: &[u8]) {
    let dict = Dictionary::parse(payload).unwrap();
    let mut display = CountingDisplay::default();
    store.apply_update(&dict, &mut display);
    assert_eq!(display.dirty, 1);
}

proptest! {
    /// Resetting after any update restores the platform defaults.
    #[test]
    fn initialize_defaults_restores_every_setting(
        platform in platform(),
        settings in proptest::collection::vec(setting(), 0..20),
    ) {
        let mut store = ConfigStore::new(platform);
        let mut writer = DictionaryWriter::<INBOX_SIZE>::new().unwrap();
        for (key, value) in settings {
            encode_setting(&mut writer, key, value).unwrap();
        }
        apply(&mut store, &writer.finish());

        store.initialize_defaults();
        for key in ConfigKey::ALL {
            prop_assert_eq!(store.settings().get(key), Settings::defaults(platform).get(key));
        }
    }

    /// A well-formed message changes exactly the settings it names.
    #[test]
    fn update_changes_only_named_settings(
        platform in platform(),
        settings in proptest::collection::vec(setting(), 0..20),
    ) {
        let mut store = ConfigStore::new(platform);
        let mut writer = DictionaryWriter::<INBOX_SIZE>::new().unwrap();
        let mut expected = Settings::defaults(platform);
        for &(key, value) in &settings {
            encode_setting(&mut writer, key, value).unwrap();
            prop_assert!(expected.set(key, value));
        }
        apply(&mut store, &writer.finish());

        prop_assert_eq!(store.settings(), &expected);
    }

    /// One malformed entry keeps its setting and the rest still applies.
    #[test]
    fn malformed_entry_among_valid_ones(
        settings in proptest::collection::vec(setting(), 1..16),
        bad_key in key(),
        bad_position in any::<prop::sample::Index>(),
        bad_shape in 0u8..3,
    ) {
        let mut store = ConfigStore::new(Platform::COLOR_RECT);
        let mut expected = Settings::defaults(Platform::COLOR_RECT);
        let bad_at = bad_position.index(settings.len() + 1);

        let mut writer = DictionaryWriter::<INBOX_SIZE>::new().unwrap();
        for (i, &(key, value)) in settings.iter().enumerate() {
            if i == bad_at {
                push_malformed(&mut writer, bad_key, bad_shape);
            }
            encode_setting(&mut writer, key, value).unwrap();
            expected.set(key, value);
        }
        if bad_at == settings.len() {
            push_malformed(&mut writer, bad_key, bad_shape);
        }
        apply(&mut store, &writer.finish());

        prop_assert_eq!(store.settings(), &expected);
    }

    /// Any integer wire type and width that holds the value decodes to it.
    #[test]
    fn any_integer_width_round_trips(entry in setting(), wire in 0u8..5) {
        let (key, value) = entry;
        let raw = raw(value);
        let mut writer = DictionaryWriter::<INBOX_SIZE>::new().unwrap();
        let pushed = match wire {
            0 => u8::try_from(raw).ok().map(|v| writer.push_u8(key.id(), v).map(|_| ())),
            1 => u16::try_from(raw).ok().map(|v| writer.push_u16(key.id(), v).map(|_| ())),
            2 => Some(writer.push_u32(key.id(), raw).map(|_| ())),
            3 => i16::try_from(raw).ok().map(|v| writer.push_i16(key.id(), v).map(|_| ())),
            _ => Some(writer.push_i32(key.id(), raw as i32).map(|_| ())),
        };
        prop_assume!(pushed.is_some());
        pushed.unwrap().unwrap();

        let mut store = ConfigStore::new(Platform::BLACK_WHITE);
        apply(&mut store, &writer.finish());
        prop_assert_eq!(store.settings().get(key), value);
    }
}

fn push_malformed(writer: &mut DictionaryWriter<INBOX_SIZE>, key: ConfigKey, shape: u8) {
    let pushed = match shape {
        // Text instead of an integer
        0 => writer.push_raw(key.id(), TupleType::CString, b"1\0"),
        // Three-byte integer
        1 => writer.push_raw(key.id(), TupleType::Uint, &[1, 0, 0]),
        // Too large for any setting
        _ => writer.push_u32(key.id(), 0x0001_0000),
    };
    pushed.unwrap();
}
