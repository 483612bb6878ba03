//! Round-trip and composition properties of the built-in codecs

use chrono::{TimeZone, Utc};
use prefkit_core::codec::{
    Base64, Base64Variant, BoolAsInteger, BoolAsString, CompressionAlgorithm, Compressed,
    IntegerAsInteger, IntegerAsString, Iso8601, ListOf, TextCase,
};
use prefkit_core::{Codec, StorageKind};
use proptest::prelude::*;

fn variant() -> impl Strategy<Value = Base64Variant> {
    prop_oneof![
        Just(Base64Variant::Standard),
        Just(Base64Variant::StandardNoPad),
        Just(Base64Variant::UrlSafe),
        Just(Base64Variant::UrlSafeNoPad),
    ]
}

fn algorithm() -> impl Strategy<Value = CompressionAlgorithm> {
    prop_oneof![
        Just(CompressionAlgorithm::Zlib),
        Just(CompressionAlgorithm::Deflate),
        Just(CompressionAlgorithm::Gzip),
        (1..5_i32).prop_map(|level| CompressionAlgorithm::Zstd { level }),
    ]
}

proptest! {
    #[test]
    fn bool_codecs_round_trip(value in any::<bool>()) {
        let as_int = BoolAsInteger::strict();
        prop_assert_eq!(as_int.decode(&as_int.encode(&value).unwrap()), Some(value));

        let text = BoolAsString::yes_no(TextCase::Lowercase);
        prop_assert_eq!(text.decode(&text.encode(&value).unwrap()), Some(value));
    }

    #[test]
    fn integer_codecs_round_trip(value in any::<i32>()) {
        let as_int = IntegerAsInteger::<i32>::new();
        prop_assert_eq!(as_int.decode(&as_int.encode(&value).unwrap()), Some(value));

        let as_text = IntegerAsString::<i32>::new();
        prop_assert_eq!(as_text.decode(&as_text.encode(&value).unwrap()), Some(value));
    }

    #[test]
    fn base64_round_trips(data in proptest::collection::vec(any::<u8>(), 0..64), variant in variant()) {
        let codec = Base64::new(variant);
        prop_assert_eq!(codec.decode(&codec.encode(&data).unwrap()), Some(data));
    }

    #[test]
    fn compression_then_base64_round_trips(
        data in proptest::collection::vec(any::<u8>(), 0..256),
        algorithm in algorithm(),
    ) {
        let codec = Compressed::new(algorithm).then(Base64::new(Base64Variant::Standard));
        let stored: String = codec.encode(&data).unwrap();
        prop_assert_eq!(codec.decode(&stored), Some(data));
    }

    #[test]
    fn iso8601_round_trips_whole_seconds(seconds in 0_i64..4_102_444_800) {
        let value = Utc.timestamp_opt(seconds, 0).unwrap();
        prop_assert_eq!(Iso8601.decode(&Iso8601.encode(&value).unwrap()), Some(value));
    }

    #[test]
    fn composition_matches_manual_chaining(value in any::<bool>()) {
        let first = BoolAsInteger::strict();
        let second = IntegerAsString::<i64>::new();
        let composed = BoolAsInteger::strict().then(IntegerAsString::<i64>::new());

        let manual = first.encode(&value).and_then(|n| second.encode(&n));
        prop_assert_eq!(composed.encode(&value), manual.clone());

        let stored = manual.unwrap();
        let manual_back = second.decode(&stored).and_then(|n| first.decode(&n));
        prop_assert_eq!(composed.decode(&stored), manual_back);
    }

    #[test]
    fn composition_is_associative(values in proptest::collection::vec(any::<bool>(), 0..8)) {
        let left = ListOf::new(BoolAsInteger::strict())
            .then(ListOf::new(IntegerAsString::<i64>::new()))
            .then(ListOf::new(Base64Codec));
        let right = ListOf::new(BoolAsInteger::strict()).then(
            ListOf::new(IntegerAsString::<i64>::new())
                .then(ListOf::new(Base64Codec)),
        );
        let left_stored = left.encode(&values);
        prop_assert_eq!(&left_stored, &right.encode(&values));
        if let Some(stored) = left_stored {
            prop_assert_eq!(left.decode(&stored), right.decode(&stored));
        }
    }

    #[test]
    fn kinds_survive_value_conversion(value in any::<i64>(), text in ".*") {
        prop_assert_eq!(i64::from_value(value.into_value()), Some(value));
        prop_assert_eq!(String::from_value(text.clone().into_value()), Some(text));
    }
}

/// Stores a string as base64 of its UTF-8 bytes
struct Base64Codec;

impl Codec for Base64Codec {
    type Value = String;
    type Stored = String;

    fn encode(&self, value: &String) -> Option<String> {
        Base64::new(Base64Variant::Standard).encode(&value.as_bytes().to_vec())
    }

    fn decode(&self, stored: &String) -> Option<String> {
        let bytes = Base64::new(Base64Variant::Standard).decode(stored)?;
        String::from_utf8(bytes).ok()
    }
}

