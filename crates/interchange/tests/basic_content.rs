//! Loading and exporting a store holding every value kind

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use prefkit_core::codec::Iso8601;
use prefkit_core::{RawValue, Timestamp};
use prefkit_interchange::{
    Error, ExportExt, ExportFormat, ImportFormat, Initializable, KeyPath, LoadExt,
    MappingImportStrategy, Result, TypedImportStrategy,
};
use prefkit_storage::{MemoryStorage, StorageBackend, StorageExt, SuiteStorage, UpdateStrategy};

const PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>key1</key>
    <string>string</string>
    <key>key2</key>
    <integer>123</integer>
    <key>key3</key>
    <true/>
    <key>key4</key>
    <data>
    AQI=
    </data>
    <key>key5</key>
    <date>2025-01-07T05:32:03Z</date>
    <key>key6</key>
    <array>
        <string>string1</string>
        <string>string2</string>
    </array>
    <key>key7</key>
    <array>
        <string>string</string>
        <real>123.5</real>
        <false/>
    </array>
    <key>key8</key>
    <array>
        <array>
            <string>string</string>
        </array>
        <dict>
            <key>keyA</key>
            <string>stringA</string>
            <key>keyB</key>
            <integer>234</integer>
        </dict>
    </array>
    <key>key9</key>
    <dict>
        <key>keyA</key>
        <string>stringA</string>
        <key>keyB</key>
        <string>stringB</string>
    </dict>
    <key>key10</key>
    <dict>
        <key>keyA</key>
        <string>string</string>
        <key>keyB</key>
        <real>789.5</real>
        <key>keyC</key>
        <data>
        AwQ=
        </data>
    </dict>
    <key>key11</key>
    <dict>
        <key>keyA</key>
        <array>
            <string>string</string>
        </array>
        <key>keyB</key>
        <dict>
            <key>keyI</key>
            <string>string</string>
            <key>keyII</key>
            <integer>567</integer>
        </dict>
    </dict>
</dict>
</plist>
"#;

const JSON: &str = r#"{
  "key1": "string",
  "key2": 123,
  "key3": true,
  "key4": "AQI=",
  "key5": "2025-01-07T05:32:03Z",
  "key6": ["string1", "string2"],
  "key7": ["string", 123.5, false],
  "key8": [["string"], {"keyA": "stringA", "keyB": 234}],
  "key9": {"keyA": "stringA", "keyB": "stringB"},
  "key10": {"keyA": "string", "keyB": 789.5, "keyC": "AwQ="},
  "key11": {"keyB": {"keyI": "string", "keyII": 567}, "keyA": ["string"]}
}"#;

/// Knows which JSON strings of this document hold blobs and dates
struct BasicJsonImport;

impl MappingImportStrategy for BasicJsonImport {
    fn import_string(&self, path: &KeyPath, value: String) -> Result<RawValue> {
        let keys = path.keys();
        if keys == ["key4"] || keys == ["key10", "keyC"] {
            return STANDARD
                .decode(&value)
                .map(RawValue::Bytes)
                .map_err(|e| Error::strategy(path, e.to_string()));
        }
        if keys == ["key5"] {
            return Iso8601::parse(&value)
                .map(RawValue::Time)
                .ok_or_else(|| Error::strategy(path, "not an ISO-8601 date"));
        }
        Ok(RawValue::Str(value))
    }
}

fn date() -> Timestamp {
    Iso8601::parse("2025-01-07T05:32:03Z").unwrap()
}

fn number(value: &RawValue) -> Option<f64> {
    match value {
        RawValue::F64(v) => Some(*v),
        RawValue::F32(v) => Some(f64::from(*v)),
        RawValue::Int(v) => Some(*v as f64),
        RawValue::Number(n) => n.to_f64(),
        _ => None,
    }
}

fn integer(value: &RawValue) -> Option<i64> {
    match value {
        RawValue::Int(v) => Some(*v),
        RawValue::Number(n) => n.to_i64(),
        _ => None,
    }
}

fn boolean(value: &RawValue) -> Option<bool> {
    match value {
        RawValue::Bool(v) => Some(*v),
        RawValue::Number(n) if n.is_boolean() => n.to_bool(),
        _ => None,
    }
}

fn check_content(storage: &dyn StorageBackend) {
    assert_eq!(storage.string("key1").as_deref(), Some("string"));
    assert_eq!(storage.int("key2"), Some(123));
    assert_eq!(storage.bool("key3"), Some(true));
    assert_eq!(storage.bytes("key4"), Some(vec![0x01, 0x02]));
    assert_eq!(storage.timestamp("key5"), Some(date()));

    let key6 = storage.array("key6").unwrap();
    assert_eq!(key6, vec![RawValue::Str("string1".into()), RawValue::Str("string2".into())]);

    let key7 = storage.array("key7").unwrap();
    assert_eq!(key7.len(), 3);
    assert_eq!(key7[0].as_str(), Some("string"));
    assert_eq!(number(&key7[1]), Some(123.5));
    assert_eq!(boolean(&key7[2]), Some(false));

    let key8 = storage.array("key8").unwrap();
    assert_eq!(key8.len(), 2);
    let key8_0 = key8[0].as_array().unwrap();
    assert_eq!(key8_0, [RawValue::Str("string".into())]);
    let key8_1 = key8[1].as_dict().unwrap();
    assert_eq!(key8_1.len(), 2);
    assert_eq!(key8_1["keyA"].as_str(), Some("stringA"));
    assert_eq!(integer(&key8_1["keyB"]), Some(234));

    let key9 = storage.dictionary("key9").unwrap();
    assert_eq!(key9.len(), 2);
    assert_eq!(key9["keyA"].as_str(), Some("stringA"));
    assert_eq!(key9["keyB"].as_str(), Some("stringB"));

    let key10 = storage.dictionary("key10").unwrap();
    assert_eq!(key10.len(), 3);
    assert_eq!(key10["keyA"].as_str(), Some("string"));
    assert_eq!(number(&key10["keyB"]), Some(789.5));
    assert_eq!(key10["keyC"], RawValue::Bytes(vec![0x03, 0x04]));

    let key11 = storage.dictionary("key11").unwrap();
    assert_eq!(key11.len(), 2);
    assert_eq!(key11["keyA"], RawValue::Array(vec![RawValue::Str("string".into())]));
    let key11_b = key11["keyB"].as_dict().unwrap();
    assert_eq!(key11_b["keyI"].as_str(), Some("string"));
    assert_eq!(integer(&key11_b["keyII"]), Some(567));
}

#[test]
fn test_json_load_into_memory() {
    let storage = MemoryStorage::new();
    let changed = storage
        .load_str(JSON, &ImportFormat::json(BasicJsonImport), &UpdateStrategy::Updating)
        .unwrap();

    assert_eq!(changed.len(), 11);
    check_content(&storage);
}

#[test]
fn test_plist_load_into_memory() {
    let storage = MemoryStorage::new();
    storage
        .load_str(PLIST, &ImportFormat::plist(), &UpdateStrategy::Updating)
        .unwrap();
    check_content(&storage);
}

#[test]
fn test_load_into_suite() {
    let storage = SuiteStorage::volatile("com.example.basic");
    storage
        .load_bytes(JSON.as_bytes(), &ImportFormat::json(BasicJsonImport), &UpdateStrategy::Updating)
        .unwrap();
    check_content(&storage);
}

#[test]
fn test_both_documents_decode_to_the_same_contents() {
    let from_json = MemoryStorage::from_string(JSON, &ImportFormat::json(BasicJsonImport)).unwrap();
    let from_plist =
        MemoryStorage::from_string(PLIST, &ImportFormat::plist_with(TypedImportStrategy::new()))
            .unwrap();
    assert_eq!(from_json.snapshot(), from_plist.snapshot());
}

#[test]
fn test_reinitializing_replaces_everything() {
    let storage = MemoryStorage::new();
    storage.set("baseExclusive", Some("keep me?".to_string()));
    storage.set("key1", Some("old".to_string()));

    let changed = storage
        .load_str(PLIST, &ImportFormat::plist(), &UpdateStrategy::Reinitializing)
        .unwrap();

    assert_eq!(changed.len(), 11);
    assert!(!storage.contains("baseExclusive"));
    check_content(&storage);
}

#[test]
fn test_updating_keeps_unrelated_keys() {
    let storage = MemoryStorage::new();
    storage.set("baseExclusive", Some(1_i64));
    storage.set("key1", Some("old".to_string()));

    storage
        .load_str(JSON, &ImportFormat::json(BasicJsonImport), &UpdateStrategy::Updating)
        .unwrap();

    assert_eq!(storage.get::<i64>("baseExclusive"), Some(1));
    check_content(&storage);
}

#[test]
fn test_date_survives_json_round_trip() {
    let source = MemoryStorage::new();
    source.set("key5", Some(date()));

    let json = source.export_string(&ExportFormat::json_typed()).unwrap();
    assert!(json.contains("\"2025-01-07T05:32:03Z\""));

    let target = MemoryStorage::new();
    target
        .load_str(&json, &ImportFormat::json(BasicJsonImport), &UpdateStrategy::Updating)
        .unwrap();
    assert_eq!(target.timestamp("key5"), Some(date()));
}

#[test]
fn test_json_export_then_import_restores_contents() {
    let source = MemoryStorage::from_string(JSON, &ImportFormat::json(BasicJsonImport)).unwrap();

    let bytes = source.export_bytes(&ExportFormat::json_typed()).unwrap();
    let restored = MemoryStorage::from_bytes(&bytes, &ImportFormat::json(BasicJsonImport)).unwrap();

    assert_eq!(restored.snapshot(), source.snapshot());
}

#[test]
fn test_plist_file_round_trip() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("basic.plist");
    let typed_plist = || ImportFormat::plist_with(TypedImportStrategy::new());

    let source = MemoryStorage::from_string(PLIST, &typed_plist()).unwrap();
    source.export_file(&path, &ExportFormat::plist()).unwrap();

    let restored = MemoryStorage::from_file(&path, &typed_plist()).unwrap();
    assert_eq!(restored.snapshot(), source.snapshot());
    check_content(&restored);
}

#[test]
fn test_bad_blob_names_the_failing_path() {
    let text = r#"{"key10": {"keyC": "***"}}"#;
    let err = MemoryStorage::from_string(text, &ImportFormat::json(BasicJsonImport)).unwrap_err();
    assert!(matches!(err, Error::Strategy { ref path, .. } if path == "key10.keyC"));
}

#[test]
fn test_erased_floats_stay_boxed() {
    let storage = MemoryStorage::from_string(
        JSON,
        &ImportFormat::json(TypedImportStrategy::type_erasing_floats()),
    )
    .unwrap();

    let key10 = storage.dictionary("key10").unwrap();
    assert!(matches!(key10["keyB"], RawValue::Number(_)));
    assert_eq!(storage.int("key2"), Some(123));
}
