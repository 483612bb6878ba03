//! Cross-format behavior of the adapters

use prefkit_core::{NumberBox, RawDict, RawValue};
use prefkit_format::{Error, Format, JsonFormat, PlistFormat};
use tempfile::TempDir;

fn sample() -> RawDict {
    let mut nested = RawDict::new();
    nested.insert("inner".into(), RawValue::Str("<value>".into()));

    let mut dict = RawDict::new();
    dict.insert("flag".into(), RawValue::Number(NumberBox::boolean(true)));
    dict.insert("count".into(), RawValue::Number(NumberBox::from_i64(-7)));
    dict.insert("ratio".into(), RawValue::Number(NumberBox::from_f64(2.25)));
    dict.insert(
        "list".into(),
        RawValue::Array(vec![RawValue::Str("a".into()), RawValue::Number(NumberBox::from_i64(1))]),
    );
    dict.insert("nested".into(), RawValue::Dict(nested));
    dict
}

#[test]
fn test_boxes_survive_both_formats() {
    let formats: [Box<dyn Format>; 2] = [Box::new(JsonFormat::new()), Box::new(PlistFormat::new())];
    for format in formats {
        let bytes = format.serialize(&sample()).unwrap();
        let parsed = format.parse(&bytes).unwrap();
        assert_eq!(parsed, sample(), "{}", format.name());
    }
}

#[test]
fn test_parse_file_reports_missing_path() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.json");
    let err = JsonFormat::new().parse_file(&missing).unwrap_err();
    assert!(matches!(err, Error::Io { operation: "read", .. }));
}

#[test]
fn test_parse_file_reads_contents() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prefs.plist");
    std::fs::write(&path, PlistFormat.serialize(&sample()).unwrap()).unwrap();
    assert_eq!(PlistFormat.parse_file(&path).unwrap(), sample());
}

#[test]
fn test_invalid_utf8() {
    let err = PlistFormat.parse(&[0xff, 0xfe]).unwrap_err();
    assert!(matches!(err, Error::Utf8(_)));
}
