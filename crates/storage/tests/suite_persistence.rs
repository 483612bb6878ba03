//! File-backed suites

use prefkit_core::{NumberBox, RawDict, RawValue};
use prefkit_storage::{
    Importable, Persistence, StorageBackend, StorageExt, Suite, SuiteConfig, SuiteStorage,
    UpdateStrategy,
};
use std::sync::Arc;
use tempfile::TempDir;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("prefkit_storage=debug")
        .try_init();
}

fn config(dir: &TempDir, persistence: Persistence) -> SuiteConfig {
    SuiteConfig::builder("com.example.prefkit")
        .directory(dir.path())
        .persistence(persistence)
        .build()
        .unwrap()
}

#[test]
fn test_immediate_persistence_survives_reopen() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let config = config(&dir, Persistence::Immediate);

    let storage = SuiteStorage::open(&config).unwrap();
    storage.set("name", Some("prefkit".to_string()));
    storage.set("count", Some(3_i64));
    storage.set("ratio", Some(0.5_f64));
    storage.set("blob", Some(vec![1_u8, 2, 3]));
    assert!(config.file_path().exists());

    let reopened = SuiteStorage::open(&config).unwrap();
    assert_eq!(reopened.get::<String>("name").as_deref(), Some("prefkit"));
    assert_eq!(reopened.get::<i64>("count"), Some(3));
    assert_eq!(reopened.get::<f64>("ratio"), Some(0.5));
    assert_eq!(reopened.get::<Vec<u8>>("blob"), Some(vec![1, 2, 3]));
    assert_eq!(
        reopened.raw("count"),
        Some(RawValue::Number(NumberBox::from_i64(3)))
    );
}

#[test]
fn test_manual_persistence_waits_for_synchronize() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let config = config(&dir, Persistence::Manual);

    let suite = Arc::new(Suite::open(&config).unwrap());
    let storage = SuiteStorage::new(Arc::clone(&suite));
    storage.set("flag", Some(true));
    assert!(!config.file_path().exists());

    suite.synchronize().unwrap();
    let reopened = SuiteStorage::open(&config).unwrap();
    assert_eq!(reopened.get::<bool>("flag"), Some(true));
}

#[test]
fn test_reload_discards_pending_changes() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir, Persistence::Manual);

    let suite = Suite::open(&config).unwrap();
    suite.set_object("a", Some(RawValue::Int(1)));
    suite.synchronize().unwrap();
    suite.set_object("a", Some(RawValue::Int(2)));

    suite.reload().unwrap();
    assert_eq!(suite.integer("a"), Some(1));
}

#[test]
fn test_load_persists_once_merged() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir, Persistence::Immediate);
    let storage = SuiteStorage::open(&config).unwrap();
    storage.set("foo", Some("old".to_string()));
    storage.set("bar", Some(1_i64));

    let mut contents = RawDict::new();
    contents.insert("foo".into(), RawValue::Str("new".into()));
    let changed = storage.load(contents, &UpdateStrategy::Reinitializing).unwrap();
    assert_eq!(changed.into_iter().collect::<Vec<_>>(), vec!["foo".to_string()]);

    let reopened = SuiteStorage::open(&config).unwrap();
    assert_eq!(reopened.keys(), vec!["foo".to_string()]);
    assert_eq!(reopened.get::<String>("foo").as_deref(), Some("new"));
}

#[test]
fn test_corrupt_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir, Persistence::Immediate);
    std::fs::write(config.file_path(), "not a plist").unwrap();
    assert!(Suite::open(&config).is_err());
}
