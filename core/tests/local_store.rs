//! SQLite local storage tests.

use authpanel_core::{
    keys,
    metrics::MetricsStore,
    storage::KeyValueStorage,
    store::LocalStore,
};

fn migrated() -> LocalStore {
    let store = LocalStore::in_memory().expect("open in-memory store");
    store.migrate().expect("migrate");
    store
}

#[test]
fn get_set_remove() {
    let mut store = migrated();
    assert_eq!(store.get_item("missing").unwrap(), None);

    store.set_item("k", "v1").unwrap();
    store.set_item("k", "v2").unwrap();
    assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v2"));
    assert_eq!(store.key_count().unwrap(), 1);

    store.remove_item("k").unwrap();
    store.remove_item("k").unwrap();
    assert_eq!(store.get_item("k").unwrap(), None);
}

#[test]
fn migrate_is_idempotent() {
    let store = migrated();
    store.migrate().unwrap();
    assert_eq!(store.key_count().unwrap(), 0);
    assert_eq!(store.path(), None);
}

#[test]
fn unmigrated_store_reports_errors() {
    let mut store = LocalStore::in_memory().unwrap();
    assert!(store.get_item("k").is_err());
    assert!(store.set_item("k", "v").is_err());
}

#[test]
fn unmigrated_store_degrades_to_absent_metrics() {
    let mut metrics = MetricsStore::open(LocalStore::in_memory().unwrap());
    metrics.set_metrics(Some(1.0), Some(2.0));
    assert_eq!(metrics.equity(), Some(1.0));
    assert_eq!(metrics.masked_email(), "");
    assert!(!metrics.is_authenticated());
}

#[test]
fn metrics_round_trip_through_sqlite() {
    let mut metrics = MetricsStore::open(migrated());
    metrics.set_identity("sqlite.user@game.io", "Sq");
    metrics.set_metrics(Some(1234.5), Some(-0.19));
    metrics.set_activity(Some(260.0));

    let reopened = MetricsStore::open(metrics.into_storage());
    assert_eq!(reopened.equity(), Some(1234.5));
    assert_eq!(reopened.roi_percent(), Some(-0.19));
    assert_eq!(reopened.activity(), Some(260.0));
    assert_eq!(reopened.masked_email(), "sqlit***");
}

#[test]
fn clear_all_wipes_every_key() {
    let mut store = migrated();
    store.set_item(keys::EQUITY, "1").unwrap();
    store.set_item(keys::INFO_COLLAPSED, "1").unwrap();
    store.clear_all().unwrap();
    assert_eq!(store.key_count().unwrap(), 0);
}

#[test]
fn reset_through_sqlite_leaves_nothing_behind() {
    let mut metrics = MetricsStore::open(migrated());
    metrics.set_identity("sqlite.user@game.io", "Sq");
    metrics.set_metrics(Some(1234.5), Some(-0.19));
    metrics.set_activity(Some(260.0));

    metrics.reset();
    assert_eq!(metrics.equity(), None);
    assert_eq!(metrics.roi_percent(), None);
    assert_eq!(metrics.activity(), None);
    assert_eq!(metrics.storage().key_count().unwrap(), 0);

    let reopened = MetricsStore::open(metrics.into_storage());
    assert_eq!(reopened.equity(), None);
    assert_eq!(reopened.masked_email(), "");
}

#[test]
fn file_backed_store_opens_and_persists() {
    let _ = env_logger::builder().is_test(true).try_init();
    let path = std::env::temp_dir().join(format!("authpanel-open-{}.db", std::process::id()));
    let path_str = path.to_str().expect("utf-8 temp path").to_string();

    {
        let mut store = LocalStore::open(&path_str).expect("open file store");
        store.migrate().unwrap();
        assert_eq!(store.path(), Some(path_str.as_str()));
        store.set_item(keys::EQUITY, "42").unwrap();
    }

    let reopened = LocalStore::open(&path_str).expect("reopen file store");
    assert_eq!(reopened.get_item(keys::EQUITY).unwrap().as_deref(), Some("42"));
    drop(reopened);

    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{path_str}{suffix}"));
    }
}
