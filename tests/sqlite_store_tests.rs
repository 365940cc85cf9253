#![cfg(feature = "sqlite")]

use tempfile::NamedTempFile;
use timetable_widget::{
    ArtifactState, KeyValueStore, SelectedFile, SqliteStore, StoreOp, StoredArtifact,
    TimetableWidget, WidgetConfig,
};

#[test]
fn sqlite_store_overwrites_and_removes_keys() {
    let store = SqliteStore::in_memory().unwrap();
    store.set("timetableType", "csv").unwrap();
    store.set("timetableType", "image").unwrap();
    assert_eq!(store.get("timetableType").unwrap().as_deref(), Some("image"));

    store.remove("timetableType").unwrap();
    assert!(store.get("timetableType").unwrap().is_none());
    store.remove("timetableType").unwrap();
}

#[test]
fn sqlite_store_applies_batch_in_one_transaction() {
    let store = SqliteStore::in_memory().unwrap();
    store
        .apply(&[
            StoreOp::set("timetableImage", "data:image/png;base64,AA=="),
            StoreOp::remove("timetableCSV"),
            StoreOp::set("timetableType", "image"),
        ])
        .unwrap();
    assert_eq!(store.get("timetableType").unwrap().as_deref(), Some("image"));
    assert!(store.get("timetableCSV").unwrap().is_none());
}

#[test]
fn sqlite_widget_round_trip_across_reopen() {
    let file = NamedTempFile::new().unwrap();

    {
        let store = SqliteStore::new(file.path()).unwrap();
        let mut widget = TimetableWidget::mount(store, WidgetConfig::default());
        widget
            .upload(&SelectedFile::new("data.csv", "text/csv", "a,b\nc,d"))
            .unwrap();
    }

    let store = SqliteStore::new(file.path()).unwrap();
    let mut widget = TimetableWidget::mount(store, WidgetConfig::default());
    assert_eq!(widget.state(), ArtifactState::HasCsv);
    assert_eq!(
        widget.artifact(),
        Some(&StoredArtifact::Csv(vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string(), "d".to_string()],
        ]))
    );

    widget.remove().unwrap();
    let reopened = SqliteStore::new(file.path()).unwrap();
    assert!(reopened.get("timetableType").unwrap().is_none());
    assert!(reopened.get("timetableCSV").unwrap().is_none());
}
