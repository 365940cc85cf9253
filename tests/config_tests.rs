use std::fs;
use tempfile::tempdir;
use timetable_widget::{PersistenceError, StorageKeys, WidgetConfig};

#[test]
fn defaults_match_browser_storage_keys() {
    let config = WidgetConfig::default();
    assert_eq!(config.keys.kind, "timetableType");
    assert_eq!(config.keys.csv, "timetableCSV");
    assert_eq!(config.keys.image, "timetableImage");
    assert_eq!(config.restored_image_name, "saved-image.png");
}

#[test]
fn partial_json_fills_in_defaults() {
    let config = WidgetConfig::from_json_str(r#"{ "panel_rows": 3, "keys": { "csv": "rows" } }"#)
        .unwrap();
    assert_eq!(config.panel_rows, 3);
    assert_eq!(
        config.keys,
        StorageKeys {
            csv: "rows".into(),
            ..StorageKeys::default()
        }
    );
    assert_eq!(config.restored_image_name, "saved-image.png");
}

#[test]
fn config_round_trips_through_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("widget.json");
    let config = WidgetConfig {
        restored_image_name: "timetable.jpg".into(),
        panel_rows: 12,
        ..WidgetConfig::default()
    };
    fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

    assert_eq!(WidgetConfig::from_json_file(&path).unwrap(), config);
}

#[test]
fn invalid_config_is_a_serialization_error() {
    assert!(matches!(
        WidgetConfig::from_json_str("{ \"panel_rows\": \"lots\" }"),
        Err(PersistenceError::Serialization(_))
    ));
}
