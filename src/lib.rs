pub mod artifact;
pub mod config;
pub mod persistence;
pub mod render;
pub mod slider;
pub mod upload;
pub mod widget;

pub use artifact::{ArtifactKind, ArtifactState, CsvRows, ImageArtifact, StoredArtifact};
pub use config::{StorageKeys, WidgetConfig};
#[cfg(feature = "sqlite")]
pub use persistence::SqliteStore;
pub use persistence::{
    JsonFileStore, KeyValueStore, MemoryStore, PersistenceError, PersistenceResult, StoreOp,
    TimetableStore,
};
pub use slider::DaySlider;
pub use upload::{CsvRowError, SelectedFile, UploadError, classify, ingest, parse_csv};
pub use widget::{TimetableWidget, WidgetError, WidgetResult, WidgetView};
