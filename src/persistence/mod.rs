use crate::artifact::{ArtifactKind, StoredArtifact};
use crate::config::StorageKeys;
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum PersistenceError {
    Serialization(SerdeJsonError),
    Io(io::Error),
    #[cfg(feature = "sqlite")]
    Sqlite(rusqlite::Error),
    InvalidData(String),
    UnknownKind(String),
    MissingPayload(&'static str),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Serialization(err) => write!(f, "serialization error: {err}"),
            PersistenceError::Io(err) => write!(f, "io error: {err}"),
            #[cfg(feature = "sqlite")]
            PersistenceError::Sqlite(err) => write!(f, "sqlite error: {err}"),
            PersistenceError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
            PersistenceError::UnknownKind(tag) => write!(f, "unknown timetable kind '{tag}'"),
            PersistenceError::MissingPayload(kind) => {
                write!(f, "timetable kind '{kind}' is stored without its payload")
            }
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<SerdeJsonError> for PersistenceError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<io::Error> for PersistenceError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    Set { key: String, value: String },
    Remove { key: String },
}

impl StoreOp {
    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        StoreOp::Set {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn remove(key: impl Into<String>) -> Self {
        StoreOp::Remove { key: key.into() }
    }
}

/// String-keyed, string-valued storage in the shape of a browser's
/// `localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> PersistenceResult<()>;
    fn remove(&self, key: &str) -> PersistenceResult<()>;

    /// Applies the operations in order. Backends that can make the batch
    /// atomic override this; the default applies them one by one.
    fn apply(&self, ops: &[StoreOp]) -> PersistenceResult<()> {
        for op in ops {
            match op {
                StoreOp::Set { key, value } => self.set(key, value)?,
                StoreOp::Remove { key } => self.remove(key)?,
            }
        }
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> PersistenceResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> PersistenceResult<()> {
        (**self).remove(key)
    }

    fn apply(&self, ops: &[StoreOp]) -> PersistenceResult<()> {
        (**self).apply(ops)
    }
}

/// Reads and writes the timetable under its three keys as one value.
pub struct TimetableStore<S> {
    store: S,
    keys: StorageKeys,
}

impl<S: KeyValueStore> TimetableStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_keys(store, StorageKeys::default())
    }

    pub fn with_keys(store: S, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    // Payload first, stale payload dropped, tag last: a reader never sees a
    // tag whose payload has not been written.
    fn save_ops(&self, artifact: &StoredArtifact) -> PersistenceResult<Vec<StoreOp>> {
        let ops = match artifact {
            StoredArtifact::Csv(rows) => vec![
                StoreOp::set(&self.keys.csv, codec::encode_rows(rows)?),
                StoreOp::remove(&self.keys.image),
                StoreOp::set(&self.keys.kind, ArtifactKind::Csv.as_str()),
            ],
            StoredArtifact::Image(image) => vec![
                StoreOp::set(
                    &self.keys.image,
                    codec::encode_data_url(&image.media_type, &image.bytes),
                ),
                StoreOp::remove(&self.keys.csv),
                StoreOp::set(&self.keys.kind, ArtifactKind::Image.as_str()),
            ],
        };
        Ok(ops)
    }

    pub fn save(&self, artifact: &StoredArtifact) -> PersistenceResult<()> {
        let ops = self.save_ops(artifact)?;
        self.store.apply(&ops)
    }

    /// Strict load: `Ok(None)` only when no kind tag is stored.
    pub fn load(&self, restored_image_name: &str) -> PersistenceResult<Option<StoredArtifact>> {
        let Some(tag) = self.store.get(&self.keys.kind)? else {
            return Ok(None);
        };

        match ArtifactKind::from_str(&tag) {
            Some(ArtifactKind::Csv) => {
                let encoded = self
                    .store
                    .get(&self.keys.csv)?
                    .ok_or(PersistenceError::MissingPayload("csv"))?;
                let rows = codec::decode_rows(&encoded)?;
                Ok(Some(StoredArtifact::Csv(rows)))
            }
            Some(ArtifactKind::Image) => {
                let encoded = self
                    .store
                    .get(&self.keys.image)?
                    .ok_or(PersistenceError::MissingPayload("image"))?;
                let image = codec::decode_data_url(&encoded, restored_image_name)?;
                Ok(Some(StoredArtifact::Image(image)))
            }
            None => Err(PersistenceError::UnknownKind(tag)),
        }
    }

    /// Fail-open load used on mount: anything that cannot be decoded counts
    /// as nothing stored.
    pub fn restore(&self, restored_image_name: &str) -> Option<StoredArtifact> {
        match self.load(restored_image_name) {
            Ok(artifact) => artifact,
            Err(err) => {
                tracing::warn!(error = %err, "stored timetable could not be restored; starting empty");
                None
            }
        }
    }

    pub fn clear(&self) -> PersistenceResult<()> {
        self.store.apply(&[
            StoreOp::remove(&self.keys.kind),
            StoreOp::remove(&self.keys.csv),
            StoreOp::remove(&self.keys.image),
        ])
    }
}

pub mod codec;
pub mod file;
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
