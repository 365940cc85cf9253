use super::{KeyValueStore, PersistenceError, PersistenceResult, StoreOp};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// A key-value store kept as one JSON object on disk. Every write replaces
/// the whole file through a temp file and a rename.
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    pub fn open<P: AsRef<Path>>(path: P) -> PersistenceResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = read_entries(&path)?;
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> PersistenceResult<()> {
        let tmp_path = self.path.with_extension("json.tmp");
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, entries)?;
            writer.flush()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

fn read_entries(path: &Path) -> PersistenceResult<BTreeMap<String, String>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(err) => return Err(err.into()),
    };
    if contents.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    serde_json::from_str(&contents).map_err(|err| {
        PersistenceError::InvalidData(format!(
            "store file {} is not a JSON object of strings: {err}",
            path.display()
        ))
    })
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PersistenceResult<()> {
        self.apply(&[StoreOp::set(key, value)])
    }

    fn remove(&self, key: &str) -> PersistenceResult<()> {
        self.apply(&[StoreOp::remove(key)])
    }

    fn apply(&self, ops: &[StoreOp]) -> PersistenceResult<()> {
        let mut entries = self.entries.lock();
        let mut next = entries.clone();
        for op in ops {
            match op {
                StoreOp::Set { key, value } => {
                    next.insert(key.clone(), value.clone());
                }
                StoreOp::Remove { key } => {
                    next.remove(key);
                }
            }
        }
        if next == *entries {
            return Ok(());
        }
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}
