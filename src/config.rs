use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::persistence::PersistenceResult;

pub const DEFAULT_RESTORED_IMAGE_NAME: &str = "saved-image.png";
pub const DEFAULT_PANEL_ROWS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub kind: String,
    pub csv: String,
    pub image: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            kind: "timetableType".to_string(),
            csv: "timetableCSV".to_string(),
            image: "timetableImage".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub keys: StorageKeys,
    /// File name given to an image rebuilt from storage; the original name
    /// is not persisted.
    pub restored_image_name: String,
    /// Rows shown in the collapsed panel before the rest is elided.
    pub panel_rows: usize,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            keys: StorageKeys::default(),
            restored_image_name: DEFAULT_RESTORED_IMAGE_NAME.to_string(),
            panel_rows: DEFAULT_PANEL_ROWS,
        }
    }
}

impl WidgetConfig {
    pub fn from_json_str(json: &str) -> PersistenceResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> PersistenceResult<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}
