use crate::artifact::{ArtifactKind, CsvRows, ImageArtifact, StoredArtifact};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// A file picked by the user, as the browser would hand it over: a name,
/// a declared media type (possibly empty) and the raw contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk and guesses its media type from the extension.
    /// Unknown extensions leave the media type empty.
    pub fn from_path<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let media_type = mime_guess::from_path(path)
            .first()
            .map(|mime| mime.essence_str().to_string())
            .unwrap_or_default();
        Ok(Self {
            name,
            media_type,
            bytes,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRowError {
    pub row: u64,
    pub message: String,
}

impl fmt::Display for CsvRowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}", self.row, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    UnsupportedFileType {
        file_name: String,
        media_type: String,
    },
    Ingestion(Vec<CsvRowError>),
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::UnsupportedFileType {
                file_name,
                media_type,
            } => {
                let shown = if media_type.is_empty() {
                    "unknown"
                } else {
                    media_type
                };
                write!(
                    f,
                    "unsupported file type for '{file_name}' ({shown}): expected a CSV file or an image"
                )
            }
            UploadError::Ingestion(errors) => {
                let details = errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; ");
                write!(f, "could not parse CSV: {details}")
            }
        }
    }
}

impl std::error::Error for UploadError {}

pub type UploadResult<T> = Result<T, UploadError>;

pub fn classify(file: &SelectedFile) -> UploadResult<ArtifactKind> {
    if file.media_type == "text/csv" || file.name.ends_with(".csv") {
        return Ok(ArtifactKind::Csv);
    }
    if file.media_type.starts_with("image/") {
        return Ok(ArtifactKind::Image);
    }
    Err(UploadError::UnsupportedFileType {
        file_name: file.name.clone(),
        media_type: file.media_type.clone(),
    })
}

/// Parses CSV text into ragged rows. Every record that fails is reported,
/// not just the first one.
pub fn parse_csv(bytes: &[u8]) -> UploadResult<CsvRows> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    let mut errors = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        match record {
            Ok(record) => rows.push(record.iter().map(str::to_string).collect()),
            Err(err) => {
                let row = err
                    .position()
                    .map(|pos| pos.record())
                    .unwrap_or(idx as u64);
                let stop = err.is_io_error();
                errors.push(CsvRowError {
                    row,
                    message: err.to_string(),
                });
                if stop {
                    break;
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(rows)
    } else {
        Err(UploadError::Ingestion(errors))
    }
}

/// Classifies the file and converts it into the artifact that will be
/// shown and persisted.
pub fn ingest(file: &SelectedFile) -> UploadResult<StoredArtifact> {
    match classify(file)? {
        ArtifactKind::Csv => parse_csv(&file.bytes).map(StoredArtifact::Csv),
        ArtifactKind::Image => Ok(StoredArtifact::Image(ImageArtifact::new(
            file.name.clone(),
            file.media_type.clone(),
            file.bytes.clone(),
        ))),
    }
}
