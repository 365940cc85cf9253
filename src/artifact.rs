use std::fmt;

pub type CsvRows = Vec<Vec<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Csv,
    Image,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Csv => "csv",
            ArtifactKind::Image => "image",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "csv" => Some(ArtifactKind::Csv),
            "image" => Some(ArtifactKind::Image),
            _ => None,
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageArtifact {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl ImageArtifact {
    pub fn new(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// The timetable the user uploaded. Only one variant is ever active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredArtifact {
    Csv(CsvRows),
    Image(ImageArtifact),
}

impl StoredArtifact {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            StoredArtifact::Csv(_) => ArtifactKind::Csv,
            StoredArtifact::Image(_) => ArtifactKind::Image,
        }
    }

    pub fn as_rows(&self) -> Option<&CsvRows> {
        match self {
            StoredArtifact::Csv(rows) => Some(rows),
            StoredArtifact::Image(_) => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageArtifact> {
        match self {
            StoredArtifact::Image(image) => Some(image),
            StoredArtifact::Csv(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactState {
    Empty,
    HasCsv,
    HasImage,
}

impl ArtifactState {
    pub fn of(artifact: Option<&StoredArtifact>) -> Self {
        match artifact.map(StoredArtifact::kind) {
            None => ArtifactState::Empty,
            Some(ArtifactKind::Csv) => ArtifactState::HasCsv,
            Some(ArtifactKind::Image) => ArtifactState::HasImage,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactState::Empty => "empty",
            ArtifactState::HasCsv => "csv",
            ArtifactState::HasImage => "image",
        }
    }
}
