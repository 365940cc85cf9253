use crate::artifact::{ArtifactState, CsvRows, ImageArtifact, StoredArtifact};
use crate::config::WidgetConfig;
use crate::persistence::{KeyValueStore, PersistenceError, TimetableStore};
use crate::slider::DaySlider;
use crate::upload::{self, SelectedFile, UploadError};
use std::fmt;

#[derive(Debug)]
pub enum WidgetError {
    Upload(UploadError),
    Persistence(PersistenceError),
}

impl fmt::Display for WidgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetError::Upload(err) => write!(f, "{err}"),
            WidgetError::Persistence(err) => write!(f, "could not save timetable: {err}"),
        }
    }
}

impl std::error::Error for WidgetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WidgetError::Upload(err) => Some(err),
            WidgetError::Persistence(err) => Some(err),
        }
    }
}

impl From<UploadError> for WidgetError {
    fn from(value: UploadError) -> Self {
        Self::Upload(value)
    }
}

impl From<PersistenceError> for WidgetError {
    fn from(value: PersistenceError) -> Self {
        Self::Persistence(value)
    }
}

pub type WidgetResult<T> = Result<T, WidgetError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetView<'a> {
    Slider { day: usize, label: &'static str },
    Csv { rows: &'a CsvRows, expanded: bool },
    Image { image: &'a ImageArtifact, expanded: bool },
}

pub struct TimetableWidget<S> {
    store: TimetableStore<S>,
    config: WidgetConfig,
    artifact: Option<StoredArtifact>,
    expanded: bool,
    slider: DaySlider,
}

impl<S: KeyValueStore> TimetableWidget<S> {
    /// Builds the widget and restores whatever the store holds. Restoring
    /// never fails; unreadable data leaves the widget empty.
    pub fn mount(store: S, config: WidgetConfig) -> Self {
        let store = TimetableStore::with_keys(store, config.keys.clone());
        let artifact = store.restore(&config.restored_image_name);
        match &artifact {
            Some(artifact) => tracing::info!(kind = %artifact.kind(), "restored stored timetable"),
            None => tracing::debug!("no stored timetable"),
        }
        Self {
            store,
            config,
            artifact,
            expanded: false,
            slider: DaySlider::new(),
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn store(&self) -> &TimetableStore<S> {
        &self.store
    }

    pub fn artifact(&self) -> Option<&StoredArtifact> {
        self.artifact.as_ref()
    }

    pub fn state(&self) -> ArtifactState {
        ArtifactState::of(self.artifact.as_ref())
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn slider(&self) -> &DaySlider {
        &self.slider
    }

    /// Replaces the current timetable with the uploaded file. On any error
    /// the previous timetable stays in place, both in memory and in storage.
    pub fn upload(&mut self, file: &SelectedFile) -> WidgetResult<&StoredArtifact> {
        let artifact = match upload::ingest(file) {
            Ok(artifact) => artifact,
            Err(err) => {
                match &err {
                    UploadError::UnsupportedFileType { .. } => {
                        tracing::warn!(file = %file.name, media_type = %file.media_type, "rejected timetable upload")
                    }
                    UploadError::Ingestion(errors) => {
                        tracing::error!(file = %file.name, errors = errors.len(), error = %err, "error parsing CSV")
                    }
                }
                return Err(err.into());
            }
        };
        tracing::debug!(file = %file.name, kind = %artifact.kind(), "classified upload");

        self.store.save(&artifact)?;
        tracing::info!(file = %file.name, kind = %artifact.kind(), "stored timetable");

        self.expanded = false;
        let stored = self.artifact.insert(artifact);
        Ok(&*stored)
    }

    pub fn remove(&mut self) -> WidgetResult<()> {
        self.store.clear()?;
        if self.artifact.take().is_some() {
            tracing::info!("removed stored timetable");
        }
        self.expanded = false;
        Ok(())
    }

    /// Opens or closes the large view. Has no effect without a timetable.
    pub fn toggle_expand(&mut self) -> bool {
        if self.artifact.is_some() {
            self.expanded = !self.expanded;
        }
        self.expanded
    }

    pub fn close_expanded(&mut self) {
        self.expanded = false;
    }

    pub fn next_day(&mut self) -> usize {
        self.slider.next()
    }

    pub fn previous_day(&mut self) -> usize {
        self.slider.previous()
    }

    pub fn view(&self) -> WidgetView<'_> {
        match &self.artifact {
            None => WidgetView::Slider {
                day: self.slider.index(),
                label: self.slider.label(),
            },
            Some(StoredArtifact::Csv(rows)) => WidgetView::Csv {
                rows,
                expanded: self.expanded,
            },
            Some(StoredArtifact::Image(image)) => WidgetView::Image {
                image,
                expanded: self.expanded,
            },
        }
    }
}
