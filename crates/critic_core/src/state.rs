use std::fmt;
use std::str::FromStr;

use crate::i18n::{self, Key};
use crate::view_model::{AppViewModel, Display, ResultView, Screen};
use crate::{Language, LabelFields};

pub type RequestId = u64;

/// An image selected by the user, owned by the session.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageData {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ImageData {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }
}

impl fmt::Debug for ImageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageData")
            .field("len", &self.bytes.len())
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ArtistName,
    Title,
    Medium,
    Year,
    Dimensions,
    Notes,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::ArtistName,
        Field::Title,
        Field::Medium,
        Field::Year,
        Field::Dimensions,
        Field::Notes,
    ];

    /// Short name used by the command line (`set title ...`).
    pub fn name(self) -> &'static str {
        match self {
            Field::ArtistName => "artist",
            Field::Title => "title",
            Field::Medium => "medium",
            Field::Year => "year",
            Field::Dimensions => "dimensions",
            Field::Notes => "notes",
        }
    }

    pub fn label_key(self) -> Key {
        match self {
            Field::ArtistName => Key::ArtistName,
            Field::Title => Key::ArtworkTitle,
            Field::Medium => Key::Medium,
            Field::Year => Key::Year,
            Field::Dimensions => Key::Dimensions,
            Field::Notes => Key::OtherNotes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field {0:?}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Field::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Metadata typed by the user or filled from the label photo.
///
/// A blank value means the field was not provided.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArtworkInfo {
    pub artist_name: String,
    pub title: String,
    pub medium: String,
    pub year: String,
    pub dimensions: String,
    pub notes: String,
}

impl ArtworkInfo {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::ArtistName => &self.artist_name,
            Field::Title => &self.title,
            Field::Medium => &self.medium,
            Field::Year => &self.year,
            Field::Dimensions => &self.dimensions,
            Field::Notes => &self.notes,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::ArtistName => &mut self.artist_name,
            Field::Title => &mut self.title,
            Field::Medium => &mut self.medium,
            Field::Year => &mut self.year,
            Field::Dimensions => &mut self.dimensions,
            Field::Notes => &mut self.notes,
        };
        *slot = value.into();
    }

    /// Trimmed value, or `None` when the field is blank.
    pub fn provided(&self, field: Field) -> Option<&str> {
        let value = self.get(field).trim();
        (!value.is_empty()).then_some(value)
    }

    /// Shallow merge: every field present in `fields` overwrites the current value.
    pub fn merge(&mut self, fields: LabelFields) {
        let LabelFields {
            artist_name,
            title,
            medium,
            year,
        } = fields;
        for (field, value) in [
            (Field::ArtistName, artist_name),
            (Field::Title, title),
            (Field::Medium, medium),
            (Field::Year, year),
        ] {
            if let Some(value) = value {
                self.set(field, value);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    pub description: String,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStage {
    Critique,
    Summary,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Form,
    Loading {
        request: RequestId,
        stage: AnalysisStage,
    },
    Result {
        result: AnalysisResult,
        show_full: bool,
        translating: Option<RequestId>,
    },
}

/// Failure surfaced on the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    Ocr,
    Critique { detail: Option<String> },
}

impl SessionError {
    pub fn message(&self, language: Language) -> String {
        match self {
            SessionError::Ocr => i18n::text(Key::OcrError, language).to_string(),
            SessionError::Critique { detail } => {
                let mut message = i18n::text(Key::ApiError, language).to_string();
                if let Some(detail) = detail.as_deref().filter(|d| !d.trim().is_empty()) {
                    message.push('\n');
                    message.push_str(i18n::text(Key::ErrorDetails, language));
                    message.push(' ');
                    message.push_str(detail);
                }
                message
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    language: Language,
    view: View,
    info: ArtworkInfo,
    artwork_image: Option<ImageData>,
    label_image: Option<ImageData>,
    ocr_request: Option<RequestId>,
    error: Option<SessionError>,
    last_request: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_language(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn current_view(&self) -> &View {
        &self.view
    }

    pub fn artwork_info(&self) -> &ArtworkInfo {
        &self.info
    }

    pub fn artwork_image(&self) -> Option<&ImageData> {
        self.artwork_image.as_ref()
    }

    pub fn label_image(&self) -> Option<&ImageData> {
        self.label_image.as_ref()
    }

    pub fn error(&self) -> Option<&SessionError> {
        self.error.as_ref()
    }

    pub fn is_ocr_running(&self) -> bool {
        self.ocr_request.is_some()
    }

    pub fn view(&self) -> AppViewModel {
        let (screen, loading_stage, result) = match &self.view {
            View::Form => (Screen::Form, None, None),
            View::Loading { stage, .. } => (Screen::Loading, Some(*stage), None),
            View::Result {
                result,
                show_full,
                translating,
            } => {
                let display = if translating.is_some() {
                    Display::Translating
                } else if result.summary.is_some() && !show_full {
                    Display::Summary
                } else {
                    Display::Full
                };
                let view = ResultView {
                    description: result.description.clone(),
                    summary: result.summary.clone(),
                    display,
                };
                (Screen::Result, None, Some(view))
            }
        };

        AppViewModel {
            language: self.language,
            screen,
            loading_stage,
            info: self.info.clone(),
            artwork_selected: self.artwork_image.is_some(),
            label_selected: self.label_image.is_some(),
            ocr_running: self.ocr_request.is_some(),
            error_message: self.error.as_ref().map(|e| e.message(self.language)),
            result,
            dirty: self.dirty,
        }
    }

    /// Returns whether the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn next_request(&mut self) -> RequestId {
        self.last_request += 1;
        self.last_request
    }

    pub(crate) fn set_language(&mut self, language: Language) {
        self.language = language;
        self.mark_dirty();
    }

    pub(crate) fn set_view(&mut self, view: View) {
        self.view = view;
        self.mark_dirty();
    }

    pub(crate) fn view_mut(&mut self) -> &mut View {
        self.mark_dirty();
        &mut self.view
    }

    pub(crate) fn info_mut(&mut self) -> &mut ArtworkInfo {
        self.mark_dirty();
        &mut self.info
    }

    pub(crate) fn set_artwork_image(&mut self, image: ImageData) {
        self.artwork_image = Some(image);
        self.mark_dirty();
    }

    pub(crate) fn set_label_image(&mut self, image: ImageData) {
        self.label_image = Some(image);
        self.mark_dirty();
    }

    pub(crate) fn ocr_request(&self) -> Option<RequestId> {
        self.ocr_request
    }

    pub(crate) fn set_ocr_request(&mut self, request: Option<RequestId>) {
        self.ocr_request = request;
        self.mark_dirty();
    }

    pub(crate) fn set_error(&mut self, error: Option<SessionError>) {
        self.error = error;
        self.mark_dirty();
    }

    /// Back to an empty form. Language and the request counter survive so
    /// late completions from the previous session stay recognizably stale.
    pub(crate) fn reset_session(&mut self) {
        *self = Self {
            language: self.language,
            last_request: self.last_request,
            dirty: true,
            ..Self::default()
        };
    }
}
