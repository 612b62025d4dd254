use crate::i18n::{self, Key};
use crate::{ImageData, Language, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    RecognizeLabel {
        request: RequestId,
        image: ImageData,
    },
    RequestAnalysis {
        request: RequestId,
        image: ImageData,
        prompt: String,
        summary_instruction: String,
    },
    RequestTranslation {
        request: RequestId,
        language: Language,
        description_prompt: String,
        summary_prompt: Option<String>,
    },
    SaveArtwork {
        request: RequestId,
        image: ImageData,
        title: Option<String>,
    },
    ExportAnalysis {
        request: RequestId,
        mode: ExportMode,
        card: AnalysisCard,
    },
    Notify(Notice),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    Save,
    Share,
}

/// Everything the exported analysis image shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisCard {
    pub artwork: ImageData,
    pub title: Option<String>,
    /// `"artist, year"`, or just the artist.
    pub byline: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    PhotoSaved { path: String },
    CardSaved { path: String },
    CardShared,
    /// Image sharing was unavailable; the share text should be offered instead.
    ShareFallback { text: String },
}

/// One-shot message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    ArtworkRequired,
    Busy,
    TranslationUnavailable,
    PhotoSaved { path: String },
    AnalysisSaved { path: String },
    AnalysisShared,
    ShareFallback { text: String },
    ExportFailed { detail: String },
}

impl Notice {
    pub fn message(&self, language: Language) -> String {
        let text = |key| i18n::text(key, language);
        match self {
            Notice::ArtworkRequired => text(Key::UploadArtworkFirst).to_string(),
            Notice::Busy => text(Key::Busy).to_string(),
            Notice::TranslationUnavailable => text(Key::TranslationUnavailable).to_string(),
            Notice::PhotoSaved { path } => format!("{} {path}", text(Key::PhotoSaved)),
            Notice::AnalysisSaved { path } => format!("{} {path}", text(Key::AnalysisSaved)),
            Notice::AnalysisShared => text(Key::AnalysisShared).to_string(),
            Notice::ShareFallback { text: share } => {
                format!("{}\n{share}", text(Key::ShareCopied))
            }
            Notice::ExportFailed { detail } => {
                format!("{} ({detail})", text(Key::ExportFailed))
            }
        }
    }
}
