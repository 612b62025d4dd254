use std::fmt;
use std::path::PathBuf;

use crate::export::ExportError;
use crate::ocr::OcrError;

pub type JobId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Recognizing,
    Critique,
    Summary,
    TranslatingDescription,
    TranslatingSummary,
    Composing,
    Writing,
    Sharing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobProgress {
    pub job_id: JobId,
    pub stage: Stage,
}

/// Image attached to a generation request.
#[derive(Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for InlineImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InlineImage")
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOutput {
    pub description: String,
    pub summary: Option<String>,
}

/// Both translation replies; each part succeeds or fails on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOutput {
    pub description: Result<String, GenerateError>,
    pub summary: Option<Result<String, GenerateError>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    PhotoSaved(PathBuf),
    CardSaved(PathBuf),
    CardShared(PathBuf),
    /// The card was saved but could not be handed to a share target.
    ShareFallback { path: PathBuf, text: String },
}

#[derive(Debug)]
pub enum EngineEvent {
    Progress(JobProgress),
    LabelRecognized {
        job_id: JobId,
        result: Result<String, OcrError>,
    },
    AnalysisCompleted {
        job_id: JobId,
        result: Result<AnalysisOutput, GenerateError>,
    },
    TranslationCompleted {
        job_id: JobId,
        output: TranslationOutput,
    },
    ExportCompleted {
        job_id: JobId,
        result: Result<ExportOutcome, ExportError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct GenerateError {
    pub kind: FailureKind,
    pub message: String,
}

impl GenerateError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    MissingApiKey,
    HttpStatus(u16),
    Timeout,
    Network,
    Decode,
    EmptyResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::MissingApiKey => write!(f, "missing api key"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::EmptyResponse => write!(f, "empty response"),
        }
    }
}
