//! Critic engine: OCR, generation, export and the background job runner.
mod compose;
mod engine;
mod export;
mod filename;
mod generate;
mod ocr;
mod persist;
mod pipeline;
mod share;
mod types;

pub use compose::{
    compose_analysis_card, fit_within, wrap_paragraphs, CardAssets, CardContent, ComposeError,
    FixedAdvance, FontFace, TextMeasure, CARD_HEIGHT, CARD_WIDTH,
};
pub use engine::{EngineConfig, EngineError, EngineHandle};
pub use export::{run_export, Clock, ExportError, ExportJob, ExportSettings, CARD_PREFIX, PHOTO_PREFIX};
pub use filename::{export_filename, extension_for_mime};
pub use generate::{GeminiGenerator, GeminiSettings, Generator, DEFAULT_API_BASE_URL, DEFAULT_MODEL};
pub use ocr::{OcrError, OcrSettings, Recognizer, TesseractRecognizer};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use pipeline::{
    run_analysis, run_translation, AnalysisJob, ChannelProgressSink, ProgressSink, TranslationJob,
};
pub use share::{share_file, ShareError};
pub use types::{
    AnalysisOutput, EngineEvent, ExportOutcome, FailureKind, GenerateError, InlineImage, JobId,
    JobProgress, Stage, TranslationOutput,
};
