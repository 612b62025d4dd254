use crate::{AnalysisResult, AnalysisStage, ExportOutcome, Field, ImageData, Language, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked the artwork photo.
    ArtworkImageSelected(ImageData),
    /// User picked the label photo; starts OCR.
    LabelImageSelected(ImageData),
    /// User edited one metadata field.
    FieldEdited { field: Field, value: String },
    /// User asked for an analysis.
    SubmitClicked,
    /// User picked an output language.
    LanguageSelected(Language),
    /// User switched between summary and full analysis.
    ToggleFullAnalysis,
    /// User asked to start over.
    AnalyzeAnotherClicked,
    /// User closed the error banner.
    DismissError,
    SaveArtworkClicked,
    SaveAnalysisClicked,
    ShareClicked,
    /// OCR finished for a label photo.
    OcrCompleted {
        request: RequestId,
        result: Result<String, String>,
    },
    /// The analysis pipeline moved to another stage.
    AnalysisProgress {
        request: RequestId,
        stage: AnalysisStage,
    },
    /// Critique (and optional summary) finished.
    AnalysisCompleted {
        request: RequestId,
        result: Result<AnalysisResult, String>,
    },
    /// Both translation calls finished; each part succeeded or failed on its own.
    TranslationCompleted {
        request: RequestId,
        description: Result<String, String>,
        summary: Option<Result<String, String>>,
    },
    /// A save or share request finished.
    ExportFinished {
        request: RequestId,
        result: Result<ExportOutcome, String>,
    },
    /// Render tick.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
