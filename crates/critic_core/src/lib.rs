//! Critic core: label field extraction, prompts and the pure session state machine.
mod effect;
mod extract;
pub mod i18n;
mod language;
mod msg;
pub mod prompt;
mod state;
mod update;
mod view_model;

pub use effect::{AnalysisCard, Effect, ExportMode, ExportOutcome, Notice};
pub use extract::{extract_label_fields, LabelFields};
pub use language::{Language, UnknownLanguage};
pub use msg::Msg;
pub use state::{
    AnalysisResult, AnalysisStage, AppState, ArtworkInfo, Field, ImageData, RequestId,
    SessionError, UnknownField, View,
};
pub use update::update;
pub use view_model::{AppViewModel, Display, ResultView, Screen};
