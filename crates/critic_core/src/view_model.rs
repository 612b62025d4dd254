use crate::{AnalysisStage, ArtworkInfo, Language};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Form,
    Loading,
    Result,
}

/// Which text the result screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Summary,
    Full,
    /// A translation is in flight; actions are hidden.
    Translating,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub language: Language,
    pub screen: Screen,
    pub loading_stage: Option<AnalysisStage>,
    pub info: ArtworkInfo,
    pub artwork_selected: bool,
    pub label_selected: bool,
    pub ocr_running: bool,
    pub error_message: Option<String>,
    pub result: Option<ResultView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub description: String,
    pub summary: Option<String>,
    pub display: Display,
}

impl ResultView {
    /// Text for the current display mode; the exported card uses the same choice.
    pub fn visible_text(&self) -> &str {
        match (self.display, self.summary.as_deref()) {
            (Display::Summary, Some(summary)) => summary,
            _ => &self.description,
        }
    }
}
