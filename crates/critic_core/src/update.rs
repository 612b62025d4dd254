use crate::prompt::{
    critique_prompt, summary_instruction, translate_prompt, translation_fallback_description,
    translation_fallback_summary,
};
use crate::{
    extract_label_fields, AnalysisCard, AnalysisResult, AnalysisStage, AppState, Display, Effect,
    ExportMode, ExportOutcome, Field, Language, Msg, Notice, RequestId, SessionError, View,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ArtworkImageSelected(image) => {
            if is_form(&state) {
                state.set_artwork_image(image);
            }
            Vec::new()
        }
        Msg::LabelImageSelected(image) => {
            if !is_form(&state) {
                return (state, Vec::new());
            }
            // A newer label supersedes any OCR still running for the previous one.
            let request = state.next_request();
            state.set_label_image(image.clone());
            state.set_error(None);
            state.set_ocr_request(Some(request));
            vec![Effect::RecognizeLabel { request, image }]
        }
        Msg::OcrCompleted { request, result } => {
            if state.ocr_request() != Some(request) {
                return (state, Vec::new());
            }
            state.set_ocr_request(None);
            // Metadata is frozen once the form has been submitted.
            if !is_form(&state) {
                return (state, Vec::new());
            }
            match result {
                Ok(text) => state.info_mut().merge(extract_label_fields(&text)),
                Err(_) => state.set_error(Some(SessionError::Ocr)),
            }
            Vec::new()
        }
        Msg::FieldEdited { field, value } => {
            if is_form(&state) {
                state.info_mut().set(field, value);
            }
            Vec::new()
        }
        Msg::SubmitClicked => submit(&mut state),
        Msg::AnalysisProgress { request, stage } => {
            let advances = matches!(
                state.current_view(),
                View::Loading { request: awaited, stage: current }
                    if *awaited == request && *current != stage
            );
            if advances {
                state.set_view(View::Loading { request, stage });
            }
            Vec::new()
        }
        Msg::AnalysisCompleted { request, result } => {
            if !matches!(state.current_view(), View::Loading { request: awaited, .. } if *awaited == request)
            {
                return (state, Vec::new());
            }
            match result {
                Ok(result) => state.set_view(View::Result {
                    result,
                    show_full: false,
                    translating: None,
                }),
                Err(detail) => {
                    state.set_error(Some(SessionError::Critique {
                        detail: Some(detail),
                    }));
                    state.set_view(View::Form);
                }
            }
            Vec::new()
        }
        Msg::LanguageSelected(language) => select_language(&mut state, language),
        Msg::TranslationCompleted {
            request,
            description,
            summary,
        } => apply_translation(&mut state, request, description, summary),
        Msg::ToggleFullAnalysis => {
            if let View::Result {
                result,
                show_full,
                translating: None,
            } = state.current_view()
            {
                if result.summary.is_some() {
                    let flipped = View::Result {
                        result: result.clone(),
                        show_full: !*show_full,
                        translating: None,
                    };
                    state.set_view(flipped);
                }
            }
            Vec::new()
        }
        Msg::AnalyzeAnotherClicked => {
            if matches!(state.current_view(), View::Loading { .. }) {
                return (state, vec![Effect::Notify(Notice::Busy)]);
            }
            state.reset_session();
            Vec::new()
        }
        Msg::DismissError => {
            if state.error().is_some() {
                state.set_error(None);
            }
            Vec::new()
        }
        Msg::SaveArtworkClicked => save_artwork(&mut state),
        Msg::SaveAnalysisClicked => export(&mut state, ExportMode::Save),
        Msg::ShareClicked => export(&mut state, ExportMode::Share),
        Msg::ExportFinished { result, .. } => {
            let notice = match result {
                Ok(ExportOutcome::PhotoSaved { path }) => Notice::PhotoSaved { path },
                Ok(ExportOutcome::CardSaved { path }) => Notice::AnalysisSaved { path },
                Ok(ExportOutcome::CardShared) => Notice::AnalysisShared,
                Ok(ExportOutcome::ShareFallback { text }) => Notice::ShareFallback { text },
                Err(detail) => Notice::ExportFailed { detail },
            };
            vec![Effect::Notify(notice)]
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn is_form(state: &AppState) -> bool {
    matches!(state.current_view(), View::Form)
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    match state.current_view() {
        View::Form => {}
        View::Loading { .. } => return vec![Effect::Notify(Notice::Busy)],
        View::Result { .. } => return Vec::new(),
    }
    let Some(image) = state.artwork_image().cloned() else {
        return vec![Effect::Notify(Notice::ArtworkRequired)];
    };

    let language = state.language();
    let prompt = critique_prompt(language, state.artwork_info());
    let request = state.next_request();
    state.set_error(None);
    state.set_view(View::Loading {
        request,
        stage: AnalysisStage::Critique,
    });
    vec![Effect::RequestAnalysis {
        request,
        image,
        prompt,
        summary_instruction: summary_instruction(language).to_string(),
    }]
}

fn select_language(state: &mut AppState, language: Language) -> Vec<Effect> {
    if state.language() == language {
        return Vec::new();
    }
    let result = match state.current_view() {
        View::Form => {
            state.set_language(language);
            return Vec::new();
        }
        View::Loading { .. } | View::Result {
            translating: Some(_),
            ..
        } => return vec![Effect::Notify(Notice::Busy)],
        View::Result { result, .. } => result.clone(),
    };

    let request = state.next_request();
    state.set_language(language);
    if let View::Result { translating, .. } = state.view_mut() {
        *translating = Some(request);
    }
    vec![Effect::RequestTranslation {
        request,
        language,
        description_prompt: translate_prompt(language, &result.description),
        summary_prompt: result
            .summary
            .as_deref()
            .map(|summary| translate_prompt(language, summary)),
    }]
}

fn apply_translation(
    state: &mut AppState,
    request: RequestId,
    description: Result<String, String>,
    summary: Option<Result<String, String>>,
) -> Vec<Effect> {
    let language = state.language();
    let View::Result {
        result,
        show_full,
        translating,
    } = state.current_view()
    else {
        return Vec::new();
    };
    if *translating != Some(request) {
        return Vec::new();
    }

    let mut failed = false;
    let new_description = description.unwrap_or_else(|_| {
        failed = true;
        translation_fallback_description(language, &result.description)
    });
    // The summary is replaced whenever one existed, even if its reply went missing.
    let new_summary = result.summary.as_deref().map(|original| match summary {
        Some(Ok(text)) => text,
        Some(Err(_)) | None => {
            failed = true;
            translation_fallback_summary(language, original)
        }
    });

    let show_full = *show_full;
    state.set_view(View::Result {
        result: AnalysisResult {
            description: new_description,
            summary: new_summary,
        },
        show_full,
        translating: None,
    });

    if failed {
        vec![Effect::Notify(Notice::TranslationUnavailable)]
    } else {
        Vec::new()
    }
}

fn save_artwork(state: &mut AppState) -> Vec<Effect> {
    if !matches!(state.current_view(), View::Result { .. }) {
        return Vec::new();
    }
    let Some(image) = state.artwork_image().cloned() else {
        return vec![Effect::Notify(Notice::ArtworkRequired)];
    };
    let title = state
        .artwork_info()
        .provided(Field::Title)
        .map(str::to_string);
    let request = state.next_request();
    vec![Effect::SaveArtwork {
        request,
        image,
        title,
    }]
}

fn export(state: &mut AppState, mode: ExportMode) -> Vec<Effect> {
    let body = match state.view().result {
        Some(view) if view.display != Display::Translating => view.visible_text().to_string(),
        Some(_) => return vec![Effect::Notify(Notice::Busy)],
        None => return Vec::new(),
    };
    let Some(artwork) = state.artwork_image().cloned() else {
        return Vec::new();
    };

    let info = state.artwork_info();
    let title = info.provided(Field::Title).map(str::to_string);
    let byline = match (info.provided(Field::ArtistName), info.provided(Field::Year)) {
        (Some(artist), Some(year)) => Some(format!("{artist}, {year}")),
        (Some(artist), None) => Some(artist.to_string()),
        (None, _) => None,
    };
    let request = state.next_request();
    vec![Effect::ExportAnalysis {
        request,
        mode,
        card: AnalysisCard {
            artwork,
            title,
            byline,
            body,
        },
    }]
}
