use critic_core::{
    update, AnalysisResult, AppState, Display, Effect, ImageData, Language, Msg, Notice,
    RequestId, Screen,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    critic_logging::initialize_for_tests();
}

fn result_state(summary: Option<&str>) -> AppState {
    let image = ImageData::new(vec![1, 2, 3], "image/png");
    let (state, _) = update(AppState::new(), Msg::ArtworkImageSelected(image));
    let (state, effects) = update(state, Msg::SubmitClicked);
    let request = match effects[0] {
        Effect::RequestAnalysis { request, .. } => request,
        _ => panic!("expected analysis effect"),
    };
    let (state, _) = update(
        state,
        Msg::AnalysisCompleted {
            request,
            result: Ok(AnalysisResult {
                description: "Bold brushwork.".to_string(),
                summary: summary.map(str::to_string),
            }),
        },
    );
    state
}

fn translation_request(effects: &[Effect]) -> RequestId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::RequestTranslation { request, .. } => Some(*request),
            _ => None,
        })
        .expect("translation effect")
}

#[test]
fn language_change_in_form_only_sets_language() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::LanguageSelected(Language::ZhCn));

    assert!(effects.is_empty());
    assert_eq!(state.language(), Language::ZhCn);
}

#[test]
fn same_language_is_a_noop() {
    init_logging();
    let state = result_state(Some("Short."));
    let before = state.clone();

    let (next, effects) = update(state, Msg::LanguageSelected(Language::En));

    assert_eq!(next, before);
    assert!(effects.is_empty());
}

#[test]
fn language_change_with_result_requests_both_translations() {
    init_logging();
    let state = result_state(Some("Short."));

    let (state, effects) = update(state, Msg::LanguageSelected(Language::ZhTw));

    assert_eq!(
        effects,
        vec![Effect::RequestTranslation {
            request: translation_request(&effects),
            language: Language::ZhTw,
            description_prompt: "翻譯成繁體中文:\n\nBold brushwork.".to_string(),
            summary_prompt: Some("翻譯成繁體中文:\n\nShort.".to_string()),
        }]
    );
    let view = state.view();
    assert_eq!(view.screen, Screen::Result);
    assert_eq!(view.language, Language::ZhTw);
    assert_eq!(view.result.unwrap().display, Display::Translating);
}

#[test]
fn successful_translation_replaces_both_fields() {
    init_logging();
    let (state, effects) = update(result_state(Some("Short.")), Msg::LanguageSelected(Language::ZhCn));
    let request = translation_request(&effects);

    let (state, effects) = update(
        state,
        Msg::TranslationCompleted {
            request,
            description: Ok("大胆的笔触。".to_string()),
            summary: Some(Ok("简短。".to_string())),
        },
    );

    assert!(effects.is_empty());
    let result = state.view().result.unwrap();
    assert_eq!(result.description, "大胆的笔触。");
    assert_eq!(result.summary.as_deref(), Some("简短。"));
    assert_eq!(result.display, Display::Summary);
}

#[test]
fn failed_parts_are_replaced_by_localized_fallbacks() {
    init_logging();
    let (state, effects) = update(result_state(Some("Short.")), Msg::LanguageSelected(Language::ZhTw));
    let request = translation_request(&effects);

    let (state, effects) = update(
        state,
        Msg::TranslationCompleted {
            request,
            description: Ok("大膽的筆觸。".to_string()),
            summary: Some(Err("timeout".to_string())),
        },
    );

    assert_eq!(effects, vec![Effect::Notify(Notice::TranslationUnavailable)]);
    let result = state.view().result.unwrap();
    assert_eq!(result.description, "大膽的筆觸。");
    assert_eq!(result.summary.as_deref(), Some("【繁體中文摘要】Short."));
}

#[test]
fn failed_description_never_keeps_old_language_text() {
    init_logging();
    let (state, effects) = update(result_state(None), Msg::LanguageSelected(Language::ZhCn));
    let request = translation_request(&effects);

    let (state, effects) = update(
        state,
        Msg::TranslationCompleted {
            request,
            description: Err("http status 500".to_string()),
            summary: None,
        },
    );

    assert_eq!(effects, vec![Effect::Notify(Notice::TranslationUnavailable)]);
    let result = state.view().result.unwrap();
    assert!(result.description.starts_with("【简体中文分析】"));
    assert!(result.description.ends_with("原始分析：Bold brushwork."));
    assert_eq!(result.summary, None);
}

#[test]
fn language_change_during_translation_is_rejected() {
    init_logging();
    let (state, _) = update(result_state(Some("Short.")), Msg::LanguageSelected(Language::ZhTw));
    let before = state.clone();

    let (next, effects) = update(state, Msg::LanguageSelected(Language::ZhCn));

    assert_eq!(next, before);
    assert_eq!(effects, vec![Effect::Notify(Notice::Busy)]);
}

#[test]
fn exports_are_blocked_while_translating() {
    init_logging();
    let (state, _) = update(result_state(Some("Short.")), Msg::LanguageSelected(Language::ZhTw));

    let (_, effects) = update(state, Msg::ShareClicked);

    assert_eq!(effects, vec![Effect::Notify(Notice::Busy)]);
}

#[test]
fn translation_keeps_the_full_analysis_open() {
    init_logging();
    let (state, _) = update(result_state(Some("Short.")), Msg::ToggleFullAnalysis);
    let (state, effects) = update(state, Msg::LanguageSelected(Language::ZhTw));
    let request = translation_request(&effects);

    let (state, _) = update(
        state,
        Msg::TranslationCompleted {
            request,
            description: Ok("大膽的筆觸。".to_string()),
            summary: Some(Ok("簡短。".to_string())),
        },
    );

    let result = state.view().result.unwrap();
    assert_eq!(result.display, Display::Full);
    assert_eq!(result.visible_text(), "大膽的筆觸。");
}
