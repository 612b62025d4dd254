use critic_core::i18n::{self, Key};
use critic_core::{AnalysisStage, AppViewModel, ArtworkInfo, Display, Field, Language, ResultView, Screen};

const RULE: &str = "────────────────────────────────────────";

/// Lines for the whole screen, rebuilt from the view model on every change.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let language = view.language;
    let t = |key| i18n::text(key, language);

    let mut lines = vec![
        RULE.to_string(),
        format!("ARTL · {}   [{}]", t(Key::Slogan), language.display_name()),
        RULE.to_string(),
    ];

    if let Some(error) = &view.error_message {
        lines.push(format!("! {}: {error}", t(Key::Error)));
        lines.push(String::new());
    }

    match view.screen {
        Screen::Form => render_form(view, &mut lines),
        Screen::Loading => render_loading(view, &mut lines),
        Screen::Result => {
            if let Some(result) = &view.result {
                render_result(language, &view.info, result, &mut lines);
            }
        }
    }
    lines
}

fn render_form(view: &AppViewModel, lines: &mut Vec<String>) {
    let t = |key| i18n::text(key, view.language);
    let selected = |flag: bool| if flag { "✓" } else { t(Key::NotSelected) };

    lines.push(format!("{}: {}", t(Key::ArtworkPhoto), selected(view.artwork_selected)));
    let mut label = format!("{}: {}", t(Key::LabelPhoto), selected(view.label_selected));
    if view.ocr_running {
        label.push(' ');
        label.push_str(t(Key::ProcessingLabel));
    }
    lines.push(label);
    lines.push(String::new());

    lines.push(t(Key::ArtworkInformation).to_string());
    for field in Field::ALL {
        lines.push(format!(
            "  [{}] {} {}",
            field.name(),
            t(field.label_key()),
            view.info.get(field)
        ));
    }
    lines.push(String::new());
    lines.push(format!("> submit  {}", t(Key::AnalyzeArtwork)));
}

fn render_loading(view: &AppViewModel, lines: &mut Vec<String>) {
    let t = |key| i18n::text(key, view.language);
    match view.loading_stage {
        Some(AnalysisStage::Summary) => lines.push(t(Key::GeneratingSummary).to_string()),
        _ => {
            lines.push(t(Key::AnalyzingArtwork).to_string());
            lines.push(t(Key::PleaseWait).to_string());
        }
    }
}

fn render_result(language: Language, info: &ArtworkInfo, result: &ResultView, lines: &mut Vec<String>) {
    let t = |key| i18n::text(key, language);

    lines.push(format!("[{}]", t(Key::Artwork)));
    lines.push(String::new());
    lines.push(t(Key::SubmittedInformation).to_string());
    for field in Field::ALL {
        let value = info.provided(field).unwrap_or_else(|| t(Key::NotAvailable));
        lines.push(format!("  {} {value}", t(field.label_key())));
    }
    lines.push(String::new());

    lines.push(t(Key::AiAnalysis).to_string());
    let heading = match result.display {
        Display::Summary => format!("{} ({})", t(Key::Summary), t(Key::SummaryReadTime)),
        Display::Full => format!("{} ({})", t(Key::FullAnalysis), t(Key::FullReadTime)),
        Display::Translating => t(Key::TranslatingAnalysis).to_string(),
    };
    lines.push(heading);
    lines.push(String::new());
    lines.extend(result.visible_text().lines().map(str::to_string));
    lines.push(String::new());

    match (result.display, result.summary.is_some()) {
        (Display::Summary, true) => lines.push(format!("> toggle  {}", t(Key::ReadFullAnalysis))),
        (Display::Full, true) => lines.push(format!("> toggle  {}", t(Key::ShowSummaryOnly))),
        _ => {}
    }
    if result.display != Display::Translating {
        lines.push("> save-photo | save | share".to_string());
    }
    lines.push(format!("> another  {}", t(Key::AnalyzeAnother)));
    lines.push(String::new());
    lines.push(format!("{} {}", t(Key::DisclaimerTitle), t(Key::DisclaimerText)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_view(display: Display, summary: Option<&str>) -> AppViewModel {
        AppViewModel {
            screen: Screen::Result,
            info: ArtworkInfo {
                title: "Dusk".to_string(),
                ..ArtworkInfo::default()
            },
            result: Some(ResultView {
                description: "Full text.\nSecond paragraph.".to_string(),
                summary: summary.map(str::to_string),
                display,
            }),
            ..AppViewModel::default()
        }
    }

    #[test]
    fn form_shows_selection_and_processing_state() {
        let view = AppViewModel {
            artwork_selected: true,
            ocr_running: true,
            ..AppViewModel::default()
        };

        let lines = render(&view);

        assert!(lines.contains(&"Artwork Photo: ✓".to_string()));
        assert!(lines.contains(&"Artwork Label: (none) (Processing Label...)".to_string()));
        assert!(lines.iter().any(|line| line.starts_with("  [artist] Artist Name:")));
    }

    #[test]
    fn loading_shows_current_stage() {
        let view = AppViewModel {
            screen: Screen::Loading,
            loading_stage: Some(AnalysisStage::Summary),
            ..AppViewModel::default()
        };

        assert!(render(&view).contains(&"Writing summary...".to_string()));
    }

    #[test]
    fn summary_display_offers_full_analysis() {
        let lines = render(&result_view(Display::Summary, Some("Short.")));

        assert!(lines.contains(&"Summary (~30 sec read)".to_string()));
        assert!(lines.contains(&"Short.".to_string()));
        assert!(!lines.contains(&"Full text.".to_string()));
        assert!(lines.contains(&"> toggle  Read Full Analysis".to_string()));
        assert!(lines.contains(&"  Artwork Title: Dusk".to_string()));
        assert!(lines.contains(&"  Artist Name: N/A".to_string()));
    }

    #[test]
    fn translating_hides_toggle_and_exports() {
        let lines = render(&result_view(Display::Translating, Some("Short.")));

        assert!(lines.contains(&"Translating analysis...".to_string()));
        assert!(lines.contains(&"Full text.".to_string()));
        assert!(!lines.iter().any(|line| line.starts_with("> toggle")));
        assert!(!lines.iter().any(|line| line.starts_with("> save-photo")));
    }

    #[test]
    fn error_and_strings_follow_language() {
        let view = AppViewModel {
            language: Language::ZhCn,
            error_message: Some("坏了".to_string()),
            ..AppViewModel::default()
        };

        let lines = render(&view);

        assert!(lines.contains(&"! 错误: 坏了".to_string()));
        assert!(lines.contains(&"艺术品照片: （未选择）".to_string()));
    }
}
