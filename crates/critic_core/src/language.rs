use std::fmt;
use std::str::FromStr;

/// Output language for critiques and UI strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    En,
    ZhTw,
    ZhCn,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::ZhTw, Language::ZhCn];

    pub fn tag(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::ZhTw => "zh-TW",
            Language::ZhCn => "zh-CN",
        }
    }

    /// Name shown in the language menu and next to the analysis heading.
    pub fn display_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::ZhTw => "繁體中文",
            Language::ZhCn => "简体中文",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language tag {0:?} (expected en, zh-TW or zh-CN)")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('_', "-");
        Language::ALL
            .into_iter()
            .find(|lang| lang.tag().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}
