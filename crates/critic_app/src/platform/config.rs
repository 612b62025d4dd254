use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context};
use critic_core::Language;
use critic_engine::{GeminiSettings, OcrSettings, DEFAULT_API_BASE_URL, DEFAULT_MODEL};
use critic_logging::{critic_info, critic_warn};
use serde::{Deserialize, Serialize};

use super::logging::DEFAULT_LOG_FILE;

pub const CONFIG_FILENAME: &str = "critic.ron";
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Settings read from `critic.ron`. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub tesseract_path: PathBuf,
    pub ocr_language: String,
    pub ocr_timeout_secs: u64,
    pub output_dir: PathBuf,
    pub font_path: Option<PathBuf>,
    pub logo_path: Option<PathBuf>,
    pub share_command: Option<String>,
    pub language: String,
    pub log_level: String,
    pub log_destination: String,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 120,
            tesseract_path: PathBuf::from("tesseract"),
            ocr_language: "eng".to_string(),
            ocr_timeout_secs: 30,
            output_dir: PathBuf::from("artl_output"),
            font_path: None,
            logo_path: None,
            share_command: None,
            language: Language::default().tag().to_string(),
            log_level: "info".to_string(),
            log_destination: "file".to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

/// `<config dir>/artl/critic.ron`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("artl").join(CONFIG_FILENAME))
}

/// Writes the default configuration; an existing file is left alone.
pub fn write_default(path: &Path) -> anyhow::Result<()> {
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let content = ron::ser::to_string_pretty(&AppConfig::default(), ron::ser::PrettyConfig::new())
        .context("serializing default configuration")?;
    fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

impl AppConfig {
    /// Reads the file at `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                critic_info!("No configuration at {:?}, using defaults", path);
                return Ok(Self::default());
            }
            Err(err) => return Err(err).with_context(|| format!("reading {}", path.display())),
        };
        let config: Self = ron::from_str(&content).context("parsing configuration")?;
        critic_info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// A non-blank API key in the environment wins over the file.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(API_KEY_ENV).filter(|key| !key.trim().is_empty()) {
            self.api_key = Some(key);
        }
    }

    pub fn language(&self) -> Language {
        self.language.parse().unwrap_or_else(|err| {
            critic_warn!("{err}; falling back to {}", Language::default());
            Language::default()
        })
    }

    pub fn gemini_settings(&self) -> GeminiSettings {
        GeminiSettings {
            api_key: self.api_key.clone().unwrap_or_default(),
            model: self.model.clone(),
            base_url: self.api_base_url.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..GeminiSettings::default()
        }
    }

    pub fn ocr_settings(&self) -> OcrSettings {
        OcrSettings {
            executable: self.tesseract_path.clone(),
            language: self.ocr_language.clone(),
            timeout: Duration::from_secs(self.ocr_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig::load(&temp.path().join("absent.ron")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"(api_key: Some("from-file"), language: "zh-TW", ocr_timeout_secs: 5)"#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();

        assert_eq!(config.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.language(), Language::ZhTw);
        assert_eq!(config.ocr_settings().timeout, Duration::from_secs(5));
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(api_key: ").unwrap();

        assert!(AppConfig::load(&path).is_err());
    }

    #[test]
    fn written_defaults_load_back() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join(CONFIG_FILENAME);

        write_default(&path).unwrap();

        assert_eq!(AppConfig::load(&path).unwrap(), AppConfig::default());
        assert!(write_default(&path).is_err());
    }

    #[test]
    fn environment_key_overrides_file() {
        let mut config = AppConfig {
            api_key: Some("from-file".to_string()),
            ..AppConfig::default()
        };

        config.apply_env(|_| Some("   ".to_string()));
        assert_eq!(config.api_key.as_deref(), Some("from-file"));

        config.apply_env(|name| (name == API_KEY_ENV).then(|| "from-env".to_string()));
        assert_eq!(config.api_key.as_deref(), Some("from-env"));
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        let config = AppConfig {
            language: "fr".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.language(), Language::En);
    }
}
