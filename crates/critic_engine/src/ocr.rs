use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("label image is empty")]
    EmptyImage,
    #[error("could not stage label image: {0}")]
    Staging(#[from] io::Error),
    #[error("could not launch {executable}: {source}")]
    Launch {
        executable: String,
        #[source]
        source: io::Error,
    },
    #[error("recognition timed out after {secs}s")]
    Timeout { secs: u64 },
    #[error("tesseract exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
}

#[derive(Debug, Clone)]
pub struct OcrSettings {
    pub executable: PathBuf,
    pub language: String,
    pub timeout: Duration,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("tesseract"),
            language: "eng".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Turns a photo of a museum label into raw text.
#[async_trait::async_trait]
pub trait Recognizer: Send + Sync {
    async fn recognize(&self, image: &[u8]) -> Result<String, OcrError>;
}

#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    settings: OcrSettings,
}

impl TesseractRecognizer {
    pub fn new(settings: OcrSettings) -> Self {
        Self { settings }
    }
}

#[async_trait::async_trait]
impl Recognizer for TesseractRecognizer {
    async fn recognize(&self, image: &[u8]) -> Result<String, OcrError> {
        if image.is_empty() {
            return Err(OcrError::EmptyImage);
        }

        // Kept alive until the child exits; removed on drop.
        let mut staged = tempfile::Builder::new()
            .prefix("critic-label-")
            .tempfile()?;
        staged.write_all(image)?;
        staged.flush()?;

        let mut command = Command::new(&self.settings.executable);
        command
            .arg(staged.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.settings.language)
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.settings.timeout, command.output())
            .await
            .map_err(|_| OcrError::Timeout {
                secs: self.settings.timeout.as_secs(),
            })?
            .map_err(|source| OcrError::Launch {
                executable: self.settings.executable.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(OcrError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        critic_logging::critic_debug!(
            "ocr: recognized {} chars: {}",
            text.chars().count(),
            critic_logging::excerpt(&text, 60)
        );
        Ok(text)
    }
}
