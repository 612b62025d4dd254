use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::compose::{compose_analysis_card, CardAssets, CardContent, ComposeError};
use crate::filename::{export_filename, extension_for_mime};
use crate::persist::{AtomicFileWriter, PersistError};
use crate::pipeline::ProgressSink;
use crate::share::share_file;
use crate::{EngineEvent, ExportOutcome, InlineImage, JobId, JobProgress, Stage};

pub const PHOTO_PREFIX: &str = "artl_artwork";
pub const CARD_PREFIX: &str = "artl_analysis";
const PHOTO_FALLBACK: &str = "photo";
const CARD_FALLBACK: &str = "artwork";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Compose(#[from] ComposeError),
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("export task failed: {0}")]
    Task(String),
}

#[derive(Debug, Clone)]
pub enum ExportJob {
    SavePhoto {
        job_id: JobId,
        image: InlineImage,
        title: Option<String>,
    },
    SaveCard {
        job_id: JobId,
        card: CardContent,
    },
    ShareCard {
        job_id: JobId,
        card: CardContent,
    },
}

impl ExportJob {
    pub fn job_id(&self) -> JobId {
        match self {
            ExportJob::SavePhoto { job_id, .. }
            | ExportJob::SaveCard { job_id, .. }
            | ExportJob::ShareCard { job_id, .. } => *job_id,
        }
    }
}

pub type Clock<T> = Arc<dyn Fn() -> T + Send + Sync>;

/// Where and how exports are written.
#[derive(Clone)]
pub struct ExportSettings {
    pub output_dir: PathBuf,
    pub assets: CardAssets,
    /// Program (plus leading arguments) that receives the saved card path.
    pub share_command: Option<String>,
    /// Offered to the user when the card cannot be shared as an image.
    pub share_text: String,
    /// Date printed in the card footer.
    pub today: Clock<String>,
    /// Milliseconds embedded in file names.
    pub now_millis: Clock<i64>,
}

pub async fn run_export(
    job: ExportJob,
    settings: &ExportSettings,
    sink: &dyn ProgressSink,
) -> Result<ExportOutcome, ExportError> {
    let job_id = job.job_id();
    let writer = AtomicFileWriter::new(settings.output_dir.clone());
    match job {
        ExportJob::SavePhoto { image, title, .. } => {
            sink.emit(progress(job_id, Stage::Writing));
            let filename = export_filename(
                PHOTO_PREFIX,
                title.as_deref(),
                PHOTO_FALLBACK,
                (settings.now_millis)(),
                extension_for_mime(&image.mime_type),
            );
            let path = write_blocking(writer, filename, image.bytes).await?;
            Ok(ExportOutcome::PhotoSaved(path))
        }
        ExportJob::SaveCard { card, .. } => {
            let path = save_card(job_id, card, settings, writer, sink).await?;
            Ok(ExportOutcome::CardSaved(path))
        }
        ExportJob::ShareCard { card, .. } => {
            let path = save_card(job_id, card, settings, writer, sink).await?;
            let Some(command) = settings.share_command.as_deref() else {
                return Ok(ExportOutcome::ShareFallback {
                    path,
                    text: settings.share_text.clone(),
                });
            };
            sink.emit(progress(job_id, Stage::Sharing));
            match share_file(command, &path).await {
                Ok(()) => Ok(ExportOutcome::CardShared(path)),
                Err(err) => {
                    critic_logging::critic_warn!("job {job_id}: share failed: {err}");
                    Ok(ExportOutcome::ShareFallback {
                        path,
                        text: settings.share_text.clone(),
                    })
                }
            }
        }
    }
}

async fn save_card(
    job_id: JobId,
    card: CardContent,
    settings: &ExportSettings,
    writer: AtomicFileWriter,
    sink: &dyn ProgressSink,
) -> Result<PathBuf, ExportError> {
    sink.emit(progress(job_id, Stage::Composing));
    let assets = settings.assets.clone();
    let date = (settings.today)();
    let filename = export_filename(
        CARD_PREFIX,
        card.title.as_deref(),
        CARD_FALLBACK,
        (settings.now_millis)(),
        "png",
    );
    let png = tokio::task::spawn_blocking(move || compose_analysis_card(&card, &assets, &date))
        .await
        .map_err(|err| ExportError::Task(err.to_string()))??;

    sink.emit(progress(job_id, Stage::Writing));
    write_blocking(writer, filename, png).await
}

async fn write_blocking(
    writer: AtomicFileWriter,
    filename: String,
    bytes: Vec<u8>,
) -> Result<PathBuf, ExportError> {
    let path = tokio::task::spawn_blocking(move || writer.write(&filename, &bytes))
        .await
        .map_err(|err| ExportError::Task(err.to_string()))??;
    Ok(path)
}

fn progress(job_id: JobId, stage: Stage) -> EngineEvent {
    EngineEvent::Progress(JobProgress { job_id, stage })
}
