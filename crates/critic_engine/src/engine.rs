use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use thiserror::Error;

use crate::export::{run_export, ExportJob, ExportSettings};
use crate::generate::{GeminiGenerator, GeminiSettings, Generator};
use crate::ocr::{OcrSettings, Recognizer, TesseractRecognizer};
use crate::pipeline::{run_analysis, run_translation, AnalysisJob, ChannelProgressSink, TranslationJob};
use crate::{EngineEvent, GenerateError, JobId, JobProgress, Stage};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("could not start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("could not build generator: {0}")]
    Generator(#[from] GenerateError),
    #[error("could not spawn engine thread: {0}")]
    Thread(#[source] std::io::Error),
}

pub struct EngineConfig {
    pub gemini: GeminiSettings,
    pub ocr: OcrSettings,
    pub export: ExportSettings,
}

enum EngineCommand {
    Recognize { job_id: JobId, image: Vec<u8> },
    Analyze(AnalysisJob),
    Translate(TranslationJob),
    Export(ExportJob),
}

#[derive(Clone)]
struct Services {
    generator: Arc<dyn Generator>,
    recognizer: Arc<dyn Recognizer>,
    export: ExportSettings,
}

/// Runs jobs on a background tokio runtime and reports back over a channel.
///
/// Dropping the handle closes the command channel, which stops the worker
/// thread once in-flight commands have been handed to the runtime.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let generator = Arc::new(GeminiGenerator::new(config.gemini)?);
        let recognizer = Arc::new(TesseractRecognizer::new(config.ocr));
        Self::with_services(generator, recognizer, config.export)
    }

    pub fn with_services(
        generator: Arc<dyn Generator>,
        recognizer: Arc<dyn Recognizer>,
        export: ExportSettings,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("critic-engine")
            .build()
            .map_err(EngineError::Runtime)?;
        let services = Services {
            generator,
            recognizer,
            export,
        };

        thread::Builder::new()
            .name("critic-engine-dispatch".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let services = services.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(&services, command, event_tx).await;
                    });
                }
                critic_logging::critic_debug!("engine: command channel closed");
            })
            .map_err(EngineError::Thread)?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn recognize(&self, job_id: JobId, image: Vec<u8>) {
        self.send(EngineCommand::Recognize { job_id, image });
    }

    pub fn analyze(&self, job: AnalysisJob) {
        self.send(EngineCommand::Analyze(job));
    }

    pub fn translate(&self, job: TranslationJob) {
        self.send(EngineCommand::Translate(job));
    }

    pub fn export(&self, job: ExportJob) {
        self.send(EngineCommand::Export(job));
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            critic_logging::critic_error!("engine: worker thread is gone, command dropped");
        }
    }
}

async fn handle_command(services: &Services, command: EngineCommand, event_tx: mpsc::Sender<EngineEvent>) {
    let sink = ChannelProgressSink::new(event_tx.clone());
    let event = match command {
        EngineCommand::Recognize { job_id, image } => {
            let _ = event_tx.send(EngineEvent::Progress(JobProgress {
                job_id,
                stage: Stage::Recognizing,
            }));
            let result = services.recognizer.recognize(&image).await;
            if let Err(err) = &result {
                critic_logging::critic_warn!("job {job_id}: ocr failed: {err}");
            }
            EngineEvent::LabelRecognized { job_id, result }
        }
        EngineCommand::Analyze(job) => {
            let result = run_analysis(services.generator.as_ref(), &job, &sink).await;
            if let Err(err) = &result {
                critic_logging::critic_error!("job {}: analysis failed: {err}", job.job_id);
            }
            EngineEvent::AnalysisCompleted {
                job_id: job.job_id,
                result,
            }
        }
        EngineCommand::Translate(job) => {
            let output = run_translation(services.generator.as_ref(), &job, &sink).await;
            EngineEvent::TranslationCompleted {
                job_id: job.job_id,
                output,
            }
        }
        EngineCommand::Export(job) => {
            let job_id = job.job_id();
            let result = run_export(job, &services.export, &sink).await;
            if let Err(err) = &result {
                critic_logging::critic_error!("job {job_id}: export failed: {err}");
            }
            EngineEvent::ExportCompleted { job_id, result }
        }
    };
    let _ = event_tx.send(event);
}
