use std::sync::mpsc;

use crate::generate::Generator;
use crate::{
    AnalysisOutput, EngineEvent, GenerateError, InlineImage, JobId, JobProgress, Stage,
    TranslationOutput,
};

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisJob {
    pub job_id: JobId,
    pub image: InlineImage,
    pub prompt: String,
    /// Prefix for the summary request; the critique text is appended to it.
    pub summary_instruction: String,
}

#[derive(Debug, Clone)]
pub struct TranslationJob {
    pub job_id: JobId,
    pub description_prompt: String,
    pub summary_prompt: Option<String>,
}

fn progress(sink: &dyn ProgressSink, job_id: JobId, stage: Stage) {
    sink.emit(EngineEvent::Progress(JobProgress { job_id, stage }));
}

/// Critique the artwork, then condense the critique.
///
/// Only the critique stage is fatal. A failed summary is logged and the
/// output carries `summary: None`.
pub async fn run_analysis(
    generator: &dyn Generator,
    job: &AnalysisJob,
    sink: &dyn ProgressSink,
) -> Result<AnalysisOutput, GenerateError> {
    progress(sink, job.job_id, Stage::Critique);
    let description = generator.generate(&job.prompt, Some(&job.image)).await?;
    critic_logging::critic_info!(
        "job {}: critique received ({} chars)",
        job.job_id,
        description.chars().count()
    );

    progress(sink, job.job_id, Stage::Summary);
    let summary_prompt = format!("{}{}", job.summary_instruction, description);
    let summary = match generator.generate(&summary_prompt, None).await {
        Ok(summary) => Some(summary),
        Err(err) => {
            critic_logging::critic_warn!("job {}: summary failed: {err}", job.job_id);
            None
        }
    };

    Ok(AnalysisOutput {
        description,
        summary,
    })
}

pub async fn run_translation(
    generator: &dyn Generator,
    job: &TranslationJob,
    sink: &dyn ProgressSink,
) -> TranslationOutput {
    progress(sink, job.job_id, Stage::TranslatingDescription);
    let description = generator.generate(&job.description_prompt, None).await;
    if let Err(err) = &description {
        critic_logging::critic_warn!("job {}: description translation failed: {err}", job.job_id);
    }

    let summary = match &job.summary_prompt {
        Some(prompt) => {
            progress(sink, job.job_id, Stage::TranslatingSummary);
            let result = generator.generate(prompt, None).await;
            if let Err(err) = &result {
                critic_logging::critic_warn!("job {}: summary translation failed: {err}", job.job_id);
            }
            Some(result)
        }
        None => None,
    };

    TranslationOutput {
        description,
        summary,
    }
}
