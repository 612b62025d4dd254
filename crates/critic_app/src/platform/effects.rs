use critic_core::{
    AnalysisCard, AnalysisResult, AnalysisStage, Effect, ExportMode, ExportOutcome, ImageData, Msg,
    Notice,
};
use critic_engine::{
    AnalysisJob, CardContent, EngineEvent, EngineHandle, ExportJob, InlineImage, JobId,
    TranslationJob,
};
use critic_logging::{critic_info, critic_warn};

/// Bridges session effects to the engine and engine events back to messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

/// Where one effect goes.
#[derive(Debug)]
enum Routed {
    Recognize { job_id: JobId, image: Vec<u8> },
    Analyze(AnalysisJob),
    Translate(TranslationJob),
    Export(ExportJob),
    Notice(Notice),
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    /// Hands engine work off and returns the notices meant for the user.
    pub fn run(&self, effects: Vec<Effect>) -> Vec<Notice> {
        let mut notices = Vec::new();
        for effect in effects {
            match route(effect) {
                Routed::Recognize { job_id, image } => {
                    critic_info!("RecognizeLabel job_id={} bytes={}", job_id, image.len());
                    self.engine.recognize(job_id, image);
                }
                Routed::Analyze(job) => {
                    critic_info!("RequestAnalysis job_id={} prompt_len={}", job.job_id, job.prompt.len());
                    self.engine.analyze(job);
                }
                Routed::Translate(job) => {
                    critic_info!("RequestTranslation job_id={}", job.job_id);
                    self.engine.translate(job);
                }
                Routed::Export(job) => {
                    critic_info!("Export job_id={}", job.job_id());
                    self.engine.export(job);
                }
                Routed::Notice(notice) => notices.push(notice),
            }
        }
        notices
    }

    /// Drains finished engine work as session messages.
    pub fn poll(&self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            if let Some(msg) = map_event(event) {
                msgs.push(msg);
            }
        }
        msgs
    }
}

fn inline(image: ImageData) -> InlineImage {
    InlineImage {
        mime_type: image.mime_type,
        bytes: image.bytes,
    }
}

fn card_content(card: AnalysisCard) -> CardContent {
    CardContent {
        artwork: card.artwork.bytes,
        title: card.title,
        byline: card.byline,
        body: card.body,
    }
}

fn route(effect: Effect) -> Routed {
    match effect {
        Effect::RecognizeLabel { request, image } => Routed::Recognize {
            job_id: request,
            image: image.bytes,
        },
        Effect::RequestAnalysis {
            request,
            image,
            prompt,
            summary_instruction,
        } => Routed::Analyze(AnalysisJob {
            job_id: request,
            image: inline(image),
            prompt,
            summary_instruction,
        }),
        Effect::RequestTranslation {
            request,
            language,
            description_prompt,
            summary_prompt,
        } => {
            critic_info!("translating job_id={} into {}", request, language);
            Routed::Translate(TranslationJob {
                job_id: request,
                description_prompt,
                summary_prompt,
            })
        }
        Effect::SaveArtwork {
            request,
            image,
            title,
        } => Routed::Export(ExportJob::SavePhoto {
            job_id: request,
            image: inline(image),
            title,
        }),
        Effect::ExportAnalysis {
            request,
            mode: ExportMode::Save,
            card,
        } => Routed::Export(ExportJob::SaveCard {
            job_id: request,
            card: card_content(card),
        }),
        Effect::ExportAnalysis {
            request,
            mode: ExportMode::Share,
            card,
        } => Routed::Export(ExportJob::ShareCard {
            job_id: request,
            card: card_content(card),
        }),
        Effect::Notify(notice) => Routed::Notice(notice),
    }
}

fn map_event(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::Progress(progress) => {
            let stage = match progress.stage {
                critic_engine::Stage::Critique => AnalysisStage::Critique,
                critic_engine::Stage::Summary => AnalysisStage::Summary,
                _ => return None,
            };
            Some(Msg::AnalysisProgress {
                request: progress.job_id,
                stage,
            })
        }
        EngineEvent::LabelRecognized { job_id, result } => Some(Msg::OcrCompleted {
            request: job_id,
            result: result.map_err(|err| err.to_string()),
        }),
        EngineEvent::AnalysisCompleted { job_id, result } => Some(Msg::AnalysisCompleted {
            request: job_id,
            result: result
                .map(|output| AnalysisResult {
                    description: output.description,
                    summary: output.summary,
                })
                .map_err(|err| err.to_string()),
        }),
        EngineEvent::TranslationCompleted { job_id, output } => Some(Msg::TranslationCompleted {
            request: job_id,
            description: output.description.map_err(|err| err.to_string()),
            summary: output.summary.map(|part| part.map_err(|err| err.to_string())),
        }),
        EngineEvent::ExportCompleted { job_id, result } => {
            let result = match result {
                Ok(outcome) => Ok(export_outcome(outcome)),
                Err(err) => {
                    critic_warn!("export job_id={} failed: {}", job_id, err);
                    Err(err.to_string())
                }
            };
            Some(Msg::ExportFinished {
                request: job_id,
                result,
            })
        }
    }
}

fn export_outcome(outcome: critic_engine::ExportOutcome) -> ExportOutcome {
    match outcome {
        critic_engine::ExportOutcome::PhotoSaved(path) => ExportOutcome::PhotoSaved {
            path: path.display().to_string(),
        },
        critic_engine::ExportOutcome::CardSaved(path) => ExportOutcome::CardSaved {
            path: path.display().to_string(),
        },
        critic_engine::ExportOutcome::CardShared(_) => ExportOutcome::CardShared,
        critic_engine::ExportOutcome::ShareFallback { path, text } => {
            critic_info!("share unavailable, card kept at {}", path.display());
            ExportOutcome::ShareFallback { text }
        }
    }
}
