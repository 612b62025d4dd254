use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use chrono::{Local, Utc};
use critic_core::{prompt, update, AppState, Msg};
use critic_engine::{CardAssets, EngineConfig, EngineHandle, ExportSettings, FontFace};
use critic_logging::{critic_info, critic_warn};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::ui::{commands, render};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub fn run_app(config: AppConfig) -> anyhow::Result<()> {
    let destination = config.log_destination.parse().unwrap_or_else(|err| {
        eprintln!("Warning: {err}; logging to file");
        LogDestination::File
    });
    let level = critic_logging::parse_level(&config.log_level).unwrap_or(log::LevelFilter::Info);
    logging::initialize(destination, level, &config.log_file);
    critic_info!("artl starting, output_dir={:?}", config.output_dir);
    if config.api_key.is_none() {
        critic_warn!("no API key configured; analysis requests will fail");
    }

    let engine = EngineHandle::new(engine_config(&config))?;
    let mut app = App {
        state: AppState::with_language(config.language()),
        runner: EffectRunner::new(engine),
    };
    app.render();

    let input = spawn_input_reader();
    loop {
        match input.recv_timeout(POLL_INTERVAL) {
            Ok(line) => match commands::parse(&line) {
                Ok(Some(commands::Command::Quit)) => break,
                Ok(Some(commands::Command::Help)) => println!("{}", commands::HELP),
                Ok(Some(command)) => match command.into_msg() {
                    Ok(Some(msg)) => app.dispatch(msg),
                    Ok(None) => {}
                    Err(err) => println!("! {err}"),
                },
                Ok(None) => {}
                Err(err) => println!("! {err}"),
            },
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
        for msg in app.runner.poll() {
            app.dispatch(msg);
        }
    }

    critic_info!("artl exiting");
    Ok(())
}

struct App {
    state: AppState,
    runner: EffectRunner,
}

impl App {
    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let notices = self.runner.run(effects);
        let was_dirty = state.consume_dirty();
        let language = state.language();
        self.state = state;

        if was_dirty {
            self.render();
        }
        for notice in notices {
            println!("* {}", notice.message(language));
        }
    }

    fn render(&self) {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for line in render::render(&self.state.view()) {
            let _ = writeln!(out, "{line}");
        }
        let _ = write!(out, "artl> ");
        let _ = out.flush();
    }
}

fn spawn_input_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn engine_config(config: &AppConfig) -> EngineConfig {
    let font = config.font_path.as_deref().and_then(|path| match FontFace::load(path) {
        Ok(font) => Some(Arc::new(font)),
        Err(err) => {
            critic_warn!("font {:?} not loaded: {err}", path);
            None
        }
    });
    let logo = config.logo_path.as_deref().and_then(|path| match std::fs::read(path) {
        Ok(bytes) => Some(Arc::new(bytes)),
        Err(err) => {
            critic_warn!("logo {:?} not loaded: {err}", path);
            None
        }
    });

    EngineConfig {
        gemini: config.gemini_settings(),
        ocr: config.ocr_settings(),
        export: ExportSettings {
            output_dir: config.output_dir.clone(),
            assets: CardAssets { font, logo },
            share_command: config.share_command.clone(),
            share_text: prompt::SHARE_TEXT.to_string(),
            today: Arc::new(|| Local::now().format("%Y-%m-%d").to_string()),
            now_millis: Arc::new(|| Utc::now().timestamp_millis()),
        },
    }
}
