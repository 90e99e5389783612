use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use reel_core::{extract_bullets, update, AppState, AppViewModel, JobId, Msg};
use reel_engine::{ReqwestVideoApi, VideoApi};
use reel_logging::reel_info;
use serde_json::Value;

use super::config::{self, AppConfig, API_URL_ENV};
use super::effects::EffectRunner;
use super::{logging, render};
use crate::cli::{Cli, Command, VimeoAction};

const EVENT_WAIT: Duration = Duration::from_millis(250);

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    logging::initialize(cli.log, logging::level_for(cli.verbose));

    let config_path = config::config_path(cli.config.as_deref());
    if let Command::Init { force } = cli.command {
        return config::save_config(&config_path, &AppConfig::default(), force);
    }

    let mut config = config::load_config(&config_path)
        .with_api_url(std::env::var(API_URL_ENV).ok())
        .with_api_url(cli.api_url);
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }

    match cli.command {
        Command::Init { .. } => Ok(()),
        Command::Bullets { script } => {
            let script = read_script(script.as_deref())?;
            for bullet in extract_bullets(&script) {
                println!("- {bullet}");
            }
            Ok(())
        }
        Command::Audio { script } => run_audio(&config, &script),
        Command::Generate {
            script,
            quick,
            audio,
        } => run_generate(&config, &script, quick, audio),
        Command::Status { job_id } => run_status(&config, job_id),
        Command::Vimeo { action } => run_vimeo(&config, action),
    }
}

fn run_audio(config: &AppConfig, script: &Path) -> anyhow::Result<()> {
    let mut session = Session::start(config)?;
    session.dispatch(Msg::ScriptChanged(read_script(Some(script))?));
    session.dispatch(Msg::GenerateAudioClicked);

    let view = session.run_until(|view| !view.is_generating_audio)?;
    match view.audio_path {
        Some(path) => {
            println!("{}", path.display());
            Ok(())
        }
        None => bail!(failure(view, "narration was not produced")),
    }
}

fn run_generate(
    config: &AppConfig,
    script: &Path,
    quick: bool,
    audio: Option<std::path::PathBuf>,
) -> anyhow::Result<()> {
    let mut session = Session::start(config)?;
    session.dispatch(Msg::ScriptChanged(read_script(Some(script))?));
    session.dispatch(Msg::ExtractBulletsClicked);
    for bullet in session.state.bullets() {
        eprintln!("- {bullet}");
    }

    if quick {
        session.dispatch(Msg::GenerateQuickVideoClicked);
    } else {
        match audio {
            Some(path) => session.dispatch(Msg::AudioReady { path }),
            None => {
                session.dispatch(Msg::GenerateAudioClicked);
                let view = session.run_until(|view| !view.is_generating_audio)?;
                if view.audio_path.is_none() {
                    bail!(failure(view, "narration was not produced"));
                }
            }
        }
        session.dispatch(Msg::GenerateVideoClicked);
    }

    let view = session.run_until(|view| !view.is_generating)?;
    match view.video_url {
        Some(url) => {
            println!("{url}");
            Ok(())
        }
        None => bail!(failure(view, "generation did not produce a video")),
    }
}

fn run_status(config: &AppConfig, job_id: String) -> anyhow::Result<()> {
    if job_id.trim().is_empty() {
        bail!("job id must not be empty");
    }
    let api = ReqwestVideoApi::new(config.api_settings())?;
    let runtime = tokio::runtime::Runtime::new().context("Failed to start runtime")?;
    let report = runtime.block_on(api.job_status(&JobId::new(job_id)))?;

    println!("status: {}", report.status);
    if let Some(progress) = report.progress {
        println!("progress: {progress}%");
    }
    if let Some(url) = report.result_url {
        println!("video: {url}");
    }
    if let Some(error) = report.error {
        println!("error: {error}");
    }
    Ok(())
}

fn run_vimeo(config: &AppConfig, action: VimeoAction) -> anyhow::Result<()> {
    let api = ReqwestVideoApi::new(config.api_settings())?;
    let runtime = tokio::runtime::Runtime::new().context("Failed to start runtime")?;

    let value = match action {
        VimeoAction::Upload { file } => runtime.block_on(api.vimeo_upload(&file))?,
        VimeoAction::Status { id } => runtime.block_on(api.vimeo_status(&id))?,
        VimeoAction::Get { id } => runtime.block_on(api.vimeo_get(&id))?,
        VimeoAction::Update { id, json } => {
            let changes: Value =
                serde_json::from_str(&json).context("--json must be a JSON document")?;
            runtime.block_on(api.vimeo_update(&id, &changes))?
        }
        VimeoAction::Delete { id } => {
            let value = runtime.block_on(api.vimeo_delete(&id))?;
            reel_info!("Deleted hosted video {}", id);
            value
        }
    };

    if !value.is_null() {
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}

fn read_script(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read script from stdin")?;
            Ok(text)
        }
    }
}

fn failure(view: AppViewModel, fallback: &str) -> String {
    view.last_error.unwrap_or_else(|| fallback.to_string())
}

/// Drives the store: messages go through `update`, effects go to the engine,
/// and engine events come back as messages.
struct Session {
    state: AppState,
    runner: EffectRunner,
    last_line: Option<String>,
}

impl Session {
    fn start(config: &AppConfig) -> anyhow::Result<Self> {
        let api = ReqwestVideoApi::new(config.api_settings())?;
        reel_info!("Using backend {}", api.base_url());
        Ok(Self {
            state: AppState::with_settings(config.settings.clone()),
            runner: EffectRunner::new(Arc::new(api), config.generator_config()),
            last_line: None,
        })
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.enqueue(effects);
        if was_dirty {
            self.render();
        }
    }

    fn render(&mut self) {
        let line = render::status_line(&self.state.view());
        if line != self.last_line {
            if let Some(text) = &line {
                eprintln!("{text}");
            }
            self.last_line = line;
        }
    }

    /// Pumps engine events until `done` holds for the current view.
    fn run_until(&mut self, done: impl Fn(&AppViewModel) -> bool) -> anyhow::Result<AppViewModel> {
        loop {
            let view = self.state.view();
            if done(&view) {
                return Ok(view);
            }
            if let Some(msg) = self.runner.next_msg(EVENT_WAIT)? {
                self.dispatch(msg);
            }
        }
    }
}
