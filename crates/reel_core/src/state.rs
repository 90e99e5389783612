use std::path::{Path, PathBuf};

use crate::countdown::{format_clock, TimeBudget};
use crate::view_model::AppViewModel;
use crate::{JobId, RenderSettings};

/// Client-side mirror of the engine's countdown and timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    pub estimated_secs: u64,
    pub remaining_secs: u64,
    pub timed_out: bool,
}

/// The generator store. Owned by the caller and threaded through `update`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    script: String,
    bullets: Vec<String>,
    audio_path: Option<PathBuf>,
    video_url: Option<String>,
    is_generating: bool,
    is_generating_audio: bool,
    progress: u8,
    current_job: Option<JobId>,
    countdown: Countdown,
    settings: RenderSettings,
    last_error: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: RenderSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            script_chars: self.script.chars().count(),
            bullets: self.bullets.clone(),
            audio_path: self.audio_path.clone(),
            video_url: self.video_url.clone(),
            is_generating: self.is_generating,
            is_generating_audio: self.is_generating_audio,
            progress: self.progress,
            current_job: self.current_job.clone(),
            time_display: format_clock(self.countdown.remaining_secs),
            timed_out: self.countdown.timed_out,
            last_error: self.last_error.clone(),
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn bullets(&self) -> &[String] {
        &self.bullets
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn audio_path(&self) -> Option<&Path> {
        self.audio_path.as_deref()
    }

    pub fn countdown(&self) -> Countdown {
        self.countdown
    }

    pub fn is_generating(&self) -> bool {
        self.is_generating
    }

    pub fn is_generating_audio(&self) -> bool {
        self.is_generating_audio
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_script(&mut self, script: String) {
        self.script = script;
        self.mark_dirty();
    }

    pub(crate) fn set_settings(&mut self, settings: RenderSettings) {
        self.settings = settings;
        self.mark_dirty();
    }

    pub(crate) fn set_bullets(&mut self, bullets: Vec<String>) {
        self.bullets = bullets;
        self.mark_dirty();
    }

    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
        self.mark_dirty();
    }

    pub(crate) fn begin_audio(&mut self) {
        self.is_generating_audio = true;
        self.last_error = None;
        self.mark_dirty();
    }

    pub(crate) fn finish_audio(&mut self, path: Option<PathBuf>) {
        self.is_generating_audio = false;
        if path.is_some() {
            self.audio_path = path;
        }
        self.mark_dirty();
    }

    pub(crate) fn begin_generation(&mut self, budget: TimeBudget) {
        self.is_generating = true;
        self.progress = 0;
        self.current_job = None;
        self.last_error = None;
        self.countdown = Countdown {
            estimated_secs: budget.estimated_secs,
            remaining_secs: budget.estimated_secs,
            timed_out: false,
        };
        self.mark_dirty();
    }

    pub(crate) fn set_job(&mut self, job_id: JobId) {
        self.current_job = Some(job_id);
        self.mark_dirty();
    }

    pub(crate) fn set_progress(&mut self, progress: u8) {
        self.progress = progress.min(100);
        self.mark_dirty();
    }

    pub(crate) fn set_remaining(&mut self, remaining_secs: u64) {
        self.countdown.remaining_secs = remaining_secs;
        self.mark_dirty();
    }

    pub(crate) fn mark_timed_out(&mut self) {
        self.countdown.timed_out = true;
        self.mark_dirty();
    }

    pub(crate) fn finish_generation(&mut self, result: Result<String, String>) {
        self.is_generating = false;
        match result {
            Ok(url) => {
                self.video_url = Some(url);
                self.progress = 100;
            }
            Err(message) => {
                self.last_error = Some(message);
            }
        }
        self.mark_dirty();
    }

    /// Drops per-request data. Script, bullets and settings survive.
    pub(crate) fn reset(&mut self) {
        self.audio_path = None;
        self.video_url = None;
        self.progress = 0;
        self.current_job = None;
        self.is_generating = false;
        self.is_generating_audio = false;
        self.countdown = Countdown::default();
        self.last_error = None;
        self.mark_dirty();
    }
}
