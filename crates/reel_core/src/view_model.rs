use std::path::PathBuf;

use crate::JobId;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub script_chars: usize,
    pub bullets: Vec<String>,
    pub audio_path: Option<PathBuf>,
    pub video_url: Option<String>,
    pub is_generating: bool,
    pub is_generating_audio: bool,
    pub progress: u8,
    pub current_job: Option<JobId>,
    /// Remaining estimate as `m:ss`.
    pub time_display: String,
    pub timed_out: bool,
    pub last_error: Option<String>,
}
