use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User replaced the script text.
    ScriptChanged(String),
    /// User replaced the render settings.
    SettingsChanged(crate::RenderSettings),
    /// Derive bullets from the current script.
    ExtractBulletsClicked,
    /// Request text-to-speech for the current script.
    GenerateAudioClicked,
    /// Engine saved synthesized audio.
    AudioReady { path: PathBuf },
    /// Engine failed to synthesize audio.
    AudioFailed { message: String },
    /// Submit a full render using the synthesized audio.
    GenerateVideoClicked,
    /// Submit a quick render from the script alone.
    GenerateQuickVideoClicked,
    /// Backend accepted the job.
    JobSubmitted { job_id: crate::JobId },
    /// Backend reported intermediate progress.
    JobProgress { progress: u8 },
    /// Countdown recomputed the remaining estimate.
    CountdownTick { remaining_secs: u64 },
    /// The hard timeout fired.
    TimedOut,
    /// Generation reached a terminal state: video URL or error message.
    GenerationFinished(Result<String, String>),
    /// Drop audio, video and job state.
    ResetClicked,
}
