use std::fmt;
use std::path::PathBuf;

use reel_core::JobId;
pub use reel_core::MISSING_AUDIO_MESSAGE;
use serde::Deserialize;
use thiserror::Error;

/// Backend job lifecycle as reported by the status endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    /// Anything the client does not recognise; treated as still running.
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// One status observation. `result_url` is already absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobStatusReport {
    pub status: JobStatus,
    pub progress: Option<u8>,
    pub result_url: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutcome {
    pub job_id: JobId,
    pub video_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    AudioReady { path: PathBuf },
    AudioFailed(EngineError),
    JobSubmitted { job_id: JobId },
    Progress { job_id: JobId, progress: u8 },
    Countdown { remaining_secs: u64 },
    TimedOut,
    GenerationFinished(Result<JobOutcome, EngineError>),
}

pub const TIMED_OUT_MESSAGE: &str = "Video generation timed out. Please try again.";
pub const JOB_NOT_FOUND_MESSAGE: &str = "Job not found";
pub const JOB_FAILED_MESSAGE: &str = "Video generation failed";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EngineError {
    pub kind: FailureKind,
    pub message: String,
}

impl EngineError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn timed_out() -> Self {
        Self::new(FailureKind::TimedOut, TIMED_OUT_MESSAGE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    InvalidJobId,
    HttpStatus(u16),
    NotFound,
    RequestTimeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
    Decode,
    /// The backend reported the job as failed.
    JobFailed,
    /// The client-side generation timeout fired.
    TimedOut,
    MissingAudio,
    Io,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::InvalidJobId => write!(f, "invalid job id"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::NotFound => write!(f, "not found"),
            FailureKind::RequestTimeout => write!(f, "request timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::JobFailed => write!(f, "job failed"),
            FailureKind::TimedOut => write!(f, "generation timed out"),
            FailureKind::MissingAudio => write!(f, "missing audio"),
            FailureKind::Io => write!(f, "io error"),
        }
    }
}
