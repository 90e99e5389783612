//! Scriptreel engine: backend client, job polling, timers and effect execution.
mod client;
mod clock;
mod engine;
mod generate;
mod hosting;
mod persist;
mod poll;
mod sink;
mod timer;
mod types;

pub use client::{ApiSettings, ReqwestVideoApi, Submission, VideoApi, AUDIO_FILE_NAME, TTS_FORMAT};
pub use clock::{Clock, TokioClock};
pub use engine::EngineHandle;
pub use generate::{Generator, GeneratorConfig};
pub use persist::{ensure_output_dir, MediaWriter, PersistError};
pub use poll::{poll_job, PollSettings, DEFAULT_PROGRESS};
pub use sink::{ChannelProgressSink, ProgressSink};
pub use timer::TimerPair;
pub use types::{
    EngineError, EngineEvent, FailureKind, JobOutcome, JobStatus, JobStatusReport,
    JOB_FAILED_MESSAGE, JOB_NOT_FOUND_MESSAGE, MISSING_AUDIO_MESSAGE, TIMED_OUT_MESSAGE,
};
