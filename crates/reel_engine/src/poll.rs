use std::time::Duration;

use reel_core::JobId;
use reel_logging::{reel_debug, reel_info, reel_warn};

use crate::{
    Clock, EngineError, EngineEvent, FailureKind, JobOutcome, JobStatus, ProgressSink, TimerPair,
    VideoApi, JOB_FAILED_MESSAGE,
};

/// Progress shown while the backend has not reported any.
pub const DEFAULT_PROGRESS: u8 = 50;

#[derive(Debug, Clone)]
pub struct PollSettings {
    pub interval: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
        }
    }
}

/// Polls `job_id` until it completes, fails, or `timer` times out.
///
/// One request is in flight at a time and the next one is issued only after
/// the previous settles and the interval elapses. Nothing is retried: a 404,
/// a transport error, a backend failure and the client timeout all end the
/// loop. On completion the timer pair is cleared.
pub async fn poll_job(
    api: &dyn VideoApi,
    clock: &dyn Clock,
    timer: &TimerPair,
    job_id: &JobId,
    settings: &PollSettings,
    sink: &dyn ProgressSink,
) -> Result<JobOutcome, EngineError> {
    if job_id.is_empty() {
        return Err(EngineError::new(FailureKind::InvalidJobId, "job id is empty"));
    }

    let mut attempt: u32 = 0;
    loop {
        if timer.has_timed_out() {
            reel_warn!("Job {} abandoned after {} status checks", job_id, attempt);
            return Err(EngineError::timed_out());
        }

        attempt += 1;
        let report = api.job_status(job_id).await?;
        reel_debug!(
            "Job {} check {}: status={} progress={:?}",
            job_id,
            attempt,
            report.status,
            report.progress
        );

        // A response that arrives after the timeout is discarded.
        if timer.has_timed_out() {
            reel_warn!("Job {} answered after the timeout fired", job_id);
            return Err(EngineError::timed_out());
        }

        match report.status {
            JobStatus::Completed => {
                let video_url = report.result_url.ok_or_else(|| {
                    EngineError::new(FailureKind::Decode, "completed job has no result url")
                })?;
                timer.clear();
                sink.emit(EngineEvent::Progress {
                    job_id: job_id.clone(),
                    progress: 100,
                });
                reel_info!("Job {} completed: {}", job_id, video_url);
                return Ok(JobOutcome {
                    job_id: job_id.clone(),
                    video_url,
                });
            }
            JobStatus::Failed => {
                let message = report
                    .error
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or_else(|| JOB_FAILED_MESSAGE.to_string());
                return Err(EngineError::new(FailureKind::JobFailed, message));
            }
            JobStatus::Pending | JobStatus::Processing | JobStatus::Unknown => {
                let progress = report.progress.unwrap_or(DEFAULT_PROGRESS).min(100);
                sink.emit(EngineEvent::Progress {
                    job_id: job_id.clone(),
                    progress,
                });
            }
        }

        clock.sleep(settings.interval).await;
    }
}
