#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use bytes::Bytes;
use reel_core::JobId;
use reel_engine::{
    EngineError, EngineEvent, JobStatus, JobStatusReport, ProgressSink, Submission, VideoApi,
};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(reel_logging::initialize_for_tests);
}

pub fn report(status: JobStatus, progress: Option<u8>) -> JobStatusReport {
    JobStatusReport {
        status,
        progress,
        result_url: None,
        error: None,
    }
}

pub fn completed(url: &str) -> JobStatusReport {
    JobStatusReport {
        status: JobStatus::Completed,
        progress: Some(100),
        result_url: Some(url.to_string()),
        error: None,
    }
}

pub fn failed(error: Option<&str>) -> JobStatusReport {
    JobStatusReport {
        status: JobStatus::Failed,
        progress: None,
        result_url: None,
        error: error.map(ToOwned::to_owned),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    Video { audio_len: usize, script: String },
    Quick { script: String, bullets: Vec<String> },
}

/// Backend double that replays scripted status responses.
///
/// Once the script runs out it keeps answering `processing`.
pub struct ScriptedApi {
    job_id: JobId,
    statuses: Mutex<VecDeque<Result<JobStatusReport, EngineError>>>,
    status_delay: Duration,
    status_calls: Mutex<Vec<tokio::time::Instant>>,
    submitted: Mutex<Vec<Submitted>>,
}

impl ScriptedApi {
    pub fn new(statuses: Vec<Result<JobStatusReport, EngineError>>) -> Self {
        Self {
            job_id: JobId::new("job-1"),
            statuses: Mutex::new(statuses.into()),
            status_delay: Duration::ZERO,
            status_calls: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
        }
    }

    /// Every status request takes `delay` before answering.
    pub fn with_status_delay(mut self, delay: Duration) -> Self {
        self.status_delay = delay;
        self
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.lock().unwrap().len()
    }

    pub fn status_call_times(&self) -> Vec<tokio::time::Instant> {
        self.status_calls.lock().unwrap().clone()
    }

    pub fn submitted(&self) -> Vec<Submitted> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl VideoApi for ScriptedApi {
    async fn synthesize(&self, text: &str, _voice: &str) -> Result<Bytes, EngineError> {
        Ok(Bytes::from(format!("mp3:{text}")))
    }

    async fn submit_video(
        &self,
        audio: Bytes,
        submission: Submission<'_>,
    ) -> Result<JobId, EngineError> {
        self.submitted.lock().unwrap().push(Submitted::Video {
            audio_len: audio.len(),
            script: submission.script.to_string(),
        });
        Ok(self.job_id.clone())
    }

    async fn submit_quick(&self, submission: Submission<'_>) -> Result<JobId, EngineError> {
        self.submitted.lock().unwrap().push(Submitted::Quick {
            script: submission.script.to_string(),
            bullets: submission.bullets.to_vec(),
        });
        Ok(self.job_id.clone())
    }

    async fn job_status(&self, _job_id: &JobId) -> Result<JobStatusReport, EngineError> {
        self.status_calls
            .lock()
            .unwrap()
            .push(tokio::time::Instant::now());
        if !self.status_delay.is_zero() {
            tokio::time::sleep(self.status_delay).await;
        }
        let next = self.statuses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(report(JobStatus::Processing, None)))
    }
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<EngineEvent>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn progress(&self) -> Vec<u8> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                EngineEvent::Progress { progress, .. } => Some(progress),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&EngineEvent) -> bool) -> usize {
        self.events().iter().filter(|event| predicate(event)).count()
    }
}

impl ProgressSink for RecordingSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}
