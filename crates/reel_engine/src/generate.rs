use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use reel_core::{GenerationMode, GenerationRequest};
use reel_logging::{reel_error, reel_info};

use crate::client::AUDIO_FILE_NAME;
use crate::{
    poll_job, Clock, EngineError, EngineEvent, FailureKind, JobOutcome, MediaWriter, PollSettings,
    ProgressSink, Submission, TimerPair, VideoApi, MISSING_AUDIO_MESSAGE,
};

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Where synthesized audio is saved.
    pub output_dir: PathBuf,
    pub poll: PollSettings,
}

impl GeneratorConfig {
    pub fn default_with_output(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            poll: PollSettings::default(),
        }
    }
}

/// Runs the audio and video flows against a [`VideoApi`].
pub struct Generator {
    api: Arc<dyn VideoApi>,
    clock: Arc<dyn Clock>,
    timer: TimerPair,
    writer: MediaWriter,
    poll: PollSettings,
}

impl Generator {
    pub fn new(api: Arc<dyn VideoApi>, clock: Arc<dyn Clock>, config: GeneratorConfig) -> Self {
        Self {
            timer: TimerPair::new(clock.clone()),
            api,
            clock,
            writer: MediaWriter::new(config.output_dir),
            poll: config.poll,
        }
    }

    /// Routes countdown ticks and timeouts to `sink`.
    pub fn with_timer_sink(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.timer = TimerPair::new(self.clock.clone()).with_sink(sink);
        self
    }

    pub fn timer(&self) -> &TimerPair {
        &self.timer
    }

    /// Requests speech for `text` and saves it as the current audio file.
    pub async fn synthesize_audio(&self, text: &str, voice: &str) -> Result<PathBuf, EngineError> {
        let audio = self.api.synthesize(text, voice).await?;
        let writer = self.writer.clone();
        let path = tokio::task::spawn_blocking(move || writer.write(AUDIO_FILE_NAME, &audio))
            .await
            .map_err(|err| EngineError::new(FailureKind::Io, err.to_string()))??;
        reel_info!("Saved audio to {}", path.display());
        Ok(path)
    }

    /// Submits `request` and polls it to a terminal state.
    ///
    /// The timer pair is armed with the request's budget and cleared again
    /// whatever the outcome.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        sink: &dyn ProgressSink,
    ) -> Result<JobOutcome, EngineError> {
        let audio = match &request.mode {
            GenerationMode::Full { audio_path } => Some(read_audio(audio_path).await?),
            GenerationMode::Quick => None,
        };

        self.timer.start(
            Duration::from_secs(request.budget.estimated_secs),
            Duration::from_secs(request.budget.timeout_secs),
        );
        let result = self.submit_and_poll(request, audio, sink).await;
        self.timer.clear();

        if let Err(err) = &result {
            reel_error!("Video generation failed ({}): {}", err.kind, err);
        }
        result
    }

    /// Cancels the countdown and timeout of the current request.
    pub fn clear_timers(&self) -> bool {
        self.timer.clear()
    }

    async fn submit_and_poll(
        &self,
        request: &GenerationRequest,
        audio: Option<Bytes>,
        sink: &dyn ProgressSink,
    ) -> Result<JobOutcome, EngineError> {
        let submission = Submission::from(request);
        let job_id = match audio {
            Some(audio) => self.api.submit_video(audio, submission).await?,
            None => self.api.submit_quick(submission).await?,
        };
        reel_info!("Submitted job {}", job_id);
        sink.emit(EngineEvent::JobSubmitted {
            job_id: job_id.clone(),
        });

        poll_job(
            self.api.as_ref(),
            self.clock.as_ref(),
            &self.timer,
            &job_id,
            &self.poll,
            sink,
        )
        .await
    }
}

async fn read_audio(path: &Path) -> Result<Bytes, EngineError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Bytes::from(bytes)),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            Err(EngineError::new(FailureKind::MissingAudio, MISSING_AUDIO_MESSAGE))
        }
        Err(err) => Err(EngineError::new(
            FailureKind::Io,
            format!("{}: {err}", path.display()),
        )),
    }
}
