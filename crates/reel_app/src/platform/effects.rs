use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::Duration;

use anyhow::bail;
use reel_core::{Effect, GenerationMode, Msg};
use reel_engine::{EngineEvent, EngineHandle, GeneratorConfig, VideoApi};
use reel_logging::{reel_debug, reel_info, reel_warn};

/// Executes effects on the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(api: Arc<dyn VideoApi>, config: GeneratorConfig) -> Self {
        Self {
            engine: EngineHandle::new(api, config),
        }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SynthesizeAudio { text, voice } => {
                    reel_info!("SynthesizeAudio chars={} voice={}", text.chars().count(), voice);
                    self.engine.synthesize_audio(text, voice);
                }
                Effect::StartGeneration(request) => {
                    let mode = match request.mode {
                        GenerationMode::Full { .. } => "full",
                        GenerationMode::Quick => "quick",
                    };
                    reel_info!(
                        "StartGeneration mode={} bullets={} timeout={}s",
                        mode,
                        request.bullets.len(),
                        request.budget.timeout_secs
                    );
                    self.engine.generate(request);
                }
                Effect::ClearTimers => self.engine.clear_timers(),
            }
        }
    }

    /// Waits up to `timeout` for the next engine message. Errors once the
    /// engine has stopped.
    pub fn next_msg(&self, timeout: Duration) -> anyhow::Result<Option<Msg>> {
        match self.engine.recv_timeout(timeout) {
            Ok(event) => Ok(Some(map_event(event))),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => bail!("engine stopped unexpectedly"),
        }
    }
}

pub fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::AudioReady { path } => Msg::AudioReady { path },
        EngineEvent::AudioFailed(err) => Msg::AudioFailed {
            message: err.to_string(),
        },
        EngineEvent::JobSubmitted { job_id } => Msg::JobSubmitted { job_id },
        EngineEvent::Progress { job_id, progress } => {
            reel_debug!("Job {} progress {}%", job_id, progress);
            Msg::JobProgress { progress }
        }
        EngineEvent::Countdown { remaining_secs } => Msg::CountdownTick { remaining_secs },
        EngineEvent::TimedOut => Msg::TimedOut,
        EngineEvent::GenerationFinished(result) => Msg::GenerationFinished(match result {
            Ok(outcome) => Ok(outcome.video_url),
            Err(err) => {
                reel_warn!("Generation failed ({}): {}", err.kind, err);
                Err(err.to_string())
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use reel_core::JobId;
    use reel_engine::{EngineError, FailureKind, JobOutcome, TIMED_OUT_MESSAGE};

    use super::*;

    #[test]
    fn progress_and_countdown_events_map_to_messages() {
        assert_eq!(
            map_event(EngineEvent::Progress {
                job_id: JobId::new("j"),
                progress: 70
            }),
            Msg::JobProgress { progress: 70 }
        );
        assert_eq!(
            map_event(EngineEvent::Countdown { remaining_secs: 12 }),
            Msg::CountdownTick { remaining_secs: 12 }
        );
        assert_eq!(map_event(EngineEvent::TimedOut), Msg::TimedOut);
        assert_eq!(
            map_event(EngineEvent::AudioReady {
                path: PathBuf::from("out/audio.mp3")
            }),
            Msg::AudioReady {
                path: PathBuf::from("out/audio.mp3")
            }
        );
    }

    #[test]
    fn finished_generation_carries_url_or_message() {
        let done = map_event(EngineEvent::GenerationFinished(Ok(JobOutcome {
            job_id: JobId::new("j"),
            video_url: "http://localhost:5000/videos/j.mp4".to_string(),
        })));
        assert_eq!(
            done,
            Msg::GenerationFinished(Ok("http://localhost:5000/videos/j.mp4".to_string()))
        );

        let timed_out = map_event(EngineEvent::GenerationFinished(Err(EngineError::timed_out())));
        assert_eq!(
            timed_out,
            Msg::GenerationFinished(Err(TIMED_OUT_MESSAGE.to_string()))
        );

        let audio = map_event(EngineEvent::AudioFailed(EngineError::new(
            FailureKind::HttpStatus(500),
            "HTTP 500",
        )));
        assert_eq!(
            audio,
            Msg::AudioFailed {
                message: "HTTP 500".to_string()
            }
        );
    }
}
