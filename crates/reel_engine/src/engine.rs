use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use reel_core::GenerationRequest;
use reel_logging::{reel_debug, reel_error};

use crate::{
    ChannelProgressSink, EngineEvent, Generator, GeneratorConfig, ProgressSink, TokioClock,
    VideoApi,
};

enum EngineCommand {
    SynthesizeAudio { text: String, voice: String },
    Generate(GenerationRequest),
    ClearTimers,
}

/// Runs a [`Generator`] on a background runtime and reports [`EngineEvent`]s.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(api: Arc<dyn VideoApi>, config: GeneratorConfig) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    reel_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            let sink: Arc<dyn ProgressSink> = Arc::new(ChannelProgressSink::new(event_tx));
            let generator = Arc::new(
                Generator::new(api, Arc::new(TokioClock::new()), config)
                    .with_timer_sink(sink.clone()),
            );

            while let Ok(command) = cmd_rx.recv() {
                let generator = generator.clone();
                let sink = sink.clone();
                runtime.spawn(async move {
                    handle_command(&generator, command, sink.as_ref()).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn synthesize_audio(&self, text: impl Into<String>, voice: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::SynthesizeAudio {
            text: text.into(),
            voice: voice.into(),
        });
    }

    pub fn generate(&self, request: GenerationRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Generate(request));
    }

    pub fn clear_timers(&self) {
        let _ = self.cmd_tx.send(EngineCommand::ClearTimers);
    }

    /// Waits up to `timeout` for the next event. `Disconnected` means the
    /// engine thread has stopped.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, mpsc::RecvTimeoutError> {
        self.event_rx.recv_timeout(timeout)
    }
}

async fn handle_command(generator: &Generator, command: EngineCommand, sink: &dyn ProgressSink) {
    match command {
        EngineCommand::SynthesizeAudio { text, voice } => {
            let event = match generator.synthesize_audio(&text, &voice).await {
                Ok(path) => EngineEvent::AudioReady { path },
                Err(err) => {
                    reel_error!("Audio generation failed: {}", err);
                    EngineEvent::AudioFailed(err)
                }
            };
            sink.emit(event);
        }
        EngineCommand::Generate(request) => {
            let result = generator.generate(&request, sink).await;
            sink.emit(EngineEvent::GenerationFinished(result));
        }
        EngineCommand::ClearTimers => {
            let cleared = generator.clear_timers();
            reel_debug!("ClearTimers cleared={}", cleared);
        }
    }
}
