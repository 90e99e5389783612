use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use reel_core::{format_clock, remaining_secs};
use reel_logging::{reel_debug, reel_error};
use tokio_util::sync::CancellationToken;

use crate::{Clock, EngineEvent, ProgressSink};

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Default)]
struct TimerState {
    estimated_secs: u64,
    remaining_secs: u64,
    started_at: Duration,
    timed_out: bool,
    countdown: Option<CancellationToken>,
    timeout: Option<CancellationToken>,
}

impl TimerState {
    fn cancel_active(&mut self) -> bool {
        let mut cancelled = false;
        for token in [self.countdown.take(), self.timeout.take()].into_iter().flatten() {
            token.cancel();
            cancelled = true;
        }
        cancelled
    }
}

/// Countdown tick plus one-shot timeout for a single generation request.
///
/// Clones share the same state, so the poll loop and the owner of the
/// request observe one timeout flag. At most one pair is armed at a time.
#[derive(Clone)]
pub struct TimerPair {
    clock: Arc<dyn Clock>,
    state: Arc<Mutex<TimerState>>,
    sink: Option<Arc<dyn ProgressSink>>,
}

impl TimerPair {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            state: Arc::new(Mutex::new(TimerState::default())),
            sink: None,
        }
    }

    /// Routes countdown ticks and the timeout to `sink`.
    pub fn with_sink(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Arms the countdown and the timeout, cancelling any previous pair.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self, estimated: Duration, timeout: Duration) {
        let countdown = CancellationToken::new();
        let deadline = CancellationToken::new();
        {
            let mut state = lock(&self.state);
            state.cancel_active();
            state.estimated_secs = estimated.as_secs();
            state.remaining_secs = estimated.as_secs();
            state.started_at = self.clock.elapsed();
            state.timed_out = false;
            state.countdown = Some(countdown.clone());
            state.timeout = Some(deadline.clone());
        }
        reel_debug!("Timer armed: estimated {:?}, timeout {:?}", estimated, timeout);

        tokio::spawn(run_countdown(
            self.clock.clone(),
            self.state.clone(),
            countdown,
            self.sink.clone(),
        ));
        tokio::spawn(run_timeout(
            self.clock.clone(),
            self.state.clone(),
            deadline,
            timeout,
            self.sink.clone(),
        ));
    }

    /// Cancels whatever is armed. Returns whether anything was.
    pub fn clear(&self) -> bool {
        lock(&self.state).cancel_active()
    }

    pub fn is_active(&self) -> bool {
        let state = lock(&self.state);
        state.countdown.is_some() || state.timeout.is_some()
    }

    /// Stays true after the timeout fires until the next `start`.
    pub fn has_timed_out(&self) -> bool {
        lock(&self.state).timed_out
    }

    pub fn remaining_secs(&self) -> u64 {
        lock(&self.state).remaining_secs
    }

    pub fn display(&self) -> String {
        format_clock(self.remaining_secs())
    }
}

fn lock(state: &Mutex<TimerState>) -> MutexGuard<'_, TimerState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn run_countdown(
    clock: Arc<dyn Clock>,
    state: Arc<Mutex<TimerState>>,
    token: CancellationToken,
    sink: Option<Arc<dyn ProgressSink>>,
) {
    loop {
        tokio::select! {
            _ = token.cancelled() => return,
            _ = clock.sleep(TICK) => {}
        }

        // Cancellation happens under the lock, so checking here means no
        // tick lands after `clear`.
        let mut guard = lock(&state);
        if token.is_cancelled() {
            return;
        }
        let elapsed = clock.elapsed().saturating_sub(guard.started_at).as_secs();
        guard.remaining_secs = remaining_secs(guard.estimated_secs, elapsed);
        if let Some(sink) = &sink {
            sink.emit(EngineEvent::Countdown {
                remaining_secs: guard.remaining_secs,
            });
        }
    }
}

async fn run_timeout(
    clock: Arc<dyn Clock>,
    state: Arc<Mutex<TimerState>>,
    token: CancellationToken,
    after: Duration,
    sink: Option<Arc<dyn ProgressSink>>,
) {
    tokio::select! {
        _ = token.cancelled() => return,
        _ = clock.sleep(after) => {}
    }

    let mut guard = lock(&state);
    if token.is_cancelled() {
        return;
    }
    guard.timed_out = true;
    guard.timeout = None;
    if let Some(countdown) = guard.countdown.take() {
        countdown.cancel();
    }
    reel_error!("Video generation timed out after {:?}", after);
    if let Some(sink) = &sink {
        sink.emit(EngineEvent::TimedOut);
    }
}
