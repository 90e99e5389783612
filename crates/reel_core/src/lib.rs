//! Scriptreel core: pure generator state machine, bullet extraction and view-model helpers.
mod bullets;
mod countdown;
mod effect;
mod msg;
mod settings;
mod state;
mod update;
mod view_model;

pub use bullets::{extract_bullets, BULLET_KEYWORDS, DEFAULT_BULLETS, MAX_BULLETS};
pub use countdown::{format_clock, remaining_secs, TimeBudget};
pub use effect::Effect;
pub use msg::Msg;
pub use settings::{GenerationMode, GenerationRequest, JobId, RenderSettings};
pub use state::{AppState, Countdown};
pub use update::{update, EMPTY_SCRIPT_MESSAGE, MISSING_AUDIO_MESSAGE};
pub use view_model::AppViewModel;
