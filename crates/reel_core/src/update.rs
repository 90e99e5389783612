use crate::{
    extract_bullets, AppState, Effect, GenerationMode, GenerationRequest, Msg, TimeBudget,
};

pub const MISSING_AUDIO_MESSAGE: &str = "Please generate audio first";
pub const EMPTY_SCRIPT_MESSAGE: &str = "Script is empty";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ScriptChanged(script) => {
            state.set_script(script);
            Vec::new()
        }
        Msg::SettingsChanged(settings) => {
            state.set_settings(settings);
            Vec::new()
        }
        Msg::ExtractBulletsClicked => {
            let bullets = extract_bullets(state.script());
            state.set_bullets(bullets);
            Vec::new()
        }
        Msg::GenerateAudioClicked => {
            if state.is_generating_audio() {
                return (state, Vec::new());
            }
            if state.script().trim().is_empty() {
                state.set_error(EMPTY_SCRIPT_MESSAGE);
                return (state, Vec::new());
            }
            state.begin_audio();
            vec![Effect::SynthesizeAudio {
                text: state.script().to_string(),
                voice: state.settings().voice.clone(),
            }]
        }
        Msg::AudioReady { path } => {
            state.finish_audio(Some(path));
            Vec::new()
        }
        Msg::AudioFailed { message } => {
            state.finish_audio(None);
            state.set_error(message);
            Vec::new()
        }
        Msg::GenerateVideoClicked => {
            if state.is_generating() {
                return (state, Vec::new());
            }
            let Some(audio_path) = state.audio_path().map(ToOwned::to_owned) else {
                state.set_error(MISSING_AUDIO_MESSAGE);
                return (state, Vec::new());
            };
            start_generation(&mut state, GenerationMode::Full { audio_path }, TimeBudget::FULL)
        }
        Msg::GenerateQuickVideoClicked => {
            if state.is_generating() {
                return (state, Vec::new());
            }
            start_generation(&mut state, GenerationMode::Quick, TimeBudget::QUICK)
        }
        Msg::JobSubmitted { job_id } => {
            state.set_job(job_id);
            Vec::new()
        }
        Msg::JobProgress { progress } => {
            state.set_progress(progress);
            Vec::new()
        }
        Msg::CountdownTick { remaining_secs } => {
            state.set_remaining(remaining_secs);
            Vec::new()
        }
        Msg::TimedOut => {
            state.mark_timed_out();
            Vec::new()
        }
        Msg::GenerationFinished(result) => {
            state.finish_generation(result);
            Vec::new()
        }
        Msg::ResetClicked => {
            state.reset();
            vec![Effect::ClearTimers]
        }
    };

    (state, effects)
}

fn start_generation(state: &mut AppState, mode: GenerationMode, budget: TimeBudget) -> Vec<Effect> {
    state.begin_generation(budget);
    vec![Effect::StartGeneration(GenerationRequest {
        mode,
        script: state.script().to_string(),
        bullets: state.bullets().to_vec(),
        settings: state.settings().clone(),
        budget,
    })]
}
