use crate::GenerationRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SynthesizeAudio { text: String, voice: String },
    StartGeneration(GenerationRequest),
    /// Cancel the countdown and timeout of the current generation, if any.
    ClearTimers,
}
