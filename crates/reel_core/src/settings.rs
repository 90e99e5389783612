use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::TimeBudget;

/// Rendering options forwarded verbatim to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub format: String,
    pub background_color: String,
    pub voice: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fps: 30,
            format: "mp4".to_string(),
            background_color: "#667eea".to_string(),
            voice: "en-US-JennyNeural".to_string(),
        }
    }
}

/// Server-assigned job identifier. Opaque to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationMode {
    /// Upload previously synthesized audio with the script.
    Full { audio_path: PathBuf },
    /// Let the backend render from the script alone.
    Quick,
}

/// Everything the engine needs to submit and track one video job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub mode: GenerationMode,
    pub script: String,
    pub bullets: Vec<String>,
    pub settings: RenderSettings,
    pub budget: TimeBudget,
}
