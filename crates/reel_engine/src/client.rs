use std::time::Duration;

use bytes::Bytes;
use futures_util::StreamExt;
use reel_core::{GenerationRequest, JobId, RenderSettings};
use reel_logging::reel_debug;
use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::{EngineError, FailureKind, JobStatus, JobStatusReport, JOB_NOT_FOUND_MESSAGE};

/// Audio encoding requested from the text-to-speech endpoint.
pub const TTS_FORMAT: &str = "audio-24khz-48kbitrate-mono-mp3";
pub const AUDIO_FILE_NAME: &str = "audio.mp3";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_audio_bytes: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_audio_bytes: 50 * 1024 * 1024,
        }
    }
}

/// Script, bullets and settings as sent with a render request.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Submission<'a> {
    pub script: &'a str,
    pub bullets: &'a [String],
    pub settings: &'a RenderSettings,
}

impl<'a> From<&'a GenerationRequest> for Submission<'a> {
    fn from(request: &'a GenerationRequest) -> Self {
        Self {
            script: &request.script,
            bullets: &request.bullets,
            settings: &request.settings,
        }
    }
}

/// The backend operations the generator depends on.
#[async_trait::async_trait]
pub trait VideoApi: Send + Sync {
    /// Text-to-speech; returns encoded audio.
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Bytes, EngineError>;

    /// Multipart upload of audio plus script metadata.
    async fn submit_video(
        &self,
        audio: Bytes,
        submission: Submission<'_>,
    ) -> Result<JobId, EngineError>;

    /// Script-only render.
    async fn submit_quick(&self, submission: Submission<'_>) -> Result<JobId, EngineError>;

    async fn job_status(&self, job_id: &JobId) -> Result<JobStatusReport, EngineError>;
}

#[derive(Serialize)]
struct TtsRequest<'a> {
    text: &'a str,
    voice: &'a str,
    format: &'a str,
}

#[derive(Deserialize)]
struct SubmitResponse {
    #[serde(rename = "jobId")]
    job_id: JobId,
}

#[derive(Deserialize)]
struct StatusResponse {
    status: JobStatus,
    #[serde(default)]
    progress: Option<f64>,
    #[serde(default)]
    result: Option<ResultRef>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct ResultRef {
    url: String,
}

/// HTTP implementation of [`VideoApi`] plus the hosting passthroughs.
#[derive(Debug, Clone)]
pub struct ReqwestVideoApi {
    base: Url,
    client: reqwest::Client,
    settings: ApiSettings,
}

impl ReqwestVideoApi {
    pub fn new(settings: ApiSettings) -> Result<Self, EngineError> {
        let base = Url::parse(&settings.base_url)
            .map_err(|err| EngineError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(EngineError::new(
                FailureKind::InvalidUrl,
                format!("{base} cannot be used as an api base"),
            ));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| EngineError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            base,
            client,
            settings,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub(crate) fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Appends percent-encoded path segments to the base URL.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, EngineError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| EngineError::new(FailureKind::InvalidUrl, "base url cannot take a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Relative references, with or without a leading slash, land under the
    /// base path. Absolute URLs pass through unchanged.
    fn resolve_media_url(&self, raw: &str) -> Result<String, EngineError> {
        let joined = if raw.starts_with("//") {
            self.base.join(raw)
        } else {
            let mut root = self.base.clone();
            let prefix = format!("{}/", root.path().trim_end_matches('/'));
            root.set_path(&prefix);
            root.join(raw.trim_start_matches('/'))
        };
        joined
            .map(String::from)
            .map_err(|err| EngineError::new(FailureKind::Decode, format!("bad result url {raw}: {err}")))
    }

    async fn read_capped(&self, response: Response) -> Result<Bytes, EngineError> {
        let max_bytes = self.settings.max_audio_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(Bytes::from(bytes))
    }
}

#[async_trait::async_trait]
impl VideoApi for ReqwestVideoApi {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Bytes, EngineError> {
        let url = self.endpoint(&["api", "tts"])?;
        let body = TtsRequest {
            text,
            voice,
            format: TTS_FORMAT,
        };
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = expect_success(response, "text-to-speech endpoint not found")?;
        let audio = self.read_capped(response).await?;
        reel_debug!("Synthesized {} bytes of audio with voice {}", audio.len(), voice);
        Ok(audio)
    }

    async fn submit_video(
        &self,
        audio: Bytes,
        submission: Submission<'_>,
    ) -> Result<JobId, EngineError> {
        let url = self.endpoint(&["api", "video", "generate"])?;
        let audio_part = Part::bytes(audio.to_vec())
            .file_name(AUDIO_FILE_NAME)
            .mime_str("audio/mpeg")
            .map_err(map_reqwest_error)?;
        let form = Form::new()
            .part("audio", audio_part)
            .text("script", submission.script.to_string())
            .text("bullets", to_json(submission.bullets)?)
            .text("settings", to_json(submission.settings)?);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_job_id(expect_success(response, "video endpoint not found")?).await
    }

    async fn submit_quick(&self, submission: Submission<'_>) -> Result<JobId, EngineError> {
        let url = self.endpoint(&["api", "video", "quick"])?;
        let response = self
            .client
            .post(url)
            .json(&submission)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_job_id(expect_success(response, "quick video endpoint not found")?).await
    }

    async fn job_status(&self, job_id: &JobId) -> Result<JobStatusReport, EngineError> {
        let url = self.endpoint(&["api", "jobs", job_id.as_str(), "status"])?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let body: StatusResponse = expect_success(response, JOB_NOT_FOUND_MESSAGE)?
            .json()
            .await
            .map_err(map_reqwest_error)?;

        let result_url = body
            .result
            .map(|result| self.resolve_media_url(&result.url))
            .transpose()?;
        Ok(JobStatusReport {
            status: body.status,
            progress: body.progress.map(|p| p.round().clamp(0.0, 100.0) as u8),
            result_url,
            error: body.error,
        })
    }
}

async fn read_job_id(response: Response) -> Result<JobId, EngineError> {
    let body: SubmitResponse = response.json().await.map_err(map_reqwest_error)?;
    if body.job_id.is_empty() {
        return Err(EngineError::new(
            FailureKind::InvalidJobId,
            "backend returned an empty job id",
        ));
    }
    Ok(body.job_id)
}

pub(crate) fn expect_success(response: Response, not_found: &str) -> Result<Response, EngineError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(EngineError::new(FailureKind::NotFound, not_found));
    }
    if !status.is_success() {
        return Err(EngineError::new(
            FailureKind::HttpStatus(status.as_u16()),
            status.to_string(),
        ));
    }
    Ok(response)
}

pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, EngineError> {
    serde_json::to_string(value).map_err(|err| EngineError::new(FailureKind::Decode, err.to_string()))
}

fn too_large(max_bytes: u64, actual: u64) -> EngineError {
    EngineError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> EngineError {
    if err.is_timeout() {
        return EngineError::new(FailureKind::RequestTimeout, err.to_string());
    }
    if err.is_decode() {
        return EngineError::new(FailureKind::Decode, err.to_string());
    }
    EngineError::new(FailureKind::Network, err.to_string())
}
