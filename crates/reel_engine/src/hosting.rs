//! Passthroughs to the video-hosting provider. The backend forwards these
//! verbatim, so responses are returned as untyped JSON.

use std::path::Path;

use reel_logging::reel_info;
use reqwest::multipart::{Form, Part};
use reqwest::{Response, Url};
use serde_json::Value;

use crate::client::{expect_success, map_reqwest_error};
use crate::{EngineError, FailureKind, ReqwestVideoApi};

const HOSTING_NOT_FOUND: &str = "Video not found";

impl ReqwestVideoApi {
    /// Uploads a rendered video file to the hosting provider.
    pub async fn vimeo_upload(&self, video: &Path) -> Result<Value, EngineError> {
        let bytes = tokio::fs::read(video)
            .await
            .map_err(|err| EngineError::new(FailureKind::Io, format!("{}: {err}", video.display())))?;
        let file_name = video
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "video.mp4".to_string());
        let size = bytes.len();
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(video_mime(video))
            .map_err(map_reqwest_error)?;

        let url = self.endpoint(&["api", "vimeo", "upload"])?;
        let response = self
            .client()
            .post(url)
            .multipart(Form::new().part("video", part))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        reel_info!("Uploaded {} bytes from {} to hosting", size, video.display());
        read_json(response).await
    }

    pub async fn vimeo_status(&self, video_id: &str) -> Result<Value, EngineError> {
        let url = self.endpoint(&["api", "vimeo", "status", video_id])?;
        self.send(self.client().get(url)).await
    }

    pub async fn vimeo_get(&self, video_id: &str) -> Result<Value, EngineError> {
        let url = self.video_url(video_id)?;
        self.send(self.client().get(url)).await
    }

    pub async fn vimeo_update(&self, video_id: &str, changes: &Value) -> Result<Value, EngineError> {
        let url = self.video_url(video_id)?;
        self.send(self.client().patch(url).json(changes)).await
    }

    pub async fn vimeo_delete(&self, video_id: &str) -> Result<Value, EngineError> {
        let url = self.video_url(video_id)?;
        self.send(self.client().delete(url)).await
    }

    fn video_url(&self, video_id: &str) -> Result<Url, EngineError> {
        self.endpoint(&["api", "vimeo", "videos", video_id])
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, EngineError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        read_json(response).await
    }
}

/// Empty bodies (e.g. 204 on delete) come back as `null`.
async fn read_json(response: Response) -> Result<Value, EngineError> {
    let response = expect_success(response, HOSTING_NOT_FOUND)?;
    let text = response.text().await.map_err(map_reqwest_error)?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|err| EngineError::new(FailureKind::Decode, err.to_string()))
}

fn video_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mov") => "video/quicktime",
        _ => "application/octet-stream",
    }
}
