mod common;

use std::fs;

use common::init_logging;
use reel_engine::{ApiSettings, FailureKind, ReqwestVideoApi};
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{body_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestVideoApi {
    ReqwestVideoApi::new(ApiSettings {
        base_url: server.uri(),
        ..ApiSettings::default()
    })
    .expect("client")
}

#[tokio::test]
async fn upload_sends_video_part_and_returns_backend_json() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/vimeo/upload"))
        .and(body_string_contains("name=\"video\"; filename=\"clip.mp4\""))
        .and(body_string_contains("video/mp4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "videoId": "123",
            "link": "https://vimeo.com/123",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let video = temp.path().join("clip.mp4");
    fs::write(&video, b"fake-mp4").unwrap();

    let value = api_for(&server).vimeo_upload(&video).await.expect("upload ok");
    assert_eq!(value["videoId"], "123");
}

#[tokio::test]
async fn upload_of_missing_file_is_an_io_error() {
    init_logging();
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    let err = api_for(&server)
        .vimeo_upload(&temp.path().join("missing.mp4"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Io);
}

#[tokio::test]
async fn update_patches_metadata() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/vimeo/videos/42"))
        .and(body_json(json!({ "name": "Launch video" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "Launch video" })))
        .expect(1)
        .mount(&server)
        .await;

    let value = api_for(&server)
        .vimeo_update("42", &json!({ "name": "Launch video" }))
        .await
        .expect("update ok");
    assert_eq!(value, json!({ "name": "Launch video" }));
}

#[tokio::test]
async fn delete_with_empty_body_returns_null() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/vimeo/videos/42"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let value = api_for(&server).vimeo_delete("42").await.expect("delete ok");
    assert_eq!(value, Value::Null);
}

#[tokio::test]
async fn status_and_get_map_missing_videos_to_not_found() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vimeo/status/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "available" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/vimeo/videos/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let status = api.vimeo_status("7").await.expect("status ok");
    assert_eq!(status["status"], "available");

    let err = api.vimeo_get("gone").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::NotFound);
    assert_eq!(err.to_string(), "Video not found");
}
