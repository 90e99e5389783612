use reel_core::{JobId, RenderSettings};
use serde_json::json;

#[test]
fn settings_serialize_in_wire_shape() {
    let value = serde_json::to_value(RenderSettings::default()).unwrap();

    assert_eq!(
        value,
        json!({
            "width": 1280,
            "height": 720,
            "fps": 30,
            "format": "mp4",
            "backgroundColor": "#667eea",
            "voice": "en-US-JennyNeural",
        })
    );
}

#[test]
fn partial_settings_fill_in_defaults() {
    let settings: RenderSettings =
        serde_json::from_value(json!({ "width": 1920, "height": 1080 })).unwrap();

    assert_eq!(settings.width, 1920);
    assert_eq!(settings.height, 1080);
    assert_eq!(settings.fps, 30);
    assert_eq!(settings.voice, "en-US-JennyNeural");
}

#[test]
fn job_id_is_a_bare_string_on_the_wire() {
    let id: JobId = serde_json::from_value(json!("abc-123")).unwrap();

    assert_eq!(id.as_str(), "abc-123");
    assert_eq!(serde_json::to_value(&id).unwrap(), json!("abc-123"));
}
