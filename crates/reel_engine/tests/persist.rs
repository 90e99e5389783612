use std::fs;

use reel_engine::{ensure_output_dir, EngineError, FailureKind, MediaWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("out").join("audio");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn media_write_replaces_previous_audio() {
    let temp = TempDir::new().unwrap();
    let writer = MediaWriter::new(temp.path().join("output"));

    let first = writer.write("audio.mp3", b"first take").unwrap();
    assert_eq!(first.file_name().unwrap(), "audio.mp3");
    assert_eq!(fs::read(&first).unwrap(), b"first take");

    let second = writer.write("audio.mp3", b"second take").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"second take");

    // Only the target remains; temp files are renamed away.
    let entries = fs::read_dir(writer.dir()).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn output_path_that_is_a_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = MediaWriter::new(file_path.clone());
    let err = writer.write("audio.mp3", b"data").unwrap_err();

    assert!(!file_path.with_file_name("audio.mp3").exists());
    let err: EngineError = err.into();
    assert_eq!(err.kind, FailureKind::Io);
}
