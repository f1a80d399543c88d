//! Discovery-to-panel tests against real directories

use agentvibes::discovery::{self, Cancellation, CommandError, ShutdownSignal};
use agentvibes::render::measure::plain;
use agentvibes::render::{
    render_personalities, render_voices, PersonalitiesOptions, Theme, VoicesOptions,
};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_piper_directory_to_voice_panel() {
    let temp_dir = TempDir::new().expect("create temp dir");
    for file in [
        "en_US-lessac-medium.onnx",
        "en_US-lessac-medium.onnx.json",
        "fr_FR-siwis-low.onnx",
        "readme.txt",
    ] {
        fs::write(temp_dir.path().join(file), "").expect("write");
    }
    fs::create_dir(temp_dir.path().join("nested.onnx")).expect("mkdir");

    let voices = discovery::discover_piper_voices(temp_dir.path()).expect("discover");
    assert_eq!(voices.len(), 2);

    let output = plain(&render_voices(
        &voices,
        Some("fr_FR-siwis-low"),
        &VoicesOptions::default(),
        Theme::default_theme(),
    ));

    assert!(output.contains("Piper TTS"));
    assert!(output.contains("  en_US-lessac-medium en_US"));
    assert!(output.contains("▶ fr_FR-siwis-low fr_FR"));
    assert!(!output.contains("readme"));
    assert!(!output.contains("nested"));
}

#[test]
fn test_missing_voice_directory_renders_guidance() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let voices =
        discovery::discover_piper_voices(&temp_dir.path().join("absent")).expect("discover");
    assert!(voices.is_empty());

    let output = render_voices(&voices, None, &VoicesOptions::default(), Theme::plain());
    assert!(output.contains("No voices found"));
}

#[test]
fn test_voice_path_that_is_a_file_is_an_error() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let file = temp_dir.path().join("voices");
    fs::write(&file, "").expect("write");

    let err = discovery::discover_piper_voices(&file).expect_err("not a directory");
    assert!(err.to_string().contains("is not a directory"));
}

#[test]
fn test_personality_directory_to_panel() {
    let temp_dir = TempDir::new().expect("create temp dir");
    fs::write(
        temp_dir.path().join("pirate.md"),
        "---\nname: pirate\ndescription: Talks like a pirate\n---\nArr.\n",
    )
    .expect("write");
    fs::write(
        temp_dir.path().join("zen.md"),
        "---\nname: zen\n---\n\n# Calm and centered responses only\n",
    )
    .expect("write");
    fs::write(temp_dir.path().join("blank.md"), "").expect("write");
    fs::write(temp_dir.path().join("notes.txt"), "description: ignored").expect("write");

    let personalities = discovery::discover_personalities(temp_dir.path()).expect("discover");
    let names: Vec<&str> = personalities.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(personalities.len(), 4, "{names:?}");
    assert!(names.contains(&"random"));

    let output = plain(&render_personalities(
        &personalities,
        Some("zen"),
        &PersonalitiesOptions::default(),
        Theme::default_theme(),
    ));

    assert!(output.contains("pirate Talks like a pirate"));
    assert!(output.contains("▶ zen Calm and centered responses only"));
    assert!(output.contains("random Picks randomly each time"));
    assert!(!output.contains("notes"));
}

#[test]
fn test_missing_personality_directory_has_no_random_entry() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let personalities =
        discovery::discover_personalities(&temp_dir.path().join("absent")).expect("discover");
    assert!(personalities.is_empty());

    let output = render_personalities(
        &personalities,
        Some("normal"),
        &PersonalitiesOptions::default(),
        Theme::plain(),
    );
    assert!(output.contains("No personalities found"));
    assert!(!output.contains("random"));
}

#[tokio::test]
async fn test_cancelled_say_lookup_reports_the_signal() {
    let cancellation = Cancellation::new();
    let token = cancellation.token();
    cancellation.cancel(ShutdownSignal::Terminate);

    let result = discovery::discover_say_voices(&token).await;

    // Off macOS the lookup never starts, so there is nothing to cancel.
    if cfg!(target_os = "macos") {
        let err = result.expect_err("cancelled");
        match err.downcast_ref::<CommandError>() {
            Some(CommandError::Cancelled { signal, .. }) => {
                assert_eq!(signal.exit_code(), 143);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    } else {
        assert!(result.expect("empty list").is_empty());
    }
}
