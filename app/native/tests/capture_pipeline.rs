//! Capture plumbing that does not need screen access: argument building,
//! output naming and pruning, clipboard payloads and configuration parsing.

use std::fs;
use std::path::{Path, PathBuf};

use snapclip_lib::capture::output::{clear, list_screenshots, prune, unique_path};
use snapclip_lib::capture::{
    CaptureBackend, CaptureError, CaptureOptions, CaptureSettings, CaptureTarget,
    run_capture_with, screencapture_args,
};
use snapclip_lib::clipboard::{ClipboardPayload, FILE_URL_TYPE, PNG_TYPE, Representation};
use snapclip_lib::config::{CaptureBackendKind, SnapclipConfig, load_config_from_path};
use snapclip_lib::geometry::Rect;
use snapclip_lib::preferences::Preferences;

struct PngWriter;

impl CaptureBackend for PngWriter {
    fn capture(
        &self,
        _target: &CaptureTarget,
        _options: CaptureOptions,
        output: &Path,
    ) -> Result<(), CaptureError> {
        let image = image::RgbaImage::new(4, 4);
        image.save(output).map_err(|e| CaptureError::Native(e.to_string()))
    }

    fn name(&self) -> &'static str { "png-writer" }
}

#[test]
fn region_capture_arguments() {
    let output = PathBuf::from("/tmp/out.png");
    let options = CaptureOptions { include_shadow: false, play_sound: false };
    let args = screencapture_args(&CaptureTarget::Region(Rect::new(0.0, 25.0, 640.0, 480.0)), options, &output);
    assert_eq!(args, vec!["-x", "-R0,25,640,480", "/tmp/out.png"]);
}

#[test]
fn capture_writes_numbered_files_and_prunes() {
    let dir = tempfile::tempdir().unwrap();
    let config = SnapclipConfig::default();
    let mut settings = CaptureSettings::new(&config, Preferences::default(), dir.path().to_path_buf());
    settings.copy_to_clipboard = false;
    settings.max_files = 2;

    let mut paths = Vec::new();
    for _ in 0..3 {
        let outcome = run_capture_with(&PngWriter, &CaptureTarget::Screen, &settings).unwrap().unwrap();
        paths.push(outcome.path);
    }

    let remaining = list_screenshots(dir.path(), "Screenshot").unwrap();
    assert_eq!(remaining.len(), 2);
    for path in &paths {
        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("Screenshot "), "{name}");
    }
}

#[test]
fn housekeeping_leaves_the_users_own_images() {
    let dir = tempfile::tempdir().unwrap();
    let name = "Screenshot 2026-01-31 at 09.41.07.png";
    fs::write(dir.path().join(name), b"").unwrap();
    fs::write(dir.path().join("vacation-photo.png"), b"").unwrap();
    fs::write(dir.path().join("readme.txt"), b"").unwrap();

    let second = unique_path(dir.path(), name);
    assert_eq!(second, dir.path().join("Screenshot 2026-01-31 at 09.41.07 (2).png"));
    fs::write(&second, b"").unwrap();

    assert_eq!(prune(dir.path(), "Screenshot", 1, Some(&second)).unwrap(), 1);
    assert!(second.exists());
    assert_eq!(clear(dir.path(), "Screenshot").unwrap(), 1);
    assert!(dir.path().join("vacation-photo.png").exists());
    assert!(dir.path().join("readme.txt").exists());
}

#[test]
fn clipboard_payload_with_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shot one.png");
    fs::write(&path, b"\x89PNG\r\n").unwrap();

    let payload = ClipboardPayload::from_capture(&path, true).unwrap();
    let reps = payload.representations();

    assert!(reps.iter().any(|r| matches!(r, Representation::Text { uti, value }
        if *uti == FILE_URL_TYPE && value.ends_with("shot%20one.png"))));
    assert!(reps.iter().any(|r| matches!(r, Representation::Data { uti, .. } if *uti == PNG_TYPE)));
}

#[test]
fn config_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.jsonc");
    fs::write(
        &path,
        r#"{
            /* block comments work too */
            "capture": { "backend": "native", "outputDir": "shots", "delayMs": 0 },
            "picker": { "excludeOwners": [] },
            "defaults": { "copyImage": true }
        }"#,
    )
    .unwrap();

    let (config, loaded_from) = load_config_from_path(&path).unwrap();
    assert_eq!(loaded_from, path);
    assert_eq!(config.capture.backend, CaptureBackendKind::Native);
    assert_eq!(config.capture.resolved_output_dir(Some(dir.path())), dir.path().join("shots"));
    assert!(config.picker.exclude_owners.is_empty());
    assert!(config.defaults.copy_image);
    assert!(config.defaults.include_shadow);
    assert_eq!(config.hotkeys, SnapclipConfig::default().hotkeys);
}
