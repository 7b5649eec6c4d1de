//! Configuration file watcher.
//!
//! Hotkeys are registered once at startup, so a changed configuration file
//! restarts the app in release builds. Debug builds only log the change since
//! a restart would kill the dev server.

use std::time::{Duration, Instant};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tauri::AppHandle;

use super::get_config_path;
use crate::platform::spawn_named_thread;

/// Some editors trigger multiple events per save (write to temp, rename, etc.).
const CONFIG_DEBOUNCE_MS: u64 = 200;

/// Starts watching the loaded configuration file on a background thread.
///
/// Does nothing when no configuration file was loaded.
#[allow(unused_variables, clippy::needless_pass_by_value)]
pub fn watch_config_file<R: tauri::Runtime>(app_handle: AppHandle<R>) {
    let Some(config_path) = get_config_path().cloned() else {
        return;
    };

    let config_filename =
        config_path.file_name().map(std::ffi::OsStr::to_os_string).unwrap_or_default();

    spawn_named_thread("config-watcher", move || {
        let (tx, rx) = std::sync::mpsc::channel();

        let mut watcher: RecommendedWatcher = match notify::recommended_watcher(tx) {
            Ok(w) => w,
            Err(err) => {
                tracing::warn!(error = %err, "failed to create config watcher");
                return;
            }
        };

        // Watch the parent directory to catch editors that save by rename.
        let watch_path = config_path.parent().unwrap_or(&config_path);

        if let Err(err) = watcher.watch(watch_path, RecursiveMode::NonRecursive) {
            tracing::warn!(error = %err, path = %watch_path.display(), "failed to watch config file");
            return;
        }

        tracing::debug!(path = %config_path.display(), "watching configuration file");

        let mut last_event_time: Option<Instant> = None;
        let debounce_duration = Duration::from_millis(CONFIG_DEBOUNCE_MS);

        for result in &rx {
            let event = match result {
                Ok(event) => event,
                Err(err) => {
                    tracing::warn!(error = %err, "config watch error");
                    continue;
                }
            };

            if !is_config_event(&event.paths, &config_filename) {
                continue;
            }

            let now = Instant::now();
            if last_event_time.is_some_and(|t| now.duration_since(t) < debounce_duration) {
                continue;
            }
            last_event_time = Some(now);

            #[cfg(debug_assertions)]
            tracing::info!("config file changed, restart the app to apply new settings");

            #[cfg(not(debug_assertions))]
            {
                tracing::info!("config file changed, restarting");
                app_handle.restart();
            }
        }
    });
}

fn is_config_event(paths: &[std::path::PathBuf], config_filename: &std::ffi::OsStr) -> bool {
    paths.iter().any(|p| p.file_name().is_some_and(|name| name == config_filename))
}
