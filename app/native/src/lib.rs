//! Snapclip - a macOS menu bar utility that captures a window, the screen or
//! a dragged region to PNG and puts the file path (and optionally the image)
//! on the clipboard.
//!
//! This library provides both the menu bar application and CLI functionality.

pub mod capture;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod geometry;
pub mod logging;
pub mod overlay;
pub mod picker;
pub mod platform;
pub mod preferences;
pub mod schema;
pub mod windows;

mod hotkey;
mod tray;

/// Runs the menu bar application.
///
/// # Panics
///
/// Panics if Tauri fails to initialize or the event loop encounters an error.
pub fn run() {
    logging::init(false);

    // Hotkeys are read from the configuration while building the plugin.
    config::init();

    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|_app, args, _| {
            tracing::debug!(?args, "second instance launch ignored");
        }))
        .plugin(tauri_plugin_process::init())
        .plugin(tauri_plugin_shell::init())
        .plugin(hotkey::create_hotkey_plugin())
        .manage(overlay::OverlayState::default())
        .invoke_handler(tauri::generate_handler![
            overlay::commands::overlay_hover,
            overlay::commands::overlay_drag,
            overlay::commands::overlay_click,
            overlay::commands::overlay_cancel,
        ])
        .setup(|app| {
            // Menu bar only, no Dock icon.
            app.set_activation_policy(tauri::ActivationPolicy::Accessory);

            tray::init(app)?;
            config::watch_config_file(app.handle().clone());

            tracing::info!(
                version = env!("CARGO_PKG_VERSION"),
                output_dir = %config::output_dir().display(),
                "snapclip started"
            );
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|_app, event| {
            // Closing the overlay must not quit a menu bar app.
            if let tauri::RunEvent::ExitRequested { api, code: None, .. } = event {
                api.prevent_exit();
            }
        });
}
