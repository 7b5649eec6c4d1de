#![allow(clippy::multiple_crate_versions)]

//! Snapclip - macOS menu bar screenshots straight to the clipboard.
//!
//! This binary serves as both the menu bar app and the CLI:
//! - No arguments, `--desktop`, or launched from `Snapclip.app`: runs the app
//! - With a subcommand (e.g., `snapclip capture screen`): runs the CLI

#[cfg(not(target_os = "macos"))]
compile_error!("Snapclip only supports macOS.");

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let run_desktop = args.len() == 1
        || args.get(1).is_some_and(|arg| arg == "--desktop")
        || is_running_from_app_bundle();

    if run_desktop {
        snapclip_lib::run();
    } else if let Err(err) = snapclip_lib::cli::run() {
        eprintln!("snapclip: {err}");
        std::process::exit(1);
    }
}

/// `/Applications/Snapclip.app/Contents/MacOS/snapclip`
fn is_running_from_app_bundle() -> bool {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.to_str().map(|s| s.contains(".app/Contents/MacOS")))
        .unwrap_or(false)
}
