//! Menu bar icon and menu.
//!
//! Capture entries, the preference check items and shortcuts to the
//! screenshots folder.

use std::path::Path;

use tauri::image::Image;
use tauri::menu::{CheckMenuItem, Menu, MenuItem, PredefinedMenuItem};
use tauri::tray::TrayIconBuilder;
use tauri::{App, AppHandle, Listener, Wry};
use tauri_plugin_shell::ShellExt;

use crate::capture::{self, CaptureMode};
use crate::config::{self, get_config};
use crate::constants::APP_DISPLAY_NAME;
use crate::events;
use crate::preferences::{self, PreferenceFlag};

const TRAY_ICON: &[u8] = include_bytes!("../../icons/tray-template.png");

/// Something the user picked from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayAction {
    Capture(CaptureMode),
    Toggle(PreferenceFlag),
    OpenFolder,
    RevealLast,
    Quit,
}

impl TrayAction {
    const CAPTURE_PREFIX: &'static str = "capture-";
    const TOGGLE_PREFIX: &'static str = "pref-";

    /// Menu item id for this action.
    #[must_use]
    pub fn id(self) -> String {
        match self {
            Self::Capture(mode) => format!("{}{mode}", Self::CAPTURE_PREFIX),
            Self::Toggle(flag) => format!("{}{}", Self::TOGGLE_PREFIX, flag.name()),
            Self::OpenFolder => "open-folder".to_string(),
            Self::RevealLast => "reveal-last".to_string(),
            Self::Quit => "quit".to_string(),
        }
    }

    /// Parses a menu item id.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        if let Some(mode) = id.strip_prefix(Self::CAPTURE_PREFIX) {
            return CaptureMode::ALL.into_iter().find(|m| m.to_string() == mode).map(Self::Capture);
        }

        if let Some(flag) = id.strip_prefix(Self::TOGGLE_PREFIX) {
            return PreferenceFlag::from_name(flag).map(Self::Toggle);
        }

        match id {
            "open-folder" => Some(Self::OpenFolder),
            "reveal-last" => Some(Self::RevealLast),
            "quit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Creates a menu item, dropping the accelerator label if it does not parse.
fn capture_item(app: &AppHandle, mode: CaptureMode) -> tauri::Result<MenuItem<Wry>> {
    let id = TrayAction::Capture(mode).id();
    let accelerator = get_config().hotkeys.for_mode(mode);

    MenuItem::with_id(app, id.as_str(), mode.label(), true, accelerator).or_else(|err| {
        tracing::debug!(%mode, error = %err, "menu accelerator rejected, showing none");
        MenuItem::with_id(app, id.as_str(), mode.label(), true, None::<&str>)
    })
}

/// Initializes the menu bar icon.
///
/// # Errors
///
/// Returns an error if the menu or the tray icon cannot be built.
pub fn init(app: &App) -> tauri::Result<()> {
    let handle = app.handle();
    let prefs = preferences::current();

    let capture_items = CaptureMode::ALL
        .into_iter()
        .map(|mode| capture_item(handle, mode))
        .collect::<tauri::Result<Vec<_>>>()?;

    let check_items = PreferenceFlag::ALL
        .into_iter()
        .map(|flag| {
            let id = TrayAction::Toggle(flag).id();
            CheckMenuItem::with_id(handle, id, flag.label(), true, flag.get(&prefs), None::<&str>)
        })
        .collect::<tauri::Result<Vec<_>>>()?;

    let open_folder = MenuItem::with_id(
        handle,
        TrayAction::OpenFolder.id(),
        "Open Screenshots Folder",
        true,
        None::<&str>,
    )?;
    let reveal_last = MenuItem::with_id(
        handle,
        TrayAction::RevealLast.id(),
        "Reveal Last Screenshot",
        capture::last_capture().is_some(),
        None::<&str>,
    )?;
    let quit = MenuItem::with_id(
        handle,
        TrayAction::Quit.id(),
        format!("Quit {APP_DISPLAY_NAME}"),
        true,
        Some("CmdOrCtrl+Q"),
    )?;

    let separator_top = PredefinedMenuItem::separator(handle)?;
    let separator_bottom = PredefinedMenuItem::separator(handle)?;

    let mut items: Vec<&dyn tauri::menu::IsMenuItem<Wry>> = Vec::new();
    items.extend(capture_items.iter().map(|i| i as &dyn tauri::menu::IsMenuItem<Wry>));
    items.push(&separator_top);
    items.extend(check_items.iter().map(|i| i as &dyn tauri::menu::IsMenuItem<Wry>));
    items.push(&separator_bottom);
    items.push(&open_folder);
    items.push(&reveal_last);
    items.push(&quit);

    let menu = Menu::with_items(handle, &items)?;

    TrayIconBuilder::new()
        .icon(Image::from_bytes(TRAY_ICON)?)
        .icon_as_template(true)
        .tooltip(APP_DISPLAY_NAME)
        .menu(&menu)
        .show_menu_on_left_click(true)
        .on_menu_event(move |app, event| {
            let Some(action) = TrayAction::from_id(event.id.as_ref()) else {
                return;
            };
            handle_action(app, action, &check_items);
        })
        .build(handle)?;

    handle.listen(events::capture::COMPLETED, move |_| {
        if let Err(err) = reveal_last.set_enabled(true) {
            tracing::debug!(error = %err, "failed to enable reveal item");
        }
    });

    tracing::debug!("system tray initialized");
    Ok(())
}

fn handle_action(app: &AppHandle, action: TrayAction, check_items: &[CheckMenuItem<Wry>]) {
    tracing::debug!(?action, "tray action");

    match action {
        TrayAction::Capture(mode) => capture::start(app, mode),
        TrayAction::Toggle(flag) => {
            let value = preferences::store().toggle(flag);
            let id = action.id();
            if let Some(item) = check_items.iter().find(|item| item.id().as_ref() == id)
                && let Err(err) = item.set_checked(value)
            {
                tracing::debug!(error = %err, "failed to update check item");
            }
        }
        TrayAction::OpenFolder => {
            let dir = config::output_dir();
            if let Err(err) = std::fs::create_dir_all(&dir) {
                tracing::warn!(path = %dir.display(), error = %err, "failed to create screenshots folder");
            }
            run_open(app, vec![dir.to_string_lossy().into_owned()]);
        }
        TrayAction::RevealLast => match capture::last_capture() {
            Some(path) => run_open(app, reveal_args(&path)),
            None => tracing::debug!("no screenshot to reveal"),
        },
        TrayAction::Quit => {
            tracing::info!("quit requested via system tray");
            app.exit(0);
        }
    }
}

fn reveal_args(path: &Path) -> Vec<String> {
    vec!["-R".to_string(), path.to_string_lossy().into_owned()]
}

/// Runs `open` with `args` without blocking the menu.
fn run_open(app: &AppHandle, args: Vec<String>) {
    let app = app.clone();
    tauri::async_runtime::spawn(async move {
        match app.shell().command("open").args(&args).status().await {
            Ok(status) if status.success() => {}
            Ok(status) => tracing::warn!(?args, code = ?status.code(), "open exited with failure"),
            Err(err) => tracing::warn!(?args, error = %err, "failed to run open"),
        }
    });
}
