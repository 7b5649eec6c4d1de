//! Global capture hotkeys.
//!
//! Reads `hotkeys` from the configuration and registers one system-wide
//! shortcut per capture mode through Tauri's global-shortcut plugin.

use std::collections::HashMap;
use std::sync::Arc;

use tauri::Wry;
use tauri_plugin_global_shortcut::{Builder, Shortcut, ShortcutState};

use crate::capture::{self, CaptureMode};
use crate::config::{HotkeysConfig, get_config};

/// Registered shortcuts and the order they were declared in.
#[derive(Debug, Default)]
pub struct ShortcutBindings {
    pub modes: HashMap<Shortcut, CaptureMode>,
    pub shortcuts: Vec<Shortcut>,
}

/// Parses the configured hotkeys.
///
/// Empty strings are skipped, invalid shortcuts are logged and skipped, and a
/// shortcut bound twice keeps its first mode.
#[must_use]
pub fn parse_bindings(hotkeys: &HotkeysConfig) -> ShortcutBindings {
    let mut bindings = ShortcutBindings::default();

    for (mode, raw) in hotkeys.bindings() {
        let normalized = normalize_shortcut(raw);

        let shortcut = match normalized.parse::<Shortcut>() {
            Ok(shortcut) => shortcut,
            Err(err) => {
                tracing::warn!(%mode, shortcut = raw, error = %err, "invalid shortcut");
                continue;
            }
        };

        if let Some(existing) = bindings.modes.get(&shortcut) {
            tracing::warn!(%mode, %existing, shortcut = raw, "shortcut already bound, ignoring");
            continue;
        }

        bindings.modes.insert(shortcut, mode);
        bindings.shortcuts.push(shortcut);
    }

    bindings
}

/// Creates the global-shortcut plugin with the capture hotkeys registered.
pub fn create_hotkey_plugin() -> tauri::plugin::TauriPlugin<Wry> {
    let bindings = parse_bindings(&get_config().hotkeys);

    if bindings.shortcuts.is_empty() {
        tracing::info!("no capture hotkeys configured");
        return Builder::<Wry>::new().build();
    }

    let count = bindings.shortcuts.len();
    let modes = Arc::new(bindings.modes);

    let builder = match Builder::<Wry>::new().with_shortcuts(bindings.shortcuts) {
        Ok(b) => b,
        Err(err) => {
            tracing::warn!(error = %err, "failed to register shortcuts");
            return Builder::<Wry>::new().build();
        }
    };

    tracing::debug!(count, "registered capture hotkeys");

    builder
        .with_handler(move |app, shortcut, event| {
            // Key-down only.
            if event.state != ShortcutState::Pressed {
                return;
            }

            if let Some(mode) = modes.get(shortcut) {
                capture::start(app, *mode);
            }
        })
        .build()
}

/// Normalizes a shortcut string to the names the plugin understands.
///
/// - "Ctrl" is normalized to "Control"
/// - "Cmd", "Super" and "Meta" are normalized to "Command"
/// - "Alt" and "Opt" are normalized to "Option"
/// - backtick (`` ` ``) is normalized to "Backquote"
fn normalize_shortcut(shortcut: &str) -> String {
    let mut result = String::with_capacity(shortcut.len() + 8);

    for part in shortcut.split('+') {
        if !result.is_empty() {
            result.push('+');
        }

        let normalized = match part.trim() {
            "Ctrl" => "Control",
            "Cmd" | "Super" | "Meta" => "Command",
            "Alt" | "Opt" => "Option",
            "`" => "Backquote",
            other => other,
        };

        result.push_str(normalized);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_shortcut_ctrl() {
        assert_eq!(normalize_shortcut("Ctrl+Shift+S"), "Control+Shift+S");
        assert_eq!(normalize_shortcut("Control+Shift+S"), "Control+Shift+S");
    }

    #[test]
    fn test_normalize_shortcut_cmd() {
        assert_eq!(normalize_shortcut("Cmd+K"), "Command+K");
        assert_eq!(normalize_shortcut("Super+K"), "Command+K");
        assert_eq!(normalize_shortcut("Meta+K"), "Command+K");
    }

    #[test]
    fn test_normalize_shortcut_option() {
        assert_eq!(normalize_shortcut("Alt+K"), "Option+K");
        assert_eq!(normalize_shortcut("Opt+K"), "Option+K");
    }

    #[test]
    fn test_normalize_shortcut_backtick_and_spaces() {
        assert_eq!(normalize_shortcut("Cmd + `"), "Command+Backquote");
    }

    #[test]
    fn test_default_bindings_parse() {
        let bindings = parse_bindings(&HotkeysConfig::default());
        assert_eq!(bindings.shortcuts.len(), 3);
        let modes: Vec<CaptureMode> =
            bindings.shortcuts.iter().map(|s| bindings.modes[s]).collect();
        assert_eq!(modes, CaptureMode::ALL.to_vec());
    }

    #[test]
    fn test_invalid_and_empty_shortcuts_are_skipped() {
        let hotkeys = HotkeysConfig {
            window: "Hyper+Nope+W".to_string(),
            screen: String::new(),
            region: "Cmd+Shift+4".to_string(),
        };
        let bindings = parse_bindings(&hotkeys);
        assert_eq!(bindings.shortcuts.len(), 1);
        assert_eq!(bindings.modes.values().copied().collect::<Vec<_>>(), vec![CaptureMode::Region]);
    }

    #[test]
    fn test_duplicate_shortcut_keeps_first_mode() {
        let hotkeys = HotkeysConfig {
            window: "Ctrl+Alt+C".to_string(),
            screen: "Control+Option+C".to_string(),
            region: "Control+Option+R".to_string(),
        };
        let bindings = parse_bindings(&hotkeys);
        assert_eq!(bindings.shortcuts.len(), 2);
        let first = bindings.shortcuts[0];
        assert_eq!(bindings.modes[&first], CaptureMode::Window);
    }
}
