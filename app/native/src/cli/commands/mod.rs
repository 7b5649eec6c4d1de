//! CLI command definitions using Clap.
//!
//! - `capture` - Headless screenshots
//! - `config_cmd` - Configuration file management
//! - `prefs` - Menu toggle preferences
//! - `screenshots` - Output directory management
//! - `windows` - Picker candidate listing

use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};

use crate::capture::CaptureMode;
use crate::constants::APP_NAME;
use crate::error::SnapclipError;
use crate::{config, schema};

pub mod capture;
pub mod config_cmd;
pub mod prefs;
pub mod screenshots;
pub mod windows;

pub use config_cmd::ConfigCommands;
pub use prefs::PrefsCommands;
pub use screenshots::ScreenshotsCommands;

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Snapclip CLI - capture screenshots straight to the clipboard.
#[derive(Parser, Debug)]
#[command(name = "snapclip")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a custom configuration file.
    ///
    /// Overrides the default configuration file search paths.
    /// Supports JSONC format (JSON with comments).
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging (`SNAPCLIP_LOG` takes precedence).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// Take a screenshot and copy its path to the clipboard.
    ///
    /// Window and region captures use the system picker. Prints the path of
    /// the written PNG.
    #[command(after_long_help = r"Examples:
  snapclip capture screen              # Capture the main display
  snapclip capture window              # Click a window to capture it
  snapclip capture region --no-clipboard
  snapclip capture screen --native     # Capture in-process")]
    Capture {
        /// What to capture.
        #[arg(value_enum)]
        mode: CaptureMode,

        /// Use the native capture backend instead of screencapture.
        #[arg(long)]
        native: bool,

        /// Only write the file, leave the clipboard untouched.
        #[arg(long)]
        no_clipboard: bool,
    },

    /// List the windows the picker can highlight, front to back.
    Windows {
        /// Output as JSON.
        #[arg(long, short)]
        json: bool,
    },

    /// Configuration file management commands.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Show or change the menu toggles.
    #[command(subcommand)]
    Prefs(PrefsCommands),

    /// Manage the screenshots folder.
    #[command(subcommand)]
    Screenshots(ScreenshotsCommands),

    /// Output the configuration JSON Schema.
    ///
    /// Can be redirected to a file for editors that support JSON Schema
    /// validation.
    Schema,

    /// Generate shell completions.
    ///
    /// Usage:
    ///   eval "$(snapclip completions --shell zsh)"
    ///   snapclip completions --shell fish > ~/.config/fish/completions/snapclip.fish
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },

    /// Launch the menu bar application.
    ///
    /// Equivalent to running `snapclip` without any arguments.
    #[command(name = "--desktop", hide = true)]
    Desktop,
}

impl Cli {
    /// Executes the parsed command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command execution fails.
    pub fn execute(&self) -> Result<(), SnapclipError> {
        if let Some(path) = &self.config {
            if !path.exists() {
                return Err(SnapclipError::ConfigError(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            config::set_custom_config_path(path.clone());
        }

        match &self.command {
            Commands::Capture { mode, native, no_clipboard } => {
                capture::execute(*mode, *native, *no_clipboard)
            }
            Commands::Windows { json } => windows::execute(*json),
            Commands::Config(cmd) => config_cmd::execute(cmd),
            Commands::Prefs(cmd) => prefs::execute(cmd),
            Commands::Screenshots(cmd) => screenshots::execute(cmd),

            Commands::Schema => {
                println!("{}", schema::generate_schema_json());
                Ok(())
            }

            Commands::Completions { shell } => {
                Self::print_completions(*shell);
                Ok(())
            }

            Commands::Desktop => Err(SnapclipError::InvalidArguments(
                "--desktop must be the only argument".to_string(),
            )),
        }
    }

    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, APP_NAME, &mut io::stdout());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() { Cli::command().debug_assert(); }

    #[test]
    fn test_cli_parses_capture_modes() {
        for (arg, expected) in
            [("window", CaptureMode::Window), ("screen", CaptureMode::Screen), ("region", CaptureMode::Region)]
        {
            let cli = Cli::try_parse_from(["snapclip", "capture", arg]).unwrap();
            match cli.command {
                Commands::Capture { mode, native, no_clipboard } => {
                    assert_eq!(mode, expected);
                    assert!(!native);
                    assert!(!no_clipboard);
                }
                _ => panic!("Expected Capture command"),
            }
        }
    }

    #[test]
    fn test_cli_parses_capture_flags() {
        let cli =
            Cli::try_parse_from(["snapclip", "capture", "screen", "--native", "--no-clipboard"])
                .unwrap();
        assert!(matches!(cli.command, Commands::Capture { native: true, no_clipboard: true, .. }));
    }

    #[test]
    fn test_cli_rejects_unknown_capture_mode() {
        assert!(Cli::try_parse_from(["snapclip", "capture", "everything"]).is_err());
        assert!(Cli::try_parse_from(["snapclip", "capture"]).is_err());
    }

    #[test]
    fn test_cli_parses_windows_json() {
        let cli = Cli::try_parse_from(["snapclip", "windows", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Windows { json: true }));
    }

    #[test]
    fn test_cli_parses_schema() {
        let cli = Cli::try_parse_from(["snapclip", "schema"]).unwrap();
        assert!(matches!(cli.command, Commands::Schema));
    }

    #[test]
    fn test_cli_parses_completions() {
        let cli = Cli::try_parse_from(["snapclip", "completions", "--shell", "zsh"]).unwrap();
        match cli.command {
            Commands::Completions { shell } => assert_eq!(shell, Shell::Zsh),
            _ => panic!("Expected Completions command"),
        }
    }

    #[test]
    fn test_cli_parses_global_flags_anywhere() {
        let cli =
            Cli::try_parse_from(["snapclip", "schema", "--config", "/path/to/config.jsonc", "-v"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.jsonc")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_missing_config_file_is_an_error() {
        let cli =
            Cli::try_parse_from(["snapclip", "--config", "/nonexistent/snapclip.jsonc", "schema"])
                .unwrap();
        let err = cli.execute().unwrap_err();
        assert!(matches!(err, SnapclipError::ConfigError(_)));
    }

    #[test]
    fn test_app_version_is_not_empty() {
        assert!(!APP_VERSION.is_empty());
    }
}
