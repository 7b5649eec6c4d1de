//! `snapclip config`.

use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::cli::output;
use crate::config::template::{create_config_file, generate_config_template};
use crate::config::{config_paths, get_config, get_config_path, output_dir};
use crate::error::SnapclipError;

/// Config management commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum ConfigCommands {
    /// Write a configuration file with every option documented.
    ///
    /// All options in the template are commented out and show their defaults.
    #[command(
        name = "init",
        after_long_help = r"Examples:
  snapclip config init              # Create config at default location
  snapclip config init --force      # Overwrite existing config
  snapclip config init --path ~/snapclip.jsonc
  snapclip config init --stdout     # Print template to stdout"
    )]
    Init {
        /// Overwrite an existing configuration file.
        #[arg(long, short)]
        force: bool,

        /// Custom path for the configuration file.
        /// Defaults to ~/.config/snapclip/config.jsonc
        #[arg(long, short, value_name = "PATH")]
        path: Option<PathBuf>,

        /// Print the template to stdout instead of writing a file.
        #[arg(long)]
        stdout: bool,
    },

    /// Show the configuration search paths and which one is active.
    Path,

    /// Print the effective configuration as JSON.
    Show,
}

/// Executes config subcommands.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cmd: &ConfigCommands) -> Result<(), SnapclipError> {
    match cmd {
        ConfigCommands::Init { stdout: true, .. } => {
            println!("{}", generate_config_template());
            Ok(())
        }
        ConfigCommands::Init { force, path, .. } => {
            let config_path = path.clone().unwrap_or_else(default_config_path);
            init_config(&config_path, *force)?;

            println!("Configuration file created at: {}", config_path.display());
            println!("\nAll options are commented out by default.");
            println!("Edit the file and uncomment the options you want to configure.");
            Ok(())
        }
        ConfigCommands::Path => {
            show_config_path();
            Ok(())
        }
        ConfigCommands::Show => {
            let config = get_config();
            if let Some(path) = get_config_path() {
                eprintln!("# {}", path.display());
            }
            output::print_highlighted_json(&serde_json::to_value(config)?);
            eprintln!("# screenshots: {}", output_dir().display());
            Ok(())
        }
    }
}

fn default_config_path() -> PathBuf {
    config_paths().into_iter().next().unwrap_or_else(|| PathBuf::from("config.jsonc"))
}

/// Writes the template to `path`, refusing to overwrite unless `force`.
fn init_config(path: &Path, force: bool) -> Result<(), SnapclipError> {
    if path.exists() && !force {
        return Err(SnapclipError::ConfigError(format!(
            "Configuration file already exists at: {}\nUse --force to overwrite.",
            path.display()
        )));
    }

    create_config_file(path).map_err(|e| {
        SnapclipError::ConfigError(format!("Failed to create config file {}: {e}", path.display()))
    })
}

fn show_config_path() {
    println!("Configuration file search paths (in priority order):\n");

    let mut found_config = false;
    for (i, path) in config_paths().iter().enumerate() {
        let exists = path.exists();
        let marker = if exists && !found_config {
            found_config = true;
            " (active)"
        } else if exists {
            " (exists)"
        } else {
            ""
        };

        println!("  {}. {}{}", i + 1, path.display(), marker);
    }

    if !found_config {
        println!("\nNo configuration file found.");
        println!("Run 'snapclip config init' to create one.");
    }
}
