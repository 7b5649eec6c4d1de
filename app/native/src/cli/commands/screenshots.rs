//! `snapclip screenshots`.

use clap::Subcommand;
use colored::Colorize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::capture::output::{self as files, ScreenshotFile};
use crate::cli::output;
use crate::config::{get_config, output_dir};
use crate::error::SnapclipError;

/// Screenshot folder commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum ScreenshotsCommands {
    /// Print the screenshots folder.
    Dir,

    /// List screenshots, oldest first.
    ///
    /// Only files named like Snapclip's own captures are listed, cleared or
    /// pruned; other images in the folder are left alone.
    List {
        /// Output as JSON.
        #[arg(long, short)]
        json: bool,
    },

    /// Delete every screenshot.
    Clear,

    /// Delete the oldest screenshots beyond a limit.
    Prune {
        /// Number of screenshots to keep. Defaults to `capture.maxFiles`.
        #[arg(long, short)]
        keep: Option<usize>,
    },
}

#[derive(Tabled)]
struct ScreenshotRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Modified")]
    modified: String,
}

impl From<&ScreenshotFile> for ScreenshotRow {
    fn from(file: &ScreenshotFile) -> Self {
        Self {
            name: file
                .path
                .file_name()
                .map_or_else(String::new, |n| n.to_string_lossy().into_owned()),
            size: output::format_size(file.size),
            modified: output::format_time(file.modified),
        }
    }
}

/// Executes screenshot folder subcommands.
///
/// # Errors
///
/// Returns an error if the folder cannot be read.
pub fn execute(cmd: &ScreenshotsCommands) -> Result<(), SnapclipError> {
    let dir = output_dir();
    let capture = &get_config().capture;
    let prefix = capture.prefix();

    match cmd {
        ScreenshotsCommands::Dir => println!("{}", dir.display()),
        ScreenshotsCommands::List { json } => {
            let files = files::list_screenshots(&dir, prefix)?;

            if *json {
                let paths: Vec<String> =
                    files.iter().map(|f| f.path.to_string_lossy().into_owned()).collect();
                output::print_highlighted_json(&serde_json::to_value(paths)?);
            } else if files.is_empty() {
                println!("No screenshots in {}", dir.display());
            } else {
                let rows: Vec<ScreenshotRow> = files.iter().map(ScreenshotRow::from).collect();
                let table = Table::new(rows)
                    .with(Style::rounded())
                    .with(Modify::new(Columns::new(1..2)).with(Alignment::right()))
                    .to_string();

                println!("{}", format!("Screenshots ({})", files.len()).bold());
                println!("{table}");
            }
        }
        ScreenshotsCommands::Clear => {
            let removed = files::clear(&dir, prefix)?;
            println!("Removed {removed} screenshot(s) from {}", dir.display());
        }
        ScreenshotsCommands::Prune { keep } => {
            let keep = keep.unwrap_or(capture.max_files);
            let removed = files::prune(&dir, prefix, keep, None)?;
            println!("Removed {removed} screenshot(s), keeping at most {keep}");
        }
    }

    Ok(())
}
