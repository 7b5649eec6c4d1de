//! `snapclip windows`.

use colored::Colorize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::cli::output;
use crate::config::get_config;
use crate::error::SnapclipError;
use crate::windows::{WindowInfo, list_candidates};

#[derive(Tabled)]
struct WindowRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "App")]
    app: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Position")]
    position: String,
    #[tabled(rename = "Size")]
    size: String,
}

impl From<&WindowInfo> for WindowRow {
    #[allow(clippy::cast_possible_truncation)]
    fn from(w: &WindowInfo) -> Self {
        Self {
            id: w.id,
            app: output::truncate(&w.owner_name, 24),
            title: output::truncate(&w.title, 40),
            position: format!("{}, {}", w.bounds.x as i64, w.bounds.y as i64),
            size: format!("{}x{}", w.bounds.width as i64, w.bounds.height as i64),
        }
    }
}

/// Prints the picker candidates.
///
/// # Errors
///
/// Returns an error if the window list is unavailable.
pub fn execute(json: bool) -> Result<(), SnapclipError> {
    let windows = list_candidates(&get_config().picker)?;

    if json {
        output::print_highlighted_json(&serde_json::to_value(&windows)?);
        return Ok(());
    }

    if windows.is_empty() {
        println!("No capturable windows on screen.");
        return Ok(());
    }

    let rows: Vec<WindowRow> = windows.iter().map(WindowRow::from).collect();
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::right()))
        .with(Modify::new(Columns::new(3..5)).with(Alignment::right()))
        .to_string();

    println!("{}", format!("Windows ({})", windows.len()).bold());
    println!("{table}");
    Ok(())
}
