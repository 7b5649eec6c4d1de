//! `snapclip prefs`.

use clap::Subcommand;
use colored::Colorize;

use crate::cli::output;
use crate::error::SnapclipError;
use crate::preferences::{PreferenceFlag, store};

/// Preference commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum PrefsCommands {
    /// Show the current menu toggles.
    Show {
        /// Output as JSON.
        #[arg(long, short)]
        json: bool,
    },

    /// Change one toggle.
    #[command(after_long_help = r"Examples:
  snapclip prefs set copy-image true
  snapclip prefs set include-shadow false")]
    Set {
        #[arg(value_enum)]
        flag: PreferenceFlag,

        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },
}

/// Executes preference subcommands.
///
/// # Errors
///
/// Returns an error if the preferences cannot be serialized.
pub fn execute(cmd: &PrefsCommands) -> Result<(), SnapclipError> {
    let store = store();

    match cmd {
        PrefsCommands::Show { json: true } => {
            output::print_highlighted_json(&serde_json::to_value(store.get())?);
        }
        PrefsCommands::Show { json: false } => {
            let prefs = store.get();
            println!("{}", format!("Preferences ({})", store.path().display()).bold());
            for flag in PreferenceFlag::ALL {
                println!("  {} {}", output::format_bool(flag.get(&prefs)), flag.label());
            }
        }
        PrefsCommands::Set { flag, value } => {
            store.set(*flag, *value);
            println!("{} = {value}", flag.name());
        }
    }

    Ok(())
}
