//! Tracing subscriber setup.
//!
//! The filter is read from `SNAPCLIP_LOG` using the usual `EnvFilter` syntax,
//! e.g. `SNAPCLIP_LOG=snapclip_lib::overlay=trace`.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "SNAPCLIP_LOG";

const DEFAULT_FILTER: &str = "snapclip_lib=info,snapclip=info,warn";
const VERBOSE_FILTER: &str = "snapclip_lib=debug,snapclip=debug,info";

static INIT: Once = Once::new();

/// Installs the global tracing subscriber. Later calls are no-ops.
///
/// `verbose` only applies when `SNAPCLIP_LOG` is unset.
pub fn init(verbose: bool) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

        let result = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .try_init();

        if let Err(err) = result {
            eprintln!("snapclip: warning: failed to install log subscriber: {err}");
        }
    });
}

const fn default_filter(verbose: bool) -> &'static str {
    if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER }
}
