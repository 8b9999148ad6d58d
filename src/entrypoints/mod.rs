//! Process entry points: CLI parsing, logging setup and the startup sequence.

pub(crate) mod cli;
mod logging;
mod metadata;
mod run;

pub use logging::setup_logging;
pub use metadata::{log_version_info, short_version_info};
pub use run::{APP_NAME, StartupError, ensure_cache_dir, generate_map, native_main, prepare};
