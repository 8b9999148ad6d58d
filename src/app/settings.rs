use crate::entrypoints::cli::parse_args;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// Battle Map - Shows historical battles from a CSV table on an interactive world map
pub struct Settings {
    /// CSV table of battles to load
    #[clap(short, long, value_name = "FILE", default_value = "Top_25_Battles_Updated.csv")]
    pub input: PathBuf,

    /// Where to write the generated HTML map (overwritten on every run)
    #[clap(short, long, value_name = "FILE", default_value = "battle_map.html")]
    pub output: PathBuf,

    /// Writable cache directory for downloaded map tiles (created if absent)
    #[clap(long, value_name = "DIR", default_value = "QtWebEngine_Cache")]
    pub cache_dir: PathBuf,

    /// Only write the HTML map, without opening the window
    #[clap(long, default_value = "false")]
    pub headless: bool,
}

impl Settings {
    /// Parse settings from the command line, exiting on invalid arguments
    pub fn from_cli() -> Self {
        match parse_args::<Settings>() {
            Ok(args) => args,
            Err(e) => e.exit(),
        }
    }
}
