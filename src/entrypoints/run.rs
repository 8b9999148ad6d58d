//! Startup sequence
//!
//! Create the tile cache, load the table, write the map document, then open
//! the viewer window. Any
//! failure before the window opens is fatal: it is logged, shown in a
//! blocking error dialog and the process exits with a non-zero code.

use super::{log_version_info, setup_logging};
use crate::app::{BattleMapApp, Settings};
use crate::data::{BattleRecord, DataError, load_battles};
use crate::map::{BattleMap, MapError, MapView};
use std::path::{Path, PathBuf};

/// Window title and eframe application name
pub const APP_NAME: &str = "Interactive Battle Map";

/// Fatal errors of the startup sequence
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Load(#[from] DataError),

    #[error(transparent)]
    Write(#[from] MapError),

    #[error("cannot create cache directory {}: {source}", path.display())]
    Cache {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot open the map window: {0}")]
    Window(#[from] eframe::Error),
}

impl StartupError {
    pub fn dialog_title(&self) -> &'static str {
        match self {
            Self::Load(err) => err.dialog_title(),
            Self::Write(_) => "Error Writing Map",
            Self::Cache { .. } => "Error Creating Cache",
            Self::Window(_) => "Error Opening Window",
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Load(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

/// Load the battles and write the map document.
///
/// The output file is only touched once the whole table loaded successfully.
pub fn generate_map(
    settings: &Settings,
    view: MapView,
) -> Result<Vec<BattleRecord>, StartupError> {
    let records = load_battles(&settings.input)?;
    BattleMap::from_records(&records, view).save(&settings.output)?;
    Ok(records)
}

/// Create the tile cache directory if it does not exist yet
pub fn ensure_cache_dir(path: &Path) -> Result<(), StartupError> {
    std::fs::create_dir_all(path).map_err(|source| StartupError::Cache {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Using tile cache at {}", path.display());
    Ok(())
}

/// Everything that happens before the window opens.
///
/// The cache directory exists before the table is read, even when loading
/// fails afterwards. Headless runs never touch it.
pub fn prepare(settings: &Settings, view: MapView) -> Result<Vec<BattleRecord>, StartupError> {
    if !settings.headless {
        ensure_cache_dir(&settings.cache_dir)?;
    }
    generate_map(settings, view)
}

fn run(settings: Settings) -> Result<(), StartupError> {
    let view = MapView::default();
    let records = prepare(&settings, view)?;

    if settings.headless {
        tracing::info!("Headless mode, not opening the map window");
        return Ok(());
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(APP_NAME),
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(move |cc| Ok(Box::new(BattleMapApp::new(cc, records, view, &settings)))),
    )?;
    Ok(())
}

fn report_fatal(err: &StartupError, show_dialog: bool) {
    tracing::error!("{}: {err}", err.dialog_title());
    if show_dialog {
        let _ = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Error)
            .set_title(err.dialog_title())
            .set_description(err.user_message())
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}

/// Native entry point, returns the process exit code
pub fn native_main() -> i32 {
    setup_logging();
    log_version_info();

    let settings = Settings::from_cli();
    let show_dialog = !settings.headless;

    match run(settings) {
        Ok(()) => 0,
        Err(err) => {
            report_fatal(&err, show_dialog);
            1
        }
    }
}
