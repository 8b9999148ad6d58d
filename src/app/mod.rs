//! Application module
//!
//! The viewer window: a full-screen map with one pin and caption per battle,
//! a popup window with the clicked battle's details and flag images, and a link
//! to the generated HTML map.

mod plugin;
mod popup;
mod settings;

pub use settings::Settings;

use crate::data::BattleRecord;
use crate::format::PopupContent;
use crate::map::{MapView, TILE_ATTRIBUTION};
use eframe::egui;
use plugin::{BattleMarkers, Pin};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use walkers::{HttpOptions, HttpTiles, Map, MapMemory, sources::OpenStreetMap};

/// Main application structure
pub struct BattleMapApp {
    /// Marker data shared with the map plugin
    pins: Arc<Vec<Pin>>,

    /// Popup content, indexed like `pins`
    popups: Vec<PopupContent>,

    /// Map tiles provider (OpenStreetMap), cached on disk
    tiles: HttpTiles,

    /// Map state (camera position, zoom, etc.)
    map_memory: MapMemory,

    /// Initial center of the map
    view: MapView,

    /// Pin clicked in the last frame, written by the plugin
    clicked: Arc<RwLock<Option<usize>>>,

    /// Battle whose popup is open
    selected: Option<usize>,

    /// Generated HTML document
    document: PathBuf,
}

impl BattleMapApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        records: Vec<BattleRecord>,
        view: MapView,
        settings: &Settings,
    ) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let pins = records.iter().map(Pin::from_record).collect();
        let popups = records.iter().map(PopupContent::from_record).collect();

        let tiles = HttpTiles::with_options(
            OpenStreetMap,
            HttpOptions {
                cache: Some(settings.cache_dir.clone()),
                ..Default::default()
            },
            cc.egui_ctx.clone(),
        );

        let mut map_memory = MapMemory::default();
        if let Err(err) = map_memory.set_zoom(view.zoom as f64) {
            tracing::warn!("Cannot apply initial zoom {}: {err:?}", view.zoom);
        }

        tracing::info!(
            "Showing {} battles, tiles cached in {}",
            records.len(),
            settings.cache_dir.display()
        );

        Self {
            pins: Arc::new(pins),
            popups,
            tiles,
            map_memory,
            view,
            clicked: Arc::new(RwLock::new(None)),
            selected: None,
            document: absolute(&settings.output),
        }
    }

    /// Open the generated HTML map with the system browser
    fn open_document(&self) {
        match open::that(&self.document) {
            Ok(()) => tracing::info!("Opened {}", self.document.display()),
            Err(err) => tracing::error!("Failed to open {}: {err}", self.document.display()),
        }
    }

    /// Take the click reported by the plugin during the last frame
    fn take_click(&mut self) -> Option<usize> {
        match self.clicked.write() {
            Ok(mut clicked) => clicked.take(),
            Err(_) => None,
        }
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[profiling::all_functions]
impl eframe::App for BattleMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (lat, lon) = self.view.center;

        // Central panel: Map view (full screen)
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let markers = BattleMarkers::new(self.pins.clone(), self.clicked.clone());

                let map = Map::new(
                    Some(&mut self.tiles),
                    &mut self.map_memory,
                    walkers::lat_lon(lat, lon),
                )
                .with_plugin(markers);

                ui.add(map);

                let painter = ui.painter();
                let screen_rect = ui.max_rect();
                painter.text(
                    screen_rect.center_bottom() + egui::vec2(0.0, -5.0),
                    egui::Align2::CENTER_BOTTOM,
                    TILE_ATTRIBUTION,
                    egui::FontId::proportional(10.0),
                    egui::Color32::from_black_alpha(180),
                );
            });

        egui::Area::new(egui::Id::new("document_link"))
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-8.0, 8.0))
            .show(ctx, |ui| {
                let label = self
                    .document
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                if ui
                    .button(format!("Open {label} in browser"))
                    .on_hover_text(self.document.display().to_string())
                    .clicked()
                {
                    self.open_document();
                }
            });

        if let Some(index) = self.take_click()
            && let Some(popup) = self.popups.get(index)
        {
            tracing::debug!("Opening popup for {}", popup.name);
            self.selected = Some(index);
        }

        let base_dir = self
            .document
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        popup::popup_window(ctx, &self.popups, &mut self.selected, base_dir);
    }
}
