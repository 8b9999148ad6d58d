//! Map building
//!
//! Turns battle records into map markers and serializes them into a
//! standalone Leaflet document. Every record contributes two markers at its
//! coordinates:
//!
//! - a pin carrying the popup and a hover tooltip
//! - a caption showing the battle name directly on the map
//!
//! The initial view is fixed and not derived from the data. Marker ids are
//! positional, so the same records always produce the same document.

mod html;

use crate::data::BattleRecord;
use crate::format::{PopupContent, escape_html, tooltip_text};
use std::path::{Path, PathBuf};

/// Maximum popup width in pixels
pub const POPUP_MAX_WIDTH: u32 = 450;

/// Base map tiles used by the generated document
pub const TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str = "© OpenStreetMap contributors";

/// Error types for the map module
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, MapError>;

/// Initial camera of the map
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapView {
    /// `(latitude, longitude)`
    pub center: (f64, f64),
    pub zoom: u8,
}

impl Default for MapView {
    /// Roughly centered on Europe
    fn default() -> Self {
        Self {
            center: (50.0, 10.0),
            zoom: 3,
        }
    }
}

/// What a marker shows
#[derive(Clone, Debug, PartialEq)]
pub enum MarkerKind {
    /// Default pin with a popup and a tooltip, both as escaped HTML
    /// Default pin with a popup and a tooltip
    Popup { popup_html: String, tooltip: String },
    /// Text caption rendered in place of the pin
    Label { html: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    /// `(latitude, longitude)`
    pub position: (f64, f64),
    pub kind: MarkerKind,
}

impl Marker {
    pub fn popup(record: &BattleRecord) -> Self {
        Self {
            position: record.position(),
            kind: MarkerKind::Popup {
                popup_html: PopupContent::from_record(record).to_html(),
                tooltip: escape_html(&tooltip_text(record)),
            },
        }
    }

    pub fn label(record: &BattleRecord) -> Self {
        Self {
            position: record.position(),
            kind: MarkerKind::Label {
                html: format!(
                    "<div style=\"font-size: 12px; font-weight: bold;\">{}</div>",
                    escape_html(&record.name)
                ),
            },
        }
    }
}

/// A base map with battle markers, ready to be serialized
#[derive(Clone, Debug, PartialEq)]
pub struct BattleMap {
    view: MapView,
    markers: Vec<Marker>,
}

impl BattleMap {
    /// Empty map with the given initial view
    pub fn new(view: MapView) -> Self {
        Self {
            view,
            markers: Vec::new(),
        }
    }

    /// Build a map with two markers per record, in record order
    pub fn from_records(records: &[BattleRecord], view: MapView) -> Self {
        profiling::scope!("BattleMap::from_records");

        let mut map = Self::new(view);
        for record in records {
            map.add_record(record);
        }
        tracing::debug!(
            "Built map with {} markers for {} battles",
            map.markers.len(),
            records.len()
        );
        map
    }

    pub fn add_record(&mut self, record: &BattleRecord) {
        self.markers.push(Marker::popup(record));
        self.markers.push(Marker::label(record));
    }

    pub fn view(&self) -> MapView {
        self.view
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Serialize to a complete HTML document
    pub fn to_html(&self) -> String {
        profiling::scope!("BattleMap::to_html");
        html::render_document(self)
    }

    /// Write the document to `path`, replacing any previous file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_html()).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(
            "Saved map with {} markers to {}",
            self.markers.len(),
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::read_battles;

    fn sample_records() -> Vec<BattleRecord> {
        let csv = "\
Battle Name,Date,Location,Total Participants,Side A Participants,Side B Participants,Side A Factions,Side B Factions,Flags/Markings Side A,Flags/Markings Side B,Latitude,Longitude
Battle of Stalingrad,1942-08-23,\"Stalingrad, USSR\",2200000,1140000,1040000,['Soviet Union'],\"['Germany', 'Romania']\",su.png,de.png,48.708,44.513
Battle of Hastings,1066-10-14,\"Hastings, England\",17000,7000,10000,['Normans'],['Anglo-Saxons'],nm.png,as.png,50.912,0.487
Battle of Gaugamela,331 BC,Gaugamela,147000,47000,100000,['Macedon'],['Persia'],,,36.56,43.44
";
        read_battles(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_two_markers_per_record() {
        let records = sample_records();
        let map = BattleMap::from_records(&records, MapView::default());

        assert_eq!(map.markers().len(), 2 * records.len());
        for (record, pair) in records.iter().zip(map.markers().chunks(2)) {
            assert_eq!(pair[0].position, record.position());
            assert_eq!(pair[1].position, record.position());
            assert!(matches!(pair[0].kind, MarkerKind::Popup { .. }));
            assert!(matches!(pair[1].kind, MarkerKind::Label { .. }));
        }
    }

    #[test]
    fn test_popup_marker_tooltip() {
        let records = sample_records();
        let map = BattleMap::from_records(&records, MapView::default());

        match &map.markers()[0].kind {
            MarkerKind::Popup {
                popup_html,
                tooltip,
            } => {
                assert_eq!(tooltip, "Battle of Stalingrad (1942)");
                assert!(popup_html.contains("Soviet Union"));
                assert!(popup_html.contains("Germany<br>Romania"));
            }
            other => panic!("expected popup marker, got {other:?}"),
        }
    }

    #[test]
    fn test_tooltip_is_escaped() {
        let csv = "Battle Name,Date,Latitude,Longitude\n<b>Acre</b> & co,1191-07-12,32.9,35.1\n";
        let records = read_battles(csv.as_bytes()).unwrap();
        let map = BattleMap::from_records(&records, MapView::default());

        match &map.markers()[0].kind {
            MarkerKind::Popup { tooltip, .. } => {
                assert_eq!(tooltip, "&lt;b&gt;Acre&lt;/b&gt; &amp; co (1191)");
            }
            other => panic!("expected popup marker, got {other:?}"),
        }
    }

    #[test]
    fn test_label_marker_caption() {
        let records = sample_records();
        let map = BattleMap::from_records(&records, MapView::default());

        assert_eq!(
            map.markers()[3].kind,
            MarkerKind::Label {
                html: "<div style=\"font-size: 12px; font-weight: bold;\">Battle of Hastings</div>"
                    .to_string()
            }
        );
    }

    #[test]
    fn test_default_view_is_fixed() {
        let records = sample_records();
        let map = BattleMap::from_records(&records, MapView::default());

        assert_eq!(map.view().center, (50.0, 10.0));
        assert_eq!(map.view().zoom, 3);
    }

    #[test]
    fn test_save_overwrites_file() {
        let path = std::env::temp_dir().join(format!(
            "battle-map-save-{}.html",
            std::process::id()
        ));
        std::fs::write(&path, "stale").unwrap();

        let map = BattleMap::from_records(&sample_records(), MapView::default());
        map.save(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, map.to_html());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let path = std::env::temp_dir()
            .join("battle-map-no-such-dir")
            .join("map.html");
        let map = BattleMap::new(MapView::default());

        assert!(matches!(map.save(&path), Err(MapError::Io { .. })));
    }
}
