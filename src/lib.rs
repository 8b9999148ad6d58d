//! Battle Map - Application Library
//!
//! Loads historical battle records from a CSV table, formats them into popup
//! content, writes a standalone Leaflet map document and shows the same markers
//! in a desktop window.
//!
//! # Architecture
//!
//! - **[`data`]**: CSV loading into [`BattleRecord`]s with required column checks
//! - **[`format`]**: Pure formatting of dates, counts, faction lists and popups
//! - **[`map`]**: Marker placement and HTML document generation
//! - **`app`**: The eframe window showing the interactive map
//!
//! The library can be driven entirely in memory:
//!
//! ```rust
//! use battle_map::data::read_battles;
//! use battle_map::map::{BattleMap, MapView};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let csv = "Battle Name,Date,Latitude,Longitude\nGettysburg,1863-07-01,39.81,-77.23\n";
//! let records = read_battles(csv.as_bytes())?;
//! let document = BattleMap::from_records(&records, MapView::default()).to_html();
//! assert_eq!(document.matches("L.marker(").count(), 2);
//! # Ok(())
//! # }
//! ```

mod app;
pub mod data;
pub mod entrypoints;
pub mod format;
pub mod map;

pub use app::{BattleMapApp, Settings};
pub use data::BattleRecord;
