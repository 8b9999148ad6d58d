//! Walkers plugin drawing the battle markers on the map view
//!
//! Each battle gets a pin with its name captioned next to it. Hovering a pin
//! shows the tooltip, clicking it reports the battle index back to the app.

use crate::data::BattleRecord;
use crate::format::tooltip_text;
use egui::{Align2, Color32, FontId, Stroke};
use std::sync::{Arc, RwLock};
use walkers::{Plugin, Position, Projector};

/// Pin radius in pixels
const PIN_RADIUS: f32 = 6.0;
/// Extra pointer distance still counted as a hit
const HIT_SLOP: f32 = 3.0;

/// Screen-independent data for one battle pin
pub struct Pin {
    pub position: Position,
    pub caption: String,
    pub tooltip: String,
}

impl Pin {
    pub fn from_record(record: &BattleRecord) -> Self {
        Self {
            position: walkers::lat_lon(record.latitude, record.longitude),
            caption: record.name.clone(),
            tooltip: tooltip_text(record),
        }
    }
}

/// Plugin for rendering battle pins and their captions
pub struct BattleMarkers {
    pins: Arc<Vec<Pin>>,
    /// Index of the pin clicked during this frame, if any
    clicked: Arc<RwLock<Option<usize>>>,
}

impl BattleMarkers {
    pub fn new(pins: Arc<Vec<Pin>>, clicked: Arc<RwLock<Option<usize>>>) -> Self {
        Self { pins, clicked }
    }
}

impl Plugin for BattleMarkers {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        response: &egui::Response,
        projector: &Projector,
        _map_memory: &walkers::MapMemory,
    ) {
        profiling::scope!("BattleMarkers::run");

        let painter = ui.painter();
        let pointer = response.hover_pos();
        let mut hovered = None;

        for (index, pin) in self.pins.iter().enumerate() {
            let screen = projector.project(pin.position).to_pos2();

            painter.circle_filled(screen, PIN_RADIUS, Color32::from_rgb(200, 40, 40));
            painter.circle_stroke(screen, PIN_RADIUS, Stroke::new(1.5, Color32::WHITE));
            painter.text(
                screen + egui::vec2(PIN_RADIUS + 4.0, 0.0),
                Align2::LEFT_CENTER,
                &pin.caption,
                FontId::proportional(12.0),
                Color32::BLACK,
            );

            // Later pins are drawn on top, so they win ties
            if let Some(pointer) = pointer
                && pointer.distance(screen) <= PIN_RADIUS + HIT_SLOP
            {
                hovered = Some(index);
            }
        }

        let Some(index) = hovered else {
            return;
        };

        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        let _ = response
            .clone()
            .on_hover_text_at_pointer(self.pins[index].tooltip.as_str());

        if response.clicked() {
            match self.clicked.write() {
                Ok(mut clicked) => *clicked = Some(index),
                Err(_) => tracing::warn!("Marker click state poisoned, ignoring click"),
            }
        }
    }
}
