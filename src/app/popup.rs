//! Native rendering of a battle popup

use crate::format::{PopupContent, SideSummary};
use std::path::Path;

/// Flag images are drawn at the same size as in the HTML popup
const FLAG_SIZE: egui::Vec2 = egui::vec2(50.0, 30.0);

/// Show the popup of the selected battle. Clears `selected` when closed.
///
/// Relative flag paths are resolved against `base_dir`, the directory of the
/// generated document.
pub fn popup_window(
    ctx: &egui::Context,
    popups: &[PopupContent],
    selected: &mut Option<usize>,
    base_dir: &Path,
) {
    let Some(index) = *selected else {
        return;
    };
    let Some(popup) = popups.get(index) else {
        *selected = None;
        return;
    };

    let mut open = true;
    egui::Window::new(popup.name.as_str())
        .id(egui::Id::new(("battle_popup", index)))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .max_width(450.0)
        .show(ctx, |ui| popup_body(ui, popup, base_dir));

    if !open {
        *selected = None;
    }
}

fn popup_body(ui: &mut egui::Ui, popup: &PopupContent, base_dir: &Path) {
    ui.heading(popup.title());
    ui.separator();

    egui::Grid::new("battle_popup_grid")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            ui.strong("Location:");
            ui.label(popup.location.as_str());
            ui.end_row();

            ui.strong("Total Participants:");
            ui.label(popup.total.as_str());
            ui.end_row();

            side_row(ui, "Side A Participants:", &popup.side_a);
            side_row(ui, "Side B Participants:", &popup.side_b);

            ui.strong("Flags/Markings:");
            ui.horizontal(|ui| {
                flag_image(ui, "Flag A", &popup.side_a.flag, base_dir);
                flag_image(ui, "Flag B", &popup.side_b.flag, base_dir);
            });
            ui.end_row();
        });
}

fn side_row(ui: &mut egui::Ui, label: &str, side: &SideSummary) {
    ui.strong(label);
    ui.vertical(|ui| {
        ui.label(side.participants.as_str());
        let factions = side.factions.to_text();
        if !factions.is_empty() {
            ui.weak(factions);
        }
    });
    ui.end_row();
}

/// Image URI for a flag cell, `None` when the cell is empty
fn flag_uri(flag: &str, base_dir: &Path) -> Option<String> {
    let flag = flag.trim();
    if flag.is_empty() {
        None
    } else if flag.contains("://") || flag.starts_with("data:") {
        Some(flag.to_string())
    } else {
        Some(format!("file://{}", base_dir.join(flag).display()))
    }
}

fn flag_image(ui: &mut egui::Ui, label: &str, flag: &str, base_dir: &Path) {
    match flag_uri(flag, base_dir) {
        Some(uri) => {
            ui.add(egui::Image::new(uri).fit_to_exact_size(FLAG_SIZE))
                .on_hover_text(format!("{label}: {flag}"));
        }
        None => {
            ui.weak(format!("{label}: none"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_uri_empty() {
        assert_eq!(flag_uri("", Path::new("/maps")), None);
        assert_eq!(flag_uri("   ", Path::new("/maps")), None);
    }

    #[test]
    fn test_flag_uri_keeps_urls() {
        let base = Path::new("/maps");
        assert_eq!(
            flag_uri("https://example.org/flags/fr.png", base).as_deref(),
            Some("https://example.org/flags/fr.png")
        );
        assert_eq!(
            flag_uri("file:///srv/flags/uk.png", base).as_deref(),
            Some("file:///srv/flags/uk.png")
        );
        assert_eq!(
            flag_uri("data:image/png;base64,AAAA", base).as_deref(),
            Some("data:image/png;base64,AAAA")
        );
    }

    #[test]
    fn test_flag_uri_resolves_relative_paths() {
        let base = Path::new("maps");
        let expected = format!("file://{}", base.join("flags/uk.png").display());
        assert_eq!(flag_uri("flags/uk.png", base), Some(expected));
    }
}
