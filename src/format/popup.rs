//! Popup content shown when a battle marker is activated.
//!
//! The same content backs the HTML popup in the generated document and the
//! native popup window in the viewer.

use super::{Factions, escape_html, format_count, format_date};
use crate::data::{BattleRecord, Side};

/// Display-ready summary of one side of a battle
#[derive(Clone, Debug, PartialEq)]
pub struct SideSummary {
    /// Formatted count, e.g. `93,921 participants`
    pub participants: String,
    pub factions: Factions,
    /// Flag image URL or path
    pub flag: String,
}

impl SideSummary {
    fn from_side(side: &Side) -> Self {
        Self {
            participants: format_count(&side.participants),
            factions: Factions::from_raw(&side.factions),
            flag: side.flag.clone(),
        }
    }

    fn to_html(&self, label: &str) -> String {
        format!(
            "<p><b>{label} Participants:</b> {} ({})</p>",
            escape_html(&self.participants),
            self.factions.to_html()
        )
    }
}

/// Display-ready popup for one battle
#[derive(Clone, Debug, PartialEq)]
pub struct PopupContent {
    pub name: String,
    /// Date as `MM-DD-YYYY` when the source was `YYYY-MM-DD`
    pub date: String,
    pub location: String,
    pub total: String,
    pub side_a: SideSummary,
    pub side_b: SideSummary,
}

impl PopupContent {
    pub fn from_record(record: &BattleRecord) -> Self {
        Self {
            name: record.name.clone(),
            date: format_date(&record.date),
            location: record.location.clone(),
            total: format_count(&record.total_participants),
            side_a: SideSummary::from_side(&record.side_a),
            side_b: SideSummary::from_side(&record.side_b),
        }
    }

    /// Heading text: name followed by the formatted date
    pub fn title(&self) -> String {
        format!("{} ({})", self.name, self.date)
    }

    /// HTML fragment with every field escaped
    pub fn to_html(&self) -> String {
        format!(
            concat!(
                "<h4>{title}</h4>\n",
                "<p><b>Location:</b> {location}</p>\n",
                "<p><b>Total Participants:</b> {total}</p>\n",
                "{side_a}\n",
                "{side_b}\n",
                "<p><b>Flags/Markings:</b><br>\n",
                "<img src=\"{flag_a}\" alt=\"Flag A\" width=\"50\" height=\"30\">\n",
                "<img src=\"{flag_b}\" alt=\"Flag B\" width=\"50\" height=\"30\">\n",
                "</p>"
            ),
            title = escape_html(&self.title()),
            location = escape_html(&self.location),
            total = escape_html(&self.total),
            side_a = self.side_a.to_html("Side A"),
            side_b = self.side_b.to_html("Side B"),
            flag_a = escape_html(&self.side_a.flag),
            flag_b = escape_html(&self.side_b.flag),
        )
    }
}
