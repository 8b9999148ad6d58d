//! Battle record types

use serde::Deserialize;

/// One row of the battle table, as read from the CSV file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawRow {
    #[serde(rename = "Battle Name")]
    name: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Location")]
    location: String,
    #[serde(rename = "Total Participants")]
    total_participants: String,
    #[serde(rename = "Side A Participants")]
    side_a_participants: String,
    #[serde(rename = "Side B Participants")]
    side_b_participants: String,
    #[serde(rename = "Side A Factions")]
    side_a_factions: String,
    #[serde(rename = "Side B Factions")]
    side_b_factions: String,
    #[serde(rename = "Flags/Markings Side A")]
    side_a_flag: String,
    #[serde(rename = "Flags/Markings Side B")]
    side_b_flag: String,
    #[serde(rename = "Latitude")]
    latitude: String,
    #[serde(rename = "Longitude")]
    longitude: String,
}

/// A participant count: parsed when possible, otherwise kept verbatim
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Count {
    Known(i64),
    Raw(String),
}

impl Count {
    /// Parse a count cell. Accepts plain integers, grouped integers (`12,345`)
    /// and integral floats (`12345.0`).
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let digits: String = trimmed.chars().filter(|c| *c != ',').collect();

        if let Ok(value) = digits.parse::<i64>() {
            return Self::Known(value);
        }
        if let Ok(value) = digits.parse::<f64>()
            && value.is_finite()
            && value.fract() == 0.0
            && value.abs() < i64::MAX as f64
        {
            return Self::Known(value as i64);
        }

        Self::Raw(trimmed.to_string())
    }
}

/// One of the two opposing sides of a battle
#[derive(Clone, Debug, PartialEq)]
pub struct Side {
    pub participants: Count,
    /// Serialized list of faction names, e.g. `['Union', 'Confederacy']`
    pub factions: String,
    /// Flag image URL or path
    pub flag: String,
}

/// A single historical battle with its location and participants
#[derive(Clone, Debug, PartialEq)]
pub struct BattleRecord {
    pub name: String,
    /// Expected as `YYYY-MM-DD`, not validated
    pub date: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub total_participants: Count,
    pub side_a: Side,
    pub side_b: Side,
}

impl BattleRecord {
    /// Build a record from a raw row, or `None` if the coordinates are unusable
    pub(crate) fn from_raw(row: RawRow) -> Option<Self> {
        let latitude = parse_coordinate(&row.latitude)?;
        let longitude = parse_coordinate(&row.longitude)?;

        Some(Self {
            name: row.name,
            date: row.date,
            location: row.location,
            latitude,
            longitude,
            total_participants: Count::parse(&row.total_participants),
            side_a: Side {
                participants: Count::parse(&row.side_a_participants),
                factions: row.side_a_factions,
                flag: row.side_a_flag,
            },
            side_b: Side {
                participants: Count::parse(&row.side_b_participants),
                factions: row.side_b_factions,
                flag: row.side_b_flag,
            },
        })
    }

    /// Coordinates as `(latitude, longitude)`
    pub fn position(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}
