//! Battle Data Module
//!
//! Reads the battle table (CSV with a header row) into an ordered list of
//! [`BattleRecord`]s. Loading is all-or-nothing: an unreadable or malformed
//! file and a header without the geographic columns both abort the load before
//! any map is built.
//!
//! Only `Latitude` and `Longitude` are required. Every other column is read
//! best-effort and missing ones are left empty.

mod record;

pub use record::{BattleRecord, Count, Side};

use record::RawRow;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Columns that must be present in the header for the table to be usable
pub const REQUIRED_COLUMNS: [&str; 2] = ["Latitude", "Longitude"];

/// Error types for the data module
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("no columns to parse from file")]
    EmptyTable,

    #[error("missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },
}

/// The two fatal failure categories reported to the user
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// The file cannot be read or parsed as a table
    Load,
    /// The table lacks the required geographic columns
    Schema,
}

impl DataError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::MissingColumns { .. } => FailureKind::Schema,
            Self::Io { .. } | Self::Csv(_) | Self::EmptyTable => FailureKind::Load,
        }
    }

    /// Title of the error dialog shown before exiting
    pub fn dialog_title(&self) -> &'static str {
        match self.kind() {
            FailureKind::Load => "Error Loading CSV",
            FailureKind::Schema => "Missing Columns",
        }
    }

    /// Message of the error dialog shown before exiting
    pub fn user_message(&self) -> String {
        match self.kind() {
            FailureKind::Load => format!("Failed to load CSV file: {self}"),
            FailureKind::Schema => {
                "The CSV file does not contain 'Latitude' and 'Longitude' columns.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, DataError>;

/// Load all battles from a CSV file on disk
pub fn load_battles(path: impl AsRef<Path>) -> Result<Vec<BattleRecord>> {
    profiling::scope!("load_battles");

    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = read_battles(BufReader::new(file))?;
    tracing::info!("Loaded {} battles from {}", records.len(), path.display());
    Ok(records)
}

/// Read battles from any CSV source, in row order
pub fn read_battles<R: Read>(reader: R) -> Result<Vec<BattleRecord>> {
    let mut reader = csv::Reader::from_reader(reader);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(DataError::EmptyTable);
    }

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|header| header == **column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DataError::MissingColumns { missing });
    }

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<RawRow>().enumerate() {
        let row = row?;
        match BattleRecord::from_raw(row) {
            Some(record) => records.push(record),
            None => tracing::warn!(
                "Skipping row {}: missing or invalid coordinates",
                index + 1
            ),
        }
    }

    tracing::debug!("Parsed {} usable rows", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Battle Name,Date,Location,Total Participants,Side A Participants,Side B Participants,Side A Factions,Side B Factions,Flags/Markings Side A,Flags/Markings Side B,Latitude,Longitude";

    fn table(rows: &[&str]) -> String {
        let mut csv = String::from(HEADER);
        for row in rows {
            csv.push('\n');
            csv.push_str(row);
        }
        csv.push('\n');
        csv
    }

    #[test]
    fn test_read_full_row() {
        let csv = table(&[
            r#"Battle of Gettysburg,1863-07-01,"Gettysburg, Pennsylvania",165620,93921,71699,"['Union']","['Confederacy']",union.png,confederate.png,39.8110,-77.2250"#,
        ]);
        let records = read_battles(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.name, "Battle of Gettysburg");
        assert_eq!(record.date, "1863-07-01");
        assert_eq!(record.location, "Gettysburg, Pennsylvania");
        assert_eq!(record.total_participants, Count::Known(165620));
        assert_eq!(record.side_a.participants, Count::Known(93921));
        assert_eq!(record.side_b.factions, "['Confederacy']");
        assert_eq!(record.side_a.flag, "union.png");
        assert!((record.latitude - 39.811).abs() < 1e-9);
        assert!((record.longitude + 77.225).abs() < 1e-9);
    }

    #[test]
    fn test_rows_keep_input_order() {
        let csv = table(&[
            "First,1800-01-01,A,1,1,1,[],[],,,10,20",
            "Second,1801-01-01,B,2,1,1,[],[],,,11,21",
            "Third,1802-01-01,C,3,1,2,[],[],,,12,22",
        ]);
        let records = read_battles(csv.as_bytes()).unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["First", "Second", "Third"]);
    }

    #[test]
    fn test_only_coordinates_required() {
        let csv = "Latitude,Longitude\n48.85,2.35\n";
        let records = read_battles(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "");
        assert_eq!(records[0].total_participants, Count::Raw(String::new()));
    }

    #[test]
    fn test_missing_longitude_is_schema_failure() {
        let csv = "Battle Name,Latitude\nWaterloo,50.68\n";
        let err = read_battles(csv.as_bytes()).unwrap_err();

        assert_eq!(err.kind(), FailureKind::Schema);
        assert_eq!(err.dialog_title(), "Missing Columns");
        match err {
            DataError::MissingColumns { missing } => assert_eq!(missing, ["Longitude"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_both_coordinates() {
        let csv = "Battle Name,Date\nWaterloo,1815-06-18\n";
        match read_battles(csv.as_bytes()) {
            Err(DataError::MissingColumns { missing }) => {
                assert_eq!(missing, ["Latitude", "Longitude"])
            }
            other => panic!("expected missing columns, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_input_is_load_failure() {
        let err = read_battles("".as_bytes()).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Load);
        assert!(err.user_message().starts_with("Failed to load CSV file:"));
    }

    #[test]
    fn test_ragged_row_is_load_failure() {
        let csv = "Battle Name,Latitude,Longitude\nWaterloo,50.68,4.41,extra\n";
        let err = read_battles(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::Csv(_)));
        assert_eq!(err.dialog_title(), "Error Loading CSV");
    }

    #[test]
    fn test_rows_without_coordinates_are_skipped() {
        let csv = table(&[
            "Good,1800-01-01,A,1,1,1,[],[],,,10,20",
            "NoLat,1800-01-01,A,1,1,1,[],[],,,,20",
            "Garbage,1800-01-01,A,1,1,1,[],[],,,north,20",
        ]);
        let records = read_battles(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Good");
    }

    #[test]
    fn test_missing_file_is_load_failure() {
        let path = std::env::temp_dir().join("battle-map-does-not-exist.csv");
        let err = load_battles(&path).unwrap_err();

        assert!(matches!(err, DataError::Io { .. }));
        assert_eq!(err.kind(), FailureKind::Load);
    }
}
