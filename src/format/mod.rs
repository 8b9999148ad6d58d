//! Record formatting
//!
//! Pure helpers turning raw battle fields into display text. None of them
//! fail: values that do not have the expected shape are passed through as-is
//! so a malformed cell only affects how that cell looks.

mod factions;
mod popup;

pub use factions::{Factions, ListParseError, format_factions, parse_faction_list};
pub use popup::{PopupContent, SideSummary};

use crate::data::{BattleRecord, Count};

/// Label appended to participant counts
pub const DEFAULT_LABEL: &str = "participants";

/// Escape text for interpolation into HTML content or attribute values
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Rewrite `YYYY-MM-DD` as `MM-DD-YYYY`. Anything that does not split into
/// exactly three dash-separated parts is returned unchanged.
pub fn format_date(date: &str) -> String {
    let parts: Vec<&str> = date.split('-').collect();
    match parts.as_slice() {
        [year, month, day] => format!("{month}-{day}-{year}"),
        _ => date.to_string(),
    }
}

/// The year shown in marker tooltips.
///
/// This is the year component of a `Y-M-D` date, not the first four
/// characters of the reformatted `MM-DD-YYYY` text, which would show the
/// month and day (`07-0`). Dates in any other form keep their first four
/// characters.
pub fn year_of(date: &str) -> String {
    let parts: Vec<&str> = date.split('-').collect();
    match parts.as_slice() {
        [year, _, _] => year.to_string(),
        _ => date.chars().take(4).collect(),
    }
}

/// Render an integer with thousands separators followed by `label`
pub fn format_number(number: i64, label: &str) -> String {
    let digits = number.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if number < 0 {
        grouped.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{grouped} {label}")
}

/// Render a count with [`DEFAULT_LABEL`], keeping unparsed text as written
pub fn format_count(count: &Count) -> String {
    match count {
        Count::Known(value) => format_number(*value, DEFAULT_LABEL),
        Count::Raw(raw) if raw.is_empty() => format!("unknown {DEFAULT_LABEL}"),
        Count::Raw(raw) => format!("{raw} {DEFAULT_LABEL}"),
    }
}

/// Short hover text: battle name and year
pub fn tooltip_text(record: &BattleRecord) -> String {
    format!("{} ({})", record.name, year_of(&record.date))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_reorders_parts() {
        assert_eq!(format_date("1863-07-01"), "07-01-1863");
        assert_eq!(format_date("0480-09-11"), "09-11-0480");
    }

    #[test]
    fn test_format_date_passthrough() {
        assert_eq!(format_date("Battle of X"), "Battle of X");
        assert_eq!(format_date("1863-07"), "1863-07");
        assert_eq!(format_date("1863-07-01-02"), "1863-07-01-02");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn test_year_of() {
        assert_eq!(year_of("1815-06-18"), "1815");
        assert_eq!(year_of("216 BC"), "216 ");
        assert_eq!(year_of("Summer"), "Summ");
    }

    #[test]
    fn test_format_number_grouping() {
        assert_eq!(format_number(12345, DEFAULT_LABEL), "12,345 participants");
        assert_eq!(format_number(0, DEFAULT_LABEL), "0 participants");
        assert_eq!(format_number(999, "men"), "999 men");
        assert_eq!(format_number(1000, "men"), "1,000 men");
        assert_eq!(format_number(1234567, "men"), "1,234,567 men");
        assert_eq!(format_number(-45000, "casualties"), "-45,000 casualties");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(&Count::Known(93921)), "93,921 participants");
        assert_eq!(
            format_count(&Count::Raw("~20000".to_string())),
            "~20000 participants"
        );
        assert_eq!(
            format_count(&Count::Raw(String::new())),
            "unknown participants"
        );
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<img src="x" onerror='y'> & more"#),
            "&lt;img src=&quot;x&quot; onerror=&#39;y&#39;&gt; &amp; more"
        );
        assert_eq!(escape_html("Austerlitz"), "Austerlitz");
    }

    #[test]
    fn test_tooltip_uses_year() {
        let csv = "Battle Name,Date,Latitude,Longitude\nAusterlitz,1805-12-02,49.13,16.76\n";
        let records = crate::data::read_battles(csv.as_bytes()).unwrap();
        assert_eq!(tooltip_text(&records[0]), "Austerlitz (1805)");
    }
}
