// Utility helpers for field coercion and calendar lookups.
//
// This module centralizes the "dirty" date/time/text handling so the rest of
// the code can assume clean, typed values. All coercion functions are total:
// malformed input yields `None`, never an error.
use chrono::{NaiveDate, NaiveDateTime};
use num_format::{Locale, ToFormattedString};

/// Month names in fixed calendar order.
///
/// Kept as an ordered array (not a map) so "previous month" and
/// "chronological max" computations can index into it directly.
pub const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Name of a 1-based calendar month, or `None` when out of range.
pub fn month_name(month: u32) -> Option<&'static str> {
    MONTHS.get((month as usize).checked_sub(1)?).copied()
}

/// 1-based calendar position of a month name, or `None` for unknown names.
/// Matching ignores case so console input like `"maret"` still resolves.
pub fn month_index(name: &str) -> Option<u32> {
    MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(name.trim()))
        .map(|i| i as u32 + 1)
}

// Accepted date layouts, tried in order. Slashed dates are day-first, which
// is how the incident logs are filled in.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%d/%m/%Y %H:%M:%S"];

/// Parse a date field into a calendar date while being forgiving about the
/// layout variations that show up in exported incident logs.
///
/// - Accepts `Option<&str>` so callers can pass through optional fields.
/// - Trims whitespace.
/// - Tries each known date layout, then the datetime layouts (date part kept).
/// - Returns `None` for anything that cannot be safely parsed.
pub fn parse_date_safe(s: Option<&str>) -> Option<NaiveDate> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// Extract the hour (0–23) from a time-of-day string like `"14:35"`.
///
/// The literal `"00:00"` is treated as "no start time recorded" rather than
/// a real midnight event; the intake sheet uses it as a filler value. Empty,
/// missing, non-numeric, and out-of-range input all coerce to `None`.
pub fn parse_hour_safe(s: Option<&str>) -> Option<u32> {
    let s = s?.trim();
    if s.is_empty() || s == "00:00" {
        return None;
    }
    let hour_part = s.split(':').next()?.trim();
    match hour_part.parse::<u32>() {
        Ok(h) if h <= 23 => Some(h),
        _ => None,
    }
}

/// Trim surrounding whitespace and uppercase a location name.
///
/// No further canonicalization: `"LAB 1"` and `"LAB1"` stay distinct groups.
pub fn normalize_location(s: &str) -> String {
    s.trim().to_uppercase()
}

/// True when a text cell is effectively missing: blank after trimming, or the
/// `"nan"` sentinel a stringified spreadsheet export produces for null cells.
pub fn is_missing_text(s: &str) -> bool {
    let t = s.trim();
    t.is_empty() || t.eq_ignore_ascii_case("nan")
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Thin wrapper around `num-format` for integer-like values, used for
    // counts in console messages (e.g., `1,240 rows loaded`).
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_date_layouts() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(parse_date_safe(Some("2024-03-05")), Some(expected));
        assert_eq!(parse_date_safe(Some("05/03/2024")), Some(expected));
        assert_eq!(parse_date_safe(Some("05-03-2024")), Some(expected));
        assert_eq!(parse_date_safe(Some("2024/03/05")), Some(expected));
        assert_eq!(parse_date_safe(Some(" 2024-03-05 ")), Some(expected));
        assert_eq!(parse_date_safe(Some("2024-03-05 08:15:00")), Some(expected));
    }

    #[test]
    fn rejects_malformed_dates() {
        assert_eq!(parse_date_safe(None), None);
        assert_eq!(parse_date_safe(Some("")), None);
        assert_eq!(parse_date_safe(Some("not a date")), None);
        assert_eq!(parse_date_safe(Some("2024-13-01")), None);
        assert_eq!(parse_date_safe(Some("32/01/2024")), None);
    }

    #[test]
    fn extracts_hour_from_time_string() {
        assert_eq!(parse_hour_safe(Some("14:35")), Some(14));
        assert_eq!(parse_hour_safe(Some("09:00")), Some(9));
        assert_eq!(parse_hour_safe(Some("23:59")), Some(23));
    }

    #[test]
    fn midnight_filler_means_no_time_recorded() {
        assert_eq!(parse_hour_safe(Some("00:00")), None);
        // A midnight-ish time that is not the exact filler still counts.
        assert_eq!(parse_hour_safe(Some("0:00")), Some(0));
    }

    #[test]
    fn malformed_time_is_absent() {
        assert_eq!(parse_hour_safe(None), None);
        assert_eq!(parse_hour_safe(Some("")), None);
        assert_eq!(parse_hour_safe(Some("abc")), None);
        assert_eq!(parse_hour_safe(Some("25:00")), None);
        assert_eq!(parse_hour_safe(Some("-1:30")), None);
    }

    #[test]
    fn location_is_trimmed_and_uppercased() {
        assert_eq!(normalize_location("  lab komputer 1 "), "LAB KOMPUTER 1");
        assert_eq!(normalize_location("Ruang TU"), "RUANG TU");
    }

    #[test]
    fn month_table_is_calendar_ordered() {
        assert_eq!(month_name(1), Some("Januari"));
        assert_eq!(month_name(12), Some("Desember"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
        assert_eq!(month_index("Maret"), Some(3));
        assert_eq!(month_index("maret"), Some(3));
        assert_eq!(month_index(" DESEMBER "), Some(12));
        assert_eq!(month_index("March"), None);
    }

    #[test]
    fn missing_text_detection() {
        assert!(is_missing_text(""));
        assert!(is_missing_text("   "));
        assert!(is_missing_text("nan"));
        assert!(is_missing_text("NaN"));
        assert!(!is_missing_text("Ruang Guru"));
    }
}
