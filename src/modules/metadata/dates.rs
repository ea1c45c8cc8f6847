//! Compact metadata dates (`YYYYMMDD`) to report dates (`MM/DD/YYYY`).

use chrono::NaiveDate;

const COMPACT_FORMAT: &str = "%Y%m%d";
const REPORT_FORMAT: &str = "%m/%d/%Y";

/// Parse an 8-digit `YYYYMMDD` date.
pub fn parse_compact_date(raw: &str) -> Result<NaiveDate, String> {
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("expected 8 digits, found '{}'", raw));
    }
    NaiveDate::parse_from_str(raw, COMPACT_FORMAT).map_err(|e| e.to_string())
}

/// Reformat a metadata date for the report.
///
/// Never fails: an unparseable input comes back as a sentence starting with
/// `Error:`, so the column is free text rather than a validated date.
pub fn normalize_date(raw: &str) -> String {
    match parse_compact_date(raw) {
        Ok(date) => date.format(REPORT_FORMAT).to_string(),
        Err(e) => format!(
            "Error: {}. Please ensure the input is in 'yyyymmdd' format.",
            e
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn looks_like_report_date(s: &str) -> bool {
        let b = s.as_bytes();
        b.len() == 10
            && b[2] == b'/'
            && b[5] == b'/'
            && b.iter()
                .enumerate()
                .all(|(i, c)| i == 2 || i == 5 || c.is_ascii_digit())
    }

    #[test]
    fn test_normalize_valid_date() {
        assert_eq!(normalize_date("20240115"), "01/15/2024");
        assert_eq!(normalize_date("19991231"), "12/31/1999");
        assert_eq!(normalize_date("20240229"), "02/29/2024");
    }

    #[test]
    fn test_invalid_month_is_described() {
        let out = normalize_date("20241332");
        assert!(out.starts_with("Error:"), "{}", out);
        assert!(out.contains("out of range"), "{}", out);
        assert!(!looks_like_report_date(&out));
    }

    #[test]
    fn test_malformed_inputs_never_look_like_dates() {
        for raw in [
            "", "2024011", "202401150", "2024-01-15", "abcdefgh", "20230229", "20240100",
            " 2024011",
        ] {
            let out = normalize_date(raw);
            assert!(out.starts_with("Error:"), "{:?} -> {}", raw, out);
            assert!(!looks_like_report_date(&out), "{:?} -> {}", raw, out);
        }
    }

    #[test]
    fn test_round_trip_preserves_calendar_date() {
        let mut date = NaiveDate::from_ymd_opt(1999, 12, 25).unwrap();
        let end = NaiveDate::from_ymd_opt(2001, 3, 5).unwrap();
        while date <= end {
            let compact = format!("{:04}{:02}{:02}", date.year(), date.month(), date.day());
            let normalized = normalize_date(&compact);
            let reparsed = NaiveDate::parse_from_str(&normalized, REPORT_FORMAT).unwrap();
            assert_eq!(reparsed, date);
            date = date.succ_opt().unwrap();
        }
    }
}
