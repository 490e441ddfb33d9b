// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lenient parsing of the date and time strings printed on receipts.
//!
//! Formats are tried in order and the first match wins, so ambiguous
//! slash dates such as `02/03/2024` resolve day-first.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};

const DATE_FORMATS: &[&str] = &[
    // Day-first with dots, the most common receipt layout.
    "%d.%m.%Y",
    "%d.%m.%y",
    "%d/%m/%Y",
    "%d/%m/%y",
    // Month-first, reached only when day-first is impossible.
    "%m/%d/%Y",
    "%m/%d/%y",
    "%Y-%m-%d",
    "%d-%m-%Y",
    "%d-%m-%y",
    "%m-%d-%Y",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%d %m %Y",
    "%d %m %y",
    "%Y %m %d",
    "%d_%m_%Y",
    "%d_%m_%y",
    "%Y_%m_%d",
    // %b accepts both abbreviated and full month names.
    "%d %b %Y",
    "%d %b %y",
    "%b %d %Y",
    "%b %d, %Y",
    "%b %d %y",
    "%d%m%Y",
    "%d%m%y",
    "%Y%m%d",
    "%y%m%d",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M %p",
];

const TIME_FORMATS: &[&str] = &[
    "%H:%M:%S",
    "%H:%M",
    "%H:%M:%S%.f",
    "%H.%M.%S",
    "%H.%M",
    "%H-%M-%S",
    "%H-%M",
    "%H %M %S",
    "%H %M",
    "%I:%M:%S %p",
    "%I:%M %p",
    "%I:%M:%S%p",
    "%I:%M%p",
    "%I:%M:%S%.f %p",
    "%H_%M_%S",
    "%H_%M",
];

/// Parses a receipt date, returning `None` when no known layout matches.
pub fn parse_receipt_date(raw: &str) -> Option<NaiveDate> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            // %Y reads one to four digits; a two-digit year belongs to %y.
            if format.contains("%Y") && date.year() < 1000 {
                continue;
            }
            return Some(date);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .filter_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .find(|dt| dt.year() >= 1000)
        .map(|dt| dt.date())
}

/// Parses a receipt time in 24-hour or 12-hour notation.
pub fn parse_receipt_time(raw: &str) -> Option<NaiveTime> {
    let text = normalize_meridiem(raw.trim());
    if text.is_empty() {
        return None;
    }
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(&text, format).ok())
}

/// Rewrites `p.m.` style markers to the `PM` form chrono understands.
fn normalize_meridiem(text: &str) -> String {
    let lower = text.to_lowercase();
    if lower.ends_with("a.m.") || lower.ends_with("p.m.") {
        let (head, tail) = text.split_at(text.len() - 4);
        let marker = if tail.to_lowercase().starts_with('a') { "AM" } else { "PM" };
        return format!("{head}{marker}");
    }
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn common_layouts_agree() {
        for raw in ["31.12.2024", "12/31/2024", "2024-12-31", "31/12/2024", "31.12.24"] {
            assert_eq!(parse_receipt_date(raw), Some(ymd(2024, 12, 31)), "{raw}");
        }
    }

    #[test]
    fn ambiguous_slash_date_is_day_first() {
        assert_eq!(parse_receipt_date("02/03/2024"), Some(ymd(2024, 3, 2)));
    }

    #[test]
    fn two_digit_dash_year_is_not_a_four_digit_year() {
        assert_eq!(parse_receipt_date("31-12-24"), Some(ymd(2024, 12, 31)));
    }

    #[test]
    fn month_names_and_compact_forms() {
        assert_eq!(parse_receipt_date("02 Jan 2006"), Some(ymd(2006, 1, 2)));
        assert_eq!(parse_receipt_date("2 January 2006"), Some(ymd(2006, 1, 2)));
        assert_eq!(parse_receipt_date("Jan 2, 2006"), Some(ymd(2006, 1, 2)));
        assert_eq!(parse_receipt_date("20241231"), Some(ymd(2024, 12, 31)));
        assert_eq!(parse_receipt_date("020106"), Some(ymd(2006, 1, 2)));
    }

    #[test]
    fn date_with_time_keeps_the_date() {
        assert_eq!(
            parse_receipt_date("2024-12-31T18:45:00"),
            Some(ymd(2024, 12, 31))
        );
        assert_eq!(
            parse_receipt_date("31.12.2024 18:45"),
            Some(ymd(2024, 12, 31))
        );
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(parse_receipt_date(""), None);
        assert_eq!(parse_receipt_date("yesterday"), None);
        assert_eq!(parse_receipt_date("45.45.2024"), None);
    }

    #[test]
    fn times_in_both_notations() {
        assert_eq!(parse_receipt_time("18:45:10"), Some(hms(18, 45, 10)));
        assert_eq!(parse_receipt_time("18:45"), Some(hms(18, 45, 0)));
        assert_eq!(parse_receipt_time("18.45"), Some(hms(18, 45, 0)));
        assert_eq!(parse_receipt_time("6:45 PM"), Some(hms(18, 45, 0)));
        assert_eq!(parse_receipt_time("6:45 p.m."), Some(hms(18, 45, 0)));
        assert_eq!(parse_receipt_time("6:45am"), Some(hms(6, 45, 0)));
        assert_eq!(parse_receipt_time("noon"), None);
    }
}
