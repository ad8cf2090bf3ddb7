//! Dutch (nl-NL) date labels.

use chrono::{Datelike, NaiveDate};

/// Short weekday names, indexed by days from Sunday.
const WEEKDAYS_NL: [&str; 7] = ["zo", "ma", "di", "wo", "do", "vr", "za"];

const MONTHS_NL: [&str; 12] = [
    "jan", "feb", "mrt", "apr", "mei", "jun", "jul", "aug", "sep", "okt", "nov", "dec",
];

/// Parse an ISO `YYYY-MM-DD` date. A trailing time part is ignored.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        raw.get(..10)
            .filter(|_| raw[10..].starts_with(['T', ' ']))
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
    })
}

pub fn short_weekday(date: NaiveDate) -> &'static str {
    WEEKDAYS_NL[date.weekday().num_days_from_sunday() as usize]
}

pub fn short_month(date: NaiveDate) -> &'static str {
    MONTHS_NL[date.month0() as usize]
}

/// Label like "di 19 aug".
pub fn date_label(date: NaiveDate) -> String {
    format!("{} {} {}", short_weekday(date), date.day(), short_month(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_iso_date("2025-08-19"), Some(date(2025, 8, 19)));
        assert_eq!(parse_iso_date(" 2025-08-19 "), Some(date(2025, 8, 19)));
        assert_eq!(parse_iso_date("2025-08-19T06:00:00Z"), Some(date(2025, 8, 19)));
        assert_eq!(parse_iso_date("19-08-2025"), None);
        assert_eq!(parse_iso_date("2025-02-30"), None);
        assert_eq!(parse_iso_date("dinsdag"), None);
        assert_eq!(parse_iso_date(""), None);
    }

    #[test]
    fn test_short_weekday() {
        assert_eq!(short_weekday(date(2025, 8, 17)), "zo");
        assert_eq!(short_weekday(date(2025, 8, 18)), "ma");
        assert_eq!(short_weekday(date(2025, 8, 23)), "za");
    }

    #[test]
    fn test_date_label() {
        assert_eq!(date_label(date(2025, 8, 19)), "di 19 aug");
        assert_eq!(date_label(date(2025, 3, 1)), "za 1 mrt");
        assert_eq!(date_label(date(2025, 10, 5)), "zo 5 okt");
    }
}
