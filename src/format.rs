//! Display formatting shared by the site and the back office.

use chrono::{DateTime, NaiveDate, Utc};

/// Render integer cents as a US dollar amount, e.g. `$1,234.56`.
pub fn price(cents: i64) -> String {
    let negative = cents < 0;
    let cents = cents.unsigned_abs();
    let dollars = cents / 100;
    let remainder = cents % 100;

    let mut whole = dollars.to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    while whole.len() > 3 {
        let split = whole.len() - 3;
        grouped.insert_str(0, &whole[split..]);
        grouped.insert(0, ',');
        whole.truncate(split);
    }
    grouped.insert_str(0, &whole);

    if negative {
        format!("-${}.{:02}", grouped, remainder)
    } else {
        format!("${}.{:02}", grouped, remainder)
    }
}

/// Render a date as `Jan 5, 2025`.
pub fn date(d: NaiveDate) -> String {
    d.format("%b %-d, %Y").to_string()
}

/// Render a timestamp as `Jan 5, 3:45 PM`.
pub fn datetime(dt: DateTime<Utc>) -> String {
    dt.format("%b %-d, %-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_price_basic() {
        assert_eq!(price(9900), "$99.00");
        assert_eq!(price(4999), "$49.99");
        assert_eq!(price(5), "$0.05");
        assert_eq!(price(0), "$0.00");
    }

    #[test]
    fn test_price_thousands_grouping() {
        assert_eq!(price(123_456), "$1,234.56");
        assert_eq!(price(1_245_000), "$12,450.00");
        assert_eq!(price(100_000_000), "$1,000,000.00");
    }

    #[test]
    fn test_price_negative() {
        assert_eq!(price(-4999), "-$49.99");
    }

    #[test]
    fn test_date() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(date(d), "Jan 5, 2025");
        let d = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(date(d), "Dec 31, 2024");
    }

    #[test]
    fn test_datetime() {
        let dt = Utc.with_ymd_and_hms(2025, 1, 5, 15, 45, 0).unwrap();
        assert_eq!(datetime(dt), "Jan 5, 3:45 PM");
        let dt = Utc.with_ymd_and_hms(2025, 6, 9, 0, 7, 0).unwrap();
        assert_eq!(datetime(dt), "Jun 9, 12:07 AM");
    }
}
