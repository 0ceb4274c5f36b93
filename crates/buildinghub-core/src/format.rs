//! Display formatting: currency, relative times, dates, progress bars.

use chrono::{DateTime, NaiveDate, Utc};

/// Format an amount as Vietnamese đồng, e.g. `50.000.000 ₫`.
pub fn format_vnd(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped.push_str(" \u{20ab}");
    grouped
}

/// How long ago `then` was, relative to `now`, in Vietnamese.
///
/// Under an hour is shown in minutes, under a day in hours, otherwise in
/// days. Times in the future count as zero minutes ago.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes().max(0);
    if minutes < 60 {
        format!("{} phút trước", minutes)
    } else if minutes < 24 * 60 {
        format!("{} giờ trước", minutes / 60)
    } else {
        format!("{} ngày trước", minutes / (24 * 60))
    }
}

/// `dd/mm/yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// A fixed-width text progress bar.
pub fn progress_bar(percent: u8, width: usize) -> String {
    let filled = (usize::from(percent.min(100)) * width + 50) / 100;
    format!(
        "{}{}",
        "\u{2588}".repeat(filled),
        "\u{2591}".repeat(width - filled)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_format_vnd() {
        assert_eq!(format_vnd(0), "0 ₫");
        assert_eq!(format_vnd(999), "999 ₫");
        assert_eq!(format_vnd(1_000), "1.000 ₫");
        assert_eq!(format_vnd(500_000), "500.000 ₫");
        assert_eq!(format_vnd(50_000_000), "50.000.000 ₫");
    }

    #[test]
    fn test_relative_time_buckets() {
        let now = Utc.with_ymd_and_hms(2025, 12, 12, 12, 0, 0).unwrap();
        assert_eq!(relative_time(now - Duration::minutes(5), now), "5 phút trước");
        assert_eq!(relative_time(now - Duration::minutes(59), now), "59 phút trước");
        assert_eq!(relative_time(now - Duration::minutes(60), now), "1 giờ trước");
        assert_eq!(relative_time(now - Duration::hours(23), now), "23 giờ trước");
        assert_eq!(relative_time(now - Duration::hours(49), now), "2 ngày trước");
        assert_eq!(relative_time(now + Duration::hours(1), now), "0 phút trước");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date(date), "05/03/2024");
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 4), "░░░░");
        assert_eq!(progress_bar(50, 4), "██░░");
        assert_eq!(progress_bar(100, 4), "████");
        assert_eq!(progress_bar(200, 4), "████");
    }
}
