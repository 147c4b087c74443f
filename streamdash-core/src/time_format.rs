//! Relative "last activity" strings.
//!
//! Under a minute the count is exact (`"12 seconds ago"`); past that the
//! wording switches to coarse distance-in-words buckets.

use chrono::{DateTime, Datelike, Timelike, Utc};

const MINUTES_IN_DAY: i64 = 1_440;
const MINUTES_IN_ALMOST_TWO_DAYS: i64 = 2_520;
const MINUTES_IN_MONTH: i64 = 43_200;
const MINUTES_IN_TWO_MONTHS: i64 = 86_400;

/// Format `timestamp` relative to `now`. Future timestamps read as
/// `"just now"`.
pub fn format_relative(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(timestamp).num_seconds().max(0);
    match seconds {
        0 => "just now".to_string(),
        1 => "1 second ago".to_string(),
        2..=59 => format!("{seconds} seconds ago"),
        _ => format!("{} ago", distance_in_words(timestamp, now, seconds)),
    }
}

/// Integer division rounding half up. Both operands are non-negative here.
fn round_div(value: i64, divisor: i64) -> i64 {
    (value + divisor / 2) / divisor
}

fn count(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

fn distance_in_words(
    earlier: DateTime<Utc>,
    later: DateTime<Utc>,
    seconds: i64,
) -> String {
    let minutes = round_div(seconds, 60);

    if minutes < 45 {
        return count(minutes.max(1), "minute");
    }
    if minutes < 90 {
        return "about 1 hour".to_string();
    }
    if minutes < MINUTES_IN_DAY {
        return format!("about {}", count(round_div(minutes, 60), "hour"));
    }
    if minutes < MINUTES_IN_ALMOST_TWO_DAYS {
        return "1 day".to_string();
    }
    if minutes < MINUTES_IN_MONTH {
        return count(round_div(minutes, MINUTES_IN_DAY), "day");
    }
    if minutes < MINUTES_IN_TWO_MONTHS {
        return format!(
            "about {}",
            count(round_div(minutes, MINUTES_IN_MONTH), "month")
        );
    }

    let months = calendar_months_between(earlier, later);
    if months < 12 {
        return count(round_div(minutes, MINUTES_IN_MONTH), "month");
    }

    let years = months / 12;
    match months % 12 {
        0..=2 => format!("about {}", count(years, "year")),
        3..=8 => format!("over {}", count(years, "year")),
        _ => format!("almost {}", count(years + 1, "year")),
    }
}

/// Whole calendar months from `earlier` to `later`.
fn calendar_months_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    let mut months = i64::from(later.year() - earlier.year()) * 12
        + i64::from(later.month())
        - i64::from(earlier.month());

    let later_in_month = (later.day(), later.num_seconds_from_midnight());
    let earlier_in_month = (earlier.day(), earlier.num_seconds_from_midnight());
    if months > 0 && later_in_month < earlier_in_month {
        months -= 1;
    }
    months.max(0)
}
