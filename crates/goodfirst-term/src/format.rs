// Cell formatting for star counts and issue ages
use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// `999`, `1.5k`, `12k`
pub fn format_stars(count: u32) -> String {
    let count = u64::from(count);
    if count >= 10_000 {
        format!("{}k", (count + 500) / 1000)
    } else if count >= 1000 {
        let tenths = (count + 50) / 100;
        format!("{}.{}k", tenths / 10, tenths % 10)
    } else {
        count.to_string()
    }
}

/// Largest whole unit of elapsed time, e.g. `3d ago`
pub fn format_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = elapsed_seconds(created_at, now);

    let (amount, unit) = if seconds < HOUR {
        (seconds / MINUTE, "m")
    } else if seconds < DAY {
        (seconds / HOUR, "h")
    } else if seconds < WEEK {
        (seconds / DAY, "d")
    } else if seconds < MONTH {
        (seconds / WEEK, "w")
    } else if seconds < YEAR {
        (seconds / MONTH, "mo")
    } else {
        (seconds / YEAR, "y")
    };

    format!("{}{} ago", amount, unit)
}

/// How stale an issue looks, which decides the age column's color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBand {
    /// Under a week
    Fresh,
    /// Under eight weeks
    Recent,
    Stale,
}

impl AgeBand {
    pub fn of(created_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let seconds = elapsed_seconds(created_at, now);
        if seconds < WEEK {
            AgeBand::Fresh
        } else if seconds < 8 * WEEK {
            AgeBand::Recent
        } else {
            AgeBand::Stale
        }
    }
}

fn elapsed_seconds(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - created_at).num_seconds().max(0)
}
