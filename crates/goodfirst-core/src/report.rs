// User-facing wording for API failures
use chrono::{DateTime, Utc};
use goodfirst_api::ApiError;

use crate::config::TOKEN_ENV;
use crate::Error;

/// Like [`describe_api_error`] for any pipeline error
pub fn describe_error(err: &Error, token_configured: bool, now: DateTime<Utc>) -> String {
    match err.as_api() {
        Some(api) => describe_api_error(api, token_configured, now),
        None => err.to_string(),
    }
}

/// One line (or two, for an anonymous rate limit) explaining `err` to the user
pub fn describe_api_error(err: &ApiError, token_configured: bool, now: DateTime<Utc>) -> String {
    match err {
        ApiError::RateLimit { reset_at } => {
            let minutes = minutes_until(*reset_at, now);
            let mut text = format!(
                "GitHub API rate limit exceeded. Resets in {} minute{}.",
                minutes,
                if minutes == 1 { "" } else { "s" }
            );
            if !token_configured {
                text.push_str(&format!(
                    "\nSet {} to raise the limit (https://github.com/settings/tokens).",
                    TOKEN_ENV
                ));
            }
            text
        }
        other => other.to_string(),
    }
}

/// Whole minutes until `reset_at`, rounded up; never negative
fn minutes_until(reset_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let seconds = (reset_at - now).num_seconds().max(0);
    (seconds + 59) / 60
}
