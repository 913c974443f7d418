use chrono::{DateTime, Utc};
use goodfirst_api::Issue;
use serde::{Deserialize, Serialize};

/// Upper bound of the combined score
pub const MAX_SCORE: u8 = 100;
/// Freshness points for an issue opened right now
pub const FRESHNESS_MAX: u8 = 60;
/// Freshness halves every this many days
pub const FRESHNESS_HALF_LIFE_DAYS: f64 = 90.0;
pub const ENGAGEMENT_POINTS: u8 = 25;
pub const QUALITY_POINTS: u8 = 15;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// The three parts of an issue's score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreBreakdown {
    /// 0-60, exponential decay on issue age
    pub freshness: u8,
    pub engagement: u8,
    pub quality: u8,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u8 {
        self.freshness
            .saturating_add(self.engagement)
            .saturating_add(self.quality)
            .min(MAX_SCORE)
    }
}

/// Scores issues for ranking
pub struct IssueScorer;

impl IssueScorer {
    pub fn score(issue: &Issue, now: DateTime<Utc>) -> u8 {
        Self::breakdown(issue, now).total()
    }

    pub fn breakdown(issue: &Issue, now: DateTime<Utc>) -> ScoreBreakdown {
        ScoreBreakdown {
            freshness: Self::freshness(issue.created_at, now),
            engagement: Self::engagement(issue),
            quality: Self::quality(issue),
        }
    }

    /// `min(60, round(60 * 2^(-age_days / 90)))`
    ///
    /// 0 days: 60, 7 days: ~57, 30 days: ~48, 90 days: 30, 180 days: 15,
    /// 365 days: ~4. Timestamps in the future count as age zero.
    pub fn freshness(created_at: DateTime<Utc>, now: DateTime<Utc>) -> u8 {
        let age_days = (now - created_at).num_milliseconds().max(0) as f64 / MILLIS_PER_DAY;
        let max = f64::from(FRESHNESS_MAX);
        let points = (max * 2f64.powf(-age_days / FRESHNESS_HALF_LIFE_DAYS)).round();

        points.clamp(0.0, max) as u8
    }

    // TODO: weigh comments and reactions once the search payload carries reaction counts
    fn engagement(_issue: &Issue) -> u8 {
        ENGAGEMENT_POINTS
    }

    fn quality(_issue: &Issue) -> u8 {
        QUALITY_POINTS
    }
}
