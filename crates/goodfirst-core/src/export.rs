use crate::{models::EnrichedIssue, Result};

/// Machine-readable output for `--json`
pub struct Exporter;

impl Exporter {
    /// Pretty-printed JSON array of the issues, in display order
    pub fn to_json(issues: &[EnrichedIssue]) -> Result<String> {
        serde_json::to_string_pretty(issues).map_err(Into::into)
    }

    /// The `html_url` of each issue, which `open <n>` indexes into
    pub fn urls(issues: &[EnrichedIssue]) -> Vec<String> {
        issues.iter().map(|i| i.url().to_string()).collect()
    }
}
