use goodfirst_api::{Issue, RepositoryMetadata};
use serde::Serialize;

/// Placeholder for repository metadata we could not fetch
pub const UNKNOWN: &str = "-";

/// An issue joined with its repository's metadata and its score.
///
/// Serializes as the issue's own fields plus the repository columns, which is
/// the shape of the `--json` output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedIssue {
    #[serde(flatten)]
    pub issue: Issue,
    /// `owner/repo`, or `-` when the repository URL is unusable
    pub repo: String,
    pub language: String,
    pub stargazers_count: u32,
    pub full_name: String,
    pub description: String,
    pub score: u8,
}

impl EnrichedIssue {
    /// Missing metadata becomes `-` / `0`
    pub fn new(issue: Issue, metadata: Option<&RepositoryMetadata>, score: u8) -> Self {
        let repo = issue
            .repo_key()
            .map(|key| key.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string());

        let text = |value: Option<&String>| {
            value
                .filter(|v| !v.is_empty())
                .cloned()
                .unwrap_or_else(|| UNKNOWN.to_string())
        };

        Self {
            repo,
            language: text(metadata.and_then(|m| m.language.as_ref())),
            stargazers_count: metadata.map_or(0, |m| m.stargazers_count),
            full_name: text(metadata.map(|m| &m.full_name)),
            description: text(metadata.and_then(|m| m.description.as_ref())),
            score,
            issue,
        }
    }

    pub fn url(&self) -> &str {
        &self.issue.html_url
    }

    pub fn has_metadata(&self) -> bool {
        self.full_name != UNKNOWN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use goodfirst_api::IssueState;

    fn issue() -> Issue {
        let now = Utc::now();
        Issue {
            id: 9,
            title: "Add docs".into(),
            html_url: "https://github.com/octo/hello/issues/9".into(),
            labels: Vec::new(),
            created_at: now,
            updated_at: now,
            comments: 1,
            state: IssueState::Open,
            body: None,
            assignee: None,
            repository_url: "https://api.github.com/repos/octo/hello".into(),
            number: 9,
            pull_request: None,
        }
    }

    #[test]
    fn test_metadata_is_joined() {
        let metadata = RepositoryMetadata {
            stargazers_count: 1500,
            full_name: "octo/hello".into(),
            language: Some("Rust".into()),
            description: Some("Says hello".into()),
        };

        let enriched = EnrichedIssue::new(issue(), Some(&metadata), 88);

        assert_eq!(enriched.repo, "octo/hello");
        assert_eq!(enriched.language, "Rust");
        assert_eq!(enriched.stargazers_count, 1500);
        assert_eq!(enriched.description, "Says hello");
        assert_eq!(enriched.score, 88);
        assert!(enriched.has_metadata());
    }

    #[test]
    fn test_missing_metadata_uses_sentinels() {
        let enriched = EnrichedIssue::new(issue(), None, 40);

        assert_eq!(enriched.repo, "octo/hello");
        assert_eq!(enriched.language, UNKNOWN);
        assert_eq!(enriched.stargazers_count, 0);
        assert_eq!(enriched.full_name, UNKNOWN);
        assert_eq!(enriched.description, UNKNOWN);
        assert!(!enriched.has_metadata());
    }

    #[test]
    fn test_null_language_uses_sentinel() {
        let metadata = RepositoryMetadata {
            stargazers_count: 3,
            full_name: "octo/hello".into(),
            language: None,
            description: None,
        };

        let enriched = EnrichedIssue::new(issue(), Some(&metadata), 40);
        assert_eq!(enriched.language, UNKNOWN);
        assert_eq!(enriched.stargazers_count, 3);
    }

    #[test]
    fn test_json_shape_is_flat() {
        let enriched = EnrichedIssue::new(issue(), None, 40);
        let value = serde_json::to_value(&enriched).unwrap();

        assert_eq!(value["number"], 9);
        assert_eq!(value["html_url"], "https://github.com/octo/hello/issues/9");
        assert_eq!(value["language"], "-");
        assert_eq!(value["stargazers_count"], 0);
        assert_eq!(value["score"], 40);
        assert!(value.get("issue").is_none());
    }
}
