use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use goodfirst_api::{ApiError, Issue, RepositoryMetadata, SearchPage, SearchParams};
use tracing::info;

use crate::enrich::RepoEnricher;
use crate::models::EnrichedIssue;
use crate::scoring::IssueScorer;

/// Where issues and repository metadata come from.
///
/// `GitHubProvider` is the real one; tests swap in a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueProvider: Send + Sync {
    async fn search_issues(&self, params: &SearchParams) -> Result<SearchPage<Issue>, ApiError>;
    async fn get_repository(&self, owner: &str, name: &str)
        -> Result<RepositoryMetadata, ApiError>;
}

/// The discovery pipeline: search, enrich, score, rank
pub struct IssueFinder {
    provider: Arc<dyn IssueProvider>,
    enricher: RepoEnricher,
}

impl IssueFinder {
    pub fn new(provider: Arc<dyn IssueProvider>) -> Self {
        Self {
            enricher: RepoEnricher::new(Arc::clone(&provider)),
            provider,
        }
    }

    /// Cap the number of repository lookups in flight at once
    pub fn with_max_concurrency(mut self, limit: Option<usize>) -> Self {
        self.enricher = self.enricher.with_max_concurrency(limit);
        self
    }

    pub async fn find(&self, params: &SearchParams) -> crate::Result<Vec<EnrichedIssue>> {
        self.find_at(params, Utc::now()).await
    }

    /// Same as [`find`](Self::find) with an explicit clock for scoring.
    ///
    /// Only the search itself can fail, always with [`Error::Api`]. Repository
    /// lookups that fail leave their issues with placeholder metadata.
    ///
    /// [`Error::Api`]: crate::Error::Api
    pub async fn find_at(
        &self,
        params: &SearchParams,
        now: DateTime<Utc>,
    ) -> crate::Result<Vec<EnrichedIssue>> {
        let page = self.provider.search_issues(params).await?;
        info!(
            "Found {} issues ({} total matches)",
            page.items.len(),
            page.total_count
        );

        let repos = self.enricher.enrich(&page.items).await;

        let mut issues: Vec<EnrichedIssue> = page
            .items
            .into_iter()
            .map(|issue| {
                let metadata = issue.repo_key().and_then(|key| repos.get(&key));
                let score = IssueScorer::score(&issue, now);
                EnrichedIssue::new(issue, metadata, score)
            })
            .collect();

        // An explicit sort key means the caller wants GitHub's order
        if params.sort.is_none() {
            rank(&mut issues);
        }

        Ok(issues)
    }
}

/// Highest score first; ties keep their incoming order
pub fn rank(issues: &mut [EnrichedIssue]) {
    issues.sort_by(|a, b| b.score.cmp(&a.score));
}
