// Repository metadata lookups for a batch of issues
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use goodfirst_api::{Issue, RepoKey, RepositoryMetadata};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::outcome::settle;
use crate::search::IssueProvider;

/// Fetches metadata for every distinct repository behind a batch of issues.
///
/// Lookups run concurrently, one task per repository. A lookup that fails
/// (API error or panicking task) is logged and left out of the result; it
/// never fails the batch.
pub struct RepoEnricher {
    provider: Arc<dyn IssueProvider>,
    max_concurrency: Option<usize>,
}

impl RepoEnricher {
    pub fn new(provider: Arc<dyn IssueProvider>) -> Self {
        Self {
            provider,
            max_concurrency: None,
        }
    }

    /// `None` or `Some(0)` means no cap
    pub fn with_max_concurrency(mut self, limit: Option<usize>) -> Self {
        self.max_concurrency = limit.filter(|n| *n > 0);
        self
    }

    /// Returns once every lookup has settled
    pub async fn enrich(&self, issues: &[Issue]) -> HashMap<RepoKey, RepositoryMetadata> {
        let keys = unique_repo_keys(issues);
        if keys.is_empty() {
            return HashMap::new();
        }

        debug!(
            "Fetching details for {} repositories: {}",
            keys.len(),
            keys.iter()
                .map(RepoKey::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );

        let start = Instant::now();
        let gate = self.max_concurrency.map(|n| Arc::new(Semaphore::new(n)));
        let total = keys.len();

        let handles: Vec<_> = keys
            .into_iter()
            .map(|key| {
                let provider = Arc::clone(&self.provider);
                let gate = gate.clone();

                tokio::spawn(async move {
                    let _permit = match gate {
                        Some(gate) => gate.acquire_owned().await.ok(),
                        None => None,
                    };
                    let result = provider.get_repository(&key.owner, &key.name).await;
                    (key, result)
                })
            })
            .collect();

        let settled = join_all(handles.into_iter().map(settle)).await;

        let mut repos = HashMap::with_capacity(total);
        for outcome in settled {
            match outcome {
                Ok((key, Ok(metadata))) => {
                    repos.insert(key, metadata);
                }
                Ok((key, Err(err))) => debug!("No metadata for {}: {}", key, err),
                Err(failure) => warn!("Repository lookup task failed: {}", failure),
            }
        }

        debug!(
            "Repo details fetched in {}ms ({}/{} succeeded)",
            start.elapsed().as_millis(),
            repos.len(),
            total
        );

        repos
    }
}

/// Distinct repository keys in first-seen order
pub fn unique_repo_keys(issues: &[Issue]) -> Vec<RepoKey> {
    let mut seen = HashSet::new();
    issues
        .iter()
        .filter_map(Issue::repo_key)
        .filter(|key| seen.insert(key.clone()))
        .collect()
}
