// GitHub provider implementation - bridges the API client with the IssueProvider trait
use async_trait::async_trait;
use goodfirst_api::{ApiError, GitHubClient, Issue, RepositoryMetadata, SearchPage, SearchParams};

use crate::{config::GitHubConfig, search::IssueProvider};

/// Wrapper around GitHubClient that implements IssueProvider
#[derive(Debug, Clone)]
pub struct GitHubProvider {
    client: GitHubClient,
}

impl GitHubProvider {
    pub fn new(client: GitHubClient) -> Self {
        Self { client }
    }

    /// Build the client from the `[github]` config section
    pub fn from_config(config: &GitHubConfig) -> Result<Self, ApiError> {
        let client = GitHubClient::with_base_url(
            config.token.clone(),
            config.api_url.clone(),
            config.timeout(),
        )?;
        Ok(Self::new(client))
    }

    pub fn has_token(&self) -> bool {
        self.client.has_token()
    }
}

#[async_trait]
impl IssueProvider for GitHubProvider {
    async fn search_issues(&self, params: &SearchParams) -> Result<SearchPage<Issue>, ApiError> {
        self.client.search_issues(params).await
    }

    async fn get_repository(&self, owner: &str, name: &str) -> Result<RepositoryMetadata, ApiError> {
        self.client.get_repository(owner, name).await
    }
}
