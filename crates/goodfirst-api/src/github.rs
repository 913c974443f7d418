use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ApiError, Result};
use crate::models::{Issue, RepositoryMetadata, SearchPage};
use crate::query::{build_query_string, SearchParams};

pub const GITHUB_API_BASE: &str = "https://api.github.com";
pub const GITHUB_MEDIA_TYPE: &str = "application/vnd.github.v3+json";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// GitHub REST client for issue search and repository lookups.
///
/// Cheap to clone: the underlying connection pool is shared.
#[derive(Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    token: Option<String>,
    base_url: String,
}

impl GitHubClient {
    pub fn new(token: Option<String>) -> Result<Self> {
        Self::with_base_url(token, GITHUB_API_BASE.to_string(), DEFAULT_TIMEOUT)
    }

    /// For GitHub Enterprise, or a mock server in tests
    pub fn with_base_url(token: Option<String>, base_url: String, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("good-first-issue/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(ApiError::network)?;

        Ok(Self {
            client,
            token: token.filter(|t| !t.trim().is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// One page of `/search/issues`
    pub async fn search_issues(&self, params: &SearchParams) -> Result<SearchPage<Issue>> {
        let query = build_query_string(params);
        let url = if query.is_empty() {
            format!("{}/search/issues", self.base_url)
        } else {
            format!("{}/search/issues?{}", self.base_url, query)
        };

        let page: SearchPage<Issue> = self.get_json(&url).await?;
        debug!(
            "Search returned {} of {} issues{}",
            page.items.len(),
            page.total_count,
            if page.incomplete_results { " (incomplete)" } else { "" }
        );
        Ok(page)
    }

    /// Metadata for `owner/repo`
    pub async fn get_repository(&self, owner: &str, repo: &str) -> Result<RepositoryMetadata> {
        let url = format!(
            "{}/repos/{}/{}",
            self.base_url,
            urlencoding::encode(owner),
            urlencoding::encode(repo)
        );

        self.get_json(&url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET {}", url);

        let mut request = self.client.get(url);
        if let Some(ref token) = self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send().await.map_err(ApiError::network)?;
        let status = response.status();

        if !status.is_success() {
            let headers = response.headers().clone();
            let body = response.bytes().await.unwrap_or_default();
            let err = ApiError::classify(status, &headers, &body);
            debug!("GET {} failed with {}: {}", url, status, err);
            return Err(err);
        }

        response.json::<T>().await.map_err(ApiError::network)
    }
}

impl std::fmt::Debug for GitHubClient {
    // Never print the token
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}
