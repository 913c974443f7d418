// GitHub API client: wire models, query building and error classification
pub mod error;
pub mod github;
pub mod models;
pub mod query;

// Re-export common types
pub use error::ApiError;
pub use github::{GitHubClient, DEFAULT_TIMEOUT, GITHUB_API_BASE};
pub use models::{
    Assignee, Issue, IssueState, Label, PullRequestRef, RepoKey, RepositoryMetadata, SearchPage,
};
pub use query::{build_query_string, build_search_query, IssueKind, SearchParams, SortKey, SortOrder};
