// Issue discovery pipeline: search, enrich, score, rank
pub mod config;
pub mod enrich;
pub mod error;
pub mod export;
pub mod language;
pub mod models;
pub mod outcome;
pub mod providers;
pub mod report;
pub mod scoring;
pub mod search;

pub use config::{Config, GitHubConfig, SearchConfig, DEFAULT_LABELS};
pub use enrich::{unique_repo_keys, RepoEnricher};
pub use error::Error;
pub use export::Exporter;
pub use language::{detect_from_names, detect_language};
pub use models::{EnrichedIssue, UNKNOWN};
pub use outcome::{settle, TaskFailure};
pub use providers::GitHubProvider;
pub use report::{describe_api_error, describe_error};
pub use scoring::{IssueScorer, ScoreBreakdown};
pub use search::{rank, IssueFinder, IssueProvider};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
