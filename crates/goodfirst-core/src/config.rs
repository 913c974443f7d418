use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use goodfirst_api::GITHUB_API_BASE;
use tracing::debug;

/// Labels searched when the user does not replace them
pub const DEFAULT_LABELS: &[&str] = &[
    "good first issue",
    "help wanted",
    "beginner",
    "easy",
    "starter",
    "first-timers-only",
    "contributions welcome",
    "up-for-grabs",
];

/// Environment variable holding the GitHub token
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Largest page GitHub's search API serves
pub const MAX_PER_PAGE: u32 = 100;

/// Main configuration structure
///
/// Loaded from the config file, then env vars, then CLI args.
/// Priority: CLI > Env > File > Defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub github: GitHubConfig,
    pub search: SearchConfig,
}

impl Config {
    /// Load config from the default location, falling back to defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_in(dirs::config_dir())
    }

    /// No config directory at all (no HOME, say) means defaults
    pub fn load_in(config_dir: Option<PathBuf>) -> crate::Result<Self> {
        match config_dir {
            Some(dir) => Self::load_from(&Self::path_in(&dir)),
            None => {
                debug!("No config directory, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// A missing file is not an error
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> crate::Result<Self> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> crate::Result<()> {
        let per_page = self.search.per_page;
        if !(1..=MAX_PER_PAGE).contains(&per_page) {
            return Err(crate::Error::ConfigError(format!(
                "search.per_page must be between 1 and {}, got {}",
                MAX_PER_PAGE, per_page
            )));
        }
        Ok(())
    }

    /// Apply environment overrides, looked up through `lookup`
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(TOKEN_ENV).filter(|t| !t.trim().is_empty()) {
            self.github.token = Some(token);
        }
        self
    }

    /// Same as [`with_env`](Self::with_env) against the process environment
    pub fn with_process_env(self) -> Self {
        self.with_env(|key| std::env::var(key).ok())
    }

    /// `<config_dir>/good-first-issue/config.toml`
    fn path_in(config_dir: &Path) -> PathBuf {
        config_dir.join("good-first-issue").join("config.toml")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GitHubConfig {
    /// Personal access token; anonymous requests work with a lower rate limit
    pub token: Option<String>,

    /// API URL (for GitHub Enterprise)
    pub api_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl GitHubConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: GITHUB_API_BASE.to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    /// Beginner labels always searched for
    pub labels: Vec<String>,

    /// Results per page, 1-100
    pub per_page: u32,

    /// Cap on repository lookups in flight; unset means no cap
    pub max_concurrency: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            labels: DEFAULT_LABELS.iter().map(|l| l.to_string()).collect(),
            per_page: 30,
            max_concurrency: None,
        }
    }
}
