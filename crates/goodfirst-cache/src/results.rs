use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{CacheError, Result};

/// File name inside the system temp directory
pub const RESULTS_FILE: &str = "good-first-issues-results.json";

/// The URLs of the last search, in display order.
///
/// Stored as a plain JSON array of strings and overwritten wholesale by
/// every successful search.
#[derive(Debug, Clone)]
pub struct ResultsCache {
    path: PathBuf,
}

impl ResultsCache {
    pub fn new() -> Self {
        Self::at(Self::default_path())
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> PathBuf {
        std::env::temp_dir().join(RESULTS_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, urls: &[String]) -> Result<()> {
        debug!("Writing {} results to {}", urls.len(), self.path.display());
        let contents = serde_json::to_string(urls).map_err(|_| CacheError::Corrupt)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }

    pub fn load(&self) -> Result<Vec<String>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(CacheError::Missing),
            Err(e) => return Err(e.into()),
        };

        let urls: Vec<String> = serde_json::from_str(&contents).map_err(|e| {
            debug!("Unreadable results file {}: {}", self.path.display(), e);
            CacheError::Corrupt
        })?;

        debug!("Loaded {} cached results", urls.len());
        Ok(urls)
    }

    /// The URL shown as `#index` in the last search
    pub fn pick(&self, index: i64) -> Result<String> {
        select(&self.load()?, index)
    }
}

impl Default for ResultsCache {
    fn default() -> Self {
        Self::new()
    }
}

/// 1-based lookup with the user-facing range checks
pub fn select(urls: &[String], index: i64) -> Result<String> {
    if index <= 0 {
        return Err(CacheError::InvalidIndex(index));
    }

    usize::try_from(index)
        .ok()
        .and_then(|i| urls.get(i - 1))
        .cloned()
        .ok_or(CacheError::OutOfRange {
            index,
            count: urls.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(n: usize) -> Vec<String> {
        (1..=n)
            .map(|i| format!("https://github.com/octo/hello/issues/{}", i))
            .collect()
    }

    #[test]
    fn test_save_then_pick() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResultsCache::at(dir.path().join(RESULTS_FILE));

        cache.save(&urls(3)).unwrap();

        assert_eq!(
            cache.pick(2).unwrap(),
            "https://github.com/octo/hello/issues/2"
        );
    }

    #[test]
    fn test_save_overwrites_previous_results() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResultsCache::at(dir.path().join(RESULTS_FILE));

        cache.save(&urls(5)).unwrap();
        cache.save(&urls(1)).unwrap();

        assert_eq!(cache.load().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResultsCache::at(dir.path().join("nothing.json"));

        let err = cache.pick(1).unwrap_err();
        assert!(matches!(err, CacheError::Missing));
        assert!(err.to_string().starts_with("No search results found."));
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(RESULTS_FILE);

        for contents in ["not json", "{\"a\": 1}", "[1, 2]"] {
            std::fs::write(&path, contents).unwrap();
            let err = ResultsCache::at(&path).pick(1).unwrap_err();
            assert!(matches!(err, CacheError::Corrupt), "{}", contents);
        }
    }

    #[test]
    fn test_non_positive_index() {
        let err = select(&urls(3), 0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid issue number: 0. Must be a positive number (e.g., good-first-issue open 1)"
        );
        assert!(matches!(select(&urls(3), -4), Err(CacheError::InvalidIndex(-4))));
    }

    #[test]
    fn test_out_of_range_message() {
        assert_eq!(
            select(&urls(3), 4).unwrap_err().to_string(),
            "Issue #4 is out of range. Your last search returned 3 results (1-3)"
        );
        assert_eq!(
            select(&urls(1), 9).unwrap_err().to_string(),
            "Issue #9 is out of range. Your last search returned 1 result (1-1)"
        );
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let all = urls(3);
        assert_eq!(select(&all, 1).unwrap(), all[0]);
        assert_eq!(select(&all, 3).unwrap(), all[2]);
    }
}
