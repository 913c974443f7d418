use thiserror::Error;

/// Why `open <n>` could not produce a URL
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("No search results found. Run a search first with: good-first-issue find")]
    Missing,

    #[error("Search results file is corrupted. Run a search first with: good-first-issue find")]
    Corrupt,

    #[error("Invalid issue number: {0}. Must be a positive number (e.g., good-first-issue open 1)")]
    InvalidIndex(i64),

    #[error(
        "Issue #{index} is out of range. Your last search returned {count} result{} (1-{count})",
        plural(.count)
    )]
    OutOfRange { index: i64, count: usize },

    #[error("Could not access search results: {0}")]
    Io(#[from] std::io::Error),
}

fn plural(count: &usize) -> &'static str {
    if *count == 1 {
        ""
    } else {
        "s"
    }
}
