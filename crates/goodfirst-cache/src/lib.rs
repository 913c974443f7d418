// Last search's result URLs, kept on disk so `open <n>` can find them
pub mod error;
pub mod results;

pub use error::CacheError;
pub use results::{select, ResultsCache, RESULTS_FILE};

pub type Result<T> = std::result::Result<T, CacheError>;
