// Terminal rendering of search results
pub mod format;
pub mod table;
pub mod width;

pub use format::{format_age, format_stars, AgeBand};
pub use table::TableRenderer;
pub use width::{display_width, pad_end, pad_start, slice_width, truncate};
