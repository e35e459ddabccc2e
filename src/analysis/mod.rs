//! Everything derived from the history: per reason counts for charts and the CSV export.

pub mod counts;
pub mod export;
pub mod period;
