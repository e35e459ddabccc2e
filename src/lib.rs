//! Small journal of night wake-ups. Each wake-up is logged with the reasons behind it, the
//! history can be charted over a period of time or exported as CSV.
//!
//! [data::DataManager] is the entry point: it loads everything on creation and writes every
//! change back to a [storage::key_value::KeyValueStore].

pub mod analysis;
pub mod cli;
pub mod data;
pub mod error;
pub mod storage;
pub mod utils;
