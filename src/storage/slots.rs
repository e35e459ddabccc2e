//! Encoding of the two persisted slots. Both are JSON arrays, one record per element.

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::error::Result;

use super::key_value::KeyValueStore;

pub const REASONS_KEY: &str = "reasons";
pub const ENTRIES_KEY: &str = "entries";

pub fn encode<T: Serialize>(records: &[T]) -> Result<Vec<u8>> {
    // Reported as a storage failure. Decode is reserved for reading.
    Ok(serde_json::to_vec(records).map_err(std::io::Error::from)?)
}

pub fn decode<T: DeserializeOwned>(data: &[u8]) -> Result<Vec<T>> {
    Ok(serde_json::from_slice(data)?)
}

/// Reads a slot, treating anything unreadable as absent. Used during start-up where a broken
/// slot must not prevent the application from working.
pub fn load_or_none<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<Vec<T>> {
    let data = match store.get(key) {
        Ok(Some(data)) => data,
        Ok(None) => {
            debug!("Slot {key} is empty");
            return None;
        }
        Err(e) => {
            warn!("Failed to read slot {key}: {e}");
            return None;
        }
    };

    match decode(&data) {
        Ok(records) => Some(records),
        Err(e) => {
            warn!("Slot {key} is corrupted, ignoring it: {e}");
            None
        }
    }
}

pub fn save<T: Serialize>(store: &mut impl KeyValueStore, key: &str, records: &[T]) -> Result<()> {
    let data = encode(records)?;
    store.set(key, &data)?;
    debug!("Saved {} records into {key}", records.len());
    Ok(())
}
