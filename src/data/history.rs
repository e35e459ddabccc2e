use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    error::{Result, WakeLogError},
    storage::entities::{Entry, OTHER_REASON_ID},
};

use super::registry::ReasonRegistry;

/// Logged wake-ups, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryStore {
    entries: Vec<Entry>,
}

impl EntryStore {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn list(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Logs a wake-up at `timestamp` and puts it at the head of the history.
    ///
    /// Repeated ids are collapsed, `other_text` is dropped unless "Other" was selected. The
    /// current name of every selected reason known to `registry` is captured in the entry.
    pub fn create(
        &mut self,
        reason_ids: impl IntoIterator<Item = impl Into<String>>,
        other_text: Option<String>,
        registry: &ReasonRegistry,
        timestamp: DateTime<Utc>,
    ) -> Result<Entry> {
        let mut seen = BTreeSet::new();
        let reason_ids = reason_ids
            .into_iter()
            .map(|id| {
                let id: String = id.into();
                id.trim().to_string()
            })
            .filter(|id| !id.is_empty() && seen.insert(id.clone()))
            .collect::<Vec<_>>();

        if reason_ids.is_empty() {
            return Err(WakeLogError::InvalidArgument(
                "at least one reason has to be selected".into(),
            ));
        }

        let other_text = other_text
            .filter(|_| reason_ids.iter().any(|id| id == OTHER_REASON_ID))
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());

        let reason_names = reason_ids
            .iter()
            .filter_map(|id| registry.find(id).map(|r| (r.id, r.name)))
            .collect::<BTreeMap<_, _>>();

        let entry = Entry {
            id: Uuid::new_v4(),
            timestamp,
            reason_ids,
            other_text,
            reason_names: Some(reason_names),
        };
        self.entries.insert(0, entry.clone());
        Ok(entry)
    }

    /// Removes entries at the given positions. Returns how many were removed.
    pub fn delete_at(&mut self, indices: &[usize]) -> usize {
        let indices = indices
            .iter()
            .copied()
            .filter(|index| *index < self.entries.len())
            .collect::<BTreeSet<_>>();
        // Highest first so that earlier positions stay valid.
        for index in indices.iter().rev() {
            self.entries.remove(*index);
        }
        indices.len()
    }

    /// Returns how many entries were dropped.
    pub fn clear_all(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }
}
