//! In-memory state of the application and the rules for changing it.
//!
//! [DataManager] is the only place where reasons and entries get mutated. Every mutation writes
//! the affected slot back to the [KeyValueStore] before returning.

pub mod color;
pub mod history;
pub mod registry;

use std::path::{Path, PathBuf};

use chrono::Local;
use color::Color;
use history::EntryStore;
use registry::ReasonRegistry;
use tracing::{error, info, instrument};

use crate::{
    analysis::{
        counts::{self, ChartSummary, ReasonCount},
        export,
        period::Period,
    },
    error::Result,
    storage::{
        entities::{Entry, Reason},
        key_value::KeyValueStore,
        slots::{self, ENTRIES_KEY, REASONS_KEY},
    },
    utils::clock::{Clock, DefaultClock},
};

/// Owns reasons and entries for the lifetime of the process. Construct it once and pass it
/// around by reference.
pub struct DataManager<S: KeyValueStore> {
    store: S,
    clock: Box<dyn Clock>,
    reasons: ReasonRegistry,
    entries: EntryStore,
}

impl<S: KeyValueStore> DataManager<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, Box::new(DefaultClock))
    }

    /// Loads reasons, then entries. Missing or corrupted slots fall back to the default reasons
    /// and an empty history.
    pub fn with_clock(store: S, clock: Box<dyn Clock>) -> Self {
        let reasons = match slots::load_or_none(&store, REASONS_KEY) {
            Some(reasons) => ReasonRegistry::new(reasons),
            None => {
                info!("Using default reasons");
                ReasonRegistry::default()
            }
        };
        let entries = slots::load_or_none(&store, ENTRIES_KEY)
            .map(EntryStore::new)
            .unwrap_or_default();
        info!(
            "Loaded {} custom reasons and {} entries",
            reasons.custom_count(),
            entries.len()
        );

        Self {
            store,
            clock,
            reasons,
            entries,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn reasons(&self) -> &ReasonRegistry {
        &self.reasons
    }

    pub fn custom_reasons(&self) -> &[Reason] {
        self.reasons.list_editable()
    }

    pub fn all_reasons(&self) -> Vec<Reason> {
        self.reasons.list_all()
    }

    pub fn can_add_reason(&self) -> bool {
        self.reasons.can_add()
    }

    pub fn color_for(&self, reason_id: &str) -> Color {
        self.reasons.color_for(reason_id)
    }

    /// History, most recent first.
    pub fn entries(&self) -> &[Entry] {
        self.entries.list()
    }

    #[instrument(skip(self))]
    pub fn add_reason(&mut self, name: &str) -> Result<Reason> {
        let reason = self.reasons.add(name)?;
        self.save_reasons()?;
        info!("Added reason {}", reason.id);
        Ok(reason)
    }

    #[instrument(skip(self))]
    pub fn update_reason(&mut self, id: &str, name: &str) -> Result<()> {
        self.reasons.update(id, name)?;
        self.save_reasons()
    }

    /// Entries referring to the reason are left untouched. Returns whether a reason was removed.
    #[instrument(skip(self))]
    pub fn remove_reason(&mut self, id: &str) -> Result<bool> {
        if !self.reasons.remove(id) {
            return Ok(false);
        }
        self.save_reasons()?;
        Ok(true)
    }

    #[instrument(skip(self))]
    pub fn remove_reason_at(&mut self, index: usize) -> Result<bool> {
        if !self.reasons.remove_at(index) {
            return Ok(false);
        }
        self.save_reasons()?;
        Ok(true)
    }

    #[instrument(skip(self))]
    pub fn reorder_reasons(&mut self, from: usize, to: usize) -> Result<bool> {
        if !self.reasons.reorder(from, to) {
            return Ok(false);
        }
        self.save_reasons()?;
        Ok(true)
    }

    /// Logs a wake-up happening now.
    #[instrument(skip(self, reason_ids))]
    pub fn add_entry(
        &mut self,
        reason_ids: impl IntoIterator<Item = impl Into<String>>,
        other_text: Option<String>,
    ) -> Result<Entry> {
        let now = self.clock.time();
        let entry = self
            .entries
            .create(reason_ids, other_text, &self.reasons, now)?;
        self.save_entries()?;
        info!("Logged entry {} with {:?}", entry.id, entry.reason_ids);
        Ok(entry)
    }

    /// Deletes entries by their position in [DataManager::entries].
    #[instrument(skip(self))]
    pub fn delete_entries(&mut self, indices: &[usize]) -> Result<usize> {
        let removed = self.entries.delete_at(indices);
        if removed > 0 {
            self.save_entries()?;
        }
        Ok(removed)
    }

    #[instrument(skip(self))]
    pub fn clear_entries(&mut self) -> Result<usize> {
        let removed = self.entries.clear_all();
        self.save_entries()?;
        info!("Cleared {removed} entries");
        Ok(removed)
    }

    pub fn count_by_reason(&self, period: Period) -> Vec<ReasonCount> {
        let now = self.clock.time();
        counts::count_by_reason(
            counts::entries_in(self.entries.list(), period, now),
            &self.reasons,
        )
    }

    pub fn summarize(&self, period: Period) -> ChartSummary {
        counts::summarize(self.entries.list(), &self.reasons, period, self.clock.time())
    }

    pub fn export_csv(&self) -> Result<String> {
        export::export_csv(self.entries.list(), &self.reasons.list_all())
    }

    /// Writes the CSV export into `dir` and returns the path of the created file.
    pub fn write_csv_export(&self, dir: &Path) -> Result<PathBuf> {
        export::write_csv_export(
            self.entries.list(),
            &self.reasons.list_all(),
            dir,
            self.clock.time().with_timezone(&Local),
        )
    }

    fn save_reasons(&mut self) -> Result<()> {
        slots::save(&mut self.store, REASONS_KEY, self.reasons.list_editable())
            .inspect_err(|e| error!("Failed to save reasons {e:?}"))
    }

    fn save_entries(&mut self) -> Result<()> {
        slots::save(&mut self.store, ENTRIES_KEY, self.entries.list())
            .inspect_err(|e| error!("Failed to save entries {e:?}"))
    }
}
