use std::collections::HashSet;

use tracing::warn;
use uuid::Uuid;

use crate::{
    error::{Result, WakeLogError},
    storage::entities::{Reason, MAX_CUSTOM_REASONS, OTHER_REASON_ID},
};

use super::color::{color_at, other_color, Color};

/// Ordered list of the user's own reasons. "Other" is not part of the list, it's appended by
/// [ReasonRegistry::list_all].
///
/// The registry only holds state, persisting it is the job of
/// [DataManager](super::DataManager).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasonRegistry {
    custom: Vec<Reason>,
}

impl Default for ReasonRegistry {
    fn default() -> Self {
        Self::new(Reason::defaults())
    }
}

impl ReasonRegistry {
    /// Builds a registry from stored reasons. Records that would break the registry invariants
    /// (reserved id, duplicate ids, too many reasons) are dropped.
    pub fn new(reasons: Vec<Reason>) -> Self {
        let mut seen = HashSet::new();
        let mut custom = Vec::with_capacity(reasons.len().min(MAX_CUSTOM_REASONS));
        for reason in reasons {
            if reason.is_other() {
                warn!("Ignoring stored reason with reserved id {OTHER_REASON_ID}");
                continue;
            }
            if !seen.insert(reason.id.clone()) {
                warn!("Ignoring duplicate reason {}", reason.id);
                continue;
            }
            if custom.len() == MAX_CUSTOM_REASONS {
                warn!("Ignoring reason {} above the limit of {MAX_CUSTOM_REASONS}", reason.id);
                continue;
            }
            custom.push(reason);
        }
        Self { custom }
    }

    pub fn list_editable(&self) -> &[Reason] {
        &self.custom
    }

    /// Custom reasons followed by "Other", which is always last.
    pub fn list_all(&self) -> Vec<Reason> {
        let mut all = self.custom.clone();
        all.push(Reason::other());
        all
    }

    pub fn custom_count(&self) -> usize {
        self.custom.len()
    }

    pub fn can_add(&self) -> bool {
        self.custom.len() < MAX_CUSTOM_REASONS
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.custom.iter().position(|r| r.id == id)
    }

    /// Looks up any reason, "Other" included.
    pub fn find(&self, id: &str) -> Option<Reason> {
        if id == OTHER_REASON_ID {
            return Some(Reason::other());
        }
        self.custom.iter().find(|r| r.id == id).cloned()
    }

    /// Matches by id first, then by name ignoring case.
    pub fn resolve(&self, id_or_name: &str) -> Option<Reason> {
        self.find(id_or_name).or_else(|| {
            self.list_all()
                .into_iter()
                .find(|r| r.name.eq_ignore_ascii_case(id_or_name.trim()))
        })
    }

    pub fn add(&mut self, name: &str) -> Result<Reason> {
        if !self.can_add() {
            return Err(WakeLogError::CapacityExceeded {
                max: MAX_CUSTOM_REASONS,
            });
        }
        let reason = Reason::new(Uuid::new_v4().to_string(), clean_name(name)?);
        self.custom.push(reason.clone());
        Ok(reason)
    }

    pub fn update(&mut self, id: &str, name: &str) -> Result<()> {
        let name = clean_name(name)?;
        let reason = self
            .custom
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| WakeLogError::NotFound(format!("reason {id}")))?;
        reason.name = name;
        Ok(())
    }

    /// Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(index) => self.remove_at(index),
            None => false,
        }
    }

    pub fn remove_at(&mut self, index: usize) -> bool {
        if index < self.custom.len() {
            self.custom.remove(index);
            true
        } else {
            false
        }
    }

    /// Moves a reason so that it ends up at `to`. A destination past the end means last.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if from >= self.custom.len() {
            return false;
        }
        let to = to.min(self.custom.len() - 1);
        if from == to {
            return false;
        }
        let reason = self.custom.remove(from);
        self.custom.insert(to, reason);
        true
    }

    /// Colors follow the position in the list. "Other" and unknown ids share the last color.
    pub fn color_for(&self, id: &str) -> Color {
        match self.position(id) {
            Some(position) => color_at(position),
            None => other_color(),
        }
    }

    /// Live name of the reason, or the id itself when the reason doesn't exist anymore.
    pub fn display_name(&self, id: &str) -> String {
        self.find(id)
            .map(|r| r.name)
            .unwrap_or_else(|| id.to_string())
    }
}

fn clean_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(WakeLogError::InvalidArgument(
            "reason name can't be blank".into(),
        ));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use crate::{
        data::color::PALETTE,
        error::WakeLogError,
        storage::entities::{Reason, MAX_CUSTOM_REASONS, OTHER_REASON_ID},
    };

    use super::ReasonRegistry;

    fn registry(names: &[&str]) -> ReasonRegistry {
        ReasonRegistry::new(names.iter().map(|n| Reason::new(*n, *n)).collect())
    }

    #[test]
    fn test_other_is_always_last() {
        let registry = ReasonRegistry::default();
        let all = registry.list_all();
        assert_eq!(all.len(), 4);
        assert_eq!(all.last(), Some(&Reason::other()));
        assert_eq!(registry.list_editable(), Reason::defaults().as_slice());
    }

    #[test]
    fn test_add_up_to_capacity() -> Result<()> {
        let mut registry = registry(&["a", "b", "c", "d", "e"]);
        let sixth = registry.add("  Cold  ")?;
        assert_eq!(sixth.name, "Cold");
        assert_eq!(registry.custom_count(), MAX_CUSTOM_REASONS);
        assert!(!registry.can_add());

        let seventh = registry.add("Hot");
        assert!(matches!(
            seventh,
            Err(WakeLogError::CapacityExceeded { max: 6 })
        ));
        assert_eq!(registry.custom_count(), MAX_CUSTOM_REASONS);
        Ok(())
    }

    #[test]
    fn test_added_ids_are_unique() -> Result<()> {
        let mut registry = registry(&[]);
        let first = registry.add("Same")?;
        let second = registry.add("Same")?;
        assert_ne!(first.id, second.id);
        Ok(())
    }

    #[test]
    fn test_blank_names_are_rejected() {
        let mut registry = registry(&["a"]);
        assert!(matches!(
            registry.add("   "),
            Err(WakeLogError::InvalidArgument(_))
        ));
        assert!(matches!(
            registry.update("a", ""),
            Err(WakeLogError::InvalidArgument(_))
        ));
        assert_eq!(registry.custom_count(), 1);
    }

    #[test]
    fn test_update_rejects_other_and_unknown() -> Result<()> {
        let mut registry = registry(&["a"]);
        assert!(matches!(
            registry.update(OTHER_REASON_ID, "Something"),
            Err(WakeLogError::NotFound(_))
        ));
        assert!(matches!(
            registry.update("missing", "Something"),
            Err(WakeLogError::NotFound(_))
        ));
        registry.update("a", "Renamed")?;
        assert_eq!(registry.list_editable()[0].name, "Renamed");
        Ok(())
    }

    #[test]
    fn test_remove_is_noop_for_unknown() {
        let mut registry = registry(&["a", "b"]);
        assert!(!registry.remove(OTHER_REASON_ID));
        assert!(!registry.remove("missing"));
        assert!(!registry.remove_at(2));
        assert!(registry.remove("a"));
        assert!(registry.remove_at(0));
        assert!(registry.list_editable().is_empty());
        assert_eq!(registry.list_all(), vec![Reason::other()]);
    }

    #[test]
    fn test_reorder() {
        let mut registry = registry(&["a", "b", "c"]);
        assert!(registry.reorder(0, 2));
        let ids = |r: &ReasonRegistry| r.list_editable().iter().map(|r| r.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&registry), ["b", "c", "a"]);
        assert!(!registry.reorder(2, 10));
        assert!(registry.reorder(1, 0));
        assert_eq!(ids(&registry), ["c", "b", "a"]);
        assert!(!registry.reorder(5, 0));
    }

    #[test]
    fn test_colors_follow_position() {
        let mut registry = registry(&["a", "b", "c"]);
        assert_eq!(registry.color_for("a"), PALETTE[0]);
        assert_eq!(registry.color_for("c"), PALETTE[2]);
        assert_eq!(registry.color_for(OTHER_REASON_ID), PALETTE[PALETTE.len() - 1]);
        assert_eq!(registry.color_for("deleted"), PALETTE[PALETTE.len() - 1]);

        registry.reorder(2, 0);
        assert_eq!(registry.color_for("c"), PALETTE[0]);
        assert_eq!(registry.color_for("a"), PALETTE[1]);

        let full = registry_with_six();
        assert_eq!(full.color_for(OTHER_REASON_ID), PALETTE[PALETTE.len() - 1]);
        assert_eq!(full.color_for("f"), PALETTE[5]);
    }

    fn registry_with_six() -> ReasonRegistry {
        registry(&["a", "b", "c", "d", "e", "f"])
    }

    #[test]
    fn test_stored_reasons_are_sanitized() {
        let registry = ReasonRegistry::new(vec![
            Reason::new("a", "A"),
            Reason::other(),
            Reason::new("a", "Duplicate"),
            Reason::new("b", "B"),
            Reason::new("c", "C"),
            Reason::new("d", "D"),
            Reason::new("e", "E"),
            Reason::new("f", "F"),
            Reason::new("g", "G"),
        ]);
        let ids = registry
            .list_editable()
            .iter()
            .map(|r| r.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, ["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn test_resolve_by_id_or_name() {
        let registry = ReasonRegistry::default();
        assert_eq!(
            registry.resolve("restless leg").map(|r| r.id),
            Some("restless_leg".to_string())
        );
        assert_eq!(
            registry.resolve("other").map(|r| r.id),
            Some(OTHER_REASON_ID.to_string())
        );
        assert_eq!(registry.resolve("Sneezing"), None);
        assert_eq!(registry.display_name("gone"), "gone");
    }
}
