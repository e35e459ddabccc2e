use std::{borrow::Cow, collections::BTreeMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reserved id of the "Other" reason. It is never stored with the custom reasons.
pub const OTHER_REASON_ID: &str = "other";
pub const OTHER_REASON_NAME: &str = "Other";

/// Upper bound on the number of reasons the user can define on their own.
pub const MAX_CUSTOM_REASONS: usize = 6;

/// Shown for a reason that was deleted before snapshots were recorded.
pub const DELETED_REASON_LABEL: &str = "(deleted)";

/// Something that can wake the user up. The id is stable, the name can be edited at any time.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct Reason {
    pub id: String,
    pub name: String,
}

impl Reason {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    pub fn other() -> Self {
        Self::new(OTHER_REASON_ID, OTHER_REASON_NAME)
    }

    /// Reasons available before the user customized anything.
    pub fn defaults() -> Vec<Reason> {
        vec![
            Reason::new("abdominal_pain", "Abdominal pain"),
            Reason::new("restless_leg", "Restless Leg"),
            Reason::new("need_to_urinate", "Need to urinate"),
        ]
    }

    pub fn is_other(&self) -> bool {
        self.id == OTHER_REASON_ID
    }
}

/// A single logged wake-up. Entries are never edited after they are created.
///
/// `reason_names` keeps the names the reasons had when the entry was logged, so that renaming or
/// deleting a reason later doesn't change what the entry meant.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub reason_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_names: Option<BTreeMap<String, String>>,
}

impl Entry {
    pub fn has_other(&self) -> bool {
        self.reason_ids.iter().any(|id| id == OTHER_REASON_ID)
    }

    pub fn snapshot_name(&self, reason_id: &str) -> Option<&str> {
        self.reason_names
            .as_ref()
            .and_then(|names| names.get(reason_id))
            .map(String::as_str)
    }

    /// Human readable label of one of the entry's reasons. Live names win over the snapshot so
    /// renames show up in history, deleted reasons fall back to the snapshot.
    pub fn describe_reason<'a>(&'a self, reason_id: &'a str, reasons: &'a [Reason]) -> Cow<'a, str> {
        if reason_id == OTHER_REASON_ID {
            return match self.other_text.as_deref() {
                Some(text) if !text.is_empty() => format!("{OTHER_REASON_NAME}: {text}").into(),
                _ => OTHER_REASON_NAME.into(),
            };
        }
        if let Some(reason) = reasons.iter().find(|r| r.id == reason_id) {
            return reason.name.as_str().into();
        }
        self.snapshot_name(reason_id)
            .unwrap_or(DELETED_REASON_LABEL)
            .into()
    }

    /// All reasons of the entry joined by a comma, in the order they were stored.
    pub fn reasons_description(&self, reasons: &[Reason]) -> String {
        self.reason_ids
            .iter()
            .map(|id| self.describe_reason(id, reasons))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::{Entry, Reason, OTHER_REASON_ID};

    fn entry(reason_ids: &[&str], other_text: Option<&str>) -> Entry {
        Entry {
            id: Uuid::new_v4(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 3, 15, 0).unwrap(),
            reason_ids: reason_ids.iter().map(|v| v.to_string()).collect(),
            other_text: other_text.map(Into::into),
            reason_names: Some(BTreeMap::from([("a".to_string(), "Old A".to_string())])),
        }
    }

    #[test]
    fn test_description_prefers_live_names() {
        let reasons = vec![Reason::new("a", "New A"), Reason::other()];
        let entry = entry(&["a", OTHER_REASON_ID], Some("noise"));
        assert_eq!(entry.reasons_description(&reasons), "New A, Other: noise");
    }

    #[test]
    fn test_description_falls_back_to_snapshot_then_deleted() {
        let entry = entry(&["a", "b", OTHER_REASON_ID], None);
        assert_eq!(entry.reasons_description(&[]), "Old A, (deleted), Other");
    }

    #[test]
    fn test_empty_other_text_renders_plain_other() {
        let entry = entry(&[OTHER_REASON_ID], Some(""));
        assert_eq!(entry.reasons_description(&[]), "Other");
    }

    #[test]
    fn test_optional_fields_are_omitted() -> anyhow::Result<()> {
        let mut entry = entry(&["a"], None);
        entry.reason_names = None;
        let json = serde_json::to_value(&entry)?;
        assert!(json.get("otherText").is_none());
        assert!(json.get("reasonNames").is_none());
        assert!(json.get("reasonIds").is_some());

        let decoded: Entry = serde_json::from_value(json)?;
        assert_eq!(decoded, entry);
        Ok(())
    }
}
