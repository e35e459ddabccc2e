use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::{
    data::{color::Color, registry::ReasonRegistry},
    storage::entities::Entry,
};

use super::period::Period;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasonCount {
    pub reason_id: String,
    pub display_name: String,
    pub count: usize,
    pub color: Color,
}

/// What the chart shows for a period: how many wake-ups there were and how often each reason
/// came up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSummary {
    pub period: Period,
    pub total_entries: usize,
    pub counts: Vec<ReasonCount>,
}

impl ChartSummary {
    pub fn most_common(&self) -> Option<&ReasonCount> {
        self.counts.first()
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().map(|c| c.count).max().unwrap_or(0)
    }
}

/// Returns entries logged within `period`, keeping their order.
pub fn entries_in<'a>(
    entries: &'a [Entry],
    period: Period,
    now: DateTime<Utc>,
) -> impl Iterator<Item = &'a Entry> {
    entries
        .iter()
        .filter(move |entry| period.contains(entry.timestamp, now))
}

/// Counts how often each reason was picked. An entry with several reasons counts towards each
/// of them. Sorted by count, most frequent first, equal counts by name.
pub fn count_by_reason<'a>(
    entries: impl IntoIterator<Item = &'a Entry>,
    registry: &ReasonRegistry,
) -> Vec<ReasonCount> {
    let mut map = HashMap::<&str, usize>::new();
    for entry in entries {
        for reason_id in &entry.reason_ids {
            *map.entry(reason_id.as_str()).or_default() += 1;
        }
    }

    let mut counts = map
        .into_iter()
        .map(|(reason_id, count)| ReasonCount {
            reason_id: reason_id.to_string(),
            display_name: registry.display_name(reason_id),
            count,
            color: registry.color_for(reason_id),
        })
        .collect::<Vec<_>>();
    counts.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.display_name.cmp(&b.display_name))
    });
    counts
}

pub fn summarize(
    entries: &[Entry],
    registry: &ReasonRegistry,
    period: Period,
    now: DateTime<Utc>,
) -> ChartSummary {
    let filtered = entries_in(entries, period, now).collect::<Vec<_>>();
    ChartSummary {
        period,
        total_entries: filtered.len(),
        counts: count_by_reason(filtered, registry),
    }
}
