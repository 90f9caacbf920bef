use crate::model::{Tag, TagGroup, TagItem};
use crate::selection::{is_complete, percent};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Completion figures for a batch of items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionStats {
    pub total_items: usize,
    pub completed_items: usize,
    pub current_item_complete: bool,
    /// `completed_items / total_items * 100`, rounded half up.
    pub progress_percent: u32,
}

/// Distinct tags across all items, by id, in first-seen order.
pub fn unique_tags(items: &[TagItem]) -> Vec<Tag> {
    let mut seen = HashSet::new();
    items
        .iter()
        .flat_map(|i| i.tags.iter())
        .filter(|t| seen.insert(t.id.as_str()))
        .cloned()
        .collect()
}

/// Number of items bearing each tag id.
pub fn tag_usage_stats(items: &[TagItem]) -> BTreeMap<String, usize> {
    let mut usage = BTreeMap::new();
    for item in items {
        let mut seen = HashSet::new();
        for tag in item.tags.iter().filter(|t| seen.insert(t.id.as_str())) {
            *usage.entry(tag.id.clone()).or_insert(0) += 1;
        }
    }
    usage
}

/// Counts complete items. All zeros when there are no items or no groups.
pub fn completion_stats(
    items: &[TagItem],
    groups: &[TagGroup],
    current_item: Option<&TagItem>,
) -> CompletionStats {
    if items.is_empty() || groups.is_empty() {
        return CompletionStats::default();
    }
    let completed_items = items.iter().filter(|i| is_complete(i, groups)).count();
    CompletionStats {
        total_items: items.len(),
        completed_items,
        current_item_complete: current_item.is_some_and(|i| is_complete(i, groups)),
        progress_percent: percent(completed_items, items.len()),
    }
}
