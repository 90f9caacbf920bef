use crate::model::TagItem;
use serde::Serialize;
use std::collections::BTreeMap;

/// Items split on whether they carry one tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagPartition {
    pub with: Vec<TagItem>,
    pub without: Vec<TagItem>,
}

pub fn group_by_tag(items: &[TagItem], tag_id: &str) -> TagPartition {
    let (with, without) = items.iter().cloned().partition(|i| i.has_tag(tag_id));
    TagPartition { with, without }
}

/// Buckets items by the groups of their tags.
///
/// An item with tags in several groups appears in each of those buckets, once per
/// bucket. Untagged items appear nowhere.
pub fn group_by_group_id(items: &[TagItem]) -> BTreeMap<String, Vec<TagItem>> {
    let mut buckets: BTreeMap<String, Vec<TagItem>> = BTreeMap::new();
    for item in items {
        let mut seen: Vec<&str> = Vec::new();
        for tag in &item.tags {
            if seen.contains(&tag.group.as_str()) {
                continue;
            }
            seen.push(&tag.group);
            buckets.entry(tag.group.clone()).or_default().push(item.clone());
        }
    }
    buckets
}
