use super::record::{convert_many_to_tag_items, ConversionConfig, Taggable};
use crate::error::Result;
use crate::model::{Tag, TagGroup, TagItem};
use crate::tags::{create_tag_groups_from_tags, deduplicate_tags, to_title_case, DEFAULT_GROUP_ID};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Display names for group ids.
pub type GroupNames = HashMap<String, String>;

/// Items and the groups their tags belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaggingSetup {
    pub items: Vec<TagItem>,
    pub tag_groups: Vec<TagGroup>,
}

fn group_name(group_id: &str, names: &GroupNames) -> String {
    names
        .get(group_id)
        .cloned()
        .unwrap_or_else(|| to_title_case(group_id))
}

/// One group per group id found on the items, first-seen order.
///
/// Within a group a later tag with a repeated id replaces the earlier one.
pub fn auto_generate_tag_groups(items: &[TagItem], names: &GroupNames) -> Vec<TagGroup> {
    let mut order: Vec<&str> = Vec::new();
    let mut by_group: HashMap<&str, Vec<Tag>> = HashMap::new();

    for tag in items.iter().flat_map(|i| i.tags.iter()) {
        let bucket = by_group.entry(tag.group.as_str()).or_insert_with(|| {
            order.push(tag.group.as_str());
            Vec::new()
        });
        bucket.push(tag.clone());
    }

    order
        .into_iter()
        .map(|group_id| {
            let tags = deduplicate_tags(by_group.remove(group_id).unwrap_or_default());
            TagGroup::new(group_id, group_name(group_id, names), tags)
        })
        .collect()
}

/// Converts `records`, derives groups from their tags, then merges
/// `additional_tags` in.
///
/// Extra tags join the group named by their `group` field, existing or new.
/// Tags whose id is already in that group are skipped. The catch-all `general`
/// group is named from `names` or "General". With no tags anywhere the result
/// has no groups.
pub fn create_flexible_tagging_setup<T>(
    records: &[T],
    config: &ConversionConfig,
    additional_tags: &[Tag],
    names: &GroupNames,
) -> Result<TaggingSetup>
where
    T: Taggable,
{
    let items = convert_many_to_tag_items(records, config)?;
    let mut tag_groups = auto_generate_tag_groups(&items, names);

    let general_name = names
        .get(DEFAULT_GROUP_ID)
        .map(String::as_str)
        .unwrap_or("General");
    let extra_groups = create_tag_groups_from_tags(
        additional_tags.iter().cloned(),
        DEFAULT_GROUP_ID,
        Some(general_name),
    );

    for mut extra in extra_groups {
        match tag_groups.iter_mut().find(|g| g.id == extra.id) {
            Some(existing) => {
                for tag in extra.tags {
                    if !existing.contains_tag(&tag.id) {
                        existing.tags.push(tag);
                    }
                }
            }
            None => {
                if let Some(name) = names.get(&extra.id) {
                    extra.name = name.clone();
                }
                tag_groups.push(extra);
            }
        }
    }

    debug!(
        items = items.len(),
        groups = tag_groups.len(),
        "built tagging setup"
    );
    Ok(TaggingSetup { items, tag_groups })
}
