use crate::model::{Tag, TagItem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A tagged item shaped for storage.
///
/// Serializes as the item's own fields plus, when metadata was requested,
/// `taggedAt`, `tagCount` and `tagsByGroup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseRecord {
    #[serde(flatten)]
    pub item: TagItem,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagged_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags_by_group: Option<BTreeMap<String, Vec<Tag>>>,
}

/// Copies `items` into [`DatabaseRecord`]s stamped with the current time.
pub fn prepare_for_database(items: &[TagItem], include_metadata: bool) -> Vec<DatabaseRecord> {
    prepare_for_database_at(items, include_metadata, Utc::now())
}

pub fn prepare_for_database_at(
    items: &[TagItem],
    include_metadata: bool,
    tagged_at: DateTime<Utc>,
) -> Vec<DatabaseRecord> {
    items
        .iter()
        .map(|item| {
            if !include_metadata {
                return DatabaseRecord {
                    item: item.clone(),
                    tagged_at: None,
                    tag_count: None,
                    tags_by_group: None,
                };
            }
            let mut by_group: BTreeMap<String, Vec<Tag>> = BTreeMap::new();
            for tag in &item.tags {
                by_group.entry(tag.group.clone()).or_default().push(tag.clone());
            }
            DatabaseRecord {
                item: item.clone(),
                tagged_at: Some(tagged_at),
                tag_count: Some(item.tags.len()),
                tags_by_group: Some(by_group),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_metadata_two_groups() {
        let item = TagItem::new(
            "1",
            "One",
            vec![Tag::new("red", "colors", "Red"), Tag::new("high", "priority", "High")],
        );
        let records = prepare_for_database_at(&[item], true, at());
        let record = &records[0];
        assert_eq!(record.tag_count, Some(2));
        assert_eq!(record.tags_by_group.as_ref().unwrap().len(), 2);
        assert_eq!(record.tagged_at, Some(at()));
    }

    #[test]
    fn test_metadata_same_group() {
        let item = TagItem::new(
            "1",
            "One",
            vec![Tag::new("red", "colors", "Red"), Tag::new("blue", "colors", "Blue")],
        );
        let records = prepare_for_database(&[item], true);
        let by_group = records[0].tags_by_group.as_ref().unwrap();
        assert_eq!(by_group.len(), 1);
        assert_eq!(by_group["colors"].len(), 2);
    }

    #[test]
    fn test_without_metadata() {
        let item = TagItem::new("1", "One", vec![Tag::new("red", "colors", "Red")]);
        let records = prepare_for_database(&[item.clone()], false);
        assert_eq!(records[0].item, item);
        let json = serde_json::to_value(&records[0]).unwrap();
        assert!(json.get("tagCount").is_none());
        assert!(json.get("taggedAt").is_none());
    }

    #[test]
    fn test_record_wire_shape() {
        let item = TagItem::new("1", "One", vec![Tag::new("red", "colors", "Red")]);
        let json = serde_json::to_value(&prepare_for_database_at(&[item], true, at())[0]).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["tagCount"], 1);
        assert_eq!(json["tagsByGroup"]["colors"][0]["id"], "red");
        assert_eq!(json["taggedAt"], "2024-05-01T12:00:00Z");
    }

    #[test]
    fn test_source_untouched() {
        let items = vec![TagItem::untagged("1", "One")];
        let before = items.clone();
        let _ = prepare_for_database(&items, true);
        assert_eq!(items, before);
    }
}
