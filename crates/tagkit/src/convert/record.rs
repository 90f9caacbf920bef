use crate::error::{Result, TagkitError};
use crate::model::{Tag, TagItem};
use crate::tags::{smart_create_tag, TagInput, DEFAULT_GROUP_ID};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// A record whose fields can be looked up by name.
pub trait Taggable {
    fn field(&self, key: &str) -> Option<&Value>;
}

impl Taggable for Map<String, Value> {
    fn field(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

/// Only objects have fields; any other JSON value has none.
impl Taggable for Value {
    fn field(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }
}

/// Which record fields feed the item's id, name and tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_property: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_property: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_tags_property: Option<String>,
}

impl ConversionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name_property(mut self, key: impl Into<String>) -> Self {
        self.name_property = Some(key.into());
        self
    }

    pub fn id_property(mut self, key: impl Into<String>) -> Self {
        self.id_property = Some(key.into());
        self
    }

    pub fn existing_tags_property(mut self, key: impl Into<String>) -> Self {
        self.existing_tags_property = Some(key.into());
        self
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// First present value among `keys`.
fn lookup<'a, 'k, T, I>(record: &'a T, keys: I) -> Option<&'a Value>
where
    T: Taggable + ?Sized,
    I: IntoIterator<Item = &'k str>,
{
    keys.into_iter()
        .filter_map(|key| record.field(key))
        .find(|value| is_present(value))
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn read_tags(value: Option<&Value>, item_id: &str) -> Vec<Tag> {
    let Some(Value::Array(entries)) = value else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| match serde_json::from_value::<TagInput>(entry.clone()) {
            Ok(input) => Some(smart_create_tag(input, DEFAULT_GROUP_ID)),
            Err(e) => {
                warn!(item = item_id, error = %e, "skipping unreadable tag");
                None
            }
        })
        .collect()
}

/// Converts one record. Fails with [`TagkitError::MissingIdentifier`] when no id
/// resolves.
pub fn convert_to_tag_item<T>(record: &T, config: &ConversionConfig) -> Result<TagItem>
where
    T: Taggable + ?Sized,
{
    let id_keys = config.id_property.as_deref().into_iter().chain(["id"]);
    let id = lookup(record, id_keys)
        .map(as_text)
        .ok_or(TagkitError::MissingIdentifier)?;

    let name_keys = config
        .name_property
        .as_deref()
        .into_iter()
        .chain(["name", "title", "label"]);
    let name = lookup(record, name_keys)
        .map(as_text)
        .unwrap_or_else(|| format!("Item {}", id));

    let tags_key = config.existing_tags_property.as_deref().unwrap_or("tags");
    let tags = read_tags(record.field(tags_key), &id);

    Ok(TagItem::new(id, name, tags))
}

/// Converts every record, stopping at the first failure.
pub fn convert_many_to_tag_items<T>(records: &[T], config: &ConversionConfig) -> Result<Vec<TagItem>>
where
    T: Taggable,
{
    records
        .iter()
        .map(|record| convert_to_tag_item(record, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_configured_id_and_name() {
        let record = json!({"taskId": "7", "title": "Fix bug"});
        let config = ConversionConfig::new().id_property("taskId").name_property("title");
        let item = convert_to_tag_item(&record, &config).unwrap();
        assert_eq!(item, TagItem::untagged("7", "Fix bug"));
    }

    #[test]
    fn test_name_fallback_chain() {
        let config = ConversionConfig::new().name_property("username");
        let by_label = json!({"id": 1, "label": "L"});
        let by_title = json!({"id": 1, "title": "T", "label": "L"});
        let by_prop = json!({"id": 1, "username": "u", "name": "N"});
        let nothing = json!({"id": 1});

        assert_eq!(convert_to_tag_item(&by_label, &config).unwrap().name, "L");
        assert_eq!(convert_to_tag_item(&by_title, &config).unwrap().name, "T");
        assert_eq!(convert_to_tag_item(&by_prop, &config).unwrap().name, "u");
        assert_eq!(convert_to_tag_item(&nothing, &config).unwrap().name, "Item 1");
    }

    #[test]
    fn test_id_falls_back_to_id_field() {
        let record = json!({"userId": "", "id": 42, "name": "x"});
        let config = ConversionConfig::new().id_property("userId");
        assert_eq!(convert_to_tag_item(&record, &config).unwrap().id, "42");
    }

    #[test]
    fn test_missing_identifier() {
        let record = json!({"name": "nameless"});
        let err = convert_to_tag_item(&record, &ConversionConfig::new()).unwrap_err();
        assert!(matches!(err, TagkitError::MissingIdentifier));

        let zero = json!({"id": 0});
        assert!(convert_to_tag_item(&zero, &ConversionConfig::new()).is_err());

        let not_object = json!("just a string");
        assert!(convert_to_tag_item(&not_object, &ConversionConfig::new()).is_err());
    }

    #[test]
    fn test_existing_tags_read() {
        let record = json!({
            "id": "1",
            "labels": [
                {"id": "red", "group": "colors", "name": "Red"},
                "urgent",
                {"oops": true},
                {"id": "red", "group": "colors", "name": "Red again"}
            ]
        });
        let config = ConversionConfig::new().existing_tags_property("labels");
        let item = convert_to_tag_item(&record, &config).unwrap();
        assert_eq!(item.tag_ids(), vec!["red", "general-urgent"]);
    }

    #[test]
    fn test_tags_ignored_when_not_a_list() {
        let record = json!({"id": "1", "tags": "red"});
        let item = convert_to_tag_item(&record, &ConversionConfig::new()).unwrap();
        assert!(item.tags.is_empty());
    }

    #[test]
    fn test_map_records() {
        let mut map = Map::new();
        map.insert("id".into(), json!("m"));
        let item = convert_to_tag_item(&map, &ConversionConfig::new()).unwrap();
        assert_eq!(item.name, "Item m");
    }

    #[test]
    fn test_batch_fails_on_first_bad_record() {
        let records = vec![json!({"id": "1"}), json!({"name": "no id"}), json!({"id": "3"})];
        assert!(convert_many_to_tag_items(&records, &ConversionConfig::new()).is_err());

        let good = vec![json!({"id": "1"}), json!({"id": 2})];
        let items = convert_many_to_tag_items(&good, &ConversionConfig::new()).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_config_wire_shape() {
        let config: ConversionConfig =
            serde_json::from_str(r#"{"idProperty":"taskId","nameProperty":"title"}"#).unwrap();
        assert_eq!(config.id_property.as_deref(), Some("taskId"));
        assert!(config.existing_tags_property.is_none());
    }
}
