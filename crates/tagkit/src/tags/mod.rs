//! Tag and group builders.
//!
//! Shortcuts for assembling tag catalogs and items by hand, from plain names or
//! from loosely shaped input.
//!
//! ## Generated Ids
//!
//! | Builder | Id scheme | Example |
//! |---------|-----------|---------|
//! | [`create_tags`] | `{group}-{n}` (1-based position) | `colors-2` |
//! | [`create_quick_tag`] | `{group}-{slug}` | `status-in-progress` |
//! | [`tags_from_simple_data`] | group id = slug of the group name | `File Types` -> `file-types` |
//!
//! See [`naming`] for the slug and title-case rules.

pub mod naming;

use crate::model::{Tag, TagGroup, TagItem};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use naming::{slugify, to_title_case};

/// Group used when a tag does not name one.
pub const DEFAULT_GROUP_ID: &str = "general";

/// A tag name, optionally with an explicit id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagName {
    Plain(String),
    WithId { name: String, id: String },
}

impl From<&str> for TagName {
    fn from(name: &str) -> Self {
        TagName::Plain(name.to_string())
    }
}

impl From<String> for TagName {
    fn from(name: String) -> Self {
        TagName::Plain(name)
    }
}

/// Loosely shaped tag input: a bare name, a full tag, or a name with an optional
/// group and id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagInput {
    Name(String),
    Tag(Tag),
    Partial {
        name: String,
        #[serde(default)]
        group: Option<String>,
        #[serde(default)]
        id: Option<String>,
    },
}

impl From<&str> for TagInput {
    fn from(name: &str) -> Self {
        TagInput::Name(name.to_string())
    }
}

impl From<Tag> for TagInput {
    fn from(tag: Tag) -> Self {
        TagInput::Tag(tag)
    }
}

pub fn create_tag(id: impl Into<String>, name: impl Into<String>, group_id: impl Into<String>) -> Tag {
    Tag::new(id, group_id, name)
}

/// Builds the tags of one group. Plain names get ids `{group}-{n}`.
pub fn create_tags<I>(group_id: &str, names: I) -> Vec<Tag>
where
    I: IntoIterator,
    I::Item: Into<TagName>,
{
    names
        .into_iter()
        .enumerate()
        .map(|(index, name)| match name.into() {
            TagName::Plain(name) => create_tag(format!("{}-{}", group_id, index + 1), name, group_id),
            TagName::WithId { name, id } => create_tag(id, name, group_id),
        })
        .collect()
}

pub fn create_tag_group<I>(id: &str, name: &str, tag_names: I) -> TagGroup
where
    I: IntoIterator,
    I::Item: Into<TagName>,
{
    TagGroup::new(id, name, create_tags(id, tag_names))
}

pub fn create_tagged_item(id: impl Into<String>, name: impl Into<String>, tags: &[Tag]) -> TagItem {
    TagItem::new(id, name, tags.to_vec())
}

/// Builds groups from `(group name, tag names)` pairs, keeping their order.
///
/// ```
/// use tagkit::tags::tags_from_simple_data;
///
/// let groups = tags_from_simple_data(&[
///     ("Colors", &["Red", "Blue"][..]),
///     ("File Types", &["Image"][..]),
/// ]);
/// assert_eq!(groups[1].id, "file-types");
/// assert_eq!(groups[1].tags[0].id, "file-types-1");
/// ```
pub fn tags_from_simple_data(data: &[(&str, &[&str])]) -> Vec<TagGroup> {
    data.iter()
        .map(|(group_name, tag_names)| {
            let group_id = slugify(group_name);
            create_tag_group(&group_id, group_name, tag_names.iter().copied())
        })
        .collect()
}

/// A tag whose id is derived from its name: `{group}-{slug}`.
pub fn create_quick_tag(name: &str, group_id: &str) -> Tag {
    create_tag(format!("{}-{}", group_id, slugify(name)), name, group_id)
}

/// Normalizes any [`TagInput`] into a [`Tag`].
pub fn smart_create_tag(input: TagInput, default_group_id: &str) -> Tag {
    match input {
        TagInput::Name(name) => create_quick_tag(&name, default_group_id),
        TagInput::Tag(tag) => tag,
        TagInput::Partial { name, group, id } => {
            let group = group.unwrap_or_else(|| default_group_id.to_string());
            let id = id.unwrap_or_else(|| format!("{}-{}", group, slugify(&name)));
            create_tag(id, name, group)
        }
    }
}

/// Buckets tags into groups, first-seen group order.
///
/// Bare names land in `default_group_id`. Inside a group, a tag repeating the id
/// or the name of an earlier one is dropped. The default group is named
/// `default_group_name` (title-cased id when absent); other groups get their
/// title-cased id.
pub fn create_tag_groups_from_tags<I>(
    tags: I,
    default_group_id: &str,
    default_group_name: Option<&str>,
) -> Vec<TagGroup>
where
    I: IntoIterator,
    I::Item: Into<TagInput>,
{
    let mut groups: Vec<TagGroup> = Vec::new();

    for input in tags {
        let tag = smart_create_tag(input.into(), default_group_id);
        let index = match groups.iter().position(|g| g.id == tag.group) {
            Some(index) => index,
            None => {
                let name = if tag.group == default_group_id {
                    default_group_name
                        .map(str::to_string)
                        .unwrap_or_else(|| to_title_case(default_group_id))
                } else {
                    to_title_case(&tag.group)
                };
                groups.push(TagGroup::new(tag.group.clone(), name, Vec::new()));
                groups.len() - 1
            }
        };

        let group = &mut groups[index];
        let duplicate = group
            .tags
            .iter()
            .any(|t| t.id == tag.id || t.name == tag.name);
        if !duplicate {
            group.tags.push(tag);
        }
    }

    groups
}

/// Merges tags by id. A later tag replaces an earlier one with the same id but
/// takes over its position.
pub fn deduplicate_tags<I>(tags: I) -> Vec<Tag>
where
    I: IntoIterator<Item = Tag>,
{
    let mut out: Vec<Tag> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for tag in tags {
        match positions.get(&tag.id) {
            Some(&pos) => out[pos] = tag,
            None => {
                positions.insert(tag.id.clone(), out.len());
                out.push(tag);
            }
        }
    }
    out
}
