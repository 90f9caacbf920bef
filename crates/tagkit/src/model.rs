//! # Domain Model: Tags, Groups and Items
//!
//! This module defines the three core data structures of tagkit: [`Tag`], [`TagGroup`]
//! and [`TagItem`].
//!
//! ## Identity
//!
//! - A [`Tag`] is identified by its `id`, which is unique across the whole tag universe,
//!   not just inside its group. Two tags with the same id are the same tag, whatever
//!   their names say.
//! - A [`TagGroup`] is identified by its `id`. Every tag it holds points back to it
//!   through `tag.group`.
//! - A [`TagItem`] is the thing being tagged. Its tag list keeps insertion order and
//!   never holds two tags with the same id.
//!
//! ## Group Exclusivity
//!
//! In single-select mode an item holds at most one tag per group. That rule is *not*
//! a standing invariant of [`TagItem`]: a bulk replace may build an item that violates
//! it. Enforcement lives in the selection engine (see [`crate::selection`]).
//!
//! ## Wire Shape
//!
//! All types serialize to the plain `{ id, group, name }` / `{ id, name, tags }`
//! objects a JavaScript front-end would hand over, so JSON produced by a UI can be
//! read back directly.

use serde::{Deserialize, Deserializer, Serialize};

/// An atomic label belonging to exactly one group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    /// Id of the owning [`TagGroup`].
    pub group: String,
    pub name: String,
}

impl Tag {
    pub fn new(id: impl Into<String>, group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            group: group.into(),
            name: name.into(),
        }
    }
}

/// A named, ordered collection of related tags (e.g. "Priority").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl TagGroup {
    pub fn new(id: impl Into<String>, name: impl Into<String>, tags: Vec<Tag>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tags,
        }
    }

    /// Looks up a tag of this group by id.
    pub fn tag(&self, tag_id: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.id == tag_id)
    }

    pub fn contains_tag(&self, tag_id: &str) -> bool {
        self.tag(tag_id).is_some()
    }

    /// Returns `true` when every tag points back to this group.
    pub fn is_consistent(&self) -> bool {
        self.tags.iter().all(|t| t.group == self.id)
    }
}

/// A taggable subject holding an ordered set of applied tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagItem {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "unique_tags")]
    pub tags: Vec<Tag>,
}

impl TagItem {
    /// Creates an item, dropping repeated tag ids (first occurrence wins).
    pub fn new(id: impl Into<String>, name: impl Into<String>, tags: Vec<Tag>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tags: dedup_by_id(tags),
        }
    }

    pub fn untagged(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, Vec::new())
    }

    pub fn has_tag(&self, tag_id: &str) -> bool {
        self.tags.iter().any(|t| t.id == tag_id)
    }

    /// Returns `true` if any applied tag belongs to `group_id`.
    pub fn has_group(&self, group_id: &str) -> bool {
        self.tags.iter().any(|t| t.group == group_id)
    }

    pub fn tags_in_group<'a>(&'a self, group_id: &'a str) -> impl Iterator<Item = &'a Tag> + 'a {
        self.tags.iter().filter(move |t| t.group == group_id)
    }

    pub fn tag_ids(&self) -> Vec<&str> {
        self.tags.iter().map(|t| t.id.as_str()).collect()
    }
}

/// Removes repeated tag ids from a list, keeping the first occurrence in place.
pub(crate) fn dedup_by_id(tags: Vec<Tag>) -> Vec<Tag> {
    let mut seen = std::collections::HashSet::new();
    tags.into_iter()
        .filter(|t| seen.insert(t.id.clone()))
        .collect()
}

fn unique_tags<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Tag>, D::Error> {
    Vec::<Tag>::deserialize(deserializer).map(dedup_by_id)
}
