//! # Presets
//!
//! Two kinds of presets live here:
//!
//! - **Sort/filter presets** ([`SortFilterPreset`]): a named sort order plus a tag
//!   filter, kept in a [`PresetStore`] and applied with [`apply_preset`].
//! - **Tag group catalogs** ([`catalog`]): ready-made groups for common domains
//!   (priorities, statuses, file types, ...).
//!
//! ## Preset Names
//!
//! A preset's `name` is its key. [`PresetStore::add_preset`] replaces an existing
//! preset of the same name in place, so a store never holds two presets with one
//! name.

pub mod catalog;

use crate::collection::{filter_by_tags, sort_by_name, sort_by_tag_count};
use crate::model::TagItem;
use crate::observable::{Observable, Subscription};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    #[default]
    Name,
    TagCount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortFilterPreset {
    pub name: String,
    pub sort_by: SortBy,
    pub asc: bool,
    #[serde(default)]
    pub filter_tags: Vec<String>,
}

impl SortFilterPreset {
    pub fn new(name: impl Into<String>, sort_by: SortBy, asc: bool) -> Self {
        Self {
            name: name.into(),
            sort_by,
            asc,
            filter_tags: Vec::new(),
        }
    }

    pub fn with_filter_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter_tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Sorts `items` as the preset says, then keeps the items bearing any of its
/// filter tags. No filter tags means no filtering.
pub fn apply_preset(items: &[TagItem], preset: &SortFilterPreset) -> Vec<TagItem> {
    let sorted = match preset.sort_by {
        SortBy::Name => sort_by_name(items, preset.asc),
        SortBy::TagCount => sort_by_tag_count(items, preset.asc),
    };
    if preset.filter_tags.is_empty() {
        sorted
    } else {
        filter_by_tags(&sorted, &preset.filter_tags, false)
    }
}

/// An observable list of sort/filter presets.
#[derive(Debug)]
pub struct PresetStore {
    presets: Observable<Vec<SortFilterPreset>>,
}

impl Default for PresetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PresetStore {
    pub fn new() -> Self {
        Self {
            presets: Observable::new(Vec::new()),
        }
    }

    pub fn presets(&self) -> &[SortFilterPreset] {
        self.presets.get_state()
    }

    pub fn get(&self, name: &str) -> Option<&SortFilterPreset> {
        self.presets().iter().find(|p| p.name == name)
    }

    /// Listener gets the full list after each change.
    pub fn subscribe(&self, listener: impl FnMut(&Vec<SortFilterPreset>) + 'static) -> Subscription {
        self.presets.subscribe(listener)
    }

    /// Replaces the whole list. Later presets win over earlier ones with the
    /// same name.
    pub fn set_presets(&mut self, presets: Vec<SortFilterPreset>) {
        let mut unique: Vec<SortFilterPreset> = Vec::with_capacity(presets.len());
        for preset in presets {
            upsert(&mut unique, preset);
        }
        self.presets.set(unique);
    }

    pub fn add_preset(&mut self, preset: SortFilterPreset) {
        self.presets.update(|list| upsert(list, preset));
    }

    /// Returns `false` when no preset has that name.
    pub fn remove_preset(&mut self, name: &str) -> bool {
        if self.get(name).is_none() {
            return false;
        }
        self.presets.update(|list| list.retain(|p| p.name != name));
        true
    }

    /// Replaces the preset named `old_name`. A rename that collides with another
    /// preset drops that other preset.
    pub fn update_preset(&mut self, old_name: &str, preset: SortFilterPreset) -> bool {
        let Some(index) = self.presets().iter().position(|p| p.name == old_name) else {
            return false;
        };
        self.presets.update(|list| {
            let new_name = preset.name.clone();
            list[index] = preset;
            let mut i = 0;
            list.retain(|p| {
                let keep = i == index || p.name != new_name;
                i += 1;
                keep
            });
        });
        true
    }

    pub fn clear_presets(&mut self) {
        self.presets.set(Vec::new());
    }
}

fn upsert(list: &mut Vec<SortFilterPreset>, preset: SortFilterPreset) {
    match list.iter_mut().find(|p| p.name == preset.name) {
        Some(existing) => *existing = preset,
        None => list.push(preset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Tag;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn items() -> Vec<TagItem> {
        vec![
            TagItem::new("1", "Charlie", vec![Tag::new("red", "c", "Red")]),
            TagItem::new(
                "2",
                "Alpha",
                vec![Tag::new("blue", "c", "Blue"), Tag::new("big", "s", "Big")],
            ),
            TagItem::untagged("3", "Bravo"),
        ]
    }

    fn names(items: &[TagItem]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_apply_preset_sort_only() {
        let preset = SortFilterPreset::new("by name", SortBy::Name, true);
        assert_eq!(names(&apply_preset(&items(), &preset)), vec!["Alpha", "Bravo", "Charlie"]);
    }

    #[test]
    fn test_apply_preset_sort_and_filter() {
        let preset = SortFilterPreset::new("busy", SortBy::TagCount, false)
            .with_filter_tags(["red", "blue"]);
        assert_eq!(names(&apply_preset(&items(), &preset)), vec!["Alpha", "Charlie"]);
    }

    #[test]
    fn test_preset_wire_shape() {
        let preset: SortFilterPreset = serde_json::from_str(
            r#"{"name":"p","sortBy":"tagCount","asc":false,"filterTags":["x"]}"#,
        )
        .unwrap();
        assert_eq!(preset.sort_by, SortBy::TagCount);
        assert_eq!(preset.filter_tags, vec!["x"]);
    }

    #[test]
    fn test_add_preset_keeps_names_unique() {
        let mut store = PresetStore::new();
        store.add_preset(SortFilterPreset::new("a", SortBy::Name, true));
        store.add_preset(SortFilterPreset::new("b", SortBy::Name, true));
        store.add_preset(SortFilterPreset::new("a", SortBy::TagCount, false));

        assert_eq!(store.presets().len(), 2);
        assert_eq!(store.presets()[0].sort_by, SortBy::TagCount);
    }

    #[test]
    fn test_set_presets_dedups() {
        let mut store = PresetStore::new();
        store.set_presets(vec![
            SortFilterPreset::new("a", SortBy::Name, true),
            SortFilterPreset::new("a", SortBy::Name, false),
        ]);
        assert_eq!(store.presets().len(), 1);
        assert!(!store.presets()[0].asc);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut store = PresetStore::new();
        store.add_preset(SortFilterPreset::new("a", SortBy::Name, true));
        store.add_preset(SortFilterPreset::new("b", SortBy::Name, true));

        assert!(store.remove_preset("a"));
        assert!(!store.remove_preset("a"));
        assert_eq!(store.presets().len(), 1);

        store.clear_presets();
        assert!(store.presets().is_empty());
    }

    #[test]
    fn test_update_preset() {
        let mut store = PresetStore::new();
        store.add_preset(SortFilterPreset::new("a", SortBy::Name, true));
        store.add_preset(SortFilterPreset::new("b", SortBy::Name, true));

        assert!(store.update_preset("a", SortFilterPreset::new("c", SortBy::TagCount, true)));
        assert!(store.get("a").is_none());
        assert_eq!(store.get("c").unwrap().sort_by, SortBy::TagCount);

        // Renaming onto an existing name drops the other preset.
        assert!(store.update_preset("c", SortFilterPreset::new("b", SortBy::Name, false)));
        assert_eq!(store.presets().len(), 1);
        assert!(!store.get("b").unwrap().asc);

        assert!(!store.update_preset("missing", SortFilterPreset::new("x", SortBy::Name, true)));
    }

    #[test]
    fn test_store_notifies_subscribers() {
        let mut store = PresetStore::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _sub = store.subscribe(move |list| sink.borrow_mut().push(list.len()));

        store.add_preset(SortFilterPreset::new("a", SortBy::Name, true));
        store.add_preset(SortFilterPreset::new("b", SortBy::Name, true));
        store.remove_preset("a");
        store.clear_presets();

        assert_eq!(*seen.borrow(), vec![1, 2, 1, 0]);
    }
}
