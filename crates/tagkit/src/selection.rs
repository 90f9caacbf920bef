//! # Selection Engine
//!
//! Decides whether a given [`Tag`] is "on" or "off" for a [`TagItem`], enforcing the
//! group exclusivity rules.
//!
//! ## Policies
//!
//! | Flag | Default | Effect |
//! |------|---------|--------|
//! | `allow_multiple_per_group` | `false` | When false, adding a tag first drops every tag of the same group |
//! | `can_replace` | `true` | When false, a selected tag can no longer be toggled off |
//!
//! ## Structured Returns
//!
//! Every operation mutates the item in place and returns a [`SelectionChange`] listing
//! the tags that were added and removed, in the order it happened. An empty change
//! means the call was a no-op. Nothing here returns an error: a tag that is already
//! present, or absent, is an expected condition and the caller decides whether it is
//! worth logging.
//!
//! The change is computed before the item is touched, so a caller never observes a
//! half-applied toggle.

use crate::model::{dedup_by_id, Tag, TagGroup, TagItem};
use serde::Serialize;

/// Rules applied when a tag is added to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPolicy {
    pub allow_multiple_per_group: bool,
    pub can_replace: bool,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            allow_multiple_per_group: false,
            can_replace: true,
        }
    }
}

impl SelectionPolicy {
    pub fn single_select() -> Self {
        Self::default()
    }

    pub fn multi_select() -> Self {
        Self {
            allow_multiple_per_group: true,
            ..Self::default()
        }
    }

    pub fn permanent(mut self) -> Self {
        self.can_replace = false;
        self
    }
}

/// Tags added to and removed from an item by a single operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionChange {
    pub added: Vec<Tag>,
    pub removed: Vec<Tag>,
}

impl SelectionChange {
    /// `true` when the operation left the item untouched.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub fn applied(&self) -> bool {
        !self.is_empty()
    }
}

/// Toggles `tag` on `item`.
///
/// A present tag is removed (only if `policy.can_replace`); an absent tag is added
/// following the same rules as [`add`].
pub fn toggle(item: &mut TagItem, tag: &Tag, policy: SelectionPolicy) -> SelectionChange {
    if item.has_tag(&tag.id) {
        if !policy.can_replace {
            return SelectionChange::default();
        }
        return remove(item, &tag.id);
    }
    insert(item, tag, policy)
}

/// Adds `tag` to `item` unless it is already there.
///
/// Unlike [`toggle`], a present tag is left alone: calling `add` twice has the same
/// effect as calling it once.
pub fn add(item: &mut TagItem, tag: &Tag, policy: SelectionPolicy) -> SelectionChange {
    if item.has_tag(&tag.id) {
        return SelectionChange::default();
    }
    insert(item, tag, policy)
}

fn insert(item: &mut TagItem, tag: &Tag, policy: SelectionPolicy) -> SelectionChange {
    let mut change = SelectionChange::default();

    if !policy.allow_multiple_per_group {
        let (removed, kept): (Vec<Tag>, Vec<Tag>) = std::mem::take(&mut item.tags)
            .into_iter()
            .partition(|t| t.group == tag.group);
        item.tags = kept;
        change.removed = removed;
    }

    item.tags.push(tag.clone());
    change.added.push(tag.clone());
    change
}

/// Removes the tag with `tag_id` from `item`, if present.
pub fn remove(item: &mut TagItem, tag_id: &str) -> SelectionChange {
    let mut change = SelectionChange::default();
    if let Some(pos) = item.tags.iter().position(|t| t.id == tag_id) {
        change.removed.push(item.tags.remove(pos));
    }
    change
}

/// Overwrites the tag set of `item`.
///
/// Repeated ids in `tags` are collapsed (first wins). Group exclusivity is *not*
/// enforced here; bulk callers are responsible for the shape they write.
pub fn replace(item: &mut TagItem, tags: Vec<Tag>) -> SelectionChange {
    let tags = dedup_by_id(tags);
    let removed = item
        .tags
        .iter()
        .filter(|old| !tags.iter().any(|t| t.id == old.id))
        .cloned()
        .collect();
    let added = tags
        .iter()
        .filter(|t| !item.has_tag(&t.id))
        .cloned()
        .collect();
    item.tags = tags;
    SelectionChange { added, removed }
}

/// Removes every tag from `item`.
pub fn clear(item: &mut TagItem) -> SelectionChange {
    replace(item, Vec::new())
}

/// `true` iff every group has at least one of its tags on the item.
///
/// An empty group list is never complete.
pub fn is_complete(item: &TagItem, groups: &[TagGroup]) -> bool {
    is_selection_complete(&item.tags, groups)
}

/// Same as [`is_complete`], over a bare tag selection.
pub fn is_selection_complete(tags: &[Tag], groups: &[TagGroup]) -> bool {
    if groups.is_empty() {
        return false;
    }
    groups
        .iter()
        .all(|g| tags.iter().any(|t| t.group == g.id))
}

/// Per-group progress for a single selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessingStats {
    pub total_groups: usize,
    pub processed_groups: usize,
    pub unprocessed_groups: usize,
    pub completion_percentage: u32,
    pub is_complete: bool,
}

pub fn group_processing_stats(tags: &[Tag], groups: &[TagGroup]) -> ProcessingStats {
    let total_groups = groups.len();
    let processed_groups = groups
        .iter()
        .filter(|g| tags.iter().any(|t| t.group == g.id))
        .count();
    let completion_percentage = if total_groups > 0 {
        percent(processed_groups, total_groups)
    } else {
        0
    };

    ProcessingStats {
        total_groups,
        processed_groups,
        unprocessed_groups: total_groups - processed_groups,
        completion_percentage,
        is_complete: is_selection_complete(tags, groups),
    }
}

/// Groups that have no tag in `tags` yet, in catalog order.
pub fn unprocessed_groups<'a>(tags: &[Tag], groups: &'a [TagGroup]) -> Vec<&'a TagGroup> {
    groups
        .iter()
        .filter(|g| !tags.iter().any(|t| t.group == g.id))
        .collect()
}

/// `round(part / whole * 100)`; callers guarantee `whole > 0`.
pub(crate) fn percent(part: usize, whole: usize) -> u32 {
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test_tag_matrix;

    fn item() -> TagItem {
        TagItem::untagged("a", "Item A")
    }

    fn tag(id: &str, group: &str) -> Tag {
        Tag::new(id, group, id)
    }

    #[test]
    fn test_toggle_adds_absent_tag() {
        let mut it = item();
        let change = toggle(&mut it, &tag("x", "g1"), SelectionPolicy::default());
        assert_eq!(it.tag_ids(), vec!["x"]);
        assert_eq!(change.added, vec![tag("x", "g1")]);
        assert!(change.removed.is_empty());
    }

    #[test]
    fn test_toggle_removes_present_tag() {
        let mut it = TagItem::new("a", "A", vec![tag("x", "g1")]);
        let change = toggle(&mut it, &tag("x", "g1"), SelectionPolicy::default());
        assert!(it.tags.is_empty());
        assert_eq!(change.removed, vec![tag("x", "g1")]);
    }

    #[test]
    fn test_toggle_without_replace_is_permanent() {
        let mut it = TagItem::new("a", "A", vec![tag("x", "g1")]);
        let policy = SelectionPolicy::default().permanent();
        let change = toggle(&mut it, &tag("x", "g1"), policy);
        assert!(change.is_empty());
        assert_eq!(it.tag_ids(), vec!["x"]);
    }

    #[test]
    fn test_toggle_single_select_replaces_group_tag() {
        let groups = test_tag_matrix(3, 5);
        let t1 = groups[0].tags[0].clone();
        let t2 = groups[0].tags[1].clone();

        let mut it = item();
        toggle(&mut it, &t1, SelectionPolicy::single_select());
        let change = toggle(&mut it, &t2, SelectionPolicy::single_select());

        assert_eq!(it.tags, vec![t2.clone()]);
        assert_eq!(change.removed, vec![t1]);
        assert_eq!(change.added, vec![t2]);
    }

    #[test]
    fn test_toggle_multi_select_keeps_group_tags() {
        let mut it = item();
        toggle(&mut it, &tag("x", "g1"), SelectionPolicy::multi_select());
        toggle(&mut it, &tag("y", "g1"), SelectionPolicy::multi_select());
        assert_eq!(it.tag_ids(), vec!["x", "y"]);
    }

    #[test]
    fn test_toggle_other_group_untouched() {
        let mut it = TagItem::new("a", "A", vec![tag("x", "g1")]);
        toggle(&mut it, &tag("y", "g2"), SelectionPolicy::single_select());
        assert_eq!(it.tag_ids(), vec!["x", "y"]);
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let groups = test_tag_matrix(3, 4);
        for g in &groups {
            for t in &g.tags {
                let mut it = TagItem::new("a", "A", vec![groups[1].tags[2].clone()]);
                if it.has_tag(&t.id) || it.has_group(&t.group) {
                    continue;
                }
                let before = it.clone();
                toggle(&mut it, t, SelectionPolicy::default());
                toggle(&mut it, t, SelectionPolicy::default());
                assert_eq!(it, before, "toggling {} twice changed the item", t.id);
            }
        }
    }

    #[test]
    fn test_exclusivity_holds_after_any_sequence() {
        let groups = test_tag_matrix(3, 5);
        let all: Vec<&Tag> = groups.iter().flat_map(|g| g.tags.iter()).collect();
        let mut it = item();

        // Deterministic pseudo-random walk over toggle/add calls.
        let mut seed: usize = 7;
        for step in 0..200 {
            seed = (seed * 31 + 11) % 97;
            let t = all[seed % all.len()];
            if step % 3 == 0 {
                add(&mut it, t, SelectionPolicy::single_select());
            } else {
                toggle(&mut it, t, SelectionPolicy::single_select());
            }
            for g in &groups {
                assert!(it.tags_in_group(&g.id).count() <= 1);
            }
        }
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut once = item();
        add(&mut once, &tag("x", "g1"), SelectionPolicy::default());

        let mut twice = item();
        add(&mut twice, &tag("x", "g1"), SelectionPolicy::default());
        let second = add(&mut twice, &tag("x", "g1"), SelectionPolicy::default());

        assert!(second.is_empty());
        assert_eq!(once.tags, twice.tags);
    }

    #[test]
    fn test_add_enforces_exclusivity() {
        let mut it = TagItem::new("a", "A", vec![tag("x", "g1"), tag("z", "g2")]);
        let change = add(&mut it, &tag("y", "g1"), SelectionPolicy::single_select());
        assert_eq!(it.tag_ids(), vec!["z", "y"]);
        assert_eq!(change.removed, vec![tag("x", "g1")]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut it = TagItem::new("a", "A", vec![tag("x", "g1")]);
        assert!(remove(&mut it, "nope").is_empty());
        assert_eq!(it.tag_ids(), vec!["x"]);
    }

    #[test]
    fn test_replace_reports_diff_and_skips_exclusivity() {
        let mut it = TagItem::new("a", "A", vec![tag("x", "g1"), tag("y", "g2")]);
        let change = replace(
            &mut it,
            vec![tag("y", "g2"), tag("p", "g1"), tag("q", "g1"), tag("p", "g1")],
        );
        assert_eq!(it.tag_ids(), vec!["y", "p", "q"]);
        assert_eq!(change.removed, vec![tag("x", "g1")]);
        assert_eq!(change.added, vec![tag("p", "g1"), tag("q", "g1")]);
    }

    #[test]
    fn test_clear() {
        let mut it = TagItem::new("a", "A", vec![tag("x", "g1"), tag("y", "g2")]);
        let change = clear(&mut it);
        assert!(it.tags.is_empty());
        assert_eq!(change.removed.len(), 2);
    }

    #[test]
    fn test_is_complete() {
        let groups = test_tag_matrix(2, 2);
        let mut it = item();
        assert!(!is_complete(&it, &groups));
        add(&mut it, &groups[0].tags[0], SelectionPolicy::default());
        assert!(!is_complete(&it, &groups));
        add(&mut it, &groups[1].tags[1], SelectionPolicy::default());
        assert!(is_complete(&it, &groups));
    }

    #[test]
    fn test_is_complete_false_without_groups() {
        let it = TagItem::new("a", "A", vec![tag("x", "g1")]);
        assert!(!is_complete(&it, &[]));
    }

    #[test]
    fn test_completion_is_monotonic_under_multi_select_add() {
        let groups = test_tag_matrix(3, 3);
        let mut it = item();
        let mut was_complete = false;
        for g in &groups {
            for t in &g.tags {
                add(&mut it, t, SelectionPolicy::multi_select());
                let now = is_complete(&it, &groups);
                assert!(!(was_complete && !now));
                was_complete = now;
            }
        }
        assert!(was_complete);
    }

    #[test]
    fn test_completion_is_monotonic_under_single_select_add() {
        let groups = test_tag_matrix(3, 3);
        let mut it = item();
        let mut was_complete = false;
        for t in groups.iter().flat_map(|g| g.tags.iter()) {
            add(&mut it, t, SelectionPolicy::single_select());
            let now = is_complete(&it, &groups);
            assert!(!(was_complete && !now));
            was_complete = now;
        }
    }

    #[test]
    fn test_group_processing_stats() {
        let groups = test_tag_matrix(4, 2);
        let tags = vec![groups[0].tags[0].clone(), groups[2].tags[1].clone()];
        let stats = group_processing_stats(&tags, &groups);
        assert_eq!(stats.total_groups, 4);
        assert_eq!(stats.processed_groups, 2);
        assert_eq!(stats.unprocessed_groups, 2);
        assert_eq!(stats.completion_percentage, 50);
        assert!(!stats.is_complete);

        let pending: Vec<&str> = unprocessed_groups(&tags, &groups)
            .iter()
            .map(|g| g.id.as_str())
            .collect();
        assert_eq!(pending, vec!["g2", "g4"]);
    }

    #[test]
    fn test_group_processing_stats_empty() {
        let stats = group_processing_stats(&[], &[]);
        assert_eq!(stats.completion_percentage, 0);
        assert!(!stats.is_complete);
    }

    #[test]
    fn test_percent_rounds() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 2), 50);
    }
}
