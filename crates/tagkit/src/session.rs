//! # Tagging Session
//!
//! [`TaggingSession`] ties the pieces together for one tagging pass over a batch of
//! items: it owns the items, a [`GroupPaginator`] over the tag groups, and the
//! configuration, and it publishes what happens.
//!
//! ## Lifecycle
//!
//! 1. `new` validates the config, selects the first item and picks its initial
//!    group. In single-item mode an empty batch gets one placeholder item.
//! 2. Tag operations (`toggle_tag`, `add_tag`, ...) mutate one item through the
//!    selection engine. Unknown item or tag ids return `false` and log a warning.
//! 3. Navigation (`next_item`, `set_current_item`, ...) moves between items and
//!    re-chooses the group for the new item.
//!
//! ## Notifications
//!
//! Two channels, both fired only after a mutation is fully applied:
//!
//! - **State** ([`subscribe_state`](TaggingSession::subscribe_state)): a
//!   [`SessionState`] snapshot, once per mutation.
//! - **Events** ([`subscribe_events`](TaggingSession::subscribe_events)):
//!   [`TaggingEvent`]s. A tag change publishes, in order, `TagRemoved` / `TagAdded`
//!   for each tag, `SelectionChanged`, `GroupCompleted`, `BatchCompleted`, then
//!   `GroupChanged` if the paginator moved.
//!
//! ## Auto-advance
//!
//! - Groups: after a tag is added to the current item, the paginator moves to the
//!   group after the one the tag belongs to.
//! - Items: when the current item becomes complete, a move to the next item is
//!   scheduled `auto_advance_delay_ms` later. Nothing runs in the background; the
//!   owner calls [`poll_auto_advance`](TaggingSession::poll_auto_advance) from its
//!   own loop. Navigating by hand cancels the pending move.

use crate::collection::{completion_stats, CompletionStats};
use crate::config::{ConfigPatch, TaggingConfig};
use crate::error::Result;
use crate::model::{Tag, TagGroup, TagItem};
use crate::observable::{Broadcast, Observable, Subscription};
use crate::paginator::GroupPaginator;
use crate::selection::{self, is_complete, SelectionChange};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, warn};

/// Id of the placeholder item created in single-item mode.
pub const SINGLE_ITEM_ID: &str = "single-item";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum TaggingEvent {
    TagAdded {
        item_id: String,
        item_index: usize,
        tag: Tag,
    },
    TagRemoved {
        item_id: String,
        item_index: usize,
        tag: Tag,
    },
    /// Full tag set of the item after the change.
    SelectionChanged {
        item_id: String,
        item_index: usize,
        tags: Vec<Tag>,
    },
    /// Whether every group now has a tag on the item.
    GroupCompleted {
        item_id: String,
        item_index: usize,
        is_complete: bool,
    },
    GroupChanged {
        group_id: String,
        group_index: usize,
    },
    ItemChanged {
        item_id: String,
        item_index: usize,
    },
    BatchCompleted {
        completed_count: usize,
        total_count: usize,
        all_items_complete: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub items: Vec<TagItem>,
    pub current_item_id: Option<String>,
    pub current_group_id: Option<String>,
    pub config: TaggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingAdvance {
    due: Instant,
    from_index: usize,
}

#[derive(Debug)]
pub struct TaggingSession {
    state: Observable<SessionState>,
    paginator: GroupPaginator,
    events: Broadcast<TaggingEvent>,
    pending: Option<PendingAdvance>,
}

impl TaggingSession {
    pub fn new(items: Vec<TagItem>, groups: Vec<TagGroup>, config: TaggingConfig) -> Result<Self> {
        config.validate()?;

        let mut items = items;
        if items.is_empty() && config.single_item_mode {
            items.push(TagItem::untagged(SINGLE_ITEM_ID, config.single_item_name.clone()));
        }

        let mut paginator = GroupPaginator::new(groups, config.max_visible_tabs, config.window_policy)?;
        if let Some(first) = items.first() {
            paginator.reset_for_item(first, config.initial_group);
        }

        let state = SessionState {
            current_item_id: items.first().map(|i| i.id.clone()),
            current_group_id: paginator.current_group().map(|g| g.id.clone()),
            items,
            config,
        };
        debug!(
            items = state.items.len(),
            groups = paginator.groups().len(),
            "tagging session started"
        );

        Ok(Self {
            state: Observable::new(state),
            paginator,
            events: Broadcast::new(),
            pending: None,
        })
    }

    // --- state access ---

    pub fn state(&self) -> &SessionState {
        self.state.get_state()
    }

    pub fn config(&self) -> &TaggingConfig {
        &self.state().config
    }

    pub fn items(&self) -> &[TagItem] {
        &self.state().items
    }

    pub fn item(&self, item_id: &str) -> Option<&TagItem> {
        self.items().iter().find(|i| i.id == item_id)
    }

    fn index_of(&self, item_id: &str) -> Option<usize> {
        self.items().iter().position(|i| i.id == item_id)
    }

    pub fn current_item_index(&self) -> Option<usize> {
        let id = self.state().current_item_id.as_deref()?;
        self.index_of(id)
    }

    pub fn current_item(&self) -> Option<&TagItem> {
        self.current_item_index().map(|i| &self.items()[i])
    }

    pub fn current_item_tags(&self) -> &[Tag] {
        self.current_item().map(|i| i.tags.as_slice()).unwrap_or(&[])
    }

    /// Tags of `item_id`; empty for an unknown item.
    pub fn item_tags(&self, item_id: &str) -> &[Tag] {
        self.item(item_id).map(|i| i.tags.as_slice()).unwrap_or(&[])
    }

    pub fn has_tag(&self, item_id: &str, tag_id: &str) -> bool {
        self.item(item_id).is_some_and(|i| i.has_tag(tag_id))
    }

    pub fn current_item_name(&self) -> &str {
        self.current_item()
            .map(|i| i.name.as_str())
            .unwrap_or("No items to tag")
    }

    /// `"Item 2 of 5"`, or `"No items"`.
    pub fn item_status(&self) -> String {
        match self.current_item_index() {
            Some(index) => format!("Item {} of {}", index + 1, self.items().len()),
            None => "No items".to_string(),
        }
    }

    pub fn groups(&self) -> &[TagGroup] {
        self.paginator.groups()
    }

    pub fn paginator(&self) -> &GroupPaginator {
        &self.paginator
    }

    pub fn current_group(&self) -> Option<&TagGroup> {
        self.paginator.current_group()
    }

    pub fn visible_groups(&self) -> Vec<&TagGroup> {
        self.paginator.visible_groups()
    }

    fn find_tag(&self, tag_id: &str) -> Option<&Tag> {
        self.groups().iter().find_map(|g| g.tag(tag_id))
    }

    // --- subscriptions ---

    pub fn subscribe_state(&self, listener: impl FnMut(&SessionState) + 'static) -> Subscription {
        self.state.subscribe(listener)
    }

    pub fn subscribe_events(&self, listener: impl FnMut(&TaggingEvent) + 'static) -> Subscription {
        self.events.subscribe(listener)
    }

    // --- item navigation ---

    pub fn set_current_item(&mut self, item_id: &str) -> bool {
        match self.index_of(item_id) {
            Some(index) => {
                self.move_to(index);
                true
            }
            None => {
                warn!(item = item_id, "cannot select unknown item");
                false
            }
        }
    }

    pub fn move_to_item(&mut self, index: usize) -> bool {
        if index >= self.items().len() {
            return false;
        }
        self.move_to(index);
        true
    }

    pub fn can_navigate_next(&self) -> bool {
        self.current_item_index()
            .is_some_and(|i| i + 1 < self.items().len())
    }

    pub fn can_navigate_previous(&self) -> bool {
        self.current_item_index().is_some_and(|i| i > 0)
    }

    pub fn next_item(&mut self) -> bool {
        match self.current_item_index() {
            Some(index) if index + 1 < self.items().len() => {
                self.move_to(index + 1);
                true
            }
            _ => false,
        }
    }

    pub fn previous_item(&mut self) -> bool {
        match self.current_item_index() {
            Some(index) if index > 0 => {
                self.move_to(index - 1);
                true
            }
            _ => false,
        }
    }

    fn move_to(&mut self, index: usize) {
        self.pending = None;

        let policy = self.config().initial_group;
        let item = &self.state.get_state().items[index];
        let item_id = item.id.clone();
        self.paginator.reset_for_item(item, policy);

        let group = self
            .paginator
            .current_index()
            .and_then(|i| self.paginator.groups().get(i).map(|g| (g.id.clone(), i)));
        let group_id = group.as_ref().map(|(id, _)| id.clone());

        self.state.update(|s| {
            s.current_item_id = Some(item_id.clone());
            s.current_group_id = group_id;
        });
        debug!(item = %item_id, index, "moved to item");

        self.events.emit(&TaggingEvent::ItemChanged {
            item_id,
            item_index: index,
        });
        if let Some((group_id, group_index)) = group {
            self.events.emit(&TaggingEvent::GroupChanged {
                group_id,
                group_index,
            });
        }
    }

    // --- tag operations ---

    /// Toggles `tag` on the item. `false` for an unknown item or a no-op (e.g.
    /// removing a tag when replacing is disabled).
    pub fn toggle_tag(&mut self, item_id: &str, tag: &Tag) -> bool {
        let policy = self.config().selection_policy();
        self.apply_to_item(item_id, true, |item| selection::toggle(item, tag, policy))
            .is_some_and(|change| change.applied())
    }

    /// Toggles the catalog tag with `tag_id`.
    pub fn toggle_tag_by_id(&mut self, item_id: &str, tag_id: &str) -> bool {
        let Some(tag) = self.find_tag(tag_id).cloned() else {
            warn!(tag = tag_id, "tag not found in any group");
            return false;
        };
        self.toggle_tag(item_id, &tag)
    }

    /// Adds `tag`; `false` if it was already there.
    pub fn add_tag(&mut self, item_id: &str, tag: &Tag) -> bool {
        let policy = self.config().selection_policy();
        self.apply_to_item(item_id, true, |item| selection::add(item, tag, policy))
            .is_some_and(|change| change.applied())
    }

    pub fn remove_tag(&mut self, item_id: &str, tag_id: &str) -> bool {
        self.apply_to_item(item_id, false, |item| selection::remove(item, tag_id))
            .is_some_and(|change| change.applied())
    }

    /// Replaces the item's tags wholesale. No group exclusivity is applied and the
    /// paginator does not move.
    pub fn set_item_tags(&mut self, item_id: &str, tags: Vec<Tag>) -> bool {
        self.apply_to_item(item_id, false, |item| selection::replace(item, tags))
            .is_some()
    }

    pub fn clear_item_tags(&mut self, item_id: &str) -> bool {
        self.apply_to_item(item_id, false, selection::clear).is_some()
    }

    /// Runs `op` on a copy of the item and commits it if anything changed.
    ///
    /// `None` for an unknown item.
    fn apply_to_item<F>(&mut self, item_id: &str, advance_groups: bool, op: F) -> Option<SelectionChange>
    where
        F: FnOnce(&mut TagItem) -> SelectionChange,
    {
        let Some(index) = self.index_of(item_id) else {
            warn!(item = item_id, "item not found");
            return None;
        };

        let mut item = self.items()[index].clone();
        let change = op(&mut item);
        if change.is_empty() {
            return Some(change);
        }

        let is_current = self.current_item_index() == Some(index);
        let mut group_moved = false;
        if advance_groups && is_current && self.config().auto_advance_groups {
            if let Some(tag) = change.added.last() {
                group_moved = self.paginator.advance_past_group(&tag.group).is_some();
            }
        }
        let current_group = self
            .paginator
            .current_index()
            .and_then(|i| self.paginator.groups().get(i).map(|g| (g.id.clone(), i)));
        let current_group_id = current_group.as_ref().map(|(id, _)| id.clone());

        self.state.update(|s| {
            s.items[index] = item;
            s.current_group_id = current_group_id;
        });

        self.publish_change(index, &change);
        if group_moved {
            if let Some((group_id, group_index)) = current_group {
                self.events.emit(&TaggingEvent::GroupChanged {
                    group_id,
                    group_index,
                });
            }
        }
        self.schedule_auto_advance(index);
        Some(change)
    }

    fn publish_change(&self, index: usize, change: &SelectionChange) {
        let items = self.items();
        let item = &items[index];
        let groups = self.groups();

        for tag in &change.removed {
            self.events.emit(&TaggingEvent::TagRemoved {
                item_id: item.id.clone(),
                item_index: index,
                tag: tag.clone(),
            });
        }
        for tag in &change.added {
            self.events.emit(&TaggingEvent::TagAdded {
                item_id: item.id.clone(),
                item_index: index,
                tag: tag.clone(),
            });
        }
        self.events.emit(&TaggingEvent::SelectionChanged {
            item_id: item.id.clone(),
            item_index: index,
            tags: item.tags.clone(),
        });
        self.events.emit(&TaggingEvent::GroupCompleted {
            item_id: item.id.clone(),
            item_index: index,
            is_complete: is_complete(item, groups),
        });

        let completed_count = items.iter().filter(|i| is_complete(i, groups)).count();
        self.events.emit(&TaggingEvent::BatchCompleted {
            completed_count,
            total_count: items.len(),
            all_items_complete: !items.is_empty() && completed_count == items.len(),
        });
    }

    fn schedule_auto_advance(&mut self, index: usize) {
        if self.current_item_index() != Some(index) {
            return;
        }
        let complete = is_complete(&self.items()[index], self.groups());
        if !complete {
            if self.pending.is_some_and(|p| p.from_index == index) {
                debug!(index, "item no longer complete, auto-advance cancelled");
                self.pending = None;
            }
            return;
        }
        if !self.config().auto_advance_items || !self.can_navigate_next() {
            return;
        }

        let delay = self.config().auto_advance_delay();
        debug!(index, delay_ms = delay.as_millis() as u64, "auto-advance scheduled");
        self.pending = Some(PendingAdvance {
            due: Instant::now() + delay,
            from_index: index,
        });
    }

    /// When the pending auto-advance is scheduled to run, if any.
    pub fn pending_auto_advance(&self) -> Option<Instant> {
        self.pending.map(|p| p.due)
    }

    /// Performs a pending auto-advance once `now` has reached its due time.
    ///
    /// Returns `true` if the session moved to the next item.
    pub fn poll_auto_advance(&mut self, now: Instant) -> bool {
        let Some(pending) = self.pending else {
            return false;
        };
        if now < pending.due {
            return false;
        }
        self.pending = None;
        if self.current_item_index() != Some(pending.from_index) {
            return false;
        }
        self.next_item()
    }

    // --- completion ---

    pub fn is_item_complete(&self, item_id: &str) -> bool {
        self.item(item_id)
            .is_some_and(|i| is_complete(i, self.groups()))
    }

    pub fn completion_stats(&self) -> CompletionStats {
        completion_stats(self.items(), self.groups(), self.current_item())
    }

    pub fn incomplete_items(&self) -> Vec<&TagItem> {
        self.items()
            .iter()
            .filter(|i| !is_complete(i, self.groups()))
            .collect()
    }

    // --- groups ---

    pub fn select_group(&mut self, group_id: &str) -> bool {
        match self.paginator.index_of(group_id) {
            Some(index) => self.select_group_index(index),
            None => {
                warn!(group = group_id, "cannot select unknown group");
                false
            }
        }
    }

    pub fn select_group_index(&mut self, index: usize) -> bool {
        if !self.paginator.select_group(index) {
            return false;
        }
        let group_id = self.paginator.groups()[index].id.clone();
        let for_state = group_id.clone();
        self.state.update(|s| s.current_group_id = Some(for_state));
        self.events.emit(&TaggingEvent::GroupChanged {
            group_id,
            group_index: index,
        });
        true
    }

    /// Replaces the group catalog and re-chooses the group for the current item.
    ///
    /// Completion is re-checked against the new catalog, so a pending item
    /// advance survives only if the current item is still complete.
    pub fn set_tag_groups(&mut self, groups: Vec<TagGroup>) {
        self.pending = None;
        self.paginator.set_groups(groups);
        let policy = self.config().initial_group;
        let current = self.current_item_index();
        if let Some(index) = current {
            let item = &self.state.get_state().items[index];
            self.paginator.reset_for_item(item, policy);
        }

        let group = self
            .paginator
            .current_index()
            .and_then(|i| self.paginator.groups().get(i).map(|g| (g.id.clone(), i)));
        let group_id = group.as_ref().map(|(id, _)| id.clone());
        self.state.update(|s| s.current_group_id = group_id);

        if let Some((group_id, group_index)) = group {
            self.events.emit(&TaggingEvent::GroupChanged {
                group_id,
                group_index,
            });
        }
        if let Some(index) = current {
            self.schedule_auto_advance(index);
        }
    }

    // --- configuration ---

    /// Applies `patch` after validating the result. On error nothing changes.
    ///
    /// Turning on single-item mode in an empty session adds the placeholder item;
    /// a new `single_item_name` renames an existing placeholder.
    pub fn update_config(&mut self, patch: ConfigPatch) -> Result<()> {
        let mut config = self.config().clone();
        config.apply(patch);
        config.validate()?;

        self.paginator.set_max_visible_tabs(config.max_visible_tabs)?;
        self.paginator.set_policy(config.window_policy);
        if !config.auto_advance_items {
            self.pending = None;
        }

        let add_placeholder = config.single_item_mode && self.items().is_empty();
        let placeholder_name = config.single_item_name.clone();
        self.state.update(|s| {
            s.config = config;
            if add_placeholder {
                s.items.push(TagItem::untagged(SINGLE_ITEM_ID, placeholder_name));
            } else if let Some(item) = s.items.iter_mut().find(|i| i.id == SINGLE_ITEM_ID) {
                item.name = placeholder_name;
            }
        });
        if add_placeholder {
            self.move_to(0);
        }
        Ok(())
    }

    /// Drops all items and groups and restores the default configuration.
    pub fn reset(&mut self) -> Result<()> {
        let config = TaggingConfig::default();
        self.paginator = GroupPaginator::new(Vec::new(), config.max_visible_tabs, config.window_policy)?;
        self.pending = None;
        self.state.set(SessionState {
            items: Vec::new(),
            current_item_id: None,
            current_group_id: None,
            config,
        });
        Ok(())
    }
}
