//! # Group Paginator
//!
//! Keeps a sliding window of at most `max_visible_tabs` groups over an ordered list
//! of [`TagGroup`]s, tracks the current group, and implements auto-advance.
//!
//! ## The Window
//!
//! When there are no more groups than `max_visible_tabs`, every group is visible and
//! the window start is pinned to 0. Otherwise the window always holds exactly
//! `max_visible_tabs` groups. What happens at the tail depends on [`WindowPolicy`]:
//!
//! - **Clamp** (default): `window_start` stays in `0..=len - max_visible_tabs`, so the
//!   window never runs past the last group.
//! - **WrapFill**: `window_start` may be any group index; a window running past the
//!   end is backfilled from the start of the list, giving a cyclic view.
//!
//! ## Moving the Window
//!
//! | Action | Window move |
//! |--------|-------------|
//! | Select the last visible group, more groups follow | forward by `max_visible_tabs - 1` |
//! | Select the first visible group, window not at 0 | backward by `max_visible_tabs - 1` |
//! | Select a group outside the window | center the window on it |
//! | Advance to the next group | smallest shift that keeps it visible |
//!
//! Advancing is cyclic: after the last group comes the first.

use crate::error::{Result, TagkitError};
use crate::model::{TagGroup, TagItem};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// How the first group is chosen when a new item is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InitialGroupPolicy {
    /// Always start at the first group.
    #[default]
    AlwaysFirst,
    /// Start at the first group the item has no tag in yet.
    Smart,
}

/// Behavior of the visible window at the end of the group list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowPolicy {
    #[default]
    Clamp,
    WrapFill,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown policy '{0}'")]
pub struct ParsePolicyError(String);

impl FromStr for InitialGroupPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always-first" | "first" => Ok(Self::AlwaysFirst),
            "smart" => Ok(Self::Smart),
            other => Err(ParsePolicyError(other.to_string())),
        }
    }
}

impl fmt::Display for InitialGroupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlwaysFirst => write!(f, "always-first"),
            Self::Smart => write!(f, "smart"),
        }
    }
}

impl FromStr for WindowPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clamp" => Ok(Self::Clamp),
            "wrap-fill" | "wrap" => Ok(Self::WrapFill),
            other => Err(ParsePolicyError(other.to_string())),
        }
    }
}

impl fmt::Display for WindowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clamp => write!(f, "clamp"),
            Self::WrapFill => write!(f, "wrap-fill"),
        }
    }
}

/// Windowed navigation over an ordered list of groups.
#[derive(Debug, Clone)]
pub struct GroupPaginator {
    groups: Vec<TagGroup>,
    max_visible_tabs: usize,
    window_start: usize,
    current: Option<usize>,
    policy: WindowPolicy,
}

impl GroupPaginator {
    /// Builds a paginator positioned on the first group.
    ///
    /// Fails with [`TagkitError::InvalidConfiguration`] when `max_visible_tabs` is 0.
    pub fn new(groups: Vec<TagGroup>, max_visible_tabs: usize, policy: WindowPolicy) -> Result<Self> {
        if max_visible_tabs == 0 {
            return Err(TagkitError::InvalidConfiguration(
                "max_visible_tabs must be greater than 0".to_string(),
            ));
        }
        let current = if groups.is_empty() { None } else { Some(0) };
        Ok(Self {
            groups,
            max_visible_tabs,
            window_start: 0,
            current,
            policy,
        })
    }

    pub fn groups(&self) -> &[TagGroup] {
        &self.groups
    }

    pub fn max_visible_tabs(&self) -> usize {
        self.max_visible_tabs
    }

    pub fn policy(&self) -> WindowPolicy {
        self.policy
    }

    pub fn window_start(&self) -> usize {
        self.window_start
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_group(&self) -> Option<&TagGroup> {
        self.current.and_then(|i| self.groups.get(i))
    }

    pub fn index_of(&self, group_id: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.id == group_id)
    }

    /// Replaces the group list and goes back to the first group.
    pub fn set_groups(&mut self, groups: Vec<TagGroup>) {
        self.current = if groups.is_empty() { None } else { Some(0) };
        self.groups = groups;
        self.window_start = 0;
    }

    pub fn set_max_visible_tabs(&mut self, max_visible_tabs: usize) -> Result<()> {
        if max_visible_tabs == 0 {
            return Err(TagkitError::InvalidConfiguration(
                "max_visible_tabs must be greater than 0".to_string(),
            ));
        }
        self.max_visible_tabs = max_visible_tabs;
        self.window_start = self.clamp_start(self.window_start);
        if let Some(current) = self.current {
            self.ensure_visible(current);
        }
        Ok(())
    }

    pub fn set_policy(&mut self, policy: WindowPolicy) {
        self.policy = policy;
        self.window_start = self.clamp_start(self.window_start);
    }

    /// Whether every group fits in the window.
    fn fits(&self) -> bool {
        self.groups.len() <= self.max_visible_tabs
    }

    fn max_start(&self) -> usize {
        self.groups.len().saturating_sub(self.max_visible_tabs)
    }

    fn clamp_start(&self, start: usize) -> usize {
        if self.fits() {
            return 0;
        }
        match self.policy {
            WindowPolicy::Clamp => start.min(self.max_start()),
            WindowPolicy::WrapFill => start % self.groups.len(),
        }
    }

    /// Moves the window start, clamped to the range allowed by the policy.
    pub fn set_window_start(&mut self, start: usize) {
        self.window_start = self.clamp_start(start);
    }

    /// Indexes of the visible groups, in display order.
    pub fn visible_indices(&self) -> Vec<usize> {
        let len = self.groups.len();
        if self.fits() {
            return (0..len).collect();
        }
        match self.policy {
            WindowPolicy::Clamp => {
                let start = self.window_start.min(self.max_start());
                (start..start + self.max_visible_tabs).collect()
            }
            WindowPolicy::WrapFill => (0..self.max_visible_tabs)
                .map(|k| (self.window_start + k) % len)
                .collect(),
        }
    }

    pub fn visible_groups(&self) -> Vec<&TagGroup> {
        self.visible_indices()
            .into_iter()
            .map(|i| &self.groups[i])
            .collect()
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible_indices().contains(&index)
    }

    /// Makes `index` the current group and pages the window around it.
    ///
    /// Returns `false` (and changes nothing) for an out-of-range index.
    pub fn select_group(&mut self, index: usize) -> bool {
        if index >= self.groups.len() {
            return false;
        }
        self.current = Some(index);
        if self.fits() {
            self.window_start = 0;
            return true;
        }

        let visible = self.visible_indices();
        let step = self.max_visible_tabs - 1;
        let before = self.window_start;

        match visible.iter().position(|&i| i == index) {
            None => {
                let centered = index.saturating_sub(self.max_visible_tabs / 2);
                self.window_start = centered.min(self.max_start());
            }
            Some(pos) if pos == self.max_visible_tabs - 1 && self.has_more_after_window() => {
                self.window_start = self.clamp_start(self.window_start + step);
            }
            Some(0) if self.window_start > 0 => {
                self.window_start = self.window_start.saturating_sub(step);
            }
            Some(_) => {}
        }

        if before != self.window_start {
            debug!(
                group = index,
                from = before,
                to = self.window_start,
                "paged group window"
            );
        }
        true
    }

    /// Selects the group with `group_id`; `false` if there is none.
    pub fn select_group_by_id(&mut self, group_id: &str) -> bool {
        match self.index_of(group_id) {
            Some(index) => self.select_group(index),
            None => false,
        }
    }

    fn has_more_after_window(&self) -> bool {
        match self.policy {
            WindowPolicy::Clamp => self.window_start + self.max_visible_tabs < self.groups.len(),
            WindowPolicy::WrapFill => true,
        }
    }

    /// Moves to the next group (cyclic) and returns its index.
    pub fn advance_to_next_group(&mut self) -> Option<usize> {
        if self.groups.is_empty() {
            return None;
        }
        let next = match self.current {
            Some(current) => (current + 1) % self.groups.len(),
            None => 0,
        };
        self.current = Some(next);
        self.ensure_visible(next);
        debug!(group = next, window_start = self.window_start, "advanced to next group");
        Some(next)
    }

    /// Moves to the group after `group_id` (cyclic). Falls back to
    /// [`advance_to_next_group`](Self::advance_to_next_group) for an unknown id.
    pub fn advance_past_group(&mut self, group_id: &str) -> Option<usize> {
        if let Some(index) = self.index_of(group_id) {
            self.current = Some(index);
        }
        self.advance_to_next_group()
    }

    /// Shifts the window by the smallest amount that makes `index` visible.
    fn ensure_visible(&mut self, index: usize) {
        if self.fits() {
            self.window_start = 0;
            return;
        }
        if self.is_visible(index) {
            return;
        }
        let len = self.groups.len();
        let max = self.max_visible_tabs;
        match self.policy {
            WindowPolicy::Clamp => {
                if index < self.window_start {
                    self.window_start = index;
                } else {
                    self.window_start = (index + 1 - max).min(self.max_start());
                }
            }
            WindowPolicy::WrapFill => {
                let ahead = (index + len - self.window_start) % len;
                let forward = ahead + 1 - max;
                let backward = len - ahead;
                self.window_start = if forward <= backward {
                    (self.window_start + forward) % len
                } else {
                    index
                };
            }
        }
    }

    /// Picks the group to show first for `item` under `policy`.
    pub fn choose_initial_group(&self, item: &TagItem, policy: InitialGroupPolicy) -> Option<usize> {
        if self.groups.is_empty() {
            return None;
        }
        match policy {
            InitialGroupPolicy::AlwaysFirst => Some(0),
            InitialGroupPolicy::Smart => Some(
                self.groups
                    .iter()
                    .position(|g| !item.has_group(&g.id))
                    .unwrap_or(0),
            ),
        }
    }

    /// Re-initializes for a newly shown item: window back to the start, current
    /// group chosen by `policy`.
    pub fn reset_for_item(&mut self, item: &TagItem, policy: InitialGroupPolicy) {
        self.window_start = 0;
        self.current = self.choose_initial_group(item, policy);
        if let Some(index) = self.current {
            self.ensure_visible(index);
        }
    }
}
