//! # Collection Operations
//!
//! Pure functions over slices of [`TagItem`]s. Inputs are never modified; every
//! operation returns new values.
//!
//! | Operation | Module | Result |
//! |-----------|--------|--------|
//! | [`sort_by_name`], [`sort_by_tag_count`] | `sort` | stable sort, either direction |
//! | [`filter_by_tags`], [`TagFilter`] | `filter` | OR / AND match on tag ids |
//! | [`group_by_tag`], [`group_by_group_id`] | `group` | partitions and buckets |
//! | [`unique_tags`], [`tag_usage_stats`], [`completion_stats`] | `stats` | aggregates |
//!
//! [`TagItem`]: crate::model::TagItem

mod filter;
mod group;
mod sort;
mod stats;

pub use filter::{filter_by_tags, TagFilter, TagMatch};
pub use group::{group_by_group_id, group_by_tag, TagPartition};
pub use sort::{sort_by_name, sort_by_tag_count};
pub use stats::{completion_stats, tag_usage_stats, unique_tags, CompletionStats};
