//! # Flexible Conversion Layer
//!
//! Turns arbitrary records (anything implementing [`Taggable`], e.g. JSON objects)
//! into [`TagItem`]s, derives tag groups from the tags found on them, and shapes
//! tagged items for storage.
//!
//! ## Field Resolution
//!
//! [`convert_to_tag_item`] reads fields through a [`ConversionConfig`]. Each field
//! falls back through a chain; a value counts as missing when it is absent,
//! `null`, `false`, `0` or the empty string.
//!
//! | Item field | Lookup chain |
//! |------------|--------------|
//! | `id` | `id_property`, `id` (missing -> [`TagkitError::MissingIdentifier`]) |
//! | `name` | `name_property`, `name`, `title`, `label`, then `"Item {id}"` |
//! | `tags` | `existing_tags_property` (default `tags`), only when it is a list |
//!
//! Batch conversion fails on the first record without an id.
//!
//! ## Tag Groups
//!
//! [`auto_generate_tag_groups`] builds one group per group id seen on the items,
//! in first-seen order, named from a caller-supplied map or by title-casing the
//! id. [`create_flexible_tagging_setup`] adds extra tags on top and returns items
//! and groups together.
//!
//! [`TagItem`]: crate::model::TagItem
//! [`TagkitError::MissingIdentifier`]: crate::error::TagkitError::MissingIdentifier

mod database;
mod record;
mod setup;

pub use database::{prepare_for_database, prepare_for_database_at, DatabaseRecord};
pub use record::{convert_many_to_tag_items, convert_to_tag_item, ConversionConfig, Taggable};
pub use setup::{auto_generate_tag_groups, create_flexible_tagging_setup, GroupNames, TaggingSetup};
