//! # Tagkit Architecture
//!
//! Tagkit is a **UI-agnostic tag-state library**: it holds what an interactive
//! tagging screen needs to know (which item is being tagged, which tags it has,
//! which group tabs are showing) and none of how that screen is drawn.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session Layer (session.rs)                                 │
//! │  - TaggingSession: items, current item, paginator, config   │
//! │  - Returns bools for unknown ids, logs a warning            │
//! │  - Publishes state snapshots and TaggingEvents              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engine Layer (selection.rs, paginator.rs)                  │
//! │  - Toggle/add/remove/replace with group exclusivity         │
//! │  - Tab windowing and auto-advance over ordered groups       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Data Layer (model.rs, tags/, collection/, convert/)        │
//! │  - Tag, TagGroup, TagItem and their builders                │
//! │  - Pure sort/filter/statistics over item slices             │
//! │  - Record conversion and storage shaping                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O in Core
//!
//! Nothing in this crate writes to stdout/stderr or touches a terminal. The only
//! I/O is reading a config file in [`config`]. Diagnostics go through `tracing`;
//! installing a subscriber is the binary's job.
//!
//! Everything is single-threaded and synchronous. Time-based behavior (advancing
//! to the next item after a delay) is a pending action the owner polls, see
//! [`session`].
//!
//! ## Module Overview
//!
//! - [`model`]: `Tag`, `TagGroup`, `TagItem`
//! - [`selection`]: the selection engine and completion checks
//! - [`paginator`]: group tab windowing
//! - [`session`]: the `TaggingSession` facade
//! - [`collection`]: sort, filter, group-by and statistics
//! - [`convert`]: arbitrary records to items, storage shaping
//! - [`tags`]: builders and naming helpers
//! - [`presets`]: sort/filter presets and the built-in tag catalogs
//! - [`color`]: palette and contrast colors for tags
//! - [`observable`]: subscriptions for state and events
//! - [`config`]: `TaggingConfig` loading and validation
//! - [`fixtures`]: demo data and the tag matrix generator
//! - [`error`]: error types

pub mod collection;
pub mod color;
pub mod config;
pub mod convert;
pub mod error;
pub mod fixtures;
pub mod model;
pub mod observable;
pub mod paginator;
pub mod presets;
pub mod selection;
pub mod session;
pub mod tags;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use config::{ConfigPatch, TaggingConfig};
pub use error::{Result, TagkitError};
pub use model::{Tag, TagGroup, TagItem};
pub use paginator::{GroupPaginator, InitialGroupPolicy, WindowPolicy};
pub use selection::{SelectionChange, SelectionPolicy};
pub use session::{SessionState, TaggingEvent, TaggingSession};
