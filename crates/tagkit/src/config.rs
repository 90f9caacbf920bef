//! # Configuration
//!
//! Tagging behavior is configured through [`TaggingConfig`], loaded by [`confique`]
//! from layered sources.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `TAGKIT_MAX_VISIBLE_TABS`, `TAGKIT_CAN_REPLACE`, etc.
//! 2. **Config file**: a `tagkit.toml` passed to [`TaggingConfig::load`].
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `allow_multiple_per_group` | `false` | Multi-select inside a group |
//! | `can_replace` | `true` | Selected tags may be toggled off |
//! | `max_visible_tabs` | `5` | Size of the visible group window (must be > 0) |
//! | `auto_advance_groups` | `true` | Move to the next group after a tag is added |
//! | `auto_advance_items` | `false` | Move to the next item once the current one is complete |
//! | `auto_advance_delay_ms` | `500` | Pause before an automatic item advance |
//! | `initial_group` | `always-first` | `always-first` or `smart` (first untagged group) |
//! | `window_policy` | `clamp` | `clamp` or `wrap-fill` at the tail of the group list |
//! | `single_item_mode` | `false` | Create a placeholder item when none are given |
//! | `single_item_name` | `Current Item` | Name of the placeholder item |

use crate::error::{Result, TagkitError};
use crate::paginator::{InitialGroupPolicy, ParsePolicyError, WindowPolicy};
use crate::selection::SelectionPolicy;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "tagkit.toml";

/// Configuration for a tagging session.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TaggingConfig {
    /// Allow several tags of the same group on one item
    #[config(env = "TAGKIT_ALLOW_MULTIPLE_PER_GROUP", default = false)]
    pub allow_multiple_per_group: bool,

    /// Allow a selected tag to be toggled off again
    #[config(env = "TAGKIT_CAN_REPLACE", default = true)]
    pub can_replace: bool,

    /// Number of group tabs visible at once
    #[config(env = "TAGKIT_MAX_VISIBLE_TABS", default = 5)]
    pub max_visible_tabs: usize,

    #[config(env = "TAGKIT_AUTO_ADVANCE_GROUPS", default = true)]
    pub auto_advance_groups: bool,

    #[config(env = "TAGKIT_AUTO_ADVANCE_ITEMS", default = false)]
    pub auto_advance_items: bool,

    #[config(env = "TAGKIT_AUTO_ADVANCE_DELAY_MS", default = 500)]
    pub auto_advance_delay_ms: u64,

    #[config(
        env = "TAGKIT_INITIAL_GROUP",
        parse_env = parse_initial_group,
        default = "always-first"
    )]
    pub initial_group: InitialGroupPolicy,

    #[config(
        env = "TAGKIT_WINDOW_POLICY",
        parse_env = parse_window_policy,
        default = "clamp"
    )]
    pub window_policy: WindowPolicy,

    #[config(env = "TAGKIT_SINGLE_ITEM_MODE", default = false)]
    pub single_item_mode: bool,

    #[config(env = "TAGKIT_SINGLE_ITEM_NAME", default = "Current Item")]
    pub single_item_name: String,
}

fn parse_initial_group(value: &str) -> std::result::Result<InitialGroupPolicy, ParsePolicyError> {
    value.parse()
}

fn parse_window_policy(value: &str) -> std::result::Result<WindowPolicy, ParsePolicyError> {
    value.parse()
}

impl Default for TaggingConfig {
    fn default() -> Self {
        Self {
            allow_multiple_per_group: false,
            can_replace: true,
            max_visible_tabs: 5,
            auto_advance_groups: true,
            auto_advance_items: false,
            auto_advance_delay_ms: 500,
            initial_group: InitialGroupPolicy::AlwaysFirst,
            window_policy: WindowPolicy::Clamp,
            single_item_mode: false,
            single_item_name: "Current Item".to_string(),
        }
    }
}

impl TaggingConfig {
    /// Loads configuration from the environment, then `path` (if it exists), then
    /// the compiled defaults. The result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        let config = builder.load()?;
        config.validate()?;
        Ok(config)
    }

    /// Default location of `tagkit.toml` in the OS config directory.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "tagkit")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Rejects settings that cannot work, before any session is built on them.
    pub fn validate(&self) -> Result<()> {
        if self.max_visible_tabs == 0 {
            return Err(TagkitError::InvalidConfiguration(
                "max_visible_tabs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn selection_policy(&self) -> SelectionPolicy {
        SelectionPolicy {
            allow_multiple_per_group: self.allow_multiple_per_group,
            can_replace: self.can_replace,
        }
    }

    pub fn auto_advance_delay(&self) -> Duration {
        Duration::from_millis(self.auto_advance_delay_ms)
    }

    /// Applies the fields set in `patch`, leaving the others untouched.
    pub fn apply(&mut self, patch: ConfigPatch) {
        if let Some(v) = patch.allow_multiple_per_group {
            self.allow_multiple_per_group = v;
        }
        if let Some(v) = patch.can_replace {
            self.can_replace = v;
        }
        if let Some(v) = patch.max_visible_tabs {
            self.max_visible_tabs = v;
        }
        if let Some(v) = patch.auto_advance_groups {
            self.auto_advance_groups = v;
        }
        if let Some(v) = patch.auto_advance_items {
            self.auto_advance_items = v;
        }
        if let Some(v) = patch.auto_advance_delay_ms {
            self.auto_advance_delay_ms = v;
        }
        if let Some(v) = patch.initial_group {
            self.initial_group = v;
        }
        if let Some(v) = patch.window_policy {
            self.window_policy = v;
        }
        if let Some(v) = patch.single_item_mode {
            self.single_item_mode = v;
        }
        if let Some(v) = patch.single_item_name {
            self.single_item_name = v;
        }
    }
}

/// A partial update to a [`TaggingConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigPatch {
    pub allow_multiple_per_group: Option<bool>,
    pub can_replace: Option<bool>,
    pub max_visible_tabs: Option<usize>,
    pub auto_advance_groups: Option<bool>,
    pub auto_advance_items: Option<bool>,
    pub auto_advance_delay_ms: Option<u64>,
    pub initial_group: Option<InitialGroupPolicy>,
    pub window_policy: Option<WindowPolicy>,
    pub single_item_mode: Option<bool>,
    pub single_item_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = TaggingConfig::default();
        assert_eq!(config.max_visible_tabs, 5);
        assert!(config.can_replace);
        assert!(!config.allow_multiple_per_group);
        assert_eq!(config.initial_group, InitialGroupPolicy::AlwaysFirst);
        assert_eq!(config.auto_advance_delay(), Duration::from_millis(500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_visible_tabs_rejected() {
        let config = TaggingConfig {
            max_visible_tabs: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, TagkitError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_selection_policy_from_config() {
        let config = TaggingConfig {
            allow_multiple_per_group: true,
            can_replace: false,
            ..Default::default()
        };
        assert_eq!(
            config.selection_policy(),
            SelectionPolicy {
                allow_multiple_per_group: true,
                can_replace: false,
            }
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            "max_visible_tabs = 3\ninitial_group = \"smart\"\nwindow_policy = \"wrap-fill\"\n",
        )
        .unwrap();

        let config = TaggingConfig::load(Some(&path)).unwrap();
        assert_eq!(config.max_visible_tabs, 3);
        assert_eq!(config.initial_group, InitialGroupPolicy::Smart);
        assert_eq!(config.window_policy, WindowPolicy::WrapFill);
        assert!(config.can_replace);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = TaggingConfig::load(Some(&path)).unwrap();
        assert_eq!(config.single_item_name, "Current Item");
    }

    #[test]
    fn test_load_rejects_invalid_file_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "max_visible_tabs = 0\n").unwrap();
        assert!(TaggingConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_apply_patch() {
        let mut config = TaggingConfig::default();
        config.apply(ConfigPatch {
            auto_advance_items: Some(true),
            max_visible_tabs: Some(2),
            ..Default::default()
        });
        assert!(config.auto_advance_items);
        assert_eq!(config.max_visible_tabs, 2);
        assert!(config.auto_advance_groups);
    }

    #[test]
    fn test_apply_patch_single_item_fields() {
        let mut config = TaggingConfig::default();
        config.apply(ConfigPatch {
            single_item_mode: Some(true),
            single_item_name: Some("Draft".to_string()),
            ..Default::default()
        });
        assert!(config.single_item_mode);
        assert_eq!(config.single_item_name, "Draft");
        assert!(config.can_replace);
    }
}
