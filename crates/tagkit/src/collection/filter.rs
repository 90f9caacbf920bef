//! Tag filtering.
//!
//! A [`TagFilter`] holds a set of tag ids and a [`TagMatch`] mode, and can be
//! tested against any item. [`filter_by_tags`] is the one-shot form.

use crate::model::TagItem;
use serde::{Deserialize, Serialize};

/// How the filter's tag ids combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagMatch {
    /// Item has at least one of the tags (OR).
    #[default]
    Any,
    /// Item has every one of the tags (AND).
    All,
}

impl TagMatch {
    pub fn from_match_all(match_all: bool) -> Self {
        if match_all {
            TagMatch::All
        } else {
            TagMatch::Any
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    pub tag_ids: Vec<String>,
    pub mode: TagMatch,
}

impl TagFilter {
    pub fn new<I, S>(tag_ids: I, mode: TagMatch) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tag_ids: tag_ids.into_iter().map(Into::into).collect(),
            mode,
        }
    }

    pub fn any<I, S>(tag_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(tag_ids, TagMatch::Any)
    }

    pub fn all<I, S>(tag_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(tag_ids, TagMatch::All)
    }

    /// An empty filter matches every item.
    pub fn matches(&self, item: &TagItem) -> bool {
        if self.tag_ids.is_empty() {
            return true;
        }
        match self.mode {
            TagMatch::Any => self.tag_ids.iter().any(|id| item.has_tag(id)),
            TagMatch::All => self.tag_ids.iter().all(|id| item.has_tag(id)),
        }
    }

    pub fn apply(&self, items: &[TagItem]) -> Vec<TagItem> {
        items.iter().filter(|i| self.matches(i)).cloned().collect()
    }
}

/// Keeps items bearing any (`match_all == false`) or all of `tag_ids`.
/// Empty `tag_ids` keeps everything.
pub fn filter_by_tags<S: AsRef<str>>(items: &[TagItem], tag_ids: &[S], match_all: bool) -> Vec<TagItem> {
    TagFilter::new(
        tag_ids.iter().map(|s| s.as_ref().to_string()),
        TagMatch::from_match_all(match_all),
    )
    .apply(items)
}
