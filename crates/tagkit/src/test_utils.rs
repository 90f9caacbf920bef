use crate::config::TaggingConfig;
use crate::fixtures::test_tag_matrix;
use crate::model::{Tag, TagItem};
use crate::session::TaggingSession;

/// `count` untagged items with ids `item-1..` and names `Item 1..`.
pub fn untagged_items(count: usize) -> Vec<TagItem> {
    (1..=count)
        .map(|i| TagItem::untagged(format!("item-{}", i), format!("Item {}", i)))
        .collect()
}

/// The tag `g{group}-t{n}` from [`test_tag_matrix`], without its display name.
pub fn matrix_tag(group: usize, n: usize) -> Tag {
    Tag::new(format!("g{}-t{}", group, n), format!("g{}", group), "t")
}

/// A session over [`untagged_items`] and a `groups` x 5 tag matrix.
pub fn matrix_session(items: usize, groups: usize, config: TaggingConfig) -> TaggingSession {
    match TaggingSession::new(untagged_items(items), test_tag_matrix(groups, 5), config) {
        Ok(session) => session,
        Err(e) => panic!("invalid test session config: {}", e),
    }
}
