use crate::model::TagItem;
use std::cmp::Ordering;

/// Sorts by `name`. Stable: items with equal names keep their relative order in
/// both directions.
pub fn sort_by_name(items: &[TagItem], ascending: bool) -> Vec<TagItem> {
    sorted_by(items, ascending, |a, b| a.name.cmp(&b.name))
}

/// Sorts by number of applied tags. Stable.
pub fn sort_by_tag_count(items: &[TagItem], ascending: bool) -> Vec<TagItem> {
    sorted_by(items, ascending, |a, b| a.tags.len().cmp(&b.tags.len()))
}

fn sorted_by<F>(items: &[TagItem], ascending: bool, cmp: F) -> Vec<TagItem>
where
    F: Fn(&TagItem, &TagItem) -> Ordering,
{
    let mut out = items.to_vec();
    if ascending {
        out.sort_by(|a, b| cmp(a, b));
    } else {
        out.sort_by(|a, b| cmp(b, a));
    }
    out
}
