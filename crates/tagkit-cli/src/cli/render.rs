//! # Rendering Module
//!
//! Text output for each command. Every function takes library values and
//! returns a `String`; printing is left to the handlers, which keeps these
//! functions testable without a terminal.
//!
//! ## Item Layout
//!
//! Item lists are aligned in three columns:
//! - `index` (right-aligned, [`COL_INDEX`] chars): 1-based position
//! - `name` (padded to the longest name, at most [`COL_NAME_MAX`] columns)
//! - `tags`: tag names, comma separated
//!
//! Widths are measured with `unicode-width`, so wide characters line up.

use super::styles::THEME;
use serde_json::Value;
use std::collections::BTreeMap;
use tagkit::collection::CompletionStats;
use tagkit::color::ExtendedTagGroup;
use tagkit::convert::{DatabaseRecord, TaggingSetup};
use tagkit::presets::catalog::PresetInfo;
use tagkit::presets::SortFilterPreset;
use tagkit::{Tag, TagGroup, TagItem, TaggingConfig};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const COL_INDEX: usize = 4;
pub const COL_NAME_MAX: usize = 40;
pub const ELLIPSIS: &str = "…";

/// Cuts `s` to at most `width` display columns, marking the cut with an ellipsis.
pub fn truncate_to_width(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    let budget = width.saturating_sub(ELLIPSIS.width());
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str(ELLIPSIS);
    out
}

/// Pads `s` with spaces to `width` display columns.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(fill))
}

fn tag_list(tags: &[Tag]) -> String {
    tags.iter()
        .map(|t| THEME.tag.apply_to(&t.name).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn render_items(items: &[TagItem]) -> String {
    if items.is_empty() {
        return format!("{}\n", THEME.muted.apply_to("No items."));
    }
    let name_width = items
        .iter()
        .map(|i| i.name.width())
        .max()
        .unwrap_or(0)
        .min(COL_NAME_MAX);

    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        let index = format!("{:>width$}", format!("{}.", i + 1), width = COL_INDEX);
        let name = pad_to_width(&truncate_to_width(&item.name, name_width), name_width);
        let tags = if item.tags.is_empty() {
            THEME.faint.apply_to("(untagged)").to_string()
        } else {
            tag_list(&item.tags)
        };
        out.push_str(&format!(
            "{} {}  {}\n",
            THEME.index.apply_to(index),
            name,
            tags
        ));
    }
    out
}

pub fn render_groups(groups: &[TagGroup]) -> String {
    if groups.is_empty() {
        return format!("{}\n", THEME.muted.apply_to("No tag groups."));
    }
    let mut out = String::new();
    for group in groups {
        out.push_str(&format!(
            "{} {}\n",
            THEME.group.apply_to(&group.name),
            THEME.muted.apply_to(format!("({})", group.id))
        ));
        for tag in &group.tags {
            out.push_str(&format!(
                "  - {} {}\n",
                THEME.tag.apply_to(&tag.name),
                THEME.faint.apply_to(format!("[{}]", tag.id))
            ));
        }
    }
    out
}

pub fn render_colored_groups(groups: &[ExtendedTagGroup]) -> String {
    let mut out = String::new();
    for group in groups {
        out.push_str(&format!(
            "{} {} {}\n",
            THEME.group.apply_to(&group.name),
            THEME.muted.apply_to(format!("({})", group.id)),
            THEME.faint.apply_to(&group.background_color)
        ));
        for tag in &group.tags {
            out.push_str(&format!(
                "  - {} {}\n",
                THEME.tag.apply_to(&tag.tag.name),
                THEME.faint.apply_to(format!("{} on {}", tag.color, tag.background_color))
            ));
        }
    }
    out
}

pub fn render_stats(
    usage: &BTreeMap<String, usize>,
    unique: &[Tag],
    completion: &CompletionStats,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", THEME.title.apply_to("Completion")));
    out.push_str(&format!(
        "  {} of {} items complete ({}%)\n",
        completion.completed_items, completion.total_items, completion.progress_percent
    ));

    out.push_str(&format!("{}\n", THEME.title.apply_to("Tag usage")));
    if unique.is_empty() {
        out.push_str(&format!("  {}\n", THEME.muted.apply_to("No tags in use.")));
    }
    let width = unique.iter().map(|t| t.name.width()).max().unwrap_or(0);
    for tag in unique {
        let count = usage.get(&tag.id).copied().unwrap_or(0);
        out.push_str(&format!(
            "  {}  {}\n",
            THEME.tag.apply_to(pad_to_width(&tag.name, width)),
            THEME.count.apply_to(count)
        ));
    }
    out
}

pub fn render_setup(setup: &TaggingSetup) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        THEME.title.apply_to("Groups"),
        render_groups(&setup.tag_groups),
        THEME.title.apply_to("Items"),
        render_items(&setup.items)
    )
}

pub fn render_records(records: &[DatabaseRecord]) -> String {
    let mut out = String::new();
    for record in records {
        let mut line = format!(
            "{} {}",
            THEME.index.apply_to(&record.item.id),
            record.item.name
        );
        if let Some(count) = record.tag_count {
            line.push_str(&format!(" {}", THEME.count.apply_to(format!("{} tags", count))));
        }
        if let Some(at) = record.tagged_at {
            line.push_str(&format!(
                " {}",
                THEME.faint.apply_to(at.format("%Y-%m-%d %H:%M:%S").to_string())
            ));
        }
        out.push_str(&line);
        out.push('\n');
    }
    out
}

pub fn render_catalog(presets: &[PresetInfo]) -> String {
    let width = presets.iter().map(|p| p.id.width()).max().unwrap_or(0);
    let mut out = String::new();
    for preset in presets {
        out.push_str(&format!(
            "{}  {} {}\n",
            THEME.index.apply_to(pad_to_width(&preset.id, width)),
            THEME.title.apply_to(&preset.name),
            THEME.muted.apply_to(&preset.description)
        ));
    }
    out
}

pub fn render_presets(presets: &[SortFilterPreset]) -> String {
    if presets.is_empty() {
        return format!("{}\n", THEME.muted.apply_to("No presets."));
    }
    let mut out = String::new();
    for preset in presets {
        let direction = if preset.asc { "asc" } else { "desc" };
        let mut line = format!(
            "{} {}",
            THEME.title.apply_to(&preset.name),
            THEME.muted.apply_to(format!("{:?} {}", preset.sort_by, direction))
        );
        if !preset.filter_tags.is_empty() {
            line.push_str(&format!(
                " {}",
                THEME.tag.apply_to(preset.filter_tags.join(", "))
            ));
        }
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// One item after tagging, plus where the session ended up.
pub fn render_tag_result(
    item: &TagItem,
    complete: bool,
    current_group: Option<&TagGroup>,
    completion: &CompletionStats,
) -> String {
    let mut out = render_items(std::slice::from_ref(item));
    let status = if complete {
        THEME.success.apply_to("complete").to_string()
    } else {
        THEME.warning.apply_to("incomplete").to_string()
    };
    out.push_str(&format!("Item is {}\n", status));
    if let Some(group) = current_group {
        out.push_str(&format!("Next group: {}\n", THEME.group.apply_to(&group.name)));
    }
    out.push_str(&format!(
        "Batch: {} of {} complete ({}%)\n",
        completion.completed_items, completion.total_items, completion.progress_percent
    ));
    out
}

pub fn render_config(config: &TaggingConfig, source: Option<&std::path::Path>) -> String {
    let mut out = String::new();
    let value = serde_json::to_value(config).unwrap_or(Value::Null);
    if let Value::Object(map) = value {
        let width = map.keys().map(|k| k.width()).max().unwrap_or(0);
        for (key, value) in map {
            let shown = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            out.push_str(&format!(
                "{} = {}\n",
                THEME.title.apply_to(pad_to_width(&key, width)),
                shown
            ));
        }
    }
    match source {
        Some(path) => out.push_str(&format!(
            "{}\n",
            THEME.faint.apply_to(format!("file: {}", path.display()))
        )),
        None => out.push_str(&format!("{}\n", THEME.faint.apply_to("file: none"))),
    }
    out
}
