//! # Color Assignment
//!
//! Deterministic mapping of palette colors onto groups and tags, plus a readable
//! foreground for each background.
//!
//! Colors are presentation only: [`ExtendedTag`] wraps a [`Tag`] and never takes
//! part in its identity.
//!
//! ## Distribution
//!
//! For a palette of `P` colors, `G` groups and `T` tags in total:
//!
//! - group `g` gets color `(g * max(1, P / G)) % P`
//! - the `n`-th tag overall gets color `(n * max(1, P / T)) % P`
//!
//! so colors spread evenly across the palette whatever the catalog size.

use crate::model::{Tag, TagGroup};
use serde::{Deserialize, Serialize};

/// Rainbow palette, 100 colors.
pub const PALETTE_RAINBOW: &[&str] = &[
    "#6e40aa", "#753fad", "#7d3faf", "#863eb1", "#8e3eb2", "#963db3", "#9e3db3", "#a73cb3",
    "#af3cb2", "#b73cb1", "#bf3caf", "#c73dac", "#cf3da9", "#d63ea6", "#dd3fa2", "#e4419d",
    "#ea4299", "#f04494", "#f5468e", "#fa4988", "#fe4b83", "#ff4e7c", "#ff5276", "#ff5670",
    "#ff5a6a", "#ff5e63", "#ff635d", "#ff6757", "#ff6d51", "#ff724c", "#ff7847", "#ff7d42",
    "#ff833d", "#ff8a39", "#ff9036", "#fb9633", "#f69d31", "#f2a42f", "#edaa2e", "#e7b12e",
    "#e2b72f", "#dcbe30", "#d7c432", "#d1ca34", "#ccd038", "#c6d63c", "#c1dc41", "#bce146",
    "#b7e64c", "#b3eb53", "#aff05b", "#a6f159", "#9cf357", "#92f457", "#88f557", "#7ff658",
    "#75f65a", "#6cf65c", "#63f75f", "#5af663", "#52f667", "#4af56c", "#43f471", "#3cf276",
    "#36f17c", "#30ef82", "#2bec89", "#27e98f", "#23e696", "#20e29c", "#1ddfa3", "#1bdbaa",
    "#1ad6b0", "#19d1b6", "#19cdbc", "#1ac7c2", "#1bc2c7", "#1cbccc", "#1eb7d1", "#21b1d5",
    "#23abd8", "#27a5db", "#2a9fde", "#2e98df", "#3292e1", "#368ce1", "#3a86e1", "#3f80e1",
    "#437ae0", "#4874de", "#4c6edb", "#5169d9", "#5563d5", "#595ed1", "#5d59cd", "#6054c8",
    "#6450c3", "#674bbd", "#6947b7", "#6c43b1",
];

/// Cubehelix palette (dark to light), 100 colors.
pub const PALETTE_CUBEHELIX: &[&str] = &[
    "#000000", "#040104", "#080308", "#0c050d", "#0f0612", "#120817", "#140a1c", "#160d21",
    "#180f26", "#19122b", "#1a1530", "#1a1835", "#1b1c39", "#1a1f3d", "#1a2341", "#1a2744",
    "#192b47", "#182f4a", "#17344b", "#17384d", "#163d4e", "#15414e", "#15464e", "#154a4e",
    "#154f4d", "#16534c", "#17574a", "#185b48", "#1a5f46", "#1c6244", "#1f6642", "#22693f",
    "#266c3c", "#2a6f3a", "#2f7137", "#347335", "#397533", "#407632", "#467830", "#4d792f",
    "#54792f", "#5b7a2f", "#637a2f", "#6b7b31", "#737b32", "#7a7a35", "#827a37", "#8a7a3b",
    "#927a3f", "#997944", "#a07949", "#a7794f", "#ad7955", "#b3795c", "#b97963", "#be796a",
    "#c37a72", "#c77b7a", "#ca7c82", "#cd7d8a", "#d07e93", "#d2809b", "#d382a3", "#d485ab",
    "#d487b3", "#d48aba", "#d48dc1", "#d391c8", "#d294ce", "#d198d4", "#cf9cda", "#cea1df",
    "#cca5e3", "#caaae7", "#c9aeea", "#c7b3ed", "#c5b8ef", "#c4bcf1", "#c3c1f2", "#c2c6f3",
    "#c1caf3", "#c1cef3", "#c2d3f3", "#c2d7f3", "#c3dbf2", "#c5def2", "#c7e2f1", "#c9e5f0",
    "#cce8f0", "#cfebef", "#d2eeef", "#d6f0ef", "#daf2ef", "#def4ef", "#e3f6f0", "#e8f8f2",
    "#ecf9f3", "#f1fbf6", "#f6fcf8", "#fafefb",
];

pub const BLACK: &str = "#000000";
pub const WHITE: &str = "#FFFFFF";

/// Black or white, whichever reads better on `background`.
///
/// Accepts `#RRGGBB` and `#RGB` (the `#` is optional). Returns `None` for
/// anything else. Uses WCAG relative luminance with a 0.5 threshold.
pub fn contrast_color(background: &str) -> Option<&'static str> {
    let (r, g, b) = parse_hex(background)?;
    let luminance = 0.2126 * linear(r) + 0.7152 * linear(g) + 0.0722 * linear(b);
    Some(if luminance > 0.5 { BLACK } else { WHITE })
}

fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let full = match hex.len() {
        6 => hex.to_string(),
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        _ => return None,
    };
    let channel = |i: usize| u8::from_str_radix(&full[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn linear(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// A tag with presentation colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedTag {
    #[serde(flatten)]
    pub tag: Tag,
    /// Foreground (text) color.
    pub color: String,
    pub background_color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedTagGroup {
    pub id: String,
    pub name: String,
    pub tags: Vec<ExtendedTag>,
    pub color: String,
    pub background_color: String,
}

impl ExtendedTagGroup {
    /// Drops the colors again.
    pub fn to_group(&self) -> TagGroup {
        TagGroup::new(
            self.id.clone(),
            self.name.clone(),
            self.tags.iter().map(|t| t.tag.clone()).collect(),
        )
    }
}

/// Colors every group and tag from `palette`.
///
/// An empty palette leaves everything with empty color strings.
pub fn assign_colors(groups: &[TagGroup], palette: &[&str]) -> Vec<ExtendedTagGroup> {
    let total_tags: usize = groups.iter().map(|g| g.tags.len()).sum();
    let len = palette.len();
    let tag_step = step(len, total_tags);
    let group_step = step(len, groups.len());

    let pick = |index: usize| -> (String, String) {
        if len == 0 {
            return (String::new(), String::new());
        }
        let background = palette[index % len];
        let foreground = contrast_color(background).unwrap_or(WHITE);
        (foreground.to_string(), background.to_string())
    };

    let mut tag_index = 0;
    groups
        .iter()
        .enumerate()
        .map(|(gi, group)| {
            let (color, background_color) = pick(gi * group_step);
            let tags = group
                .tags
                .iter()
                .map(|tag| {
                    let (color, background_color) = pick(tag_index * tag_step);
                    tag_index += 1;
                    ExtendedTag {
                        tag: tag.clone(),
                        color,
                        background_color,
                    }
                })
                .collect();
            ExtendedTagGroup {
                id: group.id.clone(),
                name: group.name.clone(),
                tags,
                color,
                background_color,
            }
        })
        .collect()
}

fn step(palette_len: usize, count: usize) -> usize {
    if count == 0 {
        1
    } else {
        (palette_len / count).max(1)
    }
}
