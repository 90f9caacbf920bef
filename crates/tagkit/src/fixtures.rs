//! Ready-made catalogs and items.
//!
//! [`quick_setup`] returns one of three sample scenarios (file management,
//! project tasks, blog posts). Tags are assigned round-robin so the output is the
//! same on every call: item `k` (0-based) takes one tag from each of the first
//! `k % 3 + 1` groups, picking the tag at position `k` (wrapping) in each.
//!
//! [`test_tag_matrix`] generates synthetic groups for tests and benchmarks.

use crate::model::{Tag, TagGroup, TagItem};
use crate::tags::{create_tagged_item, tags_from_simple_data};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    FileManagement,
    ProjectTasks,
    BlogPosts,
}

impl Scenario {
    pub fn all() -> [Scenario; 3] {
        [Scenario::FileManagement, Scenario::ProjectTasks, Scenario::BlogPosts]
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scenario::FileManagement => "file-management",
            Scenario::ProjectTasks => "project-tasks",
            Scenario::BlogPosts => "blog-posts",
        };
        f.write_str(name)
    }
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scenario::all()
            .into_iter()
            .find(|scenario| scenario.to_string() == s)
            .ok_or_else(|| format!("unknown scenario '{}'", s))
    }
}

/// Groups plus items, ready to feed a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickSetup {
    pub tag_groups: Vec<TagGroup>,
    pub items: Vec<TagItem>,
}

type GroupData = &'static [(&'static str, &'static [&'static str])];

const FILE_MANAGEMENT_GROUPS: GroupData = &[
    ("Type", &["Document", "Image", "Video", "Audio"]),
    ("Priority", &["Low", "Medium", "High"]),
    ("Status", &["New", "Reviewed", "Archived"]),
];

const FILE_MANAGEMENT_ITEMS: &[&str] = &[
    "Meeting Notes.docx",
    "Vacation Photo.jpg",
    "Project Video.mp4",
    "Podcast Episode.mp3",
    "Budget Spreadsheet.xlsx",
];

const PROJECT_TASKS_GROUPS: GroupData = &[
    ("Status", &["Todo", "In Progress", "Review", "Done"]),
    ("Priority", &["Low", "Medium", "High", "Urgent"]),
    ("Team", &["Frontend", "Backend", "Design", "QA"]),
];

const PROJECT_TASKS_ITEMS: &[&str] = &[
    "Update login page",
    "Fix database migration",
    "Design new icons",
    "Test payment flow",
    "Deploy to staging",
];

const BLOG_POSTS_GROUPS: GroupData = &[
    ("Category", &["Tech", "Lifestyle", "Business", "Travel"]),
    ("Status", &["Draft", "Review", "Published"]),
    ("Audience", &["Beginner", "Intermediate", "Advanced"]),
];

const BLOG_POSTS_ITEMS: &[&str] = &[
    "Getting Started with Angular",
    "My Trip to Japan",
    "Startup Lessons Learned",
    "Advanced TypeScript Tips",
    "Working Remote Successfully",
];

pub fn quick_setup(scenario: Scenario) -> QuickSetup {
    let (data, item_names) = match scenario {
        Scenario::FileManagement => (FILE_MANAGEMENT_GROUPS, FILE_MANAGEMENT_ITEMS),
        Scenario::ProjectTasks => (PROJECT_TASKS_GROUPS, PROJECT_TASKS_ITEMS),
        Scenario::BlogPosts => (BLOG_POSTS_GROUPS, BLOG_POSTS_ITEMS),
    };

    let tag_groups = tags_from_simple_data(data);
    let items = items_from_names(item_names, &tag_groups);
    QuickSetup { tag_groups, items }
}

fn items_from_names(names: &[&str], groups: &[TagGroup]) -> Vec<TagItem> {
    names
        .iter()
        .enumerate()
        .map(|(k, name)| {
            let take = if groups.is_empty() { 0 } else { k % 3 % groups.len() + 1 };
            let tags: Vec<_> = groups
                .iter()
                .take(take)
                .filter(|g| !g.tags.is_empty())
                .map(|g| g.tags[k % g.tags.len()].clone())
                .collect();
            create_tagged_item(format!("item-{}", k + 1), *name, &tags)
        })
        .collect()
}

/// `group_count` groups `g1..gN` named `Group i`, each with `tags_per_group` tags
/// `g{i}-t{j}` named `Badge: {i * j}`.
pub fn test_tag_matrix(group_count: usize, tags_per_group: usize) -> Vec<TagGroup> {
    (1..=group_count)
        .map(|i| {
            let group_id = format!("g{}", i);
            let tags = (1..=tags_per_group)
                .map(|j| {
                    Tag::new(
                        format!("{}-t{}", group_id, j),
                        group_id.as_str(),
                        format!("Badge: {}", i * j),
                    )
                })
                .collect();
            TagGroup::new(group_id.as_str(), format!("Group {}", i), tags)
        })
        .collect()
}
