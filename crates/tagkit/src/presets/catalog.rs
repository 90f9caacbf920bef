//! Built-in tag group catalogs.
//!
//! Ten catalogs cover common tagging domains. Each has a [`PresetInfo`]
//! describing it, one or more tag groups, and a handful of sample item names for
//! demos.
//!
//! | Id | Groups |
//! |----|--------|
//! | `colors` | colors |
//! | `priority` | priority |
//! | `status` | status |
//! | `fileTypes` | file-types |
//! | `emotions` | emotions |
//! | `departments` | departments |
//! | `severity` | severity |
//! | `skills` | frontend, backend |
//! | `content` | content-type, audience |
//! | `geography` | continents, climate |
//!
//! Some tag ids repeat between catalogs (`critical`, `video`). When catalogs are
//! combined, a repeated id is prefixed with its group id so ids stay unique.

use crate::model::{Tag, TagGroup, TagItem};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub use_case: String,
}

type GroupDef = (&'static str, &'static str, &'static [(&'static str, &'static str)]);

struct CatalogEntry {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
    use_case: &'static str,
    groups: &'static [GroupDef],
    samples: &'static [&'static str],
}

const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        id: "colors",
        name: "Colors",
        description: "Basic color labels for visual organization",
        icon: "palette",
        use_case: "File organization, project categorization",
        groups: &[(
            "colors",
            "Colors",
            &[
                ("red", "Red"),
                ("blue", "Blue"),
                ("green", "Green"),
                ("yellow", "Yellow"),
                ("purple", "Purple"),
                ("orange", "Orange"),
                ("pink", "Pink"),
                ("brown", "Brown"),
            ],
        )],
        samples: &[
            "Project Alpha Documentation",
            "Marketing Campaign Assets",
            "Q4 Budget Report",
            "User Research Findings",
            "Website Redesign Mockups",
        ],
    },
    CatalogEntry {
        id: "priority",
        name: "Priority Levels",
        description: "Task and item priority classification",
        icon: "flag",
        use_case: "Task management, issue tracking",
        groups: &[(
            "priority",
            "Priority",
            &[
                ("low", "Low"),
                ("medium", "Medium"),
                ("high", "High"),
                ("urgent", "Urgent"),
                ("critical", "Critical"),
            ],
        )],
        samples: &[
            "Fix critical login bug",
            "Update user documentation",
            "Plan team holiday party",
            "Review security audit",
            "Optimize database queries",
        ],
    },
    CatalogEntry {
        id: "status",
        name: "Status Workflow",
        description: "Common workflow states",
        icon: "track_changes",
        use_case: "Project management, content workflow",
        groups: &[(
            "status",
            "Status",
            &[
                ("todo", "To Do"),
                ("in-progress", "In Progress"),
                ("review", "Under Review"),
                ("testing", "Testing"),
                ("done", "Completed"),
                ("blocked", "Blocked"),
            ],
        )],
        samples: &[
            "Homepage redesign",
            "API documentation",
            "Mobile app testing",
            "Customer feedback analysis",
            "Performance optimization",
        ],
    },
    CatalogEntry {
        id: "fileTypes",
        name: "File Types",
        description: "Common file format categories",
        icon: "folder",
        use_case: "Digital asset management, file organization",
        groups: &[(
            "file-types",
            "File Types",
            &[
                ("document", "Document"),
                ("image", "Image"),
                ("video", "Video"),
                ("audio", "Audio"),
                ("archive", "Archive"),
                ("spreadsheet", "Spreadsheet"),
                ("presentation", "Presentation"),
                ("code", "Code"),
            ],
        )],
        samples: &[
            "presentation.pptx",
            "vacation_photos.zip",
            "budget_2024.xlsx",
            "demo_video.mp4",
            "meeting_notes.docx",
        ],
    },
    CatalogEntry {
        id: "emotions",
        name: "Emotions",
        description: "Mood and feeling indicators",
        icon: "mood",
        use_case: "Journal entries, feedback classification",
        groups: &[(
            "emotions",
            "Emotions",
            &[
                ("happy", "Happy"),
                ("sad", "Sad"),
                ("excited", "Excited"),
                ("frustrated", "Frustrated"),
                ("calm", "Calm"),
                ("anxious", "Anxious"),
                ("confident", "Confident"),
                ("tired", "Tired"),
            ],
        )],
        samples: &[
            "My first day at work",
            "Project deadline stress",
            "Team celebration",
            "Customer complaint",
            "Successful product launch",
        ],
    },
    CatalogEntry {
        id: "departments",
        name: "Departments",
        description: "Company departments and teams",
        icon: "groups",
        use_case: "Corporate organization, team assignment",
        groups: &[(
            "departments",
            "Departments",
            &[
                ("engineering", "Engineering"),
                ("design", "Design"),
                ("marketing", "Marketing"),
                ("sales", "Sales"),
                ("hr", "Human Resources"),
                ("finance", "Finance"),
                ("operations", "Operations"),
                ("legal", "Legal"),
            ],
        )],
        samples: &[
            "New employee onboarding",
            "Product roadmap planning",
            "Brand guidelines update",
            "Sales target review",
            "Legal compliance check",
        ],
    },
    CatalogEntry {
        id: "severity",
        name: "Issue Severity",
        description: "Bug and issue severity levels",
        icon: "warning",
        use_case: "Bug tracking, incident management",
        groups: &[(
            "severity",
            "Issue Severity",
            &[
                ("trivial", "Trivial"),
                ("minor", "Minor"),
                ("major", "Major"),
                ("critical", "Critical"),
                ("blocker", "Blocker"),
            ],
        )],
        samples: &[
            "Button text typo on homepage",
            "Slow loading checkout page",
            "Payment system not working",
            "Database connection failures",
            "Site completely down",
        ],
    },
    CatalogEntry {
        id: "skills",
        name: "Skills & Technologies",
        description: "Technical skills and tools",
        icon: "code",
        use_case: "Resume building, project tagging",
        groups: &[
            (
                "frontend",
                "Frontend",
                &[
                    ("angular", "Angular"),
                    ("react", "React"),
                    ("vue", "Vue"),
                    ("typescript", "TypeScript"),
                    ("css", "CSS"),
                ],
            ),
            (
                "backend",
                "Backend",
                &[
                    ("nodejs", "Node.js"),
                    ("python", "Python"),
                    ("java", "Java"),
                    ("csharp", "C#"),
                    ("golang", "Go"),
                ],
            ),
        ],
        samples: &[
            "E-commerce website project",
            "Mobile banking app",
            "Data visualization dashboard",
            "Real-time chat system",
            "Machine learning pipeline",
        ],
    },
    CatalogEntry {
        id: "content",
        name: "Content Types",
        description: "Content classification for media",
        icon: "article",
        use_case: "Content management, blog organization",
        groups: &[
            (
                "content-type",
                "Content Type",
                &[
                    ("tutorial", "Tutorial"),
                    ("blog-post", "Blog Post"),
                    ("video", "Video"),
                    ("podcast", "Podcast"),
                    ("infographic", "Infographic"),
                    ("case-study", "Case Study"),
                ],
            ),
            (
                "audience",
                "Target Audience",
                &[
                    ("beginner", "Beginner"),
                    ("intermediate", "Intermediate"),
                    ("advanced", "Advanced"),
                    ("expert", "Expert"),
                ],
            ),
        ],
        samples: &[
            "Getting Started with React",
            "Advanced TypeScript Patterns",
            "Building Scalable APIs",
            "UI/UX Best Practices",
            "DevOps for Beginners",
        ],
    },
    CatalogEntry {
        id: "geography",
        name: "Geography",
        description: "Regions and locations",
        icon: "public",
        use_case: "Travel planning, location-based organization",
        groups: &[
            (
                "continents",
                "Continents",
                &[
                    ("north-america", "North America"),
                    ("south-america", "South America"),
                    ("europe", "Europe"),
                    ("asia", "Asia"),
                    ("africa", "Africa"),
                    ("oceania", "Oceania"),
                ],
            ),
            (
                "climate",
                "Climate",
                &[
                    ("tropical", "Tropical"),
                    ("temperate", "Temperate"),
                    ("arctic", "Arctic"),
                    ("desert", "Desert"),
                    ("mountain", "Mountain"),
                ],
            ),
        ],
        samples: &[
            "Tokyo business trip",
            "European conference tour",
            "Remote work from Bali",
            "New York office opening",
            "Antarctica research expedition",
        ],
    },
];

const DEFAULT_SAMPLES: &[&str] = &["Sample Item 1", "Sample Item 2", "Sample Item 3"];

fn entry(preset_id: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|e| e.id == preset_id)
}

impl CatalogEntry {
    fn info(&self) -> PresetInfo {
        PresetInfo {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            icon: Some(self.icon.to_string()),
            use_case: self.use_case.to_string(),
        }
    }
}

/// Metadata for every catalog, in catalog order.
pub fn available_presets() -> Vec<PresetInfo> {
    CATALOG.iter().map(CatalogEntry::info).collect()
}

pub fn preset_info(preset_id: &str) -> Option<PresetInfo> {
    entry(preset_id).map(CatalogEntry::info)
}

/// Tag groups of one catalog; empty for an unknown id.
pub fn preset_tag_groups(preset_id: &str) -> Vec<TagGroup> {
    let Some(entry) = entry(preset_id) else {
        return Vec::new();
    };
    entry
        .groups
        .iter()
        .map(|(group_id, group_name, tags)| {
            let tags = tags
                .iter()
                .map(|(id, name)| Tag::new(*id, *group_id, *name))
                .collect();
            TagGroup::new(*group_id, *group_name, tags)
        })
        .collect()
}

/// Groups of several catalogs, in the order given. Unknown ids and groups
/// already included are skipped.
pub fn combined_preset_tag_groups<S: AsRef<str>>(preset_ids: &[S]) -> Vec<TagGroup> {
    let mut groups: Vec<TagGroup> = Vec::new();
    let mut tag_ids: HashSet<String> = HashSet::new();

    for preset_id in preset_ids {
        for mut group in preset_tag_groups(preset_id.as_ref()) {
            if groups.iter().any(|g| g.id == group.id) {
                continue;
            }
            for tag in &mut group.tags {
                if tag_ids.contains(&tag.id) {
                    tag.id = format!("{}-{}", group.id, tag.id);
                }
                tag_ids.insert(tag.id.clone());
            }
            groups.push(group);
        }
    }
    groups
}

/// Untagged demo items for a catalog. Unknown ids get generic samples.
pub fn sample_items_for_preset(preset_id: &str) -> Vec<TagItem> {
    let names = entry(preset_id).map_or(DEFAULT_SAMPLES, |e| e.samples);
    names
        .iter()
        .enumerate()
        .map(|(i, name)| TagItem::untagged((i + 1).to_string(), *name))
        .collect()
}
