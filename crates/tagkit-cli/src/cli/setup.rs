use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "v0.4.2"
/// Format for dev builds: "v0.4.2\ndev: abc1234 2024-01-15 14:30"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "tagkit",
    bin_name = "tagkit",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(about = "Sort, filter, convert and tag JSON item lists", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print JSON instead of text
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Config file (default: tagkit.toml in the user config directory)
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub config: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    Name,
    TagCount,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PaletteName {
    Rainbow,
    Cubehelix,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sort items by name or tag count
    #[command(display_order = 1)]
    Sort {
        /// Items file (`-` for stdin)
        items: PathBuf,

        #[arg(long, value_enum, default_value = "name")]
        by: SortKey,

        /// Sort descending
        #[arg(long)]
        desc: bool,
    },

    /// Keep items bearing the given tags
    #[command(display_order = 2)]
    Filter {
        /// Items file (`-` for stdin)
        items: PathBuf,

        /// Tag id (repeatable)
        #[arg(short, long = "tag", value_name = "TAG_ID")]
        tags: Vec<String>,

        /// Require every tag instead of any
        #[arg(long)]
        all: bool,
    },

    /// Tag usage and completion statistics
    #[command(display_order = 3)]
    Stats {
        /// Items file (`-` for stdin)
        items: PathBuf,

        /// Groups file; derived from the items when omitted
        #[arg(short, long)]
        groups: Option<PathBuf>,
    },

    /// Derive tag groups from the tags found on items
    #[command(display_order = 4)]
    Groups {
        /// Items file (`-` for stdin)
        items: PathBuf,

        /// Group display name, as GROUP_ID=NAME (repeatable)
        #[arg(short, long = "name", value_name = "GROUP_ID=NAME")]
        names: Vec<String>,
    },

    /// Convert arbitrary JSON records into items and groups
    #[command(display_order = 5)]
    Convert {
        /// Records file (`-` for stdin)
        records: PathBuf,

        /// Field holding the item id (falls back to `id`)
        #[arg(long)]
        id_property: Option<String>,

        /// Field holding the item name (falls back to name, title, label)
        #[arg(long)]
        name_property: Option<String>,

        /// Field holding existing tags (default `tags`)
        #[arg(long)]
        tags_property: Option<String>,

        /// JSON file with extra tags to merge into the groups
        #[arg(long, value_name = "PATH")]
        extra_tags: Option<PathBuf>,

        /// Group display name, as GROUP_ID=NAME (repeatable)
        #[arg(short, long = "name", value_name = "GROUP_ID=NAME")]
        names: Vec<String>,
    },

    /// Shape items for storage
    #[command(display_order = 6)]
    Export {
        /// Items file (`-` for stdin)
        items: PathBuf,

        /// Omit taggedAt, tagCount and tagsByGroup
        #[arg(long)]
        no_metadata: bool,
    },

    /// Apply tag toggles to one item through a tagging session
    #[command(display_order = 7)]
    Tag {
        /// Items file (`-` for stdin)
        items: PathBuf,

        /// Item to tag
        #[arg(short, long)]
        item: String,

        /// Tag id to toggle, applied in order (repeatable)
        #[arg(short, long = "toggle", value_name = "TAG_ID", required = true)]
        toggles: Vec<String>,

        /// Groups file; derived from the items when omitted
        #[arg(short, long)]
        groups: Option<PathBuf>,
    },

    /// Built-in tag group catalogs
    #[command(display_order = 8)]
    Catalog {
        #[command(subcommand)]
        action: Option<CatalogCommands>,
    },

    /// Sort/filter presets
    #[command(display_order = 9)]
    Preset {
        #[command(subcommand)]
        action: PresetCommands,
    },

    /// Print a demo data set
    #[command(display_order = 10)]
    Demo {
        /// file-management, project-tasks or blog-posts
        scenario: String,
    },

    /// Show the effective configuration
    #[command(display_order = 11)]
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// List catalogs (default)
    List,

    /// Show the tag groups of one or more catalogs, merged
    Show {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,

        /// Color the groups with a palette
        #[arg(long, value_enum)]
        palette: Option<PaletteName>,
    },
}

#[derive(Subcommand, Debug)]
pub enum PresetCommands {
    /// List the presets in a file
    List {
        /// Presets file (JSON array)
        presets: PathBuf,
    },

    /// Sort and filter items with a named preset
    Apply {
        /// Items file (`-` for stdin)
        items: PathBuf,

        /// Presets file (JSON array)
        #[arg(short, long)]
        presets: PathBuf,

        /// Preset name
        #[arg(short, long)]
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration (default)
    Show,

    /// Print the default config file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_filter() {
        let cli =
            Cli::try_parse_from(["tagkit", "filter", "items.json", "-t", "a", "--tag", "b", "--all", "--json"])
                .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Filter { tags, all, .. } => {
                assert_eq!(tags, vec!["a", "b"]);
                assert!(all);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_sort_defaults() {
        let cli = Cli::try_parse_from(["tagkit", "sort", "-"]).unwrap();
        match cli.command {
            Commands::Sort { items, by, desc } => {
                assert_eq!(items, PathBuf::from("-"));
                assert_eq!(by, SortKey::Name);
                assert!(!desc);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_tag_requires_toggle() {
        assert!(Cli::try_parse_from(["tagkit", "tag", "items.json", "--item", "1"]).is_err());
    }
}
