//! # CLI Layer
//!
//! The CLI layer is the **only** place in the workspace that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs a `tracing` subscriber
//! - Reads input files
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: shell arguments to typed commands via clap
//! 2. **Input Loading**: JSON files or stdin into library types
//! 3. **Dispatch**: one handler per command, each a thin call into `tagkit`
//! 4. **Output**: `--json` prints the library value, otherwise `render`
//!
//! Errors are `anyhow` values carrying the file or argument they concern;
//! `main` prints them and exits with 1.

use super::render;
use super::setup::{
    CatalogCommands, Cli, Commands, ConfigCommands, PaletteName, PresetCommands, SortKey,
};
use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tagkit::collection::{
    completion_stats, filter_by_tags, sort_by_name, sort_by_tag_count, tag_usage_stats,
    unique_tags, CompletionStats,
};
use tagkit::color::{assign_colors, PALETTE_CUBEHELIX, PALETTE_RAINBOW};
use tagkit::convert::{
    auto_generate_tag_groups, create_flexible_tagging_setup, prepare_for_database,
    ConversionConfig, GroupNames,
};
use tagkit::fixtures::{quick_setup, Scenario};
use tagkit::presets::catalog::{available_presets, combined_preset_tag_groups, preset_info};
use tagkit::presets::{apply_preset, PresetStore, SortFilterPreset};
use tagkit::{Tag, TagGroup, TagItem, TaggingConfig, TaggingSession, TagkitError};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Env var read before `RUST_LOG`.
pub const LOG_ENV: &str = "TAGKIT_LOG";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let out = Output { json: cli.json };
    match cli.command {
        Commands::Sort { items, by, desc } => handle_sort(&out, &items, by, desc),
        Commands::Filter { items, tags, all } => handle_filter(&out, &items, &tags, all),
        Commands::Stats { items, groups } => handle_stats(&out, &items, groups.as_deref()),
        Commands::Groups { items, names } => handle_groups(&out, &items, &names),
        Commands::Convert {
            records,
            id_property,
            name_property,
            tags_property,
            extra_tags,
            names,
        } => {
            let mut config = ConversionConfig::new();
            config.id_property = id_property;
            config.name_property = name_property;
            config.existing_tags_property = tags_property;
            handle_convert(&out, &records, &config, extra_tags.as_deref(), &names)
        }
        Commands::Export { items, no_metadata } => handle_export(&out, &items, !no_metadata),
        Commands::Tag {
            items,
            item,
            toggles,
            groups,
        } => handle_tag(
            &out,
            cli.config.as_deref(),
            &items,
            &item,
            &toggles,
            groups.as_deref(),
        ),
        Commands::Catalog { action } => match action.unwrap_or(CatalogCommands::List) {
            CatalogCommands::List => handle_catalog_list(&out),
            CatalogCommands::Show { ids, palette } => handle_catalog_show(&out, &ids, palette),
        },
        Commands::Preset { action } => match action {
            PresetCommands::List { presets } => handle_preset_list(&out, &presets),
            PresetCommands::Apply {
                items,
                presets,
                name,
            } => handle_preset_apply(&out, &items, &presets, &name),
        },
        Commands::Demo { scenario } => handle_demo(&out, &scenario),
        Commands::Config { action } => {
            handle_config(&out, cli.config.as_deref(), action.unwrap_or(ConfigCommands::Show))
        }
    }
}

/// Logs go to stderr. `--verbose` forces `debug`; otherwise `TAGKIT_LOG`, then
/// `RUST_LOG`, then `warn`.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

struct Output {
    json: bool,
}

impl Output {
    fn emit<T, F>(&self, value: &T, text: F) -> Result<()>
    where
        T: Serialize + ?Sized,
        F: FnOnce() -> String,
    {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            print!("{}", text());
        }
        Ok(())
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = read_input(path)?;
    let value = serde_json::from_str(&raw)
        .map_err(TagkitError::from)
        .with_context(|| format!("parsing {}", path.display()))?;
    debug!(path = %path.display(), "loaded input");
    Ok(value)
}

fn load_groups(path: Option<&Path>, items: &[TagItem]) -> Result<Vec<TagGroup>> {
    match path {
        Some(path) => read_json(path),
        None => Ok(auto_generate_tag_groups(items, &GroupNames::new())),
    }
}

/// Parses repeated `GROUP_ID=NAME` arguments.
fn parse_group_names(pairs: &[String]) -> Result<GroupNames> {
    pairs
        .iter()
        .map(|pair| match pair.split_once('=') {
            Some((id, name)) if !id.is_empty() => Ok((id.to_string(), name.to_string())),
            _ => bail!("expected GROUP_ID=NAME, got '{}'", pair),
        })
        .collect()
}

fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(TaggingConfig::default_path)
}

fn handle_sort(out: &Output, items: &Path, by: SortKey, desc: bool) -> Result<()> {
    let items: Vec<TagItem> = read_json(items)?;
    let sorted = match by {
        SortKey::Name => sort_by_name(&items, !desc),
        SortKey::TagCount => sort_by_tag_count(&items, !desc),
    };
    out.emit(&sorted, || render::render_items(&sorted))
}

fn handle_filter(out: &Output, items: &Path, tags: &[String], all: bool) -> Result<()> {
    let items: Vec<TagItem> = read_json(items)?;
    let filtered = filter_by_tags(&items, tags, all);
    debug!(kept = filtered.len(), of = items.len(), "filtered items");
    out.emit(&filtered, || render::render_items(&filtered))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsReport {
    completion: CompletionStats,
    tag_usage: std::collections::BTreeMap<String, usize>,
    unique_tags: Vec<Tag>,
}

fn handle_stats(out: &Output, items: &Path, groups: Option<&Path>) -> Result<()> {
    let items: Vec<TagItem> = read_json(items)?;
    let groups = load_groups(groups, &items)?;
    let report = StatsReport {
        completion: completion_stats(&items, &groups, None),
        tag_usage: tag_usage_stats(&items),
        unique_tags: unique_tags(&items),
    };
    out.emit(&report, || {
        render::render_stats(&report.tag_usage, &report.unique_tags, &report.completion)
    })
}

fn handle_groups(out: &Output, items: &Path, names: &[String]) -> Result<()> {
    let items: Vec<TagItem> = read_json(items)?;
    let names = parse_group_names(names)?;
    let groups = auto_generate_tag_groups(&items, &names);
    out.emit(&groups, || render::render_groups(&groups))
}

fn handle_convert(
    out: &Output,
    records: &Path,
    config: &ConversionConfig,
    extra_tags: Option<&Path>,
    names: &[String],
) -> Result<()> {
    let records: Vec<serde_json::Value> = read_json(records)?;
    let extra: Vec<Tag> = match extra_tags {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };
    let names = parse_group_names(names)?;
    let setup = create_flexible_tagging_setup(&records, config, &extra, &names)?;
    out.emit(&setup, || render::render_setup(&setup))
}

fn handle_export(out: &Output, items: &Path, include_metadata: bool) -> Result<()> {
    let items: Vec<TagItem> = read_json(items)?;
    let records = prepare_for_database(&items, include_metadata);
    out.emit(&records, || render::render_records(&records))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ToggleOutcome {
    tag_id: String,
    applied: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TagReport {
    item: TagItem,
    toggles: Vec<ToggleOutcome>,
    complete: bool,
    current_group_id: Option<String>,
    completion: CompletionStats,
    items: Vec<TagItem>,
}

fn handle_tag(
    out: &Output,
    config: Option<&Path>,
    items: &Path,
    item_id: &str,
    toggles: &[String],
    groups: Option<&Path>,
) -> Result<()> {
    let items: Vec<TagItem> = read_json(items)?;
    let groups = load_groups(groups, &items)?;
    let config = TaggingConfig::load(config_path(config).as_deref())?;

    // Unknown ids are hard errors here, unlike in the session API
    if !items.iter().any(|i| i.id == item_id) {
        return Err(TagkitError::UnknownItem(item_id.to_string()).into());
    }
    if let Some(missing) = toggles
        .iter()
        .find(|id| !groups.iter().any(|g| g.contains_tag(id)))
    {
        return Err(TagkitError::UnknownTag(missing.clone()).into());
    }

    let mut session = TaggingSession::new(items, groups, config)?;
    session.set_current_item(item_id);
    let outcomes: Vec<ToggleOutcome> = toggles
        .iter()
        .map(|tag_id| ToggleOutcome {
            tag_id: tag_id.clone(),
            applied: session.toggle_tag_by_id(item_id, tag_id),
        })
        .collect();

    let Some(item) = session.item(item_id).cloned() else {
        return Err(TagkitError::UnknownItem(item_id.to_string()).into());
    };
    let report = TagReport {
        complete: session.is_item_complete(item_id),
        current_group_id: session.current_group().map(|g| g.id.clone()),
        completion: session.completion_stats(),
        items: session.items().to_vec(),
        toggles: outcomes,
        item,
    };
    out.emit(&report, || {
        render::render_tag_result(
            &report.item,
            report.complete,
            session.current_group(),
            &report.completion,
        )
    })
}

fn handle_catalog_list(out: &Output) -> Result<()> {
    let presets = available_presets();
    out.emit(&presets, || render::render_catalog(&presets))
}

fn handle_catalog_show(out: &Output, ids: &[String], palette: Option<PaletteName>) -> Result<()> {
    if let Some(unknown) = ids.iter().find(|id| preset_info(id).is_none()) {
        bail!("unknown catalog '{}' (see `tagkit catalog list`)", unknown);
    }
    let groups = combined_preset_tag_groups(ids);
    match palette {
        Some(name) => {
            let palette = match name {
                PaletteName::Rainbow => PALETTE_RAINBOW,
                PaletteName::Cubehelix => PALETTE_CUBEHELIX,
            };
            let colored = assign_colors(&groups, palette);
            out.emit(&colored, || render::render_colored_groups(&colored))
        }
        None => out.emit(&groups, || render::render_groups(&groups)),
    }
}

fn load_presets(path: &Path) -> Result<PresetStore> {
    let presets: Vec<SortFilterPreset> = read_json(path)?;
    let mut store = PresetStore::new();
    store.set_presets(presets);
    Ok(store)
}

fn handle_preset_list(out: &Output, presets: &Path) -> Result<()> {
    let store = load_presets(presets)?;
    out.emit(store.presets(), || render::render_presets(store.presets()))
}

fn handle_preset_apply(out: &Output, items: &Path, presets: &Path, name: &str) -> Result<()> {
    let store = load_presets(presets)?;
    let Some(preset) = store.get(name) else {
        bail!("no preset named '{}' in {}", name, presets.display());
    };
    let items: Vec<TagItem> = read_json(items)?;
    let result = apply_preset(&items, preset);
    out.emit(&result, || render::render_items(&result))
}

fn handle_demo(out: &Output, scenario: &str) -> Result<()> {
    let scenario: Scenario = scenario.parse().map_err(anyhow::Error::msg)?;
    let setup = quick_setup(scenario);
    out.emit(&setup, || {
        format!(
            "{}\n{}",
            render::render_groups(&setup.tag_groups),
            render::render_items(&setup.items)
        )
    })
}

fn handle_config(out: &Output, explicit: Option<&Path>, action: ConfigCommands) -> Result<()> {
    let path = config_path(explicit);
    match action {
        ConfigCommands::Path => {
            let shown = path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            out.emit(&path, || format!("{}\n", shown))
        }
        ConfigCommands::Show => {
            let config = TaggingConfig::load(path.as_deref())?;
            let source = path.as_deref().filter(|p| p.exists());
            out.emit(&config, || render::render_config(&config, source))
        }
    }
}
