#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn tagkit_cmd() -> Command {
    let mut cmd = Command::new(cargo_bin("tagkit"));
    cmd.env_remove("TAGKIT_LOG").env_remove("RUST_LOG");
    cmd
}

fn write_json(dir: &TempDir, name: &str, value: &Value) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
    path
}

fn items() -> Value {
    json!([
        {"id": "1", "name": "Zebra", "tags": [
            {"id": "red", "group": "colors", "name": "Red"},
            {"id": "high", "group": "priority", "name": "High"}
        ]},
        {"id": "2", "name": "Apple", "tags": [
            {"id": "blue", "group": "colors", "name": "Blue"}
        ]},
        {"id": "3", "name": "Mango", "tags": []}
    ])
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn test_sort_by_name_text() {
    let temp = TempDir::new().unwrap();
    let path = write_json(&temp, "items.json", &items());

    tagkit_cmd()
        .args(["sort", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?s)Apple.*Mango.*Zebra").unwrap());
}

#[test]
fn test_sort_by_tag_count_desc_json() {
    let temp = TempDir::new().unwrap();
    let path = write_json(&temp, "items.json", &items());

    let sorted = stdout_json(tagkit_cmd().args([
        "sort",
        path.to_str().unwrap(),
        "--by",
        "tag-count",
        "--desc",
        "--json",
    ]));
    let ids: Vec<&str> = sorted
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[test]
fn test_filter_any_and_all() {
    let temp = TempDir::new().unwrap();
    let path = write_json(&temp, "items.json", &items());
    let path = path.to_str().unwrap();

    let any = stdout_json(tagkit_cmd().args(["filter", path, "-t", "red", "-t", "blue", "--json"]));
    assert_eq!(any.as_array().unwrap().len(), 2);

    let all = stdout_json(tagkit_cmd().args([
        "filter", path, "-t", "red", "-t", "high", "--all", "--json",
    ]));
    assert_eq!(all.as_array().unwrap().len(), 1);
    assert_eq!(all[0]["id"], "1");
}

#[test]
fn test_filter_reads_stdin() {
    tagkit_cmd()
        .args(["filter", "-", "-t", "blue"])
        .write_stdin(items().to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains("Apple"))
        .stdout(predicate::str::contains("Zebra").not());
}

#[test]
fn test_stats_json() {
    let temp = TempDir::new().unwrap();
    let path = write_json(&temp, "items.json", &items());

    let report = stdout_json(tagkit_cmd().args(["stats", path.to_str().unwrap(), "--json"]));
    assert_eq!(report["completion"]["totalItems"], 3);
    assert_eq!(report["completion"]["completedItems"], 1);
    assert_eq!(report["completion"]["progressPercent"], 33);
    assert_eq!(report["tagUsage"]["red"], 1);
    assert_eq!(report["uniqueTags"].as_array().unwrap().len(), 3);
}

#[test]
fn test_stats_ignores_repeated_tag_ids() {
    let temp = TempDir::new().unwrap();
    let path = write_json(
        &temp,
        "items.json",
        &json!([{"id": "1", "name": "One", "tags": [
            {"id": "red", "group": "colors", "name": "Red"},
            {"id": "red", "group": "colors", "name": "Red"}
        ]}]),
    );

    let report = stdout_json(tagkit_cmd().args(["stats", path.to_str().unwrap(), "--json"]));
    assert_eq!(report["tagUsage"]["red"], 1);
}

#[test]
fn test_groups_with_names() {
    let temp = TempDir::new().unwrap();
    let path = write_json(&temp, "items.json", &items());

    tagkit_cmd()
        .args(["groups", path.to_str().unwrap(), "--name", "colors=Palette"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Palette (colors)"))
        .stdout(predicate::str::contains("Priority (priority)"));
}

#[test]
fn test_convert_records() {
    let temp = TempDir::new().unwrap();
    let records = write_json(
        &temp,
        "records.json",
        &json!([
            {"userId": "u1", "username": "john", "labels": ["admin"]},
            {"userId": "u2", "username": "jane"}
        ]),
    );
    let extra = write_json(
        &temp,
        "extra.json",
        &json!([{"id": "active", "group": "status", "name": "Active"}]),
    );

    let setup = stdout_json(tagkit_cmd().args([
        "convert",
        records.to_str().unwrap(),
        "--id-property",
        "userId",
        "--name-property",
        "username",
        "--tags-property",
        "labels",
        "--extra-tags",
        extra.to_str().unwrap(),
        "--json",
    ]));
    assert_eq!(setup["items"][0]["name"], "john");
    assert_eq!(setup["items"][0]["tags"][0]["id"], "general-admin");
    let group_ids: Vec<&str> = setup["tagGroups"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["id"].as_str().unwrap())
        .collect();
    assert_eq!(group_ids, vec!["general", "status"]);
}

#[test]
fn test_convert_missing_identifier_fails() {
    let temp = TempDir::new().unwrap();
    let records = write_json(&temp, "records.json", &json!([{"name": "no id"}]));

    tagkit_cmd()
        .args(["convert", records.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("id property"));
}

#[test]
fn test_export_metadata() {
    let temp = TempDir::new().unwrap();
    let path = write_json(&temp, "items.json", &items());

    let records = stdout_json(tagkit_cmd().args(["export", path.to_str().unwrap(), "--json"]));
    assert_eq!(records[0]["tagCount"], 2);
    assert_eq!(records[0]["tagsByGroup"]["colors"][0]["id"], "red");
    assert!(records[0]["taggedAt"].is_string());

    let bare = stdout_json(tagkit_cmd().args([
        "export",
        path.to_str().unwrap(),
        "--no-metadata",
        "--json",
    ]));
    assert!(bare[0].get("tagCount").is_none());
}

#[test]
fn test_tag_single_select_replaces_within_group() {
    let temp = TempDir::new().unwrap();
    let path = write_json(&temp, "items.json", &items());

    let report = stdout_json(tagkit_cmd().args([
        "tag",
        path.to_str().unwrap(),
        "--item",
        "2",
        "-t",
        "red",
        "-t",
        "high",
        "--json",
    ]));
    let tag_ids: Vec<&str> = report["item"]["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(tag_ids, vec!["red", "high"]);
    assert_eq!(report["complete"], true);
    assert_eq!(report["completion"]["completedItems"], 2);
}

#[test]
fn test_tag_unknown_tag_fails() {
    let temp = TempDir::new().unwrap();
    let path = write_json(&temp, "items.json", &items());

    tagkit_cmd()
        .args(["tag", path.to_str().unwrap(), "--item", "1", "-t", "purple"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Tag not found: purple"));
}

#[test]
fn test_tag_respects_config_file() {
    let temp = TempDir::new().unwrap();
    let path = write_json(&temp, "items.json", &items());
    let config = temp.path().join("tagkit.toml");
    fs::write(&config, "can_replace = false\n").unwrap();

    let report = stdout_json(tagkit_cmd().args([
        "tag",
        path.to_str().unwrap(),
        "--item",
        "1",
        "-t",
        "red",
        "--config",
        config.to_str().unwrap(),
        "--json",
    ]));
    assert_eq!(report["toggles"][0]["applied"], false);
    assert_eq!(report["item"]["tags"][0]["id"], "red");
}

#[test]
fn test_catalog_list_and_show() {
    tagkit_cmd()
        .args(["catalog"])
        .assert()
        .success()
        .stdout(predicate::str::contains("priority"))
        .stdout(predicate::str::contains("geography"));

    let groups = stdout_json(tagkit_cmd().args(["catalog", "show", "priority", "status", "--json"]));
    assert_eq!(groups.as_array().unwrap().len(), 2);

    let colored = stdout_json(tagkit_cmd().args([
        "catalog", "show", "colors", "--palette", "rainbow", "--json",
    ]));
    assert!(colored[0]["backgroundColor"].as_str().unwrap().starts_with('#'));

    tagkit_cmd()
        .args(["catalog", "show", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown catalog"));
}

#[test]
fn test_preset_apply() {
    let temp = TempDir::new().unwrap();
    let items_path = write_json(&temp, "items.json", &items());
    let presets_path = write_json(
        &temp,
        "presets.json",
        &json!([
            {"name": "colored", "sortBy": "name", "asc": true, "filterTags": ["red", "blue"]},
            {"name": "busy", "sortBy": "tagCount", "asc": false}
        ]),
    );

    let result = stdout_json(tagkit_cmd().args([
        "preset",
        "apply",
        items_path.to_str().unwrap(),
        "--presets",
        presets_path.to_str().unwrap(),
        "--name",
        "colored",
        "--json",
    ]));
    let names: Vec<&str> = result
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Apple", "Zebra"]);

    tagkit_cmd()
        .args(["preset", "list", presets_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("busy"));

    tagkit_cmd()
        .args([
            "preset",
            "apply",
            items_path.to_str().unwrap(),
            "--presets",
            presets_path.to_str().unwrap(),
            "--name",
            "missing",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no preset named 'missing'"));
}

#[test]
fn test_demo_scenario() {
    let setup = stdout_json(tagkit_cmd().args(["demo", "project-tasks", "--json"]));
    assert!(!setup["tagGroups"].as_array().unwrap().is_empty());
    assert!(!setup["items"].as_array().unwrap().is_empty());

    tagkit_cmd()
        .args(["demo", "nonsense"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown scenario"));
}

#[test]
fn test_config_show_env_override() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("tagkit.toml");
    fs::write(&config, "max_visible_tabs = 3\n").unwrap();

    let shown = stdout_json(
        tagkit_cmd()
            .env("TAGKIT_CAN_REPLACE", "false")
            .args(["config", "--config", config.to_str().unwrap(), "--json"]),
    );
    assert_eq!(shown["max_visible_tabs"], 3);
    assert_eq!(shown["can_replace"], false);
}

#[test]
fn test_config_rejects_zero_tabs() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("tagkit.toml");
    fs::write(&config, "max_visible_tabs = 0\n").unwrap();

    tagkit_cmd()
        .args(["config", "show", "--config", config.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_visible_tabs must be greater than 0"));
}

#[test]
fn test_missing_input_file() {
    tagkit_cmd()
        .args(["sort", "/definitely/not/here.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reading /definitely/not/here.json"));
}
