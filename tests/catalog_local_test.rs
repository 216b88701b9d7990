use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const CLEARED_ENV: &[&str] = &[
    "CATALOG_GITHUB_OWNER",
    "CATALOG_GITHUB_REPO",
    "CATALOG_GITHUB_BRANCH",
    "CATALOG_GITHUB_TOKEN",
    "CATALOG_API_BASE",
    "CATALOG_CONFIG_PATH",
    "CATALOG_LOGS_DIR",
    "CATALOG_LOG",
    "CATALOG_PAGE_SIZE",
    "CATALOG_PAGE_INCREMENT",
];

fn catalog(root: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("catalog");
    for key in CLEARED_ENV {
        cmd.env_remove(key);
    }
    cmd.current_dir(root)
        .env("CATALOG_HOME", root.join("home"))
        .env("CATALOG_DIR", root.join("data"));
    cmd
}

fn add(root: &Path, title: &str, platform: &str, tags: &str, prompt: &str) {
    catalog(root)
        .arg("add")
        .args(["--title", title])
        .args(["--platform", platform])
        .args(["--image-url", "https://x/y.png"])
        .args(["--date", "2024-05-01"])
        .args(["--tags", tags])
        .args(["--prompt", prompt])
        .assert()
        .success();
}

fn index_slugs(root: &Path) -> Vec<String> {
    let raw = fs::read_to_string(root.join("data/entries.json")).expect("read index");
    let parsed: serde_json::Value = serde_json::from_str(&raw).expect("parse index");
    parsed
        .as_array()
        .expect("array")
        .iter()
        .map(|e| e["slug"].as_str().expect("slug").to_string())
        .collect()
}

#[test]
fn add_writes_index_and_markdown_without_remote() {
    let tmp = tempdir().expect("tempdir");
    add(
        tmp.path(),
        "Sunset Over Kyoto",
        "Midjourney",
        "city, dusk",
        "a calm sunset ...",
    );

    assert_eq!(index_slugs(tmp.path()), vec!["sunset-over-kyoto"]);
    let raw = fs::read_to_string(tmp.path().join("data/entries.json")).expect("read index");
    assert!(raw.contains("\"imageUrl\": \"https://x/y.png\""));
    assert!(raw.ends_with("]\n"));

    let md = fs::read_to_string(tmp.path().join("data/entries/sunset-over-kyoto.md"))
        .expect("read markdown");
    assert_eq!(
        md,
        "### Sunset Over Kyoto\n\n![Sunset Over Kyoto](https://x/y.png)\n\n\
         - **Platform:** Midjourney\n- **Date:** 2024-05-01\n- **Tags:** city, dusk\n\n\
         > a calm sunset ...\n"
    );

    let audit = fs::read_to_string(tmp.path().join("home/logs/audit.log")).expect("audit log");
    assert!(audit.contains("\"phase\":\"add\""));
    assert!(audit.contains("\"status\":\"ok\""));
}

#[test]
fn list_applies_search_and_selector() {
    let tmp = tempdir().expect("tempdir");
    add(tmp.path(), "Sunset Over Kyoto", "Midjourney", "", "a calm sunset ...");
    add(tmp.path(), "Beach Day", "ChatGPT", "beach, summer", "waves and sand");

    catalog(tmp.path())
        .args(["list", "--search", "kyoto"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sunset-over-kyoto"))
        .stdout(predicate::str::contains("beach-day").not());

    catalog(tmp.path())
        .args(["list", "--filter", "midjourney"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sunset-over-kyoto"));

    catalog(tmp.path())
        .args(["list", "--filter", "beach"])
        .assert()
        .success()
        .stdout(predicate::str::contains("beach-day"))
        .stdout(predicate::str::contains("sunset-over-kyoto").not());
}

#[test]
fn list_pages_with_load_more() {
    let tmp = tempdir().expect("tempdir");
    for i in 0..3 {
        add(tmp.path(), &format!("Image {i}"), "Grok", "", "prompt");
    }

    catalog(tmp.path())
        .env("CATALOG_PAGE_SIZE", "2")
        .env("CATALOG_PAGE_INCREMENT", "1")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("showing 2 of 3"))
        .stdout(predicate::str::contains("--pages 2"))
        .stdout(predicate::str::contains("image-0").not());

    catalog(tmp.path())
        .env("CATALOG_PAGE_SIZE", "2")
        .env("CATALOG_PAGE_INCREMENT", "1")
        .args(["list", "--pages", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("showing 3 of 3"))
        .stdout(predicate::str::contains("3 entries"));
}

#[test]
fn edit_with_new_title_renames_entry_file() {
    let tmp = tempdir().expect("tempdir");
    add(tmp.path(), "First", "Gemini", "", "one");
    add(tmp.path(), "Sunset Over Kyoto", "Midjourney", "", "a calm sunset ...");

    catalog(tmp.path())
        .args(["edit", "sunset-over-kyoto", "--title", "Dawn Over Osaka"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rename sunset-over-kyoto -> dawn-over-osaka"));

    assert_eq!(index_slugs(tmp.path()), vec!["first", "dawn-over-osaka"]);
    assert!(!tmp.path().join("data/entries/sunset-over-kyoto.md").exists());
    let md = fs::read_to_string(tmp.path().join("data/entries/dawn-over-osaka.md"))
        .expect("renamed markdown");
    assert!(md.starts_with("### Dawn Over Osaka\n"));
    assert!(md.contains("> a calm sunset ..."));
}

#[test]
fn edit_refuses_rename_onto_existing_slug() {
    let tmp = tempdir().expect("tempdir");
    add(tmp.path(), "Alpha", "Gemini", "", "one");
    add(tmp.path(), "Beta", "Gemini", "", "two");

    catalog(tmp.path())
        .args(["edit", "beta", "--title", "ALPHA"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already uses slug `alpha`"));

    assert_eq!(index_slugs(tmp.path()), vec!["alpha", "beta"]);
}

#[test]
fn delete_removes_entry_and_file() {
    let tmp = tempdir().expect("tempdir");
    add(tmp.path(), "Keep", "Grok", "", "k");
    add(tmp.path(), "Drop", "Grok", "", "d");

    catalog(tmp.path())
        .args(["delete", "drop"])
        .assert()
        .success();

    assert_eq!(index_slugs(tmp.path()), vec!["keep"]);
    assert!(!tmp.path().join("data/entries/drop.md").exists());
    assert!(tmp.path().join("data/entries/keep.md").exists());
}

#[test]
fn delete_of_unknown_slug_fails_and_keeps_index() {
    let tmp = tempdir().expect("tempdir");
    add(tmp.path(), "Keep", "Grok", "", "k");
    let before = fs::read_to_string(tmp.path().join("data/entries.json")).expect("index");

    catalog(tmp.path())
        .args(["delete", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found: entries/ghost.md"));

    let after = fs::read_to_string(tmp.path().join("data/entries.json")).expect("index");
    assert_eq!(before, after);
}

#[test]
fn invalid_entry_is_rejected_before_any_write() {
    let tmp = tempdir().expect("tempdir");

    catalog(tmp.path())
        .arg("add")
        .args(["--title", "No Prompt"])
        .args(["--platform", "Grok"])
        .args(["--image-url", "https://x/y.png"])
        .args(["--prompt", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing: prompt"));

    assert!(!tmp.path().join("data").exists());
}

#[test]
fn preview_prints_markdown_without_writing() {
    let tmp = tempdir().expect("tempdir");

    catalog(tmp.path())
        .arg("preview")
        .args(["--title", "Sunset Over Kyoto"])
        .args(["--platform", "Midjourney"])
        .args(["--image-url", "https://x/y.png"])
        .args(["--date", "2024-05-01"])
        .args(["--prompt", "a calm sunset ..."])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("### Sunset Over Kyoto\n"))
        .stdout(predicate::str::contains("path=entries/sunset-over-kyoto.md"));

    assert!(!tmp.path().join("data/entries.json").exists());
}

#[test]
fn show_renders_existing_entry() {
    let tmp = tempdir().expect("tempdir");
    add(tmp.path(), "Neon Alley", "Grok", "city", "rain soaked street");

    catalog(tmp.path())
        .args(["show", "neon-alley"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- **Tags:** city"))
        .stdout(predicate::str::contains("> rain soaked street"));

    catalog(tmp.path())
        .args(["show", "missing"])
        .assert()
        .failure();
}

#[test]
fn json_report_is_machine_readable() {
    let tmp = tempdir().expect("tempdir");
    add(tmp.path(), "Neon Alley", "Grok", "city", "rain soaked street");

    let output = catalog(tmp.path())
        .args(["list", "--json"])
        .output()
        .expect("run list");
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json report");
    assert_eq!(report["command"], "list");
    assert_eq!(report["ok"], true);
    assert!(
        report["details"]
            .as_array()
            .expect("details")
            .iter()
            .any(|d| d.as_str().unwrap_or_default().starts_with("neon-alley |"))
    );
}

#[test]
fn unwritable_audit_log_does_not_change_command_outcome() {
    let tmp = tempdir().expect("tempdir");
    let blocker = tmp.path().join("blocker");
    fs::write(&blocker, "not a directory").expect("write blocker");
    let logs_dir = blocker.join("logs");

    catalog(tmp.path())
        .env("CATALOG_LOGS_DIR", &logs_dir)
        .arg("add")
        .args(["--title", "Sunset Over Kyoto"])
        .args(["--platform", "Midjourney"])
        .args(["--image-url", "https://x/y.png"])
        .args(["--prompt", "a calm sunset ..."])
        .assert()
        .success()
        .stdout(predicate::str::contains("warning: audit log not written"));
    assert_eq!(index_slugs(tmp.path()), vec!["sunset-over-kyoto"]);

    catalog(tmp.path())
        .env("CATALOG_LOGS_DIR", &logs_dir)
        .args(["delete", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found: entries/ghost.md"));
}

#[test]
fn huge_page_count_is_saturated() {
    let tmp = tempdir().expect("tempdir");
    add(tmp.path(), "Only One", "Grok", "", "prompt");

    catalog(tmp.path())
        .args(["list", "--pages", &usize::MAX.to_string()])
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .success()
        .stdout(predicate::str::contains("showing 1 of 1"))
        .stdout(predicate::str::contains("more available").not());
}
