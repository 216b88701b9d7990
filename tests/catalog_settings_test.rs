use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn catalog(root: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("catalog");
    for key in [
        "CATALOG_GITHUB_OWNER",
        "CATALOG_GITHUB_REPO",
        "CATALOG_GITHUB_BRANCH",
        "CATALOG_GITHUB_TOKEN",
        "CATALOG_API_BASE",
        "CATALOG_CONFIG_PATH",
        "CATALOG_LOGS_DIR",
    ] {
        cmd.env_remove(key);
    }
    cmd.current_dir(root)
        .env("CATALOG_HOME", root.join("home"))
        .env("CATALOG_DIR", root);
    cmd
}

#[test]
fn status_reports_local_mode_when_unconfigured() {
    let tmp = tempdir().expect("tempdir");

    catalog(tmp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("connection=Not connected"))
        .stdout(predicate::str::contains("0 entries"))
        .stdout(predicate::str::contains("CATALOG_HOME"));
}

#[test]
fn connect_requires_settings() {
    let tmp = tempdir().expect("tempdir");

    catalog(tmp.path())
        .arg("connect")
        .assert()
        .failure()
        .stderr(predicate::str::contains("fill in owner, repo and token first"));
}

#[test]
fn pull_requires_remote() {
    let tmp = tempdir().expect("tempdir");

    catalog(tmp.path())
        .arg("pull")
        .assert()
        .failure()
        .stderr(predicate::str::contains("remote not configured"));
}

#[test]
fn configure_persists_settings_and_status_reflects_them() {
    let tmp = tempdir().expect("tempdir");

    catalog(tmp.path())
        .args(["configure", "--owner", "me", "--repo", "gallery", "--token", "secret"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings saved"))
        .stdout(predicate::str::contains("remote=me/gallery"));

    let raw = fs::read_to_string(tmp.path().join("home/catalog.toml")).expect("config file");
    assert!(raw.contains("owner = \"me\""));
    assert!(raw.contains("branch = \"main\""));

    catalog(tmp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("connection=me/gallery"))
        .stdout(predicate::str::contains("secret").not());
}

#[test]
fn configure_with_partial_settings_stays_disconnected() {
    let tmp = tempdir().expect("tempdir");

    catalog(tmp.path())
        .args(["configure", "--owner", "me"])
        .assert()
        .success()
        .stdout(predicate::str::contains("remote=Not connected"));
}

#[test]
fn invalid_config_file_is_reported() {
    let tmp = tempdir().expect("tempdir");
    fs::create_dir_all(tmp.path().join("home")).expect("mkdir home");
    fs::write(
        tmp.path().join("home/catalog.toml"),
        "[gallery]\npage_size = 0\n",
    )
    .expect("write config");

    catalog(tmp.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid gallery page size"));
}
