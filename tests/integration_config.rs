// mrdev-rs: Development Source Checkout Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic TOML files layered the way the
//! binary layers them.

use mrdev_rs::config::Config;
use mrdev_rs::config::loader::ConfigLoader;
use mrdev_rs::config::types::SubmodulePolicy;
use mrdev_rs::error::is_fatal;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PROJECT: &str = r#"
[global]
sources_dir = "src"
submodules = "checkout"

[sources.app-foo]
url = "https://example/app-foo.git"
branch = "main"

[sources.app-bar]
url = "https://example/app-bar.git"
rev = "1.2.0"

[sources.tools]
url = "git@example:tools.git"
path = "/opt/tools"
preferred-branches = ["main", "release"]
"#;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write config");
    path
}

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

// =============================================================================
// Loading from files
// =============================================================================

#[test]
fn config_load_project_file() {
    let temp = temp_dir();
    let file = write(temp.path(), "mrdev.toml", PROJECT);

    let config = Config::from_file(&file).expect("valid config");

    let names: Vec<_> = config.all_sources().map(|s| s.name()).collect();
    assert_eq!(names, ["app-bar", "app-foo", "tools"]);

    let foo = config.source("app-foo").expect("foo");
    assert_eq!(foo.path(), Path::new("src/app-foo"));
    assert_eq!(foo.branch(), Some("main"));

    let bar = config.source("app-bar").expect("bar");
    assert_eq!(bar.rev(), Some("1.2.0"));
    assert_eq!(bar.branch(), None);

    let tools = config.source("tools").expect("tools");
    assert_eq!(tools.path(), Path::new("/opt/tools"));
    assert_eq!(config.global.submodules, SubmodulePolicy::Checkout);
}

#[test]
fn config_later_file_overrides_earlier() {
    let temp = temp_dir();
    let base = write(temp.path(), "mrdev.toml", PROJECT);
    let local = write(
        temp.path(),
        "local.toml",
        r#"
[global]
sources_dir = "checkouts"
always_checkout = true
"#,
    );

    let config = ConfigLoader::new()
        .ini(&base)
        .ini(&local)
        .build()
        .expect("valid config");

    assert!(config.global.always_checkout);
    assert_eq!(
        config.source("app-foo").expect("foo").path(),
        Path::new("checkouts/app-foo")
    );
}

#[test]
fn config_set_option_overrides_files() {
    let temp = temp_dir();
    let base = write(temp.path(), "mrdev.toml", PROJECT);

    let config = ConfigLoader::new()
        .ini(&base)
        .set_option("global/submodules=always")
        .expect("valid option")
        .set_option("global.output_log_level=5")
        .expect("valid option")
        .build()
        .expect("valid config");

    assert_eq!(config.global.submodules, SubmodulePolicy::Always);
    assert_eq!(u8::from(config.global.output_log_level), 5);
}

#[test]
fn config_missing_required_file() {
    let temp = temp_dir();
    let result = ConfigLoader::new()
        .ini(temp.path().join("absent.toml"))
        .build();
    assert!(result.is_err());
}

#[test]
fn config_missing_optional_file_is_skipped() {
    let temp = temp_dir();
    let loader = ConfigLoader::new().default_ini(temp.path().join("mrdev.toml"));
    assert!(loader.ini_listing().is_empty());

    let config = loader.build().expect("defaults");
    assert_eq!(config.all_sources().count(), 0);
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn config_conflicting_revision_is_fatal() {
    let temp = temp_dir();
    let file = write(
        temp.path(),
        "mrdev.toml",
        r#"
[sources.pkg]
url = "https://example/pkg.git"
branch = "main"
revision = "1.0"
"#,
    );

    let err = Config::from_file(&file).expect_err("branch and revision");
    assert!(is_fatal(&err));
    assert!(err.to_string().contains("pkg"));
}

#[test]
fn config_unknown_kind_is_not_fatal() {
    let err = Config::parse(
        r#"
[sources.pkg]
kind = "hg"
url = "https://example/pkg"
"#,
    )
    .expect_err("no hg backend");
    assert!(!is_fatal(&err));
}

// =============================================================================
// Source selection
// =============================================================================

#[test]
fn config_select_by_glob_and_name() {
    let config = Config::parse(PROJECT).expect("valid config");

    let by_glob: Vec<_> = config
        .select_sources(&["app-*".to_string()])
        .expect("matches")
        .iter()
        .map(|s| s.name())
        .collect();
    assert_eq!(by_glob, ["app-bar", "app-foo"]);

    let mixed: Vec<_> = config
        .select_sources(&["tools".to_string(), "*-foo".to_string()])
        .expect("matches")
        .iter()
        .map(|s| s.name())
        .collect();
    assert_eq!(mixed, ["app-foo", "tools"]);

    assert!(config.select_sources(&["nothing*".to_string()]).is_err());
}
