// mrdev-rs: Development Source Checkout Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ConfigError, DevError, DevResult, GitError, bail_out, is_fatal};

#[test]
fn test_config_error_display() {
    let err = ConfigError::ConflictingRevision {
        name: "pkg".to_string(),
        branch: "dev".to_string(),
        rev: "v1.0".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"cannot specify both branch (dev) and rev/revision (v1.0) in source for pkg"
    );
}

#[test]
fn test_tool_failed_carries_command_and_streams() {
    let err = GitError::ToolFailed {
        command: "/usr/bin/git fetch --prune".to_string(),
        stdout: "out".to_string(),
        stderr: "fatal: no remote".to_string(),
    };
    let message = err.to_string();
    assert!(message.starts_with("'/usr/bin/git fetch --prune'"));
    assert!(message.contains("out"));
    assert!(message.contains("fatal: no remote"));
}

#[test]
fn test_fatal_tier_detection() {
    let fatal: anyhow::Error = bail_out("unsupported git").into();
    let scoped: anyhow::Error = DevError::from(GitError::Dirty {
        name: "pkg".to_string(),
    })
    .into();
    assert!(is_fatal(&fatal));
    assert!(!is_fatal(&scoped));
    assert!(is_fatal(&fatal.context("while checking out pkg")));
}

#[test]
fn test_dev_error_size() {
    // Box<str> variants (Bailed, Other) are 16 bytes (fat pointer: ptr + len)
    // With discriminant + alignment = 24 bytes
    let size = std::mem::size_of::<DevError>();
    assert!(size <= 24, "DevError is {size} bytes, expected <= 24");
}

#[test]
fn test_dev_result_size() {
    let size = std::mem::size_of::<DevResult<()>>();
    assert!(size <= 24, "DevResult<()> is {size} bytes, expected <= 24");
}
