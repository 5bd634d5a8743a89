// mrdev-rs: Development Source Checkout Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::GitVersion;

#[test]
fn test_parse_three_components() {
    let version = GitVersion::from_output("git version 1.6.3\n").expect("supported");
    assert_eq!(version.parts(), &[1, 6, 3]);
}

#[test]
fn test_parse_four_components() {
    let version = GitVersion::from_output("git version 2.30.1.2").expect("supported");
    assert_eq!(version.parts(), &[2, 30, 1, 2]);
    assert_eq!(version.to_string(), "2.30.1.2");
}

#[test]
fn test_parse_two_components_and_vendor_suffix() {
    let plain = GitVersion::from_output("git version 2.0").expect("supported");
    assert_eq!(plain.parts(), &[2, 0]);

    let apple = GitVersion::from_output("git version 2.39.3 (Apple Git-145)").expect("supported");
    assert_eq!(apple.parts(), &[2, 39, 3]);
}

#[test]
fn test_unsupported_version_is_fatal() {
    let err = GitVersion::from_output("git version 1.4.0").expect_err("too old");
    assert!(err.is_fatal());
    assert!(err.to_string().contains("1.4.0"));
}

#[test]
fn test_malformed_version_is_fatal() {
    for output in ["", "hg version 6.1", "git version two"] {
        let err = GitVersion::from_output(output).expect_err("unparsable");
        assert!(err.is_fatal(), "{output:?} should be fatal");
    }
    assert_eq!(GitVersion::parse("svn, version 1.14").expect("valid pattern"), None);
}

#[test]
fn test_minimum_boundary() {
    assert!(GitVersion::from_output("git version 1.5").is_ok());
    assert!(GitVersion::from_output("git version 1.5.0.1").is_ok());
    assert!(GitVersion::from_output("git version 1.4.9.9").is_err());
}

#[test]
fn test_remote_branch_prefix() {
    let cases: Vec<(String, String)> = [
        "1.5", "1.6.2", "1.6.2.9", "1.6", "1.6.3", "1.6.3.1", "2.43.0",
    ]
    .into_iter()
    .map(|number| {
        let version =
            GitVersion::from_output(&format!("git version {number}")).expect("supported");
        (version.to_string(), version.remote_branch_prefix("origin"))
    })
    .collect();

    insta::assert_debug_snapshot!(cases, @r#"
    [
        (
            "1.5",
            "origin",
        ),
        (
            "1.6.2",
            "origin",
        ),
        (
            "1.6.2.9",
            "origin",
        ),
        (
            "1.6",
            "origin",
        ),
        (
            "1.6.3",
            "remotes/origin",
        ),
        (
            "1.6.3.1",
            "remotes/origin",
        ),
        (
            "2.43.0",
            "remotes/origin",
        ),
    ]
    "#);
}

#[test]
fn test_oversized_component_is_accepted() {
    let version =
        GitVersion::from_output("git version 2.99999999999").expect("large minor is still a version");
    assert_eq!(version.parts(), &[2, 99_999_999_999]);
    assert_eq!(version.remote_branch_prefix("origin"), "remotes/origin");

    let huge = GitVersion::from_output("git version 3.999999999999999999999999").expect("saturates");
    assert_eq!(huge.parts(), &[3, u64::MAX]);
}
