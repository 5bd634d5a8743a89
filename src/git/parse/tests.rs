// mrdev-rs: Development Source Checkout Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{
    BranchPresence, WorkingTreeStatus, parse_branch_presence, parse_initialized_submodules,
    parse_status, url_matches,
};

const LISTING: &str = "\
* mybranch
  main
  remotes/origin/HEAD -> origin/main
  remotes/origin/main
  remotes/origin/mybranch
  remotes/origin/only-remote
";

fn presence(listing: &str, branch: &str, prefix: &str) -> BranchPresence {
    parse_branch_presence(listing, branch, prefix).expect("escaped pattern compiles")
}

// =============================================================================
// branch presence
// =============================================================================

#[test]
fn branch_current_local_and_remote() {
    let found = presence(LISTING, "mybranch", "remotes/origin");
    assert_eq!(
        found,
        BranchPresence {
            local: true,
            remote: true
        }
    );
    assert!(found.both());
}

#[test]
fn branch_local_not_current() {
    let found = presence(LISTING, "main", "remotes/origin");
    assert!(found.local);
    assert!(found.remote);
}

#[test]
fn branch_remote_only() {
    let found = presence(LISTING, "only-remote", "remotes/origin");
    assert!(!found.local);
    assert!(found.remote);
    assert!(!found.both());
}

#[test]
fn branch_missing_everywhere() {
    let found = presence(LISTING, "nothere", "remotes/origin");
    assert_eq!(found, BranchPresence::default());
}

#[test]
fn branch_prefix_must_match_version_namespace() {
    // Old tools list remote refs as `origin/<branch>`.
    let old_listing = "* master\n  origin/master\n  origin/topic\n";
    assert!(presence(old_listing, "topic", "origin").remote);
    assert!(!presence(old_listing, "topic", "remotes/origin").remote);
    assert!(!presence(LISTING, "only-remote", "origin").remote);
}

#[test]
fn branch_partial_names_do_not_match() {
    assert_eq!(presence(LISTING, "my", "remotes/origin"), BranchPresence::default());
    assert_eq!(presence(LISTING, "branch", "remotes/origin"), BranchPresence::default());
    assert_eq!(presence(LISTING, "HEAD", "remotes/origin"), BranchPresence::default());
}

#[test]
fn branch_names_with_metacharacters_are_literal() {
    let listing = "* release/1.0\n  fix+plus\n  remotes/origin/release/1.0\n  remotes/origin/fix+plus\n";

    // "." must not act as a wildcard.
    assert_eq!(presence(listing, "release/1x0", "remotes/origin"), BranchPresence::default());
    assert!(presence(listing, "release/1.0", "remotes/origin").both());

    // "+" must not act as a quantifier.
    assert!(presence(listing, "fix+plus", "remotes/origin").both());
    assert_eq!(presence(listing, "fixxplus", "remotes/origin"), BranchPresence::default());

    // Pattern syntax that would not even compile unescaped.
    assert_eq!(presence(listing, "(broken[", "remotes/origin"), BranchPresence::default());
    assert!(presence("* a(b\n", "a(b", "remotes/origin").local);
}

#[test]
fn branch_match_is_case_sensitive() {
    assert_eq!(presence(LISTING, "MyBranch", "remotes/origin"), BranchPresence::default());
}

// =============================================================================
// status
// =============================================================================

#[test]
fn status_single_header_is_clean() {
    assert_eq!(parse_status("## main...origin/main\n"), WorkingTreeStatus::Clean);
    assert_eq!(parse_status(""), WorkingTreeStatus::Clean);
}

#[test]
fn status_single_header_ahead() {
    assert_eq!(
        parse_status("## main...origin/main [ahead 2]\n"),
        WorkingTreeStatus::Ahead
    );
}

#[test]
fn status_multiple_lines_are_dirty() {
    assert_eq!(
        parse_status("## main...origin/main\n M setup.py\n"),
        WorkingTreeStatus::Dirty
    );
    assert_eq!(
        parse_status("## main...origin/main [ahead 1]\n?? new.txt\n"),
        WorkingTreeStatus::Dirty
    );
}

#[test]
fn status_labels() {
    let labels: Vec<_> = [
        WorkingTreeStatus::Clean,
        WorkingTreeStatus::Ahead,
        WorkingTreeStatus::Dirty,
    ]
    .iter()
    .map(ToString::to_string)
    .collect();
    assert_eq!(labels, ["clean", "ahead", "dirty"]);
}

// =============================================================================
// submodules
// =============================================================================

#[test]
fn submodule_init_output() {
    let output = "\
Submodule 'libs/alpha' (https://example/alpha.git) registered for path 'libs/alpha'
Submodule \"vendor/beta\" (git@example:beta.git) registered for path 'vendor/beta'
";
    let names = parse_initialized_submodules(output).expect("pattern compiles");
    insta::assert_debug_snapshot!(names, @r#"
    [
        "libs/alpha",
        "vendor/beta",
    ]
    "#);
}

#[test]
fn submodule_init_nothing_new() {
    let names = parse_initialized_submodules("").expect("pattern compiles");
    assert!(names.is_empty());
}

// =============================================================================
// url match
// =============================================================================

#[test]
fn url_match_is_exact_token() {
    let output = "\
* remote origin
  Fetch URL: https://example/repo.git
  Push  URL: git@example:repo.git
  HEAD branch: (not queried)
";
    assert!(url_matches(output, "https://example/repo.git"));
    assert!(url_matches(output, "git@example:repo.git"));
    assert!(!url_matches(output, "https://example/repo.git/"));
    assert!(!url_matches(output, "https://example/repo"));
    assert!(!url_matches(output, "http://example/repo.git"));
    assert!(!url_matches(output, "example/repo.git"));
}
