// mrdev-rs: Development Source Checkout Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::list::format_source;
use super::{BatchReport, for_each_source};
use crate::config::source::Source;
use crate::error::{DevError, GitError, bail_out, is_fatal};

fn named(name: &str) -> Source {
    Source::builder()
        .name(name)
        .path(format!("src/{name}"))
        .url(format!("https://example/{name}.git"))
        .build()
        .expect("valid source")
}

#[test]
fn test_batch_continues_past_operation_errors() {
    let sources = [named("alpha"), named("beta"), named("gamma")];
    let refs: Vec<&Source> = sources.iter().collect();
    let mut visited = Vec::new();

    let report = for_each_source(&refs, "update", |source| {
        visited.push(source.name().to_string());
        match source.name() {
            "alpha" => Err(GitError::Dirty {
                name: "alpha".to_string(),
            }
            .into()),
            "beta" => Ok(false),
            _ => Ok(true),
        }
    })
    .expect("no fatal error");

    assert_eq!(visited, ["alpha", "beta", "gamma"]);
    assert_eq!(
        report,
        BatchReport {
            succeeded: 1,
            failed: vec!["alpha".to_string(), "beta".to_string()],
        }
    );

    let err = report.into_result("update").expect_err("two failures");
    insta::assert_snapshot!(err.to_string(), @"update failed for 2 source(s): alpha, beta");
}

#[test]
fn test_batch_stops_on_fatal_error() {
    let sources = [named("alpha"), named("beta"), named("gamma")];
    let refs: Vec<&Source> = sources.iter().collect();
    let mut visited = Vec::new();

    let err = for_each_source(&refs, "checkout", |source| {
        visited.push(source.name().to_string());
        if source.name() == "beta" {
            Err(bail_out("unsupported git version"))
        } else {
            Ok(true)
        }
    })
    .expect_err("fatal error stops the batch");

    assert_eq!(visited, ["alpha", "beta"]);
    assert!(is_fatal(&err));
    assert_eq!(err.to_string(), "checkout stopped at 'beta'");
    assert!(err.root_cause().downcast_ref::<DevError>().is_some());
}

#[test]
fn test_batch_all_succeed() {
    let sources = [named("alpha")];
    let refs: Vec<&Source> = sources.iter().collect();
    let report = for_each_source(&refs, "status", |_| Ok(true)).expect("ok");
    assert_eq!(report.succeeded, 1);
    assert!(report.into_result("status").is_ok());
}

#[test]
fn test_format_source_line() {
    let pinned = Source::builder()
        .name("beta")
        .path("/opt/beta")
        .url("https://example/beta.git")
        .rev("v2.0")
        .build()
        .expect("valid source");

    insta::assert_snapshot!(format_source(&pinned), @"beta [git] rev v2.0 /opt/beta <https://example/beta.git>");
    assert_eq!(
        format_source(&named("alpha").with_branch("dev")),
        "alpha [git] branch dev src/alpha <https://example/alpha.git>"
    );
    assert_eq!(
        format_source(&named("gamma")),
        "gamma [git] - src/gamma <https://example/gamma.git>"
    );
}

#[test]
fn test_source_json_shape() {
    let source = named("alpha").with_branch("dev");
    let value = serde_json::to_value(&source).expect("serializable");
    assert_eq!(value["name"], "alpha");
    assert_eq!(value["branch"], "dev");
    assert_eq!(value["kind"], "git");
    assert!(value.get("rev").is_none());
}
