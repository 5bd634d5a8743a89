// mrdev-rs: Development Source Checkout Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Output parsers: tool text in, typed facts out.
//!
//! ```text
//! branch -a           --> BranchPresence { local, remote }
//! status -s -b        --> WorkingTreeStatus  clean | ahead | dirty
//! submodule init      --> names of newly registered submodules
//! remote show -n      --> configured URL present as a token?
//! ```
//!
//! Nothing here runs a process, so every parser is tested against captured
//! fixture text.

use regex::Regex;
use serde::Serialize;
use std::fmt;

use crate::error::{DevError, DevResult};

fn compile(pattern: &str) -> DevResult<Regex> {
    Regex::new(pattern).map_err(|e| DevError::Other(format!("invalid pattern {pattern:?}: {e}").into()))
}

/// Where a branch exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BranchPresence {
    pub local: bool,
    pub remote: bool,
}

impl BranchPresence {
    #[must_use]
    pub const fn both(self) -> bool {
        self.local && self.remote
    }
}

/// Find `branch` in a `branch -a` listing.
///
/// A line that is exactly `* <branch>` or `  <branch>` marks it local; a line
/// that is exactly `  <remote_prefix>/<branch>` marks it remote. Both names
/// are matched literally.
///
/// # Errors
///
/// Returns an error only if the escaped pattern fails to compile.
pub fn parse_branch_presence(
    listing: &str,
    branch: &str,
    remote_prefix: &str,
) -> DevResult<BranchPresence> {
    let branch = regex::escape(branch);
    let local = compile(&format!(r"(?m)^(\*| ) {branch}$"))?;
    let remote = compile(&format!(
        r"(?m)^  {}/{branch}$",
        regex::escape(remote_prefix)
    ))?;

    Ok(BranchPresence {
        local: local.is_match(listing),
        remote: remote.is_match(listing),
    })
}

/// Coarse working tree state from `status -s -b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkingTreeStatus {
    Clean,
    Ahead,
    Dirty,
}

impl WorkingTreeStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Ahead => "ahead",
            Self::Dirty => "dirty",
        }
    }
}

impl fmt::Display for WorkingTreeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify `status -s -b` output by line count.
///
/// One line is the branch header alone: `ahead` if it mentions being ahead,
/// `clean` otherwise. Any further line is a changed path, so `dirty`.
#[must_use]
pub fn parse_status(output: &str) -> WorkingTreeStatus {
    let mut lines = output.trim().split('\n');
    let header = lines.next().unwrap_or_default();
    if lines.next().is_some() {
        WorkingTreeStatus::Dirty
    } else if header.contains("ahead") {
        WorkingTreeStatus::Ahead
    } else {
        WorkingTreeStatus::Clean
    }
}

/// Names of the submodules that `submodule init` just registered.
///
/// Matches each quoted name followed by a parenthesized URL, as in
/// `Submodule 'libs/foo' (https://example/foo.git) registered for path 'libs/foo'`.
///
/// # Errors
///
/// Returns an error only if the pattern fails to compile.
pub fn parse_initialized_submodules(output: &str) -> DevResult<Vec<String>> {
    let regex = compile(r#"\s+['"](.*?)['"]\s+\(.+\)"#)?;
    Ok(regex
        .captures_iter(output)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect())
}

/// Whether `url` appears verbatim as one whitespace-separated token.
///
/// No normalization: a trailing slash or `.git` suffix is a mismatch.
#[must_use]
pub fn url_matches(remote_show: &str, url: &str) -> bool {
    remote_show.split_whitespace().any(|token| token == url)
}

#[cfg(test)]
mod tests;
