// mrdev-rs: Development Source Checkout Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tool version detection.
//!
//! ```text
//! "git version 2.30.1.2" --> GitVersion [2, 30, 1, 2]
//!
//!   < 1.5      unsupported (fatal)
//!   < 1.6.3    remote refs listed as  origin/<branch>
//!   >= 1.6.3   remote refs listed as  remotes/origin/<branch>
//! ```

use regex::Regex;
use std::fmt;
use tracing::error;

use crate::error::{DevError, DevResult, bail_out};

/// Oldest supported release.
const MINIMUM: [u64; 2] = [1, 5];

/// First release that lists remote-tracking refs under `remotes/`.
const REMOTES_NAMESPACE: [u64; 3] = [1, 6, 3];

/// Self-reported version of the tool: 2 to 4 numeric components.
///
/// Ordering is lexicographic over the components, with a shorter version
/// ordering before any longer version it is a prefix of.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct GitVersion(Vec<u64>);

impl GitVersion {
    #[must_use]
    pub fn parts(&self) -> &[u64] {
        &self.0
    }

    /// Parse `--version` output.
    ///
    /// Returns `Ok(None)` when the output holds no recognizable version.
    ///
    /// # Errors
    ///
    /// Returns an error only if the version pattern fails to compile.
    pub fn parse(output: &str) -> DevResult<Option<Self>> {
        let regex = Regex::new(r"git version (\d+)\.(\d+)(\.\d+)?(\.\d+)?")
            .map_err(|e| DevError::Other(format!("invalid version pattern: {e}").into()))?;

        let Some(captures) = regex.captures(output) else {
            return Ok(None);
        };

        // Components are all digits, so parsing only fails on overflow.
        let parts = captures
            .iter()
            .skip(1)
            .flatten()
            .map(|m| m.as_str().trim_start_matches('.').parse().unwrap_or(u64::MAX))
            .collect();

        Ok(Some(Self(parts)))
    }

    /// Parse `--version` output and reject what the driver cannot work with.
    ///
    /// # Errors
    ///
    /// Returns a fatal error when the output is unparsable or the version is
    /// older than 1.5.
    pub fn from_output(output: &str) -> DevResult<Self> {
        let Some(version) = Self::parse(output)? else {
            error!("unable to parse git version output");
            error!("'git --version' output was:\n{output}");
            return Err(bail_out("unable to parse git version output"));
        };

        if version.0.as_slice() < MINIMUM.as_slice() {
            error!(version = %version, "git version is unsupported, please upgrade");
            return Err(bail_out(format!(
                "git version {version} is unsupported, please upgrade"
            )));
        }

        Ok(version)
    }

    /// Namespace under which `branch -a` lists remote-tracking branches.
    #[must_use]
    pub fn remote_branch_prefix(&self, upstream: &str) -> String {
        if self.0.as_slice() < REMOTES_NAMESPACE.as_slice() {
            upstream.to_string()
        } else {
            format!("remotes/{upstream}")
        }
    }
}

impl fmt::Display for GitVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for part in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{part}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
