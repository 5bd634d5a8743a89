// mrdev-rs: Development Source Checkout Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Source descriptors.
//!
//! ```text
//! [sources.<name>] --> SourceConfig (raw, every key optional)
//!                         |
//!                         | revision -> rev, rev xor branch,
//!                         | url required, path defaulted
//!                         v
//!                      Source (validated, immutable)
//!                         |
//!                         | with_branch()  (auto-selection)
//!                         v
//!                      Source (copy with the resolved branch)
//! ```

use bon::bon;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::error;

use super::types::{GlobalConfig, SubmodulePolicy};
use crate::error::{ConfigError, DevResult};

/// Backend used when a source has no `kind`.
pub const DEFAULT_KIND: &str = "git";

/// A `[sources.<name>]` table as written in the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct SourceConfig {
    /// Backend name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Remote origin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Local checkout directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Revision or tag to check out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    /// Alias of `rev`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    /// Branch to check out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Ordered allow-list used to auto-select a branch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_branches: Option<Vec<String>>,
    /// Separate push target for the origin remote.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pushurl: Option<String>,
    /// Shallow clone depth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
    /// Submodule policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submodules: Option<SubmodulePolicy>,
    /// Update existing checkouts on `checkout`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<bool>,
}

/// A validated source descriptor.
///
/// `rev` and `branch` are never both set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Source {
    name: String,
    kind: String,
    url: String,
    path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    rev: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    preferred_branches: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pushurl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    depth: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    submodules: Option<SubmodulePolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    update: Option<bool>,
}

#[bon]
impl Source {
    /// Build a source, rejecting `rev` together with `branch`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConflictingRevision` (a fatal error) when both
    /// `rev` and `branch` are given.
    #[builder]
    pub fn new(
        #[builder(into)] name: String,
        #[builder(into)] path: PathBuf,
        #[builder(into)] url: String,
        #[builder(into, default = DEFAULT_KIND.to_string())] kind: String,
        #[builder(into)] rev: Option<String>,
        #[builder(into)] branch: Option<String>,
        preferred_branches: Option<Vec<String>>,
        #[builder(into)] pushurl: Option<String>,
        depth: Option<u32>,
        submodules: Option<SubmodulePolicy>,
        update: Option<bool>,
    ) -> DevResult<Self> {
        if let (Some(branch), Some(rev)) = (&branch, &rev) {
            error!(
                source = %name,
                branch = %branch,
                rev = %rev,
                "cannot specify both branch and rev/revision"
            );
            return Err(ConfigError::ConflictingRevision {
                name,
                branch: branch.clone(),
                rev: rev.clone(),
            }
            .into());
        }

        Ok(Self {
            name,
            kind,
            url,
            path,
            rev,
            branch,
            preferred_branches,
            pushurl,
            depth,
            submodules,
            update,
        })
    }
}

impl Source {
    /// Validate a raw `[sources.<name>]` table.
    ///
    /// # Errors
    ///
    /// Returns a fatal `ConfigError` for duplicate or conflicting revision
    /// options, `ConfigError::MissingKey` when `url` is absent, and
    /// `ConfigError::UnknownBackend` for an unsupported `kind`.
    pub fn from_config(name: &str, raw: &SourceConfig, global: &GlobalConfig) -> DevResult<Self> {
        let rev = match (&raw.rev, &raw.revision) {
            (Some(_), Some(_)) => {
                error!(source = %name, "duplicate revision options");
                return Err(ConfigError::DuplicateRevision {
                    name: name.to_string(),
                }
                .into());
            }
            (rev, revision) => rev.clone().or_else(|| revision.clone()),
        };

        let url = raw.url.clone().ok_or_else(|| ConfigError::MissingKey {
            section: format!("sources.{name}"),
            key: "url".to_string(),
        })?;

        let kind = raw.kind.clone().unwrap_or_else(|| DEFAULT_KIND.to_string());
        if !crate::vcs::BACKENDS.contains(&kind.as_str()) {
            return Err(ConfigError::UnknownBackend {
                name: name.to_string(),
                kind,
            }
            .into());
        }

        let path = raw
            .path
            .clone()
            .unwrap_or_else(|| global.sources_dir.join(name));

        Self::builder()
            .name(name)
            .path(path)
            .url(url)
            .kind(kind)
            .maybe_rev(rev)
            .maybe_branch(raw.branch.clone())
            .maybe_preferred_branches(raw.preferred_branches.clone())
            .maybe_pushurl(raw.pushurl.clone())
            .maybe_depth(raw.depth)
            .maybe_submodules(raw.submodules)
            .maybe_update(raw.update)
            .build()
    }

    /// Copy of this source pinned to `branch`.
    ///
    /// Used by branch auto-selection; the caller's descriptor is left as is.
    #[must_use]
    pub fn with_branch(&self, branch: impl Into<String>) -> Self {
        Self {
            branch: Some(branch.into()),
            rev: None,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn rev(&self) -> Option<&str> {
        self.rev.as_deref()
    }

    #[must_use]
    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    #[must_use]
    pub fn preferred_branches(&self) -> Option<&[String]> {
        self.preferred_branches.as_deref()
    }

    #[must_use]
    pub fn pushurl(&self) -> Option<&str> {
        self.pushurl.as_deref()
    }

    #[must_use]
    pub const fn depth(&self) -> Option<u32> {
        self.depth
    }

    /// The source's own policy, or `default` when it has none.
    #[must_use]
    pub fn submodules_or(&self, default: SubmodulePolicy) -> SubmodulePolicy {
        self.submodules.unwrap_or(default)
    }

    /// The source's own update flag, or `default` when it has none.
    #[must_use]
    pub fn update_or(&self, default: bool) -> bool {
        self.update.unwrap_or(default)
    }
}
