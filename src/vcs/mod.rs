// mrdev-rs: Development Source Checkout Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Working copy abstraction shared by all backends.
//!
//! ```text
//!  Source.kind ──> open_working_copy() ──> Box<dyn WorkingCopy>
//!                        |
//!                        +── "git" ──> GitWorkingCopy<ShellRunner>
//!
//!  checkout_or_update(): missing path   -> checkout
//!                        update wanted  -> update
//!                        otherwise      -> URL check, skip or warn
//! ```

use bon::Builder;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::source::Source;
use crate::config::types::{GlobalConfig, SubmodulePolicy};
use crate::error::{ConfigError, DevResult};
use crate::git::GitWorkingCopy;
use crate::git::parse::WorkingTreeStatus;

/// Backend names accepted in a source's `kind`.
pub const BACKENDS: &[&str] = &["git"];

/// Options shared by every operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Builder)]
pub struct OperationOptions {
    /// Return the transcript of every invocation.
    #[builder(default)]
    pub verbose: bool,
    /// Update even when the working tree is not clean.
    #[builder(default)]
    pub force: bool,
    /// Submodule policy for sources that don't set one.
    #[builder(default)]
    pub submodules: SubmodulePolicy,
}

/// Result of a status query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub status: WorkingTreeStatus,
    /// Present when the query ran with `verbose`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
}

/// A checkout managed by one version-control backend.
pub trait WorkingCopy {
    /// The descriptor this working copy was opened with.
    fn source(&self) -> &Source;

    /// Create the checkout. A no-op when its path already exists.
    ///
    /// Returns the transcript when `verbose` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if any invocation fails.
    fn checkout(&self, options: &OperationOptions) -> DevResult<Option<String>>;

    /// Bring an existing checkout up to date.
    ///
    /// Returns the transcript when `verbose` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is missing, the tree is dirty without
    /// `force`, or any invocation fails.
    fn update(&self, options: &OperationOptions) -> DevResult<Option<String>>;

    /// Classify the working tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the status invocation fails.
    fn status(&self, options: &OperationOptions) -> DevResult<StatusReport>;

    /// Whether the checkout still points at the configured URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote query fails.
    fn matches(&self) -> DevResult<bool>;

    /// Set up the caller's feature branch in this checkout.
    ///
    /// Returns false (after logging) when the branch could not be set up.
    ///
    /// # Errors
    ///
    /// Returns an error for failures outside the branch, checkout and push
    /// steps.
    fn new_feature(&self, options: &OperationOptions) -> DevResult<bool>;
}

/// Open the backend named by `source.kind()`.
///
/// # Errors
///
/// Returns `ConfigError::UnknownBackend` for an unknown kind, or a
/// `ProcessError` if the backend's executable cannot be found.
pub fn open_working_copy(source: &Source, global: &GlobalConfig) -> DevResult<Box<dyn WorkingCopy>> {
    match source.kind() {
        "git" => Ok(Box::new(GitWorkingCopy::open(source.clone(), &global.git)?)),
        other => Err(ConfigError::UnknownBackend {
            name: source.name().to_string(),
            kind: other.to_string(),
        }
        .into()),
    }
}

/// Checkout policy for the `checkout` command.
///
/// A missing path is checked out. An existing one is updated when `update`
/// is set, otherwise only its URL is compared against the configuration.
///
/// # Errors
///
/// Propagates errors from the underlying operation.
pub fn checkout_or_update(
    working_copy: &dyn WorkingCopy,
    update: bool,
    options: &OperationOptions,
) -> DevResult<Option<String>> {
    let source = working_copy.source();
    if !source.path().exists() {
        return working_copy.checkout(options);
    }

    if update {
        return working_copy.update(options);
    }

    if working_copy.matches()? {
        info!(source = %source.name(), "skipped checkout of existing package");
    } else {
        warn!(
            source = %source.name(),
            url = %source.url(),
            "checkout URL for existing package differs"
        );
    }
    Ok(None)
}
