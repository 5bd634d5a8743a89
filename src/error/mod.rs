// mrdev-rs: Development Source Checkout Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!          DevError (~24 bytes)
//!                 |
//!   +-------+-----+-----+--------+
//!   |       |     |     |        |
//!   v       v     v     v        v
//! Bailed   Git  Config Process  Io/Other
//! Box<str> Box   Box    Box     Box
//!
//! Sub-errors (unboxed internally):
//!   Git     ToolFailed, Dirty, BranchNotFound, MissingPath
//!   Config  ParseError, MissingKey, InvalidValue,
//!           ConflictingRevision, DuplicateRevision, UnknownBackend
//!   Process ExecutableNotFound, SpawnFailed
//!
//! Bailed (and a revision conflict in Config) is the fatal tier:
//! command handlers stop on it and the process exits non-zero.
//! Everything else is operation-scoped.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`DevError`].
pub type DevResult<T> = std::result::Result<T, DevError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum DevError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// Version-control tool operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

impl DevError {
    /// Whether this error must stop all further processing.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Bailed(_) => true,
            Self::Config(err) => err.is_fatal(),
            _ => false,
        }
    }
}

/// Create a fatal [`DevError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> DevError {
    DevError::Bailed(message.into().into_boxed_str())
}

/// Returns true if `err` (or anything in its chain) is a fatal [`DevError`].
#[must_use]
pub fn is_fatal(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<DevError>())
        .any(DevError::is_fatal)
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for DevError {
                fn from(err: $error) -> Self {
                    DevError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ConfigError => Config,
    ProcessError => Process,
    std::io::Error => Io,
}

// --- Git Errors ---

/// Errors raised by working copy operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// The external tool exited with a non-zero status.
    #[error("'{command}'\n{stdout}\n{stderr}")]
    ToolFailed {
        command: String,
        stdout: String,
        stderr: String,
    },

    /// Working tree has local modifications and the caller did not force.
    #[error("can't update package '{name}' because it's dirty")]
    Dirty { name: String },

    /// Branch exists neither locally nor on the remote.
    #[error("no such branch {branch:?}")]
    BranchNotFound { branch: String },

    /// Operation requires an existing checkout.
    #[error("checkout path does not exist: {path}")]
    MissingPath { path: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration.
    #[error("failed to parse config '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Both `branch` and `rev` were given for one source.
    #[error("cannot specify both branch ({branch}) and rev/revision ({rev}) in source for {name}")]
    ConflictingRevision {
        name: String,
        branch: String,
        rev: String,
    },

    /// Both `rev` and `revision` were given for one source.
    #[error("the source definition of '{name}' contains duplicate revision options")]
    DuplicateRevision { name: String },

    /// No working copy backend is registered under this name.
    #[error("unknown backend '{kind}' for source '{name}'")]
    UnknownBackend { name: String, kind: String },
}

impl ConfigError {
    /// Revision conflicts leave no safe way to run any operation.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ConflictingRevision { .. } | Self::DuplicateRevision { .. }
        )
    }
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests;
