// mrdev-rs: Development Source Checkout Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for mrdev-rs.
//!
//! ```text
//! Config: GlobalConfig, sources.<name> -> SourceConfig
//! SubmodulePolicy: always | checkout | never (default, and anything else)
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;

/// When submodules are initialized for a source.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SubmodulePolicy {
    /// On clone and on every update.
    Always,
    /// On the initial clone only.
    Checkout,
    #[default]
    Never,
}

impl SubmodulePolicy {
    /// Whether newly registered submodules are initialized after a clone.
    #[must_use]
    pub const fn on_checkout(self) -> bool {
        matches!(self, Self::Always | Self::Checkout)
    }

    /// Whether newly registered submodules are initialized after an update.
    #[must_use]
    pub const fn on_update(self) -> bool {
        matches!(self, Self::Always)
    }
}

impl From<&str> for SubmodulePolicy {
    fn from(value: &str) -> Self {
        match value {
            "always" => Self::Always,
            "checkout" => Self::Checkout,
            _ => Self::Never,
        }
    }
}

impl std::fmt::Display for SubmodulePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Always => write!(f, "always"),
            Self::Checkout => write!(f, "checkout"),
            Self::Never => write!(f, "never"),
        }
    }
}

// Unknown policies degrade to `never` instead of failing the load.
impl<'de> Deserialize<'de> for SubmodulePolicy {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from(value.as_str()))
    }
}

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Git executable, name or path.
    pub git: PathBuf,
    /// Base directory for sources that have no explicit `path`.
    pub sources_dir: PathBuf,
    /// Submodule policy for sources that don't set one.
    pub submodules: SubmodulePolicy,
    /// Update existing checkouts when running `checkout`.
    pub always_checkout: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
            git: PathBuf::from("git"),
            sources_dir: PathBuf::from("src"),
            submodules: SubmodulePolicy::Never,
            always_checkout: false,
        }
    }
}
