// mrdev-rs: Development Source Checkout Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for mrdev-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. local mrdev.toml (cwd)
//! 3. --ini FILE (repeatable)
//! 4. MRDEV__* env vars
//! 5. --set KEY=VALUE overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! MRDEV__GLOBAL__SUBMODULES=always   → global.submodules = "always"
//! MRDEV__GLOBAL__SOURCES_DIR=/path   → global.sources_dir = "/path"
//! ```
//!
//! # Sources
//!
//! ```toml
//! [sources.my-package]
//! url = "https://example/repo.git"
//! branch = "dev"
//! preferred-branches = ["main", "release"]
//! ```

pub mod loader;
pub mod source;
pub mod types;


use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use wax::Program as _;

use crate::error::Result;

use loader::ConfigLoader;
use source::{Source, SourceConfig};
use types::GlobalConfig;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Source tables, keyed by source name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub sources: BTreeMap<String, SourceConfig>,
    /// Validated sources, filled by `resolve_and_validate`.
    #[serde(skip)]
    resolved: BTreeMap<String, Source>,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mrdev_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .default_ini("mrdev.toml")
    ///     .with_env()
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not validate.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().ini(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not validate.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().inline(content).build()
    }

    /// Validate every source table.
    ///
    /// Runs before any external invocation, so a revision conflict stops
    /// the process before anything is touched.
    ///
    /// # Errors
    ///
    /// Returns the first source validation error.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        let mut resolved = BTreeMap::new();
        for (name, raw) in &self.sources {
            let source = Source::from_config(name, raw, &self.global)?;
            resolved.insert(name.clone(), source);
        }
        self.resolved = resolved;
        Ok(())
    }

    /// All validated sources, in name order.
    pub fn all_sources(&self) -> impl Iterator<Item = &Source> {
        self.resolved.values()
    }

    /// Look up one validated source by name.
    #[must_use]
    pub fn source(&self, name: &str) -> Option<&Source> {
        self.resolved.get(name)
    }

    /// Select sources by exact name or glob pattern.
    ///
    /// An empty pattern list selects every source. Each source appears once,
    /// in name order.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern is not a valid glob or matches nothing.
    pub fn select_sources(&self, patterns: &[String]) -> Result<Vec<&Source>> {
        if patterns.is_empty() {
            return Ok(self.all_sources().collect());
        }

        let mut selected = BTreeMap::new();
        for pattern in patterns {
            if let Some(source) = self.resolved.get(pattern) {
                selected.insert(source.name(), source);
                continue;
            }

            let glob = wax::Glob::new(pattern)
                .map_err(|e| anyhow::anyhow!("invalid source pattern '{pattern}': {e}"))?;
            let mut matched = false;
            for (name, source) in &self.resolved {
                if glob.is_match(name.as_str()) {
                    selected.insert(name.as_str(), source);
                    matched = true;
                }
            }
            if !matched {
                bail!("no source matches '{pattern}'");
            }
        }
        Ok(selected.into_values().collect())
    }
}
