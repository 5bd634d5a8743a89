// mrdev-rs: Development Source Checkout Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered configuration loading.
//!
//! ```text
//! default_ini("mrdev.toml")      skipped when absent
//!   ini(--ini)...                required, in command-line order
//!     with_env()                 MRDEV__GLOBAL__SUBMODULES=always
//!       set_option(--set)...     global/submodules=always
//!        |
//!        v
//!    build() --> Config (validated)
//! ```
//!
//! Later layers override earlier ones key by key.

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};
use std::fmt;
use std::path::{Path, PathBuf};

use super::Config;
use crate::error::{ConfigError, Result};

/// Prefix of environment overrides, e.g. `MRDEV__GLOBAL__SOURCES_DIR`.
const ENV_PREFIX: &str = "MRDEV";

/// How a configuration file entered the stack, as shown by `mrdev inis`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IniKind {
    /// The project file picked up from the working directory.
    Default,
    /// A file named with `--ini`.
    Explicit,
}

impl fmt::Display for IniKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Default => "default",
            Self::Explicit => "ini",
        })
    }
}

/// Collects configuration layers and builds a validated [`Config`].
#[derive(Default)]
pub struct ConfigLoader {
    builder: ConfigBuilder<DefaultState>,
    use_env: bool,
    inis: Vec<(IniKind, PathBuf)>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the project's default file, if it exists.
    #[must_use]
    pub fn default_ini(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(false));
        if path.exists() {
            self.inis.push((IniKind::Default, path.to_path_buf()));
        }
        self
    }

    /// Adds a file that must exist when [`build`](Self::build) runs.
    #[must_use]
    pub fn ini(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(true));
        self.inis.push((IniKind::Explicit, path.to_path_buf()));
        self
    }

    /// Adds TOML text. Not listed by `mrdev inis`.
    #[must_use]
    pub(crate) fn inline(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self
    }

    /// Reads `MRDEV__<SECTION>__<KEY>` overrides at build time.
    #[must_use]
    pub fn with_env(mut self) -> Self {
        self.use_env = true;
        self
    }

    /// Applies a `--set` option of the form `key=value`.
    ///
    /// Keys use dots (`global.submodules`) or slashes (`global/submodules`)
    /// as separators.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the option has no `=`, or an
    /// error if the key is not a valid path.
    pub fn set_option(mut self, option: &str) -> Result<Self> {
        let Some((key, value)) = option.split_once('=') else {
            return Err(ConfigError::InvalidValue {
                section: "cli".to_string(),
                key: "set".to_string(),
                message: format!("expected KEY=VALUE, got '{option}'"),
            }
            .into());
        };
        let key = key.trim().replace('/', ".");
        self.builder = self.builder.set_override(&key, value.trim())?;
        Ok(self)
    }

    /// Merges every layer and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a required file is missing or malformed, the
    /// merged tables do not deserialize, or a source fails validation.
    pub fn build(self) -> Result<Config> {
        let builder = if self.use_env {
            self.builder.add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
        } else {
            self.builder
        };
        let mut config: Config = builder.build()?.try_deserialize()?;
        config.resolve_and_validate()?;
        Ok(config)
    }

    /// Numbered lines naming each file that will be read.
    #[must_use]
    pub fn ini_listing(&self) -> Vec<String> {
        self.inis
            .iter()
            .enumerate()
            .map(|(i, (kind, path))| format!("{}. [{kind}] {}", i + 1, path.display()))
            .collect()
    }
}
