// mrdev-rs: Development Source Checkout Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for the per-source commands.
//!
//! ```text
//! checkout [PATTERN...] [--update] [--force] [-v] [--submodules POLICY]
//! update   [PATTERN...] [--force] [-v] [--submodules POLICY]
//! status   [PATTERN...] [-v]
//! feature  [PATTERN...]
//! list     [PATTERN...] [--json]
//! ```
//!
//! Patterns are source names or globs; none selects every source.

use clap::Args;

use crate::config::types::SubmodulePolicy;

/// Arguments for the `checkout` command.
#[derive(Debug, Clone, Args)]
pub struct CheckoutArgs {
    /// Source names or glob patterns.
    #[arg(value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Updates checkouts that already exist.
    #[arg(short = 'u', long)]
    pub update: bool,

    /// Updates even when the working tree has local changes.
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Prints the output of every git invocation.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Submodule policy for sources that don't set one.
    #[arg(long, value_name = "POLICY", value_enum)]
    pub submodules: Option<SubmodulePolicy>,
}

/// Arguments for the `update` command.
#[derive(Debug, Clone, Args)]
pub struct UpdateArgs {
    /// Source names or glob patterns.
    #[arg(value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Updates even when the working tree has local changes.
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Prints the output of every git invocation.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Submodule policy for sources that don't set one.
    #[arg(long, value_name = "POLICY", value_enum)]
    pub submodules: Option<SubmodulePolicy>,
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Args)]
pub struct StatusArgs {
    /// Source names or glob patterns.
    #[arg(value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Prints the raw status output below each source.
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Arguments for the `feature` command.
#[derive(Debug, Clone, Args)]
pub struct FeatureArgs {
    /// Source names or glob patterns.
    #[arg(value_name = "PATTERN")]
    pub patterns: Vec<String>,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Source names or glob patterns.
    #[arg(value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Prints the resolved sources as JSON.
    #[arg(long)]
    pub json: bool,
}
