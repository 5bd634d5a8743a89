// mrdev-rs: Development Source Checkout Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Feature command implementation for mrdev-rs.

use super::for_each_source;
use crate::cli::sources::FeatureArgs;
use crate::config::Config;
use crate::error::Result;
use crate::vcs::{OperationOptions, open_working_copy};

/// Main handler for feature command.
///
/// Creates the project's current branch in every selected source, based on
/// the source's first preferred branch, and pushes it.
///
/// # Errors
///
/// Returns an error if source selection fails, a fatal error occurs, or the
/// branch could not be set up in any source.
pub fn run_feature_command(args: &FeatureArgs, config: &Config) -> Result<()> {
    let sources = config.select_sources(&args.patterns)?;
    let options = OperationOptions::builder()
        .submodules(config.global.submodules)
        .build();

    let report = for_each_source(&sources, "feature", |source| {
        open_working_copy(source, &config.global)?.new_feature(&options)
    })?;
    report.into_result("feature")
}
