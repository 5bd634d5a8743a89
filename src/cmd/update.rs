// mrdev-rs: Development Source Checkout Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Update command implementation for mrdev-rs.

use super::{for_each_source, print_transcript};
use crate::cli::sources::UpdateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::vcs::{OperationOptions, open_working_copy};

/// Main handler for update command.
///
/// # Errors
///
/// Returns an error if source selection fails, a fatal error occurs, or any
/// source fails (a dirty tree without `--force` counts as a failure).
pub fn run_update_command(args: &UpdateArgs, config: &Config) -> Result<()> {
    let sources = config.select_sources(&args.patterns)?;
    let options = OperationOptions::builder()
        .verbose(args.verbose)
        .force(args.force)
        .submodules(args.submodules.unwrap_or(config.global.submodules))
        .build();

    let report = for_each_source(&sources, "update", |source| {
        let working_copy = open_working_copy(source, &config.global)?;
        let transcript = working_copy.update(&options)?;
        print_transcript(transcript.as_deref());
        Ok(true)
    })?;
    report.into_result("update")
}
