// mrdev-rs: Development Source Checkout Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Status command implementation for mrdev-rs.

use super::{for_each_source, print_transcript};
use crate::cli::sources::StatusArgs;
use crate::config::Config;
use crate::error::Result;
use crate::vcs::{OperationOptions, open_working_copy};

/// Label printed for a source whose checkout does not exist.
pub const MISSING: &str = "missing";

/// Main handler for status command.
///
/// Prints one `<name>: <status>` line per source.
///
/// # Errors
///
/// Returns an error if source selection fails or any status query fails.
pub fn run_status_command(args: &StatusArgs, config: &Config) -> Result<()> {
    let sources = config.select_sources(&args.patterns)?;
    let options = OperationOptions::builder().verbose(args.verbose).build();

    let report = for_each_source(&sources, "status", |source| {
        if !source.path().exists() {
            println!("{}: {MISSING}", source.name());
            return Ok(true);
        }
        let working_copy = open_working_copy(source, &config.global)?;
        let report = working_copy.status(&options)?;
        println!("{}: {}", source.name(), report.status);
        print_transcript(report.transcript.as_deref());
        Ok(true)
    })?;
    report.into_result("status")
}
