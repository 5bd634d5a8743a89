// mrdev-rs: Development Source Checkout Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Checkout command implementation for mrdev-rs.

use super::{for_each_source, print_transcript};
use crate::cli::sources::CheckoutArgs;
use crate::config::Config;
use crate::error::Result;
use crate::vcs::{OperationOptions, checkout_or_update, open_working_copy};

/// Main handler for checkout command.
///
/// Missing sources are cloned. Existing ones are updated when `--update`,
/// the source's `update` key or `global.always_checkout` asks for it.
///
/// # Errors
///
/// Returns an error if source selection fails, a fatal error occurs, or any
/// source fails.
pub fn run_checkout_command(args: &CheckoutArgs, config: &Config) -> Result<()> {
    let sources = config.select_sources(&args.patterns)?;
    let options = OperationOptions::builder()
        .verbose(args.verbose)
        .force(args.force)
        .submodules(args.submodules.unwrap_or(config.global.submodules))
        .build();

    let report = for_each_source(&sources, "checkout", |source| {
        let working_copy = open_working_copy(source, &config.global)?;
        let update = args.update || source.update_or(config.global.always_checkout);
        let transcript = checkout_or_update(working_copy.as_ref(), update, &options)?;
        print_transcript(transcript.as_deref());
        Ok(true)
    })?;
    report.into_result("checkout")
}
