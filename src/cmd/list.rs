// mrdev-rs: Development Source Checkout Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! List command implementation for mrdev-rs.

use crate::cli::sources::ListArgs;
use crate::config::Config;
use crate::config::source::Source;
use crate::error::Result;

/// One line per source: name, kind, pinned branch or revision, path, URL.
#[must_use]
pub fn format_source(source: &Source) -> String {
    let pin = source
        .rev()
        .map(|rev| format!("rev {rev}"))
        .or_else(|| source.branch().map(|branch| format!("branch {branch}")))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{} [{}] {} {} <{}>",
        source.name(),
        source.kind(),
        pin,
        source.path().display(),
        source.url()
    )
}

/// Main handler for list command.
///
/// # Errors
///
/// Returns an error if source selection or JSON serialization fails.
pub fn run_list_command(args: &ListArgs, config: &Config) -> Result<()> {
    let sources = config.select_sources(&args.patterns)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&sources)?);
        return Ok(());
    }

    if sources.is_empty() {
        println!("No sources configured");
    } else {
        for source in sources {
            println!("{}", format_source(source));
        }
    }
    Ok(())
}
