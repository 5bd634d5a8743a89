// mrdev-rs: Development Source Checkout Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   checkout, update, status, feature, list, config
//!
//! for_each_source():
//!   Ok(true)         -> succeeded
//!   Ok(false) / Err  -> logged, counted, next source
//!   fatal Err        -> stop now
//! ```

pub mod checkout;
pub mod config;
pub mod feature;
pub mod list;
pub mod status;
pub mod update;

use anyhow::{Context, bail};
use tracing::error;

use crate::config::source::Source;
use crate::error::{DevResult, Result};
use crate::logging::source_span;

/// Outcome of one command over its selected sources.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub succeeded: usize,
    /// Names of the sources whose operation failed, in processing order.
    pub failed: Vec<String>,
}

impl BatchReport {
    /// Turn any failure into an error naming the failed sources.
    ///
    /// # Errors
    ///
    /// Returns an error if at least one source failed.
    pub fn into_result(self, operation: &str) -> Result<()> {
        if self.failed.is_empty() {
            return Ok(());
        }
        bail!(
            "{operation} failed for {} source(s): {}",
            self.failed.len(),
            self.failed.join(", ")
        )
    }
}

/// Run `operation` on each source in order.
///
/// `run` returns `Ok(false)` for a failure it has already reported.
///
/// # Errors
///
/// Returns the first fatal error; every other failure is logged and
/// recorded in the report.
pub fn for_each_source<F>(
    sources: &[&Source],
    operation: &'static str,
    mut run: F,
) -> Result<BatchReport>
where
    F: FnMut(&Source) -> DevResult<bool>,
{
    let mut report = BatchReport::default();
    for &source in sources {
        let span = source_span(source.name(), operation);
        let _entered = span.enter();

        match run(source) {
            Ok(true) => report.succeeded += 1,
            Ok(false) => report.failed.push(source.name().to_string()),
            Err(err) if err.is_fatal() => {
                error!(source = %source.name(), "{err}");
                return Err(err)
                    .with_context(|| format!("{operation} stopped at '{}'", source.name()));
            }
            Err(err) => {
                error!(source = %source.name(), "{err}");
                report.failed.push(source.name().to_string());
            }
        }
    }
    Ok(report)
}

/// Print a verbose transcript below its source.
pub(crate) fn print_transcript(transcript: Option<&str>) {
    if let Some(text) = transcript.filter(|text| !text.is_empty()) {
        for line in text.lines() {
            println!("    {line}");
        }
    }
}

#[cfg(test)]
mod tests;
