// mrdev-rs: Development Source Checkout Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for mrdev-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! mrdev [global options] <command>
//! checkout [patterns...]
//! update [patterns...]
//! status [patterns...]
//! feature [patterns...]
//! list [patterns...]
//! inis
//! version
//! ```

pub mod global;
pub mod sources;


use crate::cli::global::GlobalOptions;
use crate::cli::sources::{CheckoutArgs, FeatureArgs, ListArgs, StatusArgs, UpdateArgs};
use clap::{Parser, Subcommand};

/// Development Source Checkout Manager
///
/// Checks out and updates the git repositories a project develops against.
#[derive(Debug, Parser)]
#[command(
    name = "mrdev",
    author,
    version,
    about = "Development Source Checkout Manager",
    long_about = "mrdev-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Checks out and updates the source repositories listed in\n\
                  the configuration. `mrdev checkout` clones every missing\n\
                  source, `mrdev update` brings existing ones up to date. See\n\
                  `mrdev <command> --help` for more information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  By default, mrdev loads `mrdev.toml` from the current directory\n\
                  if it exists. Additional files can be given with --ini and are\n\
                  loaded after it, overriding its values. Use --no-default-inis to\n\
                  only use --ini. MRDEV__<SECTION>__<KEY> environment variables and\n\
                  --set override all files."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists the config files used by mrdev.
    Inis,

    /// Clones missing sources.
    #[command(visible_alias = "co")]
    Checkout(CheckoutArgs),

    /// Fetches and merges existing sources.
    #[command(visible_alias = "up")]
    Update(UpdateArgs),

    /// Shows whether each source is clean, ahead or dirty.
    #[command(visible_alias = "st")]
    Status(StatusArgs),

    /// Sets up the current feature branch in each source.
    Feature(FeatureArgs),

    /// Lists configured sources.
    #[command(visible_alias = "ls")]
    List(ListArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
