// mrdev-rs: Development Source Checkout Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Checkout | Update | Status | Feature | List | Inis | Version
//! ```

use std::process::ExitCode;

use mrdev_rs::cli::global::GlobalOptions;
use mrdev_rs::cli::{self, Command};
use mrdev_rs::cmd::checkout::run_checkout_command;
use mrdev_rs::cmd::config::run_inis_command;
use mrdev_rs::cmd::feature::run_feature_command;
use mrdev_rs::cmd::list::run_list_command;
use mrdev_rs::cmd::status::run_status_command;
use mrdev_rs::cmd::update::run_update_command;
use mrdev_rs::config::Config;
use mrdev_rs::config::loader::ConfigLoader;
use mrdev_rs::config::types::GlobalConfig;
use mrdev_rs::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Default configuration file, looked up in the current directory.
const DEFAULT_CONFIG_FILE: &str = "mrdev.toml";

fn main() -> ExitCode {
    let cli = cli::parse();

    // Logging levels come from the merged configuration, so a broken
    // configuration is reported on stderr before any subscriber exists.
    let config = match &cli.command {
        Some(Command::Version | Command::Inis) | None => None,
        Some(_) => match load_config(&cli.global) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("Failed to load config: {e:#}");
                return ExitCode::FAILURE;
            }
        },
    };

    let default_global = GlobalConfig::default();
    let log_config = LogConfig::from(config.as_ref().map_or(&default_global, |c| &c.global));
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, config.as_ref())
}

fn dispatch_command(cli: &cli::Cli, config: Option<&Config>) -> ExitCode {
    let result = match (&cli.command, config) {
        (Some(Command::Version), _) => {
            handle_version_command();
            Ok(())
        }
        (Some(Command::Inis), _) => {
            let loader = build_config_loader(&cli.global);
            run_inis_command(&loader.ini_listing());
            Ok(())
        }
        (Some(Command::Checkout(args)), Some(config)) => run_checkout_command(args, config),
        (Some(Command::Update(args)), Some(config)) => run_update_command(args, config),
        (Some(Command::Status(args)), Some(config)) => run_status_command(args, config),
        (Some(Command::Feature(args)), Some(config)) => run_feature_command(args, config),
        (Some(Command::List(args)), Some(config)) => run_list_command(args, config),
        (Some(_), None) => Err(anyhow::anyhow!("No configuration loaded")),
        (None, _) => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> ConfigLoader {
    let mut loader = ConfigLoader::new();
    if !global.no_default_inis {
        loader = loader.default_ini(DEFAULT_CONFIG_FILE);
    }
    for ini_path in &global.inis {
        loader = loader.ini(ini_path);
    }
    loader.with_env()
}

fn load_config(global: &GlobalOptions) -> mrdev_rs::error::Result<Config> {
    let mut loader = build_config_loader(global);
    for option in global.to_config_overrides() {
        loader = loader.set_option(&option)?;
    }
    loader.build()
}
