// mrdev-rs: Development Source Checkout Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend.
//!
//! ```text
//!           GitWorkingCopy (working_copy.rs)
//!      checkout / update / status / matches / new_feature
//!          |              |                 |
//!          v              v                 v
//!     version/       parse/            transcript.rs
//!   GitVersion   presence, status,   stdout of every call
//!   (memoized)   submodules, url
//!          \              |
//!           v             v
//!        GitRunner (runner.rs)
//!        ShellRunner: git <args>, captured, no prompts
//! ```
//!
//! The driver is synchronous: each invocation blocks until the tool exits.

pub mod parse;
pub mod runner;
pub mod transcript;
pub mod version;
pub mod working_copy;

pub use runner::{ExecOutput, GitRunner, ShellRunner};
pub use transcript::Transcript;
pub use version::GitVersion;
pub use working_copy::GitWorkingCopy;
