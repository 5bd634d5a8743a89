// mrdev-rs: Development Source Checkout Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git working copy driver.
//!
//! ```text
//! checkout   path exists? -> nothing
//!            auto-select -> clone [--depth] [-b] -> rev? switch
//!            -> pushurl? config -> submodules? init + update
//!
//! update     path missing? -> MissingPath
//!            url check (warn) -> dirty and !force? -> Dirty
//!            auto-select -> fetch --prune
//!            rev     -> switch
//!            branch  -> switch, merge
//!            neither -> switch, merge  (default branch, missing tolerated)
//!            -> submodules (always only)
//!
//! switch     rev          -> checkout <rev>
//!            local        -> checkout <branch>
//!            remote only  -> checkout -b <branch> <prefix>/<branch>
//!            missing      -> tolerated no-op | BranchNotFound
//! ```

use std::cell::OnceCell;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use super::parse::{
    BranchPresence, WorkingTreeStatus, parse_branch_presence, parse_initialized_submodules,
    parse_status, url_matches,
};
use super::runner::{GitRunner, ShellRunner, command_line};
use super::transcript::Transcript;
use super::version::GitVersion;
use crate::config::source::Source;
use crate::error::{DevError, DevResult, GitError, bail_out};
use crate::vcs::{OperationOptions, StatusReport, WorkingCopy};

/// Remote every checkout is cloned from.
pub const UPSTREAM: &str = "origin";

/// Branch assumed when a source names neither a branch nor a revision.
pub const DEFAULT_BRANCH: &str = "master";

fn path_arg(path: &Path) -> DevResult<&str> {
    path.to_str().ok_or_else(|| {
        DevError::Other(format!("path is not valid UTF-8: {}", path.display()).into())
    })
}

/// One source's checkout, driven through a [`GitRunner`].
///
/// The tool version is queried at most once per instance.
#[derive(Debug)]
pub struct GitWorkingCopy<R: GitRunner = ShellRunner> {
    source: Source,
    runner: R,
    project_dir: Option<PathBuf>,
    version: OnceCell<GitVersion>,
}

impl GitWorkingCopy<ShellRunner> {
    /// Open `source` with the executable found at or through `git`.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` if `git` cannot be found.
    pub fn open(source: Source, git: &Path) -> DevResult<Self> {
        Ok(Self::with_runner(source, ShellRunner::locate(git)?))
    }
}

impl<R: GitRunner> GitWorkingCopy<R> {
    pub const fn with_runner(source: Source, runner: R) -> Self {
        Self {
            source,
            runner,
            project_dir: None,
            version: OnceCell::new(),
        }
    }

    /// Directory of the enclosing project whose branch drives branch
    /// auto-selection and feature setup. Defaults to the process working
    /// directory.
    #[must_use]
    pub fn with_project_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.project_dir = Some(dir.into());
        self
    }

    pub const fn runner(&self) -> &R {
        &self.runner
    }

    /// Run one invocation, recording its stdout.
    ///
    /// # Errors
    ///
    /// Returns `GitError::ToolFailed` with the full command line and both
    /// output streams on a non-zero exit status.
    pub fn git(
        &self,
        transcript: &mut Transcript,
        args: &[&str],
        cwd: Option<&Path>,
    ) -> DevResult<String> {
        let args: Vec<String> = args.iter().map(|arg| (*arg).to_string()).collect();
        let output = self.runner.execute(&args, cwd)?;
        let stdout = output.stdout_text();
        transcript.record(stdout.as_str());

        if !output.success() {
            return Err(GitError::ToolFailed {
                command: command_line(self.runner.program(), &args),
                stdout,
                stderr: output.stderr_text(),
            }
            .into());
        }
        Ok(stdout)
    }

    /// Installed tool version, queried on first use.
    ///
    /// # Errors
    ///
    /// Returns a fatal error if the version cannot be determined or is
    /// unsupported.
    pub fn version(&self, transcript: &mut Transcript) -> DevResult<&GitVersion> {
        if let Some(version) = self.version.get() {
            return Ok(version);
        }

        let output = match self.git(transcript, &["--version"], None) {
            Ok(output) => output,
            Err(err) => {
                error!("could not determine git version");
                error!("{err}");
                return Err(bail_out(format!("could not determine git version: {err}")));
            }
        };
        let version = GitVersion::from_output(&output)?;
        Ok(self.version.get_or_init(|| version))
    }

    fn remote_branch_prefix(&self, transcript: &mut Transcript) -> DevResult<String> {
        Ok(self.version(transcript)?.remote_branch_prefix(UPSTREAM))
    }

    /// Branch checked out in `cwd`, or `None` when HEAD is detached or `cwd`
    /// is not a repository.
    ///
    /// # Errors
    ///
    /// Returns an error only when the process cannot be started.
    pub fn current_branch(
        &self,
        transcript: &mut Transcript,
        cwd: Option<&Path>,
    ) -> DevResult<Option<String>> {
        match self.git(transcript, &["symbolic-ref", "--short", "HEAD"], cwd) {
            Ok(output) => {
                let branch = output.trim();
                Ok((!branch.is_empty()).then(|| branch.to_string()))
            }
            Err(DevError::Git(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Where `branch` exists in the checkout.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing fails.
    pub fn branch_presence(
        &self,
        transcript: &mut Transcript,
        branch: &str,
    ) -> DevResult<BranchPresence> {
        let listing = self.git(transcript, &["branch", "-a"], Some(self.source.path()))?;
        let prefix = self.remote_branch_prefix(transcript)?;
        parse_branch_presence(&listing, branch, &prefix)
    }

    /// Branch to use for a source that pins neither a branch nor a revision
    /// but has `preferred-branches`.
    ///
    /// The project's current branch wins when it is preferred; otherwise the
    /// first preferred branch. `None` leaves the source as configured.
    ///
    /// # Errors
    ///
    /// Returns an error only when the process cannot be started.
    pub fn auto_select_branch(&self, transcript: &mut Transcript) -> DevResult<Option<String>> {
        if self.source.branch().is_some() || self.source.rev().is_some() {
            return Ok(None);
        }
        let Some(preferred) = self.source.preferred_branches() else {
            return Ok(None);
        };
        let Some(current) = self.current_branch(transcript, self.project_dir.as_deref())? else {
            return Ok(None);
        };

        let selected = match preferred.first() {
            Some(first) if !preferred.contains(&current) => first.clone(),
            _ => current,
        };
        info!(source = %self.source.name(), branch = %selected, "auto-selecting branch");
        Ok(Some(selected))
    }

    fn effective_source(&self, transcript: &mut Transcript) -> DevResult<Source> {
        Ok(match self.auto_select_branch(transcript)? {
            Some(branch) => self.source.with_branch(branch),
            None => self.source.clone(),
        })
    }

    /// Check out the revision or branch of `source`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::BranchNotFound` when the branch exists nowhere and
    /// `accept_missing` is false, or any invocation error.
    pub fn switch_branch(
        &self,
        transcript: &mut Transcript,
        source: &Source,
        accept_missing: bool,
    ) -> DevResult<()> {
        let path = Some(source.path());
        if let Some(rev) = source.rev() {
            self.git(transcript, &["checkout", rev], path)?;
            info!(source = %source.name(), rev, "switched to revision");
            return Ok(());
        }

        let branch = source.branch().unwrap_or(DEFAULT_BRANCH);
        let presence = self.branch_presence(transcript, branch)?;
        if presence.local {
            self.git(transcript, &["checkout", branch], path)?;
        } else if presence.remote {
            let tracking = format!("{}/{branch}", self.remote_branch_prefix(transcript)?);
            self.git(transcript, &["checkout", "-b", branch, &tracking], path)?;
        } else if accept_missing {
            info!(source = %source.name(), branch, "no such branch");
            return Ok(());
        } else {
            error!(source = %source.name(), branch, "no such branch");
            return Err(GitError::BranchNotFound {
                branch: branch.to_string(),
            }
            .into());
        }
        info!(source = %source.name(), branch, "switched to branch");
        Ok(())
    }

    /// Merge the remote-tracking counterpart of the source's branch.
    ///
    /// # Errors
    ///
    /// Returns `GitError::BranchNotFound` when the branch is not present both
    /// locally and remotely and `accept_missing` is false, or any invocation
    /// error.
    pub fn merge_remote_branch(
        &self,
        transcript: &mut Transcript,
        source: &Source,
        accept_missing: bool,
    ) -> DevResult<()> {
        let branch = source.branch().unwrap_or(DEFAULT_BRANCH);
        let presence = self.branch_presence(transcript, branch)?;
        if !presence.both() {
            if accept_missing {
                info!(source = %source.name(), branch, "no such branch");
                return Ok(());
            }
            error!(source = %source.name(), branch, "no such branch");
            return Err(GitError::BranchNotFound {
                branch: branch.to_string(),
            }
            .into());
        }

        let tracking = format!("{}/{branch}", self.remote_branch_prefix(transcript)?);
        self.git(transcript, &["merge", &tracking], Some(source.path()))?;
        Ok(())
    }

    fn init_submodules(&self, transcript: &mut Transcript, source: &Source) -> DevResult<()> {
        let path = Some(source.path());
        let output = self.git(transcript, &["submodule", "init"], path)?;
        for submodule in parse_initialized_submodules(&output)? {
            self.git(transcript, &["submodule", "update", &submodule], path)?;
            info!(source = %source.name(), submodule = %submodule, "initialized submodule");
        }
        Ok(())
    }

    fn clone_source(
        &self,
        transcript: &mut Transcript,
        source: &Source,
        options: &OperationOptions,
    ) -> DevResult<()> {
        match source.branch() {
            Some(branch) => info!(source = %source.name(), url = %source.url(), branch, "cloning"),
            None => info!(source = %source.name(), url = %source.url(), "cloning"),
        }

        let depth = source.depth().map(|depth| depth.to_string());
        let mut args = vec!["clone", "--quiet"];
        if let Some(depth) = &depth {
            args.extend(["--depth", depth.as_str()]);
        }
        if let Some(branch) = source.branch() {
            args.extend(["-b", branch]);
        }
        args.extend([source.url(), path_arg(source.path())?]);
        self.git(transcript, &args, None)?;

        if source.rev().is_some() {
            self.switch_branch(transcript, source, false)?;
        }

        if let Some(pushurl) = source.pushurl() {
            let key = format!("remote.{UPSTREAM}.pushurl");
            self.git(transcript, &["config", &key, pushurl], Some(source.path()))?;
        }

        if source.submodules_or(options.submodules).on_checkout() {
            self.init_submodules(transcript, source)?;
        }
        Ok(())
    }

    fn status_in(&self, transcript: &mut Transcript) -> DevResult<WorkingTreeStatus> {
        let output = self.git(transcript, &["status", "-s", "-b"], Some(self.source.path()))?;
        Ok(parse_status(&output))
    }

    fn matches_in(&self, transcript: &mut Transcript) -> DevResult<bool> {
        let output = self.git(
            transcript,
            &["remote", "show", "-n", UPSTREAM],
            Some(self.source.path()),
        )?;
        Ok(url_matches(&output, self.source.url()))
    }

    fn fetch(&self, transcript: &mut Transcript) -> DevResult<()> {
        info!(source = %self.source.name(), "fetching");
        self.git(transcript, &["fetch", "--prune"], Some(self.source.path()))?;
        Ok(())
    }

    /// Run one feature-setup step, reporting a tool failure as `false`.
    fn feature_step(
        &self,
        transcript: &mut Transcript,
        step: &'static str,
        args: &[&str],
    ) -> DevResult<bool> {
        match self.git(transcript, args, Some(self.source.path())) {
            Ok(_) => Ok(true),
            Err(DevError::Git(err)) => {
                error!(source = %self.source.name(), step, "{err}");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }
}

impl<R: GitRunner> WorkingCopy for GitWorkingCopy<R> {
    fn source(&self) -> &Source {
        &self.source
    }

    fn checkout(&self, options: &OperationOptions) -> DevResult<Option<String>> {
        if self.source.path().exists() {
            info!(
                source = %self.source.name(),
                path = %self.source.path().display(),
                "skipped cloning of existing package"
            );
            return Ok(None);
        }

        let mut transcript = Transcript::new();
        let source = self.effective_source(&mut transcript)?;
        self.clone_source(&mut transcript, &source, options)?;
        Ok(options.verbose.then(|| transcript.text()))
    }

    fn update(&self, options: &OperationOptions) -> DevResult<Option<String>> {
        let name = self.source.name();
        if !self.source.path().exists() {
            return Err(GitError::MissingPath {
                path: self.source.path().display().to_string(),
            }
            .into());
        }

        let mut transcript = Transcript::new();
        if !self.matches_in(&mut transcript)? {
            warn!(source = %name, url = %self.source.url(), "checkout URL differs");
        }
        if self.status_in(&mut transcript)? != WorkingTreeStatus::Clean && !options.force {
            return Err(GitError::Dirty {
                name: name.to_string(),
            }
            .into());
        }

        let source = self.effective_source(&mut transcript)?;
        info!(source = %name, "updating");
        self.fetch(&mut transcript)?;

        if source.rev().is_some() {
            self.switch_branch(&mut transcript, &source, false)?;
        } else if source.branch().is_some() {
            self.switch_branch(&mut transcript, &source, false)?;
            self.merge_remote_branch(&mut transcript, &source, false)?;
        } else {
            self.switch_branch(&mut transcript, &source, true)?;
            self.merge_remote_branch(&mut transcript, &source, true)?;
        }

        if source.submodules_or(options.submodules).on_update() {
            self.init_submodules(&mut transcript, &source)?;
        }
        Ok(options.verbose.then(|| transcript.text()))
    }

    fn status(&self, options: &OperationOptions) -> DevResult<StatusReport> {
        let mut transcript = Transcript::new();
        let status = self.status_in(&mut transcript)?;
        Ok(StatusReport {
            status,
            transcript: options.verbose.then(|| transcript.text()),
        })
    }

    fn matches(&self) -> DevResult<bool> {
        self.matches_in(&mut Transcript::new())
    }

    fn new_feature(&self, options: &OperationOptions) -> DevResult<bool> {
        let name = self.source.name();
        let mut transcript = Transcript::new();

        let current = self.current_branch(&mut transcript, self.project_dir.as_deref())?;
        let preferred = self.source.preferred_branches();
        let (Some(current), Some(preferred)) = (current, preferred) else {
            error!(source = %name, "you are not on a feature branch");
            return Ok(false);
        };
        if preferred.contains(&current) {
            error!(source = %name, branch = %current, "you are not on a feature branch");
            return Ok(false);
        }
        let Some(base) = preferred.first() else {
            error!(source = %name, "no preferred branches, did you already set up your branch?");
            return Ok(false);
        };

        if self.source.path().exists() {
            self.fetch(&mut transcript)?;
        } else {
            self.clone_source(&mut transcript, &self.source, options)?;
        }

        let presence = self.branch_presence(&mut transcript, &current)?;
        if !presence.local {
            let start = format!("{}/{base}", self.remote_branch_prefix(&mut transcript)?);
            if !self.feature_step(&mut transcript, "create branch", &["branch", &current, &start])? {
                return Ok(false);
            }
            info!(source = %name, branch = %current, base = %base, "created branch");
        }

        let checked_out = self.current_branch(&mut transcript, Some(self.source.path()))?;
        if checked_out.as_deref() != Some(current.as_str()) {
            if !self.feature_step(&mut transcript, "checkout", &["checkout", &current])? {
                return Ok(false);
            }
            info!(source = %name, branch = %current, "switched to branch");
        }

        if presence.remote {
            info!(source = %name, branch = %current, "branch already exists on the remote");
        } else {
            let pushed = self.feature_step(
                &mut transcript,
                "push",
                &["push", "--set-upstream", UPSTREAM, &current],
            )?;
            if !pushed {
                return Ok(false);
            }
            info!(source = %name, branch = %current, "pushed branch");
        }
        Ok(true)
    }
}
