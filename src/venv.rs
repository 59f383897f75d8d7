//! Python virtual environment bootstrap.
//!
//! Creates or refreshes `venv/` from `requirements.in` by shelling out to
//! the interpreter and pip, then freezes the result to `requirements.txt`.
//!
//! Structure:
//! - Pure functions: activation prefix, command plan
//! - Effect functions: staleness check, cleanup, manifest creation, execution

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::types::{CleanReport, Platform, SetupAction, SetupPlan, VenvConfig};

/// Build output directories removed by [`clean`].
const BUILD_DIRS: [&str; 2] = ["build", "dist"];

/// Suffix of setuptools metadata directories in the project root.
const EGG_INFO_SUFFIX: &str = ".egg-info";

/// Bytecode cache directory name, removed anywhere under the root.
const PYCACHE: &str = "__pycache__";

/// Tooling upgraded before the project requirements are installed.
const BOOTSTRAP_PACKAGES: &str = "pip setuptools wheel pip-tools";

/// Failure while building the environment.
#[derive(Debug, Error)]
pub enum VenvError {
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A plan step exited unsuccessfully.
    #[error("command failed ({}): {command}", describe_status(.status))]
    StepFailed {
        command: String,
        /// Exit code, absent when killed by a signal.
        status: Option<i32>,
    },
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

// ============================================================================
// PURE FUNCTIONS (Command Construction)
// ============================================================================

/// Shell prefix that activates the venv before the next command.
///
/// Windows: `venv\Scripts\activate.bat & `
/// Unix:    `. venv/bin/activate; `
pub fn activate_command(platform: Platform, venv_dir: &Path) -> String {
    match platform {
        Platform::Windows => {
            let script = venv_dir.join("Scripts").join("activate.bat");
            format!("{} & ", script.display())
        }
        Platform::Unix => {
            let script = venv_dir.join("bin").join("activate");
            format!(". {}; ", script.display())
        }
    }
}

/// The ordered commands that create, populate and freeze the venv.
///
/// Paths are relative to `config.root`; [`execute`] runs there.
pub fn plan(config: &VenvConfig, platform: Platform) -> SetupPlan {
    let python = &config.python;
    let activate = activate_command(platform, &config.venv_dir);

    let steps = vec![
        format!("{python} -m venv {}", config.venv_dir.display()),
        format!("{activate}{python} -m pip install --upgrade {BOOTSTRAP_PACKAGES}"),
        format!(
            "{activate}{python} -m pip install -r {}",
            config.requirements_in.display()
        ),
        format!(
            "{activate}{python} -m pip freeze > {}",
            config.requirements_txt.display()
        ),
    ];

    SetupPlan { platform, steps }
}

fn shell_command(platform: Platform, step: &str) -> Command {
    let mut command = match platform {
        Platform::Windows => {
            let mut c = Command::new("cmd");
            c.arg("/C");
            c
        }
        Platform::Unix => {
            let mut c = Command::new("sh");
            c.arg("-c");
            c
        }
    };
    command.arg(step);
    command
}

// ============================================================================
// EFFECT FUNCTIONS (Filesystem)
// ============================================================================

/// Whether `a` was modified after `b`. False unless both exist.
pub fn modified_after(a: &Path, b: &Path) -> bool {
    let mtime = |p: &Path| fs::metadata(p).and_then(|m| m.modified());
    match (mtime(a), mtime(b)) {
        (Ok(a), Ok(b)) => a > b,
        _ => false,
    }
}

/// Remove a file or directory tree if present. Returns bytes freed.
pub fn remove(path: &Path) -> io::Result<u64> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };

    if metadata.is_dir() {
        let size = tree_size(path);
        fs::remove_dir_all(path)?;
        Ok(size)
    } else {
        fs::remove_file(path)?;
        Ok(metadata.len())
    }
}

/// Total size of regular files under `path`. Unreadable entries count as zero.
fn tree_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}

/// Directories named `__pycache__` under `root`, outermost only.
fn find_pycaches(root: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut walker = WalkDir::new(root).into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if entry.file_type().is_dir() && entry.file_name() == PYCACHE {
            found.push(entry.into_path());
            walker.skip_current_dir();
        }
    }

    found
}

/// Remove the venv, build output, egg metadata and bytecode caches.
pub fn clean(config: &VenvConfig) -> io::Result<CleanReport> {
    let root = &config.root;
    let mut targets = vec![root.join(&config.venv_dir)];
    targets.extend(BUILD_DIRS.iter().map(|d| root.join(d)));

    for entry in fs::read_dir(root)? {
        let path = entry?.path();
        let is_egg_info = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(EGG_INFO_SUFFIX));
        if is_egg_info {
            targets.push(path);
        }
    }

    let mut report = CleanReport::default();
    sweep(targets, &mut report);

    // Scan after the venv is gone so its caches aren't walked.
    sweep(find_pycaches(root), &mut report);

    Ok(report)
}

/// Remove each existing target, recording failures instead of stopping.
fn sweep(targets: Vec<PathBuf>, report: &mut CleanReport) {
    for target in targets {
        if fs::symlink_metadata(&target).is_err() {
            continue;
        }
        match remove(&target) {
            Ok(bytes) => {
                report.bytes_freed += bytes;
                debug!(path = %target.display(), "removed");
                report.removed.push(target);
            }
            Err(e) => {
                warn!(path = %target.display(), error = %e, "could not remove");
                report.failed.push((target, e.to_string()));
            }
        }
    }
}

/// Get the project ready for [`plan`].
///
/// Creates an empty `requirements.in` when missing. When it exists and
/// is newer than the venv, the environment is cleaned so it is rebuilt
/// from scratch.
pub fn prepare(config: &VenvConfig) -> io::Result<SetupAction> {
    let requirements_in = config.root.join(&config.requirements_in);
    let venv = config.root.join(&config.venv_dir);

    if !requirements_in.exists() {
        fs::File::create(&requirements_in)?;
        info!(path = %requirements_in.display(), "created empty requirements manifest");
        return Ok(SetupAction::CreatedManifest);
    }

    if modified_after(&requirements_in, &venv) {
        info!("requirements changed since venv was built; cleaning");
        return Ok(SetupAction::Refreshed(clean(config)?));
    }

    Ok(SetupAction::Reused)
}

/// Run each plan step through the platform shell inside `root`.
///
/// Stops at the first failing step.
pub fn execute(plan: &SetupPlan, root: &Path) -> Result<(), VenvError> {
    for step in &plan.steps {
        info!(step = %step, "running");
        let status = shell_command(plan.platform, step)
            .current_dir(root)
            .status()?;

        if !status.success() {
            return Err(VenvError::StepFailed {
                command: step.clone(),
                status: status.code(),
            });
        }
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
