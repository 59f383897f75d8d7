//! Domain types for termkit.
//!
//! Plain data shared by the prompt layer and the venv bootstrap.

use serde::Serialize;
use std::path::PathBuf;

use crate::style::{STYLE_OUTPUT, STYLE_PROMPT, Style};

// ============================================================================
// KEYS
// ============================================================================

/// Named raw key codes as delivered by a line-discipline terminal.
///
/// Two codes exist for Enter and Backspace because terminals disagree on
/// line endings and erase characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Key {
    CtrlC = 3,
    Backspace2 = 8,
    Tab = 9,
    Enter2 = 10,
    Enter = 13,
    Esc = 27,
    Backspace = 127,
}

impl Key {
    /// Every code accepted as "Enter".
    pub const ENTER: [Key; 2] = [Key::Enter, Key::Enter2];

    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn as_char(self) -> char {
        self.code() as char
    }

    /// Whether `c` is one of the Enter codes.
    pub fn is_enter(c: char) -> bool {
        Self::ENTER.iter().any(|key| key.as_char() == c)
    }
}

// ============================================================================
// SELECTION
// ============================================================================

/// Presentation settings for a numbered menu.
#[derive(Debug, Clone)]
pub struct SelectConfig {
    /// Line printed above the menu; skipped when empty.
    pub title: String,
    /// Text of the index prompt.
    pub prompt: String,
    /// Style for menu numbers and the index prompt.
    pub prompt_style: Style,
    /// Style for the title, entries and range errors.
    pub output_style: Style,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            prompt: "Select".to_string(),
            prompt_style: STYLE_PROMPT,
            output_style: STYLE_OUTPUT,
        }
    }
}

// ============================================================================
// VENV
// ============================================================================

/// Host flavour, deciding activation syntax and shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    Unix,
}

impl Platform {
    /// Platform of the running process.
    pub const fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }
}

/// Output format for plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable, one command per line.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

/// Locations and interpreter used by the venv bootstrap.
///
/// All relative paths are resolved against `root`.
#[derive(Debug, Clone)]
pub struct VenvConfig {
    /// Project directory holding the manifests.
    pub root: PathBuf,
    /// Virtual environment directory, relative to `root`.
    pub venv_dir: PathBuf,
    /// Interpreter used to create the venv and run pip.
    pub python: String,
    /// Hand-edited list of top-level requirements.
    pub requirements_in: PathBuf,
    /// Frozen requirements written after install.
    pub requirements_txt: PathBuf,
}

impl Default for VenvConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            venv_dir: PathBuf::from("venv"),
            python: "python".to_string(),
            requirements_in: PathBuf::from("requirements.in"),
            requirements_txt: PathBuf::from("requirements.txt"),
        }
    }
}

/// Ordered shell commands that build the venv.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetupPlan {
    pub platform: Platform,
    pub steps: Vec<String>,
}

/// Files removed by a clean, with bytes freed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CleanReport {
    pub removed: Vec<PathBuf>,
    pub bytes_freed: u64,
    /// Paths that could not be removed (path, error message).
    pub failed: Vec<(PathBuf, String)>,
}

/// What `prepare` decided before the plan runs.
#[derive(Debug)]
pub enum SetupAction {
    /// `requirements.in` was missing and has been created empty.
    CreatedManifest,
    /// `requirements.in` changed after the venv was built; stale files removed.
    Refreshed(CleanReport),
    /// Existing venv kept; pip brings it up to date.
    Reused,
}

// ============================================================================
// TESTS
// ============================================================================
