//! termkit: terminal prompts, keystroke capture and numbered menus,
//! plus a Python virtual environment bootstrap.

pub mod demo;
pub mod keystroke;
pub mod prompt;
pub mod select;
pub mod style;
pub mod term;
pub mod types;
pub mod venv;
