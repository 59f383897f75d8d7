//! Terminal boundary: the only place that touches the standard streams.
//!
//! Prompt logic programs against the [`Terminal`] trait. Two
//! implementations exist:
//! - [`ConsoleTerminal`]: the real terminal via crossterm (raw mode for
//!   single keystrokes, cooked stdin for lines)
//! - [`ScriptedTerminal`]: in-memory queues with a plain-text transcript,
//!   used by tests and non-interactive runs

use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode};
use thiserror::Error;
use tracing::trace;

use crate::style::Style;
use crate::types::Key;

/// Failure at the terminal boundary.
#[derive(Debug, Error)]
pub enum TermError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    /// Input stream reached end of file (or a script ran dry).
    #[error("input closed")]
    InputClosed,

    /// Ctrl+C captured while in raw mode.
    #[error("interrupted")]
    Interrupted,
}

/// Styled output plus single-key and line input.
pub trait Terminal {
    /// Write `text` in `style`, optionally followed by a newline.
    fn write_styled(&mut self, text: &str, style: &Style, newline: bool) -> Result<(), TermError>;

    /// Block for exactly one keystroke. No echo, no Enter required.
    fn read_char(&mut self) -> Result<char, TermError>;

    /// Block for one line of input, without its line terminator.
    fn read_line(&mut self) -> Result<String, TermError>;

    /// Write `text` to the diagnostic stream, followed by a newline.
    fn write_stderr(&mut self, text: &str, style: &Style) -> Result<(), TermError> {
        self.write_styled(text, style, true)
    }

    /// Clear the screen and home the cursor.
    fn clear(&mut self) -> Result<(), TermError> {
        Ok(())
    }

    /// Ring the terminal bell.
    fn bell(&mut self) -> Result<(), TermError> {
        self.write_styled("\x07", &Style::plain(), false)
    }
}

// ============================================================================
// CONSOLE
// ============================================================================

/// The process terminal.
///
/// Styling is dropped when a stream is not a TTY so piped output stays clean.
#[derive(Debug)]
pub struct ConsoleTerminal {
    styled: bool,
    styled_stderr: bool,
}

impl ConsoleTerminal {
    pub fn new() -> Self {
        Self {
            styled: io::stdout().is_terminal(),
            styled_stderr: io::stderr().is_terminal(),
        }
    }
}

impl Default for ConsoleTerminal {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw mode for the lifetime of the guard.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Best-effort: nothing sensible to do if the terminal refuses.
        let _ = disable_raw_mode();
    }
}

/// Translate a key press into the character a line-discipline terminal
/// would have produced. Keys with no character form return `None`.
fn key_to_char(code: KeyCode, modifiers: KeyModifiers) -> Result<Option<char>, TermError> {
    let c = match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            return Err(TermError::Interrupted);
        }
        KeyCode::Char(c) => c,
        KeyCode::Enter => Key::Enter.as_char(),
        KeyCode::Tab => Key::Tab.as_char(),
        KeyCode::Backspace => Key::Backspace.as_char(),
        KeyCode::Esc => Key::Esc.as_char(),
        _ => return Ok(None),
    };
    Ok(Some(c))
}

impl Terminal for ConsoleTerminal {
    fn write_styled(&mut self, text: &str, style: &Style, newline: bool) -> Result<(), TermError> {
        let mut out = io::stdout().lock();
        if self.styled {
            write!(out, "{}", style.apply(text))?;
        } else {
            out.write_all(text.as_bytes())?;
        }
        if newline {
            out.write_all(b"\n")?;
        }
        out.flush()?;
        Ok(())
    }

    fn write_stderr(&mut self, text: &str, style: &Style) -> Result<(), TermError> {
        let mut err = io::stderr().lock();
        if self.styled_stderr {
            writeln!(err, "{}", style.apply(text))?;
        } else {
            writeln!(err, "{}", text)?;
        }
        Ok(())
    }

    fn read_char(&mut self) -> Result<char, TermError> {
        let _raw = RawModeGuard::enable()?;
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(c) = key_to_char(key.code, key.modifiers)? {
                    trace!(?c, "keystroke");
                    return Ok(c);
                }
            }
        }
    }

    fn read_line(&mut self) -> Result<String, TermError> {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(TermError::InputClosed);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    fn clear(&mut self) -> Result<(), TermError> {
        execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
        Ok(())
    }
}

// ============================================================================
// SCRIPTED
// ============================================================================

/// A terminal fed from queues, recording everything written.
///
/// Styling is not recorded: the transcript holds plain text only.
#[derive(Debug, Default)]
pub struct ScriptedTerminal {
    keys: VecDeque<char>,
    lines: VecDeque<String>,
    transcript: String,
    stderr: String,
}

impl ScriptedTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue keystrokes returned by `read_char`, in order.
    pub fn with_keys(mut self, keys: impl IntoIterator<Item = char>) -> Self {
        self.keys.extend(keys);
        self
    }

    /// Queue lines returned by `read_line`, in order.
    pub fn with_lines<S: Into<String>>(mut self, lines: impl IntoIterator<Item = S>) -> Self {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }

    /// Everything written so far, unstyled.
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Everything written to the diagnostic stream, unstyled.
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// Keystrokes not yet consumed.
    pub fn pending_keys(&self) -> usize {
        self.keys.len()
    }

    /// Lines not yet consumed.
    pub fn pending_lines(&self) -> usize {
        self.lines.len()
    }
}

impl Terminal for ScriptedTerminal {
    fn write_styled(&mut self, text: &str, _style: &Style, newline: bool) -> Result<(), TermError> {
        self.transcript.push_str(text);
        if newline {
            self.transcript.push('\n');
        }
        Ok(())
    }

    fn write_stderr(&mut self, text: &str, _style: &Style) -> Result<(), TermError> {
        self.stderr.push_str(text);
        self.stderr.push('\n');
        Ok(())
    }

    fn read_char(&mut self) -> Result<char, TermError> {
        self.keys.pop_front().ok_or(TermError::InputClosed)
    }

    fn read_line(&mut self) -> Result<String, TermError> {
        self.lines.pop_front().ok_or(TermError::InputClosed)
    }
}

// ============================================================================
// TESTS
// ============================================================================
