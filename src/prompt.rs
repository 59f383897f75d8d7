//! Line prompts: typed values, yes/no, pause, and small terminal effects.
//!
//! Typed prompts own their retry loop. Callers only ever see a parsed
//! value (or a terminal error), never a parse failure.

use std::fmt::Display;
use std::str::FromStr;

use tracing::debug;

use crate::style::Style;
use crate::term::{TermError, Terminal};

/// Prompt text used by [`pause`] when none is given.
pub const PAUSE_TEXT: &str = "Press any key to continue...";

/// A value that can be read from a line prompt.
pub trait PromptValue: FromStr + Display {
    /// Word used in the retry message, e.g. "integer".
    const KIND: &'static str;
}

macro_rules! impl_prompt_value {
    ($($ty:ty => $kind:literal),* $(,)?) => {
        $(impl PromptValue for $ty {
            const KIND: &'static str = $kind;
        })*
    };
}

impl_prompt_value! {
    i64 => "integer",
    u64 => "integer",
    usize => "integer",
    f64 => "float",
    String => "text",
}

/// Prompt until the input parses as `T`.
///
/// Empty input returns `default` when one is given. A parse failure prints
/// `Error: '<input>' is not a valid <kind>.` and asks again.
pub fn prompt_value<T: PromptValue>(
    term: &mut impl Terminal,
    style: &Style,
    text: &str,
    default: Option<T>,
) -> Result<T, TermError> {
    let label = match &default {
        Some(value) => format!("{text} [{value}]: "),
        None => format!("{text}: "),
    };

    let mut default = default;

    loop {
        term.write_styled(&label, style, false)?;
        let line = term.read_line()?;
        let input = line.trim();

        if input.is_empty() {
            if let Some(value) = default.take() {
                return Ok(value);
            }
            continue;
        }

        match input.parse::<T>() {
            Ok(value) => return Ok(value),
            Err(_) => {
                debug!(input, kind = T::KIND, "rejected prompt input");
                term.write_styled(
                    &format!("Error: '{input}' is not a valid {}.", T::KIND),
                    &Style::plain(),
                    true,
                )?;
            }
        }
    }
}

/// Ask a yes/no question. Empty input picks `default`.
pub fn confirm(
    term: &mut impl Terminal,
    style: &Style,
    text: &str,
    default: bool,
) -> Result<bool, TermError> {
    let hint = if default { "[Y/n]" } else { "[y/N]" };
    let label = format!("{text} {hint}: ");

    loop {
        term.write_styled(&label, style, false)?;
        let line = term.read_line()?;
        match line.trim().to_lowercase().as_str() {
            "" => return Ok(default),
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            other => {
                debug!(input = other, "rejected confirmation input");
                term.write_styled("Error: invalid input", &Style::plain(), true)?;
            }
        }
    }
}

/// Show `text` and wait for any single key.
pub fn pause(term: &mut impl Terminal, style: &Style, text: &str) -> Result<(), TermError> {
    let text = if text.is_empty() { PAUSE_TEXT } else { text };
    term.write_styled(text, style, false)?;
    term.read_char()?;
    term.write_styled("", &Style::plain(), true)
}

/// Ring the bell.
pub fn bell(term: &mut impl Terminal) -> Result<(), TermError> {
    term.bell()
}

/// Erase the `n` characters left of the cursor.
pub fn rub_out(term: &mut impl Terminal, n: usize) -> Result<(), TermError> {
    let backspaces = "\x08".repeat(n);
    let erased = format!("{backspaces}{}{backspaces}", " ".repeat(n));
    term.write_styled(&erased, &Style::plain(), false)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::STYLE_PROMPT;
    use crate::term::ScriptedTerminal;

    #[test]
    fn integer_prompt_retries_until_valid() {
        let mut term = ScriptedTerminal::new().with_lines(["abc", "4.5", " 42 "]);
        let value: i64 = prompt_value(&mut term, &STYLE_PROMPT, "Number", None).unwrap();

        assert_eq!(value, 42);
        assert_eq!(term.transcript().matches("Number: ").count(), 3);
        assert!(term.transcript().contains("Error: 'abc' is not a valid integer."));
        assert!(term.transcript().contains("Error: '4.5' is not a valid integer."));
    }

    #[test]
    fn empty_input_uses_default() {
        let mut term = ScriptedTerminal::new().with_lines([""]);
        let value: f64 = prompt_value(&mut term, &STYLE_PROMPT, "Ratio", Some(2.5)).unwrap();

        assert_eq!(value, 2.5);
        assert_eq!(term.transcript(), "Ratio [2.5]: ");
    }

    #[test]
    fn empty_input_without_default_reprompts() {
        let mut term = ScriptedTerminal::new().with_lines(["", "7"]);
        let value: usize = prompt_value(&mut term, &STYLE_PROMPT, "Count", None).unwrap();

        assert_eq!(value, 7);
        assert_eq!(term.transcript(), "Count: Count: ");
    }

    #[test]
    fn closed_input_surfaces_as_error() {
        let mut term = ScriptedTerminal::new().with_lines(["x"]);
        let result: Result<i64, _> = prompt_value(&mut term, &STYLE_PROMPT, "Number", None);
        assert!(matches!(result, Err(TermError::InputClosed)));
    }

    #[test]
    fn confirm_accepts_yes_and_no_words() {
        let mut term = ScriptedTerminal::new().with_lines(["YES", "n", "maybe", "y"]);
        assert!(confirm(&mut term, &STYLE_PROMPT, "Stop?", false).unwrap());
        assert!(!confirm(&mut term, &STYLE_PROMPT, "Stop?", true).unwrap());
        assert!(confirm(&mut term, &STYLE_PROMPT, "Stop?", false).unwrap());
        assert!(term.transcript().contains("Error: invalid input"));
    }

    #[test]
    fn confirm_empty_uses_default_and_shows_hint() {
        let mut term = ScriptedTerminal::new().with_lines(["", ""]);
        assert!(!confirm(&mut term, &STYLE_PROMPT, "Stop?", false).unwrap());
        assert!(confirm(&mut term, &STYLE_PROMPT, "Stop?", true).unwrap());
        assert_eq!(term.transcript(), "Stop? [y/N]: Stop? [Y/n]: ");
    }

    #[test]
    fn pause_consumes_one_key() {
        let mut term = ScriptedTerminal::new().with_keys(['x', 'y']);
        pause(&mut term, &STYLE_PROMPT, "").unwrap();

        assert_eq!(term.pending_keys(), 1);
        assert_eq!(term.transcript(), format!("{PAUSE_TEXT}\n"));
    }

    #[test]
    fn rub_out_erases_n_cells() {
        let mut term = ScriptedTerminal::new();
        rub_out(&mut term, 2).unwrap();
        assert_eq!(term.transcript(), "\x08\x08  \x08\x08");
    }
}
