//! Single-keystroke choice: "Tap a number from 1 to 7".

use tracing::debug;

use crate::style::Style;
use crate::term::{TermError, Terminal};
use crate::types::Key;

/// Prompt until the user presses one of `options`.
///
/// Each character of `options` is an accepted answer; matching ignores
/// case and the answer comes back lower-cased. When `default` is set,
/// Enter (either code) returns it. Anything else re-prompts silently.
pub fn read_keystroke(
    term: &mut impl Terminal,
    style: &Style,
    text: &str,
    options: &str,
    default: Option<char>,
) -> Result<char, TermError> {
    let label = format!("{text}: ");

    loop {
        term.write_styled(&label, style, false)?;
        let c = lowercase(term.read_char()?);
        term.write_styled("", style, true)?;

        if options.chars().any(|option| lowercase(option) == c) {
            return Ok(c);
        }
        if let Some(default) = default.filter(|_| Key::is_enter(c)) {
            return Ok(default);
        }
        debug!(?c, options, "ignored keystroke");
    }
}

fn lowercase(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::STYLE_PROMPT;
    use crate::term::ScriptedTerminal;

    fn read(term: &mut ScriptedTerminal, options: &str, default: Option<char>) -> Result<char, TermError> {
        read_keystroke(term, &STYLE_PROMPT, "Choose", options, default)
    }

    #[test]
    fn option_is_accepted_on_first_attempt() {
        for c in "1234567".chars() {
            let mut term = ScriptedTerminal::new().with_keys([c]);
            assert_eq!(read(&mut term, "1234567", None).unwrap(), c);
            assert_eq!(term.transcript(), "Choose: \n");
        }
    }

    #[test]
    fn uppercase_input_is_returned_lowercase() {
        let mut term = ScriptedTerminal::new().with_keys(['Y']);
        assert_eq!(read(&mut term, "yn", None).unwrap(), 'y');

        let mut term = ScriptedTerminal::new().with_keys(['n']);
        assert_eq!(read(&mut term, "YN", None).unwrap(), 'n');
    }

    #[test]
    fn enter_returns_default() {
        for enter in Key::ENTER {
            let mut term = ScriptedTerminal::new().with_keys([enter.as_char()]);
            assert_eq!(read(&mut term, "yn", Some('n')).unwrap(), 'n');
        }
    }

    #[test]
    fn enter_without_default_is_ignored() {
        let mut term = ScriptedTerminal::new().with_keys(['\r', 'y']);
        assert_eq!(read(&mut term, "yn", None).unwrap(), 'y');
        assert_eq!(term.transcript().matches("Choose: ").count(), 2);
    }

    #[test]
    fn escape_is_not_enter() {
        let mut term = ScriptedTerminal::new().with_keys([Key::Esc.as_char(), 'n']);
        assert_eq!(read(&mut term, "yn", Some('y')).unwrap(), 'n');
    }

    #[test]
    fn rejected_keys_keep_the_loop_running() {
        let rejected: Vec<char> = "abcdefghijklmnopqrstuvwxz0".chars().collect();
        let mut term = ScriptedTerminal::new().with_keys(rejected.iter().copied());

        let result = read(&mut term, "y", Some('y'));

        // Only running out of scripted input ends the loop.
        assert!(matches!(result, Err(TermError::InputClosed)));
        assert_eq!(term.pending_keys(), 0);
        assert_eq!(
            term.transcript().matches("Choose: ").count(),
            rejected.len() + 1
        );
    }

    #[test]
    fn rejected_then_valid_key_returns_valid() {
        let mut term = ScriptedTerminal::new().with_keys(['x', 'q', '3']);
        assert_eq!(read(&mut term, "123", None).unwrap(), '3');
        assert_eq!(term.transcript(), "Choose: \nChoose: \nChoose: \n");
    }
}
