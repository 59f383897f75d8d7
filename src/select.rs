//! Numbered menu selection.
//!
//! A tiny state machine driven entirely by the terminal:
//! render once, then await an index until it is in range or `0`.
//! Invalid answers re-prompt without redrawing the list.

use std::fmt::{self, Display};
use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;

use tracing::debug;

use crate::prompt::{PromptValue, prompt_value};
use crate::term::{TermError, Terminal};
use crate::types::SelectConfig;

/// Index the user types to leave the menu without choosing.
pub const CANCEL: i64 = 0;

/// A typed menu index.
///
/// Any run of digits is an integer here, however long. Values too large
/// for `i64` are kept as typed so they can be reported as out of range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuInput {
    Index(i64),
    Overflow(String),
}

impl FromStr for MenuInput {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<i64>() {
            Ok(n) => Ok(MenuInput::Index(n)),
            Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
                Ok(MenuInput::Overflow(s.to_string()))
            }
            Err(e) => Err(e),
        }
    }
}

impl Display for MenuInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuInput::Index(n) => write!(f, "{n}"),
            MenuInput::Overflow(text) => f.write_str(text),
        }
    }
}

impl PromptValue for MenuInput {
    const KIND: &'static str = "integer";
}

/// Outcome of interpreting one typed index against a menu of `len` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Zero-based position of the chosen item.
    Selected(usize),
    /// The user typed [`CANCEL`].
    Cancelled,
    /// Not a position in the menu; ask again.
    OutOfRange,
}

/// Map a 1-based typed index onto the menu.
pub fn interpret(input: &MenuInput, len: usize) -> Choice {
    let MenuInput::Index(n) = *input else {
        return Choice::OutOfRange;
    };
    if n == CANCEL {
        return Choice::Cancelled;
    }
    match usize::try_from(n) {
        Ok(n) if n <= len => Choice::Selected(n - 1),
        _ => Choice::OutOfRange,
    }
}

/// Show `options` as a numbered list and return the chosen position.
///
/// Returns `None` without any I/O when `options` is empty, and `None`
/// when the user enters `0`. Otherwise blocks until a valid index arrives.
pub fn select<T: Display>(
    term: &mut impl Terminal,
    options: &[T],
    config: &SelectConfig,
) -> Result<Option<usize>, TermError> {
    if options.is_empty() {
        return Ok(None);
    }

    if !config.title.is_empty() {
        term.write_styled(&config.title, &config.output_style, true)?;
    }

    for (index, option) in options.iter().enumerate() {
        term.write_styled(&format!("{:>3}: ", index + 1), &config.prompt_style, false)?;
        term.write_styled(&option.to_string(), &config.output_style, true)?;
    }

    loop {
        let input: MenuInput = prompt_value(term, &config.prompt_style, &config.prompt, None)?;

        match interpret(&input, options.len()) {
            Choice::Selected(index) => return Ok(Some(index)),
            Choice::Cancelled => return Ok(None),
            Choice::OutOfRange => {
                debug!(%input, len = options.len(), "menu index out of range");
                term.write_styled(&format!("Error: {input} is out of range"), &config.output_style, true)?;
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::ScriptedTerminal;

    fn run(items: &[&str], lines: &[&str]) -> (Result<Option<usize>, TermError>, ScriptedTerminal) {
        let mut term = ScriptedTerminal::new().with_lines(lines.iter().copied());
        let result = select(&mut term, items, &SelectConfig::default());
        (result, term)
    }

    // --- Pure interpretation ---

    fn index(n: i64) -> MenuInput {
        MenuInput::Index(n)
    }

    #[test]
    fn zero_cancels() {
        assert_eq!(interpret(&index(0), 3), Choice::Cancelled);
        assert_eq!(interpret(&index(0), 1), Choice::Cancelled);
    }

    #[test]
    fn in_range_maps_to_zero_based() {
        for n in 1..=5 {
            assert_eq!(interpret(&index(n), 5), Choice::Selected(n as usize - 1));
        }
    }

    #[test]
    fn outside_range_is_rejected() {
        assert_eq!(interpret(&index(6), 5), Choice::OutOfRange);
        assert_eq!(interpret(&index(-1), 5), Choice::OutOfRange);
        assert_eq!(interpret(&index(i64::MIN), 5), Choice::OutOfRange);
        assert_eq!(interpret(&MenuInput::Overflow("1".repeat(30)), 5), Choice::OutOfRange);
    }

    #[test]
    fn oversized_integers_parse_as_overflow() {
        let big = "99999999999999999999";
        assert_eq!(big.parse::<MenuInput>().unwrap(), MenuInput::Overflow(big.to_string()));
        assert_eq!("-99999999999999999999".parse::<MenuInput>().unwrap().to_string(), "-99999999999999999999");
        assert_eq!("12".parse::<MenuInput>().unwrap(), index(12));
        assert!("1x".parse::<MenuInput>().is_err());
        assert!("".parse::<MenuInput>().is_err());
    }

    // --- Terminal-driven ---

    #[test]
    fn empty_menu_returns_none_without_io() {
        let (result, term) = run(&[], &["1"]);
        assert_eq!(result.unwrap(), None);
        assert_eq!(term.transcript(), "");
        assert_eq!(term.pending_lines(), 1);
    }

    #[test]
    fn renders_numbered_items_in_order() {
        let (result, term) = run(&["x", "y"], &["2"]);
        assert_eq!(result.unwrap(), Some(1));
        assert_eq!(term.transcript(), "  1: x\n  2: y\nSelect: ");
    }

    #[test]
    fn title_is_printed_above_items() {
        let mut term = ScriptedTerminal::new().with_lines(["1"]);
        let config = SelectConfig {
            title: "Pick one".to_string(),
            prompt: "Which".to_string(),
            ..Default::default()
        };
        let result = select(&mut term, &["a"], &config).unwrap();

        assert_eq!(result, Some(0));
        assert_eq!(term.transcript(), "Pick one\n  1: a\nWhich: ");
    }

    #[test]
    fn zero_returns_none_after_one_prompt() {
        let (result, term) = run(&["a", "b", "c"], &["0", "1"]);
        assert_eq!(result.unwrap(), None);
        assert_eq!(term.transcript().matches("Select: ").count(), 1);
        assert_eq!(term.pending_lines(), 1);
    }

    #[test]
    fn every_position_selects_its_item() {
        let items = ["first", "second", "third", "fourth"];
        for n in 1..=items.len() {
            let (result, _) = run(&items, &[n.to_string().as_str()]);
            assert_eq!(result.unwrap(), Some(n - 1));
        }
    }

    #[test]
    fn out_of_range_then_cancel() {
        let (result, term) = run(&["a", "b", "c"], &["5", "0"]);
        assert_eq!(result.unwrap(), None);

        let transcript = term.transcript();
        assert_eq!(transcript.matches("Error: 5 is out of range").count(), 1);
        assert_eq!(transcript.matches("Select: ").count(), 2);
        // List is drawn once only.
        assert_eq!(transcript.matches("  1: a").count(), 1);
    }

    #[test]
    fn oversized_integer_is_out_of_range() {
        let (result, term) = run(&["a", "b", "c"], &["99999999999999999999", "0"]);
        assert_eq!(result.unwrap(), None);

        let transcript = term.transcript();
        assert!(transcript.contains("Error: 99999999999999999999 is out of range\n"));
        assert!(!transcript.contains("is not a valid integer"));
        assert_eq!(transcript.matches("Select: ").count(), 2);
    }

    #[test]
    fn non_integer_input_is_retried_by_prompt() {
        let (result, term) = run(&["a", "b"], &["two", "-3", "2"]);
        assert_eq!(result.unwrap(), Some(1));

        let transcript = term.transcript();
        assert!(transcript.contains("Error: 'two' is not a valid integer."));
        assert!(transcript.contains("Error: -3 is out of range"));
    }

    #[test]
    fn repeated_bad_input_never_terminates_on_its_own() {
        let bad: Vec<String> = (4..40).map(|n| n.to_string()).collect();
        let (result, term) = run(&["a", "b", "c"], &bad.iter().map(String::as_str).collect::<Vec<_>>());

        assert!(matches!(result, Err(TermError::InputClosed)));
        assert_eq!(term.transcript().matches("is out of range").count(), bad.len());
    }

    #[test]
    fn items_use_display_form() {
        let mut term = ScriptedTerminal::new().with_lines(["3"]);
        let result = select(&mut term, &[10, 20, 30], &SelectConfig::default()).unwrap();
        assert_eq!(result, Some(2));
        assert!(term.transcript().contains("  3: 30\n"));
    }
}
