//! Guided tour of the prompt toolkit.
//!
//! Everything runs against a [`Terminal`], so the tour can be replayed
//! from a script in tests.

use crate::keystroke::read_keystroke;
use crate::prompt::{bell, confirm, pause, prompt_value};
use crate::select::select;
use crate::style::{Color, STYLE_OUTPUT, STYLE_PROMPT, Style};
use crate::term::{TermError, Terminal};
use crate::types::SelectConfig;

/// Lines offered by the selection demo.
pub const HOLY_HAND_GRENADE: [&str; 7] = [
    "First shalt thou take out the Holy Pin.",
    "Then, shalt thou count to three. No more.  No less.\
     Three shalt be the number thou shalt count, and the number of the counting shall be three.",
    "Four shalt thou not count, nor either count thou two, excepting that thou then proceed to three.",
    "Five is right out.",
    "Once the number three, being the third number, be reached,",
    "then, lobbest thou thy Holy Hand Grenade of Antioch towards thy foe,",
    "who, being naughty in My sight, shall snuff it.",
];

/// One row per base color: normal, bright, and both reversed.
pub fn show_palette(term: &mut impl Terminal) -> Result<(), TermError> {
    for color in Color::BASE {
        let bright = color.bright();
        term.write_styled(&format!("{color:7} "), &Style::new().fg(color), false)?;
        term.write_styled(&format!("{color:7} "), &Style::new().fg(bright), false)?;
        term.write_styled("reverse", &Style::new().fg(color).reverse(), false)?;
        term.write_styled("reverse", &Style::new().fg(bright).reverse(), true)?;
    }
    term.write_styled("", &Style::plain(), true)?;

    term.write_styled("Bold", &Style::new().bold(), true)?;
    term.write_styled("Dim", &Style::new().dim(), true)?;
    term.write_styled("Blinking", &Style::new().blink(), true)?;
    term.write_styled("Underlined", &Style::new().underline(), true)?;
    term.write_stderr("Printed to stderr", &Style::plain())?;
    term.write_styled("Styled", &Style::new().fg(Color::Red).bg(Color::Yellow), true)
}

/// Pick a line from [`HOLY_HAND_GRENADE`] and echo it.
pub fn select_demo(term: &mut impl Terminal) -> Result<Option<usize>, TermError> {
    let index = select(term, &HOLY_HAND_GRENADE, &SelectConfig::default())?;
    if let Some(i) = index {
        term.write_styled(HOLY_HAND_GRENADE[i], &STYLE_OUTPUT, true)?;
    }
    Ok(index)
}

/// The full tour: styles, pause, bell, typed prompts, keystroke, confirm, menu.
pub fn run(term: &mut impl Terminal) -> Result<(), TermError> {
    term.clear()?;
    show_palette(term)?;

    pause(term, &STYLE_PROMPT, "Press any key to continue.")?;
    bell(term)?;
    term.clear()?;

    let value: i64 = prompt_value(term, &STYLE_PROMPT, "Please enter a valid integer", None)?;
    term.write_styled(&value.to_string(), &STYLE_OUTPUT, true)?;

    let pi: f64 = prompt_value(term, &STYLE_PROMPT, "Value for pi", Some(3.14))?;
    term.write_styled(&pi.to_string(), &STYLE_OUTPUT, true)?;

    let c = read_keystroke(term, &STYLE_PROMPT, "Tap a number from 1 to 7", "1234567", None)?;
    term.write_styled(&c.to_string(), &STYLE_OUTPUT, true)?;

    let stop = confirm(term, &STYLE_PROMPT, "Do you want to stop?", false)?;
    let answer = if stop { "I will stop!" } else { "I will not stop!" };
    term.write_styled(answer, &STYLE_OUTPUT, true)?;

    select_demo(term)?;
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
