//! Text styling: an explicit record of optional ANSI attributes.
//!
//! A [`Style`] is pure data. Applying it to text yields a [`Painted`]
//! value whose `Display` impl emits the escape sequences through
//! crossterm's `Command::write_ansi`, so styled strings can be built
//! without touching the terminal.
//!
//! Preset semantics:
//! - Prompt: cyan on black, bold (questions and menu numbers)
//! - Error: red on black, bold
//! - Output / Option: white (answers, menu entries)

use std::fmt;

use crossterm::Command;
use crossterm::style::{
    Attribute, Color as AnsiColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};

// ============================================================================
// COLORS
// ============================================================================

/// The eight ANSI base colors and their bright variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Color {
    /// The base (non-bright) colors in ANSI order.
    pub const BASE: [Color; 8] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::White,
    ];

    /// Bright counterpart. Bright colors map to themselves.
    pub const fn bright(self) -> Color {
        match self {
            Color::Black => Color::BrightBlack,
            Color::Red => Color::BrightRed,
            Color::Green => Color::BrightGreen,
            Color::Yellow => Color::BrightYellow,
            Color::Blue => Color::BrightBlue,
            Color::Magenta => Color::BrightMagenta,
            Color::Cyan => Color::BrightCyan,
            Color::White => Color::BrightWhite,
            other => other,
        }
    }

    /// Lowercase name, e.g. `"bright_red"`.
    pub const fn name(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::Magenta => "magenta",
            Color::Cyan => "cyan",
            Color::White => "white",
            Color::BrightBlack => "bright_black",
            Color::BrightRed => "bright_red",
            Color::BrightGreen => "bright_green",
            Color::BrightYellow => "bright_yellow",
            Color::BrightBlue => "bright_blue",
            Color::BrightMagenta => "bright_magenta",
            Color::BrightCyan => "bright_cyan",
            Color::BrightWhite => "bright_white",
        }
    }

    fn to_ansi(self) -> AnsiColor {
        // crossterm names the base palette "Dark*" and the bright one plainly.
        match self {
            Color::Black => AnsiColor::Black,
            Color::Red => AnsiColor::DarkRed,
            Color::Green => AnsiColor::DarkGreen,
            Color::Yellow => AnsiColor::DarkYellow,
            Color::Blue => AnsiColor::DarkBlue,
            Color::Magenta => AnsiColor::DarkMagenta,
            Color::Cyan => AnsiColor::DarkCyan,
            Color::White => AnsiColor::Grey,
            Color::BrightBlack => AnsiColor::DarkGrey,
            Color::BrightRed => AnsiColor::Red,
            Color::BrightGreen => AnsiColor::Green,
            Color::BrightYellow => AnsiColor::Yellow,
            Color::BrightBlue => AnsiColor::Blue,
            Color::BrightMagenta => AnsiColor::Magenta,
            Color::BrightCyan => AnsiColor::Cyan,
            Color::BrightWhite => AnsiColor::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

// ============================================================================
// STYLE
// ============================================================================

/// Optional style attributes applied to a piece of text.
///
/// `reset` controls whether a full attribute reset follows the text.
/// Leaving it unset lets the attributes bleed into whatever is written next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub dim: bool,
    pub underline: bool,
    pub blink: bool,
    pub reverse: bool,
    pub reset: bool,
}

impl Style {
    /// No attributes, reset after text.
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            bold: false,
            dim: false,
            underline: false,
            blink: false,
            reverse: false,
            reset: true,
        }
    }

    /// Style that renders text unchanged.
    pub const fn plain() -> Self {
        Self {
            reset: false,
            ..Self::new()
        }
    }

    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub const fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub const fn blink(mut self) -> Self {
        self.blink = true;
        self
    }

    pub const fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    pub const fn no_reset(mut self) -> Self {
        self.reset = false;
        self
    }

    /// True when any color or attribute is set.
    pub fn has_attributes(&self) -> bool {
        self.fg.is_some()
            || self.bg.is_some()
            || self.bold
            || self.dim
            || self.underline
            || self.blink
            || self.reverse
    }

    /// Pair this style with `text` for display.
    pub fn apply<'a>(&self, text: &'a str) -> Painted<'a> {
        Painted { style: *self, text }
    }

    fn write_prefix(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(fg) = self.fg {
            SetForegroundColor(fg.to_ansi()).write_ansi(f)?;
        }
        if let Some(bg) = self.bg {
            SetBackgroundColor(bg.to_ansi()).write_ansi(f)?;
        }
        let attributes = [
            (self.bold, Attribute::Bold),
            (self.dim, Attribute::Dim),
            (self.underline, Attribute::Underlined),
            (self.blink, Attribute::SlowBlink),
            (self.reverse, Attribute::Reverse),
        ];
        for (enabled, attribute) in attributes {
            if enabled {
                SetAttribute(attribute).write_ansi(f)?;
            }
        }
        Ok(())
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::new()
    }
}

/// Text paired with a style. Formats as ANSI-decorated text.
#[derive(Debug, Clone, Copy)]
pub struct Painted<'a> {
    style: Style,
    text: &'a str,
}

impl fmt::Display for Painted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.style.has_attributes() {
            return f.write_str(self.text);
        }
        self.style.write_prefix(f)?;
        f.write_str(self.text)?;
        if self.style.reset {
            SetAttribute(Attribute::Reset).write_ansi(f)?;
        }
        Ok(())
    }
}

// ============================================================================
// PRESETS
// ============================================================================

/// Questions, menu numbers, keystroke prompts.
pub const STYLE_PROMPT: Style = Style::new().fg(Color::Cyan).bg(Color::Black).bold();

/// Fatal messages.
pub const STYLE_ERROR: Style = Style::new().fg(Color::Red).bg(Color::Black).bold();

/// Answers and informational output.
pub const STYLE_OUTPUT: Style = Style::new().fg(Color::White);

/// Menu entries.
pub const STYLE_OPTION: Style = Style::new().fg(Color::White);

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_have_expected_colors() {
        assert_eq!(STYLE_PROMPT.fg, Some(Color::Cyan));
        assert_eq!(STYLE_PROMPT.bg, Some(Color::Black));
        assert_eq!(STYLE_ERROR.fg, Some(Color::Red));
        assert_eq!(STYLE_OUTPUT.fg, Some(Color::White));
        assert_eq!(STYLE_OPTION.fg, Some(Color::White));
    }

    #[test]
    fn prompt_and_error_are_bold() {
        assert!(STYLE_PROMPT.bold);
        assert!(STYLE_ERROR.bold);
        assert!(!STYLE_OUTPUT.bold);
    }

    #[test]
    fn has_attributes_reports_any_color_or_attribute() {
        assert!(!Style::new().has_attributes());
        assert!(!Style::plain().has_attributes());
        assert!(Style::new().fg(Color::Blue).has_attributes());
        assert!(Style::new().bg(Color::Blue).has_attributes());
        assert!(Style::new().dim().has_attributes());
        assert!(STYLE_PROMPT.has_attributes());
    }

    #[test]
    fn plain_style_renders_text_unchanged() {
        assert_eq!(Style::plain().apply("hello").to_string(), "hello");
        assert_eq!(Style::new().apply("hello").to_string(), "hello");
    }

    #[test]
    fn styled_text_is_wrapped_in_escapes() {
        let out = Style::new().bold().apply("hi").to_string();
        assert!(out.starts_with('\x1b'));
        assert!(out.contains("hi"));
        assert!(out.ends_with("\x1b[0m"));
    }

    #[test]
    fn no_reset_leaves_attributes_open() {
        let out = Style::new().underline().no_reset().apply("hi").to_string();
        assert!(out.ends_with("hi"));
    }

    #[test]
    fn bright_is_idempotent() {
        for color in Color::BASE {
            assert_ne!(color.bright(), color);
            assert_eq!(color.bright().bright(), color.bright());
        }
    }

    #[test]
    fn color_names_pad_for_tables() {
        assert_eq!(format!("{:7}|", Color::Red), "red    |");
        assert_eq!(Color::Cyan.bright().name(), "bright_cyan");
    }
}
