//! Styled text output.
//!
//! Reports are written against the small [`StyledOutput`] interface using
//! abstract [`Style`]s. [`StyledText`] buffers the text and binds each style
//! to an ANSI code only when color is enabled, so the same report renders
//! as plain text in tests and pipes.

use std::fmt;
use std::io::{self, IsTerminal};

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Detect TTY and use colors if available.
    #[default]
    Auto,
    /// Always use ANSI colors.
    Always,
    /// Never use ANSI colors.
    Never,
}

impl ColorChoice {
    /// Whether colors should be used when writing to stdout.
    pub fn use_color(&self) -> bool {
        match self {
            ColorChoice::Auto => io::stdout().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

impl std::str::FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            _ => Err(format!(
                "invalid color choice '{}'; expected 'auto', 'always', or 'never'",
                s
            )),
        }
    }
}

/// Abstract text styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Normal,
    Identifier,
    Header,
    FailureHeader,
    SuccessHeader,
    ProgressStatus,
}

impl Style {
    /// Get the ANSI color code for this style.
    fn color_code(&self) -> Option<&'static str> {
        match self {
            Style::Normal => None,
            // green
            Style::Identifier => Some("\x1b[32m"),
            // bold
            Style::Header => Some("\x1b[1m"),
            // bold red
            Style::FailureHeader => Some("\x1b[1;31m"),
            // bold green
            Style::SuccessHeader => Some("\x1b[1;32m"),
            // yellow
            Style::ProgressStatus => Some("\x1b[33m"),
        }
    }
}

/// Minimal styled text sink.
pub trait StyledOutput {
    /// Append unstyled text.
    fn append(&mut self, text: &str);

    /// Append text in a style.
    fn append_styled(&mut self, style: Style, text: &str);

    /// Append `text` left-aligned in a field of at least `width` characters.
    fn format_field(&mut self, style: Style, text: &str, width: usize) {
        self.append_styled(style, &format!("{:<width$}", text, width = width));
    }

    /// End the current line.
    fn newline(&mut self) {
        self.append("\n");
    }
}

/// An in-memory styled text buffer.
#[derive(Debug, Clone, Default)]
pub struct StyledText {
    buffer: String,
    use_color: bool,
}

impl StyledText {
    /// Create a buffer, with or without ANSI colors.
    pub fn new(use_color: bool) -> Self {
        StyledText {
            buffer: String::new(),
            use_color,
        }
    }

    /// Check if colors are enabled.
    pub fn use_color(&self) -> bool {
        self.use_color
    }

    /// The text written so far.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Consume the buffer.
    pub fn into_string(self) -> String {
        self.buffer
    }
}

impl StyledOutput for StyledText {
    fn append(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn append_styled(&mut self, style: Style, text: &str) {
        match style.color_code() {
            Some(code) if self.use_color && !text.is_empty() => {
                self.buffer.push_str(code);
                self.buffer.push_str(text);
                self.buffer.push_str("\x1b[0m");
            }
            _ => self.buffer.push_str(text),
        }
    }
}

impl fmt::Display for StyledText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buffer)
    }
}
