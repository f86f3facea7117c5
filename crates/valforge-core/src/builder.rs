//! Indentation-aware source assembly.

use std::fmt::{self, Write as _};

/// One indentation level in generated code.
pub const INDENT: &str = "    ";

/// Accumulates generated source text line by line.
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    buf: String,
    level: usize,
}

impl CodeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw text with no indentation and no newline.
    pub fn write(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    /// Append an indented line.
    pub fn line(&mut self, text: &str) {
        self.pad();
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    /// Append an indented line built from `format_args!`.
    pub fn line_fmt(&mut self, args: fmt::Arguments<'_>) {
        self.pad();
        // Writing into a String cannot fail.
        let _ = self.buf.write_fmt(args);
        self.buf.push('\n');
    }

    pub fn indent(&mut self) {
        self.level += 1;
    }

    /// Decrease indentation; stays at zero when already there.
    pub fn dedent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    /// Append an empty line (never indented).
    pub fn newline(&mut self) {
        self.buf.push('\n');
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }

    fn pad(&mut self) {
        for _ in 0..self.level {
            self.buf.push_str(INDENT);
        }
    }
}
