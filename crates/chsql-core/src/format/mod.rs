//! SQL rendering.
//!
//! Every node renders itself through a [`Formatter`], which owns the output
//! buffer and the layout state. The same rendering code serves both modes:
//! [`Formatter::line_break`] is a space in compact mode and a newline in
//! beautify mode, and indentation is only written in front of the first
//! character of a line, so no line carries trailing whitespace.

use crate::ast::Node;

/// Default indentation unit for beautify mode.
pub const DEFAULT_INDENT: &str = "  ";

/// Layout mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatMode {
    /// Single line, single spaces.
    #[default]
    Compact,
    /// Multi-line and indented.
    Beautify,
}

/// Formatter configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Layout mode.
    pub mode: FormatMode,
    /// Indentation unit used per level in beautify mode.
    pub indent: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            mode: FormatMode::Compact,
            indent: DEFAULT_INDENT.to_string(),
        }
    }
}

impl FormatOptions {
    /// Compact options.
    #[must_use]
    pub fn compact() -> Self {
        Self::default()
    }

    /// Beautify options with the default indentation unit.
    #[must_use]
    pub fn beautify() -> Self {
        Self {
            mode: FormatMode::Beautify,
            ..Self::default()
        }
    }

    /// Replaces the indentation unit. An empty unit keeps the default.
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        let indent = indent.into();
        if !indent.is_empty() {
            self.indent = indent;
        }
        self
    }
}

/// Stateful SQL writer threaded through every node's `format_sql`.
#[derive(Debug)]
pub struct Formatter {
    out: String,
    mode: FormatMode,
    indent_level: usize,
    line_start: bool,
    indent: String,
}

impl Formatter {
    /// Creates a formatter.
    #[must_use]
    pub fn new(options: FormatOptions) -> Self {
        let indent = if options.indent.is_empty() {
            DEFAULT_INDENT.to_string()
        } else {
            options.indent
        };
        Self {
            out: String::new(),
            mode: options.mode,
            indent_level: 0,
            line_start: true,
            indent,
        }
    }

    /// Returns true in beautify mode.
    #[must_use]
    pub fn is_beautify(&self) -> bool {
        self.mode == FormatMode::Beautify
    }

    /// Writes a single character, emitting pending indentation first.
    pub fn write_char(&mut self, c: char) {
        if self.mode == FormatMode::Compact {
            self.out.push(c);
            return;
        }
        if c == '\n' {
            self.out.push(c);
            self.line_start = true;
            return;
        }
        if self.line_start {
            for _ in 0..self.indent_level {
                self.out.push_str(&self.indent);
            }
            self.line_start = false;
        }
        self.out.push(c);
    }

    /// Writes a string.
    pub fn write_str(&mut self, s: &str) {
        if self.mode == FormatMode::Compact {
            self.out.push_str(s);
            return;
        }
        for c in s.chars() {
            self.write_char(c);
        }
    }

    /// Renders a node.
    pub fn write_node<N: Node + ?Sized>(&mut self, node: &N) {
        node.format_sql(self);
    }

    /// Renders nodes joined by `separator`.
    pub fn write_separated<N: Node>(&mut self, nodes: &[N], separator: &str) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.write_str(separator);
            }
            node.format_sql(self);
        }
    }

    /// Renders nodes separated by `,` and a [`line_break`](Self::line_break).
    pub fn write_broken<N: Node>(&mut self, nodes: &[N]) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.write_char(',');
                self.line_break();
            }
            node.format_sql(self);
        }
    }

    /// Starts a new line in beautify mode; does nothing in compact mode.
    pub fn new_line(&mut self) {
        if self.is_beautify() {
            self.write_char('\n');
        }
    }

    /// A newline in beautify mode, a single space in compact mode.
    pub fn line_break(&mut self) {
        if self.is_beautify() {
            self.write_char('\n');
        } else {
            self.write_char(' ');
        }
    }

    /// Increases the indentation level.
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decreases the indentation level, never below zero.
    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// Returns the rendered text.
    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }
}

/// Renders a node on a single line.
#[must_use]
pub fn format_compact<N: Node + ?Sized>(node: &N) -> String {
    let mut formatter = Formatter::new(FormatOptions::compact());
    node.format_sql(&mut formatter);
    formatter.finish()
}

/// Renders a node over multiple lines, indenting each level with `indent`.
#[must_use]
pub fn format_beautify<N: Node + ?Sized>(node: &N, indent: &str) -> String {
    let mut formatter = Formatter::new(FormatOptions::beautify().with_indent(indent));
    node.format_sql(&mut formatter);
    formatter.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beautify() -> Formatter {
        Formatter::new(FormatOptions::beautify())
    }

    #[test]
    fn test_compact_line_break_is_space() {
        let mut f = Formatter::new(FormatOptions::compact());
        f.write_str("SELECT");
        f.indent();
        f.line_break();
        f.write_str("a");
        f.new_line();
        assert_eq!(f.finish(), "SELECT a");
    }

    #[test]
    fn test_indentation_is_lazy() {
        let mut f = beautify();
        f.write_str("SELECT");
        f.indent();
        f.line_break();
        f.line_break();
        f.write_str("a");
        assert_eq!(f.finish(), "SELECT\n\n  a");
    }

    #[test]
    fn test_indent_applies_at_first_char() {
        let mut f = beautify();
        f.write_str("A");
        f.line_break();
        f.indent();
        f.indent();
        f.write_str("B");
        f.dedent();
        f.line_break();
        f.write_str("C");
        assert_eq!(f.finish(), "A\n    B\n  C");
    }

    #[test]
    fn test_dedent_is_clamped() {
        let mut f = beautify();
        f.dedent();
        f.dedent();
        f.indent();
        f.line_break();
        f.write_str("x");
        assert_eq!(f.finish(), "\n  x");
    }

    #[test]
    fn test_custom_indent_unit() {
        let mut f = Formatter::new(FormatOptions::beautify().with_indent("\t"));
        f.indent();
        f.write_str("x");
        assert_eq!(f.finish(), "\tx");
    }

    #[test]
    fn test_empty_indent_falls_back() {
        let options = FormatOptions::beautify().with_indent("");
        assert_eq!(options.indent, DEFAULT_INDENT);
    }
}
