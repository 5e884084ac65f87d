//! Indentation-aware source fragments for code generation.
//!
//! A [`Source`] is an immutable list of lines, each carrying a structural
//! indentation depth. Composers build fragments independently (a method
//! body, a parameter list) and splice them into their enclosing fragment with
//! [`Source::indent`]; indentation is only turned into spaces when the
//! fragment is rendered.
//!
//! ```
//! use tl2swift_codegen::source::Source;
//!
//! let body = Source::new().line("return 42");
//! let func = Source::new()
//!     .line("func answer() -> Int {")
//!     .append(body.indent())
//!     .line("}");
//!
//! assert_eq!(func.render(), "func answer() -> Int {\n    return 42\n}\n");
//! ```

use std::fmt;

/// Spaces emitted per indentation level
pub const INDENT_WIDTH: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Text { depth: usize, text: String },
    Blank,
}

/// An immutable, composable block of source lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Source {
    lines: Vec<Line>,
}

impl Source {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line at the fragment's base level.
    ///
    /// Text containing newlines is split into several lines.
    #[must_use]
    pub fn line(self, text: impl AsRef<str>) -> Self {
        self.push_text(0, text.as_ref())
    }

    /// Append a line one level deeper than the fragment's base level
    #[must_use]
    pub fn indented_line(self, text: impl AsRef<str>) -> Self {
        self.push_text(1, text.as_ref())
    }

    /// Append an empty line
    #[must_use]
    pub fn blank(mut self) -> Self {
        self.lines.push(Line::Blank);
        self
    }

    /// Indent every line of the fragment by one level
    #[must_use]
    pub fn indent(mut self) -> Self {
        for line in &mut self.lines {
            if let Line::Text { depth, .. } = line {
                *depth += 1;
            }
        }
        self
    }

    /// Concatenate another fragment after this one
    #[must_use]
    pub fn append(mut self, other: Source) -> Self {
        self.lines.extend(other.lines);
        self
    }

    /// Append every line of `lines` at the fragment's base level
    #[must_use]
    pub fn lines<I, S>(self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines.into_iter().fold(self, |source, l| source.line(l))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines, blank lines included
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Render to text. Every line ends with `\n`; blank lines carry no
    /// indentation.
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn push_text(mut self, depth: usize, text: &str) -> Self {
        for part in text.split('\n') {
            if part.trim().is_empty() {
                self.lines.push(Line::Blank);
            } else {
                self.lines.push(Line::Text {
                    depth,
                    text: part.trim_end().to_string(),
                });
            }
        }
        self
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            match line {
                Line::Text { depth, text } => {
                    writeln!(f, "{:width$}{}", "", text, width = depth * INDENT_WIDTH)?
                }
                Line::Blank => writeln!(f)?,
            }
        }
        Ok(())
    }
}

impl<S: AsRef<str>> FromIterator<S> for Source {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Source::new().lines(iter)
    }
}
