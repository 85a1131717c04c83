//! Context types for rule execution.

use crate::config::LintConfig;
use crate::lexer::Token;
use crate::model::{Definition, ImportStatement, LogicalLine, StructuralModel};
use crate::types::{Position, Span};

/// Read-only view handed to every rule.
///
/// Bundles the raw source, the token stream, and the structural model. Rules
/// receive a shared reference and must not retain state across invocations;
/// no rule-to-rule channel exists.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    /// The raw source text.
    pub source: &'a str,
    /// The structural model built for this source.
    pub model: &'a StructuralModel<'a>,
    /// Resolved configuration.
    pub config: &'a LintConfig,
}

impl<'a> RuleContext<'a> {
    /// Creates a new context.
    #[must_use]
    pub fn new(source: &'a str, model: &'a StructuralModel<'a>, config: &'a LintConfig) -> Self {
        Self {
            source,
            model,
            config,
        }
    }

    /// All tokens of the file.
    #[must_use]
    pub fn tokens(&self) -> &'a [Token<'a>] {
        &self.model.tokens
    }

    /// All logical lines.
    #[must_use]
    pub fn logical_lines(&self) -> &'a [LogicalLine] {
        &self.model.logical_lines
    }

    /// All definitions.
    #[must_use]
    pub fn definitions(&self) -> &'a [Definition] {
        &self.model.definitions
    }

    /// All import clauses.
    #[must_use]
    pub fn imports(&self) -> &'a [ImportStatement] {
        &self.model.imports
    }

    /// True when the physical line lies inside a multi-line string literal
    /// (the literal's opening line excluded).
    #[must_use]
    pub fn is_inside_multiline_string(&self, line: usize) -> bool {
        self.model.string_interior_lines.contains(&line)
    }

    /// Iterates the physical lines of the source with their positions.
    ///
    /// Line text excludes the terminator (and a preceding `\r`).
    pub fn physical_lines(&self) -> impl Iterator<Item = PhysicalLine<'a>> + 'a {
        let source = self.source;
        let mut offset = 0usize;
        let mut number = 0usize;
        std::iter::from_fn(move || {
            if offset >= source.len() {
                return None;
            }
            number += 1;
            let rest = &source[offset..];
            let (raw, advance) = match rest.find('\n') {
                Some(i) => (&rest[..i], i + 1),
                None => (rest, rest.len()),
            };
            let text = raw.strip_suffix('\r').unwrap_or(raw);
            let start = Position::new(number, 1, offset);
            let end = Position::new(number, text.chars().count() + 1, offset + text.len());
            offset += advance;
            Some(PhysicalLine {
                number,
                text,
                span: Span::new(start, end),
            })
        })
    }
}

/// One physical line of source.
#[derive(Debug, Clone, Copy)]
pub struct PhysicalLine<'a> {
    /// Line number (1-indexed).
    pub number: usize,
    /// Line content without the terminator.
    pub text: &'a str,
    /// Covered region, terminator excluded.
    pub span: Span,
}

impl PhysicalLine<'_> {
    /// True when the line contains only whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::model::DefaultClassifier;

    fn with_context<R>(source: &str, f: impl FnOnce(RuleContext<'_>) -> R) -> R {
        let classifier = DefaultClassifier::new(&[], &[]);
        let model = StructuralModel::build(tokenize(source).collect(), &classifier);
        let config = LintConfig::default();
        f(RuleContext::new(source, &model, &config))
    }

    #[test]
    fn physical_lines_have_positions() {
        with_context("a = 1\nbb = 22\n", |ctx| {
            let lines: Vec<_> = ctx.physical_lines().collect();
            assert_eq!(lines.len(), 2);
            assert_eq!(lines[0].text, "a = 1");
            assert_eq!(lines[1].number, 2);
            assert_eq!(lines[1].span.start.offset, 6);
            assert_eq!(lines[1].span.end.offset, 13);
        });
    }

    #[test]
    fn physical_lines_strip_carriage_returns() {
        with_context("a = 1\r\nb = 2\r\n", |ctx| {
            let lines: Vec<_> = ctx.physical_lines().collect();
            assert_eq!(lines[0].text, "a = 1");
            assert_eq!(lines[1].text, "b = 2");
        });
    }

    #[test]
    fn blank_detection() {
        with_context("x = 1\n   \n", |ctx| {
            let lines: Vec<_> = ctx.physical_lines().collect();
            assert!(!lines[0].is_blank());
            assert!(lines[1].is_blank());
        });
    }

    #[test]
    fn empty_source_has_no_lines() {
        with_context("", |ctx| {
            assert_eq!(ctx.physical_lines().count(), 0);
        });
    }
}
