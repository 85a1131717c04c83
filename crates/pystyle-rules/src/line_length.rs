//! Rule to limit physical line length.
//!
//! # Configuration
//!
//! Thresholds come from the global configuration: `max_line_length`
//! (default 79) for code and `max_comment_length` (default 72) for
//! comment-only lines. Lines inside multi-line string literals are exempt
//! unless `measure_inside_multiline_strings` is set.

use pystyle_core::{Diagnostic, Position, Rule, RuleContext, Severity, Span};

/// Rule code for line-length.
pub const CODE: &str = "PS102";

/// Rule name for line-length.
pub const NAME: &str = "line-length";

/// Flags physical lines longer than the configured maximum.
#[derive(Debug, Clone)]
pub struct LineLength {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for LineLength {
    fn default() -> Self {
        Self::new()
    }
}

impl LineLength {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for LineLength {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Flags physical lines longer than the configured maximum"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for line in ctx.physical_lines() {
            if !ctx.config.measure_inside_multiline_strings
                && ctx.is_inside_multiline_string(line.number)
            {
                continue;
            }

            let is_comment_line = line.text.trim_start().starts_with('#');
            let limit = if is_comment_line {
                ctx.config.max_comment_length
            } else {
                ctx.config.max_line_length
            };

            let length = line.text.chars().count();
            if length <= limit {
                continue;
            }

            // Span covers the overflowing tail.
            let cut = line
                .text
                .char_indices()
                .nth(limit)
                .map_or(line.text.len(), |(i, _)| i);
            let start = Position::new(line.number, limit + 1, line.span.start.offset + cut);
            let what = if is_comment_line { "comment" } else { "line" };
            diagnostics.push(Diagnostic::new(
                CODE,
                NAME,
                self.severity,
                Span::new(start, line.span.end),
                format!("{what} is {length} characters long ({limit} allowed)"),
            ));
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pystyle_core::lexer::tokenize;
    use pystyle_core::{DefaultClassifier, LintConfig, StructuralModel};

    fn check_with_config(source: &str, config: &LintConfig) -> Vec<Diagnostic> {
        let classifier = DefaultClassifier::new(&[], &[]);
        let model = StructuralModel::build(tokenize(source).collect(), &classifier);
        LineLength::new().check(&RuleContext::new(source, &model, config))
    }

    fn check_source(source: &str) -> Vec<Diagnostic> {
        check_with_config(source, &LintConfig::default())
    }

    #[test]
    fn detects_long_code_line() {
        let source = format!("x = \"{}\"\n", "a".repeat(90));
        let diagnostics = check_source(&source);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("96 characters"));
        assert_eq!(diagnostics[0].span.start.column, 80);
    }

    #[test]
    fn comment_lines_use_comment_limit() {
        let source = format!("# {}\n", "c".repeat(75));
        let diagnostics = check_source(&source);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("comment"));
        assert!(diagnostics[0].message.contains("72 allowed"));
    }

    #[test]
    fn lines_at_the_limit_pass() {
        let source = format!("x = \"{}\"\n", "a".repeat(73));
        assert_eq!(source.trim_end().chars().count(), 79);
        assert!(check_source(&source).is_empty());
    }

    #[test]
    fn multiline_string_interiors_exempt_by_default() {
        let source = format!("s = \"\"\"\n{}\n\"\"\"\n", "a".repeat(120));
        assert!(check_source(&source).is_empty());

        let mut config = LintConfig::default();
        config.measure_inside_multiline_strings = true;
        assert_eq!(check_with_config(&source, &config).len(), 1);
    }

    #[test]
    fn custom_limit_applies() {
        let mut config = LintConfig::default();
        config.max_line_length = 30;
        let source = format!("x = \"{}\"\n", "a".repeat(30));
        assert_eq!(check_with_config(&source, &config).len(), 1);
    }
}
