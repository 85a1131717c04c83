//! Rule to flag trailing whitespace.
//!
//! Works entirely from the token stream: the lexer folds trailing inline
//! whitespace into each `Newline` token, so no raw-text re-scan is needed.

use pystyle_core::lexer::TokenKind;
use pystyle_core::{Diagnostic, Position, Rule, RuleContext, Severity, Span};

/// Rule code for trailing-whitespace.
pub const CODE: &str = "PS103";

/// Rule name for trailing-whitespace.
pub const NAME: &str = "trailing-whitespace";

/// Flags whitespace immediately before a line break.
#[derive(Debug, Clone)]
pub struct TrailingWhitespace {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for TrailingWhitespace {
    fn default() -> Self {
        Self::new()
    }
}

impl TrailingWhitespace {
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

impl Rule for TrailingWhitespace {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Flags whitespace at the end of a physical line"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for token in ctx.tokens() {
            if token.kind != TokenKind::Newline {
                continue;
            }
            let ws = token.text.trim_end_matches(['\n', '\r']);
            if ws.is_empty() {
                continue;
            }
            let start = token.span.start;
            let end = Position::new(
                start.line,
                start.column + ws.chars().count(),
                start.offset + ws.len(),
            );
            diagnostics.push(Diagnostic::new(
                CODE,
                NAME,
                self.severity,
                Span::new(start, end),
                "trailing whitespace",
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

    fn check_source(source: &str) -> Vec<Diagnostic> {
        let classifier = DefaultClassifier::new(&[], &[]);
        let model = StructuralModel::build(tokenize(source).collect(), &classifier);
        let config = LintConfig::default();
        TrailingWhitespace::new().check(&RuleContext::new(source, &model, &config))
    }

    #[test]
    fn detects_trailing_spaces() {
        let diagnostics = check_source("x = 1   \ny = 2\n");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].span.start.line, 1);
        assert_eq!(diagnostics[0].span.start.column, 6);
        assert_eq!(diagnostics[0].span.len(), 3);
    }

    #[test]
    fn detects_trailing_tab() {
        let diagnostics = check_source("x = 1\t\n");
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn detects_whitespace_after_comment() {
        let diagnostics = check_source("# note  \n");
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn detects_whitespace_only_final_line() {
        let diagnostics = check_source("x = 1\n   ");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].span.start.line, 2);
    }

    #[test]
    fn clean_lines_pass() {
        assert!(check_source("x = 1\ny = 2\n").is_empty());
    }
}
