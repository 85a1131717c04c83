//! Rule for end-of-file hygiene.
//!
//! A file should end with exactly one newline: a missing terminator breaks
//! line-oriented tooling, extra blank lines are dead weight in diffs.

use pystyle_core::{Diagnostic, Rule, RuleContext, Severity, Span, Suggestion};

/// Rule code for final-newline.
pub const CODE: &str = "PS114";

/// Rule name for final-newline.
pub const NAME: &str = "final-newline";

/// Requires exactly one newline at end of file.
#[derive(Debug, Clone)]
pub struct FinalNewline {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for FinalNewline {
    fn default() -> Self {
        Self::new()
    }
}

impl FinalNewline {
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

impl Rule for FinalNewline {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires exactly one newline at end of file"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
        if ctx.source.is_empty() {
            return Vec::new();
        }

        let lines: Vec<_> = ctx.physical_lines().collect();
        let Some(last) = lines.last() else {
            return Vec::new();
        };

        if !ctx.source.ends_with('\n') {
            return vec![
                Diagnostic::new(
                    CODE,
                    NAME,
                    self.severity,
                    Span::point(last.span.end),
                    "no newline at end of file",
                )
                .with_suggestion(Suggestion::new("End the file with a single newline")),
            ];
        }

        let trailing_blanks = lines.iter().rev().take_while(|l| l.is_blank()).count();
        if trailing_blanks > 0 {
            let first_blank = &lines[lines.len() - trailing_blanks];
            return vec![Diagnostic::new(
                CODE,
                NAME,
                self.severity,
                Span::point(first_blank.span.start),
                "blank line at end of file",
            )];
        }

        Vec::new()
    }
}
