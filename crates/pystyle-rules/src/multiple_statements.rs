//! Rule to forbid multiple statements on one physical line.
//!
//! Covers both semicolon-joined statements (`x = 1; y = 2`) and code
//! trailing a compound-statement header (`if x: do()`).

use pystyle_core::lexer::TokenKind;
use pystyle_core::{Diagnostic, Rule, RuleContext, Severity, Suggestion};

/// Rule code for multiple-statements.
pub const CODE: &str = "PS113";

/// Rule name for multiple-statements.
pub const NAME: &str = "multiple-statements";

const COMPOUND_KEYWORDS: &[&str] = &[
    "if", "elif", "else", "for", "while", "try", "except", "finally", "with", "def", "class",
];

/// Flags semicolons and inline compound-statement bodies.
#[derive(Debug, Clone)]
pub struct MultipleStatements {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for MultipleStatements {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipleStatements {
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

impl Rule for MultipleStatements {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids multiple statements on one physical line"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for line in ctx.logical_lines() {
            let sig = ctx.model.significant_indices(line);
            let Some(&first) = sig.first() else { continue };

            let mut header_kw = None;
            let head = ctx.tokens()[first];
            if head.kind == TokenKind::Keyword {
                let word = if head.text == "async" {
                    sig.get(1).map(|&i| ctx.tokens()[i].text)
                } else {
                    Some(head.text)
                };
                if let Some(word) = word.filter(|w| COMPOUND_KEYWORDS.contains(w)) {
                    header_kw = Some(word);
                }
            }

            let mut depth = 0usize;
            let mut past_header_colon = false;
            for &i in &sig {
                let token = ctx.tokens()[i];
                if past_header_colon {
                    if let Some(kw) = header_kw {
                        diagnostics.push(
                            Diagnostic::new(
                                CODE,
                                NAME,
                                self.severity,
                                token.span,
                                format!("statement on the same line as `{kw}` header"),
                            )
                            .with_suggestion(Suggestion::new("Move the body to its own line")),
                        );
                    }
                    past_header_colon = false;
                    if header_kw.is_some() {
                        // One report per header is enough.
                        header_kw = None;
                    }
                }
                if token.kind != TokenKind::Operator {
                    continue;
                }
                match token.text {
                    "(" | "[" | "{" => depth += 1,
                    ")" | "]" | "}" => depth = depth.saturating_sub(1),
                    ";" if depth == 0 => {
                        diagnostics.push(
                            Diagnostic::new(
                                CODE,
                                NAME,
                                self.severity,
                                token.span,
                                "multiple statements on one line (semicolon)",
                            )
                            .with_suggestion(Suggestion::new(
                                "Write one statement per line",
                            )),
                        );
                    }
                    ":" if depth == 0 && header_kw.is_some() => {
                        past_header_colon = true;
                    }
                    _ => {}
                }
            }
        }

        diagnostics
    }
}
