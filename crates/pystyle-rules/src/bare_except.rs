//! Rule to forbid bare `except:` clauses.
//!
//! # Rationale
//!
//! A bare `except:` swallows every exception, including `KeyboardInterrupt`
//! and `SystemExit`, hiding real failures. Handlers should name the
//! exception types they can actually deal with.
//!
//! # Suppression
//!
//! - `# pystyle: allow(bare-except) reason="..."` comment

use pystyle_core::{Diagnostic, Rule, RuleContext, Severity, Suggestion};

/// Rule code for bare-except.
pub const CODE: &str = "PS110";

/// Rule name for bare-except.
pub const NAME: &str = "bare-except";

/// Forbids exception clauses with no exception type.
#[derive(Debug, Clone)]
pub struct BareExcept {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for BareExcept {
    fn default() -> Self {
        Self::new()
    }
}

impl BareExcept {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for BareExcept {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids bare `except:` clauses with no exception type"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for line in ctx.logical_lines() {
            let sig = ctx.model.significant_indices(line);
            let [first, second, ..] = &sig[..] else {
                continue;
            };
            let keyword = ctx.tokens()[*first];
            if keyword.is_keyword("except") && ctx.tokens()[*second].is_operator(":") {
                diagnostics.push(
                    Diagnostic::new(
                        CODE,
                        NAME,
                        self.severity,
                        keyword.span,
                        "bare `except:` clause",
                    )
                    .with_suggestion(Suggestion::new(
                        "Catch a specific exception type, e.g. `except ValueError:`",
                    )),
                );
            }
        }

        diagnostics
    }
}
