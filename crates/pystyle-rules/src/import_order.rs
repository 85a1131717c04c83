//! Rule to enforce import grouping order.
//!
//! Imports must appear in non-decreasing category rank: standard library,
//! then third-party, then local. A violation cites both the offending import
//! and the earlier import that outranks it.

use pystyle_core::{Diagnostic, ImportStatement, Label, Rule, RuleContext, Severity, Suggestion};

/// Rule code for import-order.
pub const CODE: &str = "PS108";

/// Rule name for import-order.
pub const NAME: &str = "import-order";

/// Enforces standard < third-party < local import ordering.
#[derive(Debug, Clone)]
pub struct ImportOrder {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for ImportOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportOrder {
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

impl Rule for ImportOrder {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Enforces standard/third-party/local import ordering"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let mut highest: Option<(&ImportStatement, u8)> = None;

        for import in ctx.imports() {
            if !import.top_level {
                continue;
            }
            let Some(rank) = import.category.rank() else {
                continue;
            };
            match highest {
                Some((earlier, earlier_rank)) if rank < earlier_rank => {
                    diagnostics.push(
                        Diagnostic::new(
                            CODE,
                            NAME,
                            self.severity,
                            import.span,
                            format!(
                                "{} import `{}` follows {} import `{}`",
                                import.category, import.module, earlier.category, earlier.module
                            ),
                        )
                        .with_label(Label::new(
                            earlier.span,
                            format!("{} import `{}` is here", earlier.category, earlier.module),
                        ))
                        .with_suggestion(Suggestion::new(
                            "Group imports: standard library, then third-party, then local",
                        )),
                    );
                }
                Some((_, earlier_rank)) if rank <= earlier_rank => {}
                _ => highest = Some((import, rank)),
            }
        }

        diagnostics
    }
}
