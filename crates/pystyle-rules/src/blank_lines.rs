//! Rule for blank-line separation of definitions.
//!
//! Top-level definitions are preceded by exactly `blank_lines_top_level`
//! blank lines (default 2); methods by exactly `blank_lines_method`
//! (default 1). The first statement in the file and the first member of a
//! class body are exempt. Comment lines directly above a definition attach
//! to it, so blanks are counted above the comment block.

use pystyle_core::{DefKind, Diagnostic, Rule, RuleContext, Severity, Span, Suggestion};

/// Rule code for blank-lines.
pub const CODE: &str = "PS105";

/// Rule name for blank-lines.
pub const NAME: &str = "blank-lines";

/// Enforces blank-line counts before definitions.
#[derive(Debug, Clone)]
pub struct BlankLines {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for BlankLines {
    fn default() -> Self {
        Self::new()
    }
}

impl BlankLines {
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

impl Rule for BlankLines {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Enforces blank-line separation before definitions"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
        // Physical-line classification, 1-indexed.
        let mut blank = vec![false];
        let mut comment_only = vec![false];
        for line in ctx.physical_lines() {
            blank.push(line.is_blank());
            comment_only.push(line.text.trim_start().starts_with('#'));
        }

        let definitions = ctx.definitions();
        let lines = ctx.logical_lines();
        let mut diagnostics = Vec::new();

        for def in definitions {
            let expected = match def.parent {
                None if def.indent_level == 0 => ctx.config.blank_lines_top_level,
                Some(p) if definitions[p].kind == DefKind::Class => ctx.config.blank_lines_method,
                _ => continue,
            };

            // Decorator lines belong to the definition.
            let mut anchor = def.header_line;
            while anchor > 0 && starts_with_decorator(ctx, anchor - 1) {
                anchor -= 1;
            }
            let first_physical = lines[anchor].first_line;

            let mut p = first_physical.saturating_sub(1);
            while p >= 1 && comment_only[p] {
                p -= 1;
            }
            let mut blanks = 0usize;
            while p >= 1 && blank[p] {
                blanks += 1;
                p -= 1;
            }
            if p == 0 {
                // First statement in the file.
                continue;
            }
            if blanks == expected {
                continue;
            }

            // The first member of a class body needs no separation from the
            // class header or its docstring.
            if let Some(parent) = def.parent {
                let parent_def = &definitions[parent];
                let after_header = anchor == parent_def.header_line + 1;
                let after_docstring = parent_def.docstring.is_some()
                    && anchor == parent_def.body_lines.start + 1;
                if blanks == 0 && (after_header || after_docstring) {
                    continue;
                }
            }

            let what = match def.kind {
                DefKind::Function => "function",
                DefKind::Class => "class",
            };
            diagnostics.push(
                Diagnostic::new(
                    CODE,
                    NAME,
                    self.severity,
                    Span::point(lines[anchor].span.start),
                    format!(
                        "expected {expected} blank line(s) before {what} `{}`, found {blanks}",
                        def.name
                    ),
                )
                .with_suggestion(Suggestion::new(
                    "Separate definitions with the configured number of blank lines",
                )),
            );
        }

        diagnostics
    }
}

/// True when the logical line at `index` is a decorator line.
fn starts_with_decorator(ctx: &RuleContext<'_>, index: usize) -> bool {
    let line = &ctx.logical_lines()[index];
    ctx.model
        .significant_indices(line)
        .first()
        .is_some_and(|&i| ctx.tokens()[i].is_operator("@"))
}
