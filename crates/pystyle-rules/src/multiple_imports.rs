//! Rule to require one module per `import` statement.
//!
//! `import os, sys` hides the second module from grep and makes import
//! reordering noisier; `from x import a, b` stays allowed.

use pystyle_core::lexer::TokenKind;
use pystyle_core::{Diagnostic, Rule, RuleContext, Severity, Suggestion};

/// Rule code for multiple-imports.
pub const CODE: &str = "PS109";

/// Rule name for multiple-imports.
pub const NAME: &str = "multiple-imports";

/// Flags `import a, b` on one logical line.
#[derive(Debug, Clone)]
pub struct MultipleImports {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for MultipleImports {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipleImports {
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

impl Rule for MultipleImports {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires one module per import statement"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for line in ctx.logical_lines() {
            let sig = ctx.model.significant_indices(line);
            let Some(&first) = sig.first() else { continue };
            if !ctx.tokens()[first].is_keyword("import") {
                continue;
            }

            let mut depth = 0usize;
            for &i in &sig[1..] {
                let token = ctx.tokens()[i];
                if token.kind != TokenKind::Operator {
                    continue;
                }
                match token.text {
                    "(" | "[" | "{" => depth += 1,
                    ")" | "]" | "}" => depth = depth.saturating_sub(1),
                    "," if depth == 0 => {
                        diagnostics.push(
                            Diagnostic::new(
                                CODE,
                                NAME,
                                self.severity,
                                token.span,
                                "multiple modules imported on one line",
                            )
                            .with_suggestion(Suggestion::new(
                                "Split into one import statement per module",
                            )),
                        );
                        break;
                    }
                    _ => {}
                }
            }
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
        MultipleImports::new().check(&RuleContext::new(source, &model, &config))
    }

    #[test]
    fn detects_comma_separated_modules() {
        let diagnostics = check_source("import os, sys\n");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].span.start.column, 10);
    }

    #[test]
    fn one_diagnostic_per_statement() {
        let diagnostics = check_source("import os, sys, json\n");
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn single_imports_pass() {
        assert!(check_source("import os\nimport sys\n").is_empty());
    }

    #[test]
    fn from_imports_are_allowed() {
        assert!(check_source("from os.path import join, split\n").is_empty());
    }
}
