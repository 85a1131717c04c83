//! Rule to flag imports whose bound name is never used.
//!
//! # Rationale
//!
//! Dead imports hide real dependencies and slow module load. The check is
//! purely lexical: a binding counts as used when its name appears as an
//! identifier anywhere outside the import statement itself.
//!
//! Star imports and `__future__` imports are exempt, as are bindings whose
//! name starts with an underscore (conventional re-export shims).

use pystyle_core::lexer::TokenKind;
use pystyle_core::{Diagnostic, Rule, RuleContext, Severity, Suggestion};

/// Rule code for unused-import.
pub const CODE: &str = "PS107";

/// Rule name for unused-import.
pub const NAME: &str = "unused-import";

/// Flags imports never referenced elsewhere in the file.
#[derive(Debug, Clone)]
pub struct UnusedImport {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for UnusedImport {
    fn default() -> Self {
        Self::new()
    }
}

impl UnusedImport {
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

impl Rule for UnusedImport {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Flags imported names never used in the file"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for import in ctx.imports() {
            if import.binding == "*"
                || import.binding.starts_with('_')
                || import.module == "__future__"
            {
                continue;
            }

            let used = ctx.tokens().iter().any(|token| {
                token.kind == TokenKind::Identifier
                    && token.text == import.binding
                    && (token.span.start.offset < import.span.start.offset
                        || token.span.start.offset >= import.span.end.offset)
            });
            if used {
                continue;
            }

            diagnostics.push(
                Diagnostic::new(
                    CODE,
                    NAME,
                    self.severity,
                    import.span,
                    format!("imported name `{}` is never used", import.binding),
                )
                .with_suggestion(Suggestion::new("Remove the unused import")),
            );
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
        UnusedImport::new().check(&RuleContext::new(source, &model, &config))
    }

    #[test]
    fn detects_unused_import() {
        let diagnostics = check_source("import os\n\nprint(\"hi\")\n");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("`os`"));
    }

    #[test]
    fn used_import_passes() {
        let source = "import os\n\nprint(os.getcwd())\n";
        assert!(check_source(source).is_empty());
    }

    #[test]
    fn self_reference_within_statement_does_not_count_as_use() {
        // `os.path` inside the statement must not mark `os` as used.
        let diagnostics = check_source("import os.path\n");
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn aliased_import_tracks_the_alias() {
        let diagnostics = check_source("import numpy as np\n\nx = np.zeros(3)\n");
        assert!(diagnostics.is_empty());
        let diagnostics = check_source("import numpy as np\n\nx = numpy.zeros(3)\n");
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn from_import_checks_each_binding() {
        let source = "from os.path import join, split\n\np = join(\"a\", \"b\")\n";
        let diagnostics = check_source(source);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("`split`"));
    }

    #[test]
    fn star_and_future_imports_are_exempt() {
        let source = "from __future__ import annotations\nfrom os import *\n";
        assert!(check_source(source).is_empty());
    }

    #[test]
    fn underscore_bindings_are_exempt() {
        assert!(check_source("import gettext as _\n").is_empty());
    }
}
