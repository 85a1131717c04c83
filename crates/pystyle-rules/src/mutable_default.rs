//! Rule to forbid mutable default parameter values.
//!
//! # Rationale
//!
//! Default values are evaluated once, at definition time. A `[]` or `{}`
//! default is shared across every call, so mutations leak between callers.
//!
//! # Configuration
//!
//! - `flag_constructor_calls`: also flag `list()`, `dict()`, and `set()`
//!   defaults (default: false)
//!
//! # Suppression
//!
//! - `# pystyle: allow(mutable-default) reason="..."` comment

use pystyle_core::lexer::TokenKind;
use pystyle_core::{Diagnostic, Rule, RuleContext, Severity, Span, Suggestion};

/// Rule code for mutable-default.
pub const CODE: &str = "PS111";

/// Rule name for mutable-default.
pub const NAME: &str = "mutable-default";

const MUTABLE_CONSTRUCTORS: &[&str] = &["list", "dict", "set"];

/// Forbids `[]`/`{}` literal defaults on function parameters.
#[derive(Debug, Clone)]
pub struct MutableDefault {
    /// Also flag `list()`/`dict()`/`set()` call defaults.
    pub flag_constructor_calls: bool,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for MutableDefault {
    fn default() -> Self {
        Self::new()
    }
}

impl MutableDefault {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flag_constructor_calls: false,
            severity: Severity::Error,
        }
    }

    /// Sets whether constructor-call defaults are flagged too.
    #[must_use]
    pub fn flag_constructor_calls(mut self, flag: bool) -> Self {
        self.flag_constructor_calls = flag;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for MutableDefault {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids mutable literal defaults on function parameters"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
        let flag_calls = ctx
            .config
            .rule_config(NAME)
            .map_or(self.flag_constructor_calls, |c| {
                c.get_bool("flag_constructor_calls", self.flag_constructor_calls)
            });

        let mut diagnostics = Vec::new();
        let tokens = ctx.tokens();

        for def in ctx.definitions() {
            for param in &def.params {
                let Some(range) = param.default.clone() else {
                    continue;
                };
                let default_tokens = &tokens[range];
                let Some(first) = default_tokens.iter().find(|t| !t.kind.is_trivia()) else {
                    continue;
                };

                let is_literal = first.is_operator("[") || first.is_operator("{");
                let is_call = flag_calls
                    && first.kind == TokenKind::Identifier
                    && MUTABLE_CONSTRUCTORS.contains(&first.text)
                    && default_tokens
                        .iter()
                        .filter(|t| !t.kind.is_trivia())
                        .nth(1)
                        .is_some_and(|t| t.is_operator("("));
                if !is_literal && !is_call {
                    continue;
                }

                let last = default_tokens
                    .iter()
                    .rev()
                    .find(|t| !t.kind.is_trivia())
                    .unwrap_or(first);
                diagnostics.push(
                    Diagnostic::new(
                        CODE,
                        NAME,
                        self.severity,
                        Span::new(first.span.start, last.span.end),
                        format!("mutable default value for parameter `{}`", param.name),
                    )
                    .with_suggestion(Suggestion::new(
                        "Default to None and create the value inside the function",
                    )),
                );
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

    fn check_with(rule: MutableDefault, source: &str) -> Vec<Diagnostic> {
        let classifier = DefaultClassifier::new(&[], &[]);
        let model = StructuralModel::build(tokenize(source).collect(), &classifier);
        let config = LintConfig::default();
        rule.check(&RuleContext::new(source, &model, &config))
    }

    fn check_source(source: &str) -> Vec<Diagnostic> {
        check_with(MutableDefault::new(), source)
    }

    #[test]
    fn detects_list_literal_default() {
        let diagnostics = check_source("def f(items=[]):\n    pass\n");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert!(diagnostics[0].message.contains("items"));
        // The diagnostic spans the default-value tokens.
        let span = diagnostics[0].span;
        assert_eq!(&"def f(items=[]):"[span.start.offset..span.end.offset], "[]");
    }

    #[test]
    fn detects_dict_literal_default() {
        let diagnostics = check_source("def f(cache={}):\n    pass\n");
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn detects_populated_list_default() {
        let diagnostics = check_source("def f(xs=[1, 2]):\n    pass\n");
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn allows_immutable_defaults() {
        let diagnostics = check_source("def f(a=1, b=\"x\", c=None, d=()):\n    pass\n");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn constructor_calls_flagged_only_when_enabled() {
        let source = "def f(items=list()):\n    pass\n";
        assert!(check_source(source).is_empty());
        let diagnostics = check_with(MutableDefault::new().flag_constructor_calls(true), source);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn annotated_parameter_default_is_still_checked() {
        let diagnostics = check_source("def f(items: list = []):\n    pass\n");
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn one_diagnostic_per_offending_parameter() {
        let diagnostics = check_source("def f(a=[], b={}, c=1):\n    pass\n");
        assert_eq!(diagnostics.len(), 2);
    }
}
