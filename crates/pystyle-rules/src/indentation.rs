//! Rule to enforce consistent indentation.
//!
//! # Rationale
//!
//! Indentation is structure here: a body indented by anything other than
//! `indent_width` columns per level reads as a different nesting than it is,
//! and tabs mixed with spaces render differently in every editor.
//!
//! # Configuration
//!
//! - `indent_width` (global): expected columns per indentation level
//! - `flag_tabs`: flag any tab in leading whitespace (default: true)

use pystyle_core::lexer::{expanded_width, TokenKind};
use pystyle_core::{Diagnostic, Position, Rule, RuleContext, Severity, Span};

/// Rule code for indentation.
pub const CODE: &str = "PS101";

/// Rule name for indentation.
pub const NAME: &str = "indentation";

/// Enforces indentation width and forbids tab/space mixing.
#[derive(Debug, Clone)]
pub struct Indentation {
    /// Flag any tab used in leading whitespace.
    pub flag_tabs: bool,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for Indentation {
    fn default() -> Self {
        Self::new()
    }
}

impl Indentation {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flag_tabs: true,
            severity: Severity::Warning,
        }
    }

    /// Sets whether tabs in leading whitespace are flagged.
    #[must_use]
    pub fn flag_tabs(mut self, flag: bool) -> Self {
        self.flag_tabs = flag;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for Indentation {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Enforces indentation width and forbids tab/space mixing"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
        let flag_tabs = ctx
            .config
            .rule_config(NAME)
            .map_or(self.flag_tabs, |c| c.get_bool("flag_tabs", self.flag_tabs));
        let unit = ctx.config.indent_width;

        let mut diagnostics = Vec::new();

        // Width check: every Indent token must land on unit × depth.
        let mut depth = 0usize;
        for token in ctx.tokens() {
            match token.kind {
                TokenKind::Indent => {
                    depth += 1;
                    let width = expanded_width(token.text);
                    let expected = unit * depth;
                    if width != expected {
                        diagnostics.push(Diagnostic::new(
                            CODE,
                            NAME,
                            self.severity,
                            token.span,
                            format!(
                                "indentation is {width} columns, expected {expected}"
                            ),
                        ));
                    }
                }
                TokenKind::Dedent => depth = depth.saturating_sub(1),
                _ => {}
            }
        }

        // Tab checks apply to every line's leading whitespace, including
        // continuation lines that carry no Indent token.
        for line in ctx.physical_lines() {
            if line.is_blank() || ctx.is_inside_multiline_string(line.number) {
                continue;
            }
            let ws_len = line.text.len() - line.text.trim_start_matches([' ', '\t']).len();
            if ws_len == 0 {
                continue;
            }
            let ws = &line.text[..ws_len];
            let has_tab = ws.contains('\t');
            let mixed = has_tab && ws.contains(' ');
            if !(mixed || (has_tab && flag_tabs)) {
                continue;
            }
            let span = Span::new(
                line.span.start,
                Position::new(
                    line.number,
                    ws.chars().count() + 1,
                    line.span.start.offset + ws_len,
                ),
            );
            let message = if mixed {
                "leading whitespace mixes tabs and spaces"
            } else {
                "indentation contains tabs"
            };
            diagnostics.push(Diagnostic::new(CODE, NAME, self.severity, span, message));
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
        Indentation::new().check(&RuleContext::new(source, &model, &config))
    }

    #[test]
    fn two_space_body_yields_one_diagnostic_at_body_start() {
        let diagnostics = check_source("def f():\n  return 1\n");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].span.start.line, 2);
        assert_eq!(diagnostics[0].span.start.column, 1);
        assert!(diagnostics[0].message.contains("2 columns, expected 4"));
    }

    #[test]
    fn four_space_indentation_passes() {
        let source = "def f():\n    if True:\n        return 1\n    return 0\n";
        assert!(check_source(source).is_empty());
    }

    #[test]
    fn nested_width_is_unit_times_depth() {
        // Second level lands at 6 columns instead of 8.
        let diagnostics = check_source("def f():\n    if True:\n      return 1\n");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("6 columns, expected 8"));
    }

    #[test]
    fn tabs_in_indentation_are_flagged() {
        let diagnostics = check_source("def f():\n\treturn 1\n");
        assert!(diagnostics
            .iter()
            .any(|d| d.message.contains("contains tabs")));
    }

    #[test]
    fn mixed_tabs_and_spaces_always_flagged() {
        let diagnostics = check_source("def f():\n\t    return 1\n");
        assert!(diagnostics
            .iter()
            .any(|d| d.message.contains("mixes tabs and spaces")));
    }

    #[test]
    fn continuation_alignment_is_not_width_checked() {
        let source = "value = compute(1,\n                2)\n";
        assert!(check_source(source).is_empty());
    }
}
