//! Rule for whitespace around operators and inside brackets.
//!
//! # Detected Patterns
//!
//! - a space directly after an opening bracket or before a closing one
//! - missing or multiple spaces around binary operators
//!
//! # Configuration
//!
//! - `allow_keyword_equals`: exempt the `=` of keyword arguments and
//!   parameter defaults from the spaces-around requirement (default: true)

use pystyle_core::lexer::{Token, TokenKind};
use pystyle_core::{Diagnostic, Rule, RuleContext, Severity, Span};

/// Rule code for whitespace-style.
pub const CODE: &str = "PS104";

/// Rule name for whitespace-style.
pub const NAME: &str = "whitespace-style";

const BINARY_OPS: &[&str] = &[
    "==", "!=", "<=", ">=", "<", ">", "+", "-", "*", "/", "//", "%", "**", "&", "|", "^", "<<",
    ">>", "->", ":=", "=", "+=", "-=", "*=", "/=", "//=", "%=", "**=", "&=", "|=", "^=", ">>=",
    "<<=",
];

/// Flags whitespace misuse around operators and brackets.
#[derive(Debug, Clone)]
pub struct WhitespaceStyle {
    /// Exempt keyword-argument `=` from the spacing requirement.
    pub allow_keyword_equals: bool,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for WhitespaceStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl WhitespaceStyle {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allow_keyword_equals: true,
            severity: Severity::Warning,
        }
    }

    /// Sets whether keyword-argument `=` is exempt.
    #[must_use]
    pub fn allow_keyword_equals(mut self, allow: bool) -> Self {
        self.allow_keyword_equals = allow;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for WhitespaceStyle {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Flags whitespace misuse around operators and brackets"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
        let allow_kwarg_eq = ctx
            .config
            .rule_config(NAME)
            .map_or(self.allow_keyword_equals, |c| {
                c.get_bool("allow_keyword_equals", self.allow_keyword_equals)
            });

        let mut diagnostics = Vec::new();
        self.check_bracket_padding(ctx, &mut diagnostics);
        self.check_operator_spacing(ctx, allow_kwarg_eq, &mut diagnostics);
        diagnostics
    }
}

impl WhitespaceStyle {
    fn check_bracket_padding(&self, ctx: &RuleContext<'_>, diagnostics: &mut Vec<Diagnostic>) {
        let tokens = ctx.tokens();
        for (i, token) in tokens.iter().enumerate() {
            if token.kind != TokenKind::Operator {
                continue;
            }
            match token.text {
                "(" | "[" | "{" => {
                    let Some(next) = tokens.get(i + 1) else { continue };
                    if matches!(next.kind, TokenKind::Newline | TokenKind::Comment) {
                        continue;
                    }
                    if next.span.start.offset > token.span.end.offset {
                        diagnostics.push(Diagnostic::new(
                            CODE,
                            NAME,
                            self.severity,
                            Span::new(token.span.end, next.span.start),
                            format!("whitespace after `{}`", token.text),
                        ));
                    }
                }
                ")" | "]" | "}" => {
                    let Some(prev) = i.checked_sub(1).map(|p| tokens[p]) else {
                        continue;
                    };
                    if prev.kind.is_trivia() {
                        continue;
                    }
                    if token.span.start.offset > prev.span.end.offset
                        && token.span.start.line == prev.span.end.line
                    {
                        diagnostics.push(Diagnostic::new(
                            CODE,
                            NAME,
                            self.severity,
                            Span::new(prev.span.end, token.span.start),
                            format!("whitespace before `{}`", token.text),
                        ));
                    }
                }
                _ => {}
            }
        }
    }

    fn check_operator_spacing(
        &self,
        ctx: &RuleContext<'_>,
        allow_kwarg_eq: bool,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let tokens = ctx.tokens();
        let sig: Vec<usize> = (0..tokens.len())
            .filter(|&i| !tokens[i].kind.is_trivia() && tokens[i].kind != TokenKind::Error)
            .collect();

        let mut depth = 0usize;
        for (j, &i) in sig.iter().enumerate() {
            let op = tokens[i];
            if op.kind == TokenKind::Operator {
                match op.text {
                    "(" | "[" | "{" => depth += 1,
                    ")" | "]" | "}" => depth = depth.saturating_sub(1),
                    _ => {}
                }
            }
            if op.kind != TokenKind::Operator || !BINARY_OPS.contains(&op.text) {
                continue;
            }
            if op.text == "=" && depth > 0 && allow_kwarg_eq {
                continue;
            }
            let (Some(&prev_i), Some(&next_i)) =
                (j.checked_sub(1).and_then(|p| sig.get(p)), sig.get(j + 1))
            else {
                continue;
            };
            let prev = tokens[prev_i];
            let next = tokens[next_i];
            // Only judge operators whose neighbors share their line; a
            // cross-line operand means continuation, not spacing style.
            if prev.span.end.line != op.span.start.line
                || next.span.start.line != op.span.end.line
            {
                continue;
            }
            if !is_operand_like(&prev) {
                continue;
            }

            let gap_before = op.span.start.offset - prev.span.end.offset;
            let gap_after = next.span.start.offset - op.span.end.offset;
            if gap_before == 0 || gap_after == 0 {
                diagnostics.push(Diagnostic::new(
                    CODE,
                    NAME,
                    self.severity,
                    op.span,
                    format!("missing whitespace around `{}`", op.text),
                ));
            } else if gap_before > 1 || gap_after > 1 {
                diagnostics.push(Diagnostic::new(
                    CODE,
                    NAME,
                    self.severity,
                    op.span,
                    format!("multiple spaces around `{}`", op.text),
                ));
            }
        }
    }
}

/// True when a token can end an operand, making a following operator binary.
fn is_operand_like(token: &Token<'_>) -> bool {
    match token.kind {
        TokenKind::Identifier | TokenKind::NumberLiteral | TokenKind::StringLiteral => true,
        TokenKind::Operator => matches!(token.text, ")" | "]" | "}"),
        TokenKind::Keyword => matches!(token.text, "True" | "False" | "None"),
        _ => false,
    }
}
