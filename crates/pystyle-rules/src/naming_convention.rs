//! Rule for identifier naming conventions.
//!
//! # Detected Patterns
//!
//! - function names not in `lower_snake_case`
//! - class names not in `UpperCamelCase`
//! - exception classes (by base class) not ending in the configured suffix
//! - module-level constants (literal assignments) not in `UPPER_SNAKE_CASE`
//! - other module-level names matching neither convention
//!
//! # Configuration
//!
//! The grammars are data, not code: `function_pattern`, `class_pattern`,
//! and `constant_pattern` may be overridden per project. The exception
//! suffix comes from the global `exception_suffix` setting.

use once_cell::sync::Lazy;
use pystyle_core::lexer::TokenKind;
use pystyle_core::{DefKind, Diagnostic, Rule, RuleContext, Severity, Suggestion};
use regex::Regex;

/// Rule code for naming-convention.
pub const CODE: &str = "PS106";

/// Rule name for naming-convention.
pub const NAME: &str = "naming-convention";

static LOWER_SNAKE: Lazy<Regex> = Lazy::new(|| compiled(r"^[a-z_][a-z0-9_]*$"));
static UPPER_CAMEL: Lazy<Regex> = Lazy::new(|| compiled(r"^[A-Z][a-zA-Z0-9]*$"));
static UPPER_SNAKE: Lazy<Regex> = Lazy::new(|| compiled(r"^[A-Z_][A-Z0-9_]*$"));

#[allow(clippy::expect_used)]
fn compiled(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in pattern is valid")
}

/// Enforces identifier naming grammars.
#[derive(Debug, Clone)]
pub struct NamingConvention {
    /// Grammar for function and module-level variable names.
    pub function_pattern: Regex,
    /// Grammar for class names.
    pub class_pattern: Regex,
    /// Grammar for module-level constant names.
    pub constant_pattern: Regex,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self::new()
    }
}

impl NamingConvention {
    /// Creates a new rule with the default grammars.
    #[must_use]
    pub fn new() -> Self {
        Self {
            function_pattern: LOWER_SNAKE.clone(),
            class_pattern: UPPER_CAMEL.clone(),
            constant_pattern: UPPER_SNAKE.clone(),
            severity: Severity::Warning,
        }
    }

    /// Overrides the function-name grammar; an invalid pattern keeps the
    /// current one.
    #[must_use]
    pub fn function_pattern(mut self, pattern: &str) -> Self {
        match Regex::new(pattern) {
            Ok(re) => self.function_pattern = re,
            Err(e) => tracing::warn!("invalid function_pattern `{pattern}`: {e}"),
        }
        self
    }

    /// Overrides the class-name grammar; an invalid pattern keeps the
    /// current one.
    #[must_use]
    pub fn class_pattern(mut self, pattern: &str) -> Self {
        match Regex::new(pattern) {
            Ok(re) => self.class_pattern = re,
            Err(e) => tracing::warn!("invalid class_pattern `{pattern}`: {e}"),
        }
        self
    }

    /// Overrides the constant-name grammar; an invalid pattern keeps the
    /// current one.
    #[must_use]
    pub fn constant_pattern(mut self, pattern: &str) -> Self {
        match Regex::new(pattern) {
            Ok(re) => self.constant_pattern = re,
            Err(e) => tracing::warn!("invalid constant_pattern `{pattern}`: {e}"),
        }
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn effective_patterns(&self, ctx: &RuleContext<'_>) -> (Regex, Regex, Regex) {
        let mut function = self.function_pattern.clone();
        let mut class = self.class_pattern.clone();
        let mut constant = self.constant_pattern.clone();
        if let Some(options) = ctx.config.rule_config(NAME) {
            for (key, target) in [
                ("function_pattern", &mut function),
                ("class_pattern", &mut class),
                ("constant_pattern", &mut constant),
            ] {
                if let Some(pattern) = options.get_option::<String>(key) {
                    match Regex::new(&pattern) {
                        Ok(re) => *target = re,
                        Err(e) => tracing::warn!("invalid {key} `{pattern}`: {e}"),
                    }
                }
            }
        }
        (function, class, constant)
    }
}

impl Rule for NamingConvention {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Enforces naming grammars for functions, classes, and constants"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
        let (function_re, class_re, constant_re) = self.effective_patterns(ctx);
        let suffix = &ctx.config.exception_suffix;
        let mut diagnostics = Vec::new();

        for def in ctx.definitions() {
            match def.kind {
                DefKind::Function => {
                    if !function_re.is_match(&def.name) {
                        diagnostics.push(Diagnostic::new(
                            CODE,
                            NAME,
                            self.severity,
                            def.name_span,
                            format!(
                                "function name `{}` does not match `{}`",
                                def.name,
                                function_re.as_str()
                            ),
                        ));
                    }
                }
                DefKind::Class => {
                    if !class_re.is_match(&def.name) {
                        diagnostics.push(Diagnostic::new(
                            CODE,
                            NAME,
                            self.severity,
                            def.name_span,
                            format!(
                                "class name `{}` does not match `{}`",
                                def.name,
                                class_re.as_str()
                            ),
                        ));
                    } else if is_exception_class(&def.bases) && !def.name.ends_with(suffix.as_str())
                    {
                        diagnostics.push(
                            Diagnostic::new(
                                CODE,
                                NAME,
                                self.severity,
                                def.name_span,
                                format!(
                                    "exception class `{}` should end with `{suffix}`",
                                    def.name
                                ),
                            )
                            .with_suggestion(Suggestion::new(format!(
                                "Rename to `{}{suffix}`",
                                def.name
                            ))),
                        );
                    }
                }
            }
        }

        self.check_module_assignments(ctx, &function_re, &constant_re, &mut diagnostics);
        diagnostics
    }
}

impl NamingConvention {
    /// Checks simple module-level assignments: literal values must use the
    /// constant grammar; everything else must match one of the grammars.
    fn check_module_assignments(
        &self,
        ctx: &RuleContext<'_>,
        function_re: &Regex,
        constant_re: &Regex,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        for line in ctx.logical_lines() {
            if line.indent_level != 0 {
                continue;
            }
            let sig = ctx.model.significant_indices(line);
            let [name_i, eq_i, rest @ ..] = &sig[..] else {
                continue;
            };
            let name_token = ctx.tokens()[*name_i];
            if name_token.kind != TokenKind::Identifier
                || !ctx.tokens()[*eq_i].is_operator("=")
                || rest.is_empty()
            {
                continue;
            }
            if name_token.text.starts_with("__") && name_token.text.ends_with("__") {
                continue;
            }

            let is_literal = rest.len() == 1 && {
                let value = ctx.tokens()[rest[0]];
                matches!(
                    value.kind,
                    TokenKind::NumberLiteral | TokenKind::StringLiteral
                ) || matches!(value.text, "True" | "False" | "None")
            };

            let name = name_token.text;
            if is_literal {
                if !constant_re.is_match(name) {
                    diagnostics.push(Diagnostic::new(
                        CODE,
                        NAME,
                        self.severity,
                        name_token.span,
                        format!(
                            "constant name `{name}` does not match `{}`",
                            constant_re.as_str()
                        ),
                    ));
                }
            } else if !function_re.is_match(name) && !constant_re.is_match(name) {
                diagnostics.push(Diagnostic::new(
                    CODE,
                    NAME,
                    self.severity,
                    name_token.span,
                    format!(
                        "module-level name `{name}` does not match `{}`",
                        function_re.as_str()
                    ),
                ));
            }
        }
    }
}

/// An exception class by convention: a base name ending in the usual
/// exception markers.
fn is_exception_class(bases: &[String]) -> bool {
    bases.iter().any(|b| {
        let tail = b.rsplit('.').next().unwrap_or(b);
        tail.ends_with("Error") || tail.ends_with("Exception")
    })
}
