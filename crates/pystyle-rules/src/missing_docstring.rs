//! Rule to require docstrings on public definitions.
//!
//! # Rationale
//!
//! Public functions and classes are the file's interface; a first-statement
//! docstring is where tooling and readers look for their contract.
//!
//! # Configuration
//!
//! - `require_functions`: check function definitions (default: true)
//! - `require_classes`: check class definitions (default: true)
//! - `require_nested`: also check definitions nested inside functions
//!   (default: false)

use pystyle_core::{DefKind, Diagnostic, Rule, RuleContext, Severity, Suggestion};

/// Rule code for missing-docstring.
pub const CODE: &str = "PS112";

/// Rule name for missing-docstring.
pub const NAME: &str = "missing-docstring";

/// Requires a docstring on every public definition.
#[derive(Debug, Clone)]
pub struct MissingDocstring {
    /// Check function definitions.
    pub require_functions: bool,
    /// Check class definitions.
    pub require_classes: bool,
    /// Also check definitions nested inside functions.
    pub require_nested: bool,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for MissingDocstring {
    fn default() -> Self {
        Self::new()
    }
}

impl MissingDocstring {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            require_functions: true,
            require_classes: true,
            require_nested: false,
            severity: Severity::Warning,
        }
    }

    /// Sets whether functions are checked.
    #[must_use]
    pub fn require_functions(mut self, require: bool) -> Self {
        self.require_functions = require;
        self
    }

    /// Sets whether classes are checked.
    #[must_use]
    pub fn require_classes(mut self, require: bool) -> Self {
        self.require_classes = require;
        self
    }

    /// Sets whether nested definitions are checked.
    #[must_use]
    pub fn require_nested(mut self, require: bool) -> Self {
        self.require_nested = require;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for MissingDocstring {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires docstrings on public definitions"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
        let options = ctx.config.rule_config(NAME);
        let require_nested = options.map_or(self.require_nested, |c| {
            c.get_bool("require_nested", self.require_nested)
        });

        let mut diagnostics = Vec::new();
        let definitions = ctx.definitions();

        for def in definitions {
            if !def.is_public() || def.docstring.is_some() {
                continue;
            }
            let wanted = match def.kind {
                DefKind::Function => self.require_functions,
                DefKind::Class => self.require_classes,
            };
            if !wanted {
                continue;
            }
            if !require_nested && inside_function(definitions, def.parent) {
                continue;
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
                    def.name_span,
                    format!("missing docstring on public {what} `{}`", def.name),
                )
                .with_suggestion(Suggestion::new(
                    "Add a docstring as the first statement of the body",
                )),
            );
        }

        diagnostics
    }
}

/// Walks the parent chain looking for an enclosing function.
fn inside_function(
    definitions: &[pystyle_core::Definition],
    mut parent: Option<usize>,
) -> bool {
    while let Some(p) = parent {
        if definitions[p].kind == DefKind::Function {
            return true;
        }
        parent = definitions[p].parent;
    }
    false
}
