//! Rule trait for defining style checks.

use crate::context::RuleContext;
use crate::types::{Diagnostic, Severity};

/// An independent diagnostic check over the structural model.
///
/// Implement this trait to create rules. A rule receives a read-only
/// [`RuleContext`] and returns the diagnostics it found; it must not mutate
/// shared state or depend on any other rule's output. Rules are registered
/// by value into a [`Linter`](crate::Linter) — there is no inheritance
/// hierarchy to extend.
///
/// # Example
///
/// ```ignore
/// use pystyle_core::{Diagnostic, Rule, RuleContext, Severity};
///
/// pub struct NoTabs;
///
/// impl Rule for NoTabs {
///     fn name(&self) -> &'static str { "no-tabs" }
///     fn code(&self) -> &'static str { "PS900" }
///
///     fn check(&self, ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
///         ctx.physical_lines()
///             .filter(|l| l.text.contains('\t'))
///             .map(|l| Diagnostic::new(self.code(), self.name(),
///                 Severity::Warning, l.span, "tab character"))
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "bare-except").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "PS110").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for diagnostics from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Whether a suppression comment for this rule requires a reason.
    ///
    /// By default, rules with `Severity::Error` require a reason.
    fn requires_allow_reason(&self) -> bool {
        self.default_severity() == Severity::Error
    }

    /// Checks one source file and returns any diagnostics found.
    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Diagnostic>;
}

/// Type alias for boxed [`Rule`] trait objects.
pub type RuleBox = Box<dyn Rule>;
