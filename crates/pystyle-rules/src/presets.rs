//! Rule presets for common configurations.

use crate::{
    BareExcept, BlankLines, FinalNewline, ImportOrder, Indentation, LineLength, MissingDocstring,
    MultipleImports, MultipleStatements, MutableDefault, NamingConvention, TrailingWhitespace,
    UnusedImport, WhitespaceStyle,
};
use pystyle_core::RuleBox;

/// Preset configurations for pystyle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// The full rule set with sensible defaults.
    Recommended,
    /// The full rule set with stricter options.
    Strict,
    /// Only the error-severity rules, for gradual adoption.
    Minimal,
}

impl Preset {
    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::Strict => strict_rules(),
            Self::Minimal => minimal_rules(),
        }
    }
}

/// Returns the recommended set of rules: every built-in rule with its
/// default options.
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    all_rules()
}

/// Returns the strict set of rules.
///
/// All rules, with stricter options:
/// - nested definitions also need docstrings
/// - `list()`/`dict()`/`set()` defaults are flagged too
/// - keyword-argument `=` loses its spacing exemption
#[must_use]
pub fn strict_rules() -> Vec<RuleBox> {
    vec![
        Box::new(Indentation::new()),
        Box::new(LineLength::new()),
        Box::new(TrailingWhitespace::new()),
        Box::new(WhitespaceStyle::new().allow_keyword_equals(false)),
        Box::new(BlankLines::new()),
        Box::new(NamingConvention::new()),
        Box::new(UnusedImport::new()),
        Box::new(ImportOrder::new()),
        Box::new(MultipleImports::new()),
        Box::new(BareExcept::new()),
        Box::new(MutableDefault::new().flag_constructor_calls(true)),
        Box::new(MissingDocstring::new().require_nested(true)),
        Box::new(MultipleStatements::new()),
        Box::new(FinalNewline::new()),
    ]
}

/// Returns the minimal set of rules.
///
/// For gradual adoption, only the error-severity checks:
/// - `bare-except` (PS110)
/// - `mutable-default` (PS111)
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    vec![Box::new(BareExcept::new()), Box::new(MutableDefault::new())]
}

/// Returns all available rules with default options.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(Indentation::new()),
        Box::new(LineLength::new()),
        Box::new(TrailingWhitespace::new()),
        Box::new(WhitespaceStyle::new()),
        Box::new(BlankLines::new()),
        Box::new(NamingConvention::new()),
        Box::new(UnusedImport::new()),
        Box::new(ImportOrder::new()),
        Box::new(MultipleImports::new()),
        Box::new(BareExcept::new()),
        Box::new(MutableDefault::new()),
        Box::new(MissingDocstring::new()),
        Box::new(MultipleStatements::new()),
        Box::new(FinalNewline::new()),
    ]
}
