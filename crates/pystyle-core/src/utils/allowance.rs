//! Comment-based allowance directives.
//!
//! Supports directives like:
//! ```text
//! # pystyle: allow(bare-except) reason="third-party callback swallows anything"
//! ```
//!
//! A directive suppresses matching diagnostics on its own line and on the
//! line directly below it, so both trailing and preceding placements work.

use std::collections::HashSet;

/// State of allowance for a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowState {
    /// Rule is not allowed (default).
    Denied,
    /// Rule is explicitly allowed.
    Allowed,
}

impl AllowState {
    /// Returns true if allowed.
    #[must_use]
    pub fn is_allowed(self) -> bool {
        self == Self::Allowed
    }
}

/// Result of checking for an allow directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// Rule is not allowed.
    Denied,
    /// Rule is allowed with optional reason.
    Allowed {
        /// The reason provided (if any).
        reason: Option<String>,
    },
}

impl AllowCheck {
    /// Returns true if allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the reason if allowed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

/// Parsed allowance directive.
#[derive(Debug, Clone)]
struct AllowDirective {
    /// Rule names that are allowed.
    rules: HashSet<String>,
    /// Optional reason for the allowance.
    reason: Option<String>,
}

/// Checks source code for allowance comments.
///
/// # Arguments
///
/// * `content` - Source code content
/// * `line` - Line number to check (1-indexed)
/// * `rule_name` - Name of the rule to check for
#[must_use]
pub fn check_allow_comment(content: &str, line: usize, rule_name: &str) -> AllowState {
    match check_allow_with_reason(content, line, rule_name) {
        AllowCheck::Allowed { .. } => AllowState::Allowed,
        AllowCheck::Denied => AllowState::Denied,
    }
}

/// Checks source code for allowance comments, returning any reason given.
///
/// The directive may sit on the offending line itself (trailing comment) or
/// on the line directly above it.
#[must_use]
pub fn check_allow_with_reason(content: &str, line: usize, rule_name: &str) -> AllowCheck {
    let lines: Vec<&str> = content.lines().collect();

    for check_line in [line.saturating_sub(1), line] {
        if check_line == 0 || check_line > lines.len() {
            continue;
        }

        let line_content = lines[check_line - 1];
        if let Some(directive) = parse_allow_directive(line_content) {
            if directive.rules.contains(rule_name) || directive.rules.contains("all") {
                return AllowCheck::Allowed {
                    reason: directive.reason,
                };
            }
        }
    }

    AllowCheck::Denied
}

/// Parses an allowance directive from a line, trailing comments included.
fn parse_allow_directive(line: &str) -> Option<AllowDirective> {
    let hash = line.find('#')?;
    let comment_content = line[hash + 1..].trim();

    let directive = comment_content.strip_prefix("pystyle:")?.trim();
    let allow_content = directive.strip_prefix("allow(")?.trim();

    let paren_end = allow_content.find(')')?;
    let rules_str = &allow_content[..paren_end];

    let rules: HashSet<String> = rules_str
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if rules.is_empty() {
        return None;
    }

    let rest = allow_content[paren_end + 1..].trim();
    let reason = rest.strip_prefix("reason=").and_then(|reason_part| {
        let reason_part = reason_part.trim();
        if reason_part.starts_with('"') && reason_part.len() > 1 {
            let end = reason_part[1..].find('"').map(|i| i + 1)?;
            Some(reason_part[1..end].to_string())
        } else {
            None
        }
    });

    Some(AllowDirective { rules, reason })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_directive() {
        let directive = parse_allow_directive("# pystyle: allow(bare-except)").unwrap();
        assert!(directive.rules.contains("bare-except"));
        assert!(directive.reason.is_none());
    }

    #[test]
    fn parses_directive_with_reason() {
        let directive =
            parse_allow_directive("# pystyle: allow(mutable-default) reason=\"sentinel value\"")
                .unwrap();
        assert!(directive.rules.contains("mutable-default"));
        assert_eq!(directive.reason, Some("sentinel value".to_string()));
    }

    #[test]
    fn parses_trailing_directive() {
        let directive =
            parse_allow_directive("except:  # pystyle: allow(bare-except)").unwrap();
        assert!(directive.rules.contains("bare-except"));
    }

    #[test]
    fn parses_multiple_rules() {
        let directive = parse_allow_directive("# pystyle: allow(rule1, rule2, rule3)").unwrap();
        assert_eq!(directive.rules.len(), 3);
    }

    #[test]
    fn checks_line_and_line_above() {
        let content = "try:\n    pass\n# pystyle: allow(bare-except)\nexcept:\n    pass\n";
        assert_eq!(
            check_allow_comment(content, 4, "bare-except"),
            AllowState::Allowed
        );
        assert_eq!(
            check_allow_comment(content, 4, "other-rule"),
            AllowState::Denied
        );
        assert_eq!(
            check_allow_comment(content, 2, "bare-except"),
            AllowState::Denied
        );
    }

    #[test]
    fn reason_is_surfaced() {
        let content = "x = f(items=[])  # pystyle: allow(mutable-default) reason=\"copied below\"\n";
        let result = check_allow_with_reason(content, 1, "mutable-default");
        assert!(result.is_allowed());
        assert_eq!(result.reason(), Some("copied below"));
    }

    #[test]
    fn ordinary_comment_is_not_a_directive() {
        assert!(parse_allow_directive("# just a note about allow(x)").is_none());
        assert!(parse_allow_directive("x = 1").is_none());
    }
}
