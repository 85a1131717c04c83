//! Core types for lint diagnostics and results.

use miette::SourceSpan;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for lint diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail lint.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl Severity {
    /// Parses a severity name as written in configuration files.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "info" => Some(Self::Info),
            "warning" => Some(Self::Warning),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A point in source text.
///
/// `line` and `column` are 1-indexed and character-based; `offset` is a
/// 0-indexed byte offset into the source.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, counted in characters).
    pub column: usize,
    /// Byte offset from the start of the source (0-indexed).
    pub offset: usize,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

/// A half-open region of source text; `end` is exclusive.
///
/// Invariant: `end >= start`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Span {
    /// First position covered by the span.
    pub start: Position,
    /// First position past the end of the span.
    pub end: Position,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Creates an empty span at a single position.
    #[must_use]
    pub fn point(at: Position) -> Self {
        Self {
            start: at,
            end: at,
        }
    }

    /// Length of the span in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    /// Returns true if the span covers no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A labeled secondary span for additional context in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Location of the label.
    pub span: Span,
    /// Message for this label.
    pub message: String,
}

impl Label {
    /// Creates a new label.
    #[must_use]
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }
}

/// A suggested remediation for a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Human-readable description of the fix.
    pub message: String,
}

impl Suggestion {
    /// Creates a new suggestion.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A single reported style violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Rule code (e.g., "PS110").
    pub code: String,
    /// Rule name (e.g., "bare-except").
    pub rule: String,
    /// Severity of this diagnostic.
    pub severity: Severity,
    /// Source region the diagnostic points at.
    pub span: Span,
    /// Human-readable message.
    pub message: String,
    /// Optional suggestion for fixing.
    pub suggestion: Option<Suggestion>,
    /// Additional labels for context (e.g., a conflicting earlier import).
    pub labels: Vec<Label>,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        span: Span,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            span,
            message: message.into(),
            suggestion: None,
            labels: Vec::new(),
        }
    }

    /// Adds a suggestion to this diagnostic.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    /// Adds a label to this diagnostic.
    #[must_use]
    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    /// Formats the diagnostic for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{} {} at {}:{}\n",
            self.code, self.rule, self.span.start.line, self.span.start.column,
        );
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        if let Some(suggestion) = &self.suggestion {
            let _ = writeln!(output, "  = help: {}", suggestion.message);
        }
        for label in &self.labels {
            let _ = writeln!(
                output,
                "  = note: {} (at {}:{})",
                label.message, label.span.start.line, label.span.start.column
            );
        }
        output
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {} [{}] {}",
            self.span.start.line, self.span.start.column, self.severity, self.code, self.message
        )
    }
}

/// Converts a [`Diagnostic`] to a miette diagnostic for rich error display.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
#[error("{message}")]
pub struct DiagnosticReport {
    message: String,
    #[help]
    help: Option<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl From<&Diagnostic> for DiagnosticReport {
    fn from(d: &Diagnostic) -> Self {
        Self {
            message: format!("[{}] {}", d.code, d.message),
            help: d.suggestion.as_ref().map(|s| s.message.clone()),
            span: SourceSpan::from((d.span.start.offset, d.span.len())),
            label_message: d.rule.clone(),
        }
    }
}

/// Diagnostics collected for one file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileReport {
    /// Path relative to the linted root.
    pub path: PathBuf,
    /// Ordered diagnostics for this file.
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    /// Creates a new report for a file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            path: path.into(),
            diagnostics,
        }
    }
}

/// Result of linting a set of files.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// Per-file reports, ordered by path.
    pub files: Vec<FileReport>,
    /// Number of files checked.
    pub files_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterates over all diagnostics with their file paths.
    pub fn diagnostics(&self) -> impl Iterator<Item = (&std::path::Path, &Diagnostic)> {
        self.files
            .iter()
            .flat_map(|f| f.diagnostics.iter().map(move |d| (f.path.as_path(), d)))
    }

    /// Total number of diagnostics across all files.
    #[must_use]
    pub fn total(&self) -> usize {
        self.files.iter().map(|f| f.diagnostics.len()).sum()
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics().any(|(_, d)| d.severity == Severity::Error)
    }

    /// Checks if any diagnostics meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.diagnostics().any(|(_, d)| d.severity >= severity)
    }

    /// Counts diagnostics by severity.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let mut errors = 0;
        let mut warnings = 0;
        let mut infos = 0;
        for (_, d) in self.diagnostics() {
            match d.severity {
                Severity::Error => errors += 1,
                Severity::Warning => warnings += 1,
                Severity::Info => infos += 1,
            }
        }
        (errors, warnings, infos)
    }

    /// Adds reports from another result.
    pub fn extend(&mut self, other: Self) {
        self.files.extend(other.files);
        self.files_checked += other.files_checked;
    }

    /// Formats violations as a test failure report.
    ///
    /// Produces a human-readable multi-line report suitable for `panic!()`
    /// messages in `cargo test` integration.
    #[must_use]
    pub fn format_test_report(&self, fail_on: Severity) -> String {
        use std::fmt::Write;

        let failing: Vec<(&std::path::Path, &Diagnostic)> = self
            .diagnostics()
            .filter(|(_, d)| d.severity >= fail_on)
            .collect();

        let mut report = String::new();
        let _ = writeln!(report, "\n=== pystyle: {} violation(s) ===\n", failing.len());

        for (path, d) in &failing {
            let _ = writeln!(
                report,
                "{} [{}] at {}:{}:{}",
                d.rule,
                d.code,
                path.display(),
                d.span.start.line,
                d.span.start.column,
            );
            let _ = writeln!(report, "  {}: {}", d.severity, d.message);
            if let Some(suggestion) = &d.suggestion {
                let _ = writeln!(report, "  = help: {}", suggestion.message);
            }
            let _ = writeln!(report);
        }

        let (errors, warnings, infos) = self.count_by_severity();
        let _ = writeln!(
            report,
            "Total: {} error(s), {} warning(s), {} info(s) in {} file(s)",
            errors, warnings, infos, self.files_checked
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span_at(line: usize, column: usize, offset: usize, len: usize) -> Span {
        Span::new(
            Position::new(line, column, offset),
            Position::new(line, column + len, offset + len),
        )
    }

    fn make_diagnostic(severity: Severity) -> Diagnostic {
        Diagnostic::new(
            "PS110",
            "bare-except",
            severity,
            span_at(42, 1, 600, 6),
            "bare `except:` clause",
        )
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }

    #[test]
    fn span_length_and_emptiness() {
        let s = span_at(1, 1, 0, 4);
        assert_eq!(s.len(), 4);
        assert!(!s.is_empty());
        assert!(Span::point(Position::new(1, 1, 0)).is_empty());
    }

    #[test]
    fn diagnostic_format_includes_position_and_help() {
        let d = make_diagnostic(Severity::Error)
            .with_suggestion(Suggestion::new("name the exception type"));
        let formatted = d.format();
        assert!(formatted.contains("PS110 bare-except at 42:1"));
        assert!(formatted.contains("= help: name the exception type"));
    }

    #[test]
    fn diagnostic_display_is_compact() {
        let d = make_diagnostic(Severity::Error);
        assert_eq!(format!("{d}"), "42:1: error [PS110] bare `except:` clause");
    }

    #[test]
    fn diagnostic_label_appears_in_format() {
        let d = make_diagnostic(Severity::Warning)
            .with_label(Label::new(span_at(3, 1, 20, 9), "earlier import here"));
        assert!(d.format().contains("= note: earlier import here (at 3:1)"));
    }

    #[test]
    fn result_counts_by_severity() {
        let mut result = LintResult::new();
        result.files.push(FileReport::new(
            "a.py",
            vec![
                make_diagnostic(Severity::Error),
                make_diagnostic(Severity::Warning),
            ],
        ));
        result.files_checked = 1;

        assert_eq!(result.count_by_severity(), (1, 1, 0));
        assert!(result.has_errors());
        assert!(result.has_violations_at(Severity::Warning));
        assert_eq!(result.total(), 2);
    }

    #[test]
    fn format_test_report_filters_by_severity() {
        let mut result = LintResult::new();
        result.files_checked = 5;
        result.files.push(FileReport::new(
            "pkg/mod.py",
            vec![
                make_diagnostic(Severity::Warning),
                make_diagnostic(Severity::Error),
            ],
        ));

        let report = result.format_test_report(Severity::Error);
        assert!(report.contains("1 violation(s)"));
        assert!(report.contains("1 error(s)"));
        assert!(report.contains("1 warning(s)"));
        assert!(report.contains("pkg/mod.py"));
    }
}
