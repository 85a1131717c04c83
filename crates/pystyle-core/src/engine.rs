//! Lint engine orchestrating the tokenize → model → rules → aggregate
//! pipeline.
//!
//! One file is one unit of work and its pipeline is strictly sequential.
//! Across files, units share nothing but the read-only [`Linter`], so the
//! project walk fans out over rayon.

use crate::config::{ConfigError, LintConfig};
use crate::context::RuleContext;
use crate::lexer::tokenize;
use crate::model::{
    DefaultClassifier, ImportClassifier, StructuralModel, UNRESOLVABLE_INDENTATION_CODE,
    UNRESOLVABLE_INDENTATION_NAME,
};
use crate::rule::{Rule, RuleBox};
use crate::types::{Diagnostic, FileReport, LintResult, Position, Severity, Span, Suggestion};
use crate::utils::allowance::check_allow_with_reason;

use rayon::prelude::*;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Diagnostic code reported when a rule panics.
pub const RULE_FAULT_CODE: &str = "PS000";
/// Diagnostic name reported when a rule panics.
pub const RULE_FAULT_NAME: &str = "rule-fault";

/// Errors that can occur while building or running a [`Linter`].
///
/// These block the run entirely; code problems are diagnostics, never
/// errors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Glob pattern error in an exclude pattern.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Error while walking the file tree.
    #[error("File walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Builder for configuring a [`Linter`].
#[derive(Default)]
pub struct LinterBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    config: Option<LintConfig>,
    classifier: Option<Box<dyn ImportClassifier>>,
}

impl LinterBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory for project linting.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the linter.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the linter.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds an exclude glob pattern for project linting.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: LintConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Substitutes a custom import classifier.
    #[must_use]
    pub fn classifier(mut self, classifier: Box<dyn ImportClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Builds the linter, validating the configuration against the
    /// registered rule set.
    ///
    /// # Errors
    ///
    /// Returns an error for zero thresholds, an invalid `fail_on`, or a
    /// rule override naming no registered rule.
    pub fn build(self) -> Result<Linter, EngineError> {
        let config = self.config.unwrap_or_default();

        let mut known: Vec<(&str, &str)> = self
            .rules
            .iter()
            .map(|r| (r.name(), r.code()))
            .collect();
        known.push((RULE_FAULT_NAME, RULE_FAULT_CODE));
        known.push((UNRESOLVABLE_INDENTATION_NAME, UNRESOLVABLE_INDENTATION_CODE));
        config.validate(&known)?;

        let root = self
            .root
            .unwrap_or_else(|| config.files.root.clone());

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.files.exclude.clone());

        let classifier = self.classifier.unwrap_or_else(|| {
            Box::new(DefaultClassifier::new(
                &config.standard_library_modules,
                &config.local_package_prefixes,
            ))
        });

        Ok(Linter {
            root,
            rules: self.rules,
            exclude_patterns,
            config,
            classifier,
        })
    }
}

/// The lint engine: a configured, read-only bundle of rules.
///
/// Use [`Linter::builder()`] to construct an instance.
pub struct Linter {
    root: PathBuf,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    config: LintConfig,
    classifier: Box<dyn ImportClassifier>,
}

impl Linter {
    /// Creates a new builder for configuring a linter.
    #[must_use]
    pub fn builder() -> LinterBuilder {
        LinterBuilder::new()
    }

    /// Returns the root directory used for project linting.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Lints one source text and returns the ordered diagnostic list.
    ///
    /// Output is stable for identical `(source, config)`: rule execution
    /// order never matters because results are fully aggregated.
    #[must_use]
    pub fn lint_source(&self, source: &str) -> Vec<Diagnostic> {
        let tokens = tokenize(source).collect();
        let model = StructuralModel::build(tokens, self.classifier.as_ref());
        let ctx = RuleContext::new(source, &model, &self.config);

        let mut diagnostics = Vec::new();
        diagnostics.extend(self.filter_suppressed(source, model.diagnostics.clone(), false));

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) || !self.config.is_rule_enabled(rule.code())
            {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            match catch_unwind(AssertUnwindSafe(|| rule.check(&ctx))) {
                Ok(found) => {
                    let found =
                        self.filter_suppressed(source, found, rule.requires_allow_reason());
                    diagnostics.extend(found);
                }
                Err(payload) => {
                    warn!("Rule {} faulted: {}", rule.name(), panic_message(&payload));
                    diagnostics.push(rule_fault(rule.as_ref(), &payload));
                }
            }
        }

        for d in &mut diagnostics {
            if let Some(severity) = self
                .config
                .rule_severity(&d.rule)
                .or_else(|| self.config.rule_severity(&d.code))
            {
                d.severity = severity;
            }
        }

        aggregate(diagnostics)
    }

    /// Lints one file on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn lint_path(&self, path: &Path) -> Result<FileReport, EngineError> {
        debug!("Linting: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let diagnostics = self.lint_source(&content);
        let relative = path
            .strip_prefix(&self.root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);
        Ok(FileReport::new(relative, diagnostics))
    }

    /// Lints every discovered file under the root, in parallel.
    ///
    /// Files are discovered in sorted order and reports preserve that
    /// order, so results are deterministic regardless of scheduling.
    ///
    /// # Errors
    ///
    /// Returns an error if discovery or file reading fails.
    pub fn lint_project(&self) -> Result<LintResult, EngineError> {
        info!("Starting lint at {:?}", self.root);
        let files = self.discover_files()?;
        info!("Found {} files to lint", files.len());

        let reports: Result<Vec<FileReport>, EngineError> = files
            .par_iter()
            .map(|path| self.lint_path(path))
            .collect();
        let mut result = LintResult::new();
        result.files_checked = files.len();
        result.files = reports?
            .into_iter()
            .filter(|r| !r.diagnostics.is_empty())
            .collect();

        info!(
            "Lint complete: {} diagnostics in {} files",
            result.total(),
            result.files_checked
        );
        Ok(result)
    }

    /// Drops diagnostics suppressed by `# pystyle: allow(...)` comments.
    ///
    /// When a rule requires a reason and the directive has none, the
    /// suppression itself is reported as a warning instead.
    fn filter_suppressed(
        &self,
        source: &str,
        diagnostics: Vec<Diagnostic>,
        requires_reason: bool,
    ) -> Vec<Diagnostic> {
        let mut kept = Vec::with_capacity(diagnostics.len());
        for d in diagnostics {
            let check = check_allow_with_reason(source, d.span.start.line, &d.rule);
            if !check.is_allowed() {
                kept.push(d);
                continue;
            }
            if requires_reason && check.reason().is_none() {
                let rule = d.rule.clone();
                kept.push(
                    Diagnostic::new(
                        d.code.clone(),
                        d.rule.clone(),
                        Severity::Warning,
                        d.span,
                        format!("Allow directive for '{rule}' is missing required reason"),
                    )
                    .with_suggestion(Suggestion::new(
                        "Add reason=\"...\" to explain why this exception is necessary",
                    )),
                );
            }
        }
        kept
    }

    /// Discovers `.py` files under the root, honoring gitignore and the
    /// configured exclude patterns. Sorted for determinism.
    fn discover_files(&self) -> Result<Vec<PathBuf>, EngineError> {
        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .git_ignore(self.config.files.respect_gitignore)
            .hidden(true);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            if !path.extension().is_some_and(|ext| ext == "py") {
                continue;
            }
            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }
            files.push(path.to_path_buf());
        }
        files.sort();
        Ok(files)
    }

    /// Checks if a path matches any exclude pattern.
    fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.exclude_patterns {
            if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
                if glob_pattern.matches(&path_str) {
                    return true;
                }
            }

            // Also check as substring for patterns like "**/__pycache__/**".
            let normalized = pattern.replace("**", "");
            if !normalized.is_empty() && path_str.contains(&normalized) {
                return true;
            }
        }

        false
    }
}

/// Sorts and deduplicates diagnostics.
///
/// Sort key: `(start line, start column, code)` ascending, with span end and
/// message as deterministic tie-breakers. Two diagnostics with identical
/// `(code, span)` collapse to one, guarding against double emission for
/// overlapping granularities.
#[must_use]
pub fn aggregate(mut diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
    diagnostics.sort_by(|a, b| {
        (
            a.span.start.line,
            a.span.start.column,
            a.code.as_str(),
            a.span.end.offset,
            a.message.as_str(),
        )
            .cmp(&(
                b.span.start.line,
                b.span.start.column,
                b.code.as_str(),
                b.span.end.offset,
                b.message.as_str(),
            ))
    });
    diagnostics.dedup_by(|a, b| a.code == b.code && a.span == b.span);
    diagnostics
}

fn rule_fault(rule: &dyn Rule, payload: &(dyn std::any::Any + Send)) -> Diagnostic {
    Diagnostic::new(
        RULE_FAULT_CODE,
        RULE_FAULT_NAME,
        Severity::Warning,
        Span::point(Position::new(1, 1, 0)),
        format!(
            "rule '{}' faulted and was skipped: {}",
            rule.name(),
            panic_message(payload)
        ),
    )
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
