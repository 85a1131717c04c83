//! # pystyle
//!
//! Rule-based style linter for Python source.
//!
//! This is the main facade crate that re-exports the core engine and the
//! built-in rules.
//!
//! ## Quick Start — `cargo test` Integration
//!
//! ```toml
//! [dev-dependencies]
//! pystyle = "0.3"
//! ```
//!
//! ```rust,ignore
//! // tests/style.rs
//! pystyle::check!();
//! ```
//!
//! This lints the project's Python sources as part of `cargo test` and
//! fails with a formatted report when violations reach the configured
//! `fail_on` severity. Configure via `pystyle.toml`.
//!
//! ## Suppression Comments
//!
//! Suppress a rule on one line with a comment, giving a reason for
//! error-severity rules:
//!
//! ```python
//! except:  # pystyle: allow(bare-except) reason="third-party callback"
//! ```
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use pystyle::{lint, LintConfig};
//!
//! let diagnostics = lint(source_text, &LintConfig::default())?;
//! for d in &diagnostics {
//!     println!("{d}");
//! }
//! ```

#![forbid(unsafe_code)]

// Re-export core types and traits
pub use pystyle_core::*;

/// Built-in rules and presets.
pub mod rules {
    pub use pystyle_rules::*;
}

mod runner;

#[doc(hidden)]
pub mod __internal {
    pub use crate::runner::run_check;
}

/// Lints one source text with the full built-in rule set.
///
/// Returns the ordered diagnostic list; output is byte-identical for
/// identical `(source, config)`.
///
/// # Errors
///
/// Returns an error when the configuration is invalid (zero thresholds or
/// overrides naming unknown rules). Malformed *source* is never an error —
/// it degrades to fewer diagnostics.
pub fn lint(source: &str, config: &LintConfig) -> Result<Vec<Diagnostic>, EngineError> {
    let mut builder = Linter::builder().config(config.clone());
    for rule in pystyle_rules::all_rules() {
        builder = builder.rule_box(rule);
    }
    Ok(builder.build()?.lint_source(source))
}

/// Generates a `#[test]` that lints the project's Python sources.
///
/// ```rust,ignore
/// pystyle::check!();
/// pystyle::check!(preset = "strict");
/// pystyle::check!(preset = "minimal", config = "tests/pystyle.toml");
/// ```
#[macro_export]
macro_rules! check {
    () => {
        #[test]
        fn pystyle_check() {
            $crate::__internal::run_check(None, None, None);
        }
    };
    (preset = $preset:literal $(,)?) => {
        #[test]
        fn pystyle_check() {
            $crate::__internal::run_check(Some($preset), None, None);
        }
    };
    (preset = $preset:literal, config = $config:literal $(,)?) => {
        #[test]
        fn pystyle_check() {
            $crate::__internal::run_check(Some($preset), Some($config), None);
        }
    };
    (preset = $preset:literal, config = $config:literal, fail_on = $fail_on:literal $(,)?) => {
        #[test]
        fn pystyle_check() {
            $crate::__internal::run_check(Some($preset), Some($config), Some($fail_on));
        }
    };
    (fail_on = $fail_on:literal $(,)?) => {
        #[test]
        fn pystyle_check() {
            $crate::__internal::run_check(None, None, Some($fail_on));
        }
    };
}
