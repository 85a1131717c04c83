//! # pystyle-core
//!
//! Core framework for rule-based style linting of Python source.
//!
//! The pipeline is: raw text → [`lexer::tokenize`] → [`StructuralModel`] →
//! rule fan-out → aggregated, ordered diagnostics. Every stage returns data
//! even on malformed input; nothing in the pipeline raises for ordinary
//! control flow.
//!
//! This crate provides:
//!
//! - [`Rule`] trait for independent style checks
//! - [`Linter`] for orchestrating lint execution
//! - [`Diagnostic`] for representing findings
//! - a tolerant [`lexer`] and the shallow structural [`model`]
//!
//! ## Example
//!
//! ```ignore
//! use pystyle_core::{Linter, Rule, Severity};
//!
//! let linter = Linter::builder()
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let diagnostics = linter.lint_source(source);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod context;
mod engine;
mod rule;
mod types;

/// Tolerant lexer producing the token stream.
pub mod lexer;
/// Structural model: logical lines, definitions, imports.
pub mod model;
/// Utility modules for the engine and rule implementations.
pub mod utils;

pub use config::{ConfigError, FilesConfig, LintConfig, RuleConfig};
pub use context::{PhysicalLine, RuleContext};
pub use engine::{aggregate, EngineError, Linter, LinterBuilder, RULE_FAULT_CODE, RULE_FAULT_NAME};
pub use model::{
    DefKind, DefaultClassifier, Definition, ImportCategory, ImportClassifier, ImportStatement,
    LogicalLine, ParamSpec, StructuralModel,
};
pub use rule::{Rule, RuleBox};
pub use types::{
    Diagnostic, DiagnosticReport, FileReport, Label, LintResult, Position, Severity, Span,
    Suggestion,
};
pub use utils::allowance::{AllowCheck, AllowState};
