//! # pystyle-rules
//!
//! Built-in style rules for pystyle.
//!
//! ## Available Rules
//!
//! | Code  | Name                  | Description |
//! |-------|-----------------------|-------------|
//! | PS101 | `indentation`         | Enforces indentation width and forbids tab/space mixing |
//! | PS102 | `line-length`         | Flags physical lines longer than the configured maximum |
//! | PS103 | `trailing-whitespace` | Flags whitespace at the end of a physical line |
//! | PS104 | `whitespace-style`    | Flags whitespace misuse around operators and brackets |
//! | PS105 | `blank-lines`         | Enforces blank-line separation before definitions |
//! | PS106 | `naming-convention`   | Enforces naming grammars for functions, classes, and constants |
//! | PS107 | `unused-import`       | Flags imported names never used in the file |
//! | PS108 | `import-order`        | Enforces standard/third-party/local import ordering |
//! | PS109 | `multiple-imports`    | Requires one module per import statement |
//! | PS110 | `bare-except`         | Forbids bare `except:` clauses |
//! | PS111 | `mutable-default`     | Forbids mutable literal defaults on parameters |
//! | PS112 | `missing-docstring`   | Requires docstrings on public definitions |
//! | PS113 | `multiple-statements` | Forbids multiple statements on one physical line |
//! | PS114 | `final-newline`       | Requires exactly one newline at end of file |
//!
//! ## Usage
//!
//! ```ignore
//! use pystyle_core::Linter;
//! use pystyle_rules::{recommended_rules, BareExcept};
//!
//! let mut builder = Linter::builder();
//! for rule in recommended_rules() {
//!     builder = builder.rule_box(rule);
//! }
//! let linter = builder.build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod bare_except;
mod blank_lines;
mod final_newline;
mod import_order;
mod indentation;
mod line_length;
mod missing_docstring;
mod multiple_imports;
mod multiple_statements;
mod mutable_default;
mod naming_convention;
mod presets;
mod trailing_whitespace;
mod unused_import;
mod whitespace_style;

pub use bare_except::BareExcept;
pub use blank_lines::BlankLines;
pub use final_newline::FinalNewline;
pub use import_order::ImportOrder;
pub use indentation::Indentation;
pub use line_length::LineLength;
pub use missing_docstring::MissingDocstring;
pub use multiple_imports::MultipleImports;
pub use multiple_statements::MultipleStatements;
pub use mutable_default::MutableDefault;
pub use naming_convention::NamingConvention;
pub use presets::{all_rules, minimal_rules, recommended_rules, strict_rules, Preset};
pub use trailing_whitespace::TrailingWhitespace;
pub use unused_import::UnusedImport;
pub use whitespace_style::WhitespaceStyle;

/// Re-export core types for convenience.
pub use pystyle_core::{Diagnostic, Rule, Severity};
