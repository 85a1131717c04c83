//! Check command implementation.

use anyhow::{Context, Result};
use pystyle_core::{LintConfig, Linter, RuleBox};
use pystyle_rules::{
    recommended_rules, BareExcept, BlankLines, FinalNewline, ImportOrder, Indentation, LineLength,
    MissingDocstring, MultipleImports, MultipleStatements, MutableDefault, NamingConvention,
    TrailingWhitespace, UnusedImport, WhitespaceStyle,
};
use std::path::Path;

use super::output;
use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    rules_filter: Option<String>,
    exclude: Vec<String>,
    source: &crate::config_resolver::ConfigSource,
) -> Result<()> {
    let config = match source {
        crate::config_resolver::ConfigSource::Default => LintConfig::default(),
        other => {
            // Invariant: non-Default variants always have a path
            let p = other.path().context("resolved config has no path")?;
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            LintConfig::from_file(p)
                .with_context(|| format!("Failed to load config: {}", p.display()))?
        }
    };

    let mut builder = Linter::builder().root(path).config(config);

    for pattern in exclude {
        builder = builder.exclude(pattern);
    }

    let rules_to_add = if let Some(filter) = rules_filter {
        let rule_names: Vec<&str> = filter.split(',').map(str::trim).collect();
        filter_rules(&rule_names)
    } else {
        recommended_rules()
    };

    for rule in rules_to_add {
        builder = builder.rule_box(rule);
    }

    let linter = builder.build().context("Failed to build linter")?;

    tracing::info!("Linting {:?} with {} rules", path, linter.rule_count());

    let result = linter.lint_project().context("Lint failed")?;

    output::print(&result, format)?;

    // Exit with error code if there are errors
    if result.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

fn filter_rules(names: &[&str]) -> Vec<RuleBox> {
    let mut rules: Vec<RuleBox> = Vec::new();

    for name in names {
        match *name {
            "indentation" | "PS101" => rules.push(Box::new(Indentation::new())),
            "line-length" | "PS102" => rules.push(Box::new(LineLength::new())),
            "trailing-whitespace" | "PS103" => rules.push(Box::new(TrailingWhitespace::new())),
            "whitespace-style" | "PS104" => rules.push(Box::new(WhitespaceStyle::new())),
            "blank-lines" | "PS105" => rules.push(Box::new(BlankLines::new())),
            "naming-convention" | "PS106" => rules.push(Box::new(NamingConvention::new())),
            "unused-import" | "PS107" => rules.push(Box::new(UnusedImport::new())),
            "import-order" | "PS108" => rules.push(Box::new(ImportOrder::new())),
            "multiple-imports" | "PS109" => rules.push(Box::new(MultipleImports::new())),
            "bare-except" | "PS110" => rules.push(Box::new(BareExcept::new())),
            "mutable-default" | "PS111" => rules.push(Box::new(MutableDefault::new())),
            "missing-docstring" | "PS112" => rules.push(Box::new(MissingDocstring::new())),
            "multiple-statements" | "PS113" => rules.push(Box::new(MultipleStatements::new())),
            "final-newline" | "PS114" => rules.push(Box::new(FinalNewline::new())),
            _ => tracing::warn!("Unknown rule: {}", name),
        }
    }

    rules
}
