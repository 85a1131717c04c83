//! Internal runner for `check!()` macro integration.
//!
//! This module is `#[doc(hidden)]` and not part of the public API.
//! It is called by the generated test function from `pystyle::check!()`.

use pystyle_core::{LintConfig, Linter, Severity};
use pystyle_rules::Preset;
use std::path::{Path, PathBuf};

/// Config file names to search for, in priority order.
const CONFIG_CANDIDATES: &[&str] = &["pystyle.toml", ".pystyle.toml"];

/// Runs pystyle as part of `cargo test`.
///
/// Called by the `check!()` macro-generated test function.
/// Panics with a formatted report if violations are found.
///
/// # Panics
///
/// Panics if violations at or above `fail_on` severity are found,
/// or if the linter cannot be built.
pub fn run_check(preset: Option<&str>, config_path: Option<&str>, fail_on: Option<&str>) {
    let root = find_project_root();
    let config = load_config(&root, config_path);

    let effective_preset = resolve_preset(preset, &config);
    let effective_fail_on = resolve_fail_on(fail_on, &config);

    let mut builder = Linter::builder().root(&root).config(config);
    for rule in effective_preset.rules() {
        builder = builder.rule_box(rule);
    }

    let linter = builder.build().unwrap_or_else(|e| {
        panic!("pystyle: failed to build linter: {e}");
    });

    let result = linter.lint_project().unwrap_or_else(|e| {
        panic!("pystyle: lint failed: {e}");
    });

    if result.has_violations_at(effective_fail_on) {
        let report = result.format_test_report(effective_fail_on);
        panic!("{report}");
    }
}

/// Loads the configuration, searching the default candidates when no
/// explicit path is given. Missing candidates mean defaults.
fn load_config(root: &Path, explicit_path: Option<&str>) -> LintConfig {
    if let Some(path) = explicit_path {
        let full_path = if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            root.join(path)
        };
        return LintConfig::from_file(&full_path).unwrap_or_else(|e| {
            panic!("pystyle: failed to load config from {}: {e}", full_path.display());
        });
    }

    for candidate in CONFIG_CANDIDATES {
        let path = root.join(candidate);
        if path.exists() {
            return LintConfig::from_file(&path).unwrap_or_else(|e| {
                panic!("pystyle: failed to load config from {}: {e}", path.display());
            });
        }
    }

    LintConfig::default()
}

/// Checks whether a `Cargo.toml` file defines a `[workspace]` section
/// by parsing as TOML, avoiding false positives from comments or strings.
fn has_workspace_section(cargo_toml: &Path) -> bool {
    let Ok(content) = std::fs::read_to_string(cargo_toml) else {
        return false;
    };
    let Ok(table) = content.parse::<toml::Table>() else {
        return false;
    };
    table.contains_key("workspace")
}

/// Finds the project root by looking for `Cargo.toml` from `CARGO_MANIFEST_DIR`.
fn find_project_root() -> PathBuf {
    // CARGO_MANIFEST_DIR points to the crate containing the test,
    // which may be a workspace member. Walk up to find workspace root.
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let manifest_path = PathBuf::from(&manifest_dir);

        let mut candidate = manifest_path.as_path();
        loop {
            let cargo_toml = candidate.join("Cargo.toml");
            if cargo_toml.exists() && has_workspace_section(&cargo_toml) {
                return candidate.to_path_buf();
            }
            match candidate.parent() {
                Some(parent) => candidate = parent,
                None => break,
            }
        }

        // No workspace root found — use manifest dir itself
        return manifest_path;
    }

    // Fallback: current directory
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Resolves the effective preset from macro arg > config > default.
fn resolve_preset(macro_arg: Option<&str>, config: &LintConfig) -> Preset {
    let name = macro_arg
        .or(config.preset.as_deref())
        .unwrap_or("recommended");

    match name {
        "recommended" => Preset::Recommended,
        "strict" => Preset::Strict,
        "minimal" => Preset::Minimal,
        other => panic!(
            "pystyle: unknown preset `{other}`. Valid presets: recommended, strict, minimal"
        ),
    }
}

/// Resolves the effective `fail_on` severity from macro arg > config > default.
///
/// Priority: explicit macro arg > config file > default ("error").
fn resolve_fail_on(macro_arg: Option<&str>, config: &LintConfig) -> Severity {
    let name = macro_arg.or(config.fail_on.as_deref()).unwrap_or("error");

    Severity::parse(name).unwrap_or_else(|| {
        panic!("pystyle: unknown severity `{name}`. Valid values: error, warning, info")
    })
}
