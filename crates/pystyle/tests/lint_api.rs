//! End-to-end tests of the `lint` entry point.
//!
//! These exercise the whole pipeline — lexer, structural model, rule
//! fan-out, aggregation — against small Python sources.

use pystyle::{lint, Diagnostic, LintConfig, Severity};

fn lint_default(source: &str) -> Vec<Diagnostic> {
    lint(source, &LintConfig::default()).expect("valid default config")
}

fn by_code<'a>(diagnostics: &'a [Diagnostic], code: &str) -> Vec<&'a Diagnostic> {
    diagnostics.iter().filter(|d| d.code == code).collect()
}

/// A source that satisfies every default rule.
const CLEAN: &str = concat!(
    "\"\"\"Path helpers used by the build scripts.\"\"\"\n",
    "\n",
    "import os\n",
    "import sys\n",
    "\n",
    "\n",
    "MAX_DEPTH = 8\n",
    "\n",
    "\n",
    "def resolve(name):\n",
    "    \"\"\"Resolves a name against the interpreter prefix.\"\"\"\n",
    "    return os.path.join(sys.prefix, name)\n",
);

#[test]
fn clean_source_yields_no_diagnostics() {
    assert_eq!(lint_default(CLEAN), Vec::new());
}

#[test]
fn empty_source_yields_no_diagnostics() {
    assert_eq!(lint_default(""), Vec::new());
}

#[test]
fn output_is_deterministic() {
    let messy = "import requests\nimport os\ndef f(items=[]):\n  pass\n";
    let first = lint_default(messy);
    let second = lint_default(messy);
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn output_is_sorted_and_spans_are_valid() {
    let messy = concat!(
        "import requests\n",
        "import os\n",
        "x=1   \n",
        "def f(items=[]):\n",
        "  pass\n",
        "try:\n",
        "    pass\n",
        "except:\n",
        "    pass"
    );
    let diagnostics = lint_default(messy);
    assert!(!diagnostics.is_empty());

    let keys: Vec<_> = diagnostics
        .iter()
        .map(|d| (d.span.start.line, d.span.start.column, d.code.clone()))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);

    for d in &diagnostics {
        assert!(d.span.start.offset <= d.span.end.offset);
        assert!(d.span.end.offset <= messy.len());
    }
}

#[test]
fn two_space_indentation_scenario() {
    let diagnostics = lint_default("def f():\n  return 1\n");
    let indentation = by_code(&diagnostics, "PS101");
    assert_eq!(indentation.len(), 1);
    assert_eq!(indentation[0].span.start.line, 2);
    assert_eq!(indentation[0].span.start.column, 1);
}

#[test]
fn bare_except_scenario() {
    let diagnostics = lint_default("try:\n    pass\nexcept:\n    pass\n");
    let bare = by_code(&diagnostics, "PS110");
    assert_eq!(bare.len(), 1);
    assert_eq!(bare[0].severity, Severity::Error);
    assert_eq!(bare[0].span.start.line, 3);
    assert_eq!(bare[0].span.len(), "except".len());
}

#[test]
fn import_order_scenario() {
    let diagnostics = lint_default("import requests\nimport os\n");
    let order = by_code(&diagnostics, "PS108");
    assert_eq!(order.len(), 1);
    assert_eq!(order[0].span.start.line, 2);
    assert_eq!(order[0].labels.len(), 1);
    assert_eq!(order[0].labels[0].span.start.line, 1);
}

#[test]
fn mutable_default_scenario() {
    let diagnostics = lint_default("def f(items=[]):\n    pass\n");
    let mutable = by_code(&diagnostics, "PS111");
    assert_eq!(mutable.len(), 1);
    assert_eq!(mutable[0].severity, Severity::Error);
}

#[test]
fn missing_docstring_scenario() {
    let source = "def process(data):\n    return data\n";
    let diagnostics = lint_default(source);
    let missing = by_code(&diagnostics, "PS112");
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].severity, Severity::Warning);
    let span = missing[0].span;
    assert_eq!(&source[span.start.offset..span.end.offset], "process");
}

#[test]
fn rule_override_disables_and_reclassifies() {
    let source = "def process(data):\n    return data\n";

    let mut config = LintConfig::default();
    config.rules.insert(
        "missing-docstring".to_string(),
        pystyle::RuleConfig {
            enabled: Some(false),
            ..Default::default()
        },
    );
    let diagnostics = lint(source, &config).expect("valid config");
    assert!(by_code(&diagnostics, "PS112").is_empty());

    let mut config = LintConfig::default();
    config.rules.insert(
        "missing-docstring".to_string(),
        pystyle::RuleConfig {
            severity: Some(Severity::Error),
            ..Default::default()
        },
    );
    let diagnostics = lint(source, &config).expect("valid config");
    assert_eq!(by_code(&diagnostics, "PS112")[0].severity, Severity::Error);
}

#[test]
fn invalid_config_is_an_error_not_diagnostics() {
    let mut config = LintConfig::default();
    config.indent_width = 0;
    assert!(lint("x = 1\n", &config).is_err());
}

#[test]
fn malformed_source_still_produces_a_report() {
    // Unterminated string, unbalanced bracket, bogus characters: the
    // pipeline must degrade, not fail.
    let source = "s = 'oops\nxs = [1, 2\ny = $ ?\n";
    let diagnostics = lint_default(source);
    for d in &diagnostics {
        assert!(d.span.end.offset <= source.len());
    }
}

#[test]
fn suppression_comment_is_honored_end_to_end() {
    let source = concat!(
        "\"\"\"Doc.\"\"\"\n",
        "\n",
        "\n",
        "def f():\n",
        "    \"\"\"Doc.\"\"\"\n",
        "    try:\n",
        "        pass\n",
        "    # pystyle: allow(bare-except) reason=\"demo fixture\"\n",
        "    except:\n",
        "        pass\n",
    );
    let diagnostics = lint_default(source);
    assert!(by_code(&diagnostics, "PS110").is_empty());
}
