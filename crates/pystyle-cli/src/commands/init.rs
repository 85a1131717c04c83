//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# pystyle configuration

# Severity threshold for failing a check!() test run
# fail_on = "error"

# Core thresholds
indent_width = 4
max_line_length = 79
max_comment_length = 72
blank_lines_top_level = 2
blank_lines_method = 1
exception_suffix = "Error"

# Root module names of this project, for import classification
local_package_prefixes = []

# Measure line length inside triple-quoted strings
measure_inside_multiline_strings = false

[files]
# Root directory to lint (default: current directory)
# root = "./src"

# Glob patterns to exclude from linting
exclude = [
    "**/.venv/**",
    "**/__pycache__/**",
    "**/build/**",
]

# Respect .gitignore files
respect_gitignore = true

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.line-length]
enabled = true
# severity = "info"

# [rules.missing-docstring]
# require_nested = true

# [rules.naming-convention]
# function_pattern = "^[a-z_][a-z0-9_]*$"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("pystyle.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created pystyle.toml");
    println!("\nNext steps:");
    println!("  1. Edit pystyle.toml to configure rules");
    println!("  2. Run: pystyle check");

    Ok(())
}
