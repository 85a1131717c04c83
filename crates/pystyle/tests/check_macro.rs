//! Integration tests for the `pystyle::check!()` macro.
//!
//! Verifies that the macro generates a test function and that the runner
//! wires config loading, project discovery, and linting together.

// Runs the minimal preset with reference material excluded.
pystyle::check!(
    preset = "minimal",
    config = "crates/pystyle/tests/test-config.toml",
);
