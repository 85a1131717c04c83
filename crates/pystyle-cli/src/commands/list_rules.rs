//! List rules command implementation.

use pystyle_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<25} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<10} {:<25} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nPresets:");
    println!("  recommended  - all rules with default options (default)");
    println!("  strict       - all rules with stricter options");
    println!("  minimal      - PS110, PS111 only (for gradual adoption)");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  pystyle check --rules bare-except,mutable-default");
    println!("  pystyle check --rules PS101,PS102,PS103");
}
