//! List rules command implementation.

use ebl_lint_core::RuleId;
use ebl_lint_heuristics::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Validator rules:\n");
    println!("{:<8} {:<30} {:<8} Description", "Code", "Name", "Bucket");
    println!("{}", "-".repeat(100));

    for rule in RuleId::ALL {
        let opt_in = if rule.is_opt_in() { " (opt-in)" } else { "" };
        println!(
            "{:<8} {:<30} {:<8} {}{opt_in}",
            rule.code(),
            rule.name(),
            rule.severity(),
            rule.description()
        );
    }

    println!("\nHeuristics (advisories):\n");
    println!("{:<22} {:<38} Description", "Name", "Codes");
    println!("{}", "-".repeat(100));

    for rule in all_rules() {
        println!(
            "{:<22} {:<38} {}",
            rule.name(),
            rule.codes().join(", "),
            rule.description()
        );
    }

    println!("\nHeuristic presets:");
    println!("  none     - No heuristics (default)");
    println!("  banking  - PCI-DSS, wire transfer, fraud, SOX, data, transaction and audit checks");
    println!("  all      - Every heuristic");

    println!("\nDisable any rule by name or code in ebl-lint.toml, e.g.:");
    println!("  [rules.reserved-keyword]");
    println!("  enabled = false");
    println!("\nEnable dictionary coverage with:");
    println!("  [validator]");
    println!("  dictionary_coverage = true");
}
