//! Rules command implementation.

use voicelint_core::rules::default_rules;

/// Runs the rules command.
pub fn run() {
    println!("Built-in rules:\n");
    println!("{:<32} Description", "Name");
    println!("{}", "-".repeat(80));

    for rule in default_rules() {
        println!("{:<32} {}", rule.name(), rule.description());
    }

    println!("\nSome rules report under more specific ids:");
    println!("  doNot             doNot.<phrase> or doNot.pattern-<n>");
    println!("  cta.guidelines    cta.maxWords, cta.avoidWord, cta.capitalization");

    println!("\nDisable or re-grade a rule in voicelint.toml, e.g.:");
    println!("  [rules.\"constraints.contractions\"]");
    println!("  enabled = false");
}
