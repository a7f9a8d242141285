//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# ebl-lint configuration

# Dictionary of actors, verbs and permissions (relative to this file)
dictionary = "dictionary.json"

# Fail the run on heuristic advisories at or above this severity
# fail_on = "warning"

[validator]
# Warn when a relationship endpoint is not a known entity, asset or actor
warn_unknown_assets = true

# Report declared names missing from the dictionary catalogue (EBL016)
dictionary_coverage = false

# Prefix that marks data objects in action lines
data_object_prefix = "DO_"

# Relationship type that needs a catalogue data object
hosted_on_type = "hosted_on"
hosted_on_catalogs = ["DO_ApplicationCatalog", "DO_PlatformRegistry"]

[input]
# Suffix of syntax tree files
suffix = ".ebl.json"

# Glob patterns to exclude when walking a directory
exclude = [
    "**/target/**",
]

# Respect .gitignore files
respect_gitignore = true

[heuristics]
# none, banking or all
preset = "none"

# Rules are enabled by default; disable by name or code
# [rules.reserved-keyword]
# enabled = false

# [rules.AUDIT-001]
# enabled = false
"#;

/// Runs the init command in the current directory.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("ebl-lint.toml");
    write_config(config_path, force)?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Point `dictionary` at your dictionary JSON");
    println!("  2. Run: ebl-lint check");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))
}
