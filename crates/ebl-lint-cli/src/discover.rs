//! Syntax tree file discovery.
//!
//! A file path is validated as given. A directory is walked (gitignore
//! aware) for files ending in the configured suffix, minus exclude globs.
//! Results are sorted so runs are reproducible.

use anyhow::{Context, Result};
use ebl_lint_core::InputConfig;
use std::path::{Path, PathBuf};

/// Collects the tree files to validate under `root`.
pub fn collect(root: &Path, input: &InputConfig) -> Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let patterns = input
        .exclude
        .iter()
        .map(|p| glob::Pattern::new(p).with_context(|| format!("Invalid exclude pattern: {p}")))
        .collect::<Result<Vec<_>>>()?;

    let mut builder = ignore::WalkBuilder::new(root);
    builder
        .hidden(false)
        .git_ignore(input.respect_gitignore)
        .require_git(false);

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        let path = entry.path();

        if !path.is_file() || !has_suffix(path, &input.suffix) {
            continue;
        }

        let rel = path.strip_prefix(root).unwrap_or(path);
        if is_excluded(rel, &patterns) {
            tracing::debug!("Excluding: {}", path.display());
            continue;
        }

        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(suffix))
}

fn is_excluded(rel: &Path, patterns: &[glob::Pattern]) -> bool {
    patterns.iter().any(|p| {
        p.matches_path(rel) || {
            // "**/target/**" also matches "target/x" at the walk root
            let clean = p.as_str().replace("**/", "").replace("/**", "");
            !clean.is_empty() && rel.starts_with(&clean)
        }
    })
}
