//! Check command implementation.

use anyhow::{anyhow, Context, Result};
use ebl_lint_core::{Config, Dictionary, Document, FileReport, RunResult, Severity, Validator};
use ebl_lint_heuristics::{all_rules, scan, HeuristicBox, Preset};
use std::path::{Path, PathBuf};

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Command-line overrides for one `check` run.
#[derive(Debug, Default)]
pub struct CheckOptions {
    /// File or directory to validate.
    pub path: PathBuf,
    /// Dictionary path, overriding `dictionary` in the config.
    pub dictionary: Option<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
    /// Heuristics preset, overriding `[heuristics] preset`.
    pub heuristics: Option<String>,
    /// Disable the unknown relationship endpoint rule.
    pub no_unknown_assets: bool,
    /// Additional exclude patterns.
    pub exclude: Vec<String>,
    /// Advisory failure threshold, overriding `fail_on`.
    pub fail_on: Option<Severity>,
}

/// Runs the check command.
pub fn run(opts: CheckOptions, source: &ConfigSource) -> Result<()> {
    let mut config = source.load()?;
    apply_overrides(&mut config, &opts);

    let result = execute(&opts.path, opts.dictionary.as_deref(), &config)?;

    super::output::print(&result, opts.format)?;

    if result.is_failure(config.fail_on) {
        std::process::exit(2);
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, opts: &CheckOptions) {
    if let Some(preset) = &opts.heuristics {
        config.heuristics.preset.clone_from(preset);
    }
    if opts.no_unknown_assets {
        config.validator.warn_unknown_assets = false;
    }
    if opts.fail_on.is_some() {
        config.fail_on = opts.fail_on;
    }
    config.input.exclude.extend(opts.exclude.iter().cloned());
}

/// Validates every tree file under `path` and collects the results.
///
/// A tree that fails to load is logged and counted; it does not stop the
/// run. A missing or malformed dictionary does.
pub fn execute(path: &Path, dictionary: Option<&Path>, config: &Config) -> Result<RunResult> {
    let dict_path = dictionary
        .or(config.dictionary.as_deref())
        .ok_or_else(|| anyhow!("No dictionary given: pass --dictionary or set `dictionary` in ebl-lint.toml"))?;
    let dict = Dictionary::from_file(dict_path)
        .with_context(|| format!("Failed to load dictionary: {}", dict_path.display()))?;
    let (actors, verbs, rel_types) = dict.stats();
    tracing::debug!(
        "Dictionary {}: {actors} actor(s), {verbs} verb(s), {rel_types} relationship type(s)",
        dict_path.display()
    );

    let heuristics = select_heuristics(config)?;
    warn_unknown_rule_keys(config);

    let files = crate::discover::collect(path, &config.input)?;
    tracing::info!(
        "Validating {} file(s) under {} with {} heuristic(s)",
        files.len(),
        path.display(),
        heuristics.len()
    );

    let disabled = config.disabled_rules();
    let mut result = RunResult::new();

    for file in files {
        let doc = match Document::from_file(&file) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!("Skipping {}: {e}", file.display());
                result.files_failed += 1;
                continue;
            }
        };

        let mut validator =
            Validator::new(&dict, config.validator.clone()).with_disabled(disabled.iter().copied());
        ebl_lint_core::walk(&doc, &mut validator);
        let mut report = FileReport::new(file, validator.finish());

        if !heuristics.is_empty() {
            report.advisories = scan(&heuristics, &doc.text())
                .into_iter()
                .filter(|f| config.is_enabled(&f.code))
                .collect();
        }

        result.files.push(report);
    }

    let (errors, warnings, advisories) = result.totals();
    tracing::info!(
        "Checked {} file(s): {errors} error(s), {warnings} warning(s), {advisories} advisory(ies), {} failed to load",
        result.files_checked(),
        result.files_failed
    );

    Ok(result)
}

fn select_heuristics(config: &Config) -> Result<Vec<HeuristicBox>> {
    let preset: Preset = config
        .heuristics
        .preset
        .parse()
        .map_err(|e: String| anyhow!(e))?;

    Ok(preset
        .rules()
        .into_iter()
        .filter(|rule| config.is_enabled(rule.name()))
        .collect())
}

fn warn_unknown_rule_keys(config: &Config) {
    let known: Vec<&str> = all_rules()
        .iter()
        .flat_map(|rule| {
            let mut keys = vec![rule.name()];
            keys.extend_from_slice(rule.codes());
            keys
        })
        .collect();

    for key in config.unknown_rule_keys(&known) {
        tracing::warn!("Unknown rule in config: {key}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const DICTIONARY: &str = r#"{
        "core": { "verbPermissions": { "Capture": "write", "Transfer": "write" } },
        "domains": {
            "ops": {
                "actors": ["Clerk"],
                "verbs": ["Capture", "Transfer"],
                "dataObjects": ["DO_Form"],
                "actorVerbs": { "Clerk": ["Capture", "Transfer"] }
            }
        }
    }"#;

    const CLEAN: &str = r#"{ "items": [
        { "kind": "dataObject", "name": "DO_Form" },
        { "kind": "process", "name": "Intake", "actors": ["Clerk"],
          "steps": [ { "name": "Capture", "actions": ["- Clerk Capture DO_Form"] } ] }
    ] }"#;

    const BROKEN: &str = r#"{ "items": [
        { "kind": "entity", "name": "Form", "dataRef": "DO_Missing" }
    ] }"#;

    const WIRE: &str = r#"{ "source": "Process Payout { Actors: [Clerk] Action: Clerk Approve WireTransfer }", "items": [] }"#;

    struct Workspace {
        dir: TempDir,
    }

    impl Workspace {
        fn new(trees: &[(&str, &str)]) -> Self {
            let dir = TempDir::new().unwrap();
            fs::write(dir.path().join("dictionary.json"), DICTIONARY).unwrap();
            fs::create_dir(dir.path().join("trees")).unwrap();
            for (name, body) in trees {
                fs::write(dir.path().join("trees").join(name), body).unwrap();
            }
            Self { dir }
        }

        fn trees(&self) -> PathBuf {
            self.dir.path().join("trees")
        }

        fn dictionary(&self) -> PathBuf {
            self.dir.path().join("dictionary.json")
        }

        fn run(&self, config: &Config) -> RunResult {
            execute(&self.trees(), Some(&self.dictionary()), config).unwrap()
        }
    }

    #[test]
    fn clean_and_broken_trees() {
        let ws = Workspace::new(&[("a.ebl.json", CLEAN), ("b.ebl.json", BROKEN)]);
        let result = ws.run(&Config::default());

        assert_eq!(result.files_checked(), 2);
        assert!(result.files[0].report.is_clean());
        assert_eq!(result.files[1].report.errors[0].code, "EBL003");
        assert!(result.is_failure(None));
    }

    #[test]
    fn unreadable_tree_is_counted_not_fatal() {
        let ws = Workspace::new(&[("a.ebl.json", CLEAN), ("bad.ebl.json", "{ not json")]);
        let result = ws.run(&Config::default());

        assert_eq!(result.files_checked(), 1);
        assert_eq!(result.files_failed, 1);
        assert!(!result.has_errors());
        assert!(result.is_failure(None));
    }

    #[test]
    fn config_disables_validator_rule() {
        let ws = Workspace::new(&[("b.ebl.json", BROKEN)]);
        let config = Config::parse("[rules.missing-data-ref]\nenabled = false\n").unwrap();
        let result = ws.run(&config);

        assert!(result.files[0].report.is_clean());
        assert!(!result.is_failure(None));
    }

    #[test]
    fn dictionary_from_config_when_no_flag() {
        let ws = Workspace::new(&[("a.ebl.json", CLEAN)]);
        let config = Config {
            dictionary: Some(ws.dictionary()),
            ..Config::default()
        };
        let result = execute(&ws.trees(), None, &config).unwrap();
        assert_eq!(result.files_checked(), 1);
    }

    #[test]
    fn missing_dictionary_is_an_error() {
        let ws = Workspace::new(&[("a.ebl.json", CLEAN)]);
        let err = execute(&ws.trees(), None, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("--dictionary"));

        let missing = ws.dir.path().join("nope.json");
        assert!(execute(&ws.trees(), Some(&missing), &Config::default()).is_err());
    }

    #[test]
    fn banking_preset_attaches_advisories() {
        let ws = Workspace::new(&[("wire.ebl.json", WIRE)]);
        let config = Config::parse("[heuristics]\npreset = \"banking\"\n").unwrap();
        let result = ws.run(&config);

        let codes: Vec<&str> = result.files[0]
            .advisories
            .iter()
            .map(|f| f.code.as_str())
            .collect();
        assert!(codes.contains(&"WIRE-001"));
        assert!(result.files[0].report.is_clean());
    }

    #[test]
    fn heuristic_codes_can_be_disabled() {
        let ws = Workspace::new(&[("wire.ebl.json", WIRE)]);
        let config = Config::parse(
            "[heuristics]\npreset = \"banking\"\n\n[rules.WIRE-001]\nenabled = false\n",
        )
        .unwrap();
        let result = ws.run(&config);

        assert!(result.files[0].advisories.iter().all(|f| f.code != "WIRE-001"));
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let ws = Workspace::new(&[("a.ebl.json", CLEAN)]);
        let config = Config::parse("[heuristics]\npreset = \"insurance\"\n").unwrap();
        assert!(execute(&ws.trees(), Some(&ws.dictionary()), &config).is_err());
    }

    #[test]
    fn overrides_apply_on_top_of_config() {
        let mut config = Config::default();
        let opts = CheckOptions {
            heuristics: Some("banking".to_string()),
            no_unknown_assets: true,
            exclude: vec!["drafts/**".to_string()],
            fail_on: Some(Severity::Warning),
            ..CheckOptions::default()
        };
        apply_overrides(&mut config, &opts);

        assert_eq!(config.heuristics.preset, "banking");
        assert!(!config.validator.warn_unknown_assets);
        assert_eq!(config.fail_on, Some(Severity::Warning));
        assert_eq!(config.input.exclude, vec!["**/target/**", "drafts/**"]);
    }
}
