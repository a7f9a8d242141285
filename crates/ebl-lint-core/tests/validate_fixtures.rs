//! Integration test: dictionary + syntax tree fixtures end-to-end.
//!
//! Uses fixture files under `tests/fixtures/` to verify that the full
//! JSON → Dictionary / Document → walk → ValidationReport pipeline reports
//! the expected findings in the expected order.

use ebl_lint_core::{
    validate, walk, Config, Dictionary, DictionaryError, Document, RuleId, ValidationReport,
    Validator, ValidatorConfig,
};
use std::path::PathBuf;

fn fixture_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn dictionary() -> Dictionary {
    Dictionary::from_file(&fixture_root().join("dictionary.json"))
        .expect("fixture dictionary should load")
}

fn document(name: &str) -> Document {
    Document::from_file(&fixture_root().join(name)).expect("fixture tree should load")
}

fn render(report: &ValidationReport) -> String {
    report
        .iter()
        .map(|f| format!("{} {} {}", f.severity, f.code, f.message))
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Happy path ──

#[test]
fn clean_document_has_no_findings() {
    let report = validate(
        &dictionary(),
        ValidatorConfig::default(),
        &document("loan_origination.ebl.json"),
    );
    assert!(report.is_clean(), "unexpected findings:\n{}", render(&report));
}

#[test]
fn clean_document_is_covered_by_dictionary() {
    let config = ValidatorConfig {
        dictionary_coverage: true,
        ..ValidatorConfig::default()
    };
    let report = validate(&dictionary(), config, &document("loan_origination.ebl.json"));
    assert!(report.is_clean(), "unexpected findings:\n{}", render(&report));
}

// ── Broken document ──

#[test]
fn broken_document_reports_in_traversal_order() {
    let report = validate(
        &dictionary(),
        ValidatorConfig::default(),
        &document("loan_servicing_broken.ebl.json"),
    );

    insta::assert_snapshot!(render(&report), @r"
    error EBL001 DataObject: field 'rate' has min>max (5 > 1)
    error EBL003 Entity 'Loan' references missing DataObject 'DO_Loan'
    error EBL004 Enum default 'Pending' not in values for Loan.status
    warning EBL002 DataObject: field 'tier' Enum without values= list.
    warning EBL013 Relationship 'Mystery': From='Ghost' not a known Entity/ITAsset/Actor.
    warning EBL014 Relationship 'Mystery': Type 'links' is not allowed.
    warning EBL012 Validation: free-text contains reserved keyword 'DELETE'; consider quoting or using structured fields.
    warning EBL012 Validation: free-text contains reserved keyword 'DROP'; consider quoting or using structured fields.
    warning EBL010 Actor 'LoanOfficer' not allowed to perform 'Approve'.
    warning EBL011 Actor 'LoanOfficer' lacks WRITE permission on 'DO_Rates' (verb 'Approve').
    warning EBL007 Action actor 'Teller' not in dictionary.
    warning EBL006 Action missing explicit 'Actor Verb' prefix; use '- <Actor> <Verb> ...'
    warning EBL005 Process: actor 'Underwriter' declared but never used in Actions.
    warning EBL005 Process: actor 'Customer' declared but never used in Actions.
    warning EBL012 Rule.Description: free-text contains reserved keyword 'SELECT'; consider quoting or using structured fields.
    warning EBL012 Report.Query: free-text contains reserved keyword 'SELECT'; consider quoting or using structured fields.
    warning EBL015 Relationship 'LoanOnCore': hosted_on used but neither DO_ApplicationCatalog nor DO_PlatformRegistry defined.
    ");
}

#[test]
fn broken_document_findings_carry_hints() {
    let report = validate(
        &dictionary(),
        ValidatorConfig::default(),
        &document("loan_servicing_broken.ebl.json"),
    );
    let hint = |code: &str| {
        report
            .iter()
            .find(|f| f.code == code)
            .and_then(|f| f.suggestion.clone())
    };

    assert_eq!(
        hint("EBL003").as_deref(),
        Some("Define DataObject 'DO_Loan' or fix the dataRef of 'Loan'")
    );
    assert_eq!(
        hint("EBL014").as_deref(),
        Some("Valid types: depends_on, hosted_on, owns, uses")
    );
    assert_eq!(hint("EBL001"), None);
}

#[test]
fn config_disables_rules_by_name_and_code() {
    let config = Config::parse(
        r#"
[validator]
warn_unknown_assets = false

[rules.reserved-keyword]
enabled = false

[rules.EBL005]
enabled = false
"#,
    )
    .expect("config should parse");

    let dictionary = dictionary();
    let doc = document("loan_servicing_broken.ebl.json");
    let mut validator = Validator::new(&dictionary, config.validator.clone())
        .with_disabled(config.disabled_rules());
    walk(&doc, &mut validator);
    let report = validator.finish();

    assert_eq!(report.errors.len(), 3);
    let codes: Vec<&str> = report.warnings.iter().map(|f| f.code.as_str()).collect();
    assert_eq!(
        codes,
        vec!["EBL002", "EBL014", "EBL010", "EBL011", "EBL007", "EBL006", "EBL015"]
    );
    assert!(!codes.contains(&RuleId::ReservedKeyword.code()));
}

#[test]
fn dictionary_is_shared_across_runs() {
    let dictionary = dictionary();
    let broken = document("loan_servicing_broken.ebl.json");
    let clean = document("loan_origination.ebl.json");

    let first = validate(&dictionary, ValidatorConfig::default(), &broken);
    assert!(validate(&dictionary, ValidatorConfig::default(), &clean).is_clean());
    let second = validate(&dictionary, ValidatorConfig::default(), &broken);
    assert_eq!(first, second);
}

// ── Loading failures ──

#[test]
fn missing_dictionary_is_io_error() {
    let err = Dictionary::from_file(&fixture_root().join("no-such-dictionary.json")).unwrap_err();
    assert!(matches!(err, DictionaryError::Io { .. }));
    assert!(err.to_string().contains("no-such-dictionary.json"));
}

#[test]
fn rendered_text_is_used_without_source() {
    let clean = document("loan_origination.ebl.json");
    assert!(clean.source.is_none());
    assert!(clean.text().contains("Process LoanOrigination {"));

    let broken = document("loan_servicing_broken.ebl.json");
    assert_eq!(broken.text(), "Process Servicing { ... }");
}
