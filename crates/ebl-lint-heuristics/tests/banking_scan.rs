//! Integration test: banking heuristics over rendered syntax trees.

use ebl_lint_core::Document;
use ebl_lint_heuristics::{scan, Preset};

const WIRE_DESK: &str = r#"{
    "items": [
        { "kind": "dataObject", "name": "DO_Wire",
          "fields": [
            { "name": "beneficiaryIban", "type": "String" },
            { "name": "amount", "type": "Decimal", "min": 1 }
          ] },
        { "kind": "process", "name": "InternationalWire",
          "actors": ["Treasurer"],
          "steps": [
            { "name": "Release",
              "actions": ["- Treasurer Approve DO_Wire", "- Treasurer Transfer DO_Wire Output"] }
          ] }
    ]
}"#;

fn render(findings: &[ebl_lint_heuristics::Finding]) -> String {
    findings
        .iter()
        .map(|f| format!("{} {} {}", f.severity, f.code, f.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn banking_preset_over_rendered_tree() {
    let doc = Document::from_json(WIRE_DESK).expect("tree should parse");
    let advisories = scan(&Preset::Banking.rules(), &doc.text());

    insta::assert_snapshot!(render(&advisories), @r"
    warning FRAUD-001 Transaction type 'Transfer' should include fraud screening
    error FRAUD-002 International transfers must include AML/sanctions screening
    info TXN-001 Consider adding rollback/compensation logic for transaction integrity
    warning AUDIT-001 Critical operation 'Transfer' should have audit logging
    warning AUDIT-001 Critical operation 'Approve' should have audit logging
    ");
}

#[test]
fn none_preset_is_silent() {
    let doc = Document::from_json(WIRE_DESK).expect("tree should parse");
    assert!(scan(&Preset::None.rules(), &doc.text()).is_empty());
}

#[test]
fn source_text_takes_precedence() {
    let doc = Document {
        source: Some("Process Payroll { Actors: [Clerk] - Clerk Update DO_Payroll }".to_string()),
        ..Document::default()
    };
    let codes: Vec<String> = scan(&Preset::All.rules(), &doc.text())
        .into_iter()
        .map(|f| f.code)
        .collect();
    assert_eq!(codes, vec!["SOX-002", "AUDIT-001"]);
}
