//! Depth-first traversal of a [`Document`].
//!
//! [`walk`] drives a [`Visit`] implementation through every node in document
//! order. Within a process the order is: enter, each step (validations before
//! actions), the process's direct actions, nested processes, exit.
//! End-of-document is always the last callback.

use crate::ast::{DataObject, Document, Entity, ItAsset, Item, Process, Relationship, Report, RuleDef};

/// Callbacks invoked by [`walk`]. Every method defaults to a no-op.
#[allow(unused_variables)]
pub trait Visit {
    /// A data object declaration.
    fn data_object(&mut self, node: &DataObject) {}
    /// An entity declaration.
    fn entity(&mut self, node: &Entity) {}
    /// An IT asset declaration.
    fn it_asset(&mut self, node: &ItAsset) {}
    /// A relationship declaration.
    fn relationship(&mut self, node: &Relationship) {}
    /// Entering a process scope.
    fn enter_process(&mut self, node: &Process) {}
    /// Leaving a process scope.
    fn exit_process(&mut self, node: &Process) {}
    /// One action line.
    fn action(&mut self, line: &str) {}
    /// One step validation line.
    fn validation(&mut self, line: &str) {}
    /// A rule declaration.
    fn rule(&mut self, node: &RuleDef) {}
    /// A report declaration.
    fn report(&mut self, node: &Report) {}
    /// End of the document.
    fn end_document(&mut self) {}
}

/// Walks `doc`, invoking `visitor` callbacks in document order.
pub fn walk<V: Visit + ?Sized>(doc: &Document, visitor: &mut V) {
    for item in &doc.items {
        match item {
            Item::DataObject(node) => visitor.data_object(node),
            Item::Entity(node) => visitor.entity(node),
            Item::ItAsset(node) => visitor.it_asset(node),
            Item::Relationship(node) => visitor.relationship(node),
            Item::Process(node) => walk_process(node, visitor),
            Item::Rule(node) => visitor.rule(node),
            Item::Report(node) => visitor.report(node),
        }
    }
    visitor.end_document();
}

fn walk_process<V: Visit + ?Sized>(process: &Process, visitor: &mut V) {
    visitor.enter_process(process);
    for step in &process.steps {
        for line in &step.validations {
            visitor.validation(line);
        }
        for line in &step.actions {
            visitor.action(line);
        }
    }
    for line in &process.actions {
        visitor.action(line);
    }
    for nested in &process.processes {
        walk_process(nested, visitor);
    }
    visitor.exit_process(process);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Trace(Vec<String>);

    impl Visit for Trace {
        fn data_object(&mut self, node: &DataObject) {
            self.0.push(format!("data_object {}", node.name));
        }
        fn entity(&mut self, node: &Entity) {
            self.0.push(format!("entity {}", node.name));
        }
        fn enter_process(&mut self, node: &Process) {
            self.0.push(format!("enter {}", node.name));
        }
        fn exit_process(&mut self, node: &Process) {
            self.0.push(format!("exit {}", node.name));
        }
        fn action(&mut self, line: &str) {
            self.0.push(format!("action {line}"));
        }
        fn validation(&mut self, line: &str) {
            self.0.push(format!("validation {line}"));
        }
        fn end_document(&mut self) {
            self.0.push("end".to_string());
        }
    }

    #[test]
    fn visits_in_document_order() {
        let doc = Document::from_json(
            r#"{ "items": [
                { "kind": "dataObject", "name": "DO_A" },
                { "kind": "process", "name": "Outer", "actors": ["X"],
                  "steps": [
                    { "name": "S1", "actions": ["- X Do1"], "validations": ["v1"] },
                    { "name": "S2", "actions": ["- X Do2"] }
                  ],
                  "actions": ["- X Do3"],
                  "processes": [ { "name": "Inner", "steps": [ { "name": "S", "actions": ["- X Do4"] } ] } ] },
                { "kind": "entity", "name": "E", "dataRef": "DO_A" }
            ] }"#,
        )
        .unwrap();

        let mut trace = Trace::default();
        walk(&doc, &mut trace);
        assert_eq!(
            trace.0,
            vec![
                "data_object DO_A",
                "enter Outer",
                "validation v1",
                "action - X Do1",
                "action - X Do2",
                "action - X Do3",
                "enter Inner",
                "action - X Do4",
                "exit Inner",
                "exit Outer",
                "entity E",
                "end",
            ]
        );
    }

    #[test]
    fn empty_document_still_ends() {
        let mut trace = Trace::default();
        walk(&Document::default(), &mut trace);
        assert_eq!(trace.0, vec!["end"]);
    }
}
