//! Integration tests for the build -> edit -> validate -> export pipeline.
//!
//! Covers:
//! 1. Ordering and re-indexing through a canvas
//! 2. Properties editing feeding validation
//! 3. JSON round trips and static HTML export

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use formforge_core::FormForgeError;
use formforge_forms::{
    from_json, to_json, to_static_html, Canvas, DocumentChange, EditSession, ElementTemplate,
    ElementType, Evaluator, FieldValue, FormDocument, RuleKind,
};

// ============================================================================
// Shared helpers
// ============================================================================

fn labels(doc: &FormDocument) -> Vec<String> {
    doc.elements().iter().map(|el| el.label.clone()).collect()
}

fn assert_indices(doc: &FormDocument) {
    for (i, el) in doc.elements().iter().enumerate() {
        assert_eq!(el.index(), i);
    }
}

/// A contact form: required name, email with an email rule, optional age 18..=99.
fn contact_form() -> (FormDocument, [String; 3]) {
    let mut doc = FormDocument::new("Contact");
    doc.add(ElementTemplate::new(ElementType::Heading, "Contact us"));
    let name = doc.add(ElementTemplate::new(ElementType::SingleLine, "Name")).id().to_string();
    let email = doc.add(ElementTemplate::new(ElementType::SingleLine, "Email")).id().to_string();
    let age = doc.add(ElementTemplate::new(ElementType::Number, "Age")).id().to_string();

    let mut session = EditSession::open(&doc, &name).unwrap();
    session.set_required(true);
    let min = session.add_rule(RuleKind::MinLength).unwrap().clone();
    assert_eq!(min.value, Some(1.0));
    session.commit(&mut doc);

    let mut session = EditSession::open(&doc, &email).unwrap();
    session.add_rule(RuleKind::Email).unwrap();
    session.set_rule_message(0, "").unwrap();
    session.commit(&mut doc);

    let mut session = EditSession::open(&doc, &age).unwrap();
    session.add_rule(RuleKind::Min).unwrap();
    session.set_rule_value(0, 18.0).unwrap();
    session.add_rule(RuleKind::Max).unwrap();
    session.set_rule_value(1, 99.0).unwrap();
    session.set_rule_message(1, "").unwrap();
    session.commit(&mut doc);

    (doc, [name, email, age])
}

// ============================================================================
// 1. Ordering
// ============================================================================

#[test]
fn test_remove_middle_then_round_trip_json() {
    let mut doc = FormDocument::new("ABC");
    doc.add(ElementTemplate::new(ElementType::SingleLine, "A"));
    let b = doc.add(ElementTemplate::new(ElementType::SingleLine, "B")).id().to_string();
    doc.add(ElementTemplate::new(ElementType::SingleLine, "C"));

    doc.remove(&b);
    assert_eq!(labels(&doc), vec!["A", "C"]);
    assert_indices(&doc);

    let json = to_json(&doc).unwrap();
    let parsed = from_json(&json).unwrap();
    assert_eq!(parsed, doc);
    assert_eq!(parsed.elements()[1].index(), 1);
}

#[test]
fn test_indices_hold_through_a_mixed_edit_sequence() {
    let mut canvas = Canvas::default();
    for ty in [
        ElementType::Heading,
        ElementType::SingleLine,
        ElementType::Dropdown,
        ElementType::Date,
        ElementType::Separator,
        ElementType::Switch,
    ] {
        canvas.drop_element(ty.template());
        assert_indices(canvas.document());
    }

    let ops: [(usize, usize); 5] = [(0, 5), (4, 1), (2, 2), (5, 0), (3, 6)];
    for (from, to) in ops {
        canvas.move_element(from, to);
        assert_indices(canvas.document());
    }

    let second = canvas.document().elements()[1].id().to_string();
    canvas.remove(&second);
    assert_indices(canvas.document());
    assert_eq!(canvas.document().len(), 5);
}

#[test]
fn test_drag_reorder_publishes_each_committed_move() {
    let mut canvas = Canvas::default();
    for label in ["A", "B", "C", "D"] {
        canvas.drop_element(ElementTemplate::new(ElementType::SingleLine, label));
    }

    let moves = Arc::new(AtomicUsize::new(0));
    let counter = moves.clone();
    canvas.changes().connect(
        "moves",
        Arc::new(move |change: &DocumentChange| {
            if matches!(change, DocumentChange::Moved { .. }) {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        }),
    );

    let mut drag = canvas.begin_drag(3).unwrap();
    // Above the midpoint of each element on the way up.
    canvas.hover(&mut drag, 2, 10.0, 50.0);
    canvas.hover(&mut drag, 1, 10.0, 50.0);
    // Below the midpoint of the first: no move yet.
    canvas.hover(&mut drag, 0, 40.0, 50.0);

    assert_eq!(drag.index(), 1);
    assert_eq!(moves.load(Ordering::SeqCst), 2);
    assert_eq!(labels(canvas.document()), vec!["A", "D", "B", "C"]);
}

// ============================================================================
// 2. Validation
// ============================================================================

#[test]
fn test_submission_reports_every_failing_field() {
    let (doc, [name, email, age]) = contact_form();
    let mut values = HashMap::new();
    values.insert(email.clone(), FieldValue::from("someone@"));
    values.insert(age.clone(), FieldValue::from(120_i64));

    let errors = Evaluator::new().validate_submission(&doc, &values);
    assert_eq!(errors.len(), 3);
    assert_eq!(errors.get(&name), Some("This field is required"));
    assert_eq!(errors.get(&email), Some("Please enter a valid email address"));
    assert_eq!(errors.get(&age), Some("Maximum value is 99"));
}

#[test]
fn test_valid_submission_passes() {
    let (doc, [name, email, age]) = contact_form();
    let mut values = HashMap::new();
    values.insert(name, FieldValue::from("Ada"));
    values.insert(email, FieldValue::from("ada@example.com"));
    values.insert(age, FieldValue::from(36_i64));

    let errors = Evaluator::new().validate_submission(&doc, &values);
    assert!(errors.is_empty());
    assert!(errors.into_result().is_ok());
}

#[test]
fn test_rule_message_from_editor_is_used() {
    let (doc, [_, _, age]) = contact_form();
    let el = doc.get(&age).unwrap();
    let result = Evaluator::new().evaluate(el, &FieldValue::from(3_i64));
    assert_eq!(result.message.as_deref(), Some("Invalid min"));
}

#[test]
fn test_custom_check() {
    let (doc, [name, ..]) = contact_form();
    let mut doc = doc;
    let mut session = EditSession::open(&doc, &name).unwrap();
    session.add_rule(RuleKind::Custom).unwrap();
    session.set_rule_message(1, "Name is taken").unwrap();
    session.commit(&mut doc);

    let mut evaluator = Evaluator::new();
    evaluator.register_custom(name.clone(), |value| value.as_text() != Some("root"));

    let el = doc.get(&name).unwrap();
    assert_eq!(
        evaluator.evaluate(el, &FieldValue::from("root")).message.as_deref(),
        Some("Name is taken")
    );
    assert!(evaluator.evaluate(el, &FieldValue::from("ada")).valid);
}

// ============================================================================
// 3. Export
// ============================================================================

#[test]
fn test_heading_survives_html_export() {
    let mut doc = FormDocument::new("Survey");
    doc.add(ElementTemplate::new(ElementType::Heading, "Survey"));
    let html = to_static_html(&doc);
    assert!(html.contains("<h2"));
    assert!(html.contains("Survey"));
}

#[test]
fn test_html_export_of_contact_form() {
    let (doc, [name, ..]) = contact_form();
    let html = to_static_html(&doc);
    assert!(html.contains(&format!(r#"id="{name}""#)));
    assert!(html.contains(r#"<span class="required">*</span>"#));
    assert!(html.contains(r#"type="number""#));
    assert_eq!(html.matches("<form").count(), 1);
}

#[test]
fn test_json_round_trip_keeps_rules_and_options() {
    let mut doc = FormDocument::new("Prefs");
    let id = doc.add(ElementType::Checklist.template()).id().to_string();
    let mut session = EditSession::open(&doc, &id).unwrap();
    session.add_option().unwrap();
    session.add_rule(RuleKind::Required).unwrap();
    session.commit(&mut doc);

    let parsed = from_json(&to_json(&doc).unwrap()).unwrap();
    let el = parsed.get(&id).unwrap();
    assert_eq!(el.options.as_ref().map(Vec::len), Some(2));
    assert_eq!(el.validation[0].kind, RuleKind::Required);
}

#[test]
fn test_import_rejects_duplicate_element_ids() {
    let json = r#"{
      "title": "Twins",
      "elements": [
        {"id": "x", "type": "single-line", "label": "A", "index": 0},
        {"id": "x", "type": "single-line", "label": "B", "index": 1}
      ],
      "createdAt": "2024-05-01T10:00:00Z",
      "updatedAt": "2024-05-01T10:00:00Z"
    }"#;
    let err = from_json(json).unwrap_err();
    assert!(matches!(err, FormForgeError::Serialization(_)));
}

#[test]
fn test_ids_keep_increasing_after_import() {
    let mut doc = FormDocument::new("Reloaded");
    for _ in 0..3 {
        doc.add(ElementType::Checkbox.template());
    }
    let mut reloaded = from_json(&to_json(&doc).unwrap()).unwrap();
    let first = reloaded.elements()[0].id().to_string();
    assert_eq!(reloaded.remove(&first).map(|el| el.label), Some("Checkbox".to_string()));
    assert!(reloaded.remove(&first).is_none());

    let stamp = |id: &str| id.rsplit_once('-').unwrap().1.parse::<i64>().unwrap();
    let newest = reloaded.elements().iter().map(|el| stamp(el.id())).max().unwrap();
    let added = reloaded.add(ElementType::Checkbox.template()).id().to_string();
    assert!(stamp(&added) > newest);
}
