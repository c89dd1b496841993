//! Tests for catalog validation and the data sources.
mod common;
use common::*;
use plan_simulator::prelude::*;

#[test]
fn test_steps_are_sorted_and_indexed() {
    let steps = vec![
        FormStep::new(5, "Cinco"),
        FormStep::new(1, "Um"),
        FormStep::new(3, "Três"),
    ];
    let catalog = Catalog::new(steps, vec![]).unwrap();

    let numbers: Vec<u32> = catalog.steps().iter().map(|s| s.step_number).collect();
    assert_eq!(numbers, vec![1, 3, 5]);
    assert_eq!(catalog.first_step_number(), Some(1));
    assert_eq!(catalog.next_step_number(1), Some(3));
    assert_eq!(catalog.next_step_number(2), Some(3));
    assert_eq!(catalog.next_step_number(5), None);
    assert_eq!(catalog.step(3).unwrap().title, "Três");
    assert!(catalog.step(4).is_none());
}

#[test]
fn test_duplicate_step_numbers_are_rejected() {
    let steps = vec![FormStep::new(2, "A"), FormStep::new(2, "B")];
    let err = Catalog::new(steps, vec![]).unwrap_err();
    assert_eq!(err, CatalogError::DuplicateStep(2));
    assert!(err.to_string().contains('2'));
}

#[test]
fn test_step_zero_is_rejected() {
    let err = Catalog::new(vec![FormStep::new(0, "Zero")], vec![]).unwrap_err();
    assert!(matches!(err, CatalogError::InvalidStepNumber { .. }));
}

#[test]
fn test_choice_without_options_is_accepted() {
    let step = FormStep::new(1, "Um").with_field(FormField::new("x", FieldType::Radio, "X"));
    assert!(Catalog::new(vec![step], vec![]).is_ok());
}

#[test]
fn test_in_memory_source() {
    let source = InMemoryCatalogSource::new(create_family_flow(), create_plans());
    let flow = tokio_test::block_on(FlowController::load(&source)).unwrap();
    assert_eq!(flow.catalog().len(), 3);
    assert_eq!(flow.catalog().plans().len(), 4);
    assert_eq!(flow.state().current_step, 1);
}

#[test]
fn test_json_source_reads_wire_format() {
    let source = JsonCatalogSource::new(data_path("steps.json"), data_path("plans.json"));
    let catalog = tokio_test::block_on(Catalog::load(&source)).unwrap();

    let numbers: Vec<u32> = catalog.steps().iter().map(|s| s.step_number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 5]);

    let first = catalog.step(1).unwrap();
    assert_eq!(first.fields[0].field_type, FieldType::Heading);
    assert_eq!(first.fields[0].heading_level, Some(2));
    assert_eq!(first.navigation_rules[0].id, "11");
    assert_eq!(first.navigation_rules[0].priority, 10);

    let plan = &catalog.plans()[1];
    assert_eq!(plan.id, "2");
    assert_eq!(plan.monthly_price, 349);
    assert!(plan.is_recommended);
    assert_eq!(plan.target_price_range, "medio");
}

#[test]
fn test_missing_file_is_a_fetch_error() {
    let source = JsonCatalogSource::new(data_path("nope.json"), data_path("plans.json"));
    let err = tokio_test::block_on(Catalog::load(&source)).unwrap_err();
    match err {
        LoadError::Fetch(DataFetchError::Io { origin, .. }) => {
            assert!(origin.ends_with("nope.json"));
        }
        other => panic!("Expected an Io fetch error, got {:?}", other),
    }
}

#[test]
fn test_malformed_file_is_a_parse_error() {
    // plans.json is an array of plans, not steps
    let source = JsonCatalogSource::new(data_path("plans.json"), data_path("plans.json"));
    let err = tokio_test::block_on(Catalog::load(&source)).unwrap_err();
    assert!(matches!(err, LoadError::Fetch(DataFetchError::Parse { .. })));
}

#[test]
fn test_broken_rules_load_and_fall_through() {
    let steps: Vec<FormStep> = serde_json::from_str(
        r#"[
            {
                "stepNumber": 1,
                "title": "Idade",
                "fields": [{"id": "age", "type": "text", "label": "Idade"}],
                "navigationRules": [
                    {"id": 1, "condition": {"operator": "equals", "value": "40"},
                     "target": {"type": "end"}, "priority": 9},
                    {"id": 2, "condition": {"field": "age", "operator": "less_than", "value": {"min": 1}},
                     "target": {"type": "end"}, "priority": 8},
                    {"id": 3, "condition": {"field": "age", "operator": "not_equals", "value": null},
                     "target": {"type": "end"}, "priority": 7},
                    {"id": 4, "target": {"type": "end"}, "priority": 6},
                    {"id": 5, "condition": {"field": "age", "operator": "greater_than", "value": 60},
                     "target": {"type": "step", "stepNumber": 3}, "priority": 1}
                ]
            },
            {"stepNumber": 2, "title": "Preferências"},
            {"stepNumber": 3, "title": "Sênior"}
        ]"#,
    )
    .expect("Broken conditions should still parse");

    let source = InMemoryCatalogSource::new(steps, vec![]);
    let mut flow = tokio_test::block_on(FlowController::load(&source)).unwrap();

    let resolution = flow
        .submit_step(answers([("age", AnswerValue::from("40"))]))
        .unwrap();
    assert_eq!(resolution.transition, Transition::NoRuleMatched);
    assert_eq!(flow.state().current_step, 2);

    flow.reset();
    let resolution = flow
        .submit_step(answers([("age", AnswerValue::Number(72.0))]))
        .unwrap();
    assert_eq!(resolution.matched.unwrap().rule_id, "5");
    assert_eq!(flow.state().current_step, 3);
}
