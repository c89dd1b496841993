//! Tests for condition evaluation against submitted answers.
mod common;
use common::*;
use plan_simulator::prelude::*;

fn check(operator: Operator, expected: impl Into<ConditionValue>, actual: AnswerValue) -> bool {
    let condition = Condition::new("field", operator, expected);
    let data = answers([("field", actual)]);
    evaluate(&condition, &data, &[])
}

#[test]
fn test_blank_answers_never_match() {
    let operators = [
        Operator::Equals,
        Operator::NotEquals,
        Operator::Contains,
        Operator::GreaterThan,
        Operator::LessThan,
        Operator::Selected,
        Operator::NotSelected,
        Operator::Unknown,
    ];
    for operator in operators {
        assert!(!check(operator, "X", AnswerValue::Null), "{} on null", operator);
        assert!(!check(operator, "X", AnswerValue::from("")), "{} on empty", operator);

        let condition = Condition::new("missing", operator, "X");
        assert!(!evaluate(&condition, &FormData::new(), &[]), "{} on missing", operator);
    }
}

#[test]
fn test_equality() {
    assert!(check(Operator::Equals, "X", AnswerValue::from("X")));
    assert!(!check(Operator::NotEquals, "X", AnswerValue::from("X")));
    assert!(check(Operator::NotEquals, "X", AnswerValue::from("Y")));
    // String coercion of numbers
    assert!(check(Operator::Equals, "30", AnswerValue::Number(30.0)));
    assert!(check(Operator::Equals, "true", AnswerValue::Bool(true)));
}

#[test]
fn test_contains_is_case_insensitive() {
    assert!(check(Operator::Contains, "familia", AnswerValue::from("Plano FAMILIAR")));
    assert!(!check(Operator::Contains, "empresa", AnswerValue::from("Plano Familiar")));
}

#[test]
fn test_numeric_comparisons() {
    assert!(check(Operator::GreaterThan, "18", AnswerValue::from("35")));
    assert!(!check(Operator::GreaterThan, "18", AnswerValue::from("18")));
    assert!(check(Operator::LessThan, "60", AnswerValue::Number(35.0)));
    assert!(!check(Operator::GreaterThan, "18", AnswerValue::from("trinta")));
    assert!(!check(Operator::LessThan, "18", AnswerValue::from("trinta")));
    assert!(!check(Operator::LessThan, "abc", AnswerValue::from("5")));
}

#[test]
fn test_spelled_out_infinity_is_not_numeric() {
    assert!(!check(Operator::GreaterThan, "18", AnswerValue::from("inf")));
    assert!(!check(Operator::GreaterThan, "18", AnswerValue::from("INFINITY")));
    assert!(!check(Operator::LessThan, "18", AnswerValue::from("-inf")));
    assert!(!check(Operator::LessThan, "18", AnswerValue::from("nan")));
    assert!(check(Operator::GreaterThan, "18", AnswerValue::from("Infinity")));
    assert!(check(Operator::GreaterThan, "18", AnswerValue::from("2e1")));
}

#[test]
fn test_large_numbers_compare_as_text() {
    assert!(check(
        Operator::Equals,
        "100000000000000000000",
        AnswerValue::Number(1e20)
    ));
    assert!(check(Operator::Equals, "12345", AnswerValue::Number(12345.0)));
}

#[test]
fn test_numeric_expected_values_from_json() {
    let condition: Condition =
        serde_json::from_str(r#"{"field": "field", "operator": "greater_than", "value": 18}"#)
            .unwrap();
    assert_eq!(condition.value, ConditionValue::from("18"));
    assert!(evaluate(&condition, &answers([("field", AnswerValue::from("30"))]), &[]));

    let condition: Condition =
        serde_json::from_str(r#"{"field": "field", "operator": "equals", "value": true}"#).unwrap();
    assert!(evaluate(&condition, &answers([("field", AnswerValue::Bool(true))]), &[]));

    let condition: Condition =
        serde_json::from_str(r#"{"field": "field", "operator": "selected", "value": ["a", 2]}"#)
            .unwrap();
    assert_eq!(condition.value, ConditionValue::from(vec!["a", "2"]));
}

#[test]
fn test_incomplete_conditions_never_match() {
    let data = answers([("field", AnswerValue::from("X")), ("", AnswerValue::from("X"))]);
    let fields = vec![FormField::new("field", FieldType::Text, "")];

    let shapes = [
        r#"{"operator": "not_equals", "value": "Y"}"#,
        r#"{"field": "field", "value": "X"}"#,
        r#"{"field": "field", "operator": "not_equals"}"#,
        r#"{"field": "field", "operator": "not_equals", "value": null}"#,
        r#"{"field": "field", "operator": "not_selected", "value": {"any": "thing"}}"#,
        r#"{"field": "field", "operator": "not_selected", "value": [["nested"]]}"#,
    ];
    for shape in shapes {
        let condition: Condition = serde_json::from_str(shape).unwrap();
        assert!(!evaluate(&condition, &data, &fields), "{} should not match", shape);
    }
}

#[test]
fn test_selected_with_list_answer() {
    let picked = AnswerValue::from(vec!["a", "b"]);
    assert!(check(Operator::Selected, "a", picked.clone()));
    assert!(!check(Operator::NotSelected, "a", picked.clone()));
    assert!(!check(Operator::Selected, "c", picked.clone()));
    assert!(check(Operator::NotSelected, "c", picked.clone()));
    assert!(check(Operator::Selected, vec!["c", "b"], picked));
}

#[test]
fn test_selected_with_scalar_answer() {
    assert!(check(Operator::Selected, "Dental", AnswerValue::from("Dental")));
    assert!(!check(Operator::Selected, "Dental", AnswerValue::from("Exames")));
    assert!(check(Operator::NotSelected, "Dental", AnswerValue::from("Exames")));
}

#[test]
fn test_unknown_operator_from_json() {
    let condition: Condition =
        serde_json::from_str(r#"{"field": "field", "operator": "matches_regex", "value": "X"}"#)
            .unwrap();
    assert_eq!(condition.operator, Operator::Unknown);
    assert!(!evaluate(&condition, &answers([("field", AnswerValue::from("X"))]), &[]));
}

#[test]
fn test_label_fallback() {
    let fields = vec![
        FormField::new("plan_type", FieldType::Radio, "Tipo de plano")
            .with_options(["Individual", "Familiar"]),
    ];
    let data = answers([("plan_type", AnswerValue::from("Familiar"))]);

    let by_label = Condition::new("Tipo de plano", Operator::Equals, "Familiar");
    assert!(evaluate(&by_label, &data, &fields));

    // Without the step's fields the label cannot be resolved
    assert!(!evaluate(&by_label, &data, &[]));
}

#[test]
fn test_evaluation_is_repeatable() {
    let fields = vec![FormField::new("age", FieldType::Text, "Idade")];
    let index = FieldIndex::new(&fields);
    let data = answers([("age", AnswerValue::from("42"))]);
    let evaluator = ConditionEvaluator::new(&index, &data);
    let condition = Condition::new("Idade", Operator::GreaterThan, "40");

    let first = evaluator.evaluate(&condition);
    for _ in 0..5 {
        assert_eq!(evaluator.evaluate(&condition), first);
    }
    assert!(first);
}
