use crate::model::{AnswerValue, Condition, ConditionValue, FormData, FormField, Operator};
use crate::model::answer::parse_number;
use tracing::trace;

mod index;

pub use index::FieldIndex;

/// Evaluates navigation conditions against a session's answers.
///
/// Evaluation never fails. A condition whose field has no answer (missing, `null` or
/// empty text) is false for every operator, `not_equals` and `not_selected` included.
/// So is an unknown operator, a condition with no field and one whose expected value
/// could not be read. Broken authoring data therefore falls through to the next rule
/// instead of aborting the flow.
pub struct ConditionEvaluator<'a> {
    index: &'a FieldIndex,
    form_data: &'a FormData,
}

impl<'a> ConditionEvaluator<'a> {
    pub fn new(index: &'a FieldIndex, form_data: &'a FormData) -> Self {
        Self { index, form_data }
    }

    /// The answer a condition on `field` would be evaluated against.
    pub fn resolve(&self, field: &str) -> Option<&'a AnswerValue> {
        self.index.resolve(field, self.form_data)
    }

    pub fn evaluate(&self, condition: &Condition) -> bool {
        if condition.field.is_empty() || condition.value.is_malformed() {
            trace!(field = %condition.field, "condition is incomplete");
            return false;
        }
        let Some(actual) = self.resolve(&condition.field).filter(|v| !v.is_blank()) else {
            trace!(field = %condition.field, "condition field has no answer");
            return false;
        };
        let expected = &condition.value;

        let outcome = match condition.operator {
            Operator::Equals => actual.to_text() == expected.to_text(),
            Operator::NotEquals => actual.to_text() != expected.to_text(),
            Operator::Contains => actual
                .to_text()
                .to_lowercase()
                .contains(&expected.to_text().to_lowercase()),
            Operator::GreaterThan => compare(actual, expected, |a, b| a > b),
            Operator::LessThan => compare(actual, expected, |a, b| a < b),
            Operator::Selected => is_selected(actual, expected),
            Operator::NotSelected => !is_selected(actual, expected),
            Operator::Unknown => false,
        };

        trace!(
            field = %condition.field,
            operator = %condition.operator,
            actual = %actual,
            expected = %expected,
            outcome,
            "evaluated condition"
        );
        outcome
    }
}

/// Evaluates a single condition, resolving label references through `fields`.
///
/// Builds a throwaway [`FieldIndex`]; when evaluating many conditions for the same step,
/// build the index once and use [`ConditionEvaluator`] instead.
pub fn evaluate(condition: &Condition, form_data: &FormData, fields: &[FormField]) -> bool {
    let index = FieldIndex::new(fields);
    ConditionEvaluator::new(&index, form_data).evaluate(condition)
}

// Comparisons involving NaN are false, which covers non-numeric input on either side.
fn compare<F>(actual: &AnswerValue, expected: &ConditionValue, f: F) -> bool
where
    F: Fn(f64, f64) -> bool,
{
    f(actual.to_number(), parse_number(&expected.to_text()))
}

fn is_selected(actual: &AnswerValue, expected: &ConditionValue) -> bool {
    match actual.as_list() {
        Some(items) => expected
            .candidates()
            .iter()
            .any(|candidate| items.contains(candidate)),
        None => {
            let text = actual.to_text();
            expected.candidates().iter().any(|candidate| *candidate == text)
        }
    }
}
