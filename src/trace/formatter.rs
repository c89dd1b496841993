use crate::model::{AnswerValue, Condition};

/// Formats rule matches into human-readable explanations.
pub struct TraceFormatter;

impl TraceFormatter {
    /// Explains a condition against the answer it was evaluated with,
    /// e.g. `planType (was Familiar) equals Familiar`.
    pub fn format_condition(condition: &Condition, actual: Option<&AnswerValue>) -> String {
        format!(
            "{} (was {}) {} {}",
            condition.field,
            Self::format_value(actual),
            condition.operator,
            condition.value
        )
    }

    fn format_value(value: Option<&AnswerValue>) -> String {
        match value {
            None => "unanswered".to_string(),
            Some(AnswerValue::List(items)) => format!("[{}]", items.join(", ")),
            Some(AnswerValue::Text(s)) if s.is_empty() => "empty".to_string(),
            Some(other) => other.to_string(),
        }
    }
}
