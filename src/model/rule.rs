use super::id::flexible_id;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Comparison applied between a field's answer and a condition's expected value.
///
/// Operators this crate does not know deserialize as `Unknown` and never match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Equals,
    NotEquals,
    Contains,
    GreaterThan,
    LessThan,
    Selected,
    NotSelected,
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operator::Equals => "equals",
            Operator::NotEquals => "not_equals",
            Operator::Contains => "contains",
            Operator::GreaterThan => "greater_than",
            Operator::LessThan => "less_than",
            Operator::Selected => "selected",
            Operator::NotSelected => "not_selected",
            Operator::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// The expected side of a condition: one value or a set of values.
///
/// Authored values may be any JSON scalar; numbers and booleans are kept as their text.
/// Anything else (null, objects, nested arrays) becomes `Malformed`, which never matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConditionValue {
    One(String),
    Many(Vec<String>),
    #[default]
    Malformed,
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for ConditionValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        let value = match &raw {
            Value::Array(items) => items
                .iter()
                .map(scalar_text)
                .collect::<Option<Vec<_>>>()
                .map_or(ConditionValue::Malformed, ConditionValue::Many),
            other => scalar_text(other).map_or(ConditionValue::Malformed, ConditionValue::One),
        };
        Ok(value)
    }
}

impl ConditionValue {
    /// Every expected value, for membership tests.
    pub fn candidates(&self) -> &[String] {
        match self {
            ConditionValue::One(value) => std::slice::from_ref(value),
            ConditionValue::Many(values) => values,
            ConditionValue::Malformed => &[],
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, ConditionValue::Malformed)
    }

    /// String coercion. A set joins its elements with `,`.
    pub fn to_text(&self) -> String {
        match self {
            ConditionValue::One(value) => value.clone(),
            ConditionValue::Many(values) => values.join(","),
            ConditionValue::Malformed => String::new(),
        }
    }
}

impl From<&str> for ConditionValue {
    fn from(value: &str) -> Self {
        ConditionValue::One(value.to_string())
    }
}

impl From<Vec<&str>> for ConditionValue {
    fn from(values: Vec<&str>) -> Self {
        ConditionValue::Many(values.into_iter().map(str::to_string).collect())
    }
}

impl fmt::Display for ConditionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionValue::One(value) => write!(f, "{}", value),
            ConditionValue::Many(values) => write!(f, "[{}]", values.join(", ")),
            ConditionValue::Malformed => write!(f, "(malformed)"),
        }
    }
}

/// `field <operator> value`, where `field` names a field by id or, for older data, by label.
///
/// Every part is optional on the wire. A condition missing any of them parses and
/// evaluates to false.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub operator: Operator,
    #[serde(default)]
    pub value: ConditionValue,
}

impl Condition {
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<ConditionValue>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }
}

/// Where a matching rule sends the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Target {
    Step {
        #[serde(default)]
        step_number: Option<u32>,
    },
    End {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    ExternalUrl {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl Target {
    pub fn step(step_number: u32) -> Self {
        Target::Step {
            step_number: Some(step_number),
        }
    }

    pub fn end() -> Self {
        Target::End { message: None }
    }
}

/// A prioritized branch attached to a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationRule {
    #[serde(deserialize_with = "flexible_id")]
    pub id: String,
    #[serde(default, deserialize_with = "flexible_id")]
    pub step_id: String,
    #[serde(default)]
    pub condition: Condition,
    pub target: Target,
    /// Higher priorities are evaluated first.
    #[serde(default)]
    pub priority: i32,
}

impl NavigationRule {
    pub fn new(id: impl Into<String>, condition: Condition, target: Target, priority: i32) -> Self {
        Self {
            id: id.into(),
            step_id: String::new(),
            condition,
            target,
            priority,
        }
    }
}
