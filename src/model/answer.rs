use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The accumulated answers of a session, keyed by field id.
pub type FormData = AHashMap<String, AnswerValue>;

/// A single submitted answer.
///
/// Choice fields with multiple selections (checkboxes) submit a `List`; every other
/// field submits a scalar. The wire form is plain JSON, so the variants are untagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl AnswerValue {
    /// An answer that can never satisfy a condition: missing, `null` or the empty string.
    pub fn is_blank(&self) -> bool {
        match self {
            AnswerValue::Null => true,
            AnswerValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// String coercion. Lists join their elements with `,`.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Numeric coercion. Blank text counts as zero, anything unparsable is `NaN`.
    pub fn to_number(&self) -> f64 {
        match self {
            AnswerValue::Null => 0.0,
            AnswerValue::Bool(true) => 1.0,
            AnswerValue::Bool(false) => 0.0,
            AnswerValue::Number(n) => *n,
            AnswerValue::Text(s) => parse_number(s),
            AnswerValue::List(items) => parse_number(&items.join(",")),
        }
    }

    /// The selected items, when the answer is a multi-select.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            AnswerValue::List(items) => Some(items),
            _ => None,
        }
    }
}

/// Only `Infinity` is spelled out; `inf`, `nan` and friends are not numbers.
pub(crate) fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if unsigned == "Infinity" {
        return if trimmed.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    if unsigned
        .chars()
        .any(|c| c.is_alphabetic() && !matches!(c, 'e' | 'E'))
    {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

// Integral values print without a fraction while they are exactly representable.
const MAX_INTEGRAL_DISPLAY: f64 = 1e15;

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Null => write!(f, "null"),
            AnswerValue::Bool(b) => write!(f, "{}", b),
            AnswerValue::Number(n) if n.is_nan() => write!(f, "NaN"),
            AnswerValue::Number(n) if n.is_infinite() => {
                write!(f, "{}Infinity", if *n < 0.0 { "-" } else { "" })
            }
            AnswerValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < MAX_INTEGRAL_DISPLAY {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            AnswerValue::Text(s) => write!(f, "{}", s),
            AnswerValue::List(items) => write!(f, "{}", items.join(",")),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::Text(value)
    }
}

impl From<f64> for AnswerValue {
    fn from(value: f64) -> Self {
        AnswerValue::Number(value)
    }
}

impl From<bool> for AnswerValue {
    fn from(value: bool) -> Self {
        AnswerValue::Bool(value)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(value: Vec<String>) -> Self {
        AnswerValue::List(value)
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(value: Vec<&str>) -> Self {
        AnswerValue::List(value.into_iter().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values() {
        assert!(AnswerValue::Null.is_blank());
        assert!(AnswerValue::from("").is_blank());
        assert!(!AnswerValue::from(" ").is_blank());
        assert!(!AnswerValue::List(vec![]).is_blank());
        assert!(!AnswerValue::Number(0.0).is_blank());
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(AnswerValue::from(" 42 ").to_number(), 42.0);
        assert_eq!(AnswerValue::from("").to_number(), 0.0);
        assert!(AnswerValue::from("abc").to_number().is_nan());
        assert_eq!(AnswerValue::from(vec!["7"]).to_number(), 7.0);
        assert!(AnswerValue::from(vec!["1", "2"]).to_number().is_nan());
    }

    #[test]
    fn spelled_out_numbers() {
        for raw in ["inf", "INF", "infinity", "-inf", "nan", "NaN", "1e5x"] {
            assert!(parse_number(raw).is_nan(), "{raw} should not be a number");
        }
        assert_eq!(parse_number("Infinity"), f64::INFINITY);
        assert_eq!(parse_number("+Infinity"), f64::INFINITY);
        assert_eq!(parse_number("-Infinity"), f64::NEG_INFINITY);
        assert_eq!(parse_number("1e3"), 1000.0);
        assert_eq!(parse_number("-2.5E1"), -25.0);
    }

    #[test]
    fn text_coercion() {
        assert_eq!(AnswerValue::Number(30.0).to_text(), "30");
        assert_eq!(AnswerValue::Number(2.5).to_text(), "2.5");
        assert_eq!(AnswerValue::Number(-0.0).to_text(), "0");
        assert_eq!(AnswerValue::Number(1e20).to_text(), "100000000000000000000");
        assert_eq!(AnswerValue::Number(f64::INFINITY).to_text(), "Infinity");
        assert_eq!(AnswerValue::Number(f64::NEG_INFINITY).to_text(), "-Infinity");
        assert_eq!(AnswerValue::from(vec!["a", "b"]).to_text(), "a,b");
    }

    #[test]
    fn untagged_wire_shape() {
        let data: FormData =
            serde_json::from_str(r#"{"a": "x", "b": ["1", "2"], "c": 3, "d": null, "e": true}"#)
                .unwrap();
        assert_eq!(data["a"], AnswerValue::from("x"));
        assert_eq!(data["b"], AnswerValue::from(vec!["1", "2"]));
        assert_eq!(data["c"], AnswerValue::Number(3.0));
        assert_eq!(data["d"], AnswerValue::Null);
        assert_eq!(data["e"], AnswerValue::Bool(true));
    }
}
