use super::id::flexible_ids;
use super::{FormField, NavigationRule};
use serde::{Deserialize, Serialize};

/// One page of the form.
///
/// Step numbers are unique within a flow but need not be contiguous; the implicit
/// successor of a step is the lowest step number above it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormStep {
    pub step_number: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FormField>,
    #[serde(default)]
    pub navigation_rules: Vec<NavigationRule>,
    /// Admin-curated plans shown when the flow completes on this step.
    #[serde(default, deserialize_with = "flexible_ids")]
    pub recommended_plan_ids: Vec<String>,
}

impl FormStep {
    pub fn new(step_number: u32, title: impl Into<String>) -> Self {
        Self {
            step_number,
            title: title.into(),
            description: None,
            fields: Vec::new(),
            navigation_rules: Vec::new(),
            recommended_plan_ids: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FormField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_rule(mut self, rule: NavigationRule) -> Self {
        self.navigation_rules.push(rule);
        self
    }

    pub fn with_recommended_plans<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recommended_plan_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }
}
