use crate::model::{AnswerValue, FormData, FormField};
use ahash::AHashMap;

/// Resolves the field a condition refers to.
///
/// Conditions normally name a field by its id, but older authoring data names it by its
/// label. The index is built once per step: every field contributes its label and its id,
/// and the first field (in step order) claiming a key wins.
#[derive(Debug, Clone, Default)]
pub struct FieldIndex {
    by_key: AHashMap<String, String>,
}

impl FieldIndex {
    pub fn new(fields: &[FormField]) -> Self {
        let mut by_key = AHashMap::with_capacity(fields.len() * 2);
        for field in fields {
            if !field.label.is_empty() {
                by_key
                    .entry(field.label.clone())
                    .or_insert_with(|| field.id.clone());
            }
            by_key
                .entry(field.id.clone())
                .or_insert_with(|| field.id.clone());
        }
        Self { by_key }
    }

    /// The id of the field registered under `key`, by label or by id.
    pub fn field_id(&self, key: &str) -> Option<&str> {
        self.by_key.get(key).map(String::as_str)
    }

    /// Looks up the answer for `key`: directly first, then through the field it names.
    pub fn resolve<'d>(&self, key: &str, form_data: &'d FormData) -> Option<&'d AnswerValue> {
        if let Some(value) = form_data.get(key) {
            return Some(value);
        }
        self.field_id(key).and_then(|id| form_data.get(id))
    }
}
