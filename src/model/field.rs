use serde::{Deserialize, Serialize};

/// The kind of input (or display element) a field renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Radio,
    Checkbox,
    Select,
    Date,
    Tel,
    Email,
    Heading,
    Paragraph,
    Image,
}

impl FieldType {
    /// Radio, checkbox and select fields pick from a fixed list of options.
    pub fn is_choice(self) -> bool {
        matches!(self, FieldType::Radio | FieldType::Checkbox | FieldType::Select)
    }

    /// Headings, paragraphs and images carry no answer.
    pub fn is_display_only(self) -> bool {
        matches!(
            self,
            FieldType::Heading | FieldType::Paragraph | FieldType::Image
        )
    }
}

/// A question or display unit within a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub required: bool,
    /// Ignored unless the field is a choice type.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_level: Option<u8>,
}

impl FormField {
    pub fn new(id: impl Into<String>, field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            field_type,
            label: label.into(),
            required: false,
            options: Vec::new(),
            placeholder: None,
            content: None,
            image_url: None,
            heading_level: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Whether a user is expected to answer this field.
    pub fn accepts_answer(&self) -> bool {
        !self.field_type.is_display_only()
    }
}
