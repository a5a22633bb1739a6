//! Per-field rendering rules.

use crate::descriptor::EnumOption;
use std::fmt;

/// The kind of form control a field renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputTag {
    InputString,
    InputNumber,
    Date,
    Select,
    SelectFor,
    Textarea,
    Checkbox,
    Radio,
}

impl fmt::Display for InputTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputTag::InputString => "InputString",
            InputTag::InputNumber => "InputNumber",
            InputTag::Date => "Date",
            InputTag::Select => "Select",
            InputTag::SelectFor => "SelectFor",
            InputTag::Textarea => "Textarea",
            InputTag::Checkbox => "Checkbox",
            InputTag::Radio => "Radio",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationType {
    Required,
    MaxLength,
    MinLength,
    MaxValue,
    MinValue,
}

impl ValidationType {
    fn message(&self, field: &str, value: i64) -> String {
        match self {
            ValidationType::Required => format!("【{field}】必須要輸入"),
            ValidationType::MinLength => format!("【{field}】最小長度為：{value}"),
            ValidationType::MaxLength => format!("【{field}】最大長度不可超過：{value}"),
            ValidationType::MinValue => format!("【{field}】數值最小必須大於：{value}"),
            ValidationType::MaxValue => format!("【{field}】數值最大必須小於：{value}"),
        }
    }
}

/// A validation with its pre-formatted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyValidation {
    pub kind: ValidationType,
    pub value: i64,
    pub message: String,
}

/// Everything a renderer needs to know about one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRule {
    pub name: String,
    pub input_type: InputTag,
    pub display_name: String,
    /// Explicit description; empty when none was given.
    pub tooltip: String,
    pub prompt: String,
    pub code_map: String,
    pub code_map_for: String,
    pub code_map_for_field: String,
    pub parent_field_name: String,
    pub radio_options: Vec<EnumOption>,
    pub validations: Vec<PropertyValidation>,
}

impl PropertyRule {
    pub fn new(name: impl Into<String>, input_type: InputTag) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            input_type,
            tooltip: String::new(),
            prompt: String::new(),
            code_map: String::new(),
            code_map_for: String::new(),
            code_map_for_field: String::new(),
            parent_field_name: String::new(),
            radio_options: Vec::new(),
            validations: Vec::new(),
        }
    }

    /// Template reference variable (`#firstName`): the field name with only its first
    /// character lowercased, so distinct field names keep distinct variables.
    pub fn template_variable(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_lowercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn add_validation(&mut self, kind: ValidationType, value: i64) {
        self.validations.push(PropertyValidation {
            kind,
            value,
            message: kind.message(&self.name, value),
        });
    }

    pub fn is_required(&self) -> bool {
        self.validations
            .iter()
            .any(|v| v.kind == ValidationType::Required)
    }
}
