//! Dropdown value to code description.

use crate::descriptor::ModelSchema;
use crate::error::{TemplateError, TemplateResult};
use admin_core::CodeService;
use serde_json::Value;

fn text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Describes the value of dropdown field `field` in `record` using the code cache.
///
/// Empty values and codes missing from the cache yield an empty string. When the dropdown is
/// scoped by a parent category, the parent field's value is used as the parent code.
///
/// # Errors
///
/// - `TemplateError::UnknownField` if the schema has no such field, or the parent field is absent
///   from `record`.
/// - `TemplateError::MissingDropdown` if the field has no dropdown metadata.
pub fn code_value(
    code_service: &CodeService,
    schema: &ModelSchema,
    field: &str,
    record: &Value,
) -> TemplateResult<String> {
    let descriptor = schema
        .field(field)
        .ok_or_else(|| TemplateError::UnknownField(field.to_string()))?;
    let dropdown = descriptor
        .dropdown
        .as_ref()
        .ok_or_else(|| TemplateError::MissingDropdown(field.to_string()))?;

    let value = record.get(field).map(text).unwrap_or_default();
    if value.is_empty() {
        return Ok(String::new());
    }

    let parent_field = dropdown.parent_field_name();
    let parent_code = if parent_field.is_empty() {
        None
    } else {
        let parent = record
            .get(parent_field)
            .ok_or_else(|| TemplateError::UnknownField(parent_field.to_string()))?;
        Some(text(parent))
    };

    let description = code_service.get_description(&dropdown.code_map, &value, parent_code.as_deref())?;
    Ok(description.unwrap_or_default())
}
