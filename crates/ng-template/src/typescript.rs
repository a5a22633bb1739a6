//! TypeScript model classes.

use crate::rule::{InputTag, PropertyRule};

/// Checkboxes map to `boolean`, number inputs to `number`, everything else (dates included) to
/// `string`.
pub fn ts_type(tag: InputTag) -> &'static str {
    match tag {
        InputTag::Checkbox => "boolean",
        InputTag::InputNumber => "number",
        _ => "string",
    }
}

/// Emits `export class <name>` with one constructor parameter property per rule.
pub fn generate(class_name: &str, properties: &[PropertyRule]) -> String {
    let mut members = String::new();
    for property in properties {
        members.push_str(&format!(
            "     public {}: {},\n",
            property.name,
            ts_type(property.input_type)
        ));
    }
    let members = members.trim_end_matches([',', '\n']);

    format!("export class {class_name} {{\n  constructor(\n{members}\n) {{ }}\n}}")
}
