//! Schema to rule conversion and whole-form rendering.

use crate::descriptor::{FieldDescriptor, FieldKind, ModelSchema};
use crate::error::TemplateResult;
use crate::layout::FormGroupLayout;
use crate::rule::{InputTag, PropertyRule, ValidationType};
use crate::template::TemplateChain;
use crate::typescript;

const FORM_OPEN: &str =
    "<form #form=\"ngForm\" (submit)=\"submitForm(form)\" class=\"form-horizontal\" novalidate>\n";

const FORM_BUTTONS: &str = concat!(
    "<p>\n",
    "\t<button class=\"btn btn-primary\" type=\"submit\"\n",
    "\t\t\t[disabled]=\"form.pristine || form.invalid\">\n",
    "\t\t存檔\n",
    "\t</button>\n",
    "\t<button class=\"btn btn-warning\" (click)=\"cancel(form)\" type=\"button\">\n",
    "\t\t取消\n",
    "\t</button>\n",
    "</p>\n"
);

const ROW_OPEN: &str = "<div class=\"row\">";
const ROW_CLOSE: &str = "</div>";

pub struct ModelParser;

impl ModelParser {
    /// One rule per visible field, in declaration order.
    pub fn create_properties(schema: &ModelSchema) -> Vec<PropertyRule> {
        schema
            .fields
            .iter()
            .filter(|field| !field.hidden)
            .map(Self::create_property)
            .collect()
    }

    fn create_property(field: &FieldDescriptor) -> PropertyRule {
        let mut rule = PropertyRule::new(field.name.clone(), input_tag(field));

        if field.required || field.kind.is_implicitly_required() {
            rule.add_validation(ValidationType::Required, 0);
        }
        if let Some(length) = field.string_length {
            rule.add_validation(ValidationType::MaxLength, length.max);
            if length.min > 0 {
                rule.add_validation(ValidationType::MinLength, length.min);
            }
        }
        if let Some(range) = field.range {
            rule.add_validation(ValidationType::MinValue, range.min);
            rule.add_validation(ValidationType::MaxValue, range.max);
        }

        if let Some(display) = &field.display {
            if let Some(name) = display.name.as_deref().filter(|n| !n.is_empty()) {
                rule.display_name = name.to_string();
            }
            rule.tooltip = display.description.clone().unwrap_or_default();
            rule.prompt = display.prompt.clone().unwrap_or_default();
        }

        if let Some(dropdown) = &field.dropdown {
            rule.code_map = dropdown.code_map.clone();
            rule.parent_field_name = dropdown.parent_field_name().to_string();
        }
        if let Some(dropdown_for) = &field.dropdown_for {
            rule.code_map = dropdown_for.code_map.clone();
            rule.code_map_for = dropdown_for.code_map_for.clone();
            rule.code_map_for_field = dropdown_for
                .child_field_name
                .clone()
                .unwrap_or_else(|| dropdown_for.code_map_for.clone());
        }

        if matches!(field.kind, FieldKind::Enum | FieldKind::Flags) {
            rule.radio_options = field.options.clone();
        }

        rule
    }

    /// Renders every visible field with the standard chain, `12 / form_grid` form-groups per row,
    /// inside the form shell and its save/cancel buttons.
    pub fn create_form(schema: &ModelSchema, layout: &FormGroupLayout) -> TemplateResult<String> {
        let chain = TemplateChain::standard();
        let per_row = layout.groups_per_row();

        let mut parts: Vec<String> = Vec::new();
        let properties = Self::create_properties(schema);
        for (index, chunk) in properties.chunks(per_row).enumerate() {
            parts.push(ROW_OPEN.to_string());
            for rule in chunk {
                parts.push(chain.generate(rule, layout)?);
            }
            parts.push(ROW_CLOSE.to_string());
            tracing::trace!(model = %schema.name, row = index, fields = chunk.len(), "rendered form row");
        }

        Ok(format!(
            "{FORM_OPEN}{FORM_BUTTONS}{}\n</form>",
            parts.join("\n")
        ))
    }

    pub fn create_typescript_class(schema: &ModelSchema) -> String {
        typescript::generate(&schema.name, &Self::create_properties(schema))
    }
}

fn input_tag(field: &FieldDescriptor) -> InputTag {
    if field.kind.is_date() {
        InputTag::Date
    } else if field.dropdown.is_some() {
        InputTag::Select
    } else if field.dropdown_for.is_some() {
        InputTag::SelectFor
    } else if matches!(field.kind, FieldKind::Boolean | FieldKind::Flags) {
        InputTag::Checkbox
    } else if field.kind.is_numeric() {
        InputTag::InputNumber
    } else if field.kind == FieldKind::Enum {
        InputTag::Radio
    } else {
        InputTag::InputString
    }
}
