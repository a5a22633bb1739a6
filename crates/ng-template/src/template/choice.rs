use super::FieldContext;
use crate::descriptor::EnumOption;
use crate::error::{TemplateError, TemplateResult};
use crate::rule::PropertyRule;

// Option groups always use a 3/9 label/control split.
const CHOICE_LABEL_WIDTH: u32 = 3;
const CHOICE_CONTROL_WIDTH: u32 = 9;

fn open_group(field: &FieldContext) -> String {
    format!(
        concat!(
            "<form-group [width]=\"{width}\" [controlVariable]=\"{var}\" [required]=\"{required}\">\n",
            "\t<label class=\"control-label col-sm-{label_width}\" for=\"{var}\">{label}</label>\n",
            "\t<div class=\"col-sm-{control_width}\">\n"
        ),
        width = field.form_group_width,
        var = field.template_variable,
        required = field.required,
        label_width = CHOICE_LABEL_WIDTH,
        label = field.label,
        control_width = CHOICE_CONTROL_WIDTH,
    )
}

const CLOSE_GROUP: &str = "\t</div>\n</form-group>";

fn option(field: &FieldContext, input_type: &str, name: &str, value: i64, label: &str) -> String {
    format!(
        concat!(
            "\t\t<div class=\"radio radio-inline\">\n",
            "\t\t\t<label>\n",
            "\t\t\t\t<input type=\"{input_type}\" id=\"{var}\" name=\"{name}\" value=\"{value}\" #{var}=\"ngModel\"\n",
            "\t\t\t\t\t   [(ngModel)]=\"{model}.{name}\" />{label}\n",
            "\t\t\t</label>\n",
            "\t\t</div>\n"
        ),
        input_type = input_type,
        var = field.template_variable,
        name = name,
        value = value,
        model = field.model_name,
        label = label,
    )
}

fn render_options(field: &FieldContext, options: &[EnumOption], input_type: &str, suffix_value: bool) -> String {
    let mut html = open_group(field);
    for o in options {
        let html_option = if suffix_value {
            let name = format!("{}{}", field.field_name, o.value);
            let label = format!("{}{}", o.name, o.value);
            option(field, input_type, &name, o.value, &label)
        } else {
            option(field, input_type, &field.field_name, o.value, &o.name)
        };
        html.push_str(&html_option);
    }
    html.push_str(CLOSE_GROUP);
    html
}

pub(super) fn render_radio(field: &FieldContext, rule: &PropertyRule) -> TemplateResult<String> {
    if rule.radio_options.is_empty() {
        return Err(TemplateError::MissingRadioOptions(rule.name.clone()));
    }
    Ok(render_options(field, &rule.radio_options, "radio", false))
}

/// A single checkbox, or one checkbox per option with the option value appended to the field.
pub(super) fn render_check(field: &FieldContext, rule: &PropertyRule) -> String {
    if !rule.radio_options.is_empty() {
        return render_options(field, &rule.radio_options, "checkbox", true);
    }
    format!(
        concat!(
            "<form-group [width]=\"{width}\" [controlVariable]=\"{var}\" [required]=\"{required}\">\n",
            "\t<label class=\"control-label col-sm-{label_width}\" for=\"{var}\">{label}</label>\n",
            "\t<div class=\"col-sm-{control_width}\">\n",
            "\t\t<input type=\"checkbox\" name=\"{field}\" {validations} #{var}=\"ngModel\"\n",
            "\t\t\t   [(ngModel)]=\"{model}.{field}\" />\n",
            "\t</div>\n",
            "</form-group>"
        ),
        width = field.form_group_width,
        var = field.template_variable,
        required = field.required,
        label_width = field.label_width,
        label = field.label,
        control_width = field.control_width,
        field = field.field_name,
        validations = field.validations,
        model = field.model_name,
    )
}
