use super::FieldContext;
use crate::rule::PropertyRule;

/// Standalone dropdown. Always marked `required`.
pub(super) fn render(field: &FieldContext, rule: &PropertyRule) -> String {
    format!(
        concat!(
            "<form-group [width]=\"{width}\" [controlVariable]=\"{var}\" [required]=\"{required}\">\n",
            "\t<label class=\"control-label col-sm-{label_width}\" for=\"{var}\">{label}</label>\n",
            "\t<div class=\"col-sm-{control_width}\">\n",
            "\t\t<select class=\"form-control\" name=\"{field}\" id=\"{var}\" required\n",
            "\t\t\t\t[(ngModel)]=\"{model}.{field}\" #{var}=\"ngModel\"\n",
            "\t\t\t\tcode-options [codes]=\"getCode('{code}')\">\n",
            "\t\t</select>\n",
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
        model = field.model_name,
        code = rule.code_map,
    )
}

/// Parent dropdown: reloads the child codes and clears the child field on change.
pub(super) fn render_for(field: &FieldContext, rule: &PropertyRule) -> String {
    format!(
        concat!(
            "<form-group [width]=\"{width}\" [controlVariable]=\"{var}\" [required]=\"{required}\">\n",
            "\t<label class=\"control-label col-sm-{label_width}\" for=\"{var}\">{label}</label>\n",
            "\t<div class=\"col-sm-{control_width}\">\n",
            "\t\t<select class=\"form-control\" name=\"{field}\" id=\"{var}\" {validations}\n",
            "\t\t\t\t[(ngModel)]=\"{model}.{field}\" #{var}=\"ngModel\"\n",
            "\t\t\t\t(ngModelChange)=\"onDropdownChange($event, '{code_for}'); {model}.{child_field} = '';\"\n",
            "\t\t\t\tcode-options [codes]=\"getCode('{code}')\"></select>\n",
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
        code_for = rule.code_map_for,
        child_field = rule.code_map_for_field,
        code = rule.code_map,
    )
}
