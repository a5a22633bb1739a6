use super::FieldContext;

/// Text or number input; `input_type` is the literal HTML input type.
pub(super) fn render(field: &FieldContext, input_type: &str) -> String {
    format!(
        concat!(
            "<form-group [width]=\"{width}\" [controlVariable]=\"{var}\" [required]=\"{required}\">\n",
            "\t<label class=\"control-label col-sm-{label_width}\" for=\"{var}\">{label}</label>\n",
            "\t<div class=\"col-sm-{control_width}\">\n",
            "\t\t<input type=\"{input_type}\" id=\"{var}\" name=\"{field}\" {placeholder} class=\"form-control\"\n",
            "\t\t\t   #{var}=\"ngModel\" {validations}\n",
            "\t\t\t   [(ngModel)]=\"{model}.{field}\" {tooltip} {tooltip_enable} />\n",
            "\t</div>\n",
            "</form-group>"
        ),
        width = field.form_group_width,
        var = field.template_variable,
        required = field.required,
        label_width = field.label_width,
        label = field.label,
        control_width = field.control_width,
        input_type = input_type,
        field = field.field_name,
        placeholder = field.placeholder,
        validations = field.validations,
        model = field.model_name,
        tooltip = field.tooltip,
        tooltip_enable = field.tooltip_enable,
    )
}
