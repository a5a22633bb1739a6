use super::FieldContext;

const DATE_PATTERN: &str = r"([0-9]{2,4})\/([0-9]{1,2})\/([0-9]{1,2})";

pub(super) fn render_legacy(field: &FieldContext) -> String {
    format!(
        concat!(
            "<form-group [width]=\"{width}\" [controlVariable]=\"{var}\" [required]=\"{required}\">\n",
            "\t<label class=\"control-label col-sm-{label_width}\" for=\"{var}\">{label}</label>\n",
            "\t<div class=\"col-sm-{control_width}\">\n",
            "\t\t<div class=\"input-group\">\n",
            "\t\t\t<input id=\"{var}\" name=\"{field}\" class=\"form-control\" type=\"text\" {placeholder}\n",
            "\t\t\t\t   #{var}=\"ngModel\" pattern=\"{pattern}\" {validations}\n",
            "\t\t\t\t   [(ngModel)]=\"{model}.{field}\" (blur)=\"{model}.{field} = dateFormat({model}.{field})\" {tooltip} {tooltip_enable} />\n",
            "\t\t\t<my-datepicker [dateModel]=\"{model}.{field}\" [controlVariable]=\"{var}\" (dateModelChange)=\"{model}.{field} = $event\" class=\"input-group-btn\"></my-datepicker>\n",
            "\t\t</div>\n",
            "\t\t<validate-span [controlVariable]=\"{var}\"></validate-span>\n",
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
        placeholder = field.placeholder,
        pattern = DATE_PATTERN,
        validations = field.validations,
        model = field.model_name,
        tooltip = field.tooltip,
        tooltip_enable = field.tooltip_enable,
    )
}

pub(super) fn render_ngx(field: &FieldContext) -> String {
    format!(
        concat!(
            "<form-group [width]=\"{width}\" [controlVariable]=\"{var}\" [required]=\"{required}\">\n",
            "\t<label class=\"control-label col-sm-{label_width}\" for=\"{var}\">{label}</label>\n",
            "\t<div class=\"col-sm-{control_width}\">\n",
            "\t\t<div class=\"input-group\">\n",
            "\t\t\t<input id=\"{var}\" name=\"{field}\" class=\"form-control\" type=\"text\" {placeholder}\n",
            "\t\t\t\t   #{var}=\"ngModel\" bsDatepicker #db{field}=\"bsDatepicker\" {validations} \n",
            "\t\t\t\t   [ngModel]=\"{model}.{field}\" (ngModelChange)=\"{model}.{field} = dateFormat($event)\" {tooltip} {tooltip_enable} />\n",
            "           <span class=\"input-group-btn\">",
            "\t\t\t    <button type=\"button\" (click)=\"db{field}.toggle()\" class=\"btn btn-default\"><i class=\"glyphicon glyphicon-calendar\"></i></button>\n",
            "           </span>",
            "\t\t</div>\n",
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
        placeholder = field.placeholder,
        validations = field.validations,
        model = field.model_name,
        tooltip = field.tooltip,
        tooltip_enable = field.tooltip_enable,
    )
}
