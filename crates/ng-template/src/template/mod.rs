//! Angular form-group renderers.
//!
//! A [`TemplateChain`] is an ordered list of [`Renderer`]s. Each renderer handles exactly one
//! [`InputTag`]; the chain hands a rule to the first renderer whose tag matches. A rule no
//! renderer claims is a wiring mistake and fails with [`TemplateError::NoHandler`].

mod choice;
mod date;
mod input;
mod select;

use crate::error::{TemplateError, TemplateResult};
use crate::layout::FormGroupLayout;
use crate::rule::{InputTag, PropertyRule, ValidationType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Renderer {
    InputString,
    InputNumber,
    /// Text box with the legacy `my-datepicker` button.
    InputDate,
    /// ngx-bootstrap `bsDatepicker`.
    InputDateNgx,
    Select,
    SelectFor,
    Radio,
    Check,
}

impl Renderer {
    pub fn tag(&self) -> InputTag {
        match self {
            Renderer::InputString => InputTag::InputString,
            Renderer::InputNumber => InputTag::InputNumber,
            Renderer::InputDate | Renderer::InputDateNgx => InputTag::Date,
            Renderer::Select => InputTag::Select,
            Renderer::SelectFor => InputTag::SelectFor,
            Renderer::Radio => InputTag::Radio,
            Renderer::Check => InputTag::Checkbox,
        }
    }

    pub fn render(&self, rule: &PropertyRule, layout: &FormGroupLayout) -> TemplateResult<String> {
        let field = FieldContext::new(*self, rule, layout);
        let html = match self {
            Renderer::InputString => input::render(&field, "text"),
            Renderer::InputNumber => input::render(&field, "number"),
            Renderer::InputDate => date::render_legacy(&field),
            Renderer::InputDateNgx => date::render_ngx(&field),
            Renderer::Select => select::render(&field, rule),
            Renderer::SelectFor => select::render_for(&field, rule),
            Renderer::Radio => choice::render_radio(&field, rule)?,
            Renderer::Check => choice::render_check(&field, rule),
        };
        Ok(html)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateChain {
    renderers: Vec<Renderer>,
}

impl TemplateChain {
    pub fn new(renderers: Vec<Renderer>) -> Self {
        Self { renderers }
    }

    /// The chain used to build whole forms.
    pub fn standard() -> Self {
        Self::new(vec![
            Renderer::InputDateNgx,
            Renderer::Select,
            Renderer::SelectFor,
            Renderer::Radio,
            Renderer::Check,
            Renderer::InputNumber,
            Renderer::InputString,
        ])
    }

    pub fn renderers(&self) -> &[Renderer] {
        &self.renderers
    }

    pub fn generate(&self, rule: &PropertyRule, layout: &FormGroupLayout) -> TemplateResult<String> {
        let renderer = self
            .renderers
            .iter()
            .find(|r| r.tag() == rule.input_type)
            .ok_or_else(|| TemplateError::NoHandler {
                property: rule.name.clone(),
                tag: rule.input_type,
            })?;
        renderer.render(rule, layout)
    }
}

/// Values substituted into every form-group template.
#[derive(Debug, Clone)]
pub(crate) struct FieldContext {
    pub template_variable: String,
    pub field_name: String,
    pub model_name: String,
    pub label: String,
    pub validations: String,
    pub tooltip: String,
    pub tooltip_enable: String,
    pub placeholder: String,
    pub required: &'static str,
    pub form_group_width: u32,
    pub label_width: u32,
    pub control_width: u32,
}

fn append(target: &mut String, value: &str) {
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(value);
}

impl FieldContext {
    fn new(renderer: Renderer, rule: &PropertyRule, layout: &FormGroupLayout) -> Self {
        let template_variable = rule.template_variable();
        let required = rule.is_required();

        let mut validations = String::new();
        let mut messages = String::new();
        if required {
            validations.push_str("required");
        }
        for validation in &rule.validations {
            let attribute = match (renderer, validation.kind) {
                (Renderer::InputNumber, ValidationType::MinValue) => "min",
                (Renderer::InputNumber, ValidationType::MaxValue) => "max",
                (Renderer::InputString, ValidationType::MinLength) => "minlength",
                (Renderer::InputString, ValidationType::MaxLength) => "maxlength",
                _ => continue,
            };
            append(&mut validations, &format!("{attribute}=\"{}\"", validation.value));
            append(&mut messages, &validation.message);
        }

        let message = if rule.tooltip.is_empty() {
            messages
        } else {
            rule.tooltip.clone()
        };
        let (tooltip, tooltip_enable) = if message.is_empty() {
            (String::new(), String::new())
        } else {
            (
                format!("tooltip=\"{message}\""),
                format!("[tooltipEnable]=\"{template_variable}.invalid\""),
            )
        };

        Self {
            field_name: rule.name.clone(),
            model_name: layout.model_name().to_string(),
            label: rule.display_name.clone(),
            validations,
            tooltip,
            tooltip_enable,
            placeholder: String::new(),
            required: if required { "true" } else { "false" },
            form_group_width: layout.form_grid(),
            label_width: layout.label_grid(),
            control_width: layout.input_grid(),
            template_variable,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::descriptor::{Dropdown, DropdownFor, EnumOption, FieldDescriptor, FieldKind, ModelSchema};
    use crate::parser::ModelParser;

    /// Mirrors the model used throughout the template tests.
    pub(crate) fn vector_schema() -> ModelSchema {
        ModelSchema::new(
            "VectorClass",
            vec![
                FieldDescriptor::new("Id", FieldKind::Integer).range(10, 20),
                FieldDescriptor::text("FirstName")
                    .max_length(30)
                    .required()
                    .display_name("名字")
                    .description("此為必須輸入的欄位，且不可以超過30個字")
                    .prompt("輸入客戶名稱..."),
                FieldDescriptor::text("LastName")
                    .length_between(5, 10)
                    .display_name("姓氏")
                    .description("輸入字數限制在 5 -10 個字"),
                FieldDescriptor::text("Code")
                    .required()
                    .max_length(4)
                    .dropdown_for(DropdownFor::new("County", "Hospital").with_child_field("ChildCode")),
                FieldDescriptor::text("ChildCode").dropdown(Dropdown::new("Hospital")),
                FieldDescriptor::new("Date", FieldKind::Date),
            ],
        )
    }

    pub(crate) fn vector_schema_2() -> ModelSchema {
        ModelSchema::new(
            "VectorClass2",
            vec![
                FieldDescriptor::new("Id", FieldKind::Integer).hidden(),
                FieldDescriptor::new("Check", FieldKind::Boolean),
                FieldDescriptor::enumeration(
                    "Radio",
                    vec![
                        EnumOption::new("Option1", 0),
                        EnumOption::new("Option2", 1),
                        EnumOption::new("Option3", 2),
                    ],
                ),
                FieldDescriptor::enumeration(
                    "PreferRadioStyle",
                    vec![
                        EnumOption::new("Option1", 1),
                        EnumOption::new("Option2", 2),
                        EnumOption::new("Option3", 3),
                    ],
                ),
            ],
        )
    }

    pub(crate) fn rule(schema: &ModelSchema, name: &str) -> PropertyRule {
        ModelParser::create_properties(schema)
            .into_iter()
            .find(|r| r.name == name)
            .expect("field exists")
    }

    fn lines(html: &str) -> Vec<&str> {
        html.split('\n').collect()
    }

    #[test]
    fn test_string_renderer_alone_cannot_render_number() {
        let id = rule(&vector_schema(), "Id");
        assert_eq!(id.input_type, InputTag::InputNumber);

        let chain = TemplateChain::new(vec![Renderer::InputString]);
        let err = chain
            .generate(&id, &FormGroupLayout::default())
            .expect_err("no number renderer");
        match err {
            TemplateError::NoHandler { property, tag } => {
                assert_eq!(property, "Id");
                assert_eq!(tag, InputTag::InputNumber);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_date_needs_date_renderer() {
        let date = rule(&vector_schema(), "Date");
        let layout = FormGroupLayout::default();

        let chain = TemplateChain::new(vec![Renderer::InputNumber, Renderer::InputString]);
        assert!(matches!(
            chain.generate(&date, &layout),
            Err(TemplateError::NoHandler { .. })
        ));

        let chain = TemplateChain::new(vec![
            Renderer::InputDate,
            Renderer::InputNumber,
            Renderer::InputString,
        ]);
        assert!(!chain.generate(&date, &layout).unwrap().is_empty());
    }

    #[test]
    fn test_textarea_has_no_renderer() {
        let textarea = PropertyRule::new("Notes", InputTag::Textarea);
        let err = TemplateChain::standard()
            .generate(&textarea, &FormGroupLayout::default())
            .expect_err("no textarea renderer");
        assert!(err.to_string().contains("Notes - Textarea"));
    }

    #[test]
    fn test_string_input_lines() {
        let first_name = rule(&vector_schema(), "FirstName");
        let html = TemplateChain::new(vec![Renderer::InputNumber, Renderer::InputString])
            .generate(&first_name, &FormGroupLayout::default())
            .unwrap();
        let lines = lines(&html);

        assert_eq!(lines.len(), 8);
        assert_eq!(
            lines[0],
            "<form-group [width]=\"4\" [controlVariable]=\"firstName\" [required]=\"true\">"
        );
        assert_eq!(
            lines[1],
            "\t<label class=\"control-label col-sm-6\" for=\"firstName\">名字</label>"
        );
        assert_eq!(lines[2], "\t<div class=\"col-sm-6\">");
        assert_eq!(
            lines[3],
            "\t\t<input type=\"text\" id=\"firstName\" name=\"FirstName\"  class=\"form-control\""
        );
        assert_eq!(lines[4], "\t\t\t   #firstName=\"ngModel\" required maxlength=\"30\"");
        assert_eq!(
            lines[5],
            "\t\t\t   [(ngModel)]=\"model.FirstName\" tooltip=\"此為必須輸入的欄位，且不可以超過30個字\" [tooltipEnable]=\"firstName.invalid\" />"
        );
        assert_eq!(lines[6], "\t</div>");
        assert_eq!(lines[7], "</form-group>");
    }

    #[test]
    fn test_string_input_not_required_min_and_max_length() {
        let last_name = rule(&vector_schema(), "LastName");
        let html = Renderer::InputString
            .render(&last_name, &FormGroupLayout::default())
            .unwrap();
        let lines = lines(&html);
        assert_eq!(
            lines[0],
            "<form-group [width]=\"4\" [controlVariable]=\"lastName\" [required]=\"false\">"
        );
        assert_eq!(
            lines[4],
            "\t\t\t   #lastName=\"ngModel\" maxlength=\"10\" minlength=\"5\""
        );
    }

    #[test]
    fn test_custom_model_layout() {
        let last_name = rule(&vector_schema(), "LastName");
        let layout = FormGroupLayout::from_form_grid("testModel", 6).unwrap();
        let html = Renderer::InputString.render(&last_name, &layout).unwrap();
        let lines = lines(&html);
        assert!(lines[0].contains("[width]=\"6\""));
        assert!(lines[1].contains("col-sm-4"));
        assert!(lines[5].contains("testModel.LastName"));
    }

    #[test]
    fn test_number_input_range_attributes() {
        let id = rule(&vector_schema(), "Id");
        let html = TemplateChain::standard()
            .generate(&id, &FormGroupLayout::default())
            .unwrap();
        let lines = lines(&html);

        assert_eq!(lines.len(), 8);
        assert!(html.contains("min=\"10\""));
        assert!(html.contains("max=\"20\""));
        assert_eq!(
            lines[3],
            "\t\t<input type=\"number\" id=\"id\" name=\"Id\"  class=\"form-control\""
        );
        assert_eq!(lines[4], "\t\t\t   #id=\"ngModel\" required min=\"10\" max=\"20\"");
        // No description: the tooltip falls back to the range messages.
        assert_eq!(
            lines[5],
            "\t\t\t   [(ngModel)]=\"model.Id\" tooltip=\"【Id】數值最小必須大於：10 【Id】數值最大必須小於：20\" [tooltipEnable]=\"id.invalid\" />"
        );
    }

    #[test]
    fn test_legacy_date_lines() {
        let date = rule(&vector_schema(), "Date");
        let html = Renderer::InputDate
            .render(&date, &FormGroupLayout::default())
            .unwrap();
        let lines = lines(&html);

        assert_eq!(lines.len(), 12);
        assert_eq!(
            lines[0],
            "<form-group [width]=\"4\" [controlVariable]=\"date\" [required]=\"true\">"
        );
        assert_eq!(lines[1], "\t<label class=\"control-label col-sm-6\" for=\"date\">Date</label>");
        assert_eq!(lines[3], "\t\t<div class=\"input-group\">");
        assert_eq!(
            lines[4],
            "\t\t\t<input id=\"date\" name=\"Date\" class=\"form-control\" type=\"text\" "
        );
        assert!(lines[5].contains("#date=\"ngModel\" pattern="));
        assert!(lines[5].contains("required"));
        assert_eq!(
            lines[6],
            "\t\t\t\t   [(ngModel)]=\"model.Date\" (blur)=\"model.Date = dateFormat(model.Date)\"   />"
        );
        assert_eq!(
            lines[7],
            "\t\t\t<my-datepicker [dateModel]=\"model.Date\" [controlVariable]=\"date\" (dateModelChange)=\"model.Date = $event\" class=\"input-group-btn\"></my-datepicker>"
        );
        assert_eq!(lines[9], "\t\t<validate-span [controlVariable]=\"date\"></validate-span>");
    }

    #[test]
    fn test_ngx_date_binds_datepicker() {
        let date = rule(&vector_schema(), "Date");
        let html = TemplateChain::standard()
            .generate(&date, &FormGroupLayout::default())
            .unwrap();
        assert!(html.contains("bsDatepicker #dbDate=\"bsDatepicker\" required \n"));
        assert!(html.contains("(ngModelChange)=\"model.Date = dateFormat($event)\""));
        assert!(html.contains("(click)=\"dbDate.toggle()\""));
        assert!(html.ends_with("\t</div>\n</form-group>"));
    }

    #[test]
    fn test_select_lines() {
        let child_code = rule(&vector_schema(), "ChildCode");
        let html = TemplateChain::new(vec![
            Renderer::InputDate,
            Renderer::Select,
            Renderer::InputNumber,
            Renderer::InputString,
        ])
        .generate(&child_code, &FormGroupLayout::default())
        .unwrap();
        let lines = lines(&html);

        assert_eq!(lines.len(), 9);
        assert_eq!(
            lines[0],
            "<form-group [width]=\"4\" [controlVariable]=\"childCode\" [required]=\"false\">"
        );
        assert_eq!(
            lines[1],
            "\t<label class=\"control-label col-sm-6\" for=\"childCode\">ChildCode</label>"
        );
        assert_eq!(
            lines[3],
            "\t\t<select class=\"form-control\" name=\"ChildCode\" id=\"childCode\" required"
        );
        assert_eq!(lines[4], "\t\t\t\t[(ngModel)]=\"model.ChildCode\" #childCode=\"ngModel\"");
        assert_eq!(lines[5], "\t\t\t\tcode-options [codes]=\"getCode('Hospital')\">");
        assert_eq!(lines[6], "\t\t</select>");
    }

    #[test]
    fn test_select_for_lines() {
        let code = rule(&vector_schema(), "Code");
        let html = TemplateChain::standard()
            .generate(&code, &FormGroupLayout::default())
            .unwrap();
        let lines = lines(&html);

        assert_eq!(lines.len(), 9);
        assert_eq!(
            lines[0],
            "<form-group [width]=\"4\" [controlVariable]=\"code\" [required]=\"true\">"
        );
        assert_eq!(
            lines[3],
            "\t\t<select class=\"form-control\" name=\"Code\" id=\"code\" required"
        );
        assert_eq!(lines[4], "\t\t\t\t[(ngModel)]=\"model.Code\" #code=\"ngModel\"");
        assert_eq!(
            lines[5],
            "\t\t\t\t(ngModelChange)=\"onDropdownChange($event, 'Hospital'); model.ChildCode = '';\""
        );
        assert_eq!(
            lines[6],
            "\t\t\t\tcode-options [codes]=\"getCode('County')\"></select>"
        );
    }

    #[test]
    fn test_single_checkbox_lines() {
        let check = rule(&vector_schema_2(), "Check");
        let html = TemplateChain::new(vec![Renderer::Check, Renderer::InputString])
            .generate(&check, &FormGroupLayout::default())
            .unwrap();
        let lines = lines(&html);

        assert_eq!(lines.len(), 7);
        assert_eq!(
            lines[0],
            "<form-group [width]=\"4\" [controlVariable]=\"check\" [required]=\"true\">"
        );
        assert_eq!(
            lines[3],
            "\t\t<input type=\"checkbox\" name=\"Check\" required #check=\"ngModel\""
        );
        assert_eq!(lines[4], "\t\t\t   [(ngModel)]=\"model.Check\" />");
    }

    #[test]
    fn test_multi_checkbox_suffixes_option_value() {
        let mut rule = PropertyRule::new("Flags", InputTag::Checkbox);
        rule.radio_options = vec![EnumOption::new("A", 1), EnumOption::new("B", 2)];
        let html = Renderer::Check
            .render(&rule, &FormGroupLayout::default())
            .unwrap();
        let lines = lines(&html);

        assert_eq!(lines.len(), 3 + 2 * 6 + 2);
        assert_eq!(lines[1], "\t<label class=\"control-label col-sm-3\" for=\"flags\">Flags</label>");
        assert_eq!(
            lines[5],
            "\t\t\t\t<input type=\"checkbox\" id=\"flags\" name=\"Flags1\" value=\"1\" #flags=\"ngModel\""
        );
        assert_eq!(lines[6], "\t\t\t\t\t   [(ngModel)]=\"model.Flags1\" />A1");
    }

    #[test]
    fn test_radio_lines() {
        let radio = rule(&vector_schema_2(), "Radio");
        let html = TemplateChain::new(vec![Renderer::Radio, Renderer::InputString])
            .generate(&radio, &FormGroupLayout::default())
            .unwrap();
        let lines = lines(&html);

        assert_eq!(lines.len(), 23);
        assert_eq!(
            lines[0],
            "<form-group [width]=\"4\" [controlVariable]=\"radio\" [required]=\"false\">"
        );
        assert_eq!(lines[1], "\t<label class=\"control-label col-sm-3\" for=\"radio\">Radio</label>");
        assert_eq!(lines[2], "\t<div class=\"col-sm-9\">");
        assert_eq!(lines[3], "\t\t<div class=\"radio radio-inline\">");
        assert_eq!(
            lines[5],
            "\t\t\t\t<input type=\"radio\" id=\"radio\" name=\"Radio\" value=\"0\" #radio=\"ngModel\""
        );
        assert_eq!(lines[6], "\t\t\t\t\t   [(ngModel)]=\"model.Radio\" />Option1");
        assert_eq!(lines[7], "\t\t\t</label>");
        assert_eq!(lines[21], "\t</div>");
        assert_eq!(lines[22], "</form-group>");
    }

    #[test]
    fn test_radio_without_options_fails() {
        let rule = PropertyRule::new("Kind", InputTag::Radio);
        let err = Renderer::Radio
            .render(&rule, &FormGroupLayout::default())
            .expect_err("no options");
        assert!(matches!(err, TemplateError::MissingRadioOptions(name) if name == "Kind"));
    }
}
