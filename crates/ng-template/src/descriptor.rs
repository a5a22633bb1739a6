//! Declarative model schema.
//!
//! A [`ModelSchema`] lists the fields of a form model in declaration order together with their
//! validation constraints, display metadata and dropdown wiring. Schemas are built in Rust with
//! the builder methods on [`FieldDescriptor`] or loaded from YAML:
//!
//! ```yaml
//! name: VectorClass
//! fields:
//!   - { name: Id, kind: integer, range: { min: 10, max: 20 } }
//!   - name: FirstName
//!     kind: text
//!     required: true
//!     string_length: { max: 30 }
//!     display: { name: 名字, description: 此為必須輸入的欄位 }
//!   - name: Code
//!     kind: text
//!     dropdown_for: { code_map: County, code_map_for: Hospital, child_field_name: ChildCode }
//! ```

use crate::error::{TemplateError, TemplateResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Storage type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Integer,
    Float,
    Double,
    Decimal,
    Boolean,
    Date,
    NullableDate,
    Enum,
    /// Enum whose options may be combined; rendered as one checkbox per option.
    Flags,
}

impl FieldKind {
    /// Kinds that always hold a value and are therefore implicitly required.
    pub fn is_implicitly_required(&self) -> bool {
        matches!(
            self,
            FieldKind::Date
                | FieldKind::Integer
                | FieldKind::Float
                | FieldKind::Double
                | FieldKind::Boolean
        )
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            FieldKind::Integer | FieldKind::Float | FieldKind::Double | FieldKind::Decimal
        )
    }

    pub fn is_date(&self) -> bool {
        matches!(self, FieldKind::Date | FieldKind::NullableDate)
    }
}

/// One member of an enum field, rendered as a radio button or checkbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumOption {
    pub name: String,
    pub value: i64,
}

impl EnumOption {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StringLength {
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Display {
    pub name: Option<String>,
    pub description: Option<String>,
    pub prompt: Option<String>,
}

/// A standalone dropdown bound to a code category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dropdown {
    /// Item type of the code category.
    pub code_map: String,
    /// Item type of the parent category, when codes are scoped by a parent code.
    pub parent_code_map: Option<String>,
    parent_field_name: Option<String>,
}

impl Dropdown {
    pub fn new(code_map: impl Into<String>) -> Self {
        Self {
            code_map: code_map.into(),
            ..Default::default()
        }
    }

    pub fn with_parent(mut self, parent_code_map: impl Into<String>) -> Self {
        self.parent_code_map = Some(parent_code_map.into());
        self
    }

    pub fn with_parent_field(mut self, field_name: impl Into<String>) -> Self {
        self.parent_field_name = Some(field_name.into());
        self
    }

    /// Field holding the parent code value.
    ///
    /// Empty when no parent code map is set; otherwise the explicit field name, falling back to
    /// the parent code map.
    pub fn parent_field_name(&self) -> &str {
        match self.parent_code_map.as_deref() {
            None | Some("") => "",
            Some(parent) => self.parent_field_name.as_deref().unwrap_or(parent),
        }
    }
}

/// A dropdown whose selection drives a child dropdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropdownFor {
    pub code_map: String,
    /// Item type of the child category.
    pub code_map_for: String,
    /// Model field of the child dropdown, reset when this one changes.
    pub child_field_name: Option<String>,
}

impl DropdownFor {
    pub fn new(code_map: impl Into<String>, code_map_for: impl Into<String>) -> Self {
        Self {
            code_map: code_map.into(),
            code_map_for: code_map_for.into(),
            child_field_name: None,
        }
    }

    pub fn with_child_field(mut self, field_name: impl Into<String>) -> Self {
        self.child_field_name = Some(field_name.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub options: Vec<EnumOption>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub string_length: Option<StringLength>,
    #[serde(default)]
    pub range: Option<ValueRange>,
    #[serde(default)]
    pub display: Option<Display>,
    #[serde(default)]
    pub dropdown: Option<Dropdown>,
    #[serde(default)]
    pub dropdown_for: Option<DropdownFor>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            options: Vec::new(),
            hidden: false,
            required: false,
            string_length: None,
            range: None,
            display: None,
            dropdown: None,
            dropdown_for: None,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn enumeration(name: impl Into<String>, options: Vec<EnumOption>) -> Self {
        Self {
            options,
            ..Self::new(name, FieldKind::Enum)
        }
    }

    pub fn flags(name: impl Into<String>, options: Vec<EnumOption>) -> Self {
        Self {
            options,
            ..Self::new(name, FieldKind::Flags)
        }
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn max_length(mut self, max: i64) -> Self {
        self.string_length = Some(StringLength { min: 0, max });
        self
    }

    pub fn length_between(mut self, min: i64, max: i64) -> Self {
        self.string_length = Some(StringLength { min, max });
        self
    }

    pub fn range(mut self, min: i64, max: i64) -> Self {
        self.range = Some(ValueRange { min, max });
        self
    }

    fn display_mut(&mut self) -> &mut Display {
        self.display.get_or_insert_with(Display::default)
    }

    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_mut().name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.display_mut().description = Some(description.into());
        self
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.display_mut().prompt = Some(prompt.into());
        self
    }

    pub fn dropdown(mut self, dropdown: Dropdown) -> Self {
        self.dropdown = Some(dropdown);
        self
    }

    pub fn dropdown_for(mut self, dropdown_for: DropdownFor) -> Self {
        self.dropdown_for = Some(dropdown_for);
        self
    }
}

/// A named form model: its fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSchema {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl ModelSchema {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn from_yaml_str(contents: &str) -> TemplateResult<Self> {
        serde_yaml::from_str(contents).map_err(TemplateError::SchemaDeserialization)
    }

    pub fn load(path: &Path) -> TemplateResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(TemplateError::SchemaRead)?;
        let schema = Self::from_yaml_str(&contents)?;
        tracing::debug!(path = %path.display(), model = %schema.name, fields = schema.fields.len(), "loaded model schema");
        Ok(schema)
    }
}
