//! # Angular form generation
//!
//! Turns a declarative [`ModelSchema`] into Angular template-driven form markup and a matching
//! TypeScript model class.
//!
//! ```text
//! ModelSchema ──ModelParser::create_properties──▶ Vec<PropertyRule>
//!                                                     │
//!                              TemplateChain::generate ▼
//!                                          <form-group> HTML per field
//! ```
//!
//! ## Example
//!
//! ```
//! use ng_template::{FieldDescriptor, FieldKind, FormGroupLayout, ModelParser, ModelSchema};
//!
//! let schema = ModelSchema::new(
//!     "Patient",
//!     vec![
//!         FieldDescriptor::text("Name").required().max_length(30),
//!         FieldDescriptor::new("Age", FieldKind::Integer).range(0, 150),
//!     ],
//! );
//! let html = ModelParser::create_form(&schema, &FormGroupLayout::default()).unwrap();
//! assert!(html.contains("maxlength=\"30\""));
//! ```

pub mod codes;
pub mod descriptor;
pub mod error;
pub mod layout;
pub mod parser;
pub mod rule;
pub mod template;
pub mod typescript;

pub use codes::code_value;
pub use descriptor::{
    Display, Dropdown, DropdownFor, EnumOption, FieldDescriptor, FieldKind, ModelSchema,
    StringLength, ValueRange,
};
pub use error::{TemplateError, TemplateResult};
pub use layout::FormGroupLayout;
pub use parser::ModelParser;
pub use rule::{InputTag, PropertyRule, PropertyValidation, ValidationType};
pub use template::{Renderer, TemplateChain};
