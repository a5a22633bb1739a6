use crate::rule::InputTag;
use admin_core::AdminError;

/// Errors raised while turning a model schema into Angular markup.
///
/// Every variant is a wiring or schema mistake. None of them is expected at runtime.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// The renderer chain has no renderer for the property's input tag
    #[error("沒有處理 Property: {property} - {tag} 的對應 Template")]
    NoHandler { property: String, tag: InputTag },

    /// Form grid outside the supported table
    #[error("僅接受 3, 4, 6, 8, 12 這五個參數 (got {0})")]
    InvalidFormGrid(u32),

    /// Radio rendering needs at least one option
    #[error("使用 Enum Type 但沒有 Radio Options: {0}")]
    MissingRadioOptions(String),

    /// The field carries no dropdown metadata
    #[error("找不到對應的 DropdownAttribute: {0}")]
    MissingDropdown(String),

    /// The schema or record has no field with this name
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("failed to read schema file: {0}")]
    SchemaRead(std::io::Error),

    #[error("failed to deserialize schema: {0}")]
    SchemaDeserialization(serde_yaml::Error),

    #[error(transparent)]
    Admin(#[from] AdminError),
}

pub type TemplateResult<T> = std::result::Result<T, TemplateError>;
